//! Login / register form bound to the session context.

use api::auth_form::{FIELD_EMAIL, FIELD_PASSWORD, FIELD_USERNAME};
use api::{AuthForm as FormState, AuthMode, Redirect};
use dioxus::prelude::*;

use crate::auth::use_session;
use crate::components::{Button, ButtonVariant, Input};

/// Email/password form. Starts in `mode` and can switch in place.
///
/// `on_success` receives where to go once the session is established; the
/// shell owns navigation.
#[component]
pub fn AuthForm(mode: AuthMode, on_success: EventHandler<Redirect>) -> Element {
    let session = use_session();
    let mut draft = use_signal(move || FormState::new(mode));

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let session = session.clone();
        spawn(async move {
            draft.write().loading = true;
            let mut submitted = draft();
            let redirect = submitted.submit(&session.store).await;
            session.sync();
            draft.write().settle(&submitted);
            if let Some(redirect) = redirect {
                on_success.call(redirect);
            }
        });
    };

    let state = draft();
    let error_for = |field: &str| state.errors.get(field).unwrap_or_default().to_string();

    rsx! {
        div {
            class: "auth-card",
            h2 { class: "auth-title", "{state.mode.title()}" }

            if let Some(err) = &state.error {
                div { class: "alert alert-error", "{err}" }
            }

            form {
                onsubmit: handle_submit,
                Input {
                    id: "auth-email",
                    label: "Email",
                    r#type: "email",
                    placeholder: "Enter your email",
                    value: state.email.clone(),
                    error: error_for(FIELD_EMAIL),
                    oninput: move |evt: FormEvent| draft.write().set_email(evt.value()),
                }
                Input {
                    id: "auth-password",
                    label: "Password",
                    r#type: "password",
                    placeholder: "Enter your password",
                    value: state.password.clone(),
                    error: error_for(FIELD_PASSWORD),
                    oninput: move |evt: FormEvent| draft.write().set_password(evt.value()),
                }
                if state.mode == AuthMode::Register {
                    Input {
                        id: "auth-username",
                        label: "Username",
                        placeholder: "Enter your username",
                        value: state.username.clone(),
                        error: error_for(FIELD_USERNAME),
                        oninput: move |evt: FormEvent| draft.write().set_username(evt.value()),
                    }
                }

                div {
                    class: "auth-actions",
                    Button {
                        variant: ButtonVariant::Primary,
                        r#type: "submit",
                        disabled: state.loading,
                        if state.loading { "Please wait..." } else { "{state.mode.title()}" }
                    }
                    Button {
                        variant: ButtonVariant::Link,
                        onclick: move |_| draft.write().toggle_mode(),
                        "{state.mode.switch_label()}"
                    }
                }
            }
        }
    }
}
