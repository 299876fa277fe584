//! Registration page view.

use api::{AuthMode, Redirect};
use dioxus::prelude::*;
use ui::{use_session, AuthForm};

use crate::views::route_for;

/// Register page component.
#[component]
pub fn Register() -> Element {
    let session = use_session();
    let nav = use_navigator();

    if session.is_authenticated() {
        nav.replace(route_for(Redirect::Dashboard));
    }

    rsx! {
        div {
            class: "page",
            AuthForm {
                mode: AuthMode::Register,
                on_success: move |redirect| {
                    nav.replace(route_for(redirect));
                },
            }
            p {
                "Already have an account? "
                Link { to: crate::Route::Login {}, "Sign in" }
            }
        }
    }
}
