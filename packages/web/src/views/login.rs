//! Login page view.

use api::{AuthMode, Redirect};
use dioxus::prelude::*;
use ui::{use_session, AuthForm};

use crate::views::route_for;

/// Login page component.
#[component]
pub fn Login() -> Element {
    let session = use_session();
    let nav = use_navigator();

    // Already signed in
    if session.is_authenticated() {
        nav.replace(route_for(Redirect::Dashboard));
    }

    rsx! {
        div {
            class: "page",
            AuthForm {
                mode: AuthMode::Login,
                on_success: move |redirect| {
                    nav.replace(route_for(redirect));
                },
            }
        }
    }
}
