use dioxus::prelude::*;

use crate::auth::use_session;
use crate::components::{Button, ButtonVariant};

/// Top navigation. Links depend on whether a session is active.
#[component]
pub fn Header() -> Element {
    let session = use_session();
    let navigator = use_navigator();
    let authenticated = session.is_authenticated();

    let handle_logout = move |_| {
        let redirect = session.logout();
        navigator.replace(redirect.path());
    };

    rsx! {
        header {
            class: "navbar",
            nav {
                ul {
                    li { Link { to: "/", "Home" } }
                    if authenticated {
                        li { Link { to: "/dashboard", "Dashboard" } }
                        li {
                            Button {
                                variant: ButtonVariant::Danger,
                                onclick: handle_logout,
                                "Logout"
                            }
                        }
                    } else {
                        li { Link { to: "/login", "Login" } }
                        li { Link { to: "/register", "Register" } }
                    }
                }
            }
        }
    }
}
