//! Landing page.

use dioxus::prelude::*;
use ui::use_session;

use crate::Route;

#[component]
pub fn Home() -> Element {
    let session = use_session();

    rsx! {
        div {
            class: "page",
            h1 { "Welcome to the Fitness Tracker!" }

            if session.is_authenticated() {
                p { "You are logged in. Welcome!" }
                Link { to: Route::Dashboard {}, "Go to Dashboard" }
            } else {
                p { "Please log in or register to start tracking your fitness goals." }
                Link { to: Route::Login {}, "Login" }
                Link { to: Route::Register {}, "Register" }
            }
        }
    }
}
