//! Protected dashboard: goal form above the goal list.

use api::{GoalEvents, Redirect};
use dioxus::prelude::*;
use ui::{use_session, GoalForm, GoalList};

use crate::views::route_for;

#[component]
pub fn Dashboard() -> Element {
    let session = use_session();
    let nav = use_navigator();

    // One channel per dashboard: the form publishes, the list refetches
    use_context_provider(GoalEvents::new);

    if !session.is_authenticated() {
        nav.replace(route_for(Redirect::Home));
        return rsx! {};
    }

    rsx! {
        div {
            class: "page",
            h1 { "Dashboard" }
            GoalForm {}
            GoalList {}
        }
    }
}
