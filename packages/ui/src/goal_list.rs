//! The current user's goals, refetched whenever a goal is created.

use api::text::{capitalize_first_letter, truncate_text};
use api::{Goal, GoalEvents, GoalListController};
use dioxus::prelude::*;

use crate::auth::use_session;
use crate::components::{Button, ButtonVariant};
use crate::icons::FaTrash;
use crate::Icon;

const DESCRIPTION_LIMIT: usize = 100;

#[component]
pub fn GoalList() -> Element {
    let session = use_session();
    let events = use_context::<GoalEvents>();
    let controller = use_hook(|| GoalListController::new(session.store.client().clone()));
    let mut state = use_signal(|| controller.state());

    use_drop({
        let controller = controller.clone();
        move || controller.dispose()
    });

    // Initial fetch, then one refetch per goals-changed event
    use_future({
        let controller = controller.clone();
        let session = session.clone();
        move || {
            let controller = controller.clone();
            let session = session.clone();
            let subscriber = events.subscribe();
            async move {
                state.with_mut(|s| s.loading = true);
                controller.refresh(session.token().as_deref()).await;
                state.set(controller.state());

                controller
                    .follow(subscriber, || session.token(), |latest| state.set(latest))
                    .await;
            }
        }
    });

    let on_delete = move |id: i64| {
        let controller = controller.clone();
        let token = session.token();
        spawn(async move {
            controller.delete(token.as_deref(), id).await;
            state.set(controller.state());
        });
    };

    let current = state();

    rsx! {
        div {
            class: "goal-list",
            h2 { "My Fitness Goals" }

            if let Some(err) = &current.error {
                div { class: "alert alert-error", "{err}" }
            }

            if current.loading {
                div { class: "loading", "Loading..." }
            } else if current.goals.is_empty() {
                p { class: "empty", "No goals yet. Create one above." }
            } else {
                ul {
                    for goal in current.goals.iter() {
                        GoalItem {
                            key: "{goal.id}",
                            goal: goal.clone(),
                            on_delete: on_delete.clone(),
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn GoalItem(goal: Goal, on_delete: EventHandler<i64>) -> Element {
    let id = goal.id;
    let description = truncate_text(&goal.description, DESCRIPTION_LIMIT);
    let unit = capitalize_first_letter(&goal.unit);

    rsx! {
        li {
            class: "goal-item",
            div {
                class: "goal-info",
                strong { "{goal.name}" }
                " - {description}"
                br {}
                "Target: {goal.target} {unit}, Current: {goal.current}"
            }
            Button {
                variant: ButtonVariant::Danger,
                title: "Delete",
                onclick: move |_| on_delete.call(id),
                Icon { icon: FaTrash, width: 14, height: 14 }
                " Delete"
            }
        }
    }
}
