use api::goals::{FIELD_DESCRIPTION, FIELD_NAME, FIELD_TARGET, FIELD_UNIT};
use api::{GoalEvents, GoalFormController};
use dioxus::prelude::*;

use crate::auth::use_session;
use crate::components::{Button, ButtonVariant, Input};

/// Form for creating a goal. Publishes on the [`GoalEvents`] found in
/// context after every successful create.
#[component]
pub fn GoalForm() -> Element {
    let session = use_session();
    let events = use_context::<GoalEvents>();
    let controller = use_hook(|| GoalFormController::new(session.store.client().clone()));
    let mut state = use_signal(|| controller.state());
    // Raw target text, kept separately so "1." or "abc" survive re-renders
    let mut target_text = use_signal(String::new);

    use_drop({
        let controller = controller.clone();
        move || controller.dispose()
    });

    let on_name = {
        let controller = controller.clone();
        move |evt: FormEvent| {
            controller.set_name(evt.value());
            state.set(controller.state());
        }
    };
    let on_description = {
        let controller = controller.clone();
        move |evt: FormEvent| {
            controller.set_description(evt.value());
            state.set(controller.state());
        }
    };
    let on_target = {
        let controller = controller.clone();
        move |evt: FormEvent| {
            controller.set_target_input(&evt.value());
            target_text.set(evt.value());
            state.set(controller.state());
        }
    };
    let on_unit = {
        let controller = controller.clone();
        move |evt: FormEvent| {
            controller.set_unit(evt.value());
            state.set(controller.state());
        }
    };

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let controller = controller.clone();
        let events = events.clone();
        let token = session.token();
        spawn(async move {
            state.write().submitting = true;
            let created = controller.submit(token.as_deref(), &events).await;
            if created {
                target_text.set(String::new());
            }
            state.set(controller.state());
        });
    };

    let current = state();
    let error_for = |field: &str| current.errors.get(field).unwrap_or_default().to_string();

    rsx! {
        div {
            class: "goal-form",
            h2 { "Create New Goal" }

            if let Some(message) = &current.message {
                div { class: "alert alert-error", "{message}" }
            }
            if let Some(notice) = &current.notice {
                div { class: "alert alert-success", "{notice}" }
            }

            form {
                onsubmit: on_submit,
                Input {
                    id: "goal-name",
                    label: "Goal Name",
                    placeholder: "Enter goal name",
                    value: current.draft.name.clone(),
                    error: error_for(FIELD_NAME),
                    oninput: on_name,
                }
                Input {
                    id: "goal-description",
                    label: "Description",
                    placeholder: "Enter description",
                    value: current.draft.description.clone(),
                    error: error_for(FIELD_DESCRIPTION),
                    oninput: on_description,
                }
                Input {
                    id: "goal-target",
                    label: "Target Value",
                    r#type: "number",
                    placeholder: "Enter target value",
                    value: target_text(),
                    error: error_for(FIELD_TARGET),
                    oninput: on_target,
                }
                Input {
                    id: "goal-unit",
                    label: "Unit",
                    placeholder: "Enter unit (e.g., kg, steps)",
                    value: current.draft.unit.clone(),
                    error: error_for(FIELD_UNIT),
                    oninput: on_unit,
                }
                Button {
                    variant: ButtonVariant::Primary,
                    r#type: "submit",
                    disabled: current.submitting,
                    if current.submitting { "Creating..." } else { "Create Goal" }
                }
            }
        }
    }
}
