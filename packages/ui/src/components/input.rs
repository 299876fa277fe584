use dioxus::prelude::*;

/// Labelled text input with an optional error line underneath.
///
/// An empty `error` renders nothing.
#[component]
pub fn Input(
    #[props(default)] id: String,
    #[props(default)] label: String,
    #[props(default = "text".to_string())] r#type: String,
    #[props(default)] placeholder: String,
    #[props(default)] error: String,
    value: String,
    oninput: EventHandler<FormEvent>,
) -> Element {
    let invalid = !error.is_empty();

    rsx! {
        div {
            class: "field",
            if !label.is_empty() {
                label { r#for: id.clone(), class: "field-label", "{label}" }
            }
            input {
                id: id,
                class: if invalid { "field-input field-input--invalid" } else { "field-input" },
                r#type: r#type,
                placeholder: placeholder,
                value: value,
                oninput: move |evt| oninput.call(evt),
            }
            if invalid {
                p { class: "field-error", "{error}" }
            }
        }
    }
}
