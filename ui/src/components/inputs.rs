//! Text inputs shared by the forms

use dioxus::prelude::*;

#[derive(PartialEq, Clone, Debug)]
pub enum InputType {
    Text,
    Password,
}

impl InputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Password => "password",
        }
    }
}

#[derive(Props, PartialEq, Clone)]
pub struct FormInputProps {
    pub label: String,
    pub value: String,
    pub placeholder: String,
    pub input_type: InputType,
    pub disabled: bool,
    pub on_change: EventHandler<String>,
}

#[component]
pub fn FormInput(props: FormInputProps) -> Element {
    rsx! {
        div {
            class: "input-section",
            label {
                class: "input-label",
                "{props.label}"
            }
            input {
                class: "input-field",
                r#type: "{props.input_type.as_str()}",
                value: "{props.value}",
                placeholder: "{props.placeholder}",
                disabled: props.disabled,
                autocomplete: "off",
                oninput: move |event| props.on_change.call(event.value())
            }
        }
    }
}
