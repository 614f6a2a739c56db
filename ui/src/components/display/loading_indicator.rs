use dioxus::prelude::*;

#[derive(Props, PartialEq, Clone)]
pub struct LoadingIndicatorProps {
    /// An operation holds the controller
    pub busy: bool,
    pub message: String,
}

/// Status line while a provider call is outstanding; renders nothing when idle.
#[component]
pub fn LoadingIndicator(props: LoadingIndicatorProps) -> Element {
    if !props.busy {
        return rsx! {};
    }

    rsx! {
        div {
            class: "busy-indicator",
            role: "status",
            "⏳ {props.message}"
        }
    }
}
