use dioxus::prelude::*;

#[derive(Props, PartialEq, Clone)]
pub struct ErrorBannerProps {
    pub message: String,
}

/// Renders `Error: <message>`, or nothing for an empty message.
#[component]
pub fn ErrorBanner(props: ErrorBannerProps) -> Element {
    if props.message.is_empty() {
        return rsx! {};
    }

    rsx! {
        div {
            class: "error-banner",
            role: "alert",
            "Error: {props.message}"
        }
    }
}
