//! User Interface Components
//!
//! - **forms**: the legacy and modern SDK panels
//! - **display**: error banner, status chips and the busy indicator
//! - **inputs**: labelled text and password fields

pub mod display;
pub mod forms;
pub mod inputs;
