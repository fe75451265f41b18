//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod buttons;
pub mod console;
pub mod controller;
pub mod fetch;
pub mod tick;

pub use buttons::button_task;
pub use console::{console_task, ConsoleInput};
pub use controller::controller_task;
pub use fetch::fetch_task;
pub use tick::tick_task;
