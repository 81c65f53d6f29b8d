mod core;
mod monitor;

pub use core::{cmd_dispatch, cmd_slideshow};
pub use monitor::cmd_monitor;
