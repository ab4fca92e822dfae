//! A library to switch display outputs through xrandr and a menu prompt.
//!
//! This library parses the status report of `xrandr --query` into a topology
//! of outputs, derives the legal actions for each output (activate,
//! deactivate, change resolution), and resolves a chosen action into the
//! xrandr command that applies it, prompting for placement or resolution
//! through a dmenu-compatible selector where needed.

mod exec;
mod menu;
mod parser;
mod resolver;
mod topology;
mod types;

pub use exec::*;
pub use menu::*;
pub use parser::*;
pub use resolver::*;
pub use topology::*;
pub use types::*;
