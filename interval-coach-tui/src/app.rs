// interval-coach-tui/src/app.rs
mod actions;
pub mod state;

pub use state::{ActiveModal, App};
