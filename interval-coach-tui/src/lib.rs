// interval-coach-tui/src/lib.rs
pub mod app; // Application state
pub mod ui; // UI rendering logic
