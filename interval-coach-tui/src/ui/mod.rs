mod complete;
mod layout;
mod modals;
mod ready;
mod status_bar;
mod workout;

// Re-export the main render function
pub use layout::render_ui;
