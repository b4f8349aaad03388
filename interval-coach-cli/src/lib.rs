// interval-coach-cli/src/lib.rs
pub mod cli; // Argument definitions
pub mod runner; // Line-mode workout runner
