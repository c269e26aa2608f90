pub mod sessions;
pub mod state;
pub mod tasks;
