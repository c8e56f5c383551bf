pub mod loading_error;
pub mod ui;

pub use loading_error::{ErrorDisplay, Loading};
