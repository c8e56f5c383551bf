pub mod api;
pub mod field_widget;
pub mod view;
pub mod view_model;

pub use view::FieldSurveyPage;
