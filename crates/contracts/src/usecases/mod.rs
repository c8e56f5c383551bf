pub mod common;
pub mod u501_field_survey;
