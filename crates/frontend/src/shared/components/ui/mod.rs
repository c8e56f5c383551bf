pub mod checkbox;
pub mod input;
pub mod select;
pub mod textarea;

pub use checkbox::{Checkbox, Checklist};
pub use input::Input;
pub use select::Select;
pub use textarea::Textarea;
