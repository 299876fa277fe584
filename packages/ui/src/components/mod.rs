//! Basic presentational building blocks shared by the views.

mod button;
pub use button::{Button, ButtonVariant};

mod input;
pub use input::Input;
