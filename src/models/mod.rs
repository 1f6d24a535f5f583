pub mod appointment;
pub mod attachment;
pub mod encounter;
pub mod enums;
pub mod history;
pub mod patient;

pub use appointment::*;
pub use attachment::*;
pub use encounter::*;
pub use enums::*;
pub use history::*;
pub use patient::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },

    #[error("Invalid date value for {field}: {value}")]
    InvalidDate { field: String, value: String },
}
