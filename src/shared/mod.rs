pub mod shutdown;
pub mod types;
pub mod utills;
pub mod validations;

pub use types::*;
pub use utills::*;
