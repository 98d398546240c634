#[cfg(feature = "json")]
pub mod json;
pub mod value;

pub use value::*;
