#[cfg(feature = "json")]
pub mod json;

#[cfg(feature = "json")]
pub use json::JsonDocument;

#[cfg(feature = "umya")]
pub mod umya;

#[cfg(feature = "umya")]
pub use umya::UmyaDocument;
