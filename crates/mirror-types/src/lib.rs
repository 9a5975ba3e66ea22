pub mod question;
pub mod event;
pub mod config;
pub mod report;
pub mod error;


pub use error::MirrorError;
pub type Result<T> = std::result::Result<T, MirrorError>;
