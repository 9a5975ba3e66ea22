pub mod interview;
pub mod settings;
