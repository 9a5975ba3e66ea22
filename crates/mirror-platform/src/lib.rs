//! Browser adapters for the mirror-core ports.

pub mod llm;
pub mod storage;
