mod openai_compat;

pub use openai_compat::{compose_prompt, OpenAiCompatSummarizer};
