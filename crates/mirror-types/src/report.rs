use serde::{Deserialize, Serialize};

/// The outcome of one completed interview: the exact transcript that was
/// sent to the provider and the profile text that came back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileReport {
    pub id: String,
    pub generated_at: String,
    pub transcript: String,
    pub summary: String,
}

impl ProfileReport {
    pub fn new(transcript: String, summary: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            transcript,
            summary,
        }
    }
}
