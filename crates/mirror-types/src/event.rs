use serde::{Deserialize, Serialize};
use crate::report::ProfileReport;

/// Events emitted by the interview runtime.
/// The UI drains these each frame for reactive updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum InterviewEvent {
    /// A session started (or restarted), discarding any prior progress
    SessionStarted,

    /// The next unanswered question is being asked
    QuestionAsked { index: usize, question: String },

    /// An answer was accepted and appended to the transcript
    AnswerRecorded {
        index: usize,
        question: String,
        answer: String,
    },

    /// The last question was answered
    SessionComplete,

    /// The summarization call was dispatched to the provider
    SummaryStart,

    /// The provider returned a profile
    SummaryComplete { report: ProfileReport },

    /// An error occurred
    Error { message: String },
}
