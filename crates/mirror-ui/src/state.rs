//! UI-level state that drives rendering.
//! This is a read-only projection of the interview runtime state,
//! updated each frame by draining the EventBus.

use mirror_core::runtime::RuntimeState;
use mirror_types::event::InterviewEvent;

/// State visible to UI panels
pub struct UiState {
    /// Answered Q/A pairs, profile, and errors — in display order
    pub entries: Vec<ChatEntry>,
    /// The question awaiting an answer, if any
    pub current_question: Option<CurrentQuestion>,
    /// Current runtime status
    pub runtime_status: RuntimeState,
    /// Input field content
    pub input_text: String,
    /// Whether settings panel is open
    pub show_settings: bool,
    /// Status line text
    pub status_text: String,
}

/// A chat entry for display
#[derive(Clone)]
pub struct ChatEntry {
    pub role: String,
    pub content: String,
}

/// The question currently on screen
#[derive(Clone)]
pub struct CurrentQuestion {
    /// 1-based, for "Question {n}: …" display
    pub number: usize,
    pub text: String,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            current_question: None,
            runtime_status: RuntimeState::Idle,
            input_text: String::new(),
            show_settings: false,
            status_text: "Press Start Session to begin".to_string(),
        }
    }

    /// Process events from the EventBus and update UI state
    pub fn process_events(&mut self, events: Vec<InterviewEvent>) {
        for event in events {
            match event {
                InterviewEvent::SessionStarted => {
                    self.entries.clear();
                    self.current_question = None;
                    self.runtime_status = RuntimeState::Idle;
                    self.input_text.clear();
                    self.status_text = "Session started".to_string();
                }
                InterviewEvent::QuestionAsked { index, question } => {
                    self.current_question = Some(CurrentQuestion {
                        number: index + 1,
                        text: question,
                    });
                    self.status_text = format!("Question {}", index + 1);
                }
                InterviewEvent::AnswerRecorded {
                    question, answer, ..
                } => {
                    self.entries.push(ChatEntry {
                        role: "interviewer".to_string(),
                        content: question,
                    });
                    self.entries.push(ChatEntry {
                        role: "user".to_string(),
                        content: answer,
                    });
                }
                InterviewEvent::SessionComplete => {
                    self.current_question = None;
                    self.entries.push(ChatEntry {
                        role: "interviewer".to_string(),
                        content: "All questions answered. Generating your psychological profile..."
                            .to_string(),
                    });
                    self.status_text = "Interview complete".to_string();
                }
                InterviewEvent::SummaryStart => {
                    self.runtime_status = RuntimeState::Summarizing;
                    self.status_text = "Generating profile...".to_string();
                }
                InterviewEvent::SummaryComplete { report } => {
                    self.entries.push(ChatEntry {
                        role: "profile".to_string(),
                        content: report.summary,
                    });
                    self.runtime_status = RuntimeState::Idle;
                    self.status_text = "Profile ready".to_string();
                }
                InterviewEvent::Error { message } => {
                    self.runtime_status = RuntimeState::Error(message.clone());
                    self.status_text = format!("Error: {}", message);
                    self.entries.push(ChatEntry {
                        role: "error".to_string(),
                        content: message,
                    });
                }
            }
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.runtime_status, RuntimeState::Summarizing)
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
