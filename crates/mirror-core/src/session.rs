//! The interview session state machine.
//!
//! One session is a single pass over a fixed question list:
//! `NotStarted → InProgress(0) → … → InProgress(N-1) → Complete`.
//! Each accepted answer advances the index by one; the transition to
//! `Complete` happens implicitly when the last answer lands. The session
//! never fails on its own — blank or out-of-phase submissions are no-ops.

use mirror_types::question::QuestionList;

/// Where the session currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    NotStarted,
    InProgress { next_index: usize },
    Complete,
}

/// Single-owner, single-writer interview state.
///
/// Invariant: the next unanswered question index always equals
/// `answers.len()`.
pub struct InterviewSession {
    questions: QuestionList,
    started: bool,
    answers: Vec<String>,
}

impl InterviewSession {
    pub fn new(questions: QuestionList) -> Self {
        Self {
            questions,
            started: false,
            answers: Vec::new(),
        }
    }

    /// Start (or restart) the session, discarding any prior answers.
    /// Idempotent when called repeatedly.
    pub fn start(&mut self) {
        self.started = true;
        self.answers.clear();
    }

    /// Submit one answer. Returns `true` when the answer was accepted.
    ///
    /// Accepted only while in progress and when the trimmed text is
    /// non-empty; anything else is a silent no-op, matching the interview
    /// flow where blank submissions are ignored and the caller re-prompts.
    pub fn submit_answer(&mut self, text: &str) -> bool {
        if !self.started || self.is_complete() || text.trim().is_empty() {
            return false;
        }
        self.answers.push(text.to_string());
        true
    }

    /// Index of the next unanswered question, in `[0, N]`.
    pub fn next_index(&self) -> usize {
        self.answers.len()
    }

    /// The question currently awaiting an answer.
    /// `None` before `start()` and after completion.
    pub fn current_question(&self) -> Option<&str> {
        if !self.started || self.is_complete() {
            return None;
        }
        self.questions.get(self.next_index())
    }

    pub fn is_complete(&self) -> bool {
        self.started && self.answers.len() == self.questions.len()
    }

    pub fn phase(&self) -> SessionPhase {
        if !self.started {
            SessionPhase::NotStarted
        } else if self.is_complete() {
            SessionPhase::Complete
        } else {
            SessionPhase::InProgress {
                next_index: self.next_index(),
            }
        }
    }

    pub fn questions(&self) -> &QuestionList {
        &self.questions
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    /// The full transcript in question order.
    ///
    /// The `"Q: {q}\nA: {a}\n"` pair format is the summarizer contract and
    /// must stay bit-exact.
    pub fn transcript(&self) -> String {
        let mut out = String::new();
        for (question, answer) in self.questions.iter().zip(self.answers.iter()) {
            out.push_str("Q: ");
            out.push_str(question);
            out.push_str("\nA: ");
            out.push_str(answer);
            out.push('\n');
        }
        out
    }
}
