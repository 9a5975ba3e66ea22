//! Interview runtime — drives the session state machine and the one
//! summarization call.
//!
//! The flow mirrors the interview itself:
//! 1. `start_session` resets everything and asks the first question
//! 2. `submit_answer` advances one step per accepted answer (synchronous)
//! 3. once the session is complete, `run_summary` sends the transcript to
//!    the provider exactly once and stores the resulting report
//!
//! Everything observable by the UI is emitted on the event bus.

use mirror_types::{
    Result, MirrorError,
    config::MirrorConfig,
    event::InterviewEvent,
    question::QuestionList,
    report::ProfileReport,
};
use crate::event_bus::EventBus;
use crate::ports::{SummarizerPort, SummaryRequest, SummaryResponse};
use crate::session::InterviewSession;

/// The interview runtime state
pub struct InterviewRuntime {
    pub config: MirrorConfig,
    pub session: InterviewSession,
    pub event_bus: EventBus,
    pub state: RuntimeState,
    /// Set once per completed session; cleared by `start_session`.
    pub report: Option<ProfileReport>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeState {
    Idle,
    Summarizing,
    Error(String),
}

impl InterviewRuntime {
    pub fn new(config: MirrorConfig, questions: QuestionList, event_bus: EventBus) -> Self {
        Self {
            config,
            session: InterviewSession::new(questions),
            event_bus,
            state: RuntimeState::Idle,
            report: None,
        }
    }

    /// Start or restart the interview, discarding prior progress and any
    /// previous report.
    pub fn start_session(&mut self) {
        self.session.start();
        self.report = None;
        self.state = RuntimeState::Idle;
        self.event_bus.emit(InterviewEvent::SessionStarted);
        self.emit_current_question();
    }

    /// Feed one answer to the session. Blank answers and answers outside an
    /// in-progress session are silently ignored; the caller re-prompts.
    pub fn submit_answer(&mut self, text: &str) {
        let index = self.session.next_index();
        let question = self
            .session
            .current_question()
            .map(str::to_string)
            .unwrap_or_default();

        if !self.session.submit_answer(text) {
            return;
        }

        self.event_bus.emit(InterviewEvent::AnswerRecorded {
            index,
            question,
            answer: text.to_string(),
        });

        if self.session.is_complete() {
            self.event_bus.emit(InterviewEvent::SessionComplete);
        } else {
            self.emit_current_question();
        }
    }

    /// Check the exactly-once guards and mark a summary call in flight.
    ///
    /// Returns the request to send to the provider. Repeat calls while a
    /// report exists or a call is in flight return `Ok(None)`, and calling
    /// before completion is a caller bug surfaced as `SessionIncomplete`.
    ///
    /// Callers holding the runtime behind a `RefCell` must drop their
    /// borrow between this and `finish_summary`: the provider call is
    /// awaited unborrowed so the frame loop can keep reading the runtime
    /// while the call is in flight.
    pub fn begin_summary(&mut self) -> Result<Option<SummaryRequest>> {
        if !self.session.is_complete() {
            return Err(MirrorError::SessionIncomplete);
        }
        if self.report.is_some() || self.state == RuntimeState::Summarizing {
            return Ok(None);
        }

        self.state = RuntimeState::Summarizing;
        self.event_bus.emit(InterviewEvent::SummaryStart);

        Ok(Some(SummaryRequest {
            transcript: self.session.transcript(),
            model: self.config.llm.model.clone(),
            max_tokens: self.config.llm.max_tokens,
            temperature: self.config.llm.temperature,
        }))
    }

    /// Record the provider's outcome for an in-flight summary call.
    ///
    /// Outcomes arriving after a restart (the runtime is no longer
    /// `Summarizing`) belong to a discarded session and are dropped. The
    /// provider call is never retried; its error propagates after being
    /// emitted for display.
    pub fn finish_summary(&mut self, outcome: Result<SummaryResponse>) -> Result<()> {
        if self.state != RuntimeState::Summarizing {
            return Ok(());
        }

        let response = outcome.map_err(|e| {
            self.state = RuntimeState::Error(e.to_string());
            self.event_bus.emit(InterviewEvent::Error {
                message: e.to_string(),
            });
            e
        })?;

        if let Some(usage) = &response.usage {
            log::info!("Profile summary used {} tokens", usage.total_tokens);
        }

        let report = ProfileReport::new(self.session.transcript(), response.text);
        self.report = Some(report.clone());
        self.state = RuntimeState::Idle;
        self.event_bus.emit(InterviewEvent::SummaryComplete { report });
        Ok(())
    }

    /// Send the transcript to the provider and store the profile report.
    /// `begin_summary` + `finish_summary` for callers that own the runtime
    /// directly.
    pub async fn run_summary(&mut self, llm: &dyn SummarizerPort) -> Result<()> {
        let req = match self.begin_summary()? {
            Some(req) => req,
            None => return Ok(()),
        };
        let outcome = llm.summarize(req).await;
        self.finish_summary(outcome)
    }

    fn emit_current_question(&mut self) {
        if let Some(question) = self.session.current_question() {
            self.event_bus.emit(InterviewEvent::QuestionAsked {
                index: self.session.next_index(),
                question: question.to_string(),
            });
        }
    }
}
