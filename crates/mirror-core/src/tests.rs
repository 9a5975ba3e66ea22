#[cfg(test)]
mod tests {
    use crate::event_bus::EventBus;
    use crate::ports::*;
    use crate::runtime::{InterviewRuntime, RuntimeState};
    use crate::session::{InterviewSession, SessionPhase};
    use mirror_types::config::MirrorConfig;
    use mirror_types::event::InterviewEvent;
    use mirror_types::question::QuestionList;
    use mirror_types::MirrorError;
    use async_trait::async_trait;
    use std::cell::RefCell;
    use std::future::Future;
    use std::rc::Rc;

    fn answers() -> Vec<String> {
        vec![
            "My family is small but close.".to_string(),
            "I had a normal childhood.".to_string(),
            "I go for long walks.".to_string(),
            "I want to become a teacher.".to_string(),
            "They are mostly good.".to_string(),
            "Nothing major comes to mind.".to_string(),
            "Music and my dog.".to_string(),
            "I talk to friends.".to_string(),
            "Patient, but I procrastinate.".to_string(),
            "Cautiously optimistic.".to_string(),
        ]
    }

    // ─── EventBus Tests ──────────────────────────────────────

    #[test]
    fn test_event_bus_new_is_empty() {
        let bus = EventBus::new();
        assert!(!bus.has_pending());
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn test_event_bus_emit_and_drain() {
        let bus = EventBus::new();
        bus.emit(InterviewEvent::SessionStarted);
        bus.emit(InterviewEvent::SessionComplete);

        assert!(bus.has_pending());

        let events = bus.drain();
        assert_eq!(events.len(), 2);
        assert!(!bus.has_pending());
    }

    #[test]
    fn test_event_bus_drain_empties() {
        let bus = EventBus::new();
        bus.emit(InterviewEvent::SessionStarted);
        let _ = bus.drain();
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn test_event_bus_clone_shares_state() {
        let bus1 = EventBus::new();
        let bus2 = bus1.clone();

        bus1.emit(InterviewEvent::SessionStarted);
        assert!(bus2.has_pending());

        let events = bus2.drain();
        assert_eq!(events.len(), 1);
        assert!(!bus1.has_pending());
    }

    // ─── Session State Machine Tests ─────────────────────────

    #[test]
    fn test_session_initial_phase() {
        let session = InterviewSession::new(QuestionList::standard_interview());
        assert_eq!(session.phase(), SessionPhase::NotStarted);
        assert!(!session.is_complete());
        assert_eq!(session.next_index(), 0);
        assert!(session.current_question().is_none());
    }

    #[test]
    fn test_session_start_enters_in_progress() {
        let mut session = InterviewSession::new(QuestionList::standard_interview());
        session.start();
        assert_eq!(session.phase(), SessionPhase::InProgress { next_index: 0 });
        assert_eq!(
            session.current_question(),
            Some("Can you tell me about your family background?")
        );
    }

    #[test]
    fn test_session_completes_exactly_after_nth_answer() {
        let mut session = InterviewSession::new(QuestionList::standard_interview());
        session.start();

        for (i, answer) in answers().iter().enumerate() {
            assert!(!session.is_complete(), "complete before answer {}", i + 1);
            assert!(session.submit_answer(answer));
            assert_eq!(session.next_index(), i + 1);
        }
        assert!(session.is_complete());
        assert_eq!(session.phase(), SessionPhase::Complete);
    }

    #[test]
    fn test_session_blank_answers_are_no_ops() {
        let mut session = InterviewSession::new(QuestionList::standard_interview());
        session.start();
        session.submit_answer("first");

        assert!(!session.submit_answer(""));
        assert!(!session.submit_answer("   "));
        assert!(!session.submit_answer("\t\n"));

        assert_eq!(session.next_index(), 1);
        assert_eq!(session.answers().len(), 1);
        assert_eq!(session.phase(), SessionPhase::InProgress { next_index: 1 });
    }

    #[test]
    fn test_session_submit_before_start_is_no_op() {
        let mut session = InterviewSession::new(QuestionList::standard_interview());
        assert!(!session.submit_answer("eager"));
        assert_eq!(session.answers().len(), 0);
        assert_eq!(session.phase(), SessionPhase::NotStarted);
    }

    #[test]
    fn test_session_submit_after_complete_is_no_op() {
        let mut session = InterviewSession::new(QuestionList::standard_interview());
        session.start();
        for answer in answers() {
            session.submit_answer(&answer);
        }
        assert!(session.is_complete());

        assert!(!session.submit_answer("an eleventh answer"));
        assert_eq!(session.answers().len(), 10);
        assert_eq!(session.next_index(), 10);
    }

    #[test]
    fn test_session_current_question_tracks_index() {
        let questions = QuestionList::standard_interview();
        let mut session = InterviewSession::new(questions.clone());
        session.start();

        for (i, answer) in answers().iter().enumerate() {
            assert_eq!(session.current_question(), questions.get(i));
            session.submit_answer(answer);
        }
        assert!(session.current_question().is_none());
    }

    #[test]
    fn test_session_start_resets_progress() {
        let mut session = InterviewSession::new(QuestionList::standard_interview());
        session.start();
        session.submit_answer("one");
        session.submit_answer("two");
        assert_eq!(session.next_index(), 2);

        session.start();
        assert_eq!(session.next_index(), 0);
        assert!(session.answers().is_empty());
        assert_eq!(session.phase(), SessionPhase::InProgress { next_index: 0 });
    }

    #[test]
    fn test_session_start_is_idempotent() {
        let mut session = InterviewSession::new(QuestionList::standard_interview());
        session.start();
        session.start();
        session.start();
        assert_eq!(session.phase(), SessionPhase::InProgress { next_index: 0 });
    }

    #[test]
    fn test_session_transcript_format_is_exact() {
        let questions = QuestionList::new(vec![
            "First question?".to_string(),
            "Second question?".to_string(),
        ]);
        let mut session = InterviewSession::new(questions);
        session.start();
        session.submit_answer("Answer one.");
        session.submit_answer("Answer two.");

        assert_eq!(
            session.transcript(),
            "Q: First question?\nA: Answer one.\nQ: Second question?\nA: Answer two.\n"
        );
    }

    #[test]
    fn test_session_transcript_mid_session_covers_answered_pairs() {
        let mut session = InterviewSession::new(QuestionList::standard_interview());
        session.start();
        session.submit_answer("Only answer.");

        let transcript = session.transcript();
        assert_eq!(transcript.matches("Q: ").count(), 1);
        assert_eq!(transcript.matches("\nA: ").count(), 1);
        assert!(transcript.starts_with("Q: Can you tell me about your family background?\nA: Only answer.\n"));
    }

    #[test]
    fn test_session_invariant_index_equals_answer_count() {
        let mut session = InterviewSession::new(QuestionList::standard_interview());
        session.start();
        for answer in answers().iter().take(7) {
            session.submit_answer(answer);
            session.submit_answer("");
            assert_eq!(session.next_index(), session.answers().len());
        }
    }

    // ─── Mock Summarizer Ports ───────────────────────────────

    /// Mock provider that records every request and returns a fixed profile.
    struct MockSummarizer {
        requests: RefCell<Vec<SummaryRequest>>,
        profile: String,
    }

    impl MockSummarizer {
        fn new(profile: &str) -> Self {
            Self {
                requests: RefCell::new(Vec::new()),
                profile: profile.to_string(),
            }
        }

        fn call_count(&self) -> usize {
            self.requests.borrow().len()
        }
    }

    #[async_trait(?Send)]
    impl SummarizerPort for MockSummarizer {
        async fn summarize(&self, req: SummaryRequest) -> mirror_types::Result<SummaryResponse> {
            self.requests.borrow_mut().push(req);
            Ok(SummaryResponse {
                text: self.profile.clone(),
                usage: Some(TokenUsage {
                    prompt_tokens: 200,
                    completion_tokens: 150,
                    total_tokens: 350,
                }),
            })
        }
    }

    /// Mock provider that always fails.
    struct FailingSummarizer;

    #[async_trait(?Send)]
    impl SummarizerPort for FailingSummarizer {
        async fn summarize(&self, _req: SummaryRequest) -> mirror_types::Result<SummaryResponse> {
            Err(MirrorError::Summarizer("rate limit exceeded".to_string()))
        }
    }

    /// Mock provider whose call stays in flight for one poll, like a real
    /// browser fetch.
    struct SlowSummarizer;

    #[async_trait(?Send)]
    impl SummarizerPort for SlowSummarizer {
        async fn summarize(&self, _req: SummaryRequest) -> mirror_types::Result<SummaryResponse> {
            YieldOnce { polled: false }.await;
            Ok(SummaryResponse {
                text: "delayed profile".to_string(),
                usage: None,
            })
        }
    }

    struct YieldOnce {
        polled: bool,
    }

    impl std::future::Future for YieldOnce {
        type Output = ();

        fn poll(
            mut self: std::pin::Pin<&mut Self>,
            cx: &mut std::task::Context<'_>,
        ) -> std::task::Poll<()> {
            if self.polled {
                std::task::Poll::Ready(())
            } else {
                self.polled = true;
                cx.waker().wake_by_ref();
                std::task::Poll::Pending
            }
        }
    }

    fn noop_waker() -> std::task::Waker {
        use std::sync::Arc;
        use std::task::Wake;

        struct NoopWaker;
        impl Wake for NoopWaker {
            fn wake(self: Arc<Self>) {}
        }

        std::task::Waker::from(Arc::new(NoopWaker))
    }

    // Simple futures executor for single-threaded tests (not in WASM here)
    fn block_on<F: std::future::Future<Output = T>, T>(f: F) -> T {
        use std::task::Poll;

        let waker = noop_waker();
        let mut cx = std::task::Context::from_waker(&waker);
        let mut f = std::pin::pin!(f);

        loop {
            match f.as_mut().poll(&mut cx) {
                Poll::Ready(val) => return val,
                Poll::Pending => {
                    // Mock ports complete within a bounded number of polls
                    std::thread::yield_now();
                }
            }
        }
    }

    fn completed_runtime(bus: EventBus) -> InterviewRuntime {
        let mut runtime = InterviewRuntime::new(
            MirrorConfig::default(),
            QuestionList::standard_interview(),
            bus,
        );
        runtime.start_session();
        for answer in answers() {
            runtime.submit_answer(&answer);
        }
        runtime
    }

    // ─── InterviewRuntime Tests ──────────────────────────────

    #[test]
    fn test_runtime_start_emits_first_question() {
        let bus = EventBus::new();
        let mut runtime = InterviewRuntime::new(
            MirrorConfig::default(),
            QuestionList::standard_interview(),
            bus.clone(),
        );
        runtime.start_session();

        let events = bus.drain();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], InterviewEvent::SessionStarted));
        if let InterviewEvent::QuestionAsked { index, ref question } = events[1] {
            assert_eq!(index, 0);
            assert_eq!(question, "Can you tell me about your family background?");
        } else {
            panic!("Expected QuestionAsked, got {:?}", events[1]);
        }
    }

    #[test]
    fn test_runtime_answer_emits_record_and_next_question() {
        let bus = EventBus::new();
        let mut runtime = InterviewRuntime::new(
            MirrorConfig::default(),
            QuestionList::standard_interview(),
            bus.clone(),
        );
        runtime.start_session();
        let _ = bus.drain();

        runtime.submit_answer("I had a normal childhood.");

        let events = bus.drain();
        assert_eq!(events.len(), 2);
        if let InterviewEvent::AnswerRecorded { index, ref answer, .. } = events[0] {
            assert_eq!(index, 0);
            assert_eq!(answer, "I had a normal childhood.");
        } else {
            panic!("Expected AnswerRecorded");
        }
        assert!(matches!(events[1], InterviewEvent::QuestionAsked { index: 1, .. }));
    }

    #[test]
    fn test_runtime_blank_answer_emits_nothing() {
        let bus = EventBus::new();
        let mut runtime = InterviewRuntime::new(
            MirrorConfig::default(),
            QuestionList::standard_interview(),
            bus.clone(),
        );
        runtime.start_session();
        let _ = bus.drain();

        runtime.submit_answer("   ");
        assert!(bus.drain().is_empty());
        assert_eq!(runtime.session.next_index(), 0);
    }

    #[test]
    fn test_runtime_last_answer_emits_session_complete() {
        let bus = EventBus::new();
        let runtime = completed_runtime(bus.clone());
        assert!(runtime.session.is_complete());

        let events = bus.drain();
        assert!(matches!(events.last(), Some(InterviewEvent::SessionComplete)));
        let asked = events
            .iter()
            .filter(|e| matches!(e, InterviewEvent::QuestionAsked { .. }))
            .count();
        assert_eq!(asked, 10);
    }

    #[test]
    fn test_runtime_summary_called_once_with_exact_transcript() {
        let bus = EventBus::new();
        let mut runtime = completed_runtime(bus.clone());
        let _ = bus.drain();

        let llm = MockSummarizer::new("A calm, reflective profile.");
        block_on(runtime.run_summary(&llm)).unwrap();

        assert_eq!(llm.call_count(), 1);
        let expected = runtime.session.transcript();
        assert_eq!(llm.requests.borrow()[0].transcript, expected);
        assert_eq!(expected.matches("Q: ").count(), 10);
        assert_eq!(expected.matches("\nA: ").count(), 10);

        let report = runtime.report.as_ref().expect("report stored");
        assert_eq!(report.summary, "A calm, reflective profile.");
        assert_eq!(report.transcript, expected);
        assert_eq!(runtime.state, RuntimeState::Idle);

        let events = bus.drain();
        assert!(matches!(events[0], InterviewEvent::SummaryStart));
        assert!(matches!(events[1], InterviewEvent::SummaryComplete { .. }));
    }

    #[test]
    fn test_runtime_summary_request_carries_config() {
        let bus = EventBus::new();
        let mut runtime = completed_runtime(bus);

        let llm = MockSummarizer::new("profile");
        block_on(runtime.run_summary(&llm)).unwrap();

        let requests = llm.requests.borrow();
        assert_eq!(requests[0].model, "llama-3.1-8b-instant");
        assert_eq!(requests[0].max_tokens, 3000);
        assert!((requests[0].temperature - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn test_runtime_second_summary_is_no_op() {
        let bus = EventBus::new();
        let mut runtime = completed_runtime(bus.clone());
        let _ = bus.drain();

        let llm = MockSummarizer::new("profile");
        block_on(runtime.run_summary(&llm)).unwrap();
        block_on(runtime.run_summary(&llm)).unwrap();

        assert_eq!(llm.call_count(), 1);
        let starts = bus
            .drain()
            .iter()
            .filter(|e| matches!(e, InterviewEvent::SummaryStart))
            .count();
        assert_eq!(starts, 1);
    }

    #[test]
    fn test_runtime_second_begin_while_in_flight_is_no_op() {
        let bus = EventBus::new();
        let mut runtime = completed_runtime(bus.clone());
        let _ = bus.drain();

        assert!(runtime.begin_summary().unwrap().is_some());
        assert!(runtime.begin_summary().unwrap().is_none());

        let starts = bus
            .drain()
            .iter()
            .filter(|e| matches!(e, InterviewEvent::SummaryStart))
            .count();
        assert_eq!(starts, 1);
    }

    // The frame loop borrows the runtime every repaint, so a dispatched
    // summary task must not keep its own borrow alive across the awaited
    // provider call.
    #[test]
    fn test_runtime_stays_borrowable_while_summary_in_flight() {
        use std::task::Poll;

        let bus = EventBus::new();
        let runtime = Rc::new(RefCell::new(completed_runtime(bus.clone())));
        let _ = bus.drain();

        let task = {
            let runtime = Rc::clone(&runtime);
            async move {
                let request = match runtime.borrow_mut().begin_summary() {
                    Ok(Some(request)) => request,
                    _ => return,
                };
                let outcome = SlowSummarizer.summarize(request).await;
                let _ = runtime.borrow_mut().finish_summary(outcome);
            }
        };

        let waker = noop_waker();
        let mut cx = std::task::Context::from_waker(&waker);
        let mut task = std::pin::pin!(task);

        assert!(matches!(task.as_mut().poll(&mut cx), Poll::Pending));
        // Call in flight: a repaint must still get its borrow
        assert!(runtime.try_borrow_mut().is_ok());
        assert_eq!(runtime.borrow().state, RuntimeState::Summarizing);

        assert!(matches!(task.as_mut().poll(&mut cx), Poll::Ready(())));
        let rt = runtime.borrow();
        assert_eq!(rt.report.as_ref().unwrap().summary, "delayed profile");
        assert_eq!(rt.state, RuntimeState::Idle);
    }

    #[test]
    fn test_runtime_restart_discards_in_flight_summary() {
        let bus = EventBus::new();
        let mut runtime = completed_runtime(bus.clone());
        assert!(runtime.begin_summary().unwrap().is_some());

        runtime.start_session();
        let _ = bus.drain();

        let stale = Ok(SummaryResponse {
            text: "stale profile".to_string(),
            usage: None,
        });
        runtime.finish_summary(stale).unwrap();

        assert!(runtime.report.is_none());
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn test_runtime_summary_before_complete_is_an_error() {
        let bus = EventBus::new();
        let mut runtime = InterviewRuntime::new(
            MirrorConfig::default(),
            QuestionList::standard_interview(),
            bus,
        );
        runtime.start_session();
        runtime.submit_answer("only one answer");

        let llm = MockSummarizer::new("profile");
        let result = block_on(runtime.run_summary(&llm));
        assert!(matches!(result, Err(MirrorError::SessionIncomplete)));
        assert_eq!(llm.call_count(), 0);
    }

    #[test]
    fn test_runtime_summary_failure_propagates() {
        let bus = EventBus::new();
        let mut runtime = completed_runtime(bus.clone());
        let _ = bus.drain();

        let result = block_on(runtime.run_summary(&FailingSummarizer));
        assert!(result.is_err());
        assert!(matches!(runtime.state, RuntimeState::Error(_)));
        assert!(runtime.report.is_none());

        let events = bus.drain();
        let has_error = events.iter().any(|e| {
            matches!(e, InterviewEvent::Error { message } if message.contains("rate limit"))
        });
        assert!(has_error, "Missing Error event");
    }

    #[test]
    fn test_runtime_restart_recovers_from_failure() {
        let bus = EventBus::new();
        let mut runtime = completed_runtime(bus.clone());
        let _ = block_on(runtime.run_summary(&FailingSummarizer));
        assert!(matches!(runtime.state, RuntimeState::Error(_)));

        runtime.start_session();
        assert_eq!(runtime.state, RuntimeState::Idle);
        assert!(runtime.report.is_none());
        assert_eq!(runtime.session.next_index(), 0);

        for answer in answers() {
            runtime.submit_answer(&answer);
        }
        let llm = MockSummarizer::new("second attempt");
        block_on(runtime.run_summary(&llm)).unwrap();
        assert_eq!(llm.call_count(), 1);
        assert_eq!(runtime.report.as_ref().unwrap().summary, "second attempt");
    }

    #[test]
    fn test_runtime_restart_clears_report() {
        let bus = EventBus::new();
        let mut runtime = completed_runtime(bus);
        let llm = MockSummarizer::new("profile");
        block_on(runtime.run_summary(&llm)).unwrap();
        assert!(runtime.report.is_some());

        runtime.start_session();
        assert!(runtime.report.is_none());
    }

    #[test]
    fn test_runtime_answers_after_complete_are_ignored() {
        let bus = EventBus::new();
        let mut runtime = completed_runtime(bus.clone());
        let _ = bus.drain();

        runtime.submit_answer("an eleventh answer");
        assert_eq!(runtime.session.answers().len(), 10);
        assert!(bus.drain().is_empty());
    }

    // ─── End-to-End Scenario ─────────────────────────────────

    #[test]
    fn test_full_interview_end_to_end() {
        let bus = EventBus::new();
        let mut runtime = InterviewRuntime::new(
            MirrorConfig::default(),
            QuestionList::standard_interview(),
            bus.clone(),
        );

        runtime.start_session();
        runtime.submit_answer("I had a normal childhood.");
        runtime.submit_answer("I exercise.");
        for answer in answers().iter().skip(2) {
            runtime.submit_answer(answer);
        }
        assert!(runtime.session.is_complete());

        let transcript = runtime.session.transcript();
        assert_eq!(transcript.matches("Q: ").count(), 10);
        assert!(transcript.contains("Q: Can you tell me about your family background?\nA: I had a normal childhood.\n"));
        assert!(transcript.contains("Q: What was your childhood like?\nA: I exercise.\n"));

        let llm = MockSummarizer::new("Profile: balanced and grounded.");
        block_on(runtime.run_summary(&llm)).unwrap();
        assert_eq!(llm.call_count(), 1);
        assert_eq!(llm.requests.borrow()[0].transcript, transcript);

        let events = bus.drain();
        let summary_completes = events
            .iter()
            .filter(|e| matches!(e, InterviewEvent::SummaryComplete { .. }))
            .count();
        assert_eq!(summary_completes, 1);
    }
}
