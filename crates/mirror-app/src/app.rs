//! Main egui application — composes panels and drives the interview runtime.

use std::cell::RefCell;
use std::rc::Rc;

use egui::{self, CentralPanel, RichText, SidePanel, TopBottomPanel};

use mirror_core::event_bus::EventBus;
use mirror_core::ports::{StoragePort, SummarizerPort};
use mirror_core::runtime::{InterviewRuntime, RuntimeState};
use mirror_core::session::SessionPhase;
use mirror_platform::llm::OpenAiCompatSummarizer;
use mirror_platform::storage::{auto_storage, BrowserStorage, MemoryStorage};
use mirror_types::config::{MirrorConfig, StorageBackendType, StorageConfig};
use mirror_types::event::InterviewEvent;
use mirror_types::question::QuestionList;
use mirror_ui::panels::{interview, settings};
use mirror_ui::panels::settings::{SaveFeedback, SettingsAction};
use mirror_ui::state::UiState;
use mirror_ui::theme;

const CONFIG_STORAGE_KEY: &str = "mirror:config";

/// The main application state
pub struct MirrorApp {
    ui_state: UiState,
    config: MirrorConfig,
    event_bus: EventBus,
    runtime: Rc<RefCell<InterviewRuntime>>,
    summarizer: Rc<dyn SummarizerPort>,
    storage: Rc<dyn StoragePort>,
    /// Slot filled by the async config restore, applied on the next frame
    pending_config: Rc<RefCell<Option<MirrorConfig>>>,
    save_feedback: Rc<RefCell<Option<SaveFeedback>>>,
    /// Latch so the single summarization task is dispatched at most once
    summary_pending: bool,
    first_frame: bool,
}

impl MirrorApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config = MirrorConfig::default();
        let event_bus = EventBus::new();
        let runtime = InterviewRuntime::new(
            config.clone(),
            QuestionList::standard_interview(),
            event_bus.clone(),
        );

        let summarizer: Rc<dyn SummarizerPort> =
            Rc::new(OpenAiCompatSummarizer::new(config.llm.clone()));
        let storage = select_storage(&config.storage);
        log::info!("Using {} storage backend", storage.backend_name());

        let pending_config = Rc::new(RefCell::new(None));
        Self::restore_config(storage.clone(), pending_config.clone());

        Self {
            ui_state: UiState::new(),
            config,
            event_bus,
            runtime: Rc::new(RefCell::new(runtime)),
            summarizer,
            storage,
            pending_config,
            save_feedback: Rc::new(RefCell::new(None)),
            summary_pending: false,
            first_frame: true,
        }
    }

    /// Restore config from storage (async; lands in `pending_config`)
    fn restore_config(storage: Rc<dyn StoragePort>, slot: Rc<RefCell<Option<MirrorConfig>>>) {
        wasm_bindgen_futures::spawn_local(async move {
            if let Ok(Some(json)) = storage.get(CONFIG_STORAGE_KEY).await {
                match serde_json::from_str::<MirrorConfig>(&json) {
                    Ok(config) => {
                        *slot.borrow_mut() = Some(config);
                        log::info!("Config restored from storage");
                    }
                    Err(e) => log::warn!("Stored config unreadable: {}", e),
                }
            }
        });
    }

    /// Save config to storage (async, fire-and-forget with feedback)
    fn save_config(&self) {
        let storage = self.storage.clone();
        let feedback = self.save_feedback.clone();
        match serde_json::to_string(&self.config) {
            Ok(json) => {
                wasm_bindgen_futures::spawn_local(async move {
                    let fb = match storage.set(CONFIG_STORAGE_KEY, &json).await {
                        Ok(()) => {
                            log::info!("Config saved to storage");
                            SaveFeedback {
                                message: "Saved".to_string(),
                                success: true,
                            }
                        }
                        Err(e) => SaveFeedback {
                            message: format!("Save failed: {}", e),
                            success: false,
                        },
                    };
                    *feedback.borrow_mut() = Some(fb);
                });
            }
            Err(e) => {
                *self.save_feedback.borrow_mut() = Some(SaveFeedback {
                    message: format!("Save failed: {}", e),
                    success: false,
                });
            }
        }
    }

    fn rebuild_summarizer(&mut self) {
        self.summarizer = Rc::new(OpenAiCompatSummarizer::new(self.config.llm.clone()));
        self.runtime.borrow_mut().config = self.config.clone();
    }

    /// Spawn the single summarization task for a completed session.
    fn dispatch_summary(&mut self, ctx: &egui::Context) {
        self.summary_pending = true;
        let runtime = self.runtime.clone();
        let llm = self.summarizer.clone();
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            // The runtime borrow must not outlive this statement: frames
            // keep rendering (and borrowing the runtime) while the
            // provider call is in flight.
            let request = match runtime.borrow_mut().begin_summary() {
                Ok(Some(request)) => request,
                Ok(None) => return,
                Err(e) => {
                    log::error!("Summarization failed: {}", e);
                    return;
                }
            };
            let outcome = llm.summarize(request).await;
            if let Err(e) = runtime.borrow_mut().finish_summary(outcome) {
                log::error!("Summarization failed: {}", e);
            }
            ctx.request_repaint();
        });
    }

    /// True when a completed session is waiting for its one summary call.
    fn summary_due(&self) -> bool {
        if self.summary_pending {
            return false;
        }
        match self.runtime.try_borrow() {
            Ok(rt) => {
                rt.session.is_complete()
                    && rt.report.is_none()
                    && rt.state == RuntimeState::Idle
            }
            Err(_) => false,
        }
    }

    fn start_session(&mut self) {
        self.summary_pending = false;
        *self.save_feedback.borrow_mut() = None;
        self.runtime.borrow_mut().start_session();
    }
}

impl eframe::App for MirrorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(ctx);
            self.first_frame = false;
        }

        // Apply an async-restored config once it lands
        let pending_config = self.pending_config.borrow_mut().take();
        if let Some(config) = pending_config {
            self.config = config;
            self.rebuild_summarizer();
        }

        // Drain events from the interview runtime
        let events = self.event_bus.drain();
        if !events.is_empty() {
            for event in &events {
                if matches!(
                    event,
                    InterviewEvent::SummaryComplete { .. } | InterviewEvent::Error { .. }
                ) {
                    self.summary_pending = false;
                }
            }
            self.ui_state.process_events(events);
            ctx.request_repaint();
        }

        if self.ui_state.is_busy() {
            ctx.request_repaint();
        }

        // Profile generation is automatic once the last answer lands
        if self.summary_due() {
            self.dispatch_summary(ctx);
        }

        let phase = self.runtime.borrow().session.phase();

        // ── Top bar ──────────────────────────────────────────
        TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("Cognitive Mirror: AI-Powered Interviewer")
                        .strong()
                        .color(theme::ACCENT)
                        .size(16.0),
                );
                ui.separator();
                ui.label(
                    RichText::new(format!(
                        "Provider: {} | Model: {}",
                        self.config.llm.provider.label(),
                        self.config.llm.model
                    ))
                    .color(theme::TEXT_SECONDARY)
                    .small(),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .selectable_label(self.ui_state.show_settings, "Settings")
                        .clicked()
                    {
                        self.ui_state.show_settings = !self.ui_state.show_settings;
                    }

                    let start_label = if phase == SessionPhase::NotStarted {
                        "Start Session"
                    } else {
                        "Restart Session"
                    };
                    if ui.button(start_label).clicked() {
                        self.start_session();
                    }
                });
            });
        });

        // ── Settings side panel ──────────────────────────────
        if self.ui_state.show_settings {
            SidePanel::right("settings_panel")
                .min_width(280.0)
                .max_width(350.0)
                .show(ctx, |ui| {
                    let feedback = self.save_feedback.borrow().clone();
                    match settings::settings_panel(ui, &mut self.config, feedback.as_ref()) {
                        SettingsAction::Changed => self.rebuild_summarizer(),
                        SettingsAction::SaveClicked => {
                            self.rebuild_summarizer();
                            self.save_config();
                        }
                        SettingsAction::None => {}
                    }
                });
        }

        // ── Main content ─────────────────────────────────────
        CentralPanel::default().show(ctx, |ui| {
            if phase == SessionPhase::NotStarted {
                ui.add_space(40.0);
                ui.vertical_centered(|ui| {
                    ui.heading(
                        RichText::new("Cognitive Mirror")
                            .color(theme::TEXT_PRIMARY)
                            .size(28.0),
                    );
                    ui.add_space(8.0);
                    ui.label(
                        RichText::new(
                            "A ten-question interview, then an AI-generated \
                             psychological and emotional profile.",
                        )
                        .color(theme::TEXT_SECONDARY),
                    );
                    ui.add_space(16.0);
                    if ui
                        .button(RichText::new("Start Session").size(16.0))
                        .clicked()
                    {
                        self.start_session();
                    }
                });
            } else if let Some(answer) = interview::interview_panel(ui, &mut self.ui_state) {
                self.runtime.borrow_mut().submit_answer(&answer);
                ctx.request_repaint();
            }
        });
    }
}

/// Pick the storage backend the config asks for.
fn select_storage(config: &StorageConfig) -> Rc<dyn StoragePort> {
    match config.backend {
        StorageBackendType::Auto => auto_storage(),
        StorageBackendType::Local => match BrowserStorage::new() {
            Ok(s) => Rc::new(s),
            Err(e) => {
                log::warn!("localStorage unavailable: {}. Using memory.", e);
                Rc::new(MemoryStorage::new())
            }
        },
        StorageBackendType::Memory => Rc::new(MemoryStorage::new()),
    }
}
