//! UI Controller for pwcheck.
//!
//! An explicit state machine: every keystroke, button press, timer expiry
//! and response arrival comes in as a [`Message`]; [`Controller::update`]
//! mutates the [`PageState`] and returns the side effects to perform as
//! [`Action`]s. The controller itself never touches the network, timers
//! or the clipboard, which is what lets the runtime stay single-threaded
//! and lets tests drive it step by step.

use std::time::Duration;

use tracing::{debug, error, info, warn};
use zeroize::Zeroizing;

use crate::managers::timer_manager::{TimerManager, TimerManagerTrait};
use crate::types::analysis::AnalysisResult;
use crate::types::breach::BreachStatus;
use crate::types::errors::{ClipboardError, ServiceError};
use crate::types::generator::{GenOption, GeneratedOutput, GenerationParams};
use crate::types::page::{PageState, COPIED_LABEL, COPY_FAILED_LABEL, COPY_LABEL};
use crate::types::settings::{ControllerSettings, LogSeverity};

/// Inputs to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// The password field changed by user typing.
    PasswordInput(String),
    /// Show/Hide pressed.
    ToggleVisibility,
    /// The explicit "check" button: analyze now, no debounce.
    CheckClicked,
    CheckBreachClicked,
    GenLengthChanged(u32),
    GenOptionChanged(GenOption, bool),
    GenerateClicked,
    CopyClicked,
    UseGeneratedClicked,

    /// The debounce timer armed with this ticket fired.
    DebounceElapsed(u64),
    /// The copy-label revert timer armed with this ticket fired.
    CopyResetElapsed(u64),

    AnalyzeCompleted {
        seq: u64,
        result: Result<AnalysisResult, ServiceError>,
    },
    BreachCompleted(Result<u64, ServiceError>),
    GenerateCompleted(Result<Option<String>, ServiceError>),
    ClipboardWritten(Result<(), ClipboardError>),
}

/// Side effects requested by the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Arm the debounce timer, replacing any pending one.
    ScheduleDebounce { ticket: u64, delay: Duration },
    /// Drop the pending debounce timer.
    CancelDebounce,
    Analyze { seq: u64, password: String },
    CheckBreach { password: String },
    Generate(GenerationParams),
    WriteClipboard(Zeroizing<String>),
    /// Arm the timer that reverts the copy button label.
    ScheduleCopyReset { ticket: u64, delay: Duration },
}

/// Owns the page model and the controller's private state.
pub struct Controller {
    settings: ControllerSettings,
    page: PageState,
    debounce: TimerManager,
    copy_reset: TimerManager,
    /// Sequence number of the newest analyze request (or invalidation).
    analyze_seq: u64,
}

impl Controller {
    pub fn new(settings: ControllerSettings) -> Self {
        let page = PageState::new(&settings.generator);
        Self {
            settings,
            page,
            debounce: TimerManager::new(),
            copy_reset: TimerManager::new(),
            analyze_seq: 0,
        }
    }

    pub fn page(&self) -> &PageState {
        &self.page
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    /// Whether a debounced analysis is waiting to fire.
    pub fn debounce_pending(&self) -> bool {
        self.debounce.is_pending()
    }

    /// Processes one message and returns the actions to perform.
    pub fn update(&mut self, message: Message) -> Vec<Action> {
        match message {
            Message::PasswordInput(value) => self.handle_password_input(value),

            Message::ToggleVisibility => {
                self.page.password_masked = !self.page.password_masked;
                Vec::new()
            }

            Message::CheckClicked => {
                let password = self.page.password.clone();
                self.start_analysis(password, true)
            }

            Message::CheckBreachClicked => self.handle_check_breach(),

            Message::GenLengthChanged(length) => {
                self.page.gen_length = self.settings.generator.clamp_length(length);
                Vec::new()
            }

            Message::GenOptionChanged(option, checked) => {
                self.page.set_gen_option(option, checked);
                Vec::new()
            }

            Message::GenerateClicked => {
                let params = self.page.generation_params();
                debug!(
                    length = params.length,
                    upper = params.upper,
                    digits = params.digits,
                    symbols = params.symbols,
                    "requesting generated password"
                );
                vec![Action::Generate(params)]
            }

            Message::CopyClicked => match self.page.generated.password() {
                Some(password) => vec![Action::WriteClipboard(Zeroizing::new(password.to_string()))],
                None => Vec::new(),
            },

            Message::UseGeneratedClicked => self.handle_use_generated(),

            Message::DebounceElapsed(ticket) => {
                if !self.debounce.expire(ticket) {
                    debug!(ticket, "ignoring superseded debounce timer");
                    return Vec::new();
                }
                let password = self.page.password.clone();
                self.start_analysis(password, false)
            }

            Message::CopyResetElapsed(ticket) => {
                if self.copy_reset.expire(ticket) {
                    self.page.copy_label = COPY_LABEL;
                }
                Vec::new()
            }

            Message::AnalyzeCompleted { seq, result } => {
                self.handle_analyze_completed(seq, result);
                Vec::new()
            }

            Message::BreachCompleted(result) => {
                self.handle_breach_completed(result);
                Vec::new()
            }

            Message::GenerateCompleted(result) => {
                self.handle_generate_completed(result);
                Vec::new()
            }

            Message::ClipboardWritten(result) => self.handle_clipboard_written(result),
        }
    }

    fn handle_password_input(&mut self, value: String) -> Vec<Action> {
        self.page.password = value;

        if self.page.password.is_empty() {
            // Emptying the field skips the quiet period entirely.
            let had_pending = self.debounce.cancel();
            self.clear_results();
            return if had_pending {
                vec![Action::CancelDebounce]
            } else {
                Vec::new()
            };
        }

        let ticket = self.debounce.arm();
        vec![Action::ScheduleDebounce {
            ticket,
            delay: self.settings.timing.debounce(),
        }]
    }

    /// Starts an analyze cycle. A non-explicit cycle on an empty password
    /// only hides the panel; an explicit one always reaches the service.
    fn start_analysis(&mut self, password: String, explicit: bool) -> Vec<Action> {
        if password.is_empty() && !explicit {
            self.clear_results();
            return Vec::new();
        }
        self.analyze_seq += 1;
        debug!(seq = self.analyze_seq, explicit, "requesting analysis");
        vec![Action::Analyze {
            seq: self.analyze_seq,
            password,
        }]
    }

    fn clear_results(&mut self) {
        self.page.hide_results();
        // With latest_send_wins, in-flight responses for the erased text go stale.
        self.analyze_seq += 1;
    }

    fn handle_analyze_completed(&mut self, seq: u64, result: Result<AnalysisResult, ServiceError>) {
        if self.settings.analysis.latest_send_wins && seq != self.analyze_seq {
            debug!(seq, latest = self.analyze_seq, "dropping stale analysis response");
            return;
        }
        match result {
            Ok(analysis) => self.page.show_analysis(&analysis),
            Err(err) => log_analysis_failure(self.settings.analysis.error_level, seq, &err),
        }
    }

    fn handle_check_breach(&mut self) -> Vec<Action> {
        if self.page.password.is_empty() {
            self.page.breach = BreachStatus::NeedsPassword;
            return Vec::new();
        }
        self.page.breach = BreachStatus::Checking;
        vec![Action::CheckBreach {
            password: self.page.password.clone(),
        }]
    }

    fn handle_breach_completed(&mut self, result: Result<u64, ServiceError>) {
        self.page.breach = match result {
            Ok(count) => {
                info!(count, "breach check completed");
                BreachStatus::Count(count)
            }
            Err(ServiceError::Rejected { status, message }) => {
                warn!(status, message = message.as_deref().unwrap_or(""), "breach check rejected");
                BreachStatus::ServiceError(message)
            }
            Err(err) => {
                warn!(error = %err, "breach check failed");
                BreachStatus::NetworkError
            }
        };
    }

    fn handle_generate_completed(&mut self, result: Result<Option<String>, ServiceError>) {
        self.page.generated = match result {
            Ok(Some(password)) if !password.is_empty() => {
                GeneratedOutput::Password(Zeroizing::new(password))
            }
            Ok(_) => {
                warn!("generate response carried no password");
                GeneratedOutput::GenerationFailed
            }
            Err(err) if err.is_transport() => {
                warn!(error = %err, "generate request failed");
                GeneratedOutput::NetworkError
            }
            Err(err) => {
                warn!(error = %err, "generate request rejected");
                GeneratedOutput::GenerationFailed
            }
        };
    }

    fn handle_clipboard_written(&mut self, result: Result<(), ClipboardError>) -> Vec<Action> {
        match result {
            Ok(()) => {
                self.page.copy_label = COPIED_LABEL;
                let ticket = self.copy_reset.arm();
                vec![Action::ScheduleCopyReset {
                    ticket,
                    delay: self.settings.timing.copy_ack(),
                }]
            }
            Err(err) => {
                warn!(error = %err, "copy to clipboard failed");
                // The failure label stays until the next successful copy.
                self.copy_reset.cancel();
                self.page.copy_label = COPY_FAILED_LABEL;
                Vec::new()
            }
        }
    }

    fn handle_use_generated(&mut self) -> Vec<Action> {
        let Some(password) = self.page.generated.password().map(str::to_string) else {
            return Vec::new();
        };
        self.page.replace_password(password.clone());

        let mut actions = Vec::new();
        if self.debounce.cancel() {
            actions.push(Action::CancelDebounce);
        }
        actions.extend(self.start_analysis(password, true));
        actions
    }
}

fn log_analysis_failure(level: LogSeverity, seq: u64, err: &ServiceError) {
    match level {
        LogSeverity::Debug => debug!(seq, error = %err, "analysis request failed"),
        LogSeverity::Info => info!(seq, error = %err, "analysis request failed"),
        LogSeverity::Warn => warn!(seq, error = %err, "analysis request failed"),
        LogSeverity::Error => error!(seq, error = %err, "analysis request failed"),
    }
}
