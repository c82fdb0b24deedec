//! Runtime tests for the App event loop.
//!
//! The loop runs inside a `LocalSet` on tokio's paused test clock, with an
//! in-memory strength service and clipboard, so debounce and copy-label
//! timings can be checked to the millisecond without waiting.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tokio::task::{JoinHandle, LocalSet};
use tokio::time::sleep;

use pwcheck::app::{App, Mailbox, RenderSink};
use pwcheck::controller::Message;
use pwcheck::services::clipboard::ClipboardTrait;
use pwcheck::services::strength_client::StrengthServiceTrait;
use pwcheck::types::analysis::AnalysisResult;
use pwcheck::types::errors::{ClipboardError, ServiceError};
use pwcheck::types::generator::GenerationParams;
use pwcheck::types::page::RenderSnapshot;
use pwcheck::types::settings::ControllerSettings;

const GENERATED: &str = "Gen3rated!Pw";

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Analyze(String),
    Breach(String),
    Generate(GenerationParams),
}

struct MockService {
    calls: Rc<RefCell<Vec<Call>>>,
    latency: Duration,
}

impl StrengthServiceTrait for MockService {
    async fn analyze(&self, password: &str) -> Result<AnalysisResult, ServiceError> {
        self.calls.borrow_mut().push(Call::Analyze(password.to_string()));
        sleep(self.latency).await;
        Ok(AnalysisResult {
            length: password.chars().count() as u64,
            entropy: 12.5,
            rating: "Weak".to_string(),
            is_common: false,
            suggestions: vec!["Use a longer password".to_string()],
        })
    }

    async fn check_breach(&self, password: &str) -> Result<u64, ServiceError> {
        self.calls.borrow_mut().push(Call::Breach(password.to_string()));
        sleep(self.latency).await;
        Ok(2_048)
    }

    async fn generate(&self, params: &GenerationParams) -> Result<Option<String>, ServiceError> {
        self.calls.borrow_mut().push(Call::Generate(*params));
        sleep(self.latency).await;
        Ok(Some(GENERATED.to_string()))
    }
}

struct MockClipboard {
    fail: bool,
    writes: Rc<RefCell<Vec<String>>>,
}

impl ClipboardTrait for MockClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.writes.borrow_mut().push(text.to_string());
        if self.fail {
            Err(ClipboardError::Unavailable("headless session".to_string()))
        } else {
            Ok(())
        }
    }
}

struct RecordingSink(Rc<RefCell<Vec<RenderSnapshot>>>);

impl RenderSink for RecordingSink {
    fn render(&mut self, snapshot: &RenderSnapshot) {
        self.0.borrow_mut().push(snapshot.clone());
    }
}

struct Harness {
    mailbox: Mailbox,
    calls: Rc<RefCell<Vec<Call>>>,
    writes: Rc<RefCell<Vec<String>>>,
    snapshots: Rc<RefCell<Vec<RenderSnapshot>>>,
    handle: JoinHandle<()>,
}

impl Harness {
    /// Spawns the loop on the current `LocalSet`.
    fn start(clipboard_fails: bool) -> Self {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let writes = Rc::new(RefCell::new(Vec::new()));
        let snapshots = Rc::new(RefCell::new(Vec::new()));
        let service = MockService {
            calls: Rc::clone(&calls),
            latency: Duration::from_millis(20),
        };
        let clipboard = MockClipboard {
            fail: clipboard_fails,
            writes: Rc::clone(&writes),
        };
        let (app, mailbox) = App::new(
            ControllerSettings::default(),
            service,
            Box::new(clipboard),
            Box::new(RecordingSink(Rc::clone(&snapshots))),
        );
        let handle = tokio::task::spawn_local(app.run());
        Self {
            mailbox,
            calls,
            writes,
            snapshots,
            handle,
        }
    }

    fn send(&self, message: Message) {
        assert!(self.mailbox.send(message));
    }

    fn last(&self) -> RenderSnapshot {
        self.snapshots
            .borrow()
            .last()
            .cloned()
            .expect("the loop renders on start")
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Closes the host side and waits for in-flight work to drain.
    async fn finish(self) -> Vec<RenderSnapshot> {
        drop(self.mailbox);
        self.handle.await.expect("controller loop panicked");
        let snapshots = self.snapshots.borrow().clone();
        snapshots
    }
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

// ─── Debounce ───

#[tokio::test(start_paused = true)]
async fn test_keystroke_burst_sends_exactly_one_analyze() {
    LocalSet::new()
        .run_until(async {
            let h = Harness::start(false);
            for value in ["p", "pa", "pas", "pass", "passw"] {
                h.send(Message::PasswordInput(value.to_string()));
                sleep(ms(100)).await;
            }

            // Last keystroke at t=400, so nothing fires before t=800.
            assert!(h.calls().is_empty());
            sleep(ms(250)).await;
            assert!(h.calls().is_empty());

            sleep(ms(100)).await;
            assert_eq!(h.calls(), vec![Call::Analyze("passw".to_string())]);
            let view = h.last();
            assert!(view.result_visible);
            assert_eq!(view.res_length, "5");
            assert!(view.suggestions_html.contains("Use a longer password"));

            h.finish().await;
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_clearing_field_cancels_pending_analysis() {
    LocalSet::new()
        .run_until(async {
            let h = Harness::start(false);
            h.send(Message::PasswordInput("abc".to_string()));
            sleep(ms(50)).await;
            h.send(Message::PasswordInput(String::new()));

            let snapshots = h.finish().await;
            assert!(snapshots.iter().all(|s| !s.result_visible));
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_check_button_skips_debounce() {
    LocalSet::new()
        .run_until(async {
            let h = Harness::start(false);
            h.send(Message::PasswordInput("abc".to_string()));
            h.send(Message::CheckClicked);
            sleep(ms(30)).await;

            assert_eq!(h.calls(), vec![Call::Analyze("abc".to_string())]);
            assert!(h.last().result_visible);

            // The debounced cycle still runs once the quiet period is over.
            sleep(ms(400)).await;
            assert_eq!(h.calls().len(), 2);
            h.finish().await;
        })
        .await;
}

// ─── Breach check ───

#[tokio::test(start_paused = true)]
async fn test_breach_check_renders_checking_then_count() {
    LocalSet::new()
        .run_until(async {
            let h = Harness::start(false);
            h.send(Message::PasswordInput("letmein".to_string()));
            h.send(Message::CheckBreachClicked);
            sleep(ms(5)).await;
            assert_eq!(h.last().pwned_html, "Checking...");

            sleep(ms(20)).await;
            assert_eq!(
                h.last().pwned_html,
                "<span class=\"text-danger\">Found 2,048 times in breaches</span>"
            );
            h.finish().await;
        })
        .await;
}

// ─── Copy label ───

#[tokio::test(start_paused = true)]
async fn test_copy_label_reverts_after_ack_period() {
    LocalSet::new()
        .run_until(async {
            let h = Harness::start(false);
            h.send(Message::GenerateClicked);
            sleep(ms(30)).await;
            assert_eq!(h.last().generated, GENERATED);

            h.send(Message::CopyClicked);
            sleep(ms(10)).await;
            assert_eq!(h.last().copy_label, "Copied");
            assert_eq!(*h.writes.borrow(), vec![GENERATED.to_string()]);

            sleep(ms(1400)).await;
            assert_eq!(h.last().copy_label, "Copied");

            sleep(ms(200)).await;
            assert_eq!(h.last().copy_label, "Copy");
            h.finish().await;
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_copy_failure_does_not_revert() {
    LocalSet::new()
        .run_until(async {
            let h = Harness::start(true);
            h.send(Message::GenerateClicked);
            sleep(ms(30)).await;

            h.send(Message::CopyClicked);
            sleep(ms(10)).await;
            assert_eq!(h.last().copy_label, "Copy Failed");

            sleep(ms(5_000)).await;
            assert_eq!(h.last().copy_label, "Copy Failed");
            h.finish().await;
        })
        .await;
}

// ─── Use generated ───

#[tokio::test(start_paused = true)]
async fn test_use_generated_replaces_pending_keystroke_analysis() {
    LocalSet::new()
        .run_until(async {
            let h = Harness::start(false);
            let calls = Rc::clone(&h.calls);
            h.send(Message::GenerateClicked);
            sleep(ms(30)).await;

            h.send(Message::PasswordInput("typed".to_string()));
            sleep(ms(100)).await;
            h.send(Message::UseGeneratedClicked);

            let snapshots = h.finish().await;
            assert_eq!(
                *calls.borrow(),
                vec![
                    Call::Generate(GenerationParams {
                        length: 16,
                        upper: true,
                        digits: true,
                        symbols: true,
                    }),
                    Call::Analyze(GENERATED.to_string()),
                ]
            );
            let last = snapshots.last().cloned().expect("rendered");
            assert_eq!(last.password, GENERATED);
            assert_eq!(last.res_length, GENERATED.len().to_string());
        })
        .await;
}

// ─── Shutdown ───

#[tokio::test(start_paused = true)]
async fn test_loop_exits_when_host_closes_while_idle() {
    LocalSet::new()
        .run_until(async {
            let h = Harness::start(false);
            let snapshots = h.finish().await;
            assert_eq!(snapshots.len(), 1);
            assert_eq!(snapshots[0].copy_label, "Copy");
            assert!(!snapshots[0].result_visible);
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_loop_drains_in_flight_work_before_exit() {
    LocalSet::new()
        .run_until(async {
            let h = Harness::start(false);
            let calls = Rc::clone(&h.calls);
            h.send(Message::PasswordInput("abc".to_string()));
            h.send(Message::CheckBreachClicked);

            let snapshots = h.finish().await;
            assert_eq!(
                *calls.borrow(),
                vec![
                    Call::Breach("abc".to_string()),
                    Call::Analyze("abc".to_string())
                ]
            );
            assert!(snapshots.iter().any(|s| s.pwned_html.contains("2,048")));
            assert!(snapshots.last().is_some_and(|s| s.result_visible));
        })
        .await;
}
