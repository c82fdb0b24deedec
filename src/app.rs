//! Event loop for pwcheck.
//!
//! `App` owns the [`Controller`] and performs the actions it returns.
//! Everything runs on one thread: a tokio current-thread runtime driving a
//! `LocalSet`. Requests and timers are `spawn_local` tasks whose outcome
//! comes back as a [`Message`]; only the loop touches the controller.

use std::future::Future;
use std::io;
use std::rc::Rc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::{JoinHandle, LocalSet};
use tracing::{debug, info};

use crate::controller::{Action, Controller, Message};
use crate::services::clipboard::ClipboardTrait;
use crate::services::strength_client::StrengthServiceTrait;
use crate::types::page::RenderSnapshot;
use crate::types::settings::ControllerSettings;

/// Receives a snapshot after every processed message.
pub trait RenderSink {
    fn render(&mut self, snapshot: &RenderSnapshot);
}

/// Handle hosts use to feed user events into the loop.
///
/// Dropping every clone lets the loop finish once in-flight work drains.
#[derive(Clone)]
pub struct Mailbox {
    tx: UnboundedSender<Message>,
}

impl Mailbox {
    /// Queues a message. Returns false if the loop has already stopped.
    pub fn send(&self, message: Message) -> bool {
        self.tx.send(message).is_ok()
    }
}

/// The controller plus everything needed to carry out its actions.
pub struct App<S: StrengthServiceTrait + 'static> {
    controller: Controller,
    service: Rc<S>,
    clipboard: Box<dyn ClipboardTrait>,
    sink: Box<dyn RenderSink>,
    host_rx: UnboundedReceiver<Message>,
    task_tx: UnboundedSender<Message>,
    task_rx: UnboundedReceiver<Message>,
    debounce_task: Option<JoinHandle<()>>,
    copy_reset_task: Option<JoinHandle<()>>,
    /// Spawned tasks whose completion message has not been processed yet.
    in_flight: usize,
}

impl<S: StrengthServiceTrait + 'static> App<S> {
    pub fn new(
        settings: ControllerSettings,
        service: S,
        clipboard: Box<dyn ClipboardTrait>,
        sink: Box<dyn RenderSink>,
    ) -> (Self, Mailbox) {
        let (host_tx, host_rx) = mpsc::unbounded_channel();
        let (task_tx, task_rx) = mpsc::unbounded_channel();
        let app = Self {
            controller: Controller::new(settings),
            service: Rc::new(service),
            clipboard,
            sink,
            host_rx,
            task_tx,
            task_rx,
            debounce_task: None,
            copy_reset_task: None,
            in_flight: 0,
        };
        (app, Mailbox { tx: host_tx })
    }

    /// Runs the loop on a fresh current-thread runtime, blocking the caller.
    pub fn run_blocking(self) -> io::Result<()> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let local = LocalSet::new();
        local.block_on(&runtime, self.run());
        Ok(())
    }

    /// Processes messages until every [`Mailbox`] is dropped and nothing is
    /// left in flight. Must be polled inside a `LocalSet`.
    pub async fn run(mut self) {
        info!("controller loop started");
        self.render();

        let mut host_open = true;
        loop {
            if !host_open && self.in_flight == 0 {
                break;
            }
            tokio::select! {
                message = self.host_rx.recv(), if host_open => match message {
                    Some(message) => self.dispatch(message),
                    None => {
                        debug!(in_flight = self.in_flight, "host closed, draining");
                        host_open = false;
                    }
                },
                Some(message) = self.task_rx.recv() => {
                    self.in_flight = self.in_flight.saturating_sub(1);
                    self.dispatch(message);
                }
            }
        }
        info!("controller loop stopped");
    }

    fn dispatch(&mut self, message: Message) {
        for action in self.controller.update(message) {
            self.perform(action);
        }
        self.render();
    }

    fn render(&mut self) {
        let snapshot = self.controller.page().render();
        self.sink.render(&snapshot);
    }

    fn perform(&mut self, action: Action) {
        match action {
            Action::ScheduleDebounce { ticket, delay } => {
                self.abort_debounce();
                let handle = self.spawn(async move {
                    tokio::time::sleep(delay).await;
                    Message::DebounceElapsed(ticket)
                });
                self.debounce_task = Some(handle);
            }

            Action::CancelDebounce => self.abort_debounce(),

            Action::Analyze { seq, password } => {
                let service = Rc::clone(&self.service);
                self.spawn(async move {
                    let result = service.analyze(&password).await;
                    Message::AnalyzeCompleted { seq, result }
                });
            }

            Action::CheckBreach { password } => {
                let service = Rc::clone(&self.service);
                self.spawn(async move {
                    Message::BreachCompleted(service.check_breach(&password).await)
                });
            }

            Action::Generate(params) => {
                let service = Rc::clone(&self.service);
                self.spawn(async move {
                    Message::GenerateCompleted(service.generate(&params).await)
                });
            }

            Action::WriteClipboard(text) => {
                let result = self.clipboard.write_text(&text);
                self.post(Message::ClipboardWritten(result));
            }

            Action::ScheduleCopyReset { ticket, delay } => {
                if let Some(handle) = self.copy_reset_task.take() {
                    self.abort(handle);
                }
                let handle = self.spawn(async move {
                    tokio::time::sleep(delay).await;
                    Message::CopyResetElapsed(ticket)
                });
                self.copy_reset_task = Some(handle);
            }
        }
    }

    fn spawn<F>(&mut self, task: F) -> JoinHandle<()>
    where
        F: Future<Output = Message> + 'static,
    {
        self.in_flight += 1;
        let tx = self.task_tx.clone();
        tokio::task::spawn_local(async move {
            let message = task.await;
            let _ = tx.send(message);
        })
    }

    /// Queues a completion produced synchronously on the loop.
    fn post(&mut self, message: Message) {
        self.in_flight += 1;
        let _ = self.task_tx.send(message);
    }

    fn abort_debounce(&mut self) {
        if let Some(handle) = self.debounce_task.take() {
            self.abort(handle);
        }
    }

    /// A finished task has already queued its message; only an unfinished
    /// one stops owing a completion when aborted.
    fn abort(&mut self, handle: JoinHandle<()>) {
        if !handle.is_finished() {
            handle.abort();
            self.in_flight = self.in_flight.saturating_sub(1);
        }
    }
}
