//! pwcheck RPC Server: headless host for the controller.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Input:  the page's IPC events, e.g. {"cmd":"input","value":"hunter2"}
//! Output: {"render":{...}} after every processed message, or {"error":"..."}
//! for an input line that could not be understood.

use std::io::{self, BufRead, Write};

use serde_json::json;
use tracing::info;

use pwcheck::app::{App, RenderSink};
use pwcheck::logging;
use pwcheck::rpc_handler::parse_ipc;
use pwcheck::services::clipboard::default_clipboard;
use pwcheck::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use pwcheck::services::strength_client::HttpStrengthService;
use pwcheck::types::page::RenderSnapshot;

/// Writes each snapshot as one line on stdout.
struct StdoutSink;

impl RenderSink for StdoutSink {
    fn render(&mut self, snapshot: &RenderSnapshot) {
        emit(&json!({ "render": snapshot }));
    }
}

fn emit(value: &serde_json::Value) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let _ = writeln!(out, "{}", value);
    let _ = out.flush();
}

fn main() {
    logging::init_stderr();

    let mut engine = SettingsEngine::new(None);
    engine.load_or_default();
    engine.apply_env_overrides();
    let settings = engine.get_settings().clone();

    let service = match HttpStrengthService::new(&settings.service) {
        Ok(service) => service,
        Err(e) => {
            eprintln!("pwcheck-rpc: {}", e);
            std::process::exit(1);
        }
    };
    info!(base_url = service.base_url(), "using strength service");

    let (app, mailbox) = App::new(settings, service, default_clipboard(), Box::new(StdoutSink));

    // Blocking stdin reads stay off the event loop thread.
    std::thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(l) => l,
                Err(_) => break,
            };
            if line.trim().is_empty() {
                continue;
            }
            match parse_ipc(&line) {
                Ok(message) => {
                    if !mailbox.send(message) {
                        break;
                    }
                }
                Err(err) => emit(&json!({ "error": err })),
            }
        }
    });

    if let Err(e) = app.run_blocking() {
        eprintln!("pwcheck-rpc: failed to start runtime: {}", e);
        std::process::exit(1);
    }
}
