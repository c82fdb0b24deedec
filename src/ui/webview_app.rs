//! WebView host for the checker page using `wry` + `tao`.
//!
//! Architecture:
//! - The page (`resources/ui/index.html` with `controller.js` inlined) is
//!   served from the `pwcheck://` custom protocol.
//! - DOM events go JS → Rust through `window.ipc.postMessage()` and are
//!   mapped by `rpc_handler::message_from_value` to controller messages.
//! - The controller loop runs on its own thread; each render snapshot
//!   comes back to the UI thread as an `EvalScript` user event.

use std::borrow::Cow;
use std::sync::{Arc, Mutex};
use std::thread;

use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoop, EventLoopBuilder, EventLoopProxy};
use tao::window::WindowBuilder;
use tracing::{debug, error, info, warn};
use wry::WebViewBuilder;

use crate::app::{App, Mailbox, RenderSink};
use crate::rpc_handler::{message_from_value, render_script};
use crate::services::clipboard::default_clipboard;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::services::strength_client::HttpStrengthService;
use crate::types::page::RenderSnapshot;

#[derive(Debug)]
enum UserEvent {
    EvalScript(String),
}

const INDEX_HTML: &str = include_str!("../../resources/ui/index.html");
const CONTROLLER_JS: &str = include_str!("../../resources/ui/controller.js");
const SCRIPT_SLOT: &str = "/*__PW_CONTROLLER_JS__*/";

/// Forwards snapshots to the UI thread and remembers the newest one, so a
/// page that (re)loads late can be brought up to date.
struct WebviewSink {
    proxy: EventLoopProxy<UserEvent>,
    last_script: Arc<Mutex<Option<String>>>,
}

impl RenderSink for WebviewSink {
    fn render(&mut self, snapshot: &RenderSnapshot) {
        let script = render_script(snapshot);
        if let Ok(mut last) = self.last_script.lock() {
            *last = Some(script.clone());
        }
        let _ = self.proxy.send_event(UserEvent::EvalScript(script));
    }
}

fn page_html() -> String {
    INDEX_HTML.replace(SCRIPT_SLOT, CONTROLLER_JS)
}

/// Spawns the controller thread and returns its mailbox once the loop exists.
fn start_controller(
    proxy: EventLoopProxy<UserEvent>,
    last_script: Arc<Mutex<Option<String>>>,
) -> Result<Mailbox, Box<dyn std::error::Error>> {
    let mut engine = SettingsEngine::new(None);
    engine.load_or_default();
    engine.apply_env_overrides();
    let settings = engine.get_settings().clone();
    let service = HttpStrengthService::new(&settings.service)?;
    info!(base_url = service.base_url(), "using strength service");

    let (mailbox_tx, mailbox_rx) = std::sync::mpsc::channel();
    thread::Builder::new()
        .name("pwcheck-controller".to_string())
        .spawn(move || {
            // App holds non-Send parts, so it is built on the thread that runs it.
            let sink = WebviewSink { proxy, last_script };
            let (app, mailbox) = App::new(settings, service, default_clipboard(), Box::new(sink));
            if mailbox_tx.send(mailbox).is_err() {
                return;
            }
            if let Err(e) = app.run_blocking() {
                error!(error = %e, "controller loop failed to start");
            }
        })?;

    Ok(mailbox_rx.recv()?)
}

fn handle_ipc(mailbox: &Mailbox, last_script: &Mutex<Option<String>>, body: &str) -> Option<UserEvent> {
    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "ignoring malformed IPC message");
            return None;
        }
    };
    if value.get("cmd").and_then(|c| c.as_str()) == Some("ui_ready") {
        // Page script just loaded: replay the current state.
        let script = last_script.lock().ok()?.clone()?;
        return Some(UserEvent::EvalScript(script));
    }
    match message_from_value(&value) {
        Ok(message) => {
            mailbox.send(message);
        }
        Err(err) => warn!(error = %err, "ignoring IPC message"),
    }
    None
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let event_loop: EventLoop<UserEvent> = EventLoopBuilder::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let last_script = Arc::new(Mutex::new(None));
    let mailbox = start_controller(proxy.clone(), last_script.clone())?;

    let window = WindowBuilder::new()
        .with_title("Password Strength Checker")
        .with_inner_size(tao::dpi::LogicalSize::new(720.0, 860.0))
        .build(&event_loop)?;

    let ipc_proxy = proxy.clone();
    let ipc_last = last_script.clone();

    let builder = WebViewBuilder::new()
        .with_custom_protocol("pwcheck".into(), move |_wv_id, _request| {
            wry::http::Response::builder()
                .header("Content-Type", "text/html; charset=utf-8")
                .body(Cow::Owned(page_html().into_bytes()))
                .unwrap_or_else(|_| wry::http::Response::new(Cow::Borrowed(&[][..])))
        })
        .with_url("pwcheck://localhost/")
        .with_ipc_handler(move |msg: wry::http::Request<String>| {
            let body = msg.body().as_str();
            debug!(len = body.len(), "ipc message");
            if let Some(event) = handle_ipc(&mailbox, &ipc_last, body) {
                let _ = ipc_proxy.send_event(event);
            }
        })
        .with_devtools(cfg!(debug_assertions));

    #[cfg(target_os = "linux")]
    let webview = {
        use tao::platform::unix::WindowExtUnix;
        use wry::WebViewBuilderExtUnix;
        let vbox = window.default_vbox().ok_or("failed to get GTK vbox")?;
        builder.build_gtk(vbox)?
    };

    #[cfg(not(target_os = "linux"))]
    let webview = builder.build(&window)?;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("window closed");
                *control_flow = ControlFlow::Exit;
            }

            Event::UserEvent(UserEvent::EvalScript(js)) => {
                if let Err(e) = webview.evaluate_script(&js) {
                    warn!(error = %e, "failed to apply render");
                }
            }

            _ => {}
        }
    });
}
