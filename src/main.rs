//! pwcheck: password strength checker with live analysis, breach lookup and generation.
//!
//! Entry point: opens the checker page in a WebView window.
//! When built without the `gui` feature, checks the passwords given as
//! arguments in the console instead.

#[cfg(feature = "gui")]
fn main() {
    let _log_guard = match pwcheck::logging::init_file(&pwcheck::platform::get_log_dir()) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("pwcheck: file logging disabled: {}", e);
            None
        }
    };
    if let Err(e) = pwcheck::ui::webview_app::run() {
        eprintln!("pwcheck: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "gui"))]
fn main() {
    use std::cell::RefCell;
    use std::rc::Rc;

    use pwcheck::app::{App, RenderSink};
    use pwcheck::controller::Message;
    use pwcheck::services::clipboard::NoClipboard;
    use pwcheck::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
    use pwcheck::services::strength_client::HttpStrengthService;
    use pwcheck::types::page::RenderSnapshot;

    struct LastSnapshot(Rc<RefCell<Option<RenderSnapshot>>>);

    impl RenderSink for LastSnapshot {
        fn render(&mut self, snapshot: &RenderSnapshot) {
            *self.0.borrow_mut() = Some(snapshot.clone());
        }
    }

    pwcheck::logging::init_stderr();

    let passwords: Vec<String> = std::env::args().skip(1).collect();
    if passwords.is_empty() {
        eprintln!("usage: pwcheck <password>...");
        std::process::exit(2);
    }

    let mut engine = SettingsEngine::new(None);
    engine.load_or_default();
    engine.apply_env_overrides();
    let settings = engine.get_settings().clone();

    for password in passwords {
        let service = match HttpStrengthService::new(&settings.service) {
            Ok(service) => service,
            Err(e) => {
                eprintln!("pwcheck: {}", e);
                std::process::exit(1);
            }
        };
        let last = Rc::new(RefCell::new(None));
        let (app, mailbox) = App::new(
            settings.clone(),
            service,
            Box::new(NoClipboard),
            Box::new(LastSnapshot(Rc::clone(&last))),
        );
        mailbox.send(Message::PasswordInput(password.clone()));
        mailbox.send(Message::CheckBreachClicked);
        drop(mailbox);

        if let Err(e) = app.run_blocking() {
            eprintln!("pwcheck: {}", e);
            std::process::exit(1);
        }

        let Some(view) = last.borrow_mut().take() else {
            continue;
        };
        println!("{}", "─".repeat(60));
        if view.result_visible {
            println!("  length:  {}", view.res_length);
            println!("  entropy: {}", view.res_entropy);
            println!("  rating:  {}", view.res_rating);
            if view.common_alert_visible {
                println!("  ⚠ contains a very common password");
            }
        } else {
            println!("  analysis unavailable");
        }
        println!("  breaches: {}", strip_tags(&view.pwned_html));
    }
}

/// Drops markup from the breach line for console output.
#[cfg(not(feature = "gui"))]
fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&amp;", "&")
}
