//! DOM model of the checker page.
//!
//! `PageState` holds everything the browser surface displays. `render`
//! turns it into a `RenderSnapshot`, which is what gets shipped to the
//! page script; rendering the same state twice yields the same snapshot.

use serde::Serialize;

use crate::types::analysis::AnalysisResult;
use crate::types::breach::BreachStatus;
use crate::types::generator::{GenOption, GeneratedOutput, GenerationParams};
use crate::types::settings::GeneratorSettings;

pub const SHOW_LABEL: &str = "Show";
pub const HIDE_LABEL: &str = "Hide";
pub const COPY_LABEL: &str = "Copy";
pub const COPIED_LABEL: &str = "Copied";
pub const COPY_FAILED_LABEL: &str = "Copy Failed";

const LOOKS_GOOD_HTML: &str = "<div class=\"alert alert-success\">\u{2705} Looks good \u{2014} consider using a password manager for storage.</div>";

/// Escapes the five HTML-reserved characters.
pub fn escape_html(unsafe_text: &str) -> String {
    let mut out = String::with_capacity(unsafe_text.len());
    for c in unsafe_text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Formats a count with `,` thousands separators (en-US grouping).
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Markup for the suggestions box: a warning list, or the all-clear notice.
pub fn suggestions_html(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        return LOOKS_GOOD_HTML.to_string();
    }
    let items: String = suggestions
        .iter()
        .map(|s| format!("<li>{}</li>", escape_html(s)))
        .collect();
    format!(
        "<div class=\"alert alert-warning\"><strong>Suggestions:</strong><ul>{}</ul></div>",
        items
    )
}

impl BreachStatus {
    /// Plain text of the breach line.
    pub fn text(&self) -> String {
        match self {
            BreachStatus::Empty => String::new(),
            BreachStatus::NeedsPassword => "Enter a password first.".to_string(),
            BreachStatus::Checking => "Checking...".to_string(),
            BreachStatus::Count(0) => "Not found in breaches (0)".to_string(),
            BreachStatus::Count(n) => format!("Found {} times in breaches", group_thousands(*n)),
            BreachStatus::ServiceError(msg) => {
                format!("Error: {}", msg.as_deref().unwrap_or("unknown"))
            }
            BreachStatus::NetworkError => "Network error".to_string(),
        }
    }

    /// Markup of the breach line.
    pub fn to_html(&self) -> String {
        let class = match self {
            BreachStatus::Empty | BreachStatus::NeedsPassword | BreachStatus::Checking => None,
            BreachStatus::Count(0) => Some("text-success"),
            BreachStatus::Count(_) => Some("text-danger"),
            BreachStatus::ServiceError(_) | BreachStatus::NetworkError => Some("text-warning"),
        };
        let text = escape_html(&self.text());
        match class {
            Some(class) => format!("<span class=\"{}\">{}</span>", class, text),
            None => text,
        }
    }
}

/// Current state of every surface on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageState {
    pub password: String,
    /// Bumped whenever the controller, not the user, replaces `password`.
    pub password_revision: u64,
    pub password_masked: bool,
    pub result_visible: bool,
    pub res_length: String,
    pub res_entropy: String,
    pub res_rating: String,
    pub common_alert_visible: bool,
    pub suggestions_html: String,
    pub breach: BreachStatus,
    pub gen_min_length: u32,
    pub gen_max_length: u32,
    pub gen_length: u32,
    pub gen_upper: bool,
    pub gen_digits: bool,
    pub gen_symbols: bool,
    pub generated: GeneratedOutput,
    pub copy_label: &'static str,
}

impl PageState {
    /// Initial page, with the generator controls taken from settings.
    pub fn new(generator: &GeneratorSettings) -> Self {
        Self {
            password: String::new(),
            password_revision: 0,
            password_masked: true,
            result_visible: false,
            res_length: String::new(),
            res_entropy: String::new(),
            res_rating: String::new(),
            common_alert_visible: false,
            suggestions_html: String::new(),
            breach: BreachStatus::Empty,
            gen_min_length: generator.clamp_length(0),
            gen_max_length: generator.clamp_length(u32::MAX),
            gen_length: generator.clamp_length(generator.default_length),
            gen_upper: generator.upper,
            gen_digits: generator.digits,
            gen_symbols: generator.symbols,
            generated: GeneratedOutput::Empty,
            copy_label: COPY_LABEL,
        }
    }

    pub fn toggle_label(&self) -> &'static str {
        if self.password_masked {
            SHOW_LABEL
        } else {
            HIDE_LABEL
        }
    }

    /// The length label always mirrors the length control.
    pub fn gen_len_label(&self) -> String {
        self.gen_length.to_string()
    }

    pub fn set_gen_option(&mut self, option: GenOption, checked: bool) {
        match option {
            GenOption::Upper => self.gen_upper = checked,
            GenOption::Digits => self.gen_digits = checked,
            GenOption::Symbols => self.gen_symbols = checked,
        }
    }

    /// Generation parameters as currently shown by the controls.
    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams {
            length: self.gen_length,
            upper: self.gen_upper,
            digits: self.gen_digits,
            symbols: self.gen_symbols,
        }
    }

    /// Puts `password` into the field on the user's behalf.
    pub fn replace_password(&mut self, password: String) {
        self.password = password;
        self.password_revision += 1;
    }

    /// Replaces the displayed analysis with `result` and shows the panel.
    pub fn show_analysis(&mut self, result: &AnalysisResult) {
        self.res_length = result.length.to_string();
        self.res_entropy = result.entropy.to_string();
        self.res_rating = result.rating.clone();
        self.common_alert_visible = result.is_common;
        self.suggestions_html = suggestions_html(&result.suggestions);
        self.result_visible = true;
        self.breach = BreachStatus::Empty;
    }

    /// Hides the result panel and clears the breach line.
    pub fn hide_results(&mut self) {
        self.result_visible = false;
        self.breach = BreachStatus::Empty;
    }

    pub fn render(&self) -> RenderSnapshot {
        RenderSnapshot {
            password: self.password.clone(),
            password_revision: self.password_revision,
            password_type: if self.password_masked { "password" } else { "text" },
            toggle_label: self.toggle_label(),
            result_visible: self.result_visible,
            res_length: self.res_length.clone(),
            res_entropy: self.res_entropy.clone(),
            res_rating: self.res_rating.clone(),
            common_alert_visible: self.common_alert_visible,
            suggestions_html: self.suggestions_html.clone(),
            pwned_html: self.breach.to_html(),
            gen_min_length: self.gen_min_length,
            gen_max_length: self.gen_max_length,
            gen_length: self.gen_length,
            gen_len_label: self.gen_len_label(),
            gen_upper: self.gen_upper,
            gen_digits: self.gen_digits,
            gen_symbols: self.gen_symbols,
            generated: self.generated.display_text().to_string(),
            copy_label: self.copy_label,
        }
    }
}

/// What the page script applies to the DOM.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub password: String,
    /// The page only writes `password` into the field when this changes;
    /// otherwise the field is ahead of the controller while the user types.
    pub password_revision: u64,
    pub password_type: &'static str,
    pub toggle_label: &'static str,
    pub result_visible: bool,
    pub res_length: String,
    pub res_entropy: String,
    pub res_rating: String,
    pub common_alert_visible: bool,
    pub suggestions_html: String,
    pub pwned_html: String,
    pub gen_min_length: u32,
    pub gen_max_length: u32,
    pub gen_length: u32,
    pub gen_len_label: String,
    pub gen_upper: bool,
    pub gen_digits: bool,
    pub gen_symbols: bool,
    pub generated: String,
    pub copy_label: &'static str,
}
