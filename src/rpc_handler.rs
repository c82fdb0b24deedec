//! IPC message handling for the checker page.
//!
//! The page script posts one JSON object per DOM event, e.g.
//! `{"cmd":"input","value":"hunter2"}`; both hosts (the webview and the
//! stdin/stdout server) funnel those through [`parse_ipc`]. In the other
//! direction [`render_script`] wraps a snapshot for `evaluate_script`.

use serde_json::Value;

use crate::controller::Message;
use crate::types::generator::GenOption;
use crate::types::page::RenderSnapshot;

/// Parse a raw IPC body into a controller message.
pub fn parse_ipc(body: &str) -> Result<Message, String> {
    let msg: Value = serde_json::from_str(body).map_err(|e| format!("parse error: {}", e))?;
    message_from_value(&msg)
}

/// Map an already-decoded IPC object to a controller message.
pub fn message_from_value(msg: &Value) -> Result<Message, String> {
    let cmd = msg.get("cmd").and_then(|v| v.as_str()).ok_or("missing cmd")?;

    match cmd {
        "input" => {
            let value = msg.get("value").and_then(|v| v.as_str()).ok_or("missing value")?;
            Ok(Message::PasswordInput(value.to_string()))
        }
        "toggle_visibility" => Ok(Message::ToggleVisibility),
        "check" => Ok(Message::CheckClicked),
        "check_pwned" => Ok(Message::CheckBreachClicked),
        "gen_length" => {
            // Range inputs report their value as a string.
            let value = msg.get("value").ok_or("missing value")?;
            let length = match value {
                Value::Number(n) => n.as_u64(),
                Value::String(s) => s.trim().parse::<u64>().ok(),
                _ => None,
            }
            .ok_or("invalid length")?;
            Ok(Message::GenLengthChanged(length.min(u32::MAX as u64) as u32))
        }
        "gen_option" => {
            let option = msg
                .get("option")
                .and_then(|v| v.as_str())
                .and_then(GenOption::parse)
                .ok_or("invalid option")?;
            let checked = msg.get("checked").and_then(|v| v.as_bool()).ok_or("missing checked")?;
            Ok(Message::GenOptionChanged(option, checked))
        }
        "generate" => Ok(Message::GenerateClicked),
        "copy" => Ok(Message::CopyClicked),
        "use_generated" => Ok(Message::UseGeneratedClicked),
        other => Err(format!("unknown command: {}", other)),
    }
}

/// Script that applies `snapshot` in the page.
pub fn render_script(snapshot: &RenderSnapshot) -> String {
    let json = serde_json::to_string(snapshot).unwrap_or_else(|_| "null".to_string());
    format!("if(window.__pw_render)window.__pw_render({})", json)
}
