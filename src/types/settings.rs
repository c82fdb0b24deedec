use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Top-level controller settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ControllerSettings {
    #[serde(default)]
    pub service: ServiceSettings,
    #[serde(default)]
    pub timing: TimingSettings,
    #[serde(default)]
    pub generator: GeneratorSettings,
    #[serde(default)]
    pub analysis: AnalysisSettings,
}

/// Where and how to reach the Strength Service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServiceSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Quiet periods used by the controller, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimingSettings {
    pub debounce_ms: u64,
    pub copy_ack_ms: u64,
}

impl TimingSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn copy_ack(&self) -> Duration {
        Duration::from_millis(self.copy_ack_ms)
    }
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            debounce_ms: 400,
            copy_ack_ms: 1500,
        }
    }
}

/// Range and initial state of the generator controls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorSettings {
    pub min_length: u32,
    pub max_length: u32,
    pub default_length: u32,
    pub upper: bool,
    pub digits: bool,
    pub symbols: bool,
}

impl GeneratorSettings {
    /// Clamps a requested length into the control's range.
    pub fn clamp_length(&self, length: u32) -> u32 {
        let (lo, hi) = if self.min_length <= self.max_length {
            (self.min_length, self.max_length)
        } else {
            (self.max_length, self.min_length)
        };
        length.clamp(lo, hi)
    }
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            min_length: 4,
            max_length: 64,
            default_length: 16,
            upper: true,
            digits: true,
            symbols: true,
        }
    }
}

/// Handling of analyze responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Level at which swallowed analyze failures are logged.
    pub error_level: LogSeverity,
    /// Drop analyze responses that belong to anything but the newest request.
    pub latest_send_wins: bool,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            error_level: LogSeverity::Warn,
            latest_send_wins: false,
        }
    }
}

/// Log severity selectable from the settings file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogSeverity {
    Debug,
    Info,
    Warn,
    Error,
}
