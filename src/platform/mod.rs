// pwcheck platform paths
// Config holds settings.json; the log directory holds the GUI host's rolling log files.
//
// Linux:   ~/.config/pwcheck, ~/.local/share/pwcheck/logs (XDG variables honored)
// macOS:   ~/Library/Application Support/pwcheck, ~/Library/Logs/pwcheck
// Windows: %APPDATA%/pwcheck, %LOCALAPPDATA%/pwcheck/logs

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "pwcheck";

#[cfg_attr(target_os = "windows", allow(dead_code))]
fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Returns the platform-specific configuration directory.
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        let appdata = env::var("APPDATA")
            .unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
        PathBuf::from(appdata).join(APP_DIR)
    }
    #[cfg(target_os = "macos")]
    {
        home_dir()
            .join("Library")
            .join("Application Support")
            .join(APP_DIR)
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        match env::var("XDG_CONFIG_HOME") {
            Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join(APP_DIR),
            _ => home_dir().join(".config").join(APP_DIR),
        }
    }
}

/// Returns the platform-specific log directory.
pub fn get_log_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        let local_appdata = env::var("LOCALAPPDATA")
            .unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Local"));
        PathBuf::from(local_appdata).join(APP_DIR).join("logs")
    }
    #[cfg(target_os = "macos")]
    {
        home_dir().join("Library").join("Logs").join(APP_DIR)
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        let data = match env::var("XDG_DATA_HOME") {
            Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
            _ => home_dir().join(".local").join("share"),
        };
        data.join(APP_DIR).join("logs")
    }
}
