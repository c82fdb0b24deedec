//! pwcheck UI layer.
//!
//! Uses `wry` for cross-platform WebView rendering:
//! - Windows: WebView2
//! - Linux: WebKitGTK
//! - macOS: WKWebView
//!
//! The checker page is plain HTML/CSS/JS inside the WebView; all behavior
//! lives in the Rust controller and reaches the page over wry IPC.

pub mod webview_app;
