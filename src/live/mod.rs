// src/live/mod.rs

//! Development HTTP server with live reload.
//!
//! The server serves the destination directory, injects a small client
//! script into every HTML page and keeps a WebSocket open to each browser.
//! The rest of the crate only needs two things from here: "serve this
//! directory" ([`LiveServer`]) and "signal reload" ([`ReloadHub`]).

pub mod inject;
pub mod reload;
pub mod server;

pub use reload::{RELOAD_MESSAGE, ReloadHub, ReloadSignal};
pub use server::{LiveServer, router};

/// WebSocket endpoint browsers connect to.
pub const RELOAD_SOCKET_PATH: &str = "/__assetpipe/reload";

/// URL of the injected client script.
pub const CLIENT_SCRIPT_PATH: &str = "/__assetpipe/client.js";

/// Browser-side reload client.
pub const CLIENT_JS: &str = include_str!("../../assets/livereload.js");
