// src/live/reload.rs

//! Reload signal broadcast and the WebSocket channel browsers listen on.

use std::fmt;

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use tokio::sync::broadcast;
use tracing::debug;

/// Text frame sent to every client on a reload signal.
pub const RELOAD_MESSAGE: &str = "reload";

/// Payload-free "reload now" event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadSignal;

/// Fan-out point for reload signals.
///
/// Cloning is cheap; every clone feeds the same set of subscribers. A
/// signal sent while nobody is subscribed is dropped: there is no queue
/// and no replay for clients that connect later.
#[derive(Clone)]
pub struct ReloadHub {
    tx: broadcast::Sender<ReloadSignal>,
}

impl fmt::Debug for ReloadHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReloadHub")
            .field("clients", &self.client_count())
            .finish()
    }
}

impl Default for ReloadHub {
    fn default() -> Self {
        Self::new()
    }
}

impl ReloadHub {
    pub fn new() -> Self {
        // Signals carry no payload, so a lagging client only needs to know
        // that at least one arrived.
        let (tx, _rx) = broadcast::channel(16);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ReloadSignal> {
        self.tx.subscribe()
    }

    /// Number of currently connected subscribers.
    pub fn client_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Broadcast a reload. Returns how many subscribers it reached.
    pub fn signal(&self) -> usize {
        match self.tx.send(ReloadSignal) {
            Ok(n) => n,
            Err(_) => {
                debug!("reload signal dropped: no clients connected");
                0
            }
        }
    }
}

/// `GET /__assetpipe/reload`: upgrade to a WebSocket and push `reload`
/// frames until the client goes away.
pub async fn reload_socket(ws: WebSocketUpgrade, State(hub): State<ReloadHub>) -> Response {
    let rx = hub.subscribe();
    ws.on_upgrade(move |socket| client_loop(socket, rx))
}

async fn client_loop(mut socket: WebSocket, mut rx: broadcast::Receiver<ReloadSignal>) {
    debug!("reload client connected");

    loop {
        tokio::select! {
            signal = rx.recv() => match signal {
                Ok(ReloadSignal) | Err(broadcast::error::RecvError::Lagged(_)) => {
                    if socket.send(Message::Text(RELOAD_MESSAGE.into())).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
        }
    }

    debug!("reload client disconnected");
}
