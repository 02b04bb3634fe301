//! Lobby WebSocket connection.
//!
//! One long-lived connection per session. A background task owns the
//! socket: inbound frames and transport events flow out over a channel,
//! outbound envelopes flow in over another. Lost connections are retried
//! with capped exponential backoff and jitter; an explicit shutdown closes
//! the socket and stops the retry loop.

use super::message::Envelope;
use crate::config;
use futures::{SinkExt, StreamExt};
use rand::Rng;
use std::error::Error;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, watch};
use tokio::time::Duration;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use url::Url;

/// Build the lobby endpoint URL from the API base URL.
///
/// The scheme follows the page-security rule of the web client: `https`
/// upgrades to `wss`, `http` to `ws`. The auth token rides as a query
/// parameter because browsers cannot set headers on WebSocket upgrades,
/// and the backend expects the same from us.
pub fn lobby_url(base: &Url, token: &str) -> Result<Url, Box<dyn Error>> {
    let mut url = base.clone();
    let scheme = match base.scheme() {
        "https" | "wss" => "wss",
        "http" | "ws" => "ws",
        other => return Err(format!("Unsupported API scheme: {other}").into()),
    };
    url.set_scheme(scheme)
        .map_err(|_| format!("Cannot derive websocket scheme from {base}"))?;
    url.set_path(config::WS_PATH);
    url.query_pairs_mut().clear().append_pair("token", token);
    Ok(url)
}

/// Backoff delay for the given reconnect attempt, without jitter.
/// Doubles from the base up to the cap.
pub fn base_delay(attempt: u32) -> Duration {
    let exp = attempt.saturating_sub(1).min(16);
    let ms = config::RECONNECT_BASE_MS
        .saturating_mul(1u64 << exp)
        .min(config::RECONNECT_CAP_MS);
    Duration::from_millis(ms)
}

/// Backoff delay with up to 50% added jitter, so reconnecting clients
/// don't stampede the backend in lockstep.
pub fn reconnect_delay(attempt: u32) -> Duration {
    let base = base_delay(attempt);
    let jitter_ms = rand::thread_rng().gen_range(0..=base.as_millis() as u64 / 2);
    base + Duration::from_millis(jitter_ms)
}

/// Events surfaced to the lobby view.
#[derive(Debug)]
pub enum LobbyEvent {
    /// Socket established (initial connect or reconnect).
    Connected,
    /// Inbound protocol frame.
    Inbound(Envelope),
    /// Socket lost; the reason becomes a system line in the history.
    Closed(String),
    /// Retry ceiling reached, the connection will not come back.
    GaveUp,
}

enum CloseReason {
    Shutdown,
    Transport(String),
}

/// Handle to the lobby socket task. Events arrive on the receiver
/// returned by [`LobbyConnection::open`], kept separate so callers can
/// select over it while still sending through the handle.
pub struct LobbyConnection {
    outbound: mpsc::UnboundedSender<Envelope>,
    shutdown: watch::Sender<bool>,
    task: tokio::task::JoinHandle<()>,
}

impl LobbyConnection {
    /// Spawn the connection task against the given lobby URL.
    pub fn open(url: Url) -> (LobbyConnection, mpsc::UnboundedReceiver<LobbyEvent>) {
        let (tx_out, rx_out) = mpsc::unbounded_channel();
        let (tx_evt, rx_evt) = mpsc::unbounded_channel();
        let (tx_shutdown, rx_shutdown) = watch::channel(false);

        let task = tokio::spawn(run_connection(url, rx_out, tx_evt, rx_shutdown));

        (
            LobbyConnection {
                outbound: tx_out,
                shutdown: tx_shutdown,
                task,
            },
            rx_evt,
        )
    }

    /// Queue an envelope for sending.
    pub fn send(&self, envelope: Envelope) -> Result<(), Box<dyn Error>> {
        self.outbound
            .send(envelope)
            .map_err(|e| format!("Lobby connection is gone: {e}").into())
    }

    /// Intentional teardown: closes the socket and stops reconnecting.
    pub async fn close(self) {
        let _ = self.shutdown.send(true);
        let _ = self.task.await;
    }
}

async fn run_connection(
    url: Url,
    mut rx_out: mpsc::UnboundedReceiver<Envelope>,
    tx_evt: mpsc::UnboundedSender<LobbyEvent>,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut attempt: u32 = 0;
    loop {
        if *shutdown.borrow() {
            return;
        }

        match connect_async(url.as_str()).await {
            Ok((socket, _)) => {
                log::info!("Lobby socket connected");
                attempt = 0;
                let _ = tx_evt.send(LobbyEvent::Connected);
                match drive_socket(socket, &mut rx_out, &tx_evt, &mut shutdown).await {
                    CloseReason::Shutdown => {
                        log::info!("Lobby socket closed on request");
                        return;
                    }
                    CloseReason::Transport(reason) => {
                        log::warn!("Lobby socket lost: {reason}");
                        let _ = tx_evt.send(LobbyEvent::Closed(reason));
                    }
                }
            }
            Err(e) => {
                log::warn!("Lobby connect failed: {e}");
                let _ = tx_evt.send(LobbyEvent::Closed(format!("Connect failed: {e}")));
            }
        }

        attempt += 1;
        if attempt > config::RECONNECT_MAX_ATTEMPTS {
            log::error!(
                "Giving up on lobby after {} reconnect attempts",
                config::RECONNECT_MAX_ATTEMPTS
            );
            let _ = tx_evt.send(LobbyEvent::GaveUp);
            return;
        }

        let delay = reconnect_delay(attempt);
        log::info!("Reconnecting to lobby in {delay:?} (attempt {attempt})");
        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            _ = shutdown.changed() => {
                if *shutdown.borrow() {
                    return;
                }
            }
        }
    }
}

async fn drive_socket(
    mut socket: WebSocketStream<MaybeTlsStream<TcpStream>>,
    rx_out: &mut mpsc::UnboundedReceiver<Envelope>,
    tx_evt: &mpsc::UnboundedSender<LobbyEvent>,
    shutdown: &mut watch::Receiver<bool>,
) -> CloseReason {
    loop {
        tokio::select! {
            frame = socket.next() => match frame {
                Some(Ok(Message::Text(text))) => match serde_json::from_str::<Envelope>(&text) {
                    Ok(envelope) => {
                        let _ = tx_evt.send(LobbyEvent::Inbound(envelope));
                    }
                    Err(e) => log::warn!("Dropping unparseable lobby frame: {e}"),
                },
                // tungstenite answers pings on its own
                Some(Ok(Message::Ping(_) | Message::Pong(_))) => {}
                // binary frames are not part of the protocol
                Some(Ok(Message::Binary(_) | Message::Frame(_))) => {}
                Some(Ok(Message::Close(_))) | None => {
                    return CloseReason::Transport("Lobby connection closed".to_string());
                }
                Some(Err(e)) => {
                    return CloseReason::Transport(format!("Lobby transport error: {e}"));
                }
            },
            envelope = rx_out.recv() => match envelope {
                Some(envelope) => match serde_json::to_string(&envelope) {
                    Ok(json) => {
                        if let Err(e) = socket.send(Message::Text(json)).await {
                            return CloseReason::Transport(format!("Lobby send failed: {e}"));
                        }
                    }
                    Err(e) => log::error!("Error serializing outbound frame: {e}"),
                },
                // all senders dropped, treat as teardown
                None => {
                    let _ = socket.close(None).await;
                    return CloseReason::Shutdown;
                }
            },
            _ = shutdown.changed() => {
                if *shutdown.borrow() {
                    let _ = socket.close(None).await;
                    return CloseReason::Shutdown;
                }
            }
        }
    }
}
