use base64::{engine::general_purpose, Engine};
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::net::TcpStream;
use tokio_tungstenite::{
    tungstenite::{client::IntoClientRequest, http::header::AUTHORIZATION, Message},
    Connector, MaybeTlsStream, WebSocketStream,
};
use tracing::{info, trace};

use super::error::LcuError;

/// Event uris the scout acts on.
pub const GAMEFLOW_PHASE_URI: &str = "/lol-gameflow/v1/gameflow-phase";
/// Champ-select session updates (picks, bans, rerolls). Subscribed but not
/// consumed yet; reserved for pick/ban automation.
pub const CHAMP_SELECT_SESSION_URI: &str = "/lol-champ-select/v1/session";

/// Subscription frame the client expects before it starts pushing events.
const SUBSCRIBE_FRAME: &str = "[5, \"OnJsonApiEvent\"]";

/// Message id of a pushed subscription event.
const EVENT_FRAME_ID: i64 = 8;

/// One pushed client event: a typed wrapper around an opaque payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushEvent {
    #[serde(default)]
    pub event_type: String,
    pub uri: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Persistent push-event connection to the local client.
pub struct EventSocket {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl EventSocket {
    /// Opens the wss connection and subscribes to the client event feed.
    pub async fn connect(port: u16, token: &str) -> Result<Self, LcuError> {
        let url = format!("wss://127.0.0.1:{port}/");
        let mut request = url
            .clone()
            .into_client_request()
            .map_err(|e| LcuError::Socket(e.to_string()))?;
        let auth = general_purpose::STANDARD.encode(format!("riot:{token}"));
        request.headers_mut().insert(
            AUTHORIZATION,
            format!("Basic {auth}")
                .parse()
                .map_err(|_| LcuError::Socket("invalid auth header".to_string()))?,
        );

        let tls = native_tls::TlsConnector::builder()
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(|e| LcuError::Socket(e.to_string()))?;
        let (mut stream, _) = tokio_tungstenite::connect_async_tls_with_config(
            request,
            None,
            false,
            Some(Connector::NativeTls(tls)),
        )
        .await
        .map_err(|e| LcuError::Socket(e.to_string()))?;

        stream
            .send(Message::Text(SUBSCRIBE_FRAME.to_string()))
            .await
            .map_err(|e| LcuError::Socket(e.to_string()))?;
        info!(%url, "connected to client event feed");
        Ok(Self { stream })
    }

    /// Next pushed event, in delivery order.
    ///
    /// Frames that are not subscription events (pings, acks, malformed
    /// payloads) yield `None`. A read failure ends the connection; the
    /// caller owns reconnection.
    pub async fn next_event(&mut self) -> Result<Option<PushEvent>, LcuError> {
        match self.stream.next().await {
            None => Err(LcuError::Socket("connection closed".to_string())),
            Some(Err(e)) => Err(LcuError::Socket(e.to_string())),
            Some(Ok(Message::Text(frame))) => {
                trace!(len = frame.len(), "event frame");
                Ok(parse_event_frame(&frame))
            }
            Some(Ok(_)) => Ok(None),
        }
    }
}

/// Parses a `[8, "OnJsonApiEvent", {..}]` frame into a [`PushEvent`].
fn parse_event_frame(frame: &str) -> Option<PushEvent> {
    let value: serde_json::Value = serde_json::from_str(frame).ok()?;
    let parts = value.as_array()?;
    if parts.len() != 3 || parts[0].as_i64() != Some(EVENT_FRAME_ID) {
        return None;
    }
    serde_json::from_value(parts[2].clone()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_gameflow_phase_event() {
        let frame = r#"[8,"OnJsonApiEvent",{"data":"ChampSelect","eventType":"Update","uri":"/lol-gameflow/v1/gameflow-phase"}]"#;
        let event = parse_event_frame(frame).unwrap();
        assert_eq!(event.uri, GAMEFLOW_PHASE_URI);
        assert_eq!(event.event_type, "Update");
        assert_eq!(event.data.as_str(), Some("ChampSelect"));
    }

    #[test]
    fn skips_non_event_frames() {
        assert!(parse_event_frame("[]").is_none());
        assert!(parse_event_frame(r#"[5,"OnJsonApiEvent"]"#).is_none());
        assert!(parse_event_frame("not json").is_none());
        // Wrong message id
        assert!(parse_event_frame(r#"[3,"OnJsonApiEvent",{"uri":"/x"}]"#).is_none());
    }

    #[test]
    fn skips_event_without_uri() {
        assert!(parse_event_frame(r#"[8,"OnJsonApiEvent",{"data":1}]"#).is_none());
    }
}
