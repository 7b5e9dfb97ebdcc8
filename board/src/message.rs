use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

pub type RoomId = String;
pub type ClientId = uuid::Uuid;

/// Messages a client may send, unwrapped from the `{"type", "data"}` envelope.
///
/// Drawable payloads stay opaque (`Value`); the server only ever looks at
/// their `id` field. Frames with an unknown `type` fail to parse here and
/// get dropped by the connection layer.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ClientEvent {
    #[serde(rename = "cursor:move")]
    CursorMove { x: Number, y: Number },
    #[serde(rename = "path:created")]
    PathCreated(Value),
    #[serde(rename = "object:modified")]
    ObjectModified(Value),
    #[serde(rename = "object:removed")]
    ObjectRemoved(Value),
    /// The reference client sends this without a `data` key.
    #[serde(rename = "canvas:clear")]
    CanvasClear,
}

/// Messages built by the server. Canvas-mutating client traffic is never
/// re-encoded through this type; it is relayed as the received text.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum ServerEvent {
    #[serde(rename = "users:update")]
    UsersUpdate(Vec<String>),
    #[serde(rename = "canvas:load")]
    CanvasLoad(Vec<Value>),
    #[serde(rename = "cursor:move")]
    CursorMove(LiveCursor),
    #[serde(rename = "cursor:remove")]
    CursorRemove { client_id: ClientId },
}

/// A cursor position enriched with the sender's identity. The identity
/// always comes from the session, never from the client payload.
#[derive(Debug, Clone, Serialize)]
pub struct LiveCursor {
    pub x: Number,
    pub y: Number,
    pub username: String,
    pub client_id: ClientId,
}
