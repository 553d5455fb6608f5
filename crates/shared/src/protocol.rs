use serde::{Deserialize, Serialize};

use crate::{
    domain::{InteractableId, PlayerId, PlayerLocation},
    error::ProtocolError,
};

/// Wire shape of a conversation area as exchanged with the town service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationAreaModel {
    pub id: InteractableId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(rename = "occupantsByID", default)]
    pub occupants_by_id: Vec<PlayerId>,
}

/// Wire shape of a viewing area as exchanged with the town service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewingAreaModel {
    pub id: InteractableId,
    pub is_playing: bool,
    pub elapsed_time_sec: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerModel {
    pub id: PlayerId,
    pub user_name: String,
    #[serde(default)]
    pub location: PlayerLocation,
}

pub const CONVERSATION_AREA_KIND: &str = "conversation_area";
pub const VIEWING_AREA_KIND: &str = "viewing_area";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Interactable {
    ConversationArea(ConversationAreaModel),
    ViewingArea(ViewingAreaModel),
}

impl Interactable {
    pub fn id(&self) -> &InteractableId {
        match self {
            Interactable::ConversationArea(model) => &model.id,
            Interactable::ViewingArea(model) => &model.id,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Interactable::ConversationArea(_) => CONVERSATION_AREA_KIND,
            Interactable::ViewingArea(_) => VIEWING_AREA_KIND,
        }
    }
}

/// Initial town state delivered before any incremental [`TownEvent`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TownSnapshot {
    #[serde(default)]
    pub players: Vec<PlayerModel>,
    #[serde(default)]
    pub interactables: Vec<Interactable>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum TownEvent {
    InteractableUpdate(Interactable),
    PlayerJoined(PlayerModel),
    PlayerDisconnect(PlayerModel),
}

pub fn decode_event(raw: &str) -> Result<TownEvent, ProtocolError> {
    serde_json::from_str(raw).map_err(ProtocolError::Decode)
}

pub fn decode_snapshot(raw: &str) -> Result<TownSnapshot, ProtocolError> {
    serde_json::from_str(raw).map_err(ProtocolError::Decode)
}

pub fn encode_event(event: &TownEvent) -> Result<String, ProtocolError> {
    serde_json::to_string(event).map_err(ProtocolError::Encode)
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
