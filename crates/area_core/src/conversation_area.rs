use std::cell::RefCell;

use shared::{
    domain::{InteractableId, PlayerId},
    protocol::ConversationAreaModel,
};
use tracing::debug;

use crate::{
    emitter::{AreaEvent, Emitter, ListenerId},
    player::{occupants_changed, PlayerRef},
};

/// Shown in place of a conversation area's topic when none is set.
pub const NO_TOPIC_STRING: &str = "(No topic)";

#[derive(Debug, Clone, PartialEq)]
pub enum ConversationAreaEvent {
    TopicChange(Option<String>),
    OccupantsChange(Vec<PlayerRef>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversationAreaEventKind {
    TopicChange,
    OccupantsChange,
}

impl AreaEvent for ConversationAreaEvent {
    type Kind = ConversationAreaEventKind;

    fn kind(&self) -> ConversationAreaEventKind {
        match self {
            ConversationAreaEvent::TopicChange(_) => ConversationAreaEventKind::TopicChange,
            ConversationAreaEvent::OccupantsChange(_) => ConversationAreaEventKind::OccupantsChange,
        }
    }
}

#[derive(Debug, Default)]
struct ConversationAreaState {
    topic: Option<String>,
    occupants: Vec<PlayerRef>,
}

/// Local, observable copy of one conversation area.
///
/// Setters take `&self` so listeners holding a handle to the controller can read it,
/// or write to it, while being notified. `topic` listeners run before the new topic is
/// stored; `occupants` listeners run after the new occupants are stored.
#[derive(Debug)]
pub struct ConversationAreaController {
    id: InteractableId,
    state: RefCell<ConversationAreaState>,
    events: Emitter<ConversationAreaEvent>,
}

impl ConversationAreaController {
    pub fn new(id: InteractableId, topic: Option<String>) -> Self {
        Self {
            id,
            state: RefCell::new(ConversationAreaState {
                topic,
                occupants: Vec::new(),
            }),
            events: Emitter::new(),
        }
    }

    /// Builds a controller from the town service's record, resolving occupant ids
    /// with `resolve_players`. Whatever the resolver returns is accepted as-is.
    pub fn from_area_model<F>(model: &ConversationAreaModel, resolve_players: F) -> Self
    where
        F: FnOnce(&[PlayerId]) -> Vec<PlayerRef>,
    {
        let area = Self::new(model.id.clone(), model.topic.clone());
        area.set_occupants(resolve_players(&model.occupants_by_id));
        area
    }

    pub fn id(&self) -> &InteractableId {
        &self.id
    }

    pub fn topic(&self) -> Option<String> {
        self.state.borrow().topic.clone()
    }

    pub fn display_topic(&self) -> String {
        self.topic().unwrap_or_else(|| NO_TOPIC_STRING.to_string())
    }

    /// Returns `true` if the topic changed and `topicChange` was emitted.
    pub fn set_topic(&self, topic: Option<String>) -> bool {
        if self.state.borrow().topic == topic {
            return false;
        }
        debug!(area = %self.id, ?topic, "conversation area topic changed");
        self.events.emit(&ConversationAreaEvent::TopicChange(topic.clone()));
        self.state.borrow_mut().topic = topic;
        true
    }

    pub fn occupants(&self) -> Vec<PlayerRef> {
        self.state.borrow().occupants.clone()
    }

    /// Replaces the occupants. A reordering of the same members is stored without
    /// notifying; any change in count or membership emits `occupantsChange`.
    pub fn set_occupants(&self, occupants: Vec<PlayerRef>) -> bool {
        let changed = {
            let mut state = self.state.borrow_mut();
            let changed = occupants_changed(&state.occupants, &occupants);
            state.occupants = occupants.clone();
            changed
        };
        if changed {
            debug!(
                area = %self.id,
                occupants = occupants.len(),
                "conversation area occupants changed"
            );
            self.events.emit(&ConversationAreaEvent::OccupantsChange(occupants));
        }
        changed
    }

    /// An area is empty when nobody is in it or it has no topic.
    pub fn is_empty(&self) -> bool {
        let state = self.state.borrow();
        state.occupants.is_empty() || state.topic.is_none()
    }

    pub fn to_area_model(&self) -> ConversationAreaModel {
        let state = self.state.borrow();
        ConversationAreaModel {
            id: self.id.clone(),
            topic: state.topic.clone(),
            occupants_by_id: state
                .occupants
                .iter()
                .map(|occupant| occupant.id().clone())
                .collect(),
        }
    }

    pub fn add_listener<F>(&self, kind: ConversationAreaEventKind, listener: F) -> ListenerId
    where
        F: Fn(&ConversationAreaEvent) + 'static,
    {
        self.events.add_listener(kind, listener)
    }

    pub fn on_topic_change<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(Option<&str>) + 'static,
    {
        self.events
            .add_listener(ConversationAreaEventKind::TopicChange, move |event| {
                if let ConversationAreaEvent::TopicChange(topic) = event {
                    listener(topic.as_deref());
                }
            })
    }

    pub fn on_occupants_change<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&[PlayerRef]) + 'static,
    {
        self.events
            .add_listener(ConversationAreaEventKind::OccupantsChange, move |event| {
                if let ConversationAreaEvent::OccupantsChange(occupants) = event {
                    listener(occupants);
                }
            })
    }

    pub fn remove_listener(&self, kind: ConversationAreaEventKind, id: ListenerId) -> bool {
        self.events.remove_listener(kind, id)
    }

    pub fn remove_all_listeners(&self) {
        self.events.remove_all_listeners();
    }

    pub fn listener_count(&self, kind: ConversationAreaEventKind) -> usize {
        self.events.listener_count(kind)
    }
}

#[cfg(test)]
#[path = "tests/conversation_area_tests.rs"]
mod tests;
