//! Routes town-service records to the controller that owns each area.

use std::{collections::HashMap, rc::Rc};

use shared::{
    domain::{InteractableId, PlayerId},
    protocol::{
        Interactable, PlayerModel, TownEvent, TownSnapshot, CONVERSATION_AREA_KIND,
        VIEWING_AREA_KIND,
    },
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    conversation_area::ConversationAreaController,
    player::{PlayerController, PlayerRef},
    viewing_area::ViewingAreaController,
};

#[derive(Debug, Clone)]
pub enum AreaController {
    Conversation(Rc<ConversationAreaController>),
    Viewing(Rc<ViewingAreaController>),
}

impl AreaController {
    pub fn id(&self) -> &InteractableId {
        match self {
            AreaController::Conversation(area) => area.id(),
            AreaController::Viewing(area) => area.id(),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            AreaController::Conversation(_) => CONVERSATION_AREA_KIND,
            AreaController::Viewing(_) => VIEWING_AREA_KIND,
        }
    }

    pub fn to_interactable(&self) -> Interactable {
        match self {
            AreaController::Conversation(area) => {
                Interactable::ConversationArea(area.to_area_model())
            }
            AreaController::Viewing(area) => Interactable::ViewingArea(area.viewing_area_model()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    Created(InteractableId),
    Updated { id: InteractableId, changed: bool },
    RosterChanged,
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("interactable {id} is a {existing} but the update describes a {incoming}")]
    KindMismatch {
        id: InteractableId,
        existing: &'static str,
        incoming: &'static str,
    },
}

#[derive(Debug, Default)]
pub struct AreaDirectory {
    players: HashMap<PlayerId, PlayerRef>,
    areas: HashMap<InteractableId, AreaController>,
    area_order: Vec<InteractableId>,
}

impl AreaDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: TownSnapshot) -> Result<Self, DirectoryError> {
        let mut directory = Self::new();
        for player in snapshot.players {
            directory.add_player(player);
        }
        for interactable in snapshot.interactables {
            directory.apply_interactable(interactable)?;
        }
        info!(
            players = directory.players.len(),
            areas = directory.area_order.len(),
            "area directory loaded from snapshot"
        );
        Ok(directory)
    }

    pub fn apply(&mut self, event: TownEvent) -> Result<ApplyOutcome, DirectoryError> {
        match event {
            TownEvent::PlayerJoined(player) => {
                self.add_player(player);
                Ok(ApplyOutcome::RosterChanged)
            }
            TownEvent::PlayerDisconnect(player) => {
                if self.players.remove(&player.id).is_none() {
                    warn!(player = %player.id, "disconnect for unknown player");
                }
                Ok(ApplyOutcome::RosterChanged)
            }
            TownEvent::InteractableUpdate(interactable) => self.apply_interactable(interactable),
        }
    }

    /// Maps ids to known players, in the order given. Unknown ids are dropped.
    pub fn resolve_players(&self, ids: &[PlayerId]) -> Vec<PlayerRef> {
        ids.iter()
            .filter_map(|id| {
                let player = self.players.get(id).cloned();
                if player.is_none() {
                    warn!(player = %id, "occupant id does not match a known player");
                }
                player
            })
            .collect()
    }

    pub fn player(&self, id: &PlayerId) -> Option<PlayerRef> {
        self.players.get(id).cloned()
    }

    /// Known players ordered by id.
    pub fn players(&self) -> Vec<PlayerRef> {
        let mut players: Vec<_> = self.players.values().cloned().collect();
        players.sort_by(|a, b| a.id().cmp(b.id()));
        players
    }

    pub fn area(&self, id: &InteractableId) -> Option<&AreaController> {
        self.areas.get(id)
    }

    pub fn conversation_area(&self, id: &InteractableId) -> Option<Rc<ConversationAreaController>> {
        match self.areas.get(id) {
            Some(AreaController::Conversation(area)) => Some(Rc::clone(area)),
            _ => None,
        }
    }

    pub fn viewing_area(&self, id: &InteractableId) -> Option<Rc<ViewingAreaController>> {
        match self.areas.get(id) {
            Some(AreaController::Viewing(area)) => Some(Rc::clone(area)),
            _ => None,
        }
    }

    /// Areas in the order they were first seen.
    pub fn areas(&self) -> impl Iterator<Item = &AreaController> + '_ {
        self.area_order.iter().filter_map(|id| self.areas.get(id))
    }

    pub fn active_conversation_areas(&self) -> Vec<Rc<ConversationAreaController>> {
        self.areas()
            .filter_map(|area| match area {
                AreaController::Conversation(area) if !area.is_empty() => Some(Rc::clone(area)),
                _ => None,
            })
            .collect()
    }

    pub fn interactables(&self) -> Vec<Interactable> {
        self.areas().map(AreaController::to_interactable).collect()
    }

    fn add_player(&mut self, model: PlayerModel) {
        let player = PlayerRef::new(PlayerController::from_player_model(model));
        debug!(player = %player.id(), user_name = player.user_name(), "player joined");
        if self.players.insert(player.id().clone(), player).is_some() {
            warn!("player rejoined; previous handle replaced");
        }
    }

    fn apply_interactable(
        &mut self,
        interactable: Interactable,
    ) -> Result<ApplyOutcome, DirectoryError> {
        let id = interactable.id().clone();
        if !self.areas.contains_key(&id) {
            let area = match interactable {
                Interactable::ConversationArea(model) => AreaController::Conversation(Rc::new(
                    ConversationAreaController::from_area_model(&model, |ids| {
                        self.resolve_players(ids)
                    }),
                )),
                Interactable::ViewingArea(model) => {
                    AreaController::Viewing(Rc::new(ViewingAreaController::new(&model)))
                }
            };
            info!(area = %id, kind = area.kind_name(), "area registered");
            self.areas.insert(id.clone(), area);
            self.area_order.push(id.clone());
            return Ok(ApplyOutcome::Created(id));
        }

        let changed = match (&self.areas[&id], &interactable) {
            (AreaController::Conversation(area), Interactable::ConversationArea(model)) => {
                let topic_changed = area.set_topic(model.topic.clone());
                let occupants = self.resolve_players(&model.occupants_by_id);
                let occupants_changed = area.set_occupants(occupants);
                topic_changed || occupants_changed
            }
            (AreaController::Viewing(area), Interactable::ViewingArea(model)) => {
                area.update_from(model)
            }
            (existing, incoming) => {
                return Err(DirectoryError::KindMismatch {
                    id,
                    existing: existing.kind_name(),
                    incoming: incoming.kind_name(),
                });
            }
        };
        Ok(ApplyOutcome::Updated { id, changed })
    }
}

#[cfg(test)]
#[path = "tests/directory_tests.rs"]
mod tests;
