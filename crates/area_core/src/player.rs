use std::{
    collections::HashSet,
    fmt,
    hash::{Hash, Hasher},
    ops::Deref,
    rc::Rc,
};

use shared::{
    domain::{PlayerId, PlayerLocation},
    protocol::PlayerModel,
};

/// Local view of one player in the town.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerController {
    id: PlayerId,
    user_name: String,
    location: PlayerLocation,
}

impl PlayerController {
    pub fn new(id: PlayerId, user_name: impl Into<String>, location: PlayerLocation) -> Self {
        Self {
            id,
            user_name: user_name.into(),
            location,
        }
    }

    pub fn from_player_model(model: PlayerModel) -> Self {
        Self::new(model.id, model.user_name, model.location)
    }

    pub fn id(&self) -> &PlayerId {
        &self.id
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn location(&self) -> &PlayerLocation {
        &self.location
    }

    pub fn to_player_model(&self) -> PlayerModel {
        PlayerModel {
            id: self.id.clone(),
            user_name: self.user_name.clone(),
            location: self.location.clone(),
        }
    }
}

/// Shared handle to a [`PlayerController`], compared and hashed by reference identity.
///
/// Two handles are equal only when they point at the same allocation; two players
/// with the same id built separately are different occupants.
#[derive(Clone)]
pub struct PlayerRef(Rc<PlayerController>);

impl PlayerRef {
    pub fn new(player: PlayerController) -> Self {
        Self(Rc::new(player))
    }

    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

impl From<PlayerController> for PlayerRef {
    fn from(player: PlayerController) -> Self {
        Self::new(player)
    }
}

impl Deref for PlayerRef {
    type Target = PlayerController;

    fn deref(&self) -> &PlayerController {
        &self.0
    }
}

impl PartialEq for PlayerRef {
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other)
    }
}

impl Eq for PlayerRef {}

impl Hash for PlayerRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Rc::as_ptr(&self.0), state);
    }
}

impl fmt::Debug for PlayerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PlayerRef").field(&self.0.id).finish()
    }
}

/// Whether assigning `next` over `current` is a meaningful occupant change.
///
/// Order is ignored: the sequences differ when their lengths differ or when the
/// symmetric difference of their identity sets is non-empty.
pub fn occupants_changed(current: &[PlayerRef], next: &[PlayerRef]) -> bool {
    if current.len() != next.len() {
        return true;
    }
    let current: HashSet<&PlayerRef> = current.iter().collect();
    let next: HashSet<&PlayerRef> = next.iter().collect();
    current.symmetric_difference(&next).next().is_some()
}

#[cfg(test)]
#[path = "tests/player_tests.rs"]
mod tests;
