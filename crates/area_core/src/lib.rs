//! Local, observable controllers for the shared areas of a town.
//!
//! Everything here is single-threaded and synchronous: setters compare, store and notify
//! before returning, and listeners run inline on the caller's stack.

pub mod conversation_area;
pub mod directory;
pub mod emitter;
pub mod player;
pub mod viewing_area;

pub use conversation_area::{
    ConversationAreaController, ConversationAreaEvent, ConversationAreaEventKind, NO_TOPIC_STRING,
};
pub use directory::{ApplyOutcome, AreaController, AreaDirectory, DirectoryError};
pub use emitter::{AreaEvent, Emitter, ListenerId};
pub use player::{occupants_changed, PlayerController, PlayerRef};
pub use viewing_area::{ViewingAreaController, ViewingAreaEvent, ViewingAreaEventKind};
