use std::cell::RefCell;

use shared::{domain::InteractableId, protocol::ViewingAreaModel};
use tracing::debug;

use crate::emitter::{AreaEvent, Emitter, ListenerId};

#[derive(Debug, Clone, PartialEq)]
pub enum ViewingAreaEvent {
    PlaybackChange(bool),
    ProgressChange(f64),
    VideoChange(Option<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewingAreaEventKind {
    PlaybackChange,
    ProgressChange,
    VideoChange,
}

impl AreaEvent for ViewingAreaEvent {
    type Kind = ViewingAreaEventKind;

    fn kind(&self) -> ViewingAreaEventKind {
        match self {
            ViewingAreaEvent::PlaybackChange(_) => ViewingAreaEventKind::PlaybackChange,
            ViewingAreaEvent::ProgressChange(_) => ViewingAreaEventKind::ProgressChange,
            ViewingAreaEvent::VideoChange(_) => ViewingAreaEventKind::VideoChange,
        }
    }
}

#[derive(Debug)]
struct ViewingAreaState {
    is_playing: bool,
    elapsed_time_sec: f64,
    video: Option<String>,
}

/// Local, observable copy of one viewing area. Every setter stores the new value
/// before notifying, so listeners reading the controller see the update.
#[derive(Debug)]
pub struct ViewingAreaController {
    id: InteractableId,
    state: RefCell<ViewingAreaState>,
    events: Emitter<ViewingAreaEvent>,
}

impl ViewingAreaController {
    pub fn new(model: &ViewingAreaModel) -> Self {
        Self {
            id: model.id.clone(),
            state: RefCell::new(ViewingAreaState {
                is_playing: model.is_playing,
                elapsed_time_sec: model.elapsed_time_sec,
                video: model.video.clone(),
            }),
            events: Emitter::new(),
        }
    }

    pub fn id(&self) -> &InteractableId {
        &self.id
    }

    pub fn is_playing(&self) -> bool {
        self.state.borrow().is_playing
    }

    pub fn set_is_playing(&self, is_playing: bool) -> bool {
        {
            let mut state = self.state.borrow_mut();
            if state.is_playing == is_playing {
                return false;
            }
            state.is_playing = is_playing;
        }
        debug!(area = %self.id, is_playing, "viewing area playback changed");
        self.events.emit(&ViewingAreaEvent::PlaybackChange(is_playing));
        true
    }

    pub fn elapsed_time_sec(&self) -> f64 {
        self.state.borrow().elapsed_time_sec
    }

    /// Values are not range-checked; negative or past-the-end positions are kept.
    pub fn set_elapsed_time_sec(&self, elapsed_time_sec: f64) -> bool {
        {
            let mut state = self.state.borrow_mut();
            if state.elapsed_time_sec == elapsed_time_sec {
                return false;
            }
            state.elapsed_time_sec = elapsed_time_sec;
        }
        debug!(area = %self.id, elapsed_time_sec, "viewing area progress changed");
        self.events.emit(&ViewingAreaEvent::ProgressChange(elapsed_time_sec));
        true
    }

    pub fn video(&self) -> Option<String> {
        self.state.borrow().video.clone()
    }

    pub fn set_video(&self, video: Option<String>) -> bool {
        {
            let mut state = self.state.borrow_mut();
            if state.video == video {
                return false;
            }
            state.video = video.clone();
        }
        debug!(area = %self.id, ?video, "viewing area video changed");
        self.events.emit(&ViewingAreaEvent::VideoChange(video));
        true
    }

    /// Applies playback, progress and video from `model` through the individual setters.
    /// `model.id` is ignored. Returns `true` if any field changed.
    pub fn update_from(&self, model: &ViewingAreaModel) -> bool {
        let playback = self.set_is_playing(model.is_playing);
        let progress = self.set_elapsed_time_sec(model.elapsed_time_sec);
        let video = self.set_video(model.video.clone());
        playback || progress || video
    }

    pub fn viewing_area_model(&self) -> ViewingAreaModel {
        let state = self.state.borrow();
        ViewingAreaModel {
            id: self.id.clone(),
            is_playing: state.is_playing,
            elapsed_time_sec: state.elapsed_time_sec,
            video: state.video.clone(),
        }
    }

    pub fn add_listener<F>(&self, kind: ViewingAreaEventKind, listener: F) -> ListenerId
    where
        F: Fn(&ViewingAreaEvent) + 'static,
    {
        self.events.add_listener(kind, listener)
    }

    pub fn on_playback_change<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(bool) + 'static,
    {
        self.events
            .add_listener(ViewingAreaEventKind::PlaybackChange, move |event| {
                if let ViewingAreaEvent::PlaybackChange(is_playing) = event {
                    listener(*is_playing);
                }
            })
    }

    pub fn on_progress_change<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(f64) + 'static,
    {
        self.events
            .add_listener(ViewingAreaEventKind::ProgressChange, move |event| {
                if let ViewingAreaEvent::ProgressChange(elapsed) = event {
                    listener(*elapsed);
                }
            })
    }

    pub fn on_video_change<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(Option<&str>) + 'static,
    {
        self.events
            .add_listener(ViewingAreaEventKind::VideoChange, move |event| {
                if let ViewingAreaEvent::VideoChange(video) = event {
                    listener(video.as_deref());
                }
            })
    }

    pub fn remove_listener(&self, kind: ViewingAreaEventKind, id: ListenerId) -> bool {
        self.events.remove_listener(kind, id)
    }

    pub fn remove_all_listeners(&self) {
        self.events.remove_all_listeners();
    }

    pub fn listener_count(&self, kind: ViewingAreaEventKind) -> usize {
        self.events.listener_count(kind)
    }
}

#[cfg(test)]
#[path = "tests/viewing_area_tests.rs"]
mod tests;
