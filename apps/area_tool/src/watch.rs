//! Logs every controller notification so a replay shows exactly what subscribers saw.

use area_core::AreaController;
use tracing::info;

pub fn watch_area(area: &AreaController) {
    match area {
        AreaController::Conversation(area) => {
            let id = area.id().clone();
            area.on_topic_change(move |topic| {
                info!(area = %id, ?topic, "topicChange");
            });
            let id = area.id().clone();
            area.on_occupants_change(move |occupants| {
                let ids: Vec<&str> = occupants.iter().map(|p| p.id().as_str()).collect();
                info!(area = %id, occupants = ?ids, "occupantsChange");
            });
        }
        AreaController::Viewing(area) => {
            let id = area.id().clone();
            area.on_playback_change(move |is_playing| {
                info!(area = %id, is_playing, "playbackChange");
            });
            let id = area.id().clone();
            area.on_progress_change(move |elapsed_time_sec| {
                info!(area = %id, elapsed_time_sec, "progressChange");
            });
            let id = area.id().clone();
            area.on_video_change(move |video| {
                info!(area = %id, ?video, "videoChange");
            });
        }
    }
}
