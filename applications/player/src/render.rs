/// Text rendering of driver updates
use podcastr_audio::{DriverNotice, PlayerUpdate};
use podcastr_playback::{format_duration, PlaybackEvent};

/// Progress is printed every this many episode seconds
pub const PROGRESS_INTERVAL_SECONDS: u64 = 30;

/// Lines to print for one update
pub fn describe(update: &PlayerUpdate) -> Vec<String> {
    let mut lines = Vec::new();
    let snapshot = &update.snapshot;
    let cleared = update.events.contains(&PlaybackEvent::QueueCleared);

    for event in &update.events {
        match event {
            PlaybackEvent::EpisodeChanged { index, title } => {
                let (members, duration) = snapshot
                    .current_episode()
                    .map(|e| (e.members.as_str(), e.duration_seconds))
                    .unwrap_or(("", 0));
                lines.push(format!(
                    "[{}/{}] {} - {} ({})",
                    index + 1,
                    snapshot.state.queue.len(),
                    title,
                    members,
                    format_duration(duration)
                ));
            }
            PlaybackEvent::PlayingChanged { playing } => {
                // Clearing stops playback; "Queue finished" says enough
                if cleared {
                    continue;
                }
                lines.push(if *playing { "Playing" } else { "Paused" }.to_string());
            }
            PlaybackEvent::LoopingChanged { looping } => {
                lines.push(format!("Loop {}", on_off(*looping)));
            }
            PlaybackEvent::ShufflingChanged { shuffling } => {
                lines.push(format!("Shuffle {}", on_off(*shuffling)));
            }
            PlaybackEvent::ProgressChanged { seconds } => {
                if seconds % PROGRESS_INTERVAL_SECONDS == 0 {
                    lines.push(format!("  {}", snapshot.progress_label()));
                }
            }
            PlaybackEvent::QueueCleared => {
                lines.push("Queue finished".to_string());
            }
        }
    }

    for notice in &update.notices {
        if let DriverNotice::DeviceFailed { message } = notice {
            lines.push(format!("Device error: {}", message));
        }
    }

    lines
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use podcastr_audio::SessionPhase;
    use podcastr_playback::{Episode, PlaybackController};

    fn update_after(controller: &mut PlaybackController, notices: Vec<DriverNotice>) -> PlayerUpdate {
        PlayerUpdate {
            snapshot: controller.snapshot(),
            events: controller.drain_events(),
            notices,
            phase: SessionPhase::Loading,
        }
    }

    fn episode(title: &str) -> Episode {
        Episode {
            title: title.to_string(),
            members: "Host".to_string(),
            thumbnail_url: String::new(),
            duration_seconds: 3_600,
            media_url: format!("mem://{}", title),
        }
    }

    #[test]
    fn episode_change_shows_position_and_length() {
        let mut controller = PlaybackController::default();
        controller.play_list(vec![episode("One"), episode("Two")], 1);

        let lines = describe(&update_after(&mut controller, Vec::new()));

        assert_eq!(lines, vec!["[2/2] Two - Host (01:00:00)", "Playing"]);
    }

    #[test]
    fn progress_only_on_interval() {
        let mut controller = PlaybackController::default();
        controller.play(episode("One"));
        controller.drain_events();

        controller.set_progress(29);
        assert!(describe(&update_after(&mut controller, Vec::new())).is_empty());

        controller.set_progress(60);
        assert_eq!(
            describe(&update_after(&mut controller, Vec::new())),
            vec!["  00:01:00 / 01:00:00"]
        );
    }

    #[test]
    fn clearing_does_not_report_pause() {
        let mut controller = PlaybackController::default();
        controller.play(episode("One"));
        controller.drain_events();

        controller.clear_player_state();
        let lines = describe(&update_after(&mut controller, Vec::new()));

        assert_eq!(lines, vec!["Queue finished"]);
    }

    #[test]
    fn pause_without_clear_is_reported() {
        let mut controller = PlaybackController::default();
        controller.play(episode("One"));
        controller.drain_events();

        controller.toggle_play();
        assert_eq!(
            describe(&update_after(&mut controller, Vec::new())),
            vec!["Paused"]
        );
    }

    #[test]
    fn device_failure_is_reported() {
        let mut controller = PlaybackController::default();
        let lines = describe(&update_after(
            &mut controller,
            vec![
                DriverNotice::PhaseChanged {
                    phase: SessionPhase::NoEpisode,
                },
                DriverNotice::DeviceFailed {
                    message: "404".to_string(),
                },
            ],
        ));

        assert_eq!(lines, vec!["Device error: 404"]);
    }
}
