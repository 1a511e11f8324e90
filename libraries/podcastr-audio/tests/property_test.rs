//! Property-based tests for the audio driver
//!
//! Runs random command and clock sequences against the simulated device
//! and checks that device and controller never drift apart.

use podcastr_audio::{AudioDriver, DriverConfig, SessionPhase, SimulatedDevice};
use podcastr_playback::{Episode, PlaybackConfig, PlaybackController};
use proptest::prelude::*;
use std::time::Duration;

// ===== Helpers =====

#[derive(Debug, Clone)]
enum Op {
    Advance(u64),
    TogglePlay,
    ToggleLoop,
    ToggleShuffle,
    Next,
    Previous,
    Seek(u64),
    Clear,
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0u64..90).prop_map(Op::Advance),
        1 => Just(Op::TogglePlay),
        1 => Just(Op::ToggleLoop),
        1 => Just(Op::ToggleShuffle),
        1 => Just(Op::Next),
        1 => Just(Op::Previous),
        1 => (0u64..200).prop_map(Op::Seek),
        1 => Just(Op::Clear),
    ]
}

fn arbitrary_queue() -> impl Strategy<Value = Vec<Episode>> {
    prop::collection::vec(0u64..120, 1..8).prop_map(|durations| {
        durations
            .into_iter()
            .enumerate()
            .map(|(i, duration_seconds)| Episode {
                title: format!("Episode {}", i),
                members: "Host".to_string(),
                thumbnail_url: String::new(),
                duration_seconds,
                media_url: format!("mem://{}", i),
            })
            .collect()
    })
}

fn apply(driver: &mut AudioDriver<SimulatedDevice>, op: &Op) {
    match op {
        Op::Advance(seconds) => driver.device_mut().advance(Duration::from_secs(*seconds)),
        Op::TogglePlay => driver.toggle_play(),
        Op::ToggleLoop => driver.toggle_looping(),
        Op::ToggleShuffle => driver.toggle_shuffling(),
        Op::Next => driver.play_next(),
        Op::Previous => driver.play_previous(),
        Op::Seek(seconds) => {
            let _ = driver.seek(*seconds);
        }
        Op::Clear => driver.clear_player_state(),
    }
    driver.process_pending();
}

fn check_invariants(driver: &AudioDriver<SimulatedDevice>) -> Result<(), TestCaseError> {
    let controller = driver.controller();
    let device = driver.device();

    match controller.current_episode() {
        None => {
            prop_assert!(controller.queue().is_empty());
            prop_assert_eq!(driver.phase(), SessionPhase::NoEpisode);
            prop_assert!(driver.session().is_none());
            prop_assert!(device.loaded_url().is_none());
            prop_assert!(!controller.is_playing());
        }
        Some(episode) => {
            prop_assert!(driver.session().is_some());
            prop_assert_ne!(driver.phase(), SessionPhase::NoEpisode);
            prop_assert_eq!(device.loaded_url(), Some(episode.media_url.as_str()));
            prop_assert_eq!(device.is_playing(), controller.is_playing());
            prop_assert_eq!(device.is_looping(), controller.is_looping());
            prop_assert!(
                controller.progress_seconds() <= episode.duration_seconds,
                "Progress {} past duration {}",
                controller.progress_seconds(),
                episode.duration_seconds
            );
        }
    }

    Ok(())
}

// ===== Property Tests =====

proptest! {
    /// Property: device and controller agree after any command sequence
    #[test]
    fn device_follows_controller(
        queue in arbitrary_queue(),
        seed in any::<u64>(),
        ops in prop::collection::vec(arbitrary_op(), 0..60),
    ) {
        let episodes = queue.clone();
        let device = SimulatedDevice::from_episodes(&episodes);
        let controller = PlaybackController::new(PlaybackConfig {
            shuffle_seed: Some(seed),
            ..Default::default()
        });
        let mut driver = AudioDriver::new(controller, device, DriverConfig::default());

        driver.play_list(queue, 0);
        driver.process_pending();
        check_invariants(&driver)?;

        for op in &ops {
            apply(&mut driver, op);
            check_invariants(&driver)?;
        }
    }

    /// Property: without loop or shuffle, enough clock time empties the queue
    #[test]
    fn sequential_playback_runs_to_completion(queue in arbitrary_queue()) {
        let total: u64 = queue.iter().map(|e| e.duration_seconds).sum();
        let device = SimulatedDevice::from_episodes(&queue);
        let mut driver = AudioDriver::new(
            PlaybackController::default(),
            device,
            DriverConfig::default(),
        );

        driver.play_list(queue.clone(), 0);
        driver.process_pending();

        for _ in 0..=queue.len() {
            driver.device_mut().advance(Duration::from_secs(total + 1));
            driver.process_pending();
        }

        prop_assert_eq!(driver.phase(), SessionPhase::NoEpisode);
        prop_assert!(driver.controller().queue().is_empty());
    }
}
