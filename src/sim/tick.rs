//! Per-frame simulation step
//!
//! Core game loop that advances one run by one frame. `tick` never touches
//! storage or rendering: anything the outside world has to act on comes back
//! as a `GameEvent`.

use super::autopilot;
use super::collision::first_collision;
use super::obstacle;
use super::state::{GamePhase, GameState};

/// One-shot commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Restart the run from any phase
    pub restart: bool,
    /// Start a new run; only honored on the game over screen
    pub new_game: bool,
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - autopilot steers instead of the held keys
    pub autopilot: bool,
}

/// Things that happened during a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// The run was reset
    Restarted,
    /// The speed multiplier went up
    SpeedUp { multiplier: f32 },
    /// The player hit the car in `slot`
    Crashed { slot: usize, score: u64 },
    /// The finished run's score should be stored. Emitted once per run.
    PersistScore { score: u64 },
}

/// Advance the game state by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    let wants_reset = input.restart || (input.new_game && state.run.is_over());
    if wants_reset {
        // A run that crashed last frame hasn't been saved yet
        if let Some(score) = state.run.take_unsaved_score() {
            events.push(GameEvent::PersistScore { score });
        }
        state.reset();
        log::info!("Run restarted");
        events.push(GameEvent::Restarted);
        return events;
    }

    if input.pause {
        match state.run.phase {
            GamePhase::Running => state.run.phase = GamePhase::Paused,
            GamePhase::Paused => state.run.phase = GamePhase::Running,
            GamePhase::GameOver => {}
        }
    }

    match state.run.phase {
        GamePhase::Paused => events,
        GamePhase::GameOver => {
            game_over_frame(state, dt, &mut events);
            events
        }
        GamePhase::Running => {
            running_frame(state, input, dt, &mut events);
            events
        }
    }
}

fn game_over_frame(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) {
    // Claimed before the outcome is known: a failed save is never retried
    if let Some(score) = state.run.take_unsaved_score() {
        events.push(GameEvent::PersistScore { score });
    }
    state.run.game_over_elapsed += dt;
}

fn running_frame(
    state: &mut GameState,
    input: &TickInput,
    dt: f32,
    events: &mut Vec<GameEvent>,
) {
    state.time_ticks += 1;

    // Difficulty
    let bumps = state.run.difficulty.advance(
        dt,
        state.config.speed_increase_interval,
        state.config.speed_increase_amount,
    );
    let multiplier = state.run.difficulty.speed_multiplier;
    if bumps > 0 {
        log::debug!("Speed multiplier now x{multiplier:.2}");
        events.push(GameEvent::SpeedUp { multiplier });
    }

    // Player
    let held = if input.autopilot {
        autopilot::steer(state)
    } else {
        state.held
    };
    state.player.steer(held, &state.track, state.config.lane_snap_distance);

    // Road and traffic
    state.scroll_stripes();
    obstacle::update_all(
        &mut state.obstacles,
        dt,
        multiplier,
        &state.track,
        &state.config,
        &mut state.rng,
    );

    let crash = first_collision(&state.player, &state.obstacles);

    // The crash frame still scores
    state.run.score += state.run.difficulty.score_increment();

    if let Some(slot) = crash {
        state.run.phase = GamePhase::GameOver;
        log::info!(
            "Crashed into car {} after {:.1}s, score {}",
            slot,
            state.run.difficulty.elapsed,
            state.run.score
        );
        events.push(GameEvent::Crashed {
            slot,
            score: state.run.score,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::sim::state::HeldInput;
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    /// State with all traffic parked far above the screen
    fn open_road(seed: u64) -> GameState {
        let mut state = GameState::new(SimConfig::default(), seed).unwrap();
        park_traffic(&mut state);
        state
    }

    fn park_traffic(state: &mut GameState) {
        for (i, o) in state.obstacles.iter_mut().enumerate() {
            o.pos.y = 100_000.0 + i as f32 * 1000.0;
        }
    }

    /// Put a car right on top of the player
    fn force_crash(state: &mut GameState) {
        state.obstacles[0].pos = state.player.pos + Vec2::new(0.0, 10.0);
    }

    #[test]
    fn test_score_counts_frames() {
        let mut state = open_road(1);
        let input = TickInput::default();
        for _ in 0..100 {
            tick(&mut state, &input, DT);
        }
        assert_eq!(state.run.score, 100);
        assert_eq!(state.time_ticks, 100);
        assert_eq!(state.run.phase, GamePhase::Running);
    }

    #[test]
    fn test_held_keys_move_player() {
        let mut state = open_road(2);
        state.held = HeldInput {
            left: true,
            right: false,
        };
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.player.pos.x, 395.0);
    }

    #[test]
    fn test_crash_ends_run_and_scores_frame() {
        let mut state = open_road(3);
        force_crash(&mut state);
        let events = tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.run.phase, GamePhase::GameOver);
        assert!(state.run.is_over());
        assert_eq!(state.run.score, 1);
        assert_eq!(events, vec![GameEvent::Crashed { slot: 0, score: 1 }]);
    }

    #[test]
    fn test_no_updates_after_game_over() {
        let mut state = open_road(4);
        force_crash(&mut state);
        tick(&mut state, &TickInput::default(), DT);

        let player_x = state.player.pos.x;
        let ys: Vec<f32> = state.obstacles.iter().map(|o| o.pos.y).collect();
        state.held.left = true;
        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), DT);
        }
        assert_eq!(state.run.score, 1);
        assert_eq!(state.player.pos.x, player_x);
        let after: Vec<f32> = state.obstacles.iter().map(|o| o.pos.y).collect();
        assert_eq!(after, ys);
        assert!((state.run.game_over_elapsed - 0.5).abs() < 1e-4);
        assert!(!state.game_over_settled());
    }

    #[test]
    fn test_persist_requested_exactly_once() {
        let mut state = open_road(5);
        force_crash(&mut state);
        tick(&mut state, &TickInput::default(), DT);
        assert!(!state.run.score_persisted);

        let mut requests = 0;
        for _ in 0..500 {
            for event in tick(&mut state, &TickInput::default(), DT) {
                if let GameEvent::PersistScore { score } = event {
                    assert_eq!(score, 1);
                    requests += 1;
                }
            }
        }
        assert_eq!(requests, 1);
        assert!(state.run.score_persisted);
        assert!(state.game_over_settled());
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut state = open_road(6);
        for _ in 0..(60 * 16) {
            tick(&mut state, &TickInput::default(), DT);
            park_traffic(&mut state);
        }
        assert!(state.run.difficulty.speed_multiplier > 1.0);
        force_crash(&mut state);
        tick(&mut state, &TickInput::default(), DT);
        tick(&mut state, &TickInput::default(), DT);
        assert!(state.run.score_persisted);

        // Space is ignored while running but starts over after a crash
        let events = tick(
            &mut state,
            &TickInput {
                new_game: true,
                ..Default::default()
            },
            DT,
        );
        assert_eq!(events, vec![GameEvent::Restarted]);
        assert_eq!(state.run.score, 0);
        assert_eq!(state.run.difficulty.elapsed, 0.0);
        assert_eq!(state.run.difficulty.speed_multiplier, 1.0);
        assert!(!state.run.is_over());
        assert!(!state.run.score_persisted);
        assert_eq!(state.player.pos.x, 400.0);
        assert_eq!(state.obstacles.len(), 8);
        for o in &state.obstacles {
            assert!((600.0..1000.0).contains(&o.pos.y));
        }
    }

    #[test]
    fn test_restart_right_after_crash_still_saves() {
        let mut state = open_road(10);
        force_crash(&mut state);
        tick(&mut state, &TickInput::default(), DT);
        assert!(!state.run.score_persisted);

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        let events = tick(&mut state, &restart, DT);
        assert_eq!(
            events,
            vec![GameEvent::PersistScore { score: 1 }, GameEvent::Restarted]
        );
        assert!(!state.run.score_persisted);

        // Restarting a run that is still going saves nothing
        let events = tick(&mut state, &restart, DT);
        assert_eq!(events, vec![GameEvent::Restarted]);
    }

    #[test]
    fn test_new_game_ignored_while_running() {
        let mut state = open_road(7);
        tick(&mut state, &TickInput::default(), DT);
        let events = tick(
            &mut state,
            &TickInput {
                new_game: true,
                ..Default::default()
            },
            DT,
        );
        assert!(events.is_empty());
        assert_eq!(state.run.score, 2);
    }

    #[test]
    fn test_pause_freezes_run() {
        let mut state = open_road(8);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, DT);
        assert_eq!(state.run.phase, GamePhase::Paused);
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), DT);
        }
        assert_eq!(state.run.score, 0);
        assert_eq!(state.run.difficulty.elapsed, 0.0);

        tick(&mut state, &pause, DT);
        assert_eq!(state.run.phase, GamePhase::Running);
        assert_eq!(state.run.score, 1);
    }

    #[test]
    fn test_speed_up_event() {
        let mut state = open_road(9);
        let events = tick(&mut state, &TickInput::default(), 15.0);
        let speed_ups: Vec<f32> = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::SpeedUp { multiplier } => Some(*multiplier),
                _ => None,
            })
            .collect();
        assert_eq!(speed_ups.len(), 1);
        assert!((speed_ups[0] - 1.05).abs() < 1e-6);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(SimConfig::default(), 99999).unwrap();
        let mut state2 = GameState::new(SimConfig::default(), 99999).unwrap();
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };

        for _ in 0..600 {
            tick(&mut state1, &input, DT);
            tick(&mut state2, &input, DT);
        }

        assert_eq!(state1.run, state2.run);
        assert_eq!(state1.player.pos, state2.player.pos);
        for (a, b) in state1.obstacles.iter().zip(&state2.obstacles) {
            assert_eq!(a.pos, b.pos);
            assert_eq!(a.base_speed, b.base_speed);
        }
    }
}
