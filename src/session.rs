//! A race session: one logged-in player's runs
//!
//! Wraps the pure simulation with the things it must not know about: key
//! events, the record store and the player's identity. Restarts keep the same
//! session; leaving to the menu ends it.

use crate::config::SimConfig;
use crate::error::ConfigError;
use crate::persistence::{AccountId, RecordStore};
use crate::platform::Key;
use crate::sim::{GameEvent, GameState, TickInput, tick};

/// What the session asks of the application after a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    None,
    ExitToMenu,
}

/// Summary handed back when a session ends
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub player_name: String,
    pub runs: u32,
    pub best_score: u64,
}

pub struct Session {
    account: AccountId,
    player_name: String,
    state: GameState,
    /// One-shot commands collected since the last frame
    pending: TickInput,
    autopilot: bool,
    runs: u32,
    best_score: u64,
}

impl Session {
    /// Enter hook: start the first run for a logged-in player
    pub fn enter(
        config: &SimConfig,
        account: AccountId,
        player_name: impl Into<String>,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        let player_name = player_name.into();
        let state = GameState::new(config.clone(), seed)?;
        log::info!("Race started for {player_name:?} (seed {seed})");
        Ok(Self {
            account,
            player_name,
            state,
            pending: TickInput::default(),
            autopilot: false,
            runs: 1,
            best_score: 0,
        })
    }

    /// Exit hook: leave the race and report how it went. A run that ended
    /// without reaching its save frame is saved here.
    pub fn exit(mut self, store: &mut dyn RecordStore) -> SessionSummary {
        if let Some(score) = self.state.run.take_unsaved_score() {
            self.persist(score, store);
        }
        let best_score = self.best_score.max(self.state.run.score);
        log::info!(
            "Race ended for {:?}: {} runs, best {}",
            self.player_name,
            self.runs,
            best_score
        );
        SessionSummary {
            player_name: self.player_name,
            runs: self.runs,
            best_score,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn account(&self) -> AccountId {
        self.account
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    pub fn set_autopilot(&mut self, on: bool) {
        self.autopilot = on;
    }

    /// Edge-triggered key handling. Steering keys only flip held flags;
    /// everything else is queued for the next frame.
    pub fn handle_key(&mut self, key: Key, pressed: bool) -> SessionCommand {
        match (key, pressed) {
            (Key::Left, _) => self.state.held.left = pressed,
            (Key::Right, _) => self.state.held.right = pressed,
            (Key::Restart, true) => self.pending.restart = true,
            (Key::Space, true) => self.pending.new_game = true,
            (Key::Pause, true) => self.pending.pause = !self.pending.pause,
            (Key::Autopilot, true) => self.autopilot = !self.autopilot,
            (Key::Escape, true) => return SessionCommand::ExitToMenu,
            _ => {}
        }
        SessionCommand::None
    }

    /// Run one frame and carry out whatever the simulation asked for
    pub fn update(&mut self, dt: f32, store: &mut dyn RecordStore) {
        let mut input = std::mem::take(&mut self.pending);
        input.autopilot = self.autopilot;

        let finished_score = self.state.run.score;
        for event in tick(&mut self.state, &input, dt) {
            match event {
                GameEvent::Restarted => {
                    self.best_score = self.best_score.max(finished_score);
                    self.runs += 1;
                }
                GameEvent::PersistScore { score } => self.persist(score, store),
                GameEvent::Crashed { .. } | GameEvent::SpeedUp { .. } => {}
            }
        }
    }

    fn persist(&mut self, score: u64, store: &mut dyn RecordStore) {
        let saved = match store.save_record(self.account, score) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Could not save score {score}: {e}");
                false
            }
        };
        // After a same-frame restart the result belongs to a run no longer on screen
        if self.state.run.is_over() {
            self.state.run.record_save_result(saved);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::highscores::LeaderboardEntry;
    use crate::persistence::MemoryStore;
    use crate::sim::{GamePhase, SaveStatus};
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    /// Store whose saves always fail
    #[derive(Default)]
    struct BrokenStore {
        attempts: u32,
    }

    impl RecordStore for BrokenStore {
        fn register_or_login(
            &mut self,
            _name: &str,
            _password: &str,
        ) -> Result<Option<AccountId>, StoreError> {
            Ok(Some(AccountId(1)))
        }

        fn save_record(&mut self, _account: AccountId, _score: u64) -> Result<(), StoreError> {
            self.attempts += 1;
            Err(StoreError::Io(std::io::Error::other("disk full")))
        }

        fn top_players(&self, _limit: usize) -> Result<Vec<LeaderboardEntry>, StoreError> {
            Ok(Vec::new())
        }
    }

    fn session() -> Session {
        let mut session = Session::enter(&SimConfig::default(), AccountId(1), "ann", 11).unwrap();
        for o in session.state.obstacles.iter_mut() {
            o.pos.y = 100_000.0;
        }
        session
    }

    fn crash(session: &mut Session) {
        session.state.obstacles[0].pos = session.state.player.pos + Vec2::new(0.0, 10.0);
    }

    #[test]
    fn test_held_flags_follow_edges() {
        let mut s = session();
        let mut store = MemoryStore::new();
        s.handle_key(Key::Right, true);
        s.update(DT, &mut store);
        s.update(DT, &mut store);
        assert_eq!(s.state().player.pos.x, 410.0);
        s.handle_key(Key::Right, false);
        s.update(DT, &mut store);
        assert_eq!(s.state().player.pos.x, 410.0);
    }

    #[test]
    fn test_score_saved_once() {
        let mut s = session();
        let mut store = MemoryStore::new();
        for _ in 0..10 {
            s.update(DT, &mut store);
        }
        crash(&mut s);
        for _ in 0..200 {
            s.update(DT, &mut store);
        }
        assert_eq!(s.state().run.phase, GamePhase::GameOver);
        assert_eq!(s.state().run.save_status, SaveStatus::Saved);
        assert_eq!(store.book().records.len(), 1);
        assert_eq!(store.book().records[0].score, 11);
    }

    #[test]
    fn test_failed_save_not_retried() {
        let mut s = session();
        let mut store = BrokenStore::default();
        crash(&mut s);
        for _ in 0..200 {
            s.update(DT, &mut store);
        }
        assert_eq!(store.attempts, 1);
        assert!(s.state().run.score_persisted);
        assert_eq!(s.state().run.save_status, SaveStatus::Failed);
    }

    #[test]
    fn test_space_restarts_after_crash() {
        let mut s = session();
        let mut store = MemoryStore::new();
        crash(&mut s);
        s.update(DT, &mut store);
        s.update(DT, &mut store);
        assert_eq!(s.handle_key(Key::Space, true), SessionCommand::None);
        s.update(DT, &mut store);
        assert!(!s.state().run.is_over());
        assert_eq!(s.state().run.score, 0);

        let summary = s.exit(&mut store);
        assert_eq!(summary.runs, 2);
        assert_eq!(summary.best_score, 1);
        assert_eq!(summary.player_name, "ann");
    }

    #[test]
    fn test_restart_before_save_frame_keeps_score() {
        let mut s = session();
        let mut store = MemoryStore::new();
        crash(&mut s);
        s.update(DT, &mut store);
        assert!(s.state().run.is_over());

        s.handle_key(Key::Restart, true);
        s.update(DT, &mut store);
        assert!(!s.state().run.is_over());
        assert_eq!(s.state().run.save_status, SaveStatus::Pending);
        assert_eq!(store.book().records.len(), 1);
        assert_eq!(store.book().records[0].score, 1);
    }

    #[test]
    fn test_escape_before_save_frame_keeps_score() {
        let mut s = session();
        let mut store = MemoryStore::new();
        crash(&mut s);
        s.update(DT, &mut store);

        assert_eq!(s.handle_key(Key::Escape, true), SessionCommand::ExitToMenu);
        let summary = s.exit(&mut store);
        assert_eq!(summary.best_score, 1);
        assert_eq!(store.book().records.len(), 1);
    }

    #[test]
    fn test_exit_after_save_does_not_save_again() {
        let mut s = session();
        let mut store = MemoryStore::new();
        crash(&mut s);
        s.update(DT, &mut store);
        s.update(DT, &mut store);
        s.exit(&mut store);
        assert_eq!(store.book().records.len(), 1);
    }

    #[test]
    fn test_escape_exits() {
        let mut s = session();
        assert_eq!(s.handle_key(Key::Escape, true), SessionCommand::ExitToMenu);
        assert_eq!(s.handle_key(Key::Escape, false), SessionCommand::None);
    }

    #[test]
    fn test_autopilot_toggle() {
        let mut s = session();
        assert!(!s.autopilot());
        s.handle_key(Key::Autopilot, true);
        assert!(s.autopilot());
        s.handle_key(Key::Autopilot, false);
        assert!(s.autopilot());
    }
}
