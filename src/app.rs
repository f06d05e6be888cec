//! Application state machine
//!
//! Alternates between the login menu and a race session. The record store is
//! owned here and lent to the session each frame.

use glam::Vec2;

use crate::config::SimConfig;
use crate::consts::LEADERBOARD_SIZE;
use crate::error::ConfigError;
use crate::highscores::Leaderboard;
use crate::persistence::RecordStore;
use crate::platform::Key;
use crate::renderer::{DrawCommand, menu_scene, race_scene};
use crate::session::{Session, SessionCommand};
use crate::ui::{LoginForm, LoginRequest};

/// Which screen is active
pub enum Screen {
    Menu(LoginForm),
    Race(Session),
}

pub struct App {
    config: SimConfig,
    store: Box<dyn RecordStore>,
    screen: Screen,
    leaderboard: Leaderboard,
    /// Seed for the next race; bumped per session so replays differ
    next_seed: u64,
    quit: bool,
}

impl App {
    pub fn new(
        config: SimConfig,
        store: Box<dyn RecordStore>,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut app = Self {
            config,
            store,
            screen: Screen::Menu(LoginForm::new()),
            leaderboard: Leaderboard::default(),
            next_seed: seed,
            quit: false,
        };
        app.refresh_leaderboard();
        Ok(app)
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// The running session, if a race is on
    pub fn session_mut(&mut self) -> Option<&mut Session> {
        match &mut self.screen {
            Screen::Race(session) => Some(session),
            Screen::Menu(_) => None,
        }
    }

    fn refresh_leaderboard(&mut self) {
        match self.store.top_players(LEADERBOARD_SIZE) {
            Ok(entries) => self.leaderboard = Leaderboard { entries },
            Err(e) => {
                log::warn!("Could not load leaderboard: {e}");
                self.leaderboard = Leaderboard::default();
            }
        }
    }

    /// Key press or release
    pub fn key(&mut self, key: Key, pressed: bool) {
        match &mut self.screen {
            Screen::Menu(form) => {
                if !pressed {
                    return;
                }
                if key == Key::Escape {
                    log::info!("Quit requested from menu");
                    self.quit = true;
                    return;
                }
                if let Some(request) = form.on_key(key) {
                    self.login(request);
                }
            }
            Screen::Race(session) => {
                if session.handle_key(key, pressed) == SessionCommand::ExitToMenu {
                    self.exit_race();
                }
            }
        }
    }

    /// Typed character; only the menu takes text
    pub fn text(&mut self, ch: char) {
        if let Screen::Menu(form) = &mut self.screen {
            form.on_text(ch);
        }
    }

    fn login(&mut self, request: LoginRequest) {
        let outcome = self
            .store
            .register_or_login(&request.name, &request.password);
        let account = match outcome {
            Ok(Some(account)) => account,
            Ok(None) => {
                log::info!("Login refused for {:?}", request.name);
                self.reject("Wrong password!");
                return;
            }
            Err(e) => {
                log::warn!("Record store unavailable during login: {e}");
                self.reject("Records unavailable!");
                return;
            }
        };

        let seed = self.next_seed;
        self.next_seed = self.next_seed.wrapping_add(1);
        match Session::enter(&self.config, account, request.name, seed) {
            Ok(session) => self.screen = Screen::Race(session),
            Err(e) => {
                log::error!("Could not start race: {e}");
                self.reject("Could not start race!");
            }
        }
    }

    fn reject(&mut self, message: &str) {
        if let Screen::Menu(form) = &mut self.screen {
            form.reject(message);
        }
    }

    fn exit_race(&mut self) {
        let previous = std::mem::replace(&mut self.screen, Screen::Menu(LoginForm::new()));
        if let Screen::Race(session) = previous {
            let summary = session.exit(self.store.as_mut());
            log::debug!("Session summary: {summary:?}");
        }
        self.refresh_leaderboard();
    }

    /// Advance the active screen by one frame
    pub fn update(&mut self, dt: f32) {
        match &mut self.screen {
            Screen::Menu(form) => form.update(dt),
            Screen::Race(session) => session.update(dt, self.store.as_mut()),
        }
    }

    /// Draw list for the active screen
    pub fn frame(&self) -> Vec<DrawCommand> {
        match &self.screen {
            Screen::Menu(form) => menu_scene(
                form,
                &self.leaderboard,
                Vec2::new(self.config.screen_width, self.config.screen_height),
            ),
            Screen::Race(session) => {
                race_scene(session.state(), session.player_name(), session.autopilot())
            }
        }
    }
}
