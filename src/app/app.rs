//! Main application controller
//!
//! Routes key presses to the active screen, moves between setup and game,
//! and drives the render loop on a `Tui`.

use crate::{
    app::{
        screens::{GameEvent, GameScreen, SetupEvent, SetupScreen},
        state::{AppState, NavigationAction, StateManager},
        tui::Tui,
    },
    config::Preferences,
    drill::DrillSettings,
    Result, XDrillsError,
};
use crossterm::event::KeyEvent;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use ratatui::Frame;
use tracing::{debug, info};

/// TUI application controller
pub struct App {
    /// Application state manager
    state_manager: StateManager,
    /// Screen components
    setup_screen: SetupScreen,
    game_screen: Option<GameScreen<SmallRng>>,
    /// Seeds one generator per game
    rng: SmallRng,
}

impl App {
    /// Create a new application instance. A `seed` makes every game's
    /// questions reproducible.
    pub fn new(prefs: &Preferences, seed: Option<u64>) -> Result<Self> {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Ok(Self {
            state_manager: StateManager::new(),
            setup_screen: SetupScreen::new(prefs.default_settings()?),
            game_screen: None,
            rng,
        })
    }

    pub fn state(&self) -> &AppState {
        self.state_manager.current_state()
    }

    pub fn should_quit(&self) -> bool {
        self.state_manager.should_quit()
    }

    pub fn game_screen(&self) -> Option<&GameScreen<SmallRng>> {
        self.game_screen.as_ref()
    }

    pub fn setup_screen(&self) -> &SetupScreen {
        &self.setup_screen
    }

    /// Run the main application loop until the user quits
    pub fn run(&mut self, tui: &mut Tui) -> Result<()> {
        while !self.should_quit() {
            tui.draw(|f| self.render(f))
                .map_err(|e| XDrillsError::TuiError(format!("draw failed: {}", e)))?;
            if let Some(key) = tui.handle_events()? {
                self.handle_key(key)?;
            }
        }
        info!("application quit");
        Ok(())
    }

    /// Draw the current screen
    pub fn render(&mut self, f: &mut Frame) {
        match (self.state_manager.current_state(), self.game_screen.as_mut()) {
            (AppState::Game, Some(game)) => game.render(f),
            _ => self.setup_screen.render(f),
        }
    }

    /// Handle one key press
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        let nav_action = StateManager::key_to_navigation(key);

        // Global key handling
        if nav_action == NavigationAction::Quit {
            self.state_manager.quit();
            return Ok(());
        }

        // Screen-specific key handling
        match self.state_manager.current_state().clone() {
            AppState::Setup => self.handle_setup_screen_events(nav_action),
            AppState::Game => self.handle_game_screen_events(key),
        }
    }

    fn handle_setup_screen_events(&mut self, action: NavigationAction) -> Result<()> {
        match self.setup_screen.handle_navigation(action)? {
            Some(SetupEvent::Start(settings)) => self.start_game(settings),
            Some(SetupEvent::Back) => self.state_manager.handle_navigation(NavigationAction::Back),
            None => {}
        }
        Ok(())
    }

    fn handle_game_screen_events(&mut self, key: KeyEvent) -> Result<()> {
        let event = match self.game_screen.as_mut() {
            Some(game) => game.handle_key_event(key)?,
            None => Some(GameEvent::Back),
        };

        match event {
            Some(GameEvent::Exit(settings)) => {
                debug!(multiplier = settings.multiplier(), "returned to setup");
                self.leave_game();
            }
            Some(GameEvent::Back) => {
                debug!("left game before the end");
                self.leave_game();
            }
            None => {}
        }
        Ok(())
    }

    fn start_game(&mut self, settings: DrillSettings) {
        let rng = SmallRng::seed_from_u64(self.rng.gen());
        self.game_screen = Some(GameScreen::new(settings, rng));
        self.state_manager.transition_to(AppState::Game);
    }

    fn leave_game(&mut self) {
        self.game_screen = None;
        self.state_manager.handle_navigation(NavigationAction::Back);
    }
}
