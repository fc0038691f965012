//! Application state management
//!
//! Handles screen transitions, navigation logic, and keyboard event processing
//! for the TUI application.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Application screens/states
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AppState {
    /// Table and question count selection
    #[default]
    Setup,
    /// A drill session in progress or finished
    Game,
}

/// Navigation actions that can be triggered by keyboard input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationAction {
    /// Move selection up (arrow up, k)
    Up,
    /// Move selection down (arrow down, j)
    Down,
    /// Move selection left (arrow left, h)
    Left,
    /// Move selection right (arrow right, l)
    Right,
    /// Confirm selection (Enter, Space)
    Select,
    /// Go back/cancel (Esc, Backspace)
    Back,
    /// Next item (Tab)
    Next,
    /// Previous item (Shift+Tab)
    Previous,
    /// Quit application (q, Q, Ctrl+C)
    Quit,
    /// No action
    None,
}

/// Application state manager
#[derive(Debug)]
pub struct StateManager {
    current_state: AppState,
    previous_state: Option<AppState>,
    should_quit: bool,
}

impl StateManager {
    /// Create a new state manager starting at the setup screen
    pub fn new() -> Self {
        Self {
            current_state: AppState::Setup,
            previous_state: None,
            should_quit: false,
        }
    }

    /// Get the current application state
    pub fn current_state(&self) -> &AppState {
        &self.current_state
    }

    /// Check if the application should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Set the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Transition to a new state
    pub fn transition_to(&mut self, new_state: AppState) {
        if new_state != self.current_state {
            self.previous_state = Some(self.current_state.clone());
            self.current_state = new_state;
        }
    }

    /// Go back to the previous state if available, otherwise go to Setup
    pub fn go_back(&mut self) {
        self.current_state = self.previous_state.take().unwrap_or_default();
    }

    /// Handle the navigation actions that are not screen specific
    pub fn handle_navigation(&mut self, action: NavigationAction) {
        match action {
            NavigationAction::Quit => self.should_quit = true,
            NavigationAction::Back => match self.current_state {
                AppState::Setup => self.should_quit = true,
                AppState::Game => self.go_back(),
            },
            // Everything else belongs to the individual screens
            _ => {}
        }
    }

    /// Convert keyboard event to navigation action
    pub fn key_to_navigation(key: KeyEvent) -> NavigationAction {
        match key.code {
            // Quit keys
            KeyCode::Char('q') | KeyCode::Char('Q') => NavigationAction::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                NavigationAction::Quit
            }

            // Navigation keys
            KeyCode::Up | KeyCode::Char('k') => NavigationAction::Up,
            KeyCode::Down | KeyCode::Char('j') => NavigationAction::Down,
            KeyCode::Left | KeyCode::Char('h') => NavigationAction::Left,
            KeyCode::Right | KeyCode::Char('l') => NavigationAction::Right,

            // Selection and confirmation
            KeyCode::Enter | KeyCode::Char(' ') => NavigationAction::Select,

            // Back/cancel
            KeyCode::Esc | KeyCode::Backspace => NavigationAction::Back,

            // Tab navigation
            KeyCode::Tab => NavigationAction::Next,
            KeyCode::BackTab => NavigationAction::Previous,

            _ => NavigationAction::None,
        }
    }
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_manager_creation() {
        let state_manager = StateManager::new();
        assert_eq!(*state_manager.current_state(), AppState::Setup);
        assert!(!state_manager.should_quit());
    }

    #[test]
    fn test_state_transitions() {
        let mut state_manager = StateManager::new();

        state_manager.transition_to(AppState::Game);
        assert_eq!(*state_manager.current_state(), AppState::Game);

        // Same state is a no-op and keeps Setup as the way back
        state_manager.transition_to(AppState::Game);
        state_manager.go_back();
        assert_eq!(*state_manager.current_state(), AppState::Setup);
    }

    #[test]
    fn test_go_back() {
        let mut state_manager = StateManager::new();

        state_manager.transition_to(AppState::Game);
        state_manager.go_back();
        assert_eq!(*state_manager.current_state(), AppState::Setup);

        // Go back from Setup (should stay at Setup)
        state_manager.go_back();
        assert_eq!(*state_manager.current_state(), AppState::Setup);
    }

    #[test]
    fn test_back_navigation() {
        let mut state_manager = StateManager::new();
        state_manager.transition_to(AppState::Game);
        state_manager.handle_navigation(NavigationAction::Back);
        assert_eq!(*state_manager.current_state(), AppState::Setup);
        assert!(!state_manager.should_quit());

        // Back from Setup quits
        state_manager.handle_navigation(NavigationAction::Back);
        assert!(state_manager.should_quit());
    }

    #[test]
    fn test_quit_handling() {
        let mut state_manager = StateManager::new();
        state_manager.handle_navigation(NavigationAction::Quit);
        assert!(state_manager.should_quit());
    }

    #[test]
    fn test_key_to_navigation() {
        assert_eq!(
            StateManager::key_to_navigation(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)),
            NavigationAction::Quit
        );
        assert_eq!(
            StateManager::key_to_navigation(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            NavigationAction::Quit
        );
        assert_eq!(
            StateManager::key_to_navigation(KeyEvent::new(KeyCode::Char('k'), KeyModifiers::NONE)),
            NavigationAction::Up
        );
        assert_eq!(
            StateManager::key_to_navigation(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE)),
            NavigationAction::Down
        );
        assert_eq!(
            StateManager::key_to_navigation(KeyEvent::new(KeyCode::Char('h'), KeyModifiers::NONE)),
            NavigationAction::Left
        );
        assert_eq!(
            StateManager::key_to_navigation(KeyEvent::new(KeyCode::Right, KeyModifiers::NONE)),
            NavigationAction::Right
        );
        assert_eq!(
            StateManager::key_to_navigation(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
            NavigationAction::Select
        );
        assert_eq!(
            StateManager::key_to_navigation(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
            NavigationAction::Back
        );
        assert_eq!(
            StateManager::key_to_navigation(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE)),
            NavigationAction::Next
        );
        assert_eq!(
            StateManager::key_to_navigation(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT)),
            NavigationAction::Previous
        );
        assert_eq!(
            StateManager::key_to_navigation(KeyEvent::new(KeyCode::Char('7'), KeyModifiers::NONE)),
            NavigationAction::None
        );
    }
}
