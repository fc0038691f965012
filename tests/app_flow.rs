//! Integration tests driving the application controller with key presses

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, Terminal};
use xdrills::app::screens::Dialog;
use xdrills::app::{App, AppState};
use xdrills::config::Preferences;

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
        .expect("key handled");
}

fn start_game(app: &mut App) {
    press(app, KeyCode::Down);
    press(app, KeyCode::Down);
    press(app, KeyCode::Enter);
}

fn answer_current(app: &mut App, correct: bool) {
    let session = app.game_screen().expect("game running").session();
    let answer = if correct {
        session.expected()
    } else {
        session.expected() + 1
    };
    for c in answer.to_string().chars() {
        press(app, KeyCode::Char(c));
    }
    press(app, KeyCode::Enter);
}

#[test]
fn test_setup_to_game() {
    let prefs = Preferences {
        default_multiplier: 6,
        default_difficulty: 10,
        ..Preferences::default()
    };
    let mut app = App::new(&prefs, Some(11)).unwrap();
    assert_eq!(*app.state(), AppState::Setup);
    assert_eq!(app.setup_screen().multiplier(), 6);

    start_game(&mut app);
    assert_eq!(*app.state(), AppState::Game);
    let session = app.game_screen().unwrap().session();
    assert_eq!(session.settings().multiplier(), 6);
    assert_eq!(session.settings().difficulty(), 10);
    assert_eq!(session.questions_asked(), 0);
}

#[test]
fn test_full_session_then_exit() {
    let mut app = App::new(&Preferences::default(), Some(5)).unwrap();
    start_game(&mut app);

    for round in 0..5 {
        answer_current(&mut app, round % 2 == 0);
        // Continue
        press(&mut app, KeyCode::Enter);
    }

    let game = app.game_screen().unwrap();
    assert!(game.session().is_finished());
    match game.dialog() {
        Some(Dialog::EndGame { summary, .. }) => {
            assert_eq!(summary.score, 3);
            assert!(summary.message.contains("3 answers were correct."));
        }
        other => panic!("expected end game dialog, got {:?}", other),
    }

    press(&mut app, KeyCode::Char('e'));
    assert_eq!(*app.state(), AppState::Setup);
    assert!(app.game_screen().is_none());
    assert!(!app.should_quit());
}

#[test]
fn test_restart_keeps_settings() {
    let mut app = App::new(&Preferences::default(), Some(9)).unwrap();
    start_game(&mut app);
    for _ in 0..5 {
        answer_current(&mut app, true);
        press(&mut app, KeyCode::Enter);
    }
    press(&mut app, KeyCode::Char('r'));

    assert_eq!(*app.state(), AppState::Game);
    let session = app.game_screen().unwrap().session();
    assert!(!session.is_finished());
    assert_eq!(session.score(), 0);
    assert_eq!(session.questions_asked(), 0);
    assert_eq!(session.settings().difficulty(), 5);
}

#[test]
fn test_setup_keys_pick_table_and_length() {
    let mut app = App::new(&Preferences::default(), Some(3)).unwrap();
    press(&mut app, KeyCode::Right);
    press(&mut app, KeyCode::Char('l'));
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Right);
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Char(' '));

    assert_eq!(*app.state(), AppState::Game);
    let settings = *app.game_screen().unwrap().session().settings();
    assert_eq!(settings.multiplier(), 4);
    assert_eq!(settings.difficulty(), 10);
}

#[test]
fn test_escape_on_setup_quits() {
    let mut app = App::new(&Preferences::default(), Some(3)).unwrap();
    press(&mut app, KeyCode::Esc);
    assert!(app.should_quit());
}

#[test]
fn test_back_and_quit() {
    let mut app = App::new(&Preferences::default(), Some(1)).unwrap();
    start_game(&mut app);

    // Done, then back to setup
    press(&mut app, KeyCode::Esc);
    press(&mut app, KeyCode::Esc);
    assert_eq!(*app.state(), AppState::Setup);

    press(&mut app, KeyCode::Char('q'));
    assert!(app.should_quit());
}

#[test]
fn test_render_both_screens() {
    let mut app = App::new(&Preferences::default(), Some(2)).unwrap();
    let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();

    terminal.draw(|f| app.render(f)).unwrap();
    let text: String = terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect();
    assert!(text.contains("Game On"));

    start_game(&mut app);
    terminal.draw(|f| app.render(f)).unwrap();
    let text: String = terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect();
    assert!(text.contains("2 Times Table"));
    assert!(text.contains("Score: 0"));
}
