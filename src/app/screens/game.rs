//! Game screen implementation
//!
//! Shows the current problem, the score and the progress through the
//! session, takes the numeric answer and presents the result and
//! end-of-game dialogs.

use crate::drill::{DrillSettings, Session};
use crate::models::{Feedback, Summary};
use crate::util::{centered_column, centered_rect};
use crate::Result;
use crossterm::event::{KeyCode, KeyEvent};
use rand::Rng;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap},
};

/// Element of the game screen that receives key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Numeric answer input
    Answer,
    /// Submit button
    Submit,
    /// Skip button
    Skip,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Self::Answer => Self::Submit,
            Self::Submit => Self::Skip,
            Self::Skip => Self::Answer,
        }
    }

    fn previous(self) -> Self {
        match self {
            Self::Answer => Self::Skip,
            Self::Submit => Self::Answer,
            Self::Skip => Self::Submit,
        }
    }
}

/// Choices offered once the session is finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndGameAction {
    Restart,
    Exit,
}

impl EndGameAction {
    /// Get all available actions
    pub fn all() -> Vec<Self> {
        vec![Self::Restart, Self::Exit]
    }

    /// Get display text for the action
    pub fn display_text(&self) -> &'static str {
        match self {
            Self::Restart => "Restart",
            Self::Exit => "Exit",
        }
    }
}

/// Modal dialog shown above the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    /// Per-question feedback with a single Continue button
    Result(Feedback),
    /// Session summary with Restart and Exit
    EndGame {
        summary: Summary,
        selected: EndGameAction,
    },
}

/// What the game screen asks the application to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Session exited from the summary dialog
    Exit(DrillSettings),
    /// User navigated back before the session ended
    Back,
}

/// Game screen component owning one drill session
#[derive(Debug)]
pub struct GameScreen<R> {
    session: Session<R>,
    focus: Focus,
    dialog: Option<Dialog>,
    pending_summary: Option<Summary>,
}

impl<R: Rng> GameScreen<R> {
    /// Create a game screen for `settings`, drawing questions from `rng`
    pub fn new(settings: DrillSettings, rng: R) -> Self {
        Self {
            session: Session::new(settings, rng),
            focus: Focus::Answer,
            dialog: None,
            pending_summary: None,
        }
    }

    pub fn session(&self) -> &Session<R> {
        &self.session
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    /// Handle key events for the game screen
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<GameEvent>> {
        match self.dialog.take() {
            Some(Dialog::Result(feedback)) => {
                self.handle_result_dialog(key, feedback);
                Ok(None)
            }
            Some(Dialog::EndGame { summary, selected }) => {
                self.handle_end_game_dialog(key, summary, selected)
            }
            None => self.handle_game_keys(key),
        }
    }

    fn handle_result_dialog(&mut self, key: KeyEvent, feedback: Feedback) {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Esc => {
                // The summary waits until the last feedback is acknowledged
                self.dialog = self.pending_summary.take().map(|summary| Dialog::EndGame {
                    summary,
                    selected: EndGameAction::Restart,
                });
            }
            _ => self.dialog = Some(Dialog::Result(feedback)),
        }
    }

    fn handle_end_game_dialog(
        &mut self,
        key: KeyEvent,
        summary: Summary,
        selected: EndGameAction,
    ) -> Result<Option<GameEvent>> {
        let action = match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(selected),
            KeyCode::Char('r') | KeyCode::Char('R') => Some(EndGameAction::Restart),
            KeyCode::Char('e') | KeyCode::Char('E') | KeyCode::Esc => Some(EndGameAction::Exit),
            _ => None,
        };

        match action {
            Some(EndGameAction::Restart) => {
                self.session.restart()?;
                self.focus = Focus::Answer;
                Ok(None)
            }
            Some(EndGameAction::Exit) => Ok(Some(GameEvent::Exit(self.session.exit()?))),
            None => {
                let selected = match key.code {
                    KeyCode::Left
                    | KeyCode::Right
                    | KeyCode::Char('h')
                    | KeyCode::Char('l')
                    | KeyCode::Tab
                    | KeyCode::BackTab => toggle(selected),
                    _ => selected,
                };
                self.dialog = Some(Dialog::EndGame { summary, selected });
                Ok(None)
            }
        }
    }

    fn handle_game_keys(&mut self, key: KeyEvent) -> Result<Option<GameEvent>> {
        if let KeyCode::Char(c) = key.code {
            if let Some(digit) = c.to_digit(10) {
                self.focus = Focus::Answer;
                self.session.enter_digit(digit);
                return Ok(None);
            }
        }

        match (self.focus, key.code) {
            (_, KeyCode::Tab) => self.focus = self.focus.next(),
            (_, KeyCode::BackTab) => self.focus = self.focus.previous(),
            (Focus::Answer, KeyCode::Backspace) => self.session.erase_digit(),
            // "Done": dismiss the numeric input
            (Focus::Answer, KeyCode::Esc) => self.focus = Focus::Submit,
            (Focus::Answer, KeyCode::Enter) | (Focus::Submit, KeyCode::Enter | KeyCode::Char(' ')) => {
                self.submit()?
            }
            (Focus::Skip, KeyCode::Enter | KeyCode::Char(' ')) => self.skip()?,
            (Focus::Submit | Focus::Skip, KeyCode::Left | KeyCode::Up) => {
                self.focus = self.focus.previous()
            }
            (Focus::Submit | Focus::Skip, KeyCode::Right | KeyCode::Down) => {
                self.focus = self.focus.next()
            }
            (Focus::Submit | Focus::Skip, KeyCode::Esc | KeyCode::Backspace) => {
                return Ok(Some(GameEvent::Back))
            }
            _ => {}
        }
        Ok(None)
    }

    fn submit(&mut self) -> Result<()> {
        let outcome = self.session.submit()?;
        self.dialog = Some(Dialog::Result(outcome.feedback));
        self.pending_summary = outcome.summary;
        Ok(())
    }

    fn skip(&mut self) -> Result<()> {
        if let Some(summary) = self.session.skip()? {
            self.dialog = Some(Dialog::EndGame {
                summary,
                selected: EndGameAction::Restart,
            });
        }
        self.focus = Focus::Answer;
        Ok(())
    }

    /// Render the game screen
    pub fn render(&mut self, f: &mut Frame) {
        let size = f.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(5),    // Problem card
                Constraint::Length(3), // Score
                Constraint::Length(3), // Progress
                Constraint::Length(3), // Answer and Submit
                Constraint::Length(3), // Skip
                Constraint::Length(3), // Help text
            ])
            .split(size);

        self.render_title(f, chunks[0]);
        self.render_problem(f, chunks[1]);
        self.render_score(f, chunks[2]);
        self.render_progress(f, chunks[3]);
        self.render_answer_row(f, chunks[4]);
        self.render_skip(f, chunks[5]);
        self.render_help(f, chunks[6]);

        match &self.dialog {
            Some(Dialog::Result(feedback)) => render_result_dialog(f, size, feedback),
            Some(Dialog::EndGame { summary, selected }) => {
                render_end_game_dialog(f, size, summary, *selected)
            }
            None => {}
        }
    }

    fn render_title(&self, f: &mut Frame, area: Rect) {
        let title = Paragraph::new(format!(
            "{} Times Table",
            self.session.settings().multiplier()
        ))
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
        f.render_widget(title, area);
    }

    fn render_problem(&self, f: &mut Frame, area: Rect) {
        let card = centered_column(24, area);
        let padding = card.height.saturating_sub(3) / 2;
        let mut text: Vec<Line> = (0..padding).map(|_| Line::from("")).collect();
        text.push(Line::from(Span::styled(
            format!(
                "{} x {} = ?",
                self.session.settings().multiplier(),
                self.session.multiplicand()
            ),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )));

        let problem = Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        );
        f.render_widget(problem, card);
    }

    fn render_score(&self, f: &mut Frame, area: Rect) {
        let score = Paragraph::new(format!("Score: {}", self.session.score()))
            .style(
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center);
        f.render_widget(score, area);
    }

    fn render_progress(&self, f: &mut Frame, area: Rect) {
        let difficulty = self.session.settings().difficulty();
        let asked = self.session.questions_asked();
        let ratio = f64::from(asked) / f64::from(difficulty);
        let label = if self.session.is_finished() {
            format!("Finished {} of {}", asked, difficulty)
        } else {
            format!("Question {} of {}", self.session.question_number(), difficulty)
        };

        let gauge = Gauge::default()
            .block(
                Block::default()
                    .title("Progress")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .gauge_style(Style::default().fg(Color::Green))
            .ratio(ratio.clamp(0.0, 1.0))
            .label(label);
        f.render_widget(gauge, area);
    }

    fn render_answer_row(&self, f: &mut Frame, area: Rect) {
        let row = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(14)])
            .split(centered_column(50, area));

        let focused = self.focus == Focus::Answer && self.dialog.is_none();
        let (text, style) = match self.session.answer() {
            Some(value) => (value.to_string(), Style::default().fg(Color::White)),
            None => ("Answer".to_string(), Style::default().fg(Color::DarkGray)),
        };
        let cursor = if focused { "_" } else { "" };
        let input = Paragraph::new(Line::from(vec![
            Span::styled(text, style),
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focus_border(focused)),
        );
        f.render_widget(input, row[0]);

        f.render_widget(button("Submit", self.focus == Focus::Submit), row[1]);
    }

    fn render_skip(&self, f: &mut Frame, area: Rect) {
        f.render_widget(
            button("Skip", self.focus == Focus::Skip),
            centered_column(14, area),
        );
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let key = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let help_text = vec![Line::from(vec![
            Span::styled("0-9", key),
            Span::raw(" Answer  "),
            Span::styled("Enter", key),
            Span::raw(" Submit  "),
            Span::styled("Tab", key),
            Span::raw(" Focus  "),
            Span::styled("Esc", key),
            Span::raw(" Done/Back  "),
            Span::styled("Q", key),
            Span::raw(" Quit"),
        ])];

        let help = Paragraph::new(help_text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );
        f.render_widget(help, area);
    }
}

fn toggle(action: EndGameAction) -> EndGameAction {
    let actions = EndGameAction::all();
    let current_index = actions.iter().position(|a| *a == action).unwrap_or(0);
    actions[(current_index + 1) % actions.len()]
}

fn focus_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::White)
    }
}

fn button(label: &str, selected: bool) -> Paragraph<'_> {
    let style = if selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    Paragraph::new(label)
        .style(style)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focus_border(selected)),
        )
}

fn render_result_dialog(f: &mut Frame, area: Rect, feedback: &Feedback) {
    let color = if feedback.correct {
        Color::Green
    } else {
        Color::Red
    };
    let popup = centered_rect(50, 9, area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .margin(1)
        .split(popup);

    f.render_widget(Clear, popup);
    f.render_widget(
        Block::default()
            .title(feedback.title.as_str())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color).add_modifier(Modifier::BOLD)),
        popup,
    );
    f.render_widget(
        Paragraph::new(feedback.message.as_str())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        chunks[0],
    );
    f.render_widget(button("Continue", true), centered_column(14, chunks[1]));
}

fn render_end_game_dialog(f: &mut Frame, area: Rect, summary: &Summary, selected: EndGameAction) {
    let popup = centered_rect(60, 12, area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(3)])
        .margin(1)
        .split(popup);

    f.render_widget(Clear, popup);
    f.render_widget(
        Block::default()
            .title(summary.title.as_str())
            .borders(Borders::ALL)
            .border_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        popup,
    );

    let lines: Vec<Line> = summary.message.lines().map(Line::from).collect();
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        chunks[0],
    );

    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(centered_column(30, chunks[1]));
    for (action, area) in EndGameAction::all().into_iter().zip(buttons.iter()) {
        f.render_widget(button(action.display_text(), action == selected), *area);
    }
}
