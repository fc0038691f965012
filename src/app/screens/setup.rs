//! Setup screen implementation
//!
//! Lets the user pick the times table and the number of questions,
//! then hands an immutable `DrillSettings` to a new game.

use crate::app::state::NavigationAction;
use crate::drill::{DrillSettings, DIFFICULTIES, MULTIPLIERS};
use crate::util::{centered_column, centered_rect};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

/// Selectable rows of the setup screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SetupField {
    Table,
    Difficulty,
    Start,
}

impl SetupField {
    fn all() -> Vec<Self> {
        vec![Self::Table, Self::Difficulty, Self::Start]
    }
}

/// What the setup screen asks the application to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupEvent {
    /// Begin a game with these settings
    Start(DrillSettings),
    /// Leave the setup screen
    Back,
}

/// Setup screen component
#[derive(Debug)]
pub struct SetupScreen {
    multiplier: u32,
    difficulty: u32,
    fields: Vec<SetupField>,
    selected_field_index: usize,
    dropdown_state: ListState,
    is_dropdown_active: bool,
}

impl SetupScreen {
    /// Create a setup screen preselecting `defaults`
    pub fn new(defaults: DrillSettings) -> Self {
        Self {
            multiplier: defaults.multiplier(),
            difficulty: defaults.difficulty(),
            fields: SetupField::all(),
            selected_field_index: 0,
            dropdown_state: ListState::default(),
            is_dropdown_active: false,
        }
    }

    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    /// Settings for the current selection
    pub fn settings(&self) -> crate::Result<DrillSettings> {
        DrillSettings::new(self.multiplier, self.difficulty)
    }

    /// Handle a navigation action for the setup screen
    pub fn handle_navigation(
        &mut self,
        action: NavigationAction,
    ) -> crate::Result<Option<SetupEvent>> {
        if self.is_dropdown_active {
            self.handle_dropdown_navigation(action);
            return Ok(None);
        }

        let field = self.fields[self.selected_field_index];
        match action {
            NavigationAction::Up | NavigationAction::Previous => self.select_previous_field(),
            NavigationAction::Down | NavigationAction::Next => self.select_next_field(),
            NavigationAction::Left => self.adjust(field, false),
            NavigationAction::Right => self.adjust(field, true),
            NavigationAction::Select => match field {
                SetupField::Table => self.open_dropdown(),
                SetupField::Difficulty => self.select_next_field(),
                SetupField::Start => return Ok(Some(SetupEvent::Start(self.settings()?))),
            },
            NavigationAction::Back => return Ok(Some(SetupEvent::Back)),
            NavigationAction::Quit | NavigationAction::None => {}
        }
        Ok(None)
    }

    fn handle_dropdown_navigation(&mut self, action: NavigationAction) {
        match action {
            NavigationAction::Up | NavigationAction::Previous => self.select_previous_option(),
            NavigationAction::Down | NavigationAction::Next => self.select_next_option(),
            NavigationAction::Select => self.confirm_selection(),
            NavigationAction::Back => self.is_dropdown_active = false,
            _ => {}
        }
    }

    fn select_previous_field(&mut self) {
        if self.selected_field_index > 0 {
            self.selected_field_index -= 1;
        }
    }

    fn select_next_field(&mut self) {
        if self.selected_field_index < self.fields.len() - 1 {
            self.selected_field_index += 1;
        }
    }

    /// Step the value of `field` to its neighbour, clamping the table and
    /// wrapping the difficulty like a segmented control
    fn adjust(&mut self, field: SetupField, forward: bool) {
        match field {
            SetupField::Table => {
                self.multiplier = if forward {
                    (self.multiplier + 1).min(*MULTIPLIERS.end())
                } else {
                    self.multiplier.saturating_sub(1).max(*MULTIPLIERS.start())
                };
            }
            SetupField::Difficulty => {
                let index = DIFFICULTIES
                    .iter()
                    .position(|d| *d == self.difficulty)
                    .unwrap_or(0);
                let next = if forward {
                    (index + 1) % DIFFICULTIES.len()
                } else {
                    (index + DIFFICULTIES.len() - 1) % DIFFICULTIES.len()
                };
                self.difficulty = DIFFICULTIES[next];
            }
            SetupField::Start => {}
        }
    }

    fn table_options(&self) -> Vec<u32> {
        MULTIPLIERS.collect()
    }

    fn open_dropdown(&mut self) {
        let selected = self
            .table_options()
            .iter()
            .position(|m| *m == self.multiplier)
            .unwrap_or(0);
        self.dropdown_state.select(Some(selected));
        self.is_dropdown_active = true;
    }

    fn select_previous_option(&mut self) {
        let selected = self.dropdown_state.selected().unwrap_or(0);
        if selected > 0 {
            self.dropdown_state.select(Some(selected - 1));
        }
    }

    fn select_next_option(&mut self) {
        let options = self.table_options();
        let selected = self.dropdown_state.selected().unwrap_or(0);
        if selected < options.len() - 1 {
            self.dropdown_state.select(Some(selected + 1));
        }
    }

    fn confirm_selection(&mut self) {
        let options = self.table_options();
        if let Some(value) = self
            .dropdown_state
            .selected()
            .and_then(|index| options.get(index))
        {
            self.multiplier = *value;
        }
        self.is_dropdown_active = false;
    }

    /// Render the setup screen
    pub fn render(&mut self, f: &mut Frame) {
        let size = f.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Title and subtitle
                Constraint::Length(3), // Table
                Constraint::Length(7), // Difficulty
                Constraint::Length(3), // Start button
                Constraint::Min(0),
                Constraint::Length(3), // Help text
            ])
            .split(size);

        self.render_title(f, chunks[0]);
        self.render_table(f, chunks[1]);
        self.render_difficulty(f, chunks[2]);
        self.render_start(f, chunks[3]);
        self.render_help(f, chunks[5]);

        if self.is_dropdown_active {
            self.render_dropdown(f, size);
        }
    }

    fn field_style(&self, field: SetupField) -> Style {
        if self.fields[self.selected_field_index] == field {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        }
    }

    fn render_title(&self, f: &mut Frame, area: Rect) {
        let title_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(2)])
            .split(area);

        let title = Paragraph::new("XDRILLS")
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
        f.render_widget(title, title_chunks[0]);

        let subtitle = Paragraph::new("Times Table Drills")
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center);
        f.render_widget(subtitle, title_chunks[1]);
    }

    fn render_table(&self, f: &mut Frame, area: Rect) {
        let text = format!("Choose a table: {}", self.multiplier);
        let p = Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(self.field_style(SetupField::Table)),
        );
        f.render_widget(p, area);
    }

    fn render_difficulty(&self, f: &mut Frame, area: Rect) {
        let mut segments = Vec::new();
        for d in DIFFICULTIES {
            let style = if d == self.difficulty {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            segments.push(Span::styled(format!(" {:>2} ", d), style));
            segments.push(Span::raw(" "));
        }

        let text = vec![
            Line::from(Span::styled(
                format!("{} Questions", self.difficulty),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(segments),
            Line::from(""),
            Line::from(Span::styled(
                "The number of questions you would like to practice.",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let p = Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Difficulty")
                .border_style(self.field_style(SetupField::Difficulty)),
        );
        f.render_widget(p, area);
    }

    fn render_start(&self, f: &mut Frame, area: Rect) {
        let selected = self.fields[self.selected_field_index] == SetupField::Start;
        let style = if selected {
            Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Blue)
        };

        let button = Paragraph::new("Game On")
            .style(style)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Blue)),
            );
        f.render_widget(button, centered_column(24, area));
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let key = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let help_text = vec![Line::from(vec![
            Span::styled("↑↓", key),
            Span::raw(" Navigate  "),
            Span::styled("←→", key),
            Span::raw(" Change  "),
            Span::styled("Enter", key),
            Span::raw(" Select  "),
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

    fn render_dropdown(&mut self, f: &mut Frame, area: Rect) {
        let options = self.table_options();
        let items: Vec<ListItem> = options
            .iter()
            .map(|m| ListItem::new(m.to_string()))
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Choose a table"),
            )
            .highlight_style(Style::default().bg(Color::Cyan).fg(Color::Black))
            .highlight_symbol(">> ");

        let list_height = (options.len() + 2) as u16;
        let list_area = centered_rect(40, list_height.min(area.height), area);

        f.render_widget(Clear, list_area);
        f.render_stateful_widget(list, list_area, &mut self.dropdown_state);
    }
}

impl Default for SetupScreen {
    fn default() -> Self {
        Self::new(DrillSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::StateManager;
    use crossterm::event::{KeyCode, KeyEvent};
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn press(screen: &mut SetupScreen, code: KeyCode) -> Option<SetupEvent> {
        let action = StateManager::key_to_navigation(KeyEvent::from(code));
        screen.handle_navigation(action).unwrap()
    }

    fn buffer_text(buffer: &Buffer) -> String {
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_field_navigation() {
        let mut screen = SetupScreen::default();
        assert_eq!(screen.selected_field_index, 0);
        press(&mut screen, KeyCode::Down);
        press(&mut screen, KeyCode::Down);
        assert_eq!(screen.selected_field_index, 2);
        press(&mut screen, KeyCode::Down);
        assert_eq!(screen.selected_field_index, 2);
        press(&mut screen, KeyCode::Up);
        assert_eq!(screen.selected_field_index, 1);
    }

    #[test]
    fn test_table_adjust_is_clamped() {
        let mut screen = SetupScreen::default();
        press(&mut screen, KeyCode::Left);
        assert_eq!(screen.multiplier(), 2);
        for _ in 0..20 {
            press(&mut screen, KeyCode::Right);
        }
        assert_eq!(screen.multiplier(), 12);
    }

    #[test]
    fn test_difficulty_cycles() {
        let mut screen = SetupScreen::default();
        press(&mut screen, KeyCode::Down);
        let mut seen = Vec::new();
        for _ in 0..4 {
            press(&mut screen, KeyCode::Right);
            seen.push(screen.difficulty());
        }
        assert_eq!(seen, vec![10, 15, 20, 5]);
        press(&mut screen, KeyCode::Left);
        assert_eq!(screen.difficulty(), 20);
    }

    #[test]
    fn test_table_dropdown() {
        let mut screen = SetupScreen::default();
        press(&mut screen, KeyCode::Enter);
        assert!(screen.is_dropdown_active);
        assert_eq!(screen.dropdown_state.selected(), Some(0));

        for _ in 0..5 {
            press(&mut screen, KeyCode::Down);
        }
        press(&mut screen, KeyCode::Enter);
        assert!(!screen.is_dropdown_active);
        assert_eq!(screen.multiplier(), 7);

        // Esc closes the dropdown without leaving the screen
        press(&mut screen, KeyCode::Enter);
        assert_eq!(press(&mut screen, KeyCode::Esc), None);
        assert!(!screen.is_dropdown_active);
        assert_eq!(screen.multiplier(), 7);
    }

    #[test]
    fn test_start_hands_off_settings() {
        let mut screen = SetupScreen::new(DrillSettings::new(9, 15).unwrap());
        press(&mut screen, KeyCode::Down);
        press(&mut screen, KeyCode::Down);
        let event = press(&mut screen, KeyCode::Enter);
        assert_eq!(
            event,
            Some(SetupEvent::Start(DrillSettings::new(9, 15).unwrap()))
        );
    }

    #[test]
    fn test_escape_goes_back() {
        let mut screen = SetupScreen::default();
        assert_eq!(press(&mut screen, KeyCode::Esc), Some(SetupEvent::Back));
        assert_eq!(press(&mut screen, KeyCode::Backspace), Some(SetupEvent::Back));
    }

    #[test]
    fn test_tab_and_vim_keys_move_between_fields() {
        let mut screen = SetupScreen::default();
        press(&mut screen, KeyCode::Tab);
        assert_eq!(screen.selected_field_index, 1);
        press(&mut screen, KeyCode::Char('l'));
        assert_eq!(screen.difficulty(), 10);
        press(&mut screen, KeyCode::Char('j'));
        assert_eq!(screen.selected_field_index, 2);
        press(&mut screen, KeyCode::BackTab);
        press(&mut screen, KeyCode::Char('k'));
        assert_eq!(screen.selected_field_index, 0);

        // Keys without a navigation meaning are ignored
        assert_eq!(press(&mut screen, KeyCode::Char('7')), None);
        assert_eq!(screen.selected_field_index, 0);
        assert_eq!(screen.multiplier(), 2);
    }

    #[test]
    fn test_render() {
        let mut screen = SetupScreen::new(DrillSettings::new(4, 10).unwrap());
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|f| screen.render(f)).unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("XDRILLS"));
        assert!(text.contains("Choose a table: 4"));
        assert!(text.contains("10 Questions"));
        assert!(text.contains("Game On"));
    }
}
