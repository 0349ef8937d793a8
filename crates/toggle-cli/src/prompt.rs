//! Interactive choice on the terminal.
//!
//! - [`TerminalPicker`]: full-screen list (crossterm + ratatui) drawn on stderr
//! - [`LinePrompt`]: numbered list, answer read line by line (used when stdin is not a tty)

use crossterm::{
    cursor::Show,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use std::io::{self, BufRead, Write};
use toggle_core::{BoxError, Prompt};

/// What a key press did to the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerAction {
    Continue,
    Picked(usize),
    Cancelled,
}

/// Cursor over a fixed list of labels.
#[derive(Debug, Clone)]
pub struct PickerState {
    choices: Vec<String>,
    cursor: usize,
}

impl PickerState {
    pub fn new(choices: Vec<String>) -> Self {
        Self { choices, cursor: 0 }
    }

    #[cfg(test)]
    fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PickerAction {
        if key.kind != KeyEventKind::Press {
            return PickerAction::Continue;
        }
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc) | (KeyModifiers::NONE, KeyCode::Char('q')) => PickerAction::Cancelled,
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => PickerAction::Cancelled,
            (_, KeyCode::Enter) if !self.choices.is_empty() => PickerAction::Picked(self.cursor),
            (_, KeyCode::Up) | (KeyModifiers::NONE, KeyCode::Char('k')) => {
                self.cursor = self.cursor.saturating_sub(1);
                PickerAction::Continue
            }
            (_, KeyCode::Down) | (KeyModifiers::NONE, KeyCode::Char('j')) => {
                if self.cursor + 1 < self.choices.len() {
                    self.cursor += 1;
                }
                PickerAction::Continue
            }
            (_, KeyCode::Home) => {
                self.cursor = 0;
                PickerAction::Continue
            }
            (_, KeyCode::End) => {
                self.cursor = self.choices.len().saturating_sub(1);
                PickerAction::Continue
            }
            _ => PickerAction::Continue,
        }
    }

    pub fn render(&self, frame: &mut Frame, label: &str) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(frame.area());

        let items: Vec<ListItem> = self
            .choices
            .iter()
            .map(|c| ListItem::new(Line::from(c.as_str())))
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .title(format!(" {label} "))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut list_state = ListState::default().with_selected(Some(self.cursor));
        frame.render_stateful_widget(list, chunks[0], &mut list_state);

        let help = Paragraph::new("↑/↓ move  Enter open  Esc cancel")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[1]);
    }
}

fn run_picker<B: Backend>(
    terminal: &mut Terminal<B>,
    label: &str,
    state: &mut PickerState,
) -> io::Result<Option<usize>> {
    loop {
        terminal.draw(|f| state.render(f, label))?;
        if let Event::Key(key) = event::read()? {
            match state.handle_key(key) {
                PickerAction::Continue => {}
                PickerAction::Picked(index) => return Ok(Some(index)),
                PickerAction::Cancelled => return Ok(None),
            }
        }
    }
}

/// Runs its closure when dropped.
struct RestoreOnDrop<F: FnMut()>(F);

impl<F: FnMut()> Drop for RestoreOnDrop<F> {
    fn drop(&mut self) {
        (self.0)()
    }
}

/// Put stderr back into cooked mode on the main screen.
fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stderr(), LeaveAlternateScreen, Show);
}

/// Full-screen picker on the alternate screen of stderr, so stdout stays clean.
#[derive(Debug, Default)]
pub struct TerminalPicker;

impl Prompt for TerminalPicker {
    fn choose(&mut self, label: &str, choices: &[String]) -> Result<Option<String>, BoxError> {
        let mut state = PickerState::new(choices.to_vec());

        enable_raw_mode()?;
        // Restores the terminal on every exit path, including a failed setup below.
        let _restore = RestoreOnDrop(restore_terminal);
        execute!(io::stderr(), EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stderr()))?;

        let picked = run_picker(&mut terminal, label, &mut state)?;
        Ok(picked.map(|index| choices[index].clone()))
    }
}

/// Numbered prompt: prints the choices to `output` and reads a number (or a label) from `input`.
///
/// An empty line or end of input cancels.
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn parse_answer(answer: &str, choices: &[String]) -> Option<String> {
        if let Ok(n) = answer.parse::<usize>() {
            return n.checked_sub(1).and_then(|i| choices.get(i)).cloned();
        }
        choices.iter().find(|c| c.as_str() == answer).cloned()
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn choose(&mut self, label: &str, choices: &[String]) -> Result<Option<String>, BoxError> {
        writeln!(self.output, "{label}:")?;
        for (i, choice) in choices.iter().enumerate() {
            writeln!(self.output, "  {}) {}", i + 1, choice)?;
        }

        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            let answer = line.trim();
            if answer.is_empty() {
                return Ok(None);
            }
            if let Some(choice) = Self::parse_answer(answer, choices) {
                return Ok(Some(choice));
            }
            writeln!(self.output, "invalid choice '{answer}'")?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn labels() -> Vec<String> {
        vec!["foo.h".to_string(), "foo_test.c".to_string(), "foo.inl".to_string()]
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_picker_navigation_is_clamped() {
        let mut state = PickerState::new(labels());
        assert_eq!(state.handle_key(key(KeyCode::Up)), PickerAction::Continue);
        assert_eq!(state.cursor(), 0);

        state.handle_key(key(KeyCode::Down));
        state.handle_key(key(KeyCode::Char('j')));
        state.handle_key(key(KeyCode::Down));
        assert_eq!(state.cursor(), 2);

        state.handle_key(key(KeyCode::Home));
        assert_eq!(state.cursor(), 0);
        state.handle_key(key(KeyCode::End));
        assert_eq!(state.cursor(), 2);
    }

    #[test]
    fn test_picker_enter_and_cancel() {
        let mut state = PickerState::new(labels());
        state.handle_key(key(KeyCode::Down));
        assert_eq!(state.handle_key(key(KeyCode::Enter)), PickerAction::Picked(1));
        assert_eq!(state.handle_key(key(KeyCode::Esc)), PickerAction::Cancelled);
        assert_eq!(
            state.handle_key(key(KeyCode::Char('q'))),
            PickerAction::Cancelled
        );
        assert_eq!(
            state.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            PickerAction::Cancelled
        );
    }

    #[test]
    fn test_picker_renders_label_and_choices() {
        let mut terminal = Terminal::new(TestBackend::new(40, 8)).unwrap();
        let mut state = PickerState::new(labels());
        state.handle_key(key(KeyCode::Down));
        terminal.draw(|f| state.render(f, "Switch to")).unwrap();

        let buffer = terminal.backend().buffer();
        let screen: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(screen.contains("Switch to"));
        assert!(screen.contains("foo.h"));
        assert!(screen.contains("> foo_test.c"));
    }

    fn failing_setup(restored: &std::cell::Cell<u32>) -> io::Result<()> {
        let _restore = RestoreOnDrop(|| restored.set(restored.get() + 1));
        Err(io::Error::other("no alternate screen"))
    }

    #[test]
    fn test_restore_runs_when_setup_fails() {
        let restored = std::cell::Cell::new(0);
        assert!(failing_setup(&restored).is_err());
        assert_eq!(restored.get(), 1);
    }

    #[test]
    fn test_line_prompt_by_number_and_label() {
        let mut out = Vec::new();
        let mut prompt = LinePrompt::new("2\n".as_bytes(), &mut out);
        assert_eq!(
            prompt.choose("Switch to", &labels()).unwrap(),
            Some("foo_test.c".to_string())
        );
        let shown = String::from_utf8(out).unwrap();
        assert!(shown.starts_with("Switch to:\n  1) foo.h\n  2) foo_test.c\n"));

        let mut prompt = LinePrompt::new("foo.inl\n".as_bytes(), io::sink());
        assert_eq!(
            prompt.choose("Switch to", &labels()).unwrap(),
            Some("foo.inl".to_string())
        );
    }

    #[test]
    fn test_line_prompt_retries_then_cancels() {
        let mut out = Vec::new();
        let mut prompt = LinePrompt::new("9\nnope\n\n".as_bytes(), &mut out);
        assert_eq!(prompt.choose("Switch to", &labels()).unwrap(), None);
        let shown = String::from_utf8(out).unwrap();
        assert!(shown.contains("invalid choice '9'"));
        assert!(shown.contains("invalid choice 'nope'"));

        let mut prompt = LinePrompt::new("".as_bytes(), io::sink());
        assert_eq!(prompt.choose("Switch to", &labels()).unwrap(), None);
    }
}
