use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::backend::CrosstermBackend;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph};
use ratatui::{Frame, Terminal};

use crate::tally::store::TallyStore;
use crate::tui::input::{self, Action, Direction};
use crate::tui::render::{self, BoardRenderData, centered_rect};

const SPLASH_DURATION: Duration = Duration::from_millis(1500);

/// Interface state: structural edits (add/remove) are only reachable while
/// `Editing`. The gating is presentation-only; the store itself accepts
/// mutations from any caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Viewing,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AddField {
    Name,
    Notes,
}

#[derive(Debug, Clone)]
struct AddForm {
    name: String,
    notes: String,
    field: AddField,
    cursor: usize,
}

impl AddForm {
    fn new() -> Self {
        Self {
            name: String::new(),
            notes: String::new(),
            field: AddField::Name,
            cursor: 0,
        }
    }

    fn active_buffer(&mut self) -> &mut String {
        match self.field {
            AddField::Name => &mut self.name,
            AddField::Notes => &mut self.notes,
        }
    }

    fn active_len(&self) -> usize {
        match self.field {
            AddField::Name => self.name.chars().count(),
            AddField::Notes => self.notes.chars().count(),
        }
    }
}

#[derive(Debug, Clone)]
enum PendingConfirm {
    RemoveOption { index: usize },
}

#[derive(Debug)]
struct AppState {
    store: TallyStore,
    mode: Mode,
    selected: usize,
    add_form: Option<AddForm>,
    pending_confirm: Option<PendingConfirm>,
    show_help: bool,
    status_message: Option<String>,
    splash_until: Option<Instant>,
}

impl AppState {
    fn new(store: TallyStore, skip_splash: bool) -> Self {
        Self {
            store,
            mode: Mode::Viewing,
            selected: 0,
            add_form: None,
            pending_confirm: None,
            show_help: false,
            status_message: None,
            splash_until: (!skip_splash).then(|| Instant::now() + SPLASH_DURATION),
        }
    }

    fn splash_active(&self) -> bool {
        self.splash_until.is_some_and(|until| Instant::now() < until)
    }

    fn draw(&self, frame: &mut Frame) {
        if self.splash_active() {
            draw_splash(frame);
            return;
        }

        let slices = render::chart_series(&self.store);
        let rows = render::list_rows(&self.store);
        let hints = self.hints();
        let data = BoardRenderData {
            slices: &slices,
            rows: &rows,
            selected: self.selected,
            editing: self.mode == Mode::Editing,
            total_votes: self.store.total_votes(),
            mode_label: self.mode_label(),
            hints: &hints,
            message: self.status_message.as_deref(),
            show_help: self.show_help,
        };
        render::draw(frame, &data);

        if let Some(form) = &self.add_form {
            draw_add_form(frame, form);
        } else if let Some(confirm) = &self.pending_confirm {
            self.draw_confirm_prompt(frame, confirm);
        }
    }

    fn mode_label(&self) -> &'static str {
        if self.add_form.is_some() {
            return "Adding";
        }
        if self.pending_confirm.is_some() {
            return "Confirming";
        }
        match self.mode {
            Mode::Viewing => "Viewing",
            Mode::Editing => "Editing",
        }
    }

    fn hints(&self) -> String {
        if self.add_form.is_some() {
            return "type text  [Tab] switch field  [Enter] add  [Esc] cancel".to_string();
        }
        if self.pending_confirm.is_some() {
            return "[y/Enter] remove  [n/Esc/Backspace] keep".to_string();
        }
        match self.mode {
            Mode::Viewing => {
                "[j/k] select  [+/-] vote  [e] edit  [?] help  [q] quit".to_string()
            }
            Mode::Editing => {
                "[j/k] select  [+/-] vote  [a] add  [d] remove  [e] stop editing  [q] quit"
                    .to_string()
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.splash_active() {
            return false;
        }
        self.status_message = None;

        if self.pending_confirm.is_some() {
            self.handle_confirm_key(key);
            return false;
        }

        let in_text_mode = self.add_form.is_some();
        let action = input::action_for_key(key, in_text_mode);

        if in_text_mode {
            self.handle_form_action(action);
            return false;
        }

        match action {
            Action::Quit => return true,
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::Move(Direction::Up) => {
                self.selected = self.selected.saturating_sub(1);
            }
            Action::Move(Direction::Down) => {
                if !self.store.is_empty() {
                    self.selected = (self.selected + 1).min(self.store.len() - 1);
                }
            }
            Action::VoteUp => {
                if !self.store.is_empty() {
                    self.store.vote(self.selected, 1);
                }
            }
            Action::VoteDown => {
                if !self.store.is_empty() {
                    self.store.vote(self.selected, -1);
                }
            }
            Action::ToggleEdit => {
                self.mode = match self.mode {
                    Mode::Viewing => Mode::Editing,
                    Mode::Editing => Mode::Viewing,
                };
            }
            Action::AddOption => {
                if self.mode == Mode::Editing {
                    self.add_form = Some(AddForm::new());
                }
            }
            Action::RemoveOption => {
                if self.mode == Mode::Editing && !self.store.is_empty() {
                    self.pending_confirm = Some(PendingConfirm::RemoveOption {
                        index: self.selected,
                    });
                }
            }
            Action::Cancel
            | Action::SubmitText
            | Action::NextField
            | Action::CursorLeft
            | Action::CursorRight
            | Action::Backspace
            | Action::InputChar(_)
            | Action::Noop => {}
        }
        false
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                if let Some(PendingConfirm::RemoveOption { index }) = self.pending_confirm.take() {
                    let removed = self.store.remove_option(index);
                    if !self.store.is_empty() {
                        self.selected = self.selected.min(self.store.len() - 1);
                    } else {
                        self.selected = 0;
                    }
                    self.status_message = Some(format!("removed {}", removed.name));
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc | KeyCode::Backspace => {
                self.pending_confirm = None;
            }
            _ => {}
        }
    }

    fn handle_form_action(&mut self, action: Action) {
        let Some(form) = &mut self.add_form else {
            return;
        };
        match action {
            Action::InputChar(c) => {
                let cursor = form.cursor;
                let buffer = form.active_buffer();
                let at = byte_index_for_cursor(buffer, cursor);
                buffer.insert(at, c);
                form.cursor += 1;
            }
            Action::Backspace => {
                if form.cursor > 0 {
                    let cursor = form.cursor;
                    let buffer = form.active_buffer();
                    let at = byte_index_for_cursor(buffer, cursor - 1);
                    buffer.remove(at);
                    form.cursor -= 1;
                }
            }
            Action::CursorLeft => form.cursor = form.cursor.saturating_sub(1),
            Action::CursorRight => form.cursor = (form.cursor + 1).min(form.active_len()),
            Action::NextField => {
                form.field = match form.field {
                    AddField::Name => AddField::Notes,
                    AddField::Notes => AddField::Name,
                };
                form.cursor = form.active_len();
            }
            Action::SubmitText => {
                let (name, notes) = (form.name.clone(), form.notes.clone());
                if self.store.add_option(&name, &notes) {
                    self.add_form = None;
                    self.status_message = Some(format!("added {}", name.trim()));
                } else {
                    // Blank name: the store ignores it; keep the form open.
                    self.status_message = Some("option name required".to_string());
                }
            }
            Action::Cancel => self.add_form = None,
            _ => {}
        }
    }

    fn draw_confirm_prompt(&self, frame: &mut Frame, confirm: &PendingConfirm) {
        let PendingConfirm::RemoveOption { index } = confirm;
        let option = &self.store.options()[*index];
        let area = centered_rect(frame.area(), 56, 22);
        frame.render_widget(Clear, area);
        let paragraph = Paragraph::new(vec![
            Line::from(Span::styled(
                format!("Remove \"{}\"?", option.name),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!(
                    "Its {} vote{} leave the total as well.",
                    option.counter,
                    if option.counter == 1 { "" } else { "s" }
                ),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    "[y/Enter]",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" yes   ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    "[n/Esc/Backspace]",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" no", Style::default().fg(Color::DarkGray)),
            ]),
        ])
        .block(
            Block::default()
                .title(" confirm ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Yellow)),
        );
        frame.render_widget(paragraph, area);
    }
}

fn draw_add_form(frame: &mut Frame, form: &AddForm) {
    let area = centered_rect(frame.area(), 60, 30);
    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(Span::styled(
            "Add option",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for (label, text, field) in [
        ("name", &form.name, AddField::Name),
        ("notes", &form.notes, AddField::Notes),
    ] {
        if form.field == field {
            let mut spans = vec![Span::styled(
                format!("{label:<8}"),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )];
            spans.extend(
                line_with_cursor(
                    text,
                    form.cursor,
                    if field == AddField::Name {
                        "option name..."
                    } else {
                        "optional notes..."
                    },
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                    Style::default().fg(Color::DarkGray),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK),
                )
                .spans,
            );
            lines.push(Line::from(spans));
        } else {
            lines.push(Line::from(vec![
                Span::styled(format!("{label:<8}"), Style::default().fg(Color::Cyan)),
                if text.is_empty() {
                    Span::styled("(empty)", Style::default().fg(Color::DarkGray))
                } else {
                    Span::styled(text.clone(), Style::default().fg(Color::White))
                },
            ]));
        }
    }

    lines.extend([
        Line::from(""),
        Line::from(Span::styled(
            "[Tab] switch field  [Enter] add  [Esc] cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ]);

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" add option ")
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::Green))
            .padding(Padding::new(2, 2, 1, 1)),
    );
    frame.render_widget(paragraph, area);
}

fn draw_splash(frame: &mut Frame) {
    let area = centered_rect(frame.area(), 40, 30);
    let paragraph = Paragraph::new(vec![
        Line::from(Span::styled(
            "tally",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "loading the board...",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .centered()
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .padding(Padding::new(2, 2, 1, 1)),
    );
    frame.render_widget(paragraph, area);
}

pub fn run(store: TallyStore, skip_splash: bool) -> Result<()> {
    let mut app = AppState::new(store, skip_splash);

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    loop {
        terminal.draw(|f| app.draw(f))?;
        if !event::poll(Duration::from_millis(200))? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if matches!(key.kind, KeyEventKind::Release | KeyEventKind::Repeat) {
                continue;
            }
            if app.handle_key(key) {
                break;
            }
        }
    }

    Ok(())
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
}

fn line_with_cursor(
    text: &str,
    cursor: usize,
    placeholder: &str,
    text_style: Style,
    placeholder_style: Style,
    caret_style: Style,
) -> Line<'static> {
    let mut spans = Vec::new();
    let char_len = text.chars().count();
    let clamped = cursor.min(char_len);

    if char_len == 0 {
        spans.push(Span::styled("▌", caret_style));
        if !placeholder.is_empty() {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(placeholder.to_string(), placeholder_style));
        }
        return Line::from(spans);
    }

    let split = byte_index_for_cursor(text, clamped);
    let (left, right) = text.split_at(split);
    if !left.is_empty() {
        spans.push(Span::styled(left.to_string(), text_style));
    }
    spans.push(Span::styled("▌", caret_style));
    if !right.is_empty() {
        spans.push(Span::styled(right.to_string(), text_style));
    }
    Line::from(spans)
}

fn byte_index_for_cursor(text: &str, cursor: usize) -> usize {
    text.char_indices()
        .nth(cursor)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len())
}
