use crossterm::event::{KeyCode, KeyEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move(Direction),
    VoteUp,
    VoteDown,
    ToggleEdit,
    AddOption,
    RemoveOption,
    ToggleHelp,
    Quit,
    SubmitText,
    NextField,
    CursorLeft,
    CursorRight,
    Backspace,
    InputChar(char),
    Cancel,
    Noop,
}

pub fn action_for_key(key: KeyEvent, text_mode: bool) -> Action {
    if text_mode {
        return match key.code {
            KeyCode::Enter => Action::SubmitText,
            KeyCode::Esc => Action::Cancel,
            KeyCode::Tab => Action::NextField,
            KeyCode::Backspace => Action::Backspace,
            KeyCode::Left => Action::CursorLeft,
            KeyCode::Right => Action::CursorRight,
            KeyCode::Char(c) => Action::InputChar(c),
            _ => Action::Noop,
        };
    }

    match key.code {
        KeyCode::Up => Action::Move(Direction::Up),
        KeyCode::Down => Action::Move(Direction::Down),
        KeyCode::Char('k') => Action::Move(Direction::Up),
        KeyCode::Char('j') => Action::Move(Direction::Down),
        KeyCode::Char('+') | KeyCode::Right | KeyCode::Char('l') => Action::VoteUp,
        KeyCode::Char('-') | KeyCode::Left | KeyCode::Char('h') => Action::VoteDown,
        KeyCode::Char('e') => Action::ToggleEdit,
        KeyCode::Char('a') => Action::AddOption,
        KeyCode::Char('d') => Action::RemoveOption,
        KeyCode::Char('?') => Action::ToggleHelp,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => Action::Noop,
    }
}
