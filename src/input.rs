use crossterm::event::{KeyCode, KeyEvent};

/// Outcome of feeding one key to a mode handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResult {
    Continue,
    Finish,
    Cancel,
}

pub fn is_escape(key: KeyEvent) -> bool {
    key.code == KeyCode::Esc
}

/// Live search prompt. The buffer is applied to the engine after every
/// keystroke; Enter keeps the term, Escape clears it.
pub struct SearchHandler {
    pub buffer: String,
}

impl SearchHandler {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    pub fn start(&mut self, current: &str) {
        self.buffer = current.to_string();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyResult {
        if is_escape(key) {
            self.buffer.clear();
            return KeyResult::Cancel;
        }

        match key.code {
            KeyCode::Enter => KeyResult::Finish,
            KeyCode::Backspace => {
                self.buffer.pop();
                KeyResult::Continue
            }
            KeyCode::Char(c) => {
                self.buffer.push(c);
                KeyResult::Continue
            }
            _ => KeyResult::Continue,
        }
    }
}

/// Line editor over one cell value
pub struct EditHandler {
    pub buffer: String,
    pub cursor: usize,
}

impl EditHandler {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
        }
    }

    pub fn start_edit(&mut self, initial: &str) {
        self.buffer = initial.to_string();
        self.cursor = self.buffer.chars().count();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyResult {
        if is_escape(key) {
            return KeyResult::Cancel;
        }

        match key.code {
            KeyCode::Enter => KeyResult::Finish,
            KeyCode::Char(c) => {
                let at = self.byte_offset();
                self.buffer.insert(at, c);
                self.cursor += 1;
                KeyResult::Continue
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_offset();
                    self.buffer.remove(at);
                }
                KeyResult::Continue
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                KeyResult::Continue
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.buffer.chars().count());
                KeyResult::Continue
            }
            KeyCode::Home => {
                self.cursor = 0;
                KeyResult::Continue
            }
            KeyCode::End => {
                self.cursor = self.buffer.chars().count();
                KeyResult::Continue
            }
            _ => KeyResult::Continue,
        }
    }

    fn byte_offset(&self) -> usize {
        self.buffer
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.buffer.len())
    }
}
