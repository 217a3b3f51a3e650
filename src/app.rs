use std::io;
use std::time::Duration;

use crossterm::event::{self, poll, Event, KeyCode, KeyEvent};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::error;

use crate::config::{Config, WindowMode};
use crate::engine::{Dataset, SortDirection, SortSpec, TableEngine, Window, WindowState};
use crate::fileio::FileIO;
use crate::input::{EditHandler, KeyResult, SearchHandler};
use crate::mode::Mode;
use crate::ui;

/// How close the cursor may get to the end of the revealed rows before the
/// next batch is requested
const REVEAL_MARGIN: usize = 3;

pub struct App {
    pub engine: TableEngine,
    pub config: Config,
    pub mode: Mode,
    pub file: Option<FileIO>,
    pub message: Option<String>,
    pub should_quit: bool,
    /// Cursor row within the visible window
    pub cursor: usize,
    /// Selected column
    pub sel_col: usize,
    search_handler: SearchHandler,
    edit_handler: EditHandler,
    /// Single-flight guard for reveal growth
    revealing: bool,
}

impl App {
    pub fn new(config: Config, file: Option<FileIO>) -> Self {
        let window = match config.window {
            WindowMode::Paged => Window::paged(config.page_size),
            WindowMode::Reveal => Window::reveal(config.reveal_batch),
        };

        let mut app = Self {
            engine: TableEngine::new(window),
            config,
            mode: Mode::Normal,
            file,
            message: None,
            should_quit: false,
            cursor: 0,
            sel_col: 0,
            search_handler: SearchHandler::new(),
            edit_handler: EditHandler::new(),
            revealing: false,
        };
        if app.file.is_some() {
            app.reload();
        }
        app
    }

    pub fn title(&self) -> String {
        self.file
            .as_ref()
            .map(|f| f.file_name())
            .unwrap_or_else(|| "[No File]".to_string())
    }

    pub fn search_buffer(&self) -> &str {
        &self.search_handler.buffer
    }

    pub fn edit_buffer(&self) -> &str {
        &self.edit_handler.buffer
    }

    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
        while !self.should_quit {
            terminal.draw(|f| ui::render(f, self))?;

            if poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    self.message = None;
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match self.mode {
            Mode::Normal => self.handle_normal_key(key),
            Mode::Search => self.handle_search_key(key),
            Mode::Edit => self.handle_edit_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.move_down(),
            KeyCode::Char('k') | KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Char('h') | KeyCode::Left => self.sel_col = self.sel_col.saturating_sub(1),
            KeyCode::Char('l') | KeyCode::Right => {
                let cols = self.engine.headers().len();
                self.sel_col = (self.sel_col + 1).min(cols.saturating_sub(1));
            }
            KeyCode::Char('g') => self.cursor = 0,
            KeyCode::Char('G') => {
                self.cursor = self.visible_len().saturating_sub(1);
                self.maybe_reveal();
            }
            KeyCode::Char('n') | KeyCode::PageDown => self.next_window(),
            KeyCode::Char('p') | KeyCode::PageUp => self.prev_window(),
            KeyCode::Char('/') => {
                if self.engine.has_data() {
                    self.search_handler.start(self.engine.search_term());
                    self.mode = Mode::Search;
                }
            }
            KeyCode::Char('s') => self.cycle_sort(),
            KeyCode::Char('e') => self.start_edit(),
            KeyCode::Char('d') => self.delete_current_row(),
            KeyCode::Char('R') => self.reload(),
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match self.search_handler.handle_key(key) {
            KeyResult::Continue => {
                // live filter: re-applied on every keystroke
                if self.engine.search_term() != self.search_handler.buffer {
                    let term = self.search_handler.buffer.clone();
                    self.engine.set_search_term(&term);
                    self.cursor = 0;
                }
            }
            KeyResult::Finish => self.mode = Mode::Normal,
            KeyResult::Cancel => {
                self.engine.set_search_term("");
                self.cursor = 0;
                self.mode = Mode::Normal;
            }
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        match self.edit_handler.handle_key(key) {
            KeyResult::Continue => {}
            KeyResult::Finish => {
                self.commit_edit();
                self.mode = Mode::Normal;
            }
            KeyResult::Cancel => self.mode = Mode::Normal,
        }
    }

    fn visible_len(&self) -> usize {
        self.engine.current_view().rows.len()
    }

    fn move_down(&mut self) {
        if self.cursor + 1 < self.visible_len() {
            self.cursor += 1;
        }
        self.maybe_reveal();
    }

    /// Request one more batch when the cursor approaches the end of the
    /// revealed rows. Guarded so a request in flight is never doubled up.
    fn maybe_reveal(&mut self) {
        if self.revealing || !self.engine.can_reveal_more() {
            return;
        }
        if self.cursor + REVEAL_MARGIN >= self.visible_len() {
            self.revealing = true;
            self.engine.request_more();
            self.revealing = false;
        }
    }

    fn next_window(&mut self) {
        match self.engine.window_state() {
            WindowState::Paged { page, .. } => {
                self.engine.request_page(page + 1);
                self.cursor = 0;
            }
            WindowState::Reveal { .. } => {
                if !self.revealing {
                    self.revealing = true;
                    self.engine.request_more();
                    self.revealing = false;
                }
            }
        }
        self.clamp_cursor();
    }

    fn prev_window(&mut self) {
        if let WindowState::Paged { page, .. } = self.engine.window_state() {
            self.engine.request_page(page.saturating_sub(1));
            self.cursor = 0;
        }
    }

    /// Ascending, then descending, then off; a different column starts over
    fn cycle_sort(&mut self) {
        if !self.engine.has_data() {
            return;
        }
        let next = match self.engine.sort_spec() {
            Some(spec) if spec.column == self.sel_col => match spec.direction {
                SortDirection::Ascending => Some(SortSpec {
                    column: self.sel_col,
                    direction: SortDirection::Descending,
                }),
                SortDirection::Descending => None,
            },
            _ => Some(SortSpec {
                column: self.sel_col,
                direction: SortDirection::Ascending,
            }),
        };
        self.engine.set_sort(next);
        self.cursor = 0;
    }

    fn start_edit(&mut self) {
        let initial = {
            let view = self.engine.current_view();
            view.rows
                .get(self.cursor)
                .and_then(|(_, cells)| cells.get(self.sel_col))
                .cloned()
        };
        if let Some(value) = initial {
            self.edit_handler.start_edit(&value);
            self.mode = Mode::Edit;
        }
    }

    /// Submit the whole replacement row; the engine resolves the cursor
    /// position to the underlying row.
    fn commit_edit(&mut self) {
        let new_row = {
            let view = self.engine.current_view();
            view.rows.get(self.cursor).map(|(_, cells)| {
                let mut row = cells.to_vec();
                if let Some(slot) = row.get_mut(self.sel_col) {
                    *slot = self.edit_handler.buffer.clone();
                }
                row
            })
        };
        if let Some(row) = new_row {
            if self.engine.edit_row(self.cursor, row) {
                self.message = Some("Row updated".to_string());
            }
        }
        self.clamp_cursor();
    }

    fn delete_current_row(&mut self) {
        if self.engine.delete_row(self.cursor) {
            self.message = Some("Row deleted".to_string());
        }
        self.clamp_cursor();
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.visible_len().saturating_sub(1));
        let cols = self.engine.headers().len();
        self.sel_col = self.sel_col.min(cols.saturating_sub(1));
    }

    /// Load (or re-load) the file, replacing the dataset wholesale. On
    /// failure the engine keeps its prior state and the error becomes the
    /// message.
    pub fn reload(&mut self) {
        let Some(file) = &self.file else {
            self.message = Some("no file to reload".to_string());
            return;
        };
        match file.load() {
            Ok(parsed) => {
                self.engine.load(Dataset::new(parsed.headers, parsed.rows));
                self.cursor = 0;
                self.sel_col = 0;
                self.message = Some(format!("Loaded {}", file.file_name()));
            }
            Err(e) => {
                error!(error = %e, "load failed");
                self.message = Some(e.to_string());
            }
        }
    }
}
