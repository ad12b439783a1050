use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use partitioner::{HeaderPolicy, Notice, Request};
use std::path::PathBuf;
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Path,
    Header,
    Count,
}

impl Field {
    fn next(self) -> Self {
        match self {
            Field::Path => Field::Header,
            Field::Header => Field::Count,
            Field::Count => Field::Path,
        }
    }

    fn prev(self) -> Self {
        match self {
            Field::Path => Field::Count,
            Field::Header => Field::Path,
            Field::Count => Field::Header,
        }
    }
}

pub struct App {
    /// Input file path
    pub path: Input,
    pub has_header: bool,
    /// Shard count for distribute, kept as typed
    pub count: Input,
    pub focus: Field,
    /// Outcome of the last operation
    pub status: Option<Notice>,
    pub should_quit: bool,
}

impl App {
    pub fn new(path: Option<PathBuf>) -> Self {
        let path = path
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        Self {
            path: Input::new(path),
            has_header: false,
            count: Input::default(),
            focus: Field::Path,
            status: None,
            should_quit: false,
        }
    }

    pub fn split_request(&self) -> Request {
        Request::Split {
            path: PathBuf::from(self.path.value().trim()),
            has_header: self.has_header,
        }
    }

    pub fn distribute_request(&self) -> Request {
        Request::Distribute {
            path: PathBuf::from(self.path.value().trim()),
            has_header: self.has_header,
            shard_count: self.count.value().to_string(),
            header: HeaderPolicy::Always,
        }
    }

    pub fn split(&mut self) {
        self.status = Some(partitioner::run(&self.split_request()));
    }

    pub fn distribute(&mut self) {
        self.status = Some(partitioner::run(&self.distribute_request()));
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') if ctrl => self.should_quit = true,
            KeyCode::Char('s') if ctrl => self.split(),
            KeyCode::Char('d') if ctrl => self.distribute(),
            KeyCode::F(2) => self.split(),
            KeyCode::F(3) => self.distribute(),
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.prev(),
            KeyCode::Enter => match self.focus {
                Field::Count => self.distribute(),
                Field::Path | Field::Header => self.split(),
            },
            KeyCode::Esc => match self.focus {
                Field::Path => self.path.reset(),
                Field::Count => self.count.reset(),
                Field::Header => self.has_header = false,
            },
            _ => match self.focus {
                Field::Header => {
                    if key.code == KeyCode::Char(' ') {
                        self.has_header = !self.has_header;
                    }
                }
                Field::Path => {
                    self.path.handle_event(&Event::Key(key));
                }
                Field::Count => {
                    self.count.handle_event(&Event::Key(key));
                }
            },
        }
    }
}
