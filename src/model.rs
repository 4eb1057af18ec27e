use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info, trace};

use crate::domain::Message;
use crate::table::TableView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Exiting,
}

/// Application state: the table view plus what the run loop has to know.
///
/// A few keys are handled here (quit, focus toggle, printing the selected
/// row), everything else goes to the table.
#[derive(Debug)]
pub struct Model {
    pub status: Status,
    table: TableView,
    output: Vec<String>, // Lines printed once the terminal is restored
}

impl Model {
    pub fn new(table: TableView) -> Self {
        Self {
            status: Status::Running,
            table,
            output: Vec::new(),
        }
    }

    pub fn table(&self) -> &TableView {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut TableView {
        &mut self.table
    }

    pub fn update(&mut self, message: Message) {
        trace!("Update: {:?}", message);
        match &message {
            Message::Key(key) => self.handle_key(key, &message),
            Message::Resize(_, _) | Message::Other => self.table.update(&message),
        }
    }

    fn handle_key(&mut self, key: &KeyEvent, message: &Message) {
        match (key.code, key.modifiers) {
            (KeyCode::Esc, KeyModifiers::NONE) => self.toggle_focus(),
            (KeyCode::Char('q'), KeyModifiers::NONE)
            | (KeyCode::Char('c'), KeyModifiers::CONTROL) => self.quit(),
            (KeyCode::Enter, KeyModifiers::NONE) => self.print_selected_row(),
            _ => self.table.update(message),
        }
    }

    fn toggle_focus(&mut self) {
        if self.table.focused() {
            self.table.blur();
        } else {
            self.table.focus();
        }
        debug!("Table focused: {}", self.table.focused());
    }

    fn print_selected_row(&mut self) {
        if let Some(row) = self.table.selected_row() {
            let line = format!("[{}]", row.join(" "));
            trace!("Queue selected row for output: {line}");
            self.output.push(line);
        }
    }

    pub fn quit(&mut self) {
        info!("Quitting ...");
        self.status = Status::Exiting;
    }

    /// Take the lines queued for stdout.
    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }
}
