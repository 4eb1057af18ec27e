use ratatui::{
    Frame,
    crossterm::event::{KeyCode, KeyEvent, KeyModifiers},
    layout::{Constraint, Rect},
    widgets::{Block, Borders, Cell, Row as TableRow, Table, TableState},
};
use tracing::trace;

use crate::domain::Message;
use crate::layout::Column;
use crate::ui::Styles;

/// One line of the table, one entry per column.
pub type Row = Vec<String>;

pub const COLUMN_SPACING: u16 = 2;
// Title line and the separator below it
pub const TABLE_HEADER_HEIGHT: u16 = 2;

/// Scrollable table with a row cursor.
///
/// Keyboard navigation only happens while the view is focused. The selected
/// row and scroll offset live in a ratatui [`TableState`], which keeps the
/// cursor inside the viewport when rendering.
#[derive(Debug)]
pub struct TableView {
    columns: Vec<Column>,
    rows: Vec<Row>,
    styles: Styles,
    focus: bool,
    state: TableState,
    height: usize, // Number of rows visible during the last render
}

impl TableView {
    pub fn new(columns: Vec<Column>, rows: Vec<Row>, styles: Styles) -> Self {
        let selected = if rows.is_empty() { None } else { Some(0) };
        Self {
            columns,
            rows,
            styles,
            focus: false,
            state: TableState::default().with_selected(selected),
            height: 0,
        }
    }

    pub fn with_focus(mut self, focus: bool) -> Self {
        self.focus = focus;
        self
    }

    pub fn focused(&self) -> bool {
        self.focus
    }

    pub fn focus(&mut self) {
        self.focus = true;
    }

    pub fn blur(&mut self) {
        self.focus = false;
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn selected(&self) -> Option<usize> {
        self.state.selected()
    }

    pub fn selected_row(&self) -> Option<&Row> {
        self.state.selected().and_then(|idx| self.rows.get(idx))
    }

    pub fn offset(&self) -> usize {
        self.state.offset()
    }

    /// Width of the grid with every column at its full width.
    pub fn natural_width(&self) -> u16 {
        let cells: usize = self.columns.iter().map(|c| c.width).sum();
        let spacing = self.columns.len().saturating_sub(1) * COLUMN_SPACING as usize;
        u16::try_from(cells + spacing).unwrap_or(u16::MAX)
    }

    /// Height of the grid with every row shown.
    pub fn natural_height(&self) -> u16 {
        u16::try_from(self.rows.len())
            .unwrap_or(u16::MAX)
            .saturating_add(TABLE_HEADER_HEIGHT)
    }

    pub fn update(&mut self, message: &Message) {
        match message {
            Message::Key(key) if self.focus => self.handle_key(key),
            Message::Key(_) => {}
            Message::Resize(width, height) => {
                trace!("Table got resize to w:{width}, h:{height}");
            }
            Message::Other => {}
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) {
        let page = self.page_height();
        let half_page = std::cmp::max(page / 2, 1);
        match (key.code, key.modifiers) {
            (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::NONE) => self.move_up(1),
            (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::NONE) => self.move_down(1),
            (KeyCode::PageUp, _) | (KeyCode::Char('b'), KeyModifiers::NONE) => self.move_up(page),
            (KeyCode::PageDown, _)
            | (KeyCode::Char('f'), KeyModifiers::NONE)
            | (KeyCode::Char(' '), KeyModifiers::NONE) => self.move_down(page),
            (KeyCode::Char('u'), KeyModifiers::NONE | KeyModifiers::CONTROL) => {
                self.move_up(half_page)
            }
            (KeyCode::Char('d'), KeyModifiers::NONE | KeyModifiers::CONTROL) => {
                self.move_down(half_page)
            }
            (KeyCode::Home, _) | (KeyCode::Char('g'), KeyModifiers::NONE) => self.goto_top(),
            (KeyCode::End, _) | (KeyCode::Char('G'), _) => self.goto_bottom(),
            _ => {}
        }
        trace!(
            "Key {:?} => selected {:?}, offset {}",
            key.code,
            self.state.selected(),
            self.offset()
        );
    }

    fn page_height(&self) -> usize {
        std::cmp::max(self.height, 1)
    }

    fn move_up(&mut self, size: usize) {
        if let Some(selected) = self.state.selected() {
            self.state.select(Some(selected.saturating_sub(size)));
        }
    }

    fn move_down(&mut self, size: usize) {
        if let Some(selected) = self.state.selected() {
            let last = self.rows.len().saturating_sub(1);
            self.state.select(Some(std::cmp::min(selected + size, last)));
        }
    }

    fn goto_top(&mut self) {
        if !self.rows.is_empty() {
            self.state.select(Some(0));
        }
    }

    fn goto_bottom(&mut self) {
        if !self.rows.is_empty() {
            self.state.select(Some(self.rows.len() - 1));
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.height = area.height.saturating_sub(TABLE_HEADER_HEIGHT) as usize;

        let header = TableRow::new(self.columns.iter().map(|c| Cell::from(c.title.as_str())))
            .style(self.styles.header)
            .bottom_margin(TABLE_HEADER_HEIGHT - 1);

        let rows = self.rows.iter().map(|row| {
            TableRow::new(row.iter().map(|cell| Cell::from(cell.as_str()))).style(self.styles.cell)
        });

        let widths = self
            .columns
            .iter()
            .map(|c| Constraint::Length(u16::try_from(c.width).unwrap_or(u16::MAX)));

        let table = Table::new(rows, widths)
            .header(header)
            .column_spacing(COLUMN_SPACING)
            .row_highlight_style(self.styles.selected);

        frame.render_stateful_widget(table, area, &mut self.state);

        // Separator line below the titles
        let separator = Rect {
            width: std::cmp::min(self.natural_width(), area.width),
            height: std::cmp::min(TABLE_HEADER_HEIGHT, area.height),
            ..area
        };
        frame.render_widget(
            Block::new()
                .borders(Borders::BOTTOM)
                .border_style(self.styles.header_border),
            separator,
        );
    }
}
