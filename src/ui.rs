use derive_setters::Setters;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType},
};

use crate::model::Model;

// One border line on each side
pub const FRAME_MARGIN: u16 = 2;

/// Visual theme of the table, built once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Setters)]
pub struct Styles {
    pub header: Style,
    pub header_border: Style,
    pub cell: Style,
    pub selected: Style,
    pub frame: Style,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            header: Style::new().add_modifier(Modifier::BOLD),
            header_border: Style::new(),
            cell: Style::new(),
            selected: Style::new()
                .fg(Color::Indexed(212))
                .add_modifier(Modifier::BOLD),
            frame: Style::new(),
        }
    }
}

impl Styles {
    /// Dim grey header separator and frame, non bold header and a colored selection.
    pub fn viewer() -> Self {
        let base = Self::default();
        let header = base.header.remove_modifier(Modifier::BOLD);
        let selected = base
            .selected
            .fg(Color::Indexed(229))
            .bg(Color::Indexed(57))
            .remove_modifier(Modifier::BOLD);
        base.header(header)
            .header_border(Style::new().fg(Color::Indexed(240)))
            .selected(selected)
            .frame(Style::new().fg(Color::Indexed(240)))
    }
}

#[derive(Debug)]
pub struct TableUI {
    frame_style: Style,
}

impl TableUI {
    pub fn new(styles: &Styles) -> Self {
        Self {
            frame_style: styles.frame,
        }
    }

    /// Draw the table inside a bordered frame that hugs the table.
    pub fn draw(&self, model: &mut Model, frame: &mut Frame) {
        let table = model.table_mut();
        let area = Self::frame_area(table.natural_width(), table.natural_height(), frame.area());

        let block = Block::bordered()
            .border_type(BorderType::Plain)
            .border_style(self.frame_style);
        let inner = block.inner(area);

        frame.render_widget(block, area);
        table.render(frame, inner);
    }

    fn frame_area(table_width: u16, table_height: u16, area: Rect) -> Rect {
        Rect {
            width: std::cmp::min(table_width.saturating_add(FRAME_MARGIN), area.width),
            height: std::cmp::min(table_height.saturating_add(FRAME_MARGIN), area.height),
            ..area
        }
    }
}
