use tracing::trace;

use crate::domain::{Message, TVError};
use ratatui::crossterm::event::{self, Event, KeyEventKind};

#[derive(Debug, Default)]
pub struct Controller;

impl Controller {
    /// Block until the terminal delivers an event the model cares about.
    pub fn next_message(&self) -> Result<Message, TVError> {
        loop {
            let event = event::read().map_err(TVError::RunLoop)?;
            if let Some(message) = Self::map_event(event) {
                return Ok(message);
            }
        }
    }

    pub fn map_event(event: Event) -> Option<Message> {
        let message = match event {
            // crossterm also emits key release and repeat events on Windows.
            Event::Key(key) if key.kind == KeyEventKind::Press => Some(Message::Key(key)),
            Event::Key(_) => None,
            Event::Resize(width, height) => Some(Message::Resize(width, height)),
            _ => Some(Message::Other),
        };
        trace!("Mapped: {message:?}");
        message
    }
}
