// ABOUTME: Static text pane implementing the container contract.
// ABOUTME: Clips its text to the assigned size and records its placement.

use fp_core::Alignment;

use crate::container::{Container, Positioned};
use crate::event::Commands;
use crate::place::truncate_to_width;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextPane {
    text: String,
    width: u16,
    height: u16,
    x: u16,
    y: u16,
    alignment: Alignment,
    max_width: u16,
}

impl TextPane {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Cap the rendered width (0 = use the full assigned width)
    pub fn with_max_width(mut self, max_width: u16) -> Self {
        self.max_width = max_width;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Width the text is clipped to
    fn content_width(&self) -> u16 {
        match self.max_width {
            0 => self.width,
            max => self.width.min(max),
        }
    }
}

impl Container for TextPane {
    fn view(&self) -> String {
        let width = self.content_width();
        self.text
            .lines()
            .take(self.height as usize)
            .map(|line| truncate_to_width(line, width).0)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn set_size(&mut self, width: u16, height: u16) -> Commands {
        self.width = width;
        self.height = height;
        Commands::none()
    }

    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn alignment(&self) -> Alignment {
        self.alignment
    }

    fn max_width(&self) -> u16 {
        self.max_width
    }

    fn as_positioned(&self) -> Option<&dyn Positioned> {
        Some(self)
    }

    fn as_positioned_mut(&mut self) -> Option<&mut dyn Positioned> {
        Some(self)
    }
}

impl Positioned for TextPane {
    fn set_position(&mut self, x: u16, y: u16) {
        self.x = x;
        self.y = y;
    }

    fn position(&self) -> (u16, u16) {
        (self.x, self.y)
    }
}
