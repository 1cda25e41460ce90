// ABOUTME: Capability contract between the layout engine and the panes it arranges.
// ABOUTME: Positioning is a separate optional capability, reached without type checks.

use fp_core::Alignment;

use crate::event::{Commands, Event};

/// A pane the layout engine can size, place, and render
pub trait Container {
    fn init(&mut self) -> Commands {
        Commands::none()
    }

    /// React to a forwarded event
    fn update(&mut self, _event: &Event) -> Commands {
        Commands::none()
    }

    /// Render content at the currently assigned size.
    ///
    /// The result may be smaller than the assigned size; the compositor pads it.
    fn view(&self) -> String;

    /// Accept a newly assigned size so content can re-flow
    fn set_size(&mut self, width: u16, height: u16) -> Commands;

    fn size(&self) -> (u16, u16);

    /// Cross-axis placement of this pane's content
    fn alignment(&self) -> Alignment {
        Alignment::Start
    }

    /// Widest the content gets, used to cap alignment (0 = unbounded)
    fn max_width(&self) -> u16 {
        0
    }

    fn as_positioned(&self) -> Option<&dyn Positioned> {
        None
    }

    fn as_positioned_mut(&mut self) -> Option<&mut dyn Positioned> {
        None
    }
}

/// Panes that record where the engine placed them
pub trait Positioned {
    /// Origin relative to the owning layout's own origin
    fn set_position(&mut self, x: u16, y: u16);

    fn position(&self) -> (u16, u16);
}
