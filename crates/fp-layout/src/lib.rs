// ABOUTME: Flex pane layout for character-cell displays.
// ABOUTME: Sizes panes along one axis, places them, and composites their output.

pub mod container;
pub mod event;
pub mod flex;
pub mod place;
pub mod solver;
pub mod text;

pub use container::{Container, Positioned};
pub use event::{Command, Commands, Event};
pub use flex::{boxed, FlexLayout, LayoutState, Pane};
pub use fp_core::{Alignment, Direction, RemainderPolicy, SizeConstraint};
pub use place::{display_width, Background, Block};
pub use solver::{solve, Frame, Rect, Slot};
pub use text::TextPane;
