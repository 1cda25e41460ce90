// ABOUTME: Shared types and configuration for flexpane.
// ABOUTME: Defines layout vocabulary, fill colors, and config file handling.

pub mod color;
pub mod config;
pub mod geometry;

pub use color::Color;
pub use config::{Config, ConfigError, PaneConfig};
pub use geometry::{Alignment, ConstraintParseError, Direction, RemainderPolicy, SizeConstraint};
