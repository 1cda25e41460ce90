// ABOUTME: Layout vocabulary shared by the engine and its configuration.
// ABOUTME: Axis direction, cross-axis alignment, and per-pane size constraints.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Axis along which panes are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Horizontal,
    Vertical,
}

impl Direction {
    /// The orthogonal axis
    pub fn cross(self) -> Self {
        match self {
            Direction::Horizontal => Direction::Vertical,
            Direction::Vertical => Direction::Horizontal,
        }
    }

    /// Pick the component of `(width, height)` lying on this axis
    pub fn main_of(self, width: u16, height: u16) -> u16 {
        match self {
            Direction::Horizontal => width,
            Direction::Vertical => height,
        }
    }
}

/// Where content sits inside a larger span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    #[default]
    Start,
    Center,
    End,
}

impl Alignment {
    /// Leading offset for `content` cells placed in `available` cells.
    ///
    /// Content wider than the span is pinned to the start.
    pub fn offset(self, available: u16, content: u16) -> u16 {
        let free = available.saturating_sub(content);
        match self {
            Alignment::Start => 0,
            Alignment::Center => free / 2,
            Alignment::End => free,
        }
    }
}

/// How a pane claims space along the primary axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SizeConstraint {
    /// Exactly this many cells, regardless of what is available
    Fixed(u16),
    /// An equal share of whatever the fixed panes leave over
    #[default]
    Grow,
}

impl SizeConstraint {
    pub fn is_fixed(&self) -> bool {
        matches!(self, SizeConstraint::Fixed(_))
    }

    pub fn fixed_size(&self) -> Option<u16> {
        match self {
            SizeConstraint::Fixed(n) => Some(*n),
            SizeConstraint::Grow => None,
        }
    }
}

/// What to do with the cells lost to truncating division between flexible panes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RemainderPolicy {
    /// Leave the remainder unassigned
    #[default]
    Discard,
    /// Hand the remainder to the last flexible pane
    LastFlexible,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConstraintParseError {
    #[error("Empty size constraint")]
    Empty,

    #[error("Invalid fixed size {input:?}: {source}")]
    InvalidSize {
        input: String,
        #[source]
        source: ParseIntError,
    },
}

impl FromStr for SizeConstraint {
    type Err = ConstraintParseError;

    /// Accepts `grow`, `*`, `30`, or `fixed:30` (case-insensitive, surrounding
    /// whitespace ignored)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ConstraintParseError::Empty);
        }
        let lower = trimmed.to_ascii_lowercase();
        if lower == "grow" || lower == "*" {
            return Ok(SizeConstraint::Grow);
        }
        let digits = lower.strip_prefix("fixed:").unwrap_or(&lower).trim();
        digits
            .parse::<u16>()
            .map(SizeConstraint::Fixed)
            .map_err(|source| ConstraintParseError::InvalidSize {
                input: trimmed.to_string(),
                source,
            })
    }
}

impl TryFrom<String> for SizeConstraint {
    type Error = ConstraintParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SizeConstraint> for String {
    fn from(value: SizeConstraint) -> Self {
        value.to_string()
    }
}

impl fmt::Display for SizeConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeConstraint::Fixed(n) => write!(f, "{}", n),
            SizeConstraint::Grow => f.write_str("grow"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_constraint_spellings() {
        assert_eq!("grow".parse(), Ok(SizeConstraint::Grow));
        assert_eq!(" * ".parse(), Ok(SizeConstraint::Grow));
        assert_eq!("30".parse(), Ok(SizeConstraint::Fixed(30)));
        assert_eq!("Fixed:12".parse(), Ok(SizeConstraint::Fixed(12)));
    }

    #[test]
    fn rejects_bad_constraints() {
        assert_eq!("".parse::<SizeConstraint>(), Err(ConstraintParseError::Empty));
        assert!(matches!(
            "wide".parse::<SizeConstraint>(),
            Err(ConstraintParseError::InvalidSize { .. })
        ));
        assert!("-3".parse::<SizeConstraint>().is_err());
    }

    #[test]
    fn display_parses_back() {
        for c in [SizeConstraint::Grow, SizeConstraint::Fixed(7)] {
            assert_eq!(c.to_string().parse(), Ok(c));
        }
    }

    #[test]
    fn alignment_offsets() {
        assert_eq!(Alignment::Start.offset(10, 4), 0);
        assert_eq!(Alignment::Center.offset(10, 4), 3);
        assert_eq!(Alignment::End.offset(10, 4), 6);
        assert_eq!(Alignment::End.offset(4, 10), 0);
    }

    #[test]
    fn cross_axis_flips() {
        assert_eq!(Direction::Horizontal.cross(), Direction::Vertical);
        assert_eq!(Direction::Vertical.main_of(80, 24), 24);
    }
}
