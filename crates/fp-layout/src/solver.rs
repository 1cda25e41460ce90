// ABOUTME: Sizing and positioning solver for a single-axis pane layout.
// ABOUTME: Fixed panes get their request; flexible panes split what remains.

use fp_core::{Alignment, Direction, RemainderPolicy, SizeConstraint};

/// Rectangle in cell coordinates, relative to the layout's origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn position(&self) -> (u16, u16) {
        (self.x, self.y)
    }
}

/// What the solver needs to know about one live pane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Slot {
    pub constraint: SizeConstraint,
    pub alignment: Alignment,
    pub max_width: u16,
}

impl Slot {
    pub fn new(constraint: SizeConstraint) -> Self {
        Self {
            constraint,
            ..Self::default()
        }
    }

    pub fn aligned(mut self, alignment: Alignment, max_width: u16) -> Self {
        self.alignment = alignment;
        self.max_width = max_width;
        self
    }
}

/// Parameters shared by every slot of one solve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub width: u16,
    pub height: u16,
    pub direction: Direction,
    pub remainder: RemainderPolicy,
}

impl Frame {
    pub fn new(width: u16, height: u16, direction: Direction) -> Self {
        Self {
            width,
            height,
            direction,
            remainder: RemainderPolicy::Discard,
        }
    }
}

/// Pair panes with constraints by position; absent panes become `None`.
///
/// Panes past the end of `sizes` grow. Extra entries in `sizes` are ignored.
pub fn live_slots<P>(
    panes: &[Option<P>],
    sizes: &[SizeConstraint],
    describe: impl Fn(&P) -> (Alignment, u16),
) -> Vec<Option<Slot>> {
    panes
        .iter()
        .enumerate()
        .map(|(i, pane)| {
            pane.as_ref().map(|p| {
                let (alignment, max_width) = describe(p);
                Slot::new(sizes.get(i).copied().unwrap_or_default()).aligned(alignment, max_width)
            })
        })
        .collect()
}

/// Extent of each live slot along the primary axis.
///
/// Flexible slots share `total - fixed` by truncating division; absent slots
/// count toward neither the fixed total nor the flexible denominator.
pub fn primary_extents(
    total: u16,
    slots: &[Option<Slot>],
    remainder: RemainderPolicy,
) -> Vec<Option<u16>> {
    let live = || slots.iter().flatten();
    let total_fixed: u32 = live()
        .filter_map(|s| s.constraint.fixed_size())
        .map(u32::from)
        .sum();
    let flex_count = live().filter(|s| !s.constraint.is_fixed()).count() as u32;

    if total_fixed > u32::from(total) {
        tracing::warn!(
            "Fixed panes request {} cells but only {} are available",
            total_fixed,
            total
        );
    }

    let remaining = u32::from(total).saturating_sub(total_fixed);
    let (share, leftover) = if flex_count > 0 {
        (remaining / flex_count, remaining % flex_count)
    } else {
        (0, 0)
    };
    let last_flexible = slots
        .iter()
        .rposition(|s| matches!(s, Some(slot) if !slot.constraint.is_fixed()));

    slots
        .iter()
        .enumerate()
        .map(|(i, slot)| {
            slot.map(|s| match s.constraint {
                SizeConstraint::Fixed(n) => n,
                SizeConstraint::Grow => {
                    let bonus = match remainder {
                        RemainderPolicy::LastFlexible if Some(i) == last_flexible => leftover,
                        _ => 0,
                    };
                    // share + leftover <= remaining <= total
                    (share + bonus) as u16
                }
            })
        })
        .collect()
}

/// Full geometry for every slot, in slot order.
///
/// Slots are packed contiguously along the primary axis and span the whole
/// cross axis. On a vertical layout the x origin follows each slot's alignment,
/// using its max width (when set) as the content width.
pub fn solve(frame: Frame, slots: &[Option<Slot>]) -> Vec<Option<Rect>> {
    let total = frame.direction.main_of(frame.width, frame.height);
    let extents = primary_extents(total, slots, frame.remainder);

    let mut cursor: u32 = 0;
    slots
        .iter()
        .zip(extents)
        .map(|(slot, extent)| {
            let (slot, extent) = (slot.as_ref()?, extent?);
            let origin = clamp_u16(cursor);
            cursor += u32::from(extent);

            let rect = match frame.direction {
                Direction::Horizontal => Rect::new(origin, 0, extent, frame.height),
                Direction::Vertical => {
                    let width = frame.width;
                    let content = match slot.max_width {
                        0 => width,
                        max => width.min(max),
                    };
                    Rect::new(slot.alignment.offset(frame.width, content), origin, width, extent)
                }
            };
            Some(rect)
        })
        .collect()
}

fn clamp_u16(v: u32) -> u16 {
    u16::try_from(v).unwrap_or(u16::MAX)
}
