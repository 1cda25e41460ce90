// ABOUTME: Flex layout engine arranging panes along one axis.
// ABOUTME: Recomputes pane geometry on resize and composites pane output.

use fp_core::{Alignment, Direction, RemainderPolicy, SizeConstraint};

use crate::container::{Container, Positioned};
use crate::event::{Commands, Event};
use crate::place::{join_horizontal, join_vertical, place, place_at, Background, Block};
use crate::solver::{live_slots, solve, Frame, Rect, Slot};

/// A pane slot; `None` keeps the position without taking part in layout
pub type Pane = Option<Box<dyn Container>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutState {
    /// Width or height is zero; panes keep whatever geometry they last had
    Uninitialized,
    Sized,
}

/// Panes arranged along one axis: fixed panes get their requested size and
/// growing panes split what remains.
///
/// The layout owns its panes and writes each pane's size (and position, for
/// panes that are [`Positioned`]) back into it whenever it recomputes.
pub struct FlexLayout {
    width: u16,
    height: u16,
    direction: Direction,
    remainder: RemainderPolicy,
    panes: Vec<Pane>,
    sizes: Vec<SizeConstraint>,
    background: Background,
    // Placement of this layout when nested inside another
    alignment: Alignment,
    max_width: u16,
    x: u16,
    y: u16,
}

impl FlexLayout {
    pub fn new() -> Self {
        Self {
            width: 0,
            height: 0,
            direction: Direction::Horizontal,
            remainder: RemainderPolicy::Discard,
            panes: Vec::new(),
            sizes: Vec::new(),
            background: Background::default(),
            alignment: Alignment::Start,
            max_width: 0,
            x: 0,
            y: 0,
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_panes(mut self, panes: impl IntoIterator<Item = Pane>) -> Self {
        self.panes = panes.into_iter().collect();
        self
    }

    pub fn with_pane_sizes(mut self, sizes: impl IntoIterator<Item = SizeConstraint>) -> Self {
        self.sizes = sizes.into_iter().collect();
        self
    }

    pub fn with_remainder(mut self, remainder: RemainderPolicy) -> Self {
        self.remainder = remainder;
        self
    }

    pub fn with_background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }

    /// Cross-axis placement used when this layout is itself a pane
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_max_width(mut self, max_width: u16) -> Self {
        self.max_width = max_width;
        self
    }

    pub fn state(&self) -> LayoutState {
        if self.width > 0 && self.height > 0 {
            LayoutState::Sized
        } else {
            LayoutState::Uninitialized
        }
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pane_sizes(&self) -> &[SizeConstraint] {
        &self.sizes
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    /// Resize the layout and recompute every pane's geometry.
    ///
    /// A zero dimension leaves the layout uninitialized and pane geometry
    /// untouched.
    pub fn set_size(&mut self, width: u16, height: u16) -> Commands {
        self.width = width;
        self.height = height;
        self.recompute()
    }

    pub fn set_panes(&mut self, panes: impl IntoIterator<Item = Pane>) -> Commands {
        self.panes = panes.into_iter().collect();
        self.recompute_if_sized()
    }

    pub fn set_pane_sizes(&mut self, sizes: impl IntoIterator<Item = SizeConstraint>) -> Commands {
        self.sizes = sizes.into_iter().collect();
        self.recompute_if_sized()
    }

    pub fn set_direction(&mut self, direction: Direction) -> Commands {
        self.direction = direction;
        self.recompute_if_sized()
    }

    pub fn set_remainder(&mut self, remainder: RemainderPolicy) -> Commands {
        self.remainder = remainder;
        self.recompute_if_sized()
    }

    pub fn set_background(&mut self, background: Background) {
        self.background = background;
    }

    pub fn len(&self) -> usize {
        self.panes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panes.is_empty()
    }

    pub fn pane(&self, index: usize) -> Option<&dyn Container> {
        self.panes.get(index)?.as_deref()
    }

    pub fn pane_mut(&mut self, index: usize) -> Option<&mut (dyn Container + 'static)> {
        self.panes.get_mut(index)?.as_deref_mut()
    }

    pub fn panes(&self) -> &[Pane] {
        &self.panes
    }

    /// Remove every pane, handing ownership back to the caller
    pub fn take_panes(&mut self) -> Vec<Pane> {
        std::mem::take(&mut self.panes)
    }

    /// Geometry each slot would get at the current size, `None` for absent panes
    pub fn geometry(&self) -> Vec<Option<Rect>> {
        solve(self.frame(), &self.slots())
    }

    /// Size of the pane at `index`; zero for absent or out-of-range panes
    pub fn pane_size(&self, index: usize) -> (u16, u16) {
        match self.panes.get(index) {
            Some(Some(_)) => self
                .geometry()
                .get(index)
                .copied()
                .flatten()
                .map_or((0, 0), |r| r.size()),
            _ => (0, 0),
        }
    }

    pub fn init(&mut self) -> Commands {
        self.panes.iter_mut().flatten().map(|p| p.init()).collect()
    }

    /// Handle an event: resizes are applied here, anything else goes to every pane
    pub fn update(&mut self, event: &Event) -> Commands {
        if let Event::Resize { width, height } = *event {
            return self.set_size(width, height);
        }
        self.panes
            .iter_mut()
            .flatten()
            .map(|p| p.update(event))
            .collect()
    }

    /// Composite every live pane into one string
    pub fn view(&self) -> String {
        self.render().render()
    }

    fn render(&self) -> Block {
        let geometry = self.geometry();
        let blocks: Vec<Block> = self
            .panes
            .iter()
            .zip(geometry)
            .filter_map(|(pane, rect)| Some((pane.as_deref()?, rect?)))
            .map(|(pane, rect)| self.place_pane(pane, rect))
            .collect();

        match self.direction {
            Direction::Horizontal => join_horizontal(&blocks, &self.background),
            Direction::Vertical => join_vertical(&blocks, Alignment::Center, &self.background),
        }
    }

    /// Block covering `rect` with the pane's output drawn where the pane sits.
    ///
    /// Horizontal slots place the output by the pane's alignment and center it
    /// vertically. Vertical slots draw it at the solver's x origin, inside a
    /// region capped at the pane's max width, so the rendered column matches
    /// the position written back to the pane.
    fn place_pane(&self, pane: &dyn Container, rect: Rect) -> Block {
        let bg = &self.background;
        match self.direction {
            Direction::Horizontal => place(
                rect.width,
                rect.height,
                pane.alignment(),
                Alignment::Center,
                &pane.view(),
                bg,
            ),
            Direction::Vertical => {
                let content = match pane.max_width() {
                    0 => rect.width,
                    max => rect.width.min(max),
                };
                let region = place(
                    content,
                    rect.height,
                    Alignment::Start,
                    Alignment::Start,
                    &pane.view(),
                    bg,
                );
                place_at(rect.x, rect.width, &region, bg)
            }
        }
    }

    fn frame(&self) -> Frame {
        Frame {
            width: self.width,
            height: self.height,
            direction: self.direction,
            remainder: self.remainder,
        }
    }

    fn slots(&self) -> Vec<Option<Slot>> {
        live_slots(&self.panes, &self.sizes, |p| (p.alignment(), p.max_width()))
    }

    fn recompute_if_sized(&mut self) -> Commands {
        match self.state() {
            LayoutState::Sized => self.recompute(),
            LayoutState::Uninitialized => Commands::none(),
        }
    }

    fn recompute(&mut self) -> Commands {
        if self.state() == LayoutState::Uninitialized {
            tracing::debug!(
                "Skipping layout for {}x{} surface",
                self.width,
                self.height
            );
            return Commands::none();
        }

        let geometry = self.geometry();
        tracing::debug!(
            "Laying out {} of {} panes {:?} in {}x{}",
            geometry.iter().flatten().count(),
            self.panes.len(),
            self.direction,
            self.width,
            self.height
        );

        let mut cmds = Commands::none();
        for (index, (pane, rect)) in self.panes.iter_mut().zip(geometry).enumerate() {
            let (Some(pane), Some(rect)) = (pane.as_deref_mut(), rect) else {
                continue;
            };
            tracing::trace!("Pane {} -> {:?}", index, rect);
            if let Some(positioned) = pane.as_positioned_mut() {
                positioned.set_position(rect.x, rect.y);
            }
            cmds.extend(pane.set_size(rect.width, rect.height));
        }
        cmds
    }
}

/// Box a container into a live pane slot
pub fn boxed<C: Container + 'static>(container: C) -> Pane {
    Some(Box::new(container))
}

impl Default for FlexLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl Container for FlexLayout {
    fn init(&mut self) -> Commands {
        FlexLayout::init(self)
    }

    fn update(&mut self, event: &Event) -> Commands {
        FlexLayout::update(self, event)
    }

    fn view(&self) -> String {
        FlexLayout::view(self)
    }

    fn set_size(&mut self, width: u16, height: u16) -> Commands {
        FlexLayout::set_size(self, width, height)
    }

    fn size(&self) -> (u16, u16) {
        FlexLayout::size(self)
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

impl Positioned for FlexLayout {
    fn set_position(&mut self, x: u16, y: u16) {
        self.x = x;
        self.y = y;
    }

    fn position(&self) -> (u16, u16) {
        (self.x, self.y)
    }
}
