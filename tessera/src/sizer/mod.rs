//! Sizers: elements that arrange their children themselves instead of
//! using the generic placement rule of their main box.
//!
//! Every sizer works on a flat list of [`SizerChild`] records gathered from
//! the children's main boxes and returns one layout rect per child, in the
//! same order. The algorithms are pure so they can be tested without a tree.

mod flex;
mod grid;
mod place;

pub use flex::{Flex, FlexDir, FlexWrap};
pub use grid::Grid;
pub use place::Place;

use tessera_wire::{Reader, Result};

use crate::geometry::{Pos, Rect, Size};
use crate::style::{LayoutProps, SizingProps, Spacing};

/// What a sizer needs to know about one child.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizerChild {
    pub pos: Pos,
    pub span: Size,
    pub weight: f32,
    /// Minimum layout size from the resize pass.
    pub min: Size,
}

impl SizerChild {
    pub fn new(sizing: &SizingProps, min: Size) -> Self {
        Self {
            pos: sizing.pos,
            span: sizing.span,
            weight: sizing.weight,
            min,
        }
    }
}

/// The layout strategy of a sizer element.
#[derive(Debug, Clone, PartialEq)]
pub enum Sizer {
    Place(Place),
    Flex(Flex),
    Grid(Grid),
}

impl Sizer {
    pub fn reset(&mut self) {
        match self {
            Sizer::Place(place) => *place = Place::default(),
            Sizer::Flex(flex) => *flex = Flex::default(),
            Sizer::Grid(grid) => *grid = Grid::default(),
        }
    }

    /// Merge the sizer's own masked record.
    pub fn read(&mut self, r: &mut Reader<'_>) -> Result<()> {
        match self {
            Sizer::Place(place) => place.read(r),
            Sizer::Flex(flex) => flex.read(r),
            Sizer::Grid(grid) => grid.read(r),
        }
    }

    /// Content size needed to give every child at least its minimum.
    pub fn min_size(&self, props: &LayoutProps, children: &[SizerChild], max_tracks: usize) -> Size {
        match self {
            Sizer::Place(place) => place.min_size(children),
            Sizer::Flex(flex) => flex.min_size(props, children),
            Sizer::Grid(grid) => grid.min_size(props, children, max_tracks),
        }
    }

    pub fn layout(
        &self,
        props: &LayoutProps,
        children: &[SizerChild],
        rect: Rect,
        max_tracks: usize,
    ) -> Vec<Rect> {
        match self {
            Sizer::Place(place) => place.layout(children, rect),
            Sizer::Flex(flex) => flex.layout(props, children, rect),
            Sizer::Grid(grid) => grid.layout(props, children, rect, max_tracks),
        }
    }
}

/// How leftover space is split among `count` items by a spacing policy.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct Distribution {
    /// Offset before the first item.
    pub lead: f32,
    /// Added to every gap between items.
    pub gap: f32,
    /// Added to every item's size.
    pub grow: f32,
}

pub(crate) fn distribute(spacing: Spacing, extra: f32, count: usize) -> Distribution {
    if extra <= 0.0 || count == 0 {
        return Distribution::default();
    }
    let n = count as f32;
    match spacing {
        Spacing::After => Distribution::default(),
        Spacing::Before => Distribution {
            lead: extra,
            ..Distribution::default()
        },
        Spacing::Outside => Distribution {
            lead: extra / 2.0,
            ..Distribution::default()
        },
        Spacing::Around => {
            let space = extra / n;
            Distribution {
                lead: space / 2.0,
                gap: space,
                grow: 0.0,
            }
        }
        // A single item has no gap to widen, so it stays at the start.
        Spacing::Between if count == 1 => Distribution::default(),
        Spacing::Between => Distribution {
            gap: extra / (n - 1.0),
            ..Distribution::default()
        },
        Spacing::Evenly => {
            let space = extra / (n + 1.0);
            Distribution {
                lead: space,
                gap: space,
                grow: 0.0,
            }
        }
        Spacing::Remove => Distribution {
            grow: extra / n,
            ..Distribution::default()
        },
    }
}
