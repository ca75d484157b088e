//! Tiers of a lineage layout and their connector geometry.
//!
//! Horizontal positions are expressed in half-column units: column `c` covers
//! the half-units `2c..2c + 2`. A cell starting at column `s` and spanning `w`
//! columns has its center at half-unit `2s + w`, which is always an integer,
//! so drops and bus ends never fall between grid lines.

use std::ops::Range;

use crate::lineage::LineageNode;

/// Which band of the diagram a tier belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TierKind {
    Parents,
    Partners,
    Children,
}

impl TierKind {
    /// Caption drawn between the connector segments leading into the tier.
    pub fn label(self) -> &'static str {
        match self {
            Self::Parents => "PARENTS",
            Self::Partners => "PARTNER",
            Self::Children => "CHILD",
        }
    }
}

/// Position of a cell on its tier's horizontal bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusRole {
    /// Sole cell of the tier: one vertical connector, no bus.
    Only,
    /// Bus covers the right half of the span.
    First,
    /// Bus covers the whole span.
    Middle,
    /// Bus covers the left half of the span.
    Last,
}

impl BusRole {
    /// Role of the cell at `index` in a tier of `len` cells.
    pub fn for_position(index: usize, len: usize) -> Self {
        match (index, len) {
            (_, 0 | 1) => Self::Only,
            (0, _) => Self::First,
            (i, n) if i + 1 == n => Self::Last,
            _ => Self::Middle,
        }
    }

    pub fn has_left_half(self) -> bool {
        matches!(self, Self::Middle | Self::Last)
    }

    pub fn has_right_half(self) -> bool {
        matches!(self, Self::First | Self::Middle)
    }
}

/// A node placed on the column grid.
#[derive(Debug, Clone, PartialEq)]
pub struct TierCell<'a> {
    node: LineageNode<'a>,
    column_start: usize,
    column_span: usize,
    role: BusRole,
}

impl<'a> TierCell<'a> {
    pub fn node(&self) -> &LineageNode<'a> {
        &self.node
    }

    pub fn column_start(&self) -> usize {
        self.column_start
    }

    pub fn column_span(&self) -> usize {
        self.column_span
    }

    pub fn role(&self) -> BusRole {
        self.role
    }

    /// Left edge in half-column units.
    pub fn start_half(&self) -> usize {
        2 * self.column_start
    }

    /// Right edge (exclusive) in half-column units.
    pub fn end_half(&self) -> usize {
        2 * (self.column_start + self.column_span)
    }

    /// Horizontal center in half-column units; the drop sits here.
    pub fn center(&self) -> usize {
        2 * self.column_start + self.column_span
    }

    /// Bus segment over the left half of the span, if the role has one.
    pub fn left_bus(&self) -> Option<Range<usize>> {
        self.role
            .has_left_half()
            .then(|| self.start_half()..self.center())
    }

    /// Bus segment over the right half of the span, if the role has one.
    pub fn right_bus(&self) -> Option<Range<usize>> {
        self.role
            .has_right_half()
            .then(|| self.center()..self.end_half())
    }
}

/// Partner or child band: cells laid side by side across the full width.
#[derive(Debug, Clone, PartialEq)]
pub struct Tier<'a> {
    kind: TierKind,
    cells: Vec<TierCell<'a>>,
}

impl<'a> Tier<'a> {
    /// Partitions `column_count` columns among `nodes`, keeping their order.
    ///
    /// Returns `None` for an empty node list. Cell `i` starts at column
    /// `i * column_count / n`, so spans are equal whenever `n` divides
    /// `column_count` and otherwise differ by at most one column.
    pub(crate) fn new(
        kind: TierKind,
        nodes: Vec<LineageNode<'a>>,
        column_count: usize,
    ) -> Option<Self> {
        if nodes.is_empty() {
            return None;
        }

        let len = nodes.len();
        let boundary = |i: usize| i * column_count / len;
        let cells = nodes
            .into_iter()
            .enumerate()
            .map(|(index, node)| TierCell {
                node,
                column_start: boundary(index),
                column_span: boundary(index + 1) - boundary(index),
                role: BusRole::for_position(index, len),
            })
            .collect();

        Some(Self { kind, cells })
    }

    pub fn kind(&self) -> TierKind {
        self.kind
    }

    pub fn cells(&self) -> &[TierCell<'a>] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether the cells are joined by a horizontal bus.
    pub fn has_bus(&self) -> bool {
        self.cells.len() > 1
    }

    /// Full extent of the bus, from the first drop to the last.
    pub fn bus(&self) -> Option<Range<usize>> {
        match self.cells.as_slice() {
            [first, .., last] => Some(first.center()..last.center()),
            _ => None,
        }
    }

    /// Drop positions in half-column units, one per cell.
    pub fn drops(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells.iter().map(TierCell::center)
    }
}

/// Parents band: all parents in one centered block over the full width.
#[derive(Debug, Clone, PartialEq)]
pub struct ParentBlock<'a> {
    nodes: Vec<LineageNode<'a>>,
    column_span: usize,
}

impl<'a> ParentBlock<'a> {
    pub(crate) fn new(nodes: Vec<LineageNode<'a>>, column_count: usize) -> Option<Self> {
        (!nodes.is_empty()).then_some(Self {
            nodes,
            column_span: column_count,
        })
    }

    pub fn kind(&self) -> TierKind {
        TierKind::Parents
    }

    pub fn nodes(&self) -> &[LineageNode<'a>] {
        &self.nodes
    }

    pub fn column_span(&self) -> usize {
        self.column_span
    }

    /// Horizontal center in half-column units.
    pub fn center(&self) -> usize {
        self.column_span
    }
}
