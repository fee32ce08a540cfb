use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Set of screen edges a swipe may start from. Empty means none.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct EdgeFlags: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
    }
}

/// A single edge. Once a drag is captured it is tracked from exactly one of these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    Left,
    Right,
}

impl Edge {
    /// `Some` only when `flags` names exactly one edge.
    pub fn from_flags(flags: EdgeFlags) -> Option<Edge> {
        if flags == EdgeFlags::LEFT {
            Some(Edge::Left)
        } else if flags == EdgeFlags::RIGHT {
            Some(Edge::Right)
        } else {
            None
        }
    }

    pub fn flag(self) -> EdgeFlags {
        match self {
            Edge::Left => EdgeFlags::LEFT,
            Edge::Right => EdgeFlags::RIGHT,
        }
    }

    /// Direction content travels when dismissed from this edge.
    pub fn sign(self) -> f32 {
        match self {
            Edge::Left => 1.0,
            Edge::Right => -1.0,
        }
    }
}

impl From<Edge> for EdgeFlags {
    fn from(edge: Edge) -> Self {
        edge.flag()
    }
}

/// Which edge the current gesture belongs to.
///
/// `Probing` is the capture-test phase: no edge is decided yet and clamping
/// has to look at which enabled edge strip is being touched. `Locked` is set
/// once per session, on capture or on a programmatic dismiss, and cleared
/// when the drag engine returns to idle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EdgeTracking {
    #[default]
    Probing,
    Locked(Edge),
}

impl EdgeTracking {
    pub fn locked(self) -> Option<Edge> {
        match self {
            EdgeTracking::Probing => None,
            EdgeTracking::Locked(edge) => Some(edge),
        }
    }
}
