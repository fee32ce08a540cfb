use crate::{Color, Rect};

pub type ViewId = u64;

/// Which side of the content a shadow image sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShadowSide {
    Left,
    Right,
}

/// Flat list of draw commands produced by a layout pass.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub nodes: Vec<SceneNode>,
}

impl Scene {
    pub fn push(&mut self, node: SceneNode) {
        self.nodes.push(node);
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SceneNode {
    Rect {
        rect: Rect,
        color: Color,
    },
    /// A child view the host draws itself, positioned at `rect`.
    Child {
        id: ViewId,
        rect: Rect,
        background: Option<Color>,
    },
    /// Directional edge shadow image.
    Shadow {
        side: ShadowSide,
        rect: Rect,
        alpha: u8,
    },
    PushClip {
        rect: Rect,
    },
    PopClip,
}
