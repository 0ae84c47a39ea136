use crate::foundation::core::{Point, Size};

/// How a node describes the box children should measure themselves against.
///
/// Scenes and sprites carry an explicit anchor point and size. Every other
/// node only has a frame, so its anchor is assumed to be the center.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub enum ReferenceBounds {
    /// A root scene with its own anchor and size.
    Scene {
        /// Normalized anchor point.
        anchor: Point,
        /// Scene size in points.
        size: Size,
    },
    /// A bounded sprite with its own anchor and size.
    Sprite {
        /// Normalized anchor point.
        anchor: Point,
        /// Sprite size in points.
        size: Size,
    },
    /// Any other node, measured by its raw frame.
    Frame {
        /// Frame size in points.
        size: Size,
    },
}

impl ReferenceBounds {
    /// Anchor assumed for nodes that do not declare one.
    pub const CENTER_ANCHOR: Point = Point::new(0.5, 0.5);

    pub fn anchor(&self) -> Point {
        match self {
            Self::Scene { anchor, .. } | Self::Sprite { anchor, .. } => *anchor,
            Self::Frame { .. } => Self::CENTER_ANCHOR,
        }
    }

    pub fn size(&self) -> Size {
        match self {
            Self::Scene { size, .. } | Self::Sprite { size, .. } | Self::Frame { size } => *size,
        }
    }
}
