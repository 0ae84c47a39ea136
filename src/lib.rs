//! Spritetoast is a toast notification widget for a retained 2D scene graph.
//!
//! The crate carries a small headless scene host (nodes, keyed actions, a
//! resizable view) and builds on it:
//!
//! - [`RectRegion`], a center-origin rectangle value
//! - [`Toast`], a band that lays itself out against a parent, fades in,
//!   stays for a while, fades out and removes itself
//! - [`DemoScene`] and [`DemoController`], a demo scene exercising both
#![forbid(unsafe_code)]

mod foundation;

pub mod animation;
/// Demo scene and headless simulation.
pub mod demo;
pub mod scene;
/// Toast widget and its configuration.
pub mod toast;

pub use crate::foundation::core::{Fps, Point, Rect, Rgba8, Size, Vec2};
pub use crate::foundation::error::{ToastError, ToastResult};
pub use crate::foundation::geometry::RectRegion;

pub use crate::animation::action::{Action, ActionCallback};
pub use crate::animation::ease::Ease;
pub use crate::demo::{DemoConfig, DemoController, DemoScene, SimulationPlan, ToastSample, simulate};
pub use crate::scene::bounds::ReferenceBounds;
pub use crate::scene::node::{Font, Node, NodeKind, NodeSnapshot, WeakNode};
pub use crate::scene::view::{ScaleMode, SceneDelegate, View};
pub use crate::toast::config::{
    ASPECT_LARGE, ASPECT_MEDIUM, ASPECT_SMALL, DEFAULT_DURATION_SECS, FADE_IN_SECS, FADE_OUT_SECS,
    HEIGHT_SCALE, TYPICAL_PLACEMENT, ToastConfig, ToastStyle, size_fraction_for_aspect,
};
pub use crate::toast::widget::{AnimateOutcome, Toast};
