use std::{
    cell::RefCell,
    fmt,
    rc::{Rc, Weak},
};

use crate::{
    animation::action::{Action, ActionRunner},
    foundation::core::{Point, Rect, Rgba8, Size, Vec2},
    foundation::error::{ToastError, ToastResult},
    scene::bounds::ReferenceBounds,
};

/// Average glyph advance as a fraction of the font size, used to estimate label extents.
const GLYPH_ADVANCE_EM: f64 = 0.5;

/// Font used by label nodes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Font {
    /// Font family / face name.
    pub name: String,
    /// Point size.
    pub size: f64,
    /// Fill color.
    pub color: Rgba8,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            name: "Helvetica".to_string(),
            size: 32.0,
            color: Rgba8::new(255, 255, 255, 255),
        }
    }
}

/// What a node is, and the attributes only that kind carries.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub enum NodeKind {
    /// Root of a presented tree.
    Scene {
        /// Scene size in points.
        size: Size,
        /// Normalized anchor; (0, 0) puts the origin at the lower left.
        anchor: Point,
        /// Clear color.
        background: Rgba8,
    },
    /// Colored rectangle.
    Sprite {
        /// Sprite size in points.
        size: Size,
        /// Normalized anchor relative to `position`.
        anchor: Point,
        /// Fill color.
        color: Rgba8,
    },
    /// Single line of text centered on the node position.
    Label {
        /// Displayed text, if any.
        text: Option<String>,
        /// Font attributes.
        font: Font,
    },
    /// Plain grouping node with no extent of its own.
    Container,
}

impl NodeKind {
    fn tag(&self) -> &'static str {
        match self {
            Self::Scene { .. } => "scene",
            Self::Sprite { .. } => "sprite",
            Self::Label { .. } => "label",
            Self::Container => "container",
        }
    }
}

struct NodeData {
    name: Option<String>,
    kind: NodeKind,
    position: Point,
    z_position: f64,
    alpha: f64,
    parent: WeakNode,
    children: Vec<Node>,
    actions: ActionRunner,
}

/// Shared handle to a scene-graph node.
///
/// Parents own their children; a child only holds a weak link back to its
/// parent. Cloning a `Node` clones the handle, not the node.
#[derive(Clone)]
pub struct Node(Rc<RefCell<NodeData>>);

/// Non-owning reference to a [`Node`]. Never keeps the node alive.
#[derive(Clone, Default)]
pub struct WeakNode(Weak<RefCell<NodeData>>);

impl WeakNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upgrade(&self) -> Option<Node> {
        self.0.upgrade().map(Node)
    }

    /// Whether the referenced node still exists.
    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }
}

impl fmt::Debug for WeakNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upgrade() {
            Some(node) => f.debug_tuple("WeakNode").field(&node).finish(),
            None => f.write_str("WeakNode(<gone>)"),
        }
    }
}

impl Node {
    fn with_kind(kind: NodeKind) -> Self {
        Self(Rc::new(RefCell::new(NodeData {
            name: None,
            kind,
            position: Point::ZERO,
            z_position: 0.0,
            alpha: 1.0,
            parent: WeakNode::new(),
            children: Vec::new(),
            actions: ActionRunner::default(),
        })))
    }

    /// Scene of the given size, anchored at its lower-left corner.
    pub fn scene(size: Size) -> Self {
        Self::with_kind(NodeKind::Scene {
            size,
            anchor: Point::ZERO,
            background: Rgba8::gray(0.15, 1.0),
        })
    }

    /// Sprite centered on its position.
    pub fn sprite(color: Rgba8, size: Size) -> Self {
        Self::with_kind(NodeKind::Sprite {
            size,
            anchor: ReferenceBounds::CENTER_ANCHOR,
            color,
        })
    }

    pub fn label(text: Option<String>, font: Font) -> Self {
        Self::with_kind(NodeKind::Label { text, font })
    }

    pub fn container() -> Self {
        Self::with_kind(NodeKind::Container)
    }

    pub fn downgrade(&self) -> WeakNode {
        WeakNode(Rc::downgrade(&self.0))
    }

    /// Handle identity: true when both handles point at the same node.
    pub fn ptr_eq(&self, other: &Node) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn kind(&self) -> NodeKind {
        self.0.borrow().kind.clone()
    }

    pub fn name(&self) -> Option<String> {
        self.0.borrow().name.clone()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.0.borrow_mut().name = Some(name.into());
    }

    pub fn position(&self) -> Point {
        self.0.borrow().position
    }

    pub fn set_position(&self, position: Point) {
        self.0.borrow_mut().position = position;
    }

    pub fn z_position(&self) -> f64 {
        self.0.borrow().z_position
    }

    pub fn set_z_position(&self, z: f64) {
        self.0.borrow_mut().z_position = z;
    }

    pub fn alpha(&self) -> f64 {
        self.0.borrow().alpha
    }

    pub fn set_alpha(&self, alpha: f64) {
        self.0.borrow_mut().alpha = alpha.clamp(0.0, 1.0);
    }

    /// Size of scenes and sprites; `None` for kinds without an explicit size.
    pub fn size(&self) -> Option<Size> {
        match &self.0.borrow().kind {
            NodeKind::Scene { size, .. } | NodeKind::Sprite { size, .. } => Some(*size),
            NodeKind::Label { .. } | NodeKind::Container => None,
        }
    }

    pub fn set_size(&self, new_size: Size) -> ToastResult<()> {
        let mut data = self.0.borrow_mut();
        match &mut data.kind {
            NodeKind::Scene { size, .. } | NodeKind::Sprite { size, .. } => {
                *size = new_size;
                Ok(())
            }
            other => Err(ToastError::validation(format!(
                "{} nodes have no size",
                other.tag()
            ))),
        }
    }

    pub fn anchor_point(&self) -> Option<Point> {
        match &self.0.borrow().kind {
            NodeKind::Scene { anchor, .. } | NodeKind::Sprite { anchor, .. } => Some(*anchor),
            NodeKind::Label { .. } | NodeKind::Container => None,
        }
    }

    pub fn set_anchor_point(&self, new_anchor: Point) -> ToastResult<()> {
        let mut data = self.0.borrow_mut();
        match &mut data.kind {
            NodeKind::Scene { anchor, .. } | NodeKind::Sprite { anchor, .. } => {
                *anchor = new_anchor;
                Ok(())
            }
            other => Err(ToastError::validation(format!(
                "{} nodes have no anchor point",
                other.tag()
            ))),
        }
    }

    /// Sprite fill or scene background.
    pub fn color(&self) -> Option<Rgba8> {
        match &self.0.borrow().kind {
            NodeKind::Scene { background, .. } => Some(*background),
            NodeKind::Sprite { color, .. } => Some(*color),
            NodeKind::Label { font, .. } => Some(font.color),
            NodeKind::Container => None,
        }
    }

    pub fn set_color(&self, new_color: Rgba8) -> ToastResult<()> {
        let mut data = self.0.borrow_mut();
        match &mut data.kind {
            NodeKind::Scene { background, .. } => *background = new_color,
            NodeKind::Sprite { color, .. } => *color = new_color,
            NodeKind::Label { font, .. } => font.color = new_color,
            NodeKind::Container => {
                return Err(ToastError::validation("container nodes have no color"));
            }
        }
        Ok(())
    }

    /// Label text; `None` for non-labels and labels without text.
    pub fn text(&self) -> Option<String> {
        match &self.0.borrow().kind {
            NodeKind::Label { text, .. } => text.clone(),
            _ => None,
        }
    }

    pub fn set_text(&self, new_text: Option<String>) -> ToastResult<()> {
        let mut data = self.0.borrow_mut();
        match &mut data.kind {
            NodeKind::Label { text, .. } => {
                *text = new_text;
                Ok(())
            }
            other => Err(ToastError::validation(format!(
                "{} nodes have no text",
                other.tag()
            ))),
        }
    }

    pub fn font(&self) -> Option<Font> {
        match &self.0.borrow().kind {
            NodeKind::Label { font, .. } => Some(font.clone()),
            _ => None,
        }
    }

    pub fn set_font(&self, new_font: Font) -> ToastResult<()> {
        let mut data = self.0.borrow_mut();
        match &mut data.kind {
            NodeKind::Label { font, .. } => {
                *font = new_font;
                Ok(())
            }
            other => Err(ToastError::validation(format!(
                "{} nodes have no font",
                other.tag()
            ))),
        }
    }

    pub fn parent(&self) -> Option<Node> {
        self.0.borrow().parent.upgrade()
    }

    pub fn is_attached(&self) -> bool {
        self.parent().is_some()
    }

    pub fn children(&self) -> Vec<Node> {
        self.0.borrow().children.clone()
    }

    /// First direct child with the given name.
    pub fn child_named(&self, name: &str) -> Option<Node> {
        self.0
            .borrow()
            .children
            .iter()
            .find(|c| c.0.borrow().name.as_deref() == Some(name))
            .cloned()
    }

    /// Whether `self` is `other` or one of its ancestors.
    fn is_ancestor_of(&self, other: &Node) -> bool {
        let mut cursor = Some(other.clone());
        while let Some(node) = cursor {
            if node.ptr_eq(self) {
                return true;
            }
            cursor = node.parent();
        }
        false
    }

    /// Append `child`, moving it out of any previous parent first.
    pub fn add_child(&self, child: &Node) -> ToastResult<()> {
        if child.is_ancestor_of(self) {
            return Err(ToastError::validation(
                "cannot add a node to itself or to one of its descendants",
            ));
        }
        child.remove_from_parent();
        child.0.borrow_mut().parent = self.downgrade();
        self.0.borrow_mut().children.push(child.clone());
        tracing::debug!(
            parent = self.name().as_deref().unwrap_or("-"),
            child = child.name().as_deref().unwrap_or("-"),
            "attached node"
        );
        Ok(())
    }

    /// Detach from the parent. No-op when already detached.
    pub fn remove_from_parent(&self) {
        let parent = {
            let mut data = self.0.borrow_mut();
            let parent = data.parent.upgrade();
            data.parent = WeakNode::new();
            parent
        };
        if let Some(parent) = parent {
            parent.0.borrow_mut().children.retain(|c| !c.ptr_eq(self));
            tracing::debug!(
                parent = parent.name().as_deref().unwrap_or("-"),
                child = self.name().as_deref().unwrap_or("-"),
                "detached node"
            );
        }
    }

    /// This node followed by all descendants, depth first.
    pub fn descendants(&self) -> Vec<Node> {
        let mut out = Vec::new();
        let mut stack = vec![self.clone()];
        while let Some(node) = stack.pop() {
            stack.extend(node.children().into_iter().rev());
            out.push(node);
        }
        out
    }

    /// Own extent, in the parent's coordinate space.
    pub fn frame(&self) -> Rect {
        let data = self.0.borrow();
        let position = data.position;
        match &data.kind {
            NodeKind::Scene { size, anchor, .. } => Rect::from_origin_size(
                Point::new(-anchor.x * size.width, -anchor.y * size.height),
                *size,
            ),
            NodeKind::Sprite { size, anchor, .. } => Rect::from_origin_size(
                Point::new(
                    position.x - anchor.x * size.width,
                    position.y - anchor.y * size.height,
                ),
                *size,
            ),
            NodeKind::Label { text, font } => {
                let chars = text.as_deref().map_or(0, |t| t.chars().count());
                if chars == 0 {
                    return Rect::from_origin_size(position, Size::ZERO);
                }
                let size = Size::new(chars as f64 * font.size * GLYPH_ADVANCE_EM, font.size);
                Rect::from_center_size(position, size)
            }
            NodeKind::Container => Rect::from_origin_size(position, Size::ZERO),
        }
    }

    /// Bounding box of this node and every descendant, in the parent's space.
    ///
    /// Frames with zero width or height do not contribute. When nothing
    /// contributes, a zero-size rectangle at the node position is returned.
    pub fn calculate_accumulated_frame(&self) -> Rect {
        self.accumulated()
            .unwrap_or_else(|| Rect::from_origin_size(self.position(), Size::ZERO))
    }

    fn accumulated(&self) -> Option<Rect> {
        fn has_area(r: &Rect) -> bool {
            r.width() != 0.0 && r.height() != 0.0
        }

        let own = self.frame();
        let mut acc = has_area(&own).then_some(own);
        let offset = match self.0.borrow().kind {
            // Scene children live in scene space already.
            NodeKind::Scene { .. } => Vec2::ZERO,
            _ => self.position().to_vec2(),
        };
        for child in self.children() {
            if let Some(r) = child.accumulated() {
                let r = r + offset;
                acc = Some(acc.map_or(r, |a| a.union(r)));
            }
        }
        acc
    }

    /// Anchor/size pair children should lay themselves out against.
    pub fn reference_bounds(&self) -> ReferenceBounds {
        match self.kind() {
            NodeKind::Scene { size, anchor, .. } => ReferenceBounds::Scene { anchor, size },
            NodeKind::Sprite { size, anchor, .. } => ReferenceBounds::Sprite { anchor, size },
            NodeKind::Label { .. } | NodeKind::Container => ReferenceBounds::Frame {
                size: self.frame().size(),
            },
        }
    }

    pub fn run_action(&self, action: Action) {
        self.0.borrow_mut().actions.run(action, None);
    }

    /// Run `action` under `key`, replacing whatever was running under that key.
    pub fn run_action_with_key(&self, action: Action, key: &str) {
        self.0.borrow_mut().actions.run(action, Some(key));
    }

    pub fn remove_action(&self, key: &str) -> bool {
        self.0.borrow_mut().actions.remove(key)
    }

    pub fn remove_all_actions(&self) {
        self.0.borrow_mut().actions.clear();
    }

    pub fn has_action(&self, key: &str) -> bool {
        self.0.borrow().actions.contains(key)
    }

    pub fn action_count(&self) -> usize {
        self.0.borrow().actions.len()
    }

    /// Advance this node's actions by `dt` seconds (descendants are not touched).
    pub fn advance_actions(&self, dt: f64) {
        let fired = {
            let mut data = self.0.borrow_mut();
            if data.actions.is_empty() {
                return;
            }
            let NodeData { actions, alpha, .. } = &mut *data;
            actions.advance(dt, alpha)
        };
        for callback in fired {
            callback();
        }
    }

    /// Serializable view of the subtree rooted here.
    pub fn snapshot(&self) -> NodeSnapshot {
        let data = self.0.borrow();
        let (size, text) = match &data.kind {
            NodeKind::Scene { size, .. } | NodeKind::Sprite { size, .. } => (Some(*size), None),
            NodeKind::Label { text, .. } => (None, text.clone()),
            NodeKind::Container => (None, None),
        };
        NodeSnapshot {
            name: data.name.clone(),
            kind: data.kind.tag(),
            position: data.position,
            size,
            z_position: data.z_position,
            alpha: data.alpha,
            text,
            children: data.children.iter().map(Node::snapshot).collect(),
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0.borrow();
        f.debug_struct("Node")
            .field("name", &data.name)
            .field("kind", &data.kind.tag())
            .field("position", &data.position)
            .field("children", &data.children.len())
            .finish()
    }
}

/// Point-in-time copy of a node subtree, for logging and JSON output.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct NodeSnapshot {
    /// Node name, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `scene`, `sprite`, `label` or `container`.
    pub kind: &'static str,
    /// Position in the parent's space.
    pub position: Point,
    /// Size for scenes and sprites.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    /// Render order relative to siblings.
    pub z_position: f64,
    /// Opacity in `[0, 1]`.
    pub alpha: f64,
    /// Label text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Child snapshots in insertion order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSnapshot>,
}

#[cfg(test)]
#[path = "../../tests/unit/scene/node.rs"]
mod tests;
