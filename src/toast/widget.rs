use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use crate::{
    animation::action::Action,
    foundation::core::{Point, Rect, Size},
    foundation::error::{ToastError, ToastResult},
    foundation::geometry::RectRegion,
    scene::node::{Node, WeakNode},
    toast::config::{
        DEFAULT_DURATION_SECS, FADE_IN_SECS, FADE_OUT_SECS, HEIGHT_SCALE, TOAST_ACTION_KEY,
        TOAST_NODE_NAME, ToastConfig, Z_OFFSET,
    },
};

const LABEL_NODE_NAME: &str = "toast.label";

/// Result of [`Toast::animate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimateOutcome {
    /// The fade sequence is running.
    Started,
    /// Neither the call nor the label carried any text; nothing changed.
    NoMessage,
    /// Detached with no live previous parent to return to; nothing changed.
    Detached,
}

struct ToastLayout {
    placement: Point,
    size_fraction: Size,
    duration_secs: Option<f64>,
    accumulated_frame: Option<Rect>,
    previous_parent: WeakNode,
}

impl ToastLayout {
    /// Parent subtree bounds, computed on first use and then reused.
    fn fallback_frame(&mut self, parent: &Node) -> Rect {
        *self
            .accumulated_frame
            .get_or_insert_with(|| parent.calculate_accumulated_frame())
    }
}

struct ToastInner {
    node: Node,
    label: Node,
    layout: RefCell<ToastLayout>,
}

/// A transient notification band.
///
/// The toast is a sprite holding a single label. It sizes and positions
/// itself as a fraction of a reference parent's bounds, fades in, stays for
/// its display duration, fades out, then removes itself from the graph while
/// remembering (weakly) where it was so it can be shown again.
///
/// `Toast` is a cheap handle; clones share the same widget.
#[derive(Clone)]
pub struct Toast {
    inner: Rc<ToastInner>,
}

impl Toast {
    fn build(config: &ToastConfig) -> ToastResult<Self> {
        let node = Node::sprite(config.style.background, Size::ZERO);
        node.set_name(TOAST_NODE_NAME);
        node.set_alpha(0.0);

        let label = Node::label(None, config.style.font.clone());
        label.set_name(LABEL_NODE_NAME);
        label.set_z_position(1.0);
        node.add_child(&label)?;

        Ok(Self {
            inner: Rc::new(ToastInner {
                node,
                label,
                layout: RefCell::new(ToastLayout {
                    placement: config.placement,
                    size_fraction: config.size_fraction,
                    duration_secs: Some(config.duration_or_default()),
                    accumulated_frame: None,
                    previous_parent: WeakNode::new(),
                }),
            }),
        })
    }

    /// Attach a new, fully transparent toast to `parent` and lay it out.
    ///
    /// The toast does not animate until [`Toast::animate`] is called.
    pub fn make(parent: &Node, duration_secs: Option<f64>) -> ToastResult<Self> {
        let config = ToastConfig {
            duration_secs: Some(duration_secs.unwrap_or(DEFAULT_DURATION_SECS)),
            ..ToastConfig::default()
        };
        Self::make_with_config(parent, &config)
    }

    pub fn make_with_message(
        parent: &Node,
        message: &str,
        duration_secs: Option<f64>,
    ) -> ToastResult<Self> {
        let toast = Self::make(parent, duration_secs)?;
        toast.inner.label.set_text(Some(message.to_owned()))?;
        Ok(toast)
    }

    pub fn make_with_config(parent: &Node, config: &ToastConfig) -> ToastResult<Self> {
        config.validate()?;
        let toast = Self::build(config)?;
        let node = &toast.inner.node;
        node.set_z_position(parent.z_position() + Z_OFFSET);
        parent.add_child(node)?;
        toast.update_frame(parent)?;
        Ok(toast)
    }

    /// Make a toast carrying `message` and start its fade sequence right away.
    pub fn show(parent: &Node, message: &str, duration_secs: Option<f64>) -> ToastResult<Self> {
        let toast = Self::make_with_message(parent, message, duration_secs)?;
        toast.animate(None)?;
        Ok(toast)
    }

    /// Lay the toast out against an explicit parent anchor and size.
    ///
    /// A non-positive width or height is replaced by the matching dimension
    /// of the parent's accumulated frame. That frame is computed once and
    /// cached; see [`Toast::invalidate_fallback_frame`].
    ///
    /// Fails with [`ToastError::Detached`] when the toast has no parent.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn update_frame_with(
        &self,
        parent_anchor: Point,
        parent_size: Size,
    ) -> ToastResult<RectRegion> {
        let parent = self
            .inner
            .node
            .parent()
            .ok_or_else(|| ToastError::detached("toast layout requires a parent node"))?;

        let (position, size) = {
            let mut layout = self.inner.layout.borrow_mut();
            let width = if parent_size.width > 0.0 {
                parent_size.width
            } else {
                layout.fallback_frame(&parent).width()
            };
            let height = if parent_size.height > 0.0 {
                parent_size.height
            } else {
                layout.fallback_frame(&parent).height()
            };

            let position = Point::new(
                width * (layout.placement.x - parent_anchor.x),
                height * (layout.placement.y - parent_anchor.y),
            );
            let size = Size::new(
                width * layout.size_fraction.width,
                height * layout.size_fraction.height * HEIGHT_SCALE,
            );
            (position, size)
        };

        self.inner.node.set_position(position);
        self.inner.node.set_size(size)?;
        Ok(RectRegion::new(position, size))
    }

    /// Lay the toast out against `reference`, typically its parent.
    ///
    /// Scenes and sprites supply their own anchor and size; any other node
    /// is measured by its frame with a centered anchor. Call this whenever
    /// the reference changes size.
    pub fn update_frame(&self, reference: &Node) -> ToastResult<RectRegion> {
        let bounds = reference.reference_bounds();
        self.update_frame_with(bounds.anchor(), bounds.size())
    }

    /// Remove the toast from its parent, remembering the parent weakly.
    pub fn cancel(&self) {
        let node = &self.inner.node;
        if let Some(parent) = node.parent() {
            self.inner.layout.borrow_mut().previous_parent = parent.downgrade();
        }
        node.remove_from_parent();
    }

    /// Start (or restart) the fade-in, display, fade-out, remove sequence.
    ///
    /// `message` replaces the label text; with `None` or an empty string the
    /// current text is shown again. A running sequence is replaced, never
    /// stacked. A detached toast returns to its previous parent if that
    /// parent still exists.
    pub fn animate(&self, message: Option<&str>) -> ToastResult<AnimateOutcome> {
        let text = match message {
            Some(m) if !m.is_empty() => Some(m.to_owned()),
            _ => self.inner.label.text().filter(|t| !t.is_empty()),
        };
        let Some(text) = text else {
            tracing::info!("no message to display for toast, not showing");
            return Ok(AnimateOutcome::NoMessage);
        };

        let node = &self.inner.node;
        let reattach_to = if node.is_attached() {
            None
        } else {
            let previous = self.inner.layout.borrow().previous_parent.upgrade();
            match previous {
                Some(parent) => Some(parent),
                None => {
                    tracing::debug!("toast has no parent to return to");
                    return Ok(AnimateOutcome::Detached);
                }
            }
        };

        self.inner.label.set_text(Some(text))?;
        if node.remove_action(TOAST_ACTION_KEY) {
            tracing::debug!("replaced running toast sequence");
        }
        if let Some(parent) = reattach_to {
            parent.add_child(node)?;
            self.update_frame(&parent)?;
        }

        let duration = self
            .inner
            .layout
            .borrow()
            .duration_secs
            .unwrap_or(DEFAULT_DURATION_SECS);
        node.run_action_with_key(
            Action::sequence([
                Action::fade_in(FADE_IN_SECS),
                Action::wait(duration),
                Action::fade_out(FADE_OUT_SECS),
                self.finish_action(),
            ]),
            TOAST_ACTION_KEY,
        );
        Ok(AnimateOutcome::Started)
    }

    fn finish_action(&self) -> Action {
        let inner: Weak<ToastInner> = Rc::downgrade(&self.inner);
        let node = self.inner.node.downgrade();
        Action::run(move || match inner.upgrade() {
            Some(inner) => Toast { inner }.cancel(),
            // Every handle is gone; still leave the graph.
            None => {
                if let Some(node) = node.upgrade() {
                    node.remove_from_parent();
                }
            }
        })
    }

    /// The toast sprite itself.
    pub fn node(&self) -> &Node {
        &self.inner.node
    }

    pub fn label(&self) -> &Node {
        &self.inner.label
    }

    pub fn text(&self) -> Option<String> {
        self.inner.label.text()
    }

    pub fn is_attached(&self) -> bool {
        self.inner.node.is_attached()
    }

    /// Whether the fade sequence is still pending on the node.
    pub fn is_animating(&self) -> bool {
        self.inner.node.has_action(TOAST_ACTION_KEY)
    }

    pub fn parent(&self) -> Option<Node> {
        self.inner.node.parent()
    }

    /// Parent recorded by the last [`Toast::cancel`], if it still exists.
    pub fn previous_parent(&self) -> Option<Node> {
        self.inner.layout.borrow().previous_parent.upgrade()
    }

    pub fn position(&self) -> Point {
        self.inner.node.position()
    }

    pub fn size(&self) -> Size {
        self.inner.node.size().unwrap_or(Size::ZERO)
    }

    pub fn alpha(&self) -> f64 {
        self.inner.node.alpha()
    }

    /// Current frame as a center-origin region.
    pub fn region(&self) -> RectRegion {
        RectRegion::new(self.position(), self.size())
    }

    pub fn placement(&self) -> Point {
        self.inner.layout.borrow().placement
    }

    /// Takes effect on the next layout.
    pub fn set_placement(&self, placement: Point) {
        self.inner.layout.borrow_mut().placement = placement;
    }

    pub fn size_fraction(&self) -> Size {
        self.inner.layout.borrow().size_fraction
    }

    /// Takes effect on the next layout.
    pub fn set_size_fraction(&self, size_fraction: Size) {
        self.inner.layout.borrow_mut().size_fraction = size_fraction;
    }

    pub fn duration_secs(&self) -> Option<f64> {
        self.inner.layout.borrow().duration_secs
    }

    /// Takes effect on the next [`Toast::animate`].
    pub fn set_duration_secs(&self, duration_secs: Option<f64>) {
        self.inner.layout.borrow_mut().duration_secs = duration_secs;
    }

    /// Cached fallback bounds, if a layout ever needed them.
    pub fn cached_fallback_frame(&self) -> Option<Rect> {
        self.inner.layout.borrow().accumulated_frame
    }

    /// Seed the fallback bounds used when the parent reports a zero size.
    pub fn set_fallback_frame(&self, frame: Rect) {
        self.inner.layout.borrow_mut().accumulated_frame = Some(frame);
    }

    /// Forget the cached fallback bounds so the next layout measures again.
    pub fn invalidate_fallback_frame(&self) {
        self.inner.layout.borrow_mut().accumulated_frame = None;
    }
}

impl std::fmt::Debug for Toast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Toast")
            .field("text", &self.text())
            .field("attached", &self.is_attached())
            .field("animating", &self.is_animating())
            .field("position", &self.position())
            .field("size", &self.size())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/toast/widget.rs"]
mod tests;
