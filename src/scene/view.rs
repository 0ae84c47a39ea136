use crate::{
    foundation::core::{Fps, Size},
    foundation::error::{ToastError, ToastResult},
    scene::node::{Node, NodeKind, NodeSnapshot},
};

/// Callbacks a presented scene receives from its host view.
pub trait SceneDelegate {
    /// The scene was just presented; build its content here.
    fn did_move_to_view(&mut self, scene: &Node, view_size: Size) -> ToastResult<()>;

    /// The scene size changed (only in [`ScaleMode::ResizeFill`]).
    fn did_change_size(&mut self, _scene: &Node, _old_size: Size) -> ToastResult<()> {
        Ok(())
    }

    /// Called once per frame before actions are advanced.
    fn update(&mut self, _scene: &Node, _current_time: f64) {}
}

/// How a presented scene follows the view size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ScaleMode {
    /// Scene size always equals the view size.
    #[default]
    ResizeFill,
    /// Scene keeps the size it was created with.
    Fixed,
}

/// Host surface that presents one scene and drives it frame by frame.
pub struct View<D> {
    size: Size,
    scale_mode: ScaleMode,
    current_time: f64,
    presented: Option<(Node, D)>,
}

impl<D: SceneDelegate> View<D> {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            scale_mode: ScaleMode::default(),
            current_time: 0.0,
            presented: None,
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn scale_mode(&self) -> ScaleMode {
        self.scale_mode
    }

    pub fn set_scale_mode(&mut self, mode: ScaleMode) {
        self.scale_mode = mode;
    }

    /// Seconds simulated since the current scene was presented.
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn scene(&self) -> Option<&Node> {
        self.presented.as_ref().map(|(scene, _)| scene)
    }

    pub fn delegate(&self) -> Option<&D> {
        self.presented.as_ref().map(|(_, delegate)| delegate)
    }

    pub fn delegate_mut(&mut self) -> Option<&mut D> {
        self.presented.as_mut().map(|(_, delegate)| delegate)
    }

    /// Replace the presented scene and notify its delegate.
    pub fn present(&mut self, scene: Node, mut delegate: D) -> ToastResult<()> {
        if !matches!(scene.kind(), NodeKind::Scene { .. }) {
            return Err(ToastError::scene("only scene nodes can be presented"));
        }
        if scene.is_attached() {
            return Err(ToastError::scene("a presented scene cannot have a parent"));
        }
        if self.scale_mode == ScaleMode::ResizeFill {
            scene.set_size(self.size)?;
        }
        self.current_time = 0.0;
        delegate.did_move_to_view(&scene, self.size)?;
        tracing::debug!(width = self.size.width, height = self.size.height, "presented scene");
        self.presented = Some((scene, delegate));
        Ok(())
    }

    /// Resize the view, forwarding the change to a resize-fill scene.
    #[tracing::instrument(skip(self))]
    pub fn resize(&mut self, new_size: Size) -> ToastResult<()> {
        self.size = new_size;
        if self.scale_mode != ScaleMode::ResizeFill {
            return Ok(());
        }
        let Some((scene, delegate)) = self.presented.as_mut() else {
            return Ok(());
        };
        let old_size = scene.size().unwrap_or(Size::ZERO);
        if old_size == new_size {
            return Ok(());
        }
        scene.set_size(new_size)?;
        delegate.did_change_size(scene, old_size)
    }

    /// Advance the presented scene by one frame of `dt` seconds.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn advance(&mut self, dt: f64) {
        let Some((scene, delegate)) = self.presented.as_mut() else {
            return;
        };
        self.current_time += dt;
        delegate.update(scene, self.current_time);
        for node in scene.descendants() {
            node.advance_actions(dt);
        }
    }

    /// Step whole frames at `fps` until at least `secs` have elapsed; returns the frame count.
    pub fn run_for(&mut self, secs: f64, fps: Fps) -> u64 {
        let frames = fps.secs_to_frames_ceil(secs);
        let dt = fps.frame_duration_secs();
        for _ in 0..frames {
            self.advance(dt);
        }
        frames
    }

    pub fn snapshot(&self) -> Option<NodeSnapshot> {
        self.scene().map(Node::snapshot)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/view.rs"]
mod tests;
