//! Demo scene: a centered label placed with [`RectRegion`] and a toast that
//! fades in over a green background, re-laid out on every resize.

use crate::{
    foundation::core::{Fps, Point, Rgba8, Size},
    foundation::error::{ToastError, ToastResult},
    foundation::geometry::RectRegion,
    scene::node::{Font, Node},
    scene::view::{SceneDelegate, View},
    toast::config::ToastConfig,
    toast::widget::{AnimateOutcome, Toast},
};

/// Name of the label kept at the scene center.
pub const CENTER_LABEL_NAME: &str = "center label";
pub const DEMO_SCENE_NAME: &str = "demo scene";
pub const DEMO_TOAST_DURATION_SECS: f64 = 5.0;

/// Content of the demo scene.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Text of the centered label.
    pub label_text: String,
    /// Message shown by the toast when the scene is presented.
    pub toast_message: String,
    /// Toast layout, timing and style.
    pub toast: ToastConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            label_text: "Demo Sprite Rectangle".to_string(),
            toast_message: "Demo Sprite Toast".to_string(),
            toast: ToastConfig::default().with_duration(DEMO_TOAST_DURATION_SECS),
        }
    }
}

/// Scene delegate that builds and maintains the demo content.
pub struct DemoScene {
    config: DemoConfig,
    toast: Option<Toast>,
}

impl DemoScene {
    pub fn new(config: DemoConfig) -> Self {
        Self {
            config,
            toast: None,
        }
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    /// Show the toast again with a new message.
    pub fn show_again(&self, message: &str) -> ToastResult<AnimateOutcome> {
        let toast = self
            .toast
            .as_ref()
            .ok_or_else(|| ToastError::scene("demo scene has not been presented"))?;
        toast.animate(Some(message))
    }

    fn center_label(scene: &Node) {
        if let Some(label) = scene.child_named(CENTER_LABEL_NAME) {
            label.set_position(RectRegion::from_rect(scene.frame()).origin);
        }
    }
}

impl SceneDelegate for DemoScene {
    fn did_move_to_view(&mut self, scene: &Node, _view_size: Size) -> ToastResult<()> {
        scene.set_color(Rgba8::GREEN)?;
        scene.set_anchor_point(Point::ZERO)?;

        let label = Node::label(
            Some(self.config.label_text.clone()),
            Font {
                size: 35.0,
                color: Rgba8::BLACK,
                ..Font::default()
            },
        );
        label.set_name(CENTER_LABEL_NAME);
        scene.add_child(&label)?;
        Self::center_label(scene);

        let toast = Toast::make_with_config(scene, &self.config.toast)?;
        let outcome = toast.animate(Some(&self.config.toast_message))?;
        tracing::info!(?outcome, "demo toast presented");
        self.toast = Some(toast);
        Ok(())
    }

    fn did_change_size(&mut self, scene: &Node, old_size: Size) -> ToastResult<()> {
        tracing::debug!(?old_size, new_size = ?scene.size(), "demo scene resized");
        Self::center_label(scene);

        // A detached toast is laid out again when it is re-attached.
        if let Some(toast) = &self.toast
            && toast.is_attached()
        {
            toast.update_frame(scene)?;
        }
        Ok(())
    }
}

/// Owns the view and presents the demo scene on load.
pub struct DemoController {
    view: View<DemoScene>,
}

impl DemoController {
    /// Create a view of `view_size` and present a fresh demo scene in it.
    pub fn load(view_size: Size, config: DemoConfig) -> ToastResult<Self> {
        let mut view = View::new(view_size);
        let scene = Node::scene(view_size);
        scene.set_name(DEMO_SCENE_NAME);
        view.present(scene, DemoScene::new(config))?;
        Ok(Self { view })
    }

    pub fn view(&self) -> &View<DemoScene> {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut View<DemoScene> {
        &mut self.view
    }

    pub fn demo(&self) -> Option<&DemoScene> {
        self.view.delegate()
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.demo().and_then(DemoScene::toast)
    }
}

/// Scripted headless run of the demo.
#[derive(Clone, Debug)]
pub struct SimulationPlan {
    /// Fixed step rate.
    pub fps: Fps,
    /// Total simulated time.
    pub seconds: f64,
    /// Resize the view once the given time is reached.
    pub resize: Option<(f64, Size)>,
    /// Re-show the toast with a message once the given time is reached.
    pub reshow: Option<(f64, String)>,
    /// Interval between recorded samples; state changes are always recorded.
    pub sample_every_secs: f64,
}

/// Toast state recorded during a simulation.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ToastSample {
    pub time_secs: f64,
    pub attached: bool,
    pub animating: bool,
    pub alpha: f64,
    pub region: RectRegion,
    pub text: Option<String>,
}

impl ToastSample {
    fn capture(time_secs: f64, toast: &Toast) -> Self {
        Self {
            time_secs,
            attached: toast.is_attached(),
            animating: toast.is_animating(),
            alpha: toast.alpha(),
            region: toast.region(),
            text: toast.text(),
        }
    }
}

/// Step the controller through `plan`, recording toast samples.
#[tracing::instrument(skip(controller))]
pub fn simulate(
    controller: &mut DemoController,
    plan: &SimulationPlan,
) -> ToastResult<Vec<ToastSample>> {
    let toast = controller
        .toast()
        .cloned()
        .ok_or_else(|| ToastError::scene("demo scene has no toast"))?;

    let frames = plan.fps.secs_to_frames_ceil(plan.seconds);
    let dt = plan.fps.frame_duration_secs();
    let stride = plan.fps.secs_to_frames_ceil(plan.sample_every_secs).max(1);
    let mut resize = plan.resize;
    let mut reshow = plan.reshow.clone();

    let mut samples = vec![ToastSample::capture(0.0, &toast)];
    for frame in 1..=frames {
        let now = plan.fps.frames_to_secs(frame - 1);
        if let Some((at, size)) = resize
            && now >= at
        {
            controller.view_mut().resize(size)?;
            resize = None;
        }
        if let Some((at, message)) = reshow.as_ref()
            && now >= *at
        {
            let outcome = toast.animate(Some(message))?;
            tracing::info!(?outcome, time_secs = now, "re-showing demo toast");
            reshow = None;
        }

        controller.view_mut().advance(dt);

        let sample = ToastSample::capture(plan.fps.frames_to_secs(frame), &toast);
        let changed = samples.last().is_some_and(|prev| {
            prev.attached != sample.attached
                || prev.animating != sample.animating
                || prev.region != sample.region
        });
        if changed || frame % stride == 0 || frame == frames {
            samples.push(sample);
        }
    }
    Ok(samples)
}

#[cfg(test)]
#[path = "../tests/unit/demo.rs"]
mod tests;
