use crate::{
    foundation::core::{Point, Rgba8, Size},
    foundation::error::{ToastError, ToastResult},
    scene::node::Font,
};

/// Default anchor of the toast center, as a fraction of the parent's bounds.
pub const TYPICAL_PLACEMENT: Point = Point::new(0.50, 0.15);

/// Aspect presets; a preset `a` yields a size fraction of `(a, sqrt(a))`.
pub const ASPECT_SMALL: f64 = 0.25;
pub const ASPECT_MEDIUM: f64 = 0.50;
pub const ASPECT_LARGE: f64 = 0.75;

/// Extra vertical factor applied on top of the size fraction; keeps the band thin.
pub const HEIGHT_SCALE: f64 = 0.15;

/// Display time used when none is configured.
pub const DEFAULT_DURATION_SECS: f64 = 0.60;
pub const FADE_IN_SECS: f64 = 0.20;
pub const FADE_OUT_SECS: f64 = 0.35;

/// Amount added to the parent's z position so the toast renders on top.
pub const Z_OFFSET: f64 = 1000.0;

/// Key of the fade/display/fade/remove sequence on the toast node.
pub const TOAST_ACTION_KEY: &str = "toast.show";

/// Name given to the toast sprite node.
pub const TOAST_NODE_NAME: &str = "toast";

pub const DEFAULT_FONT_NAME: &str = "HelveticaNeue-CondensedBold";
pub const DEFAULT_FONT_SIZE: f64 = 15.0;

/// Size fraction for an aspect preset.
pub fn size_fraction_for_aspect(aspect: f64) -> Size {
    Size::new(aspect, aspect.sqrt())
}

/// Colors and font of the toast band.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ToastStyle {
    /// Band fill color.
    pub background: Rgba8,
    /// Message font.
    pub font: Font,
}

impl Default for ToastStyle {
    fn default() -> Self {
        Self {
            background: Rgba8::gray(0.20, 1.0),
            font: Font {
                name: DEFAULT_FONT_NAME.to_string(),
                size: DEFAULT_FONT_SIZE,
                color: Rgba8::gray(0.90, 1.0),
            },
        }
    }
}

/// Layout and timing knobs of a toast. Every field is optional in JSON.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ToastConfig {
    /// Toast center as a fraction of the parent's bounds.
    pub placement: Point,
    /// Toast size as a fraction of the parent's size (height is further scaled by [`HEIGHT_SCALE`]).
    pub size_fraction: Size,
    /// Display time between fades; [`DEFAULT_DURATION_SECS`] when unset.
    pub duration_secs: Option<f64>,
    /// Visual style.
    pub style: ToastStyle,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            placement: TYPICAL_PLACEMENT,
            size_fraction: size_fraction_for_aspect(ASPECT_MEDIUM),
            duration_secs: None,
            style: ToastStyle::default(),
        }
    }
}

impl ToastConfig {
    pub fn with_aspect(mut self, aspect: f64) -> Self {
        self.size_fraction = size_fraction_for_aspect(aspect);
        self
    }

    pub fn with_duration(mut self, duration_secs: f64) -> Self {
        self.duration_secs = Some(duration_secs);
        self
    }

    pub fn duration_or_default(&self) -> f64 {
        self.duration_secs.unwrap_or(DEFAULT_DURATION_SECS)
    }

    pub fn validate(&self) -> ToastResult<()> {
        fn fraction(name: &str, v: f64) -> ToastResult<()> {
            if !v.is_finite() {
                return Err(ToastError::validation(format!("{name} must be finite")));
            }
            Ok(())
        }

        fraction("placement.x", self.placement.x)?;
        fraction("placement.y", self.placement.y)?;
        for (name, v) in [
            ("size_fraction.width", self.size_fraction.width),
            ("size_fraction.height", self.size_fraction.height),
        ] {
            fraction(name, v)?;
            if v < 0.0 {
                return Err(ToastError::validation(format!("{name} must be >= 0")));
            }
        }
        if let Some(d) = self.duration_secs
            && (!d.is_finite() || d < 0.0)
        {
            return Err(ToastError::validation(
                "duration_secs must be finite and >= 0",
            ));
        }
        let font = &self.style.font;
        if !(font.size.is_finite() && font.size > 0.0) {
            return Err(ToastError::validation("font size must be > 0"));
        }
        if font.name.trim().is_empty() {
            return Err(ToastError::validation("font name must be non-empty"));
        }
        Ok(())
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> ToastResult<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/toast/config.rs"]
mod tests;
