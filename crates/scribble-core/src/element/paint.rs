//! Paint attributes and the per-element override bag.
//!
//! [`Paint`] is the resolved set of stroke/fill attributes stored on an
//! element. [`ElementOptions`] is what callers pass to builders: every field
//! is optional and falls back to the Excalidraw editor defaults.
//!
//! Numeric attributes are not range checked. Values outside the editor's
//! ranges (`roughness` 0..=2, `opacity` 0..=100) are written as given.
//! Colors carry no alpha of their own: translucency is expressed through
//! `opacity`, and [`Color`] rejects partially transparent input.

use serde::{Deserialize, Serialize};

use crate::{color::Color, identifier::ElementId};

/// Interior fill pattern.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FillStyle {
    /// Flat fill (default)
    #[default]
    Solid,
    /// Parallel diagonal strokes
    Hachure,
    /// Two crossing sets of hachure strokes
    CrossHatch,
}

/// Outline dash pattern.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeStyle {
    /// Solid continuous line (default)
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// Resolved paint attributes of an element.
#[derive(Debug, Clone, PartialEq)]
pub struct Paint {
    stroke_color: Color,
    background_color: Color,
    fill_style: FillStyle,
    stroke_width: f64,
    stroke_style: StrokeStyle,
    roughness: i32,
    opacity: i32,
}

impl Paint {
    pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;
    pub const DEFAULT_ROUGHNESS: i32 = 1;
    pub const DEFAULT_OPACITY: i32 = 100;

    pub fn stroke_color(&self) -> Color {
        self.stroke_color
    }

    pub fn background_color(&self) -> Color {
        self.background_color
    }

    pub fn fill_style(&self) -> FillStyle {
        self.fill_style
    }

    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    pub fn stroke_style(&self) -> StrokeStyle {
        self.stroke_style
    }

    pub fn roughness(&self) -> i32 {
        self.roughness
    }

    pub fn opacity(&self) -> i32 {
        self.opacity
    }
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            stroke_color: Color::stroke(),
            background_color: Color::white(),
            fill_style: FillStyle::default(),
            stroke_width: Self::DEFAULT_STROKE_WIDTH,
            stroke_style: StrokeStyle::default(),
            roughness: Self::DEFAULT_ROUGHNESS,
            opacity: Self::DEFAULT_OPACITY,
        }
    }
}

/// Optional paint and identity overrides accepted by every element builder.
///
/// Provides both mutable (`set_*`) and immutable (`with_*`) APIs. Also
/// deserializable, so scene files can carry the same keys in snake_case.
/// Stroke and background colors must be opaque or `transparent`; use
/// `opacity` for anything in between.
///
/// # Examples
///
/// ```
/// use scribble_core::{color::Color, element::{ElementOptions, FillStyle}};
///
/// let options = ElementOptions::new()
///     .with_stroke_color(Color::new("#1864ab").unwrap())
///     .with_fill_style(FillStyle::Hachure)
///     .with_roughness(0);
///
/// let paint = options.paint();
/// assert_eq!(paint.stroke_color().to_hex(), "#1864ab");
/// assert_eq!(paint.opacity(), 100);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ElementOptions {
    id: Option<String>,
    stroke_color: Option<Color>,
    background_color: Option<Color>,
    fill_style: Option<FillStyle>,
    stroke_width: Option<f64>,
    stroke_style: Option<StrokeStyle>,
    roughness: Option<i32>,
    opacity: Option<i32>,
    angle: Option<f64>,
}

impl ElementOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a caller-chosen id instead of a generated one.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_stroke_color(mut self, color: Color) -> Self {
        self.stroke_color = Some(color);
        self
    }

    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }

    pub fn with_fill_style(mut self, fill_style: FillStyle) -> Self {
        self.fill_style = Some(fill_style);
        self
    }

    pub fn with_stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = Some(width);
        self
    }

    pub fn with_stroke_style(mut self, style: StrokeStyle) -> Self {
        self.stroke_style = Some(style);
        self
    }

    pub fn with_roughness(mut self, roughness: i32) -> Self {
        self.roughness = Some(roughness);
        self
    }

    pub fn with_opacity(mut self, opacity: i32) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Rotation in radians.
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = Some(angle);
        self
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    pub fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = Some(color);
    }

    pub fn set_background_color(&mut self, color: Color) {
        self.background_color = Some(color);
    }

    /// The explicit id, if one was given.
    pub fn id(&self) -> Option<ElementId> {
        self.id.as_deref().map(ElementId::new)
    }

    pub fn angle(&self) -> f64 {
        self.angle.unwrap_or(0.0)
    }

    /// Resolves the overrides against the editor defaults.
    pub fn paint(&self) -> Paint {
        let defaults = Paint::default();
        Paint {
            stroke_color: self.stroke_color.unwrap_or(defaults.stroke_color),
            background_color: self.background_color.unwrap_or(defaults.background_color),
            fill_style: self.fill_style.unwrap_or(defaults.fill_style),
            stroke_width: self.stroke_width.unwrap_or(defaults.stroke_width),
            stroke_style: self.stroke_style.unwrap_or(defaults.stroke_style),
            roughness: self.roughness.unwrap_or(defaults.roughness),
            opacity: self.opacity.unwrap_or(defaults.opacity),
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_default_paint_matches_editor_defaults() {
        let paint = ElementOptions::new().paint();

        assert_eq!(paint.stroke_color().to_hex(), "#1e1e1e");
        assert_eq!(paint.background_color().to_hex(), "#ffffff");
        assert_eq!(paint.fill_style(), FillStyle::Solid);
        assert_approx_eq!(f64, paint.stroke_width(), 2.0);
        assert_eq!(paint.stroke_style(), StrokeStyle::Solid);
        assert_eq!(paint.roughness(), 1);
        assert_eq!(paint.opacity(), 100);
    }

    #[test]
    fn test_overrides_are_applied() {
        let options = ElementOptions::new()
            .with_fill_style(FillStyle::CrossHatch)
            .with_stroke_style(StrokeStyle::Dashed)
            .with_stroke_width(3.0)
            .with_opacity(90)
            .with_angle(0.1);
        let paint = options.paint();

        assert_eq!(paint.fill_style(), FillStyle::CrossHatch);
        assert_eq!(paint.stroke_style(), StrokeStyle::Dashed);
        assert_approx_eq!(f64, paint.stroke_width(), 3.0);
        assert_eq!(paint.opacity(), 90);
        assert_approx_eq!(f64, options.angle(), 0.1);
    }

    #[test]
    fn test_out_of_range_values_pass_through() {
        let paint = ElementOptions::new()
            .with_opacity(250)
            .with_roughness(-3)
            .paint();

        assert_eq!(paint.opacity(), 250);
        assert_eq!(paint.roughness(), -3);
    }

    #[test]
    fn test_fill_style_wire_names() {
        assert_eq!(
            serde_json::to_string(&FillStyle::CrossHatch).unwrap(),
            r#""cross-hatch""#
        );
        assert_eq!(
            serde_json::to_string(&StrokeStyle::Dotted).unwrap(),
            r#""dotted""#
        );
    }

    #[test]
    fn test_id_override() {
        let options = ElementOptions::new().with_id("header");
        assert_eq!(options.id().unwrap(), "header");
        assert!(ElementOptions::new().id().is_none());
    }
}
