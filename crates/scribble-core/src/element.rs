//! Element model for Excalidraw scenes.
//!
//! Every drawable item is an [`Element`]: a shared base record (identity,
//! geometry, paint, render state, grouping) plus an [`ElementKind`] payload
//! carrying the variant-specific data. The set of variants is closed, which
//! lets the serializer map each kind to its exact field set in one place.
//!
//! # Overview
//!
//! - [`Element`] - The base record shared by all variants
//! - [`ElementKind`] - Rectangle, Diamond, Ellipse, Line, Arrow or Text
//! - [`ElementFactory`] - Builds elements and owns the random source for
//!   `seed`, `versionNonce` and generated ids
//! - [`ElementOptions`] - Paint and identity overrides accepted by every builder
//!
//! Elements are immutable once built except for their group membership.

mod factory;
mod linear;
mod paint;
mod text;

pub use factory::{Clock, ElementFactory};
pub use linear::{ArrowOptions, ArrowPath, Arrowhead, Binding, FixedSegment, LinePath};
pub use paint::{ElementOptions, FillStyle, Paint, StrokeStyle};
pub use text::{FontFamily, TextAlign, TextBlock, TextStyle, VerticalAlign};

use std::fmt;

use serde::{Deserialize, Serialize, Serializer, ser::SerializeMap};

use crate::{
    geometry::{Bounds, Point, Size},
    identifier::{ElementId, GroupId},
};

/// Corner or curve rounding hint read by the viewer.
///
/// Serializes as `{"type": <code>}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Roundness {
    /// Code 2, radius proportional to the element size. Used for diamonds,
    /// ellipses and curved arrows.
    ProportionalRadius,
    /// Code 3, fixed radius that adapts to small elements. Used for rectangles.
    AdaptiveRadius,
}

impl Roundness {
    /// Numeric code written to the `type` key.
    pub fn code(self) -> u8 {
        match self {
            Self::ProportionalRadius => 2,
            Self::AdaptiveRadius => 3,
        }
    }
}

impl Serialize for Roundness {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("type", &self.code())?;
        map.end()
    }
}

/// The closed shapes that take an explicit box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Diamond,
    Ellipse,
}

impl From<ShapeKind> for ElementKind {
    fn from(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Rectangle => Self::Rectangle,
            ShapeKind::Diamond => Self::Diamond,
            ShapeKind::Ellipse => Self::Ellipse,
        }
    }
}

/// Variant tag and variant-specific payload of an element.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    Rectangle,
    Diamond,
    Ellipse,
    Line(LinePath),
    Arrow(ArrowPath),
    Text(TextBlock),
}

impl ElementKind {
    /// The `type` string Excalidraw uses for this variant.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Diamond => "diamond",
            Self::Ellipse => "ellipse",
            Self::Line(_) => "line",
            Self::Arrow(_) => "arrow",
            Self::Text(_) => "text",
        }
    }

    /// Rounding descriptor for this variant.
    ///
    /// Closed shapes always carry one; arrows only when built as curves;
    /// lines and text never do.
    pub fn roundness(&self) -> Option<Roundness> {
        match self {
            Self::Rectangle => Some(Roundness::AdaptiveRadius),
            Self::Diamond | Self::Ellipse => Some(Roundness::ProportionalRadius),
            Self::Arrow(arrow) => arrow.roundness(),
            Self::Line(_) | Self::Text(_) => None,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Per-element rendering state required by the file format.
///
/// `seed` and `version_nonce` are drawn once when the element is built and
/// stay fixed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderState {
    seed: i64,
    version: u32,
    version_nonce: i64,
    updated: i64,
}

impl RenderState {
    pub fn new(seed: i64, version_nonce: i64, updated: i64) -> Self {
        Self {
            seed,
            version: 1,
            version_nonce,
            updated,
        }
    }

    pub fn seed(&self) -> i64 {
        self.seed
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn version_nonce(&self) -> i64 {
        self.version_nonce
    }

    /// Epoch milliseconds at creation.
    pub fn updated(&self) -> i64 {
        self.updated
    }
}

/// One drawable element: the shared base record plus its [`ElementKind`].
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    id: ElementId,
    position: Point,
    size: Size,
    angle: f64,
    paint: Paint,
    state: RenderState,
    group_ids: Vec<GroupId>,
    kind: ElementKind,
}

impl Element {
    pub(crate) fn new(
        id: ElementId,
        position: Point,
        size: Size,
        angle: f64,
        paint: Paint,
        state: RenderState,
        kind: ElementKind,
    ) -> Self {
        Self {
            id,
            position,
            size,
            angle,
            paint,
            state,
            group_ids: Vec::new(),
            kind,
        }
    }

    pub fn id(&self) -> &ElementId {
        &self.id
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    /// Stored top-left x-coordinate
    pub fn x(&self) -> f64 {
        self.position.x()
    }

    /// Stored top-left y-coordinate
    pub fn y(&self) -> f64 {
        self.position.y()
    }

    pub fn width(&self) -> f64 {
        self.size.width()
    }

    pub fn height(&self) -> f64 {
        self.size.height()
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Box spanned by the stored position and size.
    ///
    /// For arrows this is the format's max-of-points box, not the true extent
    /// of the path.
    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_top_left(self.position, self.size)
    }

    /// Rotation in radians
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn paint(&self) -> &Paint {
        &self.paint
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn group_ids(&self) -> &[GroupId] {
        &self.group_ids
    }

    /// Appends a group token. Membership is the only mutable part of an element.
    pub fn push_group(&mut self, group_id: GroupId) {
        self.group_ids.push(group_id);
    }
}
