//! Linear elements: lines and arrows.
//!
//! Both store their vertices relative to the element's `(x, y)`. They differ
//! in how `width`/`height` are derived:
//!
//! - A [`LinePath`] is built from two endpoints and its box is the true
//!   bounding box of those endpoints.
//! - An [`ArrowPath`] takes the largest x and y among its points as width and
//!   height. This is not a bounding box (negative offsets are ignored) but it
//!   is what the scene format has always carried for arrows, so it is kept.

use serde::{Deserialize, Serialize};

use super::Roundness;
use crate::{
    geometry::{Bounds, Point, Size},
    identifier::ElementId,
};

/// A straight two-point line.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePath {
    points: [Point; 2],
}

impl LinePath {
    /// Derives the stored box and relative points from absolute endpoints.
    ///
    /// # Examples
    ///
    /// ```
    /// use scribble_core::{element::LinePath, geometry::Point};
    ///
    /// let (bounds, path) = LinePath::from_endpoints(Point::new(10.0, 10.0), Point::new(50.0, 40.0));
    /// assert_eq!(bounds.min_point(), Point::new(10.0, 10.0));
    /// assert_eq!(bounds.width(), 40.0);
    /// assert_eq!(bounds.height(), 30.0);
    /// assert_eq!(path.points(), &[Point::new(0.0, 0.0), Point::new(40.0, 30.0)]);
    /// ```
    pub fn from_endpoints(start: Point, end: Point) -> (Bounds, Self) {
        let bounds = Bounds::from_corners(start, end);
        let origin = bounds.min_point();
        let path = Self {
            points: [start.sub_point(origin), end.sub_point(origin)],
        };
        (bounds, path)
    }

    /// Endpoints relative to the element origin
    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

/// Decoration drawn at an arrow end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arrowhead {
    Arrow,
    Bar,
    Dot,
    Triangle,
}

/// Attachment of an arrow end to another element.
///
/// `focus` positions the anchor along the bound element's edge (0.5 is the
/// middle) and `gap` is the clearance in pixels between the arrow tip and
/// the element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Binding {
    element_id: ElementId,
    focus: f64,
    gap: f64,
}

impl Binding {
    pub fn new(element_id: ElementId, focus: f64, gap: f64) -> Self {
        Self {
            element_id,
            focus,
            gap,
        }
    }

    pub fn element_id(&self) -> &ElementId {
        &self.element_id
    }

    pub fn focus(&self) -> f64 {
        self.focus
    }

    pub fn gap(&self) -> f64 {
        self.gap
    }
}

/// A user-pinned segment of an elbow arrow, carried through as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixedSegment {
    index: u32,
    start: Point,
    end: Point,
}

impl FixedSegment {
    pub fn new(index: u32, start: Point, end: Point) -> Self {
        Self { index, start, end }
    }
}

/// Arrow-specific construction settings.
///
/// The default is an elbowed arrow with an `arrow` head at the end, no start
/// head and no bindings.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowOptions {
    start_binding: Option<Binding>,
    end_binding: Option<Binding>,
    start_arrowhead: Option<Arrowhead>,
    end_arrowhead: Option<Arrowhead>,
    elbowed: bool,
    roundness: Option<Roundness>,
    fixed_segments: Option<Vec<FixedSegment>>,
    start_is_special: Option<bool>,
    end_is_special: Option<bool>,
}

impl Default for ArrowOptions {
    fn default() -> Self {
        Self {
            start_binding: None,
            end_binding: None,
            start_arrowhead: None,
            end_arrowhead: Some(Arrowhead::Arrow),
            elbowed: true,
            roundness: None,
            fixed_segments: None,
            start_is_special: None,
            end_is_special: None,
        }
    }
}

impl ArrowOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Smooth routing with proportional rounding.
    pub fn curved() -> Self {
        Self {
            elbowed: false,
            roundness: Some(Roundness::ProportionalRadius),
            ..Self::default()
        }
    }

    pub fn with_start_binding(mut self, binding: Binding) -> Self {
        self.start_binding = Some(binding);
        self
    }

    pub fn with_end_binding(mut self, binding: Binding) -> Self {
        self.end_binding = Some(binding);
        self
    }

    pub fn with_start_arrowhead(mut self, head: Option<Arrowhead>) -> Self {
        self.start_arrowhead = head;
        self
    }

    pub fn with_end_arrowhead(mut self, head: Option<Arrowhead>) -> Self {
        self.end_arrowhead = head;
        self
    }

    pub fn with_elbowed(mut self, elbowed: bool) -> Self {
        self.elbowed = elbowed;
        self
    }

    pub fn with_roundness(mut self, roundness: Option<Roundness>) -> Self {
        self.roundness = roundness;
        self
    }

    pub fn with_fixed_segments(mut self, segments: Vec<FixedSegment>) -> Self {
        self.fixed_segments = Some(segments);
        self
    }

    pub fn with_special_ends(mut self, start: bool, end: bool) -> Self {
        self.start_is_special = Some(start);
        self.end_is_special = Some(end);
        self
    }
}

/// Vertices and end decorations of an arrow.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowPath {
    points: Vec<Point>,
    options: ArrowOptions,
}

impl ArrowPath {
    pub fn new(points: Vec<Point>, options: ArrowOptions) -> Self {
        Self { points, options }
    }

    /// Width and height as stored by the format: the largest x and y offsets.
    ///
    /// Empty paths have zero size.
    ///
    /// # Examples
    ///
    /// ```
    /// use scribble_core::{element::{ArrowOptions, ArrowPath}, geometry::Point};
    ///
    /// let path = ArrowPath::new(
    ///     vec![Point::new(0.0, 0.0), Point::new(-30.0, 20.0), Point::new(-60.0, 80.0)],
    ///     ArrowOptions::curved(),
    /// );
    /// let size = path.extent();
    /// assert_eq!(size.width(), 0.0);
    /// assert_eq!(size.height(), 80.0);
    /// ```
    pub fn extent(&self) -> Size {
        let mut points = self.points.iter();
        let Some(first) = points.next() else {
            return Size::default();
        };
        let (width, height) = points.fold((first.x(), first.y()), |(w, h), p| {
            (w.max(p.x()), h.max(p.y()))
        });
        Size::new(width, height)
    }

    /// Vertices relative to the element origin
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn start_binding(&self) -> Option<&Binding> {
        self.options.start_binding.as_ref()
    }

    pub fn end_binding(&self) -> Option<&Binding> {
        self.options.end_binding.as_ref()
    }

    pub fn start_arrowhead(&self) -> Option<Arrowhead> {
        self.options.start_arrowhead
    }

    pub fn end_arrowhead(&self) -> Option<Arrowhead> {
        self.options.end_arrowhead
    }

    pub fn elbowed(&self) -> bool {
        self.options.elbowed
    }

    pub fn roundness(&self) -> Option<Roundness> {
        self.options.roundness
    }

    pub fn fixed_segments(&self) -> Option<&[FixedSegment]> {
        self.options.fixed_segments.as_deref()
    }

    pub fn start_is_special(&self) -> Option<bool> {
        self.options.start_is_special
    }

    pub fn end_is_special(&self) -> Option<bool> {
        self.options.end_is_special
    }
}
