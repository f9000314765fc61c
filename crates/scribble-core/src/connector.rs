//! Connector routing between placed elements.
//!
//! Pure functions that read two elements' stored boxes and produce the
//! origin, relative vertices and bindings of an arrow joining them. Nothing
//! here mutates the endpoints; the caller decides where the arrow goes.
//!
//! Two routes are available:
//!
//! ```text
//!  straight                         curved
//!
//!  ┌───┐                            ┌───┐
//!  │ A ├──────●──────►┌───┐         │ A │
//!  └───┘              │ B │         └─┬─┘
//!                     └───┘      ●╮   │
//!                                  ╰──┴─►┌───┐
//!                                        │ B │
//!                                        └───┘
//! ```
//!
//! - **Straight**: right-edge midpoint of the start to left-edge midpoint of
//!   the end, with a vertex halfway along at the start's height.
//! - **Curved**: bottom-edge midpoint of the start to top-edge midpoint of the
//!   end, bending through a control vertex offset from the start.

use log::trace;

use crate::{
    element::{ArrowOptions, Binding, Element},
    geometry::Point,
};

/// Anchor focus used by generated bindings: the middle of the edge.
pub const CENTER_FOCUS: f64 = 0.5;

/// Clearance between a straight connector and both elements.
pub const STRAIGHT_GAP: f64 = 1.0;

/// Clearance between a curved connector and its start element.
pub const CURVED_START_GAP: f64 = 4.0;

/// Clearance between a curved connector and its end element.
pub const CURVED_END_GAP: f64 = 9.0;

/// Default control vertex of a curved connector, relative to its start.
pub fn default_curve_offset() -> Point {
    Point::new(-30.0, 20.0)
}

/// Computed arrow placement between two elements.
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    origin: Point,
    points: Vec<Point>,
    arrow: ArrowOptions,
}

impl Connector {
    /// Absolute start anchor; the arrow's stored `(x, y)`.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Vertices relative to [`Self::origin`]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn arrow_options(&self) -> &ArrowOptions {
        &self.arrow
    }

    /// Splits into the parts an arrow builder takes.
    pub fn into_parts(self) -> (Point, Vec<Point>, ArrowOptions) {
        (self.origin, self.points, self.arrow)
    }
}

/// Routes an elbowed arrow from the right edge of `start` to the left edge of `end`.
///
/// # Examples
///
/// ```
/// use scribble_core::{
///     connector,
///     element::{ElementFactory, ElementOptions, ShapeKind},
///     geometry::{Point, Size},
/// };
///
/// let mut factory = ElementFactory::seeded(0);
/// let options = ElementOptions::default();
/// let a = factory.shape(ShapeKind::Rectangle, Point::new(0.0, 0.0), Size::new(100.0, 50.0), &options);
/// let b = factory.shape(ShapeKind::Rectangle, Point::new(200.0, 0.0), Size::new(100.0, 50.0), &options);
///
/// let route = connector::straight(&a, &b);
/// assert_eq!(route.origin(), Point::new(100.0, 25.0));
/// assert_eq!(
///     route.points(),
///     &[Point::new(0.0, 0.0), Point::new(50.0, 0.0), Point::new(100.0, 0.0)]
/// );
/// ```
pub fn straight(start: &Element, end: &Element) -> Connector {
    let from = start.bounds().right_center();
    let to = end.bounds().left_center();
    let bend = Point::new(from.midpoint(to).x(), from.y());

    trace!(
        start_id:% = start.id(), end_id:% = end.id(), from:?, to:?;
        "Routing straight connector"
    );

    let arrow = ArrowOptions::new()
        .with_start_binding(Binding::new(start.id().clone(), CENTER_FOCUS, STRAIGHT_GAP))
        .with_end_binding(Binding::new(end.id().clone(), CENTER_FOCUS, STRAIGHT_GAP));

    Connector {
        origin: from,
        points: relative_path(from, &[from, bend, to]),
        arrow,
    }
}

/// Routes a rounded arrow from the bottom edge of `start` to the top edge of
/// `end`, bending through `control` (relative to the start anchor).
pub fn curved(start: &Element, end: &Element, control: Point) -> Connector {
    let from = start.bounds().bottom_center();
    let to = end.bounds().top_center();

    trace!(
        start_id:% = start.id(), end_id:% = end.id(), from:?, to:?, control:?;
        "Routing curved connector"
    );

    let arrow = ArrowOptions::curved()
        .with_start_binding(Binding::new(
            start.id().clone(),
            CENTER_FOCUS,
            CURVED_START_GAP,
        ))
        .with_end_binding(Binding::new(end.id().clone(), CENTER_FOCUS, CURVED_END_GAP));

    Connector {
        origin: from,
        points: vec![Point::default(), control, to.sub_point(from)],
        arrow,
    }
}

fn relative_path(origin: Point, absolute: &[Point]) -> Vec<Point> {
    absolute.iter().map(|p| p.sub_point(origin)).collect()
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::{
        element::{ElementFactory, ElementOptions, Roundness, ShapeKind},
        geometry::Size,
    };

    fn rect(factory: &mut ElementFactory, x: f64, y: f64, w: f64, h: f64) -> Element {
        factory.shape(
            ShapeKind::Rectangle,
            Point::new(x, y),
            Size::new(w, h),
            &ElementOptions::default(),
        )
    }

    #[test]
    fn test_straight_anchors_and_path() {
        let mut factory = ElementFactory::seeded(0);
        let a = rect(&mut factory, 0.0, 0.0, 100.0, 50.0);
        let b = rect(&mut factory, 200.0, 0.0, 100.0, 50.0);

        let route = straight(&a, &b);

        assert_eq!(route.origin(), Point::new(100.0, 25.0));
        assert_eq!(
            route.points(),
            &[
                Point::new(0.0, 0.0),
                Point::new(50.0, 0.0),
                Point::new(100.0, 0.0)
            ]
        );
    }

    #[test]
    fn test_straight_bindings() {
        let mut factory = ElementFactory::seeded(0);
        let a = rect(&mut factory, 0.0, 0.0, 100.0, 50.0);
        let b = rect(&mut factory, 200.0, 100.0, 100.0, 50.0);

        let route = straight(&a, &b);
        let (_, points, options) = route.into_parts();
        let path = crate::element::ArrowPath::new(points, options);

        let start = path.start_binding().unwrap();
        let end = path.end_binding().unwrap();
        assert_eq!(start.element_id(), a.id());
        assert_eq!(end.element_id(), b.id());
        assert_approx_eq!(f64, start.focus(), 0.5);
        assert_approx_eq!(f64, start.gap(), 1.0);
        assert_approx_eq!(f64, end.gap(), 1.0);
        assert!(path.elbowed());

        // The bend stays at the start's height even when the end is lower.
        assert_eq!(path.points()[1], Point::new(50.0, 0.0));
        assert_eq!(path.points()[2], Point::new(100.0, 100.0));
    }

    #[test]
    fn test_curved_anchors_and_bindings() {
        let mut factory = ElementFactory::seeded(0);
        let a = rect(&mut factory, 0.0, 0.0, 100.0, 50.0);
        let b = rect(&mut factory, 0.0, 150.0, 100.0, 50.0);

        let route = curved(&a, &b, default_curve_offset());

        assert_eq!(route.origin(), Point::new(50.0, 50.0));
        assert_eq!(
            route.points(),
            &[
                Point::new(0.0, 0.0),
                Point::new(-30.0, 20.0),
                Point::new(0.0, 100.0)
            ]
        );

        let (_, points, options) = route.into_parts();
        let path = crate::element::ArrowPath::new(points, options);
        assert!(!path.elbowed());
        assert_eq!(path.roundness(), Some(Roundness::ProportionalRadius));
        assert_approx_eq!(f64, path.start_binding().unwrap().gap(), 4.0);
        assert_approx_eq!(f64, path.end_binding().unwrap().gap(), 9.0);
    }

    #[test]
    fn test_connect_does_not_touch_endpoints() {
        let mut factory = ElementFactory::seeded(0);
        let a = rect(&mut factory, 0.0, 0.0, 100.0, 50.0);
        let b = rect(&mut factory, 200.0, 0.0, 100.0, 50.0);
        let (a_before, b_before) = (a.clone(), b.clone());

        let _ = straight(&a, &b);
        let _ = curved(&a, &b, Point::new(5.0, 5.0));

        assert_eq!(a, a_before);
        assert_eq!(b, b_before);
    }
}
