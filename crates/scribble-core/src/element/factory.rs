//! Element construction.
//!
//! [`ElementFactory`] is the one place elements are built. It owns the random
//! source that feeds `seed`, `versionNonce` and generated ids, plus the
//! [`Clock`] stamping `updated`. Seeding the factory makes a whole document
//! reproducible.

use chrono::Utc;
use log::trace;
use rand::{Rng, SeedableRng, rngs::StdRng};

use super::{
    ArrowOptions, ArrowPath, Element, ElementKind, ElementOptions, LinePath, RenderState, ShapeKind,
    TextBlock, TextStyle,
};
use crate::{
    geometry::{Bounds, Point, Size},
    identifier::{ElementId, GroupId},
};

/// Upper bound of the `seed`/`versionNonce` range used by the editor.
const MAX_NONCE: i64 = 2_000_000_000;

/// Source of the `updated` timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clock {
    /// Current wall-clock time in epoch milliseconds
    #[default]
    System,
    /// Always the given value
    Fixed(i64),
}

impl Clock {
    fn now(self) -> i64 {
        match self {
            Self::System => Utc::now().timestamp_millis(),
            Self::Fixed(millis) => millis,
        }
    }
}

/// Builds elements, drawing their random render state from an owned source.
#[derive(Debug, Clone)]
pub struct ElementFactory {
    rng: StdRng,
    clock: Clock,
}

impl Default for ElementFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementFactory {
    /// A factory seeded from the operating system.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    /// A reproducible factory: same seed, same ids and nonces.
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            clock: Clock::default(),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Draws a fresh group token.
    pub fn group_id(&mut self) -> GroupId {
        GroupId::generate(&mut self.rng)
    }

    /// Builds a rectangle, diamond or ellipse occupying the given box.
    pub fn shape(
        &mut self,
        kind: ShapeKind,
        position: Point,
        size: Size,
        options: &ElementOptions,
    ) -> Element {
        self.build(kind.into(), position, size, options)
    }

    /// Builds a line between two absolute endpoints.
    pub fn line(&mut self, start: Point, end: Point, options: &ElementOptions) -> Element {
        let (bounds, path) = LinePath::from_endpoints(start, end);
        self.build_in(ElementKind::Line(path), bounds, options)
    }

    /// Builds an arrow at `origin` with vertices relative to it.
    pub fn arrow(
        &mut self,
        origin: Point,
        points: Vec<Point>,
        arrow: ArrowOptions,
        options: &ElementOptions,
    ) -> Element {
        let path = ArrowPath::new(points, arrow);
        let size = path.extent();
        self.build(ElementKind::Arrow(path), origin, size, options)
    }

    /// Builds a text element centered on `center`.
    pub fn text(
        &mut self,
        center: Point,
        text: impl Into<String>,
        style: TextStyle,
        options: &ElementOptions,
    ) -> Element {
        let block = TextBlock::new(text, style);
        let bounds = block.layout(center);
        self.build_in(ElementKind::Text(block), bounds, options)
    }

    fn build_in(&mut self, kind: ElementKind, bounds: Bounds, options: &ElementOptions) -> Element {
        self.build(kind, bounds.min_point(), bounds.to_size(), options)
    }

    fn build(
        &mut self,
        kind: ElementKind,
        position: Point,
        size: Size,
        options: &ElementOptions,
    ) -> Element {
        let id = options
            .id()
            .unwrap_or_else(|| ElementId::generate(&mut self.rng));
        let seed = self.rng.random_range(1..=MAX_NONCE);
        let version_nonce = self.rng.random_range(1..=MAX_NONCE);
        let state = RenderState::new(seed, version_nonce, self.clock.now());

        trace!(id:% = id, kind:% = kind, seed, version_nonce; "Built element");

        Element::new(
            id,
            position,
            size,
            options.angle(),
            options.paint(),
            state,
            kind,
        )
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_nonces_within_range() {
        let mut factory = ElementFactory::seeded(1);
        for _ in 0..100 {
            let element = factory.shape(
                ShapeKind::Rectangle,
                Point::default(),
                Size::new(10.0, 10.0),
                &ElementOptions::default(),
            );
            let state = element.state();
            assert!((1..=MAX_NONCE).contains(&state.seed()));
            assert!((1..=MAX_NONCE).contains(&state.version_nonce()));
            assert_eq!(state.version(), 1);
        }
    }

    #[test]
    fn test_seeded_factories_agree() {
        let build = || {
            ElementFactory::seeded(99)
                .with_clock(Clock::Fixed(1_700_000_000_000))
                .shape(
                    ShapeKind::Ellipse,
                    Point::new(1.0, 2.0),
                    Size::new(3.0, 4.0),
                    &ElementOptions::default(),
                )
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn test_fixed_clock_stamps_updated() {
        let mut factory = ElementFactory::seeded(3).with_clock(Clock::Fixed(42));
        let element = factory.line(
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            &ElementOptions::default(),
        );
        assert_eq!(element.state().updated(), 42);
    }

    #[test]
    fn test_explicit_id_is_used() {
        let mut factory = ElementFactory::seeded(3);
        let element = factory.text(
            Point::new(0.0, 0.0),
            "x",
            TextStyle::default(),
            &ElementOptions::new().with_id("label"),
        );
        assert_eq!(element.id(), &ElementId::new("label"));
    }

    #[test]
    fn test_text_stores_top_left() {
        let mut factory = ElementFactory::seeded(3);
        let element = factory.text(
            Point::new(100.0, 100.0),
            "Hi",
            TextStyle::default(),
            &ElementOptions::default(),
        );

        assert_approx_eq!(f64, element.x(), 88.0);
        assert_approx_eq!(f64, element.y(), 88.0);
        assert_approx_eq!(f64, element.width(), 24.0);
        assert_approx_eq!(f64, element.height(), 24.0);
    }

    #[test]
    fn test_arrow_size_from_points() {
        let mut factory = ElementFactory::seeded(3);
        let element = factory.arrow(
            Point::new(100.0, 25.0),
            vec![Point::new(0.0, 0.0), Point::new(50.0, 0.0), Point::new(100.0, 0.0)],
            ArrowOptions::default(),
            &ElementOptions::default(),
        );

        assert_approx_eq!(f64, element.x(), 100.0);
        assert_approx_eq!(f64, element.width(), 100.0);
        assert_approx_eq!(f64, element.height(), 0.0);
    }

    #[test]
    fn test_group_ids_are_fresh() {
        let mut factory = ElementFactory::seeded(3);
        assert_ne!(factory.group_id(), factory.group_id());
    }
}
