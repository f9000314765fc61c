//! The document: an ordered, exclusively owned collection of elements.
//!
//! Insertion order is z-order and is never changed. Builders hand back an
//! [`ElementHandle`] that names both the element's position and the document
//! that issued it. Positions stay valid for the life of the document because
//! nothing is ever removed, and a handle presented to any other document is
//! rejected.

use std::{
    fmt,
    path::Path,
    sync::atomic::{AtomicU64, Ordering},
};

use indexmap::IndexMap;
use log::{debug, info};

use scribble_core::{
    color::Color,
    connector::{self, Connector},
    element::{ArrowOptions, Element, ElementFactory, ElementOptions, ShapeKind, TextStyle},
    geometry::{Point, Size},
    identifier::{ElementId, GroupId},
};

use crate::{ScribbleError, export::excalidraw};

/// Source of document tokens, unique for the life of the process.
static NEXT_DOCUMENT: AtomicU64 = AtomicU64::new(1);

/// Reference to an element of a [`Document`], valid for that document only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementHandle {
    document: u64,
    index: usize,
}

impl ElementHandle {
    /// Position of the element in document order
    pub fn index(self) -> usize {
        self.index
    }
}

impl fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

/// An Excalidraw scene under construction.
///
/// A clone is a separate document: handles issued before cloning are not
/// accepted by the copy.
///
/// # Examples
///
/// ```
/// use scribble::{Document, element::{ElementOptions, TextStyle}};
///
/// let mut doc = Document::new();
/// let options = ElementOptions::default();
///
/// let a = doc.add_rectangle(0.0, 0.0, 100.0, 50.0, &options).unwrap();
/// let b = doc.add_rectangle(200.0, 0.0, 100.0, 50.0, &options).unwrap();
/// doc.add_text(50.0, 25.0, "A", TextStyle::default(), &options).unwrap();
/// let arrow = doc.connect(a, b, &options).unwrap();
///
/// assert_eq!(doc.len(), 4);
/// assert_eq!(doc.get(arrow).unwrap().x(), 100.0);
/// ```
#[derive(Debug)]
pub struct Document {
    token: u64,
    elements: IndexMap<ElementId, Element>,
    background_color: Color,
    factory: ElementFactory,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Document {
    fn clone(&self) -> Self {
        Self {
            token: next_token(),
            elements: self.elements.clone(),
            background_color: self.background_color,
            factory: self.factory.clone(),
        }
    }
}

fn next_token() -> u64 {
    NEXT_DOCUMENT.fetch_add(1, Ordering::Relaxed)
}

impl Document {
    /// An empty document on a white canvas.
    pub fn new() -> Self {
        Self {
            token: next_token(),
            elements: IndexMap::new(),
            background_color: Color::white(),
            factory: ElementFactory::new(),
        }
    }

    /// Sets the canvas color written to `viewBackgroundColor`.
    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Replaces the element factory, e.g. with a seeded one for reproducible output.
    pub fn with_factory(mut self, factory: ElementFactory) -> Self {
        self.factory = factory;
        self
    }

    /// Draws ids, seeds and nonces from a seeded generator.
    ///
    /// Two documents built with the same seed and the same calls produce the
    /// same elements, apart from the `updated` timestamp.
    pub fn with_seed(self, seed: u64) -> Self {
        self.with_factory(ElementFactory::seeded(seed))
    }

    pub fn background_color(&self) -> Color {
        self.background_color
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Elements in document order
    pub fn elements(&self) -> impl ExactSizeIterator<Item = &Element> {
        self.elements.values()
    }

    /// The element behind `handle`, or `None` for a handle issued by another
    /// document.
    pub fn get(&self, handle: ElementHandle) -> Option<&Element> {
        if handle.document != self.token {
            return None;
        }
        self.elements.get_index(handle.index).map(|(_, e)| e)
    }

    /// Looks an element up by its id.
    pub fn find(&self, id: &ElementId) -> Option<(ElementHandle, &Element)> {
        self.elements
            .get_full(id)
            .map(|(index, _, element)| (self.handle(index), element))
    }

    pub fn add_rectangle(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        options: &ElementOptions,
    ) -> Result<ElementHandle, ScribbleError> {
        self.add_shape(ShapeKind::Rectangle, x, y, width, height, options)
    }

    pub fn add_diamond(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        options: &ElementOptions,
    ) -> Result<ElementHandle, ScribbleError> {
        self.add_shape(ShapeKind::Diamond, x, y, width, height, options)
    }

    pub fn add_ellipse(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        options: &ElementOptions,
    ) -> Result<ElementHandle, ScribbleError> {
        self.add_shape(ShapeKind::Ellipse, x, y, width, height, options)
    }

    /// Adds a rectangle, diamond or ellipse with its top-left corner at `(x, y)`.
    pub fn add_shape(
        &mut self,
        kind: ShapeKind,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        options: &ElementOptions,
    ) -> Result<ElementHandle, ScribbleError> {
        let size = Size::new(width, height);
        let element = self.factory.shape(kind, Point::new(x, y), size, options);
        self.insert(element)
    }

    /// Adds a straight line from `(x1, y1)` to `(x2, y2)`.
    pub fn add_line(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        options: &ElementOptions,
    ) -> Result<ElementHandle, ScribbleError> {
        let (start, end) = (Point::new(x1, y1), Point::new(x2, y2));
        let element = self.factory.line(start, end, options);
        self.insert(element)
    }

    /// Adds text centered on `(x, y)`.
    pub fn add_text(
        &mut self,
        x: f64,
        y: f64,
        text: impl Into<String>,
        style: TextStyle,
        options: &ElementOptions,
    ) -> Result<ElementHandle, ScribbleError> {
        let element = self.factory.text(Point::new(x, y), text, style, options);
        self.insert(element)
    }

    /// Adds an arrow at `(x, y)` whose `points` are relative to that origin.
    ///
    /// # Errors
    ///
    /// Returns [`ScribbleError::TooFewPoints`] for paths with fewer than two
    /// points.
    pub fn add_arrow(
        &mut self,
        x: f64,
        y: f64,
        points: Vec<Point>,
        arrow: ArrowOptions,
        options: &ElementOptions,
    ) -> Result<ElementHandle, ScribbleError> {
        if points.len() < 2 {
            return Err(ScribbleError::TooFewPoints(points.len()));
        }
        let origin = Point::new(x, y);
        let element = self.factory.arrow(origin, points, arrow, options);
        self.insert(element)
    }

    /// Adds a smoothly rounded, non-elbowed arrow.
    pub fn add_curved_arrow(
        &mut self,
        x: f64,
        y: f64,
        points: Vec<Point>,
        options: &ElementOptions,
    ) -> Result<ElementHandle, ScribbleError> {
        self.add_arrow(x, y, points, ArrowOptions::curved(), options)
    }

    /// Joins the right edge of `from` to the left edge of `to` with a bound,
    /// elbowed arrow.
    pub fn connect(
        &mut self,
        from: ElementHandle,
        to: ElementHandle,
        options: &ElementOptions,
    ) -> Result<ElementHandle, ScribbleError> {
        let route = connector::straight(self.element(from)?, self.element(to)?);
        self.add_connector(route, options)
    }

    /// Joins the bottom edge of `from` to the top edge of `to` with a bound,
    /// rounded arrow bending through the default control offset.
    pub fn connect_curved(
        &mut self,
        from: ElementHandle,
        to: ElementHandle,
        options: &ElementOptions,
    ) -> Result<ElementHandle, ScribbleError> {
        self.connect_curved_with_offset(from, to, connector::default_curve_offset(), options)
    }

    /// Like [`Self::connect_curved`] with an explicit control offset relative
    /// to the start anchor.
    pub fn connect_curved_with_offset(
        &mut self,
        from: ElementHandle,
        to: ElementHandle,
        offset: Point,
        options: &ElementOptions,
    ) -> Result<ElementHandle, ScribbleError> {
        let route = connector::curved(self.element(from)?, self.element(to)?, offset);
        self.add_connector(route, options)
    }

    /// Puts every listed element into one group and returns its token.
    ///
    /// A fresh token is drawn when `group_id` is `None`. Handles are checked
    /// before any element is touched, so an out-of-range or foreign handle
    /// leaves the document unchanged. Elements already in the group are not
    /// added twice.
    pub fn group(
        &mut self,
        members: &[ElementHandle],
        group_id: Option<GroupId>,
    ) -> Result<GroupId, ScribbleError> {
        if let Some(unknown) = members.iter().find(|h| self.get(**h).is_none()) {
            return Err(ScribbleError::UnknownElement(*unknown));
        }

        let group_id = group_id.unwrap_or_else(|| self.factory.group_id());
        for handle in members {
            if let Some((_, element)) = self.elements.get_index_mut(handle.index) {
                if !element.group_ids().contains(&group_id) {
                    element.push_group(group_id.clone());
                }
            }
        }

        debug!(group_id:% = group_id, members = members.len(); "Grouped elements");
        Ok(group_id)
    }

    /// Serializes the document as an Excalidraw scene.
    ///
    /// With `pretty` the output is indented by two spaces.
    pub fn to_json(&self, pretty: bool) -> Result<String, ScribbleError> {
        excalidraw::to_json(self, pretty)
    }

    /// Writes the scene to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`ScribbleError::Io`] if the file cannot be created or written.
    /// A failed save may leave a partially written file behind.
    pub fn save(&self, path: impl AsRef<Path>, pretty: bool) -> Result<(), ScribbleError> {
        let path = path.as_ref();
        excalidraw::save(self, path, pretty)?;
        info!(path:% = path.display(), elements = self.len(); "Scene saved");
        Ok(())
    }

    fn element(&self, handle: ElementHandle) -> Result<&Element, ScribbleError> {
        match self.get(handle) {
            Some(element) => Ok(element),
            None => Err(ScribbleError::UnknownElement(handle)),
        }
    }

    fn handle(&self, index: usize) -> ElementHandle {
        ElementHandle {
            document: self.token,
            index,
        }
    }

    fn add_connector(
        &mut self,
        route: Connector,
        options: &ElementOptions,
    ) -> Result<ElementHandle, ScribbleError> {
        let (origin, points, arrow) = route.into_parts();
        self.add_arrow(origin.x(), origin.y(), points, arrow, options)
    }

    fn insert(&mut self, element: Element) -> Result<ElementHandle, ScribbleError> {
        let id = element.id().clone();
        if self.elements.contains_key(&id) {
            return Err(ScribbleError::DuplicateId(id));
        }

        debug!(id:% = id, kind:% = element.kind(); "Adding element");
        let (index, _) = self.elements.insert_full(id, element);
        Ok(self.handle(index))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use float_cmp::assert_approx_eq;

    use scribble_core::element::{ElementKind, Roundness};

    use super::*;

    fn seeded() -> Document {
        Document::new().with_factory(ElementFactory::seeded(11))
    }

    #[test]
    fn test_handles_follow_insertion_order() {
        let mut doc = seeded();
        let options = ElementOptions::default();

        let a = doc.add_rectangle(0.0, 0.0, 10.0, 10.0, &options).unwrap();
        let b = doc.add_diamond(0.0, 0.0, 10.0, 10.0, &options).unwrap();
        let c = doc.add_ellipse(0.0, 0.0, 10.0, 10.0, &options).unwrap();

        assert_eq!((a.index(), b.index(), c.index()), (0, 1, 2));
        let kinds: Vec<_> = doc.elements().map(|e| e.kind().type_name()).collect();
        assert_eq!(kinds, ["rectangle", "diamond", "ellipse"]);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut doc = seeded();
        let options = ElementOptions::default();
        for i in 0..50 {
            let at = f64::from(i);
            doc.add_rectangle(at, at, 10.0, 10.0, &options).unwrap();
        }

        let ids: HashSet<_> = doc.elements().map(|e| e.id().clone()).collect();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_duplicate_explicit_id_is_rejected() {
        let mut doc = seeded();
        let options = ElementOptions::new().with_id("box");

        doc.add_rectangle(0.0, 0.0, 10.0, 10.0, &options).unwrap();
        let err = doc.add_ellipse(0.0, 0.0, 10.0, 10.0, &options).unwrap_err();

        assert!(matches!(err, ScribbleError::DuplicateId(id) if id == "box"));
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_shape_roundness() {
        let mut doc = seeded();
        let options = ElementOptions::default();
        let rect = doc.add_rectangle(0.0, 0.0, 1.0, 1.0, &options).unwrap();
        let diamond = doc.add_diamond(0.0, 0.0, 1.0, 1.0, &options).unwrap();

        let roundness = |h| doc.get(h).unwrap().kind().roundness();
        assert_eq!(roundness(rect), Some(Roundness::AdaptiveRadius));
        assert_eq!(roundness(diamond), Some(Roundness::ProportionalRadius));
    }

    #[test]
    fn test_add_line_derives_box() {
        let mut doc = seeded();
        let line = doc
            .add_line(10.0, 10.0, 50.0, 40.0, &ElementOptions::default())
            .unwrap();
        let element = doc.get(line).unwrap();

        assert_approx_eq!(f64, element.x(), 10.0);
        assert_approx_eq!(f64, element.y(), 10.0);
        assert_approx_eq!(f64, element.width(), 40.0);
        assert_approx_eq!(f64, element.height(), 30.0);
        let ElementKind::Line(path) = element.kind() else {
            panic!("expected a line");
        };
        assert_eq!(
            path.points(),
            &[Point::new(0.0, 0.0), Point::new(40.0, 30.0)]
        );
    }

    #[test]
    fn test_add_arrow_needs_two_points() {
        let mut doc = seeded();
        let err = doc
            .add_arrow(
                0.0,
                0.0,
                vec![Point::new(0.0, 0.0)],
                ArrowOptions::default(),
                &ElementOptions::default(),
            )
            .unwrap_err();

        assert!(matches!(err, ScribbleError::TooFewPoints(1)));
        assert!(doc.is_empty());
    }

    #[test]
    fn test_connect_appends_bound_arrow() {
        let mut doc = seeded();
        let options = ElementOptions::default();
        let a = doc.add_rectangle(0.0, 0.0, 100.0, 50.0, &options).unwrap();
        let b = doc
            .add_rectangle(200.0, 0.0, 100.0, 50.0, &options)
            .unwrap();

        let arrow = doc.connect(a, b, &options).unwrap();
        let element = doc.get(arrow).unwrap();

        assert_eq!(arrow.index(), 2);
        assert_approx_eq!(f64, element.x(), 100.0);
        assert_approx_eq!(f64, element.y(), 25.0);
        let ElementKind::Arrow(path) = element.kind() else {
            panic!("expected an arrow");
        };
        assert_eq!(
            path.points(),
            &[
                Point::new(0.0, 0.0),
                Point::new(50.0, 0.0),
                Point::new(100.0, 0.0)
            ]
        );
        assert_eq!(
            path.start_binding().unwrap().element_id(),
            doc.get(a).unwrap().id()
        );
        assert_eq!(
            path.end_binding().unwrap().element_id(),
            doc.get(b).unwrap().id()
        );
    }

    #[test]
    fn test_connect_leaves_endpoints_unchanged() {
        let mut doc = seeded();
        let options = ElementOptions::default();
        let a = doc.add_rectangle(0.0, 0.0, 100.0, 50.0, &options).unwrap();
        let b = doc.add_ellipse(0.0, 200.0, 100.0, 50.0, &options).unwrap();
        let before: Vec<Element> = doc.elements().cloned().collect();

        doc.connect(a, b, &options).unwrap();
        doc.connect_curved(a, b, &options).unwrap();

        assert_eq!(doc.get(a), Some(&before[0]));
        assert_eq!(doc.get(b), Some(&before[1]));
    }

    #[test]
    fn test_connect_curved_offset() {
        let mut doc = seeded();
        let options = ElementOptions::default();
        let a = doc.add_rectangle(0.0, 0.0, 100.0, 50.0, &options).unwrap();
        let b = doc
            .add_rectangle(0.0, 150.0, 100.0, 50.0, &options)
            .unwrap();

        let arrow = doc
            .connect_curved_with_offset(a, b, Point::new(40.0, 10.0), &options)
            .unwrap();
        let ElementKind::Arrow(path) = doc.get(arrow).unwrap().kind() else {
            panic!("expected an arrow");
        };

        assert!(!path.elbowed());
        assert_eq!(path.points()[1], Point::new(40.0, 10.0));
    }

    #[test]
    fn test_connect_unknown_handle() {
        let mut doc = seeded();
        let options = ElementOptions::default();
        let a = doc.add_rectangle(0.0, 0.0, 10.0, 10.0, &options).unwrap();

        let beyond = ElementHandle {
            document: doc.token,
            index: 7,
        };

        let err = doc.connect(a, beyond, &options).unwrap_err();
        assert!(matches!(err, ScribbleError::UnknownElement(h) if h.index() == 7));
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_foreign_handle_is_rejected_even_when_in_range() {
        let options = ElementOptions::default();
        let mut other = seeded();
        let mut doc = seeded();
        let a = other.add_diamond(0.0, 0.0, 10.0, 10.0, &options).unwrap();
        let b = doc.add_rectangle(0.0, 0.0, 10.0, 10.0, &options).unwrap();
        doc.add_ellipse(50.0, 0.0, 10.0, 10.0, &options).unwrap();

        assert_eq!(a.index(), 0);
        assert_ne!(a, b);
        assert!(doc.get(a).is_none());

        let err = doc.connect(a, b, &options).unwrap_err();
        assert!(matches!(err, ScribbleError::UnknownElement(h) if h == a));

        let err = doc.group(&[b, a], None).unwrap_err();
        assert!(matches!(err, ScribbleError::UnknownElement(h) if h == a));

        assert_eq!(doc.len(), 2);
        assert!(doc.elements().all(|e| e.group_ids().is_empty()));
    }

    #[test]
    fn test_clone_issues_its_own_handles() {
        let mut doc = seeded();
        let options = ElementOptions::default();
        let a = doc.add_rectangle(0.0, 0.0, 10.0, 10.0, &options).unwrap();

        let mut copy = doc.clone();
        let b = copy.add_ellipse(0.0, 0.0, 10.0, 10.0, &options).unwrap();

        assert_eq!(copy.len(), 2);
        assert!(copy.get(a).is_none());
        assert!(doc.get(b).is_none());
        let result = copy.group(&[a, b], None);
        assert!(matches!(result, Err(ScribbleError::UnknownElement(h)) if h == a));
    }

    #[test]
    fn test_group_assigns_shared_token() {
        let mut doc = seeded();
        let options = ElementOptions::default();
        let a = doc.add_rectangle(0.0, 0.0, 10.0, 10.0, &options).unwrap();
        let b = doc
            .add_text(5.0, 5.0, "a", TextStyle::default(), &options)
            .unwrap();
        let c = doc.add_ellipse(50.0, 0.0, 10.0, 10.0, &options).unwrap();

        let group = doc.group(&[a, b], None).unwrap();

        let expected = std::slice::from_ref(&group);
        assert_eq!(doc.get(a).unwrap().group_ids(), expected);
        assert_eq!(doc.get(b).unwrap().group_ids(), expected);
        assert!(doc.get(c).unwrap().group_ids().is_empty());
        assert!(doc.elements().all(|e| e.id().as_str() != group.as_str()));
    }

    #[test]
    fn test_group_with_explicit_token_and_nesting() {
        let mut doc = seeded();
        let options = ElementOptions::default();
        let a = doc.add_rectangle(0.0, 0.0, 10.0, 10.0, &options).unwrap();
        let b = doc.add_rectangle(20.0, 0.0, 10.0, 10.0, &options).unwrap();

        let inner = doc.group(&[a, a], Some(GroupId::new("inner"))).unwrap();
        let outer = doc.group(&[a, b], None).unwrap();

        assert_eq!(inner.as_str(), "inner");
        assert_eq!(doc.get(a).unwrap().group_ids(), &[inner, outer.clone()]);
        assert_eq!(doc.get(b).unwrap().group_ids(), &[outer]);
    }

    #[test]
    fn test_group_rejects_unknown_handle_without_side_effects() {
        let mut doc = seeded();
        let options = ElementOptions::default();
        let a = doc.add_rectangle(0.0, 0.0, 10.0, 10.0, &options).unwrap();

        let beyond = ElementHandle {
            document: doc.token,
            index: 3,
        };
        let result = doc.group(&[a, beyond], None);

        assert!(matches!(result, Err(ScribbleError::UnknownElement(h)) if h == beyond));
        assert!(doc.get(a).unwrap().group_ids().is_empty());
    }

    #[test]
    fn test_find_by_id() {
        let mut doc = seeded();
        let handle = doc
            .add_rectangle(0.0, 0.0, 1.0, 1.0, &ElementOptions::new().with_id("r"))
            .unwrap();

        let (found, element) = doc.find(&ElementId::new("r")).unwrap();
        assert_eq!(found, handle);
        assert_eq!(element.id(), "r");
    }

    #[test]
    fn test_with_seed_repeats_ids() {
        let build = || {
            let mut doc = Document::new().with_seed(3);
            let handle = doc
                .add_rectangle(0.0, 0.0, 1.0, 1.0, &ElementOptions::default())
                .unwrap();
            let element = doc.get(handle).unwrap();
            (element.id().clone(), element.state().seed())
        };

        assert_eq!(build(), build());
    }

    #[test]
    fn test_background_color() {
        let doc = Document::new().with_background_color(Color::new("#f5faff").unwrap());
        assert_eq!(doc.background_color().to_hex(), "#f5faff");
        assert_eq!(Document::default().background_color().to_hex(), "#ffffff");
    }
}
