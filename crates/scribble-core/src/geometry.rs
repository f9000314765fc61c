//! Geometric primitives for element placement and connector routing.
//!
//! This module provides fundamental geometric types used throughout Scribble
//! for positioning elements and deriving anchors on their edges.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in scene space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//!
//! # Coordinate System
//!
//! Scenes use the same coordinate system as the Excalidraw canvas:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward
//!
//! Coordinates are `f64` because they are written verbatim into JSON numbers.

use serde::{Serialize, Serializer, ser::SerializeTuple};

/// A 2D point representing a position in scene coordinate space.
///
/// Serializes as a two-element array `[x, y]`, which is how Excalidraw stores
/// the vertices of lines and arrows.
///
/// # Examples
///
/// ```
/// # use scribble_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
///
/// let mid = p1.midpoint(p2);
/// assert_eq!(mid.x(), 7.5);
/// assert_eq!(mid.y(), 12.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point.
    ///
    /// This is how absolute positions become offsets relative to an origin.
    ///
    /// # Examples
    ///
    /// ```
    /// # use scribble_core::geometry::Point;
    /// let origin = Point::new(100.0, 25.0);
    /// let target = Point::new(200.0, 25.0);
    ///
    /// let relative = target.sub_point(origin);
    /// assert_eq!(relative.x(), 100.0);
    /// assert_eq!(relative.y(), 0.0);
    /// ```
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Returns the component-wise minimum of two points
    pub fn min(self, other: Point) -> Self {
        Self {
            x: self.x.min(other.x),
            y: self.y.min(other.y),
        }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl Serialize for Point {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.x)?;
        tuple.serialize_element(&self.y)?;
        tuple.end()
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f64 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f64 {
        self.height
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Bounds {
    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Creates a new bounds from a center point and a size
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half_width = size.width / 2.0;
        let half_height = size.height / 2.0;
        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_height,
            max_x: center.x + half_width,
            max_y: center.y + half_height,
        }
    }

    /// Creates the smallest bounds containing both corner points, in any order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use scribble_core::geometry::{Bounds, Point};
    /// let bounds = Bounds::from_corners(Point::new(50.0, 40.0), Point::new(10.0, 10.0));
    /// assert_eq!(bounds.min_x(), 10.0);
    /// assert_eq!(bounds.min_y(), 10.0);
    /// assert_eq!(bounds.width(), 40.0);
    /// assert_eq!(bounds.height(), 30.0);
    /// ```
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f64 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f64 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f64 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f64 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f64 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f64 {
        self.max_y - self.min_y
    }

    /// Returns the top-left corner as a Point
    pub fn min_point(self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Converts bounds to a Size object
    pub fn to_size(self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Midpoint of the left edge
    pub fn left_center(self) -> Point {
        Point::new(self.min_x, self.center().y)
    }

    /// Midpoint of the right edge
    pub fn right_center(self) -> Point {
        Point::new(self.max_x, self.center().y)
    }

    /// Midpoint of the top edge
    pub fn top_center(self) -> Point {
        Point::new(self.center().x, self.min_y)
    }

    /// Midpoint of the bottom edge
    pub fn bottom_center(self) -> Point {
        Point::new(self.center().x, self.max_y)
    }
}
