//! Text elements.
//!
//! Text is placed by its center. Without a font rasterizer the box is an
//! estimate: each character is assumed to be `0.6 × font_size` wide and a
//! line `1.2 × font_size` tall. The stored `(x, y)` is the top-left corner of
//! that estimated box.

use serde::{Deserialize, Serialize, Serializer};

use crate::geometry::{Bounds, Point, Size};

const CHAR_WIDTH_FACTOR: f64 = 0.6;
const LINE_HEIGHT_FACTOR: f64 = 1.2;

/// Font families known to the viewer, written as their numeric id.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    /// Id 1, the hand-drawn font (default)
    #[default]
    Virgil,
    /// Id 2, a plain sans-serif
    Helvetica,
    /// Id 3, monospace
    Cascadia,
}

impl FontFamily {
    pub fn id(self) -> u8 {
        match self {
            Self::Virgil => 1,
            Self::Helvetica => 2,
            Self::Cascadia => 3,
        }
    }
}

impl Serialize for FontFamily {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.id())
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    Top,
    #[default]
    Middle,
    Bottom,
}

/// Typography settings for a text element.
///
/// # Examples
///
/// ```
/// use scribble_core::element::{FontFamily, TextStyle};
///
/// let style = TextStyle::new().with_font_size(28.0).with_font_family(FontFamily::Cascadia);
/// assert_eq!(style.font_size(), 28.0);
/// assert_eq!(style.font_family().id(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextStyle {
    font_size: f64,
    font_family: FontFamily,
    text_align: TextAlign,
    vertical_align: VerticalAlign,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 20.0,
            font_family: FontFamily::default(),
            text_align: TextAlign::default(),
            vertical_align: VerticalAlign::default(),
        }
    }
}

impl TextStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_font_family(mut self, font_family: FontFamily) -> Self {
        self.font_family = font_family;
        self
    }

    pub fn with_text_align(mut self, text_align: TextAlign) -> Self {
        self.text_align = text_align;
        self
    }

    pub fn with_vertical_align(mut self, vertical_align: VerticalAlign) -> Self {
        self.vertical_align = vertical_align;
        self
    }

    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    pub fn font_family(&self) -> FontFamily {
        self.font_family
    }

    pub fn text_align(&self) -> TextAlign {
        self.text_align
    }

    pub fn vertical_align(&self) -> VerticalAlign {
        self.vertical_align
    }
}

/// Content and typography of a text element.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    text: String,
    style: TextStyle,
}

impl TextBlock {
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Estimated box of the text when centered on `center`.
    ///
    /// # Examples
    ///
    /// ```
    /// use scribble_core::{element::{TextBlock, TextStyle}, geometry::Point};
    ///
    /// let block = TextBlock::new("Hi", TextStyle::new());
    /// let bounds = block.layout(Point::new(100.0, 100.0));
    /// assert!((bounds.width() - 24.0).abs() < 1e-9);
    /// assert!((bounds.min_x() - 88.0).abs() < 1e-9);
    /// ```
    pub fn layout(&self, center: Point) -> Bounds {
        Bounds::new_from_center(center, self.estimated_size())
    }

    pub fn estimated_size(&self) -> Size {
        let font_size = self.style.font_size;
        let chars = self.text.chars().count() as f64;
        Size::new(
            chars * font_size * CHAR_WIDTH_FACTOR,
            font_size * LINE_HEIGHT_FACTOR,
        )
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    /// Baseline offset; the format expects 0 for generated text.
    pub fn baseline(&self) -> u32 {
        0
    }
}
