//! Excalidraw JSON scene format.
//!
//! The viewer is strict about field names and presence, so every element is
//! written through a borrowed wire record whose shape is fixed per variant:
//!
//! | Variant | Fields beyond the shared base |
//! |---------|-------------------------------|
//! | rectangle, diamond, ellipse | `roundness` |
//! | line | `points`, `lastCommittedPoint` |
//! | arrow | `points`, `lastCommittedPoint`, `startBinding`, `endBinding`, `startArrowhead`, `endArrowhead`, `elbowed`, `fixedSegments`, `startIsSpecial`, `endIsSpecial`, and `roundness` when curved |
//! | text | `text`, `fontSize`, `fontFamily`, `textAlign`, `verticalAlign`, `baseline` |
//!
//! Absent values that the format still expects as keys (`frameId`, `link`,
//! `startArrowhead`, ...) are written as `null`.

use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use serde::Serialize;

use scribble_core::{
    color::Color,
    element::{
        Arrowhead, Binding, Element, ElementKind, FillStyle, FixedSegment, FontFamily, Roundness,
        StrokeStyle, TextAlign, VerticalAlign,
    },
    geometry::Point,
    identifier::{ElementId, GroupId},
};

use crate::{Document, ScribbleError};

/// Value of the top-level `type` key.
pub const SCENE_TYPE: &str = "excalidraw";

/// Scene schema version.
pub const FORMAT_VERSION: u32 = 2;

/// Origin recorded in the `source` key.
pub const SOURCE: &str = "https://excalidraw.com";

pub const GRID_SIZE: u32 = 20;
pub const GRID_STEP: u32 = 5;

/// A document viewed as an Excalidraw scene, ready to serialize.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene<'a> {
    #[serde(rename = "type")]
    scene_type: &'static str,
    version: u32,
    source: &'static str,
    elements: Vec<ElementRecord<'a>>,
    app_state: AppState,
    files: BTreeMap<String, ()>,
}

impl<'a> Scene<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self {
            scene_type: SCENE_TYPE,
            version: FORMAT_VERSION,
            source: SOURCE,
            elements: document.elements().map(ElementRecord::new).collect(),
            app_state: AppState {
                grid_size: GRID_SIZE,
                grid_step: GRID_STEP,
                grid_mode_enabled: false,
                view_background_color: document.background_color(),
            },
            files: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AppState {
    grid_size: u32,
    grid_step: u32,
    grid_mode_enabled: bool,
    view_background_color: Color,
}

/// Shared base fields plus the variant's own fields, flattened into one object.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ElementRecord<'a> {
    id: &'a ElementId,
    #[serde(rename = "type")]
    element_type: &'static str,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    angle: f64,
    stroke_color: Color,
    background_color: Color,
    fill_style: FillStyle,
    stroke_width: f64,
    stroke_style: StrokeStyle,
    roughness: i32,
    opacity: i32,
    group_ids: &'a [GroupId],
    frame_id: Option<&'a ElementId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    roundness: Option<Roundness>,
    seed: i64,
    version: u32,
    version_nonce: i64,
    is_deleted: bool,
    bound_elements: &'a [ElementId],
    updated: i64,
    link: Option<&'a str>,
    locked: bool,
    #[serde(flatten)]
    variant: VariantFields<'a>,
}

impl<'a> ElementRecord<'a> {
    fn new(element: &'a Element) -> Self {
        let paint = element.paint();
        let state = element.state();
        Self {
            id: element.id(),
            element_type: element.kind().type_name(),
            x: element.x(),
            y: element.y(),
            width: element.width(),
            height: element.height(),
            angle: element.angle(),
            stroke_color: paint.stroke_color(),
            background_color: paint.background_color(),
            fill_style: paint.fill_style(),
            stroke_width: paint.stroke_width(),
            stroke_style: paint.stroke_style(),
            roughness: paint.roughness(),
            opacity: paint.opacity(),
            group_ids: element.group_ids(),
            frame_id: None,
            roundness: element.kind().roundness(),
            seed: state.seed(),
            version: state.version(),
            version_nonce: state.version_nonce(),
            is_deleted: false,
            bound_elements: &[],
            updated: state.updated(),
            link: None,
            locked: false,
            variant: VariantFields::new(element.kind()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum VariantFields<'a> {
    Shape(ShapeFields),
    Line(LineFields<'a>),
    Arrow(ArrowFields<'a>),
    Text(TextFields<'a>),
}

impl<'a> VariantFields<'a> {
    fn new(kind: &'a ElementKind) -> Self {
        match kind {
            ElementKind::Rectangle | ElementKind::Diamond | ElementKind::Ellipse => {
                Self::Shape(ShapeFields {})
            }
            ElementKind::Line(path) => Self::Line(LineFields {
                points: path.points(),
                last_committed_point: None,
            }),
            ElementKind::Arrow(path) => Self::Arrow(ArrowFields {
                points: path.points(),
                last_committed_point: None,
                start_binding: path.start_binding(),
                end_binding: path.end_binding(),
                start_arrowhead: path.start_arrowhead(),
                end_arrowhead: path.end_arrowhead(),
                elbowed: path.elbowed(),
                fixed_segments: path.fixed_segments(),
                start_is_special: path.start_is_special(),
                end_is_special: path.end_is_special(),
            }),
            ElementKind::Text(block) => {
                let style = block.style();
                Self::Text(TextFields {
                    text: block.text(),
                    font_size: style.font_size(),
                    font_family: style.font_family(),
                    text_align: style.text_align(),
                    vertical_align: style.vertical_align(),
                    baseline: block.baseline(),
                })
            }
        }
    }
}

/// Closed shapes add nothing beyond the base record.
#[derive(Debug, Serialize)]
struct ShapeFields {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LineFields<'a> {
    points: &'a [Point],
    last_committed_point: Option<Point>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ArrowFields<'a> {
    points: &'a [Point],
    last_committed_point: Option<Point>,
    start_binding: Option<&'a Binding>,
    end_binding: Option<&'a Binding>,
    start_arrowhead: Option<Arrowhead>,
    end_arrowhead: Option<Arrowhead>,
    elbowed: bool,
    fixed_segments: Option<&'a [FixedSegment]>,
    start_is_special: Option<bool>,
    end_is_special: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TextFields<'a> {
    text: &'a str,
    font_size: f64,
    font_family: FontFamily,
    text_align: TextAlign,
    vertical_align: VerticalAlign,
    baseline: u32,
}

/// Serializes `document` to a JSON string, two-space indented when `pretty`.
pub fn to_json(document: &Document, pretty: bool) -> Result<String, ScribbleError> {
    let scene = Scene::new(document);
    let json = if pretty {
        serde_json::to_string_pretty(&scene)?
    } else {
        serde_json::to_string(&scene)?
    };
    Ok(json)
}

/// Serializes `document` into a JSON value tree.
pub fn to_value(document: &Document) -> Result<serde_json::Value, ScribbleError> {
    Ok(serde_json::to_value(Scene::new(document))?)
}

/// Writes `document` to `path` as UTF-8 JSON.
///
/// The file handle is closed when this returns, on success or failure.
pub fn save(document: &Document, path: &Path, pretty: bool) -> Result<(), ScribbleError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_scene(document, &mut writer, pretty)?;
    writer.flush()?;
    Ok(())
}

/// Writes `document` to any writer.
pub fn write_scene<W: Write>(
    document: &Document,
    writer: W,
    pretty: bool,
) -> Result<(), ScribbleError> {
    let scene = Scene::new(document);
    if pretty {
        serde_json::to_writer_pretty(writer, &scene)?;
    } else {
        serde_json::to_writer(writer, &scene)?;
    }
    Ok(())
}
