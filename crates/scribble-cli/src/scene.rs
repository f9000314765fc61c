//! Declarative scene files.
//!
//! A scene is a TOML document listing elements, the arrows that connect
//! them and the groups they belong to:
//!
//! ```toml
//! background = "#f0f9ff"
//!
//! [[element]]
//! name = "start"
//! kind = "ellipse"
//! x = 100
//! y = 50
//! width = 100
//! height = 50
//! style = { background_color = "#b9f8b9", roughness = 0 }
//!
//! [[element]]
//! kind = "text"
//! x = 150
//! y = 75
//! text = "Start"
//!
//! [[connect]]
//! from = "start"
//! to = "init"
//! route = "curved"
//!
//! [[group]]
//! members = ["start", "init"]
//! ```
//!
//! Elements are added in file order, then connections, then groups. Names
//! are local to the scene file; element ids are generated unless `id` is set.

use std::collections::HashMap;

use log::debug;
use miette::{NamedSource, SourceSpan};
use serde::Deserialize;

use scribble::{
    Document, ElementHandle,
    color::Color,
    element::{ArrowOptions, Arrowhead, ElementOptions, ShapeKind, TextStyle},
    geometry::Point,
    identifier::GroupId,
};

use crate::error::CliError;

/// Parsed contents of a scene file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneFile {
    #[serde(default)]
    background: Option<Color>,
    #[serde(default, rename = "element")]
    elements: Vec<ElementSpec>,
    #[serde(default, rename = "connect")]
    connections: Vec<ConnectSpec>,
    #[serde(default, rename = "group")]
    groups: Vec<GroupSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum ElementSpec {
    Rectangle(ShapeSpec),
    Diamond(ShapeSpec),
    Ellipse(ShapeSpec),
    Line(LineSpec),
    Text(TextSpec),
    Arrow(ArrowSpec),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ShapeSpec {
    name: Option<String>,
    id: Option<String>,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    #[serde(default)]
    style: ElementOptions,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LineSpec {
    name: Option<String>,
    id: Option<String>,
    from: (f64, f64),
    to: (f64, f64),
    #[serde(default)]
    style: ElementOptions,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TextSpec {
    name: Option<String>,
    id: Option<String>,
    x: f64,
    y: f64,
    text: String,
    #[serde(default)]
    font: TextStyle,
    #[serde(default)]
    style: ElementOptions,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ArrowSpec {
    name: Option<String>,
    id: Option<String>,
    x: f64,
    y: f64,
    points: Vec<(f64, f64)>,
    #[serde(default)]
    curved: bool,
    #[serde(default)]
    heads: HeadSpec,
    #[serde(default)]
    style: ElementOptions,
}

/// Arrowheads of a free arrow; `"none"` removes a head.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct HeadSpec {
    start: HeadChoice,
    end: HeadChoice,
}

impl Default for HeadSpec {
    fn default() -> Self {
        Self {
            start: HeadChoice::None,
            end: HeadChoice::Arrow,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum HeadChoice {
    None,
    Arrow,
    Bar,
    Dot,
    Triangle,
}

impl From<HeadChoice> for Option<Arrowhead> {
    fn from(choice: HeadChoice) -> Self {
        match choice {
            HeadChoice::None => None,
            HeadChoice::Arrow => Some(Arrowhead::Arrow),
            HeadChoice::Bar => Some(Arrowhead::Bar),
            HeadChoice::Dot => Some(Arrowhead::Dot),
            HeadChoice::Triangle => Some(Arrowhead::Triangle),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Route {
    #[default]
    Straight,
    Curved,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConnectSpec {
    name: Option<String>,
    from: String,
    to: String,
    #[serde(default)]
    route: Route,
    /// Control vertex of a curved route, relative to its start anchor
    offset: Option<(f64, f64)>,
    #[serde(default)]
    style: ElementOptions,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GroupSpec {
    members: Vec<String>,
    id: Option<String>,
}

impl SceneFile {
    /// Parses scene TOML. `origin` names the source in diagnostics.
    pub fn parse(source: &str, origin: &str) -> Result<Self, CliError> {
        toml::from_str(source).map_err(|err| CliError::SceneSyntax {
            message: err.message().to_string(),
            src: NamedSource::new(origin, source.to_string()),
            span: err.span().map(SourceSpan::from),
        })
    }

    /// Canvas color declared by the scene, if any.
    pub fn background(&self) -> Option<Color> {
        self.background
    }

    /// Adds every element, connection and group of the scene to `doc`.
    pub fn build_into(&self, doc: &mut Document) -> Result<(), CliError> {
        let mut names = NameTable::default();

        for spec in &self.elements {
            let (name, handle) = spec.add_to(doc)?;
            names.declare(name, handle)?;
        }

        for spec in &self.connections {
            let from = names.resolve(&spec.from, "a connection")?;
            let to = names.resolve(&spec.to, "a connection")?;
            let handle = match (spec.route, spec.offset) {
                (Route::Straight, _) => doc.connect(from, to, &spec.style)?,
                (Route::Curved, None) => doc.connect_curved(from, to, &spec.style)?,
                (Route::Curved, Some(offset)) => {
                    doc.connect_curved_with_offset(from, to, Point::from(offset), &spec.style)?
                }
            };
            names.declare(spec.name.as_deref(), handle)?;
        }

        for spec in &self.groups {
            let members = spec
                .members
                .iter()
                .map(|name| names.resolve(name, "a group"))
                .collect::<Result<Vec<_>, _>>()?;
            let group_id = doc.group(&members, spec.id.as_deref().map(GroupId::new))?;
            debug!(group_id:% = group_id, members = members.len(); "Scene group created");
        }

        Ok(())
    }
}

impl ElementSpec {
    fn add_to(&self, doc: &mut Document) -> Result<(Option<&str>, ElementHandle), CliError> {
        let handle = match self {
            Self::Rectangle(spec) => spec.add_to(doc, ShapeKind::Rectangle)?,
            Self::Diamond(spec) => spec.add_to(doc, ShapeKind::Diamond)?,
            Self::Ellipse(spec) => spec.add_to(doc, ShapeKind::Ellipse)?,
            Self::Line(spec) => {
                let options = with_id(&spec.style, spec.id.as_deref());
                let ((x1, y1), (x2, y2)) = (spec.from, spec.to);
                doc.add_line(x1, y1, x2, y2, &options)?
            }
            Self::Text(spec) => {
                let options = with_id(&spec.style, spec.id.as_deref());
                doc.add_text(spec.x, spec.y, spec.text.as_str(), spec.font, &options)?
            }
            Self::Arrow(spec) => {
                let options = with_id(&spec.style, spec.id.as_deref());
                let points = spec.points.iter().copied().map(Point::from).collect();
                let base = if spec.curved {
                    ArrowOptions::curved()
                } else {
                    ArrowOptions::new()
                };
                let arrow = base
                    .with_start_arrowhead(spec.heads.start.into())
                    .with_end_arrowhead(spec.heads.end.into());
                doc.add_arrow(spec.x, spec.y, points, arrow, &options)?
            }
        };
        Ok((self.name(), handle))
    }

    fn name(&self) -> Option<&str> {
        match self {
            Self::Rectangle(spec) | Self::Diamond(spec) | Self::Ellipse(spec) => {
                spec.name.as_deref()
            }
            Self::Line(spec) => spec.name.as_deref(),
            Self::Text(spec) => spec.name.as_deref(),
            Self::Arrow(spec) => spec.name.as_deref(),
        }
    }
}

impl ShapeSpec {
    fn add_to(&self, doc: &mut Document, kind: ShapeKind) -> Result<ElementHandle, CliError> {
        let options = with_id(&self.style, self.id.as_deref());
        let (x, y, width, height) = (self.x, self.y, self.width, self.height);
        Ok(doc.add_shape(kind, x, y, width, height, &options)?)
    }
}

fn with_id(style: &ElementOptions, id: Option<&str>) -> ElementOptions {
    let mut options = style.clone();
    if let Some(id) = id {
        options.set_id(id);
    }
    options
}

#[derive(Debug, Default)]
struct NameTable {
    handles: HashMap<String, ElementHandle>,
}

impl NameTable {
    fn declare(&mut self, name: Option<&str>, handle: ElementHandle) -> Result<(), CliError> {
        let Some(name) = name else {
            return Ok(());
        };
        if self.handles.insert(name.to_string(), handle).is_some() {
            return Err(CliError::DuplicateName(name.to_string()));
        }
        Ok(())
    }

    fn resolve(&self, name: &str, context: &'static str) -> Result<ElementHandle, CliError> {
        self.handles
            .get(name)
            .copied()
            .ok_or_else(|| CliError::UnknownName {
                name: name.to_string(),
                context,
            })
    }
}
