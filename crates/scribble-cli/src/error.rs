//! Errors reported by the CLI.
//!
//! [`CliError`] derives [`miette::Diagnostic`] so that `main` can render
//! every failure with a code, help text and, for scene syntax errors, a
//! labelled snippet of the offending file.

use std::{io, path::PathBuf};

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use scribble::ScribbleError;

use crate::config::ConfigError;

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("failed to read scene file {path}")]
    #[diagnostic(code(scribble::io), help("check that the input path exists and is readable"))]
    ReadScene {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid scene file: {message}")]
    #[diagnostic(code(scribble::scene::syntax))]
    SceneSyntax {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: Option<SourceSpan>,
    },

    #[error("unknown element `{name}` referenced by {context}")]
    #[diagnostic(
        code(scribble::scene::unknown_name),
        help("give the element a `name` in its [[element]] table")
    )]
    UnknownName { name: String, context: &'static str },

    #[error("element name `{0}` is declared more than once")]
    #[diagnostic(code(scribble::scene::duplicate_name), help("element names must be unique"))]
    DuplicateName(String),

    #[error(transparent)]
    #[diagnostic(code(scribble::config))]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(code(scribble::document))]
    Document(#[from] ScribbleError),
}
