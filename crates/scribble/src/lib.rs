//! Scribble - build Excalidraw scenes from code.
//!
//! A [`Document`] collects elements through its builder methods, can connect
//! them with bound arrows, and serializes to the Excalidraw JSON scene format
//! (`.excalidraw` files).
//!
//! # Examples
//!
//! ```rust,no_run
//! use scribble::{Document, element::ElementOptions};
//!
//! let mut doc = Document::new();
//! let options = ElementOptions::default();
//!
//! let start = doc.add_ellipse(100.0, 50.0, 100.0, 50.0, &options)?;
//! let step = doc.add_rectangle(300.0, 50.0, 120.0, 50.0, &options)?;
//! doc.connect(start, step, &options)?;
//!
//! doc.save("flow.excalidraw", true)?;
//! # Ok::<(), scribble::ScribbleError>(())
//! ```

pub mod config;
pub mod export;

mod document;
mod error;

pub use scribble_core::{color, connector, element, geometry, identifier};

pub use document::{Document, ElementHandle};
pub use error::ScribbleError;
