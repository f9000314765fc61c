//! Scene serialization.
//!
//! [`excalidraw`] maps a [`Document`](crate::Document) onto the Excalidraw
//! JSON scene format. The mapping is a single dispatch over the element
//! variants so each kind writes exactly its own field set.

pub mod excalidraw;
