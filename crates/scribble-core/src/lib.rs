//! Scribble Core Types and Definitions
//!
//! This crate provides the element model behind Scribble scenes. It includes:
//!
//! - **Identifiers**: Element and group tokens ([`identifier::ElementId`], [`identifier::GroupId`])
//! - **Colors**: CSS color parsing with hex output ([`color::Color`])
//! - **Geometry**: Points and bounding boxes ([`geometry`] module)
//! - **Elements**: The shared element record and its variants ([`element`] module)
//! - **Connectors**: Anchor and binding calculations between placed elements ([`connector`] module)

pub mod color;
pub mod connector;
pub mod element;
pub mod geometry;
pub mod identifier;
