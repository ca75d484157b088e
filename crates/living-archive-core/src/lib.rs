//! Living Archive Core Types and Definitions
//!
//! This crate provides the foundational types shared by every part of the
//! Living Archive. It includes:
//!
//! - **Entities**: The mythological figure record ([`entity::Entity`])
//! - **Repository**: Case-insensitive name lookup ([`repository::EntityRepository`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Draw**: Text measurement, strokes and layered SVG output ([`draw`] module)

pub mod color;
pub mod draw;
pub mod entity;
pub mod geometry;
pub mod repository;
