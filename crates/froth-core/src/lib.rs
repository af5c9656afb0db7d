//! Froth Core - Foundational types for the Froth bubble engine
//!
//! This crate provides the types shared by every other Froth crate:
//! - `Vec2` - Point in normalized viewport space, used for pointer hit tests
//! - `PixelSize` - Host viewport size in CSS pixels
//! - Error types and Result alias

mod error;
mod types;

pub use error::{FrothError, Result};
pub use types::{PixelSize, Vec2};
