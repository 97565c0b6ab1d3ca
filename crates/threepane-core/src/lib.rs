//! Threepane Core
//!
//! This crate contains the foundation types shared by the threepane widget
//! toolkit: logging setup, math and geometry primitives, colors, and
//! collection aliases.

pub mod alloc;
pub mod color;
pub mod geometry;
pub mod logging;
pub mod math;

pub use color::Color;
