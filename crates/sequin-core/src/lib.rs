//! Core building blocks for Sequin sequence diagrams.
//!
//! # Overview
//!
//! - [`geometry`]: Points, sizes, rectangles, insets, and measurement constraints.
//! - [`color`]: A thin wrapper around the `color` crate for CSS color parsing.
//! - [`draw`]: Stroke definitions, layered SVG output, and text measurement.
//!
//! This crate carries no diagram semantics. The scene model and layout
//! solvers live in the `sequin` crate and build on the types defined here.

pub mod color;
pub mod draw;
pub mod geometry;
