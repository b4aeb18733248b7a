#![forbid(unsafe_code)]

//! Rendering adapter for `arbora-core` scene layouts.
//!
//! The core emits format-agnostic coordinates; this crate turns them into a
//! standalone SVG document. No I/O: callers decide where the string goes.

pub mod path;
pub mod svg;

pub use svg::{SvgRenderOptions, render_scene_svg};
