//! Charcoal turns a photograph into a pencil-sketch raster and reveals it
//! row by row, like a drawing in progress.
//!
//! # Pipeline overview
//!
//! 1. **Decode**: encoded image bytes -> [`Raster`] (gray or RGB, 8-bit)
//! 2. **Transform**: `Raster + SketchParams -> Raster` — grayscale, invert,
//!    Gaussian blur, color-dodge blend ([`transform`])
//! 3. **Reveal**: the finished sketch is copied onto a blank white canvas one
//!    row per tick, each tick emitting a [`Frame`] ([`RevealAnimation`])
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Pure transform**: [`transform`] allocates a fresh output and never
//!   mutates its input; identical inputs produce bit-identical output.
//! - **One animation run at a time**: [`Animator`] owns at most one
//!   [`RevealAnimation`]; starting a new run replaces (and thereby cancels)
//!   the previous one. No frames ever escape a superseded run.
//! - **No IO in the core**: decoding and encoding live at the [`codec`]
//!   boundary; the transform and the animator only see rasters.
//!
//! The `charcoal` binary wires this library to an `egui` window with file
//! dialogs and parameter sliders; the library itself has no UI dependency.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod anim;
mod blur;
pub mod codec;
mod error;
mod raster;
mod sketch;

pub use anim::{Animator, Frame, RevealAnimation, TICK_INTERVAL};
pub use blur::blur_gray;
pub use error::{CharcoalError, CharcoalResult};
pub use raster::{Channels, Raster};
pub use sketch::{SketchParams, transform};
