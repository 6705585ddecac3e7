//! Procedural renderer for the FinanceFlow app icon: a banded radial gradient
//! with a tapered white curve, written out as an RGB PNG.

pub mod canvas;
pub mod config;
pub mod contents_json;
pub mod icon_gen;

pub use config::IconConfig;
