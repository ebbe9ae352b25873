//! Shared types and browser-independent logic for the ID card studio.
//!
//! Everything here builds for both the native target and `wasm32`, so the
//! geometry, matching and routing rules used by the frontend are unit tested
//! without a browser.

pub mod drag;
pub mod error;
pub mod fields;
pub mod forms;
pub mod geometry;
pub mod matching;
pub mod model;
pub mod observe;
pub mod route;
pub mod stats;
pub mod upload;
