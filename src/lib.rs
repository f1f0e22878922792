//! Play Architect: drafts a Google Play Store listing with Gemini.
//!
//! The listing model, gateway and editing surfaces live in
//! `play-architect-core`. This crate adds the two front ends over it: the
//! interactive terminal shell and the headless CLI modes.

pub mod cli;
pub mod logging;
pub mod ui;
