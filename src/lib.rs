//! Potluck -- a seeded group-draw engine for the 48-team World Cup format.
//!
//! Exposes the field types, the draw engine, the draw-sheet notation, and
//! the batch simulator for use by integration tests and embedding callers.

pub mod draw;
pub mod field;
pub mod sheet;
pub mod simulate;
pub mod worldcup;
