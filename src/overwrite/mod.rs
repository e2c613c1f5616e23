// Pattern overwrite engine
//
// The guaranteed data-destruction path: a deterministic sequence of fixed and
// random byte patterns written across the entire addressable range, pass by
// pass. Vendor secure erase may or may not have worked; these passes must.

pub mod engine;
pub mod pattern;

pub use engine::OverwriteEngine;
pub use pattern::{dod_sequence, OverwritePass, Pattern, BLOCK_SIZE, DOD_PASS_COUNT};
