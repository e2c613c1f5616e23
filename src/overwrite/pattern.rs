use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Write granularity for all overwrite passes.
pub const BLOCK_SIZE: usize = 4096;

/// The DoD 5220.22-M / NIST baseline sequence is exactly three passes.
pub const DOD_PASS_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pattern {
    /// Pass pattern 0x00
    Zeros,
    /// Pass pattern 0xFF
    Ones,
    /// Statistically unpredictable bytes; cryptographic strength is not the
    /// goal. The block is drawn once per pass and repeated, which is applied
    /// consistently for the whole pass.
    Random,
}

impl Pattern {
    pub fn label(&self) -> &'static str {
        match self {
            Pattern::Zeros => "zeros",
            Pattern::Ones => "ones",
            Pattern::Random => "random",
        }
    }
}

/// One full write of a single pattern across the addressable range.
#[derive(Debug, Clone)]
pub struct OverwritePass {
    pub number: u32,
    pub pattern: Pattern,
}

impl OverwritePass {
    /// Materialize the block this pass writes, repeated to fill BLOCK_SIZE.
    pub fn materialize_block(&self) -> Vec<u8> {
        match self.pattern {
            Pattern::Zeros => vec![0x00; BLOCK_SIZE],
            Pattern::Ones => vec![0xFF; BLOCK_SIZE],
            Pattern::Random => {
                let mut block = vec![0u8; BLOCK_SIZE];
                rand::thread_rng().fill_bytes(&mut block);
                block
            }
        }
    }
}

/// The three-pass DoD sequence: zeros, ones, random. The order is fixed,
/// matches the referenced standard, and downstream audit records depend on
/// it — never reorder.
pub fn dod_sequence() -> Vec<OverwritePass> {
    vec![
        OverwritePass {
            number: 1,
            pattern: Pattern::Zeros,
        },
        OverwritePass {
            number: 2,
            pattern: Pattern::Ones,
        },
        OverwritePass {
            number: 3,
            pattern: Pattern::Random,
        },
    ]
}
