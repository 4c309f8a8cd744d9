//! Pipeline stages.

use std::fmt;

/// Position of an instruction in the pipeline.
///
/// The first five variants are real stages with a cycle cost; `Complete`
/// marks a retired instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// Instruction fetch.
    Fetch = 0,
    /// Instruction decode and register read.
    Decode = 1,
    /// ALU operation.
    Execute = 2,
    /// Data memory access.
    Memory = 3,
    /// Register writeback (bookkeeping only in this model).
    Writeback = 4,
    /// Retired.
    Complete = 5,
}

impl Stage {
    /// All positions in pipeline order, including `Complete`.
    pub const ALL: [Self; 6] = [
        Self::Fetch,
        Self::Decode,
        Self::Execute,
        Self::Memory,
        Self::Writeback,
        Self::Complete,
    ];

    /// Numeric position (0 = Fetch, 5 = Complete).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The following stage; `Complete` is absorbing.
    pub const fn next(self) -> Self {
        match self {
            Self::Fetch => Self::Decode,
            Self::Decode => Self::Execute,
            Self::Execute => Self::Memory,
            Self::Memory => Self::Writeback,
            Self::Writeback | Self::Complete => Self::Complete,
        }
    }

    /// Display name used in the pipeline diagram and hazard messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fetch => "Fetch",
            Self::Decode => "Decode",
            Self::Execute => "Execute",
            Self::Memory => "Memory",
            Self::Writeback => "Writeback",
            Self::Complete => "Complete",
        }
    }

    /// True for `Complete`.
    #[inline]
    pub const fn is_complete(self) -> bool {
        matches!(self, Self::Complete)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
