//! Error definitions.
//!
//! This module defines the typed errors of the simulator. It provides:
//! 1. **Assembly Errors:** Malformed instruction text (`LOAD R1, [0x1000]` and friends).
//! 2. **Program Errors:** Construction-time validation of instruction sequences and seeds.
//! 3. **Configuration Errors:** Failures while loading a JSON configuration.
//!
//! Runtime outcomes of the minigame (cycle limit, stepping after completion,
//! insufficient knowledge) are not errors; they are reported as text.

use std::path::PathBuf;

use thiserror::Error;

use crate::common::constants::MAX_KNOWLEDGE;
use crate::isa::instruction::Reg;

/// Errors raised while parsing the text form of an instruction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AsmError {
    /// The line contained no mnemonic.
    #[error("empty instruction text")]
    Empty,

    /// The mnemonic is not one of LOAD, ADD, SUB, STORE, JUMP.
    #[error("unknown opcode `{0}`")]
    UnknownOpcode(String),

    /// The mnemonic was given the wrong number of operands.
    #[error("{mnemonic} expects {expected} operand(s), found {found}")]
    OperandCount {
        /// Upper-case mnemonic.
        mnemonic: &'static str,
        /// Operands required by the mnemonic.
        expected: usize,
        /// Operands present in the text.
        found: usize,
    },

    /// An operand that must be a register was not `R<n>` with n in range.
    #[error("invalid register `{0}`")]
    InvalidRegister(String),

    /// An operand that must be a register or `#<int>` was neither.
    #[error("invalid register or immediate `{0}`")]
    InvalidOperand(String),

    /// A memory operand was not `[0x<hex>]` or `[<dec>]`.
    #[error("invalid memory address `{0}`")]
    InvalidAddress(String),

    /// A jump target was not an identifier.
    #[error("invalid label `{0}`")]
    InvalidLabel(String),
}

/// Errors raised while validating a program before it is simulated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgramError {
    /// A program must contain at least one instruction.
    #[error("program has no instructions")]
    Empty,

    /// Instruction text at the given (1-based) position did not parse.
    #[error("instruction {index}: {source}")]
    Asm {
        /// 1-based instruction number.
        index: usize,
        /// Underlying parse failure.
        #[source]
        source: AsmError,
    },

    /// An instruction references a register the register file was not seeded with.
    #[error("instruction {index}: register {reg} is not present in the register file")]
    UnknownRegister {
        /// 1-based instruction number.
        index: usize,
        /// Offending register.
        reg: Reg,
    },

    /// An instruction references a memory address that was not seeded.
    #[error("instruction {index}: address {addr:#06x} is not mapped")]
    UnmappedAddress {
        /// 1-based instruction number.
        index: usize,
        /// Offending address.
        addr: u32,
    },

    /// A register seed name was not `R<n>` or `PC`.
    #[error("invalid register seed name `{0}`")]
    InvalidSeedRegister(String),

    /// The same address was seeded twice.
    #[error("address {0:#06x} is seeded more than once")]
    DuplicateAddress(u32),
}

/// Errors raised while loading a simulator configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The configuration text was not valid JSON for `SimConfig`.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configured program failed validation.
    #[error("invalid program: {0}")]
    Program(#[from] ProgramError),

    /// The knowledge threshold lies above the top of the knowledge scale.
    #[error("knowledge threshold {0} is outside the 0-{max} scale", max = MAX_KNOWLEDGE)]
    KnowledgeThreshold(u8),
}
