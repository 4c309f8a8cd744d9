//! Instruction definitions.
//!
//! The teaching ISA has five instructions. Each variant carries exactly the
//! operands it needs, so every consumer matches exhaustively and there is no
//! "unknown opcode" path once an instruction exists.

use std::fmt;

/// A general-purpose register `R<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Reg(pub u8);

impl Reg {
    /// Returns the register index.
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.0)
    }
}

/// Second ALU operand: an immediate literal or a register read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// Literal value (`#5`).
    Imm(i64),
    /// Register reference (`R3`).
    Reg(Reg),
}

impl Operand {
    /// Returns the register if this operand reads one.
    #[inline]
    pub const fn reg(self) -> Option<Reg> {
        match self {
            Self::Reg(r) => Some(r),
            Self::Imm(_) => None,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Imm(v) => write!(f, "#{v}"),
            Self::Reg(r) => write!(f, "{r}"),
        }
    }
}

/// One instruction of the teaching ISA.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// `LOAD rd, [addr]`: `rd = mem[addr]` in the Memory stage.
    Load {
        /// Destination register.
        rd: Reg,
        /// Absolute memory address.
        addr: u32,
    },
    /// `ADD rd, rs, op2`: `rd = rs + op2` in the Execute stage.
    Add {
        /// Destination register.
        rd: Reg,
        /// First source register.
        rs: Reg,
        /// Second source (immediate or register).
        op2: Operand,
    },
    /// `SUB rd, rs, op2`: `rd = rs - op2` in the Execute stage.
    Sub {
        /// Destination register.
        rd: Reg,
        /// First source register.
        rs: Reg,
        /// Second source (immediate or register).
        op2: Operand,
    },
    /// `STORE rs, [addr]`: `mem[addr] = rs` in the Memory stage.
    Store {
        /// Register whose value is stored.
        rs: Reg,
        /// Absolute memory address.
        addr: u32,
    },
    /// `JUMP label`: no architectural effect in this model.
    Jump {
        /// Target label, kept for display only.
        label: String,
    },
}

impl Instruction {
    /// Upper-case mnemonic, as shown in the pipeline diagram.
    pub const fn mnemonic(&self) -> &'static str {
        match self {
            Self::Load { .. } => "LOAD",
            Self::Add { .. } => "ADD",
            Self::Sub { .. } => "SUB",
            Self::Store { .. } => "STORE",
            Self::Jump { .. } => "JUMP",
        }
    }

    /// Memory address touched by the instruction, if any.
    pub const fn address(&self) -> Option<u32> {
        match self {
            Self::Load { addr, .. } | Self::Store { addr, .. } => Some(*addr),
            Self::Add { .. } | Self::Sub { .. } | Self::Jump { .. } => None,
        }
    }

    /// Every register named by the instruction, in operand order.
    pub fn registers(&self) -> Vec<Reg> {
        match self {
            Self::Load { rd, .. } => vec![*rd],
            Self::Add { rd, rs, op2 } | Self::Sub { rd, rs, op2 } => {
                let mut regs = vec![*rd, *rs];
                regs.extend(op2.reg());
                regs
            }
            Self::Store { rs, .. } => vec![*rs],
            Self::Jump { .. } => Vec::new(),
        }
    }
}
