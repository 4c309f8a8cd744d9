//! Assembly text for the teaching ISA.
//!
//! Converts between `Instruction` values and their canonical text form:
//!
//! ```text
//! LOAD  R1, [0x1000]
//! ADD   R2, R1, #5
//! SUB   R3, R2, R1
//! STORE R3, [0x1004]
//! JUMP  LABEL1
//! ```
//!
//! Mnemonics and register prefixes are case-insensitive on input; output is
//! always upper-case with lower-case hex addresses.

use std::fmt;
use std::str::FromStr;

use crate::common::constants::GPR_COUNT;
use crate::common::error::AsmError;
use crate::isa::instruction::{Instruction, Operand, Reg};

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.mnemonic();
        match self {
            Self::Load { rd, addr } => write!(f, "{m} {rd}, [0x{addr:04x}]"),
            Self::Add { rd, rs, op2 } | Self::Sub { rd, rs, op2 } => {
                write!(f, "{m} {rd}, {rs}, {op2}")
            }
            Self::Store { rs, addr } => write!(f, "{m} {rs}, [0x{addr:04x}]"),
            Self::Jump { label } => write!(f, "{m} {label}"),
        }
    }
}

impl Instruction {
    /// Operand text only (everything after the mnemonic).
    pub fn operands_text(&self) -> String {
        let full = self.to_string();
        full.split_once(' ')
            .map(|(_, rest)| rest.to_owned())
            .unwrap_or_default()
    }
}

impl FromStr for Reg {
    type Err = AsmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s
            .strip_prefix('R')
            .or_else(|| s.strip_prefix('r'))
            .ok_or_else(|| AsmError::InvalidRegister(s.to_owned()))?;
        match digits.parse::<u8>() {
            Ok(n) if n < GPR_COUNT && !digits.starts_with('+') => Ok(Self(n)),
            _ => Err(AsmError::InvalidRegister(s.to_owned())),
        }
    }
}

impl FromStr for Operand {
    type Err = AsmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(lit) = s.strip_prefix('#') {
            return lit
                .parse::<i64>()
                .map(Self::Imm)
                .map_err(|_| AsmError::InvalidOperand(s.to_owned()));
        }
        s.parse::<Reg>()
            .map(Self::Reg)
            .map_err(|_| AsmError::InvalidOperand(s.to_owned()))
    }
}

/// Parses `[0x1000]` or `[4096]`.
fn parse_address(s: &str) -> Result<u32, AsmError> {
    let bad = || AsmError::InvalidAddress(s.to_owned());
    let inner = s
        .strip_prefix('[')
        .and_then(|t| t.strip_suffix(']'))
        .ok_or_else(bad)?
        .trim();
    let parsed = if let Some(hex) = inner
        .strip_prefix("0x")
        .or_else(|| inner.strip_prefix("0X"))
    {
        u32::from_str_radix(hex, 16)
    } else {
        inner.parse::<u32>()
    };
    parsed.map_err(|_| bad())
}

fn parse_label(s: &str) -> Result<String, AsmError> {
    let mut chars = s.chars();
    let valid_head = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if valid_head && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(s.to_owned())
    } else {
        Err(AsmError::InvalidLabel(s.to_owned()))
    }
}

fn expect_operands(mnemonic: &'static str, ops: &[&str], expected: usize) -> Result<(), AsmError> {
    if ops.len() == expected {
        Ok(())
    } else {
        Err(AsmError::OperandCount {
            mnemonic,
            expected,
            found: ops.len(),
        })
    }
}

impl FromStr for Instruction {
    type Err = AsmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AsmError::Empty);
        }
        let (head, rest) = s.split_once(char::is_whitespace).unwrap_or((s, ""));
        let ops: Vec<&str> = if rest.trim().is_empty() {
            Vec::new()
        } else {
            rest.split(',').map(str::trim).collect()
        };

        match head.to_ascii_uppercase().as_str() {
            "LOAD" => {
                expect_operands("LOAD", &ops, 2)?;
                Ok(Self::Load {
                    rd: ops[0].parse()?,
                    addr: parse_address(ops[1])?,
                })
            }
            "ADD" => {
                expect_operands("ADD", &ops, 3)?;
                Ok(Self::Add {
                    rd: ops[0].parse()?,
                    rs: ops[1].parse()?,
                    op2: ops[2].parse()?,
                })
            }
            "SUB" => {
                expect_operands("SUB", &ops, 3)?;
                Ok(Self::Sub {
                    rd: ops[0].parse()?,
                    rs: ops[1].parse()?,
                    op2: ops[2].parse()?,
                })
            }
            "STORE" => {
                expect_operands("STORE", &ops, 2)?;
                Ok(Self::Store {
                    rs: ops[0].parse()?,
                    addr: parse_address(ops[1])?,
                })
            }
            "JUMP" => {
                expect_operands("JUMP", &ops, 1)?;
                Ok(Self::Jump {
                    label: parse_label(ops[0])?,
                })
            }
            _ => Err(AsmError::UnknownOpcode(head.to_owned())),
        }
    }
}
