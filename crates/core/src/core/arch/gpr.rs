//! General Purpose Register file.
//!
//! Only the registers a program is seeded with exist. Reads of any other
//! register return 0, but programs are validated against the seeded set so
//! that path is never taken by a running pipeline.

use std::collections::BTreeMap;

use crate::isa::instruction::Reg;

/// Register file: seeded general registers plus the program counter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterFile {
    gprs: BTreeMap<Reg, i64>,
    pc: i64,
}

impl RegisterFile {
    /// Creates a register file with the given general registers set to zero.
    pub fn with_gprs(regs: impl IntoIterator<Item = Reg>) -> Self {
        Self {
            gprs: regs.into_iter().map(|r| (r, 0)).collect(),
            pc: 0,
        }
    }

    /// Returns true if `reg` was seeded.
    pub fn contains(&self, reg: Reg) -> bool {
        self.gprs.contains_key(&reg)
    }

    /// Reads a general register.
    pub fn read(&self, reg: Reg) -> i64 {
        self.gprs.get(&reg).copied().unwrap_or(0)
    }

    /// Writes a general register, creating it if it was not seeded.
    pub fn write(&mut self, reg: Reg, val: i64) {
        let _ = self.gprs.insert(reg, val);
    }

    /// Program counter value.
    pub const fn pc(&self) -> i64 {
        self.pc
    }

    /// Sets the program counter.
    pub const fn set_pc(&mut self, val: i64) {
        self.pc = val;
    }

    /// General registers in ascending index order.
    pub fn gprs(&self) -> impl Iterator<Item = (Reg, i64)> + '_ {
        self.gprs.iter().map(|(r, v)| (*r, *v))
    }
}
