use crate::console::ConsoleError;
use crate::cpu::decode::{Format, Mnemonic};
use crate::mem::MemError;
use thiserror::Error;

/// Faults that end a run. `pc` is the index of the faulting instruction.
#[derive(Error, Debug)]
pub enum Trap {
    #[error("memory error at pc={pc}: {err}")]
    Mem { pc: u32, err: MemError },

    #[error("console error at pc={pc}: {err}")]
    Console { pc: u32, err: ConsoleError },

    #[error("no instruction at pc={pc}")]
    FetchOutOfRange { pc: u32 },

    #[error("branch at pc={pc} targets negative index {target}")]
    BranchOutOfRange { pc: u32, target: i64 },

    #[error("jump at pc={pc} targets 0x{dest:08x}, below the text segment")]
    JumpOutOfRange { pc: u32, dest: u32 },

    #[error("malformed instruction at pc={pc}: {mnemonic} with {format:?}-format fields")]
    Malformed {
        pc: u32,
        mnemonic: Mnemonic,
        format: Format,
    },

    #[error("instruction limit of {limit} reached at pc={pc}")]
    InstructionLimit { pc: u32, limit: u64 },
}

impl Trap {
    pub fn pc(&self) -> u32 {
        match self {
            Trap::Mem { pc, .. } => *pc,
            Trap::Console { pc, .. } => *pc,
            Trap::FetchOutOfRange { pc } => *pc,
            Trap::BranchOutOfRange { pc, .. } => *pc,
            Trap::JumpOutOfRange { pc, .. } => *pc,
            Trap::Malformed { pc, .. } => *pc,
            Trap::InstructionLimit { pc, .. } => *pc,
        }
    }
}

/// Trait for adding PC context to errors that can become Traps
pub trait WithPc<T> {
    fn with_pc(self, pc: u32) -> Result<T, Trap>;
}

impl<T> WithPc<T> for Result<T, MemError> {
    fn with_pc(self, pc: u32) -> Result<T, Trap> {
        self.map_err(|err| Trap::Mem { pc, err })
    }
}

impl<T> WithPc<T> for Result<T, ConsoleError> {
    fn with_pc(self, pc: u32) -> Result<T, Trap> {
        self.map_err(|err| Trap::Console { pc, err })
    }
}
