pub mod decode;
pub mod exec;
pub mod syscall;
pub mod trap;

use crate::console::Console;
use crate::mem::{MemError, Memory, STACK_TOP};
use tracing::debug;
use trap::Trap;

pub const REG_ZERO: usize = 0;
pub const REG_V0: usize = 2;
pub const REG_A0: usize = 4;
pub const REG_SP: usize = 29;

pub struct Cpu {
    pub regs: [u32; 32],
    /// Index of the next instruction, in whole instructions.
    pub pc: u32,
    pub halted: bool,
}

impl Cpu {
    pub fn new() -> Self {
        let mut regs = [0; 32];
        regs[REG_ZERO] = 0;
        regs[REG_SP] = STACK_TOP;
        Self {
            regs,
            pc: 0,
            halted: false,
        }
    }

    pub fn read_reg(&self, idx: u8) -> u32 {
        self.regs[(idx & 0x1f) as usize]
    }

    /// Writes to `$zero` are dropped.
    pub fn write_reg(&mut self, idx: u8, val: u32) {
        let idx = (idx & 0x1f) as usize;
        if idx != REG_ZERO {
            self.regs[idx] = val;
        }
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// The terminate syscall ran.
    Success,
    /// The program ran off the end of its instructions.
    UnsafeTermination,
}

pub struct Machine {
    pub cpu: Cpu,
    pub mem: Memory,
    pub program: Vec<u32>,
    pub executed: u64,
    /// Stop after N instructions (0 = run forever)
    pub max_insns: u64,
}

impl Machine {
    pub fn new(program: Vec<u32>, data: &[u32]) -> Result<Self, MemError> {
        Ok(Self {
            cpu: Cpu::new(),
            mem: Memory::new(data)?,
            program,
            executed: 0,
            max_insns: 0,
        })
    }

    pub fn fetch(&self, pc: u32) -> Option<u32> {
        self.program.get(pc as usize).copied()
    }

    pub fn step<C: Console + ?Sized>(&mut self, console: &mut C) -> Result<(), Trap> {
        let pc = self.cpu.pc;

        // Fetch
        let inst = self.fetch(pc).ok_or(Trap::FetchOutOfRange { pc })?;
        self.cpu.pc = pc.wrapping_add(1);

        // Decode
        let decoded = decode::decode(inst);

        // Execute
        exec::execute(&mut self.cpu, &mut self.mem, console, pc, decoded)?;
        self.executed += 1;
        Ok(())
    }

    pub fn run<C: Console + ?Sized>(&mut self, console: &mut C) -> Result<ExitStatus, Trap> {
        while !self.cpu.halted && self.fetch(self.cpu.pc).is_some() {
            if self.max_insns != 0 && self.executed >= self.max_insns {
                return Err(Trap::InstructionLimit {
                    pc: self.cpu.pc,
                    limit: self.max_insns,
                });
            }
            crate::debug::trace(&self.cpu, self.executed);
            self.step(console)?;
        }
        console.flush().map_err(|err| Trap::Console {
            pc: self.cpu.pc,
            err,
        })?;

        let status = if self.cpu.halted {
            ExitStatus::Success
        } else {
            ExitStatus::UnsafeTermination
        };
        debug!(executed = self.executed, pc = self.cpu.pc, ?status, "run finished");
        Ok(status)
    }
}

/// Load `program` and `data` into a fresh machine and run it to completion.
pub fn run<C: Console + ?Sized>(
    program: Vec<u32>,
    data: &[u32],
    console: &mut C,
) -> Result<ExitStatus, Trap> {
    let mut machine = Machine::new(program, data).map_err(|err| Trap::Mem { pc: 0, err })?;
    machine.run(console)
}
