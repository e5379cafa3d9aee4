use super::trap::{Trap, WithPc};
use super::{Cpu, REG_A0, REG_V0};
use crate::console::Console;
use crate::mem::{Memory, data_index};
use tracing::debug;

pub const PRINT_INT: u32 = 1;
pub const PRINT_STRING: u32 = 4;
pub const READ_INT: u32 = 5;
pub const EXIT: u32 = 10;

/// Service the syscall selected by `$v0`, with `$a0` as argument.
/// Unrecognised codes are ignored.
pub fn handle_syscall<C: Console + ?Sized>(
    cpu: &mut Cpu,
    mem: &Memory,
    console: &mut C,
    pc: u32,
) -> Result<(), Trap> {
    let code = cpu.regs[REG_V0];
    let a0 = cpu.regs[REG_A0];
    match code {
        PRINT_INT => console.print_int(a0 as i32).with_pc(pc)?,
        PRINT_STRING => {
            let mut index = data_index(a0);
            loop {
                let cell = mem.read_data(index).with_pc(pc)?;
                if cell == 0 {
                    break;
                }
                let ch = char::from_u32(cell).unwrap_or(char::REPLACEMENT_CHARACTER);
                console.print_char(ch).with_pc(pc)?;
                index = index.wrapping_add(1);
            }
        }
        READ_INT => {
            let value = console.read_int().with_pc(pc)?;
            cpu.regs[REG_V0] = value as u32;
        }
        EXIT => cpu.halted = true,
        _ => debug!(pc, code, "ignoring unhandled syscall"),
    }
    Ok(())
}
