use super::Cpu;
use super::decode::{Fields, Instruction, Mnemonic, sign_extend16};
use super::syscall::handle_syscall;
use super::trap::{Trap, WithPc};
use crate::console::Console;
use crate::mem::{Memory, TEXT_BASE, stack_index};
use tracing::warn;

/// Run one decoded instruction. `pc` is the instruction's own index;
/// `cpu.pc` already points past it and is only touched by branches and jumps.
pub fn execute<C: Console + ?Sized>(
    cpu: &mut Cpu,
    mem: &mut Memory,
    console: &mut C,
    pc: u32,
    instr: Instruction,
) -> Result<(), Trap> {
    let r = |cpu: &Cpu, idx: u8| -> u32 { cpu.read_reg(idx) };

    match (instr.mnemonic, instr.fields) {
        (Mnemonic::Add, Fields::R { rs, rt, rd, .. }) => {
            cpu.write_reg(rd, r(cpu, rs).wrapping_add(r(cpu, rt)));
        }
        (Mnemonic::Sub, Fields::R { rs, rt, rd, .. }) => {
            cpu.write_reg(rd, r(cpu, rs).wrapping_sub(r(cpu, rt)));
        }
        (Mnemonic::And, Fields::R { rs, rt, rd, .. }) => {
            cpu.write_reg(rd, r(cpu, rs) & r(cpu, rt));
        }
        (Mnemonic::Or, Fields::R { rs, rt, rd, .. }) => {
            cpu.write_reg(rd, r(cpu, rs) | r(cpu, rt));
        }
        (Mnemonic::Slt, Fields::R { rs, rt, rd, .. }) => {
            let lt = (r(cpu, rs) as i32) < (r(cpu, rt) as i32);
            cpu.write_reg(rd, lt as u32);
        }
        // the immediate is added as its raw 16 bits, not sign-extended
        (Mnemonic::Addiu, Fields::I { rs, rt, imm }) => {
            cpu.write_reg(rt, r(cpu, rs).wrapping_add(imm as u32));
        }
        (Mnemonic::Andi, Fields::I { rs, rt, imm }) => {
            cpu.write_reg(rt, r(cpu, rs) & imm as u32);
        }
        (Mnemonic::Ori, Fields::I { rs, rt, imm }) => {
            cpu.write_reg(rt, r(cpu, rs) | imm as u32);
        }
        (Mnemonic::Lui, Fields::I { rt, imm, .. }) => {
            cpu.write_reg(rt, (imm as u32) << 16);
        }
        (Mnemonic::Beq, Fields::I { rs, rt, imm }) => {
            if r(cpu, rs) == r(cpu, rt) {
                cpu.pc = branch_target(cpu.pc, imm, pc)?;
            }
        }
        (Mnemonic::Bne, Fields::I { rs, rt, imm }) => {
            if r(cpu, rs) != r(cpu, rt) {
                cpu.pc = branch_target(cpu.pc, imm, pc)?;
            }
        }
        (Mnemonic::J, Fields::J { target }) => {
            cpu.pc = jump_target(cpu.pc, target, pc)?;
        }
        (Mnemonic::Lw, Fields::I { rs: base, rt, imm }) => {
            let index = stack_index(r(cpu, base), imm);
            let word = mem.read_stack(index).with_pc(pc)?;
            cpu.write_reg(rt, word);
        }
        (Mnemonic::Sw, Fields::I { rs: base, rt, imm }) => {
            let index = stack_index(r(cpu, base), imm);
            mem.write_stack(index, r(cpu, rt)).with_pc(pc)?;
        }
        // an R-format word with funct 0x0c resolves to syscall too
        (Mnemonic::Syscall, _) => handle_syscall(cpu, mem, console, pc)?,
        (Mnemonic::Unknown, _) => {
            warn!(pc, "unknown instruction {:08x}", instr.word);
        }
        (mnemonic, _) => {
            return Err(Trap::Malformed {
                pc,
                mnemonic,
                format: instr.format(),
            });
        }
    }

    Ok(())
}

/// `next` plus the two's-complement branch offset.
fn branch_target(next: u32, imm: u16, pc: u32) -> Result<u32, Trap> {
    let target = next as i64 + sign_extend16(imm) as i64;
    u32::try_from(target).map_err(|_| Trap::BranchOutOfRange { pc, target })
}

/// Splice the 26-bit index under the top four bits of the current byte
/// address, then go back to instruction units relative to the text base.
fn jump_target(next: u32, target: u32, pc: u32) -> Result<u32, Trap> {
    let byte_pc = TEXT_BASE.wrapping_add(next.wrapping_mul(4));
    let dest = (byte_pc & 0xf000_0000) | (target << 2);
    let offset = dest
        .checked_sub(TEXT_BASE)
        .ok_or(Trap::JumpOutOfRange { pc, dest })?;
    Ok(offset >> 2)
}
