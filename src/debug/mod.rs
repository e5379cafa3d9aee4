use crate::cpu::Cpu;
use tracing::trace;

pub fn trace(cpu: &Cpu, step: u64) {
    trace!(
        "[{:08}] pc={} v0=0x{:08x} a0=0x{:08x} t0=0x{:08x} sp=0x{:08x}",
        step,
        cpu.pc,
        cpu.regs[2],
        cpu.regs[4],
        cpu.regs[8],
        cpu.regs[29]
    );
}
