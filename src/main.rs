use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use mips_sim::console::StdConsole;
use mips_sim::cpu::{ExitStatus, Machine, decode};
use mips_sim::loader;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Args {
    /// Program text: one 8-hex-digit instruction word per line
    #[arg(long)]
    text: PathBuf,

    /// Data segment: 8 hex digits per line, ended by 00000000
    #[arg(long)]
    data: PathBuf,

    /// Stop after N instructions (0 = run forever)
    #[arg(long, env = "MIPS_SIM_MAX_INSNS", default_value_t = 0)]
    max_insns: u64,

    /// Enable instruction trace
    #[arg(long, default_value_t = false)]
    trace: bool,

    /// Print the decoded program and exit
    #[arg(long, default_value_t = false)]
    disasm: bool,

    /// Print all registers after the run
    #[arg(long, default_value_t = false)]
    dump_regs: bool,
}

fn init_logging(trace: bool) {
    let default = if trace { "trace" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.trace);

    let program = loader::load_program(&args.text).context("loading program text")?;
    let data = loader::load_data(&args.data).context("loading data segment")?;

    if args.disasm {
        for (i, word) in program.iter().enumerate() {
            println!("{i:4}: {word:08x}  {}", decode::decode(*word));
        }
        return Ok(ExitCode::SUCCESS);
    }

    let mut machine = Machine::new(program, &data).context("initializing memory")?;
    machine.max_insns = args.max_insns;

    let mut console = StdConsole::new();
    let result = machine.run(&mut console);

    if args.dump_regs {
        for (i, reg) in machine.cpu.regs.iter().enumerate() {
            eprintln!("${i:<2} = 0x{reg:08x}");
        }
    }

    match result {
        Ok(ExitStatus::Success) => Ok(ExitCode::SUCCESS),
        Ok(ExitStatus::UnsafeTermination) => {
            eprintln!(
                "unsafe termination: ran off the end of the program at pc={}",
                machine.cpu.pc
            );
            Ok(ExitCode::FAILURE)
        }
        Err(trap) => {
            eprintln!("CPU error: {}", trap);
            eprintln!("At pc={}, after {} instructions", trap.pc(), machine.executed);
            Ok(ExitCode::FAILURE)
        }
    }
}
