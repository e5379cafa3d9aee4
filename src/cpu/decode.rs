use std::fmt;

/// The one word that decodes as a syscall: opcode 0, funct 0x0c, all else zero.
pub const SYSCALL_WORD: u32 = 0x0000_000c;

pub const OPCODE_SPECIAL: u8 = 0x00;
pub const OPCODE_J: u8 = 0x02;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    R,
    I,
    J,
    Syscall,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mnemonic {
    // function-code table
    Add,
    And,
    Or,
    Slt,
    Sub,
    Syscall,
    // opcode table
    Addiu,
    Andi,
    Beq,
    Bne,
    J,
    Lui,
    Lw,
    Ori,
    Sw,
    Unknown,
}

impl Mnemonic {
    pub fn name(self) -> &'static str {
        match self {
            Mnemonic::Add => "add",
            Mnemonic::And => "and",
            Mnemonic::Or => "or",
            Mnemonic::Slt => "slt",
            Mnemonic::Sub => "sub",
            Mnemonic::Syscall => "syscall",
            Mnemonic::Addiu => "addiu",
            Mnemonic::Andi => "andi",
            Mnemonic::Beq => "beq",
            Mnemonic::Bne => "bne",
            Mnemonic::J => "j",
            Mnemonic::Lui => "lui",
            Mnemonic::Lw => "lw",
            Mnemonic::Ori => "ori",
            Mnemonic::Sw => "sw",
            Mnemonic::Unknown => "unknown",
        }
    }

    fn from_funct(funct: u8) -> Self {
        match funct {
            0x20 => Mnemonic::Add,
            0x24 => Mnemonic::And,
            0x25 => Mnemonic::Or,
            0x2a => Mnemonic::Slt,
            0x22 => Mnemonic::Sub,
            0x0c => Mnemonic::Syscall,
            _ => Mnemonic::Unknown,
        }
    }

    fn from_opcode(opcode: u8) -> Self {
        match opcode {
            0x09 => Mnemonic::Addiu,
            0x0c => Mnemonic::Andi,
            0x04 => Mnemonic::Beq,
            0x05 => Mnemonic::Bne,
            0x02 => Mnemonic::J,
            0x0f => Mnemonic::Lui,
            0x23 => Mnemonic::Lw,
            0x0d => Mnemonic::Ori,
            0x2b => Mnemonic::Sw,
            _ => Mnemonic::Unknown,
        }
    }

    /// Code this mnemonic is looked up by: funct for R/syscall, opcode otherwise.
    fn code(self) -> Option<u8> {
        match self {
            Mnemonic::Add => Some(0x20),
            Mnemonic::And => Some(0x24),
            Mnemonic::Or => Some(0x25),
            Mnemonic::Slt => Some(0x2a),
            Mnemonic::Sub => Some(0x22),
            Mnemonic::Syscall => Some(0x0c),
            Mnemonic::Addiu => Some(0x09),
            Mnemonic::Andi => Some(0x0c),
            Mnemonic::Beq => Some(0x04),
            Mnemonic::Bne => Some(0x05),
            Mnemonic::J => Some(0x02),
            Mnemonic::Lui => Some(0x0f),
            Mnemonic::Lw => Some(0x23),
            Mnemonic::Ori => Some(0x0d),
            Mnemonic::Sw => Some(0x2b),
            Mnemonic::Unknown => None,
        }
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fields {
    R {
        rs: u8,
        rt: u8,
        rd: u8,
        shamt: u8,
        funct: u8,
    },
    // imm is kept as the raw 16-bit pattern; branches sign-extend it themselves
    I {
        rs: u8,
        rt: u8,
        imm: u16,
    },
    J {
        target: u32,
    },
    Syscall {
        funct: u8,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub word: u32,
    pub opcode: u8,
    pub fields: Fields,
    pub mnemonic: Mnemonic,
}

impl Instruction {
    pub fn format(&self) -> Format {
        match self.fields {
            Fields::R { .. } => Format::R,
            Fields::I { .. } => Format::I,
            Fields::J { .. } => Format::J,
            Fields::Syscall { .. } => Format::Syscall,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.mnemonic;
        let op = self.opcode;
        match self.fields {
            Fields::R {
                rs,
                rt,
                rd,
                shamt,
                funct,
            } => write!(
                f,
                "{m} {{opcode: {op:02x}, rs: {rs:02x}, rt: {rt:02x}, rd: {rd:02x}, shmt: {shamt:02x}, funct: {funct:02x}}}"
            ),
            Fields::I { rs, rt, imm } => write!(
                f,
                "{m} {{opcode: {op:02x}, rs(base): {rs:02x}, rt: {rt:02x}, immediate(offset): {imm:04x}}}"
            ),
            Fields::J { target } => write!(f, "{m} {{opcode: {op:02x}, index: {target:07x}}}"),
            Fields::Syscall { funct } => write!(
                f,
                "{m} {{opcode: {op:02x}, code: 000000, funct: {funct:02x}}}"
            ),
        }
    }
}

/// Two's-complement value of a 16-bit field.
pub fn sign_extend16(imm: u16) -> i32 {
    imm as i16 as i32
}

pub fn decode(inst: u32) -> Instruction {
    let opcode = (inst >> 26) as u8;
    let rs = ((inst >> 21) & 0x1f) as u8;
    let rt = ((inst >> 16) & 0x1f) as u8;
    let rd = ((inst >> 11) & 0x1f) as u8;
    let funct = (inst & 0x3f) as u8;

    let (fields, mnemonic) = if inst == SYSCALL_WORD {
        (Fields::Syscall { funct }, Mnemonic::from_funct(funct))
    } else if opcode == OPCODE_SPECIAL {
        // shift amount is never decoded; none of the supported ops use it
        let fields = Fields::R {
            rs,
            rt,
            rd,
            shamt: 0,
            funct,
        };
        (fields, Mnemonic::from_funct(funct))
    } else if opcode == OPCODE_J {
        let target = inst & 0x03ff_ffff;
        (Fields::J { target }, Mnemonic::from_opcode(opcode))
    } else {
        let imm = (inst & 0xffff) as u16;
        (Fields::I { rs, rt, imm }, Mnemonic::from_opcode(opcode))
    };

    Instruction {
        word: inst,
        opcode,
        fields,
        mnemonic,
    }
}

/// Assemble a word for `mnemonic` from `fields`.
///
/// Returns `None` for `Unknown`, or when the field shape does not belong to
/// the mnemonic's format. Register numbers are masked to 5 bits, the jump
/// target to 26. `shamt` is ignored since the decoder never reads it.
pub fn encode(mnemonic: Mnemonic, fields: Fields) -> Option<u32> {
    let code = mnemonic.code()? as u32;
    let reg = |r: u8| (r as u32) & 0x1f;
    match (mnemonic, fields) {
        (Mnemonic::Syscall, Fields::Syscall { .. }) => Some(SYSCALL_WORD),
        (
            Mnemonic::Add | Mnemonic::And | Mnemonic::Or | Mnemonic::Slt | Mnemonic::Sub,
            Fields::R { rs, rt, rd, .. },
        ) => Some((reg(rs) << 21) | (reg(rt) << 16) | (reg(rd) << 11) | code),
        (Mnemonic::J, Fields::J { target }) => Some((code << 26) | (target & 0x03ff_ffff)),
        (
            Mnemonic::Addiu
            | Mnemonic::Andi
            | Mnemonic::Beq
            | Mnemonic::Bne
            | Mnemonic::Lui
            | Mnemonic::Lw
            | Mnemonic::Ori
            | Mnemonic::Sw,
            Fields::I { rs, rt, imm },
        ) => Some((code << 26) | (reg(rs) << 21) | (reg(rt) << 16) | imm as u32),
        _ => None,
    }
}
