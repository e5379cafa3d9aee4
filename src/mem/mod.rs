use thiserror::Error;

/// Address the data segment is loaded at.
pub const DATA_BASE: u32 = 0x1001_0000;
/// Initial `$sp`; stack cells are addressed downward from here.
pub const STACK_TOP: u32 = 0x7fff_effc;
/// Byte address of the first instruction, used by `j`.
pub const TEXT_BASE: u32 = 0x0040_0000;

pub const DATA_CAPACITY: usize = 256;
pub const STACK_CAPACITY: usize = 256;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemError {
    #[error("data segment index out of range: {0}")]
    DataOob(u32),
    #[error("stack segment index out of range: {0}")]
    StackOob(u32),
    #[error("data segment of {len} cells exceeds capacity of {capacity}")]
    DataTooLarge { len: usize, capacity: usize },
}

/// The two disjoint regions a program can reach: the preloaded data segment
/// (read only through the print-string syscall) and the stack segment
/// (read and written by `lw`/`sw`).
pub struct Memory {
    data: Vec<u32>,
    stack: Vec<u32>,
}

impl Memory {
    pub fn new(data: &[u32]) -> Result<Self, MemError> {
        if data.len() > DATA_CAPACITY {
            return Err(MemError::DataTooLarge {
                len: data.len(),
                capacity: DATA_CAPACITY,
            });
        }
        let mut cells = vec![0; DATA_CAPACITY];
        cells[..data.len()].copy_from_slice(data);
        Ok(Self {
            data: cells,
            stack: vec![0; STACK_CAPACITY],
        })
    }

    pub fn read_data(&self, index: u32) -> Result<u32, MemError> {
        self.data
            .get(index as usize)
            .copied()
            .ok_or(MemError::DataOob(index))
    }

    pub fn read_stack(&self, index: u32) -> Result<u32, MemError> {
        self.stack
            .get(index as usize)
            .copied()
            .ok_or(MemError::StackOob(index))
    }

    pub fn write_stack(&mut self, index: u32, v: u32) -> Result<(), MemError> {
        let cell = self
            .stack
            .get_mut(index as usize)
            .ok_or(MemError::StackOob(index))?;
        *cell = v;
        Ok(())
    }
}

/// Stack cell reached by `lw`/`sw` for a base register value and offset.
pub fn stack_index(base: u32, offset: u16) -> u32 {
    STACK_TOP.wrapping_sub(base.wrapping_add(offset as u32))
}

/// Data cell a print-string cursor starts from.
pub fn data_index(addr: u32) -> u32 {
    addr.wrapping_sub(DATA_BASE)
}
