use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("console i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("end of input while reading an integer")]
    Eof,
    #[error("not an integer: {0:?}")]
    InvalidInt(String),
}

/// Where syscalls send their output and take their input from.
pub trait Console {
    fn print_int(&mut self, value: i32) -> Result<(), ConsoleError>;
    fn print_char(&mut self, ch: char) -> Result<(), ConsoleError>;
    /// Blocks until an integer is available.
    fn read_int(&mut self) -> Result<i32, ConsoleError>;
    fn flush(&mut self) -> Result<(), ConsoleError> {
        Ok(())
    }
}

/// Process stdout/stdin.
pub struct StdConsole<R, W> {
    input: R,
    output: W,
    pending: VecDeque<String>,
}

impl StdConsole<io::StdinLock<'static>, io::Stdout> {
    pub fn new() -> Self {
        Self::with_io(io::stdin().lock(), io::stdout())
    }
}

impl Default for StdConsole<io::StdinLock<'static>, io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: BufRead, W: Write> StdConsole<R, W> {
    pub fn with_io(input: R, output: W) -> Self {
        Self {
            input,
            output,
            pending: VecDeque::new(),
        }
    }

    fn next_token(&mut self) -> Result<String, ConsoleError> {
        loop {
            if let Some(tok) = self.pending.pop_front() {
                return Ok(tok);
            }
            // output must be visible before we block on a prompt answer
            self.output.flush()?;
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(ConsoleError::Eof);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_owned));
        }
    }
}

impl<R: BufRead, W: Write> Console for StdConsole<R, W> {
    fn print_int(&mut self, value: i32) -> Result<(), ConsoleError> {
        writeln!(self.output, "{value}")?;
        Ok(())
    }

    fn print_char(&mut self, ch: char) -> Result<(), ConsoleError> {
        write!(self.output, "{ch}")?;
        Ok(())
    }

    fn read_int(&mut self) -> Result<i32, ConsoleError> {
        let tok = self.next_token()?;
        tok.parse().map_err(|_| ConsoleError::InvalidInt(tok))
    }

    fn flush(&mut self) -> Result<(), ConsoleError> {
        self.output.flush()?;
        Ok(())
    }
}

/// In-memory console: collects output, answers reads from a queue.
#[derive(Default, Debug)]
pub struct BufferConsole {
    pub output: String,
    pub input: VecDeque<i32>,
}

impl BufferConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(input: impl IntoIterator<Item = i32>) -> Self {
        Self {
            output: String::new(),
            input: input.into_iter().collect(),
        }
    }
}

impl Console for BufferConsole {
    fn print_int(&mut self, value: i32) -> Result<(), ConsoleError> {
        self.output.push_str(&value.to_string());
        self.output.push('\n');
        Ok(())
    }

    fn print_char(&mut self, ch: char) -> Result<(), ConsoleError> {
        self.output.push(ch);
        Ok(())
    }

    fn read_int(&mut self) -> Result<i32, ConsoleError> {
        self.input.pop_front().ok_or(ConsoleError::Eof)
    }
}
