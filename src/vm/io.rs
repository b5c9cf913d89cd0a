use std::collections::VecDeque;
use std::io;

use crate::errors::Pl0Result;

/// The running program's view of the outside world.
pub trait ProgramIo {
    /// Deliver one value produced by `write`.
    fn write_int(&mut self, value: i64) -> Pl0Result<()>;

    /// Supply one value for `read`. `None` leaves the target unchanged.
    fn read_int(&mut self) -> Pl0Result<Option<i64>> {
        Ok(None)
    }
}

impl ProgramIo for Vec<i64> {
    fn write_int(&mut self, value: i64) -> Pl0Result<()> {
        self.push(value);
        Ok(())
    }
}

/// Writes each value on its own line.
pub struct LineWriter<W: io::Write> {
    inner: W,
}

impl<W: io::Write> LineWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: io::Write> ProgramIo for LineWriter<W> {
    fn write_int(&mut self, value: i64) -> Pl0Result<()> {
        writeln!(self.inner, "{}", value)?;
        Ok(())
    }
}

/// Feeds `read` from a fixed queue and collects everything written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptedIo {
    pub input: VecDeque<i64>,
    pub output: Vec<i64>,
}

impl ScriptedIo {
    pub fn new(input: impl IntoIterator<Item = i64>) -> Self {
        Self {
            input: input.into_iter().collect(),
            output: Vec::new(),
        }
    }
}

impl ProgramIo for ScriptedIo {
    fn write_int(&mut self, value: i64) -> Pl0Result<()> {
        self.output.push(value);
        Ok(())
    }

    fn read_int(&mut self) -> Pl0Result<Option<i64>> {
        Ok(self.input.pop_front())
    }
}
