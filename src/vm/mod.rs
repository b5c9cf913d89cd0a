pub mod frame;
pub mod io;

pub use frame::Frame;
pub use io::{LineWriter, ProgramIo, ScriptedIo};

use tracing::{debug, trace};

use crate::{
    errors::{Pl0Error, Pl0Result, RuntimeErrorKind},
    ir::{Bytecode, IRGenerator, Instruction},
    semantic::resolver::ResolvedProgram,
    utils::config::vm::{INITIAL_FRAME_CAPACITY, INITIAL_STACK_CAPACITY},
};

/// Counters from a run that reached `Halt`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExitOutcome {
    pub instructions_executed: u64,
    /// Deepest nesting of procedure activations; 0 when nothing was called.
    pub max_call_depth: usize,
    pub values_written: u64,
}

/// Stack machine executing [`Bytecode`].
pub struct VirtualMachine {
    stack: Vec<i64>,
    frames: Vec<Frame>,
    pc: usize,
    outcome: ExitOutcome,
}

impl Default for VirtualMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualMachine {
    pub fn new() -> Self {
        Self {
            stack: Vec::with_capacity(INITIAL_STACK_CAPACITY),
            frames: Vec::with_capacity(INITIAL_FRAME_CAPACITY),
            pc: 0,
            outcome: ExitOutcome::default(),
        }
    }

    pub fn run(&mut self, bytecode: &Bytecode, io: &mut dyn ProgramIo) -> Pl0Result<ExitOutcome> {
        self.stack.clear();
        self.frames.clear();
        self.frames.push(Frame::root());
        self.pc = bytecode.entry;
        self.outcome = ExitOutcome::default();

        loop {
            let (instruction, position) = bytecode.get(self.pc).ok_or_else(|| {
                Pl0Error::internal_error(format!("program counter {} is outside the code", self.pc))
            })?;
            self.outcome.instructions_executed += 1;
            self.pc += 1;

            match instruction {
                Instruction::Lit(value) => self.stack.push(value),
                Instruction::Load { hops, slot } => {
                    let value = *self.slot_mut(hops, slot)?;
                    self.stack.push(value);
                }
                Instruction::Store { hops, slot } => {
                    let value = self.pop()?;
                    *self.slot_mut(hops, slot)? = value;
                }
                Instruction::Read { hops, slot } => {
                    if let Some(value) = io.read_int()? {
                        *self.slot_mut(hops, slot)? = value;
                    }
                }
                Instruction::Write => {
                    let value = self.pop()?;
                    io.write_int(value)?;
                    self.outcome.values_written += 1;
                }
                Instruction::Neg => {
                    let value = self.pop()?;
                    self.stack.push(value.wrapping_neg());
                }
                Instruction::Add => self.binary(i64::wrapping_add)?,
                Instruction::Sub => self.binary(i64::wrapping_sub)?,
                Instruction::Mul => self.binary(i64::wrapping_mul)?,
                Instruction::Div => {
                    let divisor = self.pop()?;
                    let dividend = self.pop()?;
                    if divisor == 0 {
                        return Err(Pl0Error::runtime_error(RuntimeErrorKind::DivisionByZero, position));
                    }
                    self.stack.push(dividend.wrapping_div(divisor));
                }
                Instruction::Odd => {
                    let value = self.pop()?;
                    self.stack.push(i64::from(value % 2 != 0));
                }
                Instruction::Compare(op) => {
                    let right = self.pop()?;
                    let left = self.pop()?;
                    self.stack.push(i64::from(op.evaluate(left, right)));
                }
                Instruction::Jump(target) => self.pc = target,
                Instruction::JumpIfFalse(target) => {
                    if self.pop()? == 0 {
                        self.pc = target;
                    }
                }
                Instruction::Call { target, hops, arity } => {
                    let static_link = self.follow_links(hops)?;
                    let base = self.stack.len().checked_sub(arity).ok_or_else(|| {
                        Pl0Error::internal_error(format!("call at {} is missing arguments", self.pc - 1))
                    })?;
                    let arguments = self.stack.split_off(base);
                    self.frames.push(Frame::new(arguments, static_link, self.pc));
                    self.outcome.max_call_depth = self.outcome.max_call_depth.max(self.frames.len() - 1);
                    trace!(target, depth = self.frames.len() - 1, "call");
                    self.pc = target;
                }
                Instruction::Enter(size) => {
                    let frame = self.current_frame()?;
                    frame.slots.resize(size.max(frame.slots.len()), 0);
                }
                Instruction::Return => {
                    let frame = self
                        .frames
                        .pop()
                        .ok_or_else(|| Pl0Error::internal_error("return with no activation"))?;
                    self.pc = frame
                        .return_address
                        .ok_or_else(|| Pl0Error::internal_error("return from the program block"))?;
                }
                Instruction::Halt => break,
            }
        }

        debug!(
            instructions = self.outcome.instructions_executed,
            max_call_depth = self.outcome.max_call_depth,
            values_written = self.outcome.values_written,
            "execution finished"
        );
        Ok(self.outcome)
    }

    fn pop(&mut self) -> Pl0Result<i64> {
        self.stack
            .pop()
            .ok_or_else(|| Pl0Error::internal_error(format!("operand stack underflow at {}", self.pc - 1)))
    }

    fn binary(&mut self, op: fn(i64, i64) -> i64) -> Pl0Result<()> {
        let right = self.pop()?;
        let left = self.pop()?;
        self.stack.push(op(left, right));
        Ok(())
    }

    fn current_frame(&mut self) -> Pl0Result<&mut Frame> {
        self.frames
            .last_mut()
            .ok_or_else(|| Pl0Error::internal_error("no active frame"))
    }

    /// Index of the activation `hops` static links away from the running one.
    fn follow_links(&self, hops: usize) -> Pl0Result<usize> {
        let mut index = self
            .frames
            .len()
            .checked_sub(1)
            .ok_or_else(|| Pl0Error::internal_error("no active frame"))?;
        for _ in 0..hops {
            index = self.frames[index]
                .static_link
                .ok_or_else(|| Pl0Error::internal_error(format!("static link chain shorter than {}", hops)))?;
        }
        Ok(index)
    }

    fn slot_mut(&mut self, hops: usize, slot: usize) -> Pl0Result<&mut i64> {
        let index = self.follow_links(hops)?;
        self.frames[index]
            .slots
            .get_mut(slot)
            .ok_or_else(|| Pl0Error::internal_error(format!("slot {} out of range", slot)))
    }
}

/// Generate bytecode for `program` and run it.
pub fn execute(program: &ResolvedProgram, io: &mut dyn ProgramIo) -> Pl0Result<ExitOutcome> {
    let bytecode = IRGenerator::new().generate_code(program)?;
    VirtualMachine::new().run(&bytecode, io)
}
