use std::fmt;

use crate::ast::RelationalOperator;
use crate::Position;

/// One operation of the stack machine.
///
/// `hops` counts static links to follow from the running activation to the
/// one that owns `slot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Lit(i64),
    Load { hops: usize, slot: usize },
    Store { hops: usize, slot: usize },
    Read { hops: usize, slot: usize },
    Write,
    Neg,
    Add,
    Sub,
    Mul,
    Div,
    Odd,
    Compare(RelationalOperator),
    Jump(usize),
    JumpIfFalse(usize),
    Call { target: usize, hops: usize, arity: usize },
    Enter(usize),
    Return,
    Halt,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Lit(value) => write!(f, "lit {}", value),
            Instruction::Load { hops, slot } => write!(f, "load {} {}", hops, slot),
            Instruction::Store { hops, slot } => write!(f, "store {} {}", hops, slot),
            Instruction::Read { hops, slot } => write!(f, "read {} {}", hops, slot),
            Instruction::Write => f.write_str("write"),
            Instruction::Neg => f.write_str("neg"),
            Instruction::Add => f.write_str("add"),
            Instruction::Sub => f.write_str("sub"),
            Instruction::Mul => f.write_str("mul"),
            Instruction::Div => f.write_str("div"),
            Instruction::Odd => f.write_str("odd"),
            Instruction::Compare(op) => write!(f, "cmp {}", op),
            Instruction::Jump(target) => write!(f, "jmp {}", target),
            Instruction::JumpIfFalse(target) => write!(f, "jpc {}", target),
            Instruction::Call { target, hops, arity } => write!(f, "call {} {} {}", target, hops, arity),
            Instruction::Enter(size) => write!(f, "enter {}", size),
            Instruction::Return => f.write_str("ret"),
            Instruction::Halt => f.write_str("halt"),
        }
    }
}

/// Generated program: instructions, the source position of each, and where
/// the main body starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bytecode {
    pub instructions: Vec<Instruction>,
    pub positions: Vec<Position>,
    pub entry: usize,
}

impl Bytecode {
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn get(&self, address: usize) -> Option<(Instruction, Position)> {
        let instruction = *self.instructions.get(address)?;
        let position = self.positions.get(address).copied().unwrap_or_default();
        Some((instruction, position))
    }
}

impl fmt::Display for Bytecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "entry {:04}", self.entry)?;
        for (address, instruction) in self.instructions.iter().enumerate() {
            writeln!(f, "{:04}  {}", address, instruction)?;
        }
        Ok(())
    }
}
