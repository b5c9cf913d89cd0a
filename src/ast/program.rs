use crate::ast::{Block, Node};
use crate::errors::Pl0Result;
use crate::semantic::visiters::ASTVisitor;
use crate::Position;

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub name: String,
    pub block: Block,
    pub position: Position,
}

impl Program {
    pub fn new(name: String, block: Block, position: Position) -> Self {
        Self { name, block, position }
    }
}

impl Node for Program {
    fn accept(&self, visitor: &mut dyn ASTVisitor) -> Pl0Result<()> {
        visitor.visit_program(self)
    }

    fn position(&self) -> Position {
        self.position
    }
}
