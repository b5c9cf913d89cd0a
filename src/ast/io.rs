use crate::ast::{Expression, Ident, Node};
use crate::errors::Pl0Result;
use crate::semantic::visiters::ASTVisitor;
use crate::Position;

#[derive(Debug, Clone, PartialEq)]
pub struct Write {
    pub exprs: Vec<Expression>,
    pub position: Position,
}

impl Write {
    pub fn new(exprs: Vec<Expression>, position: Position) -> Self {
        Self { exprs, position }
    }
}

impl Node for Write {
    fn accept(&self, visitor: &mut dyn ASTVisitor) -> Pl0Result<()> {
        visitor.visit_write(self)
    }

    fn position(&self) -> Position {
        self.position
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Read {
    pub targets: Vec<Ident>,
    pub position: Position,
}

impl Read {
    pub fn new(targets: Vec<Ident>, position: Position) -> Self {
        Self { targets, position }
    }
}

impl Node for Read {
    fn accept(&self, visitor: &mut dyn ASTVisitor) -> Pl0Result<()> {
        visitor.visit_read(self)
    }

    fn position(&self) -> Position {
        self.position
    }
}
