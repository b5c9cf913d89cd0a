use crate::ast::Node;
use crate::errors::Pl0Result;
use crate::semantic::symboltable::Symbol;
use crate::semantic::visiters::ASTVisitor;
use crate::Position;

/// An identifier use site. `symbol` stays `None` until resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub value: String,
    pub position: Position,
    pub symbol: Option<Symbol>,
}

impl Ident {
    pub fn new(value: String, position: Position) -> Self {
        Self {
            value,
            position,
            symbol: None,
        }
    }
}

impl Node for Ident {
    fn accept(&self, visitor: &mut dyn ASTVisitor) -> Pl0Result<()> {
        visitor.visit_ident(self)
    }

    fn position(&self) -> Position {
        self.position
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Number {
    pub value: i64,
    pub position: Position,
}

impl Number {
    pub fn new(value: i64, position: Position) -> Self {
        Self { value, position }
    }
}

impl Node for Number {
    fn accept(&self, visitor: &mut dyn ASTVisitor) -> Pl0Result<()> {
        visitor.visit_number(self)
    }

    fn position(&self) -> Position {
        self.position
    }
}
