use crate::ast::{Block, Node};
use crate::errors::Pl0Result;
use crate::semantic::symboltable::ProcId;
use crate::semantic::visiters::ASTVisitor;
use crate::Position;

/// A declared name: a variable or a procedure parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub position: Position,
}

impl Declaration {
    pub fn new(name: String, position: Position) -> Self {
        Self { name, position }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constant {
    pub name: String,
    pub value: i64,
    pub position: Position,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstDecl {
    pub constants: Vec<Constant>,
}

impl ConstDecl {
    pub fn new(constants: Vec<Constant>) -> Self {
        Self { constants }
    }
}

impl Node for ConstDecl {
    fn accept(&self, visitor: &mut dyn ASTVisitor) -> Pl0Result<()> {
        visitor.visit_const(self)
    }

    fn position(&self) -> Position {
        self.constants.first().map(|c| c.position).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VarDecl {
    pub variables: Vec<Declaration>,
}

impl VarDecl {
    pub fn new(variables: Vec<Declaration>) -> Self {
        Self { variables }
    }
}

impl Node for VarDecl {
    fn accept(&self, visitor: &mut dyn ASTVisitor) -> Pl0Result<()> {
        visitor.visit_var_decl(self)
    }

    fn position(&self) -> Position {
        self.variables.first().map(|v| v.position).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Procedure {
    pub name: String,
    pub params: Vec<Declaration>,
    pub block: Block,
    pub position: Position,
    /// Assigned by the resolver; the code generator keys entry points on it.
    pub id: Option<ProcId>,
}

impl Procedure {
    pub fn new(name: String, params: Vec<Declaration>, block: Block, position: Position) -> Self {
        Self {
            name,
            params,
            block,
            position,
            id: None,
        }
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcDecl {
    pub procedures: Vec<Procedure>,
}

impl ProcDecl {
    pub fn new(procedures: Vec<Procedure>) -> Self {
        Self { procedures }
    }
}

impl Node for ProcDecl {
    fn accept(&self, visitor: &mut dyn ASTVisitor) -> Pl0Result<()> {
        visitor.visit_proc_decl(self)
    }

    fn position(&self) -> Position {
        self.procedures.first().map(|p| p.position).unwrap_or_default()
    }
}
