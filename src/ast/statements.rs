use crate::ast::{Condition, Expression, Ident, Node, Read, Write};
use crate::errors::Pl0Result;
use crate::semantic::visiters::ASTVisitor;
use crate::Position;

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Assign(AssignStmt),
    If(IfStmt),
    While(WhileStatement),
    Call(CallStmt),
    Read(Read),
    Write(Write),
    Compound(BeginStmt),
}

impl Node for Statement {
    fn accept(&self, visitor: &mut dyn ASTVisitor) -> Pl0Result<()> {
        match self {
            Statement::Assign(stmt) => stmt.accept(visitor),
            Statement::If(stmt) => stmt.accept(visitor),
            Statement::While(stmt) => stmt.accept(visitor),
            Statement::Call(stmt) => stmt.accept(visitor),
            Statement::Read(stmt) => stmt.accept(visitor),
            Statement::Write(stmt) => stmt.accept(visitor),
            Statement::Compound(stmt) => stmt.accept(visitor),
        }
    }

    fn position(&self) -> Position {
        match self {
            Statement::Assign(stmt) => stmt.position(),
            Statement::If(stmt) => stmt.position(),
            Statement::While(stmt) => stmt.position(),
            Statement::Call(stmt) => stmt.position(),
            Statement::Read(stmt) => stmt.position(),
            Statement::Write(stmt) => stmt.position(),
            Statement::Compound(stmt) => stmt.position(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignStmt {
    pub target: Ident,
    pub expr: Expression,
}

impl AssignStmt {
    pub fn new(target: Ident, expr: Expression) -> Self {
        Self { target, expr }
    }
}

impl Node for AssignStmt {
    fn accept(&self, visitor: &mut dyn ASTVisitor) -> Pl0Result<()> {
        visitor.visit_assign(self)
    }

    fn position(&self) -> Position {
        self.target.position
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BeginStmt {
    pub stmts: Vec<Statement>,
    pub position: Position,
}

impl BeginStmt {
    pub fn new(stmts: Vec<Statement>, position: Position) -> Self {
        Self { stmts, position }
    }
}

impl Node for BeginStmt {
    fn accept(&self, visitor: &mut dyn ASTVisitor) -> Pl0Result<()> {
        visitor.visit_begin(self)
    }

    fn position(&self) -> Position {
        self.position
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Condition,
    pub then_branch: Box<Statement>,
    pub else_branch: Option<Box<Statement>>,
    pub position: Position,
}

impl IfStmt {
    pub fn new(
        condition: Condition,
        then_branch: Statement,
        else_branch: Option<Statement>,
        position: Position,
    ) -> Self {
        Self {
            condition,
            then_branch: Box::new(then_branch),
            else_branch: else_branch.map(Box::new),
            position,
        }
    }
}

impl Node for IfStmt {
    fn accept(&self, visitor: &mut dyn ASTVisitor) -> Pl0Result<()> {
        visitor.visit_if(self)
    }

    fn position(&self) -> Position {
        self.position
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    pub condition: Condition,
    pub body: Box<Statement>,
    pub position: Position,
}

impl WhileStatement {
    pub fn new(condition: Condition, body: Statement, position: Position) -> Self {
        Self {
            condition,
            body: Box::new(body),
            position,
        }
    }
}

impl Node for WhileStatement {
    fn accept(&self, visitor: &mut dyn ASTVisitor) -> Pl0Result<()> {
        visitor.visit_while_statement(self)
    }

    fn position(&self) -> Position {
        self.position
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallStmt {
    pub callee: Ident,
    pub args: Vec<Expression>,
    pub position: Position,
}

impl CallStmt {
    pub fn new(callee: Ident, args: Vec<Expression>, position: Position) -> Self {
        Self { callee, args, position }
    }
}

impl Node for CallStmt {
    fn accept(&self, visitor: &mut dyn ASTVisitor) -> Pl0Result<()> {
        visitor.visit_call(self)
    }

    fn position(&self) -> Position {
        self.position
    }
}
