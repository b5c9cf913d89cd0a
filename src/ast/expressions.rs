use std::fmt;

use crate::ast::{Ident, Node, Number};
use crate::errors::Pl0Result;
use crate::semantic::visiters::ASTVisitor;
use crate::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Plus,
    Minus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Plus,
    Minus,
    Multiply,
    Divide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationalOperator {
    Equal,
    NotEqual,
    LessThan,
    LessThanEqual,
    GreaterThan,
    GreaterThanEqual,
}

impl RelationalOperator {
    pub fn evaluate(self, left: i64, right: i64) -> bool {
        match self {
            RelationalOperator::Equal => left == right,
            RelationalOperator::NotEqual => left != right,
            RelationalOperator::LessThan => left < right,
            RelationalOperator::LessThanEqual => left <= right,
            RelationalOperator::GreaterThan => left > right,
            RelationalOperator::GreaterThanEqual => left >= right,
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UnaryOperator::Plus => "+",
            UnaryOperator::Minus => "-",
        })
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BinaryOperator::Plus => "+",
            BinaryOperator::Minus => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
        })
    }
}

impl fmt::Display for RelationalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RelationalOperator::Equal => "=",
            RelationalOperator::NotEqual => "<>",
            RelationalOperator::LessThan => "<",
            RelationalOperator::LessThanEqual => "<=",
            RelationalOperator::GreaterThan => ">",
            RelationalOperator::GreaterThanEqual => ">=",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Number(Number),
    Ident(Ident),
    Unary(UnaryOp),
    Binary(BinOp),
}

impl Node for Expression {
    fn accept(&self, visitor: &mut dyn ASTVisitor) -> Pl0Result<()> {
        match self {
            Expression::Number(number) => number.accept(visitor),
            Expression::Ident(ident) => ident.accept(visitor),
            Expression::Unary(unary) => unary.accept(visitor),
            Expression::Binary(binop) => binop.accept(visitor),
        }
    }

    fn position(&self) -> Position {
        match self {
            Expression::Number(number) => number.position,
            Expression::Ident(ident) => ident.position,
            Expression::Unary(unary) => unary.position,
            Expression::Binary(binop) => binop.position,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOp {
    pub operator: UnaryOperator,
    pub operand: Box<Expression>,
    pub position: Position,
}

impl UnaryOp {
    pub fn new(operator: UnaryOperator, operand: Expression, position: Position) -> Self {
        Self {
            operator,
            operand: Box::new(operand),
            position,
        }
    }
}

impl Node for UnaryOp {
    fn accept(&self, visitor: &mut dyn ASTVisitor) -> Pl0Result<()> {
        visitor.visit_unary_operation(self)
    }

    fn position(&self) -> Position {
        self.position
    }
}

/// Binary arithmetic; `position` is the operator's.
#[derive(Debug, Clone, PartialEq)]
pub struct BinOp {
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    pub operator: BinaryOperator,
    pub position: Position,
}

impl BinOp {
    pub fn new(left: Expression, right: Expression, operator: BinaryOperator, position: Position) -> Self {
        Self {
            left: Box::new(left),
            right: Box::new(right),
            operator,
            position,
        }
    }
}

impl Node for BinOp {
    fn accept(&self, visitor: &mut dyn ASTVisitor) -> Pl0Result<()> {
        visitor.visit_binary_operation(self)
    }

    fn position(&self) -> Position {
        self.position
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Odd(OddCondition),
    Relational(RelationalCondition),
}

impl Node for Condition {
    fn accept(&self, visitor: &mut dyn ASTVisitor) -> Pl0Result<()> {
        match self {
            Condition::Odd(cond) => cond.accept(visitor),
            Condition::Relational(cond) => cond.accept(visitor),
        }
    }

    fn position(&self) -> Position {
        match self {
            Condition::Odd(cond) => cond.position,
            Condition::Relational(cond) => cond.position,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OddCondition {
    pub expr: Expression,
    pub position: Position,
}

impl OddCondition {
    pub fn new(expr: Expression, position: Position) -> Self {
        Self { expr, position }
    }
}

impl Node for OddCondition {
    fn accept(&self, visitor: &mut dyn ASTVisitor) -> Pl0Result<()> {
        visitor.visit_odd_condition(self)
    }

    fn position(&self) -> Position {
        self.position
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RelationalCondition {
    pub left: Expression,
    pub right: Expression,
    pub operator: RelationalOperator,
    pub position: Position,
}

impl RelationalCondition {
    pub fn new(left: Expression, right: Expression, operator: RelationalOperator, position: Position) -> Self {
        Self {
            left,
            right,
            operator,
            position,
        }
    }
}

impl Node for RelationalCondition {
    fn accept(&self, visitor: &mut dyn ASTVisitor) -> Pl0Result<()> {
        visitor.visit_relational_condition(self)
    }

    fn position(&self) -> Position {
        self.position
    }
}
