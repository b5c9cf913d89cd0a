// Abstract Syntax Tree definitions for PL/0.
// This module contains all AST node types and related traits.

mod traits;
pub use traits::Node;

// AST node modules
mod program;
mod block;
mod declarations;
mod statements;
mod expressions;
mod literals;
mod io;
pub mod printer;

pub use program::Program;
pub use block::Block;
pub use declarations::{Constant, ConstDecl, Declaration, ProcDecl, Procedure, VarDecl};
pub use statements::{AssignStmt, BeginStmt, CallStmt, IfStmt, Statement, WhileStatement};
pub use expressions::{
    BinOp, BinaryOperator, Condition, Expression, OddCondition, RelationalCondition,
    RelationalOperator, UnaryOp, UnaryOperator,
};
pub use literals::{Ident, Number};
pub use io::{Read, Write};
