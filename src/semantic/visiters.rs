use crate::ast::{
    AssignStmt, BeginStmt, BinOp, Block, CallStmt, ConstDecl, Ident, IfStmt, Number, OddCondition,
    ProcDecl, Program, Read, RelationalCondition, UnaryOp, VarDecl, WhileStatement, Write,
};
use crate::errors::Pl0Result;

pub trait ASTVisitor {
    fn visit_ident(&mut self, ident: &Ident) -> Pl0Result<()>;
    fn visit_number(&mut self, number: &Number) -> Pl0Result<()>;
    fn visit_unary_operation(&mut self, unary_operation: &UnaryOp) -> Pl0Result<()>;
    fn visit_binary_operation(&mut self, binary_operation: &BinOp) -> Pl0Result<()>;
    fn visit_odd_condition(&mut self, condition: &OddCondition) -> Pl0Result<()>;
    fn visit_relational_condition(&mut self, condition: &RelationalCondition) -> Pl0Result<()>;
    fn visit_while_statement(&mut self, while_statement: &WhileStatement) -> Pl0Result<()>;
    fn visit_call(&mut self, call: &CallStmt) -> Pl0Result<()>;
    fn visit_assign(&mut self, assign: &AssignStmt) -> Pl0Result<()>;
    fn visit_begin(&mut self, begin: &BeginStmt) -> Pl0Result<()>;
    fn visit_if(&mut self, if_stmt: &IfStmt) -> Pl0Result<()>;
    fn visit_write(&mut self, write: &Write) -> Pl0Result<()>;
    fn visit_read(&mut self, read: &Read) -> Pl0Result<()>;
    fn visit_const(&mut self, const_decl: &ConstDecl) -> Pl0Result<()>;
    fn visit_var_decl(&mut self, var_decl: &VarDecl) -> Pl0Result<()>;
    fn visit_proc_decl(&mut self, proc_decl: &ProcDecl) -> Pl0Result<()>;
    fn visit_block(&mut self, block: &Block) -> Pl0Result<()>;
    fn visit_program(&mut self, program: &Program) -> Pl0Result<()>;
}
