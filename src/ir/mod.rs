pub mod expression_handlers;
pub mod instruction;
pub mod ir_emitter;
pub mod procedure_handlers;
pub mod statement_handlers;
pub mod symbol_helpers;

pub use instruction::{Bytecode, Instruction};

use std::collections::HashMap;

use tracing::debug;

use crate::{
    ast::{
        AssignStmt, BeginStmt, BinOp, Block, CallStmt, ConstDecl, Ident, IfStmt, Node, Number,
        OddCondition, ProcDecl, Program, Read, RelationalCondition, UnaryOp, VarDecl,
        WhileStatement, Write,
    },
    errors::Pl0Result,
    semantic::{resolver::ResolvedProgram, symboltable::ProcId, visiters::ASTVisitor},
    utils::config::semantic::PROGRAM_LEVEL,
};

/// Lowers a resolved AST to [`Bytecode`].
///
/// Expressions leave their value on the operand stack; statements leave it
/// as they found it.
pub struct IRGenerator {
    pub(crate) code: Bytecode,
    /// Lexical depth of the block being emitted.
    pub(crate) level: usize,
    /// Entry address of the block most recently emitted.
    pub(crate) block_entry: usize,
    pub(crate) proc_entries: HashMap<ProcId, usize>,
    /// `Call` instructions whose target was unknown when emitted.
    pub(crate) fixups: Vec<(usize, ProcId)>,
}

impl Default for IRGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IRGenerator {
    pub fn new() -> Self {
        Self {
            code: Bytecode::default(),
            level: PROGRAM_LEVEL,
            block_entry: 0,
            proc_entries: HashMap::new(),
            fixups: Vec::new(),
        }
    }

    pub fn generate_code(mut self, resolved: &ResolvedProgram) -> Pl0Result<Bytecode> {
        resolved.program.accept(&mut self)?;
        ir_emitter::resolve_fixups(&mut self)?;
        debug!(
            instructions = self.code.len(),
            procedures = self.proc_entries.len(),
            entry = self.code.entry,
            "bytecode generated"
        );
        Ok(self.code)
    }
}

impl ASTVisitor for IRGenerator {
    fn visit_program(&mut self, program: &Program) -> Pl0Result<()> {
        procedure_handlers::handle_program(self, program)
    }

    // Expression handlers
    fn visit_ident(&mut self, ident: &Ident) -> Pl0Result<()> {
        expression_handlers::handle_ident(self, ident)
    }

    fn visit_number(&mut self, number: &Number) -> Pl0Result<()> {
        expression_handlers::handle_number(self, number)
    }

    fn visit_unary_operation(&mut self, unary: &UnaryOp) -> Pl0Result<()> {
        expression_handlers::handle_unary_operation(self, unary)
    }

    fn visit_binary_operation(&mut self, binop: &BinOp) -> Pl0Result<()> {
        expression_handlers::handle_binary_operation(self, binop)
    }

    fn visit_odd_condition(&mut self, cond: &OddCondition) -> Pl0Result<()> {
        expression_handlers::handle_odd_condition(self, cond)
    }

    fn visit_relational_condition(&mut self, cond: &RelationalCondition) -> Pl0Result<()> {
        expression_handlers::handle_relational_condition(self, cond)
    }

    // Statement handlers
    fn visit_assign(&mut self, stmt: &AssignStmt) -> Pl0Result<()> {
        statement_handlers::handle_assign(self, stmt)
    }

    fn visit_call(&mut self, call: &CallStmt) -> Pl0Result<()> {
        statement_handlers::handle_call(self, call)
    }

    fn visit_begin(&mut self, stmt: &BeginStmt) -> Pl0Result<()> {
        statement_handlers::handle_begin(self, stmt)
    }

    fn visit_if(&mut self, stmt: &IfStmt) -> Pl0Result<()> {
        statement_handlers::handle_if(self, stmt)
    }

    fn visit_while_statement(&mut self, stmt: &WhileStatement) -> Pl0Result<()> {
        statement_handlers::handle_while(self, stmt)
    }

    fn visit_read(&mut self, stmt: &Read) -> Pl0Result<()> {
        statement_handlers::handle_read(self, stmt)
    }

    fn visit_write(&mut self, stmt: &Write) -> Pl0Result<()> {
        statement_handlers::handle_write(self, stmt)
    }

    // Declarations occupy no code; constants are inlined at their uses
    fn visit_const(&mut self, _decl: &ConstDecl) -> Pl0Result<()> {
        Ok(())
    }

    fn visit_var_decl(&mut self, _decl: &VarDecl) -> Pl0Result<()> {
        Ok(())
    }

    fn visit_proc_decl(&mut self, decl: &ProcDecl) -> Pl0Result<()> {
        procedure_handlers::handle_proc_decl(self, decl)
    }

    fn visit_block(&mut self, block: &Block) -> Pl0Result<()> {
        procedure_handlers::handle_block(self, block)
    }
}
