use tracing::trace;

use crate::ast::{Block, Condition, Declaration, Expression, Ident, Program, Statement};
use crate::errors::{Pl0Error, Pl0Result, ResolutionErrorKind};
use crate::semantic::scope_info::ScopeInfo;
use crate::semantic::symboltable::{ProcId, Symbol, SymbolTable, SymbolType};

/// A program whose identifier uses all carry their binding.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProgram {
    pub program: Program,
    pub procedure_count: usize,
}

/// Single pre-order pass binding every identifier use to its declaration.
///
/// Declarations become visible at the point they are declared: a procedure
/// sees itself and everything declared before it, never a later sibling.
pub struct Resolver {
    table: SymbolTable,
    scope: ScopeInfo,
    next_proc_id: usize,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver {
    pub fn new() -> Self {
        Self {
            table: SymbolTable::new(),
            scope: ScopeInfo::new(),
            next_proc_id: 0,
        }
    }

    pub fn resolve(mut self, mut program: Program) -> Pl0Result<ResolvedProgram> {
        self.resolve_block(&mut program.block, &[])?;
        Ok(ResolvedProgram {
            program,
            procedure_count: self.next_proc_id,
        })
    }

    fn declare(&mut self, name: &str, symbol_type: SymbolType, declaration: &Declaration) -> Pl0Result<()> {
        let symbol = Symbol::new(symbol_type, declaration.position, self.scope.level());
        self.table.insert(name, symbol)
    }

    fn resolve_block(&mut self, block: &mut Block, params: &[Declaration]) -> Pl0Result<()> {
        for param in params {
            let slot = self.scope.allocate_slot();
            self.declare(&param.name, SymbolType::Parameter(slot), param)?;
        }

        for constant in &block.const_decl.constants {
            let symbol = Symbol::new(SymbolType::Constant(constant.value), constant.position, self.scope.level());
            self.table.insert(&constant.name, symbol)?;
        }

        for variable in &block.var_decl.variables {
            let slot = self.scope.allocate_slot();
            self.declare(&variable.name, SymbolType::Variable(slot), variable)?;
        }
        block.frame_size = self.scope.frame_size();

        for procedure in &mut block.proc_decl.procedures {
            let id = ProcId(self.next_proc_id);
            self.next_proc_id += 1;
            let symbol_type = SymbolType::Procedure {
                arity: procedure.arity(),
                id,
            };
            let symbol = Symbol::new(symbol_type, procedure.position, self.scope.level());
            self.table.insert(&procedure.name, symbol)?;
            procedure.id = Some(id);
            trace!(procedure = %procedure.name, %id, level = self.scope.level(), "procedure declared");

            self.table.push_scope();
            self.scope = self.scope.push_scope();
            self.resolve_block(&mut procedure.block, &procedure.params)?;
            self.scope.pop_scope()?;
            self.table.drop_scope()?;
        }

        self.resolve_statement(&mut block.statement)
    }

    fn resolve_statement(&mut self, statement: &mut Statement) -> Pl0Result<()> {
        match statement {
            Statement::Assign(assign) => {
                self.resolve_target(&mut assign.target)?;
                self.resolve_expression(&mut assign.expr)
            }
            Statement::If(if_stmt) => {
                self.resolve_condition(&mut if_stmt.condition)?;
                self.resolve_statement(&mut if_stmt.then_branch)?;
                if let Some(else_branch) = &mut if_stmt.else_branch {
                    self.resolve_statement(else_branch)?;
                }
                Ok(())
            }
            Statement::While(while_stmt) => {
                self.resolve_condition(&mut while_stmt.condition)?;
                self.resolve_statement(&mut while_stmt.body)
            }
            Statement::Call(call) => {
                let symbol = self.table.lookup(&call.callee.value, call.callee.position)?;
                match symbol.symbol_type {
                    SymbolType::Procedure { arity, .. } if arity == call.args.len() => {}
                    SymbolType::Procedure { arity, .. } => {
                        return Err(Pl0Error::resolution_error(
                            ResolutionErrorKind::ArityOrKindMismatch,
                            &call.callee.value,
                            format!(
                                "procedure '{}' expects {} argument(s), found {}",
                                call.callee.value,
                                arity,
                                call.args.len()
                            ),
                            call.callee.position,
                        ));
                    }
                    other => {
                        return Err(Pl0Error::resolution_error(
                            ResolutionErrorKind::ArityOrKindMismatch,
                            &call.callee.value,
                            format!("'{}' is a {}, not a procedure", call.callee.value, other.describe()),
                            call.callee.position,
                        ));
                    }
                }
                call.callee.symbol = Some(symbol);
                for arg in &mut call.args {
                    self.resolve_expression(arg)?;
                }
                Ok(())
            }
            Statement::Read(read) => {
                for target in &mut read.targets {
                    self.resolve_target(target)?;
                }
                Ok(())
            }
            Statement::Write(write) => {
                for expr in &mut write.exprs {
                    self.resolve_expression(expr)?;
                }
                Ok(())
            }
            Statement::Compound(begin) => {
                for stmt in &mut begin.stmts {
                    self.resolve_statement(stmt)?;
                }
                Ok(())
            }
        }
    }

    /// Bind a name that is written to (`:=` target or `read` target).
    fn resolve_target(&mut self, target: &mut Ident) -> Pl0Result<()> {
        let symbol = self.table.lookup(&target.value, target.position)?;
        if !symbol.is_assignable() {
            return Err(Pl0Error::resolution_error(
                ResolutionErrorKind::NotAssignable,
                &target.value,
                format!("cannot assign to {} '{}'", symbol.symbol_type.describe(), target.value),
                target.position,
            ));
        }
        target.symbol = Some(symbol);
        Ok(())
    }

    fn resolve_condition(&mut self, condition: &mut Condition) -> Pl0Result<()> {
        match condition {
            Condition::Odd(odd) => self.resolve_expression(&mut odd.expr),
            Condition::Relational(relational) => {
                self.resolve_expression(&mut relational.left)?;
                self.resolve_expression(&mut relational.right)
            }
        }
    }

    fn resolve_expression(&mut self, expr: &mut Expression) -> Pl0Result<()> {
        match expr {
            Expression::Number(_) => Ok(()),
            Expression::Ident(ident) => {
                let symbol = self.table.lookup(&ident.value, ident.position)?;
                if let SymbolType::Procedure { .. } = symbol.symbol_type {
                    return Err(Pl0Error::resolution_error(
                        ResolutionErrorKind::ArityOrKindMismatch,
                        &ident.value,
                        format!("procedure '{}' cannot be used as a value", ident.value),
                        ident.position,
                    ));
                }
                ident.symbol = Some(symbol);
                Ok(())
            }
            Expression::Unary(unary) => self.resolve_expression(&mut unary.operand),
            Expression::Binary(binop) => {
                self.resolve_expression(&mut binop.left)?;
                self.resolve_expression(&mut binop.right)
            }
        }
    }
}

/// Resolve every name in `program`, failing on the first error.
pub fn resolve(program: Program) -> Pl0Result<ResolvedProgram> {
    Resolver::new().resolve(program)
}
