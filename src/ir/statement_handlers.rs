use super::{ir_emitter, symbol_helpers, IRGenerator};
use crate::{
    ast::{AssignStmt, BeginStmt, CallStmt, IfStmt, Node, Read, WhileStatement, Write},
    errors::{Pl0Error, Pl0Result},
    ir::Instruction,
    semantic::symboltable::SymbolType,
};

pub fn handle_assign(gen: &mut IRGenerator, stmt: &AssignStmt) -> Pl0Result<()> {
    stmt.expr.accept(gen)?;
    let (hops, slot) = symbol_helpers::storage_of(gen, &stmt.target)?;
    ir_emitter::emit(gen, Instruction::Store { hops, slot }, stmt.target.position);
    Ok(())
}

pub fn handle_call(gen: &mut IRGenerator, call: &CallStmt) -> Pl0Result<()> {
    let symbol = symbol_helpers::bound_symbol(&call.callee)?;
    let (arity, id) = match symbol.symbol_type {
        SymbolType::Procedure { arity, id } => (arity, id),
        other => {
            return Err(Pl0Error::internal_error(format!(
                "call target '{}' is a {}",
                call.callee.value,
                other.describe()
            )))
        }
    };
    for arg in &call.args {
        arg.accept(gen)?;
    }
    let hops = symbol_helpers::hops_to(gen, &symbol)?;
    ir_emitter::emit_call(gen, id, hops, arity, call.position);
    Ok(())
}

pub fn handle_begin(gen: &mut IRGenerator, stmt: &BeginStmt) -> Pl0Result<()> {
    for stmt in &stmt.stmts {
        stmt.accept(gen)?;
    }
    Ok(())
}

pub fn handle_if(gen: &mut IRGenerator, stmt: &IfStmt) -> Pl0Result<()> {
    stmt.condition.accept(gen)?;
    let skip_then = ir_emitter::emit(gen, Instruction::JumpIfFalse(0), stmt.position);
    stmt.then_branch.accept(gen)?;

    match &stmt.else_branch {
        Some(else_branch) => {
            let skip_else = ir_emitter::emit(gen, Instruction::Jump(0), stmt.position);
            let else_start = ir_emitter::next_address(gen);
            ir_emitter::patch_jump(gen, skip_then, else_start)?;
            else_branch.accept(gen)?;
            let end = ir_emitter::next_address(gen);
            ir_emitter::patch_jump(gen, skip_else, end)
        }
        None => {
            let end = ir_emitter::next_address(gen);
            ir_emitter::patch_jump(gen, skip_then, end)
        }
    }
}

pub fn handle_while(gen: &mut IRGenerator, stmt: &WhileStatement) -> Pl0Result<()> {
    let start = ir_emitter::next_address(gen);
    stmt.condition.accept(gen)?;
    let exit = ir_emitter::emit(gen, Instruction::JumpIfFalse(0), stmt.position);
    stmt.body.accept(gen)?;
    ir_emitter::emit(gen, Instruction::Jump(start), stmt.position);
    let end = ir_emitter::next_address(gen);
    ir_emitter::patch_jump(gen, exit, end)
}

pub fn handle_read(gen: &mut IRGenerator, stmt: &Read) -> Pl0Result<()> {
    for target in &stmt.targets {
        let (hops, slot) = symbol_helpers::storage_of(gen, target)?;
        ir_emitter::emit(gen, Instruction::Read { hops, slot }, target.position);
    }
    Ok(())
}

pub fn handle_write(gen: &mut IRGenerator, stmt: &Write) -> Pl0Result<()> {
    for expr in &stmt.exprs {
        expr.accept(gen)?;
        ir_emitter::emit(gen, Instruction::Write, expr.position());
    }
    Ok(())
}
