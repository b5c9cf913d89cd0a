use super::{ir_emitter, symbol_helpers, IRGenerator};
use crate::{
    ast::{BinOp, BinaryOperator, Ident, Node, Number, OddCondition, RelationalCondition, UnaryOp, UnaryOperator},
    errors::{Pl0Error, Pl0Result},
    ir::Instruction,
    semantic::symboltable::SymbolType,
};

pub fn handle_ident(gen: &mut IRGenerator, ident: &Ident) -> Pl0Result<()> {
    let symbol = symbol_helpers::bound_symbol(ident)?;
    match symbol.symbol_type {
        SymbolType::Constant(value) => {
            ir_emitter::emit(gen, Instruction::Lit(value), ident.position);
        }
        SymbolType::Variable(_) | SymbolType::Parameter(_) => {
            let (hops, slot) = symbol_helpers::storage_of(gen, ident)?;
            ir_emitter::emit(gen, Instruction::Load { hops, slot }, ident.position);
        }
        SymbolType::Procedure { .. } => {
            return Err(Pl0Error::internal_error(format!(
                "procedure '{}' used as a value",
                ident.value
            )));
        }
    }
    Ok(())
}

pub fn handle_number(gen: &mut IRGenerator, number: &Number) -> Pl0Result<()> {
    ir_emitter::emit(gen, Instruction::Lit(number.value), number.position);
    Ok(())
}

pub fn handle_unary_operation(gen: &mut IRGenerator, unary: &UnaryOp) -> Pl0Result<()> {
    unary.operand.accept(gen)?;
    if unary.operator == UnaryOperator::Minus {
        ir_emitter::emit(gen, Instruction::Neg, unary.position);
    }
    Ok(())
}

pub fn handle_binary_operation(gen: &mut IRGenerator, binop: &BinOp) -> Pl0Result<()> {
    binop.left.accept(gen)?;
    binop.right.accept(gen)?;
    let instruction = match binop.operator {
        BinaryOperator::Plus => Instruction::Add,
        BinaryOperator::Minus => Instruction::Sub,
        BinaryOperator::Multiply => Instruction::Mul,
        BinaryOperator::Divide => Instruction::Div,
    };
    ir_emitter::emit(gen, instruction, binop.position);
    Ok(())
}

pub fn handle_odd_condition(gen: &mut IRGenerator, cond: &OddCondition) -> Pl0Result<()> {
    cond.expr.accept(gen)?;
    ir_emitter::emit(gen, Instruction::Odd, cond.position);
    Ok(())
}

pub fn handle_relational_condition(gen: &mut IRGenerator, cond: &RelationalCondition) -> Pl0Result<()> {
    cond.left.accept(gen)?;
    cond.right.accept(gen)?;
    ir_emitter::emit(gen, Instruction::Compare(cond.operator), cond.position);
    Ok(())
}
