use tracing::trace;

use super::{ir_emitter, IRGenerator};
use crate::{
    ast::{Block, Node, ProcDecl, Program},
    errors::{Pl0Error, Pl0Result},
    ir::Instruction,
};

pub fn handle_program(gen: &mut IRGenerator, program: &Program) -> Pl0Result<()> {
    program.block.accept(gen)?;
    gen.code.entry = gen.block_entry;
    ir_emitter::emit(gen, Instruction::Halt, program.position);
    Ok(())
}

/// Nested procedures first, then this block's own entry and body.
pub fn handle_block(gen: &mut IRGenerator, block: &Block) -> Pl0Result<()> {
    block.const_decl.accept(gen)?;
    block.var_decl.accept(gen)?;
    block.proc_decl.accept(gen)?;

    gen.block_entry = ir_emitter::emit(gen, Instruction::Enter(block.frame_size), block.position);
    block.statement.accept(gen)
}

pub fn handle_proc_decl(gen: &mut IRGenerator, decl: &ProcDecl) -> Pl0Result<()> {
    for procedure in &decl.procedures {
        let id = procedure.id.ok_or_else(|| {
            Pl0Error::internal_error(format!("procedure '{}' has no id", procedure.name))
        })?;

        gen.level += 1;
        procedure.block.accept(gen)?;
        gen.proc_entries.insert(id, gen.block_entry);
        ir_emitter::emit(gen, Instruction::Return, procedure.position);
        gen.level -= 1;

        trace!(procedure = %procedure.name, %id, entry = gen.block_entry, "procedure emitted");
    }
    Ok(())
}
