use super::IRGenerator;
use crate::{
    errors::{Pl0Error, Pl0Result},
    ir::Instruction,
    semantic::symboltable::ProcId,
    Position,
};

/// Append `instruction` and return its address.
pub fn emit(gen: &mut IRGenerator, instruction: Instruction, position: Position) -> usize {
    let address = gen.code.instructions.len();
    gen.code.instructions.push(instruction);
    gen.code.positions.push(position);
    address
}

pub fn next_address(gen: &IRGenerator) -> usize {
    gen.code.instructions.len()
}

/// Point the jump at `address` to `target`.
pub fn patch_jump(gen: &mut IRGenerator, address: usize, target: usize) -> Pl0Result<()> {
    match gen.code.instructions.get_mut(address) {
        Some(Instruction::Jump(dest)) | Some(Instruction::JumpIfFalse(dest)) => {
            *dest = target;
            Ok(())
        }
        other => Err(Pl0Error::internal_error(format!(
            "cannot patch non-jump {:?} at {}",
            other, address
        ))),
    }
}

/// Emit a call to `id`, recording a fixup when its entry is not known yet.
pub fn emit_call(
    gen: &mut IRGenerator,
    id: ProcId,
    hops: usize,
    arity: usize,
    position: Position,
) -> usize {
    let target = gen.proc_entries.get(&id).copied();
    let address = emit(
        gen,
        Instruction::Call {
            target: target.unwrap_or(0),
            hops,
            arity,
        },
        position,
    );
    if target.is_none() {
        gen.fixups.push((address, id));
    }
    address
}

pub fn resolve_fixups(gen: &mut IRGenerator) -> Pl0Result<()> {
    for (address, id) in std::mem::take(&mut gen.fixups) {
        let entry = gen
            .proc_entries
            .get(&id)
            .copied()
            .ok_or_else(|| Pl0Error::internal_error(format!("procedure {} was never emitted", id)))?;
        match gen.code.instructions.get_mut(address) {
            Some(Instruction::Call { target, .. }) => *target = entry,
            other => {
                return Err(Pl0Error::internal_error(format!(
                    "cannot patch non-call {:?} at {}",
                    other, address
                )))
            }
        }
    }
    Ok(())
}
