use super::IRGenerator;
use crate::{
    ast::Ident,
    errors::{Pl0Error, Pl0Result},
    semantic::symboltable::Symbol,
};

/// Binding attached by the resolver; missing means an unresolved tree.
pub fn bound_symbol(ident: &Ident) -> Pl0Result<Symbol> {
    ident.symbol.ok_or_else(|| {
        Pl0Error::internal_error(format!("identifier '{}' at {} is unresolved", ident.value, ident.position))
    })
}

/// Static links between the block being emitted and the one that declared `symbol`.
pub fn hops_to(gen: &IRGenerator, symbol: &Symbol) -> Pl0Result<usize> {
    gen.level.checked_sub(symbol.level).ok_or_else(|| {
        Pl0Error::internal_error(format!(
            "binding at level {} is not visible from level {}",
            symbol.level, gen.level
        ))
    })
}

/// `(hops, slot)` of a variable or parameter.
pub fn storage_of(gen: &IRGenerator, ident: &Ident) -> Pl0Result<(usize, usize)> {
    let symbol = bound_symbol(ident)?;
    let slot = symbol.slot().ok_or_else(|| {
        Pl0Error::internal_error(format!(
            "'{}' is a {} and has no storage",
            ident.value,
            symbol.symbol_type.describe()
        ))
    })?;
    Ok((hops_to(gen, &symbol)?, slot))
}
