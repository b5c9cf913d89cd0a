use std::collections::HashMap;
use std::fmt;

use crate::errors::{Pl0Error, Pl0Result, ResolutionErrorKind};
use crate::Position;

/// Identifies a procedure across the whole program; assigned in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProcId(pub usize);

impl fmt::Display for ProcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolType {
    Constant(i64),
    Variable(usize),
    Parameter(usize),
    Procedure { arity: usize, id: ProcId },
}

impl SymbolType {
    pub fn describe(&self) -> &'static str {
        match self {
            SymbolType::Constant(_) => "constant",
            SymbolType::Variable(_) => "variable",
            SymbolType::Parameter(_) => "parameter",
            SymbolType::Procedure { .. } => "procedure",
        }
    }
}

/// A resolved binding: what a name means and in which block it was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    pub symbol_type: SymbolType,
    /// Where the name was declared.
    pub position: Position,
    /// Lexical depth of the declaring block; the program block is 0.
    pub level: usize,
}

impl Symbol {
    pub fn new(symbol_type: SymbolType, position: Position, level: usize) -> Self {
        Self {
            symbol_type,
            position,
            level,
        }
    }

    /// Activation slot for variables and parameters.
    pub fn slot(&self) -> Option<usize> {
        match self.symbol_type {
            SymbolType::Variable(slot) | SymbolType::Parameter(slot) => Some(slot),
            _ => None,
        }
    }

    pub fn is_assignable(&self) -> bool {
        self.slot().is_some()
    }
}

/// Scope stack used during resolution: one map per open block, innermost last.
pub struct SymbolTable {
    scopes: Vec<HashMap<String, Symbol>>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            scopes: vec![HashMap::new()],
        }
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    pub fn drop_scope(&mut self) -> Pl0Result<()> {
        if self.scopes.len() <= 1 {
            return Err(Pl0Error::internal_error("cannot drop the program scope"));
        }
        self.scopes.pop();
        Ok(())
    }

    /// Declare `name` in the innermost scope.
    pub fn insert(&mut self, name: &str, symbol: Symbol) -> Pl0Result<()> {
        let scope = self
            .scopes
            .last_mut()
            .ok_or_else(|| Pl0Error::internal_error("symbol table has no open scope"))?;
        if let Some(existing) = scope.get(name) {
            return Err(Pl0Error::resolution_error(
                ResolutionErrorKind::DuplicateDeclaration,
                name,
                format!(
                    "'{}' is already declared in this block as a {} at {}",
                    name,
                    existing.symbol_type.describe(),
                    existing.position
                ),
                symbol.position,
            ));
        }
        scope.insert(name.to_string(), symbol);
        Ok(())
    }

    // Get a reference to a symbol by name, searching from innermost to outermost scope.
    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Like `get`, but an unknown name is an `UndeclaredIdentifier` error at `position`.
    pub fn lookup(&self, name: &str, position: Position) -> Pl0Result<Symbol> {
        self.get(name).copied().ok_or_else(|| {
            Pl0Error::resolution_error(
                ResolutionErrorKind::UndeclaredIdentifier,
                name,
                format!("undeclared identifier '{}'", name),
                position,
            )
        })
    }
}
