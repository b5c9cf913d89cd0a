use crate::utils::config::semantic::{FIRST_SLOT, PROGRAM_LEVEL};
use crate::utils::errors::{Pl0Error, Pl0Result};

/// Per-block bookkeeping while resolving: lexical level and slot allocation.
#[derive(Debug, Clone)]
pub struct ScopeInfo {
    current_level: usize,
    next_slot: usize,
    parent: Option<Box<ScopeInfo>>,
}

impl Default for ScopeInfo {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeInfo {
    pub fn new() -> Self {
        ScopeInfo {
            current_level: PROGRAM_LEVEL,
            next_slot: FIRST_SLOT,
            parent: None,
        }
    }

    pub fn push_scope(&self) -> Self {
        ScopeInfo {
            current_level: self.current_level + 1,
            next_slot: FIRST_SLOT,
            parent: Some(Box::new(self.clone())),
        }
    }

    pub fn pop_scope(&mut self) -> Pl0Result<()> {
        match self.parent.take() {
            Some(parent) => {
                *self = *parent;
                Ok(())
            }
            None => Err(Pl0Error::internal_error("no parent scope to restore")),
        }
    }

    pub fn allocate_slot(&mut self) -> usize {
        let slot = self.next_slot;
        self.next_slot += 1;
        slot
    }

    pub fn level(&self) -> usize {
        self.current_level
    }

    /// Slots allocated so far in this block.
    pub fn frame_size(&self) -> usize {
        self.next_slot - FIRST_SLOT
    }
}
