use crate::ast::{ConstDecl, Node, ProcDecl, Statement, VarDecl};
use crate::errors::Pl0Result;
use crate::semantic::visiters::ASTVisitor;
use crate::Position;

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub const_decl: ConstDecl,
    pub var_decl: VarDecl,
    pub proc_decl: ProcDecl,
    pub statement: Statement,
    /// Runtime slots of this block's activation (parameters then variables).
    /// Filled in by the resolver.
    pub frame_size: usize,
    pub position: Position,
}

impl Block {
    pub fn new(
        const_decl: ConstDecl,
        var_decl: VarDecl,
        proc_decl: ProcDecl,
        statement: Statement,
        position: Position,
    ) -> Self {
        Self {
            const_decl,
            var_decl,
            proc_decl,
            statement,
            frame_size: 0,
            position,
        }
    }
}

impl Node for Block {
    fn accept(&self, visitor: &mut dyn ASTVisitor) -> Pl0Result<()> {
        visitor.visit_block(self)
    }

    fn position(&self) -> Position {
        self.position
    }
}
