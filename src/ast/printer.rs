use std::fmt::Write as _;

use crate::ast::{
    AssignStmt, BeginStmt, BinOp, Block, CallStmt, ConstDecl, Ident, IfStmt, Node, Number,
    OddCondition, ProcDecl, Program, Read, RelationalCondition, UnaryOp, VarDecl, WhileStatement,
    Write,
};
use crate::errors::Pl0Result;
use crate::semantic::visiters::ASTVisitor;

/// Renders a tree as indented text, one node per line.
#[derive(Debug, Default)]
pub struct AstPrinter {
    output: String,
    depth: usize,
}

impl AstPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn print(node: &dyn Node) -> Pl0Result<String> {
        let mut printer = Self::new();
        node.accept(&mut printer)?;
        Ok(printer.output)
    }

    fn line(&mut self, text: impl AsRef<str>) {
        // Writing to a String cannot fail.
        let _ = writeln!(self.output, "{}{}", "  ".repeat(self.depth), text.as_ref());
    }

    fn block_parts(&mut self, block: &Block) -> Pl0Result<()> {
        block.const_decl.accept(self)?;
        block.var_decl.accept(self)?;
        block.proc_decl.accept(self)?;
        block.statement.accept(self)
    }

    fn nested(&mut self, node: &dyn Node) -> Pl0Result<()> {
        self.depth += 1;
        let result = node.accept(self);
        self.depth -= 1;
        result
    }
}

impl ASTVisitor for AstPrinter {
    fn visit_ident(&mut self, ident: &Ident) -> Pl0Result<()> {
        match &ident.symbol {
            Some(symbol) => self.line(format!(
                "Name {} ({} @ level {})",
                ident.value,
                symbol.symbol_type.describe(),
                symbol.level
            )),
            None => self.line(format!("Name {}", ident.value)),
        }
        Ok(())
    }

    fn visit_number(&mut self, number: &Number) -> Pl0Result<()> {
        self.line(format!("Literal {}", number.value));
        Ok(())
    }

    fn visit_unary_operation(&mut self, unary: &UnaryOp) -> Pl0Result<()> {
        self.line(format!("Unary {}", unary.operator));
        self.nested(unary.operand.as_ref())
    }

    fn visit_binary_operation(&mut self, binop: &BinOp) -> Pl0Result<()> {
        self.line(format!("Binary {}", binop.operator));
        self.nested(binop.left.as_ref())?;
        self.nested(binop.right.as_ref())
    }

    fn visit_odd_condition(&mut self, condition: &OddCondition) -> Pl0Result<()> {
        self.line("Odd");
        self.nested(&condition.expr)
    }

    fn visit_relational_condition(&mut self, condition: &RelationalCondition) -> Pl0Result<()> {
        self.line(format!("Compare {}", condition.operator));
        self.nested(&condition.left)?;
        self.nested(&condition.right)
    }

    fn visit_while_statement(&mut self, while_statement: &WhileStatement) -> Pl0Result<()> {
        self.line("While");
        self.nested(&while_statement.condition)?;
        self.nested(while_statement.body.as_ref())
    }

    fn visit_call(&mut self, call: &CallStmt) -> Pl0Result<()> {
        self.line(format!("Call {}", call.callee.value));
        for arg in &call.args {
            self.nested(arg)?;
        }
        Ok(())
    }

    fn visit_assign(&mut self, assign: &AssignStmt) -> Pl0Result<()> {
        self.line(format!("Assign {}", assign.target.value));
        self.nested(&assign.expr)
    }

    fn visit_begin(&mut self, begin: &BeginStmt) -> Pl0Result<()> {
        self.line("Compound");
        for stmt in &begin.stmts {
            self.nested(stmt)?;
        }
        Ok(())
    }

    fn visit_if(&mut self, if_stmt: &IfStmt) -> Pl0Result<()> {
        self.line("If");
        self.nested(&if_stmt.condition)?;
        self.nested(if_stmt.then_branch.as_ref())?;
        if let Some(else_branch) = &if_stmt.else_branch {
            self.depth += 1;
            self.line("Else");
            let result = self.nested(else_branch.as_ref());
            self.depth -= 1;
            result?;
        }
        Ok(())
    }

    fn visit_write(&mut self, write: &Write) -> Pl0Result<()> {
        self.line("Write");
        for expr in &write.exprs {
            self.nested(expr)?;
        }
        Ok(())
    }

    fn visit_read(&mut self, read: &Read) -> Pl0Result<()> {
        self.line("Read");
        for target in &read.targets {
            self.nested(target)?;
        }
        Ok(())
    }

    fn visit_const(&mut self, const_decl: &ConstDecl) -> Pl0Result<()> {
        for constant in &const_decl.constants {
            self.line(format!("Const {} = {}", constant.name, constant.value));
        }
        Ok(())
    }

    fn visit_var_decl(&mut self, var_decl: &VarDecl) -> Pl0Result<()> {
        if !var_decl.variables.is_empty() {
            let names: Vec<&str> = var_decl.variables.iter().map(|v| v.name.as_str()).collect();
            self.line(format!("Var {}", names.join(", ")));
        }
        Ok(())
    }

    fn visit_proc_decl(&mut self, proc_decl: &ProcDecl) -> Pl0Result<()> {
        for procedure in &proc_decl.procedures {
            let params: Vec<&str> = procedure.params.iter().map(|p| p.name.as_str()).collect();
            self.line(format!("Procedure {}({})", procedure.name, params.join(", ")));
            self.nested(&procedure.block)?;
        }
        Ok(())
    }

    fn visit_block(&mut self, block: &Block) -> Pl0Result<()> {
        self.line(format!("Block (frame {})", block.frame_size));
        self.depth += 1;
        let result = self.block_parts(block);
        self.depth -= 1;
        result
    }

    fn visit_program(&mut self, program: &Program) -> Pl0Result<()> {
        self.line(format!("Program {}", program.name));
        self.nested(&program.block)
    }
}
