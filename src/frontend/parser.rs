use crate::ast::{
    AssignStmt, BeginStmt, BinOp, BinaryOperator, Block, CallStmt, Condition, ConstDecl, Constant,
    Declaration, Expression, Ident, IfStmt, Number, OddCondition, ProcDecl, Procedure, Program,
    Read, RelationalCondition, RelationalOperator, Statement, UnaryOp, UnaryOperator, VarDecl,
    WhileStatement, Write,
};
use crate::errors::{Pl0Error, Pl0Result};
use crate::frontend::token::Token;
use crate::Position;

const STATEMENT_START: &[&str] = &[
    "identifier", "'if'", "'while'", "'call'", "'read'", "'write'", "'begin'",
];
const FACTOR_START: &[&str] = &["identifier", "integer", "'('"];
const RELATIONAL_OPERATORS: &[&str] = &["'='", "'<>'", "'<'", "'<='", "'>'", "'>='"];

/// Recursive-descent parser, one method per grammar production.
///
/// Stops at the first mismatch; there is no error recovery.
pub struct Parser<'a> {
    tokens: &'a [(Token, Position)],
    index: usize,
    eof: (Token, Position),
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [(Token, Position)]) -> Self {
        let eof_position = tokens.last().map(|(_, position)| *position).unwrap_or_default();
        Self {
            tokens,
            index: 0,
            eof: (Token::Eof, eof_position),
        }
    }

    fn current(&self) -> &(Token, Position) {
        self.tokens.get(self.index).unwrap_or(&self.eof)
    }

    fn current_token(&self) -> &Token {
        &self.current().0
    }

    fn position(&self) -> Position {
        self.current().1
    }

    fn next(&mut self) {
        if self.index < self.tokens.len() {
            self.index += 1;
        }
    }

    fn error(&self, expected: &[&str]) -> Pl0Error {
        Pl0Error::syntax_error(expected, self.current_token().to_string(), self.position())
    }

    fn expect(&mut self, expected: Token) -> Pl0Result<Position> {
        if !expected.same_kind(self.current_token()) {
            return Err(self.error(&[&format!("'{}'", expected)]));
        }
        let position = self.position();
        self.next();
        Ok(position)
    }

    fn expect_ident(&mut self) -> Pl0Result<(String, Position)> {
        match self.current() {
            (Token::Ident(name), position) => {
                let result = (name.clone(), *position);
                self.next();
                Ok(result)
            }
            _ => Err(self.error(&["identifier"])),
        }
    }

    fn expect_number(&mut self) -> Pl0Result<(i64, Position)> {
        match self.current() {
            (Token::Number(value), position) => {
                let result = (*value, *position);
                self.next();
                Ok(result)
            }
            _ => Err(self.error(&["integer"])),
        }
    }

    fn consume_if(&mut self, token: Token) -> bool {
        if token.same_kind(self.current_token()) {
            self.next();
            true
        } else {
            false
        }
    }

    /**
     * constdecl = ident "=" integer { "," ident "=" integer } ";"
     */
    fn parse_const_declarations(&mut self) -> Pl0Result<ConstDecl> {
        self.expect(Token::Const)?;
        let mut constants = Vec::new();
        loop {
            let (name, position) = self.expect_ident()?;
            self.expect(Token::Equal)?;
            let (value, _) = self.expect_number()?;
            constants.push(Constant { name, value, position });
            if !self.consume_if(Token::Comma) {
                break;
            }
        }
        self.expect(Token::Semicolon)?;
        Ok(ConstDecl::new(constants))
    }

    /**
     * vardecl = ident { "," ident } ";"
     */
    fn parse_var_declarations(&mut self) -> Pl0Result<VarDecl> {
        self.expect(Token::Var)?;
        let mut variables = Vec::new();
        loop {
            let (name, position) = self.expect_ident()?;
            variables.push(Declaration::new(name, position));
            if !self.consume_if(Token::Comma) {
                break;
            }
        }
        self.expect(Token::Semicolon)?;
        Ok(VarDecl::new(variables))
    }

    /**
     * procedure = "procedure" ident "(" [ ident { "," ident } ] ")" ";" block { ";" procedure }
     *
     * Siblings are separated by ';'. A ';' after the last procedure of a
     * block is tolerated.
     */
    fn parse_procedure_declarations(&mut self) -> Pl0Result<ProcDecl> {
        let mut procedures = Vec::new();
        while *self.current_token() == Token::Procedure {
            let position = self.expect(Token::Procedure)?;
            let (name, _) = self.expect_ident()?;
            let params = self.parse_parameters()?;
            self.expect(Token::Semicolon)?;
            let block = self.block()?;
            procedures.push(Procedure::new(name, params, block, position));
            if !self.consume_if(Token::Semicolon) && *self.current_token() == Token::Procedure {
                return Err(self.error(&["';'"]));
            }
        }
        Ok(ProcDecl::new(procedures))
    }

    fn parse_parameters(&mut self) -> Pl0Result<Vec<Declaration>> {
        self.expect(Token::LParen)?;
        let mut params = Vec::new();
        if let Token::Ident(_) = self.current_token() {
            loop {
                let (name, position) = self.expect_ident()?;
                params.push(Declaration::new(name, position));
                if !self.consume_if(Token::Comma) {
                    break;
                }
            }
        }
        if *self.current_token() != Token::RParen {
            let expected: &[&str] = if params.is_empty() {
                &["identifier", "')'"]
            } else {
                &["','", "')'"]
            };
            return Err(self.error(expected));
        }
        self.next();
        Ok(params)
    }

    /**
     * block = [ "const" constdecl ] [ "var" vardecl ] { procedure } statement
     */
    fn block(&mut self) -> Pl0Result<Block> {
        let position = self.position();
        let const_decl = if *self.current_token() == Token::Const {
            self.parse_const_declarations()?
        } else {
            ConstDecl::default()
        };

        let var_decl = if *self.current_token() == Token::Var {
            self.parse_var_declarations()?
        } else {
            VarDecl::default()
        };

        let proc_decl = self.parse_procedure_declarations()?;
        let statement = self.statement()?;
        Ok(Block::new(const_decl, var_decl, proc_decl, statement, position))
    }

    /**
     * statement = ident ":=" expr
     *           | "if" condition "then" statement [ "else" statement ]
     *           | "while" condition "do" statement
     *           | "call" ident [ "(" [ expr { "," expr } ] ")" ]
     *           | "read" "(" ident { "," ident } ")"
     *           | "write" "(" expr { "," expr } ")"
     *           | "begin" statement { ";" statement } "end"
     */
    fn statement(&mut self) -> Pl0Result<Statement> {
        let position = self.position();
        match self.current_token() {
            Token::Ident(_) => {
                let (name, position) = self.expect_ident()?;
                self.expect(Token::Assign)?;
                let expr = self.expression()?;
                Ok(Statement::Assign(AssignStmt::new(Ident::new(name, position), expr)))
            }
            Token::Call => {
                self.next();
                let (name, callee_position) = self.expect_ident()?;
                let mut args = Vec::new();
                if self.consume_if(Token::LParen) {
                    if *self.current_token() != Token::RParen {
                        args = self.expression_list()?;
                    }
                    self.expect(Token::RParen)?;
                }
                let callee = Ident::new(name, callee_position);
                Ok(Statement::Call(CallStmt::new(callee, args, position)))
            }
            Token::Begin => {
                self.next();
                let mut stmts = vec![self.statement()?];
                while self.consume_if(Token::Semicolon) {
                    stmts.push(self.statement()?);
                }
                if *self.current_token() != Token::End {
                    return Err(self.error(&["';'", "'end'"]));
                }
                self.next();
                Ok(Statement::Compound(BeginStmt::new(stmts, position)))
            }
            Token::If => {
                self.next();
                let condition = self.condition()?;
                self.expect(Token::Then)?;
                let then_branch = self.statement()?;
                // The innermost open `if` claims the `else`.
                let else_branch = if self.consume_if(Token::Else) {
                    Some(self.statement()?)
                } else {
                    None
                };
                Ok(Statement::If(IfStmt::new(condition, then_branch, else_branch, position)))
            }
            Token::While => {
                self.next();
                let condition = self.condition()?;
                self.expect(Token::Do)?;
                let body = self.statement()?;
                Ok(Statement::While(WhileStatement::new(condition, body, position)))
            }
            Token::Write => {
                self.next();
                self.expect(Token::LParen)?;
                let exprs = self.expression_list()?;
                self.expect(Token::RParen)?;
                Ok(Statement::Write(Write::new(exprs, position)))
            }
            Token::Read => {
                self.next();
                self.expect(Token::LParen)?;
                let mut targets = Vec::new();
                loop {
                    let (name, position) = self.expect_ident()?;
                    targets.push(Ident::new(name, position));
                    if !self.consume_if(Token::Comma) {
                        break;
                    }
                }
                self.expect(Token::RParen)?;
                Ok(Statement::Read(Read::new(targets, position)))
            }
            _ => Err(self.error(STATEMENT_START)),
        }
    }

    fn expression_list(&mut self) -> Pl0Result<Vec<Expression>> {
        let mut exprs = vec![self.expression()?];
        while self.consume_if(Token::Comma) {
            exprs.push(self.expression()?);
        }
        Ok(exprs)
    }

    /**
     * condition = "odd" expr | expr relop expr
     */
    fn condition(&mut self) -> Pl0Result<Condition> {
        let position = self.position();
        if self.consume_if(Token::Odd) {
            let expr = self.expression()?;
            return Ok(Condition::Odd(OddCondition::new(expr, position)));
        }

        let left = self.expression()?;
        let operator = match self.current_token() {
            Token::Equal => RelationalOperator::Equal,
            Token::NotEqual => RelationalOperator::NotEqual,
            Token::LessThan => RelationalOperator::LessThan,
            Token::LessThanEqual => RelationalOperator::LessThanEqual,
            Token::GreaterThan => RelationalOperator::GreaterThan,
            Token::GreaterThanEqual => RelationalOperator::GreaterThanEqual,
            _ => return Err(self.error(RELATIONAL_OPERATORS)),
        };
        let operator_position = self.position();
        self.next();
        let right = self.expression()?;
        Ok(Condition::Relational(RelationalCondition::new(left, right, operator, operator_position)))
    }

    /**
     * expr = [ "+" | "-" ] term { ( "+" | "-" ) term }
     *
     * A leading sign applies to the first term only.
     */
    fn expression(&mut self) -> Pl0Result<Expression> {
        let sign = match self.current_token() {
            Token::Plus => Some(UnaryOperator::Plus),
            Token::Minus => Some(UnaryOperator::Minus),
            _ => None,
        };
        let mut lhs = match sign {
            Some(operator) => {
                let position = self.position();
                self.next();
                let operand = self.term()?;
                Expression::Unary(UnaryOp::new(operator, operand, position))
            }
            None => self.term()?,
        };

        loop {
            let operator = match self.current_token() {
                Token::Plus => BinaryOperator::Plus,
                Token::Minus => BinaryOperator::Minus,
                _ => break,
            };
            let position = self.position();
            self.next();
            let rhs = self.term()?;
            lhs = Expression::Binary(BinOp::new(lhs, rhs, operator, position));
        }
        Ok(lhs)
    }

    /**
     * term = factor { ( "*" | "/" ) factor }
     */
    fn term(&mut self) -> Pl0Result<Expression> {
        let mut lhs = self.factor()?;
        loop {
            let operator = match self.current_token() {
                Token::Multiply => BinaryOperator::Multiply,
                Token::Divide => BinaryOperator::Divide,
                _ => break,
            };
            let position = self.position();
            self.next();
            let rhs = self.factor()?;
            lhs = Expression::Binary(BinOp::new(lhs, rhs, operator, position));
        }
        Ok(lhs)
    }

    /**
     * factor = ident | integer | "(" expr ")"
     */
    fn factor(&mut self) -> Pl0Result<Expression> {
        match self.current_token() {
            Token::Ident(_) => {
                let (name, position) = self.expect_ident()?;
                Ok(Expression::Ident(Ident::new(name, position)))
            }
            Token::Number(_) => {
                let (value, position) = self.expect_number()?;
                Ok(Expression::Number(Number::new(value, position)))
            }
            Token::LParen => {
                self.next();
                let expr = self.expression()?;
                self.expect(Token::RParen)?;
                Ok(expr)
            }
            _ => Err(self.error(FACTOR_START)),
        }
    }

    /**
     * program = "program" ident ";" block "."
     */
    fn program(&mut self) -> Pl0Result<Program> {
        let position = self.expect(Token::Program)?;
        let (name, _) = self.expect_ident()?;
        self.expect(Token::Semicolon)?;
        let block = self.block()?;
        self.expect(Token::Dot)?;
        if *self.current_token() != Token::Eof {
            return Err(self.error(&["end of input"]));
        }
        Ok(Program::new(name, block, position))
    }

    pub fn parse(&mut self) -> Pl0Result<Program> {
        self.index = 0;
        self.program()
    }
}

/// Parse a complete token stream into a `Program`.
pub fn parse(tokens: &[(Token, Position)]) -> Pl0Result<Program> {
    Parser::new(tokens).parse()
}
