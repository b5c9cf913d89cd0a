use pl0vm::ast::{
    BinaryOperator, Condition, Expression, Program, RelationalOperator, Statement, UnaryOperator,
};
use pl0vm::frontend::lexer::scan;
use pl0vm::frontend::parser::parse;
use pl0vm::utils::errors::{Pl0Error, Pl0Result};
use pl0vm::Position;

fn parse_source(source: &str) -> Pl0Result<Program> {
    let tokens = scan(source)?;
    parse(&tokens)
}

fn expect_syntax_error(source: &str) -> (Vec<String>, String, Position) {
    match parse_source(source) {
        Err(Pl0Error::SyntaxError {
            expected,
            found,
            position,
        }) => (expected, found, position),
        other => panic!("Expected a syntax error for {:?}, got {:?}", source, other),
    }
}

/// The single assigned expression of `program p; var a, b; a := <expr>.`
fn parse_expression(expr: &str) -> Pl0Result<Expression> {
    let program = parse_source(&format!("program p; var a, b; a := {}.", expr))?;
    match program.block.statement {
        Statement::Assign(assign) => Ok(assign.expr),
        other => panic!("Expected assignment, got {:?}", other),
    }
}

#[test]
fn test_program_with_all_sections() -> Pl0Result<()> {
    let source = "
        program demo;
        const limit = 10, step = 2;
        var i, total;
        procedure add(n);
            begin total := total + n end;
        begin
            i := 0;
            while i < limit do
                begin call add(i); i := i + step end;
            write(total)
        end.
    ";
    let program = parse_source(source)?;
    assert_eq!(program.name, "demo");
    assert_eq!(program.position, Position::new(2, 9));

    let block = &program.block;
    let constants: Vec<(&str, i64)> = block
        .const_decl
        .constants
        .iter()
        .map(|c| (c.name.as_str(), c.value))
        .collect();
    assert_eq!(constants, vec![("limit", 10), ("step", 2)]);

    let variables: Vec<&str> = block.var_decl.variables.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(variables, vec!["i", "total"]);

    assert_eq!(block.proc_decl.procedures.len(), 1);
    let add = &block.proc_decl.procedures[0];
    assert_eq!(add.name, "add");
    assert_eq!(add.arity(), 1);
    assert_eq!(add.id, None);

    match &block.statement {
        Statement::Compound(begin) => assert_eq!(begin.stmts.len(), 3),
        other => panic!("Expected compound body, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_parse_is_deterministic() -> Pl0Result<()> {
    let source = "program p; var x; begin x := 1; if odd x then write(x) else write(-x) end.";
    assert_eq!(parse_source(source)?, parse_source(source)?);
    Ok(())
}

#[test]
fn test_dangling_else_binds_to_inner_if() -> Pl0Result<()> {
    let program = parse_source(
        "program p; var x; if x = 1 then if x = 2 then x := 3 else x := 4.",
    )?;
    let outer = match program.block.statement {
        Statement::If(outer) => outer,
        other => panic!("Expected if, got {:?}", other),
    };
    assert!(outer.else_branch.is_none(), "outer if must not own the else");
    match *outer.then_branch {
        Statement::If(inner) => {
            assert!(inner.else_branch.is_some(), "inner if must own the else");
        }
        other => panic!("Expected nested if, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_leading_minus_applies_to_first_term() -> Pl0Result<()> {
    match parse_expression("-a*b")? {
        Expression::Unary(unary) => {
            assert_eq!(unary.operator, UnaryOperator::Minus);
            match *unary.operand {
                Expression::Binary(binop) => assert_eq!(binop.operator, BinaryOperator::Multiply),
                other => panic!("Expected a*b under the sign, got {:?}", other),
            }
        }
        other => panic!("Expected unary minus, got {:?}", other),
    }

    match parse_expression("-a+b")? {
        Expression::Binary(binop) => {
            assert_eq!(binop.operator, BinaryOperator::Plus);
            assert!(matches!(*binop.left, Expression::Unary(_)));
            assert!(matches!(*binop.right, Expression::Ident(_)));
        }
        other => panic!("Expected (-a)+b, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_binary_operators_are_left_associative() -> Pl0Result<()> {
    match parse_expression("1 - 2 - 3")? {
        Expression::Binary(outer) => {
            assert_eq!(outer.operator, BinaryOperator::Minus);
            assert!(matches!(*outer.right, Expression::Number(ref n) if n.value == 3));
            match *outer.left {
                Expression::Binary(inner) => {
                    assert!(matches!(*inner.left, Expression::Number(ref n) if n.value == 1));
                    assert!(matches!(*inner.right, Expression::Number(ref n) if n.value == 2));
                }
                other => panic!("Expected (1 - 2), got {:?}", other),
            }
        }
        other => panic!("Expected binary minus, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_multiplication_binds_tighter_than_addition() -> Pl0Result<()> {
    match parse_expression("a + b * 2")? {
        Expression::Binary(binop) => {
            assert_eq!(binop.operator, BinaryOperator::Plus);
            assert!(matches!(*binop.right, Expression::Binary(ref r) if r.operator == BinaryOperator::Multiply));
        }
        other => panic!("Expected a + (b * 2), got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_parentheses_group() -> Pl0Result<()> {
    match parse_expression("(a + b) / 2")? {
        Expression::Binary(binop) => {
            assert_eq!(binop.operator, BinaryOperator::Divide);
            assert_eq!(binop.position, Position::new(1, 35));
            assert!(matches!(*binop.left, Expression::Binary(ref l) if l.operator == BinaryOperator::Plus));
        }
        other => panic!("Expected (a + b) / 2, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_conditions() -> Pl0Result<()> {
    let program = parse_source("program p; var x; while x >= 10 do if odd x then x := 0.")?;
    let while_stmt = match program.block.statement {
        Statement::While(while_stmt) => while_stmt,
        other => panic!("Expected while, got {:?}", other),
    };
    match &while_stmt.condition {
        Condition::Relational(cond) => assert_eq!(cond.operator, RelationalOperator::GreaterThanEqual),
        other => panic!("Expected relational condition, got {:?}", other),
    }
    match *while_stmt.body {
        Statement::If(if_stmt) => assert!(matches!(if_stmt.condition, Condition::Odd(_))),
        other => panic!("Expected if, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_call_forms() -> Pl0Result<()> {
    let program = parse_source(
        "program p; procedure q(); x := 1; begin call q; call q(); call r(1, 2 + 3) end.",
    )?;
    let stmts = match program.block.statement {
        Statement::Compound(begin) => begin.stmts,
        other => panic!("Expected compound, got {:?}", other),
    };
    let arg_counts: Vec<usize> = stmts
        .iter()
        .map(|stmt| match stmt {
            Statement::Call(call) => call.args.len(),
            other => panic!("Expected call, got {:?}", other),
        })
        .collect();
    assert_eq!(arg_counts, vec![0, 0, 2]);
    Ok(())
}

#[test]
fn test_read_and_write_lists() -> Pl0Result<()> {
    let program = parse_source("program p; var a, b; begin read(a, b); write(a, b, a + b) end.")?;
    let stmts = match program.block.statement {
        Statement::Compound(begin) => begin.stmts,
        other => panic!("Expected compound, got {:?}", other),
    };
    match &stmts[0] {
        Statement::Read(read) => {
            let names: Vec<&str> = read.targets.iter().map(|t| t.value.as_str()).collect();
            assert_eq!(names, vec!["a", "b"]);
        }
        other => panic!("Expected read, got {:?}", other),
    }
    match &stmts[1] {
        Statement::Write(write) => assert_eq!(write.exprs.len(), 3),
        other => panic!("Expected write, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_nested_procedures_and_trailing_semicolon() -> Pl0Result<()> {
    let source = "
        program p;
        procedure outer(a);
            procedure inner(b);
                write(a + b);
            call inner(a);
        procedure second();
            call outer(1);
        call second.
    ";
    let program = parse_source(source)?;
    let procedures = &program.block.proc_decl.procedures;
    assert_eq!(procedures.len(), 2);
    assert_eq!(procedures[0].block.proc_decl.procedures.len(), 1);
    assert_eq!(procedures[0].block.proc_decl.procedures[0].name, "inner");
    assert_eq!(procedures[1].name, "second");
    Ok(())
}

#[test]
fn test_empty_compound_is_rejected() {
    let (expected, found, position) = expect_syntax_error("program p; begin end.");
    assert_eq!(found, "end");
    assert_eq!(position, Position::new(1, 18));
    assert!(expected.contains(&"identifier".to_string()));
    assert!(expected.contains(&"'begin'".to_string()));
}

#[test]
fn test_missing_semicolon_between_statements() {
    let (expected, found, position) =
        expect_syntax_error("program p; var x; begin x := 1 x := 2 end.");
    assert_eq!(expected, vec!["';'".to_string(), "'end'".to_string()]);
    assert_eq!(found, "x");
    assert_eq!(position, Position::new(1, 32));
}

#[test]
fn test_missing_final_dot() {
    let (expected, found, _) = expect_syntax_error("program p; var x; x := 1");
    assert_eq!(expected, vec!["'.'".to_string()]);
    assert_eq!(found, "end of input");
}

#[test]
fn test_tokens_after_final_dot() {
    let (expected, found, _) = expect_syntax_error("program p; var x; x := 1. x");
    assert_eq!(expected, vec!["end of input".to_string()]);
    assert_eq!(found, "x");
}

#[test]
fn test_sibling_procedures_need_separator() {
    let (expected, found, position) = expect_syntax_error(
        "program p; procedure a(); begin write(1) end procedure b(); begin write(2) end begin call a; call b end.",
    );
    assert_eq!(expected, vec!["';'".to_string()]);
    assert_eq!(found, "procedure");
    assert_eq!(position, Position::new(1, 46));
}

#[test]
fn test_procedure_requires_parameter_list() {
    let (expected, found, _) = expect_syntax_error("program p; procedure q; x := 1; call q.");
    assert_eq!(expected, vec!["'('".to_string()]);
    assert_eq!(found, ";");
}

#[test]
fn test_condition_requires_relational_operator() {
    let (expected, found, _) = expect_syntax_error("program p; var x; if x then x := 1.");
    assert_eq!(expected.len(), 6);
    assert!(expected.contains(&"'<>'".to_string()));
    assert_eq!(found, "then");
}

#[test]
fn test_syntax_error_message() {
    let err = parse_source("program p; var x; x = 1.").unwrap_err();
    assert_eq!(err.kind(), "ParseError");
    assert_eq!(err.to_string(), "syntax error at 1:21: expected ':=', found '='");
}

#[test]
fn test_const_requires_integer() {
    let (expected, found, _) = expect_syntax_error("program p; const c = x; c := 1.");
    assert_eq!(expected, vec!["integer".to_string()]);
    assert_eq!(found, "x");
}
