use pl0vm::frontend::{parse, scan};
use pl0vm::ir::{Bytecode, Instruction};
use pl0vm::semantic::resolve;
use pl0vm::utils::errors::{Pl0Error, Pl0Result, RuntimeErrorKind};
use pl0vm::vm::{execute, LineWriter, ProgramIo, ScriptedIo, VirtualMachine};
use pl0vm::{run, Position};

fn output_of(source: &str) -> Pl0Result<Vec<i64>> {
    let mut output: Vec<i64> = Vec::new();
    run(source, &mut output)?;
    Ok(output)
}

fn write_expr(expr: &str) -> Pl0Result<Vec<i64>> {
    output_of(&format!("program p; write({}).", expr))
}

#[test]
fn test_while_counts_to_three() -> Pl0Result<()> {
    let output = output_of(
        "program p; var x; begin x := 1; while x <= 3 do begin write(x); x := x+1 end end.",
    )?;
    assert_eq!(output, vec![1, 2, 3]);
    Ok(())
}

#[test]
fn test_constant_with_leading_minus() -> Pl0Result<()> {
    assert_eq!(output_of("program p; const c = 8; begin write(-c+4) end.")?, vec![-4]);
    Ok(())
}

#[test]
fn test_call_with_arguments() -> Pl0Result<()> {
    let output = output_of(
        "program p; procedure add(a,b); begin write(a+b) end; begin call add(1,2) end.",
    )?;
    assert_eq!(output, vec![3]);
    Ok(())
}

#[test]
fn test_division_truncates_toward_zero() -> Pl0Result<()> {
    assert_eq!(write_expr("7 / 2")?, vec![3]);
    assert_eq!(write_expr("-7 / 2")?, vec![-3]);
    assert!(write_expr("7 / -2").is_err());
    assert_eq!(write_expr("7 / (0 - 2)")?, vec![-3]);
    Ok(())
}

#[test]
fn test_odd() -> Pl0Result<()> {
    let source = "program p; var x; begin
        x := 4; if odd x then write(1) else write(0);
        x := 7; if odd x then write(1) else write(0);
        x := -3; if odd x then write(1) else write(0)
    end.";
    assert_eq!(output_of(source)?, vec![0, 1, 1]);
    Ok(())
}

#[test]
fn test_relational_operators() -> Pl0Result<()> {
    let source = "program p; var a, b; begin
        a := 2; b := 3;
        if a = b then write(1) else write(0);
        if a <> b then write(1) else write(0);
        if a < b then write(1) else write(0);
        if a <= b then write(1) else write(0);
        if a > b then write(1) else write(0);
        if a >= b then write(1) else write(0)
    end.";
    assert_eq!(output_of(source)?, vec![0, 1, 1, 1, 0, 0]);
    Ok(())
}

#[test]
fn test_operator_precedence() -> Pl0Result<()> {
    assert_eq!(write_expr("2 + 3 * 4")?, vec![14]);
    assert_eq!(write_expr("(2 + 3) * 4")?, vec![20]);
    assert_eq!(write_expr("10 - 4 - 3")?, vec![3]);
    assert_eq!(write_expr("-2 * 3 + 10")?, vec![4]);
    Ok(())
}

#[test]
fn test_write_list_is_left_to_right() -> Pl0Result<()> {
    assert_eq!(write_expr("1, 2 * 2, 3 - 10")?, vec![1, 4, -7]);
    Ok(())
}

#[test]
fn test_dangling_else_binds_inner() -> Pl0Result<()> {
    let source = "program p; var x; begin
        x := 0;
        if x = 1 then if x = 2 then write(3) else write(4);
        x := 1;
        if x = 1 then if x = 2 then write(3) else write(4)
    end.";
    assert_eq!(output_of(source)?, vec![4]);
    Ok(())
}

#[test]
fn test_variables_start_at_zero() -> Pl0Result<()> {
    let source = "program p; var x; procedure f(); var y; write(y); begin write(x); call f end.";
    assert_eq!(output_of(source)?, vec![0, 0]);
    Ok(())
}

#[test]
fn test_nested_procedure_updates_outer_variable() -> Pl0Result<()> {
    let source = "
        program p;
        var total;
        procedure outer(a);
            var local;
            procedure inner(b);
                begin local := local + b; total := total + a * b end;
            begin
                local := 100;
                call inner(1);
                call inner(2);
                write(local)
            end;
        begin
            total := 0;
            call outer(10);
            write(total)
        end.
    ";
    assert_eq!(output_of(source)?, vec![103, 30]);
    Ok(())
}

#[test]
fn test_parameters_are_copied() -> Pl0Result<()> {
    let source = "
        program p;
        var x;
        procedure bump(n); begin n := n + 1; write(n) end;
        begin x := 5; call bump(x); write(x) end.
    ";
    assert_eq!(output_of(source)?, vec![6, 5]);
    Ok(())
}

#[test]
fn test_recursion_uses_fresh_activations() -> Pl0Result<()> {
    let source = "
        program fact;
        var result;
        procedure factorial(n);
            if n <= 1 then result := 1
            else begin
                call factorial(n - 1);
                result := result * n
            end;
        begin
            call factorial(10);
            write(result)
        end.
    ";
    assert_eq!(output_of(source)?, vec![3628800]);
    Ok(())
}

#[test]
fn test_recursive_parameters_survive_inner_calls() -> Pl0Result<()> {
    let source = "
        program p;
        procedure countdown(n);
            if n > 0 then begin
                call countdown(n - 1);
                write(n)
            end;
        call countdown(4).
    ";
    assert_eq!(output_of(source)?, vec![1, 2, 3, 4]);
    Ok(())
}

// Static links must follow the declaring block, not the caller
#[test]
fn test_static_link_differs_from_dynamic_link() -> Pl0Result<()> {
    let source = "
        program p;
        procedure outer(depth);
            var tag;
            procedure show();
                write(tag);
            procedure recurse(n);
                if n > 0 then call recurse(n - 1) else call show;
            begin
                tag := depth;
                if depth > 0 then call outer(depth - 1);
                call recurse(2)
            end;
        call outer(2).
    ";
    assert_eq!(output_of(source)?, vec![0, 1, 2]);
    Ok(())
}

#[test]
fn test_nested_procedure_calls_enclosing_one() -> Pl0Result<()> {
    let source = "
        program p;
        var n;
        procedure tick();
            procedure again();
                if n > 0 then call tick;
            begin write(n); n := n - 1; call again end;
        begin n := 3; call tick end.
    ";
    assert_eq!(output_of(source)?, vec![3, 2, 1]);
    Ok(())
}

#[test]
fn test_wrapping_arithmetic() -> Pl0Result<()> {
    assert_eq!(write_expr("9223372036854775807 + 1")?, vec![i64::MIN]);
    assert_eq!(write_expr("-9223372036854775807 - 2")?, vec![i64::MAX]);
    Ok(())
}

#[test]
fn test_division_by_zero() {
    let result = output_of("program p; var x; begin x := 1/0 end.");
    match result {
        Err(Pl0Error::RuntimeError { kind, position }) => {
            assert_eq!(kind, RuntimeErrorKind::DivisionByZero);
            assert_eq!(position, Position::new(1, 31));
        }
        other => panic!("Expected DivisionByZero, got {:?}", other),
    }
}

#[test]
fn test_output_before_runtime_error_is_kept() {
    let mut output: Vec<i64> = Vec::new();
    let result = run("program p; var z; begin write(1); write(2 / z); write(3) end.", &mut output);
    assert!(matches!(result, Err(Pl0Error::RuntimeError { .. })));
    assert_eq!(output, vec![1]);
}

#[test]
fn test_undeclared_identifier_stops_before_running() {
    let mut output: Vec<i64> = Vec::new();
    let err = run("program p; begin y := 1 end.", &mut output).unwrap_err();
    assert_eq!(err.kind(), "ResolutionError");
    assert_eq!(err.position(), Some(Position::new(1, 18)));
    assert!(err.render("p.pl0").starts_with("p.pl0:1:18: ResolutionError: UndeclaredIdentifier"));
    assert!(output.is_empty());
}

#[test]
fn test_read_is_a_no_op_by_default() -> Pl0Result<()> {
    let output = output_of("program p; var x; begin x := 42; read(x); write(x) end.")?;
    assert_eq!(output, vec![42]);
    Ok(())
}

#[test]
fn test_read_from_scripted_input() -> Pl0Result<()> {
    let mut io = ScriptedIo::new([5, 6]);
    run(
        "program p; var a, b, c; begin c := 9; read(a, b, c); write(a * b, c) end.",
        &mut io,
    )?;
    assert_eq!(io.output, vec![30, 9]);
    assert!(io.input.is_empty());
    Ok(())
}

#[test]
fn test_line_writer() -> Pl0Result<()> {
    let mut writer = LineWriter::new(Vec::new());
    run("program p; write(1, -2, 30).", &mut writer)?;
    assert_eq!(String::from_utf8_lossy(&writer.into_inner()), "1\n-2\n30\n");
    Ok(())
}

#[test]
fn test_exit_outcome_counters() -> Pl0Result<()> {
    let mut output: Vec<i64> = Vec::new();
    let outcome = run(
        "program p; procedure f(n); if n > 0 then call f(n - 1); begin call f(3); write(7) end.",
        &mut output,
    )?;
    assert_eq!(outcome.max_call_depth, 4);
    assert_eq!(outcome.values_written, 1);
    assert!(outcome.instructions_executed > 0);
    Ok(())
}

#[test]
fn test_execute_resolved_program() -> Pl0Result<()> {
    let tokens = scan("program p; const k = 6; write(k * 7).")?;
    let resolved = resolve(parse(&tokens)?)?;
    let mut output: Vec<i64> = Vec::new();
    execute(&resolved, &mut output)?;
    assert_eq!(output, vec![42]);
    Ok(())
}

#[test]
fn test_hand_written_bytecode() -> Pl0Result<()> {
    let bytecode = Bytecode {
        instructions: vec![
            Instruction::Enter(1),
            Instruction::Lit(6),
            Instruction::Store { hops: 0, slot: 0 },
            Instruction::Load { hops: 0, slot: 0 },
            Instruction::Lit(-3),
            Instruction::Div,
            Instruction::Write,
            Instruction::Halt,
        ],
        positions: vec![Position::default(); 8],
        entry: 0,
    };
    let mut output: Vec<i64> = Vec::new();
    VirtualMachine::new().run(&bytecode, &mut output)?;
    assert_eq!(output, vec![-2]);
    Ok(())
}

#[test]
fn test_malformed_bytecode_is_an_internal_error() {
    let bytecode = Bytecode {
        instructions: vec![Instruction::Add, Instruction::Halt],
        positions: vec![Position::default(); 2],
        entry: 0,
    };
    let mut output: Vec<i64> = Vec::new();
    let result = VirtualMachine::new().run(&bytecode, &mut output);
    assert!(matches!(result, Err(Pl0Error::InternalError { .. })));

    let runaway = Bytecode {
        instructions: vec![Instruction::Enter(0)],
        positions: vec![Position::default()],
        entry: 0,
    };
    let result = VirtualMachine::new().run(&runaway, &mut output);
    assert!(matches!(result, Err(Pl0Error::InternalError { .. })));
}

struct FailingOutput;

impl ProgramIo for FailingOutput {
    fn write_int(&mut self, _value: i64) -> Pl0Result<()> {
        Err(Pl0Error::IoError(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed")))
    }
}

#[test]
fn test_output_errors_propagate() {
    let result = run("program p; write(1).", &mut FailingOutput);
    assert!(matches!(result, Err(Pl0Error::IoError(_))));
}

#[test]
fn test_machine_is_reusable() -> Pl0Result<()> {
    let bytecode = pl0vm::compile("program p; var x; begin x := x + 1; write(x) end.")?.bytecode;
    let mut machine = VirtualMachine::new();
    let mut first: Vec<i64> = Vec::new();
    let mut second: Vec<i64> = Vec::new();
    machine.run(&bytecode, &mut first)?;
    machine.run(&bytecode, &mut second)?;
    assert_eq!(first, vec![1]);
    assert_eq!(second, vec![1]);
    Ok(())
}
