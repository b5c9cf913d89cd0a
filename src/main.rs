use clap::Parser;
use pl0vm::{
    ast::printer::AstPrinter,
    errors::Pl0Result,
    frontend::{lexer::scan, parser::parse, Token},
    ir::{Bytecode, IRGenerator},
    read,
    semantic::resolver::{resolve, ResolvedProgram},
    utils::config::cli::{DEFAULT_LOG_FILTER, VERBOSE_LOG_FILTER},
    vm::{ExitOutcome, LineWriter, VirtualMachine},
    Position,
};
use std::{
    io::{self, Write as _},
    path::PathBuf,
    time::Instant,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "PL/0 compiler and bytecode interpreter",
    long_about = "PL/0 compiler and bytecode interpreter.\n\
                 Compiles a PL/0 program to stack bytecode and runs it, printing every\n\
                 value the program writes on its own line.\n\
                 \n\
                 Example usage:\n\
                 pl0vm input.pl0                    # Compile and run\n\
                 pl0vm input.pl0 --print-ir         # Print the bytecode listing\n\
                 pl0vm input.pl0 --show-ast         # Display the resolved syntax tree\n\
                 pl0vm input.pl0 --no-run --tokens  # Only dump the token stream\n\
                 pl0vm input.pl0 --verbose          # Phase logging on stderr\n\
                 pl0vm input.pl0 --timing           # Show per-phase timing\n\
                 pl0vm input.pl0 --context          # Quote the source line on errors"
)]
struct Cli {
    /// The PL/0 source file to run
    path: PathBuf,

    /// Print the token stream
    #[arg(long)]
    tokens: bool,

    /// Show the AST after name resolution
    #[arg(long)]
    show_ast: bool,

    /// Print the generated bytecode
    #[arg(short = 'i', long)]
    print_ir: bool,

    /// Compile only
    #[arg(long)]
    no_run: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Show per-phase timing
    #[arg(short, long)]
    timing: bool,

    /// Show the offending source line under a diagnostic
    #[arg(short, long)]
    context: bool,
}

// Per-phase statistics for --timing
#[derive(Debug, Default)]
struct RunStats {
    lexer_time: f64,
    parser_time: f64,
    resolver_time: f64,
    codegen_time: f64,
    execution_time: f64,
    total_time: f64,
    token_count: usize,
    procedure_count: usize,
    instruction_count: usize,
    outcome: Option<ExitOutcome>,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_LOG_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn lexical_analysis(source: &str, stats: &mut RunStats) -> Pl0Result<Vec<(Token, Position)>> {
    let start = Instant::now();
    let tokens = scan(source)?;
    stats.lexer_time = start.elapsed().as_secs_f64();
    stats.token_count = tokens.len();
    info!(tokens = stats.token_count, seconds = stats.lexer_time, "lexical analysis completed");
    Ok(tokens)
}

fn front_end(tokens: &[(Token, Position)], stats: &mut RunStats) -> Pl0Result<ResolvedProgram> {
    let start = Instant::now();
    let program = parse(tokens)?;
    stats.parser_time = start.elapsed().as_secs_f64();
    info!(program = %program.name, seconds = stats.parser_time, "parsing completed");

    let start = Instant::now();
    let resolved = resolve(program)?;
    stats.resolver_time = start.elapsed().as_secs_f64();
    stats.procedure_count = resolved.procedure_count;
    info!(procedures = resolved.procedure_count, seconds = stats.resolver_time, "name resolution completed");
    Ok(resolved)
}

fn code_generation(resolved: &ResolvedProgram, stats: &mut RunStats) -> Pl0Result<Bytecode> {
    let start = Instant::now();
    let bytecode = IRGenerator::new().generate_code(resolved)?;
    stats.codegen_time = start.elapsed().as_secs_f64();
    stats.instruction_count = bytecode.len();
    info!(instructions = stats.instruction_count, seconds = stats.codegen_time, "code generation completed");
    Ok(bytecode)
}

fn execution(bytecode: &Bytecode, stats: &mut RunStats) -> Pl0Result<()> {
    let start = Instant::now();
    let stdout = io::stdout();
    let mut output = LineWriter::new(stdout.lock());
    let outcome = VirtualMachine::new().run(bytecode, &mut output)?;
    output.into_inner().flush()?;
    stats.execution_time = start.elapsed().as_secs_f64();
    stats.outcome = Some(outcome);
    info!(
        instructions = outcome.instructions_executed,
        seconds = stats.execution_time,
        "execution completed"
    );
    Ok(())
}

fn run(args: &Cli, source: &str) -> Pl0Result<RunStats> {
    let start_time = Instant::now();
    let mut stats = RunStats::default();

    let tokens = lexical_analysis(source, &mut stats)?;
    if args.tokens {
        for (token, position) in &tokens {
            println!("{:>7}  {:?}", position.to_string(), token);
        }
    }

    let resolved = front_end(&tokens, &mut stats)?;
    if args.show_ast {
        print!("{}", AstPrinter::print(&resolved.program)?);
    }

    let bytecode = code_generation(&resolved, &mut stats)?;
    if args.print_ir {
        print!("{}", bytecode);
    }

    if !args.no_run {
        execution(&bytecode, &mut stats)?;
    }

    stats.total_time = start_time.elapsed().as_secs_f64();
    Ok(stats)
}

// Print per-phase timing and counters
fn print_stats(stats: &RunStats) {
    eprintln!("\n Run Statistics:");
    eprintln!("┌─────────────────────┬───────────┐");
    eprintln!("│ Phase               │ Time (s)  │");
    eprintln!("├─────────────────────┼───────────┤");
    eprintln!("│ Lexical Analysis    │ {:>9.6} │", stats.lexer_time);
    eprintln!("│ Parsing             │ {:>9.6} │", stats.parser_time);
    eprintln!("│ Name Resolution     │ {:>9.6} │", stats.resolver_time);
    eprintln!("│ Code Generation     │ {:>9.6} │", stats.codegen_time);
    eprintln!("│ Execution           │ {:>9.6} │", stats.execution_time);
    eprintln!("├─────────────────────┼───────────┤");
    eprintln!("│ Total Time          │ {:>9.6} │", stats.total_time);
    eprintln!("└─────────────────────┴───────────┘");

    eprintln!("\n Code Metrics:");
    eprintln!("  • Tokens:                {}", stats.token_count);
    eprintln!("  • Procedures:            {}", stats.procedure_count);
    eprintln!("  • Bytecode Instructions: {}", stats.instruction_count);
    if let Some(outcome) = &stats.outcome {
        eprintln!("  • Instructions Executed: {}", outcome.instructions_executed);
        eprintln!("  • Max Call Depth:        {}", outcome.max_call_depth);
        eprintln!("  • Values Written:        {}", outcome.values_written);
    }
}

fn main() {
    let args = Cli::parse();
    init_logging(args.verbose);

    let name = args.path.display().to_string();
    let source = match read(&args.path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("{}", e.render(&name));
            std::process::exit(1);
        }
    };
    debug!(path = %name, bytes = source.len(), "source loaded");

    match run(&args, &source) {
        Ok(stats) => {
            if args.timing {
                print_stats(&stats);
            }
        }
        Err(e) => {
            let diagnostic = if args.context {
                e.render_with_source(&name, &source)
            } else {
                e.render(&name)
            };
            eprintln!("{}", diagnostic);
            std::process::exit(1);
        }
    }
}
