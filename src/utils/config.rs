// Lexer constants
pub mod lexer {
    use crate::frontend::token::Token;

    /// Reserved words and their tokens, matched case-sensitively.
    pub const KEYWORDS: [(&str, Token); 15] = [
        ("program", Token::Program),
        ("procedure", Token::Procedure),
        ("var", Token::Var),
        ("const", Token::Const),
        ("begin", Token::Begin),
        ("end", Token::End),
        ("while", Token::While),
        ("do", Token::Do),
        ("if", Token::If),
        ("then", Token::Then),
        ("else", Token::Else),
        ("odd", Token::Odd),
        ("call", Token::Call),
        ("read", Token::Read),
        ("write", Token::Write),
    ];
}

// Symbol table constants
pub mod semantic {
    /// Lexical depth of the program block.
    pub const PROGRAM_LEVEL: usize = 0;
    pub const FIRST_SLOT: usize = 0;
}

// Virtual machine sizing
pub mod vm {
    pub const INITIAL_STACK_CAPACITY: usize = 256;
    pub const INITIAL_FRAME_CAPACITY: usize = 32;
}

// Command-line harness
pub mod cli {
    pub const SOURCE_EXTENSION: &str = "pl0";
    pub const DEFAULT_LOG_FILTER: &str = "warn";
    pub const VERBOSE_LOG_FILTER: &str = "pl0vm=debug,warn";
}
