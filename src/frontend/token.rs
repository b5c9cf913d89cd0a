use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Ident(String),
    Number(i64),
    // Keywords
    Program,
    Procedure,
    Var,
    Const,
    Begin,
    End,
    While,
    Do,
    If,
    Then,
    Else,
    Odd,
    Call,
    Read,
    Write,
    // Operators
    Plus,
    Minus,
    Multiply,
    Divide,
    Equal,
    NotEqual,
    LessThan,
    LessThanEqual,
    GreaterThan,
    GreaterThanEqual,
    Assign,
    // Punctuation
    LParen,
    RParen,
    Comma,
    Semicolon,
    Dot,
    Eof,
}

impl Token {
    /// Compare token kinds while disregarding carried data.
    pub fn same_kind(&self, other: &Token) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Token::Ident(name) => return f.write_str(name),
            Token::Number(value) => return write!(f, "{}", value),
            Token::Program => "program",
            Token::Procedure => "procedure",
            Token::Var => "var",
            Token::Const => "const",
            Token::Begin => "begin",
            Token::End => "end",
            Token::While => "while",
            Token::Do => "do",
            Token::If => "if",
            Token::Then => "then",
            Token::Else => "else",
            Token::Odd => "odd",
            Token::Call => "call",
            Token::Read => "read",
            Token::Write => "write",
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Multiply => "*",
            Token::Divide => "/",
            Token::Equal => "=",
            Token::NotEqual => "<>",
            Token::LessThan => "<",
            Token::LessThanEqual => "<=",
            Token::GreaterThan => ">",
            Token::GreaterThanEqual => ">=",
            Token::Assign => ":=",
            Token::LParen => "(",
            Token::RParen => ")",
            Token::Comma => ",",
            Token::Semicolon => ";",
            Token::Dot => ".",
            Token::Eof => "end of input",
        };
        f.write_str(text)
    }
}
