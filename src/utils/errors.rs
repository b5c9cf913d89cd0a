use std::fmt;
use std::io;

use thiserror::Error;

use crate::Position;

/// Lexical error sub-kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    UnexpectedCharacter(char),
    UnterminatedComment,
    IntegerOutOfRange(String),
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexErrorKind::UnexpectedCharacter(ch) => write!(f, "unexpected character '{}'", ch.escape_default()),
            LexErrorKind::UnterminatedComment => write!(f, "unterminated comment"),
            LexErrorKind::IntegerOutOfRange(digits) => write!(f, "integer literal {} is out of range", digits),
        }
    }
}

/// Name resolution error sub-kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionErrorKind {
    DuplicateDeclaration,
    UndeclaredIdentifier,
    NotAssignable,
    ArityOrKindMismatch,
}

impl ResolutionErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionErrorKind::DuplicateDeclaration => "DuplicateDeclaration",
            ResolutionErrorKind::UndeclaredIdentifier => "UndeclaredIdentifier",
            ResolutionErrorKind::NotAssignable => "NotAssignable",
            ResolutionErrorKind::ArityOrKindMismatch => "ArityOrKindMismatch",
        }
    }
}

impl fmt::Display for ResolutionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeErrorKind {
    DivisionByZero,
}

impl fmt::Display for RuntimeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeErrorKind::DivisionByZero => f.write_str("DivisionByZero"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Pl0Error {
    // File and I/O errors
    #[error("file read error: {0}")]
    FileReadError(String),
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    // Lexical analysis errors
    #[error("lexical error at {position}: {kind}")]
    LexError { kind: LexErrorKind, position: Position },

    // Parsing errors
    #[error("syntax error at {position}: expected {}, found '{found}'", join_expected(.expected))]
    SyntaxError {
        expected: Vec<String>,
        found: String,
        position: Position,
    },

    // Semantic analysis errors
    #[error("{kind} at {position}: {message}")]
    ResolutionError {
        kind: ResolutionErrorKind,
        name: String,
        message: String,
        position: Position,
    },

    // Execution errors
    #[error("runtime error at {position}: {kind}")]
    RuntimeError { kind: RuntimeErrorKind, position: Position },

    // Malformed bytecode; the code generator never produces it
    #[error("internal error: {message}")]
    InternalError { message: String },
}

fn join_expected(expected: &[String]) -> String {
    match expected {
        [] => "nothing".to_string(),
        [single] => single.clone(),
        [init @ .., last] => format!("{} or {}", init.join(", "), last),
    }
}

impl Pl0Error {
    pub fn lex_error(kind: LexErrorKind, position: Position) -> Self {
        Pl0Error::LexError { kind, position }
    }

    /// Create a syntax error
    pub fn syntax_error(expected: &[&str], found: impl Into<String>, position: Position) -> Self {
        Pl0Error::SyntaxError {
            expected: expected.iter().map(|e| e.to_string()).collect(),
            found: found.into(),
            position,
        }
    }

    pub fn resolution_error(
        kind: ResolutionErrorKind,
        name: impl Into<String>,
        message: impl Into<String>,
        position: Position,
    ) -> Self {
        Pl0Error::ResolutionError {
            kind,
            name: name.into(),
            message: message.into(),
            position,
        }
    }

    pub fn runtime_error(kind: RuntimeErrorKind, position: Position) -> Self {
        Pl0Error::RuntimeError { kind, position }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Pl0Error::InternalError { message: message.into() }
    }

    /// Stable name of the error category, for diagnostics consumers.
    pub fn kind(&self) -> &'static str {
        match self {
            Pl0Error::FileReadError(_) => "FileReadError",
            Pl0Error::IoError(_) => "IoError",
            Pl0Error::LexError { .. } => "LexError",
            Pl0Error::SyntaxError { .. } => "ParseError",
            Pl0Error::ResolutionError { .. } => "ResolutionError",
            Pl0Error::RuntimeError { .. } => "RuntimeError",
            Pl0Error::InternalError { .. } => "InternalError",
        }
    }

    pub fn position(&self) -> Option<Position> {
        match self {
            Pl0Error::LexError { position, .. }
            | Pl0Error::SyntaxError { position, .. }
            | Pl0Error::ResolutionError { position, .. }
            | Pl0Error::RuntimeError { position, .. } => Some(*position),
            _ => None,
        }
    }

    /// Single-line diagnostic in `name:line:column: kind: message` form.
    pub fn render(&self, source_name: &str) -> String {
        match self.position() {
            Some(position) => format!(
                "{}:{}:{}: {}: {}",
                source_name, position.line, position.column, self.kind(), self
            ),
            None => format!("{}: {}: {}", source_name, self.kind(), self),
        }
    }

    /// [`render`](Self::render) plus the offending line of `source` and a caret under the column.
    pub fn render_with_source(&self, source_name: &str, source: &str) -> String {
        let mut rendered = self.render(source_name);
        let Some(position) = self.position() else {
            return rendered;
        };
        if let Some(line) = source.lines().nth(position.line.saturating_sub(1)) {
            // Keep tabs so the caret lines up under tab-indented code
            let padding: String = line
                .chars()
                .take(position.column.saturating_sub(1))
                .map(|ch| if ch == '\t' { '\t' } else { ' ' })
                .collect();
            rendered.push_str(&format!("\n    {}\n    {}^", line, padding));
        }
        rendered
    }
}

// Type alias for Result with Pl0Error
pub type Pl0Result<T> = Result<T, Pl0Error>;
