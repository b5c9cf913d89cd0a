use crate::errors::{LexErrorKind, Pl0Error, Pl0Result};
use crate::frontend::token::Token;
use crate::utils::config::lexer::KEYWORDS;
use crate::Position;
use std::{iter::Peekable, str::Chars};

/// Lazily turns source text into `(Token, Position)` pairs.
///
/// The stream always ends with a single `Token::Eof`. After the first error,
/// or after `Eof`, the iterator is exhausted.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    position: Position,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(file_content: &'a str) -> Self {
        Self {
            chars: file_content.chars().peekable(),
            position: Position::default(),
            finished: false,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        if ch == '\n' {
            self.position.line += 1;
            self.position.column = 1;
        } else {
            self.position.column += 1;
        }
        Some(ch)
    }

    fn next_token(&mut self) -> Pl0Result<(Token, Position)> {
        self.skip_whitespace_and_comments()?;
        let start = self.position;
        let token = match self.chars.peek() {
            None => Token::Eof,
            Some(&ch) if ch.is_ascii_alphabetic() => self.scan_identifier(),
            Some(&ch) if ch.is_ascii_digit() => self.scan_number(start)?,
            Some(&':') => self.scan_assignment(start)?,
            Some(&'<') => self.scan_less_than(),
            Some(&'>') => self.scan_greater_than(),
            Some(&ch) => self.scan_single_char_token(ch, start)?,
        };
        Ok((token, start))
    }

    fn skip_whitespace_and_comments(&mut self) -> Pl0Result<()> {
        loop {
            match self.chars.peek() {
                Some(&'{') => self.scan_comment()?,
                Some(&ch) if ch.is_whitespace() => {
                    self.bump();
                }
                _ => break,
            }
        }
        Ok(())
    }

    fn scan_comment(&mut self) -> Pl0Result<()> {
        let start = self.position;
        self.bump(); // Consume '{'
        while let Some(ch) = self.bump() {
            if ch == '}' {
                return Ok(());
            }
        }
        Err(Pl0Error::lex_error(LexErrorKind::UnterminatedComment, start))
    }

    fn scan_identifier(&mut self) -> Token {
        let mut identifier = String::new();
        while let Some(&ch) = self.chars.peek() {
            if !ch.is_ascii_alphanumeric() {
                break;
            }
            identifier.push(ch);
            self.bump();
        }
        keyword_or_identifier(identifier)
    }

    fn scan_number(&mut self, start: Position) -> Pl0Result<Token> {
        let mut number_str = String::new();
        while let Some(&ch) = self.chars.peek() {
            if !ch.is_ascii_digit() {
                break;
            }
            number_str.push(ch);
            self.bump();
        }
        match number_str.parse::<i64>() {
            Ok(value) => Ok(Token::Number(value)),
            Err(_) => Err(Pl0Error::lex_error(LexErrorKind::IntegerOutOfRange(number_str), start)),
        }
    }

    fn scan_assignment(&mut self, start: Position) -> Pl0Result<Token> {
        self.bump(); // Consume ':'
        if self.chars.peek() == Some(&'=') {
            self.bump();
            Ok(Token::Assign)
        } else {
            Err(Pl0Error::lex_error(LexErrorKind::UnexpectedCharacter(':'), start))
        }
    }

    fn scan_less_than(&mut self) -> Token {
        self.bump(); // Consume '<'
        match self.chars.peek() {
            Some(&'=') => {
                self.bump();
                Token::LessThanEqual
            }
            Some(&'>') => {
                self.bump();
                Token::NotEqual
            }
            _ => Token::LessThan,
        }
    }

    fn scan_greater_than(&mut self) -> Token {
        self.bump(); // Consume '>'
        if self.chars.peek() == Some(&'=') {
            self.bump();
            Token::GreaterThanEqual
        } else {
            Token::GreaterThan
        }
    }

    fn scan_single_char_token(&mut self, ch: char, start: Position) -> Pl0Result<Token> {
        let token = match ch {
            '.' => Token::Dot,
            '=' => Token::Equal,
            ',' => Token::Comma,
            ';' => Token::Semicolon,
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Multiply,
            '/' => Token::Divide,
            '(' => Token::LParen,
            ')' => Token::RParen,
            _ => return Err(Pl0Error::lex_error(LexErrorKind::UnexpectedCharacter(ch), start)),
        };
        self.bump();
        Ok(token)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Pl0Result<(Token, Position)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.next_token();
        if matches!(result, Err(_) | Ok((Token::Eof, _))) {
            self.finished = true;
        }
        Some(result)
    }
}

fn keyword_or_identifier(identifier: String) -> Token {
    KEYWORDS
        .iter()
        .find(|(word, _)| *word == identifier)
        .map(|(_, token)| token.clone())
        .unwrap_or(Token::Ident(identifier))
}

/// Start a lazy token stream over `source`.
pub fn tokenize(source: &str) -> Lexer<'_> {
    Lexer::new(source)
}

/// Collect the whole token stream, stopping at the first lexical error.
pub fn scan(source: &str) -> Pl0Result<Vec<(Token, Position)>> {
    tokenize(source).collect()
}
