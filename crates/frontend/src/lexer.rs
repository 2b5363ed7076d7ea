use colored::*;
use std::collections::{HashMap, VecDeque};
use thiserror::Error;

use tools::errors::{CodeErr, ReportCodeErr};

#[derive(Debug, Error, PartialEq)]
pub enum LexerError {
    #[error("{} while tokenizing number -{0}-, found two '.' to construct a decimal.", "Error".bold().red())]
    DoubleDotNumber(String),

    #[error("{} while tokenizing code, unsupported character: -{0}-.", "Error".bold().red())]
    UnrecognizedToken(char),

    #[error("{} while tokenizing number -{0}-, only digit and one '.' are supported to declare a number.", "Error".bold().red())]
    AlphaCharInNumberToken(String),

    #[error("{} while tokenizing string, missing closing '\"'.", "Error".bold().red())]
    UnterminatedString,
}

impl ReportCodeErr for LexerError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literal types
    Number,
    Str,
    Identifier,

    // Grouping
    OpenParen,  // (
    CloseParen, // )
    OpenBrace,  // {
    CloseBrace, // }
    Comma,      // ,
    Dot,        // .
    Semicolon,  // ;
    Question,   // ?
    Colon,      // :

    // Operators
    Minus,
    Plus,
    Slash,
    Star,
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    // Keywords
    And,
    Else,
    False,
    For,
    Fun,
    If,
    Nil,
    Or,
    Print,
    True,
    Var,
    While,

    // File
    EOF,
}

// We use a struct instead of enum to be able to loop only on value without to have to
// extract it from enum each time with if let syntax
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub line: u64,
}

// Append a white space at the end of the code to allow the window to work
// correctly. Otherwise, last character is never in its own window.
fn append_space_and_eof(mut source_code: String) -> String {
    source_code.push('\n');
    source_code.push(' ');
    source_code
}

// Skip listed char
fn is_skippable(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r')
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[derive(Default)]
pub struct Lexer<'a> {
    pub tokens: VecDeque<Token>,
    reserved_keywords: HashMap<&'a str, TokenKind>,
}

impl<'a> Lexer<'a> {
    // Keywords generation
    fn generate_keywords(&mut self) {
        self.reserved_keywords.insert("and", TokenKind::And);
        self.reserved_keywords.insert("else", TokenKind::Else);
        self.reserved_keywords.insert("false", TokenKind::False);
        self.reserved_keywords.insert("for", TokenKind::For);
        self.reserved_keywords.insert("fun", TokenKind::Fun);
        self.reserved_keywords.insert("fn", TokenKind::Fun);
        self.reserved_keywords.insert("if", TokenKind::If);
        self.reserved_keywords.insert("nil", TokenKind::Nil);
        self.reserved_keywords.insert("or", TokenKind::Or);
        self.reserved_keywords.insert("print", TokenKind::Print);
        self.reserved_keywords.insert("true", TokenKind::True);
        self.reserved_keywords.insert("var", TokenKind::Var);
        self.reserved_keywords.insert("while", TokenKind::While);
    }

    pub fn tokenize(&mut self, source_code: String) -> Result<(), CodeErr> {
        self.generate_keywords();
        self.tokens.clear();

        let modified_code = append_space_and_eof(source_code);
        let chars = modified_code.chars().collect::<Vec<char>>();
        let mut window = chars.windows(2);

        // We keep the count of the current line
        let mut line: u64 = 0;

        while let Some(c) = window.next() {
            let first_char = c[0];

            if is_skippable(first_char) {
                continue;
            }

            match first_char {
                // Single character tokens
                '(' => self.push(TokenKind::OpenParen, first_char, line),
                ')' => self.push(TokenKind::CloseParen, first_char, line),
                '{' => self.push(TokenKind::OpenBrace, first_char, line),
                '}' => self.push(TokenKind::CloseBrace, first_char, line),
                ',' => self.push(TokenKind::Comma, first_char, line),
                '.' => self.push(TokenKind::Dot, first_char, line),
                ';' => self.push(TokenKind::Semicolon, first_char, line),
                '?' => self.push(TokenKind::Question, first_char, line),
                ':' => self.push(TokenKind::Colon, first_char, line),
                '-' => self.push(TokenKind::Minus, first_char, line),
                '+' => self.push(TokenKind::Plus, first_char, line),
                '*' => self.push(TokenKind::Star, first_char, line),
                '/' => {
                    // We check if this is comment
                    if c[1] == '/' {
                        // The new line itself is left to the main loop
                        while let Some(s) = window.next() {
                            if s[1] == '\n' {
                                break;
                            }
                        }
                    } else {
                        self.push(TokenKind::Slash, first_char, line);
                    }
                }
                // One or two characters tokens
                '!' | '=' | '>' | '<' => {
                    let (single, double) = match first_char {
                        '!' => (TokenKind::Bang, TokenKind::BangEqual),
                        '=' => (TokenKind::Equal, TokenKind::EqualEqual),
                        '>' => (TokenKind::Greater, TokenKind::GreaterEqual),
                        _ => (TokenKind::Less, TokenKind::LessEqual),
                    };

                    if c[1] == '=' {
                        self.tokens.push_back(Token::new(double, format!("{first_char}="), line));
                        // We skip the '=' token
                        window.next();
                    } else {
                        self.push(single, first_char, line);
                    }
                }
                '\n' => line += 1,
                '"' => {
                    // Strings can span several lines, errors point to the opening quote
                    let start_line = line;
                    let mut val = String::new();
                    let mut closed = false;

                    while let Some(s) = window.next() {
                        if s[0] == '"' {
                            closed = true;
                            break;
                        }
                        if s[0] == '\n' {
                            line += 1;
                        }
                        val.push(s[0]);
                    }

                    if !closed {
                        return Err(LexerError::UnterminatedString.to_glob_err(start_line));
                    }

                    self.tokens.push_back(Token::new_string(val, start_line));
                }
                _ => {
                    // Multiple characters token
                    if first_char.is_ascii_digit() {
                        let mut val = String::from(first_char);
                        let mut decimal = false;
                        let mut next_char = c[1];

                        while next_char.is_ascii_digit() || next_char == '.' {
                            let Some(r) = window.next() else { break };

                            if r[0] == '.' {
                                if decimal {
                                    return Err(LexerError::DoubleDotNumber(val).to_glob_err(line));
                                }
                                decimal = true;
                            }

                            val.push(r[0]);
                            next_char = r[1];
                        }

                        // Can't write: 12abc
                        if is_identifier_char(next_char) {
                            return Err(LexerError::AlphaCharInNumberToken(val).to_glob_err(line));
                        }

                        self.tokens.push_back(Token::new_number(val, line));
                    } else if first_char.is_alphabetic() || first_char == '_' {
                        let mut val = String::from(first_char);

                        // Support for variable like init_pos and variable with number like vec2
                        if is_identifier_char(c[1]) {
                            while let Some(r) = window.next() {
                                val.push(r[0]);

                                if !is_identifier_char(r[1]) {
                                    break;
                                }
                            }
                        }

                        // Check for reserved keywords
                        match self.reserved_keywords.get(val.as_str()) {
                            Some(kind) => self.tokens.push_back(Token::new(*kind, val, line)),
                            None => self.tokens.push_back(Token::new_identifier(val, line)),
                        }
                    } else {
                        return Err(LexerError::UnrecognizedToken(first_char).to_glob_err(line));
                    }
                }
            }
        }

        // We append manualy end of file
        self.tokens.push_back(Token::new_eof(line));
        Ok(())
    }

    fn push(&mut self, kind: TokenKind, c: char, line: u64) {
        self.tokens.push_back(Token::new(kind, c.to_string(), line));
    }
}

// ---------
//  Helpers
// ---------
impl Token {
    pub fn new(kind: TokenKind, value: String, line: u64) -> Self {
        Self { kind, value, line }
    }

    pub fn new_number(value: String, line: u64) -> Token {
        Token::new(TokenKind::Number, value, line)
    }

    pub fn new_string(value: String, line: u64) -> Token {
        Token::new(TokenKind::Str, value, line)
    }

    pub fn new_identifier(value: String, line: u64) -> Token {
        Token::new(TokenKind::Identifier, value, line)
    }

    pub fn new_eof(line: u64) -> Token {
        Token::new(TokenKind::EOF, "EOF".to_string(), line)
    }
}
