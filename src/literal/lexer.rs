//! Very small hand-written lexer for configuration literals.
//!
//! Accepts both dialects at once, so a file that was half edited by hand
//! in Python style still tokenises.
//
//  Lexical items:
//
//      Ident    ::= [A-Za-z_][A-Za-z0-9_]*      (True, false, None, …)
//      Number   ::= '-'? [0-9.eE+-]+            (validated by the parser)
//      Str      ::= '"' … '"' | '\'' … '\''      (backslash escapes)
//      Symbols  ::= '{' '}' '[' ']' ':' ','
//      Whitespace and comments (# until end-of-line) are discarded.

use std::iter::Peekable;
use std::str::CharIndices;

use super::LiteralError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Colon,
    Comma,
    Ident(String),
    Number(String),
    Str(String),
    Eof,
}

/// A token plus the byte offset it starts at.
pub type Spanned = (usize, Token);

#[derive(Clone)]
pub struct Lexer<'a> {
    chars: Peekable<CharIndices<'a>>,
    len: usize,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            chars: src.char_indices().peekable(),
            len: src.len(),
            finished: false,
        }
    }

    fn next_char(&mut self) -> Option<(usize, char)> {
        self.chars.next()
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    fn consume_while<F: Fn(char) -> bool>(&mut self, pred: F, buf: &mut String) {
        while let Some(c) = self.peek_char() {
            if pred(c) {
                buf.push(c);
                self.next_char();
            } else {
                break;
            }
        }
    }

    fn skip_trivia(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.next_char();
            } else if c == '#' {
                while let Some((_, c)) = self.next_char() {
                    if c == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self, first: char) -> String {
        let mut id = String::new();
        id.push(first);
        self.consume_while(|c| c.is_ascii_alphanumeric() || c == '_', &mut id);
        id
    }

    fn read_number(&mut self, first: char) -> String {
        let mut num = String::new();
        num.push(first);
        self.consume_while(
            |c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'),
            &mut num,
        );
        num
    }

    fn read_hex(&mut self, digits: usize, offset: usize) -> Result<u32, LiteralError> {
        let mut value = 0u32;
        for _ in 0..digits {
            let (at, c) = self
                .next_char()
                .ok_or(LiteralError::UnterminatedString { offset })?;
            let digit = c
                .to_digit(16)
                .ok_or(LiteralError::InvalidEscape { found: c, offset: at })?;
            value = value * 16 + digit;
        }
        Ok(value)
    }

    fn read_unicode_escape(&mut self, at: usize, offset: usize) -> Result<char, LiteralError> {
        let high = self.read_hex(4, offset)?;
        let code = if (0xD800..0xDC00).contains(&high) {
            // surrogate pair: a second \uXXXX must follow
            match (self.next_char(), self.next_char()) {
                (Some((_, '\\')), Some((_, 'u'))) => {}
                _ => return Err(LiteralError::InvalidEscape { found: 'u', offset: at }),
            }
            let low = self.read_hex(4, offset)?;
            if !(0xDC00..0xE000).contains(&low) {
                return Err(LiteralError::InvalidEscape { found: 'u', offset: at });
            }
            0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
        } else {
            high
        };
        char::from_u32(code).ok_or(LiteralError::InvalidEscape { found: 'u', offset: at })
    }

    fn read_string(&mut self, quote: char, offset: usize) -> Result<String, LiteralError> {
        let mut txt = String::new();
        while let Some((_, c)) = self.next_char() {
            match c {
                c if c == quote => return Ok(txt),
                '\\' => {
                    let (at, esc) = self
                        .next_char()
                        .ok_or(LiteralError::UnterminatedString { offset })?;
                    let decoded = match esc {
                        '\\' | '\'' | '"' | '/' => esc,
                        'n' => '\n',
                        'r' => '\r',
                        't' => '\t',
                        'b' => '\u{8}',
                        'f' => '\u{c}',
                        '0' => '\0',
                        'x' => {
                            let code = self.read_hex(2, offset)?;
                            char::from_u32(code)
                                .ok_or(LiteralError::InvalidEscape { found: 'x', offset: at })?
                        }
                        'u' => self.read_unicode_escape(at, offset)?,
                        other => return Err(LiteralError::InvalidEscape { found: other, offset: at }),
                    };
                    txt.push(decoded);
                }
                c => txt.push(c),
            }
        }
        Err(LiteralError::UnterminatedString { offset })
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Spanned, LiteralError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        self.skip_trivia();

        let (offset, ch) = match self.next_char() {
            Some(pair) => pair,
            None => {
                self.finished = true;
                return Some(Ok((self.len, Token::Eof)));
            }
        };

        let tok_res = match ch {
            '{' => Ok(Token::LBrace),
            '}' => Ok(Token::RBrace),
            '[' => Ok(Token::LBracket),
            ']' => Ok(Token::RBracket),
            ':' => Ok(Token::Colon),
            ',' => Ok(Token::Comma),
            '"' | '\'' => self.read_string(ch, offset).map(Token::Str),
            c if c.is_ascii_digit() || c == '-' => Ok(Token::Number(self.read_number(c))),
            c if c.is_ascii_alphabetic() || c == '_' => Ok(Token::Ident(self.read_identifier(c))),
            found => Err(LiteralError::UnexpectedChar { found, offset }),
        };

        if tok_res.is_err() {
            self.finished = true;
        }
        Some(tok_res.map(|tok| (offset, tok)))
    }
}
