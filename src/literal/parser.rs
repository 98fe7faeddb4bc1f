//! Recursive-descent parser that consumes the lexer and builds a `Value`.

use std::iter::Peekable;

use serde_json::{Map, Number, Value};

use super::LiteralError;
use super::lexer::{Lexer, Spanned, Token};

/// Nesting limit; config files are a handful of levels deep.
const MAX_DEPTH: usize = 128;

pub struct Parser<'a> {
    lex: Peekable<Lexer<'a>>,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            lex: Lexer::new(src).peekable(),
            depth: 0,
        }
    }

    /// Parse exactly one value followed by end of input.
    pub fn parse(&mut self) -> Result<Value, LiteralError> {
        let value = self.parse_value()?;
        match self.next_token()? {
            (_, Token::Eof) => Ok(value),
            (offset, _) => Err(LiteralError::TrailingInput { offset }),
        }
    }

    fn next_token(&mut self) -> Result<Spanned, LiteralError> {
        match self.lex.next() {
            Some(res) => res,
            // the lexer always yields Eof before running dry
            None => Err(LiteralError::Expected {
                expected: "a value",
                offset: 0,
            }),
        }
    }

    fn peek_is(&mut self, tok: &Token) -> bool {
        matches!(self.lex.peek(), Some(Ok((_, t))) if t == tok)
    }

    fn parse_value(&mut self) -> Result<Value, LiteralError> {
        let (offset, token) = self.next_token()?;
        match token {
            Token::LBrace => self.nested(offset, Self::parse_object),
            Token::LBracket => self.nested(offset, Self::parse_array),
            Token::Str(s) => Ok(Value::String(s)),
            Token::Number(text) => parse_number(text, offset),
            Token::Ident(name) => match name.as_str() {
                "true" | "True" => Ok(Value::Bool(true)),
                "false" | "False" => Ok(Value::Bool(false)),
                "null" | "None" => Ok(Value::Null),
                _ => Err(LiteralError::UnknownIdent { name, offset }),
            },
            _ => Err(LiteralError::Expected {
                expected: "a value",
                offset,
            }),
        }
    }

    fn nested(
        &mut self,
        offset: usize,
        inner: fn(&mut Self) -> Result<Value, LiteralError>,
    ) -> Result<Value, LiteralError> {
        if self.depth >= MAX_DEPTH {
            return Err(LiteralError::TooDeep { offset });
        }
        self.depth += 1;
        let res = inner(self);
        self.depth -= 1;
        res
    }

    fn parse_array(&mut self) -> Result<Value, LiteralError> {
        let mut items = Vec::new();
        loop {
            if self.peek_is(&Token::RBracket) {
                self.next_token()?;
                return Ok(Value::Array(items));
            }
            items.push(self.parse_value()?);
            match self.next_token()? {
                (_, Token::Comma) => continue,
                (_, Token::RBracket) => return Ok(Value::Array(items)),
                (offset, _) => {
                    return Err(LiteralError::Expected {
                        expected: "`,` or `]`",
                        offset,
                    });
                }
            }
        }
    }

    fn parse_object(&mut self) -> Result<Value, LiteralError> {
        let mut map = Map::new();
        loop {
            let key = match self.next_token()? {
                (_, Token::RBrace) => return Ok(Value::Object(map)),
                (_, Token::Str(key)) => key,
                (offset, _) => {
                    return Err(LiteralError::Expected {
                        expected: "a string key",
                        offset,
                    });
                }
            };
            match self.next_token()? {
                (_, Token::Colon) => {}
                (offset, _) => {
                    return Err(LiteralError::Expected {
                        expected: "`:`",
                        offset,
                    });
                }
            }
            let value = self.parse_value()?;
            map.insert(key, value);
            match self.next_token()? {
                (_, Token::Comma) => continue,
                (_, Token::RBrace) => return Ok(Value::Object(map)),
                (offset, _) => {
                    return Err(LiteralError::Expected {
                        expected: "`,` or `}`",
                        offset,
                    });
                }
            }
        }
    }
}

fn parse_number(text: String, offset: usize) -> Result<Value, LiteralError> {
    serde_json::from_str::<Number>(&text)
        .map(Value::Number)
        .map_err(|_| LiteralError::InvalidNumber { text, offset })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_values() {
        let test_cases = vec![
            ("True", json!(true)),
            ("null", json!(null)),
            ("[1, 2.5, -3,]", json!([1, 2.5, -3])),
            (
                "{'drive': {'type': 'x-drive'}, \"motors\": [], 'flag': False}",
                json!({ "drive": { "type": "x-drive" }, "motors": [], "flag": false }),
            ),
            ("{'a': None,}", json!({ "a": null })),
        ];

        for (src, expected) in test_cases {
            let parsed = Parser::new(src).parse();
            assert_eq!(parsed, Ok(expected), "source: {src}");
        }
    }

    #[test]
    fn test_parse_keeps_key_order() {
        let parsed = Parser::new("{'z': 1, 'a': 2}").parse().unwrap();
        assert_eq!(parsed.to_string(), r#"{"z":1,"a":2}"#);
    }

    #[test]
    fn test_parse_errors() {
        let test_cases = vec![
            ("{'a' 1}", LiteralError::Expected { expected: "`:`", offset: 5 }),
            ("[1 2]", LiteralError::Expected { expected: "`,` or `]`", offset: 3 }),
            ("{1: 2}", LiteralError::Expected { expected: "a string key", offset: 1 }),
            ("maybe", LiteralError::UnknownIdent { name: "maybe".into(), offset: 0 }),
            ("1.2.3", LiteralError::InvalidNumber { text: "1.2.3".into(), offset: 0 }),
            ("[] []", LiteralError::TrailingInput { offset: 3 }),
            ("", LiteralError::Expected { expected: "a value", offset: 0 }),
        ];

        for (src, expected) in test_cases {
            assert_eq!(Parser::new(src).parse(), Err(expected), "source: {src}");
        }
    }

    #[test]
    fn test_depth_limit() {
        let src = "[".repeat(MAX_DEPTH + 1);
        assert!(matches!(
            Parser::new(&src).parse(),
            Err(LiteralError::TooDeep { .. })
        ));
    }
}
