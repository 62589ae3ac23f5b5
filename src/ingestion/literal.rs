//! Literal Decoder
//!
//! Parses the serialized collection syntax found in the raw film table
//! (`{'id': 10194, 'name': 'Toy Story Collection'}`, `[{'name': 'Pixar'}]`) into a
//! `serde_json::Value`. The accepted grammar is data only: mappings, sequences, tuples,
//! quoted strings, numbers and the `True`/`False`/`None` constants (their JSON spellings
//! are accepted too). Nothing is ever evaluated.

use serde_json::{Map, Number, Value};

const MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LiteralError {
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("unexpected character {found:?} at byte {pos}")]
    UnexpectedChar { pos: usize, found: char },
    #[error("invalid number at byte {0}")]
    InvalidNumber(usize),
    #[error("invalid escape sequence at byte {0}")]
    InvalidEscape(usize),
    #[error("mapping key at byte {0} is not a string or number")]
    InvalidKey(usize),
    #[error("nesting deeper than {MAX_DEPTH} levels")]
    TooDeep,
}

/// Strictly parses one literal. The whole input must be consumed.
pub fn parse_literal(input: &str) -> Result<Value, LiteralError> {
    let mut parser = Parser {
        src: input,
        pos: 0,
        depth: 0,
    };
    let value = parser.parse_value()?;
    parser.skip_ws();
    match parser.peek() {
        None => Ok(value),
        Some(c) => Err(LiteralError::UnexpectedChar {
            pos: parser.pos,
            found: c,
        }),
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), LiteralError> {
        self.skip_ws();
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(LiteralError::UnexpectedChar {
                pos: self.pos - c.len_utf8(),
                found: c,
            }),
            None => Err(LiteralError::UnexpectedEnd),
        }
    }

    fn parse_value(&mut self) -> Result<Value, LiteralError> {
        self.skip_ws();
        let c = self.peek().ok_or(LiteralError::UnexpectedEnd)?;
        match c {
            '{' => self.nested(|p| p.parse_mapping()),
            '[' => self.nested(|p| p.parse_sequence('[', ']')),
            '(' => self.nested(|p| p.parse_sequence('(', ')')),
            '\'' | '"' => self.parse_string().map(Value::String),
            '-' | '+' | '.' | '0'..='9' => self.parse_number(),
            _ if c.is_alphabetic() => self.parse_constant(),
            _ => Err(LiteralError::UnexpectedChar {
                pos: self.pos,
                found: c,
            }),
        }
    }

    fn nested<F>(&mut self, f: F) -> Result<Value, LiteralError>
    where
        F: FnOnce(&mut Self) -> Result<Value, LiteralError>,
    {
        if self.depth >= MAX_DEPTH {
            return Err(LiteralError::TooDeep);
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn parse_mapping(&mut self) -> Result<Value, LiteralError> {
        self.expect('{')?;
        let mut map = Map::new();
        loop {
            self.skip_ws();
            if self.peek() == Some('}') {
                self.bump();
                return Ok(Value::Object(map));
            }

            let key_pos = self.pos;
            let key = match self.parse_value()? {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                _ => return Err(LiteralError::InvalidKey(key_pos)),
            };
            self.expect(':')?;
            let value = self.parse_value()?;
            map.insert(key, value);

            self.skip_ws();
            match self.bump() {
                Some(',') => continue,
                Some('}') => return Ok(Value::Object(map)),
                Some(c) => {
                    return Err(LiteralError::UnexpectedChar {
                        pos: self.pos - c.len_utf8(),
                        found: c,
                    });
                }
                None => return Err(LiteralError::UnexpectedEnd),
            }
        }
    }

    fn parse_sequence(&mut self, open: char, close: char) -> Result<Value, LiteralError> {
        self.expect(open)?;
        let mut items = Vec::new();
        loop {
            self.skip_ws();
            if self.peek() == Some(close) {
                self.bump();
                return Ok(Value::Array(items));
            }

            items.push(self.parse_value()?);

            self.skip_ws();
            match self.bump() {
                Some(',') => continue,
                Some(c) if c == close => return Ok(Value::Array(items)),
                Some(c) => {
                    return Err(LiteralError::UnexpectedChar {
                        pos: self.pos - c.len_utf8(),
                        found: c,
                    });
                }
                None => return Err(LiteralError::UnexpectedEnd),
            }
        }
    }

    fn parse_string(&mut self) -> Result<String, LiteralError> {
        let quote = self.bump().ok_or(LiteralError::UnexpectedEnd)?;
        let mut out = String::new();
        loop {
            let c = self.bump().ok_or(LiteralError::UnexpectedEnd)?;
            if c == quote {
                return Ok(out);
            }
            if c != '\\' {
                out.push(c);
                continue;
            }

            let escape_pos = self.pos - 1;
            let escaped = self.bump().ok_or(LiteralError::UnexpectedEnd)?;
            match escaped {
                '\\' => out.push('\\'),
                '\'' => out.push('\''),
                '"' => out.push('"'),
                'n' => out.push('\n'),
                't' => out.push('\t'),
                'r' => out.push('\r'),
                '0' => out.push('\0'),
                'x' => out.push(self.parse_hex_escape(2, escape_pos)?),
                'u' => out.push(self.parse_hex_escape(4, escape_pos)?),
                'U' => out.push(self.parse_hex_escape(8, escape_pos)?),
                _ => return Err(LiteralError::InvalidEscape(escape_pos)),
            }
        }
    }

    fn parse_hex_escape(&mut self, digits: usize, escape_pos: usize) -> Result<char, LiteralError> {
        let end = self.pos + digits;
        let hex = self
            .src
            .get(self.pos..end)
            .ok_or(LiteralError::InvalidEscape(escape_pos))?;
        let code =
            u32::from_str_radix(hex, 16).map_err(|_| LiteralError::InvalidEscape(escape_pos))?;
        self.pos = end;
        char::from_u32(code).ok_or(LiteralError::InvalidEscape(escape_pos))
    }

    fn parse_number(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E') {
                self.pos += 1;
            } else {
                break;
            }
        }
        let text = &self.src[start..self.pos];

        if let Ok(int) = text.parse::<i64>() {
            return Ok(Value::Number(int.into()));
        }
        text.parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or(LiteralError::InvalidNumber(start))
    }

    fn parse_constant(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
        match &self.src[start..self.pos] {
            "True" | "true" => Ok(Value::Bool(true)),
            "False" | "false" => Ok(Value::Bool(false)),
            "None" | "null" => Ok(Value::Null),
            _ => Err(LiteralError::UnexpectedChar {
                pos: start,
                found: self.src[start..].chars().next().unwrap_or('\0'),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_collection_mapping() {
        let raw = "{'id': 10194, 'name': 'Toy Story Collection', 'poster_path': '/7G9915LfUQ2lVfwMEEhDsn3kT4B.jpg', 'backdrop_path': None}";
        let value = parse_literal(raw).unwrap();

        assert_eq!(value["id"], json!(10194));
        assert_eq!(value["name"], json!("Toy Story Collection"));
        assert_eq!(value["backdrop_path"], Value::Null);
    }

    #[test]
    fn test_parse_sequence_of_mappings() {
        let raw = "[{'name': 'Pixar Animation Studios', 'id': 3}, {'name': \"Walt's\", 'id': 4}]";
        let value = parse_literal(raw).unwrap();

        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1]["name"], json!("Walt's"));
    }

    #[test]
    fn test_parse_escapes_and_constants() {
        let value = parse_literal(r"['it\'s', 'tab\there', True, False, -1.5, (1, 2,)]").unwrap();
        assert_eq!(
            value,
            json!(["it's", "tab\there", true, false, -1.5, [1, 2]])
        );
    }

    #[test]
    fn test_rejects_code() {
        assert!(parse_literal("__import__('os').system('ls')").is_err());
        assert!(parse_literal("[1, 2] + [3]").is_err());
        assert!(parse_literal("{'a': open('x')}").is_err());
    }

    #[test]
    fn test_rejects_truncated_input() {
        assert_eq!(
            parse_literal("{'id': 1, 'name': 'Toy"),
            Err(LiteralError::UnexpectedEnd)
        );
        assert_eq!(parse_literal("[1, 2"), Err(LiteralError::UnexpectedEnd));
    }

    #[test]
    fn test_rejects_unhashable_key() {
        assert!(matches!(
            parse_literal("{[1]: 2}"),
            Err(LiteralError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_depth_limit() {
        let deep = "[".repeat(MAX_DEPTH + 1) + &"]".repeat(MAX_DEPTH + 1);
        assert_eq!(parse_literal(&deep), Err(LiteralError::TooDeep));
    }
}
