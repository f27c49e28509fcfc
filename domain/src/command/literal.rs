//! Permissive literal evaluator for flat parameter blocks.
//!
//! Completions emit parameter blocks in a Python-flavored dialect as often
//! as strict JSON: single or double quoted strings, bare `True`/`False`,
//! `None`. This evaluator accepts both dialects but only a single nesting
//! level — a nested object is a parse failure, which drops that one command
//! rather than the whole completion.

use serde_json::{Map, Number, Value};

/// Parse the inner body of a `{...}` parameter block into a flat map.
///
/// Returns `None` on anything that does not scan as flat key/value literal
/// pairs. An empty or whitespace-only body is a valid empty map.
pub fn parse_flat_dict(body: &str) -> Option<Map<String, Value>> {
    let mut scanner = Scanner::new(body);
    let mut map = Map::new();

    scanner.skip_ws();
    while !scanner.at_end() {
        let key = scanner.parse_key()?;
        scanner.skip_ws();
        if !scanner.eat(':') {
            return None;
        }
        scanner.skip_ws();
        let value = scanner.parse_value()?;
        map.insert(key, value);

        scanner.skip_ws();
        if scanner.eat(',') {
            scanner.skip_ws();
        } else if !scanner.at_end() {
            return None;
        }
    }

    Some(map)
}

struct Scanner {
    chars: Vec<char>,
    pos: usize,
}

impl Scanner {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    /// A key is a quoted string (either quote style) or a bare identifier.
    fn parse_key(&mut self) -> Option<String> {
        match self.peek()? {
            '"' | '\'' => self.parse_quoted(),
            c if c.is_alphabetic() || c == '_' => {
                let mut key = String::new();
                while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
                    key.push(self.bump()?);
                }
                Some(key)
            }
            _ => None,
        }
    }

    fn parse_quoted(&mut self) -> Option<String> {
        let quote = self.bump()?;
        let mut out = String::new();
        loop {
            match self.bump()? {
                '\\' => out.push(self.bump()?),
                c if c == quote => return Some(out),
                c => out.push(c),
            }
        }
    }

    fn parse_value(&mut self) -> Option<Value> {
        match self.peek()? {
            '"' | '\'' => self.parse_quoted().map(Value::String),
            '[' => self.parse_list(),
            // No second nesting level
            '{' => None,
            c if c == '-' || c == '+' || c.is_ascii_digit() => self.parse_number(),
            c if c.is_alphabetic() => self.parse_word(),
            _ => None,
        }
    }

    /// `True`/`False`/`None` and their JSON spellings.
    fn parse_word(&mut self) -> Option<Value> {
        let mut word = String::new();
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
            word.push(self.bump()?);
        }
        match word.as_str() {
            "True" | "true" => Some(Value::Bool(true)),
            "False" | "false" => Some(Value::Bool(false)),
            "None" | "null" => Some(Value::Null),
            _ => None,
        }
    }

    fn parse_number(&mut self) -> Option<Value> {
        let mut token = String::new();
        while matches!(
            self.peek(),
            Some(c) if c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E')
        ) {
            token.push(self.bump()?);
        }

        if let Ok(int) = token.parse::<i64>() {
            return Some(Value::Number(int.into()));
        }
        token
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
    }

    /// A flat list of scalar literals; nested containers fail.
    fn parse_list(&mut self) -> Option<Value> {
        self.eat('[');
        let mut items = Vec::new();
        loop {
            self.skip_ws();
            if self.eat(']') {
                return Some(Value::Array(items));
            }
            match self.peek()? {
                '[' | '{' => return None,
                _ => items.push(self.parse_value()?),
            }
            self.skip_ws();
            if self.eat(']') {
                return Some(Value::Array(items));
            }
            if !self.eat(',') {
                return None;
            }
        }
    }
}
