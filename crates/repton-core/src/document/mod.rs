// crates/repton-core/src/document/mod.rs
//
// Line-oriented interchange document (.rdat).
//
// One token per line:
//   {      map; entries alternate key, value; closed by }
//   [      list; closed by ]
//   set{   set; closed by }
//   (      tuple; closed by )
//   tag:v  terminal, tag one of bool, int, float, str
//
// Terminals with an unknown tag read back as text.

pub mod levels;

use std::io::{BufRead, Write};

use crate::error::{MapError, Result};

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Real(f64),
    Text(String),
    List(Vec<Value>),
    /// Key/value pairs; order carries no meaning.
    Map(Vec<(Value, Value)>),
    Set(Vec<Value>),
    Tuple(Vec<Value>),
}

impl Value {
    pub fn int(v: impl Into<i64>) -> Value {
        Value::Int(v.into())
    }

    pub fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Items of a list, set or tuple.
    pub fn items(&self) -> Option<&[Value]> {
        match self {
            Value::List(v) | Value::Set(v) | Value::Tuple(v) => Some(v),
            _ => None,
        }
    }

    pub fn entries(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Map(v) => Some(v),
            _ => None,
        }
    }

    /// Map lookup by key.
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries()?.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Map lookup by text key.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.entries()?
            .iter()
            .find(|(k, _)| k.as_text() == Some(name))
            .map(|(_, v)| v)
    }
}

pub fn write_value<W: Write>(value: &Value, w: &mut W) -> Result<()> {
    match value {
        Value::Bool(b) => writeln!(w, "bool:{}", if *b { "True" } else { "False" })?,
        Value::Int(v) => writeln!(w, "int:{v}")?,
        Value::Real(v) => writeln!(w, "float:{v:?}")?,
        Value::Text(s) => {
            if s.contains('\n') || s.trim() != s {
                return Err(MapError::DocumentFormat(format!(
                    "text {s:?} cannot be stored on one line"
                )));
            }
            writeln!(w, "str:{s}")?
        }
        Value::List(items) => write_items(w, "[", items, "]")?,
        Value::Set(items) => write_items(w, "set{", items, "}")?,
        Value::Tuple(items) => write_items(w, "(", items, ")")?,
        Value::Map(entries) => {
            writeln!(w, "{{")?;
            for (k, v) in entries {
                write_value(k, w)?;
                write_value(v, w)?;
            }
            writeln!(w, "}}")?;
        }
    }
    Ok(())
}

fn write_items<W: Write>(w: &mut W, open: &str, items: &[Value], close: &str) -> Result<()> {
    writeln!(w, "{open}")?;
    for item in items {
        write_value(item, w)?;
    }
    writeln!(w, "{close}")?;
    Ok(())
}

pub fn to_string(value: &Value) -> Result<String> {
    let mut out = Vec::new();
    write_value(value, &mut out)?;
    String::from_utf8(out).map_err(|e| MapError::DocumentFormat(e.to_string()))
}

#[derive(Debug)]
enum Token {
    Open(Kind),
    Close(char),
    Terminal(Value),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
    Map,
    List,
    Set,
    Tuple,
}

impl Kind {
    fn closer(self) -> char {
        match self {
            Kind::Map | Kind::Set => '}',
            Kind::List => ']',
            Kind::Tuple => ')',
        }
    }
}

fn parse_line(line: &str, number: usize) -> Result<Token> {
    let token = match line {
        "{" => Token::Open(Kind::Map),
        "[" => Token::Open(Kind::List),
        "set{" => Token::Open(Kind::Set),
        "(" => Token::Open(Kind::Tuple),
        "}" => Token::Close('}'),
        "]" => Token::Close(']'),
        ")" => Token::Close(')'),
        _ => {
            let (tag, raw) = line.split_once(':').ok_or_else(|| {
                MapError::DocumentFormat(format!("line {number}: expected tag:value, got {line:?}"))
            })?;
            let bad = |what: &str| {
                MapError::DocumentFormat(format!("line {number}: bad {what} value {raw:?}"))
            };
            let value = match tag {
                "bool" => match raw {
                    "True" | "true" => Value::Bool(true),
                    "False" | "false" => Value::Bool(false),
                    _ => return Err(bad("bool")),
                },
                "int" => Value::Int(raw.parse().map_err(|_| bad("int"))?),
                "float" => Value::Real(raw.parse().map_err(|_| bad("float"))?),
                _ => Value::Text(raw.to_string()),
            };
            Token::Terminal(value)
        }
    };
    Ok(token)
}

/// Read one document. Blank lines are ignored; trailing input after the
/// first complete value is an error.
pub fn read_value<R: BufRead>(r: R) -> Result<Value> {
    let mut tokens = Vec::new();
    for (i, line) in r.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        tokens.push(parse_line(line, i + 1)?);
    }

    let mut iter = tokens.into_iter();
    let value = match iter.next() {
        Some(first) => parse_value(first, &mut iter)?,
        None => return Err(MapError::DocumentFormat("empty document".into())),
    };
    if iter.next().is_some() {
        return Err(MapError::DocumentFormat("trailing data after document".into()));
    }
    Ok(value)
}

pub fn from_str(s: &str) -> Result<Value> {
    read_value(s.as_bytes())
}

fn parse_value<I: Iterator<Item = Token>>(first: Token, rest: &mut I) -> Result<Value> {
    let kind = match first {
        Token::Terminal(v) => return Ok(v),
        Token::Close(c) => {
            return Err(MapError::DocumentFormat(format!("unexpected {c:?}")));
        }
        Token::Open(kind) => kind,
    };

    let mut items = Vec::new();
    loop {
        match rest.next() {
            None => {
                return Err(MapError::DocumentFormat(format!("unterminated {kind:?}")));
            }
            Some(Token::Close(c)) if c == kind.closer() => break,
            Some(Token::Close(c)) => {
                return Err(MapError::DocumentFormat(format!(
                    "{c:?} closes a {kind:?}, expected {:?}",
                    kind.closer()
                )));
            }
            Some(tok) => items.push(parse_value(tok, rest)?),
        }
    }

    Ok(match kind {
        Kind::List => Value::List(items),
        Kind::Set => Value::Set(items),
        Kind::Tuple => Value::Tuple(items),
        Kind::Map => {
            if items.len() % 2 != 0 {
                return Err(MapError::DocumentFormat("map key without a value".into()));
            }
            let mut entries = Vec::with_capacity(items.len() / 2);
            let mut it = items.into_iter();
            while let (Some(k), Some(v)) = (it.next(), it.next()) {
                entries.push((k, v));
            }
            Value::Map(entries)
        }
    })
}
