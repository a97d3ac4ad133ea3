//! Fixed-width key/value tables.
//!
//! Keys and values are HTML-unescaped before rendering; column width is the
//! longest unescaped key, counted in `char`s.

use html_escape::decode_html_entities;
use serde_json::{Number, Value};
use std::fmt;

/// A scalar value shown in a table row.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(Number),
    Empty,
}

impl Cell {
    /// Whether the cell renders as `-`: no value, empty text, or zero.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Number(n) => n.as_f64() == Some(0.0),
            Self::Empty => true,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Empty => Ok(()),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<u64> for Cell {
    fn from(n: u64) -> Self {
        Self::Number(n.into())
    }
}

impl From<&Value> for Cell {
    fn from(v: &Value) -> Self {
        match v {
            Value::Null | Value::Bool(false) => Self::Empty,
            Value::Bool(true) => Self::Text("true".into()),
            Value::Number(n) => Self::Number(n.clone()),
            Value::String(s) => Self::Text(s.clone()),
            Value::Array(_) | Value::Object(_) => Self::Text(v.to_string()),
        }
    }
}

/// Key column alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Justify {
    /// Keys padded on the right to the widest key plus two spaces.
    Left,
    /// Keys padded on the left to the widest key, then four spaces.
    Right,
}

/// Render `rows` one per line, `-` standing in for blank values.
pub fn make_table<K: AsRef<str>>(rows: &[(K, Cell)], justify: Justify) -> String {
    let keys: Vec<_> = rows
        .iter()
        .map(|(k, _)| decode_html_entities(k.as_ref()))
        .collect();
    let width = keys.iter().map(|k| k.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    for (key, (_, value)) in keys.iter().zip(rows) {
        let value = if value.is_blank() {
            "-".to_owned()
        } else {
            decode_html_entities(&value.to_string()).into_owned()
        };
        let line = match justify {
            Justify::Left => format!("{key:<w$}{value}\n", w = width + 2),
            Justify::Right => format!("{key:>width$}    {value}\n"),
        };
        out.push_str(&line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(pairs: &[(&str, &str)]) -> Vec<(String, Cell)> {
        pairs
            .iter()
            .map(|&(k, v)| (k.to_owned(), Cell::from(v)))
            .collect()
    }

    #[test]
    fn left_justified() {
        let table = make_table(&rows(&[("A", "1"), ("BB", "")]), Justify::Left);
        assert_eq!(table, "A   1\nBB  -\n");
    }

    #[test]
    fn right_justified() {
        let table = make_table(&rows(&[("A", "1"), ("BB", "")]), Justify::Right);
        assert_eq!(table, " A    1\nBB    -\n");
    }

    #[test]
    fn width_uses_unescaped_key() {
        let table = make_table(&rows(&[("A&amp;B", "x"), ("Size", "y")]), Justify::Left);
        assert_eq!(table, "A&B   x\nSize  y\n");
    }

    #[test]
    fn values_are_unescaped() {
        let table = make_table(&rows(&[("Label", "Rock &amp; Roll &#39;77")]), Justify::Left);
        assert_eq!(table, "Label  Rock & Roll '77\n");
    }

    #[test]
    fn width_counts_chars_not_bytes() {
        let table = make_table(&rows(&[("Café", "1"), ("Ab", "2")]), Justify::Right);
        assert_eq!(table, "Café    1\n  Ab    2\n");
    }

    #[test]
    fn blank_cells() {
        assert!(Cell::from(&json!(0)).is_blank());
        assert!(Cell::from(&json!(0.0)).is_blank());
        assert!(Cell::from(&json!(null)).is_blank());
        assert!(Cell::from(&json!(false)).is_blank());
        assert!(Cell::from(&json!("")).is_blank());
        assert!(!Cell::from(&json!(2019)).is_blank());
        assert!(!Cell::from(&json!("0")).is_blank());
    }

    #[test]
    fn numbers_render_plainly() {
        let table = make_table(
            &[("Size", Cell::from(&json!(123_456_789))), ("Year", Cell::from(0_u64))],
            Justify::Left,
        );
        assert_eq!(table, "Size  123456789\nYear  -\n");
    }

    #[test]
    fn empty_table() {
        assert_eq!(make_table::<&str>(&[], Justify::Left), "");
    }

    #[test]
    fn deterministic() {
        let input = rows(&[("Name", "Album"), ("Media", "CD")]);
        assert_eq!(
            make_table(&input, Justify::Left),
            make_table(&input, Justify::Left)
        );
    }
}
