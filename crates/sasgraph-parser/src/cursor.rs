//! Forward-only line cursor.

use std::str::FromStr;

use sasgraph_core::{Fact, Result, SasError, Value};

/// Walks trimmed input lines strictly in order, remembering line numbers
/// for error messages.
pub struct LineCursor<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    line: usize,
}

impl<'a> LineCursor<'a> {
    pub fn new(content: &'a str) -> Self {
        Self {
            lines: content.lines().enumerate(),
            line: 0,
        }
    }

    /// 1-based number of the line returned last.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Next trimmed line, or None at the end of input.
    pub fn advance(&mut self) -> Option<&'a str> {
        let (index, line) = self.lines.next()?;
        self.line = index + 1;
        Some(line.trim())
    }

    /// Next trimmed line inside `section`.
    pub fn next_line(&mut self, section: &'static str) -> Result<&'a str> {
        self.advance()
            .ok_or(SasError::UnexpectedEof { section })
    }

    /// Next line parsed as a single number.
    pub fn next_number<T: FromStr>(&mut self, section: &'static str) -> Result<T> {
        let line = self.next_line(section)?;
        self.number(line, section)
    }

    /// Next line, which must equal `marker`.
    pub fn expect(&mut self, marker: &str, section: &'static str) -> Result<()> {
        let line = self.next_line(section)?;
        if line != marker {
            return Err(SasError::format(
                self.line,
                format!("expected '{}' but found '{}'", marker, line),
            ));
        }
        Ok(())
    }

    /// Next line as whitespace-separated numbers.
    pub fn next_numbers(&mut self, section: &'static str) -> Result<Vec<i64>> {
        let line = self.next_line(section)?;
        line.split_whitespace()
            .map(|token| self.number(token, section))
            .collect()
    }

    /// Next line as a `var value` pair.
    pub fn next_fact(&mut self, section: &'static str) -> Result<Fact> {
        let numbers = self.next_numbers(section)?;
        match numbers.as_slice() {
            [var, value] => self.fact(*var, *value),
            _ => Err(SasError::format(
                self.line,
                format!(
                    "expected a 'variable value' pair in {} section, found {} numbers",
                    section,
                    numbers.len()
                ),
            )),
        }
    }

    /// Convert raw numbers into a fact, rejecting negatives.
    pub fn fact(&self, var: i64, value: i64) -> Result<Fact> {
        Ok(Fact::new(self.index(var)?, self.value(value)?))
    }

    pub fn index(&self, raw: i64) -> Result<usize> {
        usize::try_from(raw).map_err(|_| {
            SasError::format(self.line, format!("invalid variable id {}", raw))
        })
    }

    pub fn value(&self, raw: i64) -> Result<Value> {
        Value::try_from(raw)
            .map_err(|_| SasError::format(self.line, format!("invalid value {}", raw)))
    }

    fn number<T: FromStr>(&self, token: &str, section: &'static str) -> Result<T> {
        token.parse().map_err(|_| {
            SasError::format(
                self.line,
                format!("expected a number in {} section but found '{}'", section, token),
            )
        })
    }
}
