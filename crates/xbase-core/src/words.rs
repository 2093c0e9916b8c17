//! Shell-style splitting of command arguments.
//!
//! Words are separated by whitespace. Single quotes keep everything
//! literally, double quotes allow `\"` and `\\` escapes, and a backslash
//! outside quotes escapes the next character. Quoted pieces join the
//! surrounding word, so `ab"c d"` is the single word `abc d`.
//!
//! [`Words::rest`] exposes the untouched remainder of the input, which the
//! LIST parser uses to hand the text after `FOR` to the filter lexer with
//! its quotes intact.

use std::fmt;

/// Word splitting errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordsError {
    /// A quote was opened and never closed
    UnclosedQuote,
    /// Input ended right after a backslash
    TrailingEscape,
}

impl fmt::Display for WordsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WordsError::UnclosedQuote => write!(f, "No closing quotation"),
            WordsError::TrailingEscape => write!(f, "No escaped character"),
        }
    }
}

impl std::error::Error for WordsError {}

/// Incremental word reader over a command line.
#[derive(Debug, Clone)]
pub struct Words<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Words<'a> {
    /// Starts reading at the beginning of `input`
    pub fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    /// Unread remainder with leading whitespace removed
    pub fn rest(&self) -> &'a str {
        self.input[self.position..].trim_start()
    }

    /// Whether only whitespace remains
    pub fn is_empty(&self) -> bool {
        self.rest().is_empty()
    }

    /// Reads the next word, or `None` at the end of input
    pub fn next_word(&mut self) -> Result<Option<String>, WordsError> {
        let remaining = &self.input[self.position..];
        let mut chars = remaining.char_indices().peekable();

        while chars.next_if(|&(_, c)| c.is_whitespace()).is_some() {}
        if chars.peek().is_none() {
            self.position = self.input.len();
            return Ok(None);
        }

        let mut word = String::new();
        let mut end = remaining.len();

        while let Some((i, c)) = chars.next() {
            match c {
                c if c.is_whitespace() => {
                    end = i;
                    break;
                }
                '\'' => loop {
                    match chars.next() {
                        Some((_, '\'')) => break,
                        Some((_, ch)) => word.push(ch),
                        None => return Err(WordsError::UnclosedQuote),
                    }
                },
                '"' => loop {
                    match chars.next() {
                        Some((_, '"')) => break,
                        Some((_, '\\')) => match chars.peek() {
                            Some(&(_, next)) if next == '"' || next == '\\' => {
                                word.push(next);
                                chars.next();
                            }
                            _ => word.push('\\'),
                        },
                        Some((_, ch)) => word.push(ch),
                        None => return Err(WordsError::UnclosedQuote),
                    }
                },
                '\\' => match chars.next() {
                    Some((_, ch)) => word.push(ch),
                    None => return Err(WordsError::TrailingEscape),
                },
                c => word.push(c),
            }
        }

        self.position += end;
        Ok(Some(word))
    }
}

/// Splits a whole line into words
pub fn split(input: &str) -> Result<Vec<String>, WordsError> {
    let mut words = Words::new(input);
    let mut out = Vec::new();
    while let Some(word) = words.next_word()? {
        out.push(word);
    }
    Ok(out)
}
