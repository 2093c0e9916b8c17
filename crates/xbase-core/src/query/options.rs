//! LIST options
//!
//! Parsed token by token from the text after `LIST`. Unknown tokens are
//! skipped, never rejected.

use crate::validation::canonical_name;
use crate::words::Words;

/// What a LIST command asked for
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// `ALL`: start from the first record instead of the cursor
    pub all: bool,
    /// `NEXT n`: stop `n` records after the start
    pub next: Option<usize>,
    /// `FIELDS ...`: explicit projection (canonical names)
    pub fields: Option<Vec<String>>,
    /// `FOR ...`: raw filter text
    pub filter: Option<String>,
    /// `STRUCTURE`: list the field catalog instead of records
    pub structure: bool,
}

impl ListOptions {
    /// Default options: from the cursor to the end, all fields, no filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the first record
    pub fn all(mut self) -> Self {
        self.all = true;
        self
    }

    /// Stop `count` records after the start
    pub fn next(mut self, count: usize) -> Self {
        self.next = Some(count);
        self
    }

    /// Project the given fields (canonicalized here)
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.fields = Some(
            fields
                .into_iter()
                .map(|f| canonical_name(f.as_ref()))
                .collect(),
        );
        self
    }

    /// Keep only records matching `filter`
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// List the structure instead of records
    pub fn structure(mut self) -> Self {
        self.structure = true;
        self
    }

    /// Parses the argument text of a LIST command.
    ///
    /// Recognized tokens (case-insensitive): `ALL`, `REST`, `NEXT n`,
    /// `FIELDS a[,] b ...` (up to `FOR`), `FOR <expr>` (rest of the line,
    /// quotes preserved) and `STRUCTURE` (ends parsing). Anything else,
    /// including `NEXT` without a count, is skipped.
    pub fn parse(args: &str) -> Self {
        let mut options = Self::default();
        let mut words = Words::new(args);

        loop {
            let word = match words.next_word() {
                Ok(Some(word)) => word,
                Ok(None) => break,
                Err(e) => {
                    tracing::debug!("LIST options stop at malformed input: {}", e);
                    break;
                }
            };

            match word.to_uppercase().as_str() {
                "ALL" => options.all = true,
                "REST" => {}
                "NEXT" => {
                    let before = words.clone();
                    match words.next_word() {
                        Ok(Some(count)) => match count.parse::<usize>() {
                            Ok(n) => options.next = Some(n),
                            Err(_) => {
                                tracing::debug!("ignoring NEXT with count {:?}", count);
                                words = before;
                            }
                        },
                        _ => words = before,
                    }
                }
                "FIELDS" => {
                    let mut names = Vec::new();
                    loop {
                        let before = words.clone();
                        match words.next_word() {
                            Ok(Some(w)) if w.eq_ignore_ascii_case("FOR") => {
                                words = before;
                                break;
                            }
                            Ok(Some(w)) => names.extend(
                                w.split(',')
                                    .map(str::trim)
                                    .filter(|n| !n.is_empty())
                                    .map(canonical_name),
                            ),
                            _ => break,
                        }
                    }
                    options.fields = Some(names);
                }
                "FOR" => {
                    let rest = words.rest().trim_end();
                    options.filter = (!rest.is_empty()).then(|| rest.to_string());
                    break;
                }
                "STRUCTURE" => {
                    options.structure = true;
                    break;
                }
                other => tracing::debug!("ignoring unknown LIST option {:?}", other),
            }
        }

        options
    }

    /// Resolves `[start, end)` against the cursor and record count.
    ///
    /// `end` may exceed `record_count`; iteration clamps, the cursor does
    /// not.
    pub fn bounds(&self, cursor: usize, record_count: usize) -> (usize, usize) {
        let start = if self.all { 0 } else { cursor };
        let end = match self.next {
            Some(n) => start.saturating_add(n),
            None => record_count,
        };
        (start, end)
    }
}
