//! Placeholder substitution over text and table regions.

use super::placeholder::PlaceholderStyle;
use crate::answers::Answers;
use crate::error::{ContractorError, Result};
use regex::{Captures, Regex, RegexBuilder};
use std::collections::HashMap;

const CELL_SEPARATOR: char = '|';
/// Compiled size allowed for the token alternation.
const PATTERN_SIZE_LIMIT: usize = 10 * (1 << 20);

/// A contiguous part of a template.
///
/// Every region keeps its raw bytes, line terminators included, so that
/// concatenating the regions gives back the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Region {
    /// Flowing text, possibly spanning several lines.
    Text(String),
    /// Consecutive table rows; cells are separated by `|`.
    Table(Vec<String>),
}

/// A parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    regions: Vec<Region>,
}

impl Template {
    /// Splits template text into flowing-text and table regions.
    pub fn parse(text: &str) -> Self {
        let mut regions = Vec::new();
        let mut text_buf = String::new();
        let mut rows: Vec<String> = Vec::new();

        for line in text.split_inclusive('\n') {
            if is_table_row(line) {
                if !text_buf.is_empty() {
                    regions.push(Region::Text(std::mem::take(&mut text_buf)));
                }
                rows.push(line.to_string());
            } else {
                if !rows.is_empty() {
                    regions.push(Region::Table(std::mem::take(&mut rows)));
                }
                text_buf.push_str(line);
            }
        }
        if !text_buf.is_empty() {
            regions.push(Region::Text(text_buf));
        }
        if !rows.is_empty() {
            regions.push(Region::Table(rows));
        }

        Self { regions }
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Substitutes every known placeholder with its answer.
    ///
    /// Text regions are substituted as a whole; table rows cell by cell, so
    /// a placeholder never spans a cell border. Unknown placeholders are left
    /// as they are.
    pub fn render(&self, answers: &Answers, style: PlaceholderStyle) -> Result<String> {
        let substitution = Substitution::new(answers, style)?;
        let mut out = String::new();

        for region in &self.regions {
            match region {
                Region::Text(text) => out.push_str(&substitution.apply(text)),
                Region::Table(rows) => {
                    for row in rows {
                        let (body, ending) = split_line_ending(row);
                        let cells: Vec<String> = body
                            .split(CELL_SEPARATOR)
                            .map(|cell| substitution.apply(cell))
                            .collect();
                        out.push_str(&cells.join("|"));
                        out.push_str(ending);
                    }
                }
            }
        }

        Ok(out)
    }
}

/// Parses and renders in one step.
pub fn render_text(text: &str, answers: &Answers, style: PlaceholderStyle) -> Result<String> {
    Template::parse(text).render(answers, style)
}

fn is_table_row(line: &str) -> bool {
    line.trim_start().starts_with(CELL_SEPARATOR)
}

fn split_line_ending(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}

/// Token → value lookup with a single alternation pattern.
///
/// The pattern matches tokens left to right without overlap; longer tokens
/// come first so a token that is a prefix of another never wins.
struct Substitution {
    pattern: Option<Regex>,
    values: HashMap<String, String>,
}

impl Substitution {
    fn new(answers: &Answers, style: PlaceholderStyle) -> Result<Self> {
        let values: HashMap<String, String> = answers
            .iter()
            .map(|(key, value)| (style.token(key), value.to_string()))
            .collect();

        let mut tokens: Vec<&String> = values.keys().collect();
        tokens.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let pattern = if tokens.is_empty() {
            None
        } else {
            let alternation = tokens
                .iter()
                .map(|token| regex::escape(token))
                .collect::<Vec<_>>()
                .join("|");
            Some(compile(&alternation, PATTERN_SIZE_LIMIT)?)
        };

        Ok(Self { pattern, values })
    }

    fn apply(&self, text: &str) -> String {
        match &self.pattern {
            Some(pattern) => pattern
                .replace_all(text, |caps: &Captures| {
                    self.values
                        .get(&caps[0])
                        .cloned()
                        .unwrap_or_else(|| caps[0].to_string())
                })
                .into_owned(),
            None => text.to_string(),
        }
    }
}

/// Builds the token alternation; escaped literals only, so the size limit is
/// the one way this can fail.
fn compile(alternation: &str, size_limit: usize) -> Result<Regex> {
    RegexBuilder::new(alternation)
        .size_limit(size_limit)
        .build()
        .map_err(|e| {
            tracing::error!("Failed to compile placeholder pattern: {}", e);
            ContractorError::internal(format!("Placeholder pattern rejected: {}", e))
        })
}
