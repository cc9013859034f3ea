//! Search query compiler.
//!
//! Query syntax:
//! - matching is case-insensitive;
//! - a token starting with `*` matches anywhere in the name, any other token
//!   matches only at the start of the name;
//! - tokens are separated by single spaces and combined with OR.
//!
//! Only word characters of a token take part in matching; `"j.o-e"` searches
//! for `"joe"`. Tokens without any word character are ignored, and a query
//! with no usable tokens matches every record.

use regex::{Regex, RegexBuilder};

use crate::error::Error;
use crate::model::Record;

/// A compiled search query, tested against a record's name.
#[derive(Debug, Clone)]
pub struct Predicate {
    pattern: Option<Regex>,
}

impl Predicate {
    /// A predicate that accepts everything.
    pub fn all() -> Self {
        Self { pattern: None }
    }

    /// Whether this predicate accepts every name.
    pub fn matches_all(&self) -> bool {
        self.pattern.is_none()
    }

    pub fn matches_name(&self, name: &str) -> bool {
        match &self.pattern {
            Some(re) => re.is_match(name),
            None => true,
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.matches_name(&record.name)
    }

    /// The underlying pattern, if any.
    pub fn as_str(&self) -> Option<&str> {
        self.pattern.as_ref().map(Regex::as_str)
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Build the regex group for one token, or `None` if it has no word characters.
fn token_group(token: &str) -> Option<String> {
    let word: String = token.chars().filter(|c| is_word_char(*c)).collect();
    if word.is_empty() {
        return None;
    }
    let anchor = if token.starts_with('*') { "" } else { "^" };
    Some(format!("({}{})", anchor, regex::escape(&word)))
}

/// Compile a raw search string into a predicate over record names.
pub fn compile(query: &str) -> Result<Predicate, Error> {
    let groups: Vec<String> = query.split(' ').filter_map(token_group).collect();
    if groups.is_empty() {
        return Ok(Predicate::all());
    }

    let pattern = RegexBuilder::new(&groups.join("|"))
        .case_insensitive(true)
        .build()?;
    log::debug!("compiled query {:?} into {}", query, pattern.as_str());
    Ok(Predicate {
        pattern: Some(pattern),
    })
}
