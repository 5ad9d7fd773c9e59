//! URL slug derivation for tasks.
//!
//! A slug is derived once from the task title and then kept stable so task
//! URLs survive title edits. Uniqueness is resolved by walking
//! [`SlugCandidates`]: the bare base first, then `base-1`, `base-2`, and so
//! on.

use super::{TaskDomainError, TaskTitle};
use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Longest counter suffix: a hyphen plus the digits of `u64::MAX`.
const MAX_SUFFIX_LENGTH: usize = 21;

/// Unique, URL-safe task identifier derived from the title.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskSlug(String);

impl TaskSlug {
    /// Maximum slug length accepted by storage.
    pub const MAX_LENGTH: usize = 250;

    /// Creates a validated slug.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidSlug`] when the value is empty,
    /// longer than [`Self::MAX_LENGTH`], or contains characters other than
    /// lowercase ASCII letters, digits, `-` and `_`.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let is_valid = !raw.is_empty()
            && raw.len() <= Self::MAX_LENGTH
            && raw.chars().all(is_slug_char);
        if !is_valid {
            return Err(TaskDomainError::InvalidSlug(raw));
        }
        Ok(Self(raw))
    }

    /// Returns the slug as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TaskSlug {
    type Error = TaskDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskSlug> for String {
    fn from(value: TaskSlug) -> Self {
        value.0
    }
}

impl AsRef<str> for TaskSlug {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

const fn is_slug_char(ch: char) -> bool {
    ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-' || ch == '_'
}

/// Normalizes free text into a lowercase, hyphen-joined slug base.
///
/// Word characters are kept, whitespace and hyphen runs collapse into a
/// single hyphen, all other punctuation is dropped, and leading or trailing
/// hyphens and underscores are stripped. Text is decomposed (NFKD) first so
/// accented letters keep their base letter; whatever is still outside ASCII
/// is dropped. The result may be empty.
///
/// # Examples
///
/// ```
/// use tasktrack::task::domain::slugify;
///
/// assert_eq!(slugify("Launch Plan"), "launch-plan");
/// assert_eq!(slugify("  Q3: ship it -- now! "), "q3-ship-it-now");
/// assert_eq!(slugify("Café Menü"), "cafe-menu");
/// assert_eq!(slugify("!!!"), "");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;
    for ch in text.nfkd().flat_map(char::to_lowercase) {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch);
        } else if ch.is_whitespace() || ch == '-' {
            pending_separator = true;
        }
    }
    slug.trim_matches(|ch| ch == '-' || ch == '_').to_owned()
}

/// Sequence of slug candidates for a title.
///
/// Yields the base slug, then `base-1`, `base-2`, ... without bound. An
/// empty base is never yielded on its own, so a title with no word
/// characters starts at `-1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugCandidates {
    base: String,
    counter: u64,
}

impl SlugCandidates {
    /// Creates the candidate sequence for a title.
    #[must_use]
    pub fn for_title(title: &TaskTitle) -> Self {
        let mut base = slugify(title.as_str());
        base.truncate(TaskSlug::MAX_LENGTH - MAX_SUFFIX_LENGTH);
        Self { base, counter: 0 }
    }

    /// Returns the normalized base slug.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }
}

impl Iterator for SlugCandidates {
    type Item = TaskSlug;

    fn next(&mut self) -> Option<Self::Item> {
        if self.counter == 0 {
            self.counter = 1;
            if !self.base.is_empty() {
                return TaskSlug::new(self.base.clone()).ok();
            }
        }
        let candidate = format!("{}-{}", self.base, self.counter);
        self.counter = self.counter.checked_add(1)?;
        TaskSlug::new(candidate).ok()
    }
}
