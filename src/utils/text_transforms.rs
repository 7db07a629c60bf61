// src/utils/text_transforms.rs
//! Stateless text transforms applied to an entry before it is copied back
//!
//! - `trim`: strip surrounding whitespace and newlines
//! - `lowercase`: Unicode lowercase
//! - `capitalize`: upper-case the first letter of every word
//! - `url`: keep only the first URL in the text
//!
//! A transform that finds nothing to do (no URL in the text) returns the text
//! unchanged.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use linkify::{LinkFinder, LinkKind};
use serde::{Deserialize, Serialize};

use crate::error::ClipError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTransform {
    /// Strip leading and trailing whitespace
    Trim,
    /// Lowercase everything
    Lowercase,
    /// Capitalize every word
    Capitalize,
    /// Extract the first URL
    Url,
}

impl TextTransform {
    pub fn apply(self, text: &str) -> String {
        match self {
            TextTransform::Trim => trim(text).to_string(),
            TextTransform::Lowercase => text.to_lowercase(),
            TextTransform::Capitalize => capitalize(text),
            TextTransform::Url => extract_first_url(text).unwrap_or_else(|| text.to_string()),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TextTransform::Trim => "trim",
            TextTransform::Lowercase => "lowercase",
            TextTransform::Capitalize => "capitalize",
            TextTransform::Url => "url",
        }
    }
}

impl fmt::Display for TextTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TextTransform {
    type Err = ClipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <TextTransform as ValueEnum>::from_str(s, true)
            .map_err(|_| ClipError::UnknownTransform(s.to_string()))
    }
}

pub fn trim(text: &str) -> &str {
    text.trim()
}

/// Upper-case the first letter of each word and lower-case the rest.
///
/// A word starts after whitespace or punctuation; an apostrophe inside a word
/// does not start a new one (`don't` stays `Don't`).
pub fn capitalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;

    for c in text.chars() {
        if c.is_alphanumeric() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = !matches!(c, '\'' | '\u{2019}');
        }
    }
    out
}

/// First URL in `text`, with or without a scheme
pub fn extract_first_url(text: &str) -> Option<String> {
    let mut finder = LinkFinder::new();
    finder.kinds(&[LinkKind::Url]);
    finder.url_must_have_scheme(false);
    finder.links(text).next().map(|link| link.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_trim_strips_whitespace_and_newlines() {
        assert_eq!(TextTransform::Trim.apply("\n\t  hello world \r\n"), "hello world");
    }

    #[test]
    fn test_lowercase_unicode() {
        assert_eq!(TextTransform::Lowercase.apply("ÉCOLE Rust"), "école rust");
    }

    #[test]
    fn test_capitalize_words() {
        assert_eq!(capitalize("hello WORLD"), "Hello World");
        assert_eq!(capitalize("multi-line\nsecond-part"), "Multi-Line\nSecond-Part");
        assert_eq!(capitalize("don't stop"), "Don't Stop");
    }

    #[test]
    fn test_url_extracts_first_link() {
        let text = "docs at https://example.com/guide?x=1. also http://other.org";
        assert_eq!(
            TextTransform::Url.apply(text),
            "https://example.com/guide?x=1"
        );
    }

    #[test]
    fn test_url_without_scheme() {
        assert_eq!(
            extract_first_url("visit www.rust-lang.org today").as_deref(),
            Some("www.rust-lang.org")
        );
    }

    #[test]
    fn test_url_missing_leaves_text_unchanged() {
        assert_eq!(extract_first_url("no links here"), None);
        assert_eq!(TextTransform::Url.apply("no links here"), "no links here");
    }

    #[test]
    fn test_parse_transform_names() {
        assert_eq!("TRIM".parse::<TextTransform>().unwrap(), TextTransform::Trim);
        assert_eq!("url".parse::<TextTransform>().unwrap(), TextTransform::Url);
        assert!(matches!(
            "shout".parse::<TextTransform>(),
            Err(ClipError::UnknownTransform(name)) if name == "shout"
        ));
    }
}
