//! Pattern-matching expressions carried as `{source, flags}`.

use regex::{Regex, RegexBuilder};

use crate::error::ParseError;

/// Flags in canonical order.
const FLAG_ORDER: &str = "dgimsuvy";

/// A regular expression kept as source text plus flags.
///
/// The source is stored verbatim; it is only interpreted by [`Pattern::compile`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    source: String,
    flags: String,
}

impl Pattern {
    /// Creates a pattern, validating and canonicalizing `flags`.
    ///
    /// # Example
    ///
    /// ```
    /// use json_ext::Pattern;
    ///
    /// let re = Pattern::new(r"([^\s]+)", "yg").unwrap();
    /// assert_eq!(re.flags(), "gy");
    /// assert!(Pattern::new("a", "gg").is_err());
    /// ```
    pub fn new(source: impl Into<String>, flags: &str) -> Result<Self, ParseError> {
        let mut seen = [false; FLAG_ORDER.len()];
        for c in flags.chars() {
            let Some(i) = FLAG_ORDER.find(c) else {
                return Err(ParseError::RegExpFlags(flags.to_owned()));
            };
            if seen[i] {
                return Err(ParseError::RegExpFlags(flags.to_owned()));
            }
            seen[i] = true;
        }
        let has = |c: char| FLAG_ORDER.find(c).is_some_and(|i| seen[i]);
        if has('u') && has('v') {
            return Err(ParseError::RegExpFlags(flags.to_owned()));
        }
        let flags = FLAG_ORDER.chars().filter(|&c| has(c)).collect();
        Ok(Self {
            source: source.into(),
            flags,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn flags(&self) -> &str {
        &self.flags
    }

    pub fn has_flag(&self, flag: char) -> bool {
        self.flags.contains(flag)
    }

    /// Compiles the source with the `regex` engine, honoring `i`, `m` and `s`.
    ///
    /// Flags that only affect iteration (`g`, `y`, `d`) have no engine
    /// counterpart and are ignored. Constructs the engine does not support,
    /// such as look-around, are reported as errors.
    pub fn compile(&self) -> Result<Regex, regex::Error> {
        RegexBuilder::new(&self.source)
            .case_insensitive(self.has_flag('i'))
            .multi_line(self.has_flag('m'))
            .dot_matches_new_line(self.has_flag('s'))
            .build()
    }
}
