// Static regex pattern sets, compiled once on first use
use super::regex_error::RegexError;
use regex::Regex;
use std::sync::OnceLock;

/// Named regex patterns compiled lazily and shared across threads.
///
/// A pattern that fails to compile poisons the whole set: every lookup
/// returns the compilation error so callers can decide how to degrade.
pub struct StaticRegexSet {
    patterns: &'static [(&'static str, &'static str)], // (pattern, name)
    compiled: OnceLock<Result<Vec<Regex>, RegexError>>,
}

impl StaticRegexSet {
    pub const fn new(patterns: &'static [(&'static str, &'static str)]) -> Self {
        Self {
            patterns,
            compiled: OnceLock::new(),
        }
    }

    pub fn get(&self, index: usize) -> Result<&Regex, RegexError> {
        let compiled = self.compiled.get_or_init(|| {
            self.patterns
                .iter()
                .map(|(pattern, name)| {
                    Regex::new(pattern).map_err(|source| RegexError::CompilationFailed {
                        pattern: (*pattern).to_string(),
                        name: (*name).to_string(),
                        source,
                    })
                })
                .collect()
        });

        match compiled {
            Ok(regexes) => regexes.get(index).ok_or(RegexError::IndexOutOfBounds {
                index,
                max: regexes.len(),
            }),
            Err(e) => Err(e.clone()),
        }
    }

    pub fn get_by_name(&self, name: &str) -> Result<&Regex, RegexError> {
        let index = self
            .patterns
            .iter()
            .position(|(_, pattern_name)| *pattern_name == name)
            .ok_or(RegexError::PatternNotFound {
                name: name.to_string(),
            })?;

        self.get(index)
    }

    pub(crate) fn len(&self) -> usize {
        self.patterns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_regex_set_compilation() {
        static TEST_PATTERNS: StaticRegexSet = StaticRegexSet::new(&[
            (r"\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}:\d{2}", "timestamp"),
            (r"0x[0-9a-fA-F]+", "hex"),
        ]);

        for i in 0..TEST_PATTERNS.len() {
            assert!(
                TEST_PATTERNS.get(i).is_ok(),
                "Pattern at index {i} should compile"
            );
        }
        assert!(matches!(
            TEST_PATTERNS.get(2),
            Err(RegexError::IndexOutOfBounds { index: 2, max: 2 })
        ));
    }

    #[test]
    fn test_static_regex_set_get_by_name() {
        static TEST_PATTERNS: StaticRegexSet =
            StaticRegexSet::new(&[(r"0x[0-9a-fA-F]+", "hex"), (r"\b\d{10,}\b", "long_id")]);

        assert!(TEST_PATTERNS.get_by_name("hex").unwrap().is_match("0xdeadbeef"));
        assert!(TEST_PATTERNS.get_by_name("long_id").is_ok());
        assert!(matches!(
            TEST_PATTERNS.get_by_name("nonexistent"),
            Err(RegexError::PatternNotFound { .. })
        ));
    }

    #[test]
    fn test_static_regex_set_thread_safety() {
        use std::thread;

        static REGEX_SET: StaticRegexSet =
            StaticRegexSet::new(&[(r"\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}", "ipv4")]);

        let handles: Vec<_> = (0..10)
            .map(|_| thread::spawn(|| REGEX_SET.get(0).unwrap().is_match("10.0.0.5")))
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }

    #[test]
    fn test_invalid_regex_compilation() {
        static INVALID_PATTERNS: StaticRegexSet =
            StaticRegexSet::new(&[(r"ok", "fine"), (r"[invalid regex pattern", "invalid_pattern")]);

        // One bad pattern fails every lookup
        let result = INVALID_PATTERNS.get(0);
        if let Err(RegexError::CompilationFailed { pattern, name, .. }) = result {
            assert_eq!(pattern, "[invalid regex pattern");
            assert_eq!(name, "invalid_pattern");
        } else {
            panic!("Expected CompilationFailed error");
        }
    }
}
