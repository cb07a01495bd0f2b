//! Query engine configuration
//!
//! Options are fixed at compile time of a path; the same compiled path can be
//! queried against many documents with the options it was built with.

/// Regular expression backend selector
///
/// All backends must remain I-Regexp (RFC 9485) compatible for the `match`
/// and `search` filter functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegexEngine {
    /// The bundled `regex` crate backend
    #[default]
    Standard,
}

/// Options controlling compilation and evaluation of a path expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    /// Reject every JSONPath Plus extension at compile time, leaving pure
    /// RFC 9535 behavior
    pub strict_rfc9535: bool,
    /// Safety bound for descendant traversal depth; `None` means unlimited
    pub max_descendant_depth: Option<usize>,
    /// Regular expression backend used by `match` and `search`
    pub regex_engine: RegexEngine,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            strict_rfc9535: false,
            max_descendant_depth: None,
            regex_engine: RegexEngine::Standard,
        }
    }
}

impl QueryOptions {
    /// Create options with the default extension-friendly behavior
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable strict RFC 9535 mode
    ///
    /// When strict, `^`, `~`, context variables such as `@property`, and the
    /// `===`/`!==` operator synonyms all fail compilation with
    /// [`ErrorKind::ExtensionDisabled`](crate::ErrorKind::ExtensionDisabled).
    #[must_use]
    pub fn with_strict_rfc9535(mut self, strict: bool) -> Self {
        self.strict_rfc9535 = strict;
        self
    }

    /// Bound descendant traversal depth; exceeding it aborts the query with
    /// [`ErrorKind::DepthExceeded`](crate::ErrorKind::DepthExceeded)
    #[must_use]
    pub fn with_max_descendant_depth(mut self, depth: usize) -> Self {
        self.max_descendant_depth = Some(depth);
        self
    }

    /// Select the regular expression backend
    #[must_use]
    pub fn with_regex_engine(mut self, engine: RegexEngine) -> Self {
        self.regex_engine = engine;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_permissive() {
        let options = QueryOptions::default();
        assert!(!options.strict_rfc9535);
        assert_eq!(options.max_descendant_depth, None);
        assert_eq!(options.regex_engine, RegexEngine::Standard);
    }

    #[test]
    fn builders_chain() {
        let options = QueryOptions::new()
            .with_strict_rfc9535(true)
            .with_max_descendant_depth(16);
        assert!(options.strict_rfc9535);
        assert_eq!(options.max_descendant_depth, Some(16));
    }
}
