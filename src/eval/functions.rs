//! Filter function library
//!
//! `length`, `count`, `match`, `search`, and `value` per RFC 9535, plus the
//! `isX` type-test extensions. Regular expressions are cached per compiled
//! path; string-literal patterns are compiled (and validated) at path compile
//! time, dynamic patterns on first use.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::ast::FilterExpr;
use crate::error::{PathError, PathResult};
use crate::node::{NodeKind, PathNode};

use super::context::StepContext;
use super::filter::{scalar_of, FilterValue};
use super::Evaluator;

/// Compiled-regex cache keyed by the final (possibly anchored) pattern
///
/// Shared across queries of one compiled path; bounded so adversarial
/// documents cannot grow it without limit through dynamic patterns.
#[derive(Debug)]
pub(crate) struct RegexCache {
    cache: RwLock<HashMap<String, regex::Regex>>,
}

const REGEX_CACHE_CAP: usize = 64;

impl RegexCache {
    pub(crate) fn new() -> Self {
        Self {
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Fetch a compiled regex, compiling and caching on miss
    pub(crate) fn get_or_compile(&self, pattern: &str) -> Result<regex::Regex, regex::Error> {
        if let Ok(cache) = self.cache.read() {
            if let Some(regex) = cache.get(pattern) {
                return Ok(regex.clone());
            }
        }
        let regex = regex::Regex::new(pattern)?;
        if let Ok(mut cache) = self.cache.write() {
            if cache.len() < REGEX_CACHE_CAP {
                cache.insert(pattern.to_string(), regex.clone());
            }
        }
        Ok(regex)
    }
}

/// Anchor a `match()` pattern so it must cover the whole string
pub(crate) fn anchored_pattern(pattern: &str) -> String {
    format!("^(?:{pattern})$")
}

impl<'a, 'p, N: PathNode> Evaluator<'a, 'p, N> {
    /// Dispatch a filter function call
    ///
    /// The typer has already verified the name, arity, and argument types.
    pub(crate) fn eval_call(
        &self,
        name: &str,
        args: &[FilterExpr],
        candidate: &StepContext<'a, N>,
    ) -> PathResult<FilterValue<'a, N>> {
        match name {
            "length" => {
                let arg = self.eval_filter_value(&args[0], candidate)?;
                self.eval_length(arg)
            }
            "count" => {
                let arg = self.eval_filter_value(&args[0], candidate)?;
                match arg {
                    FilterValue::Nodes(nodes) => Ok(FilterValue::Int(nodes.len() as i64)),
                    _ => Ok(FilterValue::Nothing),
                }
            }
            "value" => {
                let arg = self.eval_filter_value(&args[0], candidate)?;
                match arg {
                    FilterValue::Nodes(nodes) if nodes.len() == 1 => scalar_of(nodes[0].node),
                    _ => Ok(FilterValue::Nothing),
                }
            }
            "match" => self.eval_regex(args, candidate, true),
            "search" => self.eval_regex(args, candidate, false),
            "isNull" => self.eval_type_test(&args[0], candidate, |kind| kind == NodeKind::Null),
            "isBoolean" => self.eval_type_test(&args[0], candidate, |kind| kind == NodeKind::Bool),
            "isNumber" => self.eval_type_test(&args[0], candidate, |kind| {
                matches!(kind, NodeKind::Int | NodeKind::Float)
            }),
            "isInteger" => self.eval_type_test(&args[0], candidate, |kind| kind == NodeKind::Int),
            "isString" => self.eval_type_test(&args[0], candidate, |kind| kind == NodeKind::String),
            "isArray" => {
                self.eval_type_test(&args[0], candidate, |kind| kind == NodeKind::Sequence)
            }
            "isObject" => {
                self.eval_type_test(&args[0], candidate, |kind| kind == NodeKind::Mapping)
            }
            _ => Err(PathError::type_error(
                format!("unknown function '{name}'"),
                None,
            )),
        }
    }

    /// `length()`: Unicode scalar count for strings, element count for
    /// containers reached through a singular nodelist, nothing otherwise
    fn eval_length(&self, arg: FilterValue<'a, N>) -> PathResult<FilterValue<'a, N>> {
        let length = match arg {
            FilterValue::Str(s) => Some(s.chars().count()),
            FilterValue::Nodes(nodes) if nodes.len() == 1 => {
                let node = nodes[0].node;
                match node.kind() {
                    NodeKind::String => node.as_str().map(|s| s.chars().count()),
                    NodeKind::Sequence => Some(node.sequence_len()),
                    NodeKind::Mapping => Some(node.mapping_len()),
                    _ => None,
                }
            }
            _ => None,
        };
        Ok(match length {
            Some(len) => FilterValue::Int(len as i64),
            None => FilterValue::Nothing,
        })
    }

    /// `match()` (anchored) and `search()` (unanchored)
    fn eval_regex(
        &self,
        args: &[FilterExpr],
        candidate: &StepContext<'a, N>,
        anchored: bool,
    ) -> PathResult<FilterValue<'a, N>> {
        let subject = self.eval_filter_value(&args[0], candidate)?.projected()?;
        let pattern = self.eval_filter_value(&args[1], candidate)?.projected()?;
        let (FilterValue::Str(subject), FilterValue::Str(pattern)) = (subject, pattern) else {
            return Ok(FilterValue::Bool(false));
        };
        let key = if anchored {
            anchored_pattern(&pattern)
        } else {
            pattern.clone()
        };
        let regex = self
            .regexes
            .get_or_compile(&key)
            .map_err(|e| PathError::regex(format!("invalid pattern '{pattern}': {e}")))?;
        Ok(FilterValue::Bool(regex.is_match(&subject)))
    }

    /// The `isX` family: kind test over a value or a singular nodelist
    fn eval_type_test(
        &self,
        arg: &FilterExpr,
        candidate: &StepContext<'a, N>,
        test: impl Fn(NodeKind) -> bool,
    ) -> PathResult<FilterValue<'a, N>> {
        let kind = match self.eval_filter_value(arg, candidate)? {
            FilterValue::Nodes(nodes) if nodes.len() == 1 => Some(nodes[0].node.kind()),
            FilterValue::Nodes(_) | FilterValue::Nothing => None,
            FilterValue::Null => Some(NodeKind::Null),
            FilterValue::Bool(_) => Some(NodeKind::Bool),
            FilterValue::Int(_) => Some(NodeKind::Int),
            FilterValue::Float(_) => Some(NodeKind::Float),
            FilterValue::Str(_) => Some(NodeKind::String),
        };
        Ok(FilterValue::Bool(kind.is_some_and(test)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_reuses_compiled_patterns() {
        let cache = RegexCache::new();
        let first = cache.get_or_compile("a+b").expect("compile");
        let second = cache.get_or_compile("a+b").expect("compile");
        assert_eq!(first.as_str(), second.as_str());
    }

    #[test]
    fn cache_rejects_invalid_patterns() {
        let cache = RegexCache::new();
        assert!(cache.get_or_compile("(unclosed").is_err());
    }

    #[test]
    fn anchoring_wraps_alternations() {
        // Without the non-capturing group, `a|b` would anchor only its ends.
        let cache = RegexCache::new();
        let regex = cache
            .get_or_compile(&anchored_pattern("a|b"))
            .expect("compile");
        assert!(regex.is_match("a"));
        assert!(!regex.is_match("xa"));
        assert!(!regex.is_match("ab"));
    }
}
