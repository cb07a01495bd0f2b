//! Compiled path handle and query surface
//!
//! A [`Path`] is immutable after compilation and may be shared across threads
//! and queried repeatedly, provided the document is not mutated during a
//! query. Matches borrow from the document; their lifetime is bounded by it.

use crate::ast::{PathExpr, Selector};
use crate::config::QueryOptions;
use crate::error::{PathError, PathResult};
use crate::eval::context::StepContext;
use crate::eval::functions::{anchored_pattern, RegexCache};
use crate::eval::Evaluator;
use crate::node::PathNode;
use crate::parser;
use crate::typer;

/// A compiled path expression
#[derive(Debug)]
pub struct Path {
    expression: String,
    ast: PathExpr,
    options: QueryOptions,
    regexes: RegexCache,
}

/// Ordered list of matches produced by a query
pub type Nodelist<'a, N> = Vec<Match<'a, N>>;

/// One matched node, with its normalized path
#[derive(Debug)]
pub struct Match<'a, N: PathNode> {
    value: MatchValue<'a, N>,
    path: String,
    parent: Option<&'a N>,
}

#[derive(Debug)]
enum MatchValue<'a, N: PathNode> {
    /// A node of the queried document
    Node(&'a N),
    /// A synthetic string produced by the `~` key-name selector
    Name(String),
}

impl<'a, N: PathNode> Match<'a, N> {
    /// The matched document node; `None` for `~` key-name results
    #[must_use]
    pub fn node(&self) -> Option<&'a N> {
        match self.value {
            MatchValue::Node(node) => Some(node),
            MatchValue::Name(_) => None,
        }
    }

    /// The key name produced by a terminal `~`; `None` for node results
    #[must_use]
    pub fn key_name(&self) -> Option<&str> {
        match &self.value {
            MatchValue::Name(name) => Some(name),
            MatchValue::Node(_) => None,
        }
    }

    /// Normalized path of the match (RFC 9535 bracket form)
    ///
    /// For key-name results this is the path of the node whose key was taken.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Parent of the matched node; populated by
    /// [`Path::query_with_parent`], `None` otherwise and at the root
    #[must_use]
    pub fn parent(&self) -> Option<&'a N> {
        self.parent
    }
}

impl Path {
    /// Compile an expression with default options
    ///
    /// # Errors
    ///
    /// Returns a [`PathError`] of kind `Lex`, `Parse`, `Type`, or
    /// `ExtensionDisabled` when the expression is not a valid path.
    pub fn compile(expression: &str) -> PathResult<Self> {
        Self::compile_with(expression, QueryOptions::default())
    }

    /// Compile an expression with explicit options
    ///
    /// # Errors
    ///
    /// As [`Path::compile`]; additionally, string-literal regex patterns in
    /// `match()`/`search()` calls are validated here, failing with a `Type`
    /// error when invalid.
    pub fn compile_with(expression: &str, options: QueryOptions) -> PathResult<Self> {
        let ast = parser::parse(expression, &options)?;
        let patterns = typer::check_path(&ast, &options)?;
        let regexes = RegexCache::new();
        for literal in &patterns {
            let key = if literal.anchored {
                anchored_pattern(&literal.pattern)
            } else {
                literal.pattern.clone()
            };
            regexes.get_or_compile(&key).map_err(|e| {
                PathError::type_error(
                    format!("invalid regular expression '{}': {e}", literal.pattern),
                    None,
                )
            })?;
        }
        tracing::debug!(
            target: "treepath::compile",
            expression,
            strict = options.strict_rfc9535,
            "compiled path expression"
        );
        Ok(Self {
            expression: expression.to_string(),
            ast,
            options,
            regexes,
        })
    }

    /// The source expression this path was compiled from
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// The options this path was compiled with
    #[must_use]
    pub fn options(&self) -> &QueryOptions {
        &self.options
    }

    /// Evaluate against a document, returning matches in selector order
    ///
    /// # Errors
    ///
    /// Runtime failures only: `DepthExceeded`, `Regex` (dynamic patterns),
    /// or `Adapter`. A query that matches nothing returns an empty nodelist.
    pub fn query<'a, N: PathNode>(&self, root: &'a N) -> PathResult<Nodelist<'a, N>> {
        self.run(root, false)
    }

    /// Evaluate like [`Path::query`], retaining parent references on matches
    pub fn query_with_parent<'a, N: PathNode>(
        &self,
        root: &'a N,
    ) -> PathResult<Nodelist<'a, N>> {
        self.run(root, true)
    }

    fn run<'a, N: PathNode>(
        &self,
        root: &'a N,
        keep_parents: bool,
    ) -> PathResult<Nodelist<'a, N>> {
        // A terminal `~` evaluates the path up to it, then materializes the
        // traversal keys of the results instead of the nodes.
        let (segments, key_name) = match self.ast.segments.split_last() {
            Some((last, rest)) if last.selectors == [Selector::KeyName] => (rest, true),
            _ => (self.ast.segments.as_slice(), false),
        };
        let evaluator = Evaluator::new(root, &self.options, &self.regexes);
        let contexts = evaluator.eval_segments(vec![StepContext::root(root)], segments)?;
        let matches = contexts
            .into_iter()
            .filter_map(|ctx| {
                let parent = if keep_parents { ctx.parent } else { None };
                let path = ctx.path();
                if key_name {
                    // The root has no key to take.
                    ctx.property().map(|name| Match {
                        value: MatchValue::Name(name),
                        path,
                        parent,
                    })
                } else {
                    Some(Match {
                        value: MatchValue::Node(ctx.node),
                        path,
                        parent,
                    })
                }
            })
            .collect();
        Ok(matches)
    }
}

/// Compile a path expression with default options
///
/// Convenience alias for [`Path::compile`].
///
/// # Errors
///
/// See [`Path::compile`].
pub fn compile(expression: &str) -> PathResult<Path> {
    Path::compile(expression)
}
