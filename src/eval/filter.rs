//! Filter expression evaluation
//!
//! Implements the filter value algebra (scalars, nodelists, and a "nothing"
//! marker), the comparison table, short-circuit boolean logic, context
//! variable resolution, and existence tests. A comparison never fails on
//! missing data; absent values compare as "nothing".

use crate::ast::{CompareOp, ContextVar, FilterExpr, Literal, PathAnchor, PathExpr};
use crate::error::{PathError, PathResult};
use crate::node::{NodeKind, PathNode};

use super::context::{resolve, StepContext};
use super::Evaluator;

/// Value produced by a filter subexpression
#[derive(Debug)]
pub(crate) enum FilterValue<'a, N: PathNode> {
    /// Absent value: failed projection or missing data
    Nothing,
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Result of an embedded path, before any projection
    Nodes(Vec<StepContext<'a, N>>),
}

impl<'a, N: PathNode> FilterValue<'a, N> {
    /// Project a nodelist to a scalar: exactly one node yields its scalar
    /// value, anything else yields nothing
    pub(crate) fn projected(self) -> PathResult<FilterValue<'a, N>> {
        match self {
            FilterValue::Nodes(nodes) => {
                if nodes.len() == 1 {
                    scalar_of(nodes[0].node)
                } else {
                    Ok(FilterValue::Nothing)
                }
            }
            other => Ok(other),
        }
    }
}

/// Scalar value of a document node; containers have none
pub(crate) fn scalar_of<'a, N: PathNode>(node: &'a N) -> PathResult<FilterValue<'a, N>> {
    match node.kind() {
        NodeKind::Null => Ok(FilterValue::Null),
        NodeKind::Bool => node
            .as_bool()
            .map(FilterValue::Bool)
            .ok_or_else(|| PathError::adapter("node of kind boolean has no boolean value")),
        NodeKind::Int => node
            .as_int()
            .map(FilterValue::Int)
            .ok_or_else(|| PathError::adapter("node of kind integer has no integer value")),
        NodeKind::Float => node
            .as_float()
            .map(FilterValue::Float)
            .ok_or_else(|| PathError::adapter("node of kind float has no float value")),
        NodeKind::String => node
            .as_str()
            .map(|s| FilterValue::Str(s.to_string()))
            .ok_or_else(|| PathError::adapter("node of kind string has no string value")),
        NodeKind::Sequence | NodeKind::Mapping => Ok(FilterValue::Nothing),
    }
}

impl<'a, 'p, N: PathNode> Evaluator<'a, 'p, N> {
    /// Evaluate a filter expression as a boolean test for one candidate
    pub(crate) fn eval_filter_test(
        &self,
        expr: &FilterExpr,
        candidate: &StepContext<'a, N>,
    ) -> PathResult<bool> {
        match expr {
            FilterExpr::Or(left, right) => {
                Ok(self.eval_filter_test(left, candidate)?
                    || self.eval_filter_test(right, candidate)?)
            }
            FilterExpr::And(left, right) => {
                Ok(self.eval_filter_test(left, candidate)?
                    && self.eval_filter_test(right, candidate)?)
            }
            FilterExpr::Not(inner) => Ok(!self.eval_filter_test(inner, candidate)?),
            FilterExpr::Compare { op, left, right } => {
                let left = self.eval_filter_value(left, candidate)?.projected()?;
                let right = self.eval_filter_value(right, candidate)?.projected()?;
                Ok(compare(&left, *op, &right))
            }
            // Existence: a path tests true iff it selects anything.
            FilterExpr::Path(path) => {
                Ok(!self.eval_embedded_path(path, candidate)?.is_empty())
            }
            // A scalar context variable tests true iff it produces a value.
            FilterExpr::ContextVar(var) => Ok(!matches!(
                self.eval_context_var(*var, candidate),
                FilterValue::Nothing
            )),
            FilterExpr::Call { name, args } => {
                match self.eval_call(name, args, candidate)? {
                    FilterValue::Bool(b) => Ok(b),
                    _ => Ok(false),
                }
            }
            // The typer rejects literals in test position.
            FilterExpr::Literal(_) => Ok(false),
        }
    }

    /// Evaluate a filter subexpression to a value (unprojected)
    pub(crate) fn eval_filter_value(
        &self,
        expr: &FilterExpr,
        candidate: &StepContext<'a, N>,
    ) -> PathResult<FilterValue<'a, N>> {
        match expr {
            FilterExpr::Literal(lit) => Ok(literal_value(lit)),
            FilterExpr::ContextVar(var) => Ok(self.eval_context_var(*var, candidate)),
            FilterExpr::Path(path) => {
                Ok(FilterValue::Nodes(self.eval_embedded_path(path, candidate)?))
            }
            FilterExpr::Call { name, args } => self.eval_call(name, args, candidate),
            // Logical expressions carry no value; the typer keeps them out
            // of value position.
            FilterExpr::Or(..)
            | FilterExpr::And(..)
            | FilterExpr::Not(_)
            | FilterExpr::Compare { .. } => Ok(FilterValue::Nothing),
        }
    }

    /// Evaluate an embedded path from its anchor
    pub(crate) fn eval_embedded_path(
        &self,
        path: &PathExpr,
        candidate: &StepContext<'a, N>,
    ) -> PathResult<Vec<StepContext<'a, N>>> {
        let start = match path.anchor {
            PathAnchor::Current => vec![candidate.clone()],
            PathAnchor::Root => vec![StepContext::root(self.root)],
            PathAnchor::Parent => match (candidate.parent, candidate.chain.parent()) {
                (Some(parent), Some(chain)) => {
                    let grandparent =
                        chain.parent().and_then(|c| resolve(self.root, &c));
                    vec![StepContext {
                        node: parent,
                        parent: grandparent,
                        chain,
                    }]
                }
                _ => Vec::new(),
            },
        };
        self.eval_segments(start, &path.segments)
    }

    /// Resolve a scalar context variable for the candidate
    pub(crate) fn eval_context_var(
        &self,
        var: ContextVar,
        candidate: &StepContext<'a, N>,
    ) -> FilterValue<'a, N> {
        match var {
            ContextVar::Property => match candidate.property() {
                Some(name) => FilterValue::Str(name),
                None => FilterValue::Nothing,
            },
            ContextVar::Index => FilterValue::Int(candidate.index()),
            ContextVar::Path => FilterValue::Str(candidate.path()),
            ContextVar::ParentProperty => FilterValue::Str(candidate.parent_property()),
        }
    }
}

fn literal_value<'a, N: PathNode>(lit: &Literal) -> FilterValue<'a, N> {
    match lit {
        Literal::Null => FilterValue::Null,
        Literal::Bool(b) => FilterValue::Bool(*b),
        Literal::Int(i) => FilterValue::Int(*i),
        Literal::Float(f) => FilterValue::Float(*f),
        Literal::String(s) => FilterValue::Str(s.clone()),
    }
}

/// Compare two projected filter values
///
/// Cross-type orderings are false and cross-type `!=` is true, except that
/// integers and floats compare numerically. "Nothing" compares false under
/// every operator except `!=` with exactly one absent side.
pub(crate) fn compare<N: PathNode>(
    left: &FilterValue<'_, N>,
    op: CompareOp,
    right: &FilterValue<'_, N>,
) -> bool {
    use FilterValue::{Bool, Float, Int, Nothing, Null, Str};
    match (left, right) {
        (Nothing, Nothing) => false,
        (Nothing, _) | (_, Nothing) => op == CompareOp::Ne,
        (Null, Null) => match op {
            CompareOp::Eq => true,
            _ => false,
        },
        (Null, _) | (_, Null) => op == CompareOp::Ne,
        (Int(a), Int(b)) => compare_ordered(a, b, op),
        #[allow(clippy::cast_precision_loss)]
        (Int(a), Float(b)) => compare_floats(*a as f64, *b, op),
        #[allow(clippy::cast_precision_loss)]
        (Float(a), Int(b)) => compare_floats(*a, *b as f64, op),
        (Float(a), Float(b)) => compare_floats(*a, *b, op),
        (Str(a), Str(b)) => compare_ordered(a, b, op),
        (Bool(a), Bool(b)) => compare_ordered(a, b, op),
        _ => op == CompareOp::Ne,
    }
}

fn compare_ordered<T: PartialOrd + PartialEq>(a: &T, b: &T, op: CompareOp) -> bool {
    match op {
        CompareOp::Eq => a == b,
        CompareOp::Ne => a != b,
        CompareOp::Lt => a < b,
        CompareOp::Le => a <= b,
        CompareOp::Gt => a > b,
        CompareOp::Ge => a >= b,
    }
}

fn compare_floats(a: f64, b: f64, op: CompareOp) -> bool {
    compare_ordered(&a, &b, op)
}
