//! Path evaluation engine
//!
//! Walks the compiled segment list left-to-right over an evolving nodelist.
//! Each segment applies its selectors to every node of the incoming list in
//! (node order, selector order); descendant segments expand the list to all
//! descendants in document order first.

pub(crate) mod context;
pub(crate) mod descent;
pub(crate) mod filter;
pub(crate) mod functions;

use std::rc::Rc;

use crate::ast::{Segment, SegmentKind, Selector};
use crate::config::QueryOptions;
use crate::error::PathResult;
use crate::node::{NodeKind, PathNode};
use context::{resolve, StepContext};
use functions::RegexCache;

/// Evaluation engine for one query over one document
pub(crate) struct Evaluator<'a, 'p, N: PathNode> {
    pub(crate) root: &'a N,
    pub(crate) options: &'p QueryOptions,
    pub(crate) regexes: &'p RegexCache,
}

impl<'a, 'p, N: PathNode> Evaluator<'a, 'p, N> {
    pub(crate) fn new(root: &'a N, options: &'p QueryOptions, regexes: &'p RegexCache) -> Self {
        Self {
            root,
            options,
            regexes,
        }
    }

    /// Apply a segment list to a starting nodelist
    pub(crate) fn eval_segments(
        &self,
        start: Vec<StepContext<'a, N>>,
        segments: &[Segment],
    ) -> PathResult<Vec<StepContext<'a, N>>> {
        let mut current = start;
        for segment in segments {
            let input = match segment.kind {
                SegmentKind::Child => current,
                SegmentKind::Descendant => {
                    descent::expand(current, self.options.max_descendant_depth)?
                }
            };
            let mut output = Vec::new();
            for ctx in &input {
                for selector in &segment.selectors {
                    self.apply_selector(ctx, selector, &mut output)?;
                }
            }
            if segment
                .selectors
                .iter()
                .any(|s| matches!(s, Selector::ParentNode))
            {
                collapse_consecutive(&mut output);
            }
            current = output;
        }
        Ok(current)
    }

    fn apply_selector(
        &self,
        ctx: &StepContext<'a, N>,
        selector: &Selector,
        output: &mut Vec<StepContext<'a, N>>,
    ) -> PathResult<()> {
        match selector {
            Selector::Name(name) => {
                if let Some(child) = ctx.node.mapping_get(name) {
                    output.push(ctx.child_key(Rc::from(name.as_str()), child));
                }
            }
            Selector::Index(index) => {
                if ctx.node.kind() == NodeKind::Sequence {
                    let len = ctx.node.sequence_len() as i64;
                    let resolved = if *index < 0 { len + index } else { *index };
                    if (0..len).contains(&resolved) {
                        let resolved = resolved as usize;
                        if let Some(child) = ctx.node.sequence_at(resolved) {
                            output.push(ctx.child_index(resolved, child));
                        }
                    }
                }
            }
            Selector::Slice { start, end, step } => {
                if ctx.node.kind() == NodeKind::Sequence {
                    let len = ctx.node.sequence_len() as i64;
                    for index in slice_indices(*start, *end, step.unwrap_or(1), len) {
                        if let Some(child) = ctx.node.sequence_at(index) {
                            output.push(ctx.child_index(index, child));
                        }
                    }
                }
            }
            Selector::Wildcard => {
                output.extend(children_of(ctx));
            }
            Selector::Filter(expr) => {
                for child in children_of(ctx) {
                    if self.eval_filter_test(expr, &child)? {
                        output.push(child);
                    }
                }
            }
            Selector::ParentNode => {
                if let (Some(parent), Some(parent_chain)) = (ctx.parent, ctx.chain.parent()) {
                    let grandparent = parent_chain
                        .parent()
                        .and_then(|chain| resolve(self.root, &chain));
                    output.push(StepContext {
                        node: parent,
                        parent: grandparent,
                        chain: parent_chain,
                    });
                }
            }
            // `~` is materialized by the query surface after evaluation; it
            // never reaches selector application.
            Selector::KeyName => {}
        }
        Ok(())
    }
}

/// Children of a node in document order, with derived contexts
///
/// Mappings yield values in key order; sequences yield elements in index
/// order; scalars yield nothing.
pub(crate) fn children_of<'a, N: PathNode>(
    ctx: &StepContext<'a, N>,
) -> Vec<StepContext<'a, N>> {
    let mut children = Vec::new();
    match ctx.node.kind() {
        NodeKind::Mapping => {
            for key in ctx.node.mapping_keys() {
                if let Some(child) = ctx.node.mapping_get(key) {
                    children.push(ctx.child_key(Rc::from(key), child));
                }
            }
        }
        NodeKind::Sequence => {
            for index in 0..ctx.node.sequence_len() {
                if let Some(child) = ctx.node.sequence_at(index) {
                    children.push(ctx.child_index(index, child));
                }
            }
        }
        _ => {}
    }
    children
}

/// Collapse consecutive entries referring to the identical node
///
/// Applied after parent segments: `$.items[*]^` yields the `items` sequence
/// once, not once per element. Identity is reference identity, so equal but
/// distinct nodes survive.
fn collapse_consecutive<N: PathNode>(contexts: &mut Vec<StepContext<'_, N>>) {
    contexts.dedup_by(|a, b| std::ptr::eq(a.node as *const N, b.node as *const N));
}

/// Indices selected by an RFC 9535 slice over a sequence of length `len`
fn slice_indices(start: Option<i64>, end: Option<i64>, step: i64, len: i64) -> Vec<usize> {
    if step == 0 || len == 0 {
        return Vec::new();
    }
    let normalize = |i: i64| if i >= 0 { i } else { len + i };
    let mut indices = Vec::new();
    if step > 0 {
        let start = normalize(start.unwrap_or(0));
        let end = normalize(end.unwrap_or(len));
        let lower = start.clamp(0, len);
        let upper = end.clamp(0, len);
        let mut i = lower;
        while i < upper {
            indices.push(i as usize);
            i += step;
        }
    } else {
        let start = normalize(start.unwrap_or(len - 1));
        let end = end.map_or(-1 - len, normalize);
        let upper = start.clamp(-1, len - 1);
        let lower = end.clamp(-1, len - 1);
        let mut i = upper;
        while i > lower {
            indices.push(i as usize);
            i += step;
        }
    }
    indices
}
