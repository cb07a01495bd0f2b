//! Descendant segment expansion
//!
//! A descendant segment first replaces each node of the incoming nodelist by
//! the pre-order sequence of the node itself and all its descendants, in
//! document order; its selectors are then applied at every visited node. The
//! optional depth bound aborts the query rather than silently truncating.

use crate::error::{PathError, PathResult};
use crate::node::PathNode;

use super::context::StepContext;

/// Expand a nodelist to each node and all its descendants, pre-order
pub(crate) fn expand<'a, N: PathNode>(
    contexts: Vec<StepContext<'a, N>>,
    max_depth: Option<usize>,
) -> PathResult<Vec<StepContext<'a, N>>> {
    let mut output = Vec::new();
    for ctx in contexts {
        visit(ctx, 0, max_depth, &mut output)?;
    }
    Ok(output)
}

fn visit<'a, N: PathNode>(
    ctx: StepContext<'a, N>,
    depth: usize,
    max_depth: Option<usize>,
    output: &mut Vec<StepContext<'a, N>>,
) -> PathResult<()> {
    if let Some(limit) = max_depth {
        if depth > limit {
            tracing::warn!(
                target: "treepath::eval",
                limit,
                "descendant traversal exceeded configured depth bound"
            );
            return Err(PathError::depth_exceeded(limit));
        }
    }
    let children = super::children_of(&ctx);
    output.push(ctx);
    for child in children {
        visit(child, depth + 1, max_depth, output)?;
    }
    Ok(())
}
