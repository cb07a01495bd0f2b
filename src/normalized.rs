//! Normalized path construction and rendering
//!
//! Every traversal context carries an [`Rc`]-linked chain of steps from the
//! root. Chains share their prefixes, so extending a nodelist during
//! pre-order traversal allocates one link per emitted node, and the canonical
//! string form is only rendered when a path is actually observed (`@path`,
//! `Match::path`).

use std::fmt::Write as _;
use std::rc::Rc;

/// One traversal step: a mapping key or a sequence index
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Step {
    Key(Rc<str>),
    Index(usize),
}

#[derive(Debug)]
struct Link {
    parent: StepChain,
    step: Step,
}

/// Prefix-shared chain of steps from the document root
///
/// The empty chain denotes the root itself.
#[derive(Debug, Clone)]
pub(crate) struct StepChain(Option<Rc<Link>>);

impl StepChain {
    /// Chain for the document root (`$`)
    #[inline]
    pub(crate) fn root() -> Self {
        StepChain(None)
    }

    /// Extend the chain by a mapping key
    #[inline]
    pub(crate) fn push_key(&self, key: Rc<str>) -> Self {
        StepChain(Some(Rc::new(Link {
            parent: self.clone(),
            step: Step::Key(key),
        })))
    }

    /// Extend the chain by a sequence index
    #[inline]
    pub(crate) fn push_index(&self, index: usize) -> Self {
        StepChain(Some(Rc::new(Link {
            parent: self.clone(),
            step: Step::Index(index),
        })))
    }

    /// The last step, if any
    #[inline]
    pub(crate) fn last(&self) -> Option<&Step> {
        self.0.as_deref().map(|link| &link.step)
    }

    /// The chain with its last step removed; `None` at the root
    #[inline]
    pub(crate) fn parent(&self) -> Option<StepChain> {
        self.0.as_deref().map(|link| link.parent.clone())
    }

    /// Steps from the root, in traversal order
    pub(crate) fn steps(&self) -> Vec<Step> {
        let mut steps = Vec::new();
        let mut cursor = self.0.as_deref();
        while let Some(link) = cursor {
            steps.push(link.step.clone());
            cursor = link.parent.0.as_deref();
        }
        steps.reverse();
        steps
    }

    /// Render the RFC 9535 normalized form, e.g. `$['store']['book'][0]`
    pub(crate) fn render(&self) -> String {
        let mut out = String::from("$");
        for step in self.steps() {
            match step {
                Step::Key(key) => {
                    out.push_str("['");
                    escape_member(&key, &mut out);
                    out.push_str("']");
                }
                Step::Index(index) => {
                    let _ = write!(out, "[{index}]");
                }
            }
        }
        out
    }
}

impl Step {
    /// The step as the string seen by `@property` and `~`
    pub(crate) fn as_property(&self) -> String {
        match self {
            Step::Key(key) => key.to_string(),
            Step::Index(index) => index.to_string(),
        }
    }
}

/// Escape a member name for single-quoted normalized form
///
/// Printable ASCII passes through except `'` and `\`; everything else becomes
/// `\uXXXX`, with surrogate pairs for characters beyond the BMP.
fn escape_member(name: &str, out: &mut String) {
    for c in name.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\u{20}'..='\u{7e}' => out.push(c),
            c => {
                let code = c as u32;
                if code <= 0xFFFF {
                    let _ = write!(out, "\\u{code:04x}");
                } else {
                    let reduced = code - 0x10000;
                    let high = 0xD800 + (reduced >> 10);
                    let low = 0xDC00 + (reduced & 0x3FF);
                    let _ = write!(out, "\\u{high:04x}\\u{low:04x}");
                }
            }
        }
    }
}
