//! Abstract syntax tree for compiled path expressions
//!
//! A path is an anchor plus a sequence of segments; each segment applies a
//! non-empty list of selectors to every node of the incoming nodelist. Filter
//! selectors carry an expression tree with its own small grammar.

/// Anchor of a path: where evaluation starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathAnchor {
    /// `$` — the query root
    Root,
    /// `@` — the filter candidate (embedded paths only)
    Current,
    /// `@parent` — the filter candidate's container (extension)
    Parent,
}

/// A complete path expression
#[derive(Debug, Clone, PartialEq)]
pub struct PathExpr {
    pub anchor: PathAnchor,
    pub segments: Vec<Segment>,
}

/// How a segment walks the tree before applying its selectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Apply selectors to each node of the incoming nodelist
    Child,
    /// Expand each node to itself and all descendants first (`..`)
    Descendant,
}

/// One step of a path: a traversal kind plus its selectors
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub selectors: Vec<Selector>,
}

impl Segment {
    #[inline]
    #[must_use]
    pub fn child(selectors: Vec<Selector>) -> Self {
        Self {
            kind: SegmentKind::Child,
            selectors,
        }
    }

    #[inline]
    #[must_use]
    pub fn descendant(selectors: Vec<Selector>) -> Self {
        Self {
            kind: SegmentKind::Descendant,
            selectors,
        }
    }
}

/// A primitive selector within a segment
#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    /// Mapping key lookup
    Name(String),
    /// Sequence index; negative counts from the end
    Index(i64),
    /// RFC 9535 slice with optional bounds and step
    Slice {
        start: Option<i64>,
        end: Option<i64>,
        step: Option<i64>,
    },
    /// All children of the node
    Wildcard,
    /// Children passing a filter expression
    Filter(FilterExpr),
    /// The node's parent (`^`, extension)
    ParentNode,
    /// The key or stringified index by which the node was reached
    /// (`~`, extension, terminal)
    KeyName,
}

/// Scalar literal in a filter expression
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// Scalar context variables available inside filters (extensions)
///
/// `@root` and `@parent` are node-producing and are represented as
/// [`PathAnchor`]s instead, so `@root.a[0]` is ordinary path evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextVar {
    /// `@property` — key or stringified index of the candidate
    Property,
    /// `@index` — sequence index of the candidate, -1 outside sequences
    Index,
    /// `@path` — normalized path of the candidate
    Path,
    /// `@parentProperty` — traversal key of the candidate's container
    ParentProperty,
}

/// Filter expression tree
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpr {
    /// Short-circuit disjunction
    Or(Box<FilterExpr>, Box<FilterExpr>),
    /// Short-circuit conjunction
    And(Box<FilterExpr>, Box<FilterExpr>),
    /// Negation
    Not(Box<FilterExpr>),
    /// Comparison of two value-producing operands
    Compare {
        op: CompareOp,
        left: Box<FilterExpr>,
        right: Box<FilterExpr>,
    },
    /// Scalar literal
    Literal(Literal),
    /// Embedded relative or absolute path; an existence test in logical
    /// position, a singular-value projection in comparison position
    Path(PathExpr),
    /// Scalar context variable
    ContextVar(ContextVar),
    /// Function call
    Call { name: String, args: Vec<FilterExpr> },
}

impl PathExpr {
    /// Whether this path selects at most one node by construction
    ///
    /// Singular paths are child segments of single name or index selectors;
    /// RFC 9535 requires comparison operands to be singular.
    #[must_use]
    pub fn is_singular(&self) -> bool {
        self.segments.iter().all(|segment| {
            segment.kind == SegmentKind::Child
                && segment.selectors.len() == 1
                && matches!(
                    segment.selectors[0],
                    Selector::Name(_) | Selector::Index(_)
                )
        })
    }
}
