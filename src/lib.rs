//! # treepath
//!
//! An RFC 9535 JSONPath engine with the JSONPath Plus extension set,
//! evaluated over JSON/YAML-shaped document trees through a read-only
//! adapter.
//!
//! A path expression is compiled once into an immutable [`Path`] and then
//! queried against any tree implementing [`PathNode`]; an implementation for
//! `serde_json::Value` is bundled. Queries return an ordered [`Nodelist`] of
//! matches, each carrying its RFC 9535 normalized path.
//!
//! Beyond the RFC, the default mode supports:
//!
//! - context variables in filters: `@property`, `@index`, `@path`,
//!   `@parent`, `@parentProperty`, `@root`
//! - the `^` parent selector and the terminal `~` key-name selector
//! - `===`/`!==` as synonyms for `==`/`!=`
//! - type-test functions: `isNull`, `isBoolean`, `isNumber`, `isInteger`,
//!   `isString`, `isArray`, `isObject`
//!
//! [`QueryOptions::with_strict_rfc9535`] turns every extension off, making
//! their use a compile-time error.
//!
//! ## Example
//!
//! ```
//! use serde_json::json;
//! use treepath::Path;
//!
//! let doc = json!({
//!     "store": {
//!         "book": [
//!             {"title": "Book 1", "price": 10},
//!             {"title": "Book 2", "price": 20}
//!         ]
//!     }
//! });
//!
//! let path = Path::compile("$.store.book[?(@.price > 15)].title")?;
//! let matches = path.query(&doc)?;
//! assert_eq!(matches.len(), 1);
//! assert_eq!(matches[0].node().and_then(|n| n.as_str()), Some("Book 2"));
//! assert_eq!(matches[0].path(), "$['store']['book'][1]['title']");
//! # Ok::<(), treepath::PathError>(())
//! ```

pub mod ast;
pub mod config;
pub mod error;
pub mod node;
pub mod path;
pub mod tokens;

mod eval;
mod normalized;
mod parser;
mod tokenizer;
mod typer;

pub use config::{QueryOptions, RegexEngine};
pub use error::{ErrorKind, PathError, PathResult};
pub use node::{NodeKind, PathNode};
pub use path::{compile, Match, Nodelist, Path};
