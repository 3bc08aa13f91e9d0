//! The dump module contains everything that is concerned with turning a textual
//! AST dump back into an in-memory tree.
//!
//! # Record parser
//! Firstly the record parser is responsible for splitting the dump into per-node
//! blocks and extracting each node's id, type tag, optional value and child
//! references into the records defined in the record module.
//! ### Example
//! ```rust
//! use astviz::dump::parser::RecordParser;
//! let records = RecordParser::new("AstNode #0\nType: Program\nChildren:").parse();
//! ```
//! `parse` never fails; blocks without a parseable id are dropped and missing
//! fields fall back to their defaults.
//!
//! # Tree assembler
//! The assembler module is responsible for consuming the records, in dump order,
//! and folding them into a single tree rooted at the conventional root id. Child
//! references that precede their own record become placeholder nodes which are
//! resolved in place once the real record shows up.
//! ### Example
//! ```rust
//! use astviz::dump::{assembler::Assembler, parser::RecordParser};
//! let records = RecordParser::new("AstNode #0\nType: Program\nChildren:").parse();
//! let tree = Assembler::new().assemble(records);
//! ```
//! The assembler returns either the finished tree or an error informing the user
//! that the dump never mentions the root id.

pub mod assembler;
pub mod parser;
pub mod record;
pub mod tree;
