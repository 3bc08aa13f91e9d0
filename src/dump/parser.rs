//! The record parser is responsible for cutting the raw dump into per-node blocks
//! and extracting each block's fields into a [`NodeRecord`](super::record::NodeRecord).
//!
//! Parsing is purely textual. Every field is located independently by its label,
//! so the canonical field order is not enforced, and the extra lines real dumps
//! carry (such as `Children size: <n>`) match no label and are ignored. The parse
//! never fails: blocks without a parseable id are dropped, a missing `Type:` falls
//! back to the unknown sentinel, a missing `Val:` (or the literal value `None`)
//! means no value, and a missing `Children:` label means no children.

use once_cell::sync::Lazy;
use regex::Regex;

use super::record::{NodeId, NodeRecord, UNKNOWN_TYPE};

/// Every block opens with this token sequence at the start of a line.
const BLOCK_MARKER: &str = "AstNode";

/// Literal `Val:` payload that encodes the absence of a value.
const NO_VALUE: &str = "None";

static BLOCK_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^AstNode #").unwrap());
static NODE_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"AstNode #(\d+)").unwrap());
static NODE_TYPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Type: (\w+)").unwrap());
static NODE_VAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"Val: ([\w.]+)").unwrap());
/// Everything from the `Children:` label to the end of the block.
static CHILD_LIST: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)Children:(.*)").unwrap());
static CHILD_REF: Lazy<Regex> = Lazy::new(|| Regex::new(r"#(\d+)").unwrap());

/// The record parser turns the whole dump text into a sequence of records,
/// one per well-formed block, in dump order.
pub struct RecordParser<'a> {
    source: &'a str,
}

impl<'a> RecordParser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source }
    }

    /// Parse the dump into records. Blocks that do not open with the marker or
    /// carry no parseable id are dropped silently.
    pub fn parse(&self) -> Vec<NodeRecord> {
        self.blocks()
            .into_iter()
            .filter_map(|block| self.parse_block(block))
            .collect()
    }

    /// Split the dump into blocks. A block starts wherever a line opening with
    /// `AstNode #` follows a blank line; the very first block is exempt from
    /// the blank-line requirement.
    fn blocks(&self) -> Vec<&'a str> {
        let src = self.source.trim();
        let mut starts = vec![0];
        for marker in BLOCK_START.find_iter(src) {
            if marker.start() > 0 && src[..marker.start()].ends_with("\n\n") {
                starts.push(marker.start());
            }
        }
        let mut blocks = Vec::with_capacity(starts.len());
        for (i, &start) in starts.iter().enumerate() {
            let end = starts.get(i + 1).copied().unwrap_or_else(|| src.len());
            blocks.push(&src[start..end]);
        }
        blocks
    }

    /// Extract one record from a block, or `None` if the block is skipped.
    fn parse_block(&self, block: &str) -> Option<NodeRecord> {
        if !block.starts_with(BLOCK_MARKER) {
            return None;
        }
        let id: NodeId = NODE_ID
            .captures(block)
            .and_then(|caps| caps.get(1))
            .and_then(|id| id.as_str().parse().ok())?;
        let typ = NODE_TYPE
            .captures(block)
            .and_then(|caps| caps.get(1))
            .map_or(UNKNOWN_TYPE, |m| m.as_str())
            .to_string();
        let val = NODE_VAL
            .captures(block)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .filter(|val| val != NO_VALUE);
        let children = match CHILD_LIST.captures(block).and_then(|caps| caps.get(1)) {
            Some(rest) => CHILD_REF
                .captures_iter(rest.as_str())
                .filter_map(|caps| caps[1].parse().ok())
                .collect(),
            None => Vec::new(),
        };
        Some(NodeRecord::new(id, typ, val, children))
    }
}
