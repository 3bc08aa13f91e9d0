//! Rendering of a reconstructed tree: an indented text view for the terminal
//! and a Graphviz DOT graph that can be rasterized to an image file.

use self::graph::{Edge, Graph, Node};
use crate::dump::record::NodeId;
use crate::dump::tree::{AstTree, TreeNode, ROOT_ID};
use crate::error::AstVizError;

use phf::phf_map;
use std::collections::HashSet;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

pub mod graph;

/// Fill colors for the exported boxes, keyed by the type tags the producing
/// compiler emits. Declarations, statement-level nodes and leaf values each
/// get their own shade; unresolved forward references are grayed out.
static NODE_FILLS: phf::Map<&'static str, &'static str> = phf_map! {
    "CLASS" => "lightgoldenrod1",
    "CONSTRUCTOR" => "lightgoldenrod1",
    "METHOD" => "lightgoldenrod1",
    "FUNCTION" => "lightgoldenrod1",
    "FUNC_DEF" => "lightgoldenrod1",
    "STATEMENTS" => "lightsalmon",
    "LET" => "lightsalmon",
    "DO" => "lightsalmon",
    "IF" => "lightsalmon",
    "ELSE" => "lightsalmon",
    "WHILE" => "lightsalmon",
    "RETURN" => "lightsalmon",
    "IDENTIFIER" => "palegreen",
    "NUMBER" => "palegreen",
    "TRUE" => "palegreen",
    "FALSE" => "palegreen",
    "NULL" => "palegreen",
    "placeholder" => "lightgrey",
};

/// Everything else, including the unknown-type sentinel.
const DEFAULT_FILL: &str = "lightblue";

/// DOT attribute list for a node with the given type tag.
fn node_style(typ: &str) -> String {
    let fill = NODE_FILLS.get(typ).copied().unwrap_or(DEFAULT_FILL);
    format!("shape=box, style=filled, fillcolor={}", fill)
}

/// Renders the tree as indented text, parent-first, children in stored order,
/// with connector glyphs showing depth and siblinghood. Returns the empty
/// string when the tree has no root.
pub fn render_text(tree: &AstTree) -> String {
    let mut out = String::new();
    if let Some(root) = tree.root() {
        let mut visited = HashSet::new();
        visited.insert(ROOT_ID);
        out.push_str(&root.label);
        out.push('\n');
        render_children(tree, root, "", &mut visited, &mut out);
    }
    out
}

fn render_children(
    tree: &AstTree,
    node: &TreeNode,
    prefix: &str,
    visited: &mut HashSet<NodeId>,
    out: &mut String,
) {
    for (i, &child_id) in node.children.iter().enumerate() {
        let child = match tree.get(child_id) {
            Some(child) => child,
            None => continue,
        };
        // A node reached twice means the input smuggled in a cycle; cut the
        // walk short instead of looping.
        if !visited.insert(child_id) {
            continue;
        }
        let (branch, pad) = if i + 1 == node.children.len() {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };
        out.push_str(prefix);
        out.push_str(branch);
        out.push_str(&child.label);
        out.push('\n');
        render_children(tree, child, &format!("{}{}", prefix, pad), visited, out);
    }
}

/// Builds a Graphviz DOT graph from a tree and hands it to the `dot`
/// executable for rasterization.
pub struct Visualizer {
    /// Graph that will be filled.
    pub graph: Graph,
}

impl Visualizer {
    const NODE_NAME_PREFIX: &'static str = "node";

    pub fn new(graph_name: &str, is_directed: bool) -> Self {
        Self {
            graph: Graph::new(graph_name, is_directed),
        }
    }

    /// Walks the tree from its root and emits one DOT node per reachable tree
    /// node and one edge per parent/child link. Without a root the graph
    /// stays empty.
    pub fn visualize_tree(&mut self, tree: &AstTree) {
        if tree.root().is_some() {
            let mut visited = HashSet::new();
            self.visit(tree, ROOT_ID, &mut visited);
        }
    }

    fn visit(&mut self, tree: &AstTree, id: NodeId, visited: &mut HashSet<NodeId>) {
        if !visited.insert(id) {
            return;
        }
        let node = match tree.get(id) {
            Some(node) => node,
            None => return,
        };
        self.add_node(id, node);
        for &child_id in &node.children {
            if !tree.contains(child_id) || visited.contains(&child_id) {
                continue;
            }
            self.add_edge(id, child_id);
            self.visit(tree, child_id, visited);
        }
    }

    fn add_node(&mut self, id: NodeId, node: &TreeNode) {
        let name = format!("{}{}", Visualizer::NODE_NAME_PREFIX, id);
        self.graph
            .add_node(Node::with_attrs(&name, Some(&node.label), &node_style(&node.typ)));
    }

    fn add_edge(&mut self, from: NodeId, to: NodeId) {
        self.graph.add_edge(Edge::new(
            &format!("{}{}", Visualizer::NODE_NAME_PREFIX, from),
            &format!("{}{}", Visualizer::NODE_NAME_PREFIX, to),
            self.graph.is_directed,
        ));
    }

    /// Renders the graph to an image file by piping the DOT text through the
    /// `dot` executable. The output format is taken from the file extension,
    /// falling back to PNG. Every failure mode is reported as a recoverable
    /// export error; the text rendering produced before stays valid.
    pub fn write_to_image(&self, outfile: &str) -> Result<(), AstVizError> {
        let mut buf = String::new();
        self.graph
            .as_dot(&mut buf)
            .map_err(|err| export_err(format!("{}", err)))?;

        let format = Path::new(outfile)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("png");
        let mut dot = Command::new("dot")
            .arg(format!("-T{}", format))
            .arg("-o")
            .arg(outfile)
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|err| export_err(format!("could not run dot ({})", err)))?;

        // The pipe has to close before waiting, so the write happens in its
        // own scope and its result is checked after the child exits.
        let piped = match dot.stdin.take() {
            Some(mut stdin) => stdin.write_all(buf.as_bytes()),
            None => Ok(()),
        };
        let status = dot
            .wait()
            .map_err(|err| export_err(format!("could not wait for dot ({})", err)))?;
        piped.map_err(|err| export_err(format!("could not stream DOT to dot ({})", err)))?;
        if !status.success() {
            return Err(export_err(format!("dot exited with {}", status)));
        }
        Ok(())
    }
}

fn export_err(msg: String) -> AstVizError {
    AstVizError::Export { msg }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dump::{assembler::Assembler, parser::RecordParser};
    use pretty_assertions::assert_eq;

    fn tree(src: &str) -> AstTree {
        Assembler::new()
            .assemble(RecordParser::new(src).parse())
            .unwrap()
    }

    #[test]
    fn test_render_single_child() {
        let tree = tree(
            "AstNode #0\nType: Program\nVal: None\nChildren: #1\n\n\
             AstNode #1\nType: Literal\nVal: 42\nChildren:\n",
        );
        assert_eq!(render_text(&tree), "#0 Program\n└── #1 Literal (42)\n");
    }

    #[test]
    fn test_render_nested_siblings() {
        let tree = tree(
            "AstNode #0\nType: CLASS\nVal: Main\nChildren: #1 #2\n\n\
             AstNode #1\nType: STATEMENTS\nChildren: #3\n\n\
             AstNode #2\nType: RETURN\nChildren:\n\n\
             AstNode #3\nType: NUMBER\nVal: 7\nChildren:\n",
        );
        assert_eq!(
            render_text(&tree),
            "#0 CLASS (Main)\n\
             ├── #1 STATEMENTS\n\
             │   └── #3 NUMBER (7)\n\
             └── #2 RETURN\n"
        );
    }

    #[test]
    fn test_render_forward_reference() {
        let tree = tree("AstNode #0\nType: Program\nChildren: #5\n");
        assert_eq!(render_text(&tree), "#0 Program\n└── #5 [placeholder]\n");
    }

    #[test]
    fn test_render_without_root_is_empty() {
        assert_eq!(render_text(&AstTree::new()), "");
    }

    #[test]
    fn test_unreachable_fragment_is_not_rendered() {
        let tree = tree(
            "AstNode #0\nType: Program\nChildren:\n\n\
             AstNode #9\nType: Literal\nVal: 3\nChildren:\n",
        );
        assert_eq!(render_text(&tree), "#0 Program\n");
    }

    #[test]
    fn test_cyclic_claims_render_finitely() {
        // Node 1 claims the root back; the walk cuts off at the revisit.
        let tree = tree(
            "AstNode #0\nType: Program\nChildren: #1\n\n\
             AstNode #1\nType: Statements\nChildren: #0\n",
        );
        assert_eq!(render_text(&tree), "#0 Program\n└── #1 Statements\n");
    }

    #[test]
    fn test_graph_dot_output() {
        let tree = tree(
            "AstNode #0\nType: Program\nVal: None\nChildren: #1\n\n\
             AstNode #1\nType: Literal\nVal: 42\nChildren:\n",
        );
        let mut viz = Visualizer::new("ast", true);
        viz.visualize_tree(&tree);
        let mut buf = String::new();
        viz.graph.as_dot(&mut buf).unwrap();
        assert_eq!(
            buf,
            "digraph ast {\n\
             \tnode0 [ label=\"#0 Program\", shape=box, style=filled, fillcolor=lightblue ];\n\
             \tnode1 [ label=\"#1 Literal (42)\", shape=box, style=filled, fillcolor=lightblue ];\n\
             \tnode0 -> node1;\n\
             }"
        );
    }

    #[test]
    fn test_graph_without_root_is_empty() {
        let mut viz = Visualizer::new("ast", true);
        viz.visualize_tree(&AstTree::new());
        let mut buf = String::new();
        viz.graph.as_dot(&mut buf).unwrap();
        assert_eq!(buf, "digraph ast {\n}");
    }

    #[test]
    fn test_node_style_categories() {
        assert_eq!(node_style("CLASS"), "shape=box, style=filled, fillcolor=lightgoldenrod1");
        assert_eq!(node_style("RETURN"), "shape=box, style=filled, fillcolor=lightsalmon");
        assert_eq!(node_style("NUMBER"), "shape=box, style=filled, fillcolor=palegreen");
        assert_eq!(node_style("placeholder"), "shape=box, style=filled, fillcolor=lightgrey");
        assert_eq!(node_style("Program"), "shape=box, style=filled, fillcolor=lightblue");
    }
}
