//! Structs and functions concerned with generating graphs with Graphviz and DOT language.

use std::fmt::{self, Display};

pub struct Graph {
    name: String,
    pub is_directed: bool,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new(name: &str, is_directed: bool) -> Self {
        Graph {
            name: name.to_string(),
            is_directed,
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn add_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn add_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    pub fn as_dot<W: fmt::Write>(&self, writer: &mut W) -> fmt::Result {
        write!(writer, "{}", self)
    }
}

impl Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let graph_type = if self.is_directed { "digraph" } else { "graph" };
        writeln!(f, "{} {} {{", graph_type, &self.name)?;
        for node in self.nodes.iter() {
            writeln!(f, "\t{}", node)?;
        }
        for edge in self.edges.iter() {
            writeln!(f, "\t{}", edge)?;
        }
        write!(f, "}}")
    }
}

pub struct Node {
    id: String,
    label: Option<String>,
    /// Extra DOT attributes, already in `key=value, key=value` form.
    attrs: Option<String>,
}

impl Node {
    pub fn new(id: &str, label: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            label: label.map(|l| l.to_string()),
            attrs: None,
        }
    }

    pub fn with_attrs(id: &str, label: Option<&str>, attrs: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.map(|l| l.to_string()),
            attrs: Some(attrs.to_string()),
        }
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (&self.label, &self.attrs) {
            (Some(l), Some(a)) => write!(f, "{} [ label=\"{}\", {} ];", self.id, l, a),
            (Some(l), None) => write!(f, "{} [ label=\"{}\" ];", self.id, l),
            (None, Some(a)) => write!(f, "{} [ {} ];", self.id, a),
            (None, None) => write!(f, "{};", self.id),
        }
    }
}

pub struct Edge {
    from: String,
    to: String,
    is_directed: bool,
}

impl Edge {
    pub fn new(from: &str, to: &str, is_directed: bool) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            is_directed,
        }
    }
}

impl Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {};",
            self.from,
            if self.is_directed { "->" } else { "--" },
            self.to
        )
    }
}

#[cfg(test)]
mod test {
    use super::{Edge, Graph, Node};

    #[test]
    fn test_empty_graph() {
        let empty_graph = Graph::new("empty", true);
        let mut buf = String::new();
        empty_graph.as_dot(&mut buf).unwrap();

        assert_eq!(buf, "digraph empty {\n}");
    }

    #[test]
    fn test_directed_graph() {
        let mut graph = Graph::new("g", true);
        graph.add_node(Node::new("node0", Some("a")));
        graph.add_node(Node::new("node1", None));
        graph.add_edge(Edge::new("node0", "node1", true));

        let mut buf = String::new();
        graph.as_dot(&mut buf).unwrap();
        assert_eq!(
            buf,
            "digraph g {\n\tnode0 [ label=\"a\" ];\n\tnode1;\n\tnode0 -> node1;\n}"
        );
    }

    #[test]
    fn test_node_with_attrs() {
        let node = Node::with_attrs("node3", Some("#3 RETURN"), "shape=box, style=filled");
        assert_eq!(
            node.to_string(),
            "node3 [ label=\"#3 RETURN\", shape=box, style=filled ];"
        );
    }

    #[test]
    fn test_undirected_edge() {
        let edge = Edge::new("node0", "node1", false);
        assert_eq!(edge.to_string(), "node0 -- node1;");
    }
}
