use std::{error::Error, fmt, fmt::Display};

#[derive(Debug, PartialEq)]
pub enum AstVizError {
    /// The dump never mentions the root ID, neither as a record of its own
    /// nor as a child reference. Nothing can be rendered.
    NoRoot,
    /// The Graphviz export step failed. Recoverable: the text rendering
    /// produced before it remains valid.
    Export { msg: String },
}

impl Display for AstVizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AstVizError::NoRoot => write!(f, "Failed to parse AST"),
            AstVizError::Export { msg } => write!(f, "Failed to generate image: {}", msg),
        }
    }
}

impl Error for AstVizError {
    fn description(&self) -> &str {
        match self {
            AstVizError::NoRoot => "Failed to parse AST",
            AstVizError::Export { msg } => msg,
        }
    }
}
