pub mod dump;
pub mod error;
pub mod visualize;
