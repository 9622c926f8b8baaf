use std::fmt;

use thiserror::Error;

use crate::NodeId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Node {0} not found in the network")]
    NodeNotFound(NodeId),
    #[error("Duplicate node id {0}")]
    DuplicateNode(NodeId),
    #[error("Invalid transport input: {0}")]
    InvalidTransportInput(String),
    #[error(
        "Numerical degeneracy at iteration {iteration}: {axis} {index} scaling divides by zero"
    )]
    NumericalDegeneracy {
        iteration: usize,
        axis: Axis,
        index: usize,
    },
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Side of the transport plan a scaling vector belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => f.write_str("row"),
            Axis::Column => f.write_str("column"),
        }
    }
}
