//! This module is responsible for loading delivery networks from CSV files
//! and building the routing graph.

mod builder;
mod config;
mod parser;
mod raw_types;

pub use builder::{build_graph, load_network};
pub use config::NetworkConfig;
pub use parser::deserialize_csv_file;
pub use raw_types::{RawEdge, RawNode};
