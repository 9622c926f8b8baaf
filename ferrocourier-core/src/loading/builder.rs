use log::{info, warn};

use super::config::NetworkConfig;
use super::parser::deserialize_csv_file;
use super::raw_types::{RawEdge, RawNode};
use crate::{DeliveryGraph, Edge, Error, Node, NodeCategory};

/// Builds the delivery network from explicit nodes and edges
///
/// # Errors
///
/// `DuplicateNode` or `NodeNotFound` if nodes and edges are inconsistent
pub fn build_graph(nodes: Vec<Node>, edges: &[Edge]) -> Result<DeliveryGraph, Error> {
    let graph = DeliveryGraph::new(nodes, edges)?;

    let restaurants = graph.restaurants().len();
    let users = graph.users().len();
    info!(
        "Delivery network with {} nodes, {} edges, {restaurants} restaurants and {users} users",
        graph.node_count(),
        graph.edge_count(),
    );
    if restaurants == 0 || users == 0 {
        warn!("Network has no restaurants or no users, nothing can be assigned");
    }

    let isolated = graph
        .nodes()
        .filter(|node| {
            node.category() != NodeCategory::Blocked
                && graph.neighbors(node.id).is_ok_and(|n| n.is_empty())
        })
        .count();
    if isolated > 0 {
        warn!("{isolated} nodes have no edges and are unreachable from anywhere else");
    }

    Ok(graph)
}

/// Loads a delivery network from a nodes CSV and an edges CSV
///
/// # Errors
///
/// Returns an error if a file is missing, a row is malformed or the network
/// is inconsistent
pub fn load_network(config: &NetworkConfig) -> Result<DeliveryGraph, Error> {
    validate_config(config)?;

    info!("Reading nodes from {}", config.nodes_path.display());
    let raw_nodes: Vec<RawNode> = deserialize_csv_file(&config.nodes_path)?;
    let nodes = raw_nodes
        .into_iter()
        .map(Node::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    info!("Reading edges from {}", config.edges_path.display());
    let raw_edges: Vec<RawEdge> = deserialize_csv_file(&config.edges_path)?;
    let edges: Vec<Edge> = raw_edges.into_iter().map(Edge::from).collect();

    build_graph(nodes, &edges)
}

fn validate_config(config: &NetworkConfig) -> Result<(), Error> {
    for path in [&config.nodes_path, &config.edges_path] {
        if !path.exists() {
            return Err(Error::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Network file not found: {}", path.display()),
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::*;

    struct TempFiles {
        dir: PathBuf,
    }

    impl TempFiles {
        fn new(name: &str) -> Self {
            let dir = std::env::temp_dir().join(format!(
                "ferrocourier-{name}-{}",
                std::process::id()
            ));
            fs::create_dir_all(&dir).unwrap();
            Self { dir }
        }

        fn write(&self, file: &str, contents: &str) -> PathBuf {
            let path = self.dir.join(file);
            fs::write(&path, contents).unwrap();
            path
        }
    }

    impl Drop for TempFiles {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.dir);
        }
    }

    #[test]
    fn loads_csv_network() {
        let files = TempFiles::new("load");
        let nodes = files.write(
            "nodes.csv",
            "id,x,y,kind,label,name,emoji\n\
             0,0.0,0.0,street,,,\n\
             1,1.0,0.0,user,Home,,\n\
             2,2.0,0.0,restaurant,,Pizza,🍕\n\
             3,1.0,1.0,black,,,\n",
        );
        let edges = files.write("edges.csv", "source,target\n0,1\n1,2\n0,3\n");

        let graph = load_network(&NetworkConfig::new(nodes, edges)).unwrap();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.users(), vec![1]);
        assert_eq!(graph.restaurants(), vec![2]);
        assert_eq!(graph.node(3).unwrap().category(), NodeCategory::Blocked);
    }

    #[test]
    fn malformed_rows_are_reported() {
        let files = TempFiles::new("malformed");
        let nodes = files.write("nodes.csv", "id,x,y,kind\n0,zero,0.0,street\n");
        let edges = files.write("edges.csv", "source,target\n");
        let result = load_network(&NetworkConfig::new(nodes, edges));
        assert!(matches!(result, Err(Error::Csv(_))));
    }

    #[test]
    fn unknown_edge_endpoint_fails() {
        let files = TempFiles::new("dangling");
        let nodes = files.write("nodes.csv", "id,x,y,kind\n0,0.0,0.0,street\n");
        let edges = files.write("edges.csv", "source,target\n0,5\n");
        let result = load_network(&NetworkConfig::new(nodes, edges));
        assert!(matches!(result, Err(Error::NodeNotFound(5))));
    }

    #[test]
    fn missing_files_fail() {
        let config = NetworkConfig::new("/nonexistent/nodes.csv", "/nonexistent/edges.csv");
        assert!(matches!(load_network(&config), Err(Error::IoError(_))));
    }
}
