use std::path::PathBuf;

use ferrocourier_core::loading::RawNode;
use ferrocourier_core::prelude::*;
use pyo3::prelude::*;
use pyo3_stub_gen::derive::{gen_stub_pyclass, gen_stub_pyfunction, gen_stub_pymethods};

use crate::error::to_py_err;

/// Node row accepted from Python: `(id, x, y, kind, label)`.
/// `label` is the user label or the restaurant name.
pub type NodeTuple = (NodeId, f64, f64, String, Option<String>);

/// DeliveryGraph
///
/// Undirected street network with restaurants, delivery points and
/// impassable (blocked) intersections. Edge lengths are the Euclidean
/// distances between node positions.
///
/// Example:
///
/// .. code-block:: python
///
///     graph = create_delivery_graph(
///         [(0, 0.0, 0.0, "restaurant", "Pizza"), (1, 1.0, 0.0, "user", "Home")],
///         [(0, 1)],
///     )
///     route = shortest_path(graph, 0, 1)
#[gen_stub_pyclass]
#[pyclass(name = "DeliveryGraph")]
pub struct PyDeliveryGraph {
    pub(crate) graph: DeliveryGraph,
}

#[gen_stub_pymethods]
#[pymethods]
impl PyDeliveryGraph {
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Restaurant ids in insertion order
    pub fn restaurants(&self) -> Vec<NodeId> {
        self.graph.restaurants()
    }

    /// User ids in insertion order
    pub fn users(&self) -> Vec<NodeId> {
        self.graph.users()
    }

    /// Ids adjacent to `node_id`, ascending
    pub fn neighbors(&self, node_id: NodeId) -> PyResult<Vec<NodeId>> {
        let neighbors = self.graph.neighbors(node_id).map_err(to_py_err)?;
        Ok(neighbors.into_iter().collect())
    }

    /// Euclidean distance between two nodes
    pub fn weight(&self, a: NodeId, b: NodeId) -> PyResult<f64> {
        self.graph.weight(a, b).map_err(to_py_err)
    }

    /// Restaurant name or user label, `#id` for other nodes
    pub fn display_name(&self, node_id: NodeId) -> PyResult<String> {
        let node = self.graph.node(node_id).map_err(to_py_err)?;
        Ok(node.display_name())
    }

    fn __repr__(&self) -> String {
        format!(
            "DeliveryGraph with {} nodes, {} edges, {} restaurants and {} users",
            self.graph.node_count(),
            self.graph.edge_count(),
            self.graph.restaurants().len(),
            self.graph.users().len()
        )
    }

    fn __str__(&self) -> String {
        self.__repr__()
    }
}

/// Create a delivery network from node and edge lists
///
/// Parameters
/// ----------
/// nodes : list[tuple[int, float, float, str, str | None]]
///     ``(id, x, y, kind, label)`` rows. ``kind`` is one of ``street``,
///     ``user``, ``restaurant`` or ``blocked``. ``label`` is required for
///     users and restaurants.
/// edges : list[tuple[int, int]]
///     Undirected connections between node ids
///
/// Returns
/// -------
/// DeliveryGraph
///
/// Raises
/// ------
/// ValueError
///     On unknown kinds, duplicate ids or edges to unknown nodes
#[gen_stub_pyfunction]
#[pyfunction(name = "create_delivery_graph")]
pub fn py_create_delivery_graph(
    nodes: Vec<NodeTuple>,
    edges: Vec<(NodeId, NodeId)>,
) -> PyResult<PyDeliveryGraph> {
    let nodes = nodes
        .into_iter()
        .map(node_from_tuple)
        .collect::<Result<Vec<_>, _>>()
        .map_err(to_py_err)?;
    let edges: Vec<Edge> = edges.into_iter().map(Edge::from).collect();

    let graph = build_graph(nodes, &edges).map_err(to_py_err)?;
    Ok(PyDeliveryGraph { graph })
}

/// Load a delivery network from a nodes CSV and an edges CSV
///
/// Parameters
/// ----------
/// nodes_path : str
///     CSV with an ``id,x,y,kind,label,name,emoji`` header
/// edges_path : str
///     CSV with a ``source,target`` header
///
/// Raises
/// ------
/// OSError
///     If a file cannot be read
/// ValueError
///     If a row is malformed or the network is inconsistent
///
/// Notes
/// -----
/// The function releases the GIL while reading the files.
#[gen_stub_pyfunction]
#[pyfunction(name = "load_delivery_graph")]
pub fn py_load_delivery_graph(
    py: Python<'_>,
    nodes_path: &str,
    edges_path: &str,
) -> PyResult<PyDeliveryGraph> {
    let config = NetworkConfig::new(PathBuf::from(nodes_path), PathBuf::from(edges_path));
    let graph = py.detach(|| load_network(&config)).map_err(to_py_err)?;
    Ok(PyDeliveryGraph { graph })
}

fn node_from_tuple((id, x, y, kind, label): NodeTuple) -> Result<Node, Error> {
    let kind = match kind.to_lowercase().as_str() {
        "street" => NodeCategory::Street,
        "user" => NodeCategory::User,
        "restaurant" => NodeCategory::Restaurant,
        "blocked" | "black" => NodeCategory::Blocked,
        other => {
            return Err(Error::InvalidData(format!(
                "node {id} has unknown kind '{other}'"
            )));
        }
    };

    let raw = RawNode {
        id,
        x,
        y,
        kind,
        label: label.clone().filter(|_| kind == NodeCategory::User),
        name: label.filter(|_| kind == NodeCategory::Restaurant),
        emoji: None,
    };
    Node::try_from(raw)
}
