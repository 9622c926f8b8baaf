use std::path::PathBuf;

/// Location of the CSV files describing a delivery network
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// `id,x,y,kind,label,name,emoji`
    pub nodes_path: PathBuf,
    /// `source,target`
    pub edges_path: PathBuf,
}

impl NetworkConfig {
    pub fn new(nodes_path: impl Into<PathBuf>, edges_path: impl Into<PathBuf>) -> Self {
        Self {
            nodes_path: nodes_path.into(),
            edges_path: edges_path.into(),
        }
    }
}
