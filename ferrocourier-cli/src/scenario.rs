//! TOML scenario files: a delivery network plus solver settings.

use std::path::Path;

use anyhow::Context;
use ferrocourier_core::loading::RawNode;
use ferrocourier_core::prelude::*;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub edges: Vec<(NodeId, NodeId)>,
    #[serde(default)]
    pub unreachable_penalty: Option<f64>,
    #[serde(default)]
    pub solver: SinkhornConfig,
    pub nodes: Vec<RawNode>,
}

impl Scenario {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing scenario {}", path.display()))
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn graph(&self) -> anyhow::Result<DeliveryGraph> {
        let nodes = self
            .nodes
            .iter()
            .cloned()
            .map(Node::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let edges: Vec<Edge> = self.edges.iter().copied().map(Edge::from).collect();
        Ok(build_graph(nodes, &edges)?)
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            sinkhorn: self.solver,
            unreachable_penalty: self.unreachable_penalty,
        }
    }
}
