use serde::Deserialize;

use crate::{Edge, Error, Node, NodeCategory, NodeId, NodeKind};

/// Node row as found in a nodes file or scenario
#[derive(Debug, Clone, Deserialize)]
pub struct RawNode {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    pub kind: NodeCategory,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub emoji: Option<String>,
}

/// Edge row as found in an edges file
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawEdge {
    pub source: NodeId,
    pub target: NodeId,
}

impl TryFrom<RawNode> for Node {
    type Error = Error;

    fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
        if !raw.x.is_finite() || !raw.y.is_finite() {
            return Err(Error::InvalidData(format!(
                "node {} has a non-finite position",
                raw.id
            )));
        }

        let kind = match raw.kind {
            NodeCategory::Street => NodeKind::Street,
            NodeCategory::Blocked => NodeKind::Blocked,
            NodeCategory::User => NodeKind::User {
                label: non_empty(raw.label).ok_or_else(|| {
                    Error::InvalidData(format!("user node {} has no label", raw.id))
                })?,
            },
            NodeCategory::Restaurant => NodeKind::Restaurant {
                name: non_empty(raw.name).ok_or_else(|| {
                    Error::InvalidData(format!("restaurant node {} has no name", raw.id))
                })?,
                emoji: non_empty(raw.emoji),
            },
        };

        Ok(Node::new(raw.id, raw.x, raw.y, kind))
    }
}

impl From<RawEdge> for Edge {
    fn from(raw: RawEdge) -> Self {
        Edge::new(raw.source, raw.target)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(kind: NodeCategory) -> RawNode {
        RawNode {
            id: 1,
            x: 0.5,
            y: 0.25,
            kind,
            label: None,
            name: None,
            emoji: None,
        }
    }

    #[test]
    fn metadata_is_required_per_category() {
        assert!(matches!(
            Node::try_from(raw(NodeCategory::User)),
            Err(Error::InvalidData(_))
        ));
        assert!(matches!(
            Node::try_from(raw(NodeCategory::Restaurant)),
            Err(Error::InvalidData(_))
        ));
        assert_eq!(
            Node::try_from(raw(NodeCategory::Street)).unwrap(),
            Node::street(1, 0.5, 0.25)
        );
    }

    #[test]
    fn restaurant_keeps_emoji() {
        let mut row = raw(NodeCategory::Restaurant);
        row.name = Some("Pizza Palace".to_string());
        row.emoji = Some("🍕".to_string());
        let node = Node::try_from(row).unwrap();
        assert_eq!(
            node.kind,
            NodeKind::Restaurant {
                name: "Pizza Palace".to_string(),
                emoji: Some("🍕".to_string()),
            }
        );
    }

    #[test]
    fn blank_label_counts_as_missing() {
        let mut row = raw(NodeCategory::User);
        row.label = Some("  ".to_string());
        assert!(Node::try_from(row).is_err());
    }
}
