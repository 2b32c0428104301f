use super::tree::StandardSplit;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    External {
        id: usize,
        depth: usize,
        n_samples: usize,
    },
    Internal {
        id: usize,
        split_params: StandardSplit,
        children: Vec<usize>,
        depth: usize,
        n_samples: usize,
    },
}
impl Node {
    pub fn get_id(&self) -> usize {
        match self {
            Node::External { id, .. } => *id,
            Node::Internal { id, .. } => *id,
        }
    }
    pub fn get_n_samples(&self) -> usize {
        match self {
            Node::External { n_samples, .. } => *n_samples,
            Node::Internal { n_samples, .. } => *n_samples,
        }
    }
    pub fn get_depth(&self) -> usize {
        match self {
            Node::External { depth, .. } => *depth,
            Node::Internal { depth, .. } => *depth,
        }
    }
    pub fn get_children(&self) -> &[usize] {
        match self {
            Node::External { .. } => &[],
            Node::Internal { children, .. } => children,
        }
    }
    pub fn is_external(&self) -> bool {
        matches!(self, Node::External { .. })
    }
}
