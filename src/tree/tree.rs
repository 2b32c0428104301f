use crate::error::{ForestError, Result};
use crate::tree::node::Node;
use crate::utils::dataset::{Dataset, DatasetView};
use crate::utils::split::get_random_split;
use crate::utils::statistics::average_path_length;
use crate::RandomGenerator;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub const LEFT: usize = 0;
pub const RIGHT: usize = 1;

#[derive(Clone, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct StandardSplit {
    pub feature: usize,
    pub threshold: f64,
}

impl StandardSplit {
    /// Branch taken by `x`: left when strictly below the threshold.
    #[inline]
    pub fn split(&self, x: &[f64]) -> usize {
        if x[self.feature] < self.threshold {
            LEFT
        } else {
            RIGHT
        }
    }
}

/// A randomized binary partition tree grown over a subsample of a dataset.
///
/// Nodes are stored in an arena; node `0` is the root.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IsolationTree {
    nodes: Vec<Node>,
    height_limit: usize,
    n_features: usize,
}

impl IsolationTree {
    /// Grows a tree over the rows of `dataset` listed in `indices`.
    pub(crate) fn fit(
        dataset: &Dataset,
        indices: Vec<usize>,
        height_limit: usize,
        random_state: &mut RandomGenerator,
    ) -> Self {
        let nodes = Self::build_tree(dataset.view(indices), height_limit, random_state);
        Self {
            nodes,
            height_limit,
            n_features: dataset.n_features(),
        }
    }

    fn build_tree(
        root: DatasetView<'_>,
        height_limit: usize,
        random_state: &mut RandomGenerator,
    ) -> Vec<Node> {
        let mut queue = VecDeque::from(vec![(root, 0, None)]);
        let mut nodes: Vec<Node> = Vec::new();
        while let Some((view, depth, parent)) = queue.pop_front() {
            let id = nodes.len();
            let n_samples = view.len();

            if let Some(parent) = parent {
                if let Node::Internal { children, .. } = &mut nodes[parent] {
                    children.push(id);
                }
            }

            if depth >= height_limit || n_samples <= 1 {
                nodes.push(Node::External {
                    id,
                    depth,
                    n_samples,
                });
                continue;
            }

            let split_params = get_random_split(&view, random_state);
            let (left, right) = view.partition(split_params.feature, split_params.threshold);

            nodes.push(Node::Internal {
                id,
                split_params,
                children: Vec::with_capacity(2),
                depth,
                n_samples,
            });
            queue.push_back((left, depth + 1, Some(id)));
            queue.push_back((right, depth + 1, Some(id)));
        }
        nodes
    }

    /// Estimated isolation path length of `x`: edges traversed to the leaf
    /// plus `c(n)` of the leaf population.
    pub fn path_length(&self, x: &[f64]) -> Result<f64> {
        self.check_dimension(x)?;
        Ok(self.path_length_unchecked(x))
    }

    pub(crate) fn path_length_unchecked(&self, x: &[f64]) -> f64 {
        let (leaf, height) = self.descend(x);
        height as f64 + average_path_length(leaf.get_n_samples())
    }

    /// The external node reached by `x`.
    pub fn leaf(&self, x: &[f64]) -> Result<&Node> {
        self.check_dimension(x)?;
        Ok(self.descend(x).0)
    }

    fn descend(&self, x: &[f64]) -> (&Node, usize) {
        let mut node = self.get_root();
        let mut height = 0;
        while let Node::Internal {
            split_params,
            children,
            ..
        } = node
        {
            node = self.get_node_at(children[split_params.split(x)]);
            height += 1;
        }
        (node, height)
    }

    fn check_dimension(&self, x: &[f64]) -> Result<()> {
        if x.len() != self.n_features {
            return Err(ForestError::DimensionMismatch {
                expected: self.n_features,
                found: x.len(),
            });
        }
        Ok(())
    }

    /// Checks the arena layout: a root exists, every internal node splits
    /// on a known feature and has two children stored after it.
    pub fn validate(&self) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(ForestError::InvalidModel("tree has no nodes".to_string()));
        }
        for (position, node) in self.nodes.iter().enumerate() {
            let Node::Internal {
                split_params,
                children,
                ..
            } = node
            else {
                continue;
            };
            if children.len() != 2 {
                return Err(ForestError::InvalidModel(format!(
                    "node {} has {} children",
                    position,
                    children.len()
                )));
            }
            // children always follow their parent, so descent terminates
            if let Some(child) = children
                .iter()
                .find(|&&child| child <= position || child >= self.nodes.len())
            {
                return Err(ForestError::InvalidModel(format!(
                    "node {} points to invalid child {}",
                    position, child
                )));
            }
            if split_params.feature >= self.n_features {
                return Err(ForestError::InvalidModel(format!(
                    "node {} splits on feature {} of {}",
                    position, split_params.feature, self.n_features
                )));
            }
        }
        Ok(())
    }

    pub fn leaves(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().filter(|node| node.is_external())
    }

    pub fn get_root(&self) -> &Node {
        &self.nodes[0]
    }
    pub fn get_node_at(&self, id: usize) -> &Node {
        &self.nodes[id]
    }
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }
    pub fn sample_size(&self) -> usize {
        self.get_root().get_n_samples()
    }
    pub fn height_limit(&self) -> usize {
        self.height_limit
    }
    pub fn n_features(&self) -> usize {
        self.n_features
    }
    /// Depth of the deepest leaf.
    pub fn depth(&self) -> usize {
        self.leaves().map(Node::get_depth).max().unwrap_or(0)
    }
}
