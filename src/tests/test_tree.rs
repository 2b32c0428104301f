#[cfg(test)]
mod tests {
    use crate::assert_eq_with_tol;
    use crate::error::ForestError;
    use crate::tree::node::Node;
    use crate::tree::tree::IsolationTree;
    use crate::utils::dataset::Dataset;
    use crate::utils::statistics::{average_path_length, EGAMMA};
    use crate::RandomGenerator;
    use rand::{Rng, SeedableRng};

    fn random_dataset(n: usize, n_features: usize, seed: u64) -> Dataset {
        let mut random_state = RandomGenerator::seed_from_u64(seed);
        Dataset::from_rows((0..n).map(|_| {
            (0..n_features)
                .map(|_| random_state.gen_range(-1.0..1.0))
                .collect::<Vec<f64>>()
        }))
        .unwrap()
    }

    #[test]
    fn test_average_path_length() {
        assert_eq!(average_path_length(0), 0.0);
        assert_eq!(average_path_length(1), 0.0);
        assert_eq_with_tol!(average_path_length(2), 2.0 * EGAMMA - 1.0, 1e-12);
        assert_eq_with_tol!(
            average_path_length(256),
            2.0 * ((255.0_f64).ln() + EGAMMA) - 2.0 * 255.0 / 256.0,
            1e-12
        );
        for n in 2..2000 {
            assert!(average_path_length(n + 1) > average_path_length(n));
        }
    }

    #[test]
    fn test_leaf_accounting() {
        let ds = random_dataset(100, 3, 1);
        let mut random_state = RandomGenerator::seed_from_u64(2);
        let indices = (0..64).map(|i| i + 10).collect::<Vec<_>>();
        let tree = IsolationTree::fit(&ds, indices.clone(), 6, &mut random_state);

        assert_eq!(tree.sample_size(), 64);
        assert_eq!(tree.leaves().map(Node::get_n_samples).sum::<usize>(), 64);
        for &i in &indices {
            let leaf = tree.leaf(ds.get(i).unwrap().as_slice()).unwrap();
            assert!(leaf.is_external());
            assert!(leaf.get_n_samples() >= 1);
        }
    }

    #[test]
    fn test_structure() {
        let ds = random_dataset(50, 2, 3);
        let mut random_state = RandomGenerator::seed_from_u64(4);
        let tree = IsolationTree::fit(&ds, (0..32).collect(), 5, &mut random_state);

        assert!(tree.depth() <= 5);
        for (id, node) in tree.nodes().iter().enumerate() {
            assert_eq!(node.get_id(), id);
            let children = node.get_children();
            if let Node::Internal { depth, n_samples, .. } = node {
                assert_eq!(children.len(), 2);
                let left = tree.get_node_at(children[0]);
                let right = tree.get_node_at(children[1]);
                assert_eq!(left.get_depth(), depth + 1);
                assert_eq!(right.get_depth(), depth + 1);
                assert_eq!(left.get_n_samples() + right.get_n_samples(), *n_samples);
                assert!(*n_samples > 1);
            }
        }
    }

    #[test]
    fn test_path_length() {
        let ds = random_dataset(40, 2, 5);
        let mut random_state = RandomGenerator::seed_from_u64(6);
        let tree = IsolationTree::fit(&ds, (0..40).collect(), 6, &mut random_state);

        for sample in &ds {
            let leaf = tree.leaf(sample.as_slice()).unwrap();
            let expected = leaf.get_depth() as f64 + average_path_length(leaf.get_n_samples());
            assert_eq!(tree.path_length(sample.as_slice()).unwrap(), expected);
        }
        // a point outside the training range still reaches a leaf
        assert!(tree.path_length(&[100.0, -100.0]).unwrap().is_finite());
    }

    #[test]
    fn test_zero_height_limit() {
        let ds = random_dataset(10, 2, 7);
        let mut random_state = RandomGenerator::seed_from_u64(8);
        let tree = IsolationTree::fit(&ds, (0..10).collect(), 0, &mut random_state);
        assert_eq!(tree.n_nodes(), 1);
        assert_eq!(
            tree.path_length(&[0.0, 0.0]).unwrap(),
            average_path_length(10)
        );
    }

    #[test]
    fn test_duplicate_rows_terminate() {
        let ds = Dataset::from_rows((0..64).map(|_| vec![1.0, 2.0])).unwrap();
        let mut random_state = RandomGenerator::seed_from_u64(9);
        let tree = IsolationTree::fit(&ds, (0..64).collect(), 6, &mut random_state);

        assert_eq!(tree.depth(), 6);
        let leaf = tree.leaf(&[1.0, 2.0]).unwrap();
        assert_eq!(leaf.get_n_samples(), 64);
        assert_eq_with_tol!(
            tree.path_length(&[1.0, 2.0]).unwrap(),
            6.0 + average_path_length(64),
            1e-12
        );
    }

    #[test]
    fn test_dimension_mismatch() {
        let ds = random_dataset(10, 3, 10);
        let mut random_state = RandomGenerator::seed_from_u64(11);
        let tree = IsolationTree::fit(&ds, (0..10).collect(), 4, &mut random_state);
        assert!(matches!(
            tree.path_length(&[0.0, 0.0]),
            Err(ForestError::DimensionMismatch {
                expected: 3,
                found: 2
            })
        ));
    }
}
