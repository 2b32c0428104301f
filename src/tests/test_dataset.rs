#[cfg(test)]
mod tests {
    use crate::error::ForestError;
    use crate::utils::dataset::Dataset;

    #[test]
    fn test_zero_features_rejected() {
        assert!(matches!(Dataset::new(0), Err(ForestError::ZeroFeatures)));
    }

    #[test]
    fn test_push_checks_dimension() {
        let mut ds = Dataset::new(2).unwrap();
        ds.push(vec![1.0, 2.0]).unwrap();
        let err = ds.push(vec![1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(
            err,
            ForestError::DimensionMismatch {
                expected: 2,
                found: 3
            }
        ));
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn test_push_rejects_non_finite() {
        let mut ds = Dataset::new(3).unwrap();
        let err = ds.push(vec![0.0, f64::NAN, 1.0]).unwrap_err();
        assert!(matches!(err, ForestError::NonFiniteValue { feature: 1, .. }));
        let err = ds.push(vec![0.0, 1.0, f64::INFINITY]).unwrap_err();
        assert!(matches!(err, ForestError::NonFiniteValue { feature: 2, .. }));
        assert!(ds.is_empty());
    }

    #[test]
    fn test_from_rows() {
        let ds = Dataset::from_rows(vec![vec![0.0, 1.0], vec![2.0, 3.0], vec![4.0, 5.0]]).unwrap();
        assert_eq!(ds.n_features(), 2);
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.get(1).unwrap().as_slice(), &[2.0, 3.0]);
        assert!(ds.get(3).is_none());

        assert!(matches!(
            Dataset::from_rows(Vec::<Vec<f64>>::new()),
            Err(ForestError::EmptyDataset)
        ));
        assert!(matches!(
            Dataset::from_rows(vec![vec![0.0, 1.0], vec![2.0]]),
            Err(ForestError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_extend_shares_rows() {
        let mut a = Dataset::from_rows(vec![vec![0.0, 0.0]]).unwrap();
        let b = Dataset::from_rows(vec![vec![1.0, 1.0], vec![2.0, 2.0]]).unwrap();
        a.extend(&b).unwrap();
        assert_eq!(a.len(), 3);
        assert!(std::sync::Arc::ptr_eq(
            &a.get(2).unwrap().features,
            &b.get(1).unwrap().features
        ));

        let c = Dataset::from_rows(vec![vec![1.0]]).unwrap();
        assert!(matches!(
            a.extend(&c),
            Err(ForestError::DimensionMismatch {
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn test_view_partition() {
        let ds = Dataset::from_rows((0..10).map(|i| vec![i as f64, -(i as f64)])).unwrap();
        let view = ds.view(vec![9, 1, 4, 6, 2]);
        assert_eq!(view.len(), 5);
        assert_eq!(view.value(0, 0), 9.0);
        assert_eq!(view.value(2, 1), -4.0);

        let (left, right) = view.partition(0, 4.0);
        assert_eq!(left.values(0).collect::<Vec<_>>(), vec![1.0, 2.0]);
        assert_eq!(right.values(0).collect::<Vec<_>>(), vec![9.0, 4.0, 6.0]);
    }
}
