use crate::tree::tree::StandardSplit;
use crate::utils::dataset::DatasetView;
use crate::RandomGenerator;
use hashbrown::HashSet;
use rand::Rng;

/// Picks a random feature and a threshold drawn uniformly between the
/// smallest and largest distinct value of that feature in `view`.
///
/// When the feature is constant over the view the threshold is that
/// constant, so every row lands on the right branch.
pub(crate) fn get_random_split(
    view: &DatasetView<'_>,
    random_state: &mut RandomGenerator,
) -> StandardSplit {
    debug_assert!(view.len() > 0);
    let feature = random_state.gen_range(0..view.n_features());
    let (min_feature, max_feature) = distinct_range(view.values(feature));

    let threshold = if max_feature > min_feature {
        // interpolate so that ranges wider than f64::MAX stay finite
        let u = random_state.gen_range(0.0..=1.0);
        (min_feature * (1.0 - u) + max_feature * u).clamp(min_feature, max_feature)
    } else {
        min_feature
    };
    StandardSplit { feature, threshold }
}

/// Minimum and maximum over the distinct values of `values`.
pub(crate) fn distinct_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    // -0.0 and 0.0 share a bucket
    let distinct = values
        .map(|value| (value + 0.0).to_bits())
        .collect::<HashSet<u64>>();

    distinct
        .into_iter()
        .map(f64::from_bits)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), value| {
            (lo.min(value), hi.max(value))
        })
}
