pub const EGAMMA: f64 = 0.577215664901532860606512090082402431_f64;

/// Average path length of an unsuccessful search in a binary search tree
/// built over `n_samples` items.
pub fn average_path_length(n_samples: usize) -> f64 {
    if n_samples <= 1 {
        0.0
    } else {
        2.0 * harmonic_number(n_samples - 1) - (2.0 * (n_samples as f64 - 1.0) / n_samples as f64)
    }
}

#[inline]
pub fn harmonic_number(n: usize) -> f64 {
    (n as f64).ln() + EGAMMA
}

pub fn mean(v: &[f64]) -> f64 {
    v.iter().sum::<f64>() / v.len() as f64
}

pub fn transpose<T>(v: Vec<Vec<T>>) -> Vec<Vec<T>> {
    let Some(len) = v.first().map(Vec::len) else {
        return Vec::new();
    };
    let mut iters: Vec<_> = v.into_iter().map(|n| n.into_iter()).collect();
    (0..len)
        .map(|_| iters.iter_mut().filter_map(|n| n.next()).collect::<Vec<T>>())
        .collect()
}
