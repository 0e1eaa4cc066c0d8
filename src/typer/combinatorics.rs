//! Enumeration helpers for the `||` and `&&` combinators.

/// Every non-empty subset of `0..n`, as ascending index lists.
///
/// Callers bound `n`; the count is `2^n - 1`. Yields nothing for `n >= 64`.
pub fn non_empty_subsets(n: usize) -> impl Iterator<Item = Vec<usize>> {
    let end = u32::try_from(n)
        .ok()
        .and_then(|shift| 1u64.checked_shl(shift))
        .unwrap_or(0);
    (1u64..end).map(move |mask| (0..n).filter(|i| mask & (1u64 << i) != 0).collect())
}

/// Every permutation of `0..n` (Heap's algorithm). The count is `n!`.
pub fn permutations(n: usize) -> Vec<Vec<usize>> {
    let mut current: Vec<usize> = (0..n).collect();
    let mut result = vec![current.clone()];
    let mut counters = vec![0usize; n];

    let mut i = 0;
    while i < n {
        if counters[i] < i {
            if i % 2 == 0 {
                current.swap(0, i);
            } else {
                current.swap(counters[i], i);
            }
            result.push(current.clone());
            counters[i] += 1;
            i = 0;
        } else {
            counters[i] = 0;
            i += 1;
        }
    }

    result
}
