//! Iterative permutation enumeration (Heap's algorithm).
//!
//! Visits all `k!` orderings in place with `O(k)` extra memory. The caller is
//! still looking at factorial time, which is why the solver caps `k`.

/// Calls `visit` once for every permutation of `items`.
///
/// `items` is permuted in place; its final order is unspecified. An empty
/// slice yields a single empty permutation.
pub fn for_each_permutation<T>(items: &mut [T], mut visit: impl FnMut(&[T])) {
    let k = items.len();
    let mut counters = vec![0usize; k];

    visit(items);

    let mut i = 1;
    while i < k {
        if counters[i] < i {
            let swap_with = if i % 2 == 0 { 0 } else { counters[i] };
            items.swap(swap_with, i);
            visit(items);
            counters[i] += 1;
            i = 1;
        } else {
            counters[i] = 0;
            i += 1;
        }
    }
}

/// `k!`, saturating at `usize::MAX`.
pub fn factorial(k: usize) -> usize {
    (2..=k).fold(1usize, |acc, n| acc.saturating_mul(n))
}
