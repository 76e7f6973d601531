// In: src/stages/combine.rs

//! Executors that combine two sequences: concat and the membership-scan set
//! operations. `union` is not an executor of its own; the pipeline records
//! it as concat followed by distinct.

/// Appends the fully materialized second sequence after the first,
/// preserving both orders.
pub(crate) fn concat<T>(mut input: Vec<T>, second: Vec<T>) -> Vec<T> {
    input.extend(second);
    input
}

/// Keeps elements of the left present in the right sequence. The right side
/// is materialized once for the whole stage and re-scanned linearly per left
/// element; no index is built.
pub(crate) fn intersect<T: PartialEq>(input: Vec<T>, right: Vec<T>) -> Vec<T> {
    input
        .into_iter()
        .filter(|element| right.contains(element))
        .collect()
}

/// Keeps elements of the left absent from the right sequence. Same scan
/// discipline as `intersect`.
pub(crate) fn except<T: PartialEq>(input: Vec<T>, right: Vec<T>) -> Vec<T> {
    input
        .into_iter()
        .filter(|element| !right.contains(element))
        .collect()
}
