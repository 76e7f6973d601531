// In: src/stages/sort.rs

//! The ordering executor and its comparator chain.
//!
//! An ordering pipeline carries an explicit chain of at most two comparers
//! (primary + optional tie-break). `then_by` extends the chain by building
//! a new value, so no recorded stage is ever mutated after the fact and
//! previously obtained pipelines never observe the change.

use std::cmp::Ordering;
use std::rc::Rc;

/// An element-level comparer derived from a key selector and a key comparer.
pub(crate) type Comparer<T> = dyn Fn(&T, &T) -> Ordering;

/// The default key comparer: `< / > / else equal` on the raw keys. A pure,
/// stateless strategy; callers inject their own through the `_with` method
/// variants. Incomparable keys (e.g. NaN) compare equal.
pub(crate) fn default_compare<K: PartialOrd>(a: &K, b: &K) -> Ordering {
    if a < b {
        Ordering::Less
    } else if a > b {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// Binds a key selector and a key comparer into an element comparer.
pub(crate) fn key_comparer<T, K, KS, C>(key_selector: KS, comparer: C) -> Rc<Comparer<T>>
where
    KS: Fn(&T) -> K + 'static,
    C: Fn(&K, &K) -> Ordering + 'static,
{
    Rc::new(move |a: &T, b: &T| comparer(&key_selector(a), &key_selector(b)))
}

/// Primary comparer plus at most one tie-break, applied only on `Equal`.
pub(crate) struct ComparerChain<T> {
    primary: Rc<Comparer<T>>,
    secondary: Option<Rc<Comparer<T>>>,
}

impl<T> ComparerChain<T> {
    pub(crate) fn new(primary: Rc<Comparer<T>>) -> Self {
        ComparerChain { primary, secondary: None }
    }

    /// A new chain with the tie-break slot filled. A later call replaces the
    /// previous tie-break; only one level is retained.
    pub(crate) fn with_secondary(&self, secondary: Rc<Comparer<T>>) -> Self {
        ComparerChain {
            primary: Rc::clone(&self.primary),
            secondary: Some(secondary),
        }
    }

    pub(crate) fn key_count(&self) -> usize {
        1 + usize::from(self.secondary.is_some())
    }

    pub(crate) fn compare(&self, a: &T, b: &T) -> Ordering {
        match (self.primary)(a, b) {
            Ordering::Equal => match &self.secondary {
                Some(tie_break) => tie_break(a, b),
                None => Ordering::Equal,
            },
            decided => decided,
        }
    }
}

impl<T> Clone for ComparerChain<T> {
    fn clone(&self) -> Self {
        ComparerChain {
            primary: Rc::clone(&self.primary),
            secondary: self.secondary.clone(),
        }
    }
}

/// Stable sort of the stage's owned input under the comparator chain.
/// Stability is what makes `then_by` tie-breaks meaningful.
pub(crate) fn sort<T>(mut input: Vec<T>, chain: &ComparerChain<T>) -> Vec<T> {
    input.sort_by(|a, b| chain.compare(a, b));
    input
}

//==================================================================================
// Unit Tests
//==================================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use rand::seq::SliceRandom;

    #[test]
    fn test_default_compare() {
        assert_eq!(default_compare(&1, &2), Ordering::Less);
        assert_eq!(default_compare(&2, &1), Ordering::Greater);
        assert_eq!(default_compare(&2, &2), Ordering::Equal);
        // Incomparable keys fall through to Equal.
        assert_eq!(default_compare(&f64::NAN, &1.0), Ordering::Equal);
    }

    #[test]
    fn test_sort_is_a_sorted_permutation() {
        let mut values: Vec<i64> = (0..100).collect();
        values.shuffle(&mut rand::rng());

        let chain = ComparerChain::new(key_comparer(|v: &i64| *v, default_compare));
        let sorted = sort(values, &chain);
        assert_eq!(sorted, (0..100).collect::<Vec<i64>>());
    }

    #[test]
    fn test_sort_is_stable() {
        // Equal primary keys keep their input order.
        let input = vec![(1, 'b'), (0, 'x'), (1, 'a')];
        let chain = ComparerChain::new(key_comparer(|pair: &(i32, char)| pair.0, default_compare));
        assert_eq!(sort(input, &chain), vec![(0, 'x'), (1, 'b'), (1, 'a')]);
    }

    #[test]
    fn test_secondary_applies_only_on_ties() {
        let input = vec![(1, 'b'), (0, 'x'), (1, 'a')];
        let chain = ComparerChain::new(key_comparer(|pair: &(i32, char)| pair.0, default_compare))
            .with_secondary(key_comparer(|pair: &(i32, char)| pair.1, default_compare));
        assert_eq!(sort(input, &chain), vec![(0, 'x'), (1, 'a'), (1, 'b')]);
    }

    #[test]
    fn test_with_secondary_replaces_previous_tie_break() {
        let by_first = key_comparer(|pair: &(i32, i32, i32)| pair.0, default_compare);
        let chain = ComparerChain::new(by_first)
            .with_secondary(key_comparer(|pair: &(i32, i32, i32)| pair.1, default_compare))
            .with_secondary(key_comparer(|pair: &(i32, i32, i32)| pair.2, default_compare));

        assert_eq!(chain.key_count(), 2);
        // (0, 9, 1) before (0, 1, 2): the middle key no longer participates.
        let input = vec![(0, 1, 2), (0, 9, 1)];
        assert_eq!(sort(input, &chain), vec![(0, 9, 1), (0, 1, 2)]);
    }
}
