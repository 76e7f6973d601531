// In: src/pipeline/ordered.rs

//! Ordering pipelines: `order_by` and the progressive `then_by` tie-break.
//!
//! An `OrderedQuery` remembers the pipeline *before* the sort plus the
//! comparator chain, so `then_by` can rebuild the sort stage with the
//! tie-break attached instead of appending a second sort. Every `then_by`
//! call produces a new value; nothing shared is ever mutated, so pipelines
//! obtained earlier keep their ordering.
//!
//! Descending variants are sort plus a full output reversal, not a negated
//! comparer. Tied elements therefore come out in reverse discovery order,
//! and the descending forms return a plain `Query` (no further `then_by`).

use std::cmp::Ordering;
use std::ops::Deref;

use crate::stages::sort::{self, ComparerChain};
use super::plan::StageKind;
use super::Query;

impl<T: 'static> Query<T> {
    /// Stable sort by a key, under the default `< / > / else equal`
    /// comparer. Keys that compare neither way (float NaN) count as ties;
    /// a mix of such keys and comparable ones makes the comparison
    /// non-transitive, and the order of the affected elements is
    /// unspecified.
    pub fn order_by<K, KS>(&self, key_selector: KS) -> OrderedQuery<T>
    where
        KS: Fn(&T) -> K + 'static,
        K: PartialOrd + 'static,
    {
        self.order_by_with(key_selector, sort::default_compare)
    }

    /// Stable sort by a key under an injected key comparer.
    pub fn order_by_with<K, KS, C>(&self, key_selector: KS, comparer: C) -> OrderedQuery<T>
    where
        KS: Fn(&T) -> K + 'static,
        C: Fn(&K, &K) -> Ordering + 'static,
        K: 'static,
    {
        OrderedQuery::with_chain(
            self.clone(),
            ComparerChain::new(sort::key_comparer(key_selector, comparer)),
        )
    }

    /// `order_by` plus a full output reversal. Recorded as sort + reverse.
    pub fn order_by_descending<K, KS>(&self, key_selector: KS) -> Query<T>
    where
        KS: Fn(&T) -> K + 'static,
        K: PartialOrd + 'static,
    {
        self.order_by(key_selector).reverse()
    }

    pub fn order_by_descending_with<K, KS, C>(&self, key_selector: KS, comparer: C) -> Query<T>
    where
        KS: Fn(&T) -> K + 'static,
        C: Fn(&K, &K) -> Ordering + 'static,
        K: 'static,
    {
        self.order_by_with(key_selector, comparer).reverse()
    }
}

/// A pipeline whose last recorded stage is a comparator-chain sort.
/// Dereferences to `Query`, so every chain and terminal method is available
/// directly.
pub struct OrderedQuery<T> {
    /// The pipeline as recorded *before* the sort stage.
    input: Query<T>,
    chain: ComparerChain<T>,
    /// `input` plus the sort stage for the current chain.
    sealed: Query<T>,
}

impl<T: 'static> OrderedQuery<T> {
    pub(crate) fn with_chain(input: Query<T>, chain: ComparerChain<T>) -> Self {
        let sort_chain = chain.clone();
        let sealed = input.append(
            StageKind::Sort { keys: chain.key_count() },
            move |rows| sort::sort(rows, &sort_chain),
        );
        OrderedQuery { input, chain, sealed }
    }

    /// Attaches a tie-break, invoked only where the primary comparer
    /// returns equal. A later `then_by` replaces the tie-break; one level
    /// is retained.
    pub fn then_by<K, KS>(&self, key_selector: KS) -> OrderedQuery<T>
    where
        KS: Fn(&T) -> K + 'static,
        K: PartialOrd + 'static,
    {
        self.then_by_with(key_selector, sort::default_compare)
    }

    pub fn then_by_with<K, KS, C>(&self, key_selector: KS, comparer: C) -> OrderedQuery<T>
    where
        KS: Fn(&T) -> K + 'static,
        C: Fn(&K, &K) -> Ordering + 'static,
        K: 'static,
    {
        let chain = self
            .chain
            .with_secondary(sort::key_comparer(key_selector, comparer));
        OrderedQuery::with_chain(self.input.clone(), chain)
    }

    /// `then_by` plus a full output reversal, returning a plain pipeline.
    pub fn then_by_descending<K, KS>(&self, key_selector: KS) -> Query<T>
    where
        KS: Fn(&T) -> K + 'static,
        K: PartialOrd + 'static,
    {
        self.then_by(key_selector).reverse()
    }

    pub fn then_by_descending_with<K, KS, C>(&self, key_selector: KS, comparer: C) -> Query<T>
    where
        KS: Fn(&T) -> K + 'static,
        C: Fn(&K, &K) -> Ordering + 'static,
        K: 'static,
    {
        self.then_by_with(key_selector, comparer).reverse()
    }
}

impl<T> Clone for OrderedQuery<T> {
    fn clone(&self) -> Self {
        OrderedQuery {
            input: self.input.clone(),
            chain: self.chain.clone(),
            sealed: self.sealed.clone(),
        }
    }
}

impl<T> Deref for OrderedQuery<T> {
    type Target = Query<T>;

    fn deref(&self) -> &Query<T> {
        &self.sealed
    }
}

impl<T> std::fmt::Debug for OrderedQuery<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderedQuery({})", self.sealed.plan())
    }
}
