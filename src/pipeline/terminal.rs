// In: src/pipeline/terminal.rs

//! Terminal operations: everything that forces materialization and returns
//! a plain value. All of them route through `Query::to_vec`, the single
//! choke point; none of them consume or invalidate the pipeline, which
//! stays reusable afterwards.
//!
//! Fallible terminals return `Result` with the data-dependent error raised
//! at this call; `_or_default` forms return `Option` instead of failing.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::iter::Sum;

use num_traits::ToPrimitive;

use crate::error::QueryError;
use crate::lookup::Lookup;
use crate::source::IntoSequence;
use super::Query;

impl<T> Query<T> {
    /// Materializes and re-wraps the result as a fresh pipeline over an
    /// owned snapshot (detached from any shared backing sequence).
    pub fn to_list(&self) -> Query<T>
    where
        T: Clone + 'static,
    {
        Query::new(self.to_vec())
    }

    pub fn count(&self) -> usize {
        self.to_vec().len()
    }

    /// True if any element satisfies the predicate.
    pub fn any<P>(&self, predicate: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        self.to_vec().iter().any(|element| predicate(element))
    }

    /// True if every element satisfies the predicate (vacuously true on an
    /// empty sequence).
    pub fn all<P>(&self, predicate: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        self.to_vec().iter().all(|element| predicate(element))
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.to_vec().contains(value)
    }

    pub fn first(&self) -> Result<T, QueryError> {
        self.first_or_default().ok_or(QueryError::EmptySequence)
    }

    pub fn first_or_default(&self) -> Option<T> {
        self.to_vec().into_iter().next()
    }

    pub fn last(&self) -> Result<T, QueryError> {
        self.last_or_default().ok_or(QueryError::EmptySequence)
    }

    pub fn last_or_default(&self) -> Option<T> {
        self.to_vec().pop()
    }

    pub fn element_at(&self, index: usize) -> Result<T, QueryError> {
        self.element_at_or_default(index)
            .ok_or(QueryError::NoElementAt(index))
    }

    pub fn element_at_or_default(&self, index: usize) -> Option<T> {
        self.to_vec().into_iter().nth(index)
    }

    /// Left fold from an explicit seed; an empty sequence folds to the
    /// seed.
    pub fn aggregate<A, F>(&self, seed: A, accumulator: F) -> A
    where
        F: Fn(A, T) -> A,
    {
        self.to_vec().into_iter().fold(seed, accumulator)
    }

    /// `aggregate` with a final result projection.
    pub fn aggregate_with<A, R, F, RS>(&self, seed: A, accumulator: F, result: RS) -> R
    where
        F: Fn(A, T) -> A,
        RS: Fn(A) -> R,
    {
        result(self.aggregate(seed, accumulator))
    }

    /// Sum of all elements; an empty sequence sums to zero.
    pub fn sum(&self) -> T
    where
        T: Sum<T>,
    {
        self.to_vec().into_iter().sum()
    }

    /// Sum of the projected values.
    pub fn sum_by<U, F>(&self, selector: F) -> U
    where
        F: Fn(&T) -> U,
        U: Sum<U>,
    {
        self.to_vec().iter().map(selector).sum()
    }

    /// The greatest element under `PartialEq`-style `>` scanning; among
    /// tied maxima the first occurrence wins.
    pub fn max(&self) -> Result<T, QueryError>
    where
        T: PartialOrd,
    {
        let mut elements = self.to_vec().into_iter();
        let mut best = elements.next().ok_or(QueryError::EmptySequence)?;
        for element in elements {
            if element > best {
                best = element;
            }
        }
        Ok(best)
    }

    /// The greatest of the projected values.
    pub fn max_by<K, F>(&self, selector: F) -> Result<K, QueryError>
    where
        F: Fn(&T) -> K,
        K: PartialOrd,
    {
        let mut keys = self.to_vec().iter().map(selector).collect::<Vec<_>>().into_iter();
        let mut best = keys.next().ok_or(QueryError::EmptySequence)?;
        for key in keys {
            if key > best {
                best = key;
            }
        }
        Ok(best)
    }

    pub fn min(&self) -> Result<T, QueryError>
    where
        T: PartialOrd,
    {
        let mut elements = self.to_vec().into_iter();
        let mut best = elements.next().ok_or(QueryError::EmptySequence)?;
        for element in elements {
            if element < best {
                best = element;
            }
        }
        Ok(best)
    }

    /// The least of the projected values.
    pub fn min_by<K, F>(&self, selector: F) -> Result<K, QueryError>
    where
        F: Fn(&T) -> K,
        K: PartialOrd,
    {
        let mut keys = self.to_vec().iter().map(selector).collect::<Vec<_>>().into_iter();
        let mut best = keys.next().ok_or(QueryError::EmptySequence)?;
        for key in keys {
            if key < best {
                best = key;
            }
        }
        Ok(best)
    }

    /// Arithmetic mean as `f64`; fails on an empty sequence.
    pub fn average(&self) -> Result<f64, QueryError>
    where
        T: ToPrimitive,
    {
        let values = self.to_vec();
        if values.is_empty() {
            return Err(QueryError::EmptySequence);
        }
        let total: f64 = values
            .iter()
            .map(|value| value.to_f64().unwrap_or(f64::NAN))
            .sum();
        Ok(total / values.len() as f64)
    }

    /// Arithmetic mean of the projected values.
    pub fn average_by<K, F>(&self, selector: F) -> Result<f64, QueryError>
    where
        F: Fn(&T) -> K,
        K: ToPrimitive,
    {
        let values = self.to_vec();
        if values.is_empty() {
            return Err(QueryError::EmptySequence);
        }
        let total: f64 = values
            .iter()
            .map(|element| selector(element).to_f64().unwrap_or(f64::NAN))
            .sum();
        Ok(total / values.len() as f64)
    }

    /// Keyed map of elements; fails with `DuplicateKey` if the selector
    /// produces the same key twice.
    pub fn to_dictionary<K, KS>(&self, key_selector: KS) -> Result<HashMap<K, T>, QueryError>
    where
        KS: Fn(&T) -> K,
        K: Eq + Hash + Debug,
    {
        let mut map = HashMap::new();
        for element in self.to_vec() {
            let key = key_selector(&element);
            match map.entry(key) {
                Entry::Occupied(slot) => {
                    return Err(QueryError::DuplicateKey(format!("{:?}", slot.key())));
                }
                Entry::Vacant(slot) => {
                    slot.insert(element);
                }
            }
        }
        Ok(map)
    }

    /// `to_dictionary` with a projected value per element.
    pub fn to_dictionary_with<K, V, KS, ES>(
        &self,
        key_selector: KS,
        element_selector: ES,
    ) -> Result<HashMap<K, V>, QueryError>
    where
        KS: Fn(&T) -> K,
        ES: Fn(&T) -> V,
        K: Eq + Hash + Debug,
    {
        let mut map = HashMap::new();
        for element in self.to_vec() {
            let key = key_selector(&element);
            match map.entry(key) {
                Entry::Occupied(slot) => {
                    return Err(QueryError::DuplicateKey(format!("{:?}", slot.key())));
                }
                Entry::Vacant(slot) => {
                    slot.insert(element_selector(&element));
                }
            }
        }
        Ok(map)
    }

    /// Keyed multimap; never fails, duplicates accumulate per key in
    /// first-appearance key order.
    pub fn to_lookup<K, KS>(&self, key_selector: KS) -> Lookup<K, T>
    where
        KS: Fn(&T) -> K,
        K: Eq + Hash + Clone,
    {
        let mut lookup = Lookup::new();
        for element in self.to_vec() {
            let key = key_selector(&element);
            lookup.push(key, element);
        }
        lookup
    }

    /// `to_lookup` with a projected value per element.
    pub fn to_lookup_with<K, V, KS, ES>(
        &self,
        key_selector: KS,
        element_selector: ES,
    ) -> Lookup<K, V>
    where
        KS: Fn(&T) -> K,
        ES: Fn(&T) -> V,
        K: Eq + Hash + Clone,
    {
        let mut lookup = Lookup::new();
        for element in self.to_vec() {
            lookup.push(key_selector(&element), element_selector(&element));
        }
        lookup
    }

    /// Element-wise equality against another sequence: true iff the
    /// lengths match and every aligned pair compares equal.
    pub fn sequence_equal<S: IntoSequence<T>>(&self, other: S) -> bool
    where
        T: PartialEq,
    {
        self.to_vec() == other.into_sequence().to_vec()
    }
}
