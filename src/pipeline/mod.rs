// In: src/pipeline/mod.rs

//! The deferred query pipeline.
//!
//! A `Query<T>` is an immutable value pairing a backing sequence with the
//! ordered list of operations recorded against it. Chain calls never touch
//! data: each one returns a *new* pipeline whose evaluator wraps the parent
//! behind an `Rc` (structural sharing, copy-on-append) and whose `Plan`
//! gains one stage record. Only a terminal call walks the source through
//! every stage, strictly left-to-right: stage *i + 1* sees exactly the full
//! output of stage *i*, never the raw source.
//!
//! Nothing is cached. Re-materializing recomputes from the backing sequence,
//! which is why external mutation of a shared backing vector is visible on
//! the next terminal call (reference semantics, no snapshot isolation).
//! Execution is single-threaded and synchronous; `Rc` keeps the whole
//! machinery deliberately `!Send`.

pub mod ordered;
pub mod plan;
mod terminal;


use std::cell::RefCell;
use std::hash::Hash;
use std::rc::Rc;

use log::{debug, trace};

use crate::lookup::Group;
use crate::source::IntoSequence;
use crate::stages::{combine, join as joining, restrict, transform};
use plan::{Plan, StageKind};

/// An immutable, reusable description of a query over an in-memory ordered
/// sequence. Cloning is cheap (one `Rc` bump plus the stage descriptors).
pub struct Query<T> {
    /// Evaluates the whole recorded chain from the backing sequence.
    /// Each stage's evaluator owns an `Rc` to its parent's, so every
    /// pipeline value derived from the same source shares the upstream
    /// chain structurally.
    eval: Rc<dyn Fn() -> Vec<T>>,
    plan: Plan,
}

impl<T> Clone for Query<T> {
    fn clone(&self) -> Self {
        Query {
            eval: Rc::clone(&self.eval),
            plan: self.plan.clone(),
        }
    }
}

impl<T> std::fmt::Debug for Query<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Query({})", self.plan)
    }
}

//==================================================================================
// 1. Factories & generators
//==================================================================================
impl<T: Clone + 'static> Query<T> {
    /// Wraps an owned sequence. The data is snapshotted once, here.
    pub fn new(source: Vec<T>) -> Self {
        let backing = Rc::new(source);
        Self::leaf(move || backing.as_ref().clone())
    }

    /// Wraps a shared, externally mutable backing sequence. The handle is
    /// referenced, not copied: mutations through other clones of the handle
    /// are reflected by the next materialization.
    pub fn from_shared(handle: Rc<RefCell<Vec<T>>>) -> Self {
        Self::leaf(move || handle.borrow().clone())
    }

    /// Coerces any ordered iterable into a pipeline (eagerly collected).
    pub fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }

    /// `count` copies of `value`; zero yields an empty sequence. Eager: the
    /// values are generated now and wrapped as an ordinary pipeline.
    pub fn repeat(value: T, count: usize) -> Self {
        Self::new(vec![value; count])
    }

    fn leaf(snapshot: impl Fn() -> Vec<T> + 'static) -> Self {
        Query {
            eval: Rc::new(snapshot),
            plan: Plan::empty(),
        }
    }
}

impl Query<i64> {
    /// The integers `start..start + count`; zero count yields an empty
    /// sequence. Eager, like `repeat`.
    pub fn range(start: i64, count: usize) -> Query<i64> {
        Query::new((0..count).map(|offset| start + offset as i64).collect())
    }
}

//==================================================================================
// 2. Materialization & plan access
//==================================================================================
impl<T> Query<T> {
    /// The single choke point every terminal operation routes through:
    /// folds the backing sequence through all recorded stages, in order,
    /// and returns the result. Infallible and idempotent; call it as often
    /// as needed.
    pub fn to_vec(&self) -> Vec<T> {
        debug!("materializing pipeline: {}", self.plan);
        (self.eval)()
    }

    /// The recorded stage descriptors, for diagnostics.
    pub fn plan(&self) -> &Plan {
        &self.plan
    }
}

impl<T: 'static> Query<T> {
    /// Copy-on-append: records one stage and wraps the parent evaluator.
    /// `self` is left untouched and stays independently materializable.
    pub(crate) fn append<U: 'static>(
        &self,
        stage: StageKind,
        exec: impl Fn(Vec<T>) -> Vec<U> + 'static,
    ) -> Query<U> {
        let upstream = Rc::clone(&self.eval);
        let label = stage.clone();
        let plan = self.plan.push(stage);
        Query {
            eval: Rc::new(move || {
                let input = upstream();
                let rows_in = input.len();
                let output = exec(input);
                trace!("stage {label}: {rows_in} rows in, {} rows out", output.len());
                output
            }),
            plan,
        }
    }
}

//==================================================================================
// 3. Chain methods (deferred; construction never touches data)
//==================================================================================
impl<T: 'static> Query<T> {
    /// Keeps elements the predicate accepts. The predicate sees the
    /// stage-local index.
    pub fn filter<P>(&self, predicate: P) -> Query<T>
    where
        P: Fn(&T, usize) -> bool + 'static,
    {
        self.append(StageKind::Filter, move |input| {
            restrict::filter(input, &predicate)
        })
    }

    /// Maps each element (with its stage-local index) to a new value.
    pub fn select<U, F>(&self, selector: F) -> Query<U>
    where
        F: Fn(T, usize) -> U + 'static,
        U: 'static,
    {
        self.append(StageKind::Select, move |input| {
            transform::select(input, &selector)
        })
    }

    /// Flattens each element's sub-sequence, keeping the inner elements.
    pub fn select_many<U, S, C>(&self, collection: C) -> Query<U>
    where
        C: Fn(&T, usize) -> S + 'static,
        S: IntoSequence<U>,
        U: 'static,
    {
        self.append(StageKind::SelectMany, move |input| {
            transform::select_many(input, &collection)
        })
    }

    /// Flattens with an explicit outer/inner result combiner.
    pub fn select_many_with<U, S, C, F, R>(&self, collection: C, result: F) -> Query<R>
    where
        C: Fn(&T, usize) -> S + 'static,
        S: IntoSequence<U>,
        F: Fn(&T, U) -> R + 'static,
        R: 'static,
    {
        self.append(StageKind::SelectMany, move |input| {
            transform::select_many_with(input, &collection, &result)
        })
    }

    pub fn take(&self, count: usize) -> Query<T> {
        self.append(StageKind::Take { count }, move |input| {
            restrict::take(input, count)
        })
    }

    pub fn skip(&self, count: usize) -> Query<T> {
        self.append(StageKind::Skip { count }, move |input| {
            restrict::skip(input, count)
        })
    }

    pub fn take_while<P>(&self, predicate: P) -> Query<T>
    where
        P: Fn(&T, usize) -> bool + 'static,
    {
        self.append(StageKind::TakeWhile, move |input| {
            restrict::take_while(input, &predicate)
        })
    }

    pub fn skip_while<P>(&self, predicate: P) -> Query<T>
    where
        P: Fn(&T, usize) -> bool + 'static,
    {
        self.append(StageKind::SkipWhile, move |input| {
            restrict::skip_while(input, &predicate)
        })
    }

    pub fn reverse(&self) -> Query<T> {
        self.append(StageKind::Reverse, transform::reverse)
    }

    /// Keeps the first occurrence of each value under `PartialEq`.
    pub fn distinct(&self) -> Query<T>
    where
        T: PartialEq,
    {
        self.append(StageKind::Distinct, restrict::distinct)
    }

    /// Appends the other sequence's elements after this one's. The other
    /// sequence is materialized when the stage runs, not when it is
    /// recorded.
    pub fn concat<S: IntoSequence<T>>(&self, other: S) -> Query<T> {
        let other = other.into_sequence();
        self.append(StageKind::Concat, move |input| {
            combine::concat(input, other.to_vec())
        })
    }

    /// Concat followed by distinct; recorded as those two stages.
    pub fn union<S: IntoSequence<T>>(&self, other: S) -> Query<T>
    where
        T: PartialEq,
    {
        self.concat(other).distinct()
    }

    /// Keeps elements present in the other sequence.
    pub fn intersect<S: IntoSequence<T>>(&self, other: S) -> Query<T>
    where
        T: PartialEq,
    {
        let other = other.into_sequence();
        self.append(StageKind::Intersect, move |input| {
            combine::intersect(input, other.to_vec())
        })
    }

    /// Keeps elements absent from the other sequence.
    pub fn except<S: IntoSequence<T>>(&self, other: S) -> Query<T>
    where
        T: PartialEq,
    {
        let other = other.into_sequence();
        self.append(StageKind::Except, move |input| {
            combine::except(input, other.to_vec())
        })
    }

    /// Inner join against `inner` through a key lookup built when the stage
    /// runs. Outer elements without a match emit nothing.
    pub fn join<I, U, K, R, OK, IK, F>(
        &self,
        inner: I,
        outer_key: OK,
        inner_key: IK,
        result: F,
    ) -> Query<R>
    where
        I: IntoSequence<U>,
        OK: Fn(&T) -> K + 'static,
        IK: Fn(&U) -> K + 'static,
        F: Fn(&T, &U) -> R + 'static,
        K: Eq + Hash + Clone + 'static,
        U: 'static,
        R: 'static,
    {
        let inner = inner.into_sequence();
        self.append(StageKind::Join, move |input| {
            joining::join(input, inner.to_vec(), &outer_key, &inner_key, &result)
        })
    }

    /// Like `join`, but every outer element produces exactly one row; a
    /// non-match yields an empty group.
    pub fn group_join<I, U, K, R, OK, IK, F>(
        &self,
        inner: I,
        outer_key: OK,
        inner_key: IK,
        result: F,
    ) -> Query<R>
    where
        I: IntoSequence<U>,
        OK: Fn(&T) -> K + 'static,
        IK: Fn(&U) -> K + 'static,
        F: Fn(&T, &[U]) -> R + 'static,
        K: Eq + Hash + Clone + 'static,
        U: 'static,
        R: 'static,
    {
        let inner = inner.into_sequence();
        self.append(StageKind::GroupJoin, move |input| {
            joining::group_join(input, inner.to_vec(), &outer_key, &inner_key, &result)
        })
    }

    /// Partitions into key-annotated groups, in first-appearance key order.
    pub fn group_by<K, KS>(&self, key_selector: KS) -> Query<Group<K, T>>
    where
        KS: Fn(&T) -> K + 'static,
        K: Eq + Hash + Clone + 'static,
    {
        self.append(StageKind::GroupBy, move |input| {
            joining::group_by(input, &key_selector)
        })
    }

    /// Full group_by form: element projection plus a (key, group) result
    /// combiner.
    pub fn group_by_with<K, V, R, KS, ES, F>(
        &self,
        key_selector: KS,
        element_selector: ES,
        result: F,
    ) -> Query<R>
    where
        KS: Fn(&T) -> K + 'static,
        ES: Fn(&T) -> V + 'static,
        F: Fn(K, Vec<V>) -> R + 'static,
        K: Eq + Hash + Clone + 'static,
        R: 'static,
    {
        self.append(StageKind::GroupBy, move |input| {
            joining::group_by_with(input, &key_selector, &element_selector, &result)
        })
    }

    /// Pairwise combination with another sequence, up to the shorter
    /// length.
    pub fn zip<U, S, R, F>(&self, other: S, result: F) -> Query<R>
    where
        S: IntoSequence<U>,
        F: Fn(T, U) -> R + 'static,
        U: 'static,
        R: 'static,
    {
        let other = other.into_sequence();
        self.append(StageKind::Zip, move |input| {
            transform::zip(input, other.to_vec(), &result)
        })
    }
}
