// In: src/source.rs

//! The "coerce a value to an ordered sequence" capability.
//!
//! The pipeline core never inspects where its data comes from; everything a
//! query can consume is funneled through `IntoSequence`, the single coercion
//! capability:
//!
//! * a raw sequence (`Vec`, slice, array) is owned at construction time;
//! * a shared handle (`Rc<RefCell<Vec<T>>>`) stays referenced, so external
//!   mutation between materializations is visible;
//! * an existing pipeline passes through unchanged (identity short-circuit,
//!   never re-wrapped).
//!
//! Anything else iterable goes through `Query::from_iter`.

use std::cell::RefCell;
use std::rc::Rc;

use crate::pipeline::ordered::OrderedQuery;
use crate::pipeline::Query;

/// Conversion into a query pipeline. Accepted by every operation that takes
/// a second sequence (`concat`, `join`, `zip`, ...) and by [`sequence`].
pub trait IntoSequence<T> {
    fn into_sequence(self) -> Query<T>;
}

/// The factory entry point: wraps any coercible source in a pipeline.
///
/// An existing pipeline is returned as-is; everything else is wrapped.
pub fn sequence<T, S: IntoSequence<T>>(source: S) -> Query<T> {
    source.into_sequence()
}

impl<T: Clone + 'static> IntoSequence<T> for Vec<T> {
    fn into_sequence(self) -> Query<T> {
        Query::new(self)
    }
}

impl<T: Clone + 'static> IntoSequence<T> for &Vec<T> {
    fn into_sequence(self) -> Query<T> {
        Query::new(self.clone())
    }
}

impl<T: Clone + 'static> IntoSequence<T> for &[T] {
    fn into_sequence(self) -> Query<T> {
        Query::new(self.to_vec())
    }
}

impl<T: Clone + 'static, const N: usize> IntoSequence<T> for [T; N] {
    fn into_sequence(self) -> Query<T> {
        Query::new(self.to_vec())
    }
}

/// A live view: the backing vector is referenced, not copied, so mutations
/// made through other clones of the handle show up on re-materialization.
impl<T: Clone + 'static> IntoSequence<T> for Rc<RefCell<Vec<T>>> {
    fn into_sequence(self) -> Query<T> {
        Query::from_shared(self)
    }
}

impl<T> IntoSequence<T> for Query<T> {
    fn into_sequence(self) -> Query<T> {
        self
    }
}

impl<T> IntoSequence<T> for &Query<T> {
    fn into_sequence(self) -> Query<T> {
        self.clone()
    }
}

impl<T: 'static> IntoSequence<T> for OrderedQuery<T> {
    fn into_sequence(self) -> Query<T> {
        (*self).clone()
    }
}

impl<T: 'static> IntoSequence<T> for &OrderedQuery<T> {
    fn into_sequence(self) -> Query<T> {
        (**self).clone()
    }
}

//==================================================================================
// Unit Tests
//==================================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_sources_coerce() {
        assert_eq!(sequence(vec![1, 2, 3]).to_vec(), vec![1, 2, 3]);
        assert_eq!(sequence([1, 2, 3]).to_vec(), vec![1, 2, 3]);
        assert_eq!(sequence(&[1, 2, 3][..]).to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_shared_handle_is_a_live_view() {
        let backing = Rc::new(RefCell::new(vec![1, 2]));
        let query = sequence(Rc::clone(&backing));

        assert_eq!(query.to_vec(), vec![1, 2]);
        backing.borrow_mut().push(3);
        assert_eq!(query.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_owned_source_is_snapshotted() {
        let data = vec![1, 2];
        let query = sequence(data.clone());
        drop(data);
        assert_eq!(query.to_vec(), vec![1, 2]);
    }
}
