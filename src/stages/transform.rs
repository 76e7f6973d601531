// In: src/stages/transform.rs

//! Executors that reshape elements: select, select_many, reverse and zip.

use crate::source::IntoSequence;

/// Maps each element (with its stage-local index) to a new value.
pub(crate) fn select<T, U, F>(input: Vec<T>, selector: &F) -> Vec<U>
where
    F: Fn(T, usize) -> U,
{
    input
        .into_iter()
        .enumerate()
        .map(|(index, element)| selector(element, index))
        .collect()
}

/// Flattens: each element yields a sub-sequence (through the same coercion
/// capability the factory uses), and the inner elements are emitted in order.
pub(crate) fn select_many<T, U, S, C>(input: Vec<T>, collection: &C) -> Vec<U>
where
    C: Fn(&T, usize) -> S,
    S: IntoSequence<U>,
{
    let mut output = Vec::new();
    for (index, element) in input.iter().enumerate() {
        output.extend(collection(element, index).into_sequence().to_vec());
    }
    output
}

/// Flattens with an explicit outer/inner result combiner.
pub(crate) fn select_many_with<T, U, S, C, F, R>(
    input: Vec<T>,
    collection: &C,
    result: &F,
) -> Vec<R>
where
    C: Fn(&T, usize) -> S,
    S: IntoSequence<U>,
    F: Fn(&T, U) -> R,
{
    let mut output = Vec::new();
    for (index, element) in input.iter().enumerate() {
        for inner in collection(element, index).into_sequence().to_vec() {
            output.push(result(element, inner));
        }
    }
    output
}

pub(crate) fn reverse<T>(mut input: Vec<T>) -> Vec<T> {
    input.reverse();
    input
}

/// Pairwise combination up to the shorter length; excess elements of the
/// longer sequence are dropped silently.
pub(crate) fn zip<T, U, R, F>(input: Vec<T>, second: Vec<U>, result: &F) -> Vec<R>
where
    F: Fn(T, U) -> R,
{
    input
        .into_iter()
        .zip(second)
        .map(|(left, right)| result(left, right))
        .collect()
}

//==================================================================================
// Unit Tests
//==================================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_receives_index() {
        let result = select(vec![10, 20, 30], &|element, index| element + index as i32);
        assert_eq!(result, vec![10, 21, 32]);
    }

    #[test]
    fn test_select_many_flattens_in_order() {
        let result = select_many(vec![vec![1, 2], vec![], vec![3]], &|sub: &Vec<i32>, _| {
            sub.clone()
        });
        assert_eq!(result, vec![1, 2, 3]);
    }

    #[test]
    fn test_select_many_with_combines_outer_and_inner() {
        let result = select_many_with(
            vec![("a", 2), ("b", 1)],
            &|pair: &(&str, i32), _| (0..pair.1).collect::<Vec<_>>(),
            &|pair, inner| format!("{}{}", pair.0, inner),
        );
        assert_eq!(result, vec!["a0", "a1", "b0"]);
    }

    #[test]
    fn test_reverse() {
        assert_eq!(reverse(vec![1, 2, 3]), vec![3, 2, 1]);
        assert_eq!(reverse(Vec::<i32>::new()), Vec::<i32>::new());
    }

    #[test]
    fn test_zip_stops_at_shorter() {
        let result = zip(vec![1, 2, 3], vec!["a", "b"], &|n, s| format!("{n}{s}"));
        assert_eq!(result, vec!["1a", "2b"]);

        let result = zip(vec![1], vec!["a", "b", "c"], &|n, s| format!("{n}{s}"));
        assert_eq!(result, vec!["1a"]);
    }
}
