// In: src/stages/restrict.rs

//! Executors that narrow a sequence without changing its element type:
//! filter, take/skip, take_while/skip_while and distinct.

/// Keeps elements the predicate accepts. The index passed to the predicate
/// is the stage-local index (position in this stage's input), not the
/// position in the original source.
pub(crate) fn filter<T, P>(input: Vec<T>, predicate: &P) -> Vec<T>
where
    P: Fn(&T, usize) -> bool,
{
    input
        .into_iter()
        .enumerate()
        .filter(|(index, element)| predicate(element, *index))
        .map(|(_, element)| element)
        .collect()
}

/// First `count` elements; a count past the end yields everything.
pub(crate) fn take<T>(mut input: Vec<T>, count: usize) -> Vec<T> {
    input.truncate(count);
    input
}

/// Everything after the first `count` elements; a count past the end yields
/// nothing.
pub(crate) fn skip<T>(input: Vec<T>, count: usize) -> Vec<T> {
    input.into_iter().skip(count).collect()
}

/// Consumes while the predicate holds, stopping at the first falsy result.
pub(crate) fn take_while<T, P>(input: Vec<T>, predicate: &P) -> Vec<T>
where
    P: Fn(&T, usize) -> bool,
{
    input
        .into_iter()
        .enumerate()
        .take_while(|(index, element)| predicate(element, *index))
        .map(|(_, element)| element)
        .collect()
}

/// Drops while the predicate holds; once it goes falsy the remaining
/// elements pass straight through without being checked.
pub(crate) fn skip_while<T, P>(input: Vec<T>, predicate: &P) -> Vec<T>
where
    P: Fn(&T, usize) -> bool,
{
    let mut output = Vec::new();
    let mut skipping = true;
    for (index, element) in input.into_iter().enumerate() {
        if skipping && predicate(&element, index) {
            continue;
        }
        skipping = false;
        output.push(element);
    }
    output
}

/// Keeps the first occurrence of each value and drops later duplicates.
///
/// The quadratic tombstone-flag scan is deliberate: equality is plain
/// `PartialEq`, no hashing or ordering is demanded of the element type, and
/// the sequences this library targets are small.
pub(crate) fn distinct<T: PartialEq>(input: Vec<T>) -> Vec<T> {
    let len = input.len();
    let mut keep = vec![true; len];
    for i in 0..len {
        if !keep[i] {
            continue;
        }
        for j in (i + 1)..len {
            if keep[j] && input[i] == input[j] {
                keep[j] = false;
            }
        }
    }
    input
        .into_iter()
        .zip(keep)
        .filter_map(|(element, kept)| kept.then_some(element))
        .collect()
}

//==================================================================================
// Unit Tests
//==================================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_passes_stage_local_index() {
        let seen = std::cell::RefCell::new(Vec::new());
        let result = filter(vec![10, 20, 30], &|element: &i32, index| {
            seen.borrow_mut().push(index);
            *element != 20
        });
        assert_eq!(result, vec![10, 30]);
        assert_eq!(seen.into_inner(), vec![0, 1, 2]);
    }

    #[test]
    fn test_take_and_skip_saturate() {
        assert_eq!(take(vec![1, 2, 3], 2), vec![1, 2]);
        assert_eq!(take(vec![1, 2, 3], 10), vec![1, 2, 3]);
        assert_eq!(take(vec![1, 2, 3], 0), Vec::<i32>::new());
        assert_eq!(skip(vec![1, 2, 3], 1), vec![2, 3]);
        assert_eq!(skip(vec![1, 2, 3], 10), Vec::<i32>::new());
        assert_eq!(skip(vec![1, 2, 3], 0), vec![1, 2, 3]);
    }

    #[test]
    fn test_take_while_short_circuits() {
        let result = take_while(vec![1, 2, 9, 1], &|element: &i32, _| *element < 5);
        assert_eq!(result, vec![1, 2]);
    }

    #[test]
    fn test_skip_while_passes_remainder_unchecked() {
        // The 1 after the 9 must survive even though the predicate holds for it.
        let result = skip_while(vec![1, 2, 9, 1, 8], &|element: &i32, _| *element < 5);
        assert_eq!(result, vec![9, 1, 8]);
    }

    #[test]
    fn test_skip_while_index_is_in_order() {
        let result = skip_while(vec![5, 5, 5, 5], &|_: &i32, index| index < 2);
        assert_eq!(result, vec![5, 5]);
    }

    #[test]
    fn test_distinct_keeps_first_occurrence() {
        assert_eq!(distinct(vec![3, 1, 3, 2, 1, 3]), vec![3, 1, 2]);
    }

    #[test]
    fn test_distinct_is_idempotent() {
        let once = distinct(vec![1, 2, 2, 3, 1]);
        let twice = distinct(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_distinct_empty() {
        assert_eq!(distinct(Vec::<i32>::new()), Vec::<i32>::new());
    }
}
