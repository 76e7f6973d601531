// In: src/stages/join.rs

//! Executors that correlate sequences through a key lookup: join,
//! group_join and group_by. The lookup is built once per execution from the
//! inner sequence and discarded afterwards.

use std::hash::Hash;

use crate::lookup::{Group, Lookup};

fn build_lookup<U, K, KS>(inner: Vec<U>, key_selector: &KS) -> Lookup<K, U>
where
    KS: Fn(&U) -> K,
    K: Eq + Hash + Clone,
{
    let mut lookup = Lookup::new();
    for element in inner {
        let key = key_selector(&element);
        lookup.push(key, element);
    }
    lookup
}

/// Inner join. Outer elements without a matching key emit nothing; each
/// inner match (in original inner order) emits one combined row, so multiple
/// matches expand cartesian per outer element.
pub(crate) fn join<T, U, K, R, OK, IK, F>(
    outer: Vec<T>,
    inner: Vec<U>,
    outer_key: &OK,
    inner_key: &IK,
    result: &F,
) -> Vec<R>
where
    OK: Fn(&T) -> K,
    IK: Fn(&U) -> K,
    F: Fn(&T, &U) -> R,
    K: Eq + Hash + Clone,
{
    let lookup = build_lookup(inner, inner_key);
    let mut output = Vec::new();
    for element in &outer {
        let key = outer_key(element);
        if let Some(matches) = lookup.get(&key) {
            for matched in matches {
                output.push(result(element, matched));
            }
        }
    }
    output
}

/// Group join: exactly one row per outer element; a non-match yields an
/// empty group, not an omitted row.
pub(crate) fn group_join<T, U, K, R, OK, IK, F>(
    outer: Vec<T>,
    inner: Vec<U>,
    outer_key: &OK,
    inner_key: &IK,
    result: &F,
) -> Vec<R>
where
    OK: Fn(&T) -> K,
    IK: Fn(&U) -> K,
    F: Fn(&T, &[U]) -> R,
    K: Eq + Hash + Clone,
{
    let lookup = build_lookup(inner, inner_key);
    outer
        .iter()
        .map(|element| {
            let key = outer_key(element);
            result(element, lookup.get(&key).unwrap_or(&[]))
        })
        .collect()
}

/// Partitions into key-annotated groups, in first-appearance key order.
pub(crate) fn group_by<T, K, KS>(input: Vec<T>, key_selector: &KS) -> Vec<Group<K, T>>
where
    KS: Fn(&T) -> K,
    K: Eq + Hash + Clone,
{
    build_lookup(input, key_selector).into_groups()
}

/// Full group_by form: element projection plus a (key, group) result
/// combiner.
pub(crate) fn group_by_with<T, K, V, R, KS, ES, F>(
    input: Vec<T>,
    key_selector: &KS,
    element_selector: &ES,
    result: &F,
) -> Vec<R>
where
    KS: Fn(&T) -> K,
    ES: Fn(&T) -> V,
    F: Fn(K, Vec<V>) -> R,
    K: Eq + Hash + Clone,
{
    let mut lookup = Lookup::new();
    for element in &input {
        lookup.push(key_selector(element), element_selector(element));
    }
    lookup
        .into_iter()
        .map(|(key, values)| result(key, values))
        .collect()
}
