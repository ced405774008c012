//! Sequence helpers over typed slices (v0.1)
//!
//! Grouping and keyed dedup share one pass: [`group_by`] builds the buckets,
//! [`unique_by`] keeps the head of each. Bucket order and order within a
//! bucket always follow first sight in the input.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::hash::Hash;

use indexmap::IndexMap;
use rand::Rng;

use crate::error::{ArgPosition, Result, UtilError};
use crate::key::DedupKey;

/// Partition items into buckets keyed by `key_fn`
///
/// The key function runs once per item, in input order.
pub fn group_by<T, K, I, F>(items: I, mut key_fn: F) -> IndexMap<K, Vec<T>>
where
    I: IntoIterator<Item = T>,
    K: Hash + Eq,
    F: FnMut(&T) -> K,
{
    let mut groups: IndexMap<K, Vec<T>> = IndexMap::new();
    for item in items {
        let key = key_fn(&item);
        groups.entry(key).or_default().push(item);
    }
    groups
}

/// Count items per key, keys in first-seen order
pub fn count_by<T, K, I, F>(items: I, mut key_fn: F) -> IndexMap<K, usize>
where
    I: IntoIterator<Item = T>,
    K: Hash + Eq,
    F: FnMut(&T) -> K,
{
    let mut counts: IndexMap<K, usize> = IndexMap::new();
    for item in items {
        *counts.entry(key_fn(&item)).or_insert(0) += 1;
    }
    counts
}

/// First occurrence of each distinct value, order preserved
pub fn unique<T: DedupKey + Clone>(items: &[T]) -> Vec<T> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .iter()
        .filter(|item| seen.insert(item.dedup_key()))
        .cloned()
        .collect()
}

/// First item per key; later items sharing a key are dropped even if they
/// differ in fields the key does not cover
pub fn unique_by<T, K, F>(items: &[T], key_fn: F) -> Vec<T>
where
    T: Clone,
    K: Hash + Eq,
    F: FnMut(&&T) -> K,
{
    group_by(items.iter(), key_fn)
        .into_values()
        .filter_map(|bucket| bucket.into_iter().next())
        .cloned()
        .collect()
}

/// Split into consecutive chunks of `size`; the last chunk may be shorter
pub fn chunk<T: Clone>(items: &[T], size: usize) -> Result<Vec<Vec<T>>> {
    if size == 0 {
        return Err(UtilError::invalid(ArgPosition::Second, "a positive chunk size"));
    }
    Ok(items.chunks(size).map(<[T]>::to_vec).collect())
}

/// Drop the `None`s
pub fn non_null<T, I>(items: I) -> Vec<T>
where
    I: IntoIterator<Item = Option<T>>,
{
    items.into_iter().flatten().collect()
}

pub fn concat<T: Clone>(items: &[T], values: &[T]) -> Vec<T> {
    let mut out = Vec::with_capacity(items.len() + values.len());
    out.extend_from_slice(items);
    out.extend_from_slice(values);
    out
}

/// Everything after the first `n` items
pub fn drop<T: Clone>(items: &[T], n: usize) -> Vec<T> {
    items.iter().skip(n).cloned().collect()
}

/// Everything before the last `n` items
///
/// `n == 0` yields an empty vector, matching the slice(0, -0) behavior the
/// helper has always had.
pub fn drop_right<T: Clone>(items: &[T], n: usize) -> Vec<T> {
    if n == 0 {
        return Vec::new();
    }
    items[..items.len().saturating_sub(n)].to_vec()
}

pub fn reverse<T: Clone>(items: &[T]) -> Vec<T> {
    items.iter().rev().cloned().collect()
}

pub fn fill<T: Clone>(value: T, len: usize) -> Vec<T> {
    vec![value; len]
}

/// Build a map from pairs; a repeated key keeps its first position and its
/// last value
pub fn from_pairs<K, V, I>(pairs: I) -> IndexMap<K, V>
where
    I: IntoIterator<Item = (K, V)>,
    K: Hash + Eq,
{
    let mut map = IndexMap::new();
    for (k, v) in pairs {
        map.insert(k, v);
    }
    map
}

/// Remove every item equal (by default equality) to one of `remove`
pub fn remove_items<T: DedupKey + Clone>(items: &[T], remove: &[T]) -> Vec<T> {
    let removed: HashSet<_> = remove.iter().map(DedupKey::dedup_key).collect();
    items
        .iter()
        .filter(|item| !removed.contains(&item.dedup_key()))
        .cloned()
        .collect()
}

/// Items of the first array present in every other array
///
/// Keeps the first array's order and its duplicates.
pub fn intersection<T: DedupKey + Clone>(arrays: &[Vec<T>]) -> Vec<T> {
    let Some((first, rest)) = arrays.split_first() else {
        return Vec::new();
    };
    let others: Vec<HashSet<T::Key>> = rest
        .iter()
        .map(|array| array.iter().map(DedupKey::dedup_key).collect())
        .collect();
    first
        .iter()
        .filter(|item| {
            let key = item.dedup_key();
            others.iter().all(|set| set.contains(&key))
        })
        .cloned()
        .collect()
}

/// Flatten and dedup, first-seen order
pub fn union<T: DedupKey + Clone>(arrays: &[Vec<T>]) -> Vec<T> {
    let flat: Vec<T> = arrays.iter().flatten().cloned().collect();
    unique(&flat)
}

/// Sort direction for [`order_by`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl std::str::FromStr for Direction {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        match s {
            "asc" => Ok(Direction::Asc),
            "desc" => Ok(Direction::Desc),
            _ => Err(()),
        }
    }
}

type Compare<'a, T> = Box<dyn Fn(&T, &T) -> Ordering + 'a>;

/// One sort criterion: a comparison plus a direction
pub struct OrderKey<'a, T> {
    compare: Compare<'a, T>,
    direction: Direction,
}

impl<'a, T> OrderKey<'a, T> {
    pub fn asc<K: Ord, F: Fn(&T) -> K + 'a>(key: F) -> Self {
        Self::by(move |a, b| key(a).cmp(&key(b)), Direction::Asc)
    }

    pub fn desc<K: Ord, F: Fn(&T) -> K + 'a>(key: F) -> Self {
        Self::by(move |a, b| key(a).cmp(&key(b)), Direction::Desc)
    }

    pub fn by<F: Fn(&T, &T) -> Ordering + 'a>(compare: F, direction: Direction) -> Self {
        Self {
            compare: Box::new(compare),
            direction,
        }
    }

    fn apply(&self, a: &T, b: &T) -> Ordering {
        let ord = (self.compare)(a, b);
        match self.direction {
            Direction::Asc => ord,
            Direction::Desc => ord.reverse(),
        }
    }
}

/// Stable multi-key sort; ties fall through to the next key
pub fn order_by<T: Clone>(items: &[T], orders: &[OrderKey<'_, T>]) -> Vec<T> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| {
        orders
            .iter()
            .map(|order| order.apply(a, b))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    });
    sorted
}

/// Fisher-Yates shuffle of a copy
pub fn shuffle<T: Clone>(items: &[T]) -> Vec<T> {
    shuffle_with(items, &mut rand::thread_rng())
}

pub fn shuffle_with<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.gen_range(0..=i);
        shuffled.swap(i, j);
    }
    shuffled
}
