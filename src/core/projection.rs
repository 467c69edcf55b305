use std::borrow::Borrow;
use std::collections::{BTreeMap, BTreeSet};

/// Keep only the entries whose key is in `keys`.
///
/// Independent of any provider schema: the result's key set is exactly
/// `keys ∩ keys(entries)`. Later duplicates in `entries` replace earlier ones.
pub fn project<I, K, V>(entries: I, keys: &BTreeSet<K>) -> BTreeMap<K, V>
where
    I: IntoIterator<Item = (K, V)>,
    K: Ord,
{
    entries
        .into_iter()
        .filter(|(key, _)| keys.contains(key))
        .collect()
}

/// 回傳請求了但資料中不存在的欄位名稱
pub fn missing_keys<'a, K, Q, V>(keys: &'a BTreeSet<K>, present: &BTreeMap<Q, V>) -> Vec<&'a K>
where
    K: Ord + Borrow<Q>,
    Q: Ord,
{
    keys.iter()
        .filter(|key| !present.contains_key((*key).borrow()))
        .collect()
}
