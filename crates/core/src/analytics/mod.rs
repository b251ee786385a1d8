pub mod benchmark;
pub mod breakdown;
pub mod diff;
pub mod overlap;
pub mod stats;
pub mod summary;
pub mod table;
pub mod treemap;
pub mod valuation;
pub mod weighting;

use std::collections::HashMap;

/// String-keyed groups that remember first-insertion order, so equal sort keys
/// come out in input order.
#[derive(Debug, Clone)]
pub(crate) struct OrderedGroups<V> {
    index: HashMap<String, usize>,
    groups: Vec<(String, V)>,
}

impl<V> Default for OrderedGroups<V> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            groups: Vec::new(),
        }
    }
}

impl<V> OrderedGroups<V> {
    pub(crate) fn entry(&mut self, key: &str, init: impl FnOnce() -> V) -> &mut V {
        let idx = match self.index.get(key) {
            Some(idx) => *idx,
            None => {
                self.groups.push((key.to_string(), init()));
                self.index.insert(key.to_string(), self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        &mut self.groups[idx].1
    }

    pub(crate) fn into_vec(self) -> Vec<(String, V)> {
        self.groups
    }
}

/// Stable descending sort by an `f64` key; NaN sorts last.
pub(crate) fn sort_desc_by<T>(items: &mut [T], key: impl Fn(&T) -> f64) {
    items.sort_by(|a, b| {
        let (ka, kb) = (key(a), key(b));
        kb.partial_cmp(&ka).unwrap_or_else(|| ka.is_nan().cmp(&kb.is_nan()))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_keep_insertion_order() {
        let mut g = OrderedGroups::<u32>::default();
        *g.entry("b", || 0) += 1;
        *g.entry("a", || 0) += 1;
        *g.entry("b", || 0) += 1;
        assert_eq!(g.into_vec(), vec![("b".to_string(), 2), ("a".to_string(), 1)]);
    }

    #[test]
    fn descending_sort_is_stable() {
        let mut v = vec![("x", 1.0), ("y", 3.0), ("z", 1.0), ("n", f64::NAN)];
        sort_desc_by(&mut v, |p| p.1);
        let names: Vec<&str> = v.iter().map(|p| p.0).collect();
        assert_eq!(names, vec!["y", "x", "z", "n"]);
    }
}
