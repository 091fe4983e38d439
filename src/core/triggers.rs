// canonical trigger numbering + per-event resolution
use std::collections::{BTreeSet, HashMap};

use crate::core::record::TriggerRecord;

/// Decision code for a trigger that was not run in an event.
pub const NOT_EVALUATED: i32 = -1;

/// Drop the version suffix: everything from the last `_` on.
/// Labels without `_` come back unchanged.
pub fn strip_version(label: &str) -> &str {
    match label.rfind('_') {
        Some(last) => &label[..last],
        None => label,
    }
}

/// Versionless trigger names in lexicographic order; a name's position is its
/// output index. Also remembers, for every raw catalog entry, which canonical
/// slot it lands in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalTriggerList {
    names: Vec<String>,
    positions: HashMap<String, usize>,
    catalog_slots: Vec<usize>,
}

impl CanonicalTriggerList {
    pub fn from_catalog<I, S>(raw_labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let raw: Vec<S> = raw_labels.into_iter().collect();

        let set: BTreeSet<&str> = raw.iter().map(|l| strip_version(l.as_ref())).collect();
        let names: Vec<String> = set.into_iter().map(str::to_string).collect();
        let positions: HashMap<String, usize> = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();

        //every raw label has a slot, the set was built from them
        let catalog_slots = raw
            .iter()
            .filter_map(|l| positions.get(strip_version(l.as_ref())).copied())
            .collect();

        Self {
            names,
            positions,
            catalog_slots,
        }
    }

    /// Canonical position of a raw (versioned or not) label.
    pub fn position(&self, raw_label: &str) -> Option<usize> {
        self.positions.get(strip_version(raw_label)).copied()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Canonical slot of each raw catalog entry, in catalog order.
    pub fn catalog_slots(&self) -> &[usize] {
        &self.catalog_slots
    }

    /// Map one event's raw decisions onto canonical slots.
    ///
    /// Walks the catalog in order, skipping `NOT_EVALUATED` decisions. A later
    /// raw label overwrites an earlier one sharing its canonical slot. Slots at
    /// or beyond `bound` are dropped. A missing decision counts as not
    /// evaluated, a missing prescale factor as 1.
    pub fn resolve(&self, decisions: &[i32], hlt_prescales: &[u32], l1_prescales: &[u32], bound: usize) -> TriggerRecord {
        let mut record = TriggerRecord::with_len(self.len().min(bound));

        for (raw_idx, &slot) in self.catalog_slots.iter().enumerate() {
            let decision = decisions.get(raw_idx).copied().unwrap_or(NOT_EVALUATED);
            if decision == NOT_EVALUATED || slot >= record.ntrg() {
                continue;
            }

            let hlt = hlt_prescales.get(raw_idx).copied().unwrap_or(1);
            let l1 = l1_prescales.get(raw_idx).copied().unwrap_or(1);

            record.decisions[slot] = Some(decision != 0);
            record.prescales[slot] = hlt.saturating_mul(l1);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_version_keeps_prefix_before_last_underscore() {
        assert_eq!(strip_version("HLT_Jet150_v3"), "HLT_Jet150");
        assert_eq!(strip_version("HLT_Jet150"), "HLT");
        assert_eq!(strip_version("NoVersionLabel"), "NoVersionLabel");
        assert_eq!(strip_version("trailing_"), "trailing");
        assert_eq!(strip_version(""), "");
    }

    #[test]
    fn versions_collapse_and_names_sort() {
        let list = CanonicalTriggerList::from_catalog(["HLT_Jet150_v3", "HLT_Jet150_v4", "HLT_Jet80_v1"]);

        assert_eq!(list.names(), ["HLT_Jet150".to_string(), "HLT_Jet80".to_string()]);
        assert_eq!(list.catalog_slots(), [0, 0, 1]);
        assert_eq!(list.position("HLT_Jet80_v7"), Some(1));
        assert_eq!(list.position("HLT_Jet60_v1"), None);
    }

    #[test]
    fn label_without_separator_passes_through() {
        let list = CanonicalTriggerList::from_catalog(vec!["NoVersionLabel".to_string()]);
        assert_eq!(list.names(), ["NoVersionLabel".to_string()]);
        assert_eq!(list.position("NoVersionLabel"), Some(0));
    }

    #[test]
    fn order_is_lexicographic_not_catalog_order() {
        let list = CanonicalTriggerList::from_catalog(["HLT_Jet80_v1", "HLT_Jet140_v2", "HLT_DiJetAve30_v1"]);
        assert_eq!(
            list.names(),
            ["HLT_DiJetAve30".to_string(), "HLT_Jet140".to_string(), "HLT_Jet80".to_string()]
        );
        assert_eq!(list.catalog_slots(), [2, 1, 0]);
    }

    #[test]
    fn resolve_skips_unevaluated_and_last_write_wins() {
        // raw labels map to canonical [0, 1, 1]
        let list = CanonicalTriggerList::from_catalog(["A_v1", "B_v1", "B_v2"]);
        assert_eq!(list.catalog_slots(), [0, 1, 1]);

        let record = list.resolve(&[-1, 1, 0], &[2, 3, 5], &[7, 11, 13], 64);

        assert_eq!(record.ntrg(), 2);
        assert_eq!(record.decisions[0], None);
        assert_eq!(record.prescales[0], 0);
        assert_eq!(record.decisions[1], Some(false));
        assert_eq!(record.prescales[1], 5 * 13);
        assert!(!record.fired(1));
    }

    #[test]
    fn resolve_truncates_to_bound_and_tolerates_short_arrays() {
        let list = CanonicalTriggerList::from_catalog(["A_v1", "B_v1", "C_v1"]);

        let record = list.resolve(&[1, 1], &[4], &[], 2);

        assert_eq!(record.ntrg(), 2);
        assert_eq!(record.decisions, vec![Some(true), Some(true)]);
        // missing prescale factors count as 1
        assert_eq!(record.prescales, vec![4, 1]);
    }

    #[test]
    fn prescale_product_saturates() {
        let list = CanonicalTriggerList::from_catalog(["A_v1"]);
        let record = list.resolve(&[1], &[u32::MAX], &[2], 64);
        assert_eq!(record.prescales[0], u32::MAX);
    }
}
