use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::entry::{CatalogEntry, comparison_key};

/// How a phrase was resolved against the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// The phrase key equals the entry key.
    Exact,
    /// The entry key is the longest key contained in the phrase key.
    Partial,
}

/// A successful catalog lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogMatch<'a> {
    pub entry: &'a CatalogEntry,
    pub kind: MatchKind,
}

/// Ordered, read-only product catalog for one selling session.
///
/// Order matters: ties in lookup go to the entry seen first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CatalogEntry>", into = "Vec<CatalogEntry>")]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Build a catalog, keeping catalog order.
    ///
    /// Names that collapse to the same comparison key are kept, but only the
    /// first of them can ever be matched exactly.
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.key()) {
                warn!(product = entry.name(), key = entry.key(), "duplicate catalog key; first entry wins");
            }
        }
        Self { entries }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a normalized product phrase.
    ///
    /// 1. exact key match, first in catalog order;
    /// 2. otherwise the longest entry key that is a substring of the phrase
    ///    key (first in catalog order on equal length);
    /// 3. otherwise `None`.
    ///
    /// A longer name containing a shorter one wins: with both "manzana" and
    /// "manzana verde" listed, "manzana verde grande" resolves to the latter.
    pub fn lookup(&self, phrase: &str) -> Option<CatalogMatch<'_>> {
        let key = comparison_key(phrase);
        if key.is_empty() {
            return None;
        }

        if let Some(entry) = self.entries.iter().find(|e| e.key() == key) {
            debug!(phrase, product = entry.name(), "exact catalog match");
            return Some(CatalogMatch {
                entry,
                kind: MatchKind::Exact,
            });
        }

        let mut best: Option<&CatalogEntry> = None;
        for entry in &self.entries {
            if entry.key().is_empty() || !key.contains(entry.key()) {
                continue;
            }
            // Strictly longer only, so the earlier entry keeps ties.
            if best.is_none_or(|b| entry.key().len() > b.key().len()) {
                best = Some(entry);
            }
        }

        match best {
            Some(entry) => {
                debug!(phrase, product = entry.name(), "partial catalog match");
                Some(CatalogMatch {
                    entry,
                    kind: MatchKind::Partial,
                })
            }
            None => {
                debug!(phrase, catalog_size = self.entries.len(), "no catalog match");
                None
            }
        }
    }
}

impl From<Vec<CatalogEntry>> for Catalog {
    fn from(entries: Vec<CatalogEntry>) -> Self {
        Catalog::new(entries)
    }
}

impl From<Catalog> for Vec<CatalogEntry> {
    fn from(catalog: Catalog) -> Self {
        catalog.entries
    }
}

impl FromIterator<CatalogEntry> for Catalog {
    fn from_iter<I: IntoIterator<Item = CatalogEntry>>(iter: I) -> Self {
        Catalog::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use voxledger_core::Money;

    fn catalog(items: &[(&str, u64)]) -> Catalog {
        items
            .iter()
            .map(|(name, price)| CatalogEntry::new(*name, *price).unwrap())
            .collect()
    }

    #[test]
    fn exact_match_ignores_accents() {
        let c = catalog(&[("limón", 200), ("pera", 180)]);
        let m = c.lookup("limon").unwrap();
        assert_eq!(m.kind, MatchKind::Exact);
        assert_eq!(m.entry.unit_price(), Money::new(200));
    }

    #[test]
    fn partial_match_tolerates_plurals_and_padding() {
        let c = catalog(&[("pera", 180), ("manzana", 150)]);
        let m = c.lookup("peras").unwrap();
        assert_eq!(m.kind, MatchKind::Partial);
        assert_eq!(m.entry.name(), "pera");

        let m = c.lookup("manzana roja por favor").unwrap();
        assert_eq!(m.entry.name(), "manzana");
    }

    #[test]
    fn longest_partial_key_wins() {
        let c = catalog(&[("pan", 50), ("tomate", 90)]);
        // "tomate cherry" contains "tomate"; nothing shorter competes.
        assert_eq!(c.lookup("tomate cherry").unwrap().entry.name(), "tomate");

        let c = catalog(&[("pan", 50), ("manzana", 150), ("manzana verde", 170)]);
        let m = c.lookup("manzana verde grande").unwrap();
        assert_eq!(m.entry.name(), "manzana verde");
    }

    #[test]
    fn longer_containing_name_shadows_intended_product() {
        // Known ambiguity of the longest-substring policy: "panceta" contains
        // "pan", so a shop listing only bread matches bacon requests to it.
        let c = catalog(&[("pan", 50)]);
        assert_eq!(c.lookup("panceta").unwrap().entry.name(), "pan");
    }

    #[test]
    fn equal_length_partial_tie_goes_to_first_entry() {
        let c = catalog(&[("papa", 70), ("pera", 180)]);
        let m = c.lookup("pera papa").unwrap();
        assert_eq!(m.entry.name(), "papa");
    }

    #[test]
    fn duplicate_keys_first_wins() {
        let c = catalog(&[("limón", 200), ("limon", 999)]);
        assert_eq!(c.lookup("limon").unwrap().entry.unit_price(), Money::new(200));
    }

    #[test]
    fn empty_catalog_and_empty_phrase_never_match() {
        assert!(Catalog::empty().lookup("manzana").is_none());
        let c = catalog(&[("manzana", 150)]);
        assert!(c.lookup("").is_none());
        assert!(c.lookup("42").is_none());
        assert!(c.lookup("kumquat").is_none());
    }

    #[test]
    fn catalog_deserializes_from_list() {
        let c: Catalog =
            serde_json::from_str(r#"[{"name":"pan","price":50},{"name":"leche","price":120}]"#)
                .unwrap();
        assert_eq!(c.len(), 2);
        assert_eq!(c.entries()[1].name(), "leche");
    }

    proptest! {
        #![proptest_config(ProptestConfig { cases: 256, .. ProptestConfig::default() })]

        #[test]
        fn lookup_prefers_exact_then_longest_contained(
            names in prop::collection::vec("[a-z]{1,6}", 1..8),
            phrase in "[a-z ]{0,14}",
        ) {
            let c: Catalog = names
                .iter()
                .map(|n| CatalogEntry::new(n.as_str(), 10).unwrap())
                .collect();
            let key = comparison_key(&phrase);
            let found = c.lookup(&phrase);

            let exact = c.entries().iter().position(|e| !key.is_empty() && e.key() == key);
            let contained: Vec<(usize, &CatalogEntry)> = c
                .entries()
                .iter()
                .enumerate()
                .filter(|(_, e)| !key.is_empty() && key.contains(e.key()))
                .collect();

            match (exact, found) {
                (Some(idx), Some(m)) => {
                    prop_assert_eq!(m.kind, MatchKind::Exact);
                    prop_assert!(std::ptr::eq(m.entry, &c.entries()[idx]));
                }
                (None, Some(m)) => {
                    prop_assert_eq!(m.kind, MatchKind::Partial);
                    prop_assert!(key.contains(m.entry.key()));
                    let longest = contained.iter().map(|(_, e)| e.key().len()).max().unwrap_or(0);
                    prop_assert_eq!(m.entry.key().len(), longest);
                    let first_longest = contained
                        .iter()
                        .find(|(_, e)| e.key().len() == longest)
                        .map(|(_, e)| *e);
                    prop_assert!(first_longest.is_some_and(|e| std::ptr::eq(e, m.entry)));
                }
                (None, None) => prop_assert!(contained.is_empty()),
                (Some(_), None) => prop_assert!(false, "exact key {} was not matched", key),
            }
        }

        #[test]
        fn every_entry_finds_itself(names in prop::collection::vec("[a-z]{1,6}", 1..8)) {
            let c: Catalog = names
                .iter()
                .map(|n| CatalogEntry::new(n.as_str(), 10).unwrap())
                .collect();
            for name in &names {
                let m = c.lookup(name).unwrap();
                prop_assert_eq!(m.kind, MatchKind::Exact);
                prop_assert_eq!(m.entry.key(), name.as_str());
            }
        }
    }
}
