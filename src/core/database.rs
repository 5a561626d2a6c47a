//! The in-memory NEO database: linking, indexing, and querying
//!
//! `NeoDatabase::new` consumes the two unlinked collections produced by
//! extraction and cross-references them in one construction pass:
//!
//! - a by-designation index over the NEOs (the primary key)
//! - a by-name index over the NEOs that have a name
//! - a grouping of close approaches by the designation they were recorded
//!   under
//!
//! With the indices built, every NEO receives its approach group and every
//! approach receives a weak handle to its NEO. The database is read-only
//! from then on: lookups never fail (a miss is `None`), and `query` streams
//! matching approaches lazily without reordering them.

use std::collections::HashMap;
use std::rc::Rc;

use crate::core::filters::Filter;
use crate::core::models::{CloseApproach, NearEarthObject};

/// A database of near-Earth objects and their close approaches.
///
/// Holds both entity collections for the life of the process, plus the two
/// lookup indices. Built once; never mutated afterwards.
pub struct NeoDatabase {
    neos: Vec<Rc<NearEarthObject>>,
    approaches: Vec<Rc<CloseApproach>>,
    by_designation: HashMap<String, Rc<NearEarthObject>>,
    by_name: HashMap<String, Rc<NearEarthObject>>,
}

impl NeoDatabase {
    /// Link the two collections and build the lookup indices.
    ///
    /// Precondition: the collections are unlinked (freshly constructed).
    /// Duplicate designations and duplicate names are data-integrity
    /// violations in the source; the indices keep the last occurrence.
    pub fn new(neos: Vec<NearEarthObject>, approaches: Vec<CloseApproach>) -> Self {
        let neos: Vec<Rc<NearEarthObject>> = neos.into_iter().map(Rc::new).collect();
        let approaches: Vec<Rc<CloseApproach>> = approaches.into_iter().map(Rc::new).collect();

        let mut by_designation = HashMap::with_capacity(neos.len());
        for neo in &neos {
            by_designation.insert(neo.designation().to_string(), Rc::clone(neo));
        }

        let mut by_name = HashMap::new();
        for neo in &neos {
            if let Some(name) = neo.name() {
                by_name.insert(name.to_string(), Rc::clone(neo));
            }
        }

        let mut grouped: HashMap<String, Vec<Rc<CloseApproach>>> = HashMap::new();
        for approach in &approaches {
            grouped
                .entry(approach.designation().to_string())
                .or_default()
                .push(Rc::clone(approach));
        }

        // Wire the NEO side first, then the approach side. Both reads go
        // against fully-built indices, so the end state is the same either
        // way.
        for neo in &neos {
            let group = grouped.get(neo.designation()).cloned().unwrap_or_default();
            neo.link_approaches(group);
        }

        for approach in &approaches {
            if let Some(neo) = by_designation.get(approach.designation()) {
                approach.link_neo(neo);
            }
            // No matching NEO: the approach stays unresolved but queryable.
        }

        Self {
            neos,
            approaches,
            by_designation,
            by_name,
        }
    }

    /// Every NEO in the dataset, in load order.
    pub fn neos(&self) -> &[Rc<NearEarthObject>] {
        &self.neos
    }

    /// Every close approach in the dataset, in load order.
    pub fn approaches(&self) -> &[Rc<CloseApproach>] {
        &self.approaches
    }

    /// Find an NEO by its primary designation.
    ///
    /// Exact string match; `None` when no object carries the designation.
    pub fn get_neo_by_designation(&self, designation: &str) -> Option<Rc<NearEarthObject>> {
        self.by_designation.get(designation).cloned()
    }

    /// Find an NEO by its IAU name.
    ///
    /// Exact string match. Unnamed objects are not reachable this way, and
    /// the empty string never matches anything.
    pub fn get_neo_by_name(&self, name: &str) -> Option<Rc<NearEarthObject>> {
        if name.is_empty() {
            return None;
        }
        self.by_name.get(name).cloned()
    }

    /// Stream the close approaches that satisfy every filter.
    ///
    /// With no filters, every approach is produced, in storage order. The
    /// returned iterator is lazy and single-pass; call `query` again to
    /// iterate anew.
    pub fn query<'a>(&'a self, filters: &'a [Filter]) -> Query<'a> {
        Query {
            inner: self.approaches.iter(),
            filters,
        }
    }
}

/// Lazy result stream over a [`NeoDatabase`] query.
///
/// Produces each matching approach on demand; holds only borrows into the
/// database, no external resources.
pub struct Query<'a> {
    inner: std::slice::Iter<'a, Rc<CloseApproach>>,
    filters: &'a [Filter],
}

impl<'a> Iterator for Query<'a> {
    type Item = &'a Rc<CloseApproach>;

    fn next(&mut self) -> Option<Self::Item> {
        let filters = self.filters;
        self.inner.find(|approach| {
            let approach: &CloseApproach = approach;
            filters.iter().all(|matches| matches(approach))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Result;

    fn sample_database() -> Result<NeoDatabase> {
        let neos = vec![
            NearEarthObject::new("433", Some("Eros".to_string()), Some(16.84), false)?,
            NearEarthObject::new("1862", Some("Apollo".to_string()), Some(1.5), true)?,
            NearEarthObject::new("2010 PK9", None, None, false)?,
        ];
        let approaches = vec![
            CloseApproach::new("433", Some("2029-Apr-13 21:46"), Some(0.002543), Some(7.42))?,
            CloseApproach::new("1862", Some("2005-Nov-06 04:25"), Some(0.0752), Some(8.22))?,
            CloseApproach::new("433", Some("2056-Apr-01 12:00"), Some(0.15), Some(5.1))?,
            CloseApproach::new("999999", Some("2020-Jan-01 00:00"), Some(0.5), Some(12.0))?,
        ];
        Ok(NeoDatabase::new(neos, approaches))
    }

    #[test]
    fn test_every_linked_approach_points_back_at_its_neo() {
        let db = sample_database().unwrap();
        for neo in db.neos() {
            for approach in neo.approaches() {
                assert!(Rc::ptr_eq(&approach.neo().unwrap(), neo));
            }
        }
    }

    #[test]
    fn test_every_resolved_approach_appears_once_in_its_neo() {
        let db = sample_database().unwrap();
        for approach in db.approaches() {
            if let Some(neo) = approach.neo() {
                let occurrences = neo
                    .approaches()
                    .iter()
                    .filter(|a| Rc::ptr_eq(a, approach))
                    .count();
                assert_eq!(occurrences, 1);
            }
        }
    }

    #[test]
    fn test_grouping_collects_every_approach_of_a_neo() {
        let db = sample_database().unwrap();
        let eros = db.get_neo_by_designation("433").unwrap();
        assert_eq!(eros.approaches().len(), 2);
        let first = &eros.approaches()[0];
        assert_eq!(first.neo().unwrap().name(), Some("Eros"));
        assert_eq!(first.record().distance_au, 0.002543);
    }

    #[test]
    fn test_linking_a_single_neo_approach_pair() {
        let neos =
            vec![NearEarthObject::new("433", Some("Eros".to_string()), Some(16.84), false).unwrap()];
        let approaches = vec![
            CloseApproach::new("433", Some("2029-Apr-13 21:46"), Some(0.002543), Some(7.42))
                .unwrap(),
        ];
        let db = NeoDatabase::new(neos, approaches);

        let eros = db.get_neo_by_designation("433").unwrap();
        assert_eq!(eros.approaches().len(), 1);
        let sole = &eros.approaches()[0];
        assert_eq!(sole.neo().unwrap().name(), Some("Eros"));
        assert_eq!(sole.record().distance_au, 0.002543);
    }

    #[test]
    fn test_unresolved_approach_stays_queryable() {
        let db = sample_database().unwrap();
        let orphan = db
            .approaches()
            .iter()
            .find(|a| a.designation() == "999999")
            .unwrap();
        assert!(orphan.neo().is_none());
        for neo in db.neos() {
            assert!(!neo.approaches().iter().any(|a| Rc::ptr_eq(a, orphan)));
        }
        // Still present in the unfiltered stream
        assert!(db.query(&[]).any(|a| Rc::ptr_eq(a, orphan)));
    }

    #[test]
    fn test_get_neo_by_designation() {
        let db = sample_database().unwrap();
        let apollo = db.get_neo_by_designation("1862").unwrap();
        assert_eq!(apollo.designation(), "1862");
        assert!(db.get_neo_by_designation("nope").is_none());
    }

    #[test]
    fn test_get_neo_by_name() {
        let db = sample_database().unwrap();
        let eros = db.get_neo_by_name("Eros").unwrap();
        assert_eq!(eros.designation(), "433");
        assert!(db.get_neo_by_name("Halley").is_none());
    }

    #[test]
    fn test_get_neo_by_empty_name_always_misses() {
        let db = sample_database().unwrap();
        assert!(db.get_neo_by_name("").is_none());
    }

    #[test]
    fn test_unnamed_neo_is_not_indexed_by_name() {
        let db = sample_database().unwrap();
        // "2010 PK9" has no name; it must be reachable only by designation
        assert!(db.get_neo_by_designation("2010 PK9").is_some());
        for (_, neo) in db.by_name.iter() {
            assert_ne!(neo.designation(), "2010 PK9");
        }
    }

    #[test]
    fn test_duplicate_designation_keeps_last() {
        let neos = vec![
            NearEarthObject::new("433", Some("Eros".to_string()), Some(16.84), false).unwrap(),
            NearEarthObject::new("433", None, None, true).unwrap(),
        ];
        let db = NeoDatabase::new(neos, Vec::new());
        let found = db.get_neo_by_designation("433").unwrap();
        assert_eq!(found.name(), None);
        assert!(found.is_hazardous());
    }

    #[test]
    fn test_duplicate_name_keeps_last() {
        let neos = vec![
            NearEarthObject::new("1862", Some("Apollo".to_string()), None, false).unwrap(),
            NearEarthObject::new("105", Some("Apollo".to_string()), None, false).unwrap(),
        ];
        let db = NeoDatabase::new(neos, Vec::new());
        let found = db.get_neo_by_name("Apollo").unwrap();
        assert_eq!(found.designation(), "105");
    }

    #[test]
    fn test_query_without_filters_yields_everything_in_order() {
        let db = sample_database().unwrap();
        let results: Vec<_> = db.query(&[]).collect();
        assert_eq!(results.len(), db.approaches().len());
        for (result, stored) in results.iter().zip(db.approaches()) {
            assert!(Rc::ptr_eq(result, stored));
        }
    }

    #[test]
    fn test_query_rejecting_filter_yields_nothing() {
        let db = sample_database().unwrap();
        let filters: Vec<Filter> = vec![Box::new(|_| false)];
        assert_eq!(db.query(&filters).count(), 0);
    }

    #[test]
    fn test_query_conjunction_is_an_intersection() {
        let db = sample_database().unwrap();
        let fast: Vec<Filter> = vec![Box::new(|a| a.velocity() > 7.0)];
        let near: Vec<Filter> = vec![Box::new(|a| a.distance() < 0.1)];
        let both: Vec<Filter> = vec![
            Box::new(|a| a.velocity() > 7.0),
            Box::new(|a| a.distance() < 0.1),
        ];

        let fast_set: Vec<_> = db.query(&fast).map(|a| a.designation().to_string()).collect();
        let near_set: Vec<_> = db.query(&near).map(|a| a.designation().to_string()).collect();
        let both_set: Vec<_> = db.query(&both).map(|a| a.designation().to_string()).collect();

        for designation in &both_set {
            assert!(fast_set.contains(designation));
            assert!(near_set.contains(designation));
        }
        assert_eq!(both_set.len(), 2);
    }

    #[test]
    fn test_query_is_lazy_and_single_pass() {
        let db = sample_database().unwrap();
        let mut stream = db.query(&[]);
        let first = stream.next().unwrap();
        assert!(Rc::ptr_eq(first, &db.approaches()[0]));
        // Draining the rest exhausts the stream for good
        let remaining = stream.count();
        assert_eq!(remaining, db.approaches().len() - 1);
    }
}
