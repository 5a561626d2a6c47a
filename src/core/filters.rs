//! Predicate filters for close approach queries
//!
//! A [`Filter`] is a pure boxed predicate over a [`CloseApproach`]. The
//! query engine applies a conjunction of them; this module provides the
//! individual predicate builders plus [`Criteria`], which assembles a filter
//! list from user-level options the way the CLI collects them.
//!
//! Absent data never matches a criterion: an approach with no parsed time
//! fails every date filter, an unknown (`NAN`) measure fails every range
//! bound, and an approach with no resolved NEO fails the NEO-derived
//! filters (diameter, hazardous).

use chrono::NaiveDate;

use crate::core::models::CloseApproach;

/// A pure predicate applied to each close approach at query time.
pub type Filter = Box<dyn Fn(&CloseApproach) -> bool>;

/// Match approaches that occur on exactly this date.
pub fn on_date(date: NaiveDate) -> Filter {
    Box::new(move |a| a.time().map(|t| t.date() == date).unwrap_or(false))
}

/// Match approaches on or after this date.
pub fn starting_on(date: NaiveDate) -> Filter {
    Box::new(move |a| a.time().map(|t| t.date() >= date).unwrap_or(false))
}

/// Match approaches on or before this date.
pub fn ending_on(date: NaiveDate) -> Filter {
    Box::new(move |a| a.time().map(|t| t.date() <= date).unwrap_or(false))
}

/// Match approaches at or beyond this distance (au).
pub fn min_distance(au: f64) -> Filter {
    // NAN comparisons are false, so unknown distances never match
    Box::new(move |a| a.distance() >= au)
}

/// Match approaches at or within this distance (au).
pub fn max_distance(au: f64) -> Filter {
    Box::new(move |a| a.distance() <= au)
}

/// Match approaches at or above this relative velocity (km/s).
pub fn min_velocity(km_s: f64) -> Filter {
    Box::new(move |a| a.velocity() >= km_s)
}

/// Match approaches at or below this relative velocity (km/s).
pub fn max_velocity(km_s: f64) -> Filter {
    Box::new(move |a| a.velocity() <= km_s)
}

/// Match approaches whose NEO is at least this large (km).
pub fn min_diameter(km: f64) -> Filter {
    Box::new(move |a| a.neo().map(|n| n.diameter() >= km).unwrap_or(false))
}

/// Match approaches whose NEO is at most this large (km).
pub fn max_diameter(km: f64) -> Filter {
    Box::new(move |a| a.neo().map(|n| n.diameter() <= km).unwrap_or(false))
}

/// Match approaches whose NEO's hazard flag equals `flag`.
pub fn hazardous(flag: bool) -> Filter {
    Box::new(move |a| a.neo().map(|n| n.is_hazardous() == flag).unwrap_or(false))
}

/// User-level query criteria, each optional.
///
/// Mirrors the options the CLI accepts; `build` turns the present ones into
/// the predicate list consumed by `NeoDatabase::query`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Criteria {
    pub date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub min_distance: Option<f64>,
    pub max_distance: Option<f64>,
    pub min_velocity: Option<f64>,
    pub max_velocity: Option<f64>,
    pub min_diameter: Option<f64>,
    pub max_diameter: Option<f64>,
    pub hazardous: Option<bool>,
}

impl Criteria {
    /// Build the filter list, cheapest predicates first.
    pub fn build(&self) -> Vec<Filter> {
        let mut filters = Vec::new();
        if let Some(date) = self.date {
            filters.push(on_date(date));
        }
        if let Some(date) = self.start_date {
            filters.push(starting_on(date));
        }
        if let Some(date) = self.end_date {
            filters.push(ending_on(date));
        }
        if let Some(au) = self.min_distance {
            filters.push(min_distance(au));
        }
        if let Some(au) = self.max_distance {
            filters.push(max_distance(au));
        }
        if let Some(km_s) = self.min_velocity {
            filters.push(min_velocity(km_s));
        }
        if let Some(km_s) = self.max_velocity {
            filters.push(max_velocity(km_s));
        }
        if let Some(km) = self.min_diameter {
            filters.push(min_diameter(km));
        }
        if let Some(km) = self.max_diameter {
            filters.push(max_diameter(km));
        }
        if let Some(flag) = self.hazardous {
            filters.push(hazardous(flag));
        }
        filters
    }
}

/// Cap a result stream at `n` items; `n == 0` means no limit.
pub fn limit<I: Iterator>(results: I, n: usize) -> impl Iterator<Item = I::Item> {
    results.take(if n == 0 { usize::MAX } else { n })
}
