//! Entity models for near-Earth objects and their close approaches
//!
//! A `NearEarthObject` carries the semantic and physical parameters of one
//! object: its primary designation (required, unique), optional IAU name,
//! optional diameter in kilometers, and a hazard flag. A `CloseApproach`
//! records one pass of an object by Earth: the approach time, the nominal
//! distance in astronomical units, and the relative velocity in km/s.
//!
//! Both sides of the relation are wired up once, by `NeoDatabase`: each NEO
//! then holds its approaches, and each approach holds a non-owning handle
//! back to its NEO. Construction normalizes the quirks of the source data
//! (missing names, unknown diameters, unparsable timestamps) into explicit
//! absent values instead of raising errors.

use std::fmt;
use std::rc::{Rc, Weak};

use chrono::NaiveDateTime;
use once_cell::unsync::OnceCell;
use serde::Serialize;

use crate::core::error::{NeoError, Result};
use crate::core::time;

/// A near-Earth object (NEO).
///
/// The `approaches` cell starts unset and is populated exactly once during
/// database linking; before that, [`NearEarthObject::approaches`] reads as
/// empty.
#[derive(Debug)]
pub struct NearEarthObject {
    designation: String,
    name: Option<String>,
    diameter: f64,
    hazardous: bool,
    approaches: OnceCell<Vec<Rc<CloseApproach>>>,
}

impl NearEarthObject {
    /// Create a new `NearEarthObject` from raw dataset fields.
    ///
    /// Normalization rules:
    /// - an empty name becomes no name at all
    /// - an absent or zero diameter becomes `f64::NAN` (unknown, which is
    ///   distinct from a measured zero)
    ///
    /// An empty designation violates the caller contract and is the one
    /// construction-time error.
    pub fn new(
        designation: impl Into<String>,
        name: Option<String>,
        diameter: Option<f64>,
        hazardous: bool,
    ) -> Result<Self> {
        let designation = designation.into();
        if designation.is_empty() {
            return Err(NeoError::MissingDesignation);
        }
        Ok(Self {
            designation,
            name: name.filter(|n| !n.is_empty()),
            diameter: normalize_measure(diameter),
            hazardous,
            approaches: OnceCell::new(),
        })
    }

    /// The primary designation, unique across the dataset.
    pub fn designation(&self) -> &str {
        &self.designation
    }

    /// The IAU name, if this object has been given one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Diameter in kilometers; `NAN` when unknown.
    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    /// Whether NASA has flagged this object as potentially hazardous.
    pub fn is_hazardous(&self) -> bool {
        self.hazardous
    }

    /// Designation plus name when one exists, e.g. `433 (Eros)`.
    pub fn fullname(&self) -> String {
        match &self.name {
            Some(name) => format!("{} ({})", self.designation, name),
            None => self.designation.clone(),
        }
    }

    /// This object's close approaches, in dataset order.
    ///
    /// Empty until the database has linked the collections.
    pub fn approaches(&self) -> &[Rc<CloseApproach>] {
        self.approaches.get().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Canonical serialized view of this NEO.
    pub fn record(&self) -> NeoRecord {
        NeoRecord {
            designation: self.designation.clone(),
            name: self.name.clone().unwrap_or_default(),
            diameter_km: self.diameter,
            potentially_hazardous: self.hazardous,
        }
    }

    /// Attach this NEO's approaches. Called once per NEO during linking.
    pub(crate) fn link_approaches(&self, group: Vec<Rc<CloseApproach>>) {
        let _ = self.approaches.set(group);
    }
}

impl fmt::Display for NearEarthObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let diameter = if self.diameter.is_nan() {
            "an unknown diameter".to_string()
        } else {
            format!("a diameter of {:.3} km", self.diameter)
        };
        write!(
            f,
            "NEO {} has {} and {} potentially hazardous",
            self.fullname(),
            diameter,
            if self.hazardous { "is" } else { "is not" }
        )
    }
}

/// A single close approach to Earth by an NEO.
///
/// The `neo` cell starts unset; linking fills it with a weak handle to the
/// owning [`NearEarthObject`], or leaves it unset forever when the
/// designation matches no known object. The NEO collection owns the strong
/// references, so the back-reference never forms an ownership cycle.
#[derive(Debug)]
pub struct CloseApproach {
    designation: String,
    time: Option<NaiveDateTime>,
    distance: f64,
    velocity: f64,
    neo: OnceCell<Weak<NearEarthObject>>,
}

impl CloseApproach {
    /// Create a new `CloseApproach` from raw dataset fields.
    ///
    /// The timestamp is parsed from the dataset's calendar-date format;
    /// missing or unparsable input yields no time rather than an error.
    /// Absent or zero distance and velocity normalize to `NAN`. An empty
    /// designation is a caller contract violation.
    pub fn new(
        designation: impl Into<String>,
        time: Option<&str>,
        distance: Option<f64>,
        velocity: Option<f64>,
    ) -> Result<Self> {
        let designation = designation.into();
        if designation.is_empty() {
            return Err(NeoError::MissingDesignation);
        }
        Ok(Self {
            designation,
            time: time.and_then(time::parse_cd),
            distance: normalize_measure(distance),
            velocity: normalize_measure(velocity),
            neo: OnceCell::new(),
        })
    }

    /// The designation this approach was recorded under.
    ///
    /// Read-only; equal to the owning NEO's primary designation.
    pub fn designation(&self) -> &str {
        &self.designation
    }

    /// Time of closest approach (UTC), when the dataset provided one.
    pub fn time(&self) -> Option<NaiveDateTime> {
        self.time
    }

    /// Formatted approach time, minute precision.
    pub fn time_str(&self) -> Option<String> {
        self.time.as_ref().map(time::format_time)
    }

    /// Nominal approach distance in astronomical units; `NAN` when unknown.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Relative approach velocity in km/s; `NAN` when unknown.
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// The NEO making this approach.
    ///
    /// `None` before linking, and permanently `None` for approaches whose
    /// designation matches no object in the dataset.
    pub fn neo(&self) -> Option<Rc<NearEarthObject>> {
        self.neo.get().and_then(Weak::upgrade)
    }

    /// Canonical serialized view of this approach.
    pub fn record(&self) -> ApproachRecord {
        ApproachRecord {
            datetime_utc: self.time_str().unwrap_or_default(),
            distance_au: self.distance,
            velocity_km_s: self.velocity,
        }
    }

    /// Attach the owning NEO. Called at most once during linking.
    pub(crate) fn link_neo(&self, neo: &Rc<NearEarthObject>) {
        let _ = self.neo.set(Rc::downgrade(neo));
    }
}

impl fmt::Display for CloseApproach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Prefer the linked NEO's full name; fall back to the raw
        // designation for approaches that never resolved.
        let subject = match self.neo() {
            Some(neo) => neo.fullname(),
            None => self.designation.clone(),
        };
        match &self.time {
            Some(t) => write!(
                f,
                "On {}, {} approaches Earth at a distance of {:.2} au and a velocity of {:.2} km/s",
                time::format_time(t),
                subject,
                self.distance,
                self.velocity
            ),
            None => write!(
                f,
                "At an unknown time, {} approaches Earth at a distance of {:.2} au and a velocity of {:.2} km/s",
                subject, self.distance, self.velocity
            ),
        }
    }
}

/// Serialized view of a [`NearEarthObject`].
///
/// An absent name serializes as the empty string; an unknown diameter stays
/// `NAN` (which becomes `null` in JSON output).
#[derive(Debug, Clone, Serialize)]
pub struct NeoRecord {
    pub designation: String,
    pub name: String,
    pub diameter_km: f64,
    pub potentially_hazardous: bool,
}

/// Serialized view of a [`CloseApproach`].
#[derive(Debug, Clone, Serialize)]
pub struct ApproachRecord {
    pub datetime_utc: String,
    pub distance_au: f64,
    pub velocity_km_s: f64,
}

/// Absent and zero-valued measurements both mean "unknown" in the source
/// data, and unknown is distinct from zero.
fn normalize_measure(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v != 0.0 => v,
        _ => f64::NAN,
    }
}
