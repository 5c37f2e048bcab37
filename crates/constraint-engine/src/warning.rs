//! Repair Warnings
//!
//! Recoverable inconsistencies are repaired in place and reported through
//! these values instead of failing the request.

use property_catalog::PorchType;
use serde::Serialize;
use std::fmt;

/// A repair the engine made to a user request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// Subclass not allowed for the style, style default used instead
    SubclassReplaced {
        style: String,
        requested: u16,
        resolved: u16,
    },
    /// Style not in the catalog, first catalog subclass used
    UnknownStyle { style: String, resolved: u16 },
    /// Gate says the feature is absent, dependent value forced to its sentinel
    GateCleared {
        field: &'static str,
        gate: &'static str,
        requested: String,
        resolved: String,
    },
    /// Gate says the feature is present but the request was the sentinel
    SentinelRepaired {
        field: &'static str,
        resolved: &'static str,
    },
    /// Numeric request pulled into its allowed range
    Clamped {
        field: &'static str,
        requested: f64,
        resolved: f64,
    },
    /// Requested first floor area moved so both floors stay plausible
    FloorSplitAdjusted {
        requested: f64,
        first_flr_sf: f64,
        second_flr_sf: f64,
    },
    /// A second floor area was supplied, but it is always the remainder
    SecondFloorOverridden { requested: f64, resolved: f64 },
    /// More porch types selected than can be active at once
    PorchSelectionTruncated {
        kept: Vec<PorchType>,
        dropped: Vec<PorchType>,
    },
    /// Remodel year before the build year
    RemodelYearRepaired {
        year_built: i32,
        requested: i32,
        resolved: i32,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::SubclassReplaced {
                style,
                requested,
                resolved,
            } => write!(
                f,
                "subclass {requested} is not offered for style {style}, using {resolved}"
            ),
            Warning::UnknownStyle { style, resolved } => {
                write!(f, "unknown house style {style:?}, using subclass {resolved}")
            }
            Warning::GateCleared {
                field,
                gate,
                requested,
                resolved,
            } => write!(
                f,
                "{field} {requested} ignored because {gate} is absent, using {resolved}"
            ),
            Warning::SentinelRepaired { field, resolved } => {
                write!(f, "{field} cannot be 'not present' here, using {resolved}")
            }
            Warning::Clamped {
                field,
                requested,
                resolved,
            } => write!(f, "{field} {requested} clamped to {resolved}"),
            Warning::FloorSplitAdjusted {
                requested,
                first_flr_sf,
                second_flr_sf,
            } => write!(
                f,
                "first floor {requested} sq ft adjusted to {first_flr_sf} \
                 (second floor {second_flr_sf})"
            ),
            Warning::SecondFloorOverridden { requested, resolved } => write!(
                f,
                "second floor {requested} sq ft replaced by remainder {resolved}"
            ),
            Warning::PorchSelectionTruncated { kept, dropped } => write!(
                f,
                "only {} porch types may be active, dropped {}",
                kept.len(),
                dropped
                    .iter()
                    .map(PorchType::code)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Warning::RemodelYearRepaired {
                year_built,
                requested,
                resolved,
            } => write!(
                f,
                "remodel year {requested} precedes build year {year_built}, using {resolved}"
            ),
        }
    }
}

/// A resolved value together with the repairs made to reach it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution<T> {
    pub value: T,
    pub warnings: Vec<Warning>,
}

impl<T> Resolution<T> {
    /// Value accepted as requested
    pub fn clean(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    /// Value repaired with one warning
    pub fn repaired(value: T, warning: Warning) -> Self {
        Self {
            value,
            warnings: vec![warning],
        }
    }

    /// Whether the request was accepted unchanged
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolution<U> {
        Resolution {
            value: f(self.value),
            warnings: self.warnings,
        }
    }

    /// Move the warnings into `sink` and hand back the value
    pub fn drain_into(self, sink: &mut Vec<Warning>) -> T {
        sink.extend(self.warnings);
        self.value
    }
}
