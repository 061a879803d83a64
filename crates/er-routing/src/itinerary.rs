//! Annotated itineraries and ETA formatting.

use std::fmt;

use crate::RouteStep;

/// Whole minutes plus remaining seconds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Eta {
    pub minutes: u64,
    pub seconds: u64,
}

impl Eta {
    /// Truncates fractional seconds.  Negative or NaN totals yield zero.
    pub fn from_secs(total_secs: f64) -> Self {
        let whole = total_secs as u64;
        Self { minutes: whole / 60, seconds: whole % 60 }
    }
}

impl fmt::Display for Eta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} minutes and {} seconds", self.minutes, self.seconds)
    }
}

/// A route step with its traffic factor applied.
#[derive(Clone, Debug, PartialEq)]
pub struct AnnotatedStep {
    pub step:                RouteStep,
    pub traffic_factor:      f64,
    /// `step.duration_s * traffic_factor`.
    pub adjusted_duration_s: f64,
}

/// Ordered annotated steps plus aggregate durations.
#[derive(Clone, Debug, PartialEq)]
pub struct Itinerary {
    pub steps:               Vec<AnnotatedStep>,
    /// Sum of raw step durations, seconds.
    pub original_duration_s: f64,
    /// Sum of traffic-adjusted step durations, seconds.
    pub adjusted_duration_s: f64,
}

impl Itinerary {
    pub fn original_eta(&self) -> Eta {
        Eta::from_secs(self.original_duration_s)
    }

    pub fn adjusted_eta(&self) -> Eta {
        Eta::from_secs(self.adjusted_duration_s)
    }

    /// Total route length in metres.
    pub fn distance_m(&self) -> f64 {
        self.steps.iter().map(|s| s.step.distance_m).sum()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
