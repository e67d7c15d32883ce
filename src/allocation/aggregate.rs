//! Filters, classifies, and totals a window's events into category
//! buckets measured against the work week.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::error::AllocationError;
use super::event::{EnrichedEvent, RawEvent, attendance_status, duration_hours};
use super::taxonomy::Taxonomy;

/// Hours in a work week. Always positive so percentages never divide by
/// zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkWeekHours(f64);

impl WorkWeekHours {
    pub fn new(hours: f64) -> Result<Self, AllocationError> {
        if hours.is_finite() && hours > 0.0 {
            Ok(Self(hours))
        } else {
            Err(AllocationError::ConfigurationError(format!(
                "Work week hours must be greater than zero, got {}",
                hours
            )))
        }
    }

    pub fn get(&self) -> f64 {
        self.0
    }
}

impl Default for WorkWeekHours {
    fn default() -> Self {
        Self(40.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryBucket {
    pub name: String,
    pub duration: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AllocationReport {
    pub events: Vec<EnrichedEvent>,
    pub allocation: Vec<CategoryBucket>,
    /// Unrounded hours across every included event
    pub total_hours: f64,
    /// Unrounded hours no rule claimed
    pub unclassified_hours: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Aggregation {
    /// Nothing in the window survived filtering
    Empty,
    Allocated(AllocationReport),
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Running totals for a single aggregation.
struct Tally<'a> {
    categories: HashMap<&'a str, f64>,
    unclassified: f64,
}

impl<'a> Tally<'a> {
    fn new(taxonomy: &'a Taxonomy) -> Self {
        Self {
            categories: taxonomy
                .categories
                .iter()
                .map(|name| (name.as_str(), 0.0))
                .collect(),
            unclassified: 0.0,
        }
    }

    fn add(&mut self, category: Option<&'a str>, hours: f64) {
        let slot = category.and_then(|name| self.categories.get_mut(name));
        match slot {
            Some(total) => *total += hours,
            None => self.unclassified += hours,
        }
    }

    fn hours(&self, category: &str) -> f64 {
        self.categories.get(category).copied().unwrap_or_default()
    }

    fn total(&self) -> f64 {
        self.categories.values().sum::<f64>() + self.unclassified
    }
}

fn bucket(name: &str, hours: f64, work_week_hours: WorkWeekHours) -> CategoryBucket {
    CategoryBucket {
        name: name.to_string(),
        duration: round2(hours),
        percentage: round2(hours / work_week_hours.get() * 100.0),
    }
}

/// Aggregate `events` (already sorted by start time) for `identity`.
///
/// Declined events and events whose summary is on the ignore list are
/// dropped. Every remaining event is credited in full to the first
/// category rule it matches, or to the unclassified bucket otherwise. A
/// single malformed event fails the whole aggregation.
pub fn aggregate(
    events: &[RawEvent],
    identity: &str,
    taxonomy: &Taxonomy,
    work_week_hours: WorkWeekHours,
) -> Result<Aggregation, AllocationError> {
    let mut tally = Tally::new(taxonomy);
    let mut included = Vec::new();

    for event in events {
        let summary = event.summary();
        let duration = duration_hours(event)?;
        let attendance = attendance_status(event.attendees.as_deref(), identity);

        if taxonomy.is_ignored(summary) || !attendance.counts_toward_allocation() {
            tracing::trace!("Skipping '{}' ({:?})", summary, attendance);
            continue;
        }

        tally.add(taxonomy.classify(summary), duration);

        included.push(EnrichedEvent {
            summary: summary.to_string(),
            start: event.start.as_ref().and_then(|s| s.raw()).unwrap_or_default().to_string(),
            end: event.end.as_ref().and_then(|e| e.raw()).unwrap_or_default().to_string(),
            duration,
            attendance_status: attendance,
            description: event.description.clone(),
        });
    }

    if included.is_empty() {
        return Ok(Aggregation::Empty);
    }

    let mut allocation: Vec<CategoryBucket> = taxonomy
        .categories
        .iter()
        .map(|name| bucket(name, tally.hours(name), work_week_hours))
        .collect();

    if taxonomy.unclassified.include {
        let unclassified = bucket(
            &taxonomy.unclassified.name,
            tally.unclassified,
            work_week_hours,
        );
        let at = taxonomy
            .unclassified
            .position
            .map_or(allocation.len(), |p| p.min(allocation.len()));
        allocation.insert(at, unclassified);
    }

    for b in &allocation {
        tracing::debug!("{}: {} hours - {} %", b.name, b.duration, b.percentage);
    }
    tracing::debug!(
        "{}: {} hours (unclassified)",
        taxonomy.unclassified.name,
        round2(tally.unclassified)
    );

    Ok(Aggregation::Allocated(AllocationReport {
        events: included,
        allocation,
        total_hours: tally.total(),
        unclassified_hours: tally.unclassified,
    }))
}
