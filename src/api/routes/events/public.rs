//! Public types for the events API
use serde::{Deserialize, Serialize};

use crate::allocation::{Aggregation, CategoryBucket, EnrichedEvent};

pub const NO_EVENTS_MESSAGE: &str = "No events found for this date.";

#[derive(Deserialize)]
pub struct EventsParams {
    /// Anchor date, `YYYY-MM-DD`
    pub date: String,
    #[serde(default)]
    pub include_events: bool,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(untagged)]
pub enum EventsResponse {
    Allocated {
        allocation: Vec<CategoryBucket>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        events: Option<Vec<EnrichedEvent>>,
    },
    Empty {
        message: String,
    },
}

impl EventsResponse {
    pub fn from_aggregation(aggregation: Aggregation, include_events: bool) -> Self {
        match aggregation {
            Aggregation::Empty => EventsResponse::Empty {
                message: NO_EVENTS_MESSAGE.to_string(),
            },
            Aggregation::Allocated(report) => EventsResponse::Allocated {
                allocation: report.allocation,
                events: include_events.then_some(report.events),
            },
        }
    }
}
