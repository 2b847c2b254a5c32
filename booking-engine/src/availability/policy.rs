//! Blocking Policy

use serde::{Deserialize, Serialize};
use shared::ReservationStatus;
use shared::models::UnknownStatus;
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

/// Status list that cannot be used as a policy
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error(transparent)]
    UnknownStatus(#[from] UnknownStatus),

    /// A policy blocking nothing would make every day bookable
    #[error("blocking status list is empty")]
    Empty,
}

/// Reservation statuses that make their days unavailable
///
/// Default: every status except `cancelled`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockingPolicy {
    statuses: BTreeSet<ReservationStatus>,
}

impl BlockingPolicy {
    pub fn from_statuses(statuses: impl IntoIterator<Item = ReservationStatus>) -> Self {
        Self {
            statuses: statuses.into_iter().collect(),
        }
    }

    /// Only `confirmed` reservations block
    pub fn confirmed_only() -> Self {
        Self::from_statuses([ReservationStatus::Confirmed])
    }

    /// Parse a comma separated status list (`"pending,confirmed"`)
    ///
    /// An empty list is rejected.
    pub fn parse(list: &str) -> Result<Self, PolicyError> {
        let statuses = list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse::<ReservationStatus>)
            .collect::<Result<BTreeSet<_>, UnknownStatus>>()?;
        if statuses.is_empty() {
            return Err(PolicyError::Empty);
        }
        Ok(Self { statuses })
    }

    pub fn blocks(&self, status: ReservationStatus) -> bool {
        self.statuses.contains(&status)
    }

    pub fn statuses(&self) -> impl Iterator<Item = ReservationStatus> + '_ {
        self.statuses.iter().copied()
    }
}

impl Default for BlockingPolicy {
    fn default() -> Self {
        Self::from_statuses(
            ReservationStatus::ALL
                .into_iter()
                .filter(|s| *s != ReservationStatus::Cancelled),
        )
    }
}

impl fmt::Display for BlockingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.statuses.iter().map(|s| s.as_str()).collect();
        f.write_str(&names.join(","))
    }
}
