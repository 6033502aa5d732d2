//! Vessel register with SSCEC (ship sanitation certificate) expiry tracking.
//!
//! There is no backend for vessels yet; the register is loaded from a local
//! JSON file.

#[cfg(test)]
#[path = "vessel_test.rs"]
mod vessel_test;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Certificates expiring within this many days are flagged.
pub const EXPIRY_WARNING_DAYS: i64 = 30;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vessel {
    pub name: String,
    #[serde(default)]
    pub imo_number: Option<String>,
    #[serde(default)]
    pub flag: Option<String>,
    pub sscec_expiry: NaiveDate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SscecStatus {
    Valid { days_left: i64 },
    ExpiringSoon { days_left: i64 },
    Expired { days_ago: i64 },
}

impl Vessel {
    #[must_use]
    pub fn sscec_status(&self, today: NaiveDate) -> SscecStatus {
        let days_left = (self.sscec_expiry - today).num_days();
        if days_left < 0 {
            SscecStatus::Expired { days_ago: -days_left }
        } else if days_left <= EXPIRY_WARNING_DAYS {
            SscecStatus::ExpiringSoon { days_left }
        } else {
            SscecStatus::Valid { days_left }
        }
    }
}
