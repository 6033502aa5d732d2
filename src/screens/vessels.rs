//! Vessel register with SSCEC expiry tracking. Local only; no requests.

#[cfg(test)]
#[path = "vessels_test.rs"]
mod vessels_test;

use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

use super::needle;
use crate::model::vessel::{SscecStatus, Vessel};
use crate::model::wire;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VesselRow<'a> {
    pub vessel: &'a Vessel,
    pub status: SscecStatus,
}

#[derive(Clone, Debug, Default)]
pub struct VesselScreen {
    vessels: Vec<Vessel>,
}

impl VesselScreen {
    #[must_use]
    pub fn new(vessels: Vec<Vessel>) -> Self {
        Self { vessels }
    }

    /// Read the register from a JSON array file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a vessel list.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let raw = std::fs::read_to_string(path)?;
        let vessels = serde_json::from_str(&raw).map_err(std::io::Error::other)?;
        Ok(Self::new(vessels))
    }

    #[must_use]
    pub fn vessels(&self) -> &[Vessel] {
        &self.vessels
    }

    /// Every vessel with its certificate state, soonest expiry first.
    #[must_use]
    pub fn expiring(&self, today: NaiveDate) -> Vec<VesselRow<'_>> {
        let mut rows: Vec<VesselRow<'_>> =
            self.vessels.iter().map(|vessel| VesselRow { vessel, status: vessel.sscec_status(today) }).collect();
        rows.sort_by_key(|row| row.vessel.sscec_expiry);
        rows
    }

    /// Only the expired and soon-to-expire certificates.
    #[must_use]
    pub fn needing_attention(&self, today: NaiveDate) -> Vec<VesselRow<'_>> {
        self.expiring(today)
            .into_iter()
            .filter(|row| !matches!(row.status, SscecStatus::Valid { .. }))
            .collect()
    }

    #[must_use]
    pub fn filtered(&self, search: &str) -> Vec<&Vessel> {
        let needle = needle(search);
        self.vessels
            .iter()
            .filter(|v| {
                needle.is_empty()
                    || wire::contains_folded(&v.name, &needle)
                    || v.imo_number.as_deref().is_some_and(|imo| wire::contains_folded(imo, &needle))
            })
            .collect()
    }
}
