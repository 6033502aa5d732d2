//! Crew-change records (`/crew`) and their field mapping.
//!
//! DESIGN
//! ======
//! The editor works with `from`/`to` airport pairs and readable field names.
//! The backend stores one `destination` string per flight and keeps its
//! historical spellings (`passportNumber`, `depatureTime`). Both directions
//! of that translation live here and nowhere else.

#[cfg(test)]
#[path = "crew_test.rs"]
mod crew_test;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use super::wire;

const DESTINATION_SEPARATORS: [&str; 7] = [" - ", " – ", " → ", "->", "→", " to ", "/"];

/// Sign-on (boarding) or sign-off (leaving).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CrewChangeKind {
    #[default]
    SignOn,
    SignOff,
}

impl CrewChangeKind {
    #[must_use]
    pub fn as_api(self) -> &'static str {
        match self {
            Self::SignOn => "signon",
            Self::SignOff => "signoff",
        }
    }

    /// Accepts `signon`, `sign_on`, `Sign On`, `on` and the `off` variants.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let folded: String = raw.chars().filter(char::is_ascii_alphanumeric).collect::<String>().to_ascii_lowercase();
        match folded.as_str() {
            "signon" | "on" => Some(Self::SignOn),
            "signoff" | "off" => Some(Self::SignOff),
            _ => None,
        }
    }
}

impl Serialize for CrewChangeKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_api())
    }
}

impl<'de> Deserialize<'de> for CrewChangeKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = wire::text(deserializer)?;
        Ok(Self::parse(&raw).unwrap_or_default())
    }
}

// =============================================================================
// DESTINATION STRINGS
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub from: String,
    pub to: String,
}

/// `("CMB", "DOH")` → `"CMB - DOH"`. A missing side leaves the other alone.
#[must_use]
pub fn join_destination(from: &str, to: &str) -> String {
    match (from.trim(), to.trim()) {
        ("", "") => String::new(),
        (from, "") => from.to_owned(),
        ("", to) => to.to_owned(),
        (from, to) => format!("{from} - {to}"),
    }
}

/// Inverse of [`join_destination`], tolerant of the other separators older
/// records use (`CMB → DOH`, `CMB to DOH`, `CMB-DOH`). A bare `-` only splits
/// a pair of codes, so hyphenated place names stay whole.
#[must_use]
pub fn split_destination(destination: &str) -> Route {
    let trimmed = destination.trim();
    for separator in DESTINATION_SEPARATORS {
        if let Some((from, to)) = trimmed.split_once(separator) {
            return Route { from: from.trim().to_owned(), to: to.trim().to_owned() };
        }
    }
    if let Some((from, to)) = trimmed.split_once('-') {
        if is_place_code(from) && is_place_code(to) {
            return Route { from: from.to_owned(), to: to.to_owned() };
        }
    }
    Route { from: trimmed.to_owned(), to: String::new() }
}

/// `CMB`, `DOH`, `SG01`: uppercase letters and digits only.
fn is_place_code(raw: &str) -> bool {
    !raw.is_empty() && raw.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

// =============================================================================
// FORM SHAPE
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CrewMemberRow {
    #[validate(length(min = 1, message = "crew member name is required"))]
    pub name: String,
    #[serde(default)]
    pub rank: String,
    #[serde(default)]
    pub nationality: String,
    #[serde(default)]
    pub passport_no: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightRow {
    #[serde(default)]
    pub flight_number: String,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub departure_time: String,
    #[serde(default)]
    pub arrival_time: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CrewChangeForm {
    /// Server id; `None` until the record has been created.
    #[serde(default)]
    pub id: Option<String>,
    #[validate(length(min = 1, message = "crew name is required"))]
    pub crew_name: String,
    #[serde(default)]
    pub kind: CrewChangeKind,
    #[serde(default)]
    pub on_board_date: Option<NaiveDate>,
    #[serde(default)]
    pub airline: String,
    #[validate(nested)]
    #[serde(default)]
    pub crew_list: Vec<CrewMemberRow>,
    #[serde(default)]
    pub crew_flights: Vec<FlightRow>,
}

impl CrewChangeForm {
    pub fn add_crew_member(&mut self) {
        self.crew_list.push(CrewMemberRow::default());
    }

    pub fn remove_crew_member(&mut self, index: usize) {
        if index < self.crew_list.len() {
            self.crew_list.remove(index);
        }
    }

    pub fn add_flight(&mut self) {
        self.crew_flights.push(FlightRow::default());
    }

    pub fn remove_flight(&mut self, index: usize) {
        if index < self.crew_flights.len() {
            self.crew_flights.remove(index);
        }
    }

    /// Editor state for a stored record.
    #[must_use]
    pub fn from_api(record: CrewChangeRecord) -> Self {
        Self {
            id: record.id,
            crew_name: record.crew_name,
            kind: record.kind,
            on_board_date: parse_day(record.on_board_date.as_deref()),
            airline: record.airline,
            crew_list: record
                .crew_list
                .into_iter()
                .map(|m| CrewMemberRow {
                    name: m.name,
                    rank: m.rank,
                    nationality: m.nationality,
                    passport_no: m.passport_number,
                })
                .collect(),
            crew_flights: record.crew_flights.into_iter().map(FlightRecord::into_row).collect(),
        }
    }

    /// Request body for POST (new) or PUT (existing). Blank rows are dropped.
    #[must_use]
    pub fn to_api_body(&self, job_id: &str) -> CrewChangeBody {
        CrewChangeBody {
            job_id: job_id.to_owned(),
            crew_name: self.crew_name.trim().to_owned(),
            kind: self.kind,
            on_board_date: self.on_board_date.map(|d| d.format("%Y-%m-%d").to_string()),
            airline: self.airline.trim().to_owned(),
            crew_list: self
                .crew_list
                .iter()
                .filter(|m| !m.name.trim().is_empty())
                .map(|m| CrewMemberBody {
                    name: m.name.trim().to_owned(),
                    rank: m.rank.trim().to_owned(),
                    nationality: m.nationality.trim().to_owned(),
                    passport_number: m.passport_no.trim().to_owned(),
                })
                .collect(),
            crew_flights: self
                .crew_flights
                .iter()
                .filter(|f| !(f.flight_number.trim().is_empty() && f.from.trim().is_empty() && f.to.trim().is_empty()))
                .map(|f| FlightBody {
                    flight_number: f.flight_number.trim().to_owned(),
                    destination: join_destination(&f.from, &f.to),
                    depature_time: f.departure_time.trim().to_owned(),
                    arrival_time: f.arrival_time.trim().to_owned(),
                })
                .collect(),
        }
    }
}

fn parse_day(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?.trim();
    NaiveDate::parse_from_str(raw.get(..10).unwrap_or(raw), "%Y-%m-%d").ok()
}

// =============================================================================
// API SHAPE (read)
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct CrewChangeRecord {
    #[serde(default, deserialize_with = "wire::opt_id", alias = "_id", alias = "crew_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "wire::opt_id", alias = "jobId")]
    pub job_id: Option<String>,
    #[serde(rename = "crewName", alias = "crew_name", default, deserialize_with = "wire::text")]
    pub crew_name: String,
    #[serde(rename = "type", default)]
    pub kind: CrewChangeKind,
    #[serde(rename = "onBoardDate", alias = "on_board_date", default, deserialize_with = "wire::opt_text")]
    pub on_board_date: Option<String>,
    #[serde(default, deserialize_with = "wire::text")]
    pub airline: String,
    #[serde(rename = "crewList", alias = "crew_list", default, deserialize_with = "wire::rows")]
    pub crew_list: Vec<CrewMemberRecord>,
    #[serde(rename = "crewFlights", alias = "crew_flights", default, deserialize_with = "wire::rows")]
    pub crew_flights: Vec<FlightRecord>,
}

impl wire::WireRow for CrewChangeRecord {
    const KEY_GROUPS: wire::KeyGroups = &[
        ("id", &["_id", "crew_id"]),
        ("job_id", &["jobId"]),
        ("crewName", &["crew_name"]),
        ("onBoardDate", &["on_board_date"]),
        ("crewList", &["crew_list"]),
        ("crewFlights", &["crew_flights"]),
    ];
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct CrewMemberRecord {
    #[serde(default, deserialize_with = "wire::text")]
    pub name: String,
    #[serde(default, deserialize_with = "wire::text")]
    pub rank: String,
    #[serde(default, deserialize_with = "wire::text")]
    pub nationality: String,
    #[serde(rename = "passportNumber", alias = "passportNo", alias = "passport_no", default, deserialize_with = "wire::text")]
    pub passport_number: String,
}

impl wire::WireRow for CrewMemberRecord {
    const KEY_GROUPS: wire::KeyGroups = &[("passportNumber", &["passportNo", "passport_no"])];
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct FlightRecord {
    #[serde(rename = "flightNumber", alias = "flightNo", alias = "flight_number", default, deserialize_with = "wire::text")]
    pub flight_number: String,
    #[serde(default, deserialize_with = "wire::opt_text")]
    pub destination: Option<String>,
    #[serde(default, deserialize_with = "wire::opt_text")]
    pub from: Option<String>,
    #[serde(default, deserialize_with = "wire::opt_text")]
    pub to: Option<String>,
    #[serde(rename = "depatureTime", alias = "departureTime", alias = "departure_time", default, deserialize_with = "wire::text")]
    pub depature_time: String,
    #[serde(rename = "arrivalTime", alias = "arraivalTime", alias = "arrival_time", default, deserialize_with = "wire::text")]
    pub arrival_time: String,
}

impl wire::WireRow for FlightRecord {
    const KEY_GROUPS: wire::KeyGroups = &[
        ("flightNumber", &["flightNo", "flight_number"]),
        ("depatureTime", &["departureTime", "departure_time"]),
        ("arrivalTime", &["arraivalTime", "arrival_time"]),
    ];
}

impl FlightRecord {
    /// Explicit `from`/`to` win over a parsed `destination`.
    fn into_row(self) -> FlightRow {
        let parsed = self.destination.as_deref().map(split_destination).unwrap_or_default();
        FlightRow {
            flight_number: self.flight_number,
            from: self.from.unwrap_or(parsed.from),
            to: self.to.unwrap_or(parsed.to),
            departure_time: self.depature_time,
            arrival_time: self.arrival_time,
        }
    }
}

// =============================================================================
// API SHAPE (write)
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CrewChangeBody {
    pub job_id: String,
    #[serde(rename = "crewName")]
    pub crew_name: String,
    #[serde(rename = "type")]
    pub kind: CrewChangeKind,
    #[serde(rename = "onBoardDate")]
    pub on_board_date: Option<String>,
    pub airline: String,
    #[serde(rename = "crewList")]
    pub crew_list: Vec<CrewMemberBody>,
    #[serde(rename = "crewFlights")]
    pub crew_flights: Vec<FlightBody>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CrewMemberBody {
    pub name: String,
    pub rank: String,
    pub nationality: String,
    #[serde(rename = "passportNumber")]
    pub passport_number: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FlightBody {
    #[serde(rename = "flightNumber")]
    pub flight_number: String,
    pub destination: String,
    /// Backend spelling.
    #[serde(rename = "depatureTime")]
    pub depature_time: String,
    #[serde(rename = "arrivalTime")]
    pub arrival_time: String,
}
