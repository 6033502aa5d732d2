use super::*;

// =============================================================
// destination strings
// =============================================================

#[test]
fn join_destination_formats_pair() {
    assert_eq!(join_destination("CMB", "DOH"), "CMB - DOH");
}

#[test]
fn split_destination_inverts_join() {
    let joined = join_destination("CMB", "DOH");
    assert_eq!(split_destination(&joined), Route { from: "CMB".to_owned(), to: "DOH".to_owned() });
}

#[test]
fn join_destination_with_one_side() {
    assert_eq!(join_destination(" CMB ", ""), "CMB");
    assert_eq!(join_destination("", "DOH"), "DOH");
    assert_eq!(join_destination(" ", ""), "");
}

#[test]
fn split_destination_accepts_legacy_separators() {
    for raw in ["CMB-DOH", "CMB/DOH", "CMB -> DOH", "CMB → DOH", "CMB to DOH", "CMB – DOH"] {
        let route = split_destination(raw);
        assert_eq!(route.from, "CMB", "from of {raw}");
        assert_eq!(route.to, "DOH", "to of {raw}");
    }
}

#[test]
fn hyphenated_places_survive_the_round_trip() {
    let one_sided = join_destination("Port-au-Prince", "");
    assert_eq!(split_destination(&one_sided), Route { from: "Port-au-Prince".to_owned(), to: String::new() });

    let both = join_destination("Port-au-Prince", "Al-Khor");
    assert_eq!(split_destination(&both), Route { from: "Port-au-Prince".to_owned(), to: "Al-Khor".to_owned() });

    assert_eq!(split_destination("Al-Khor").to, "");
}

#[test]
fn split_destination_without_separator() {
    assert_eq!(split_destination(" SIN "), Route { from: "SIN".to_owned(), to: String::new() });
}

// =============================================================
// kind
// =============================================================

#[test]
fn kind_parses_variants() {
    assert_eq!(CrewChangeKind::parse("Sign On"), Some(CrewChangeKind::SignOn));
    assert_eq!(CrewChangeKind::parse("sign_off"), Some(CrewChangeKind::SignOff));
    assert_eq!(CrewChangeKind::parse("transfer"), None);
}

// =============================================================
// record <-> form
// =============================================================

fn record_json() -> serde_json::Value {
    serde_json::json!({
        "id": 14,
        "job_id": "J-100",
        "crewName": "Batch A",
        "type": "signoff",
        "onBoardDate": "2026-03-02T00:00:00.000Z",
        "airline": "Qatar Airways",
        "crewList": [
            { "name": "R. Fernando", "rank": "Master", "nationality": "LK", "passportNo": "N123" }
        ],
        "crewFlights": [
            { "flightNumber": "QR655", "destination": "CMB - DOH", "depatureTime": "03:10", "arrivalTime": "06:00" },
            { "flightNo": "QR1", "from": "DOH", "to": "LHR", "departureTime": "08:00" }
        ]
    })
}

#[test]
fn from_api_normalizes_aliases() {
    let record: CrewChangeRecord = serde_json::from_value(record_json()).unwrap();
    let form = CrewChangeForm::from_api(record);

    assert_eq!(form.id.as_deref(), Some("14"));
    assert_eq!(form.kind, CrewChangeKind::SignOff);
    assert_eq!(form.on_board_date, NaiveDate::from_ymd_opt(2026, 3, 2));
    assert_eq!(form.crew_list[0].passport_no, "N123");
    assert_eq!(form.crew_flights[0].from, "CMB");
    assert_eq!(form.crew_flights[0].to, "DOH");
    assert_eq!(form.crew_flights[0].departure_time, "03:10");
    assert_eq!(form.crew_flights[1].flight_number, "QR1");
    assert_eq!(form.crew_flights[1].to, "LHR");
}

#[test]
fn to_api_body_uses_backend_spellings() {
    let record: CrewChangeRecord = serde_json::from_value(record_json()).unwrap();
    let body = serde_json::to_value(CrewChangeForm::from_api(record).to_api_body("J-100")).unwrap();

    assert_eq!(body["crewName"], "Batch A");
    assert_eq!(body["type"], "signoff");
    assert_eq!(body["onBoardDate"], "2026-03-02");
    assert_eq!(body["crewList"][0]["passportNumber"], "N123");
    assert_eq!(body["crewFlights"][0]["destination"], "CMB - DOH");
    assert_eq!(body["crewFlights"][0]["depatureTime"], "03:10");
    assert!(body["crewFlights"][0].get("departureTime").is_none());
}

#[test]
fn to_api_body_drops_blank_rows() {
    let mut form = CrewChangeForm { crew_name: "Batch B".to_owned(), ..CrewChangeForm::default() };
    form.add_crew_member();
    form.add_flight();
    let body = form.to_api_body("J-1");
    assert!(body.crew_list.is_empty());
    assert!(body.crew_flights.is_empty());
}

#[test]
fn lists_encoded_as_strings_are_read() {
    let record: CrewChangeRecord = serde_json::from_value(serde_json::json!({
        "crewName": "Batch C",
        "crewList": "[{\"name\":\"K. Jay\",\"passportNumber\":\"P9\"}]",
        "crewFlights": "not json"
    }))
    .unwrap();
    assert_eq!(record.crew_list.len(), 1);
    assert!(record.crew_flights.is_empty());
}

#[test]
fn remove_row_out_of_range_is_ignored() {
    let mut form = CrewChangeForm::default();
    form.add_flight();
    form.remove_flight(5);
    assert_eq!(form.crew_flights.len(), 1);
    form.remove_flight(0);
    assert!(form.crew_flights.is_empty());
}

#[test]
fn validation_reaches_crew_rows() {
    let mut form = CrewChangeForm { crew_name: "Batch D".to_owned(), ..CrewChangeForm::default() };
    form.add_crew_member();
    assert!(form.validate().is_err());
}

#[test]
fn crew_record_with_both_id_keys_and_null_lists_reads() {
    let record: CrewChangeRecord = wire::from_row(serde_json::json!({
        "_id": "c1",
        "id": "c1",
        "crewName": "Batch A",
        "crew_name": "Batch A",
        "type": "sign_on",
        "crewList": null,
        "crewFlights": [{ "flightNumber": "QR654", "flightNo": "QR654", "destination": "CMB - DOH" }],
    }))
    .unwrap();
    assert_eq!(record.id.as_deref(), Some("c1"));
    assert!(record.crew_list.is_empty());
    assert_eq!(record.crew_flights[0].flight_number, "QR654");
}
