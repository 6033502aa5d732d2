use super::*;
use crate::model::crew::{CrewChangeKind, CrewMemberRow, FlightRow};
use crate::net::test_support::{MockTransport, signed_in};
use reqwest::Method;
use serde_json::json;

const JOB: &str = "J-7";

fn form(id: Option<&str>) -> CrewChangeForm {
    CrewChangeForm {
        id: id.map(ToOwned::to_owned),
        crew_name: "Rotation A".into(),
        kind: CrewChangeKind::SignOn,
        airline: "Qatar Airways".into(),
        crew_list: vec![CrewMemberRow {
            name: "J. Cruz".into(),
            rank: "AB".into(),
            nationality: "PH".into(),
            passport_no: "P1234567".into(),
        }],
        crew_flights: vec![FlightRow {
            flight_number: "QR654".into(),
            from: "CMB".into(),
            to: "DOH".into(),
            departure_time: "2026-10-20T03:10".into(),
            arrival_time: "2026-10-20T05:55".into(),
        }],
        ..CrewChangeForm::default()
    }
}

#[tokio::test]
async fn load_reads_records_for_job() {
    let mock = MockTransport::new();
    mock.ok(
        Method::GET,
        "/crew",
        json!({ "data": [{
            "id": 3, "crewName": "Rotation A", "type": "signoff",
            "crewList": "[{\"name\":\"J. Cruz\",\"passportNo\":\"P1\"}]",
            "crewFlights": [{ "flightNumber": "EK651", "destination": "CMB - DXB", "departureTime": "09:00" }]
        }]}),
    );
    let mut editor = CrewChangeEditor::new(signed_in(&mock), JOB);

    assert_eq!(editor.load().await, Ok(true));

    assert_eq!(mock.requests()[0].query, vec![("job_id".to_owned(), JOB.to_owned())]);
    let forms = editor.forms();
    assert_eq!(forms[0].kind, CrewChangeKind::SignOff);
    assert_eq!(forms[0].crew_list[0].passport_no, "P1");
    assert_eq!((forms[0].crew_flights[0].from.as_str(), forms[0].crew_flights[0].to.as_str()), ("CMB", "DXB"));
    assert_eq!(forms[0].crew_flights[0].departure_time, "09:00");
}

#[tokio::test]
async fn new_record_is_posted_with_backend_names() {
    let mock = MockTransport::new();
    mock.ok(Method::POST, "/crew", json!({ "success": true }));
    mock.ok(Method::GET, "/crew", json!([]));
    let mut editor = CrewChangeEditor::new(signed_in(&mock), JOB);

    assert_eq!(editor.save(&form(None)).await, Ok(true));

    let post = mock.requests().into_iter().find(|r| r.method == Method::POST).unwrap();
    let body = post.json_body().unwrap();
    assert_eq!(body["job_id"], JOB);
    assert_eq!(body["type"], "signon");
    assert_eq!(body["crewList"][0]["passportNumber"], "P1234567");
    assert_eq!(body["crewFlights"][0]["destination"], "CMB - DOH");
    assert_eq!(body["crewFlights"][0]["depatureTime"], "2026-10-20T03:10");
}

#[tokio::test]
async fn existing_record_is_put() {
    let mock = MockTransport::new();
    mock.ok(Method::PUT, "/crew/3", json!({ "success": true }));
    mock.ok(Method::GET, "/crew", json!([]));
    let mut editor = CrewChangeEditor::new(signed_in(&mock), JOB);

    assert_eq!(editor.save(&form(Some("3"))).await, Ok(true));
    assert_eq!(mock.count(&Method::PUT), 1);
    assert_eq!(mock.count(&Method::POST), 0);
}

#[tokio::test]
async fn missing_crew_name_sends_nothing() {
    let mock = MockTransport::new();
    let mut editor = CrewChangeEditor::new(signed_in(&mock), JOB);
    let mut invalid = form(None);
    invalid.crew_name.clear();

    assert_eq!(editor.save(&invalid).await, Ok(false));
    assert!(mock.requests().is_empty());
    assert!(editor.toasts.has_errors());
}

#[tokio::test]
async fn delete_removes_record() {
    let mock = MockTransport::new();
    mock.ok(Method::GET, "/crew", json!([{ "id": 3, "crewName": "A" }, { "id": 4, "crewName": "B" }]));
    mock.ok(Method::DELETE, "/crew/3", json!({}));
    let mut editor = CrewChangeEditor::new(signed_in(&mock), JOB);
    editor.load().await.unwrap();

    assert_eq!(editor.delete("3").await, Ok(true));
    assert_eq!(editor.records.items().len(), 1);
}
