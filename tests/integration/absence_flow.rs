use chrono::{Duration, Local, NaiveDate};
use planrh_core::error::AppError;
use planrh_core::models::absence::{
    AbsenceCreateInput, AbsenceStatus, ManagerDecision, ReplacementDecision,
};
use planrh_core::repository::memory::InMemoryAbsenceRepository;
use planrh_core::services::absence_service::AbsenceService;
use planrh_core::services::schedule_service::{approved_intervals, is_absent_day};

fn service() -> AbsenceService<InMemoryAbsenceRepository> {
    AbsenceService::new(InMemoryAbsenceRepository::new())
}

fn day_ahead(days: i64) -> String {
    (Local::now() + Duration::days(days))
        .format("%Y-%m-%d")
        .to_string()
}

fn request(staff_id: &str, replacement_id: Option<&str>) -> AbsenceCreateInput {
    AbsenceCreateInput {
        staff_id: staff_id.to_string(),
        service_id: "cardio".to_string(),
        start_date: day_ahead(5),
        start_hour: "08:00".to_string(),
        end_date: day_ahead(7),
        end_hour: "17:00".to_string(),
        reason_code: "CA".to_string(),
        comment: Some("garde à échanger".to_string()),
        replacement_id: replacement_id.map(str::to_string),
    }
}

#[test]
fn full_approval_flow() {
    let service = service();

    // staff files the request, nominating a replacement
    let created = service
        .create(request("staff-1", Some("rep-1")))
        .expect("create request");
    assert_eq!(created.status, AbsenceStatus::Pending);
    assert!(!created.id.is_empty());

    // the replacement accepts
    let accepted = service
        .record_replacement_decision(&created.id, ReplacementDecision::Accept)
        .expect("replacement accepts");
    assert_eq!(accepted.status, AbsenceStatus::AcceptedByReplacement);
    assert_eq!(accepted.replacement_id.as_deref(), Some("rep-1"));

    // the manager approves
    let approved = service
        .record_manager_decision(&created.id, ManagerDecision::Approve, None)
        .expect("manager approves");
    assert_eq!(approved.status, AbsenceStatus::ApprovedByManager);

    // terminal: nobody can touch the request any more
    let err = service
        .record_replacement_decision(&created.id, ReplacementDecision::Reject)
        .unwrap_err();
    assert!(matches!(err, AppError::AlreadyFinalized { .. }));
    let err = service
        .record_manager_decision(&created.id, ManagerDecision::Reject, None)
        .unwrap_err();
    assert!(matches!(err, AppError::AlreadyFinalized { .. }));
}

#[test]
fn manager_can_decide_without_replacement_response() {
    let service = service();
    let created = service.create(request("staff-1", None)).expect("create");

    let rejected = service
        .record_manager_decision(&created.id, ManagerDecision::Reject, None)
        .expect("direct manager decision");
    assert_eq!(rejected.status, AbsenceStatus::RejectedByManager);
}

#[test]
fn replacement_answers_only_once() {
    let service = service();
    let created = service
        .create(request("staff-1", Some("rep-1")))
        .expect("create");

    service
        .record_replacement_decision(&created.id, ReplacementDecision::Accept)
        .expect("first answer");

    let err = service
        .record_replacement_decision(&created.id, ReplacementDecision::Reject)
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidTransition { .. }));
}

#[test]
fn end_before_start_is_rejected() {
    let service = service();

    let mut inverted = request("staff-1", None);
    inverted.end_date = inverted.start_date.clone();
    inverted.start_hour = "08:00".to_string();
    inverted.end_hour = "07:00".to_string();

    let err = service.create(inverted).unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));
}

#[test]
fn short_notice_is_rejected() {
    let service = service();

    // starting tomorrow is always under the 72h lead time
    let mut rushed = request("staff-1", None);
    rushed.start_date = day_ahead(1);
    rushed.end_date = day_ahead(2);

    let err = service.create(rushed).unwrap_err();
    assert!(matches!(err, AppError::LeadTimeViolation { .. }));
}

#[test]
fn inboxes_follow_status() {
    let service = service();

    let nominated = service
        .create(request("staff-1", Some("rep-1")))
        .expect("create");
    let direct = service.create(request("staff-2", None)).expect("create");

    let replacement_inbox = service.pending_for_replacement("rep-1").expect("inbox");
    assert_eq!(replacement_inbox.len(), 1);
    assert_eq!(replacement_inbox[0].id, nominated.id);

    // both still await the manager
    assert_eq!(service.pending_for_manager().expect("inbox").len(), 2);

    service
        .record_manager_decision(&direct.id, ManagerDecision::Approve, None)
        .expect("approve");

    let open = service.pending_for_manager().expect("inbox");
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].id, nominated.id);
}

#[test]
fn manager_decision_can_fill_the_replacement() {
    let service = service();
    let created = service.create(request("staff-1", None)).expect("create");

    let approved = service
        .record_manager_decision(
            &created.id,
            ManagerDecision::Approve,
            Some("rep-9".to_string()),
        )
        .expect("approve");
    assert_eq!(approved.replacement_id.as_deref(), Some("rep-9"));
}

#[test]
fn approval_feeds_the_schedule_projection() {
    let service = service();
    let created = service.create(request("staff-1", None)).expect("create");
    service
        .record_manager_decision(&created.id, ManagerDecision::Approve, None)
        .expect("approve");
    // a request still awaiting its decisions never blocks a day
    service.create(request("staff-2", None)).expect("create");

    let absences = service.list_all().expect("list");
    let intervals = approved_intervals(&absences, "staff-1").expect("intervals");
    assert_eq!(intervals.len(), 1);

    let start = NaiveDate::parse_from_str(&created.start_date, "%Y-%m-%d").expect("start date");
    let end = NaiveDate::parse_from_str(&created.end_date, "%Y-%m-%d").expect("end date");
    assert!(is_absent_day(&intervals, start));
    assert!(is_absent_day(&intervals, end));
    assert!(!is_absent_day(&intervals, end + Duration::days(1)));

    assert!(approved_intervals(&absences, "staff-2")
        .expect("no approved requests")
        .is_empty());
}

#[test]
fn statuses_serialize_to_wire_labels() {
    let service = service();
    let created = service.create(request("staff-1", None)).expect("create");

    let value = serde_json::to_value(&created).expect("serialize");
    assert_eq!(value["status"], "En cours");
    assert_eq!(value["staffId"], "staff-1");
    assert_eq!(value["reasonCode"], "CA");
}
