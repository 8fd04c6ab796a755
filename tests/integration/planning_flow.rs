use chrono::NaiveDate;
use planrh_core::error::AppError;
use planrh_core::models::actor::{Actor, Role};
use planrh_core::models::availability::{AvailabilityCreateInput, AvailabilityDecision};
use planrh_core::models::planning::CellStatus;
use planrh_core::repository::memory::{
    InMemoryAvailabilityRepository, InMemoryPlanningRepository, ServiceDirectory,
    StaticIdentityProvider,
};
use planrh_core::repository::{IdentityProvider, PlanningFilter};
use planrh_core::services::availability_service::AvailabilityService;
use planrh_core::services::planning_service::{
    build_weeks, can_page_back, can_page_forward, cell_at, manual_edit, PlanningService,
};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("test date")
}

fn march() -> PlanningFilter {
    PlanningFilter {
        from: "2025-03-01".to_string(),
        to: "2025-03-31".to_string(),
        service_id: None,
    }
}

fn slot(user_id: &str, date: &str, start: &str, end: &str) -> AvailabilityCreateInput {
    AvailabilityCreateInput {
        user_id: user_id.to_string(),
        date: date.to_string(),
        start_time: start.to_string(),
        end_time: end.to_string(),
        comment: None,
    }
}

fn setup() -> (
    AvailabilityService<InMemoryAvailabilityRepository>,
    PlanningService<InMemoryPlanningRepository, InMemoryAvailabilityRepository>,
    ServiceDirectory,
) {
    let directory = ServiceDirectory::new();
    let availability_repo = InMemoryAvailabilityRepository::with_directory(directory.clone());
    let planning_repo = InMemoryPlanningRepository::with_directory(directory.clone());
    let availability = AvailabilityService::new(availability_repo.clone());
    let planning = PlanningService::new(planning_repo, availability_repo);
    (availability, planning, directory)
}

#[test]
fn builds_two_monday_anchored_weeks() {
    let weeks = build_weeks(2025, 1, 0).expect("weeks");
    assert_eq!(weeks.len(), 2);

    assert_eq!(weeks[0].week_number, 1);
    assert_eq!(weeks[0].dates[0], date("2024-12-30"));
    assert_eq!(weeks[1].week_number, 2);
    assert_eq!(weeks[1].dates[0], date("2025-01-06"));

    for week in &weeks {
        assert_eq!(week.dates.len(), 7);
        for pair in week.dates.windows(2) {
            assert_eq!(pair[1], pair[0].succ_opt().expect("next date"));
        }
    }
}

#[test]
fn paging_stays_inside_the_month() {
    // January 2025 spans weeks 1 through 5
    assert_eq!(build_weeks(2025, 1, 4).expect("weeks").len(), 1);
    assert!(build_weeks(2025, 1, 5).expect("weeks").is_empty());
    assert!(build_weeks(2025, 1, 6).expect("weeks").is_empty());

    assert!(!can_page_back(0));
    assert!(can_page_back(2));
    assert!(can_page_forward(2025, 1, 0).expect("paging"));
    assert!(!can_page_forward(2025, 1, 3).expect("paging"));
}

#[test]
fn grid_keeps_one_cell_per_agent_and_date() {
    let (availability, planning, _) = setup();

    // two slots volunteered for the same day collapse into one cell
    availability
        .propose(slot("agent-1", "2025-03-10", "08:00", "12:00"))
        .expect("morning slot");
    let afternoon = availability
        .propose(slot("agent-1", "2025-03-10", "14:00", "18:00"))
        .expect("afternoon slot");

    let grid = planning.load_grid(&march()).expect("grid");
    assert_eq!(grid.len(), 1);

    let cell = cell_at(&grid, "agent-1", "2025-03-10").expect("cell");
    assert_eq!(cell.status, CellStatus::Proposed);
    assert_eq!(cell.activity_code, "DISP");
    assert_eq!(cell.availability_id.as_deref(), Some(afternoon.id.as_str()));

    // validating promotes that single cell
    let validated = planning
        .validate_cell(&grid, "agent-1", "2025-03-10")
        .expect("validate");
    assert_eq!(validated.len(), 1);
    let cell = cell_at(&validated, "agent-1", "2025-03-10").expect("cell");
    assert_eq!(cell.status, CellStatus::Validated);
    assert_eq!(cell.activity_code, "RH");
    assert_eq!(cell.availability_id.as_deref(), Some(afternoon.id.as_str()));
}

#[test]
fn validate_cell_updates_the_backing_proposal() {
    let (availability, planning, _) = setup();
    let proposed = availability
        .propose(slot("agent-1", "2025-03-10", "08:00", "12:00"))
        .expect("propose");

    let grid = planning.load_grid(&march()).expect("grid");
    let validated = planning
        .validate_cell(&grid, "agent-1", "2025-03-10")
        .expect("validate");

    // the proposal is now terminal
    let err = availability
        .decide(&proposed.id, AvailabilityDecision::Refuse)
        .unwrap_err();
    assert!(matches!(err, AppError::AlreadyFinalized { .. }));

    // and the cell can no longer be validated or refused
    let err = planning
        .validate_cell(&validated, "agent-1", "2025-03-10")
        .unwrap_err();
    assert!(matches!(err, AppError::CellNotFound { .. }));
    let err = planning
        .refuse_cell(&validated, "agent-2", "2025-03-10")
        .unwrap_err();
    assert!(matches!(err, AppError::CellNotFound { .. }));
}

#[test]
fn refusal_keeps_the_proposed_code() {
    let (availability, planning, _) = setup();
    availability
        .propose(slot("agent-1", "2025-03-10", "08:00", "12:00"))
        .expect("propose");

    let grid = planning.load_grid(&march()).expect("grid");
    let refused = planning
        .refuse_cell(&grid, "agent-1", "2025-03-10")
        .expect("refuse");

    let cell = cell_at(&refused, "agent-1", "2025-03-10").expect("cell");
    assert_eq!(cell.status, CellStatus::Refused);
    assert_eq!(cell.activity_code, "DISP");
}

#[test]
fn manual_edit_wins_and_save_persists() {
    let (availability, planning, _) = setup();
    availability
        .propose(slot("agent-1", "2025-03-10", "08:00", "12:00"))
        .expect("propose");

    let grid = planning.load_grid(&march()).expect("grid");

    // the manual code overrides the pending proposal in the working grid
    let edited = manual_edit(&grid, "agent-1", "2025-03-10", "CA");
    assert_eq!(edited.len(), 1);
    let cell = cell_at(&edited, "agent-1", "2025-03-10").expect("cell");
    assert_eq!(cell.activity_code, "CA");
    assert_eq!(cell.status, CellStatus::Validated);

    // an edit on an empty slot grows a fresh validated cell
    let edited = manual_edit(&edited, "agent-2", "2025-03-12", "EX");
    assert_eq!(edited.len(), 2);

    assert_eq!(planning.save(&edited).expect("save"), 2);
    // saving again overwrites, it does not duplicate
    assert_eq!(planning.save(&edited).expect("save"), 2);

    // the proposal was never decided, so a reload overlays it back on top
    let reloaded = planning.load_grid(&march()).expect("reload");
    assert_eq!(reloaded.len(), 2);
    let overlaid = cell_at(&reloaded, "agent-1", "2025-03-10").expect("cell");
    assert_eq!(overlaid.status, CellStatus::Proposed);
    let kept = cell_at(&reloaded, "agent-2", "2025-03-12").expect("cell");
    assert_eq!(kept.activity_code, "EX");
    assert_eq!(kept.status, CellStatus::Validated);
}

#[test]
fn service_filter_scopes_the_grid() {
    let (availability, planning, directory) = setup();
    directory.assign("agent-1", "cardio").expect("assign");
    directory.assign("agent-2", "neuro").expect("assign");

    availability
        .propose(slot("agent-1", "2025-03-10", "08:00", "12:00"))
        .expect("propose");
    availability
        .propose(slot("agent-2", "2025-03-10", "08:00", "12:00"))
        .expect("propose");

    let mut filter = march();
    filter.service_id = Some("cardio".to_string());
    let grid = planning.load_grid(&filter).expect("grid");
    assert_eq!(grid.len(), 1);
    assert_eq!(grid[0].agent_id, "agent-1");
}

#[test]
fn caller_gates_validation_on_the_actor() {
    let manager = StaticIdentityProvider::new(Actor {
        id: "mgr-1".to_string(),
        role: Role::Manager,
        service_id: Some("cardio".to_string()),
    });
    let secretary = StaticIdentityProvider::new(Actor {
        id: "sec-1".to_string(),
        role: Role::Secretary,
        service_id: Some("cardio".to_string()),
    });
    let admin = StaticIdentityProvider::new(Actor {
        id: "adm-1".to_string(),
        role: Role::Admin,
        service_id: None,
    });

    let actor = manager.current_actor().expect("actor");
    assert!(actor.is_manager());
    assert!(!secretary.current_actor().expect("actor").is_manager());
    // administration rights do not cover planning validation
    assert!(!admin.current_actor().expect("actor").is_manager());

    let value = serde_json::to_value(&actor).expect("serialize");
    assert_eq!(value["role"], "cadre");
    assert_eq!(value["serviceId"], "cardio");
}
