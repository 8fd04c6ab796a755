use chrono::Duration;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::models::availability::{AvailabilityProposal, AvailabilityStatus};
use crate::models::planning::{
    CellStatus, PlanningCell, PlanningWeek, AVAILABILITY_CODE, DEFAULT_VALIDATED_CODE,
};
use crate::repository::{
    AvailabilityFilter, AvailabilityRepository, PlanningFilter, PlanningRepository,
};
use crate::services::date_utils;

/// Number of week rows a planning page shows at most.
pub const VISIBLE_WEEKS: u32 = 2;

/// Planning grid operations: loads the stored grid overlaid with pending
/// availability proposals, records per-cell decisions, and persists the
/// edited grid as a whole.
pub struct PlanningService<P: PlanningRepository, A: AvailabilityRepository> {
    planning: P,
    availability: A,
}

impl<P: PlanningRepository, A: AvailabilityRepository> PlanningService<P, A> {
    pub fn new(planning: P, availability: A) -> Self {
        Self {
            planning,
            availability,
        }
    }

    /// Loads the grid for the filtered range and merges every pending
    /// proposal on top of the stored cells.
    pub fn load_grid(&self, filter: &PlanningFilter) -> AppResult<Vec<PlanningCell>> {
        let cells = self.planning.list_by_filter(filter)?;
        let proposals = self.availability.list_by_filter(&AvailabilityFilter {
            service_id: filter.service_id.clone(),
            status: Some(AvailabilityStatus::Proposed),
        })?;
        let merged = merge_availability_into_grid(&cells, &proposals);
        debug!(
            target: "app::planning",
            stored = cells.len(),
            proposals = proposals.len(),
            merged = merged.len(),
            "grid loaded"
        );
        Ok(merged)
    }

    /// Turns the proposed cell of the given agent and date into a validated
    /// one carrying the default code. The backing proposal, when the cell
    /// still points at one, is validated first.
    pub fn validate_cell(
        &self,
        cells: &[PlanningCell],
        agent_id: &str,
        date: &str,
    ) -> AppResult<Vec<PlanningCell>> {
        let index = find_proposed(cells, agent_id, date)?;
        let mut updated = cells.to_vec();
        if let Some(availability_id) = updated[index].availability_id.clone() {
            self.availability
                .update_status(&availability_id, AvailabilityStatus::Validated)?;
        }
        updated[index].status = CellStatus::Validated;
        updated[index].activity_code = DEFAULT_VALIDATED_CODE.to_string();
        info!(target: "app::planning", agent_id = %agent_id, date = %date, "cell validated");
        Ok(updated)
    }

    /// Refuses the proposed cell of the given agent and date. The activity
    /// code stays as proposed so the grid keeps showing what was refused.
    pub fn refuse_cell(
        &self,
        cells: &[PlanningCell],
        agent_id: &str,
        date: &str,
    ) -> AppResult<Vec<PlanningCell>> {
        let index = find_proposed(cells, agent_id, date)?;
        let mut updated = cells.to_vec();
        if let Some(availability_id) = updated[index].availability_id.clone() {
            self.availability
                .update_status(&availability_id, AvailabilityStatus::Refused)?;
        }
        updated[index].status = CellStatus::Refused;
        info!(target: "app::planning", agent_id = %agent_id, date = %date, "cell refused");
        Ok(updated)
    }

    /// Persists the whole working grid, replacing stored cells that share
    /// an agent and date.
    pub fn save(&self, cells: &[PlanningCell]) -> AppResult<usize> {
        let saved = self.planning.bulk_save(cells)?;
        info!(target: "app::planning", cells = saved, "grid saved");
        Ok(saved)
    }
}

/// Builds the visible week rows of a month page. `week_offset` counts
/// weeks skipped from the first week of the month; an offset past the last
/// week yields an empty page.
pub fn build_weeks(year: i32, month: u32, week_offset: u32) -> AppResult<Vec<PlanningWeek>> {
    let (first, last) = date_utils::month_bounds(year, month)?;
    let first_week = date_utils::week_number(first);
    let weeks_in_month = date_utils::week_number(last) - first_week + 1;
    if week_offset >= weeks_in_month {
        return Ok(Vec::new());
    }
    let visible = (weeks_in_month - week_offset).min(VISIBLE_WEEKS);
    let mut weeks = Vec::with_capacity(visible as usize);
    for row in 0..visible {
        let number = first_week + week_offset + row;
        let monday = start_of_numbered_week(year, number);
        let dates = (0..7).map(|day| monday + Duration::days(day)).collect();
        weeks.push(PlanningWeek {
            week_number: number,
            year,
            dates,
        });
    }
    Ok(weeks)
}

pub fn can_page_back(week_offset: u32) -> bool {
    week_offset > 0
}

pub fn can_page_forward(year: i32, month: u32, week_offset: u32) -> AppResult<bool> {
    let (first, last) = date_utils::month_bounds(year, month)?;
    let weeks_in_month = date_utils::week_number(last) - date_utils::week_number(first) + 1;
    Ok(week_offset + VISIBLE_WEEKS < weeks_in_month)
}

/// Overlays pending proposals on the stored cells. Each proposal becomes a
/// proposed cell carrying the availability code; when several target the
/// same agent and date the last one wins the whole cell.
pub fn merge_availability_into_grid(
    cells: &[PlanningCell],
    proposals: &[AvailabilityProposal],
) -> Vec<PlanningCell> {
    let mut merged = cells.to_vec();
    for proposal in proposals {
        if proposal.status != AvailabilityStatus::Proposed {
            continue;
        }
        upsert_cell(
            &mut merged,
            PlanningCell {
                agent_id: proposal.user_id.clone(),
                date: proposal.date.clone(),
                activity_code: AVAILABILITY_CODE.to_string(),
                status: CellStatus::Proposed,
                availability_id: Some(proposal.id.clone()),
            },
        );
    }
    merged
}

/// Applies a manual code edit. An existing cell keeps its slot and gets
/// the new code as validated; an empty slot grows a fresh validated cell.
pub fn manual_edit(
    cells: &[PlanningCell],
    agent_id: &str,
    date: &str,
    activity_code: &str,
) -> Vec<PlanningCell> {
    let mut edited = cells.to_vec();
    match edited
        .iter_mut()
        .find(|cell| cell.agent_id == agent_id && cell.date == date)
    {
        Some(cell) => {
            cell.activity_code = activity_code.to_string();
            cell.status = CellStatus::Validated;
        }
        None => edited.push(PlanningCell {
            agent_id: agent_id.to_string(),
            date: date.to_string(),
            activity_code: activity_code.to_string(),
            status: CellStatus::Validated,
            availability_id: None,
        }),
    }
    edited
}

pub fn cell_at<'a>(
    cells: &'a [PlanningCell],
    agent_id: &str,
    date: &str,
) -> Option<&'a PlanningCell> {
    cells
        .iter()
        .find(|cell| cell.agent_id == agent_id && cell.date == date)
}

/// Monday of the numbered week, weeks counted from January 1st of the
/// year the way `date_utils::week_number` counts them.
fn start_of_numbered_week(year: i32, week: u32) -> chrono::NaiveDate {
    let jan1 =
        chrono::NaiveDate::from_ymd_opt(year, 1, 1).expect("january 1st is always valid");
    date_utils::monday_of_week(jan1 + Duration::days(i64::from(week - 1) * 7))
}

fn upsert_cell(cells: &mut Vec<PlanningCell>, cell: PlanningCell) {
    match cells
        .iter()
        .position(|existing| existing.agent_id == cell.agent_id && existing.date == cell.date)
    {
        Some(index) => cells[index] = cell,
        None => cells.push(cell),
    }
}

fn find_proposed(cells: &[PlanningCell], agent_id: &str, date: &str) -> AppResult<usize> {
    cells
        .iter()
        .position(|cell| {
            cell.agent_id == agent_id && cell.date == date && cell.status == CellStatus::Proposed
        })
        .ok_or_else(|| {
            AppError::cell_not_found(format!(
                "Aucune proposition pour l'agent {agent_id} le {date}"
            ))
        })
}
