use tracing::info;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::availability::{
    AvailabilityCreateInput, AvailabilityDecision, AvailabilityProposal, AvailabilityStatus,
};
use crate::models::planning::{CellStatus, PlanningCell, DEFAULT_VALIDATED_CODE};
use crate::repository::{AvailabilityFilter, AvailabilityRepository};
use crate::services::date_utils;

pub struct AvailabilityService<R: AvailabilityRepository> {
    repo: R,
}

impl<R: AvailabilityRepository> AvailabilityService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Files a proposed slot. The date and times must be well formed, the
    /// range forward, and the slot must not overlap another proposal of the
    /// same user on the same date.
    pub fn propose(&self, input: AvailabilityCreateInput) -> AppResult<AvailabilityProposal> {
        date_utils::parse_date(&input.date)?;
        let start = date_utils::parse_time(&input.start_time)?;
        let end = date_utils::parse_time(&input.end_time)?;
        if end <= start {
            return Err(AppError::validation(
                "L'heure de fin doit être postérieure à l'heure de début",
            ));
        }

        let existing = self.repo.list_by_filter(&AvailabilityFilter::default())?;
        for proposal in existing
            .iter()
            .filter(|proposal| proposal.user_id == input.user_id && proposal.date == input.date)
        {
            let slot_start = date_utils::parse_time(&proposal.start_time)?;
            let slot_end = date_utils::parse_time(&proposal.end_time)?;
            if date_utils::ranges_overlap(start, end, slot_start, slot_end) {
                return Err(AppError::validation(
                    "Une disponibilité existe déjà pour ce créneau horaire",
                ));
            }
        }

        let record = AvailabilityProposal {
            id: Uuid::new_v4().to_string(),
            user_id: input.user_id,
            date: input.date,
            start_time: input.start_time,
            end_time: input.end_time,
            comment: input.comment,
            status: AvailabilityStatus::Proposed,
        };
        let stored = self.repo.create(record)?;
        info!(
            target: "app::availability",
            availability_id = %stored.id,
            user_id = %stored.user_id,
            date = %stored.date,
            "availability proposed"
        );
        Ok(stored)
    }

    /// Validates or refuses a proposed slot. Validation emits the planning
    /// cell the grid should carry for that agent and date; the caller merges
    /// and persists it alongside the rest of the grid. Refusal is terminal
    /// and emits nothing.
    pub fn decide(
        &self,
        id: &str,
        decision: AvailabilityDecision,
    ) -> AppResult<(AvailabilityProposal, Option<PlanningCell>)> {
        let existing = self.repo.find_by_id(id)?.ok_or_else(AppError::not_found)?;
        let next = decision_transition(existing.status, decision)?;
        let updated = self.repo.update_status(id, next)?;

        let cell = match decision {
            AvailabilityDecision::Validate => Some(PlanningCell {
                agent_id: updated.user_id.clone(),
                date: updated.date.clone(),
                activity_code: DEFAULT_VALIDATED_CODE.to_string(),
                status: CellStatus::Validated,
                availability_id: Some(updated.id.clone()),
            }),
            AvailabilityDecision::Refuse => None,
        };
        info!(target: "app::availability", availability_id = %id, status = %next, "availability decision recorded");
        Ok((updated, cell))
    }

    pub fn list(&self, filter: &AvailabilityFilter) -> AppResult<Vec<AvailabilityProposal>> {
        self.repo.list_by_filter(filter)
    }
}

pub fn decision_transition(
    current: AvailabilityStatus,
    decision: AvailabilityDecision,
) -> AppResult<AvailabilityStatus> {
    if current.is_terminal() {
        return Err(AppError::already_finalized(format!(
            "La proposition a déjà été traitée ({current})"
        )));
    }
    Ok(match decision {
        AvailabilityDecision::Validate => AvailabilityStatus::Validated,
        AvailabilityDecision::Refuse => AvailabilityStatus::Refused,
    })
}
