use chrono::{Duration, Local, NaiveDateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::absence::{
    AbsenceCreateInput, AbsenceRequest, AbsenceStatus, ManagerDecision, ReplacementDecision,
};
use crate::repository::AbsenceRepository;
use crate::services::date_utils;

/// Minimum notice between filing a request and the absence's start.
pub const MIN_LEAD_TIME_HOURS: i64 = 72;

pub struct AbsenceService<R: AbsenceRepository> {
    repo: R,
}

impl<R: AbsenceRepository> AbsenceService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Files a new request. The window must be forward and the start at
    /// least [`MIN_LEAD_TIME_HOURS`] away; the request opens as Pending.
    pub fn create(&self, input: AbsenceCreateInput) -> AppResult<AbsenceRequest> {
        let start = date_utils::parse_date_time(&input.start_date, &input.start_hour)?;
        let end = date_utils::parse_date_time(&input.end_date, &input.end_hour)?;
        ensure_window(start, end)?;
        ensure_lead_time(start, Local::now().naive_local())?;

        let record = AbsenceRequest {
            id: Uuid::new_v4().to_string(),
            staff_id: input.staff_id,
            service_id: input.service_id,
            start_date: input.start_date,
            start_hour: input.start_hour,
            end_date: input.end_date,
            end_hour: input.end_hour,
            reason_code: input.reason_code,
            comment: input.comment,
            replacement_id: input.replacement_id,
            status: AbsenceStatus::Pending,
            created_at: Utc::now().to_rfc3339(),
        };
        let stored = self.repo.create(record)?;
        info!(
            target: "app::absence",
            absence_id = %stored.id,
            staff_id = %stored.staff_id,
            "absence request created"
        );
        Ok(stored)
    }

    /// Accept/reject by the nominated replacement. Only a Pending request
    /// can receive a replacement decision.
    pub fn record_replacement_decision(
        &self,
        id: &str,
        decision: ReplacementDecision,
    ) -> AppResult<AbsenceRequest> {
        let existing = self.get(id)?;
        let next = replacement_transition(existing.status, decision)?;
        let updated = self
            .repo
            .update_status(id, next, existing.replacement_id.clone())?;
        info!(target: "app::absence", absence_id = %id, status = %next, "replacement decision recorded");
        Ok(updated)
    }

    /// Approve/reject by the manager, allowed from any non-terminal state,
    /// with or without a prior replacement response. The decision is final.
    pub fn record_manager_decision(
        &self,
        id: &str,
        decision: ManagerDecision,
        resolved_replacement_id: Option<String>,
    ) -> AppResult<AbsenceRequest> {
        let existing = self.get(id)?;
        let next = manager_transition(existing.status, decision)?;
        let replacement = resolved_replacement_id.or(existing.replacement_id);
        let updated = self.repo.update_status(id, next, replacement)?;
        info!(target: "app::absence", absence_id = %id, status = %next, "manager decision recorded");
        Ok(updated)
    }

    pub fn get(&self, id: &str) -> AppResult<AbsenceRequest> {
        self.repo.find_by_id(id)?.ok_or_else(AppError::not_found)
    }

    pub fn list_all(&self) -> AppResult<Vec<AbsenceRequest>> {
        self.repo.list_all()
    }

    /// Pending requests that nominate `user_id` as replacement.
    pub fn pending_for_replacement(&self, user_id: &str) -> AppResult<Vec<AbsenceRequest>> {
        Ok(self
            .list_all()?
            .into_iter()
            .filter(|request| {
                request.status == AbsenceStatus::Pending
                    && request.replacement_id.as_deref() == Some(user_id)
            })
            .collect())
    }

    /// Requests still awaiting a manager decision.
    pub fn pending_for_manager(&self) -> AppResult<Vec<AbsenceRequest>> {
        Ok(self
            .list_all()?
            .into_iter()
            .filter(|request| !request.status.is_terminal())
            .collect())
    }
}

pub fn replacement_transition(
    current: AbsenceStatus,
    decision: ReplacementDecision,
) -> AppResult<AbsenceStatus> {
    if current.is_terminal() {
        return Err(AppError::already_finalized(format!(
            "La demande est déjà clôturée ({current})"
        )));
    }
    if current != AbsenceStatus::Pending {
        return Err(AppError::invalid_transition(format!(
            "Une réponse du remplaçant a déjà été enregistrée ({current})"
        )));
    }
    Ok(match decision {
        ReplacementDecision::Accept => AbsenceStatus::AcceptedByReplacement,
        ReplacementDecision::Reject => AbsenceStatus::RejectedByReplacement,
    })
}

pub fn manager_transition(
    current: AbsenceStatus,
    decision: ManagerDecision,
) -> AppResult<AbsenceStatus> {
    if current.is_terminal() {
        return Err(AppError::already_finalized(format!(
            "La demande est déjà clôturée ({current})"
        )));
    }
    Ok(match decision {
        ManagerDecision::Approve => AbsenceStatus::ApprovedByManager,
        ManagerDecision::Reject => AbsenceStatus::RejectedByManager,
    })
}

fn ensure_window(start: NaiveDateTime, end: NaiveDateTime) -> AppResult<()> {
    if end <= start {
        return Err(AppError::validation(
            "La date de fin doit être postérieure à la date de début",
        ));
    }
    Ok(())
}

fn ensure_lead_time(start: NaiveDateTime, now: NaiveDateTime) -> AppResult<()> {
    if start.signed_duration_since(now) < Duration::hours(MIN_LEAD_TIME_HOURS) {
        return Err(AppError::lead_time(format!(
            "La demande doit être déposée au moins {MIN_LEAD_TIME_HOURS} heures avant le début de l'absence"
        )));
    }
    Ok(())
}
