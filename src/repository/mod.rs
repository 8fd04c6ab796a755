//! Storage contracts the services depend on.
//!
//! The services never talk to a store directly; they go through these
//! traits so an embedding can plug in whatever persistence it has. The
//! [`memory`] module ships hash-map implementations used by the tests and
//! by callers that keep state in process.

pub mod memory;

use crate::error::AppResult;
use crate::models::absence::{AbsenceRequest, AbsenceStatus};
use crate::models::actor::Actor;
use crate::models::availability::{AvailabilityProposal, AvailabilityStatus};
use crate::models::contract::Contract;
use crate::models::planning::PlanningCell;

/// Narrows an availability listing. The default filter lists everything.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityFilter {
    pub service_id: Option<String>,
    pub status: Option<AvailabilityStatus>,
}

/// Inclusive `YYYY-MM-DD` window of a grid load, optionally scoped to one
/// service.
#[derive(Debug, Clone)]
pub struct PlanningFilter {
    pub from: String,
    pub to: String,
    pub service_id: Option<String>,
}

pub trait ContractRepository: Send + Sync {
    fn get_by_employee(&self, employee_id: &str) -> AppResult<Option<Contract>>;
    fn replace(&self, contract: Contract) -> AppResult<Contract>;
}

pub trait AbsenceRepository: Send + Sync {
    fn list_all(&self) -> AppResult<Vec<AbsenceRequest>>;
    fn find_by_id(&self, id: &str) -> AppResult<Option<AbsenceRequest>>;
    fn create(&self, request: AbsenceRequest) -> AppResult<AbsenceRequest>;
    /// Writes the new status. A passed `replacement_id` replaces the stored
    /// one; `None` leaves it untouched.
    fn update_status(
        &self,
        id: &str,
        status: AbsenceStatus,
        replacement_id: Option<String>,
    ) -> AppResult<AbsenceRequest>;
}

pub trait AvailabilityRepository: Send + Sync {
    fn list_by_filter(&self, filter: &AvailabilityFilter) -> AppResult<Vec<AvailabilityProposal>>;
    fn find_by_id(&self, id: &str) -> AppResult<Option<AvailabilityProposal>>;
    fn create(&self, proposal: AvailabilityProposal) -> AppResult<AvailabilityProposal>;
    fn update_status(
        &self,
        id: &str,
        status: AvailabilityStatus,
    ) -> AppResult<AvailabilityProposal>;
}

pub trait PlanningRepository: Send + Sync {
    fn list_by_filter(&self, filter: &PlanningFilter) -> AppResult<Vec<PlanningCell>>;
    /// Upserts every cell by agent and date, returning how many were
    /// written.
    fn bulk_save(&self, cells: &[PlanningCell]) -> AppResult<usize>;
}

/// Tells the services who is acting. Embeddings plug their session layer
/// in here.
pub trait IdentityProvider: Send + Sync {
    fn current_actor(&self) -> AppResult<Actor>;
}
