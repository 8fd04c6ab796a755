//! Hash-map implementations of the storage contracts.
//!
//! Every repository is a cheap clone over a shared store, so the same
//! handle can be given to several services at once.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{AppError, AppResult};
use crate::models::absence::{AbsenceRequest, AbsenceStatus};
use crate::models::actor::Actor;
use crate::models::availability::{AvailabilityProposal, AvailabilityStatus};
use crate::models::contract::Contract;
use crate::models::planning::PlanningCell;

use super::{
    AbsenceRepository, AvailabilityFilter, AvailabilityRepository, ContractRepository,
    IdentityProvider, PlanningFilter, PlanningRepository,
};

fn lock<T>(mutex: &Mutex<T>) -> AppResult<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| AppError::other("verrou du dépôt en mémoire corrompu"))
}

/// Maps agents to their service. The availability and planning stores
/// share one directory so their service filters agree.
#[derive(Clone, Default)]
pub struct ServiceDirectory {
    inner: Arc<Mutex<HashMap<String, String>>>,
}

impl ServiceDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign(
        &self,
        agent_id: impl Into<String>,
        service_id: impl Into<String>,
    ) -> AppResult<()> {
        lock(&self.inner)?.insert(agent_id.into(), service_id.into());
        Ok(())
    }

    pub fn service_of(&self, agent_id: &str) -> AppResult<Option<String>> {
        Ok(lock(&self.inner)?.get(agent_id).cloned())
    }
}

/// One contract per employee, the latest write winning.
#[derive(Clone, Default)]
pub struct InMemoryContractRepository {
    contracts: Arc<Mutex<HashMap<String, Contract>>>,
}

impl InMemoryContractRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ContractRepository for InMemoryContractRepository {
    fn get_by_employee(&self, employee_id: &str) -> AppResult<Option<Contract>> {
        Ok(lock(&self.contracts)?.get(employee_id).cloned())
    }

    fn replace(&self, contract: Contract) -> AppResult<Contract> {
        lock(&self.contracts)?.insert(contract.employee_id.clone(), contract.clone());
        Ok(contract)
    }
}

#[derive(Clone, Default)]
pub struct InMemoryAbsenceRepository {
    requests: Arc<Mutex<HashMap<String, AbsenceRequest>>>,
}

impl InMemoryAbsenceRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AbsenceRepository for InMemoryAbsenceRepository {
    fn list_all(&self) -> AppResult<Vec<AbsenceRequest>> {
        let mut out: Vec<_> = lock(&self.requests)?.values().cloned().collect();
        out.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(out)
    }

    fn find_by_id(&self, id: &str) -> AppResult<Option<AbsenceRequest>> {
        Ok(lock(&self.requests)?.get(id).cloned())
    }

    fn create(&self, request: AbsenceRequest) -> AppResult<AbsenceRequest> {
        lock(&self.requests)?.insert(request.id.clone(), request.clone());
        Ok(request)
    }

    fn update_status(
        &self,
        id: &str,
        status: AbsenceStatus,
        replacement_id: Option<String>,
    ) -> AppResult<AbsenceRequest> {
        let mut requests = lock(&self.requests)?;
        let request = requests.get_mut(id).ok_or_else(AppError::not_found)?;
        request.status = status;
        if let Some(replacement) = replacement_id {
            request.replacement_id = Some(replacement);
        }
        Ok(request.clone())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryAvailabilityRepository {
    proposals: Arc<Mutex<HashMap<String, AvailabilityProposal>>>,
    directory: ServiceDirectory,
}

impl InMemoryAvailabilityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_directory(directory: ServiceDirectory) -> Self {
        Self {
            proposals: Arc::default(),
            directory,
        }
    }

    pub fn directory(&self) -> ServiceDirectory {
        self.directory.clone()
    }
}

impl AvailabilityRepository for InMemoryAvailabilityRepository {
    fn list_by_filter(&self, filter: &AvailabilityFilter) -> AppResult<Vec<AvailabilityProposal>> {
        let proposals = lock(&self.proposals)?;
        let mut out = Vec::new();
        for proposal in proposals.values() {
            if let Some(status) = filter.status {
                if proposal.status != status {
                    continue;
                }
            }
            if let Some(service_id) = &filter.service_id {
                if self.directory.service_of(&proposal.user_id)?.as_deref()
                    != Some(service_id.as_str())
                {
                    continue;
                }
            }
            out.push(proposal.clone());
        }
        out.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.start_time.cmp(&b.start_time)));
        Ok(out)
    }

    fn find_by_id(&self, id: &str) -> AppResult<Option<AvailabilityProposal>> {
        Ok(lock(&self.proposals)?.get(id).cloned())
    }

    fn create(&self, proposal: AvailabilityProposal) -> AppResult<AvailabilityProposal> {
        lock(&self.proposals)?.insert(proposal.id.clone(), proposal.clone());
        Ok(proposal)
    }

    fn update_status(
        &self,
        id: &str,
        status: AvailabilityStatus,
    ) -> AppResult<AvailabilityProposal> {
        let mut proposals = lock(&self.proposals)?;
        let proposal = proposals.get_mut(id).ok_or_else(AppError::not_found)?;
        proposal.status = status;
        Ok(proposal.clone())
    }
}

/// Cells keyed by agent and date, matching the grid's one-cell-per-slot
/// rule.
#[derive(Clone, Default)]
pub struct InMemoryPlanningRepository {
    cells: Arc<Mutex<HashMap<(String, String), PlanningCell>>>,
    directory: ServiceDirectory,
}

impl InMemoryPlanningRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_directory(directory: ServiceDirectory) -> Self {
        Self {
            cells: Arc::default(),
            directory,
        }
    }

    pub fn directory(&self) -> ServiceDirectory {
        self.directory.clone()
    }
}

impl PlanningRepository for InMemoryPlanningRepository {
    fn list_by_filter(&self, filter: &PlanningFilter) -> AppResult<Vec<PlanningCell>> {
        let cells = lock(&self.cells)?;
        let mut out = Vec::new();
        for cell in cells.values() {
            // ISO dates compare lexicographically.
            if cell.date < filter.from || cell.date > filter.to {
                continue;
            }
            if let Some(service_id) = &filter.service_id {
                if self.directory.service_of(&cell.agent_id)?.as_deref()
                    != Some(service_id.as_str())
                {
                    continue;
                }
            }
            out.push(cell.clone());
        }
        out.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.agent_id.cmp(&b.agent_id)));
        Ok(out)
    }

    fn bulk_save(&self, cells: &[PlanningCell]) -> AppResult<usize> {
        let mut stored = lock(&self.cells)?;
        for cell in cells {
            stored.insert((cell.agent_id.clone(), cell.date.clone()), cell.clone());
        }
        Ok(cells.len())
    }
}

/// Identity provider pinned to one actor.
#[derive(Clone)]
pub struct StaticIdentityProvider {
    actor: Actor,
}

impl StaticIdentityProvider {
    pub fn new(actor: Actor) -> Self {
        Self { actor }
    }
}

impl IdentityProvider for StaticIdentityProvider {
    fn current_actor(&self) -> AppResult<Actor> {
        Ok(self.actor.clone())
    }
}
