pub mod absence;
pub mod actor;
pub mod availability;
pub mod contract;
pub mod planning;
pub mod schedule;
