pub mod absence_service;
pub mod availability_service;
pub mod contract_service;
pub mod date_utils;
pub mod planning_service;
pub mod schedule_service;
