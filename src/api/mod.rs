//! HTTP API module for the Leave Balance Engine.
//!
//! This module provides the REST endpoints for maintaining employees and
//! leave entries and for reading computed leave balances.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    CreateEmployeeRequest, CreateLeaveEntryRequest, UpdateEmployeeRequest, UpdateLeaveEntryRequest,
};
pub use response::{
    ApiError, EmployeeBalanceResponse, LeaveEntryCreatedResponse, LeaveEntryResponse,
    LeaveOverviewResponse, MessageResponse,
};
pub use state::AppState;
