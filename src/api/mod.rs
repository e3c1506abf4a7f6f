//! HTTP API module for the capacity engine.
//!
//! This module provides stateless JSON endpoints: each request carries the
//! planning state, and the server contributes the configured settings and
//! holiday calendars.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{MAX_PERIOD_HEADERS, create_router};
pub use request::{
    AllocationRequest, CapacityRequest, MemberLoadRequest, PeriodsRequest, SnapshotRequest,
    WarningsRequest,
};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
