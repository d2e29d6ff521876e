//! Resource-scoped facades over [`RequestDispatcher`].
//!
//! Every method is a single pass-through: no validation, retries or caching.
//! Failures are whatever the dispatcher classified, including the session
//! teardown on 401.

pub mod auth;
pub mod canonical_groups;
pub mod import;
pub mod programs;
pub mod reports;
pub mod resource;
pub mod rooms;
pub mod time_slots;
pub mod timetable;

pub use auth::AuthApi;
pub use canonical_groups::CanonicalGroupsApi;
pub use import::ImportApi;
pub use programs::ProgramsApi;
pub use reports::ReportsApi;
pub use resource::ResourceClient;
pub use rooms::RoomsApi;
pub use time_slots::TimeSlotsApi;
pub use timetable::TimetableApi;

use crate::error::ApiError;
use crate::models::{Lecturer, RoomSpecialization, Subject};

pub type SubjectsApi = ResourceClient<Subject>;
pub type LecturersApi = ResourceClient<Lecturer>;
pub type RoomSpecializationsApi = ResourceClient<RoomSpecialization>;

/// Joins a base path with percent-encoded segments. A blank segment would
/// silently address the parent collection, so it is rejected.
pub(crate) fn join_path(base: &str, segments: &[&str]) -> Result<String, ApiError> {
    let mut path = base.trim_end_matches('/').to_string();
    for segment in segments {
        if segment.trim().is_empty() {
            return Err(ApiError::Config(format!("Empty path segment under {}", base)));
        }
        path.push('/');
        path.push_str(&urlencoding::encode(segment));
    }
    Ok(path)
}
