//! Path segment parsing for job routes.

use uuid::Uuid;

use todo_core::error::AppError;

/// Parse the `{jobId}` segment of a job-status route.
pub fn parse_job_id(segment: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(segment.trim())
        .map_err(|_| AppError::validation(format!("Invalid job id '{segment}'")))
}
