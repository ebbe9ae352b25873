use common::model::generation::{GenerationJob, JobProgress};
use common::model::template::Template;

use crate::api::ApiError;

pub enum Msg {
    Loaded(Result<(Vec<Template>, Vec<GenerationJob>), ApiError>),
    /// Interval tick: refresh every active job.
    Poll,
    Progress(String, Result<JobProgress, ApiError>),
    Delete(String),
    Deleted(String, Result<(), ApiError>),
    Download(GenerationJob),
    Downloaded(String, Result<Vec<u8>, ApiError>),
}
