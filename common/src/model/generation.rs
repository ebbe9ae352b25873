use serde::{Deserialize, Serialize};

/// Lifecycle of a card generation job on the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    /// Pending and processing jobs are still moving and worth polling.
    pub fn is_active(&self) -> bool {
        matches!(self, JobStatus::Pending | JobStatus::Processing)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }
}

/// One row of `GET /generation/history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationJob {
    #[serde(deserialize_with = "super::id_string")]
    pub id: String,
    #[serde(default)]
    pub template_name: String,
    #[serde(default)]
    pub data_file_name: String,
    #[serde(default)]
    pub generated_cards: u64,
    #[serde(default)]
    pub total_cards: u64,
    pub status: JobStatus,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub pdf_url: Option<String>,
}

impl GenerationJob {
    pub fn is_downloadable(&self) -> bool {
        self.status == JobStatus::Completed && self.pdf_url.is_some()
    }

    pub fn download_name(&self) -> String {
        format!("{}_cards.pdf", self.template_name)
    }
}

/// Response of `GET /generation/status/{id}`.
///
/// Only the moving parts of a job; anything absent keeps its history value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JobProgress {
    pub status: JobStatus,
    #[serde(default)]
    pub generated_cards: Option<u64>,
    #[serde(default)]
    pub total_cards: Option<u64>,
    #[serde(default)]
    pub pdf_url: Option<String>,
}

/// Folds a status poll into the history entry with id `id`; unknown jobs are
/// ignored.
///
/// Returns whether anything changed.
pub fn merge_job(history: &mut [GenerationJob], id: &str, progress: JobProgress) -> bool {
    let Some(job) = history.iter_mut().find(|job| job.id == id) else {
        return false;
    };
    let before = job.clone();
    job.status = progress.status;
    if let Some(generated) = progress.generated_cards {
        job.generated_cards = generated;
    }
    if let Some(total) = progress.total_cards {
        job.total_cards = total;
    }
    if progress.pdf_url.is_some() {
        job.pdf_url = progress.pdf_url;
    }
    *job != before
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(id: &str, status: JobStatus) -> GenerationJob {
        GenerationJob {
            id: id.into(),
            template_name: "Staff".into(),
            data_file_name: "staff.csv".into(),
            generated_cards: 0,
            total_cards: 10,
            status,
            created_at: None,
            pdf_url: None,
        }
    }

    #[test]
    fn merge_updates_matching_entry_only() {
        let mut history = vec![job("1", JobStatus::Processing), job("2", JobStatus::Pending)];
        let done = JobProgress {
            status: JobStatus::Completed,
            generated_cards: Some(10),
            total_cards: None,
            pdf_url: Some("https://cdn.example/1.pdf".into()),
        };

        assert!(merge_job(&mut history, "1", done.clone()));
        assert_eq!(history[0].status, JobStatus::Completed);
        assert_eq!(history[0].generated_cards, 10);
        assert_eq!(history[0].total_cards, 10);
        assert_eq!(history[0].template_name, "Staff");
        assert_eq!(history[1].status, JobStatus::Pending);

        assert!(!merge_job(&mut history, "9", done.clone()));
        assert!(!merge_job(&mut history, "1", done));
    }

    #[test]
    fn progress_parses_sparse_body() {
        let progress: JobProgress = serde_json::from_str(r#"{"status": "failed"}"#).unwrap();
        assert_eq!(progress.status, JobStatus::Failed);
        assert_eq!(progress.pdf_url, None);
    }

    #[test]
    fn only_completed_jobs_with_a_result_download() {
        let mut entry = job("1", JobStatus::Completed);
        assert!(!entry.is_downloadable());
        entry.pdf_url = Some("x".into());
        assert!(entry.is_downloadable());
        assert_eq!(entry.download_name(), "Staff_cards.pdf");
    }

    #[test]
    fn status_parses_lowercase() {
        let entry: GenerationJob =
            serde_json::from_str(r#"{"id": 3, "status": "processing"}"#).unwrap();
        assert!(entry.status.is_active());
        assert_eq!(entry.id, "3");
    }
}
