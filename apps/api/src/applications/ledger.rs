//! Application Ledger: at most one application per job id; only status changes after
//! insertion. Bulk apply generates snippets strictly one job at a time.

use std::collections::HashSet;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::cover_letter::generate_cover_letter_snippet;
use crate::llm_client::GenerativeModel;
use crate::models::application::{Application, ApplicationStatus};
use crate::models::job::JobPosting;
use crate::models::profile::Profile;

#[derive(Debug, Default)]
pub struct ApplicationLedger {
    applications: Vec<Application>,
}

impl ApplicationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applications in insertion order.
    pub fn applications(&self) -> &[Application] {
        &self.applications
    }

    pub fn len(&self) -> usize {
        self.applications.len()
    }

    pub fn contains(&self, job_id: &str) -> bool {
        self.get(job_id).is_some()
    }

    pub fn get(&self, job_id: &str) -> Option<&Application> {
        self.applications.iter().find(|a| a.job.id == job_id)
    }

    /// Records an application dated today. Returns false (and changes nothing) if the
    /// job already has one.
    pub fn apply(&mut self, job: JobPosting, cover_letter_snippet: Option<String>) -> bool {
        self.apply_on(job, cover_letter_snippet, today())
    }

    pub fn apply_on(
        &mut self,
        job: JobPosting,
        cover_letter_snippet: Option<String>,
        applied_date: String,
    ) -> bool {
        if self.contains(&job.id) {
            return false;
        }
        self.applications.push(Application {
            job,
            status: ApplicationStatus::Applied,
            applied_date,
            cover_letter_snippet,
        });
        true
    }

    /// Updates the status only. `None` if no application exists for the job.
    pub fn set_status(&mut self, job_id: &str, status: ApplicationStatus) -> Option<&Application> {
        let application = self.applications.iter_mut().find(|a| a.job.id == job_id)?;
        application.status = status;
        Some(application)
    }

    pub fn summary(&self) -> LedgerSummary {
        let by_status = ApplicationStatus::ALL
            .iter()
            .map(|&status| StatusCount {
                status,
                count: self
                    .applications
                    .iter()
                    .filter(|a| a.status == status)
                    .count(),
            })
            .collect();
        LedgerSummary {
            total: self.applications.len(),
            by_status,
        }
    }
}

fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusCount {
    pub status: ApplicationStatus,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSummary {
    pub total: usize,
    pub by_status: Vec<StatusCount>,
}

// ────────────────────────────────────────────────────────────────────────────
// Apply operations (model-backed)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ApplyOutcome {
    /// False when the job had already been applied to.
    pub created: bool,
    pub application: Application,
}

/// Single apply: generate a snippet, then record the application. An existing
/// application is returned untouched without calling the model.
pub async fn apply_to_job(
    ledger: &Mutex<ApplicationLedger>,
    llm: &dyn GenerativeModel,
    model: &str,
    profile: &Profile,
    job: JobPosting,
) -> Result<ApplyOutcome, AppError> {
    if let Some(existing) = ledger.lock().await.get(&job.id).cloned() {
        return Ok(ApplyOutcome {
            created: false,
            application: existing,
        });
    }

    let snippet = generate_cover_letter_snippet(llm, model, profile, &job).await?;

    let mut ledger = ledger.lock().await;
    let job_id = job.id.clone();
    let created = ledger.apply(job, Some(snippet));
    let application = ledger.get(&job_id).cloned().ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!("Application for {job_id} missing after insert"))
    })?;

    info!("Application prepared for {}", application.job.title);
    Ok(ApplyOutcome {
        created,
        application,
    })
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkApplyFailure {
    pub job_id: String,
    pub title: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkApplyReport {
    /// Jobs for which a snippet was requested.
    pub attempted: usize,
    pub succeeded: usize,
    /// Already applied (before or during the run), or repeated in the request.
    /// `succeeded + failures + skipped` equals the number of jobs requested.
    pub skipped: usize,
    pub failures: Vec<BulkApplyFailure>,
}

/// Applies to each job in order, one model call at a time. A failed snippet skips
/// that job and the batch continues.
pub async fn bulk_apply(
    ledger: &Mutex<ApplicationLedger>,
    llm: &dyn GenerativeModel,
    model: &str,
    profile: &Profile,
    jobs: Vec<JobPosting>,
) -> BulkApplyReport {
    let requested = jobs.len();
    let pending: Vec<JobPosting> = {
        let ledger = ledger.lock().await;
        let mut seen = HashSet::new();
        jobs.into_iter()
            .filter(|job| !ledger.contains(&job.id) && seen.insert(job.id.clone()))
            .collect()
    };

    let mut report = BulkApplyReport {
        attempted: pending.len(),
        skipped: requested - pending.len(),
        ..Default::default()
    };
    info!(
        "Starting bulk apply for {} jobs ({} skipped)",
        report.attempted, report.skipped
    );

    let total = pending.len();
    for (index, job) in pending.into_iter().enumerate() {
        let step = format!("[{}/{}]", index + 1, total);

        // A single apply may have landed since the batch started.
        if ledger.lock().await.contains(&job.id) {
            info!("{step} Already applied to {}. Skipping.", job.title);
            report.attempted -= 1;
            report.skipped += 1;
            continue;
        }
        info!("{step} Preparing application for {}", job.title);

        match generate_cover_letter_snippet(llm, model, profile, &job).await {
            Ok(snippet) => {
                if ledger.lock().await.apply(job, Some(snippet)) {
                    report.succeeded += 1;
                } else {
                    report.skipped += 1;
                }
            }
            Err(e) => {
                warn!("{step} Failed to apply for {}: {e}. Skipping.", job.title);
                report.failures.push(BulkApplyFailure {
                    job_id: job.id,
                    title: job.title,
                    reason: e.to_string(),
                });
            }
        }
    }

    if report.succeeded > 0 {
        info!(
            "Successfully applied to {} of {} jobs",
            report.succeeded, report.attempted
        );
    } else if report.attempted > 0 {
        warn!("Bulk apply failed for all selected jobs");
    }

    report
}
