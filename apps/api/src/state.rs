use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

use crate::applications::ledger::ApplicationLedger;
use crate::config::Config;
use crate::errors::AppError;
use crate::llm_client::GenerativeModel;
use crate::models::job::{JobPosting, SourceCitation};
use crate::models::profile::Profile;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Model client, constructed once at startup with the configured API key.
    pub llm: Arc<dyn GenerativeModel>,
    pub config: Config,
    pub session: Arc<RwLock<Session>>,
    pub ledger: Arc<Mutex<ApplicationLedger>>,
    pub upload_gate: OperationGate,
    pub apply_gate: OperationGate,
    pub bulk_apply_gate: OperationGate,
}

impl AppState {
    pub fn new(config: Config, llm: Arc<dyn GenerativeModel>) -> Self {
        Self {
            llm,
            config,
            session: Arc::new(RwLock::new(Session::default())),
            ledger: Arc::new(Mutex::new(ApplicationLedger::new())),
            upload_gate: OperationGate::new("A resume upload"),
            apply_gate: OperationGate::new("An application"),
            bulk_apply_gate: OperationGate::new("A bulk apply"),
        }
    }

    /// Keeps the failure visible as the session banner until the next attempt.
    pub async fn record_failure(&self, action: &str, err: &AppError) {
        self.session.write().await.banner = Some(format!("{action}: {err}"));
    }
}

/// The single in-memory user session. Lost on restart.
#[derive(Debug, Default)]
pub struct Session {
    pub profile: Option<Profile>,
    pub jobs: Vec<JobPosting>,
    pub sources: Vec<SourceCitation>,
    /// Last extraction or discovery failure.
    pub banner: Option<String>,
}

impl Session {
    /// Replaces the profile; results found for the previous one are dropped.
    pub fn set_profile(&mut self, profile: Profile) {
        self.profile = Some(profile);
        self.jobs.clear();
        self.sources.clear();
    }

    /// Stores discovery results, unless the profile was replaced while the search ran.
    pub fn store_results(
        &mut self,
        searched_for: &Profile,
        jobs: Vec<JobPosting>,
        sources: Vec<SourceCitation>,
    ) -> bool {
        if self.profile.as_ref() != Some(searched_for) {
            return false;
        }
        self.jobs = jobs;
        self.sources = sources;
        true
    }

    pub fn require_profile(&self) -> Result<Profile, AppError> {
        self.profile
            .clone()
            .ok_or_else(|| AppError::Validation("Upload a resume first".to_string()))
    }

    pub fn find_job(&self, job_id: &str) -> Option<&JobPosting> {
        self.jobs.iter().find(|j| j.id == job_id)
    }

    pub fn summary(&self, application_count: usize) -> SessionSummary {
        SessionSummary {
            has_profile: self.profile.is_some(),
            job_count: self.jobs.len(),
            source_count: self.sources.len(),
            application_count,
            banner: self.banner.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub has_profile: bool,
    pub job_count: usize,
    pub source_count: usize,
    pub application_count: usize,
    pub banner: Option<String>,
}

/// Allows one operation of a kind in flight; a second concurrent request is refused.
#[derive(Clone)]
pub struct OperationGate {
    name: &'static str,
    lock: Arc<Mutex<()>>,
}

impl OperationGate {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// The operation holds the returned guard until it finishes.
    pub fn try_begin(&self) -> Result<OwnedMutexGuard<()>, AppError> {
        self.lock
            .clone()
            .try_lock_owned()
            .map_err(|_| AppError::Conflict(format!("{} is already in progress", self.name)))
    }
}
