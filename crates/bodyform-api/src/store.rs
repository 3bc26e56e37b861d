//! Persistence contract for analyses and plans, plus an in-memory store.

use std::collections::HashMap;

use async_trait::async_trait;
use bodyform_anthro::{AggregateProfile, Analysis};
use bodyform_core::{Error, ImageId, Result, SubjectId, Timestamp};
use bodyform_plan::WeeklyPlan;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

/// A persisted plan together with the profile it was built from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRecord {
    pub id: Uuid,
    pub subject_id: SubjectId,
    pub weekly_plan: WeeklyPlan,
    /// Aggregate snapshot at generation time
    pub profile: AggregateProfile,
    pub created_at: Timestamp,
}

impl WorkoutRecord {
    pub fn new(subject_id: SubjectId, weekly_plan: WeeklyPlan, profile: AggregateProfile) -> Self {
        Self {
            id: Uuid::new_v4(),
            subject_id,
            weekly_plan,
            profile,
            created_at: Timestamp::now(),
        }
    }
}

/// Storage for analyses and workout records
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Analysis of a single image, if one exists
    async fn find_analysis(&self, image_id: &ImageId) -> Result<Option<Analysis>>;

    async fn find_analyses_by_subject(&self, subject_id: SubjectId) -> Result<Vec<Analysis>>;

    /// Fails with `AlreadyAnalyzed` if the image already has an analysis.
    async fn save_analysis(&self, analysis: Analysis) -> Result<()>;

    async fn save_plan(&self, record: WorkoutRecord) -> Result<()>;

    async fn find_plans_by_subject(&self, subject_id: SubjectId) -> Result<Vec<WorkoutRecord>>;
}

/// Process-local store
#[derive(Debug, Default)]
pub struct InMemoryStore {
    analyses: RwLock<HashMap<ImageId, Analysis>>,
    plans: RwLock<HashMap<SubjectId, Vec<WorkoutRecord>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn analysis_count(&self) -> usize {
        self.analyses.read().await.len()
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn find_analysis(&self, image_id: &ImageId) -> Result<Option<Analysis>> {
        let analyses = self.analyses.read().await;
        Ok(analyses.get(image_id).cloned())
    }

    async fn find_analyses_by_subject(&self, subject_id: SubjectId) -> Result<Vec<Analysis>> {
        let analyses = self.analyses.read().await;
        let mut found: Vec<Analysis> = analyses
            .values()
            .filter(|a| a.subject_id == subject_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.image_id.cmp(&b.image_id)));
        Ok(found)
    }

    async fn save_analysis(&self, analysis: Analysis) -> Result<()> {
        let mut analyses = self.analyses.write().await;
        if analyses.contains_key(&analysis.image_id) {
            return Err(Error::AlreadyAnalyzed(analysis.image_id));
        }
        analyses.insert(analysis.image_id.clone(), analysis);
        Ok(())
    }

    async fn save_plan(&self, record: WorkoutRecord) -> Result<()> {
        let mut plans = self.plans.write().await;
        let records = plans.entry(record.subject_id).or_default();
        if records.iter().any(|r| r.id == record.id) {
            return Err(Error::Storage(format!("workout record {} already stored", record.id)));
        }
        records.push(record);
        Ok(())
    }

    async fn find_plans_by_subject(&self, subject_id: SubjectId) -> Result<Vec<WorkoutRecord>> {
        let plans = self.plans.read().await;
        Ok(plans.get(&subject_id).cloned().unwrap_or_default())
    }
}
