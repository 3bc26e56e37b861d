//! Service orchestration: analyze images, generate and list plans.

use std::sync::Arc;

use bodyform_anthro::{AggregationEngine, Analysis, AnthropometricAnalyzer};
use bodyform_core::{normalize_pose, Error, ImageId, LandmarkSet, PoseEstimate, Result, SubjectId};
use bodyform_plan::PlanSynthesizer;

use crate::config::ServiceConfig;
use crate::store::{RecordStore, WorkoutRecord};

/// Entry point tying the pure pipeline to a record store
pub struct BodyformService {
    store: Arc<dyn RecordStore>,
    analyzer: AnthropometricAnalyzer,
    aggregator: AggregationEngine,
    synthesizer: PlanSynthesizer,
    normalize: bool,
}

impl BodyformService {
    pub fn new(config: &ServiceConfig, store: Arc<dyn RecordStore>) -> Result<Self> {
        config.validate()?;

        let synthesizer = PlanSynthesizer::new(Arc::new(config.catalog()?), config.plan.rules.clone())
            .with_light_session_len(config.plan.light_session_len);

        Ok(Self {
            store,
            analyzer: AnthropometricAnalyzer::new(config.extractor()?),
            aggregator: config.aggregation_engine(),
            synthesizer,
            normalize: config.analysis.normalize_pose,
        })
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    pub async fn is_analyzed(&self, image_id: &ImageId) -> Result<bool> {
        Ok(self.store.find_analysis(image_id).await?.is_some())
    }

    /// Analyze one image's pose and persist the result.
    ///
    /// An image is analyzed at most once; a repeat request fails with
    /// `AlreadyAnalyzed` and stores nothing.
    pub async fn analyze_image(
        &self,
        subject_id: SubjectId,
        image_id: ImageId,
        pose: PoseEstimate,
        reference_height_cm: f64,
    ) -> Result<Analysis> {
        if self.is_analyzed(&image_id).await? {
            tracing::warn!(subject = %subject_id, image = %image_id, "image already analyzed");
            return Err(Error::AlreadyAnalyzed(image_id));
        }

        let (landmarks, cam_t) = if self.normalize {
            let normalized = normalize_pose(&pose)?;
            (normalized.landmarks, normalized.cam_t)
        } else {
            (LandmarkSet::new(pose.joints)?, pose.cam_t)
        };

        let analysis = self
            .analyzer
            .analyze(subject_id, image_id, landmarks, cam_t, reference_height_cm)?;

        // The store re-checks under its own lock
        self.store.save_analysis(analysis.clone()).await?;

        tracing::info!(
            subject = %analysis.subject_id,
            image = %analysis.image_id,
            height_cm = analysis.measurements.height,
            "image analyzed"
        );

        Ok(analysis)
    }

    /// Aggregate every analysis of a subject and persist a new weekly plan.
    pub async fn generate_plan(&self, subject_id: SubjectId) -> Result<WorkoutRecord> {
        let analyses = self.store.find_analyses_by_subject(subject_id).await?;
        if analyses.is_empty() {
            tracing::warn!(subject = %subject_id, "no analyses to build a plan from");
            return Err(Error::NoData);
        }

        let profile = self.aggregator.aggregate(&analyses)?;
        let plan = self.synthesizer.synthesize(&profile);
        let record = WorkoutRecord::new(subject_id, plan, profile);

        self.store.save_plan(record.clone()).await?;

        tracing::info!(
            subject = %subject_id,
            record = %record.id,
            analyses = profile.source_count,
            priorities = record.weekly_plan.priorities.len(),
            "workout plan generated"
        );

        Ok(record)
    }

    /// Plans for a subject, newest first
    pub async fn list_plans(&self, subject_id: SubjectId) -> Result<Vec<WorkoutRecord>> {
        let mut records = self.store.find_plans_by_subject(subject_id).await?;
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }
}
