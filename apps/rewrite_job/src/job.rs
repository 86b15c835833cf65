use std::time::{Duration, Instant};

use crate::app_module::AppServices;
use crate::config::JobConfig;
use crate::dataset_io::{read_dataset, write_dataset};
use crate::error::JobError;
use crate::pipeline::{transform_dataset, TransformSummary};
use crate::storage::ObjectLocation;
use crate::timing::timed;

#[derive(Debug, Clone)]
pub struct JobReport {
    pub source: ObjectLocation,
    pub destination: ObjectLocation,
    pub summary: TransformSummary,
    pub elapsed: Duration,
}

/// Read, transform, write. Each stage finishes before the next one starts,
/// and nothing is written unless the first two succeed.
pub struct Job {
    source: ObjectLocation,
    destination: ObjectLocation,
    text_column: String,
    services: AppServices,
}

impl Job {
    pub fn new(config: &JobConfig, services: AppServices) -> Self {
        Self {
            source: config.source.clone(),
            destination: config.destination.clone(),
            text_column: config.text_column.clone(),
            services,
        }
    }

    pub async fn run(&self) -> Result<JobReport, JobError> {
        let started = Instant::now();
        tracing::info!(
            source = %self.source,
            destination = %self.destination,
            column = %self.text_column,
            "Starting text rewrite job"
        );

        let dataset = timed(
            "read_dataset",
            read_dataset(self.services.store.as_ref(), &self.source),
        )
        .await?;
        tracing::info!(
            rows = dataset.len(),
            columns = dataset.headers().len(),
            "Source dataset loaded"
        );

        let (dataset, summary) = timed(
            "transform_dataset",
            transform_dataset(
                dataset,
                &self.text_column,
                self.services.transformer.as_ref(),
            ),
        )
        .await?;

        timed(
            "write_dataset",
            write_dataset(self.services.store.as_ref(), &dataset, &self.destination),
        )
        .await?;

        let report = JobReport {
            source: self.source.clone(),
            destination: self.destination.clone(),
            summary,
            elapsed: started.elapsed(),
        };

        tracing::info!(
            rows = report.summary.rows,
            changed = report.summary.changed,
            unchanged = report.summary.unchanged,
            failed = report.summary.failed,
            elapsed_secs = report.elapsed.as_secs_f64(),
            "Text rewrite job completed"
        );

        Ok(report)
    }
}
