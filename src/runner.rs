//! Run orchestration: regions in order, one file per region.

use anyhow::Result;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{error, info};

use crate::api::{ApiError, TrendingApi};
use crate::collector::TrendingCollector;
use crate::csv;
use crate::extract::SchemaVariant;

/// Outcome of a full run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub regions_completed: usize,
    pub rows_written: usize,
    pub files: Vec<PathBuf>,
    pub elapsed: Duration,
}

/// Iterates the configured regions strictly sequentially and writes one CSV
/// snapshot per region. A 429 anywhere stops the run before the next
/// request; regions already written stay on disk.
pub struct Runner<A> {
    collector: TrendingCollector<A>,
    output_dir: PathBuf,
    trending_date: String,
}

impl<A: TrendingApi> Runner<A> {
    pub fn new(
        api: A,
        variant: SchemaVariant,
        output_dir: PathBuf,
        trending_date: String,
    ) -> Self {
        Self {
            collector: TrendingCollector::new(api, variant, trending_date.clone()),
            output_dir,
            trending_date,
        }
    }

    pub async fn run(&mut self, regions: &[String]) -> Result<RunSummary> {
        let start = Instant::now();
        let mut summary = RunSummary {
            regions_completed: 0,
            rows_written: 0,
            files: Vec::new(),
            elapsed: Duration::ZERO,
        };

        for region in regions {
            info!("🌍 Collecting trending videos for {}", region);

            let rows = match self.collector.collect_region(region).await {
                Ok(rows) => rows,
                Err(e @ ApiError::RateLimited) => {
                    error!(
                        "Rate limited while collecting {}; aborting run ({} region(s) written)",
                        region, summary.regions_completed
                    );
                    return Err(e.into());
                }
                Err(e) => return Err(e.into()),
            };

            let header = self.collector.variant().header();
            let contents = csv::serialize_file(header, &rows);
            let path =
                csv::write_region_file(&self.output_dir, &self.trending_date, region, &contents)
                    .await?;

            summary.regions_completed += 1;
            summary.rows_written += rows.len();
            summary.files.push(path);
        }

        summary.elapsed = start.elapsed();
        info!(
            "🎉 Run completed in {:.2}s: {} region(s), {} rows",
            summary.elapsed.as_secs_f64(),
            summary.regions_completed,
            summary.rows_written
        );

        Ok(summary)
    }
}
