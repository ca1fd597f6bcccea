//! The strictly sequential upload → annotate → republish pipeline.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::info;
use snafu::{Backtrace, ResultExt, Snafu};

use crate::backend::{BackendError, ChartBackend, PublishedChart};
use crate::notes::freshness_note;

/// The pipeline stages that perform a remote mutation, in execution order.
///
/// Reporting the public URL is the caller-visible fourth step; it performs
/// no remote call and therefore has no failure stage of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Upload,
    Annotate,
    Republish,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Upload => "upload",
            Stage::Annotate => "annotate",
            Stage::Republish => "republish",
        };
        f.write_str(name)
    }
}

/// A pipeline failure, tagged with the stage that caused it.
///
/// Stages already applied stay applied; the partially published chart is an
/// accepted, visible intermediate state.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum PublishError {
    /// The named stage's remote call failed; later stages were skipped.
    #[snafu(display("{stage} stage failed: {source}"))]
    StageFailed {
        stage: Stage,
        source: BackendError,
    },

    /// The named stage did not complete within the configured deadline.
    #[snafu(display("{stage} stage exceeded its deadline"))]
    Deadline {
        stage: Stage,
        backtrace: Backtrace,
    },
}

impl PublishError {
    /// The stage this failure is tagged with.
    pub fn stage(&self) -> Stage {
        match self {
            PublishError::StageFailed { stage, .. } | PublishError::Deadline { stage, .. } => {
                *stage
            }
        }
    }
}

/// Tuning knobs for a pipeline run.
#[derive(Debug, Clone, Copy, Default)]
pub struct PublishOptions {
    /// Optional deadline applied to each stage's remote call. `None` leaves
    /// the transport's own timeout in charge, matching the backend client's
    /// default behavior.
    pub stage_deadline: Option<Duration>,
}

/// Runs the full pipeline against `chart_id`: upload `payload`, stamp the
/// notes with a freshness marker derived from `now`, republish, and return
/// the public URL.
///
/// Stage N+1 never begins before stage N's remote call has been
/// acknowledged. On failure the error names the stage, later stages are
/// skipped, and nothing already applied is rolled back.
pub async fn publish_chart<B>(
    backend: &B,
    chart_id: &str,
    payload: &str,
    now: DateTime<Utc>,
    options: &PublishOptions,
) -> Result<String, PublishError>
where
    B: ChartBackend + Sync,
{
    run_stage(
        Stage::Upload,
        options,
        backend.upload_data(chart_id, payload),
    )
    .await?;
    info!("[{chart_id}] Data updated.");

    run_stage(
        Stage::Annotate,
        options,
        backend.update_notes(chart_id, &freshness_note(now)),
    )
    .await?;
    info!("[{chart_id}] Last update time updated.");

    let PublishedChart { public_url } =
        run_stage(Stage::Republish, options, backend.publish(chart_id)).await?;
    info!("[{chart_id}] Chart published: {public_url}");

    Ok(public_url)
}

async fn run_stage<T>(
    stage: Stage,
    options: &PublishOptions,
    call: impl Future<Output = Result<T, BackendError>>,
) -> Result<T, PublishError> {
    let settled = match options.stage_deadline {
        Some(deadline) => match tokio::time::timeout(deadline, call).await {
            Ok(settled) => settled,
            Err(_) => return DeadlineSnafu { stage }.fail(),
        },
        None => call.await,
    };

    settled.context(StageFailedSnafu { stage })
}
