use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chart_publish::{
    backend::{ApiSnafu, BackendError, ChartBackend, PublishedChart},
    publish_chart, PublishError, PublishOptions, Stage,
};
use chrono::{TimeZone, Utc};

/// In-memory chart backend that records every call and can be told to fail
/// at one stage.
struct RecordingBackend {
    calls: Mutex<Vec<&'static str>>,
    stored_data: Mutex<Option<String>>,
    stored_notes: Mutex<Option<String>>,
    fail_at: Option<Stage>,
}

impl RecordingBackend {
    fn new() -> Self {
        Self::failing_at(None)
    }

    fn failing_at(fail_at: Option<Stage>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            stored_data: Mutex::new(None),
            stored_notes: Mutex::new(None),
            fail_at,
        }
    }

    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn call_count(&self, name: &str) -> usize {
        self.calls().iter().filter(|call| **call == name).count()
    }

    fn fail_if(&self, stage: Stage) -> Result<(), BackendError> {
        if self.fail_at == Some(stage) {
            return ApiSnafu {
                status: 500u16,
                message: "injected failure".to_string(),
            }
            .fail();
        }
        Ok(())
    }
}

#[async_trait]
impl ChartBackend for RecordingBackend {
    async fn upload_data(&self, _chart_id: &str, payload: &str) -> Result<(), BackendError> {
        self.calls.lock().unwrap().push("upload");
        self.fail_if(Stage::Upload)?;
        // Replacement semantics: the previous payload is overwritten, never
        // appended to.
        *self.stored_data.lock().unwrap() = Some(payload.to_string());
        Ok(())
    }

    async fn update_notes(&self, _chart_id: &str, notes: &str) -> Result<(), BackendError> {
        self.calls.lock().unwrap().push("annotate");
        self.fail_if(Stage::Annotate)?;
        *self.stored_notes.lock().unwrap() = Some(notes.to_string());
        Ok(())
    }

    async fn publish(&self, chart_id: &str) -> Result<PublishedChart, BackendError> {
        self.calls.lock().unwrap().push("republish");
        self.fail_if(Stage::Republish)?;
        Ok(PublishedChart {
            public_url: format!("//www.datawrapper.de/_/{chart_id}/"),
        })
    }

    async fn chart_data(&self, _chart_id: &str) -> Result<String, BackendError> {
        self.calls.lock().unwrap().push("chart_data");
        Ok(self.stored_data.lock().unwrap().clone().unwrap_or_default())
    }
}

fn fixed_now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2022, 9, 16, 12, 5, 0).unwrap()
}

#[tokio::test]
async fn stages_run_in_order_and_report_the_public_url() {
    let backend = RecordingBackend::new();

    let url = publish_chart(
        &backend,
        "2bB1Y",
        "Date|NVDA\nt1|822.79",
        fixed_now(),
        &PublishOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(url, "//www.datawrapper.de/_/2bB1Y/");
    assert_eq!(backend.calls(), vec!["upload", "annotate", "republish"]);
    assert_eq!(
        backend.stored_data.lock().unwrap().as_deref(),
        Some("Date|NVDA\nt1|822.79")
    );
    assert_eq!(
        backend.stored_notes.lock().unwrap().as_deref(),
        Some("Actualizado: 16 sept, 14.05.")
    );
}

#[tokio::test]
async fn repeated_upload_of_the_same_payload_is_idempotent() {
    let backend = RecordingBackend::new();

    backend.upload_data("2bB1Y", "Date|A\nt1|1").await.unwrap();
    backend.upload_data("2bB1Y", "Date|A\nt1|1").await.unwrap();

    // Both calls executed against the backend, but the stored state is the
    // single payload, not an accumulation.
    assert_eq!(backend.call_count("upload"), 2);
    assert_eq!(
        backend.chart_data("2bB1Y").await.unwrap(),
        "Date|A\nt1|1"
    );
}

#[tokio::test]
async fn annotate_failure_skips_republish_and_keeps_the_upload() {
    let backend = RecordingBackend::failing_at(Some(Stage::Annotate));

    let err = publish_chart(
        &backend,
        "2bB1Y",
        "Date|A\nt1|1",
        fixed_now(),
        &PublishOptions::default(),
    )
    .await
    .unwrap_err();

    assert_eq!(err.stage(), Stage::Annotate);
    assert!(matches!(err, PublishError::StageFailed { .. }));
    assert_eq!(backend.call_count("republish"), 0);
    // No rollback: the uploaded payload remains applied.
    assert_eq!(
        backend.stored_data.lock().unwrap().as_deref(),
        Some("Date|A\nt1|1")
    );
}

#[tokio::test]
async fn upload_failure_skips_every_later_stage() {
    let backend = RecordingBackend::failing_at(Some(Stage::Upload));

    let err = publish_chart(
        &backend,
        "2bB1Y",
        "Date|A\nt1|1",
        fixed_now(),
        &PublishOptions::default(),
    )
    .await
    .unwrap_err();

    assert_eq!(err.stage(), Stage::Upload);
    assert_eq!(backend.calls(), vec!["upload"]);
    assert!(backend.stored_data.lock().unwrap().is_none());
}

/// Backend whose upload never settles within the test's deadline.
struct StalledBackend;

#[async_trait]
impl ChartBackend for StalledBackend {
    async fn upload_data(&self, _chart_id: &str, _payload: &str) -> Result<(), BackendError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(())
    }

    async fn update_notes(&self, _chart_id: &str, _notes: &str) -> Result<(), BackendError> {
        Ok(())
    }

    async fn publish(&self, _chart_id: &str) -> Result<PublishedChart, BackendError> {
        Ok(PublishedChart {
            public_url: String::new(),
        })
    }

    async fn chart_data(&self, _chart_id: &str) -> Result<String, BackendError> {
        Ok(String::new())
    }
}

#[tokio::test(start_paused = true)]
async fn stage_deadline_surfaces_as_a_deadline_error() {
    let options = PublishOptions {
        stage_deadline: Some(Duration::from_millis(100)),
    };

    let err = publish_chart(&StalledBackend, "2bB1Y", "Date|A", fixed_now(), &options)
        .await
        .unwrap_err();

    assert!(matches!(err, PublishError::Deadline { .. }));
    assert_eq!(err.stage(), Stage::Upload);
}
