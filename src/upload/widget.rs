//! Upload widget state machine
//!
//! ```text
//! Idle -> Validating -> Uploading -> Succeeded | Failed
//!              \-> Failed
//! ```
//!
//! Each selection restarts from `Idle`. The widget owns its state
//! exclusively; two widgets never share anything. `select_file` borrows the
//! widget mutably for the whole flow, so one instance can never have two
//! uploads in flight.

use super::UploadedImage;
use super::transport::UploadTransport;
use super::validation::{SelectedFile, validate_file};
use crate::config::UploadConfig;
use crate::core::error::UploadError;
use std::sync::Arc;
use tokio::sync::watch;

/// Where the widget is in the upload flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadState {
    Idle,
    Validating,
    Uploading,
    Succeeded,
    Failed,
}

impl UploadState {
    /// Whether the flow has settled and awaits acknowledgement
    pub fn is_terminal(&self) -> bool {
        matches!(self, UploadState::Succeeded | UploadState::Failed)
    }
}

/// One banner-image upload control
pub struct UploadWidget {
    transport: Arc<dyn UploadTransport>,
    config: UploadConfig,
    state: watch::Sender<UploadState>,
    value: Option<UploadedImage>,
    error: Option<String>,
    disabled: bool,
    control_resets: u64,
}

impl UploadWidget {
    pub fn new(transport: Arc<dyn UploadTransport>, config: UploadConfig) -> Self {
        let (state, _) = watch::channel(UploadState::Idle);
        Self {
            transport,
            config,
            state,
            value: None,
            error: None,
            disabled: false,
            control_resets: 0,
        }
    }

    /// Start with an image the owning form already holds
    pub fn with_value(mut self, value: Option<UploadedImage>) -> Self {
        self.value = value;
        self
    }

    /// Disable or enable the control
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Current state
    pub fn state(&self) -> UploadState {
        *self.state.borrow()
    }

    /// Observe state transitions, e.g. to drive an "uploading" indicator
    pub fn subscribe(&self) -> watch::Receiver<UploadState> {
        self.state.subscribe()
    }

    pub fn is_uploading(&self) -> bool {
        self.state() == UploadState::Uploading
    }

    /// Whether the file control accepts input right now
    pub fn is_interactive(&self) -> bool {
        !self.disabled && !self.is_uploading()
    }

    /// The currently held image, if any
    pub fn value(&self) -> Option<&UploadedImage> {
        self.value.as_ref()
    }

    /// Inline error message from the last selection
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// How many times the file control has been cleared
    pub fn control_resets(&self) -> u64 {
        self.control_resets
    }

    /// Value for the file input's `accept` attribute
    pub fn accept_attribute(&self) -> String {
        self.config.accept_attribute()
    }

    /// Handle a file selection.
    ///
    /// Returns `Ok(None)` when nothing happened (selection cancelled or the
    /// control is disabled), `Ok(Some(image))` after a successful upload and
    /// the user-facing error otherwise.
    pub async fn select_file(
        &mut self,
        file: Option<SelectedFile>,
    ) -> Result<Option<UploadedImage>, UploadError> {
        if !self.is_interactive() {
            return Ok(None);
        }

        self.error = None;
        self.transition(UploadState::Idle);

        let Some(file) = file else {
            return Ok(None);
        };

        self.transition(UploadState::Validating);
        if let Err(err) = validate_file(&file, &self.config) {
            tracing::debug!(file = %file.name, mime_type = %file.mime_type, size = file.size(), "upload rejected: {}", err);
            self.reset_control();
            return Err(self.fail(err));
        }

        self.transition(UploadState::Uploading);
        let result = self.transport.upload(&file, &self.config.preset).await;
        self.reset_control();

        match result {
            Ok(image) => {
                tracing::debug!(file = %file.name, public_id = %image.public_id, "upload succeeded");
                self.value = Some(image.clone());
                self.transition(UploadState::Succeeded);
                Ok(Some(image))
            }
            Err(err) => {
                tracing::warn!(file = %file.name, error = %err, "upload failed");
                Err(self.fail(UploadError::Failed))
            }
        }
    }

    /// Return to `Idle` after the caller has seen a terminal state
    pub fn acknowledge(&mut self) {
        if self.state().is_terminal() {
            self.transition(UploadState::Idle);
        }
    }

    /// Forget the current image and any error.
    ///
    /// No network call is made; the hosted asset stays where it is.
    pub fn remove(&mut self) -> Option<UploadedImage> {
        if !self.is_interactive() {
            return None;
        }
        self.error = None;
        self.value.take()
    }

    fn fail(&mut self, err: UploadError) -> UploadError {
        self.error = Some(err.to_string());
        self.transition(UploadState::Failed);
        err
    }

    fn reset_control(&mut self) {
        self.control_resets += 1;
    }

    fn transition(&self, next: UploadState) {
        self.state.send_replace(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::transport::TransportError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Transport spy: counts calls and answers with a canned result
    struct SpyTransport {
        calls: AtomicUsize,
        succeed: bool,
    }

    impl SpyTransport {
        fn new(succeed: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                succeed,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl UploadTransport for SpyTransport {
        async fn upload(
            &self,
            file: &SelectedFile,
            preset: &str,
        ) -> Result<UploadedImage, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.succeed {
                Ok(UploadedImage {
                    url: format!("https://cdn.example.com/{}/{}", preset, file.name),
                    public_id: format!("{}/{}", preset, file.name),
                })
            } else {
                Err(TransportError::MissingField("public_id"))
            }
        }
    }

    fn png(name: &str) -> SelectedFile {
        SelectedFile::new(name, "image/png", vec![1, 2, 3])
    }

    #[tokio::test]
    async fn test_cancelled_selection_stays_idle() {
        let spy = SpyTransport::new(true);
        let mut widget = UploadWidget::new(spy.clone(), UploadConfig::default());

        assert_eq!(widget.select_file(None).await, Ok(None));
        assert_eq!(widget.state(), UploadState::Idle);
        assert_eq!(widget.error(), None);
        assert_eq!(widget.control_resets(), 0);
        assert_eq!(spy.calls(), 0);
    }

    #[tokio::test]
    async fn test_text_file_rejected_before_network() {
        let spy = SpyTransport::new(true);
        let mut widget = UploadWidget::new(spy.clone(), UploadConfig::default());

        let file = SelectedFile::new("notes.txt", "text/plain", b"hello".to_vec());
        let err = widget.select_file(Some(file)).await.unwrap_err();

        assert!(matches!(err, UploadError::InvalidType { .. }));
        assert_eq!(widget.state(), UploadState::Failed);
        assert_eq!(
            widget.error(),
            Some("Only PNG, JPG, JPEG, and WEBP files are allowed.")
        );
        assert_eq!(widget.control_resets(), 1);
        assert_eq!(spy.calls(), 0);
    }

    #[tokio::test]
    async fn test_successful_upload_sets_value() {
        let spy = SpyTransport::new(true);
        let mut widget = UploadWidget::new(spy.clone(), UploadConfig::default());

        let image = widget.select_file(Some(png("banner.png"))).await.unwrap().unwrap();

        assert_eq!(image.public_id, "campus_unsigned/banner.png");
        assert_eq!(widget.value(), Some(&image));
        assert_eq!(widget.state(), UploadState::Succeeded);
        assert_eq!(widget.control_resets(), 1);
        assert_eq!(spy.calls(), 1);

        widget.acknowledge();
        assert_eq!(widget.state(), UploadState::Idle);
    }

    #[tokio::test]
    async fn test_transport_failure_collapses_to_generic_message() {
        let spy = SpyTransport::new(false);
        let mut widget = UploadWidget::new(spy.clone(), UploadConfig::default());

        let err = widget.select_file(Some(png("banner.png"))).await.unwrap_err();

        assert_eq!(err, UploadError::Failed);
        assert_eq!(widget.error(), Some("Failed to upload image. Try again."));
        assert_eq!(widget.value(), None);
        assert_eq!(widget.control_resets(), 1);
    }

    #[tokio::test]
    async fn test_new_selection_clears_previous_error() {
        let spy = SpyTransport::new(true);
        let mut widget = UploadWidget::new(spy, UploadConfig::default());

        let _ = widget
            .select_file(Some(SelectedFile::new("a.gif", "image/gif", vec![0])))
            .await;
        assert!(widget.error().is_some());

        widget.select_file(Some(png("b.png"))).await.unwrap();
        assert_eq!(widget.error(), None);
    }

    #[tokio::test]
    async fn test_remove_forgets_image_and_error() {
        let spy = SpyTransport::new(true);
        let existing = UploadedImage {
            url: "https://cdn.example.com/old.png".to_string(),
            public_id: "old".to_string(),
        };
        let mut widget =
            UploadWidget::new(spy.clone(), UploadConfig::default()).with_value(Some(existing.clone()));

        assert_eq!(widget.remove(), Some(existing));
        assert_eq!(widget.value(), None);
        assert_eq!(widget.error(), None);
        assert_eq!(spy.calls(), 0);
    }

    #[tokio::test]
    async fn test_disabled_widget_ignores_input() {
        let spy = SpyTransport::new(true);
        let mut widget = UploadWidget::new(spy.clone(), UploadConfig::default());
        widget.set_disabled(true);

        assert_eq!(widget.select_file(Some(png("x.png"))).await, Ok(None));
        assert_eq!(spy.calls(), 0);
        assert!(!widget.is_interactive());
    }

    #[test]
    fn test_accept_attribute() {
        let widget = UploadWidget::new(SpyTransport::new(true), UploadConfig::default());
        assert_eq!(
            widget.accept_attribute(),
            "image/png,image/jpeg,image/jpg,image/webp"
        );
    }
}
