//! Interactive affordances drawn over a viewer.
//!
//! The overlay only tracks what should be visible; the host draws it however
//! it likes (DOM elements, egui windows, sprites).

use crate::error::ViewerError;
use std::time::Duration;
use web_time::Instant;

/// How long error banners stay visible by default.
pub const DEFAULT_ERROR_DISPLAY: Duration = Duration::from_secs(8);

/// An error message shown until `expires_at`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorBanner {
    /// Text of the banner.
    pub message: String,
    /// When the banner hides itself.
    pub expires_at: Instant,
}

/// Overlay state of one viewer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Overlay {
    play_button: bool,
    loading: bool,
    retry_button: bool,
    drop_highlight: bool,
    error: Option<ErrorBanner>,
    error_display: Duration,
}

impl Default for Overlay {
    fn default() -> Self {
        Overlay::new(false, DEFAULT_ERROR_DISPLAY)
    }
}

impl Overlay {
    /// Creates an overlay, showing the play button if `play_button` is set.
    ///
    /// Error banners stay up for `error_display`.
    pub fn new(play_button: bool, error_display: Duration) -> Self {
        Overlay {
            play_button,
            loading: false,
            retry_button: false,
            drop_highlight: false,
            error: None,
            error_display,
        }
    }

    /// Whether the play button is visible.
    pub fn play_button(&self) -> bool {
        self.play_button
    }

    /// Whether the loading indicator is visible.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Whether the retry button is visible.
    pub fn retry_button(&self) -> bool {
        self.retry_button
    }

    /// Whether a file is hovering over the viewer.
    pub fn drop_highlight(&self) -> bool {
        self.drop_highlight
    }

    /// The error banner, if one is visible.
    pub fn error(&self) -> Option<&ErrorBanner> {
        self.error.as_ref()
    }

    /// Hides the play and retry buttons and shows the loading indicator.
    pub fn begin_load(&mut self) {
        self.play_button = false;
        self.retry_button = false;
        self.loading = true;
    }

    /// Updates the overlay once a load resolved.
    ///
    /// A load rejected because another one is in flight leaves the loading
    /// indicator up. A failed load offers a retry unless the viewer was
    /// disposed.
    pub fn finish_load<T>(&mut self, result: &Result<T, ViewerError>, now: Instant) {
        match result {
            Ok(_) => {
                self.loading = false;
                self.error = None;
            }
            Err(ViewerError::AlreadyLoading) => {}
            Err(ViewerError::Disposed | ViewerError::CycleActive) => self.loading = false,
            Err(err) => {
                self.loading = false;
                self.retry_button = true;
                self.show_error(err, now);
            }
        }
    }

    /// Shows `err` in the banner until `error_display` after `now`.
    pub fn show_error(&mut self, err: &ViewerError, now: Instant) {
        self.error = Some(ErrorBanner {
            message: err.to_string(),
            expires_at: now + self.error_display,
        });
    }

    /// Hides the retry button.
    pub fn dismiss_retry(&mut self) {
        self.retry_button = false;
    }

    /// Shows or hides the drop highlight.
    pub fn set_drop_highlight(&mut self, highlight: bool) {
        self.drop_highlight = highlight;
    }

    /// Hides the error banner if it expired at `now`.
    ///
    /// Returns `true` if a banner was hidden.
    pub fn expire(&mut self, now: Instant) -> bool {
        match &self.error {
            Some(banner) if banner.expires_at <= now => {
                self.error = None;
                true
            }
            _ => false,
        }
    }

    /// Hides everything.
    pub fn clear(&mut self) {
        *self = Overlay::new(false, self.error_display);
    }
}
