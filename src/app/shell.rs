use crate::domain::model::{RecommendationResponse, SongRecommendation};
use crate::domain::ports::RecommendationProvider;
use crate::utils::error::Result;
use crate::utils::validation::validate_theme;

/// Identifies one submission. Only the most recently issued one may update
/// the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttemptId(u64);

/// A submission that passed validation and should be sent to the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub attempt: AttemptId,
    pub theme: String,
}

/// What the shell currently shows. Exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View<'a> {
    Idle,
    Loading,
    Error(&'a str),
    Results(&'a [SongRecommendation]),
}

#[derive(Debug, Default)]
pub struct AppShell {
    theme: String,
    loading: bool,
    error: Option<String>,
    recommendations: Vec<SongRecommendation>,
    has_searched: bool,
    issued: u64,
}

impl AppShell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: impl Into<String>) {
        self.theme = theme.into();
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn recommendations(&self) -> &[SongRecommendation] {
        &self.recommendations
    }

    pub fn has_searched(&self) -> bool {
        self.has_searched
    }

    pub fn latest_attempt(&self) -> Option<AttemptId> {
        (self.issued > 0).then_some(AttemptId(self.issued))
    }

    /// Submit button, Enter key and "re-recommend" all land here.
    pub fn submit(&mut self) -> Option<Submission> {
        let theme = self.theme.clone();
        self.begin(&theme)
    }

    /// Preset chips put their text in the input and submit it right away.
    pub fn select_preset(&mut self, preset: &str) -> Option<Submission> {
        self.theme = preset.to_string();
        self.begin(preset)
    }

    /// Starts an attempt for `theme`. A blank theme sets the validation error
    /// and returns `None`; nothing else changes.
    pub fn begin(&mut self, theme: &str) -> Option<Submission> {
        if let Err(e) = validate_theme(theme) {
            tracing::debug!("Rejected blank theme");
            self.error = Some(e.user_friendly_message());
            return None;
        }

        self.issued += 1;
        self.loading = true;
        self.has_searched = true;
        self.error = None;

        let attempt = AttemptId(self.issued);
        tracing::debug!("Attempt {:?} started for {:?}", attempt, theme);
        Some(Submission {
            attempt,
            theme: theme.to_string(),
        })
    }

    /// Applies the outcome of `attempt`. Returns `false` when a newer attempt
    /// has been issued since, in which case the outcome is dropped.
    pub fn complete(&mut self, attempt: AttemptId, result: Result<RecommendationResponse>) -> bool {
        if Some(attempt) != self.latest_attempt() {
            tracing::debug!(
                "Dropping stale result of {:?} (latest is {:?})",
                attempt,
                self.latest_attempt()
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(response) => {
                // supersedes a validation error raised while loading
                self.error = None;
                self.recommendations = response.recommendations;
            }
            Err(e) => {
                tracing::warn!("❌ Recommendation fetch failed: {}", e);
                self.error = Some(e.user_friendly_message());
            }
        }
        true
    }

    /// Runs a submission to completion against `provider`.
    pub async fn fetch<P: RecommendationProvider + ?Sized>(
        &mut self,
        provider: &P,
        submission: Submission,
    ) -> bool {
        let result = provider.recommend(&submission.theme).await;
        self.complete(submission.attempt, result)
    }

    pub fn view(&self) -> View<'_> {
        if self.loading {
            View::Loading
        } else if let Some(error) = self.error.as_deref() {
            View::Error(error)
        } else if self.has_searched {
            View::Results(&self.recommendations)
        } else {
            View::Idle
        }
    }
}
