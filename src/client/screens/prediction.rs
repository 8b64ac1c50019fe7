use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::client::api::PredictionApi;
use crate::client::models::PredictionResponse;
use crate::client::theme::ThemeStore;

pub const NO_TICKER: &str = "No ticker symbol provided.";
pub const PREDICTION_FAILED: &str = "Failed to fetch prediction.";
pub const MAX_DAYS: u32 = 730;
pub const DEFAULT_DAYS: u32 = 30;

/// Preset prediction horizons offered by the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizon {
    Day,
    Week,
    Month,
    Quarter,
    HalfYear,
    Year,
}

impl Horizon {
    pub const ALL: [Horizon; 6] = [
        Horizon::Day,
        Horizon::Week,
        Horizon::Month,
        Horizon::Quarter,
        Horizon::HalfYear,
        Horizon::Year,
    ];

    pub fn days(self) -> u32 {
        match self {
            Horizon::Day => 1,
            Horizon::Week => 7,
            Horizon::Month => 30,
            Horizon::Quarter => 90,
            Horizon::HalfYear => 180,
            Horizon::Year => 365,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Horizon::Day => "1 Day",
            Horizon::Week => "1 Week",
            Horizon::Month => "1 Month",
            Horizon::Quarter => "3 Months",
            Horizon::HalfYear => "6 Months",
            Horizon::Year => "1 Year",
        }
    }

    pub fn from_days(days: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|h| h.days() == days)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionState {
    pub days: u32,
    pub loading: bool,
    pub error: Option<String>,
    pub result: Option<PredictionResponse>,
}

impl Default for PredictionState {
    fn default() -> Self {
        Self {
            days: DEFAULT_DAYS,
            loading: false,
            error: None,
            result: None,
        }
    }
}

/// Prediction page for one ticker.
pub struct PredictionView {
    api: Arc<dyn PredictionApi>,
    ticker: String,
    state: watch::Sender<PredictionState>,
    seq: AtomicU64,
    theme: &'static ThemeStore,
    lifetime: CancellationToken,
}

impl PredictionView {
    pub fn new(api: Arc<dyn PredictionApi>, ticker: &str) -> Self {
        Self::with_theme(api, ticker, ThemeStore::global())
    }

    pub fn with_theme(api: Arc<dyn PredictionApi>, ticker: &str, theme: &'static ThemeStore) -> Self {
        Self {
            api,
            ticker: ticker.trim().to_uppercase(),
            state: watch::channel(PredictionState::default()).0,
            seq: AtomicU64::new(0),
            theme,
            lifetime: CancellationToken::new(),
        }
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn heading(&self) -> String {
        format!("Predictions for {}", self.ticker)
    }

    pub fn state(&self) -> PredictionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PredictionState> {
        self.state.subscribe()
    }

    pub fn theme(&self) -> &ThemeStore {
        self.theme
    }

    /// Fetch with the currently selected horizon.
    pub async fn load(&self) {
        let days = self.state.borrow().days;
        self.fetch(days).await;
    }

    pub async fn select_horizon(&self, horizon: Horizon) {
        self.fetch(horizon.days()).await;
    }

    /// Request a prediction. Earlier charts are cleared before the request
    /// goes out; only the newest request may publish its result.
    pub async fn fetch(&self, days: u32) {
        if self.ticker.is_empty() {
            self.reject(NO_TICKER.into());
            return;
        }
        if !(1..=MAX_DAYS).contains(&days) {
            self.reject(format!(
                "Prediction horizon must be between 1 and {MAX_DAYS} days."
            ));
            return;
        }

        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|s| {
            s.days = days;
            s.loading = true;
            s.error = None;
            s.result = None;
        });

        let result = tokio::select! {
            biased;
            _ = self.lifetime.cancelled() => return,
            result = self.api.predict(&self.ticker, days) => result,
        };

        if self.lifetime.is_cancelled() || self.seq.load(Ordering::SeqCst) != seq {
            debug!(ticker = %self.ticker, days, "dropping stale prediction");
            return;
        }

        self.state.send_modify(|s| {
            s.loading = false;
            match result {
                Ok(resp) if resp.charts().is_empty() && resp.error.is_some() => {
                    s.error = resp.error;
                }
                Ok(resp) => s.result = Some(resp),
                Err(e) => {
                    warn!(ticker = %self.ticker, days, error = %e, "prediction failed");
                    s.error = Some(
                        e.server_field("error")
                            .unwrap_or_else(|| PREDICTION_FAILED.into()),
                    );
                }
            }
        });
    }

    /// Local validation failure. Supersedes any request still in flight and
    /// drops the charts of the previous horizon.
    fn reject(&self, message: String) {
        self.seq.fetch_add(1, Ordering::SeqCst);
        self.state.send_modify(|s| {
            s.loading = false;
            s.result = None;
            s.error = Some(message);
        });
    }

    pub fn unmount(&self) {
        self.lifetime.cancel();
    }
}

impl Drop for PredictionView {
    fn drop(&mut self) {
        self.lifetime.cancel();
    }
}
