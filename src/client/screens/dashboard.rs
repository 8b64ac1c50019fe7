use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::client::api::PredictionApi;
use crate::client::models::{StockQuote, Suggestion};
use crate::client::route::Route;
use crate::client::theme::ThemeStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Trending,
    TopLosers,
}

impl PanelKind {
    pub fn title(self) -> &'static str {
        match self {
            PanelKind::Trending => "Trending Stocks",
            PanelKind::TopLosers => "Top Losers",
        }
    }
}

/// What a quote panel shows. `Empty` renders the loading/empty placeholder.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PanelState {
    #[default]
    Empty,
    Quotes(Vec<StockQuote>),
}

impl PanelState {
    fn from_quotes(quotes: Vec<StockQuote>) -> Self {
        if quotes.is_empty() {
            PanelState::Empty
        } else {
            PanelState::Quotes(quotes)
        }
    }

    pub fn quotes(&self) -> &[StockQuote] {
        match self {
            PanelState::Empty => &[],
            PanelState::Quotes(quotes) => quotes,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, PanelState::Empty)
    }
}

async fn fetch_panel(api: &dyn PredictionApi, kind: PanelKind) -> PanelState {
    let result = match kind {
        PanelKind::Trending => api.trending().await,
        PanelKind::TopLosers => api.top_losers().await,
    };
    match result {
        Ok(quotes) => PanelState::from_quotes(quotes),
        Err(e) => {
            warn!(panel = kind.title(), error = %e, "panel refresh failed; showing empty list");
            PanelState::Empty
        }
    }
}

/// Shortest accepted refresh period; anything below is raised to it.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Refresh a panel now and then every `every` until `shutdown` is cancelled.
pub fn spawn_panel(
    api: Arc<dyn PredictionApi>,
    kind: PanelKind,
    every: Duration,
    shutdown: CancellationToken,
) -> watch::Receiver<PanelState> {
    let every = if every < MIN_POLL_INTERVAL {
        warn!(panel = kind.title(), requested = ?every, "poll interval too short; using minimum");
        MIN_POLL_INTERVAL
    } else {
        every
    };
    let (tx, rx) = watch::channel(PanelState::Empty);
    tokio::spawn(run_panel(api, kind, every, tx, shutdown));
    rx
}

async fn run_panel(
    api: Arc<dyn PredictionApi>,
    kind: PanelKind,
    every: Duration,
    tx: watch::Sender<PanelState>,
    shutdown: CancellationToken,
) {
    let mut ticker = tokio::time::interval(every);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;

            _ = shutdown.cancelled() => {
                debug!(panel = kind.title(), "panel poller stopped");
                return;
            }

            _ = ticker.tick() => {
                let state = tokio::select! {
                    biased;
                    _ = shutdown.cancelled() => return,
                    state = fetch_panel(api.as_ref(), kind) => state,
                };
                tx.send_replace(state);
            }
        }
    }
}

/// The stock dashboard: ticker search plus the two polling panels.
pub struct Dashboard {
    api: Arc<dyn PredictionApi>,
    ticker: watch::Sender<String>,
    suggestions: watch::Sender<Vec<Suggestion>>,
    search_seq: AtomicU64,
    trending: watch::Receiver<PanelState>,
    top_losers: watch::Receiver<PanelState>,
    theme: &'static ThemeStore,
    lifetime: CancellationToken,
}

impl Dashboard {
    /// Starts both pollers; must be called inside a tokio runtime.
    pub fn mount(api: Arc<dyn PredictionApi>, poll_every: Duration) -> Self {
        Self::mount_with_theme(api, poll_every, ThemeStore::global())
    }

    pub fn mount_with_theme(
        api: Arc<dyn PredictionApi>,
        poll_every: Duration,
        theme: &'static ThemeStore,
    ) -> Self {
        let lifetime = CancellationToken::new();
        let trending = spawn_panel(
            api.clone(),
            PanelKind::Trending,
            poll_every,
            lifetime.child_token(),
        );
        let top_losers = spawn_panel(
            api.clone(),
            PanelKind::TopLosers,
            poll_every,
            lifetime.child_token(),
        );
        Self {
            api,
            ticker: watch::channel(String::new()).0,
            suggestions: watch::channel(Vec::new()).0,
            search_seq: AtomicU64::new(0),
            trending,
            top_losers,
            theme,
            lifetime,
        }
    }

    pub fn ticker(&self) -> String {
        self.ticker.borrow().clone()
    }

    pub fn suggestions(&self) -> Vec<Suggestion> {
        self.suggestions.borrow().clone()
    }

    pub fn subscribe_suggestions(&self) -> watch::Receiver<Vec<Suggestion>> {
        self.suggestions.subscribe()
    }

    pub fn panel(&self, kind: PanelKind) -> watch::Receiver<PanelState> {
        match kind {
            PanelKind::Trending => self.trending.clone(),
            PanelKind::TopLosers => self.top_losers.clone(),
        }
    }

    pub fn theme(&self) -> &ThemeStore {
        self.theme
    }

    /// Handle one keystroke in the search box.
    ///
    /// Only the most recent input may update the suggestions; a response for
    /// an older input, or one arriving after unmount, is dropped.
    pub async fn on_input(&self, raw: &str) {
        let input = raw.to_uppercase();
        self.ticker.send_replace(input.clone());
        let seq = self.search_seq.fetch_add(1, Ordering::SeqCst) + 1;

        if input.chars().count() <= 1 {
            self.suggestions.send_replace(Vec::new());
            return;
        }

        let result = tokio::select! {
            biased;
            _ = self.lifetime.cancelled() => return,
            result = self.api.search(&input) => result,
        };

        if self.lifetime.is_cancelled() || self.search_seq.load(Ordering::SeqCst) != seq {
            debug!(query = %input, "dropping stale search response");
            return;
        }

        let suggestions = result.unwrap_or_else(|e| {
            warn!(query = %input, error = %e, "ticker search failed");
            Vec::new()
        });
        self.suggestions.send_replace(suggestions);
    }

    /// Where the search button leads, if anywhere.
    pub fn submit_search(&self) -> Option<Route> {
        let ticker = self.ticker.borrow().trim().to_string();
        (!ticker.is_empty()).then_some(Route::Predict(ticker))
    }

    pub fn unmount(&self) {
        self.lifetime.cancel();
    }

    pub fn is_mounted(&self) -> bool {
        !self.lifetime.is_cancelled()
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        self.lifetime.cancel();
    }
}
