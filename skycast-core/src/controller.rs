//! Selection controller: the single owner of the UI-facing state.
//!
//! One external event (`select_city`) starts a resolution cycle: weather
//! first, then — only on weather success — the background image. Cycles are
//! never hard-cancelled; a superseded cycle runs to completion and its
//! results are discarded by a generation-token check at apply time.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::model::{ImageReference, WeatherEnvelope};
use crate::resolver::{ImageSource, WeatherSource};

/// Snapshot of the current selection cycle, published to observers.
///
/// Mutated only by [`SelectionController`]; everything else reads clones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    pub selected_city: Option<String>,
    /// True while a weather lookup is in flight. Image resolution never
    /// toggles this.
    pub loading: bool,
    pub weather: Option<WeatherEnvelope>,
    pub background: Option<ImageReference>,
    /// Cycle token; bumped on every accepted selection. Completions carry
    /// the token they were issued under and are discarded on mismatch.
    generation: u64,
}

pub struct SelectionController {
    weather: Arc<dyn WeatherSource>,
    images: Arc<dyn ImageSource>,
    state: watch::Sender<SelectionState>,
}

impl SelectionController {
    pub fn new(weather: Arc<dyn WeatherSource>, images: Arc<dyn ImageSource>) -> Self {
        let (state, _) = watch::channel(SelectionState::default());
        Self {
            weather,
            images,
            state,
        }
    }

    /// Observe state changes; every applied mutation marks the receiver.
    pub fn subscribe(&self) -> watch::Receiver<SelectionState> {
        self.state.subscribe()
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> SelectionState {
        self.state.borrow().clone()
    }

    /// Begin a resolution cycle for `city`.
    ///
    /// A blank name is rejected without touching state. Previous weather and
    /// background stay visible while the new cycle is in flight
    /// (refresh-in-place rather than blank-then-load).
    pub async fn select_city(&self, city: &str) {
        let city = city.trim();
        if city.is_empty() {
            warn!("ignoring selection of empty city name");
            return;
        }

        let mut token = 0;
        self.state.send_modify(|s| {
            s.generation += 1;
            token = s.generation;
            s.selected_city = Some(city.to_string());
            s.loading = true;
        });

        self.run_cycle(city, token).await;
    }

    /// Re-run the cycle for the currently selected city. No-op when nothing
    /// has been selected yet.
    pub async fn refresh(&self) {
        let city = self.state.borrow().selected_city.clone();
        match city {
            Some(city) => self.select_city(&city).await,
            None => debug!("refresh requested before any selection"),
        }
    }

    async fn run_cycle(&self, city: &str, token: u64) {
        let envelope = self.weather.resolve(city).await;
        let success = envelope.is_success();

        self.apply_if_current(token, |s| {
            s.weather = Some(envelope);
            s.loading = false;
        });

        // The image lookup is gated on weather success, not on currency: a
        // superseded cycle still runs to completion and is discarded below.
        if !success {
            return;
        }

        let image = self.images.resolve(city).await;
        self.apply_if_current(token, |s| {
            s.background = Some(image);
        });
    }

    /// Apply `mutate` only if `token` still names the current cycle.
    /// Returns whether the mutation was applied.
    fn apply_if_current(&self, token: u64, mutate: impl FnOnce(&mut SelectionState)) -> bool {
        self.state.send_if_modified(|s| {
            if s.generation != token {
                debug!(token, current = s.generation, "discarding stale completion");
                return false;
            }
            mutate(s);
            true
        })
    }
}
