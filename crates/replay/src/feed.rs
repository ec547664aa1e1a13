//! In-memory, time-ordered sensor feed.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use cursor::{ChronologicalCursor, Ordinal};
use data_stream::{DataStream, JumpToLast, StreamError};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// One sensor reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub at: DateTime<Utc>,
    pub sensor: u64,
    pub value: f64,
}

impl Ordinal<DateTime<Utc>> for Tick {
    fn ordinal(&self) -> DateTime<Utc> {
        self.at
    }
}

/// Deterministic tick `n` of a feed starting at `origin`.
///
/// Ticks are one second apart, so timestamps strictly increase, and sensors
/// take turns round-robin.
pub fn synthetic_tick(origin: DateTime<Utc>, n: u64, sensors: u64) -> Tick {
    let seconds = i64::try_from(n).unwrap_or(i64::MAX);
    Tick {
        at: origin + TimeDelta::seconds(seconds.saturating_add(1)),
        sensor: n % sensors + 1,
        value: ((n * 37) % 100) as f64 / 10.0,
    }
}

/// Append-only log of ticks, ordered by timestamp.
#[derive(Clone, Default)]
pub struct Feed {
    ticks: Arc<RwLock<Vec<Tick>>>,
}

impl Feed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a tick. Callers append in timestamp order.
    pub async fn append(&self, tick: Tick) {
        self.ticks.write().await.push(tick);
    }

    pub async fn len(&self) -> usize {
        self.ticks.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.ticks.read().await.is_empty()
    }

    /// Stream over every tick, at most `page_size` per fetch.
    pub fn stream(&self, page_size: usize) -> DataStream<Tick, ChronologicalCursor> {
        self.filtered("feed".to_string(), page_size, |_| true)
    }

    /// Stream over one sensor's ticks, at most `page_size` per fetch.
    pub fn sensor_stream(
        &self,
        sensor: u64,
        page_size: usize,
    ) -> DataStream<Tick, ChronologicalCursor> {
        self.filtered(format!("sensor-{sensor}"), page_size, move |tick| {
            tick.sensor == sensor
        })
    }

    fn filtered<P>(
        &self,
        id: String,
        page_size: usize,
        keep: P,
    ) -> DataStream<Tick, ChronologicalCursor>
    where
        P: Fn(&Tick) -> bool + Copy + Send + Sync + 'static,
    {
        let ticks = Arc::clone(&self.ticks);
        DataStream::<Tick, ChronologicalCursor>::from_async_fn(move |window| {
            let ticks = Arc::clone(&ticks);
            async move {
                let ticks = ticks.read().await;
                let batch: Vec<Tick> = ticks
                    .iter()
                    .filter(|tick| keep(*tick) && !window.has_reached(*tick))
                    .take(window.take_limit().min(page_size))
                    .cloned()
                    .collect();
                Ok::<_, StreamError>(batch)
            }
        })
        .advance(JumpToLast)
        .id(id)
        .build()
    }
}
