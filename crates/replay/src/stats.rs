//! Running sensor statistics folded from feed batches.

use chrono::{DateTime, Utc};
use cursor::{ChronologicalCursor, Cursor};
use projections::{Aggregator, CursorProjection};
use serde::Serialize;

use crate::feed::Tick;

/// Count, total and peak of the ticks seen so far, plus the position they
/// were folded up to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorStats {
    pub count: u64,
    pub total: f64,
    pub max: Option<f64>,
    pub cursor: ChronologicalCursor,
}

impl SensorStats {
    /// Empty statistics whose cursor sits at `origin`.
    pub fn starting_at(origin: DateTime<Utc>) -> Self {
        Self {
            count: 0,
            total: 0.0,
            max: None,
            cursor: ChronologicalCursor::ascending(origin),
        }
    }

    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.total / self.count as f64)
    }

    /// Timestamp of the last folded tick, or the origin if none was folded.
    pub fn position(&self) -> DateTime<Utc> {
        *self.cursor.position()
    }

    fn record(&mut self, tick: &Tick) {
        self.count += 1;
        self.total += tick.value;
        self.max = Some(self.max.map_or(tick.value, |max| max.max(tick.value)));
    }
}

impl CursorProjection<ChronologicalCursor> for SensorStats {
    fn cursor_mut(&mut self) -> &mut ChronologicalCursor {
        &mut self.cursor
    }
}

/// Folds ticks into [`SensorStats`].
pub struct StatsAggregator;

impl Aggregator<SensorStats, Tick> for StatsAggregator {
    fn aggregate(&self, stats: Option<SensorStats>, batch: &[Tick]) -> SensorStats {
        let mut stats =
            stats.unwrap_or_else(|| SensorStats::starting_at(DateTime::<Utc>::UNIX_EPOCH));
        for tick in batch {
            stats.record(tick);
        }
        stats
    }
}
