//! Replays a growing, time-ordered sensor feed through projection steps.
//!
//! A producer task appends ticks to an in-memory [`Feed`] while the consumer
//! repeatedly runs one projection step over a chronological stream. Once the
//! producer is done and the overall projection has caught up, an index
//! stream of sensor numbers is fanned out with
//! [`requery`](data_stream::DataStream::requery) into one stream per sensor,
//! and every per-sensor projection is caught up concurrently.

pub mod config;
pub mod error;
pub mod feed;
pub mod stats;

use chrono::{DateTime, Utc};
use cursor::SequenceCursor;
use data_stream::{ChronologicalCursor, DataStream, IntoDataStream};
use futures_util::future::join_all;
use projections::project_cursored;
use serde::Serialize;

pub use config::Config;
pub use error::{ReplayError, Result};
pub use feed::{Feed, Tick, synthetic_tick};
pub use stats::{SensorStats, StatsAggregator};

/// Summary of one projection after a replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub stream: String,
    pub count: u64,
    pub mean: Option<f64>,
    pub max: Option<f64>,
    pub position: DateTime<Utc>,
}

impl Summary {
    fn new(stream: &DataStream<Tick, ChronologicalCursor>, stats: &SensorStats) -> Self {
        Self {
            stream: stream.id().to_string(),
            count: stats.count,
            mean: stats.mean(),
            max: stats.max,
            position: stats.position(),
        }
    }
}

/// Outcome of a replay run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Projection steps taken while the producer was running.
    pub steps: u64,
    pub overall: Summary,
    pub sensors: Vec<Summary>,
}

/// Runs a full replay with the given configuration.
#[tracing::instrument(skip(config), fields(feed_size = config.feed_size, sensors = config.sensors))]
pub async fn run(config: &Config) -> Result<Report> {
    config.validate()?;
    let origin = Utc::now();
    let feed = Feed::new();
    let producer = tokio::spawn(produce(feed.clone(), origin, config.clone()));

    let stream = feed.stream(config.batch_limit);
    let mut overall = SensorStats::starting_at(origin);
    let mut steps = 0u64;
    let mut ticker = tokio::time::interval(config.poll_interval());

    loop {
        ticker.tick().await;
        overall = project_cursored(&stream, &StatsAggregator, overall).await?;
        steps += 1;

        let done = producer.is_finished();
        if done && overall.count == feed.len().await as u64 {
            break;
        }
    }
    producer.await?;
    tracing::info!(steps, count = overall.count, "overall projection caught up");

    let page_size = config.batch_limit;
    let source = feed.clone();
    let per_sensor = (1..=config.sensors)
        .into_data_stream::<SequenceCursor>()
        .requery(move |sensor| source.sensor_stream(sensor, page_size));

    let mut index = SequenceCursor::new();
    let sensor_streams = per_sensor.next_batch(&mut index, None).await?;
    let sensors = join_all(
        sensor_streams
            .iter()
            .map(|stream| catch_up(stream, SensorStats::starting_at(origin))),
    )
    .await
    .into_iter()
    .collect::<Result<Vec<_>>>()?;

    Ok(Report {
        steps,
        overall: Summary::new(&stream, &overall),
        sensors,
    })
}

/// Appends `feed_size` synthetic ticks, pausing one poll interval after
/// every `batch_limit` ticks.
async fn produce(feed: Feed, origin: DateTime<Utc>, config: Config) {
    let chunk = config.batch_limit as u64;
    for n in 0..config.feed_size {
        feed.append(synthetic_tick(origin, n, config.sensors)).await;
        if (n + 1) % chunk == 0 {
            tokio::time::sleep(config.poll_interval()).await;
        }
    }
    tracing::debug!(ticks = config.feed_size, "producer finished");
}

/// Runs projection steps until a step leaves the projection unchanged.
async fn catch_up(
    stream: &DataStream<Tick, ChronologicalCursor>,
    mut stats: SensorStats,
) -> Result<Summary> {
    loop {
        let before = stats.count;
        stats = project_cursored(stream, &StatsAggregator, stats).await?;
        if stats.count == before {
            break;
        }
    }
    tracing::debug!(stream = %stream.id(), count = stats.count, "sensor projection caught up");
    Ok(Summary::new(stream, &stats))
}
