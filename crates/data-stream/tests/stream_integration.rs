//! Integration tests: collection streams, combinators, and cursor behavior.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use data_stream::{
    ChronologicalCursor, Cursor, DataStream, IntoDataStream, Ordinal,
    SequenceCursor, StreamError, StreamQuery, TokenCursor,
};

#[derive(Debug, Clone, PartialEq)]
struct Reading {
    at: DateTime<Utc>,
    celsius: f64,
}

impl Ordinal<DateTime<Utc>> for Reading {
    fn ordinal(&self) -> DateTime<Utc> {
        self.at
    }
}

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
}

fn readings(n: i64) -> Vec<Reading> {
    (1..=n)
        .map(|i| Reading {
            at: start() + TimeDelta::minutes(i * 15),
            celsius: 20.0 + i as f64,
        })
        .collect()
}

#[tokio::test]
async fn test_successive_fetches_cover_collection_exactly_once() {
    let source: Vec<u64> = (1..=11).collect();
    let stream = source.clone().into_data_stream::<SequenceCursor>();
    let mut cursor = stream.new_cursor();

    let mut seen = Vec::new();
    loop {
        let batch = stream.next_batch(&mut cursor, Some(3)).await.unwrap();
        if batch.is_empty() {
            break;
        }
        assert!(batch.len() <= 3);
        seen.extend(batch.into_items());
    }

    assert_eq!(seen, source);

    let after = stream.next_batch(&mut cursor, Some(3)).await.unwrap();
    assert!(after.is_empty());
}

#[tokio::test]
async fn test_sparse_collection_is_covered_exactly_once() {
    let stream = vec![10u64, 20, 30, 40].into_data_stream::<SequenceCursor>();
    let mut cursor = stream.new_cursor();

    let mut seen = Vec::new();
    let mut positions = Vec::new();
    loop {
        let batch = stream.next_batch(&mut cursor, Some(2)).await.unwrap();
        if batch.is_empty() {
            break;
        }
        positions.push(*batch.cursor());
        seen.extend(batch.into_items());
        assert!(seen.len() <= 4, "collection re-returned items: {seen:?}");
    }

    assert_eq!(seen, vec![10, 20, 30, 40]);
    assert_eq!(positions, vec![0, 20]);
    assert_eq!(*cursor.position(), 40);
}

#[tokio::test]
async fn test_timestamped_collection_is_covered_exactly_once() {
    let source = readings(7);
    let stream = source.clone().into_data_stream::<ChronologicalCursor>();
    let mut cursor = ChronologicalCursor::ascending(start());

    let mut seen = Vec::new();
    for _ in 0..4 {
        let batch = stream.next_batch(&mut cursor, Some(3)).await.unwrap();
        seen.extend(batch.into_items());
    }

    assert_eq!(seen, source);
    assert!(stream.next_batch(&mut cursor, None).await.unwrap().is_empty());
    assert_eq!(*cursor.position(), start() + TimeDelta::minutes(7 * 15));
}

#[tokio::test]
async fn test_batches_record_pre_fetch_positions() {
    let stream = (1..=6u64).into_data_stream::<SequenceCursor>();
    let mut cursor = SequenceCursor::new();

    let mut positions = Vec::new();
    for _ in 0..3 {
        let batch = stream.next_batch(&mut cursor, Some(2)).await.unwrap();
        positions.push(*batch.cursor());
    }

    assert_eq!(positions, vec![0, 2, 4]);
    assert_eq!(*cursor.position(), 6);
}

#[tokio::test]
async fn test_timestamped_collection_needs_no_explicit_policy() {
    let stream = readings(5)
        .into_data_stream::<ChronologicalCursor>()
        .with_id("thermometer");
    let mut cursor = ChronologicalCursor::ascending(start());

    let first = stream.next_batch(&mut cursor, Some(2)).await.unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(*cursor.position(), start() + TimeDelta::minutes(30));

    let rest = stream.next_batch(&mut cursor, None).await.unwrap();
    let celsius: Vec<f64> = rest.iter().map(|r| r.celsius).collect();
    assert_eq!(celsius, vec![23.0, 24.0, 25.0]);

    assert!(stream.next_batch(&mut cursor, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_descending_feed_walks_backwards() {
    let end = start() + TimeDelta::hours(2);
    let stream = DataStream::<DateTime<Utc>, ChronologicalCursor>::from_fn(|window| {
        let limit = window.take_limit().min(4) as i32;
        Ok::<_, StreamError>(
            (1..=limit)
                .map(|i| window.position - TimeDelta::minutes(i64::from(i) * 10))
                .collect(),
        )
    })
    .advance_with(|query, batch| {
        query
            .cursor_mut()
            .advance_by(TimeDelta::minutes(10 * batch.len() as i64));
    })
    .build();
    let mut cursor = ChronologicalCursor::descending(end);

    let batch = stream.next_batch(&mut cursor, Some(3)).await.unwrap();

    assert_eq!(batch.items().first(), Some(&(end - TimeDelta::minutes(10))));
    assert_eq!(*cursor.position(), end - TimeDelta::minutes(30));
    assert!(*cursor.position() < end);
}

#[tokio::test]
async fn test_map_over_fn_stream_matches_direct_fetch() {
    let source = DataStream::<u64, SequenceCursor>::from_async_fn(|window| async move {
        let start = window.position + 1;
        Ok::<_, StreamError>((start..start + window.take_limit().min(5) as u64).collect())
    })
    .build();
    let squared = source.map_each(|x| x * x);

    let mut direct_cursor = SequenceCursor::at(10);
    let direct = source.next_batch(&mut direct_cursor, Some(4)).await.unwrap();

    let mut mapped_cursor = SequenceCursor::at(10);
    let mut query = StreamQuery::limited(&mut mapped_cursor, 4);
    let mapped = squared.fetch(&mut query).await.unwrap();

    let expected: Vec<u64> = direct.items().iter().map(|x| x * x).collect();
    assert_eq!(mapped.items(), expected.as_slice());
    assert_eq!(mapped.cursor(), direct.cursor());
    assert_eq!(mapped_cursor, direct_cursor);
}

#[tokio::test]
async fn test_requery_downstream_cursors_are_independent() {
    let index = vec![1u64, 2].into_data_stream::<SequenceCursor>();
    let per_item = index.requery(|n: u64| {
        DataStream::<Reading, ChronologicalCursor>::from_collection(readings(n as i64 + 1))
            .id(format!("sensor-{n}"))
            .build()
    });

    let mut upstream = SequenceCursor::new();
    let batch = per_item.next_batch(&mut upstream, None).await.unwrap();
    assert_eq!(*upstream.position(), 2);

    let ids: Vec<&str> = batch.iter().map(|s| s.id().as_str()).collect();
    assert_eq!(ids, vec!["sensor-1", "sensor-2"]);

    let sensor = &batch.items()[1];
    let mut downstream = ChronologicalCursor::ascending(start());
    let history = sensor.next_batch(&mut downstream, Some(2)).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(*downstream.position(), start() + TimeDelta::minutes(30));
    assert_eq!(*upstream.position(), 2);
}

#[tokio::test]
async fn test_source_failure_propagates_through_combinators() {
    let failing = DataStream::<u64, SequenceCursor>::from_fn(|_window| {
        Err::<Vec<u64>, _>(StreamError::msg("upstream unavailable"))
    })
    .build();
    let mapped = failing.map_each(|x| x + 1);
    let fanned = failing.requery(|n: u64| vec![n].into_data_stream::<SequenceCursor>());

    let mut cursor = SequenceCursor::new();
    let err = mapped.next_batch(&mut cursor, None).await.unwrap_err();
    assert_eq!(err.to_string(), "upstream unavailable");

    let err = fanned.next_batch(&mut cursor, None).await.unwrap_err();
    assert!(matches!(err, StreamError::Message(_)));
    assert_eq!(*cursor.position(), 0);
}

#[derive(Debug, Clone)]
struct Change {
    token: String,
    key: &'static str,
}

impl Ordinal<Option<String>> for Change {
    fn ordinal(&self) -> Option<String> {
        Some(self.token.clone())
    }
}

#[tokio::test]
async fn test_token_cursor_resumes_after_last_token() {
    let log = vec![
        Change { token: "0001".into(), key: "a" },
        Change { token: "0002".into(), key: "b" },
        Change { token: "0003".into(), key: "c" },
    ];
    let stream = DataStream::<Change, TokenCursor>::from_fn(move |window| {
        Ok::<_, StreamError>(
            log.iter()
                .filter(|change| !window.has_reached(*change))
                .take(window.take_limit())
                .cloned()
                .collect(),
        )
    })
    .advance_with(|query, batch| {
        if let Some(last) = batch.items().last() {
            query.cursor_mut().advance_by(last.token.clone());
        }
    })
    .id("changes")
    .build();

    let mut cursor = TokenCursor::new();
    let first = stream.next_batch(&mut cursor, Some(2)).await.unwrap();
    assert_eq!(first.iter().map(|c| c.key).collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(*first.cursor(), None);
    assert_eq!(cursor.token(), Some("0002"));

    let mut resumed = TokenCursor::resume(cursor.token().unwrap());
    let rest = stream.next_batch(&mut resumed, None).await.unwrap();
    assert_eq!(rest.iter().map(|c| c.key).collect::<Vec<_>>(), vec!["c"]);
    assert_eq!(resumed.token(), Some("0003"));

    assert!(stream.next_batch(&mut resumed, None).await.unwrap().is_empty());
}
