//! Projections folded from data stream batches.
//!
//! This crate provides the consuming side of a data stream:
//! - [`Aggregator`] folds a batch into a caller-owned projection
//! - [`CursorProjection`] marks projections that carry their own cursor
//! - [`project_with`] and [`project_cursored`] run exactly one
//!   fetch-and-fold step; repeating the step is up to the caller

pub mod aggregator;
pub mod error;
pub mod projection;
pub mod step;

pub use aggregator::{Aggregator, FnAggregator, aggregator_fn};
pub use error::{ProjectionError, Result};
pub use projection::CursorProjection;
pub use step::{ProjectExt, project_cursored, project_with};
