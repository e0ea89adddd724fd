//! In-memory poll and form stores, with a small JSON API on top.
//!
//! [`PollStore`] keeps polls with one vote counter per option.
//! [`FormStore`] keeps forms of typed questions and the responses submitted
//! to them. Both validate their input and never store a partial record. The
//! HTTP layer in [`routes`] and [`handlers`] only forwards to the stores.

pub mod clock;
pub mod config;
pub mod error;
pub mod form;
pub mod handlers;
pub mod ids;
pub mod logging;
pub mod models;
pub mod poll;
pub mod routes;
pub mod seed;
pub mod state;

pub use error::{ApiError, ConfigError, StoreError};
pub use form::FormStore;
pub use poll::PollStore;
