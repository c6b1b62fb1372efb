//! Prediction and analysis core for the Femina cycle tracker.
//!
//! Everything here is a pure function of the history passed in plus an
//! explicit "today". Fetching and saving rows goes through [`DataStore`];
//! [`Tracker`] wires a store and a [`Clock`] to the calculations.

pub mod calendar;
pub mod clock;
pub mod config;
pub mod date_math;
pub mod error;
pub mod health;
pub mod models;
pub mod prediction;
pub mod pregnancy;
pub mod safe_days;
pub mod store;
pub mod symptoms;
pub mod tracker;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::CycleConfig;
pub use error::{CoreError, Result};
pub use store::{DataStore, MemoryStore, StoreError};
pub use tracker::Tracker;
