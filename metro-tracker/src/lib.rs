//! Stockholm metro departure tracker.
//!
//! Fetches live departures for a station, keeps the ones a rider still
//! cares about, and feeds a widget that follows the user's most recently
//! pinned station through a small cache shared between processes.

pub mod board;
pub mod cache;
pub mod config;
pub mod deeplink;
pub mod domain;
pub mod live;
pub mod pins;
pub mod refresh;
pub mod sl;
pub mod stations;
pub mod store;
pub mod web;
