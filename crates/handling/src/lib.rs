//! Handling context for the cargo shipping system.
//!
//! Handling events are immutable records of what physically happened to a
//! cargo. This crate turns loosely typed handling reports into validated
//! events, keeps them, and announces each registration on the event bus as
//! `HandlingEventRegistered`.

pub mod error;
pub mod event;
pub mod history;
pub mod report;
pub mod repository;
pub mod service;

pub use error::{HandlingError, Result};
pub use event::{HandlingEvent, HandlingEventId, HandlingEventRegistered, HandlingEventType};
pub use history::HandlingHistory;
pub use report::HandlingReport;
pub use repository::{HandlingEventRepository, InMemoryHandlingEventRepository};
pub use service::{AGGREGATE_TYPE, HandlingService};
