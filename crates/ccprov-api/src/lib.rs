// ccprov-api: Async Rust client for the Catalyst Center intent API

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod pools;
pub mod reservations;
pub mod sites;
pub mod tasks;
pub mod transport;

pub use auth::{AuthToken, Credentials};
pub use client::CatalystClient;
pub use error::Error;
pub use tasks::{TaskPoll, TaskRef, TaskState, TaskStatus};
pub use transport::{TlsMode, TransportConfig};
