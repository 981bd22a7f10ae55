//! datawrapper-rs: typed chart configurations for the Datawrapper API.
//!
//! Chart models serialize to the exact JSON payload the API expects and
//! parse server responses back into the same models. The [`client`] module
//! drives the create, update, fetch and publish lifecycle over HTTP.

pub mod api;
pub mod client;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{ChartConfig, ChartFamily, ChartType, DataTable};
pub use client::{ClientConfig, DatawrapperClient};
pub use error::{ChartError, ChartResult};
