//! # Sitewright Browser
//!
//! Client for a remote browser-automation service, implementing the
//! [`BrowserSession`](sitewright_protocols::BrowserSession) and
//! [`Page`](sitewright_protocols::Page) traits over its HTTP API.
//!
//! The service owns the actual browser and the model calls behind act /
//! observe / extract / agent; this crate is transport only. Sessions are
//! explicitly constructed and explicitly passed - there is no process-wide
//! browser handle.

mod api;
mod client;
mod session;

pub use client::ApiClient;
pub use session::{RemoteBrowser, RemotePage, RemoteSession};
