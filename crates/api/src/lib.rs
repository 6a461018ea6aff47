//! HTTP API: server wiring, security filter, routing and response mapping.

pub mod app;
pub mod authz;
pub mod context;
pub mod middleware;
