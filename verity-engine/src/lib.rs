//! # verity-engine
//!
//! Assembles the retrieval core (knowledge store, versioned cache, hybrid
//! retriever, integration scheduler) into one explicitly constructed
//! `Service`, plus tracing setup.

pub mod service;
pub mod telemetry;

pub use service::{Service, ServicePaths};
