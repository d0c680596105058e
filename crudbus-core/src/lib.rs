//! Core model for the crudbus dispatcher.
//!
//! Defines the universal types every crudbus subsystem depends on:
//! - [`ModelDescriptor`] — a caller-supplied registration entry for one data model
//! - [`Operation`] — the closed set of CRUD-style primitives the dispatcher generates
//! - [`Request`] — the inbound message envelope (`role` / `model` / `cmd` / payloads)
//! - [`ResolvedPayload`] / [`CallArgs`] — payloads after model-reference resolution
//! - [`CallOutcome`] / [`Record`] — the shapes a backend may return and the
//!   plain-form conversion every record type must implement
//! - [`Backend`] / [`ModelHandle`] — the persistence collaborator traits
//!
//! These types form the contract between the dispatcher and whatever
//! persistence layer is plugged in behind it.

mod backend;
mod descriptor;
mod envelope;
mod error;
mod operation;
mod outcome;
mod payload;

pub use backend::{Backend, ModelHandle};
pub use descriptor::{Associate, ModelDescriptor, ModelMap};
pub use envelope::Request;
pub use error::BackendError;
pub use operation::Operation;
pub use outcome::{CallOutcome, Fetched, Record};
pub use payload::{CallArgs, ModelRef, ResolvedObject, ResolvedPayload};
