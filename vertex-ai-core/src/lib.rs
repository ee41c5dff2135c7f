//! # Vertex AI Core
//!
//! `vertex-ai-core` is the client runtime underneath the generated Vertex AI
//! service surfaces. The generated crates contribute message records and
//! per-RPC descriptor tables; everything an RPC method actually *does* at
//! call time lives here and is written exactly once:
//!
//! * **[`coerce`]:** turns "a full request or flattened fields, never both"
//!   into the canonical request record.
//! * **[`routing`]:** derives the per-call routing metadata entry from the
//!   request field each RPC declares.
//! * **[`method`]:** the invocation pipeline — retry policy, timeouts,
//!   client-info stamping, and pre/post interceptors around the transport.
//! * **[`pager`] / [`lro`]:** the pagination engine and the long-running
//!   operation future, in cooperative-concurrency style.
//! * **[`blocking`]:** thin blocking projections of the pager and the
//!   operation future; one core, two surfaces.
//! * **[`transport`]:** the transport interface plus the gRPC and REST
//!   adapters; the REST adapter transcodes requests per each RPC's HTTP
//!   rule but performs no I/O of its own.
//! * **[`path_template`]:** compiled slash-separated templates with named
//!   captures, shared by resource names and REST URIs.
//!
//! ## Re-exports
//!
//! This crate re-exports `prost` and `tonic` to ensure that the generated
//! surface crates use compatible versions of the underlying dependencies.

pub mod auth;
pub mod blocking;
pub mod coerce;
pub mod endpoint;
pub mod error;
pub mod interceptor;
pub mod lro;
pub mod method;
pub mod options;
pub mod pager;
pub mod path_template;
pub mod retry;
pub mod routing;
pub mod rpc;
pub mod transcoding;
pub mod transport;

// Re-exports
pub use prost;
pub use tonic;

pub use coerce::coerce;
pub use error::{Error, ErrorKind};
pub use options::{CallOptions, Metadata};

/// Type alias for the standard boxed error used in generic bounds.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
