//! # Vertex AI Client
//!
//! Typed client for the Vertex AI API: `JobService` (custom jobs, batch
//! prediction jobs) and `VizierService` (studies, trials), over either the
//! binary gRPC transport or the JSON/REST transport.
//!
//! ## Key components
//!
//! * **[`job_service::JobServiceClient`] / [`vizier_service::VizierServiceClient`]:**
//!   one typed method per RPC. Each method takes a full request record or the
//!   RPC's flattened fields (never both) plus per-call [`CallOptions`].
//! * **[`blocking`]:** synchronous counterparts of the same facades, backed
//!   by a dedicated runtime.
//! * **[`operations::OperationsClient`]:** the sub-client behind the
//!   operation futures returned by long-running RPCs.
//! * **[`model`]:** the message records; [`rpcs`]: the per-RPC wire/routing/
//!   HTTP tables; [`resource_names`]: typed resource-name helpers.
//!
//! The runtime underneath (retry, pagination, LRO polling, transcoding) is
//! the `vertex-ai-core` crate, re-exported here as [`core`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use vertex_ai::job_service::JobServiceClient;
//! use vertex_ai::core::endpoint::ClientOptions;
//! use vertex_ai::core::options::CallOptions;
//!
//! # async fn run() -> Result<(), vertex_ai::core::error::Error> {
//! let client = JobServiceClient::connect(ClientOptions::new()).await?;
//! let job = client
//!     .get_custom_job(
//!         None,
//!         Some("projects/p/locations/us-central1/customJobs/123".into()),
//!         CallOptions::new(),
//!     )
//!     .await?;
//! println!("{}", job.display_name);
//! # Ok(())
//! # }
//! ```

pub mod blocking;
pub mod job_service;
pub mod model;
pub mod operations;
pub mod resource_names;
pub mod rpcs;
pub mod vizier_service;

mod stub;

// Re-exports
pub use vertex_ai_core as core;
pub use vertex_ai_core::options::CallOptions;

/// Library identity stamped into outbound `x-goog-api-client` metadata.
/// Derived once at build time; process-wide and read-only.
pub const LIB_NAME: &str = env!("CARGO_PKG_NAME");
pub const LIB_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Client info carried by every facade built from this crate.
pub fn default_client_info() -> vertex_ai_core::options::ClientInfo {
    vertex_ai_core::options::ClientInfo {
        lib_name: LIB_NAME,
        lib_version: LIB_VERSION,
    }
}
