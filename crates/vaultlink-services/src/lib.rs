//! Vaultlink Services
//!
//! Business logic for the archiving pipeline: directory packing, the remote
//! endpoint client, and the submission orchestrator that ties them together.

pub mod pack;
pub mod remote;
pub mod submit;

pub use pack::{PackError, ZipArtifact};
pub use remote::{OutboundFile, RemoteClient, RemoteError};
pub use submit::SubmitService;
