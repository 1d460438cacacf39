pub mod credentials;
pub mod error;
pub mod graph;
pub mod json_path;
pub mod normalize;
pub mod pipeline;
pub mod source;

pub use credentials::{credential_status, resolve_headers, CredentialStatus};
pub use error::{CredentialError, FetchError};
pub use graph::ProfileGraph;
pub use normalize::{normalize_graph, normalize_post, normalize_profile};
pub use pipeline::{clamp_limit, Analyzer};
pub use source::{
    AnySource, FetchRequest, ProfileSource, SnapshotSource, SourceKind, WebProfileSource,
};
