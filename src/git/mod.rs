pub mod executor;
pub mod parser;
pub mod remote;
pub mod repository;
pub mod version;

// Re-export commonly used types
pub use executor::{CommandOutput, GitExecutor};
pub use parser::{FileStatus, StatusEntry, parse_remote_list, parse_status_porcelain_v2};
pub use remote::{ORIGIN, RemoteAction, build_remote_url, configure_origin, origin_url};
pub use repository::{InitOutcome, Repository, RepositoryState};
pub use version::GitVersion;
