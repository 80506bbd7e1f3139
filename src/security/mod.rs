//! Input validation for values that end up in git arguments and URLs.
//!
//! Commands are never run through a shell, but a branch such as `--force`
//! would still be read by git as an option, and names are interpolated into
//! remote URLs and API paths.

pub mod validator;

pub use validator::{
    ValidationError, validate_api_url, validate_base_url, validate_branch_name,
    validate_repo_name, validate_username,
};
