pub mod prompt;
pub mod settings;

pub use prompt::{Confirm, FixedAnswer, StdinConfirm};
pub use settings::{
    ConfigError, ConfigOverrides, CreateRepoPolicy, FileSettings, RemoteAuth, Settings,
};
