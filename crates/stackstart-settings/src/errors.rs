pub type Result<T> = std::result::Result<T, SettingsError>;

/// Configuration errors. Fatal to the run, not to the process.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("{var} is required")]
    Missing { var: &'static str },

    #[error(
        "invalid stack id '{token}'. STACK_SEQUENCE must be a comma-separated list of integers"
    )]
    InvalidStackId { token: String },

    #[error("STACK_SEQUENCE must list at least one stack id (comma-separated integers)")]
    EmptyStackSequence,
}
