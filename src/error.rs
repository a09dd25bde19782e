use thiserror::Error;

/// Errors raised by the collaborator-facing layers (scraping, backup import,
/// food lookup). The text normalizers themselves are total and never fail.
#[derive(Error, Debug)]
pub enum NormalizeError {
    /// Food database request failed
    #[error("Failed to reach food database: {0}")]
    FetchError(#[from] reqwest::Error),

    /// No recipe could be found in the supplied page
    #[error("Could not find a recipe in the web page")]
    NoRecipeFound,

    /// The food database returned no match for an ingredient
    #[error("No food matched ingredient '{0}'")]
    NoFoodMatch(String),

    /// A nutrition request failed validation
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The backup document does not have the expected shape
    #[error("The backup file does not seem to be well formatted: {0}")]
    InvalidBackup(String),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvError(#[from] std::env::VarError),
}
