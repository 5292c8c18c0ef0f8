use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Malformed variant table on line {line}: {message}")]
    Format { line: usize, message: String },

    #[error("Variant '{variant}' not found on the game listing page")]
    VariantNotListed { variant: String },

    #[error("Country '{country}' in game {game_id} has no precomputed row for variant '{variant}'")]
    UnknownCountry {
        variant: String,
        country: String,
        game_id: String,
    },

    #[error("Unexpected game listing markup: {message}")]
    Page { message: String },

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value for '{field}' ('{value}'): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfig { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Format,
    Lookup,
    Transport,
    Output,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ScrapeError {
    pub fn format(line: usize, message: impl Into<String>) -> Self {
        Self::Format {
            line,
            message: message.into(),
        }
    }

    pub fn page(message: impl Into<String>) -> Self {
        Self::Page {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Format { .. } | Self::Page { .. } => ErrorCategory::Format,
            Self::VariantNotListed { .. } | Self::UnknownCountry { .. } => ErrorCategory::Lookup,
            Self::Transport(_) => ErrorCategory::Transport,
            Self::Csv(_) | Self::Io(_) => ErrorCategory::Output,
            Self::Config { .. } | Self::InvalidConfigValue { .. } | Self::MissingConfig { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // The remote side may recover on a later run.
            ErrorCategory::Transport => ErrorSeverity::Medium,
            ErrorCategory::Format | ErrorCategory::Lookup | ErrorCategory::Configuration => {
                ErrorSeverity::High
            }
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::Format { .. } => {
                "Check the pasted table: tab separated cells, a header line first, one country per line"
            }
            Self::VariantNotListed { .. } => {
                "Check the variant name against the variant selector on the game listing page"
            }
            Self::UnknownCountry { .. } => {
                "Add the country to the variant table, or fix its spelling"
            }
            Self::Page { .. } => "The listing page layout may have changed; inspect a saved page",
            Self::Transport(_) => "Check network connectivity and the --base-url value, then rerun",
            Self::Csv(_) | Self::Io(_) => "Check that the output directory exists and is writable",
            Self::Config { .. } | Self::InvalidConfigValue { .. } | Self::MissingConfig { .. } => {
                "Run with --help to review the available options"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Format => format!("Could not parse input: {}", self),
            ErrorCategory::Lookup => format!("Lookup failed: {}", self),
            ErrorCategory::Transport => format!("Could not reach the game listing service: {}", self),
            ErrorCategory::Output => format!("Could not write output: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
