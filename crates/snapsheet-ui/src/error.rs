//! Error types for sheet construction and commands.

/// Why a sheet configuration was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    EmptySnapPoints,
    /// A fraction outside `(0, 1]`, or not a number.
    SnapPointOutOfRange { index: usize, value: f32 },
    SnapPointsNotAscending { index: usize },
    DuplicateSnapPoint { index: usize },
    InitialSnapPointOutOfRange { index: usize, len: usize },
    InvalidScreenHeight { height: f32 },
    InvalidBackdropOpacity { opacity: f32 },
}

impl std::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigurationError::EmptySnapPoints => write!(f, "snap point list is empty"),
            ConfigurationError::SnapPointOutOfRange { index, value } => {
                write!(f, "snap point {index} = {value} is outside (0, 1]")
            }
            ConfigurationError::SnapPointsNotAscending { index } => {
                write!(f, "snap point {index} is lower than the one before it")
            }
            ConfigurationError::DuplicateSnapPoint { index } => {
                write!(f, "snap point {index} duplicates the one before it")
            }
            ConfigurationError::InitialSnapPointOutOfRange { index, len } => {
                write!(f, "initial snap point {index} is outside [0, {len})")
            }
            ConfigurationError::InvalidScreenHeight { height } => {
                write!(f, "screen height {height} must be finite and positive")
            }
            ConfigurationError::InvalidBackdropOpacity { opacity } => {
                write!(f, "backdrop opacity {opacity} is outside [0, 1]")
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}

#[derive(Debug, Clone, PartialEq)]
pub enum SheetError {
    /// Fatal to the sheet instance; reported at construction.
    InvalidConfiguration(ConfigurationError),
    /// A programmatic `snap_to` named an index the sheet does not have.
    SnapIndexOutOfRange { index: usize, len: usize },
}

impl std::fmt::Display for SheetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SheetError::InvalidConfiguration(reason) => {
                write!(f, "invalid sheet configuration: {reason}")
            }
            SheetError::SnapIndexOutOfRange { index, len } => {
                write!(f, "snap index {index} is outside [0, {len})")
            }
        }
    }
}

impl std::error::Error for SheetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SheetError::InvalidConfiguration(reason) => Some(reason),
            SheetError::SnapIndexOutOfRange { .. } => None,
        }
    }
}

impl From<ConfigurationError> for SheetError {
    fn from(reason: ConfigurationError) -> Self {
        SheetError::InvalidConfiguration(reason)
    }
}
