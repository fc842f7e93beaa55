use std::fmt;

/// Why a snap point list was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointsError {
    Empty,
    Malformed(String),
}

/// Invalid sheet configuration. Construction does not proceed past one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    InvalidPoints(PointsError),
    InvalidIndex { index: usize, len: usize },
    InvalidPeek(String),
    InvalidScreenHeight(f32),
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::InvalidPoints(PointsError::Empty) => {
                write!(f, "snap points must be a non-empty list")
            }
            ConfigurationError::InvalidPoints(PointsError::Malformed(point)) => write!(
                f,
                "invalid point format '{point}'; points must be percentages such as '70%'"
            ),
            ConfigurationError::InvalidIndex { index, len } => {
                write!(f, "index {index} is out of range for {len} snap points")
            }
            ConfigurationError::InvalidPeek(value) => {
                write!(f, "invalid peek percentage '{value}'")
            }
            ConfigurationError::InvalidScreenHeight(height) => {
                write!(f, "screen height must be finite and positive, got {height}")
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}

impl From<PointsError> for ConfigurationError {
    fn from(err: PointsError) -> Self {
        ConfigurationError::InvalidPoints(err)
    }
}

/// A rejected [`snap`](crate::BottomSheet::snap) request. The sheet is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapError {
    OutOfRange { index: usize, len: usize },
}

impl fmt::Display for SnapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapError::OutOfRange { index, len } => {
                write!(f, "snap index {index} is out of range for {len} snap points")
            }
        }
    }
}

impl std::error::Error for SnapError {}
