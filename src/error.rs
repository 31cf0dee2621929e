use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, CupError>;

/// Everything that can go wrong between the host and the cup.
///
/// Sensor and spawn variants never leave the component that produced them:
/// they are logged and the simulation keeps running. Only `InvalidConfig`
/// is returned to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CupError {
    /// Motion sensor access was declined by the user or platform.
    #[error("motion sensor permission denied")]
    PermissionDenied,

    /// A motion sample arrived without a usable value on one axis.
    #[error("motion sample has no usable {axis} axis")]
    MissingSensorData { axis: char },

    /// Spawn request named a preset that does not exist.
    #[error("unknown spawn type: {0}")]
    UnknownSpawnType(String),

    /// Neither the modern nor the legacy orientation angle was reported.
    #[error("screen orientation unavailable")]
    TransformAmbiguity,

    /// Configuration JSON failed to parse or validate.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for CupError {
    fn from(e: serde_json::Error) -> Self {
        CupError::InvalidConfig(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_failing_piece() {
        let e = CupError::MissingSensorData { axis: 'y' };
        assert!(e.to_string().contains("y axis"));

        let e = CupError::UnknownSpawnType("lava".to_string());
        assert!(e.to_string().contains("lava"));
    }

    #[test]
    fn serde_errors_become_invalid_config() {
        let err = serde_json::from_str::<u32>("not json").unwrap_err();
        let e: CupError = err.into();
        assert!(matches!(e, CupError::InvalidConfig(_)));
    }
}
