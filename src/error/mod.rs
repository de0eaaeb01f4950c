use thiserror::Error;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Simulation error: {0}")]
    Simulation(#[from] SimulationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while synthesizing a canned inference response
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Failed to encode {payload} payload: {source}")]
    Encode {
        payload: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl SimulationError {
    /// Wrap a JSON encoding failure for the named payload kind.
    pub fn encode(payload: &'static str, source: serde_json::Error) -> Self {
        SimulationError::Encode { payload, source }
    }
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn json_error() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("{not json").unwrap_err()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::Config {
            message: "invalid port".to_string(),
        };
        assert_eq!(err.to_string(), "Configuration error: invalid port");
    }

    #[test]
    fn test_simulation_error_display() {
        let err = SimulationError::encode("planner", json_error());
        assert!(err
            .to_string()
            .starts_with("Failed to encode planner payload:"));
    }

    #[test]
    fn test_simulation_error_conversion_to_app_error() {
        let err: AppError = SimulationError::encode("executor", json_error()).into();
        assert!(matches!(err, AppError::Simulation(_)));
        assert!(err.to_string().contains("executor"));
    }

    #[test]
    fn test_io_error_conversion_to_app_error() {
        let io = std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken");
        let err: AppError = io.into();
        assert!(matches!(err, AppError::Io(_)));
        assert_eq!(err.to_string(), "I/O error: port taken");
    }
}
