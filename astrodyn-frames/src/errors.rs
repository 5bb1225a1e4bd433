use std::path::PathBuf;

use astrodyn_core::AstroError;
use astrodyn_time::TimeError;
use thiserror::Error;

pub type FrameResult<T> = Result<T, FrameError>;

#[derive(Debug, Error)]
pub enum FrameError {
    /// A reference object or setting required by `instance` is missing or invalid.
    #[error("Configuration error in \"{instance}\": {message}")]
    Configuration { instance: String, message: String },

    #[error("Numerical singularity in \"{instance}\": {message}")]
    Singularity { instance: String, message: String },

    #[error("\"{instance}\": geodetic latitude did not converge after {iterations} iterations")]
    Convergence { instance: String, iterations: usize },

    #[error("Dependency cycle among coordinate systems: {}", .systems.join(" -> "))]
    DependencyCycle { systems: Vec<String> },

    #[error("Data not available: {message}")]
    DataUnavailable { message: String },

    #[error("Data parsing failed: {message}")]
    Parsing { message: String },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Core(#[from] AstroError),

    #[error(transparent)]
    Time(#[from] TimeError),
}

impl FrameError {
    pub fn configuration(instance: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Configuration {
            instance: instance.into(),
            message: message.into(),
        }
    }

    pub fn singularity(instance: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Singularity {
            instance: instance.into(),
            message: message.into(),
        }
    }

    pub fn data_unavailable(message: impl Into<String>) -> Self {
        Self::DataUnavailable {
            message: message.into(),
        }
    }

    pub fn parsing(message: impl Into<String>) -> Self {
        Self::Parsing {
            message: message.into(),
        }
    }

    /// True for errors that abort an initialization pass.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::Configuration { .. }
                | Self::Singularity { .. }
                | Self::Convergence { .. }
                | Self::DependencyCycle { .. }
        )
    }

    /// Name of the object that raised the error, where one is known.
    pub fn instance(&self) -> Option<&str> {
        match self {
            Self::Configuration { instance, .. }
            | Self::Singularity { instance, .. }
            | Self::Convergence { instance, .. } => Some(instance),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astrodyn_core::MathErrorKind;

    #[test]
    fn test_configuration_message_names_instance() {
        let err = FrameError::configuration("EarthMJ2000Eq", "origin \"Earth\" is not set");
        let text = err.to_string();
        assert!(text.contains("EarthMJ2000Eq"));
        assert!(text.contains("origin"));
        assert!(err.is_configuration_error());
        assert_eq!(err.instance(), Some("EarthMJ2000Eq"));
    }

    #[test]
    fn test_singularity_is_fatal() {
        let err = FrameError::singularity("PadTopo", "point on polar axis");
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_cycle_lists_systems() {
        let err = FrameError::DependencyCycle {
            systems: vec!["A".into(), "B".into(), "A".into()],
        };
        assert_eq!(
            err.to_string(),
            "Dependency cycle among coordinate systems: A -> B -> A"
        );
    }

    #[test]
    fn test_data_errors_are_not_configuration() {
        assert!(!FrameError::data_unavailable("gap").is_configuration_error());
        assert!(!FrameError::parsing("bad").is_configuration_error());
        let core: FrameError =
            AstroError::math_error("geodetic_solve", MathErrorKind::InvalidInput, "radius").into();
        assert!(!core.is_configuration_error());
    }
}
