use std::path::PathBuf;

use astrodyn_frames::FrameError;
use thiserror::Error;

pub type GravityResult<T> = Result<T, GravityError>;

#[derive(Debug, Error)]
pub enum GravityError {
    /// A reference or setting required by `instance` is missing or invalid.
    #[error("Configuration error in \"{instance}\": {message}")]
    Configuration { instance: String, message: String },

    #[error("Potential file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("Coefficient file parsing failed ({}): {message}", .path.display())]
    Parsing { path: PathBuf, message: String },

    #[error("\"{instance}\" has no parameter labelled \"{label}\"")]
    UnknownParameter { instance: String, label: String },

    /// The state handed to a model cannot be evaluated (e.g. at the body center).
    #[error("Invalid state for \"{instance}\": {message}")]
    InvalidState { instance: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Frame(#[from] FrameError),
}

impl GravityError {
    pub fn configuration(instance: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Configuration {
            instance: instance.into(),
            message: message.into(),
        }
    }

    pub fn parsing(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parsing {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn unknown_parameter(instance: impl Into<String>, label: impl Into<String>) -> Self {
        Self::UnknownParameter {
            instance: instance.into(),
            label: label.into(),
        }
    }

    pub fn invalid_state(instance: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidState {
            instance: instance.into(),
            message: message.into(),
        }
    }

    /// True for errors that abort an initialization pass.
    pub fn is_configuration_error(&self) -> bool {
        match self {
            Self::Configuration { .. } | Self::FileNotFound { .. } => true,
            Self::Frame(err) => err.is_configuration_error(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_instance() {
        let err = GravityError::configuration("EarthGravity", "fixed coordinate system is not set");
        assert!(err.to_string().contains("EarthGravity"));
        assert!(err.is_configuration_error());

        let err = GravityError::FileNotFound {
            path: PathBuf::from("/data/JGM2.cof"),
        };
        assert!(err.to_string().contains("JGM2.cof"));
        assert!(err.is_configuration_error());

        assert!(!GravityError::unknown_parameter("EarthGravity", "Bogus").is_configuration_error());
    }

    #[test]
    fn test_frame_errors_keep_their_class() {
        let err: GravityError = FrameError::configuration("EarthFixed", "origin missing").into();
        assert!(err.is_configuration_error());
        let err: GravityError = FrameError::data_unavailable("no EOP").into();
        assert!(!err.is_configuration_error());
    }
}
