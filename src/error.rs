//! Error types for the lnmix library.
//!
//! All fallible operations return `Result<T, LnMixError>` rather than panicking.
//! Inputs that are malformed are reported as [`LnMixError::InvalidInput`];
//! inputs that are well-formed but push an intermediate value outside its
//! mathematical domain (log of a non-positive number, division by zero,
//! quantile argument outside (0, 1)) are reported as
//! [`LnMixError::DomainError`] together with the strike and component that
//! triggered it.

use thiserror::Error;

/// Convenience type alias for results in this crate.
pub type Result<T> = std::result::Result<T, LnMixError>;

/// Errors that can occur while pricing under the lognormal-mixture model.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LnMixError {
    /// Input data is invalid (e.g., mismatched lengths, bad flag, zero maturity).
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// An intermediate value left its valid mathematical domain.
    #[error("domain error: {message}")]
    DomainError {
        message: String,
        /// Index of the offending strike, if the condition is strike-specific.
        strike: Option<usize>,
        /// Index of the offending mixture component, if component-specific.
        component: Option<usize>,
    },

    /// Numerical computation failed (e.g., implied vol could not be extracted).
    #[error("numerical error: {message}")]
    NumericalError { message: String },
}

impl LnMixError {
    /// Domain error not tied to a particular strike or component.
    pub(crate) fn domain(message: impl Into<String>) -> Self {
        Self::DomainError {
            message: message.into(),
            strike: None,
            component: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_fields_accessible() {
        let err = LnMixError::DomainError {
            message: "transformed strike is non-positive".into(),
            strike: Some(3),
            component: None,
        };
        match &err {
            LnMixError::DomainError {
                message,
                strike,
                component,
            } => {
                assert!(message.contains("non-positive"));
                assert_eq!(*strike, Some(3));
                assert!(component.is_none());
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn domain_helper_has_no_indices() {
        match LnMixError::domain("alpha >= 1") {
            LnMixError::DomainError {
                strike, component, ..
            } => {
                assert!(strike.is_none());
                assert!(component.is_none());
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn invalid_input_message_accessible() {
        let err = LnMixError::InvalidInput {
            message: "flag must be +1 or -1".into(),
        };
        match &err {
            LnMixError::InvalidInput { message } => {
                assert!(message.contains("flag"));
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn error_display_includes_message() {
        let err = LnMixError::InvalidInput {
            message: "bad input".into(),
        };
        assert!(format!("{err}").contains("bad input"));

        let err2 = LnMixError::domain("quantile argument outside (0, 1)");
        let display = format!("{err2}");
        assert!(display.starts_with("domain error"));
        assert!(display.contains("quantile"));

        let err3 = LnMixError::NumericalError {
            message: "no convergence".into(),
        };
        assert!(format!("{err3}").contains("no convergence"));
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LnMixError>();
    }
}
