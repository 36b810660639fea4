//! Error types.
//!
//! Only [`RequestError`] and [`RouteServiceError`] ever reach a caller.
//! Matrix failures degrade to default matrices, and optimizer failures are
//! turned into a fallback result by the orchestrator.

use std::any::Any;
use std::error::Error;
use std::fmt;

/// A malformed optimization request, rejected before any work is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    EmptyStops,
    MissingDepotId,
    MissingDriverId,
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::EmptyStops => write!(f, "stops cannot be empty"),
            RequestError::MissingDepotId => write!(f, "depot id is required"),
            RequestError::MissingDriverId => write!(f, "driver id is required"),
        }
    }
}

impl Error for RequestError {}

/// Failure of a [`MatrixSource`](crate::matrix::MatrixSource).
#[derive(Debug, Clone, PartialEq)]
pub enum MatrixError {
    /// A stop has a non-finite or out-of-range coordinate.
    InvalidCoordinate { index: usize, latitude: f64, longitude: f64 },
    /// The source could not produce a matrix (remote provider down, etc).
    Unavailable(String),
    /// The source panicked; carries the panic message when it was a string.
    Panicked(String),
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixError::InvalidCoordinate {
                index,
                latitude,
                longitude,
            } => write!(f, "stop {index} has invalid coordinates ({latitude}, {longitude})"),
            MatrixError::Unavailable(reason) => write!(f, "matrix source unavailable: {reason}"),
            MatrixError::Panicked(msg) => write!(f, "matrix source panicked: {msg}"),
        }
    }
}

impl Error for MatrixError {}

/// Failure inside an optimizer run.
#[derive(Debug, Clone, PartialEq)]
pub enum OptimizeError {
    /// The algorithm configuration is unusable.
    InvalidConfig(String),
    /// A run produced a sequence that is not a permutation of the stops.
    BrokenTour { expected_len: usize, tour: Vec<usize> },
    /// Matrices disagree with the number of stops.
    MatrixSizeMismatch { stops: usize, matrix: usize },
}

impl fmt::Display for OptimizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimizeError::InvalidConfig(reason) => write!(f, "invalid configuration: {reason}"),
            OptimizeError::BrokenTour { expected_len, tour } => {
                write!(f, "tour {tour:?} is not a permutation of 0..{expected_len}")
            }
            OptimizeError::MatrixSizeMismatch { stops, matrix } => {
                write!(f, "matrix covers {matrix} locations but request has {stops} stops")
            }
        }
    }
}

impl Error for OptimizeError {}

/// Why the orchestrator returned the natural-order fallback.
#[derive(Debug, Clone, PartialEq)]
pub enum FallbackReason {
    Optimizer(OptimizeError),
    /// The optimizer panicked; carries the panic message when it was a string.
    Panicked(String),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::Optimizer(err) => write!(f, "optimizer failed: {err}"),
            FallbackReason::Panicked(msg) => write!(f, "optimizer panicked: {msg}"),
        }
    }
}

impl Error for FallbackReason {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FallbackReason::Optimizer(err) => Some(err),
            FallbackReason::Panicked(_) => None,
        }
    }
}

impl From<OptimizeError> for FallbackReason {
    fn from(err: OptimizeError) -> Self {
        FallbackReason::Optimizer(err)
    }
}

/// Failure of the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    Unavailable(String),
    Poisoned,
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepositoryError::Unavailable(reason) => write!(f, "route store unavailable: {reason}"),
            RepositoryError::Poisoned => write!(f, "route store lock poisoned"),
        }
    }
}

impl Error for RepositoryError {}

/// Failure of the notification collaborator. Logged, never propagated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyError(pub String);

impl fmt::Display for NotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "notification failed: {}", self.0)
    }
}

impl Error for NotifyError {}

/// Errors of the route lifecycle operations (reroute, status updates).
#[derive(Debug, Clone, PartialEq)]
pub enum RouteServiceError {
    RouteNotFound(String),
    Request(RequestError),
    Repository(RepositoryError),
}

impl fmt::Display for RouteServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteServiceError::RouteNotFound(id) => write!(f, "route not found: {id}"),
            RouteServiceError::Request(err) => write!(f, "invalid request: {err}"),
            RouteServiceError::Repository(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RouteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RouteServiceError::RouteNotFound(_) => None,
            RouteServiceError::Request(err) => Some(err),
            RouteServiceError::Repository(err) => Some(err),
        }
    }
}

impl From<RequestError> for RouteServiceError {
    fn from(err: RequestError) -> Self {
        RouteServiceError::Request(err)
    }
}

impl From<RepositoryError> for RouteServiceError {
    fn from(err: RepositoryError) -> Self {
        RouteServiceError::Repository(err)
    }
}

/// Message of a caught panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::catch_unwind;

    #[test]
    fn test_request_error_messages() {
        assert_eq!(RequestError::EmptyStops.to_string(), "stops cannot be empty");
        assert_eq!(RequestError::MissingDepotId.to_string(), "depot id is required");
    }

    #[test]
    fn test_fallback_reason_source() {
        let reason = FallbackReason::from(OptimizeError::InvalidConfig("bad".into()));
        assert!(reason.source().is_some());
        assert!(reason.to_string().contains("invalid configuration: bad"));
        assert!(FallbackReason::Panicked("boom".into()).source().is_none());
    }

    #[test]
    fn test_route_service_error_from() {
        let err: RouteServiceError = RepositoryError::Poisoned.into();
        assert_eq!(err.to_string(), "route store lock poisoned");
    }

    #[test]
    fn test_panic_message() {
        let payload = catch_unwind(|| {
            panic!("boom");
        })
        .unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "boom");

        let payload = catch_unwind(|| {
            panic!("code {}", 7);
        })
        .unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "code 7");

        let payload = catch_unwind(|| {
            std::panic::panic_any(7_u8);
        })
        .unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "non-string panic payload");
    }
}
