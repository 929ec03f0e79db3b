/*! Error types for Limelight operations.

Construction is the only fallible path. Once polling runs, every OS
query miss degrades to "no update this tick" rather than an error.
*/

/// Errors that can occur when building a Limelight instance.
#[derive(Debug, thiserror::Error)]
pub enum LimelightError {
  #[error("Accessibility permissions not granted")]
  PermissionDenied,

  #[error("No window system available on this platform; inject one via the builder")]
  Unsupported,
}

/// Result type for Limelight operations.
pub type LimelightResult<T> = Result<T, LimelightError>;
