//! Exit code constants for CLI commands
//!
//! - 0: success
//! - 1: general error (network, upstream API)
//! - 2: configuration or usage error

/// Successful execution
pub const EXIT_SUCCESS: i32 = 0;

/// General error
pub const EXIT_ERROR: i32 = 1;

/// Configuration or usage error
pub const EXIT_CONFIG: i32 = 2;
