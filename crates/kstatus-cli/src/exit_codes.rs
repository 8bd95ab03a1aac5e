//! Standard exit codes for CLI operations
//!
//! These exit codes follow Unix conventions and sysexits.h where applicable.

/// General error - unspecified failure
pub const ERROR: i32 = 1;

/// Manifest error - a manifest could not be parsed
pub const MANIFEST_ERROR: i32 = 2;

/// Unhealthy - at least one object is in error (with --strict)
pub const UNHEALTHY: i32 = 3;

/// Config error - the configuration file is invalid
pub const CONFIG_ERROR: i32 = 4;

/// IO error - file not found, permission denied, etc.
pub const IO_ERROR: i32 = 5;
