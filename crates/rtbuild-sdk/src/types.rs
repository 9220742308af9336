//! Core types for rtbuild-sdk.
//!
//! This module defines the fundamental types used throughout the SDK:
//!
//! - [`BuildError`] - Error taxonomy for an orchestrator run
//! - [`Phase`] - Which external build-system phase an error came from
//! - [`Platform`] - Target platform selection (Android or Linux)
//! - [`BuildType`] - CMake build type passed at configure time
//! - [`BuildResult`] - Output of a successful run

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Error types for rtbuild-sdk operations.
///
/// A run either returns a [`BuildResult`] or one of these. None of them are
/// retried: the unit of work is the whole configure+build cycle.
///
/// # Example
///
/// ```ignore
/// use rtbuild_sdk::{BuildError, CmakeBuilder};
///
/// match CmakeBuilder::new().run_build(&profile) {
///     Ok(result) => println!("Built: {}", result.artifact_path.display()),
///     Err(BuildError::Configure(msg)) => eprintln!("configure step broke: {}", msg),
///     Err(e) => eprintln!("{}", e),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// A required input was missing before any sub-process was launched.
    ///
    /// The Android profile raises this when no NDK home was supplied.
    #[error("missing precondition: {0}")]
    MissingPrecondition(String),

    /// The configure invocation could not be started or exited non-zero.
    ///
    /// The build step is never attempted after this error.
    #[error("configuration failed: {0}")]
    Configure(String),

    /// The build invocation could not be started or exited non-zero.
    ///
    /// The scratch directory is left in place for inspection.
    #[error("build failed: {0}")]
    Build(String),

    /// An I/O error occurred while preparing the scratch directory or
    /// writing build metadata.
    #[error("I/O error: {0}. Check file paths and permissions")]
    Io(#[from] std::io::Error),

    /// Build metadata could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BuildError {
    /// Returns the external build phase this error belongs to, if any.
    pub fn phase(&self) -> Option<Phase> {
        match self {
            BuildError::Configure(_) => Some(Phase::Configure),
            BuildError::Build(_) => Some(Phase::Build),
            BuildError::MissingPrecondition(_)
            | BuildError::Io(_)
            | BuildError::Serialization(_) => None,
        }
    }
}

/// The two external build-system invocations of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Toolchain resolution and build-file generation.
    Configure,
    /// Compilation and linking.
    Build,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Configure => "configure",
            Phase::Build => "build",
        }
    }

    /// Wraps a failure description in the error variant for this phase.
    pub fn error(self, message: impl Into<String>) -> BuildError {
        match self {
            Phase::Configure => BuildError::Configure(message.into()),
            Phase::Build => BuildError::Build(message.into()),
        }
    }
}

/// Target platform for a build.
///
/// # Example
///
/// ```
/// use rtbuild_sdk::Platform;
///
/// assert_eq!(Platform::Android.as_str(), "android");
/// assert_eq!(Platform::Linux.default_build_dir(), "build_linux");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Android, cross-compiled with the NDK toolchain file.
    Android,
    /// Native desktop Linux build.
    Linux,
}

impl Platform {
    /// All supported platforms, in the order `all` builds them.
    pub const ALL: [Platform; 2] = [Platform::Android, Platform::Linux];

    /// Returns the string representation of the platform.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Android => "android",
            Platform::Linux => "linux",
        }
    }

    /// Name of the scratch build directory used when none is configured.
    ///
    /// The two platforms never share a scratch directory, so they can be
    /// built one after the other without clobbering each other.
    pub fn default_build_dir(&self) -> &'static str {
        match self {
            Platform::Android => "build_android",
            Platform::Linux => "build_linux",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CMake build type (`CMAKE_BUILD_TYPE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildType {
    Debug,
    Release,
    RelWithDebInfo,
    MinSizeRel,
}

impl BuildType {
    /// Returns the value CMake expects for `CMAKE_BUILD_TYPE`.
    ///
    /// ```
    /// use rtbuild_sdk::BuildType;
    ///
    /// assert_eq!(BuildType::Release.as_str(), "Release");
    /// assert_eq!(BuildType::RelWithDebInfo.as_str(), "RelWithDebInfo");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildType::Debug => "Debug",
            BuildType::Release => "Release",
            BuildType::RelWithDebInfo => "RelWithDebInfo",
            BuildType::MinSizeRel => "MinSizeRel",
        }
    }
}

/// Result of a successful orchestrator run.
///
/// The artifact path is a contract of the source project's build definition;
/// it is reported, not verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildResult {
    /// Platform that was built.
    pub platform: Platform,
    /// Path to the static library, `<build_dir>/<artifact name>`.
    pub artifact_path: PathBuf,
    /// Scratch directory the run configured and built in.
    pub build_dir: PathBuf,
    /// Parallelism hint handed to the build step.
    pub jobs: usize,
}
