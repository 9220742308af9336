//! # rtbuild-sdk
//!
//! Build orchestration for the rtphone static library.
//!
//! The library drives an external CMake toolchain through one clean
//! configure+build cycle per platform and reports where the resulting
//! `librtphone.a` lives. It does not understand the native build graph and
//! never builds incrementally: the scratch directory is recreated on every run.
//!
//! ## Platforms
//!
//! - **Android** - cross-compiled with the NDK toolchain file
//!   (`arm64-v8a`, API level 24, Release by default)
//! - **Linux** - native build with the Ninja generator
//!
//! ## Quick Start
//!
//! ```ignore
//! use rtbuild_sdk::{CmakeBuilder, LinuxSettings};
//!
//! let profile = LinuxSettings::default().profile("../src", "build_linux");
//! let result = CmakeBuilder::new().run_build(&profile)?;
//! assert_eq!(result.artifact_path, std::path::Path::new("build_linux/librtphone.a"));
//! # Ok::<(), rtbuild_sdk::BuildError>(())
//! ```
//!
//! ## Errors
//!
//! Every failure is terminal for the run. [`BuildError::phase`] tells a
//! configure failure apart from a build failure; a missing NDK is reported as
//! [`BuildError::MissingPrecondition`] before anything runs.

// Public modules
pub mod builders;
pub mod profile;
pub mod scratch;
pub mod types;

// Re-export key types for convenience
pub use builders::{AndroidSettings, CmakeBuilder, LinuxSettings};
pub use profile::{ConfigureParam, DEFAULT_ARTIFACT_NAME, PlatformProfile};
pub use scratch::{remove_scratch_dir, reset_scratch_dir};
pub use types::{BuildError, BuildResult, BuildType, Phase, Platform};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
