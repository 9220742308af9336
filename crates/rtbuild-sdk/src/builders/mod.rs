//! Build automation for the supported platforms.
//!
//! ## Overview
//!
//! A build is one configure+build cycle of CMake against the rtphone source
//! tree, run in a scratch directory that is wiped first:
//!
//! 1. **Profile** - [`AndroidSettings`] or [`LinuxSettings`] produce a
//!    [`PlatformProfile`](crate::PlatformProfile)
//! 2. **Reset** - the scratch directory is deleted and recreated
//! 3. **Configure** - `cmake` with the profile's parameters
//! 4. **Build** - `cmake --build` with one job per logical CPU
//!
//! | Settings | Platform | Toolchain | Generator |
//! |----------|----------|-----------|-----------|
//! | [`AndroidSettings`] | Android | NDK `android.toolchain.cmake` | CMake default |
//! | [`LinuxSettings`] | Linux | host | Ninja |
//!
//! ## Builder Options
//!
//! [`CmakeBuilder`] supports:
//!
//! - **`program(path)`** - Use a different `cmake` executable
//! - **`jobs(n)`** - Override the detected CPU count
//! - **`verbose(bool)`** - Echo each command before running it
//! - **`dry_run(bool)`** - Print the steps without touching anything
//! - **`write_meta(bool)`** - Write `rtbuild-meta.json` after success
//!
//! ## Example
//!
//! ```ignore
//! use rtbuild_sdk::builders::{AndroidSettings, CmakeBuilder};
//!
//! let profile = AndroidSettings::with_ndk_home("/opt/android-ndk")
//!     .profile("../src", "build_android")?;
//!
//! let result = CmakeBuilder::new().verbose(true).run_build(&profile)?;
//! println!("Built: {}", result.artifact_path.display());
//! # Ok::<(), rtbuild_sdk::BuildError>(())
//! ```

pub mod android;
pub mod cmake;
pub mod common;
pub mod linux;

// Re-export builders
pub use android::AndroidSettings;
pub use cmake::CmakeBuilder;
pub use common::{BuildMeta, parallel_jobs};
pub use linux::LinuxSettings;
