//! Native Linux profile
//!
//! No toolchain file; the host compiler is used. An explicit fast generator
//! (Ninja by default) replaces CMake's default Makefile backend.

use std::path::PathBuf;

use crate::profile::{ConfigureParam, PlatformProfile};
use crate::types::{BuildType, Platform};

/// Generator used when none is configured.
pub const DEFAULT_GENERATOR: &str = "Ninja";

/// Linux-specific settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinuxSettings {
    /// CMake generator; `None` means [`DEFAULT_GENERATOR`]
    pub generator: Option<String>,
    /// Passed as `CMAKE_BUILD_TYPE` only when set
    pub build_type: Option<BuildType>,
}

impl LinuxSettings {
    pub fn generator(&self) -> &str {
        self.generator.as_deref().unwrap_or(DEFAULT_GENERATOR)
    }

    /// Builds the Linux profile. Has no preconditions.
    pub fn profile(
        &self,
        source_dir: impl Into<PathBuf>,
        build_dir: impl Into<PathBuf>,
    ) -> PlatformProfile {
        let mut profile = PlatformProfile::new(Platform::Linux, source_dir, build_dir);
        if let Some(build_type) = self.build_type {
            profile = profile.param(ConfigureParam::define(
                "CMAKE_BUILD_TYPE",
                build_type.as_str(),
            ));
        }
        profile.param(ConfigureParam::Generator(self.generator().to_string()))
    }
}
