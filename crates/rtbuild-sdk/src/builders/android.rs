//! Android cross-compile profile
//!
//! Configures the CMake project with the NDK's toolchain file for a single
//! ABI. The NDK location is handed in by the caller; this module never reads
//! the process environment.

use std::path::{Path, PathBuf};

use crate::profile::{ConfigureParam, PlatformProfile};
use crate::types::{BuildError, BuildType, Platform};

/// Environment variable callers conventionally resolve the NDK home from.
pub const NDK_HOME_ENV: &str = "ANDROID_NDK_HOME";

/// ABI built when none is configured.
pub const DEFAULT_ABI: &str = "arm64-v8a";

/// Android API level (minSdk) used when none is configured.
pub const DEFAULT_API_LEVEL: u32 = 24;

/// Location of the CMake toolchain file inside an NDK installation.
pub const TOOLCHAIN_FILE: &str = "build/cmake/android.toolchain.cmake";

/// Android-specific settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AndroidSettings {
    /// Root of the NDK installation
    pub ndk_home: Option<PathBuf>,
    /// Target ABI (e.g., "arm64-v8a")
    pub abi: String,
    /// Android API level passed as `ANDROID_PLATFORM`
    pub api_level: u32,
    pub build_type: BuildType,
}

impl Default for AndroidSettings {
    fn default() -> Self {
        Self {
            ndk_home: None,
            abi: DEFAULT_ABI.to_string(),
            api_level: DEFAULT_API_LEVEL,
            build_type: BuildType::Release,
        }
    }
}

impl AndroidSettings {
    /// Default settings with the given NDK home.
    pub fn with_ndk_home(ndk_home: impl Into<PathBuf>) -> Self {
        Self {
            ndk_home: Some(ndk_home.into()),
            ..Self::default()
        }
    }

    /// Toolchain file for the configured NDK, if one is set.
    pub fn toolchain_file(&self) -> Option<PathBuf> {
        self.ndk_home().map(|ndk| ndk.join(TOOLCHAIN_FILE))
    }

    fn ndk_home(&self) -> Option<&Path> {
        self.ndk_home
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }

    /// Builds the Android profile.
    ///
    /// Fails with [`BuildError::MissingPrecondition`] when no NDK home is
    /// set, before anything touches the filesystem or spawns a process.
    pub fn profile(
        &self,
        source_dir: impl Into<PathBuf>,
        build_dir: impl Into<PathBuf>,
    ) -> Result<PlatformProfile, BuildError> {
        let (Some(ndk_home), Some(toolchain_file)) = (self.ndk_home(), self.toolchain_file())
        else {
            return Err(BuildError::MissingPrecondition(format!(
                "Android NDK location is not set.\n\n\
                 Set {} to the root of your NDK installation, pass --ndk-home, \
                 or add `ndk_home` to the [android] section of rtbuild.toml.",
                NDK_HOME_ENV
            )));
        };

        Ok(PlatformProfile::new(Platform::Android, source_dir, build_dir)
            .param(ConfigureParam::ToolchainFile(toolchain_file))
            .param(ConfigureParam::define(
                "ANDROID_NDK",
                ndk_home.to_string_lossy(),
            ))
            .param(ConfigureParam::define(
                "ANDROID_PLATFORM",
                self.api_level.to_string(),
            ))
            .param(ConfigureParam::define(
                "CMAKE_BUILD_TYPE",
                self.build_type.as_str(),
            ))
            .param(ConfigureParam::define("ANDROID_ABI", &self.abi)))
    }
}
