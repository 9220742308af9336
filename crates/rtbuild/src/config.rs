//! Configuration file support for rtbuild.
//!
//! An `rtbuild.toml` lets a checkout pin its NDK location, source tree, and
//! per-platform options instead of repeating CLI flags.
//!
//! ## Configuration File Location
//!
//! The file is searched for in the following order:
//! 1. Current working directory (`./rtbuild.toml`)
//! 2. Parent directories (up to the repository root or filesystem root)
//!
//! Relative paths inside the file are resolved against the directory that
//! holds it.
//!
//! ## Example Configuration
//!
//! ```toml
//! [project]
//! source_dir = "../src"
//! artifact = "librtphone.a"
//!
//! [build]
//! cmake = "cmake"
//! jobs = 8
//!
//! [android]
//! ndk_home = "/opt/android-ndk"
//! abi = "arm64-v8a"
//! api_level = 24
//! build_type = "Release"
//! build_dir = "build_android"
//!
//! [linux]
//! generator = "Ninja"
//! build_dir = "build_linux"
//! ```

use anyhow::{Context, Result};
use rtbuild_sdk::BuildType;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The default configuration file name.
pub const CONFIG_FILE_NAME: &str = "rtbuild.toml";

/// Source tree used when none is configured, relative to the project root.
pub const DEFAULT_SOURCE_DIR: &str = "../src";

/// Root configuration structure for `rtbuild.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RtbuildConfig {
    /// Project-level configuration.
    pub project: ProjectConfig,

    /// Options shared by every platform.
    pub build: BuildSection,

    /// Android-specific configuration.
    pub android: AndroidConfig,

    /// Linux-specific configuration.
    pub linux: LinuxConfig,
}

/// Project-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Directory holding the top-level `CMakeLists.txt`.
    ///
    /// Defaults to `../src`.
    pub source_dir: Option<PathBuf>,

    /// File name of the static library the project produces.
    ///
    /// Defaults to `librtphone.a`.
    pub artifact: Option<String>,
}

/// Options shared by every platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSection {
    /// CMake executable. Defaults to `cmake` on PATH.
    pub cmake: Option<PathBuf>,

    /// Parallel jobs for the build step. Defaults to the logical CPU count.
    pub jobs: Option<usize>,
}

/// Android-specific configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AndroidConfig {
    /// Root of the NDK installation.
    ///
    /// Falls back to the `ANDROID_NDK_HOME` environment variable.
    pub ndk_home: Option<PathBuf>,

    /// Target ABI. Defaults to `arm64-v8a`.
    pub abi: Option<String>,

    /// Android API level. Defaults to 24.
    pub api_level: Option<u32>,

    /// CMake build type. Defaults to `Release`.
    pub build_type: Option<BuildType>,

    /// Scratch build directory. Defaults to `build_android`.
    pub build_dir: Option<PathBuf>,
}

/// Linux-specific configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinuxConfig {
    /// CMake generator. Defaults to `Ninja`.
    pub generator: Option<String>,

    /// CMake build type. Unset by default.
    pub build_type: Option<BuildType>,

    /// Scratch build directory. Defaults to `build_linux`.
    pub build_dir: Option<PathBuf>,
}

impl RtbuildConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from the specified file path.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config: RtbuildConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Attempts to find and load configuration starting from the specified directory.
    ///
    /// # Returns
    ///
    /// * `Ok(Some((config, path)))` - Found and loaded configuration with its path
    /// * `Ok(None)` - No configuration file found
    /// * `Err` - If a config file was found but couldn't be parsed
    pub fn discover_from(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut current = start_dir.to_path_buf();

        loop {
            let config_path = current.join(CONFIG_FILE_NAME);

            if config_path.is_file() {
                let config = Self::load_from_file(&config_path)?;
                return Ok(Some((config, config_path)));
            }

            // Stop at repository root or filesystem root
            if current.join(".git").exists() || !current.pop() {
                break;
            }
        }

        Ok(None)
    }

    /// Generates a starter configuration file as a formatted TOML string.
    ///
    /// Every option is listed, commented out at its default, so the file
    /// changes nothing until edited.
    pub fn generate_starter_toml() -> String {
        r#"# rtbuild configuration file
# CLI flags override these settings when provided.

[project]
# Directory containing the top-level CMakeLists.txt (relative to this file)
# source_dir = "../src"

# Static library produced by the CMake project
# artifact = "librtphone.a"

[build]
# CMake executable
# cmake = "cmake"

# Parallel jobs for the build step (default: number of logical CPUs)
# jobs = 8

[android]
# Root of the Android NDK (default: $ANDROID_NDK_HOME)
# ndk_home = "/opt/android-ndk"

# Target ABI
# abi = "arm64-v8a"

# Android API level (ANDROID_PLATFORM)
# api_level = 24

# CMake build type: Debug, Release, RelWithDebInfo or MinSizeRel
# build_type = "Release"

# Scratch build directory, wiped on every build
# build_dir = "build_android"

[linux]
# CMake generator
# generator = "Ninja"

# CMake build type (unset by default)
# build_type = "Release"

# Scratch build directory, wiped on every build
# build_dir = "build_linux"
"#
        .to_string()
    }
}

/// Configuration resolver that merges config file values with CLI arguments.
///
/// CLI arguments always take precedence over config file values, which take
/// precedence over built-in defaults.
#[derive(Debug, Default)]
pub struct ConfigResolver {
    /// Loaded configuration, if any.
    pub config: Option<RtbuildConfig>,

    /// Path to the loaded config file, if any.
    pub config_path: Option<PathBuf>,

    /// Directory relative paths are resolved against.
    pub project_root: PathBuf,
}

impl ConfigResolver {
    /// Discovers configuration from `cwd` upward.
    ///
    /// With no config file, the project root is `cwd` itself.
    pub fn discover(cwd: &Path) -> Result<Self> {
        match RtbuildConfig::discover_from(cwd)? {
            Some((config, path)) => Ok(Self::from_loaded(config, path, cwd)),
            None => Ok(Self {
                config: None,
                config_path: None,
                project_root: cwd.to_path_buf(),
            }),
        }
    }

    /// Loads an explicitly named config file.
    pub fn from_file(path: &Path, cwd: &Path) -> Result<Self> {
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            cwd.join(path)
        };
        let config = RtbuildConfig::load_from_file(&path)?;
        Ok(Self::from_loaded(config, path, cwd))
    }

    fn from_loaded(config: RtbuildConfig, path: PathBuf, cwd: &Path) -> Self {
        let project_root = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| cwd.to_path_buf());
        Self {
            config: Some(config),
            config_path: Some(path),
            project_root,
        }
    }

    /// Resolves a value with priority: CLI > config > default.
    pub fn resolve<T: Clone>(
        &self,
        cli_value: Option<T>,
        config_getter: impl FnOnce(&RtbuildConfig) -> Option<T>,
        default: T,
    ) -> T {
        cli_value
            .or_else(|| self.config.as_ref().and_then(config_getter))
            .unwrap_or(default)
    }

    /// Resolves an optional value with priority: CLI > config.
    pub fn resolve_optional<T>(
        &self,
        cli_value: Option<T>,
        config_getter: impl FnOnce(&RtbuildConfig) -> Option<T>,
    ) -> Option<T> {
        cli_value.or_else(|| self.config.as_ref().and_then(config_getter))
    }

    /// Resolves a path with priority CLI > config > default.
    ///
    /// CLI paths are taken as given (the shell already resolved them against
    /// the working directory); config and default paths are joined onto the
    /// project root.
    pub fn resolve_path(
        &self,
        cli_value: Option<PathBuf>,
        config_getter: impl FnOnce(&RtbuildConfig) -> Option<PathBuf>,
        default: &str,
    ) -> PathBuf {
        match cli_value {
            Some(path) => path,
            None => {
                let path = self
                    .config
                    .as_ref()
                    .and_then(config_getter)
                    .unwrap_or_else(|| PathBuf::from(default));
                self.project_root.join(path)
            }
        }
    }
}
