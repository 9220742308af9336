//! Platform profiles.
//!
//! A [`PlatformProfile`] describes how to configure the external build system
//! for one target: an ordered list of [`ConfigureParam`]s, the source tree to
//! configure, and the scratch directory the run owns.
//!
//! Profiles are built fresh for every run and never change afterwards. The
//! per-platform constructors live in [`crate::builders::android`] and
//! [`crate::builders::linux`].

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::types::Platform;

/// Name of the static library the rtphone CMake project produces.
pub const DEFAULT_ARTIFACT_NAME: &str = "librtphone.a";

/// One configure-time parameter.
///
/// Every parameter renders to discrete argument tokens; values are never
/// spliced into a shell string, so paths containing spaces pass through
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigureParam {
    /// `-DCMAKE_TOOLCHAIN_FILE=<path>`
    ToolchainFile(PathBuf),
    /// `-D<name>=<value>`
    Define { name: String, value: String },
    /// `-G <name>`
    Generator(String),
}

impl ConfigureParam {
    /// Shorthand for [`ConfigureParam::Define`].
    pub fn define(name: impl Into<String>, value: impl Into<String>) -> Self {
        ConfigureParam::Define {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Renders this parameter as command-line tokens.
    pub fn to_args(&self) -> Vec<OsString> {
        match self {
            ConfigureParam::ToolchainFile(path) => {
                let mut arg = OsString::from("-DCMAKE_TOOLCHAIN_FILE=");
                arg.push(path.as_os_str());
                vec![arg]
            }
            ConfigureParam::Define { name, value } => {
                vec![OsString::from(format!("-D{}={}", name, value))]
            }
            ConfigureParam::Generator(name) => {
                vec![OsString::from("-G"), OsString::from(name)]
            }
        }
    }
}

/// Everything needed to configure and build one platform.
///
/// # Example
///
/// ```
/// use rtbuild_sdk::{ConfigureParam, Platform, PlatformProfile};
///
/// let profile = PlatformProfile::new(Platform::Linux, "../src", "build_linux")
///     .param(ConfigureParam::Generator("Ninja".to_string()));
///
/// assert_eq!(profile.artifact_path().to_str(), Some("build_linux/librtphone.a"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformProfile {
    platform: Platform,
    params: Vec<ConfigureParam>,
    source_dir: PathBuf,
    build_dir: PathBuf,
    artifact_name: String,
}

impl PlatformProfile {
    /// Creates a profile with no configure parameters and the default
    /// artifact name.
    pub fn new(
        platform: Platform,
        source_dir: impl Into<PathBuf>,
        build_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            platform,
            params: Vec::new(),
            source_dir: source_dir.into(),
            build_dir: build_dir.into(),
            artifact_name: DEFAULT_ARTIFACT_NAME.to_string(),
        }
    }

    /// Appends a configure parameter. Order is preserved on the command line.
    pub fn param(mut self, param: ConfigureParam) -> Self {
        self.params.push(param);
        self
    }

    /// Overrides the artifact file name expected inside the build directory.
    pub fn artifact_name(mut self, name: impl Into<String>) -> Self {
        self.artifact_name = name.into();
        self
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Human-readable platform name.
    pub fn name(&self) -> &'static str {
        self.platform.as_str()
    }

    pub fn params(&self) -> &[ConfigureParam] {
        &self.params
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// Where the source project's build definition places the library.
    pub fn artifact_path(&self) -> PathBuf {
        self.build_dir.join(&self.artifact_name)
    }

    /// Full argument list for the configure step: the profile's parameters in
    /// order, then the explicit source and build directories.
    pub fn configure_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.params.iter().flat_map(|p| p.to_args()).collect();
        args.push(OsString::from("-S"));
        args.push(self.source_dir.clone().into_os_string());
        args.push(OsString::from("-B"));
        args.push(self.build_dir.clone().into_os_string());
        args
    }
}
