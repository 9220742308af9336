//! Helpers shared by the orchestrator and the platform profiles.
//!
//! - Parallelism detection for the build step
//! - Command rendering for verbose and dry-run output
//! - Sub-process execution mapped onto the phase error taxonomy
//! - Build metadata written next to the artifact

use std::env;
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::profile::PlatformProfile;
use crate::types::{BuildError, BuildResult, Phase, Platform};

/// File name of the metadata written by [`write_build_meta`].
pub const BUILD_META_FILE: &str = "rtbuild-meta.json";

/// Number of logical CPUs on the host, never less than 1.
pub fn parallel_jobs() -> NonZeroUsize {
    std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN)
}

/// Returns `jobs` if set, otherwise the detected CPU count.
pub fn jobs_or_detected(jobs: Option<NonZeroUsize>) -> NonZeroUsize {
    jobs.unwrap_or_else(parallel_jobs)
}

/// Renders a command as a single line for display.
///
/// Tokens containing whitespace are quoted. The result is for humans only;
/// commands are always executed from their argument list.
pub fn render_command(cmd: &Command) -> String {
    let mut parts = vec![quote(&cmd.get_program().to_string_lossy())];
    parts.extend(cmd.get_args().map(|a| quote(&a.to_string_lossy())));
    parts.join(" ")
}

fn quote(token: &str) -> String {
    if token.is_empty() || token.chars().any(char::is_whitespace) {
        format!("\"{}\"", token.replace('"', "\\\""))
    } else {
        token.to_string()
    }
}

/// Runs one external build phase to completion.
///
/// Stdout and stderr are inherited so toolchain output streams to the
/// terminal. A spawn failure or a non-zero exit becomes the error variant
/// for `phase`.
pub fn run_step(mut cmd: Command, phase: Phase) -> Result<(), BuildError> {
    let rendered = render_command(&cmd);
    let status = cmd.status().map_err(|e| {
        phase.error(format!(
            "could not start `{}`: {}. Ensure CMake is installed and on PATH",
            rendered, e
        ))
    })?;

    if !status.success() {
        return Err(phase.error(format!("`{}` exited with {}", rendered, status)));
    }
    Ok(())
}

/// Build metadata for tracing an artifact back to the run that made it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildMeta {
    /// Platform that was built
    pub platform: Platform,
    /// Source tree that was configured
    pub source_dir: PathBuf,
    /// Configure arguments, in order
    pub configure_args: Vec<String>,
    /// Parallelism hint given to the build step
    pub jobs: usize,
    /// Artifact the run reported
    pub artifact_path: PathBuf,
    /// Build timestamp in RFC3339 format
    pub build_time: String,
    /// Build timestamp as Unix epoch seconds
    pub build_time_unix: u64,
    /// rtbuild version
    pub rtbuild_version: String,
    /// Host OS (e.g., "linux", "macos")
    pub host_os: String,
}

/// Collects [`BuildMeta`] for a finished run.
pub fn create_build_meta(profile: &PlatformProfile, result: &BuildResult) -> BuildMeta {
    let build_time = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());
    let build_time_unix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();

    BuildMeta {
        platform: result.platform,
        source_dir: profile.source_dir().to_path_buf(),
        configure_args: profile
            .configure_args()
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect(),
        jobs: result.jobs,
        artifact_path: result.artifact_path.clone(),
        build_time,
        build_time_unix,
        rtbuild_version: env!("CARGO_PKG_VERSION").to_string(),
        host_os: env::consts::OS.to_string(),
    }
}

/// Writes [`BUILD_META_FILE`] into `build_dir` and returns its path.
pub fn write_build_meta(build_dir: &Path, meta: &BuildMeta) -> Result<PathBuf, BuildError> {
    let path = build_dir.join(BUILD_META_FILE);
    let json = serde_json::to_string_pretty(meta)?;
    fs::write(&path, json)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ConfigureParam;
    use tempfile::TempDir;

    #[test]
    fn test_parallel_jobs_matches_host() {
        let expected = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        assert_eq!(parallel_jobs().get(), expected);
        assert!(parallel_jobs().get() >= 1);
    }

    #[test]
    fn test_jobs_override_wins() {
        let three = NonZeroUsize::new(3).unwrap();
        assert_eq!(jobs_or_detected(Some(three)), three);
        assert_eq!(jobs_or_detected(None), parallel_jobs());
    }

    #[test]
    fn test_render_command_quotes_spaces() {
        let mut cmd = Command::new("cmake");
        cmd.arg("-DCMAKE_TOOLCHAIN_FILE=/opt/my ndk/t.cmake").arg("-S").arg("src");
        assert_eq!(
            render_command(&cmd),
            "cmake \"-DCMAKE_TOOLCHAIN_FILE=/opt/my ndk/t.cmake\" -S src"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_run_step_maps_exit_status_to_phase() {
        let ok = run_step(Command::new("true"), Phase::Configure);
        assert!(ok.is_ok());

        let err = run_step(Command::new("false"), Phase::Build).unwrap_err();
        assert_eq!(err.phase(), Some(Phase::Build));
    }

    #[test]
    fn test_run_step_missing_program_is_phase_error() {
        let err = run_step(
            Command::new("rtbuild-definitely-not-a-real-program"),
            Phase::Configure,
        )
        .unwrap_err();
        assert_eq!(err.phase(), Some(Phase::Configure));
        assert!(err.to_string().contains("could not start"));
    }

    #[test]
    fn test_write_build_meta() {
        let temp = TempDir::new().unwrap();
        let profile = PlatformProfile::new(Platform::Linux, "src", temp.path())
            .param(ConfigureParam::Generator("Ninja".to_string()));
        let result = BuildResult {
            platform: Platform::Linux,
            artifact_path: profile.artifact_path(),
            build_dir: temp.path().to_path_buf(),
            jobs: 2,
        };

        let meta = create_build_meta(&profile, &result);
        assert!(meta.build_time.contains('T'));
        assert!(meta.build_time_unix > 0);
        assert_eq!(&meta.configure_args[..2], ["-G", "Ninja"]);

        let path = write_build_meta(temp.path(), &meta).unwrap();
        let json = fs::read_to_string(path).unwrap();
        assert!(json.contains("\"platform\": \"linux\""));
        assert!(json.contains("rtbuild_version"));
    }
}
