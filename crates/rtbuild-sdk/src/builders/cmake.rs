//! CMake configure-and-build orchestration
//!
//! [`CmakeBuilder`] drives one full cycle for a [`PlatformProfile`]:
//!
//! 1. Reset the scratch build directory
//! 2. `cmake <params...> -S <source> -B <build>`
//! 3. `cmake --build <build> -j <cpus>`
//!
//! Each step is also exposed on its own. Neither this process nor the child
//! changes working directory; the source and build directories are passed
//! explicitly and resolve against the caller's working directory.

use std::ffi::OsString;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::Command;

use super::common::{
    create_build_meta, jobs_or_detected, render_command, run_step, write_build_meta,
};
use crate::profile::PlatformProfile;
use crate::scratch::reset_scratch_dir;
use crate::types::{BuildError, BuildResult, Phase};

/// Program invoked when no override is given.
pub const DEFAULT_CMAKE: &str = "cmake";

/// Orchestrates the external build system for one profile at a time.
///
/// Runs are synchronous and blocking. Two runs must not share a scratch
/// directory at the same time.
#[derive(Debug, Clone)]
pub struct CmakeBuilder {
    /// Build-system executable
    program: OsString,
    /// Overrides the detected CPU count for the build step
    jobs: Option<NonZeroUsize>,
    /// Whether to echo each command before running it
    verbose: bool,
    /// Whether to only print what would happen
    dry_run: bool,
    /// Whether to write rtbuild-meta.json after a successful build
    write_meta: bool,
}

impl Default for CmakeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CmakeBuilder {
    /// Creates a builder that runs `cmake` from PATH.
    pub fn new() -> Self {
        Self {
            program: OsString::from(DEFAULT_CMAKE),
            jobs: None,
            verbose: false,
            dry_run: false,
            write_meta: false,
        }
    }

    /// Sets the build-system executable (a path or a name on PATH).
    pub fn program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    /// Fixes the build step's parallelism instead of using the CPU count.
    pub fn jobs(mut self, jobs: Option<NonZeroUsize>) -> Self {
        self.jobs = jobs;
        self
    }

    /// Enables verbose output
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Enables dry-run mode: commands are printed, nothing is deleted or run
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Writes build metadata into the scratch directory after success
    pub fn write_meta(mut self, write_meta: bool) -> Self {
        self.write_meta = write_meta;
        self
    }

    /// Parallelism hint the build step will receive.
    pub fn effective_jobs(&self) -> NonZeroUsize {
        jobs_or_detected(self.jobs)
    }

    /// The configure invocation for `profile`.
    pub fn configure_command(&self, profile: &PlatformProfile) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(profile.configure_args());
        cmd
    }

    /// The build invocation for `profile`.
    pub fn build_command(&self, profile: &PlatformProfile, jobs: NonZeroUsize) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("--build")
            .arg(profile.build_dir())
            .arg("-j")
            .arg(jobs.to_string());
        cmd
    }

    /// Deletes and recreates the profile's scratch directory.
    pub fn reset_scratch_workspace(&self, profile: &PlatformProfile) -> Result<(), BuildError> {
        let build_dir = profile.build_dir();
        if self.dry_run {
            println!("  [dry-run] would reset {}", build_dir.display());
            return Ok(());
        }
        if self.verbose {
            println!("  Resetting {}", build_dir.display());
        }
        reset_scratch_dir(build_dir)
    }

    /// Runs the configure step. Expects a prepared scratch directory.
    pub fn configure(&self, profile: &PlatformProfile) -> Result<(), BuildError> {
        self.run(self.configure_command(profile), Phase::Configure)
    }

    /// Runs the build step with the effective parallelism.
    pub fn build(&self, profile: &PlatformProfile) -> Result<(), BuildError> {
        self.build_with_jobs(profile, self.effective_jobs())
    }

    fn build_with_jobs(
        &self,
        profile: &PlatformProfile,
        jobs: NonZeroUsize,
    ) -> Result<(), BuildError> {
        self.run(self.build_command(profile, jobs), Phase::Build)
    }

    fn run(&self, cmd: Command, phase: Phase) -> Result<(), BuildError> {
        if self.dry_run {
            println!("  [dry-run] {}", render_command(&cmd));
            return Ok(());
        }
        if self.verbose {
            println!("  Running {}: {}", phase.as_str(), render_command(&cmd));
        }
        run_step(cmd, phase)
    }

    /// Runs a full reset, configure, build cycle for `profile`.
    ///
    /// # Returns
    ///
    /// * `Ok(BuildResult)` with `<build_dir>/<artifact name>`. The path is
    ///   the source project's contract and is not checked on disk.
    /// * `Err(BuildError::Configure)` if configuring failed; the build step
    ///   is not run.
    /// * `Err(BuildError::Build)` if building failed; the scratch directory
    ///   is kept.
    pub fn run_build(&self, profile: &PlatformProfile) -> Result<BuildResult, BuildError> {
        let jobs = self.effective_jobs();

        println!("Preparing {} build directory...", profile.name());
        self.reset_scratch_workspace(profile)?;

        println!("Configuring {} build...", profile.name());
        self.configure(profile)?;

        println!("Building {} with {} jobs...", profile.name(), jobs);
        self.build_with_jobs(profile, jobs)?;

        let result = BuildResult {
            platform: profile.platform(),
            artifact_path: profile.artifact_path(),
            build_dir: PathBuf::from(profile.build_dir()),
            jobs: jobs.get(),
        };

        if self.write_meta && !self.dry_run {
            let meta = create_build_meta(profile, &result);
            let path = write_build_meta(profile.build_dir(), &meta)?;
            if self.verbose {
                println!("  Wrote build metadata to {}", path.display());
            }
        }

        Ok(result)
    }
}
