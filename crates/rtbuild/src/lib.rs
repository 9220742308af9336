//! # rtbuild
//!
//! Command-line tool for building the rtphone static library with CMake.
//!
//! ## Overview
//!
//! `rtbuild` is the CLI over [`rtbuild_sdk`]. It resolves settings from flags,
//! `rtbuild.toml`, `.env.local` and the environment, then runs one clean
//! configure+build cycle per requested platform.
//!
//! ## Quick Start
//!
//! ```bash
//! # Write a starter config
//! rtbuild init
//!
//! # Native Linux build (Ninja)
//! rtbuild build --target linux
//!
//! # Android arm64-v8a build
//! export ANDROID_NDK_HOME=/opt/android-ndk
//! rtbuild build --target android
//!
//! # Show the CMake command lines without running them
//! rtbuild plan --target all
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `build` | Wipe the scratch dir, configure, build, print the artifact path |
//! | `plan` | Print the configure and build commands |
//! | `clean` | Remove the scratch build directories |
//! | `init` | Write a starter `rtbuild.toml` |
//!
//! `rtbuild-android` and `rtbuild-linux` are shortcuts for
//! `rtbuild build --target <platform>` and take the same flags.
//!
//! ## CLI Flags
//!
//! Global flags available on all commands:
//!
//! - **`--dry-run`** - Preview what would be done without making changes
//! - **`--verbose` / `-v`** - Print every command before running it
//! - **`--config <path>`** - Use this config file instead of discovering one
//!
//! ## Modules
//!
//! - [`config`] - Configuration file support for `rtbuild.toml`

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rtbuild_sdk::builders::android::NDK_HOME_ENV;
use rtbuild_sdk::builders::cmake::DEFAULT_CMAKE;
use rtbuild_sdk::builders::common::render_command;
use rtbuild_sdk::{
    AndroidSettings, BuildResult, CmakeBuilder, LinuxSettings, Platform, PlatformProfile,
    remove_scratch_dir,
};
use std::env;
use std::ffi::OsString;
use std::io::{self, Write};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use config::{CONFIG_FILE_NAME, ConfigResolver, DEFAULT_SOURCE_DIR, RtbuildConfig};

pub mod config;

/// Builds the rtphone static library for Android and Linux.
#[derive(Parser, Debug)]
#[command(name = "rtbuild", author, version, about = "Build the rtphone static library with CMake", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

/// Single-platform entry point used by `rtbuild-android` and `rtbuild-linux`.
#[derive(Parser, Debug)]
#[command(author, version, about = "Build the rtphone static library for one platform", long_about = None)]
pub struct PlatformCli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(flatten)]
    build: BuildArgs,
}

#[derive(Args, Debug, Clone, Default)]
struct GlobalArgs {
    /// Print what would be done without actually doing it
    #[arg(long, global = true)]
    dry_run: bool,

    /// Print verbose output including all commands
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Config file to use instead of discovering rtbuild.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Wipe the scratch directory, configure, and build.
    Build {
        #[arg(long, value_enum)]
        target: TargetArg,
        #[command(flatten)]
        build: BuildArgs,
    },
    /// Print the configure and build commands without running them.
    Plan {
        #[arg(long, value_enum, default_value_t = TargetArg::All)]
        target: TargetArg,
        #[command(flatten)]
        build: BuildArgs,
    },
    /// Remove scratch build directories.
    Clean {
        #[arg(long, value_enum, default_value_t = TargetArg::All)]
        target: TargetArg,
    },
    /// Write a starter config file.
    Init {
        #[arg(long, default_value = CONFIG_FILE_NAME)]
        output: PathBuf,
        #[arg(long, help = "Overwrite an existing file")]
        force: bool,
    },
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
#[clap(rename_all = "lowercase")]
enum TargetArg {
    Android,
    Linux,
    /// Android, then Linux
    All,
}

impl TargetArg {
    fn platforms(self) -> Vec<Platform> {
        match self {
            TargetArg::Android => vec![Platform::Android],
            TargetArg::Linux => vec![Platform::Linux],
            TargetArg::All => Platform::ALL.to_vec(),
        }
    }
}

/// Per-build overrides. Each one beats the config file.
#[derive(Args, Debug, Clone, Default)]
struct BuildArgs {
    #[arg(long, help = "Directory holding the top-level CMakeLists.txt")]
    source_dir: Option<PathBuf>,
    #[arg(long, help = "Scratch build directory (single target only)")]
    build_dir: Option<PathBuf>,
    #[arg(long, short = 'j', help = "Parallel build jobs (default: logical CPU count)")]
    jobs: Option<NonZeroUsize>,
    #[arg(long, help = "CMake executable to invoke")]
    cmake: Option<PathBuf>,
    #[arg(long, help = "Android NDK root (default: $ANDROID_NDK_HOME)")]
    ndk_home: Option<PathBuf>,
    #[arg(long, help = "Print results as JSON")]
    json: bool,
    #[arg(long, help = "Write rtbuild-meta.json next to the artifact")]
    meta: bool,
}

/// Everything a command needs besides its own arguments.
struct RunContext<'a> {
    resolver: ConfigResolver,
    global: &'a GlobalArgs,
    env: &'a dyn Fn(&str) -> Option<OsString>,
}

/// Entry point of the `rtbuild` binary.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let cwd = env::current_dir().context("Failed to get current directory")?;
    execute(cli, &cwd, &process_env)
}

/// Entry point of the single-platform binaries.
pub fn run_platform(platform: Platform) -> Result<()> {
    let cli = PlatformCli::parse();
    let cwd = env::current_dir().context("Failed to get current directory")?;
    let ctx = context(&cli.global, &cwd, &process_env)?;
    let results = build_platforms(&ctx, &[platform], &cli.build)?;
    report(&mut io::stdout().lock(), &results, cli.build.json)
}

fn process_env(name: &str) -> Option<OsString> {
    env::var_os(name)
}

fn execute(cli: Cli, cwd: &Path, env: &dyn Fn(&str) -> Option<OsString>) -> Result<()> {
    let global = &cli.global;
    match &cli.command {
        Command::Build { target, build } => {
            let ctx = context(global, cwd, env)?;
            let results = build_platforms(&ctx, &target.platforms(), build)?;
            report(&mut io::stdout().lock(), &results, build.json)
        }
        Command::Plan { target, build } => {
            let ctx = context(global, cwd, env)?;
            plan(&ctx, &target.platforms(), build)
        }
        Command::Clean { target } => {
            let ctx = context(global, cwd, env)?;
            clean(&ctx, &target.platforms())
        }
        // Needs no config: it writes the first one
        Command::Init { output, force } => init_config(&cwd.join(output), *force, global.dry_run),
    }
}

fn context<'a>(
    global: &'a GlobalArgs,
    cwd: &Path,
    env: &'a dyn Fn(&str) -> Option<OsString>,
) -> Result<RunContext<'a>> {
    let resolver = match &global.config {
        Some(path) => ConfigResolver::from_file(path, cwd)?,
        None => ConfigResolver::discover(cwd)?,
    };
    if global.verbose {
        if let Some(path) = &resolver.config_path {
            println!("Using config {}", path.display());
        }
    }
    load_dotenv(&resolver.project_root);
    Ok(RunContext {
        resolver,
        global,
        env,
    })
}

fn load_dotenv(root: &Path) {
    let path = root.join(".env.local");
    let _ = dotenvy::from_path(path);
}

/// Resolves the NDK home: `--ndk-home`, then config, then the environment.
fn resolve_ndk_home(ctx: &RunContext<'_>, args: &BuildArgs) -> Option<PathBuf> {
    let configured = ctx.resolver.resolve_optional(args.ndk_home.clone(), |c| {
        c.android
            .ndk_home
            .clone()
            .map(|p| ctx.resolver.project_root.join(p))
    });
    configured.or_else(|| {
        (ctx.env)(NDK_HOME_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    })
}

fn resolve_profile(
    ctx: &RunContext<'_>,
    platform: Platform,
    args: &BuildArgs,
) -> Result<PlatformProfile> {
    let resolver = &ctx.resolver;
    let source_dir = resolver.resolve_path(
        args.source_dir.clone(),
        |c| c.project.source_dir.clone(),
        DEFAULT_SOURCE_DIR,
    );

    let profile = match platform {
        Platform::Android => {
            let defaults = AndroidSettings::default();
            let settings = AndroidSettings {
                ndk_home: resolve_ndk_home(ctx, args),
                abi: resolver.resolve(None, |c| c.android.abi.clone(), defaults.abi),
                api_level: resolver.resolve(None, |c| c.android.api_level, defaults.api_level),
                build_type: resolver.resolve(
                    None,
                    |c| c.android.build_type,
                    defaults.build_type,
                ),
            };
            let build_dir = resolver.resolve_path(
                args.build_dir.clone(),
                |c| c.android.build_dir.clone(),
                platform.default_build_dir(),
            );
            settings.profile(source_dir, build_dir)?
        }
        Platform::Linux => {
            let settings = LinuxSettings {
                generator: resolver.resolve_optional(None, |c| c.linux.generator.clone()),
                build_type: resolver.resolve_optional(None, |c| c.linux.build_type),
            };
            let build_dir = resolver.resolve_path(
                args.build_dir.clone(),
                |c| c.linux.build_dir.clone(),
                platform.default_build_dir(),
            );
            settings.profile(source_dir, build_dir)
        }
    };

    Ok(match resolver.resolve_optional(None, |c| c.project.artifact.clone()) {
        Some(artifact) => profile.artifact_name(artifact),
        None => profile,
    })
}

fn cmake_builder(ctx: &RunContext<'_>, args: &BuildArgs) -> Result<CmakeBuilder> {
    let jobs = match args.jobs {
        Some(jobs) => Some(jobs),
        None => match ctx.resolver.resolve_optional(None, |c| c.build.jobs) {
            Some(n) => Some(
                NonZeroUsize::new(n).context("`jobs` in the [build] section must be at least 1")?,
            ),
            None => None,
        },
    };
    let program = match &args.cmake {
        Some(program) => program.clone(),
        None => resolve_config_program(&ctx.resolver),
    };

    Ok(CmakeBuilder::new()
        .program(program)
        .jobs(jobs)
        .verbose(ctx.global.verbose)
        .dry_run(ctx.global.dry_run)
        .write_meta(args.meta))
}

/// `[build] cmake` from the config: paths resolve against the project root,
/// bare names are left for the PATH lookup.
fn resolve_config_program(resolver: &ConfigResolver) -> PathBuf {
    match resolver.resolve_optional(None, |c| c.build.cmake.clone()) {
        Some(program) if program.components().count() > 1 => {
            resolver.project_root.join(program)
        }
        Some(program) => program,
        None => PathBuf::from(DEFAULT_CMAKE),
    }
}

fn check_single_target(platforms: &[Platform], args: &BuildArgs) -> Result<()> {
    if args.build_dir.is_some() && platforms.len() > 1 {
        bail!("--build-dir needs a single --target; the platforms must not share a scratch directory");
    }
    Ok(())
}

/// Builds each platform in order, stopping at the first failure.
fn build_platforms(
    ctx: &RunContext<'_>,
    platforms: &[Platform],
    args: &BuildArgs,
) -> Result<Vec<BuildResult>> {
    check_single_target(platforms, args)?;
    let builder = cmake_builder(ctx, args)?;

    let mut results = Vec::with_capacity(platforms.len());
    for &platform in platforms {
        let profile = resolve_profile(ctx, platform, args)?;
        if ctx.global.verbose {
            println!(
                "  {} sources: {}, scratch: {}",
                platform,
                profile.source_dir().display(),
                profile.build_dir().display()
            );
        }
        results.push(builder.run_build(&profile)?);
    }
    Ok(results)
}

fn report(out: &mut impl Write, results: &[BuildResult], json: bool) -> Result<()> {
    if json {
        let rendered =
            serde_json::to_string_pretty(results).context("Failed to serialize results")?;
        writeln!(out, "{}", rendered)?;
    } else {
        for result in results {
            writeln!(out, "Built: {}", result.artifact_path.display())?;
        }
    }
    Ok(())
}

fn plan(ctx: &RunContext<'_>, platforms: &[Platform], args: &BuildArgs) -> Result<()> {
    check_single_target(platforms, args)?;
    let builder = cmake_builder(ctx, args)?;
    for &platform in platforms {
        let profile = resolve_profile(ctx, platform, args)?;
        println!("# {}", platform);
        println!("{}", render_command(&builder.configure_command(&profile)));
        println!(
            "{}",
            render_command(&builder.build_command(&profile, builder.effective_jobs()))
        );
        println!("# artifact: {}", profile.artifact_path().display());
    }
    Ok(())
}

fn clean(ctx: &RunContext<'_>, platforms: &[Platform]) -> Result<()> {
    for &platform in platforms {
        let build_dir = ctx.resolver.resolve_path(
            None,
            |c| match platform {
                Platform::Android => c.android.build_dir.clone(),
                Platform::Linux => c.linux.build_dir.clone(),
            },
            platform.default_build_dir(),
        );
        if ctx.global.dry_run {
            println!("[dry-run] would remove {}", build_dir.display());
            continue;
        }
        if remove_scratch_dir(&build_dir)? {
            println!("Removed {}", build_dir.display());
        } else if ctx.global.verbose {
            println!("Nothing to clean at {}", build_dir.display());
        }
    }
    Ok(())
}

fn init_config(path: &Path, force: bool, dry_run: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "refusing to overwrite existing file: {:?} (pass --force to replace it)",
            path
        );
    }
    if dry_run {
        println!("[dry-run] would write {}", path.display());
        return Ok(());
    }
    std::fs::write(path, RtbuildConfig::generate_starter_toml())
        .with_context(|| format!("Failed to write config file: {:?}", path))?;
    println!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtbuild_sdk::BuildError;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<OsString> {
        None
    }

    fn ndk_env(name: &str) -> Option<OsString> {
        (name == NDK_HOME_ENV).then(|| OsString::from("/env/ndk"))
    }

    fn isolated_dir() -> TempDir {
        let temp = TempDir::new().unwrap();
        // Keeps config discovery from wandering above the temp dir
        std::fs::create_dir(temp.path().join(".git")).unwrap();
        temp
    }

    fn global() -> GlobalArgs {
        GlobalArgs::default()
    }

    fn ctx<'a>(
        global: &'a GlobalArgs,
        cwd: &Path,
        env: &'a dyn Fn(&str) -> Option<OsString>,
    ) -> RunContext<'a> {
        context(global, cwd, env).unwrap()
    }

    #[test]
    fn test_parse_build_command() {
        let cli = Cli::try_parse_from([
            "rtbuild", "build", "--target", "android", "-j", "4", "--ndk-home", "/ndk", "-v",
        ])
        .unwrap();
        assert!(cli.global.verbose);
        match cli.command {
            Command::Build { target, build } => {
                assert_eq!(target, TargetArg::Android);
                assert_eq!(build.jobs, NonZeroUsize::new(4));
                assert_eq!(build.ndk_home, Some(PathBuf::from("/ndk")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_zero_jobs_rejected() {
        assert!(Cli::try_parse_from(["rtbuild", "build", "--target", "linux", "-j", "0"]).is_err());
    }

    #[test]
    fn test_build_requires_target() {
        assert!(Cli::try_parse_from(["rtbuild", "build"]).is_err());
    }

    #[test]
    fn test_platform_cli_parses_build_flags() {
        let cli = PlatformCli::try_parse_from(["rtbuild-linux", "--dry-run", "--json"]).unwrap();
        assert!(cli.global.dry_run);
        assert!(cli.build.json);
    }

    #[test]
    fn test_target_all_order() {
        assert_eq!(
            TargetArg::All.platforms(),
            vec![Platform::Android, Platform::Linux]
        );
    }

    #[test]
    fn test_linux_profile_defaults() {
        let temp = isolated_dir();
        let global = global();
        let ctx = ctx(&global, temp.path(), &no_env);

        let profile = resolve_profile(&ctx, Platform::Linux, &BuildArgs::default()).unwrap();
        assert_eq!(profile.source_dir(), temp.path().join("../src"));
        assert_eq!(profile.build_dir(), temp.path().join("build_linux"));
        assert_eq!(
            profile.artifact_path(),
            temp.path().join("build_linux").join("librtphone.a")
        );
    }

    #[test]
    fn test_android_without_ndk_is_missing_precondition() {
        let temp = isolated_dir();
        let global = global();
        let ctx = ctx(&global, temp.path(), &no_env);

        let err = resolve_profile(&ctx, Platform::Android, &BuildArgs::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BuildError>(),
            Some(BuildError::MissingPrecondition(_))
        ));
    }

    #[test]
    fn test_ndk_home_precedence() {
        let temp = isolated_dir();
        std::fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "[android]\nndk_home = \"/config/ndk\"\n",
        )
        .unwrap();
        let global = global();
        let ctx = ctx(&global, temp.path(), &ndk_env);

        // Config beats the environment
        assert_eq!(
            resolve_ndk_home(&ctx, &BuildArgs::default()),
            Some(PathBuf::from("/config/ndk"))
        );

        // Flag beats config
        let args = BuildArgs {
            ndk_home: Some(PathBuf::from("/flag/ndk")),
            ..BuildArgs::default()
        };
        assert_eq!(
            resolve_ndk_home(&ctx, &args),
            Some(PathBuf::from("/flag/ndk"))
        );
    }

    #[test]
    fn test_ndk_home_from_env() {
        let temp = isolated_dir();
        let global = global();
        let ctx = ctx(&global, temp.path(), &ndk_env);

        let profile = resolve_profile(&ctx, Platform::Android, &BuildArgs::default()).unwrap();
        let args: Vec<String> = profile
            .configure_args()
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args[0],
            "-DCMAKE_TOOLCHAIN_FILE=/env/ndk/build/cmake/android.toolchain.cmake"
        );
        assert_eq!(profile.build_dir(), temp.path().join("build_android"));
    }

    #[test]
    fn test_config_overrides_android_settings() {
        let temp = isolated_dir();
        std::fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "[project]\nartifact = \"libcustom.a\"\n\n[android]\nabi = \"x86_64\"\napi_level = 29\nbuild_dir = \"out/android\"\n",
        )
        .unwrap();
        let global = global();
        let ctx = ctx(&global, temp.path(), &ndk_env);

        let profile = resolve_profile(&ctx, Platform::Android, &BuildArgs::default()).unwrap();
        let args: Vec<String> = profile
            .configure_args()
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert!(args.contains(&"-DANDROID_ABI=x86_64".to_string()));
        assert!(args.contains(&"-DANDROID_PLATFORM=29".to_string()));
        assert_eq!(
            profile.artifact_path(),
            temp.path().join("out/android").join("libcustom.a")
        );
    }

    #[test]
    fn test_zero_jobs_in_config_rejected() {
        let temp = isolated_dir();
        std::fs::write(temp.path().join(CONFIG_FILE_NAME), "[build]\njobs = 0\n").unwrap();
        let global = global();
        let ctx = ctx(&global, temp.path(), &no_env);

        assert!(cmake_builder(&ctx, &BuildArgs::default()).is_err());
    }

    #[test]
    fn test_config_cmake_path_resolves_against_project_root() {
        let temp = isolated_dir();
        std::fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "[build]\ncmake = \"tools/cmake\"\n",
        )
        .unwrap();
        let nested = temp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        let global = global();
        let ctx = ctx(&global, &nested, &no_env);
        let profile = LinuxSettings::default().profile("src", "build_linux");

        let builder = cmake_builder(&ctx, &BuildArgs::default()).unwrap();
        assert_eq!(
            builder.configure_command(&profile).get_program(),
            temp.path().join("tools/cmake").as_os_str()
        );

        // The flag is taken as given
        let args = BuildArgs {
            cmake: Some(PathBuf::from("bin/cmake")),
            ..BuildArgs::default()
        };
        let builder = cmake_builder(&ctx, &args).unwrap();
        assert_eq!(
            builder.configure_command(&profile).get_program(),
            "bin/cmake"
        );
    }

    #[test]
    fn test_config_cmake_bare_name_stays_on_path() {
        let temp = isolated_dir();
        std::fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "[build]\ncmake = \"cmake3\"\n",
        )
        .unwrap();
        let nested = temp.path().join("a");
        std::fs::create_dir_all(&nested).unwrap();
        let global = global();
        let ctx = ctx(&global, &nested, &no_env);
        let profile = LinuxSettings::default().profile("src", "build_linux");

        let builder = cmake_builder(&ctx, &BuildArgs::default()).unwrap();
        assert_eq!(builder.configure_command(&profile).get_program(), "cmake3");

        let unconfigured = isolated_dir();
        let plain = context(&global, unconfigured.path(), &no_env).unwrap();
        let builder = cmake_builder(&plain, &BuildArgs::default()).unwrap();
        assert_eq!(
            builder.configure_command(&profile).get_program(),
            DEFAULT_CMAKE
        );
    }

    #[test]
    fn test_report_prints_artifact_paths() {
        let temp = isolated_dir();
        let global = GlobalArgs {
            dry_run: true,
            ..GlobalArgs::default()
        };
        let ctx = ctx(&global, temp.path(), &no_env);
        let results = build_platforms(&ctx, &[Platform::Linux], &BuildArgs::default()).unwrap();

        let mut out = Vec::new();
        report(&mut out, &results, false).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!(
                "Built: {}\n",
                temp.path().join("build_linux").join("librtphone.a").display()
            )
        );
    }

    #[test]
    fn test_report_json_shape() {
        let temp = isolated_dir();
        let global = GlobalArgs {
            dry_run: true,
            ..GlobalArgs::default()
        };
        let ctx = ctx(&global, temp.path(), &no_env);
        let args = BuildArgs {
            jobs: NonZeroUsize::new(2),
            ..BuildArgs::default()
        };
        let results = build_platforms(&ctx, &[Platform::Linux], &args).unwrap();

        let mut out = Vec::new();
        report(&mut out, &results, true).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let entries = value.as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["platform"], "linux");
        assert_eq!(
            entries[0]["artifact_path"],
            temp.path()
                .join("build_linux")
                .join("librtphone.a")
                .to_string_lossy()
                .into_owned()
        );
        assert_eq!(entries[0]["jobs"], 2);
    }

    #[test]
    fn test_init_needs_no_config() {
        let temp = isolated_dir();
        // A broken config would fail discovery for every other command
        std::fs::write(temp.path().join(CONFIG_FILE_NAME), "not = [toml").unwrap();
        let cli = Cli::try_parse_from(["rtbuild", "init", "--output", "fresh.toml"]).unwrap();

        execute(cli, temp.path(), &no_env).unwrap();
        assert!(temp.path().join("fresh.toml").is_file());

        let cli = Cli::try_parse_from(["rtbuild", "clean", "--target", "linux"]).unwrap();
        assert!(execute(cli, temp.path(), &no_env).is_err());
    }

    #[test]
    fn test_build_dir_with_all_targets_rejected() {
        let temp = isolated_dir();
        let global = global();
        let ctx = ctx(&global, temp.path(), &ndk_env);
        let args = BuildArgs {
            build_dir: Some(temp.path().join("shared")),
            ..BuildArgs::default()
        };

        assert!(build_platforms(&ctx, &Platform::ALL, &args).is_err());
        assert!(!temp.path().join("shared").exists());
    }

    #[test]
    fn test_dry_run_build_reports_artifacts_without_side_effects() {
        let temp = isolated_dir();
        let global = GlobalArgs {
            dry_run: true,
            ..GlobalArgs::default()
        };
        let ctx = ctx(&global, temp.path(), &ndk_env);

        let results = build_platforms(&ctx, &Platform::ALL, &BuildArgs::default()).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].platform, Platform::Android);
        assert_eq!(
            results[1].artifact_path,
            temp.path().join("build_linux").join("librtphone.a")
        );
        assert!(!temp.path().join("build_android").exists());
        assert!(!temp.path().join("build_linux").exists());
    }

    #[test]
    fn test_clean_removes_scratch_dirs() {
        let temp = isolated_dir();
        std::fs::create_dir_all(temp.path().join("build_linux/CMakeFiles")).unwrap();
        std::fs::create_dir_all(temp.path().join("build_android")).unwrap();
        let global = global();
        let ctx = ctx(&global, temp.path(), &no_env);

        clean(&ctx, &[Platform::Linux]).unwrap();
        assert!(!temp.path().join("build_linux").exists());
        assert!(temp.path().join("build_android").exists());

        // Already gone is fine
        clean(&ctx, &Platform::ALL).unwrap();
        assert!(!temp.path().join("build_android").exists());
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let temp = isolated_dir();
        let path = temp.path().join(CONFIG_FILE_NAME);

        init_config(&path, false, false).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("[android]"));

        assert!(init_config(&path, false, false).is_err());
        init_config(&path, true, false).unwrap();
    }

    #[test]
    fn test_explicit_config_flag() {
        let temp = isolated_dir();
        std::fs::write(
            temp.path().join("ci.toml"),
            "[linux]\ngenerator = \"Unix Makefiles\"\n",
        )
        .unwrap();
        let global = GlobalArgs {
            config: Some(PathBuf::from("ci.toml")),
            ..GlobalArgs::default()
        };
        let ctx = ctx(&global, temp.path(), &no_env);

        let profile = resolve_profile(&ctx, Platform::Linux, &BuildArgs::default()).unwrap();
        assert_eq!(
            profile.params(),
            &[rtbuild_sdk::ConfigureParam::Generator(
                "Unix Makefiles".to_string()
            )]
        );
    }
}
