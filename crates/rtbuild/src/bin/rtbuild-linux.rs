//! Same as `rtbuild build --target linux`.

fn main() -> anyhow::Result<()> {
    rtbuild::run_platform(rtbuild_sdk::Platform::Linux)
}
