//! Same as `rtbuild build --target android`.

fn main() -> anyhow::Result<()> {
    rtbuild::run_platform(rtbuild_sdk::Platform::Android)
}
