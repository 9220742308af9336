fn main() -> anyhow::Result<()> {
    rtbuild::run()
}
