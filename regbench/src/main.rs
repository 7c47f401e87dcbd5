fn main() -> anyhow::Result<()> {
    regbench::run()
}
