fn main() -> anyhow::Result<()> {
    colophon::cli::run()
}
