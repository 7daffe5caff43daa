fn main() -> anyhow::Result<()> {
    brrtwiki::cli::run_cli()
}
