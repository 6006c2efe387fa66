fn main() -> anyhow::Result<()> {
    cardwheel_cui::init_logging();
    let args: Vec<String> = std::env::args().skip(1).collect();
    cardwheel_cui::run_with_args(&args)
}
