fn main() {
    use visgostruct::cli::parse;
    let cli = parse();
    let code = visgostruct::app::run_cli(cli);
    if code != 0 { std::process::exit(code); }
}
