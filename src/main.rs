fn main() {
    if let Err(err) = asset_records::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
