fn main() {
    if let Err(err) = popup_place::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
