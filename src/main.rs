use std::path::PathBuf;

fn main() {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    if let Err(e) = humancursor_lib::run(config_path.as_deref()) {
        log::error!("humancursor: {e}");
        eprintln!("humancursor: {e}");
        std::process::exit(1);
    }
}
