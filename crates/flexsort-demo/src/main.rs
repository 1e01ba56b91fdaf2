#![forbid(unsafe_code)]

fn main() {
    if let Err(error) = flexsort_demo::run_from_env() {
        eprintln!("flexsort: {error}");
        std::process::exit(error.exit_code());
    }
}
