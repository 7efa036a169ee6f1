//! Shim standing in for the symbol stripper.

fn main() -> std::process::ExitCode {
    let args: Vec<String> = std::env::args().collect();
    blight::run_shim(&args[0], args[1..].to_vec())
}
