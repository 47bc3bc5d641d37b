use std::process::ExitCode;

fn main() -> ExitCode {
    match labelport::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
