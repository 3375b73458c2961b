use std::process::ExitCode;

mod app;
mod logging;

fn main() -> ExitCode {
    let args = fsx::cli::parse();
    app::run(args)
}
