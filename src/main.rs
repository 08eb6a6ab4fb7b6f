use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    match clt_means::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::debug!("{err:?}");
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
