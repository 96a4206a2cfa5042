use std::process::ExitCode;

fn main() -> ExitCode {
    content_check::exit_code(content_check::execute_from_env())
}
