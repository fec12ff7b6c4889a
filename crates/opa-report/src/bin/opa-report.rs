use opa_report::RunOutcome;

fn main() {
    match opa_report::run() {
        Ok(RunOutcome::Passed) => {}
        Ok(RunOutcome::TestsFailed) => std::process::exit(1),
        Err(err) => {
            eprintln!("{}", opa_report::format_error(&err));
            std::process::exit(1);
        }
    }
}
