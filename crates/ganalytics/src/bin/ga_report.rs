//! ga-report - Run an analytics report query.

fn main() -> std::process::ExitCode {
    ganalytics::cmd::report_cmd::main()
}
