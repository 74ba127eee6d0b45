//! ga-accounts - List analytics accounts and profiles.

fn main() -> std::process::ExitCode {
    ganalytics::cmd::accounts_cmd::main()
}
