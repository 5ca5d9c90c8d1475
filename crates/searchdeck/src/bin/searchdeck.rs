//! searchdeck - search public REST APIs from the terminal.

fn main() -> std::process::ExitCode {
    searchdeck::cmd::main()
}
