use clap::{builder::ValueParser, Arg, ArgAction, Command};

pub const ARG_VERBOSITY: &str = "verbosity";

/// Level names in verbosity order; the index is the `-v` count.
pub const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Parse `VIBE_CHECK_LOG_LEVEL`, either a level name or its index.
///
/// # Errors
/// Returns an error for unknown names and indexes past `trace`.
pub fn parse_log_level(level: &str) -> Result<u8, String> {
    let level = level.trim().to_ascii_lowercase();
    let index = match level.parse::<usize>() {
        Ok(index) => Some(index).filter(|index| *index < LEVELS.len()),
        Err(_) => LEVELS.iter().position(|name| *name == level),
    };
    index
        .and_then(|index| u8::try_from(index).ok())
        .ok_or_else(|| format!("invalid log level {level}, expected one of {LEVELS:?}"))
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
            .env("VIBE_CHECK_LOG_LEVEL")
            .global(true)
            .action(ArgAction::Count)
            .value_parser(ValueParser::new(parse_log_level)),
    )
}
