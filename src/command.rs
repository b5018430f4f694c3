//! The operator-visible command grammar (spec.md §4.7).
//!
//! Parsing is a pure function over a line of text; applying a parsed
//! command to a [`crate::Reactor`] is the only place this module touches
//! simulator state. Terminal I/O (reading the line, echoing errors) is the
//! console driver's job, not this module's.

use crate::reactor::Reactor;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Exit,
    SelectRod(i64, i64),
    SelectAll,
    SelectSources,
    SelectGroup(i64),
    Pull(f64),
    Insert(f64),
    Stop,
    Scram,
    ScramReset,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommandError {
    /// The line didn't match any known command shape.
    Parse(String),
    /// A numeric argument failed to parse as an integer/float.
    InvalidArgument(String),
    /// The command was well-formed but the targeted operation refused it
    /// (out-of-range group, non-selectable rod coordinate, ...).
    Rejected,
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::Parse(line) => write!(f, "unrecognized command: {line}"),
            CommandError::InvalidArgument(arg) => write!(f, "invalid argument: {arg}"),
            CommandError::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::error::Error for CommandError {}

const DEFAULT_PULSE_PERCENT: f64 = 100.0;

/// Parses one line of operator input into a [`Command`].
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.is_empty() {
        return Err(CommandError::Parse(line.to_string()));
    }

    match tokens.as_slice() {
        ["exit"] | ["quit"] => Ok(Command::Exit),
        ["select", "all"] => Ok(Command::SelectAll),
        ["select", "sources"] => Ok(Command::SelectSources),
        ["select", "group", g] => parse_i64(g).map(Command::SelectGroup),
        ["select", x, y] => Ok(Command::SelectRod(parse_i64(x)?, parse_i64(y)?)),
        ["pull"] => Ok(Command::Pull(DEFAULT_PULSE_PERCENT)),
        ["pull", p] => parse_f64(p).map(Command::Pull),
        ["insert"] => Ok(Command::Insert(DEFAULT_PULSE_PERCENT)),
        ["insert", p] => parse_f64(p).map(Command::Insert),
        ["stop"] => Ok(Command::Stop),
        ["scram"] => Ok(Command::Scram),
        ["scram", "reset"] => Ok(Command::ScramReset),
        _ => Err(CommandError::Parse(line.to_string())),
    }
}

fn parse_i64(tok: &str) -> Result<i64, CommandError> {
    tok.parse::<i64>()
        .map_err(|_| CommandError::InvalidArgument(tok.to_string()))
}

fn parse_f64(tok: &str) -> Result<f64, CommandError> {
    tok.parse::<i64>()
        .map(|v| v as f64)
        .map_err(|_| CommandError::InvalidArgument(tok.to_string()))
}

/// Applies a parsed command to `reactor`. Returns `Ok(())` when accepted;
/// `Command::Exit` is a no-op here — the console driver handles process
/// termination itself once it sees that variant.
pub fn apply(reactor: &mut Reactor, command: &Command) -> Result<(), CommandError> {
    match *command {
        Command::Exit => Ok(()),
        Command::SelectRod(x, y) => {
            // The command grammar's grid origin is shifted by (3, 3) from
            // the rod grid's (spec.md §4.7: `select <x> <y>` ->
            // `select_rod(x+3, y+3)`).
            if reactor.select_rod(x + 3, y + 3) {
                Ok(())
            } else {
                Err(CommandError::Rejected)
            }
        }
        Command::SelectAll => {
            reactor.select_all();
            Ok(())
        }
        Command::SelectSources => {
            reactor.select_sources();
            Ok(())
        }
        Command::SelectGroup(g) => {
            if reactor.select_group(g) {
                Ok(())
            } else {
                Err(CommandError::Rejected)
            }
        }
        Command::Pull(p) => {
            reactor.move_rod(-p * 0.01);
            Ok(())
        }
        Command::Insert(p) => {
            reactor.move_rod(p * 0.01);
            Ok(())
        }
        Command::Stop => {
            reactor.move_rod(0.0);
            Ok(())
        }
        Command::Scram => {
            reactor.scram();
            Ok(())
        }
        Command::ScramReset => {
            reactor.scram_reset();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_select_rod() {
        assert_eq!(parse_command("select 1 2"), Ok(Command::SelectRod(1, 2)));
    }

    #[test]
    fn parses_negative_coordinates() {
        assert_eq!(
            parse_command("select -10 -10"),
            Ok(Command::SelectRod(-10, -10))
        );
    }

    #[test]
    fn select_rod_rejects_non_integer_args() {
        assert!(matches!(
            parse_command("select abc def"),
            Err(CommandError::InvalidArgument(_))
        ));
    }

    #[test]
    fn parses_select_all_and_sources() {
        assert_eq!(parse_command("select all"), Ok(Command::SelectAll));
        assert_eq!(parse_command("select sources"), Ok(Command::SelectSources));
    }

    #[test]
    fn parses_select_group() {
        assert_eq!(parse_command("select group 3"), Ok(Command::SelectGroup(3)));
        assert!(matches!(
            parse_command("select group x"),
            Err(CommandError::InvalidArgument(_))
        ));
    }

    #[test]
    fn pull_and_insert_default_to_100_percent() {
        assert_eq!(parse_command("pull"), Ok(Command::Pull(100.0)));
        assert_eq!(parse_command("insert"), Ok(Command::Insert(100.0)));
        assert_eq!(parse_command("pull 50"), Ok(Command::Pull(50.0)));
    }

    #[test]
    fn pull_rejects_non_integer_percentage() {
        assert!(matches!(
            parse_command("pull abc"),
            Err(CommandError::InvalidArgument(_))
        ));
    }

    #[test]
    fn stop_rejects_extra_arguments() {
        assert!(matches!(
            parse_command("stop now"),
            Err(CommandError::Parse(_))
        ));
    }

    #[test]
    fn scram_and_reset() {
        assert_eq!(parse_command("scram"), Ok(Command::Scram));
        assert_eq!(parse_command("scram reset"), Ok(Command::ScramReset));
    }

    #[test]
    fn unknown_verb_is_a_parse_error() {
        assert!(matches!(
            parse_command("frobnicate"),
            Err(CommandError::Parse(_))
        ));
    }

    #[test]
    fn exit_and_quit_both_parse() {
        assert_eq!(parse_command("exit"), Ok(Command::Exit));
        assert_eq!(parse_command("quit"), Ok(Command::Exit));
    }
}
