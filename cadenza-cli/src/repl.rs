//! Line-oriented command loop.

use std::io::{self, BufRead, Write};

use core_playback::{PlayerEngine, RepeatMode};
use provider_traits::FileProvider;

/// A parsed console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Play(String),
    Pause,
    Resume,
    Stop,
    Next,
    List(Option<String>),
    Enqueue(String),
    ClearQueue,
    Repeat(RepeatMode),
    Shuffle(bool),
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. `Ok(None)` for a blank line; `Err` carries a
    /// message to print for malformed or unknown input.
    pub fn parse(line: &str) -> Result<Option<Command>, String> {
        let mut parts = line.split_whitespace();
        let Some(verb) = parts.next() else {
            return Ok(None);
        };
        let rest: Vec<&str> = parts.collect();

        let command = match verb {
            "play" => match rest.first() {
                Some(path) => Command::Play(path.to_string()),
                None => return Err("usage: play <file>".to_string()),
            },
            "pause" => Command::Pause,
            "resume" => Command::Resume,
            "stop" => Command::Stop,
            "next" => Command::Next,
            "ls" => Command::List(rest.first().map(|dir| dir.to_string())),
            "enqueue" => match rest.first() {
                Some(path) => Command::Enqueue(path.to_string()),
                None => return Err("usage: enqueue <file>".to_string()),
            },
            "clearqueue" => Command::ClearQueue,
            "repeat" => match rest.first() {
                Some(&"none") => Command::Repeat(RepeatMode::None),
                Some(&"single") => Command::Repeat(RepeatMode::Single),
                Some(&"all") => Command::Repeat(RepeatMode::All),
                _ => return Err("usage: repeat <none|single|all>".to_string()),
            },
            "shuffle" => match rest.first() {
                Some(&"on") => Command::Shuffle(true),
                Some(&"off") => Command::Shuffle(false),
                _ => return Err("usage: shuffle <on|off>".to_string()),
            },
            "help" => Command::Help,
            "exit" | "quit" => Command::Quit,
            other => {
                return Err(format!("Unknown command: {other} (try 'help')"));
            }
        };

        Ok(Some(command))
    }
}

const HELP_TEXT: &str = "\
Commands:
  play <file>            Play a file from the library
  pause                  Pause playback
  resume                 Resume playback
  stop                   Stop playback and clear the queue
  next                   Skip to the next queued track
  ls [dir]               List library files
  enqueue <file>         Add a file to the playback queue
  clearqueue             Remove all queued tracks
  repeat <none|single|all>
  shuffle <on|off>
  help                   Show this help
  exit | quit            Leave the player";

/// Read commands from stdin until quit or EOF.
pub fn run(engine: &PlayerEngine, provider: &dyn FileProvider) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match Command::parse(&line) {
            Ok(Some(command)) => {
                if !dispatch(engine, provider, command) {
                    break;
                }
            }
            Ok(None) => {}
            Err(message) => println!("{message}"),
        }
    }

    Ok(())
}

/// Apply one command. Returns `false` when the loop should exit.
fn dispatch(engine: &PlayerEngine, provider: &dyn FileProvider, command: Command) -> bool {
    match command {
        Command::Play(path) => {
            // Probe through the provider first so a typo fails here
            // instead of as a silent stop from the engine.
            if provider.open_file(&path).is_none() {
                println!("Cannot open: {path}");
            } else {
                engine.play(&path);
            }
        }
        Command::Pause => engine.pause(),
        Command::Resume => engine.resume(),
        Command::Stop => engine.stop(),
        Command::Next => engine.next(),
        Command::List(directory) => {
            let directory = directory.unwrap_or_default();
            let entries = provider.list_files(&directory);
            if entries.is_empty() {
                println!("(empty)");
            }
            for entry in entries {
                if entry.is_directory {
                    println!("{}/", entry.path);
                } else {
                    println!("{} ({} bytes)", entry.path, entry.size);
                }
            }
        }
        Command::Enqueue(path) => {
            engine.enqueue(&path);
            println!("Queued: {path} ({} pending)", engine.queue_len());
        }
        Command::ClearQueue => {
            engine.clear_queue();
            println!("Queue cleared");
        }
        Command::Repeat(mode) => {
            engine.set_repeat_mode(mode);
            println!("Repeat mode: {mode:?}");
        }
        Command::Shuffle(enabled) => {
            engine.set_shuffle_mode(enabled);
            println!("Shuffle: {}", if enabled { "on" } else { "off" });
        }
        Command::Help => println!("{HELP_TEXT}"),
        Command::Quit => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_commands() {
        assert_eq!(Command::parse("pause").unwrap(), Some(Command::Pause));
        assert_eq!(Command::parse("stop").unwrap(), Some(Command::Stop));
        assert_eq!(Command::parse("quit").unwrap(), Some(Command::Quit));
        assert_eq!(Command::parse("exit").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn parses_commands_with_arguments() {
        assert_eq!(
            Command::parse("play song.mp3").unwrap(),
            Some(Command::Play("song.mp3".to_string()))
        );
        assert_eq!(
            Command::parse("enqueue albums/a.flac").unwrap(),
            Some(Command::Enqueue("albums/a.flac".to_string()))
        );
        assert_eq!(
            Command::parse("repeat all").unwrap(),
            Some(Command::Repeat(RepeatMode::All))
        );
        assert_eq!(
            Command::parse("shuffle on").unwrap(),
            Some(Command::Shuffle(true))
        );
        assert_eq!(Command::parse("ls").unwrap(), Some(Command::List(None)));
        assert_eq!(
            Command::parse("ls albums").unwrap(),
            Some(Command::List(Some("albums".to_string())))
        );
    }

    #[test]
    fn blank_lines_parse_to_nothing() {
        assert_eq!(Command::parse("").unwrap(), None);
        assert_eq!(Command::parse("   \t ").unwrap(), None);
    }

    #[test]
    fn malformed_input_reports_usage() {
        assert!(Command::parse("play").is_err());
        assert!(Command::parse("repeat sometimes").is_err());
        assert!(Command::parse("shuffle maybe").is_err());
        assert!(Command::parse("frobnicate").is_err());
    }
}
