//! Line-oriented command parser for the stdin reader.
//!
//! Positions are 1-based, matching the row numbers shown by `list`.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// An empty path is a cancelled pick.
    Add(PathBuf),
    AddDir(PathBuf),
    Fetch(String),
    Play(usize),
    Toggle,
    Next,
    Prev,
    Seek(f64),
    Volume(f32),
    Mute,
    Shuffle,
    Repeat,
    Favorite(usize),
    Remove(usize),
    Move { from: usize, to: usize },
    List,
    Recent,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  add <path>        add a local audio file
  add-dir <dir>     add every audio file in a folder
  fetch <url>       download a track and add it
  play <n>          play row n
  toggle            play/pause
  next | prev       skip
  seek <0..1>       jump to a fraction of the track
  vol <0..1>        set volume
  mute              mute/unmute
  shuffle | repeat  toggle modes
  fav <n>           toggle favorite on row n
  rm <n>            remove row n
  mv <from> <to>    move a row
  list | recent     show playlist / recently played
  quit";

/// Parse one input line. Blank lines give `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r.trim()),
        None => (line, ""),
    };

    let cmd = match word.to_ascii_lowercase().as_str() {
        "add" => Command::Add(PathBuf::from(rest)),
        "add-dir" => Command::AddDir(PathBuf::from(required(rest, "add-dir <dir>")?)),
        "fetch" => Command::Fetch(rest.to_string()),
        "play" | "p" => Command::Play(position(rest)?),
        "toggle" | "t" => Command::Toggle,
        "next" | "n" => Command::Next,
        "prev" | "previous" => Command::Prev,
        "seek" => Command::Seek(number(rest, "seek <0..1>")?),
        "vol" | "volume" => Command::Volume(number(rest, "vol <0..1>")?),
        "mute" => Command::Mute,
        "shuffle" => Command::Shuffle,
        "repeat" => Command::Repeat,
        "fav" => Command::Favorite(position(rest)?),
        "rm" => Command::Remove(position(rest)?),
        "mv" => {
            let (from, to) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| "usage: mv <from> <to>".to_string())?;
            Command::Move {
                from: position(from)?,
                to: position(to.trim())?,
            }
        }
        "list" | "ls" => Command::List,
        "recent" => Command::Recent,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(format!("unknown command: {other} (try `help`)")),
    };
    Ok(Some(cmd))
}

fn required<'a>(arg: &'a str, usage: &str) -> Result<&'a str, String> {
    if arg.is_empty() {
        Err(format!("usage: {usage}"))
    } else {
        Ok(arg)
    }
}

/// 1-based row number to 0-based index.
fn position(arg: &str) -> Result<usize, String> {
    let n: usize = arg
        .parse()
        .map_err(|_| format!("expected a row number, got `{arg}`"))?;
    n.checked_sub(1)
        .ok_or_else(|| "row numbers start at 1".to_string())
}

fn number<T: std::str::FromStr>(arg: &str, usage: &str) -> Result<T, String> {
    arg.parse().map_err(|_| format!("usage: {usage}"))
}
