//! Interactive command parsing

use anyhow::{anyhow, bail, Result};
use hnstore::SortKey;

pub const HELP: &str = "\
commands:
  search <term>   show results for <term> (fetched once per session)
  more            fetch the next page of the current query
  dismiss <id>    hide a result by its ID
  sort <key>      sort by none|title|author|comments|points (repeat to reverse)
  show            print the current results
  help            print this help
  quit            exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    More,
    Dismiss(String),
    Sort(SortKey),
    Show,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `None`.
///
/// The search term is everything after the first space, kept verbatim, since
/// cached results are keyed by the exact string.
pub fn parse(line: &str) -> Result<Option<Command>> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Ok(None);
    }

    let trimmed = line.trim_start();
    let (word, rest) = match trimmed.split_once(' ') {
        Some((word, rest)) => (word, Some(rest)),
        None => (trimmed, None),
    };

    let command = match (word, rest) {
        ("search" | "s", Some(term)) if !term.is_empty() => Command::Search(term.to_string()),
        ("search" | "s", _) => bail!("usage: search <term>"),
        ("more" | "m", _) => Command::More,
        ("dismiss" | "d", Some(id)) if !id.trim().is_empty() => Command::Dismiss(id.trim().to_string()),
        ("dismiss" | "d", _) => bail!("usage: dismiss <id>"),
        ("sort", Some(key)) => Command::Sort(key.parse().map_err(|e| anyhow!("{}", e))?),
        ("sort", None) => bail!("usage: sort <key>"),
        ("show" | "ls", _) => Command::Show,
        ("help" | "?", _) => Command::Help,
        ("quit" | "exit" | "q", _) => Command::Quit,
        (other, _) => bail!("unknown command {:?} (try `help`)", other),
    };
    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines() {
        assert_eq!(parse("").unwrap(), None);
        assert_eq!(parse("   \n").unwrap(), None);
    }

    #[test]
    fn test_search_term_kept_verbatim() {
        assert_eq!(
            parse("search Redux Toolkit ").unwrap(),
            Some(Command::Search("Redux Toolkit ".to_string()))
        );
        assert_eq!(parse("s rust\r\n").unwrap(), Some(Command::Search("rust".to_string())));
        assert!(parse("search").is_err());
        assert!(parse("search ").is_err());
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(parse("more").unwrap(), Some(Command::More));
        assert_eq!(parse("show").unwrap(), Some(Command::Show));
        assert_eq!(parse("help").unwrap(), Some(Command::Help));
        assert_eq!(parse("quit").unwrap(), Some(Command::Quit));
        assert_eq!(parse("  q").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn test_dismiss_and_sort() {
        assert_eq!(parse("dismiss 123").unwrap(), Some(Command::Dismiss("123".to_string())));
        assert!(parse("dismiss").is_err());
        assert_eq!(parse("sort points").unwrap(), Some(Command::Sort(SortKey::Points)));
        assert!(parse("sort date").is_err());
        assert!(parse("sort").is_err());
    }

    #[test]
    fn test_unknown_command() {
        let err = parse("frobnicate now").unwrap_err();
        assert!(err.to_string().contains("frobnicate"));
    }
}
