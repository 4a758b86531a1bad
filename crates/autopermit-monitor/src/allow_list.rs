//! Externally editable allow-list with throttled refresh.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use lazy_static::lazy_static;

use autopermit_core::Error;

use crate::policy::names_overlap;

lazy_static! {
    /// Fixed alias table: hotkey-style phrases expand to the canonical
    /// button names they stand for, so an allow-list can say "alt+enter"
    /// to mean the approve-class buttons.
    static ref ALIASES: HashMap<&'static str, &'static [&'static str]> = {
        let mut table: HashMap<&'static str, &'static [&'static str]> = HashMap::new();
        table.insert("alt+enter", &["confirm", "accept"]);
        table.insert("ctrl+shift+y", &["confirm", "accept"]);
        table.insert("escape", &["deny", "reject"]);
        table.insert("esc", &["deny", "reject"]);
        table.insert("ctrl+shift+n", &["deny", "reject"]);
        table
    };
}

/// Periodically refreshed set of button names eligible for automatic action.
///
/// The underlying read is file IO inside the tight poll loop, so refreshes
/// are throttled: between refresh intervals the cached set is returned
/// without touching the file. The set is rebuilt wholesale on each actual
/// read, never partially mutated.
#[derive(Debug)]
pub struct AllowListSource {
    path: PathBuf,
    refresh_interval: Duration,
    known_buttons: Vec<String>,
    last_read_at: Option<Instant>,
    cached: HashSet<String>,
}

impl AllowListSource {
    /// Create an allow-list source over a line-oriented text file.
    ///
    /// `known_buttons` are the configured button names raw tokens are
    /// resolved against.
    pub fn new(path: PathBuf, refresh_interval: Duration, known_buttons: Vec<String>) -> Self {
        Self {
            path,
            refresh_interval,
            known_buttons,
            last_read_at: None,
            cached: HashSet::new(),
        }
    }

    /// Return the current allow-list, re-reading the file only when the
    /// refresh interval has elapsed.
    ///
    /// An unreadable source is treated as an empty allow-list for this
    /// refresh and retried on the next interval; content changes are logged
    /// once per transition.
    pub fn refresh(&mut self, now: Instant) -> &HashSet<String> {
        if let Some(last) = self.last_read_at {
            if now.saturating_duration_since(last) < self.refresh_interval {
                return &self.cached;
            }
        }
        self.last_read_at = Some(now);

        let parsed = match std::fs::read_to_string(&self.path) {
            Ok(content) => parse_allow_list(&content, &self.known_buttons),
            Err(_) => {
                tracing::warn!(
                    error = %Error::SourceUnreadable(self.path.clone()),
                    "treating allow-list as empty this refresh"
                );
                HashSet::new()
            }
        };

        if parsed != self.cached {
            let mut entries: Vec<&String> = parsed.iter().collect();
            entries.sort();
            tracing::info!(?entries, "allow-list changed");
            self.cached = parsed;
        }

        &self.cached
    }

    /// The cached set, without any refresh.
    pub fn current(&self) -> &HashSet<String> {
        &self.cached
    }
}

/// Parse raw allow-list text into the canonical deduplicated token set.
///
/// Lines are trimmed; comment lines (`#`) and blank lines are discarded;
/// the rest is treated as comma- or newline-separated tokens. Each token is
/// lowercased, then resolved: alias-table entries expand to their mapped
/// names, otherwise the first known button name with substring overlap (in
/// either direction) wins, otherwise the token passes through verbatim.
pub fn parse_allow_list(content: &str, known_buttons: &[String]) -> HashSet<String> {
    let joined = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect::<Vec<_>>()
        .join(",");

    let mut set = HashSet::new();
    for raw in joined.split(',') {
        let token = raw.trim().to_lowercase();
        if token.is_empty() {
            continue;
        }
        if let Some(expansion) = ALIASES.get(token.as_str()) {
            set.extend(expansion.iter().map(|name| name.to_string()));
            continue;
        }
        if let Some(name) = known_buttons
            .iter()
            .find(|name| names_overlap(name, &token))
        {
            set.insert(name.to_lowercase());
            continue;
        }
        set.insert(token);
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn known() -> Vec<String> {
        vec![
            "accept".to_string(),
            "confirm".to_string(),
            "deny".to_string(),
        ]
    }

    fn expected(entries: &[&str]) -> HashSet<String> {
        entries.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_strips_comments_and_blanks() {
        let set = parse_allow_list("# comment\naccept\n", &known());
        assert_eq!(set, expected(&["accept"]));
    }

    #[test]
    fn test_parse_comma_and_newline_separated() {
        let set = parse_allow_list("accept, deny\nconfirm\n", &known());
        assert_eq!(set, expected(&["accept", "deny", "confirm"]));
    }

    #[test]
    fn test_parse_alias_expansion() {
        let set = parse_allow_list("alt+enter\n", &known());
        assert_eq!(set, expected(&["confirm", "accept"]));

        let set = parse_allow_list("escape\n", &known());
        assert_eq!(set, expected(&["deny", "reject"]));
    }

    #[test]
    fn test_parse_substring_resolution() {
        // "conf" is contained in the known name "confirm".
        let set = parse_allow_list("conf\n", &known());
        assert_eq!(set, expected(&["confirm"]));

        // "accept_reject_combo" contains the known name "accept"; the first
        // overlapping known name wins.
        let set = parse_allow_list("accept_reject_combo\n", &known());
        assert_eq!(set, expected(&["accept"]));
    }

    #[test]
    fn test_parse_unknown_token_passes_through() {
        let set = parse_allow_list("continue\n", &known());
        assert_eq!(set, expected(&["continue"]));
    }

    #[test]
    fn test_parse_deduplicates() {
        let set = parse_allow_list("accept\nACCEPT, accept\n", &known());
        assert_eq!(set, expected(&["accept"]));
    }

    #[test]
    fn test_parse_one_token_per_line_round_trip() {
        let tokens = ["confirm", "deny"];
        let content = tokens.join("\n");
        let set = parse_allow_list(&content, &known());
        assert_eq!(set, expected(&tokens));
    }

    #[test]
    fn test_refresh_throttles_file_reads() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "accept").unwrap();
        file.flush().unwrap();

        let interval = Duration::from_secs(5);
        let mut source =
            AllowListSource::new(file.path().to_path_buf(), interval, known());

        let start = Instant::now();
        assert_eq!(source.refresh(start), &expected(&["accept"]));

        // Change the file; within the interval the cached set must be
        // returned without any IO.
        writeln!(file, "deny").unwrap();
        file.flush().unwrap();
        let within = start + Duration::from_secs(1);
        assert_eq!(source.refresh(within), &expected(&["accept"]));

        // After the interval the new content is picked up.
        let after = start + Duration::from_secs(6);
        assert_eq!(source.refresh(after), &expected(&["accept", "deny"]));
    }

    #[test]
    fn test_refresh_idempotent_within_interval() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "confirm").unwrap();
        file.flush().unwrap();

        let mut source = AllowListSource::new(
            file.path().to_path_buf(),
            Duration::from_secs(5),
            known(),
        );

        let start = Instant::now();
        let first = source.refresh(start).clone();
        let second = source.refresh(start + Duration::from_millis(10)).clone();
        assert_eq!(first, second);
    }

    #[test]
    fn test_refresh_unreadable_source_is_empty() {
        let mut source = AllowListSource::new(
            PathBuf::from("definitely/not/here.txt"),
            Duration::from_secs(5),
            known(),
        );
        assert!(source.refresh(Instant::now()).is_empty());
    }

    #[test]
    fn test_refresh_unreadable_source_retries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("allow_list.txt");

        let mut source =
            AllowListSource::new(path.clone(), Duration::from_secs(5), known());

        let start = Instant::now();
        assert!(source.refresh(start).is_empty());

        std::fs::write(&path, "accept\n").unwrap();
        let after = start + Duration::from_secs(6);
        assert_eq!(source.refresh(after), &expected(&["accept"]));
    }
}
