//! Module listing and upgrade classification
//!
//! This module provides:
//! - `ListingParser`: turns the raw `go list` output into ordered
//!   `ModuleUpdate` records with a derived upgrade kind
//! - `Lister`: invokes the listing command through an injected executor and
//!   feeds its output to the parser
//!
//! Parsing is deliberately strict. The listing tool emits one
//! `==START==<name>,<from>,<to>==END==` line per updatable module,
//! interleaved with blank lines and the literal `''` sentinel for modules
//! with no update. Exactly those two forms are skipped; any other
//! non-matching line fails the whole batch.

use crate::domain::ModuleUpdate;
use crate::error::{AppError, ParseError, VersionParseError, VersionSide};
use crate::executor::CommandExecutor;
use regex::Regex;
use semver::Version;
use std::sync::LazyLock;

/// Go template handed to `go list -f`. The surrounding single quotes are part
/// of the output, which is why skipped modules show up as the `''` sentinel.
const LIST_TEMPLATE: &str =
    "'{{if (and (not (or .Main .Indirect)) .Update)}}==START=={{.Path}},{{.Version}},{{.Update.Version}}==END=={{end}}'";

/// Default line pattern: name, from-version, to-version
const DEFAULT_MODULE_PATTERN: &str = "==START==(.+),(.+),(.+)==END==";

/// Capture groups the line pattern must define
const EXPECTED_CAPTURES: usize = 3;

/// Literal emitted by the listing tool for "no applicable update"
const SKIP_SENTINEL: &str = "''";

static DEFAULT_PATTERN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DEFAULT_MODULE_PATTERN).unwrap());

/// Parser for the module listing text.
///
/// Pure with respect to its input: no I/O, deterministic, preserves input
/// order, and fail-fast on the first malformed line.
#[derive(Debug, Clone)]
pub struct ListingParser {
    pattern: Regex,
}

impl ListingParser {
    /// Creates a parser with the default `==START==…==END==` pattern
    pub fn new() -> Self {
        Self {
            pattern: DEFAULT_PATTERN_RE.clone(),
        }
    }

    /// Creates a parser with a custom line pattern.
    ///
    /// The pattern must compile and define exactly three capture groups
    /// (name, from-version, to-version).
    pub fn with_pattern(pattern: &str) -> Result<Self, ParseError> {
        let compiled = Regex::new(pattern)
            .map_err(|e| ParseError::invalid_pattern(pattern, e.to_string()))?;

        // captures_len counts the implicit whole-match group
        if compiled.captures_len() != EXPECTED_CAPTURES + 1 {
            return Err(ParseError::invalid_pattern(
                pattern,
                format!(
                    "expected {} capture groups, found {}",
                    EXPECTED_CAPTURES,
                    compiled.captures_len() - 1
                ),
            ));
        }

        Ok(Self { pattern: compiled })
    }

    /// Parses the listing text into ordered module updates.
    ///
    /// Returns the records in input order. The first malformed line aborts
    /// the whole batch with no partial result.
    pub fn parse(&self, listing: &str) -> Result<Vec<ModuleUpdate>, ParseError> {
        let mut modules = Vec::new();

        for (index, line) in listing.lines().enumerate() {
            let line_number = index + 1;

            if is_skippable(line) {
                continue;
            }

            modules.push(self.parse_line(line, line_number)?);
        }

        Ok(modules)
    }

    fn parse_line(&self, line: &str, line_number: usize) -> Result<ModuleUpdate, ParseError> {
        let captures = self
            .pattern
            .captures(line)
            .ok_or_else(|| ParseError::unmatched_line(line_number, line))?;

        let (name, from_text, to_text) =
            match (captures.get(1), captures.get(2), captures.get(3)) {
                (Some(name), Some(from), Some(to)) => {
                    (name.as_str(), from.as_str(), to.as_str())
                }
                _ => return Err(ParseError::unmatched_line(line_number, line)),
            };

        let from = parse_version(from_text, VersionSide::From, line_number)?;
        let to = parse_version(to_text, VersionSide::To, line_number)?;

        Ok(ModuleUpdate::new(name, from, to))
    }
}

impl Default for ListingParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Only blank lines and the `''` sentinel are tolerated; everything else
/// must match the module pattern.
fn is_skippable(line: &str) -> bool {
    line.is_empty() || line == SKIP_SENTINEL
}

/// Parses one version capture, tolerating the Go `v` prefix
fn parse_version(
    text: &str,
    side: VersionSide,
    line_number: usize,
) -> Result<Version, VersionParseError> {
    let stripped = text.strip_prefix('v').unwrap_or(text);
    Version::parse(stripped).map_err(|source| VersionParseError {
        line_number,
        side,
        text: text.to_string(),
        source,
    })
}

/// Produces the module listing by running `go list` through the executor
pub struct Lister<E> {
    executor: E,
    go_bin: String,
    parser: ListingParser,
}

impl<E: CommandExecutor> Lister<E> {
    /// Creates a lister that invokes the default `go` binary
    pub fn new(executor: E) -> Self {
        Self {
            executor,
            go_bin: "go".to_string(),
            parser: ListingParser::new(),
        }
    }

    /// Overrides the `go` binary path (builder pattern)
    pub fn with_go_bin(mut self, go_bin: impl Into<String>) -> Self {
        self.go_bin = go_bin.into();
        self
    }

    /// Overrides the line parser (builder pattern)
    pub fn with_parser(mut self, parser: ListingParser) -> Self {
        self.parser = parser;
        self
    }

    /// Lists updatable modules, classified and in listing order
    pub fn list_updates(&self) -> Result<Vec<ModuleUpdate>, AppError> {
        let output = self
            .executor
            .run(&self.go_bin, &["list", "-m", "-u", "-f", LIST_TEMPLATE, "all"])?;

        Ok(self.parser.parse(&output)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UpgradeKind;
    use crate::error::ExecutionError;

    #[test]
    fn test_parse_single_line() {
        let parser = ListingParser::new();
        let modules = parser
            .parse("==START==github.com/a/b,v1.0.0,v1.0.1==END==")
            .unwrap();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].name, "github.com/a/b");
        assert_eq!(modules[0].from, Version::new(1, 0, 0));
        assert_eq!(modules[0].to, Version::new(1, 0, 1));
        assert_eq!(modules[0].kind, UpgradeKind::Patch);
    }

    #[test]
    fn test_parse_preserves_input_order() {
        let parser = ListingParser::new();
        let listing = "==START==github.com/z/z,v1.0.0,v2.0.0==END==\n\
                       ==START==github.com/a/a,v1.0.0,v1.1.0==END==\n\
                       ==START==github.com/m/m,v1.0.0,v1.0.1==END==";
        let modules = parser.parse(listing).unwrap();
        let names: Vec<&str> = modules.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["github.com/z/z", "github.com/a/a", "github.com/m/m"]
        );
    }

    #[test]
    fn test_skips_sentinel_and_blank_lines_anywhere() {
        let parser = ListingParser::new();
        let listing = "''\n\n==START==github.com/a/b,v1.0.0,v1.1.0==END==\n''\n\n''";
        let modules = parser.parse(listing).unwrap();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].name, "github.com/a/b");
    }

    #[test]
    fn test_all_skippable_yields_empty_list() {
        let parser = ListingParser::new();
        let modules = parser.parse("''\n\n''\n").unwrap();
        assert!(modules.is_empty());
    }

    #[test]
    fn test_unmatched_line_fails_whole_batch() {
        let parser = ListingParser::new();
        let listing = "==START==github.com/a/b,v1.0.0,v1.1.0==END==\n\
                       some progress chatter\n\
                       ==START==github.com/c/d,v1.0.0,v1.0.1==END==";
        let err = parser.parse(listing).unwrap_err();
        match err {
            ParseError::UnmatchedLine { line_number, line } => {
                assert_eq!(line_number, 2);
                assert_eq!(line, "some progress chatter");
            }
            other => panic!("expected UnmatchedLine, got {:?}", other),
        }
    }

    #[test]
    fn test_whitespace_only_line_is_not_skippable() {
        // Only the two documented skip forms are tolerated
        let parser = ListingParser::new();
        let err = parser.parse("  ").unwrap_err();
        assert!(matches!(err, ParseError::UnmatchedLine { .. }));
    }

    #[test]
    fn test_invalid_from_version_names_the_side() {
        let parser = ListingParser::new();
        let err = parser
            .parse("==START==github.com/a/b,not-semver,v1.0.0==END==")
            .unwrap_err();
        match err {
            ParseError::Version(v) => {
                assert_eq!(v.side, VersionSide::From);
                assert_eq!(v.text, "not-semver");
                assert_eq!(v.line_number, 1);
            }
            other => panic!("expected Version error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_to_version_names_the_side() {
        let parser = ListingParser::new();
        let err = parser
            .parse("==START==github.com/a/b,v1.0.0,bogus==END==")
            .unwrap_err();
        match err {
            ParseError::Version(v) => {
                assert_eq!(v.side, VersionSide::To);
                assert_eq!(v.text, "bogus");
            }
            other => panic!("expected Version error, got {:?}", other),
        }
    }

    #[test]
    fn test_version_error_rejects_whole_batch() {
        let parser = ListingParser::new();
        let listing = "==START==github.com/a/b,v1.0.0,v1.1.0==END==\n\
                       ==START==github.com/c/d,v1.0.0,broken==END==";
        assert!(parser.parse(listing).is_err());
    }

    #[test]
    fn test_prerelease_and_build_metadata_versions() {
        let parser = ListingParser::new();
        let modules = parser
            .parse("==START==github.com/a/b,v1.2.3-beta.1,v1.2.3+build.5==END==")
            .unwrap();
        assert_eq!(modules[0].from.pre.as_str(), "beta.1");
        assert_eq!(modules[0].to.build.as_str(), "build.5");
    }

    #[test]
    fn test_round_trip() {
        let parser = ListingParser::new();
        let listing = "==START==github.com/a/b,1.2.3,2.0.0==END==";
        let modules = parser.parse(listing).unwrap();
        let reparsed = parser.parse(&modules[0].to_listing_line()).unwrap();
        assert_eq!(reparsed, modules);
    }

    #[test]
    fn test_custom_pattern() {
        let parser = ListingParser::with_pattern(r"(\S+) (\S+) => (\S+)").unwrap();
        let modules = parser.parse("github.com/a/b 1.0.0 => 2.0.0").unwrap();
        assert_eq!(modules[0].kind, UpgradeKind::Major);
    }

    #[test]
    fn test_pattern_with_wrong_capture_count_is_rejected() {
        let err = ListingParser::with_pattern(r"(\S+),(\S+)").unwrap_err();
        assert!(matches!(err, ParseError::InvalidPattern { .. }));
    }

    #[test]
    fn test_pattern_that_does_not_compile_is_rejected() {
        let err = ListingParser::with_pattern("(((").unwrap_err();
        assert!(matches!(err, ParseError::InvalidPattern { .. }));
    }

    #[test]
    fn test_end_to_end_listing() {
        let parser = ListingParser::new();
        let listing =
            "==START==a/mod,1.0.0,2.0.0==END==\n==START==b/mod,1.0.0,1.1.0==END==\n''\n";
        let modules = parser.parse(listing).unwrap();
        assert_eq!(modules.len(), 2);
        assert_eq!(modules[0].name, "a/mod");
        assert_eq!(modules[0].kind, UpgradeKind::Major);
        assert_eq!(modules[1].name, "b/mod");
        assert_eq!(modules[1].kind, UpgradeKind::Minor);
    }

    struct ScriptedExecutor {
        output: Result<String, ExecutionError>,
    }

    impl CommandExecutor for ScriptedExecutor {
        fn run(&self, _command: &str, _args: &[&str]) -> Result<String, ExecutionError> {
            match &self.output {
                Ok(s) => Ok(s.clone()),
                Err(e) => Err(ExecutionError::new(e.command.clone(), e.message.clone())),
            }
        }
    }

    #[test]
    fn test_lister_parses_executor_output() {
        let executor = ScriptedExecutor {
            output: Ok("==START==github.com/a/b,v1.0.0,v1.1.0==END==\n''\n".to_string()),
        };
        let lister = Lister::new(executor);
        let modules = lister.list_updates().unwrap();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].kind, UpgradeKind::Minor);
    }

    #[test]
    fn test_lister_surfaces_execution_error() {
        let executor = ScriptedExecutor {
            output: Err(ExecutionError::new("go list", "exit status 1")),
        };
        let lister = Lister::new(executor);
        assert!(lister.list_updates().is_err());
    }
}
