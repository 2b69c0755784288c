use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, anyhow};

pub const FETCHER_BIN: &str = "fetch_fixtures";

#[derive(Debug, Clone)]
pub struct RefreshOutcome {
    pub success: bool,
    pub code: Option<i32>,
    pub last_line: String,
}

/// Command line for the fetcher: an explicit override, the binary shipped
/// next to the running executable, or whatever is on PATH.
pub fn fetcher_command(override_cmd: Option<&str>) -> Vec<String> {
    if let Some(raw) = override_cmd {
        let parts = split_command(raw);
        if !parts.is_empty() {
            return parts;
        }
    }
    let sibling = env::current_exe()
        .ok()
        .map(|exe| sibling_binary(&exe, FETCHER_BIN))
        .filter(|p| p.exists());
    match sibling {
        Some(path) => vec![path.display().to_string()],
        None => vec![FETCHER_BIN.to_string()],
    }
}

pub fn sibling_binary(exe: &Path, name: &str) -> PathBuf {
    let file = format!("{name}{}", env::consts::EXE_SUFFIX);
    match exe.parent() {
        Some(dir) => dir.join(file),
        None => PathBuf::from(file),
    }
}

pub fn split_command(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}

/// Runs the fetcher to completion. Its output is captured so it can't draw
/// over the dashboard.
pub fn run_fetcher(cmd: &[String]) -> Result<RefreshOutcome> {
    let (program, args) = cmd
        .split_first()
        .ok_or_else(|| anyhow!("empty fetcher command"))?;
    let output = Command::new(program)
        .args(args)
        .output()
        .with_context(|| format!("failed to start {program}"))?;

    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let last_line = last_non_empty_line(&stdout)
        .or_else(|| last_non_empty_line(&stderr))
        .unwrap_or_default();

    Ok(RefreshOutcome {
        success: output.status.success(),
        code: output.status.code(),
        last_line,
    })
}

fn last_non_empty_line(text: &str) -> Option<String> {
    text.lines()
        .rev()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_is_split_on_whitespace() {
        assert_eq!(
            fetcher_command(Some("cargo run --bin fetch_fixtures")),
            vec!["cargo", "run", "--bin", "fetch_fixtures"]
        );
    }

    #[test]
    fn sibling_sits_next_to_exe() {
        let exe = Path::new("/opt/bet/bet_terminal");
        let expected = format!("fetch_fixtures{}", env::consts::EXE_SUFFIX);
        assert_eq!(
            sibling_binary(exe, FETCHER_BIN),
            Path::new("/opt/bet").join(expected)
        );
    }

    #[test]
    fn picks_last_output_line() {
        assert_eq!(
            last_non_empty_line("a\nwrote 3 rows\n\n").as_deref(),
            Some("wrote 3 rows")
        );
        assert_eq!(last_non_empty_line("  \n"), None);
    }

    #[cfg(unix)]
    #[test]
    fn captures_status_and_last_line() {
        let cmd = split_command("sh -c");
        let mut ok = cmd.clone();
        ok.push("echo first; echo 'matches.csv generated successfully (3 matches)'".to_string());
        let outcome = run_fetcher(&ok).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.code, Some(0));
        assert_eq!(
            outcome.last_line,
            "matches.csv generated successfully (3 matches)"
        );

        let mut failing = cmd;
        failing.push("echo 'Error: API key not found' >&2; exit 3".to_string());
        let outcome = run_fetcher(&failing).unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.code, Some(3));
        assert_eq!(outcome.last_line, "Error: API key not found");
    }

    #[test]
    fn missing_program_is_an_error() {
        assert!(run_fetcher(&["bet_terminal_no_such_fetcher".to_string()]).is_err());
    }

    #[test]
    fn empty_command_is_an_error() {
        assert!(run_fetcher(&[]).is_err());
    }
}
