//! Process CPU time via `ps(1)` for Unix hosts without procfs.

#![cfg_attr(not(all(unix, not(target_os = "linux"))), allow(dead_code))]

use std::io;
use std::time::Duration;

/// Run a command and return its stdout, or `None` if it could not be spawned
/// or exited unsuccessfully.
fn run_command(program: &str, args: &[&str]) -> Option<String> {
    let output = std::process::Command::new(program)
        .args(args)
        .stdin(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Parse a `ps` cumulative CPU time column.
///
/// Accepted shapes: `mm:ss`, `mm:ss.cc`, `hh:mm:ss`, `dd-hh:mm:ss`, each
/// with an optional fractional seconds part.
pub fn parse_cputime(raw: &str) -> Option<Duration> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let (days, clock) = match raw.split_once('-') {
        Some((d, rest)) => (d.parse::<u64>().ok()?, rest),
        None => (0, raw),
    };
    let pieces: Vec<&str> = clock.split(':').collect();
    let (hours, minutes, seconds) = match pieces.as_slice() {
        [m, s] => (0, m.parse::<u64>().ok()?, *s),
        [h, m, s] => (h.parse::<u64>().ok()?, m.parse::<u64>().ok()?, *s),
        _ => return None,
    };
    let (whole, frac) = match seconds.split_once('.') {
        Some((w, f)) => (w, f),
        None => (seconds, ""),
    };
    let whole = whole.parse::<u64>().ok()?;
    let mut nanos = 0u32;
    if !frac.is_empty() {
        if frac.len() > 9 || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        nanos = frac.parse::<u32>().ok()? * 10u32.pow(9 - frac.len() as u32);
    }
    let secs = ((days * 24 + hours) * 60 + minutes) * 60 + whole;
    Some(Duration::new(secs, nanos))
}

/// Parse one `ps -o time=` line per process into readings.
pub fn parse_ps_listing(stdout: &str) -> Vec<io::Result<Duration>> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            parse_cputime(line).ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("unparsable cpu time '{}'", line.trim()),
                )
            })
        })
        .collect()
}

/// Cumulative CPU time of every process `ps` can see.
///
/// If `ps` is missing or fails the list is empty.
pub fn process_cpu_times() -> Vec<io::Result<Duration>> {
    run_command("ps", &["-axo", "time="])
        .map(|out| parse_ps_listing(&out))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minutes_seconds_with_centis() {
        assert_eq!(parse_cputime("0:00.01"), Some(Duration::from_millis(10)));
        assert_eq!(parse_cputime("  12:34.56 "), Some(Duration::from_millis(754_560)));
    }

    #[test]
    fn parses_hours_and_days() {
        assert_eq!(parse_cputime("01:02:03"), Some(Duration::from_secs(3723)));
        assert_eq!(
            parse_cputime("2-01:02:03"),
            Some(Duration::from_secs(2 * 86_400 + 3723))
        );
    }

    #[test]
    fn rejects_malformed() {
        assert_eq!(parse_cputime(""), None);
        assert_eq!(parse_cputime("abc"), None);
        assert_eq!(parse_cputime("1:2:3:4"), None);
        assert_eq!(parse_cputime("1:xx"), None);
        assert_eq!(parse_cputime("1:02.5x"), None);
    }

    #[test]
    fn listing_marks_bad_lines_as_errors() {
        let out = "   0:01.00\n\n  1:00.00\n  ???\n";
        let readings = parse_ps_listing(out);
        assert_eq!(readings.len(), 3);
        let sum: Duration = readings.iter().filter_map(|r| r.as_ref().ok()).sum();
        assert_eq!(sum, Duration::from_secs(61));
        assert_eq!(
            readings[2].as_ref().unwrap_err().kind(),
            io::ErrorKind::InvalidData
        );
    }

    #[cfg(target_os = "macos")]
    #[test]
    fn live_ps_lists_processes() {
        assert!(process_cpu_times().iter().any(|r| r.is_ok()));
    }
}
