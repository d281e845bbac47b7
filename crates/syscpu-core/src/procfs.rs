//! Linux procfs readers: per-process CPU time and the aggregate `cpu` counter.
//!
//! The parsers are plain string functions so they can be exercised on any
//! host; only the directory walk touches `/proc`.

#![cfg_attr(not(target_os = "linux"), allow(dead_code))]

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::native::NativeCounter;

/// Default location of the aggregate CPU statistics.
pub const PROC_STAT: &str = "/proc/stat";

#[cfg(target_os = "linux")]
fn clk_tck() -> u64 {
    // SAFETY: `sysconf` is thread-safe for this query and has no side effects.
    let hz = unsafe { libc::sysconf(libc::_SC_CLK_TCK) };
    if hz > 0 { hz as u64 } else { 100 }
}

/// Cumulative CPU time (`utime + stime`) from a `/proc/<pid>/stat` line.
///
/// The command name is parenthesised and may itself contain spaces or
/// parentheses, so fields are counted from the last `)`.
pub fn parse_pid_stat_cpu_time(raw: &str, ticks_per_sec: u64) -> Option<Duration> {
    let (_, rest) = raw.rsplit_once(')')?;
    let mut fields = rest.split_whitespace();
    // rest starts at field 3 (state); utime is field 14, stime field 15.
    let utime = fields.nth(11)?.parse::<u64>().ok()?;
    let stime = fields.next()?.parse::<u64>().ok()?;
    if ticks_per_sec == 0 {
        return None;
    }
    let ticks = u128::from(utime) + u128::from(stime);
    let nanos = ticks * 1_000_000_000 / u128::from(ticks_per_sec);
    Some(Duration::from_nanos(u64::try_from(nanos).ok()?))
}

/// Cumulative CPU time of every process under `/proc`.
///
/// Each entry is either the process's CPU time or the error that prevented
/// reading it (exited in between, permission denied, unparsable). An
/// unreadable `/proc` yields an empty list.
#[cfg(target_os = "linux")]
pub fn process_cpu_times() -> Vec<io::Result<Duration>> {
    process_cpu_times_in(Path::new("/proc"), clk_tck())
}

pub(crate) fn process_cpu_times_in(root: &Path, ticks_per_sec: u64) -> Vec<io::Result<Duration>> {
    let Ok(entries) = std::fs::read_dir(root) else {
        return Vec::new();
    };
    let mut out = Vec::new();
    for entry in entries.flatten() {
        let is_pid = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.parse::<u32>().is_ok());
        if !is_pid {
            continue;
        }
        let reading = std::fs::read_to_string(entry.path().join("stat")).and_then(|raw| {
            parse_pid_stat_cpu_time(&raw, ticks_per_sec).ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidData, "malformed process stat line")
            })
        });
        out.push(reading);
    }
    out
}

/// Busy and total jiffies from the aggregate `cpu` line of `/proc/stat`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuTicks {
    pub busy: u64,
    pub total: u64,
}

/// Parse the aggregate `cpu ` line.
///
/// busy = user + nice + system + irq + softirq + steal; total adds idle and
/// iowait. Guest time is already folded into user/nice by the kernel.
pub fn parse_aggregate_cpu(raw: &str) -> Option<CpuTicks> {
    let rest = raw.lines().find_map(|line| line.strip_prefix("cpu "))?;
    let parts: Vec<u64> = rest
        .split_whitespace()
        .map_while(|s| s.parse::<u64>().ok())
        .collect();
    if parts.len() < 4 {
        return None;
    }
    let field = |i: usize| parts.get(i).copied().unwrap_or(0);
    let busy = field(0) + field(1) + field(2) + field(5) + field(6) + field(7);
    let idle = field(3) + field(4);
    Some(CpuTicks {
        busy,
        total: busy + idle,
    })
}

/// Aggregate CPU utilization counter backed by `/proc/stat`.
///
/// Like a performance counter, every read reports utilization over the
/// interval since the previous read. The first read after opening covers the
/// time since `open`.
#[derive(Debug)]
pub struct ProcStatCounter {
    path: PathBuf,
    last: CpuTicks,
}

impl ProcStatCounter {
    pub fn open() -> io::Result<Self> {
        Self::open_at(PROC_STAT)
    }

    pub fn open_at(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let last = read_ticks(&path)?;
        Ok(Self { path, last })
    }
}

fn read_ticks(path: &Path) -> io::Result<CpuTicks> {
    let raw = std::fs::read_to_string(path)?;
    parse_aggregate_cpu(&raw).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("no aggregate cpu line in {}", path.display()),
        )
    })
}

impl NativeCounter for ProcStatCounter {
    fn next_value(&mut self) -> io::Result<f64> {
        let now = read_ticks(&self.path)?;
        let busy = now.busy.saturating_sub(self.last.busy);
        let total = now.total.saturating_sub(self.last.total);
        self.last = now;
        if total == 0 {
            return Ok(0.0);
        }
        Ok(100.0 * busy as f64 / total as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const STAT_V1: &str = "cpu  100 0 50 800 50 0 0 0 0 0\n\
                           cpu0 50 0 25 400 25 0 0 0 0 0\n\
                           ctxt 12345\n";
    const STAT_V2: &str = "cpu  160 10 80 900 50 5 5 0 0 0\n\
                           cpu0 80 5 40 450 25 2 3 0 0 0\n";

    #[test]
    fn pid_stat_sums_user_and_system_ticks() {
        let line = "1234 (bash) S 1 1234 1234 34816 1234 4194304 1000 0 0 0 250 50 0 0 20 0 1 0 100 0 0";
        let t = parse_pid_stat_cpu_time(line, 100).unwrap();
        assert_eq!(t, Duration::from_secs(3));
    }

    #[test]
    fn pid_stat_handles_parens_in_command_name() {
        let line = "42 (weird) name (x)) R 1 42 42 0 -1 0 0 0 0 0 7 3 0 0 20 0 1 0 5 0 0";
        let t = parse_pid_stat_cpu_time(line, 100).unwrap();
        assert_eq!(t, Duration::from_millis(100));
    }

    #[test]
    fn pid_stat_rejects_truncated_line() {
        assert!(parse_pid_stat_cpu_time("42 (x) R 1 2", 100).is_none());
        assert!(parse_pid_stat_cpu_time("no parens here", 100).is_none());
    }

    #[test]
    fn aggregate_line_splits_busy_and_idle() {
        let t = parse_aggregate_cpu(STAT_V1).unwrap();
        assert_eq!(t.busy, 150);
        assert_eq!(t.total, 1000);
    }

    #[test]
    fn aggregate_line_requires_cpu_prefix() {
        assert!(parse_aggregate_cpu("cpu0 1 2 3 4\n").is_none());
        assert!(parse_aggregate_cpu("cpu  1 2\n").is_none());
    }

    #[test]
    fn counter_reports_percentage_since_previous_read() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(STAT_V1.as_bytes()).unwrap();
        let mut counter = ProcStatCounter::open_at(file.path()).unwrap();

        // Unchanged counters: no elapsed ticks.
        assert_eq!(counter.next_value().unwrap(), 0.0);

        std::fs::write(file.path(), STAT_V2).unwrap();
        // busy 150 -> 260 (+110), total 1000 -> 1210 (+210)
        let pct = counter.next_value().unwrap();
        assert!((pct - 100.0 * 110.0 / 210.0).abs() < 1e-9);
    }

    #[test]
    fn counter_open_fails_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ProcStatCounter::open_at(dir.path().join("stat")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn process_walk_skips_non_pid_entries_and_reports_bad_stats() {
        let root = tempfile::tempdir().unwrap();
        let good = root.path().join("10");
        std::fs::create_dir(&good).unwrap();
        std::fs::write(
            good.join("stat"),
            "10 (init) S 0 10 10 0 -1 0 0 0 0 0 100 100 0 0 20 0 1 0 1 0 0",
        )
        .unwrap();
        std::fs::create_dir(root.path().join("11")).unwrap(); // no stat file
        std::fs::create_dir(root.path().join("self")).unwrap();
        std::fs::write(root.path().join("uptime"), "1 2").unwrap();

        let readings = process_cpu_times_in(root.path(), 100);
        assert_eq!(readings.len(), 2);
        let ok: Vec<_> = readings.iter().filter_map(|r| r.as_ref().ok()).collect();
        assert_eq!(ok, vec![&Duration::from_secs(2)]);
        assert_eq!(readings.iter().filter(|r| r.is_err()).count(), 1);
    }

    #[test]
    fn process_walk_of_missing_root_is_empty() {
        let root = tempfile::tempdir().unwrap();
        assert!(process_cpu_times_in(&root.path().join("nope"), 100).is_empty());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn live_proc_has_readable_processes() {
        let readings = process_cpu_times();
        assert!(readings.iter().any(|r| r.is_ok()));
    }
}
