use std::env;
use std::fs::{create_dir_all, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use alloy::primitives::Address;

const LOG_DIR: &str = "logs";

/// Short `0xabcdef…123456` form for log lines.
pub fn short_addr(addr: &Address) -> String {
    let s = addr.as_slice();
    format!("0x{}…{}", hex::encode(&s[0..3]), hex::encode(&s[17..20]))
}

/// Full lowercase `0x` form, the way the node spells its accounts.
pub fn lower_addr(addr: &Address) -> String {
    format!("0x{}", hex::encode(addr))
}

/// Append `line` to `logs/logs_<hour-day-month-year>.txt` when
/// `DEBUG_LOGS=true`.  Failures go to stderr and never interrupt a command.
pub fn save_log_to_file(line: &str) {
    if !debug_logs_enabled() {
        return;
    }
    let now = chrono::Utc::now();
    let path = Path::new(LOG_DIR).join(format!("logs_{}.txt", now.format("%H-%d-%m-%Y")));
    let stamped = format!("[{}] {line}", now.format("%H:%M:%S%.3f"));

    if let Err(e) = create_dir_all(LOG_DIR).and_then(|()| append_line(&path, &stamped)) {
        eprintln!("debug log {}: {e}", path.display());
    }
}

fn debug_logs_enabled() -> bool {
    env::var("DEBUG_LOGS").is_ok_and(|v| v.eq_ignore_ascii_case("true"))
}

fn append_line(path: &Path, line: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{line}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[test]
    fn short_addr_keeps_both_ends() {
        let a = address!("f5041fe398062cd63b62bd9b5df9942d30c9b8ca");
        assert_eq!(short_addr(&a), "0xf5041f…c9b8ca");
    }

    #[test]
    fn lower_addr_is_full_lowercase() {
        let a = address!("f5041fe398062cd63b62bd9b5df9942d30c9b8ca");
        assert_eq!(lower_addr(&a), "0xf5041fe398062cd63b62bd9b5df9942d30c9b8ca");
    }

    #[test]
    fn append_line_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");
        append_line(&path, "one").unwrap();
        append_line(&path, "two").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }
}
