use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Calls `probe` until it returns true or `timeout` elapses. Replaces the
/// fixed post-restart sleeps: returns as soon as the signal is observable
/// instead of always burning the full delay.
pub fn poll_until(timeout: Duration, interval: Duration, mut probe: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    loop {
        if probe() {
            return true;
        }
        let now = Instant::now();
        if now >= deadline {
            return false;
        }
        thread::sleep(interval.min(deadline - now));
    }
}

/// Waits for the network to come back after a restart or reconfigure:
/// ready once the kernel has a default route, or once the named interface
/// reports operational. Returns false on timeout; callers treat that as
/// advisory and continue.
pub fn wait_for_network(iface: Option<&str>, timeout: Duration) -> bool {
    poll_until(timeout, POLL_INTERVAL, || {
        if has_default_route(Path::new("/proc/net/route")) {
            return true;
        }
        iface.map(interface_is_up).unwrap_or(false)
    })
}

/// Scans the kernel route table for a 0.0.0.0/0 destination.
fn has_default_route(route_table: &Path) -> bool {
    let Ok(data) = std::fs::read_to_string(route_table) else {
        return false;
    };
    data.lines().skip(1).any(|line| {
        let mut cols = line.split_whitespace();
        let _iface = cols.next();
        matches!(cols.next(), Some("00000000"))
    })
}

fn interface_is_up(iface: &str) -> bool {
    std::fs::read_to_string(format!("/sys/class/net/{iface}/operstate"))
        .map(|state| state.trim() == "up")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn poll_until_returns_immediately_on_success() {
        let start = Instant::now();
        assert!(poll_until(
            Duration::from_secs(5),
            Duration::from_millis(500),
            || true
        ));
        assert!(start.elapsed() < Duration::from_millis(200));
    }

    #[test]
    fn poll_until_gives_up_at_the_deadline() {
        let start = Instant::now();
        assert!(!poll_until(
            Duration::from_millis(50),
            Duration::from_millis(10),
            || false
        ));
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn poll_until_sees_a_late_success() {
        let mut calls = 0;
        assert!(poll_until(
            Duration::from_secs(5),
            Duration::from_millis(1),
            || {
                calls += 1;
                calls >= 3
            }
        ));
        assert_eq!(calls, 3);
    }

    #[test]
    fn default_route_detection_reads_the_route_table() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let table = tmp.path().join("route");

        fs::write(
            &table,
            "Iface\tDestination\tGateway\nwlan0\t0001A8C0\t00000000\n",
        )
        .expect("seed");
        assert!(!has_default_route(&table));

        fs::write(
            &table,
            "Iface\tDestination\tGateway\nwlan0\t00000000\t0101A8C0\n",
        )
        .expect("seed");
        assert!(has_default_route(&table));
    }
}
