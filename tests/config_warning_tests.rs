//! Unrecognised option values are accepted with a warning.
//!
//! Lives in its own binary because `logtest` can only install the global
//! logger once per process.

use influx_access_log::{AccessLogConfig, LogPattern, Transport};
use logtest::Logger;

#[test]
fn unrecognised_values_are_warned_about() {
    let mut logger = Logger::start();
    while logger.pop().is_some() {}

    let mut config = AccessLogConfig::default();
    config.apply_property("transport", "udp").expect("transport");
    config.apply_property("pattern", "Combined").expect("pattern");
    assert_eq!(config.transport, Transport::Tcp);
    assert_eq!(config.pattern, LogPattern::Common);

    let warnings: Vec<String> = std::iter::from_fn(|| logger.pop())
        .filter(|record| record.level() == log::Level::Warn)
        .map(|record| record.args().to_owned())
        .collect();
    assert!(warnings.iter().any(|w| w.contains("unrecognised transport")));
    assert!(warnings.iter().any(|w| w.contains("unrecognised pattern")));
}
