//! Console report formatting.
//!
//! The report goes to stdout; logs go to stderr through tracing.

use device_identity::DeviceIdentity;
use probe_config_and_utils::ServerAddress;

/// Status marker printed in front of a report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Ok,
    Fail,
    Skip,
    Warn,
    Info,
}

impl Marker {
    pub fn label(&self) -> &'static str {
        match self {
            Marker::Ok => "OK",
            Marker::Fail => "FAIL",
            Marker::Skip => "SKIP",
            Marker::Warn => "WARN",
            Marker::Info => "INFO",
        }
    }
}

/// `  OK    message`, with the marker padded so messages line up.
pub fn format_line(marker: Marker, message: &str) -> String {
    format!("  {:<5} {}", marker.label(), message)
}

pub fn print(marker: Marker, message: &str) {
    println!("{}", format_line(marker, message));
}

pub fn ok(message: &str) {
    print(Marker::Ok, message);
}

pub fn fail(message: &str) {
    print(Marker::Fail, message);
}

pub fn skip(message: &str) {
    print(Marker::Skip, message);
}

pub fn warn(message: &str) {
    print(Marker::Warn, message);
}

pub fn info(message: &str) {
    print(Marker::Info, message);
}

/// Unmarked line under the current step.
pub fn note(message: &str) {
    println!("  {}", message);
}

/// Continuation line under a marked line.
pub fn detail(message: &str) {
    println!("        {}", message);
}

/// Print a labelled value.
pub fn row(label: &str, value: &str) {
    println!("  {:<12} {}", format!("{}:", label), value);
}

pub fn step(number: u8, title: &str) {
    println!("\n[Step {}] {}", number, title);
}

pub fn banner(address: &ServerAddress, identity: &DeviceIdentity) {
    println!("=== Jellyfin Orsay TV App Connection Test ===");
    println!("Server:    {}", address);
    println!("Client:    {} {}", identity.client_name(), identity.app_version());
    println!("DeviceId:  {}", identity.device_id());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers_align() {
        assert_eq!(format_line(Marker::Ok, "Pause"), "  OK    Pause");
        assert_eq!(format_line(Marker::Fail, "Pause"), "  FAIL  Pause");
        assert_eq!(format_line(Marker::Skip, "x"), "  SKIP  x");
        assert_eq!(format_line(Marker::Warn, "x"), "  WARN  x");
        assert_eq!(format_line(Marker::Info, "x"), "  INFO  x");
    }
}
