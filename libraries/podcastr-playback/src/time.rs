//! Progress display helpers

/// Render whole seconds as `HH:MM:SS`
///
/// Hours are not wrapped at 24.
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}
