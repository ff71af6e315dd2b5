//! Caption timestamp formatting.

fn split_ms(seconds: f64) -> (u64, u64, u64, u64) {
    // Half-up millisecond rounding; negative inputs clamp to zero.
    let total_ms = (seconds * 1000.0).round().max(0.0) as u64;
    (
        total_ms / 3_600_000,
        (total_ms % 3_600_000) / 60_000,
        (total_ms % 60_000) / 1_000,
        total_ms % 1_000,
    )
}

/// `HH:MM:SS.mmm`
pub(crate) fn format_vtt_timestamp(seconds: f64) -> String {
    let (h, m, s, ms) = split_ms(seconds);
    format!("{h:02}:{m:02}:{s:02}.{ms:03}")
}

/// `HH:MM:SS,mmm`
pub(crate) fn format_srt_timestamp(seconds: f64) -> String {
    let (h, m, s, ms) = split_ms(seconds);
    format!("{h:02}:{m:02}:{s:02},{ms:03}")
}
