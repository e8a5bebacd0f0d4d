/// Extract a download percentage from one line of downloader output.
///
/// Matches the first `<1-3 digits>.<digits>%` in the line, e.g.
/// `[download]  42.3% of 3.10MiB` yields `42.3`.
pub fn parse_progress(line: &str) -> Option<f32> {
    let bytes = line.as_bytes();

    for (pct, _) in line.match_indices('%') {
        let frac_start = digits_before(bytes, pct);
        if frac_start == pct || frac_start == 0 || bytes[frac_start - 1] != b'.' {
            continue;
        }
        let dot = frac_start - 1;
        let int_start = digits_before(bytes, dot);
        if int_start == dot {
            continue;
        }
        let int_start = int_start.max(dot.saturating_sub(3));
        if let Ok(value) = line[int_start..pct].parse() {
            return Some(value);
        }
    }
    None
}

/// Start of the run of ASCII digits ending right before `end`.
fn digits_before(bytes: &[u8], end: usize) -> usize {
    bytes[..end]
        .iter()
        .rposition(|b| !b.is_ascii_digit())
        .map_or(0, |i| i + 1)
}
