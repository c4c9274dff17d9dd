//! Answer labels and timing display

use chrono::TimeDelta;

/// `Part one`, `Part two`, then `Part 3` and so on
pub fn part_label(part: u8) -> String {
    match part {
        1 => "Part one".to_string(),
        2 => "Part two".to_string(),
        n => format!("Part {n}"),
    }
}

/// Format a TimeDelta for display
pub fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };

    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }

    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}
