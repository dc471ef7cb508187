//! Display helpers for durations, dates and names.

use crate::types::{Project, DEFAULT_TRACK_TITLE};
use chrono::{DateTime, Utc};

/// Format seconds as `"{m}m {ss}s"`.
///
/// Zero, negative and non-finite input all render as `"0m 00s"`.
pub fn format_duration(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0m 00s".to_string();
    }
    let total = seconds.round() as u64;
    format!("{}m {:02}s", total / 60, total % 60)
}

/// Sum of the durations of every track in the project.
pub fn total_duration(project: &Project) -> f64 {
    project.tracks.iter().map(|track| track.duration).sum()
}

/// Up to two upper-cased initials from a display name, `"U"` when empty.
pub fn initials(name: &str) -> String {
    let letters: String = name
        .split_whitespace()
        .take(2)
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .collect();
    if letters.is_empty() {
        "U".to_string()
    } else {
        letters
    }
}

/// File name without its final extension, or the placeholder title.
pub fn default_track_title(file_name: &str) -> String {
    let stem = match file_name.rsplit_once('.') {
        Some((stem, ext)) if !ext.is_empty() && !ext.contains('/') => stem,
        _ => file_name,
    };
    if stem.is_empty() {
        DEFAULT_TRACK_TITLE.to_string()
    } else {
        stem.to_string()
    }
}

/// Short date, e.g. `"Mar 4"`.
pub fn format_track_date(ts: &DateTime<Utc>) -> String {
    ts.format("%b %-d").to_string()
}

/// Date and time, e.g. `"Mar 4, 2025, 3:07 PM"`.
pub fn format_track_date_time(ts: &DateTime<Utc>) -> String {
    ts.format("%b %-d, %Y, %-I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn duration_formatting() {
        assert_eq!(format_duration(0.0), "0m 00s");
        assert_eq!(format_duration(125.0), "2m 05s");
        assert_eq!(format_duration(f64::NAN), "0m 00s");
        assert_eq!(format_duration(f64::INFINITY), "0m 00s");
        assert_eq!(format_duration(-3.0), "0m 00s");
        assert_eq!(format_duration(59.6), "1m 00s");
        assert_eq!(format_duration(3600.0), "60m 00s");
    }

    #[test]
    fn initials_from_names() {
        assert_eq!(initials("Taylor Creator"), "TC");
        assert_eq!(initials("  taylor   swift  fan "), "TS");
        assert_eq!(initials("cher"), "C");
        assert_eq!(initials(""), "U");
        assert_eq!(initials("   "), "U");
    }

    #[test]
    fn default_titles_strip_one_extension() {
        assert_eq!(default_track_title("song.mp3"), "song");
        assert_eq!(default_track_title("live.set.flac"), "live.set");
        assert_eq!(default_track_title("noext"), "noext");
        assert_eq!(default_track_title(".mp3"), DEFAULT_TRACK_TITLE);
        assert_eq!(default_track_title(""), DEFAULT_TRACK_TITLE);
    }

    #[test]
    fn dates_render_in_utc() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 4, 15, 7, 0).unwrap();
        assert_eq!(format_track_date(&ts), "Mar 4");
        assert_eq!(format_track_date_time(&ts), "Mar 4, 2025, 3:07 PM");
    }

    #[test]
    fn total_duration_sums_tracks() {
        let mut project = Project::new("Mix", None, 0);
        assert_eq!(total_duration(&project), 0.0);
        for duration in [10.0, 20.5] {
            project.tracks.push(crate::normalize::normalize_track(
                serde_json::from_value(serde_json::json!({ "duration": duration })).unwrap(),
            ));
        }
        assert_eq!(total_duration(&project), 30.5);
    }
}
