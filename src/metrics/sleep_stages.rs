//! Sleep-stage reconstruction from the `levels` arrays of a sleep log.

use chrono::TimeDelta;

use crate::models::common::to_utc;
use crate::models::sleep::{RawLevel, RawSleepSegment, SleepSegment, SleepStage, SleepWindow, SleeplogDoc};

const SHORT_PREFIX: &str = "short_";

/// Older devices report `awake`/`restless`/`asleep`; newer ones the
/// deep/light/rem/wake set. The lookup runs on the full label, so a
/// `short_` label is never rewritten.
pub fn remap_level(label: &str) -> &str {
    match label {
        "awake" | "restless" | "unknown" => "wake",
        "asleep" => "light",
        other => other,
    }
}

fn raw_segment(level: &RawLevel, label: String) -> Option<RawSleepSegment> {
    let start = to_utc(&level.date_time)?;
    let end = TimeDelta::try_seconds(level.seconds).and_then(|length| start.checked_add_signed(length));
    let Some(end) = end else {
        tracing::warn!(
            level = %label,
            start = %start,
            seconds = level.seconds,
            "Dropping sleep segment with an out-of-range duration"
        );
        return None;
    };
    Some(RawSleepSegment {
        segment_start_time: start,
        segment_end_time: end,
        level: label,
        seconds: level.seconds,
    })
}

/// All main segments of every log first, then all short ones with their
/// label prefixed by `short_`.
pub fn raw_segments(docs: &[SleeplogDoc]) -> Vec<RawSleepSegment> {
    let levels = || docs.iter().filter_map(|doc| doc.levels.as_ref());

    let main = levels()
        .flat_map(|l| l.data.iter())
        .filter_map(|level| raw_segment(level, level.level.clone()));
    let short = levels()
        .flat_map(|l| l.short_data.iter())
        .filter_map(|level| raw_segment(level, format!("{}{}", SHORT_PREFIX, level.level)));

    main.chain(short).collect()
}

/// Pairs of indices whose intervals overlap, checked separately for main and
/// short segments. Short segments sit on top of main ones by nature.
pub fn find_overlaps(segments: &[SleepSegment]) -> Vec<(usize, usize)> {
    let mut overlaps = Vec::new();
    for short in [false, true] {
        let mut indices: Vec<usize> = (0..segments.len())
            .filter(|&i| segments[i].stage.is_short() == short)
            .collect();
        indices.sort_by_key(|&i| segments[i].start);
        for pair in indices.windows(2) {
            if segments[pair[1]].start < segments[pair[0]].end {
                overlaps.push((pair[0], pair[1]));
            }
        }
    }
    overlaps
}

/// Maps raw levels onto display stages. Zero-length segments are dropped;
/// overlaps are reported but the segments are kept as they are.
pub fn map_stages(raw: &[RawSleepSegment]) -> Vec<SleepSegment> {
    let segments: Vec<SleepSegment> = raw
        .iter()
        .filter(|segment| {
            let keep = segment.segment_end_time > segment.segment_start_time;
            if !keep {
                tracing::warn!(
                    level = %segment.level,
                    start = %segment.segment_start_time,
                    seconds = segment.seconds,
                    "Dropping sleep segment without duration"
                );
            }
            keep
        })
        .map(|segment| {
            let stage = SleepStage::from_label(remap_level(&segment.level));
            SleepSegment {
                start: segment.segment_start_time,
                end: segment.segment_end_time,
                color: stage.color(),
                stage,
            }
        })
        .collect();

    let overlaps = find_overlaps(&segments);
    if !overlaps.is_empty() {
        tracing::warn!(count = overlaps.len(), "Overlapping sleep segments");
    }

    segments
}

/// Earliest start to latest end.
pub fn sleep_window(segments: &[SleepSegment]) -> Option<SleepWindow> {
    let start = segments.iter().map(|s| s.start).min()?;
    let end = segments.iter().map(|s| s.end).max()?;
    Some(SleepWindow { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::Bson;
    use chrono::{DateTime, TimeZone, Utc};

    use crate::models::sleep::SleepLevels;

    fn t(h: u32, m: u32) -> DateTime<Utc> {
        let day = if h >= 12 { 1 } else { 2 };
        Utc.with_ymd_and_hms(2024, 3, day, h, m, 0).unwrap()
    }

    fn raw(level: &str, start: DateTime<Utc>, seconds: i64) -> RawSleepSegment {
        RawSleepSegment {
            segment_start_time: start,
            segment_end_time: start + TimeDelta::seconds(seconds),
            level: level.into(),
            seconds,
        }
    }

    fn level(at: &str, label: &str, seconds: i64) -> RawLevel {
        RawLevel {
            date_time: Bson::String(at.into()),
            level: label.into(),
            seconds,
        }
    }

    #[test]
    fn legacy_labels_are_remapped() {
        assert_eq!(remap_level("restless"), "wake");
        assert_eq!(remap_level("awake"), "wake");
        assert_eq!(remap_level("unknown"), "wake");
        assert_eq!(remap_level("asleep"), "light");
        assert_eq!(remap_level("rem"), "rem");
        assert_eq!(remap_level("deep"), "deep");
    }

    #[test]
    fn short_prefix_is_applied_before_the_remap() {
        let stages = map_stages(&[
            raw("short_awake", t(23, 0), 60),
            raw("short_wake", t(23, 5), 60),
        ]);

        assert_eq!(stages[0].stage, SleepStage::Other("short_awake".into()));
        assert_eq!(stages[0].color, None);
        assert_eq!(stages[1].stage, SleepStage::ShortWake);
        assert_eq!(stages[1].color, Some("#FFDDE8"));
    }

    #[test]
    fn stages_carry_their_colors() {
        let stages = map_stages(&[
            raw("deep", t(23, 0), 600),
            raw("asleep", t(23, 10), 600),
            raw("rem", t(23, 20), 600),
            raw("restless", t(23, 30), 600),
            raw("mystery", t(23, 40), 600),
        ]);

        let colors: Vec<_> = stages.iter().map(|s| s.color).collect();
        assert_eq!(
            colors,
            vec![Some("#333A73"), Some("#387ADF"), Some("#50C4ED"), Some("#FF407D"), None]
        );
        assert_eq!(stages[1].stage, SleepStage::Light);
        assert_eq!(stages[3].stage, SleepStage::Wake);
        assert_eq!(stages[4].stage.as_str(), "mystery");
    }

    #[test]
    fn zero_length_segments_are_dropped() {
        let stages = map_stages(&[raw("deep", t(23, 0), 0), raw("light", t(23, 0), 30)]);
        assert_eq!(stages.len(), 1);
        assert_eq!(stages[0].stage, SleepStage::Light);
    }

    #[test]
    fn raw_segments_concatenate_main_then_short() {
        let doc = SleeplogDoc {
            date: "2024-03-02".into(),
            minutes_asleep: None,
            minutes_awake: None,
            minutes_to_fall_asleep: None,
            minutes_after_wakeup: None,
            time_in_bed: None,
            start_time: None,
            end_time: None,
            efficiency: None,
            duration: None,
            levels: Some(SleepLevels {
                data: vec![
                    level("2024-03-01T23:00:00.000", "light", 1800),
                    level("2024-03-01T23:30:00.000", "deep", 900),
                ],
                short_data: vec![level("2024-03-01T23:10:00.000", "wake", 60)],
                summary: None,
            }),
        };

        let segments = raw_segments(&[doc]);
        let labels: Vec<_> = segments.iter().map(|s| s.level.as_str()).collect();
        assert_eq!(labels, vec!["light", "deep", "short_wake"]);
        assert_eq!(segments[0].segment_end_time, t(23, 30));
        assert_eq!(segments[2].segment_end_time, t(23, 11));
    }

    #[test]
    fn out_of_range_durations_are_dropped() {
        let doc = SleeplogDoc {
            date: "2024-03-02".into(),
            minutes_asleep: None,
            minutes_awake: None,
            minutes_to_fall_asleep: None,
            minutes_after_wakeup: None,
            time_in_bed: None,
            start_time: None,
            end_time: None,
            efficiency: None,
            duration: None,
            levels: Some(SleepLevels {
                data: vec![
                    level("2024-03-01T23:00:00.000", "light", i64::MAX),
                    level("2024-03-01T23:30:00.000", "deep", 900),
                ],
                short_data: vec![level("2024-03-01T23:10:00.000", "wake", i64::MIN)],
                summary: None,
            }),
        };

        let segments = raw_segments(&[doc]);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].level, "deep");
    }

    #[test]
    fn overlaps_are_detected_within_a_source_only() {
        let stages = map_stages(&[
            raw("light", t(23, 0), 1800),
            raw("deep", t(23, 20), 600),
            raw("short_wake", t(23, 5), 60),
        ]);

        assert_eq!(find_overlaps(&stages), vec![(0, 1)]);
    }

    #[test]
    fn window_spans_all_segments() {
        let stages = map_stages(&[
            raw("light", t(23, 0), 1800),
            raw("deep", t(1, 0), 3600),
            raw("short_wake", t(22, 55), 60),
        ]);

        let window = sleep_window(&stages).unwrap();
        assert_eq!(window.start, t(22, 55));
        assert_eq!(window.end, t(2, 0));
        assert!(sleep_window(&[]).is_none());
    }
}
