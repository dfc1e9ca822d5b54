//! 统计纯函数
//!
//! 输入均为存储层取出的明细行，结果统一保留两位小数。

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::models::courses::entities::Subject;
use crate::models::stats::entities::{AttendanceRow, BehaviorRow, GradeAverages, GradeRow};

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| round2(sum / count as f64))
}

/// 出勤率（百分比），没有记录时为 0
pub fn attendance_rate(records: &[AttendanceRow]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let present = records.iter().filter(|r| r.is_present).count();
    round2(present as f64 / records.len() as f64 * 100.0)
}

pub fn absence_count(records: &[AttendanceRow]) -> i64 {
    records.iter().filter(|r| !r.is_present).count() as i64
}

pub fn justified_absence_count(records: &[AttendanceRow]) -> i64 {
    records
        .iter()
        .filter(|r| !r.is_present && r.is_justified)
        .count() as i64
}

/// 行为平均分，没有评分时为 None
pub fn behavior_average(ratings: &[i32]) -> Option<f64> {
    mean(ratings.iter().map(|r| f64::from(*r)))
}

pub fn behavior_rows_average(rows: &[BehaviorRow]) -> Option<f64> {
    mean(rows.iter().map(|r| f64::from(r.rating)))
}

// 参与统计的成绩：非草稿、非缺考且有分数
fn counted_grade(row: &GradeRow) -> Option<f64> {
    if row.is_draft || row.is_absent {
        None
    } else {
        row.value
    }
}

/// 总平均分与各科平均分
pub fn grade_averages(rows: &[GradeRow]) -> GradeAverages {
    let mut per_subject: HashMap<Subject, Vec<f64>> = HashMap::new();
    for row in rows {
        if let Some(value) = counted_grade(row) {
            per_subject.entry(row.subject).or_default().push(value);
        }
    }

    let by_subject: BTreeMap<Subject, f64> = per_subject
        .iter()
        .filter_map(|(subject, values)| mean(values.iter().copied()).map(|avg| (*subject, avg)))
        .collect();

    GradeAverages {
        overall: mean(rows.iter().filter_map(counted_grade)),
        by_subject,
    }
}

/// 缺勤次数为阈值的正整数倍时视为高风险
pub fn is_high_risk(absences: i64, step: u32) -> bool {
    step > 0 && absences > 0 && absences % i64::from(step) == 0
}

/// 学生各类记录中最近的日期
pub fn last_activity(
    attendances: &[AttendanceRow],
    behaviors: &[BehaviorRow],
    grades: &[GradeRow],
) -> Option<NaiveDate> {
    attendances
        .iter()
        .map(|r| r.date)
        .chain(behaviors.iter().map(|r| r.date))
        .chain(grades.iter().map(|r| r.date))
        .max()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, d).unwrap()
    }

    fn attendance(student_id: i64, present: bool, justified: bool) -> AttendanceRow {
        AttendanceRow {
            course_session_id: 1,
            student_id,
            date: date(4),
            is_present: present,
            is_justified: justified,
        }
    }

    fn grade(subject: Subject, value: Option<f64>, absent: bool, draft: bool) -> GradeRow {
        GradeRow {
            course_session_id: 1,
            student_id: 1,
            date: date(5),
            subject,
            value,
            is_absent: absent,
            is_draft: draft,
        }
    }

    #[test]
    fn test_attendance_rate() {
        let rows = vec![
            attendance(1, true, false),
            attendance(2, true, false),
            attendance(3, true, false),
            attendance(4, false, true),
        ];
        assert_eq!(attendance_rate(&rows), 75.0);
        assert_eq!(attendance_rate(&[]), 0.0);
        assert_eq!(absence_count(&rows), 1);
        assert_eq!(justified_absence_count(&rows), 1);
    }

    #[test]
    fn test_attendance_rate_rounds_to_two_decimals() {
        let rows = vec![
            attendance(1, true, false),
            attendance(2, false, false),
            attendance(3, false, false),
        ];
        assert_eq!(attendance_rate(&rows), 33.33);
    }

    #[test]
    fn test_behavior_average() {
        assert_eq!(behavior_average(&[4, 5, 3]), Some(4.0));
        assert_eq!(behavior_average(&[4, 5]), Some(4.5));
        assert_eq!(behavior_average(&[]), None);
    }

    #[test]
    fn test_grade_averages_skip_drafts_and_absences() {
        let rows = vec![
            grade(Subject::Arabic, Some(12.0), false, false),
            grade(Subject::Arabic, Some(16.0), false, false),
            grade(Subject::Arabic, Some(2.0), false, true),
            grade(Subject::CulturalEducation, None, true, false),
            grade(Subject::CulturalEducation, Some(11.0), false, false),
        ];
        let averages = grade_averages(&rows);
        assert_eq!(averages.overall, Some(13.0));
        assert_eq!(averages.by_subject.get(&Subject::Arabic), Some(&14.0));
        assert_eq!(
            averages.by_subject.get(&Subject::CulturalEducation),
            Some(&11.0)
        );
    }

    #[test]
    fn test_grade_averages_only_drafts() {
        let rows = vec![grade(Subject::Arabic, Some(18.0), false, true)];
        let averages = grade_averages(&rows);
        assert_eq!(averages.overall, None);
        assert!(averages.by_subject.is_empty());
    }

    #[test]
    fn test_high_risk_rule() {
        for absences in [3, 6, 9] {
            assert!(is_high_risk(absences, 3));
        }
        for absences in [0, 1, 2, 4, 5, 7] {
            assert!(!is_high_risk(absences, 3));
        }
    }

    #[test]
    fn test_last_activity() {
        let attendances = vec![attendance(1, true, false)];
        let grades = vec![grade(Subject::Arabic, Some(10.0), false, false)];
        assert_eq!(last_activity(&attendances, &[], &grades), Some(date(5)));
        assert_eq!(last_activity(&[], &[], &[]), None);
    }
}
