//! 课节排序
//!
//! 顺序：时间段 → 开始时间 → 年级 → 科目 → ID。

use std::cmp::Ordering;

use crate::models::courses::entities::CourseSession;

/// 年级排序键：数字年级在前（升序），其余按字母序
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum LevelRank {
    Numeric(u32),
    Named(String),
}

pub fn level_rank(level: &str) -> LevelRank {
    let trimmed = level.trim();
    match trimmed.parse::<u32>() {
        Ok(n) => LevelRank::Numeric(n),
        Err(_) => LevelRank::Named(trimmed.to_lowercase()),
    }
}

pub fn compare_sessions(a: &CourseSession, b: &CourseSession) -> Ordering {
    a.time_slot
        .rank()
        .cmp(&b.time_slot.rank())
        .then_with(|| a.start_time.cmp(&b.start_time))
        .then_with(|| level_rank(&a.level).cmp(&level_rank(&b.level)))
        .then_with(|| a.subject.rank().cmp(&b.subject.rank()))
        .then_with(|| a.id.cmp(&b.id))
}

pub fn sort_sessions(sessions: &mut [CourseSession]) {
    sessions.sort_by(compare_sessions);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::courses::entities::{SessionStatsSnapshot, Subject, TimeSlot};

    fn session(
        id: i64,
        slot: TimeSlot,
        start: &str,
        level: &str,
        subject: Subject,
    ) -> CourseSession {
        let now = chrono::Utc::now();
        CourseSession {
            id,
            course_id: 1,
            subject,
            level: level.to_string(),
            time_slot: slot,
            start_time: start.to_string(),
            end_time: "23:59".to_string(),
            classroom_number: None,
            stats: SessionStatsSnapshot::default(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_level_rank() {
        assert!(level_rank("2") < level_rank("10"));
        assert!(level_rank("10") < level_rank("Débutant"));
        assert!(level_rank("avancé") < level_rank("Débutant"));
    }

    #[test]
    fn test_sessions_sorted_by_slot_then_time_then_level() {
        let mut sessions = vec![
            session(1, TimeSlot::SundayMorning, "09:00", "1", Subject::Arabic),
            session(2, TimeSlot::SaturdayAfternoon, "14:00", "1", Subject::Arabic),
            session(3, TimeSlot::SaturdayMorning, "10:45", "1", Subject::Arabic),
            session(4, TimeSlot::SaturdayMorning, "09:00", "3", Subject::Arabic),
            session(5, TimeSlot::SaturdayMorning, "09:00", "2", Subject::CulturalEducation),
            session(6, TimeSlot::SaturdayMorning, "09:00", "2", Subject::Arabic),
        ];
        sort_sessions(&mut sessions);
        let ids: Vec<i64> = sessions.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![6, 5, 4, 3, 2, 1]);
    }
}
