use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 科目
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, TS)]
#[ts(export, export_to = "course.ts")]
pub enum Subject {
    #[serde(rename = "arabe")]
    Arabic,
    #[serde(rename = "education_culturelle")]
    CulturalEducation,
}

impl Subject {
    pub const ALL: [Subject; 2] = [Subject::Arabic, Subject::CulturalEducation];

    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::Arabic => "arabe",
            Subject::CulturalEducation => "education_culturelle",
        }
    }

    /// 展示顺序
    pub fn rank(&self) -> u8 {
        match self {
            Subject::Arabic => 0,
            Subject::CulturalEducation => 1,
        }
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Subject {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Subject::ALL
            .into_iter()
            .find(|subject| subject.as_str() == s)
            .ok_or_else(|| format!("Invalid subject: {s}"))
    }
}

// 上课时间段（每周固定）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "course.ts")]
pub enum TimeSlot {
    SaturdayMorning,
    SaturdayAfternoon,
    SundayMorning,
}

impl TimeSlot {
    /// 按一周内先后排列
    pub const ALL: [TimeSlot; 3] = [
        TimeSlot::SaturdayMorning,
        TimeSlot::SaturdayAfternoon,
        TimeSlot::SundayMorning,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeSlot::SaturdayMorning => "saturday_morning",
            TimeSlot::SaturdayAfternoon => "saturday_afternoon",
            TimeSlot::SundayMorning => "sunday_morning",
        }
    }

    pub fn rank(&self) -> u8 {
        match self {
            TimeSlot::SaturdayMorning => 0,
            TimeSlot::SaturdayAfternoon => 1,
            TimeSlot::SundayMorning => 2,
        }
    }

    pub fn weekday(&self) -> chrono::Weekday {
        match self {
            TimeSlot::SaturdayMorning | TimeSlot::SaturdayAfternoon => chrono::Weekday::Sat,
            TimeSlot::SundayMorning => chrono::Weekday::Sun,
        }
    }

    /// 法语展示名
    pub fn label(&self) -> &'static str {
        match self {
            TimeSlot::SaturdayMorning => "Samedi matin",
            TimeSlot::SaturdayAfternoon => "Samedi après-midi",
            TimeSlot::SundayMorning => "Dimanche matin",
        }
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TimeSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeSlot::ALL
            .into_iter()
            .find(|slot| slot.as_str() == s)
            .ok_or_else(|| format!("Invalid time slot: {s}"))
    }
}

/// 课节上缓存的统计值
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "course.ts")]
pub struct SessionStatsSnapshot {
    pub average_attendance: Option<f64>,
    pub average_grade: Option<f64>,
    pub average_behavior: Option<f64>,
}

// 课节
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct CourseSession {
    pub id: i64,
    pub course_id: i64,
    pub subject: Subject,
    pub level: String,
    pub time_slot: TimeSlot,
    /// HH:MM
    pub start_time: String,
    /// HH:MM
    pub end_time: String,
    pub classroom_number: Option<String>,
    pub stats: SessionStatsSnapshot,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 课程中的教师摘要
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct CourseTeacher {
    pub id: i64,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
}

// 课程
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct Course {
    pub id: i64,
    pub school_year: String,
    pub is_active: bool,
    pub deleted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub teachers: Vec<CourseTeacher>,
    pub sessions: Vec<CourseSession>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_serde_uses_french_names() {
        assert_eq!(
            serde_json::to_string(&Subject::CulturalEducation).unwrap(),
            "\"education_culturelle\""
        );
        assert_eq!("arabe".parse::<Subject>(), Ok(Subject::Arabic));
    }

    #[test]
    fn test_time_slot_weekdays() {
        assert_eq!(TimeSlot::SaturdayAfternoon.weekday(), chrono::Weekday::Sat);
        assert_eq!(TimeSlot::SundayMorning.weekday(), chrono::Weekday::Sun);
        assert!("monday_morning".parse::<TimeSlot>().is_err());
    }
}
