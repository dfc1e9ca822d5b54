use chrono::{Datelike, Duration, NaiveDate};

use crate::models::courses::entities::TimeSlot;
use crate::models::holidays::entities::Holiday;
use crate::models::schedules::entities::CalendarDay;
use crate::services::holidays::is_holiday;

pub const DEFAULT_CALENDAR_COUNT: u32 = 10;
pub const MAX_CALENDAR_COUNT: u32 = 52;

/// 从 `from` 起的 `count` 个上课日
///
/// 只取配置了时间段的星期，跳过活跃假期；最多向后搜索 `max_days` 天。
pub fn upcoming_class_days(
    from: NaiveDate,
    count: usize,
    slots: &[TimeSlot],
    holidays: &[Holiday],
    max_days: u32,
) -> Vec<CalendarDay> {
    let mut slots = slots.to_vec();
    slots.sort_by_key(|slot| slot.rank());
    slots.dedup();

    let mut days = Vec::with_capacity(count);
    if slots.is_empty() || count == 0 {
        return days;
    }

    for offset in 0..i64::from(max_days) {
        let Some(date) = from.checked_add_signed(Duration::days(offset)) else {
            break;
        };
        let running: Vec<TimeSlot> = slots
            .iter()
            .copied()
            .filter(|slot| slot.weekday() == date.weekday())
            .collect();
        if running.is_empty() || is_holiday(date, holidays) {
            continue;
        }
        days.push(CalendarDay {
            date,
            time_slots: running,
        });
        if days.len() == count {
            break;
        }
    }
    days
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn holiday(start: NaiveDate, end: NaiveDate, active: bool) -> Holiday {
        let now = chrono::Utc::now();
        Holiday {
            id: 1,
            name: "Toussaint".to_string(),
            start_date: start,
            end_date: end,
            is_active: active,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_weekend_days_with_slots() {
        // 2025-10-15 是星期三
        let days = upcoming_class_days(d(2025, 10, 15), 3, &TimeSlot::ALL, &[], 730);
        assert_eq!(days.len(), 3);
        assert_eq!(days[0].date, d(2025, 10, 18));
        assert_eq!(
            days[0].time_slots,
            vec![TimeSlot::SaturdayMorning, TimeSlot::SaturdayAfternoon]
        );
        assert_eq!(days[1].date, d(2025, 10, 19));
        assert_eq!(days[1].time_slots, vec![TimeSlot::SundayMorning]);
        assert_eq!(days[2].date, d(2025, 10, 25));
    }

    #[test]
    fn test_skips_active_holidays_only() {
        let holidays = vec![
            holiday(d(2025, 10, 18), d(2025, 11, 2), true),
            holiday(d(2025, 11, 8), d(2025, 11, 8), false),
        ];
        let days = upcoming_class_days(
            d(2025, 10, 15),
            2,
            &[TimeSlot::SaturdayMorning],
            &holidays,
            730,
        );
        assert_eq!(days[0].date, d(2025, 11, 8));
        assert_eq!(days[1].date, d(2025, 11, 15));
    }

    #[test]
    fn test_search_is_bounded() {
        let days = upcoming_class_days(d(2025, 10, 15), 10, &[TimeSlot::SundayMorning], &[], 14);
        assert_eq!(days.len(), 2);
        assert!(upcoming_class_days(d(2025, 10, 15), 5, &[], &[], 730).is_empty());
    }

    #[test]
    fn test_stops_at_last_representable_date() {
        let near_end = NaiveDate::MAX - Duration::days(10);
        let days = upcoming_class_days(near_end, 10, &TimeSlot::ALL, &[], 730);
        assert!(days.len() <= 4);
        assert!(days.iter().all(|day| day.date <= NaiveDate::MAX));
    }
}
