use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use super::task_models::{Task, TaskStatus};

/// Completed fraction of `tasks` in percent. An empty list is 0, not NaN.
pub fn progress_percent(tasks: &[Task]) -> f64 {
    if tasks.is_empty() {
        return 0.0;
    }
    completed_count(tasks) as f64 / tasks.len() as f64 * 100.0
}

pub fn completed_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| t.is_done()).count()
}

/// Titles of open tasks due within `[today 00:00, tomorrow 00:00]`, both
/// endpoints inclusive: due today, or due tomorrow at midnight sharp.
pub fn upcoming_titles(tasks: &[Task], today: NaiveDate) -> Vec<String> {
    let start = day_start(today);
    let end = day_start(today + Duration::days(1));
    tasks
        .iter()
        .filter(|t| t.status == TaskStatus::NotDone.as_str())
        .filter(|t| t.deadline.map_or(false, |d| d >= start && d <= end))
        .map(|t| t.title.clone())
        .collect()
}

/// Reminder line joining the qualifying titles; None suppresses the notice.
pub fn deadline_notice(titles: &[String]) -> Option<String> {
    if titles.is_empty() {
        None
    } else {
        Some(titles.join(", "))
    }
}

fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn task(title: &str, status: TaskStatus, deadline: Option<&str>) -> Task {
        Task {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: title.to_string(),
            description: None,
            status: status.as_str().to_string(),
            priority: "Medium".to_string(),
            deadline: deadline.map(|d| d.parse::<DateTime<Utc>>().unwrap()),
            category_id: None,
            attachment_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 6).unwrap()
    }

    #[test]
    fn progress_of_empty_list_is_zero() {
        assert_eq!(progress_percent(&[]), 0.0);
    }

    #[test]
    fn progress_stays_within_bounds() {
        let all_done = vec![
            task("a", TaskStatus::Done, None),
            task("b", TaskStatus::Done, None),
        ];
        assert_eq!(progress_percent(&all_done), 100.0);

        let none_done = vec![task("a", TaskStatus::NotDone, None)];
        assert_eq!(progress_percent(&none_done), 0.0);

        let mixed = vec![
            task("a", TaskStatus::Done, None),
            task("b", TaskStatus::NotDone, None),
            task("c", TaskStatus::NotDone, None),
        ];
        let percent = progress_percent(&mixed);
        assert!(percent > 0.0 && percent < 100.0);
        assert_eq!(percent.round() as u32, 33);
    }

    #[test]
    fn tomorrow_midnight_is_inclusive() {
        let tasks = vec![
            task("boundary", TaskStatus::NotDone, Some("2026-08-07T00:00:00Z")),
            task("past boundary", TaskStatus::NotDone, Some("2026-08-07T00:00:01Z")),
        ];
        assert_eq!(upcoming_titles(&tasks, today()), ["boundary"]);
    }

    #[test]
    fn today_midnight_is_inclusive() {
        let tasks = vec![
            task("start", TaskStatus::NotDone, Some("2026-08-06T00:00:00Z")),
            task("yesterday", TaskStatus::NotDone, Some("2026-08-05T23:59:59Z")),
        ];
        assert_eq!(upcoming_titles(&tasks, today()), ["start"]);
    }

    #[test]
    fn done_and_undated_tasks_are_never_upcoming() {
        let tasks = vec![
            task("done", TaskStatus::Done, Some("2026-08-06T12:00:00Z")),
            task("undated", TaskStatus::NotDone, None),
            task("open", TaskStatus::NotDone, Some("2026-08-06T12:00:00Z")),
        ];
        assert_eq!(upcoming_titles(&tasks, today()), ["open"]);
    }

    #[test]
    fn notice_joins_titles_and_suppresses_when_empty() {
        let tasks = vec![
            task("one", TaskStatus::NotDone, Some("2026-08-06T08:00:00Z")),
            task("two", TaskStatus::NotDone, Some("2026-08-07T00:00:00Z")),
        ];
        let titles = upcoming_titles(&tasks, today());
        assert_eq!(deadline_notice(&titles).unwrap(), "one, two");

        assert_eq!(deadline_notice(&[]), None);
    }
}
