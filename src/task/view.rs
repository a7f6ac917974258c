use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use super::task_models::Task;

/// Sort selector for task list views. Anything unrecognized falls back to the
/// default ascending-deadline order rather than failing the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    DeadlineAsc,
    DeadlineDesc,
    TitleAsc,
    CreatedDesc,
    PriorityDesc,
    PriorityAsc,
}

impl SortOrder {
    pub fn parse(input: Option<&str>) -> Self {
        match input {
            Some("deadline_asc") => SortOrder::DeadlineAsc,
            Some("deadline_desc") => SortOrder::DeadlineDesc,
            Some("title_asc") => SortOrder::TitleAsc,
            Some("created_desc") => SortOrder::CreatedDesc,
            Some("priority_desc") => SortOrder::PriorityDesc,
            Some("priority_asc") => SortOrder::PriorityAsc,
            _ => SortOrder::default(),
        }
    }
}

/// Fixed priority ranking; unrecognized values rank below Low.
pub fn priority_rank(priority: &str) -> u8 {
    match priority {
        "High" => 3,
        "Medium" => 2,
        "Low" => 1,
        _ => 0,
    }
}

/// Produce a filtered, reordered copy of `tasks`; the input is left untouched.
pub fn apply_view(tasks: &[Task], search: Option<&str>, order: SortOrder) -> Vec<Task> {
    let mut view: Vec<Task> = match search.map(str::trim).filter(|q| !q.is_empty()) {
        Some(query) => {
            let query = query.to_lowercase();
            tasks
                .iter()
                .filter(|t| matches_query(t, &query))
                .cloned()
                .collect()
        }
        None => tasks.to_vec(),
    };
    sort_tasks(&mut view, order);
    view
}

/// Case-insensitive substring match on title or description.
fn matches_query(task: &Task, query: &str) -> bool {
    task.title.to_lowercase().contains(query)
        || task
            .description
            .as_ref()
            .map_or(false, |d| d.to_lowercase().contains(query))
}

pub fn sort_tasks(tasks: &mut [Task], order: SortOrder) {
    use std::cmp::Reverse;

    match order {
        SortOrder::DeadlineAsc => tasks.sort_by_key(deadline_millis),
        SortOrder::DeadlineDesc => tasks.sort_by_key(|t| Reverse(deadline_millis(t))),
        SortOrder::TitleAsc => tasks.sort_by(|a, b| a.title.cmp(&b.title)),
        SortOrder::CreatedDesc => {
            tasks.sort_by_key(|t| Reverse(t.created_at.timestamp_millis()))
        }
        SortOrder::PriorityDesc => tasks.sort_by_key(|t| Reverse(priority_rank(&t.priority))),
        SortOrder::PriorityAsc => tasks.sort_by_key(|t| priority_rank(&t.priority)),
    }
}

/// Missing deadlines sort as the epoch.
fn deadline_millis(task: &Task) -> i64 {
    task.deadline.map_or(0, |d| d.timestamp_millis())
}

/// Badge classification for open tasks: past due, or due sometime today.
/// Done tasks never carry a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DeadlineFlag {
    Overdue,
    DueToday,
}

pub fn deadline_flag(task: &Task, today: NaiveDate) -> Option<DeadlineFlag> {
    if task.is_done() {
        return None;
    }
    let due = task.deadline?.date_naive();
    if due < today {
        Some(DeadlineFlag::Overdue)
    } else if due == today {
        Some(DeadlineFlag::DueToday)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::task_models::{TaskPriority, TaskStatus};
    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    fn task(title: &str, deadline_ms: Option<i64>, priority: &str, created_ms: i64) -> Task {
        Task {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: title.to_string(),
            description: None,
            status: TaskStatus::NotDone.as_str().to_string(),
            priority: priority.to_string(),
            deadline: deadline_ms.map(|ms| DateTime::from_timestamp_millis(ms).unwrap()),
            category_id: None,
            attachment_url: None,
            created_at: DateTime::from_timestamp_millis(created_ms).unwrap(),
            updated_at: DateTime::from_timestamp_millis(created_ms).unwrap(),
        }
    }

    fn titles(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn deadline_asc_orders_by_deadline() {
        let tasks = vec![
            task("a", Some(300), "Low", 0),
            task("b", Some(100), "Low", 0),
            task("c", Some(200), "Low", 0),
        ];
        let view = apply_view(&tasks, None, SortOrder::DeadlineAsc);
        assert_eq!(titles(&view), ["b", "c", "a"]);
    }

    #[test]
    fn deadline_desc_is_exact_reverse_of_asc() {
        let tasks = vec![
            task("a", Some(5_000), "Low", 0),
            task("b", Some(1_000), "Low", 0),
            task("c", Some(9_000), "Low", 0),
            task("d", Some(3_000), "Low", 0),
        ];
        let asc = apply_view(&tasks, None, SortOrder::DeadlineAsc);
        let mut desc = apply_view(&tasks, None, SortOrder::DeadlineDesc);
        desc.reverse();
        assert_eq!(titles(&asc), titles(&desc));
    }

    #[test]
    fn missing_deadline_sorts_as_epoch() {
        let tasks = vec![
            task("a", Some(100), "Low", 0),
            task("b", None, "Low", 0),
        ];
        let view = apply_view(&tasks, None, SortOrder::DeadlineAsc);
        assert_eq!(titles(&view), ["b", "a"]);
    }

    #[test]
    fn title_asc_is_lexicographic() {
        let tasks = vec![
            task("pear", None, "Low", 0),
            task("apple", None, "Low", 0),
            task("mango", None, "Low", 0),
        ];
        let view = apply_view(&tasks, None, SortOrder::TitleAsc);
        assert_eq!(titles(&view), ["apple", "mango", "pear"]);
    }

    #[test]
    fn created_desc_puts_newest_first() {
        let tasks = vec![
            task("old", None, "Low", 100),
            task("new", None, "Low", 300),
            task("mid", None, "Low", 200),
        ];
        let view = apply_view(&tasks, None, SortOrder::CreatedDesc);
        assert_eq!(titles(&view), ["new", "mid", "old"]);
    }

    #[test]
    fn priority_desc_is_stable_on_ties() {
        let tasks = vec![
            task("a", None, "Low", 0),
            task("b", None, "High", 0),
            task("c", None, "Medium", 0),
            task("d", None, "High", 0),
        ];
        let view = apply_view(&tasks, None, SortOrder::PriorityDesc);
        assert_eq!(titles(&view), ["b", "d", "c", "a"]);
    }

    #[test]
    fn unknown_priority_ranks_last_in_desc() {
        assert_eq!(priority_rank(TaskPriority::High.as_str()), 3);
        assert_eq!(priority_rank(TaskPriority::Medium.as_str()), 2);
        assert_eq!(priority_rank(TaskPriority::Low.as_str()), 1);
        assert_eq!(priority_rank("Whatever"), 0);

        let tasks = vec![
            task("odd", None, "Whatever", 0),
            task("low", None, "Low", 0),
        ];
        let view = apply_view(&tasks, None, SortOrder::PriorityDesc);
        assert_eq!(titles(&view), ["low", "odd"]);
    }

    #[test]
    fn unrecognized_selector_falls_back_to_deadline_asc() {
        assert_eq!(SortOrder::parse(Some("definitely_not_a_key")), SortOrder::DeadlineAsc);
        assert_eq!(SortOrder::parse(None), SortOrder::DeadlineAsc);
        assert_eq!(SortOrder::parse(Some("priority_asc")), SortOrder::PriorityAsc);
    }

    #[test]
    fn search_is_case_insensitive_on_title_and_description() {
        let mut with_desc = task("groceries", None, "Low", 0);
        with_desc.description = Some("Buy MILK and eggs".to_string());
        let tasks = vec![with_desc, task("Call Dentist", None, "Low", 0)];

        let by_title = apply_view(&tasks, Some("dentist"), SortOrder::TitleAsc);
        assert_eq!(titles(&by_title), ["Call Dentist"]);

        let by_desc = apply_view(&tasks, Some("milk"), SortOrder::TitleAsc);
        assert_eq!(titles(&by_desc), ["groceries"]);

        let no_match = apply_view(&tasks, Some("xylophone"), SortOrder::TitleAsc);
        assert!(no_match.is_empty());
    }

    #[test]
    fn blank_search_matches_everything() {
        let tasks = vec![task("a", None, "Low", 0), task("b", None, "Low", 0)];
        let view = apply_view(&tasks, Some("   "), SortOrder::TitleAsc);
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn input_list_is_left_untouched() {
        let tasks = vec![
            task("a", Some(300), "Low", 0),
            task("b", Some(100), "Low", 0),
        ];
        let before = titles(&tasks);
        let _ = apply_view(&tasks, Some("a"), SortOrder::DeadlineAsc);
        assert_eq!(titles(&tasks), before);
    }

    #[test]
    fn deadline_flags_classify_open_tasks() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();

        let overdue = task("late", Some(0), "Low", 0);
        assert_eq!(deadline_flag(&overdue, today), Some(DeadlineFlag::Overdue));

        let due = task(
            "today",
            Some("2026-08-06T15:00:00Z".parse::<DateTime<Utc>>().unwrap().timestamp_millis()),
            "Low",
            0,
        );
        assert_eq!(deadline_flag(&due, today), Some(DeadlineFlag::DueToday));

        let future = task(
            "later",
            Some("2026-09-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap().timestamp_millis()),
            "Low",
            0,
        );
        assert_eq!(deadline_flag(&future, today), None);

        let mut done = task("finished", Some(0), "Low", 0);
        done.status = TaskStatus::Done.as_str().to_string();
        assert_eq!(deadline_flag(&done, today), None);

        let undated = task("no deadline", None, "Low", 0);
        assert_eq!(deadline_flag(&undated, today), None);
    }
}
