//! Task list filtering, ordering, and completion metrics.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::model::Task;

/// Which tasks to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskFilter {
    All,
    Active,
    Completed,
}

/// Sort key for task lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskSort {
    Priority,
    DueDate,
    Created,
}

/// Filter tasks, preserving input order. `Active` and `Completed` partition
/// the input; `All` is the identity.
pub fn filter_tasks<'a, I>(tasks: I, filter: TaskFilter) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    tasks
        .into_iter()
        .filter(|t| match filter {
            TaskFilter::All => true,
            TaskFilter::Active => !t.completed,
            TaskFilter::Completed => t.completed,
        })
        .collect()
}

/// Sort tasks by the given key. The sort is stable, so equal keys keep
/// input order.
///
/// - `Priority`: high before medium before low
/// - `DueDate`: ascending, tasks without a due date last
/// - `Created`: newest first
pub fn sort_tasks<'a, I>(tasks: I, key: TaskSort) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut out: Vec<&Task> = tasks.into_iter().collect();
    match key {
        TaskSort::Priority => out.sort_by_key(|t| t.priority.rank()),
        TaskSort::DueDate => out.sort_by(|a, b| match (a.due_date, b.due_date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }),
        TaskSort::Created => out.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }
    out
}

/// Percentage of tasks marked done, 0 for an empty list. Not rounded.
pub fn completion_rate(tasks: &[Task]) -> f64 {
    if tasks.is_empty() {
        return 0.0;
    }
    let completed = tasks.iter().filter(|t| t.completed).count();
    completed as f64 / tasks.len() as f64 * 100.0
}
