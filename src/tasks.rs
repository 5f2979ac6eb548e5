//! Daily tasks and recurring templates.
//!
//! A template is cloned into a day's list the first time that day is loaded
//! after the template exists. `applied` records which templates a day has
//! already received, so deleting a clone does not bring it back.

use crate::date::date_key;
use crate::errors::ValidationError;
use crate::records::{find, find_mut, new_id, percentage, remove, require, Record};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

pub const TASK_CATEGORIES: [&str; 9] = [
    "Prayer",
    "Exercise",
    "Study",
    "Food",
    "Vocabulary",
    "Work",
    "Personal",
    "Health",
    "Other",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
}

impl Record for Task {
    const KIND: &'static str = "task";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Template {
    pub id: String,
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
}

impl Record for Template {
    const KIND: &'static str = "recurring template";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Template {
    fn instantiate(&self, date: NaiveDate) -> Task {
        Task {
            id: format!("{}-{}", self.id, date_key(date)),
            title: self.title.clone(),
            category: self.category.clone(),
            description: self.description.clone(),
            is_completed: false,
            is_recurring: true,
            template_id: Some(self.id.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TaskForm {
    pub title: String,
    pub category: String,
    pub description: String,
    pub is_recurring: bool,
}

impl TaskForm {
    fn validate(&self) -> Result<(), ValidationError> {
        require("title", &self.title)?;
        require("category", &self.category)?;
        if !TASK_CATEGORIES.contains(&self.category.trim()) {
            return Err(ValidationError::UnknownOption {
                field: "category",
                value: self.category.clone(),
            });
        }
        Ok(())
    }

    fn template(&self, id: String) -> Template {
        Template {
            id,
            title: self.title.trim().to_string(),
            category: self.category.trim().to_string(),
            description: self.description.trim().to_string(),
        }
    }
}

/// Mutable view over one day's tasks plus the global templates.
pub struct TaskBoard<'a> {
    pub date: NaiveDate,
    pub tasks: &'a mut Vec<Task>,
    pub applied: &'a mut BTreeSet<String>,
    pub templates: &'a mut Vec<Template>,
}

impl TaskBoard<'_> {
    /// Clones every template this day has not seen yet. Returns how many were added.
    pub fn apply_templates(&mut self) -> usize {
        let mut added = 0;
        for template in self.templates.iter() {
            if self.applied.insert(template.id.clone()) {
                self.tasks.push(template.instantiate(self.date));
                added += 1;
            }
        }
        if added > 0 {
            debug!("applied {added} recurring tasks to {}", self.date);
        }
        added
    }

    pub fn create(&mut self, form: TaskForm) -> Result<Task, ValidationError> {
        form.validate()?;
        let template_id = form.is_recurring.then(|| self.add_template(&form));
        let task = Task {
            id: new_id(),
            title: form.title.trim().to_string(),
            category: form.category.trim().to_string(),
            description: form.description.trim().to_string(),
            is_completed: false,
            is_recurring: form.is_recurring,
            template_id,
        };
        self.tasks.push(task.clone());
        Ok(task)
    }

    /// Replaces a task's text, keeping its completion state and syncing its template.
    pub fn edit(&mut self, id: &str, form: TaskForm) -> Result<Task, ValidationError> {
        let existing = find(self.tasks.as_slice(), id)?.clone();
        form.validate()?;

        let template_id = match (existing.is_recurring, form.is_recurring) {
            (false, true) => Some(self.add_template(&form)),
            (true, false) => {
                self.drop_template(existing.template_id.as_deref());
                None
            }
            (true, true) => match existing.template_id {
                Some(template_id) => {
                    if let Ok(template) = find_mut(self.templates.as_mut_slice(), &template_id) {
                        *template = form.template(template_id.clone());
                    }
                    Some(template_id)
                }
                None => Some(self.add_template(&form)),
            },
            (false, false) => None,
        };

        let task = find_mut(self.tasks.as_mut_slice(), id)?;
        task.title = form.title.trim().to_string();
        task.category = form.category.trim().to_string();
        task.description = form.description.trim().to_string();
        task.is_recurring = form.is_recurring;
        task.template_id = template_id;
        Ok(task.clone())
    }

    pub fn toggle(&mut self, id: &str) -> Result<Task, ValidationError> {
        let task = find_mut(self.tasks.as_mut_slice(), id)?;
        task.is_completed = !task.is_completed;
        Ok(task.clone())
    }

    /// Deleting a recurring task also stops its template from reaching later days.
    pub fn delete(&mut self, id: &str) -> Result<Task, ValidationError> {
        let task = remove(&mut *self.tasks, id)?;
        if task.is_recurring {
            self.drop_template(task.template_id.as_deref());
        }
        Ok(task)
    }

    fn add_template(&mut self, form: &TaskForm) -> String {
        let template = form.template(new_id());
        let id = template.id.clone();
        self.applied.insert(id.clone());
        self.templates.push(template);
        id
    }

    fn drop_template(&mut self, template_id: Option<&str>) {
        if let Some(template_id) = template_id {
            if remove(&mut *self.templates, template_id).is_ok() {
                debug!("removed recurring template {template_id}");
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct CompletionStats {
    pub total: usize,
    pub completed: usize,
    pub percentage: u32,
}

pub fn completion_stats(tasks: &[Task]) -> CompletionStats {
    let completed = tasks.iter().filter(|t| t.is_completed).count();
    CompletionStats {
        total: tasks.len(),
        completed,
        percentage: percentage(completed, tasks.len()),
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct CategoryStats {
    pub total: usize,
    pub completed: usize,
}

pub fn by_category(tasks: &[Task]) -> BTreeMap<String, CategoryStats> {
    let mut stats: BTreeMap<String, CategoryStats> = BTreeMap::new();
    for task in tasks {
        let entry = stats.entry(task.category.clone()).or_default();
        entry.total += 1;
        if task.is_completed {
            entry.completed += 1;
        }
    }
    stats
}

#[derive(Debug, Serialize)]
pub struct TaskSummary {
    pub date: String,
    pub tasks: Vec<Task>,
    pub stats: CompletionStats,
    pub categories: BTreeMap<String, CategoryStats>,
}

pub fn summarize(date: String, tasks: &[Task]) -> TaskSummary {
    TaskSummary {
        date,
        stats: completion_stats(tasks),
        categories: by_category(tasks),
        tasks: tasks.to_vec(),
    }
}
