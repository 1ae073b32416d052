use crate::db::tasks::TaskRepository;
use crate::libs::messages::Message;
use crate::libs::task::{parse_due_date, Priority, UpdateRequest};
use crate::{msg_info, msg_success};
use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args;

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Task id
    id: i64,
    /// New title
    #[arg(short, long)]
    title: Option<String>,
    /// New description
    #[arg(short, long)]
    description: Option<String>,
    /// New priority: low, medium or high
    #[arg(short, long)]
    priority: Option<Priority>,
    /// New due date: RFC 3339, "YYYY-MM-DD HH:MM" or "YYYY-MM-DD" (local time)
    #[arg(long, value_parser = parse_due_date, conflicts_with = "no_due")]
    due: Option<DateTime<Utc>>,
    /// Remove the due date
    #[arg(long)]
    no_due: bool,
}

impl EditArgs {
    fn has_changes(&self) -> bool {
        self.title.is_some() || self.description.is_some() || self.priority.is_some() || self.due.is_some() || self.no_due
    }

    /// Applies the given fields over `request`, leaving the rest as stored.
    fn apply(self, mut request: UpdateRequest) -> UpdateRequest {
        if let Some(title) = self.title {
            request.title = title;
        }
        if let Some(description) = self.description {
            request.description = description;
        }
        if let Some(priority) = self.priority {
            request.priority = Some(priority);
        }
        if self.no_due {
            request.due_at = None;
        } else if let Some(due) = self.due {
            request.due_at = Some(due);
        }
        request
    }
}

pub fn cmd(tasks: &TaskRepository, args: EditArgs) -> Result<()> {
    let current = tasks.get(args.id)?;

    if !args.has_changes() {
        msg_info!(Message::NoChangesDetected);
        return Ok(());
    }

    let request = args.apply(UpdateRequest::from_task(&current));
    let task = tasks.update(&request)?;

    msg_success!(Message::TaskUpdated(task.id));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn args() -> EditArgs {
        EditArgs {
            id: 1,
            title: None,
            description: None,
            priority: None,
            due: None,
            no_due: false,
        }
    }

    fn request() -> UpdateRequest {
        UpdateRequest::new(1, "Write spec")
            .description("draft")
            .priority(Priority::High)
            .due_at(Some(Utc.with_ymd_and_hms(2026, 6, 10, 9, 0, 0).unwrap()))
    }

    #[test]
    fn untouched_fields_keep_stored_values() {
        let edit = EditArgs {
            title: Some("Write the draft".into()),
            ..args()
        };
        let updated = edit.apply(request());
        assert_eq!(updated.title, "Write the draft");
        assert_eq!(updated.description, "draft");
        assert_eq!(updated.priority, Some(Priority::High));
        assert!(updated.due_at.is_some());
    }

    #[test]
    fn no_due_clears_the_deadline() {
        let edit = EditArgs { no_due: true, ..args() };
        assert!(edit.has_changes());
        assert_eq!(edit.apply(request()).due_at, None);
    }

    #[test]
    fn no_flags_means_no_changes() {
        assert!(!args().has_changes());
    }
}
