use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::api::{ApiClient, ApiError};
use crate::models::{NewTask, Priority, Status, StatusPatch};
use crate::utils::parse_date;

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(about = "Task board for a remote task store - interactive TUI and quick commands")]
#[command(version)]
pub struct Cli {
    /// Use development mode (separate dev config and logs)
    #[arg(long)]
    pub dev: bool,

    /// Override the task store base URL from the config file
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch interactive TUI (default if no subcommand)
    Tui,
    /// Quickly create a task
    Add {
        /// Task title
        title: String,
        /// Task description
        #[arg(long)]
        description: String,
        /// Due date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Priority: low, normal or high
        #[arg(long, default_value = "normal")]
        priority: String,
    },
    /// List all tasks with their status
    List,
    /// Mark a task as in progress
    Start {
        /// Task id
        id: String,
    },
    /// Mark a task as completed
    Complete {
        /// Task id
        id: String,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Task store error: {0}")]
    ApiError(#[from] ApiError),
    #[error("Failed to parse date: {0}")]
    DateParseError(String),
    #[error("Unknown priority '{0}' (expected low, normal or high)")]
    UnknownPriority(String),
}

fn parse_priority(value: &str) -> Result<Priority, CliError> {
    match value {
        "low" => Ok(Priority::Low),
        "normal" => Ok(Priority::Normal),
        "high" => Ok(Priority::High),
        other => Err(CliError::UnknownPriority(other.to_string())),
    }
}

/// Handle the add command
pub async fn handle_add(
    title: String,
    description: String,
    date: Option<String>,
    priority: String,
    client: &ApiClient,
) -> Result<(), CliError> {
    let date = match date {
        Some(date_str) => {
            parse_date(&date_str).map_err(|e| {
                CliError::DateParseError(format!("Invalid date '{}': {}", date_str, e))
            })?;
            date_str
        }
        None => crate::utils::today_string(),
    };

    let task = NewTask {
        title,
        description,
        date,
        status: Status::Todo,
        priority: parse_priority(&priority)?,
    };

    client.create_task(&task).await?;
    println!("Task created successfully");
    Ok(())
}

/// Handle the list command
pub async fn handle_list(client: &ApiClient) -> Result<(), CliError> {
    let tasks = client.list_tasks().await?;

    if tasks.is_empty() {
        println!("No tasks yet. Create one with `taskboard add`.");
        return Ok(());
    }

    for task in &tasks {
        let marker = match task.status {
            Status::Todo => "[ ]",
            Status::InProgress => "[~]",
            Status::Completed => "[x]",
        };
        println!(
            "{} {:<12} {:<8} {} - {}",
            marker, task.id, task.priority.as_str(), task.date, task.title
        );
    }

    let count = |status| tasks.iter().filter(|t| t.status == status).count();
    println!(
        "\n{} todo, {} in progress, {} completed",
        count(Status::Todo),
        count(Status::InProgress),
        count(Status::Completed)
    );
    Ok(())
}

/// Handle the start / complete commands
pub async fn handle_set_status(
    id: String,
    status: Status,
    client: &ApiClient,
) -> Result<(), CliError> {
    client.update_status(&StatusPatch { id, status }).await?;
    println!("Task marked {}", status.as_str());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_strings_match_the_wire() {
        assert_eq!(parse_priority("low").unwrap(), Priority::Low);
        assert_eq!(parse_priority("normal").unwrap(), Priority::Normal);
        assert_eq!(parse_priority("high").unwrap(), Priority::High);
        assert!(parse_priority("urgent").is_err());
    }
}
