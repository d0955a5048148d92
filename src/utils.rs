use directories::ProjectDirs;
use std::path::PathBuf;

/// Profile mode for the application (dev or prod), selected by the --dev
/// CLI flag. Dev keeps its own config and log directories so it never
/// touches a real setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Dev,
    Prod,
}

impl Profile {
    fn app_name(self) -> &'static str {
        match self {
            Profile::Dev => "taskboard-dev",
            Profile::Prod => "taskboard",
        }
    }
}

/// Configuration directory for the given profile
pub fn get_config_dir(profile: Profile) -> Option<PathBuf> {
    ProjectDirs::from("com", "taskboard", profile.app_name())
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Data directory for the given profile (log files live here)
pub fn get_data_dir(profile: Profile) -> Option<PathBuf> {
    ProjectDirs::from("com", "taskboard", profile.app_name())
        .map(|dirs| dirs.data_dir().to_path_buf())
}

/// Parse a date string in ISO 8601 format (YYYY-MM-DD)
pub fn parse_date(date_str: &str) -> Result<chrono::NaiveDate, chrono::ParseError> {
    chrono::NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
}

/// Today's date as an ISO 8601 string (YYYY-MM-DD)
pub fn today_string() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

/// Long-form date for the dashboard header, e.g. "Tuesday, August 25, 2026"
pub fn today_long() -> String {
    chrono::Local::now().format("%A, %B %-d, %Y").to_string()
}
