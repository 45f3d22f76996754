//! Human readable notification content shared by the remote backends

use serde::Serialize;

/// Title and body describing a finished command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationMessage {
    pub title: String,
    pub body: String,
}

impl NotificationMessage {
    pub fn success(command: &str) -> Self {
        Self {
            title: "Command executed successfully".to_string(),
            body: format!("Command `{command}` is terminated"),
        }
    }

    pub fn failure(command: &str, exit_code: i32) -> Self {
        Self {
            title: "Command failed".to_string(),
            body: format!("Command `{command}` failed with error no {exit_code}"),
        }
    }
}
