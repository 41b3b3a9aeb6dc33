use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    Success,
    Error,
}

/// One user-facing alert. Produced by an action running under the guard,
/// consumed exactly once when the loader is hidden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub detail: String,
}

impl Notification {
    pub fn success(title: &str, detail: &str) -> Notification {
        Notification {
            kind: NotificationKind::Success,
            title: title.to_string(),
            detail: detail.to_string(),
        }
    }

    pub fn error(title: &str, detail: &str) -> Notification {
        Notification {
            kind: NotificationKind::Error,
            title: title.to_string(),
            detail: detail.to_string(),
        }
    }
}

/// Display collaborator. The core never renders anything itself; it hands
/// finished notifications to whatever the host wires in.
pub trait NotificationSink: Send + Sync {
    fn show(&self, notification: &Notification);
}

/// Plain-text sink for the CLI driver.
pub struct TerminalNotifier;

impl NotificationSink for TerminalNotifier {
    fn show(&self, notification: &Notification) {
        let mark = match notification.kind {
            NotificationKind::Success => "✔",
            NotificationKind::Error => "✖",
        };
        if notification.detail.is_empty() {
            println!("{} {}", mark, notification.title);
        } else {
            println!("{} {}: {}", mark, notification.title, notification.detail);
        }
    }
}
