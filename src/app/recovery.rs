use super::state::ErrorSeverity;

pub fn classify(msg: &str) -> ErrorSeverity {
    let msg_lower = msg.to_lowercase();
    if msg_lower.contains("panicked") {
        ErrorSeverity::Critical
    } else if msg_lower.contains("unavailable")
        || msg_lower.contains("offline")
        || msg_lower.contains("timed out")
    {
        ErrorSeverity::Warning
    } else {
        ErrorSeverity::Error
    }
}

pub fn get_suggestions(msg: &str) -> Vec<String> {
    let mut suggestions = Vec::new();
    let msg_lower = msg.to_lowercase();

    if msg_lower.contains("unavailable") || msg_lower.contains("offline") {
        suggestions.push("The service is down; try again in a moment".to_string());
    }

    if msg_lower.contains("feed") || msg_lower.contains("lines") {
        suggestions.push("Try running: Refresh Odds".to_string());
    }

    if msg_lower.contains("balance") || msg_lower.contains("insufficient") {
        suggestions.push("Try running: Check Balance".to_string());
    }

    if msg_lower.contains("panicked") {
        suggestions.push("This is a bug in the command; check the log file".to_string());
    }

    suggestions
}
