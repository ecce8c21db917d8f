/// Validate a user ID before it is used as the first segment of object keys:
/// - non-empty, at most 128 bytes
/// - no surrounding whitespace, path separators or control characters
/// - not `.` or `..`
pub fn validate_user_id(user_id: &str) -> Result<(), &'static str> {
    if user_id.is_empty() {
        return Err("userId must not be empty");
    }
    if user_id.trim() != user_id {
        return Err("userId cannot have leading or trailing whitespace");
    }
    if user_id.len() > 128 {
        return Err("userId must be at most 128 bytes");
    }
    if user_id.contains(['/', '\\']) {
        return Err("userId cannot contain path separators");
    }
    if user_id.chars().any(char::is_control) {
        return Err("userId cannot contain control characters");
    }
    if user_id == "." || user_id == ".." {
        return Err("userId cannot be a relative path");
    }
    Ok(())
}
