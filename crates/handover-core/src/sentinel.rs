/// Reserved token appended as the final argument when the updater relaunches
/// the managed executable. Must stay stable across versions.
pub const UPDATED_SIGN: &str = "UPDATEDSIGN";

/// True when an invocation is the relaunch performed after a completed
/// update. Only the last argument is consulted; the sentinel anywhere else
/// is treated as an ordinary application argument.
pub fn is_post_update_invocation(arguments: &[String]) -> bool {
    arguments.last().map(String::as_str) == Some(UPDATED_SIGN)
}
