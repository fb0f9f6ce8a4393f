/// Derives the session identifier handed back by session start.
///
/// Deterministic: the same participant and start second always produce the
/// same identifier. Sessions are never stored server-side, so the identifier
/// is the only thing tying a participant's submissions together.
pub fn session_id(participant_id: &str, epoch_seconds: i64) -> String {
    format!("session_{participant_id}_{epoch_seconds}")
}
