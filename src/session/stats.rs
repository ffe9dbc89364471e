use crate::session::state::TestSession;

/// Integer words per minute, truncating. Uses the live word index, which in
/// time-limited mode wraps with the prompt, matching what the counter on
/// screen shows mid-test.
pub fn wpm(session: &TestSession) -> u32 {
    if session.elapsed_secs == 0 {
        return 0;
    }
    let minutes = f64::from(session.elapsed_secs) / 60.0;
    (session.word_index as f64 / minutes) as u32
}

pub fn accuracy_percent(session: &TestSession) -> f64 {
    if session.total_typed_chars == 0 {
        return 0.0;
    }
    let accuracy =
        100.0 * session.total_correct_chars as f64 / session.total_typed_chars as f64;
    accuracy.min(100.0)
}

pub fn error_rate_percent(session: &TestSession) -> f64 {
    if session.total_typed_chars == 0 {
        return 0.0;
    }
    100.0 * (session.total_typed_chars - session.total_correct_chars) as f64
        / session.total_typed_chars as f64
}

pub fn average_time_per_word(session: &TestSession) -> f64 {
    if session.word_index == 0 {
        return 0.0;
    }
    f64::from(session.elapsed_secs) / session.word_index as f64
}

/// The n most mistyped target characters, highest count first, ties broken
/// by character so the ordering is reproducible.
pub fn top_error_chars(session: &TestSession, n: usize) -> Vec<(char, u32)> {
    let mut entries: Vec<(char, u32)> = session
        .char_errors
        .iter()
        .map(|(&ch, &count)| (ch, count))
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    entries.truncate(n);
    entries
}

/// Mean of the per-word completion times, 0 when no word was fully correct.
pub fn average_word_time(session: &TestSession) -> f64 {
    if session.word_times.is_empty() {
        return 0.0;
    }
    session.word_times.iter().sum::<u32>() as f64 / session.word_times.len() as f64
}

/// m:ss clock string for status lines.
pub fn format_clock(total_secs: u32) -> String {
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}
