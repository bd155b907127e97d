//! Decomposition of a task's duration into focus-sized chunks.

/// Split `total_minutes` into chunks of at most `focus_minutes`.
///
/// Full focus-length chunks come first, followed by the remainder if any.
/// A zero total yields no chunks; a zero focus length yields one chunk.
pub fn split_duration(total_minutes: u32, focus_minutes: u32) -> Vec<u32> {
    if total_minutes == 0 {
        return Vec::new();
    }
    if focus_minutes == 0 || total_minutes <= focus_minutes {
        return vec![total_minutes];
    }

    let full_chunks = (total_minutes / focus_minutes) as usize;
    let remainder = total_minutes % focus_minutes;

    let mut chunks = vec![focus_minutes; full_chunks];
    if remainder > 0 {
        chunks.push(remainder);
    }
    chunks
}
