//! Run-length compression of move lists into readable summaries.

use crate::state::Action;

/// Collapses consecutive equal items into `(item, count)` runs.
pub fn run_lengths<T: PartialEq + Copy>(items: &[T]) -> Vec<(T, usize)> {
    let mut runs: Vec<(T, usize)> = Vec::new();
    for &item in items {
        match runs.last_mut() {
            Some((current, count)) if *current == item => *count += 1,
            _ => runs.push((item, 1)),
        }
    }
    runs
}

/// Compresses a roll sequence into labels such as `"C2 left 3 times"`.
///
/// With a single cuboid the `C<id>` prefix is dropped.
pub fn compress_actions(actions: &[Action], cuboid_count: usize) -> Vec<String> {
    let show_cuboid_id = cuboid_count > 1;

    run_lengths(actions)
        .into_iter()
        .map(|(action, count)| {
            let label = if show_cuboid_id {
                action.to_string()
            } else {
                action.direction.to_string()
            };
            if count == 1 {
                label
            } else {
                format!("{label} {count} times")
            }
        })
        .collect()
}
