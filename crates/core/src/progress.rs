//! Board completion percentage.
//!
//! Progress is structural: it counts cards physically sitting in a list
//! whose trimmed, case-insensitive name is `"done"`, against all cards on
//! the board. A board with no list named "done" reports 0 no matter how
//! many tasks are ticked off. Callers recompute from live rows on every
//! read -- the cached `progress` column on boards is refreshed, never
//! trusted.

/// Whether a list counts as the board's "done" column.
pub fn is_done_list(name: &str) -> bool {
    name.trim().eq_ignore_ascii_case("done")
}

/// Completion percentage from per-list `(name, card_count)` pairs.
///
/// `round(done / total * 100)` with round-half-up; 0 for an empty board.
pub fn board_progress<S: AsRef<str>>(lists: &[(S, i64)]) -> i64 {
    let total: i64 = lists.iter().map(|(_, n)| n).sum();
    if total == 0 {
        return 0;
    }
    let done: i64 = lists
        .iter()
        .filter(|(name, _)| is_done_list(name.as_ref()))
        .map(|(_, n)| n)
        .sum();
    ((done as f64 / total as f64) * 100.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn done_list_name_matching_is_trimmed_and_case_insensitive() {
        assert!(is_done_list("done"));
        assert!(is_done_list("Done"));
        assert!(is_done_list("  DONE "));
        assert!(!is_done_list("done!"));
        assert!(!is_done_list("In-progress"));
    }

    #[test]
    fn empty_board_is_zero() {
        assert_eq!(board_progress::<&str>(&[]), 0);
        assert_eq!(board_progress(&[("To-do", 0), ("Done", 0)]), 0);
    }

    #[test]
    fn one_of_four_cards_done_is_25() {
        let lists = [("To-do", 2), ("Doing", 1), ("Done", 1)];
        assert_eq!(board_progress(&lists), 25);
    }

    #[test]
    fn all_cards_done_is_100() {
        assert_eq!(board_progress(&[("To-do", 0), ("Done", 5)]), 100);
    }

    #[test]
    fn rounds_half_up() {
        // 1/8 = 12.5% -> 13.
        assert_eq!(board_progress(&[("To-do", 7), ("Done", 1)]), 13);
        // 1/3 = 33.33% -> 33.
        assert_eq!(board_progress(&[("To-do", 2), ("Done", 1)]), 33);
        // 2/3 = 66.67% -> 67.
        assert_eq!(board_progress(&[("To-do", 1), ("Done", 2)]), 67);
    }

    #[test]
    fn no_done_named_list_is_zero() {
        assert_eq!(board_progress(&[("Backlog", 3), ("Shipped", 4)]), 0);
    }

    #[test]
    fn deterministic_on_unchanged_input() {
        let lists = [("To-do", 3), ("Done", 2)];
        assert_eq!(board_progress(&lists), board_progress(&lists));
    }
}
