//! Dense position planning for sibling lists and cards.
//!
//! Positions are 0-based and contiguous among siblings: after any mutation
//! the multiset of positions under one parent must equal `{0,...,count-1}`.
//! The functions here only *plan* -- they take the current ordering and
//! return the new ordering or the minimal set of position writes. Applying
//! the writes inside a transaction is the repository layer's job.

use crate::types::DbId;

/// Reorder `ids` by removing `from` and reinserting it at the index
/// currently occupied by `to` (array splice semantics: intervening
/// siblings shift by one).
///
/// Returns the new ordering, or `Err` with the offending id when `from` or
/// `to` is not among `ids` -- an unknown sibling is an error the caller
/// surfaces as not-found, never a silent no-op. Moving an entity onto
/// itself yields the input order unchanged.
pub fn reorder(ids: &[DbId], from: DbId, to: DbId) -> Result<Vec<DbId>, DbId> {
    let from_idx = ids.iter().position(|&id| id == from).ok_or(from)?;
    let to_idx = ids.iter().position(|&id| id == to).ok_or(to)?;

    let mut order = ids.to_vec();
    let moved = order.remove(from_idx);
    order.insert(to_idx, moved);
    Ok(order)
}

/// Given siblings in their intended order, paired with their currently
/// stored positions, return `(id, new_position)` for every sibling whose
/// stored position differs from its array index.
///
/// An empty slice plans no writes, so re-densifying after the last sibling
/// was deleted is a no-op.
pub fn reindex(rows: &[(DbId, i64)]) -> Vec<(DbId, i64)> {
    rows.iter()
        .enumerate()
        .filter(|(idx, (_, stored))| *stored != *idx as i64)
        .map(|(idx, (id, _))| (*id, idx as i64))
        .collect()
}

/// Clamp a caller-supplied destination index for a cross-parent move.
///
/// `len` is the destination sibling count *before* insertion. An absent,
/// negative, or past-the-end request appends.
pub fn clamp_insert_index(len: usize, requested: Option<i64>) -> usize {
    match requested {
        Some(idx) if idx >= 0 && (idx as usize) < len => idx as usize,
        _ => len,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reorder_moves_tail_to_front() {
        // Moving index 2 to index 0 on three siblings yields
        // [old2, old0, old1].
        let order = reorder(&[10, 11, 12], 12, 10).unwrap();
        assert_eq!(order, vec![12, 10, 11]);
    }

    #[test]
    fn reorder_moves_front_to_tail() {
        let order = reorder(&[10, 11, 12], 10, 12).unwrap();
        assert_eq!(order, vec![11, 12, 10]);
    }

    #[test]
    fn reorder_adjacent_swap() {
        let order = reorder(&[1, 2, 3, 4], 2, 3).unwrap();
        assert_eq!(order, vec![1, 3, 2, 4]);
    }

    #[test]
    fn reorder_onto_itself_is_identity() {
        let order = reorder(&[1, 2, 3], 2, 2).unwrap();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn reorder_reports_unknown_from() {
        assert_eq!(reorder(&[1, 2, 3], 99, 1).unwrap_err(), 99);
    }

    #[test]
    fn reorder_reports_unknown_to() {
        assert_eq!(reorder(&[1, 2, 3], 1, 99).unwrap_err(), 99);
    }

    #[test]
    fn reindex_plans_only_changed_rows() {
        // Row 7 already sits at its index; rows 8 and 9 moved up after a
        // deletion at the former position 1.
        let writes = reindex(&[(7, 0), (8, 2), (9, 3)]);
        assert_eq!(writes, vec![(8, 1), (9, 2)]);
    }

    #[test]
    fn reindex_of_dense_sequence_is_empty() {
        assert!(reindex(&[(1, 0), (2, 1), (3, 2)]).is_empty());
    }

    #[test]
    fn reindex_of_empty_sequence_is_empty() {
        assert!(reindex(&[]).is_empty());
    }

    #[test]
    fn reindex_result_is_dense_after_applying() {
        let rows = [(4, 5), (2, 7), (9, 8)];
        let mut positions: Vec<i64> = rows.iter().map(|&(_, p)| p).collect();
        for (id, new_pos) in reindex(&rows) {
            let idx = rows.iter().position(|&(i, _)| i == id).unwrap();
            positions[idx] = new_pos;
        }
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[test]
    fn clamp_insert_index_defaults_to_append() {
        assert_eq!(clamp_insert_index(3, None), 3);
        assert_eq!(clamp_insert_index(0, None), 0);
    }

    #[test]
    fn clamp_insert_index_keeps_valid_requests() {
        assert_eq!(clamp_insert_index(3, Some(0)), 0);
        assert_eq!(clamp_insert_index(3, Some(2)), 2);
    }

    #[test]
    fn clamp_insert_index_clamps_out_of_range() {
        assert_eq!(clamp_insert_index(3, Some(3)), 3);
        assert_eq!(clamp_insert_index(3, Some(100)), 3);
        assert_eq!(clamp_insert_index(3, Some(-1)), 3);
    }
}
