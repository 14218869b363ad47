use serde::{Deserialize, Serialize};

use crate::entity::Orderable;
use crate::record::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// One `order_index` write produced by a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reassignment {
    pub id: RecordId,
    pub to: i32,
}

/// Plan an adjacent swap inside `sorted` (already in display order).
///
/// Returns `None` when `id` is not in the list. A move past either end is a
/// no-op and yields no writes. Otherwise the swapped list is renumbered
/// `1..=n` and only rows whose index changes are returned, in their new
/// display order.
pub fn plan_move<E: Orderable>(
    sorted: &[E],
    id: RecordId,
    direction: Direction,
) -> Option<Vec<Reassignment>> {
    let position = sorted.iter().position(|r| r.meta().id == id)?;
    let target = match direction {
        Direction::Up => position.checked_sub(1),
        Direction::Down => Some(position + 1).filter(|&t| t < sorted.len()),
    };
    let Some(target) = target else {
        return Some(Vec::new());
    };

    let mut order: Vec<&E> = sorted.iter().collect();
    order.swap(position, target);

    let plan = order
        .into_iter()
        .zip(1..)
        .filter(|(record, to)| record.order_index() != *to)
        .map(|(record, to)| Reassignment {
            id: record.meta().id,
            to,
        })
        .collect();
    Some(plan)
}
