//! Public read filter: the live subset of a table in display order.
//!
//! Nothing is cached. Each call recomputes from the rows it is given, so
//! the same input always yields the same sequence.

use chrono::{DateTime, Utc};

use crate::entity::Entity;

/// Records eligible for public display at `now`, sorted by the entity's
/// public order.
pub fn live<E: Entity>(records: impl IntoIterator<Item = E>, now: DateTime<Utc>) -> Vec<E> {
    let mut live: Vec<E> = records.into_iter().filter(|r| r.is_live(now)).collect();
    live.sort_by(E::public_order);
    live
}

/// Admin listing order, including rows the public never sees.
pub fn admin_sorted<E: Entity>(records: impl IntoIterator<Item = E>) -> Vec<E> {
    let mut all: Vec<E> = records.into_iter().collect();
    all.sort_by(E::admin_order);
    all
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::announcement::{DEFAULT_BACKGROUND_COLOR, DEFAULT_TEXT_COLOR};
    use crate::entity::fixtures::meta_at;
    use crate::entity::{Announcement, Faq};
    use chrono::Duration;

    fn faq(order_index: i32, visible: bool, deleted: bool) -> Faq {
        let now = Utc::now();
        let mut meta = meta_at(now, 10);
        meta.is_visible = visible;
        meta.deleted_at = deleted.then_some(now);
        Faq {
            meta,
            question_ja: format!("Q{order_index}"),
            question_zh: None,
            answer_ja: None,
            answer_zh: None,
            order_index,
        }
    }

    #[test]
    fn deleted_rows_never_surface() {
        let rows = vec![faq(1, true, true), faq(2, false, true), faq(3, true, false)];
        let live = live(rows, Utc::now());
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].order_index, 3);
    }

    #[test]
    fn hidden_rows_are_excluded_publicly_but_listed_for_admins() {
        let rows = vec![faq(2, false, false), faq(1, true, false)];
        assert_eq!(live(rows.clone(), Utc::now()).len(), 1);

        let admin = admin_sorted(rows);
        assert_eq!(admin.len(), 2);
        assert_eq!(admin[0].order_index, 1);
    }

    #[test]
    fn sorted_ascending_by_order_index() {
        let rows = vec![faq(3, true, false), faq(1, true, false), faq(2, true, false)];
        let order: Vec<_> = live(rows, Utc::now()).iter().map(|f| f.order_index).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn scheduled_announcement_waits_for_its_start() {
        let now = Utc::now();
        let scheduled = Announcement {
            meta: meta_at(now, 0),
            title_ja: "予告".into(),
            title_zh: None,
            content_ja: "来週開始".into(),
            content_zh: None,
            start_date: Some(now + Duration::days(7)),
            end_date: None,
            priority: 10,
            background_color: DEFAULT_BACKGROUND_COLOR.into(),
            text_color: DEFAULT_TEXT_COLOR.into(),
        };
        assert!(live(vec![scheduled.clone()], now).is_empty());
        assert_eq!(live(vec![scheduled], now + Duration::days(8)).len(), 1);
    }

    #[test]
    fn recomputes_on_every_call() {
        let rows = vec![faq(1, true, false)];
        let first = live(rows.clone(), Utc::now());
        let second = live(rows, Utc::now());
        assert_eq!(first, second);
    }
}
