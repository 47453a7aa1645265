//! Forum listings and comment threads

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use super::events::owned_event_ids;
use super::search::filter_by_text;
use crate::model::{Comment, Event, Forum, User};

/// "My Forums": forums under events the user organizes, newest first.
///
/// Forums whose event is not in `events` are dropped.
pub fn my_forums(forums: &[Forum], events: &[Event], user: Option<&User>, query: &str) -> Vec<Forum> {
    let Some(user) = user else {
        return Vec::new();
    };
    let owned: HashSet<&str> = owned_event_ids(events, user);
    if owned.is_empty() {
        return Vec::new();
    }

    let mut rows: Vec<Forum> = forums
        .iter()
        .filter(|f| owned.contains(f.event_id.as_str()))
        .cloned()
        .collect();
    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    filter_by_text(rows, query, |f| f.title.as_str())
}

pub fn forums_for_event(forums: &[Forum], event_id: &str) -> Vec<Forum> {
    let mut rows: Vec<Forum> = forums
        .iter()
        .filter(|f| f.event_id == event_id)
        .cloned()
        .collect();
    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    rows
}

/// A top-level comment with its direct replies
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentThread {
    pub comment: Comment,
    pub replies: Vec<Comment>,
}

/// Group comments into threads: newest thread first, replies oldest first.
///
/// A reply whose parent is missing is shown as its own thread.
pub fn comment_threads(comments: &[Comment]) -> Vec<CommentThread> {
    let ids: HashSet<&str> = comments.iter().map(|c| c.id.as_str()).collect();
    let mut replies: HashMap<&str, Vec<Comment>> = HashMap::new();
    let mut roots: Vec<Comment> = Vec::new();

    for comment in comments {
        match comment.parent_id.as_deref() {
            Some(parent) if ids.contains(parent) && parent != comment.id => {
                replies.entry(parent).or_default().push(comment.clone());
            }
            _ => roots.push(comment.clone()),
        }
    }

    roots.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    roots
        .into_iter()
        .map(|comment| {
            let mut thread_replies = replies.remove(comment.id.as_str()).unwrap_or_default();
            thread_replies.sort_by(|a, b| a.created_at.cmp(&b.created_at));
            CommentThread {
                comment,
                replies: thread_replies,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::super::events::fixtures::{event, user};
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use proptest::prelude::*;

    fn forum(id: &str, event_id: &str, title: &str, minute: i64) -> Forum {
        Forum {
            id: id.to_string(),
            event_id: event_id.to_string(),
            creator_id: "someone".into(),
            title: title.to_string(),
            description: String::new(),
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
                + Duration::minutes(minute),
        }
    }

    fn comment(id: &str, parent: Option<&str>, minute: i64) -> Comment {
        Comment {
            id: id.to_string(),
            forum_id: "f-1".into(),
            parent_id: parent.map(Into::into),
            author_id: "u-1".into(),
            content: format!("comment {}", id),
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
                + Duration::minutes(minute),
            updated_at: None,
        }
    }

    #[test]
    fn joins_through_owned_events_newest_first() {
        let me = user("u-1");
        let events = vec![
            event("e-1", "Rock Night", "u-1", 1),
            event("e-2", "Jazz Evening", "u-2", 2),
        ];
        let forums = vec![
            forum("f-1", "e-1", "Parking", 1),
            forum("f-2", "e-2", "Setlist", 2),
            forum("f-3", "e-1", "Lineup", 3),
            forum("f-4", "e-9", "Orphan", 4),
        ];

        let rows = my_forums(&forums, &events, Some(&me), "");
        assert_eq!(
            rows.iter().map(|f| f.id.as_str()).collect::<Vec<_>>(),
            ["f-3", "f-1"]
        );

        let rows = my_forums(&forums, &events, Some(&me), "PARK");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "f-1");
    }

    #[test]
    fn ties_keep_fetch_order() {
        let me = user("u-1");
        let events = vec![event("e-1", "Rock Night", "u-1", 1)];
        let forums = vec![forum("f-a", "e-1", "A", 5), forum("f-b", "e-1", "B", 5)];
        let rows = my_forums(&forums, &events, Some(&me), "");
        assert_eq!(rows[0].id, "f-a");
        assert_eq!(rows[1].id, "f-b");
    }

    #[test]
    fn threads_group_replies() {
        let comments = vec![
            comment("c-1", None, 1),
            comment("c-2", Some("c-1"), 5),
            comment("c-3", None, 3),
            comment("c-4", Some("c-1"), 2),
            comment("c-5", Some("gone"), 4),
        ];

        let threads = comment_threads(&comments);
        let roots: Vec<&str> = threads.iter().map(|t| t.comment.id.as_str()).collect();
        assert_eq!(roots, ["c-5", "c-3", "c-1"]);

        let replies: Vec<&str> = threads[2].replies.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(replies, ["c-4", "c-2"]);
        assert!(comment_threads(&[]).is_empty());
    }

    #[test]
    fn event_forums() {
        let forums = vec![forum("f-1", "e-1", "A", 1), forum("f-2", "e-2", "B", 2)];
        let rows = forums_for_event(&forums, "e-2");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "f-2");
    }

    proptest! {
        #[test]
        fn forums_only_from_owned_events(
            organizers in proptest::collection::vec(0u8..3, 0..10),
            forum_events in proptest::collection::vec(0usize..12, 0..30),
            me in 0u8..3,
        ) {
            let events: Vec<Event> = organizers
                .iter()
                .enumerate()
                .map(|(i, o)| event(&format!("e-{}", i), "Show", &format!("u-{}", o), 1))
                .collect();
            let forums: Vec<Forum> = forum_events
                .iter()
                .enumerate()
                .map(|(i, e)| forum(&format!("f-{}", i), &format!("e-{}", e), "T", i as i64))
                .collect();
            let me = user(&format!("u-{}", me));
            let owned = owned_event_ids(&events, &me);

            let rows = my_forums(&forums, &events, Some(&me), "");
            prop_assert!(rows.iter().all(|f| owned.contains(f.event_id.as_str())));
            prop_assert!(rows.windows(2).all(|w| w[0].created_at >= w[1].created_at));
            if events.is_empty() || forums.is_empty() {
                prop_assert!(rows.is_empty());
            }
        }
    }
}
