use anyhow::Context;
use lab_core::entities::Notification;
use lab_core::paging::filter_local;
use lab_notify::{FeedEvent, NotificationFeed};

use crate::cli::GlobalFlags;
use crate::commands::shared::paging::pager;
use crate::context::AppContext;
use crate::output::output_page;
use crate::progress::Progress;

pub async fn run(
    unread: bool,
    filter: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let user_id = ctx.user_id()?;
    let mut pager = pager(ctx, flags);
    let spinner = Progress::spinner("Loading notifications…");
    let page = ctx
        .client
        .list_notifications(user_id, &pager.request(None))
        .await;
    spinner.finish_clear();
    let page = page.context("could not load notifications")?;
    pager.observe(&page);

    let mut feed = NotificationFeed::new();
    feed.apply(FeedEvent::Polled(page.data));
    let rows = select(feed.items(), unread, filter.unwrap_or_default());
    output_page(&rows, &pager, flags.format)
}

/// Rows to show, newest first: optionally unread only, then matched on
/// title and content.
fn select(items: &[Notification], unread: bool, query: &str) -> Vec<Notification> {
    filter_local(items, query, |n| format!("{} {}", n.title, n.content))
        .into_iter()
        .filter(|n| !unread || !n.is_read)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::*;

    fn notification(id: &str, title: &str, is_read: bool) -> Notification {
        Notification {
            id: id.into(),
            user_id: "u-1".into(),
            title: title.into(),
            content: "Batch 2024-07".into(),
            is_read,
            created_at: NaiveDate::from_ymd_opt(2024, 3, 2)
                .and_then(|d| d.and_hms_opt(8, 30, 0))
                .unwrap(),
        }
    }

    #[test]
    fn unread_and_filter_combine() {
        let items = vec![
            notification("n-1", "Task assigned", false),
            notification("n-2", "Task assigned", true),
            notification("n-3", "Report approved", false),
        ];
        let ids = |rows: Vec<Notification>| rows.into_iter().map(|n| n.id).collect::<Vec<_>>();

        assert_eq!(ids(select(&items, true, "")), vec!["n-1", "n-3"]);
        assert_eq!(ids(select(&items, false, "TASK")), vec!["n-1", "n-2"]);
        assert_eq!(ids(select(&items, true, "task")), vec!["n-1"]);
        assert_eq!(ids(select(&items, false, "2024-07")).len(), 3);
    }
}
