use std::time::Duration;

use lab_core::entities::Notification;
use lab_notify::{FeedChange, FeedService, HubConnection, MarkRead, Poller, UserNotifications};

use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::shared::wizard::note;
use crate::context::AppContext;

/// Follow the feed: the poller always runs, the hub unless `--no-hub`.
/// Stops on Ctrl-C or once every producer has stopped.
pub async fn run(
    no_hub: bool,
    mark_read: bool,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let user_id = ctx.user_id()?;
    let poller = Poller::new(
        UserNotifications::new(ctx.client.clone(), user_id),
        Duration::from_secs(ctx.config.notifications.poll_interval_secs),
    );
    let hub = (!no_hub).then(|| {
        HubConnection::from_config(&ctx.config, ctx.client.token().map(str::to_string))
    });
    if let Some(hub) = &hub {
        note(flags, &format!("watching notifications (hub {})", hub.url()));
    } else {
        note(flags, "watching notifications (polling only)");
    }

    let mut service = FeedService::start(ctx.client.clone(), poller, hub);
    loop {
        tokio::select! {
            change = service.next_change() => match change {
                Some(FeedChange::Arrived(items)) => {
                    for item in &items {
                        println!("{}", render_line(item, flags.format)?);
                        if mark_read && service.mark_read(&item.id) == MarkRead::Marked {
                            tracing::debug!(id = %item.id, "marked read");
                        }
                    }
                }
                Some(FeedChange::Connection(state)) => note(flags, &format!("hub: {state}")),
                None => break,
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    note(
        flags,
        &format!(
            "{} notification(s), {} unread",
            service.feed().len(),
            service.feed().unread_count()
        ),
    );
    Ok(())
}

fn render_line(item: &Notification, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json | OutputFormat::Raw => Ok(serde_json::to_string(item)?),
        OutputFormat::Table => Ok(format!(
            "{} [{}] {}: {}",
            if item.is_read { " " } else { "*" },
            item.created_at.format("%Y-%m-%d %H:%M"),
            item.title,
            item.content
        )),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn table_line_flags_unread() {
        let item = Notification {
            id: "n-1".into(),
            user_id: "u-1".into(),
            title: "Task assigned".into(),
            content: "Measure height".into(),
            is_read: false,
            created_at: NaiveDate::from_ymd_opt(2024, 3, 2)
                .and_then(|d| d.and_hms_opt(8, 30, 0))
                .unwrap(),
        };
        assert_eq!(
            render_line(&item, OutputFormat::Table).unwrap(),
            "* [2024-03-02 08:30] Task assigned: Measure height"
        );
        let json: serde_json::Value =
            serde_json::from_str(&render_line(&item, OutputFormat::Raw).unwrap()).unwrap();
        assert_eq!(json["id"], "n-1");
    }
}
