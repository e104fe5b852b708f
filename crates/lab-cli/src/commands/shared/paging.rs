use anyhow::Context;
use lab_core::paging::{FIRST_PAGE, Pager};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::{Tabular, output_page};
use crate::progress::Progress;

/// Compute effective page size with precedence: global flag -> config.
#[must_use]
pub fn effective_page_size(global: Option<u32>, configured: u32) -> u32 {
    global.filter(|size| *size > 0).unwrap_or(configured)
}

/// Pager positioned at `--page` with `--page-size` rows.
#[must_use]
pub fn pager(ctx: &AppContext, flags: &GlobalFlags) -> Pager {
    Pager::new(effective_page_size(flags.page_size, ctx.page_size()))
        .at(flags.page.unwrap_or(FIRST_PAGE))
}

/// Fetch and print one page of a list view.
///
/// When the requested page lies past the end of the collection the last
/// page is fetched instead.
pub async fn show_page<T>(
    path: &str,
    what: &str,
    filter: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()>
where
    T: DeserializeOwned + Serialize + Tabular,
{
    let mut pager = pager(ctx, flags);
    let filter = filter.map(str::to_string);
    let spinner = Progress::spinner(&format!("Loading {what}…"));

    let mut page = ctx
        .client
        .browse::<T>(path, &pager.request(filter.clone()))
        .await;
    if let Ok(first) = &page {
        let requested = pager.page_number();
        pager.observe(first);
        if pager.page_number() != requested {
            tracing::debug!(requested, last = pager.page_number(), "page out of range");
            page = ctx.client.browse::<T>(path, &pager.request(filter)).await;
        }
    }
    spinner.finish_clear();

    let page = page.with_context(|| format!("could not load {what}"))?;
    output_page(&page.data, &pager, flags.format)
}
