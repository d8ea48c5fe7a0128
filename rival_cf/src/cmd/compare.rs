use crate::{
    cmd::{codeforces_client, load_catalog},
    modules::render::write_report,
};
use anyhow::{Context, Result};
use clap::Args;
use rival_cf_libs::{
    aggregate, pagination::total_pages, refresh, PageState, RatingFilter, UserRegistry,
    DEFAULT_RATING_FILTER,
};
use std::{ffi::OsString, io::Write};

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Codeforces handle to compare. Repeat for more users.
    #[arg(long = "handle", required = true)]
    handles: Vec<String>,
    /// Exact problem rating to show, or `all`.
    #[arg(long, default_value_t = DEFAULT_RATING_FILTER)]
    rating: RatingFilter,
    #[arg(long, default_value_t = 1)]
    page: usize,
    #[arg(long)]
    catalog: Option<OsString>,
    #[arg(long)]
    api_url: Option<String>,
}

pub async fn run(args: CompareArgs) -> Result<()> {
    let catalog = load_catalog(args.catalog)?;
    let client = codeforces_client(args.api_url)?;

    let mut registry = UserRegistry::new(&args.handles).with_context(|| {
        let message = "invalid handle list";
        tracing::error!(message);
        message
    })?;

    let report = refresh(&client, &mut registry).await;
    for failure in report.failures.iter() {
        eprintln!("{}", failure);
    }

    let mut state = PageState::new(args.rating);
    let result = aggregate(&catalog, registry.users(), state.filter());
    state.go_to(
        args.page,
        total_pages(result.total_problems(), state.page_size()),
    );
    if state.current_page() != args.page {
        tracing::warn!(
            "page {} doesn't exist, showing page {} instead",
            args.page,
            state.current_page()
        );
    }
    let page = state.page(&result.rows)?;

    let mut stdout = std::io::stdout().lock();
    write_report(&mut stdout, &result, &page)?;
    stdout.flush()?;

    Ok(())
}
