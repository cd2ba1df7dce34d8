use crate::app::AppContext;
use crate::cli::ListArgs;
use crate::output::{listing_json, listing_lines};

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    let store = ctx.store()?;
    let listing = store.list()?;
    tracing::info!(
        dir = %listing.diary_dir.display(),
        dated = listing.dated.len(),
        named = listing.named.len(),
        "listed entries"
    );

    if args.json {
        println!("{}", listing_json(&listing)?);
        return Ok(());
    }

    if listing.is_empty() {
        if !ctx.quiet() {
            eprintln!("No entries in {}", listing.diary_dir.display());
        }
        return Ok(());
    }

    if !ctx.quiet() {
        eprintln!("Entries in {}", listing.diary_dir.display());
    }
    for line in listing_lines(&listing) {
        println!("{}", line);
    }
    Ok(())
}
