use diary_core::Identifier;

use crate::app::{AppContext, TemplateSource};
use crate::cli::NewArgs;
use crate::helpers::read_entry_body;

pub fn handle_new(ctx: &AppContext, args: &NewArgs) -> anyhow::Result<()> {
    let settings = ctx.settings()?;
    let store = ctx.store()?;
    let identifier = Identifier::parse(args.name.as_deref());

    // Fail before the editor opens if the entry cannot be saved.
    let path = store.new_entry_path(&identifier)?;
    let buffer_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("entry.txt")
        .to_string();

    let template = match args.template.as_ref() {
        Some(path) => TemplateSource::Explicit(path.clone()),
        None => settings.template.clone(),
    };
    let body = read_entry_body(
        args.no_input,
        args.body.clone(),
        &settings.editor,
        &buffer_name,
        &template,
    )?;

    let key = ctx.unlock(true, args.no_input)?;
    let written = store.write(&identifier, &body, &key)?;
    tracing::info!(path = %written.display(), "entry written");

    if !ctx.quiet() {
        eprintln!("Saved {}", written.display());
    }
    Ok(())
}
