use std::io::Write;

use diary_core::store::read_entry_file;
use diary_core::Identifier;
use zeroize::Zeroizing;

use crate::app::AppContext;
use crate::cli::ReadArgs;
use crate::helpers::display_entry;

pub fn handle_read(ctx: &AppContext, args: &ReadArgs) -> anyhow::Result<()> {
    let settings = ctx.settings()?;
    let store = ctx.store()?;
    let identifier = Identifier::parse(args.name.as_deref());

    let path = store.locate(&identifier)?;
    if !ctx.quiet() {
        eprintln!("Reading {}", path.display());
    }

    let key = ctx.unlock(true, false)?;
    let plaintext = Zeroizing::new(read_entry_file(&path, &key)?);

    if args.print {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(&plaintext)
            .and_then(|()| stdout.flush())
            .map_err(|e| anyhow::anyhow!("Failed to write entry: {}", e))?;
        return Ok(());
    }

    let buffer_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("entry.txt");
    display_entry(&settings.editor, buffer_name, &plaintext)
}
