// transfer.rs — Export the session to a file, or import one as the session.

use std::path::Path;

use anyhow::Context;

use crate::session::Session;

pub fn export(session: &Session, path: &Path) -> anyhow::Result<()> {
    session
        .save_as(path)
        .with_context(|| format!("failed to export to {}", path.display()))?;
    println!(
        "Exported {} goal(s) to {}",
        session.store.len(),
        path.display()
    );
    Ok(())
}

/// Load `path` and make it the session's save file contents.
///
/// A malformed file is rejected before anything is overwritten.
pub fn import(session: &mut Session, path: &Path) -> anyhow::Result<()> {
    session
        .load_from(path)
        .with_context(|| format!("failed to import {}", path.display()))?;
    session.save()?;
    println!(
        "Imported {} goal(s) from {} ({} points).",
        session.store.len(),
        path.display(),
        session.store.total_score()
    );
    Ok(())
}
