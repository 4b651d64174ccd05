// progress.rs — Score and achievement views.

use crate::render;
use crate::session::Session;

pub fn score(session: &Session) -> anyhow::Result<()> {
    println!("{}", session.store.score());
    Ok(())
}

pub fn achievements(session: &Session) -> anyhow::Result<()> {
    println!("{}", render::achievements(&session.store));
    Ok(())
}
