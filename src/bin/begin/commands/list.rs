//! `begin --list`

use anyhow::Result;

use begin::ops::{format_listing, list_targets, load_manager};
use begin::sources::TomlSourceLoader;
use begin::GlobalContext;

pub fn execute(ctx: &GlobalContext, json: bool) -> Result<()> {
    let manager = load_manager(ctx, &TomlSourceLoader)?;
    let summaries = list_targets(&manager);

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        print!("{}", format_listing(&summaries));
    }

    Ok(())
}
