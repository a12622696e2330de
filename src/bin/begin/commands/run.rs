//! `begin <REQUEST>...`

use anyhow::Result;

use begin::ops::{load_manager, run_requests};
use begin::sources::TomlSourceLoader;
use begin::{parse_requests, GlobalContext};

pub fn execute(ctx: &GlobalContext, tokens: &[String]) -> Result<()> {
    // Parse before loading so malformed requests fail without touching files.
    let requests = parse_requests(tokens)?;
    if requests.is_empty() {
        return super::list::execute(ctx, false);
    }

    let manager = load_manager(ctx, &TomlSourceLoader)?;
    run_requests(&manager, &requests)
}
