//! `rblcheck providers` - list the catalog.

use anyhow::Result;
use rbl_core::RblProvider;
use std::process::ExitCode;

use super::Context;
use crate::cli::args::ProvidersArgs;
use crate::education::Explain;
use crate::output;

pub fn execute(ctx: &Context, args: &ProvidersArgs) -> Result<ExitCode> {
    if ctx.explain {
        Explain::providers().print();
    }

    let catalog = ctx.catalog()?;
    let providers: Vec<&RblProvider> = match args.kind {
        Some(kind) => catalog.eligible(kind).collect(),
        None => catalog.iter().collect(),
    };

    output::print_providers(&providers, ctx.output_format)?;
    Ok(ExitCode::SUCCESS)
}
