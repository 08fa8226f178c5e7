//! `rblcheck check` - run one aggregate DNSBL check.

use anyhow::Result;
use std::process::ExitCode;

use super::Context;
use crate::cli::args::CheckArgs;
use crate::education::Explain;
use crate::output;

/// Exit status for `--fail-on-listed` when a provider lists the target.
pub const LISTED_EXIT: u8 = 2;

pub async fn execute(ctx: Context, args: CheckArgs) -> Result<ExitCode> {
    if ctx.explain {
        Explain::check(&args.target).print();
    }

    let engine = ctx.engine()?;
    let response = engine.check(&args.target).await?;

    output::print_response(&response, ctx.output_format, ctx.verbose)?;

    if args.fail_on_listed && response.is_listed() {
        return Ok(ExitCode::from(LISTED_EXIT));
    }
    Ok(ExitCode::SUCCESS)
}
