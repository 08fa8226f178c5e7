//! `rblcheck serve` - run the HTTP API.

use anyhow::{Context as _, Result};
use rbl_srv::ServerConfig;
use std::process::ExitCode;

use super::Context;
use crate::cli::args::ServeArgs;
use crate::education::Explain;

pub async fn execute(ctx: Context, args: ServeArgs) -> Result<ExitCode> {
    if ctx.explain {
        Explain::serve().print();
    }

    let mut config = ServerConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;

    // Command-line settings override the server config file
    if let Some(listen) = args.listen {
        config.listen = listen;
    }
    if ctx.catalog.is_some() {
        config.catalog = ctx.catalog;
    }
    config.engine = ctx.overrides.apply(config.engine);
    config.engine.validate()?;

    rbl_srv::run(&config).await?;
    Ok(ExitCode::SUCCESS)
}
