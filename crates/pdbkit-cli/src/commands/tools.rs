use super::require_file;
use crate::cli::{RewriteArgs, TidyArgs};
use crate::error::Result;
use pdbkit::config::ToolsConfig;
use pdbkit::core::utils::paths;
use pdbkit::tools::{self, LineNormalizer};
use tracing::info;

pub fn tidy(args: &TidyArgs, config: &ToolsConfig) -> Result<()> {
    require_file(&args.input)?;
    let normalizer = config.normalizer();
    info!("Running '{}' on {:?}", normalizer.tidy.program, args.input);
    run_tidy(&normalizer, args)
}

pub fn delocc(args: &RewriteArgs, config: &ToolsConfig) -> Result<()> {
    require_file(&args.input)?;
    let normalizer = config.normalizer();
    info!("Running '{}' on {:?}", normalizer.delocc.program, args.input);
    run_delocc(&normalizer, args)
}

/// Runs the configured pipeline, writing to `<stem>.pipeline.pdb` by default.
pub fn pipeline(args: &RewriteArgs, config: &ToolsConfig) -> Result<()> {
    require_file(&args.input)?;
    let chain = config.pipeline();
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| paths::replace_extension(&args.input, ".pipeline.pdb"));
    info!(
        "Running {}-stage pipeline on {:?}",
        chain.commands().len(),
        args.input
    );

    let written = chain.run(&args.input, &output)?;
    println!("✓ Wrote {}", written.display());
    Ok(())
}

fn run_tidy(normalizer: &dyn LineNormalizer, args: &TidyArgs) -> Result<()> {
    let output = tools::tidy(normalizer, &args.input, args.replace, args.output.as_deref())?;
    println!("✓ Wrote {}", output.display());
    Ok(())
}

fn run_delocc(normalizer: &dyn LineNormalizer, args: &RewriteArgs) -> Result<()> {
    let output = tools::delocc_pdb(normalizer, &args.input, args.output.as_deref())?;
    println!("✓ Wrote {}", output.display());
    Ok(())
}
