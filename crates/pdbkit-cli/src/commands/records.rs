use super::require_file;
use crate::cli::{ExtractChainsArgs, InputArgs, ReplaceChainsArgs, RewriteArgs};
use crate::error::{CliError, Result};
use pdbkit::core::records::{rewriter, scanner};
use std::collections::HashMap;
use std::io::Write;
use tracing::{info, warn};

pub fn chains(args: &InputArgs, out: &mut impl Write) -> Result<()> {
    require_file(&args.input)?;
    let chains: Vec<String> = scanner::get_all_chains(&args.input)
        .into_iter()
        .map(String::from)
        .collect();
    info!("Found {} chain(s) in {:?}", chains.len(), args.input);
    writeln!(out, "{}", chains.join(" "))?;
    Ok(())
}

pub fn first_chain(args: &InputArgs, out: &mut impl Write) -> Result<()> {
    require_file(&args.input)?;
    match scanner::get_first_chain(&args.input) {
        Some(chain) => writeln!(out, "{}", chain)?,
        None => warn!("No ATOM records in {:?}", args.input),
    }
    Ok(())
}

pub fn residues(args: &InputArgs, out: &mut impl Write) -> Result<()> {
    require_file(&args.input)?;
    let mut count = 0usize;
    for key in scanner::get_pdb_residues(&args.input) {
        writeln!(out, "{}", key)?;
        count += 1;
    }
    info!("Listed {} residue(s) of {:?}", count, args.input);
    Ok(())
}

pub fn ca_model(args: &InputArgs, out: &mut impl Write) -> Result<()> {
    require_file(&args.input)?;
    writeln!(out, "{}", scanner::is_ca_model(&args.input))?;
    Ok(())
}

pub fn coords(args: &InputArgs, out: &mut impl Write) -> Result<()> {
    require_file(&args.input)?;
    let points = scanner::read_pdb(&args.input)?;
    for p in &points {
        writeln!(out, "{:.3} {:.3} {:.3}", p.x, p.y, p.z)?;
    }
    info!("Read {} coordinate(s) from {:?}", points.len(), args.input);
    Ok(())
}

pub fn replace_chains(args: &ReplaceChainsArgs) -> Result<()> {
    require_file(&args.input)?;
    let mut chain_map = HashMap::with_capacity(args.mappings.len());
    for &(old, new) in &args.mappings {
        if chain_map.insert(old, new).is_some() {
            return Err(CliError::Argument(format!(
                "Chain '{}' is mapped more than once",
                old
            )));
        }
    }

    let output = rewriter::replace_chains(&args.input, &args.output, &chain_map)?;
    println!("✓ Wrote {}", output.display());
    Ok(())
}

pub fn extract_chains(args: &ExtractChainsArgs) -> Result<()> {
    require_file(&args.input)?;
    let output = rewriter::extract_chains(
        &args.input,
        &args.chains,
        args.rename.as_deref(),
        args.output.as_deref(),
    )?;
    println!("✓ Wrote {}", output.display());
    Ok(())
}

pub fn remove_ter(args: &RewriteArgs) -> Result<()> {
    require_file(&args.input)?;
    let output = rewriter::remove_ter_lines(&args.input, args.output.as_deref())?;
    println!("✓ Wrote {}", output.display());
    Ok(())
}
