use crate::cli::{DownloadArgs, FetchArgs};
use crate::config::apply_fetch_overrides;
use crate::error::Result;
use crate::utils::progress::Spinner;
use pdbkit::config::FetchConfig;
use pdbkit::fetch::{self, FetchedStructure};
use std::path::PathBuf;
use tracing::info;

pub fn fetch(args: &FetchArgs, mut config: FetchConfig, quiet: bool) -> Result<()> {
    apply_fetch_overrides(&mut config, &args.overrides);
    let fetcher = config.build_fetcher()?;

    let spinner = spinner(quiet, format!("Fetching {}...", args.id));
    match fetcher.fetch(&args.id, config.work_dir.as_deref()) {
        Ok(fetched) => {
            spinner.succeed(format!("Fetched {} from {}", args.id, fetched.source));
            report(&fetched);
            Ok(())
        }
        Err(e) => {
            spinner.fail(format!("Could not fetch {}", args.id));
            Err(e.into())
        }
    }
}

pub fn download(args: &DownloadArgs, mut config: FetchConfig, quiet: bool) -> Result<()> {
    if let Some(url) = &args.archive_url {
        config.archive_url = url.clone();
    }
    let dir = match (&args.dir, &config.work_dir) {
        (Some(dir), _) | (None, Some(dir)) => dir.clone(),
        (None, None) => std::env::current_dir()?,
    };
    let archive = config.archive()?;
    info!("Downloading {} from {} into {:?}", args.id, config.archive_url, dir);

    let spinner = spinner(quiet, format!("Downloading {}...", args.id));
    match fetch::download_pdb(&archive, &args.id, &dir) {
        Ok(fetched) => {
            spinner.succeed(format!("Downloaded {}", args.id));
            report(&fetched);
            Ok(())
        }
        Err(e) => {
            spinner.fail(format!("Could not download {}", args.id));
            Err(e.into())
        }
    }
}

fn spinner(quiet: bool, message: String) -> Spinner {
    if quiet {
        Spinner::hidden()
    } else {
        Spinner::start(message)
    }
}

fn report(fetched: &FetchedStructure) {
    info!(
        "Retrieved {} file (obsolete: {}) via {}",
        fetched.format, fetched.obsolete, fetched.source
    );
    println!("{}", display_path(&fetched.path).display());
}

fn display_path(path: &std::path::Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
