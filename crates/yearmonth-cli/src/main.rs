use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use yearmonth_core::{OrganizeOptions, Progress};

#[derive(Parser, Debug)]
#[command(
    name = "yearmonth",
    version,
    about = "Traverse all images (anything with valid EXIF) under a directory and regroup them by year/month"
)]
struct Cli {
    /// Root directory of all source images
    #[arg(short, long, value_name = "SOURCE")]
    source: PathBuf,

    /// Target directory under which images will be copied to and organized
    #[arg(short, long, value_name = "TARGET")]
    target: PathBuf,

    /// Report progress every N files
    #[arg(long, default_value_t = yearmonth_core::DEFAULT_REPORT_EVERY, value_name = "N")]
    report_every: u64,

    /// Disable periodic progress lines
    #[arg(long)]
    no_progress: bool,

    /// Skip counting files before copying
    #[arg(long)]
    no_estimate: bool,

    /// Print the final summary as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Hide per-file skip notes
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn options(&self) -> OrganizeOptions {
        OrganizeOptions {
            source: self.source.clone(),
            target: self.target.clone(),
            report_every: if self.no_progress { None } else { Some(self.report_every) },
            estimate: !self.no_estimate,
        }
    }
}

fn fmt_total(total: Option<u64>) -> String {
    total.map_or_else(|| "?".to_string(), |t| t.to_string())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.quiet { LevelFilter::Warn } else { LevelFilter::Info };
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .init();

    eprintln!(
        "Starting to copy images under {} to {}, organized by year/month:",
        cli.source.display(),
        cli.target.display()
    );

    let options = cli.options();
    let result = yearmonth_core::organize(&options, &|progress| match progress {
        Progress::Estimated(est) => eprintln!(
            "Found {} directories containing a total of {} files\n",
            est.dirs_with_files, est.total_files
        ),
        Progress::Processed { visited, total, copied } => eprintln!(
            "...processed {} out of {} files ({} images copied)",
            visited,
            fmt_total(*total),
            copied
        ),
        // already logged by the organizer
        Progress::Skipped(_) => {}
    })
    .with_context(|| format!("failed to organize {}", cli.source.display()))?;

    eprintln!(
        "\nProcessed {} out of {} files ({} images copied)",
        result.files_visited,
        fmt_total(result.total_files),
        result.images_copied
    );
    if result.already_in_place > 0 {
        eprintln!("{} images were already in place", result.already_in_place);
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    eprintln!("Finished.");
    Ok(())
}
