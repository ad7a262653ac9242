//! PastPerfect CLI - restore old photos with the PastPerfect backend
//!
//! # Commands
//!
//! ```bash
//! pastperfect restore a.jpg b.png       # Restore photos into ./restored
//! pastperfect restore *.jpg --colorize  # Extra enhancements
//! pastperfect share --platform twitter  # Share link for a result
//! pastperfect settings --enable upscale # Show the settings JSON sent
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use pastperfect::{
    batch_caption, format_file_size, share_action, summary_line, AcceptPolicy, Credits,
    Enhancement, EnhancementSettings, SharePlatform, DOWNLOAD_STAGGER,
};
use pastperfect_client::{
    init_tracing, run_job, share, ClientConfig, ConsoleProgress, Downloader, RestoreJob, RunRecord,
};

#[derive(Parser)]
#[command(name = "pastperfect")]
#[command(about = "Restore old photos with AI", long_about = None)]
struct Cli {
    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Restore photos and save the results
    Restore {
        /// Photos to restore
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output directory for restored images
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Backend base URL (default: PASTPERFECT_API_URL)
        #[arg(long)]
        api_url: Option<String>,

        /// Maximum requests in flight
        #[arg(short, long)]
        concurrency: Option<usize>,

        /// Extra attempts for transient failures
        #[arg(long)]
        retries: Option<u32>,

        /// Per-request timeout in seconds (0 = none)
        #[arg(long)]
        timeout: Option<u64>,

        /// Write a JSON run report
        #[arg(long)]
        report: Option<PathBuf>,

        /// Do not save restored images
        #[arg(long)]
        no_download: bool,

        /// Also accept videos
        #[arg(long)]
        video: bool,

        /// Remaining restoration credits (default: unlimited)
        #[arg(long)]
        credits: Option<u32>,

        /// Send the enhancement settings with each file
        #[arg(long)]
        send_settings: bool,

        #[command(flatten)]
        settings: SettingsArgs,
    },

    /// Print share links for a restored photo
    Share {
        /// Platform: facebook, twitter, instagram, email, copy (default: all links)
        #[arg(short, long)]
        platform: Option<String>,

        /// Restored file name to mention
        #[arg(short, long)]
        file: Option<String>,

        /// Site URL to share
        #[arg(long, default_value = "https://pastperfect.app")]
        origin: String,
    },

    /// Show the enhancement settings that would be used
    Settings {
        #[command(flatten)]
        settings: SettingsArgs,
    },
}

#[derive(Args, Clone, Debug, Default)]
struct SettingsArgs {
    /// Turn an enhancement on (sharpness, scratches, contrast, noise, lighting, colorize, upscale)
    #[arg(long = "enable", value_name = "NAME")]
    enable: Vec<String>,

    /// Turn an enhancement off
    #[arg(long = "disable", value_name = "NAME")]
    disable: Vec<String>,

    /// Shortcut for --enable colorize
    #[arg(long)]
    colorize: bool,

    /// Shortcut for --enable upscale
    #[arg(long)]
    upscale: bool,
}

impl SettingsArgs {
    fn resolve(&self) -> Result<EnhancementSettings, Box<dyn std::error::Error>> {
        let mut settings = EnhancementSettings::default();
        for (names, enabled) in [(&self.enable, true), (&self.disable, false)] {
            for name in names {
                let enhancement = Enhancement::from_name(name)
                    .ok_or_else(|| format!("Unknown enhancement '{}'", name))?;
                settings.set(enhancement, enabled);
            }
        }
        if self.colorize {
            settings.set(Enhancement::Colorize, true);
        }
        if self.upscale {
            settings.set(Enhancement::Upscale, true);
        }
        Ok(settings)
    }
}

struct RestoreArgs {
    files: Vec<PathBuf>,
    output: Option<PathBuf>,
    api_url: Option<String>,
    concurrency: Option<usize>,
    retries: Option<u32>,
    timeout: Option<u64>,
    report: Option<PathBuf>,
    no_download: bool,
    video: bool,
    credits: Option<u32>,
    send_settings: bool,
    settings: SettingsArgs,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Restore {
            files,
            output,
            api_url,
            concurrency,
            retries,
            timeout,
            report,
            no_download,
            video,
            credits,
            send_settings,
            settings,
        } => {
            cmd_restore(RestoreArgs {
                files,
                output,
                api_url,
                concurrency,
                retries,
                timeout,
                report,
                no_download,
                video,
                credits,
                send_settings,
                settings,
            })
            .await
        }

        Commands::Share { platform, file, origin } => cmd_share(platform.as_deref(), file.as_deref(), &origin),

        Commands::Settings { settings } => cmd_settings(&settings),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn cmd_restore(args: RestoreArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = args.api_url {
        config.api_url = url;
    }
    if let Some(concurrency) = args.concurrency {
        config.concurrency = concurrency.max(1);
    }
    if let Some(retries) = args.retries {
        config.retries = retries;
    }
    if let Some(secs) = args.timeout {
        config.request_timeout = (secs > 0).then(|| Duration::from_secs(secs));
    }
    if let Some(dir) = args.output {
        config.output_dir = dir;
    }
    config.send_settings |= args.send_settings;
    config.validate()?;

    let settings = args.settings.resolve()?;
    let mut job = RestoreJob::new(args.files, settings);
    if args.video {
        job.policy = AcceptPolicy::photos_and_videos();
    }
    if let Some(remaining) = args.credits {
        job.credits = Credits::new(remaining, remaining.max(Credits::default().total));
    }

    eprintln!("📡 Backend: {}", config.restore_url());
    let outcome = run_job(&config, job, &ConsoleProgress::new()).await?;

    for skipped in &outcome.skipped {
        eprintln!("   ⚠️  Skipped {}: {}", skipped.name, skipped.reason);
    }

    let total_bytes: u64 = outcome.manifest.items.iter().map(|i| i.size_bytes).sum();
    eprintln!("\n📊 {}", batch_caption(outcome.manifest.items.len(), total_bytes));
    eprintln!("   {}", summary_line(&outcome.report));

    for result in &outcome.report.results {
        eprintln!(
            "   ✓ {} ({:.1}s): {}",
            result.original_name,
            result.elapsed_seconds,
            result.applied_improvements.join(", ")
        );
    }
    for failure in &outcome.report.failures {
        eprintln!("   ❌ {}: {}", failure.original_name, failure.reason);
    }

    let mut downloads = Vec::new();
    if !args.no_download && !outcome.report.results.is_empty() {
        let downloader = Downloader::new(&config.output_dir);
        eprintln!("\n💾 Saving to {}", downloader.output_dir().display());
        for (result, saved) in outcome
            .report
            .results
            .iter()
            .zip(downloader.save_all(&outcome.report.results, DOWNLOAD_STAGGER).await)
        {
            match saved {
                Ok(path) => {
                    eprintln!("   {} ({})", path.display(), file_size(&path));
                    downloads.push(path);
                }
                Err(e) => eprintln!("   ❌ {}: {}", result.original_name, e),
            }
        }
    }

    if let Some(path) = args.report {
        RunRecord::new(&config.api_url, outcome.manifest, outcome.report.clone())
            .with_downloads(downloads)
            .write(&path)?;
        eprintln!("   📝 Report saved to: {}", path.display());
    }

    if outcome.report.results.is_empty() {
        return Err("No photo could be restored".into());
    }

    eprintln!("\n✨ Done!");
    Ok(())
}

fn file_size(path: &Path) -> String {
    std::fs::metadata(path)
        .map(|m| format_file_size(m.len()))
        .unwrap_or_else(|_| "?".to_string())
}

fn cmd_share(platform: Option<&str>, file: Option<&str>, origin: &str) -> Result<(), Box<dyn std::error::Error>> {
    let platforms = match platform {
        Some(name) => {
            vec![SharePlatform::from_name(name).ok_or_else(|| format!("Unknown platform '{}'", name))?]
        }
        None => SharePlatform::ALL.to_vec(),
    };

    let outcomes = share::perform_each(platforms.iter().map(|p| share_action(*p, file, origin)));
    for (platform, outcome) in platforms.iter().zip(outcomes) {
        println!("{}: {}", platform.label(), outcome.message());
    }
    Ok(())
}

fn cmd_settings(args: &SettingsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let settings = args.resolve()?;
    for enhancement in Enhancement::ALL {
        let mark = if settings.is_enabled(enhancement) { "✓" } else { " " };
        eprintln!("   [{}] {}", mark, enhancement.setting_label());
    }
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}
