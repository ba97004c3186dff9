use std::{path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use browser_core::{
    markup,
    papers::parse_paper_lines,
    settings::{load_settings, Settings},
    verify::{verify_records, VerifyOptions, VerifyReport},
    view::conference_list_view,
    AppHost, LoadOutcome, ModeController, PaperArea, PaperStore, ReadySignal, SharedPage,
    StaticSiteHost,
};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "paper-browser",
    version,
    about = "Browse daily and conference paper sets published as a static site"
)]
struct Args {
    /// Site root: an http(s) URL or a directory.
    #[arg(long, global = true)]
    site: Option<String>,
    /// Settings file (defaults to ./paper_browser.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the conferences in the catalog.
    Catalog {
        #[arg(long)]
        json: bool,
    },
    /// Load and print one conference's papers.
    Show {
        id: String,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Load and print a day of papers, the latest one by default.
    Daily {
        #[arg(long)]
        date: Option<String>,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Check a JSON-lines paper file for required fields and types.
    Verify {
        file: PathBuf,
        #[arg(long)]
        source: Option<String>,
        #[arg(long)]
        id_prefix: Option<String>,
    },
    /// Print the conference picker list as an HTML fragment.
    ExportList,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
    Html,
}

struct Browser {
    page: SharedPage,
    host: Arc<StaticSiteHost>,
    controller: ModeController,
}

async fn open_browser(settings: &Settings) -> Result<Browser> {
    let site = settings.site_root()?;
    tracing::debug!(site = %site, "opening site");
    let source = site.into_source();
    let page = SharedPage::new();
    let store = Arc::new(Mutex::new(PaperStore::default()));
    let host = Arc::new(StaticSiteHost::new(
        source.clone(),
        Arc::new(page.clone()),
        store.clone(),
        settings.site_paths(),
    ));
    let controller = ModeController::new(
        source,
        host.clone(),
        Arc::new(page.clone()),
        store,
        settings.site_paths(),
    );

    let ready = ReadySignal::new();
    host.refresh_dates().await;
    ready.mark_ready();
    controller.init(&ready).await;

    Ok(Browser {
        page,
        host,
        controller,
    })
}

fn print_paper_area(area: &PaperArea, format: Format) -> Result<()> {
    match (area, format) {
        (PaperArea::Papers(cards), Format::Json) => {
            println!("{}", serde_json::to_string_pretty(cards)?);
        }
        (PaperArea::Placeholder(placeholder), Format::Json) => {
            println!("{}", serde_json::to_string_pretty(placeholder)?);
        }
        (PaperArea::Papers(cards), Format::Html) => print!("{}", markup::render_paper_cards(cards)),
        (PaperArea::Placeholder(placeholder), Format::Html) => {
            print!("{}", markup::render_placeholder(placeholder))
        }
        (PaperArea::Papers(cards), Format::Text) => {
            for (idx, card) in cards.iter().enumerate() {
                println!("{:>4}. {}", idx + 1, card.title);
                if !card.authors.is_empty() {
                    println!("      {}", card.authors.join(", "));
                }
                if let Some(url) = card.abs_url.as_deref().or(card.pdf_url.as_deref()) {
                    println!("      {url}");
                }
            }
        }
        (PaperArea::Placeholder(placeholder), Format::Text) => {
            println!("{}", placeholder.headline());
            for detail in placeholder.details() {
                println!("  {detail}");
            }
        }
    }
    Ok(())
}

async fn run_catalog(browser: &Browser, json: bool) -> Result<()> {
    let catalog = browser.controller.catalog().await;
    if json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }
    if catalog.is_empty() {
        println!("No conferences available");
        return Ok(());
    }
    for conference in &catalog {
        println!(
            "{:<20} {:<32} {:>5} papers  {}  {}",
            conference.id, conference.name, conference.count, conference.date, conference.category
        );
    }
    Ok(())
}

async fn run_show(browser: &Browser, id: &str, format: Format) -> Result<()> {
    let Some(conference) = browser
        .controller
        .catalog()
        .await
        .into_iter()
        .find(|c| c.id == id)
    else {
        bail!("unknown conference '{id}'");
    };

    let outcome = browser.controller.load_conference(conference).await;
    print_paper_area(browser.page.snapshot().paper_area(), format)?;
    if let LoadOutcome::Failed { message, .. } = outcome {
        bail!("failed to load conference '{id}': {message}");
    }
    Ok(())
}

async fn run_daily(browser: &Browser, date: Option<String>, format: Format) -> Result<()> {
    let date = match date {
        Some(date) => date,
        None => match browser.host.available_dates().await.into_iter().next() {
            Some(latest) => latest,
            None => bail!("the daily index lists no dates"),
        },
    };
    browser.host.load_papers_by_date(&date).await;
    let area = browser.page.snapshot().paper_area().clone();
    print_paper_area(&area, format)?;
    if let PaperArea::Placeholder(placeholder) = area {
        bail!("failed to load papers for {date}: {}", placeholder.details().join("; "));
    }
    Ok(())
}

fn print_verify_report(report: &VerifyReport) {
    println!("Total: {} papers", report.total);
    for record in &report.records {
        println!(
            "record {} ({}):",
            record.index,
            record.id.as_deref().unwrap_or("missing id")
        );
        for issue in &record.issues {
            println!("  - {issue}");
        }
    }
    if report.total > 0 {
        let pct = |n: usize| n as f64 * 100.0 / report.total as f64;
        println!(
            "Missing PDF: {} ({:.1}%)",
            report.missing_pdf,
            pct(report.missing_pdf)
        );
        println!("With PDF: {} ({:.1}%)", report.with_pdf(), pct(report.with_pdf()));
    }
}

async fn run_verify(file: PathBuf, options: VerifyOptions) -> Result<()> {
    let text = tokio::fs::read_to_string(&file)
        .await
        .with_context(|| format!("failed to read '{}'", file.display()))?;
    let records = parse_paper_lines(&text)
        .with_context(|| format!("failed to parse '{}'", file.display()))?;
    let report = verify_records(&records, &options);
    print_verify_report(&report);
    if !report.is_clean() {
        bail!("{} of {} records have issues", report.records.len(), report.total);
    }
    Ok(())
}

fn init_tracing(default_filter: &str, verbose: u8) {
    let fallback = match verbose {
        0 => default_filter.to_string(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let settings = load_settings(args.config.as_deref());
    init_tracing(
        settings
            .as_ref()
            .map(|s| s.log_filter.as_str())
            .unwrap_or("info"),
        args.verbose,
    );
    let mut settings = settings?;
    if let Some(site) = args.site {
        settings.site = site;
    }

    match args.command {
        Command::Verify {
            file,
            source,
            id_prefix,
        } => {
            run_verify(
                file,
                VerifyOptions {
                    expected_source: source,
                    id_prefix,
                },
            )
            .await
        }
        Command::Catalog { json } => run_catalog(&open_browser(&settings).await?, json).await,
        Command::Show { id, format } => run_show(&open_browser(&settings).await?, &id, format).await,
        Command::Daily { date, format } => {
            run_daily(&open_browser(&settings).await?, date, format).await
        }
        Command::ExportList => {
            let browser = open_browser(&settings).await?;
            let catalog = browser.controller.catalog().await;
            print!("{}", markup::render_conference_list(&conference_list_view(&catalog)));
            Ok(())
        }
    }
}
