use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use orgchart_cli::{resolve_guarded_bind_addr, router, AppState};
use orgchart_indexer::{
    load_catalog, Catalog, CatalogHandle, LoadStats, LoadStatus, LoaderConfig, ReportWatcher,
    WatchConfig, DEFAULT_REPORT_NAME,
};
use orgchart_query::{DatasetSelector, OrgQuery};
use serde::Serialize;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;

const DATA_DIR_ENV: &str = "ORGCHART_DATA_DIR";
const REPORT_NAME_ENV: &str = "ORGCHART_REPORT_NAME";

#[derive(Parser)]
#[command(name = "orgchart")]
#[command(about = "Org chart and leadership views over the workforce report", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding the report (overrides ORGCHART_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Substring of the report file name (overrides ORGCHART_REPORT_NAME)
    #[arg(long, global = true)]
    report_name: Option<String>,

    /// Banner rows above the header row
    #[arg(long, global = true, default_value_t = 1)]
    skip_rows: usize,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the org chart HTTP API
    Serve(ServeArgs),

    /// Show load status, statistics and groups
    Summary,

    /// Print ranked chart rows for a group label or CCAR
    Chart(ChartArgs),

    /// Print the manager roster of a division
    Managers(ManagersArgs),

    /// Print every employee and the cities they work in
    Employees,
}

#[derive(Args)]
struct ServeArgs {
    /// Bind address, e.g. 127.0.0.1:5000
    #[arg(long, default_value = "127.0.0.1:5000")]
    bind: String,

    /// Allow binding to non-loopback addresses
    #[arg(long)]
    public: bool,

    /// Reload the catalog when the report changes
    #[arg(long)]
    watch: bool,
}

#[derive(Args)]
struct ChartArgs {
    /// Group label, or CCAR
    group: String,

    /// Employee ID to mark in the output
    #[arg(long)]
    highlight: Option<String>,
}

#[derive(Args)]
struct ManagersArgs {
    /// Group label, or CCAR
    division: String,
}

#[derive(Serialize)]
struct GroupSummary<'a> {
    label: &'a str,
    key: u32,
    members: usize,
    chart_members: usize,
}

#[derive(Serialize)]
struct CatalogSummary<'a> {
    #[serde(flatten)]
    status: &'a LoadStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
    stats: &'a LoadStats,
    groups: Vec<GroupSummary<'a>>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut cli = Cli::parse();

    // Keep stderr quiet for one-shot JSON commands unless asked otherwise.
    let json_output = !matches!(cli.command, Commands::Serve(_));
    if json_output && !cli.verbose {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let loader = loader_config(&cli);
    let pretty = cli.pretty;

    match cli.command {
        Commands::Serve(args) => run_serve(args, loader).await?,
        Commands::Summary => {
            let catalog = load(&loader)?;
            print_json(&summarize(&catalog), pretty)?;
        }
        Commands::Chart(args) => {
            let catalog = load(&loader)?;
            let page = OrgQuery::new(&catalog)
                .chart_page(&DatasetSelector::parse(&args.group), args.highlight)?;
            print_json(&page, pretty)?;
        }
        Commands::Managers(args) => {
            let catalog = load(&loader)?;
            let page = OrgQuery::new(&catalog).managers_page(Some(&args.division))?;
            print_json(&page, pretty)?;
        }
        Commands::Employees => {
            let catalog = load(&loader)?;
            let directory = OrgQuery::new(&catalog).all_employees_with_cities();
            print_json(&directory.to_payload(), pretty)?;
        }
    }

    Ok(())
}

fn loader_config(cli: &Cli) -> LoaderConfig {
    let data_dir = cli
        .data_dir
        .clone()
        .or_else(|| env::var_os(DATA_DIR_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));
    let base_name = cli
        .report_name
        .clone()
        .or_else(|| env::var(REPORT_NAME_ENV).ok())
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_REPORT_NAME.to_string());

    LoaderConfig {
        base_name,
        skip_rows: cli.skip_rows,
        ..LoaderConfig::new(data_dir)
    }
}

fn load(loader: &LoaderConfig) -> Result<Catalog> {
    let catalog = load_catalog(loader).with_context(|| {
        format!(
            "Failed to load '{}' report from {}",
            loader.base_name,
            loader.data_dir.display()
        )
    })?;
    if let LoadStatus::Degraded { reason } = catalog.load_status() {
        log::warn!("Catalog is degraded: {reason}");
    }
    Ok(catalog)
}

fn summarize(catalog: &Catalog) -> CatalogSummary<'_> {
    let groups = catalog
        .group_labels()
        .filter_map(|label| {
            let key = catalog.group_key(label)?;
            Some(GroupSummary {
                label,
                key,
                members: catalog.group_dataset(key).map_or(0, |d| d.len()),
                chart_members: catalog.chart_dataset(key).map_or(0, |d| d.len()),
            })
        })
        .collect();
    CatalogSummary {
        status: catalog.load_status(),
        source: catalog.source().map(|path| path.display().to_string()),
        stats: catalog.stats(),
        groups,
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}

async fn run_serve(args: ServeArgs, loader: LoaderConfig) -> Result<()> {
    let addr = resolve_guarded_bind_addr(&args.bind, args.public).await?;
    let handle = Arc::new(CatalogHandle::new(load(&loader)?));

    let watcher = if args.watch {
        Some(
            ReportWatcher::start(handle.clone(), loader, WatchConfig::default())
                .context("Failed to start report watcher")?,
        )
    } else {
        None
    };

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    println!("Serving org chart on http://{}", listener.local_addr()?);
    axum::serve(listener, router(AppState::new(handle)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(watcher) = watcher {
        watcher.shutdown().await;
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::warn!("Failed to listen for ctrl-c: {err}");
        std::future::pending::<()>().await;
    }
    log::info!("Shutting down");
}
