// src/main.rs
// Registrar - academic records MCP server

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

use registrar::catalog::Catalog;
use registrar::config::Settings;
use registrar::registry::EnrollmentRegistry;
use registrar::server::RegistrarServer;

#[derive(Parser)]
#[command(name = "registrar")]
#[command(about = "Academic records MCP server")]
#[command(version)]
struct Cli {
    /// Course catalog file (JSON). Overrides REGISTRAR_CATALOG; the
    /// built-in seed catalog is used when neither is set.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Student seed records file (JSON). Overrides REGISTRAR_STUDENTS.
    #[arg(long, global = true)]
    students: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run as MCP server over stdio (default)
    Serve,

    /// Validate a catalog file and report unknown prerequisite references
    Catalog,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The MCP transport owns stdout, so logs go to stderr and the
    // serve path stays quiet.
    let log_level = match &cli.command {
        None | Some(Commands::Serve) => Level::WARN,
        Some(Commands::Catalog) => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut settings = Settings::load();
    if cli.catalog.is_some() {
        settings.catalog_path = cli.catalog;
    }
    if cli.students.is_some() {
        settings.students_path = cli.students;
    }
    for warning in settings.validate() {
        warn!("{}", warning);
    }

    match cli.command {
        None | Some(Commands::Serve) => run_mcp_server(&settings).await,
        Some(Commands::Catalog) => check_catalog(&settings),
    }
}

async fn run_mcp_server(settings: &Settings) -> Result<()> {
    let catalog = Arc::new(build_catalog(settings)?);
    let registry = Arc::new(build_registry(settings)?);
    info!("Catalog loaded: {} courses", catalog.courses().len());

    let server = RegistrarServer::new(catalog, registry);

    // Run with stdio transport
    let transport = rmcp::transport::io::stdio();
    let service = rmcp::serve_server(server, transport).await?;
    service.waiting().await?;

    Ok(())
}

fn build_catalog(settings: &Settings) -> Result<Catalog> {
    match &settings.catalog_path {
        Some(path) if path.exists() => Catalog::load(path),
        _ => Ok(Catalog::seed()),
    }
}

fn build_registry(settings: &Settings) -> Result<EnrollmentRegistry> {
    match &settings.students_path {
        Some(path) if path.exists() => EnrollmentRegistry::load(path),
        _ => Ok(EnrollmentRegistry::seed()),
    }
}

fn check_catalog(settings: &Settings) -> Result<()> {
    let catalog = build_catalog(settings)?;

    println!("{} courses", catalog.courses().len());
    for course in catalog.courses() {
        let prereqs = if course.prerequisites.is_empty() {
            "none".to_string()
        } else {
            course.prerequisites.join(", ")
        };
        println!("  {} - {} (prerequisites: {})", course.id, course.title, prereqs);
    }

    let dangling = catalog.unknown_prerequisites();
    if dangling.is_empty() {
        println!("All prerequisite references resolve.");
    } else {
        for (course_id, prereq) in &dangling {
            println!("  warning: {} lists unknown prerequisite {}", course_id, prereq);
        }
        println!(
            "{} unknown prerequisite reference(s); treated as unsatisfiable at runtime.",
            dangling.len()
        );
    }

    Ok(())
}
