mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "coursetag")]
#[command(about = "Keyword tag generator for college course names and descriptions", long_about = None)]
#[command(version)]
struct Cli {
    #[arg(short, long, global = true, help = "Enable debug logging on stderr")]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    // ===== MCP Server (also default) =====
    /// Start MCP server over stdio
    #[cfg(feature = "mcp")]
    Mcp,

    // ===== Tagging =====
    /// Generate tags for a single course
    Generate {
        #[arg(long, short, help = "Course name")]
        name: String,
        #[arg(long, short, help = "Course description")]
        desc: String,
        #[arg(long, help = "JSON output")]
        json: bool,
    },
    /// Tag every row of a CSV file with 'Course Name' and 'Course Desc' columns
    Process {
        file: PathBuf,
        #[arg(long, short, help = "Directory for CourseTagGen_Result.csv")]
        output_dir: Option<PathBuf>,
        #[arg(long, help = "JSON output")]
        json: bool,
    },

    // ===== Setup =====
    /// Write a default .coursetag.json config
    Init {
        #[arg(long, help = "Overwrite an existing config")]
        force: bool,
    },
    /// Manage the embedding model
    Model {
        /// Subcommand: download, status
        #[arg(default_value = "status")]
        action: String,
        #[arg(long, help = "JSON output")]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    coursetag::core::logging::init(cli.verbose);

    match cli.command {
        #[cfg(feature = "mcp")]
        None | Some(Commands::Mcp) => run_mcp_server(),
        #[cfg(not(feature = "mcp"))]
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
            Ok(())
        }

        Some(Commands::Generate { name, desc, json }) => {
            commands::generate::run(&name, &desc, json)
        }
        Some(Commands::Process {
            file,
            output_dir,
            json,
        }) => commands::process::run(&file, output_dir, json),

        Some(Commands::Init { force }) => commands::init::run(force),
        Some(Commands::Model { action, json }) => commands::model::run(&action, json),
    }
}

#[cfg(feature = "mcp")]
fn run_mcp_server() -> anyhow::Result<()> {
    use anyhow::Context;
    use coursetag::core::config::Config;
    use coursetag::core::paths::working_dir;

    let root = working_dir();
    let config = Config::load(&root);
    let extractor =
        coursetag::tags::initialize(&config).context("Failed to load keyword model")?;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(coursetag::mcp::run_mcp_server(
        extractor,
        config.output_dir(&root),
    ))
}
