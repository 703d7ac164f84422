use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod context;
mod logging;

use context::AppContext;

#[derive(Parser)]
#[command(name = "aiverse")]
#[command(about = "AIVERSE CLI - browse the AI tool directory", long_about = None)]
struct Cli {
    /// Load the tool catalog from this JSON file instead of the bundled one
    #[arg(long, global = true, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse and search the tool catalog
    Tools {
        #[command(subcommand)]
        action: ToolsAction,
    },
    /// Show a static page
    Content {
        #[command(subcommand)]
        page: ContentPage,
    },
    /// Check route access rules
    Route {
        #[command(subcommand)]
        action: RouteAction,
    },
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Walk through sign-in against the local identity provider
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
}

#[derive(Subcommand)]
enum ToolsAction {
    /// List tools in a category (the last one used when omitted)
    List {
        #[arg(short, long)]
        category: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Search names, descriptions and tags
    Search {
        query: String,
        #[arg(short, long, default_value = "All")]
        category: String,
        #[arg(long)]
        json: bool,
    },
    /// Show one tool
    Show {
        id: u32,
        #[arg(long)]
        json: bool,
    },
    /// List categories with tool counts
    Categories {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum ContentPage {
    /// Blog posts
    Blog,
    /// Learning tracks
    Learn,
    /// About page
    About,
}

#[derive(Subcommand)]
enum RouteAction {
    /// Print whether a destination renders or redirects
    Check {
        path: String,
        /// Check as a signed-in user with this display name
        #[arg(long = "as", value_name = "NAME", conflicts_with = "unknown")]
        as_user: Option<String>,
        /// Check before the identity provider has reported
        #[arg(long)]
        unknown: bool,
        #[arg(long)]
        json: bool,
    },
    /// List public and protected routes
    List,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the config file location
    Path,
    /// Print the effective configuration
    Show,
}

#[derive(Subcommand)]
enum AuthAction {
    /// Request a protected page, sign in by email link, and follow the redirects
    Demo {
        email: String,
        /// Page to request before signing in
        #[arg(long, default_value = "/applications")]
        to: String,
        /// Display name to set once signed in
        #[arg(long)]
        name: Option<String>,
        /// Image to upload as the profile photo once signed in
        #[arg(long, value_name = "FILE")]
        photo: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let apply_config_level = logging::init(cli.verbose);
    let ctx = AppContext::load(cli.catalog)?;
    apply_config_level(&ctx.config.logging.level)?;

    match cli.command {
        Commands::Tools { action } => match action {
            ToolsAction::List { category, json } => commands::tools::list(&ctx, category, json).await?,
            ToolsAction::Search { query, category, json } => {
                commands::tools::search(&ctx, &query, &category, json).await?
            }
            ToolsAction::Show { id, json } => commands::tools::show(&ctx, id, json).await?,
            ToolsAction::Categories { json } => commands::tools::categories(&ctx, json).await?,
        },
        Commands::Content { page } => match page {
            ContentPage::Blog => commands::content::blog(&ctx).await?,
            ContentPage::Learn => commands::content::learn(&ctx).await?,
            ContentPage::About => commands::content::about(&ctx).await?,
        },
        Commands::Route { action } => match action {
            RouteAction::Check {
                path,
                as_user,
                unknown,
                json,
            } => commands::route::check(&ctx, &path, as_user, unknown, json)?,
            RouteAction::List => commands::route::list(&ctx)?,
        },
        Commands::Config { action } => match action {
            ConfigAction::Path => commands::config::path(&ctx),
            ConfigAction::Show => commands::config::show(&ctx)?,
        },
        Commands::Auth { action } => match action {
            AuthAction::Demo { email, to, name, photo } => {
                commands::auth::demo(&ctx, &email, &to, name, photo).await?
            }
        },
    }

    Ok(())
}
