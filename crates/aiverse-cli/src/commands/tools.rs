use aiverse_application::{CatalogBrowser, CatalogView, ToolCard};
use aiverse_core::AiverseError;
use aiverse_core::catalog::ALL_CATEGORY;
use aiverse_core::state::StateRepository;
use anyhow::{Context, Result};

use super::utils::{print_json, truncate};
use crate::context::AppContext;

async fn browser(ctx: &AppContext) -> Result<CatalogBrowser> {
    let mut browser = CatalogBrowser::new(ctx.config.catalog.tag_display_limit);
    browser.load(&ctx.catalog_repository()).await?;
    Ok(browser)
}

fn print_view(view: &CatalogView, json: bool) -> Result<()> {
    if json {
        return print_json(view);
    }

    match view {
        CatalogView::Loading => println!("Loading..."),
        CatalogView::NoMatches { query, category } => {
            if query.is_empty() {
                println!("No tools in '{}'.", category);
            } else {
                println!("No tools match '{}' in '{}'.", query, category);
            }
        }
        CatalogView::Results { tools } => {
            for card in tools {
                print_card_line(card);
            }
            println!("\n{} tool(s)", tools.len());
        }
    }
    Ok(())
}

fn print_card_line(card: &ToolCard) {
    let mut tags = card.tags.join(", ");
    if card.hidden_tags > 0 {
        tags.push_str(&format!(" +{}", card.hidden_tags));
    }
    println!(
        "{:>4}  {:<24} {:<22} {:.1}  [{}]",
        card.id,
        truncate(&card.name, 24),
        truncate(&card.category, 22),
        card.rating,
        tags
    );
}

/// Lists one category. Without `--category`, the last category used is
/// shown; a given category is remembered for next time.
pub async fn list(ctx: &AppContext, category: Option<String>, json: bool) -> Result<()> {
    let state = ctx.state_repository().await?;
    let mut browser = browser(ctx).await?;

    let requested = match category {
        Some(label) => label,
        None => state
            .get_last_category()
            .await
            .unwrap_or_else(|| ALL_CATEGORY.to_string()),
    };
    let selected = browser.select_category(&requested).to_string();
    if selected != requested {
        eprintln!("Unknown category '{}', showing {}", requested, selected);
    }
    state
        .set_last_category(selected.clone())
        .await
        .context("Failed to remember category")?;

    if !json {
        println!("Category: {}\n", selected);
    }
    print_view(&browser.view(), json)
}

pub async fn search(ctx: &AppContext, query: &str, category: &str, json: bool) -> Result<()> {
    let mut browser = browser(ctx).await?;
    browser.select_category(category);
    browser.set_query(query);
    print_view(&browser.view(), json)
}

pub async fn show(ctx: &AppContext, id: u32, json: bool) -> Result<()> {
    let browser = browser(ctx).await?;
    let record = browser
        .catalog()
        .and_then(|catalog| catalog.get(id))
        .ok_or_else(|| AiverseError::not_found("Tool", id.to_string()))?;

    if json {
        return print_json(record);
    }

    println!("{} (#{})", record.name, record.id);
    println!("  Category: {}", record.category);
    println!("  Rating:   {:.1}", record.rating);
    println!("  Link:     {}", record.link);
    println!("  Tags:     {}", record.tags.join(", "));
    println!("\n{}", record.description);
    Ok(())
}

pub async fn categories(ctx: &AppContext, json: bool) -> Result<()> {
    let browser = browser(ctx).await?;
    let summaries = browser.categories();

    if json {
        return print_json(&summaries);
    }

    for summary in &summaries {
        println!("{:>4}  {}", summary.count, summary.name);
    }
    Ok(())
}
