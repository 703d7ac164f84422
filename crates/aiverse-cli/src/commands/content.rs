use aiverse_core::content::ContentRepository;
use anyhow::Result;

use crate::context::AppContext;

pub async fn blog(ctx: &AppContext) -> Result<()> {
    let posts = ctx.content_repository()?.blog_posts().await?;
    println!("Blog\n");
    for post in posts {
        println!("{}  {}", post.display_date(), post.title);
        println!("    {}", post.description);
        println!("    {}\n", post.link);
    }
    Ok(())
}

pub async fn learn(ctx: &AppContext) -> Result<()> {
    let tracks = ctx.content_repository()?.learning_tracks().await?;
    println!("Learn AI\n");
    for track in tracks {
        println!("{}", track.title);
        println!("    {}", track.description);
        println!("    {}\n", track.link);
    }
    Ok(())
}

pub async fn about(ctx: &AppContext) -> Result<()> {
    let page = ctx.content_repository()?.about().await?;
    println!("{}\n", page.title);
    println!("{}\n", page.intro);
    for section in &page.sections {
        println!("## {}", section.heading);
        println!("{}\n", section.body);
    }
    println!("{}", page.closing);
    Ok(())
}
