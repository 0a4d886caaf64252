use std::io::{self, Write};

use bistro::posts::Post;
use bistro_app::{
    context::AppContext,
    domain::posts::{Article, PostsServiceError, load_article},
};
use clap::Args;
use jiff::{Zoned, civil::DateTime};

use super::{report, write_failed};

#[derive(Debug, Args)]
pub(crate) struct PostArgs {
    /// Post slug
    slug: String,
}

pub(crate) async fn run(context: &AppContext, args: &PostArgs) -> Result<(), String> {
    let slug = &args.slug;

    let article = match load_article(context.posts.as_ref(), slug).await {
        Ok(article) => article,
        Err(PostsServiceError::NotFound) => {
            return Err(format!("no published post with slug {slug:?}"));
        }
        Err(error) => return Err(report("failed to load post", &error)),
    };

    write_article(io::stdout().lock(), &article, Zoned::now().datetime()).map_err(write_failed)
}

fn write_article(mut out: impl Write, article: &Article, now: DateTime) -> io::Result<()> {
    let post = &article.post;

    writeln!(out, "{}", post.title)?;
    writeln!(out, "{}", byline(post))?;

    if let Some(description) = &post.description {
        writeln!(out, "\n{description}")?;
    }

    if let Some(voucher) = post.active_voucher() {
        writeln!(
            out,
            "\nVoucher {}: {} off ({})",
            voucher.code,
            voucher.describe(),
            voucher.name
        )?;

        if let Some(end) = voucher.end_date {
            writeln!(out, "Valid until {}", end.strftime("%d/%m/%Y %H:%M"))?;
        }

        if !voucher.is_redeemable_at(now) {
            writeln!(out, "Not redeemable right now")?;
        }
    }

    if !article.related.is_empty() {
        writeln!(out, "\nRelated posts")?;

        for related in &article.related {
            writeln!(out, "  {} ({})", related.title, related.slug)?;
        }
    }

    Ok(())
}

fn byline(post: &Post) -> String {
    let mut parts = Vec::new();

    if let Some(author) = &post.author {
        parts.push(author.name.clone());
    }

    if let Some(created_at) = post.created_at {
        parts.push(created_at.strftime("%d/%m/%Y").to_string());
    }

    if let Some(minutes) = post.reading_time {
        parts.push(format!("{minutes} min read"));
    }

    parts.push(format!("{} views", post.views));

    parts.join(" · ")
}
