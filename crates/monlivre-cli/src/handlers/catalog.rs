use super::HandlerContext;
use crate::presentation::presenters;
use crate::presentation::view_models::CatalogFilters;
use anyhow::Result;
use monlivre_engine::catalog::CatalogQuery;
use monlivre_runtime::Error;
use monlivre_types::{BookId, parse_date_arg};

pub async fn list(ctx: HandlerContext<'_>, filters: CatalogFilters) -> Result<()> {
    let page = ctx.workspace.catalog().await?;

    let mut query = CatalogQuery::new();
    if let Some(title) = &filters.title {
        query = query.title(title.as_str());
    }
    if let Some(author) = &filters.author {
        query = query.author(author.as_str());
    }
    if let Some(genre) = &filters.genre {
        query = query.genre(genre.as_str());
    }

    let shown = page.search(&query);
    let total = page.books().len();
    ctx.render(presenters::present_catalog_list(
        &shown,
        total,
        filters,
        ctx.placeholder_cover(),
    ))
}

pub async fn show(ctx: HandlerContext<'_>, id: i64) -> Result<()> {
    let page = ctx.workspace.catalog().await?;
    let id = BookId::new(id);
    let book = page
        .book(id)
        .ok_or_else(|| Error::NotFound(format!("book {}", id)))?;
    ctx.render(presenters::present_catalog_detail(&book, ctx.placeholder_cover()))
}

pub async fn borrow(ctx: HandlerContext<'_>, id: i64, return_date: &str) -> Result<()> {
    let return_date = parse_date_arg(return_date)?;
    let page = ctx.workspace.catalog().await?;
    let id = BookId::new(id);

    match page.borrow(id, return_date).await {
        Ok(()) => {
            let vm = presenters::present_borrow(
                id,
                return_date,
                page.book(id).as_ref(),
                ctx.placeholder_cover(),
                page.notifications(),
            );
            ctx.render(vm)
        }
        Err(err) => ctx.fail("borrow", err, page.notifications()),
    }
}
