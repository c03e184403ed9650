use super::HandlerContext;
use crate::presentation::presenters;
use anyhow::Result;
use monlivre_engine::RenewOutcome;
use monlivre_runtime::Error;
use monlivre_types::LoanId;

pub async fn list(ctx: HandlerContext<'_>, query: Option<String>) -> Result<()> {
    let dashboard = ctx.workspace.dashboard().await?;
    let all = dashboard.loans();
    let query = query.filter(|q| !q.is_empty());
    let shown = match query.as_deref() {
        Some(q) => dashboard.search(q),
        None => all.clone(),
    };

    let vm = presenters::present_loan_list(
        ctx.loan_display(&dashboard),
        &shown,
        all.len(),
        query,
        dashboard.stats(),
    );
    ctx.render(vm)
}

pub async fn show(ctx: HandlerContext<'_>, id: i64) -> Result<()> {
    let dashboard = ctx.workspace.dashboard().await?;
    let id = LoanId::new(id);
    let loans = dashboard.loans();
    let book = loans
        .iter()
        .find(|b| b.id == id)
        .ok_or_else(|| Error::NotFound(format!("loan {}", id)))?;

    ctx.render(presenters::present_loan_detail(ctx.loan_display(&dashboard), book))
}

pub async fn renew(ctx: HandlerContext<'_>, id: i64) -> Result<()> {
    let dashboard = ctx.workspace.dashboard().await?;
    let id = LoanId::new(id);

    match dashboard.renew(id).await {
        Ok(outcome) => {
            let vm = presenters::present_renew(
                ctx.loan_display(&dashboard),
                id,
                outcome,
                &dashboard.loans(),
                dashboard.notifications(),
            );
            ctx.render(vm)?;
            if outcome == RenewOutcome::NotFound {
                return Err(Error::NotFound(format!("loan {}", id)).into());
            }
            Ok(())
        }
        Err(err) => ctx.fail("renew", err, dashboard.notifications()),
    }
}

pub async fn return_book(ctx: HandlerContext<'_>, id: i64) -> Result<()> {
    let dashboard = ctx.workspace.dashboard().await?;
    let id = LoanId::new(id);

    match dashboard.return_book(id).await {
        Ok(()) => {
            let vm = presenters::present_return(
                ctx.loan_display(&dashboard),
                id,
                &dashboard.loans(),
                dashboard.notifications(),
            );
            ctx.render(vm)
        }
        Err(err) => ctx.fail("return", err, dashboard.notifications()),
    }
}
