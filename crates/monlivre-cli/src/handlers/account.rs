use super::HandlerContext;
use crate::presentation::presenters;
use anyhow::{Result, anyhow};
use monlivre_types::{Credentials, Registration};

pub async fn login(ctx: HandlerContext<'_>, credentials: Credentials) -> Result<()> {
    let auth = ctx.workspace.auth();
    match auth.login(&credentials).await {
        Ok(grant) => ctx.render(presenters::present_login(&grant, auth.notifications())),
        Err(err) => ctx.fail("login", err, auth.notifications()),
    }
}

pub async fn register(ctx: HandlerContext<'_>, registration: Registration) -> Result<()> {
    let auth = ctx.workspace.auth();
    match auth.signup(&registration).await {
        Ok(()) => ctx.render(presenters::present_signup(auth.notifications())),
        Err(err) => ctx.fail("register", err, auth.notifications()),
    }
}

pub fn logout(ctx: HandlerContext<'_>) -> Result<()> {
    let auth = ctx.workspace.auth();
    auth.logout()?;
    ctx.render(presenters::present_logout(auth.notifications()))
}

pub fn whoami(ctx: HandlerContext<'_>) -> Result<()> {
    let session = ctx.workspace.session()?;
    ctx.render(presenters::present_session(&session))
}

pub async fn profile(ctx: HandlerContext<'_>) -> Result<()> {
    let dashboard = ctx.workspace.dashboard().await?;
    let profile = dashboard
        .profile()
        .ok_or_else(|| anyhow!("the backend returned no profile"))?;
    ctx.render(presenters::present_profile(&profile, dashboard.stats()))
}
