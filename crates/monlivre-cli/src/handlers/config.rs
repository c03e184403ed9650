use super::HandlerContext;
use crate::presentation::presenters;
use anyhow::Result;

pub fn show(ctx: HandlerContext<'_>) -> Result<()> {
    let data_dir = ctx.workspace.data_dir();
    let exists = data_dir.join("config.toml").exists();
    ctx.render(presenters::present_config(data_dir, exists, ctx.workspace.config()))
}
