use super::args::{
    AdminCommand, BookCommand, CatalogCommand, Cli, Commands, LoanCommand, StudentCommand,
};
use super::handlers::{self, HandlerContext, admin::AdminAction};
use super::logging;
use crate::presentation::view_models::CatalogFilters;
use anyhow::Result;
use monlivre_runtime::{Config, MonLivre, SessionStore, resolve_workspace_path};
use monlivre_types::{AccountId, BookId, Credentials, Registration, StudentForm};
use std::path::Path;

pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_level, cli.log_json);

    let data_dir = resolve_workspace_path(cli.data_dir.as_deref())?;
    tracing::debug!(path = %data_dir.display(), "workspace resolved");

    let Some(command) = cli.command else {
        show_guidance(&data_dir)?;
        return Ok(());
    };

    let mut config = Config::load_from(&data_dir.join("config.toml"))?;
    if let Some(base_url) = cli.base_url {
        config.backend.base_url = base_url;
        config.validate()?;
    }

    let workspace = MonLivre::open_with(data_dir, config)?;
    let ctx = HandlerContext::new(&workspace, cli.format);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(dispatch(ctx, command))
}

async fn dispatch(ctx: HandlerContext<'_>, command: Commands) -> Result<()> {
    match command {
        Commands::Login { email, password } => {
            handlers::account::login(ctx, Credentials { email, password }).await
        }

        Commands::Logout => handlers::account::logout(ctx),

        Commands::Register {
            name,
            email,
            password,
            confirm_password,
        } => {
            let registration = Registration {
                name,
                email,
                password,
                confirm_password,
            };
            handlers::account::register(ctx, registration).await
        }

        Commands::Whoami => handlers::account::whoami(ctx),

        Commands::Profile => handlers::account::profile(ctx).await,

        Commands::Config => handlers::config::show(ctx),

        Commands::Loans { command } => match command {
            LoanCommand::List { query, view_mode } => {
                handlers::loans::list(ctx.with_view_mode(&view_mode), query).await
            }
            LoanCommand::Show { id } => handlers::loans::show(ctx, id).await,
            LoanCommand::Renew { id } => handlers::loans::renew(ctx, id).await,
            LoanCommand::Return { id } => handlers::loans::return_book(ctx, id).await,
        },

        Commands::Catalog { command } => match command {
            CatalogCommand::List {
                title,
                author,
                genre,
                view_mode,
            } => {
                let filters = CatalogFilters {
                    title,
                    author,
                    genre,
                    any: None,
                };
                handlers::catalog::list(ctx.with_view_mode(&view_mode), filters).await
            }
            CatalogCommand::Show { id } => handlers::catalog::show(ctx, id).await,
            CatalogCommand::Borrow { id, return_date } => {
                handlers::catalog::borrow(ctx, id, &return_date).await
            }
        },

        Commands::Admin { command } => match command {
            AdminCommand::Books { command } => match command {
                BookCommand::List { query, view_mode } => {
                    handlers::admin::list_books(ctx.with_view_mode(&view_mode), query).await
                }
                BookCommand::Add { fields } => {
                    handlers::admin::mutate(ctx, AdminAction::AddBook(fields.into())).await
                }
                BookCommand::Update { id, fields } => {
                    let action = AdminAction::UpdateBook(BookId::new(id), fields.into());
                    handlers::admin::mutate(ctx, action).await
                }
                BookCommand::Delete { id } => {
                    handlers::admin::mutate(ctx, AdminAction::DeleteBook(BookId::new(id))).await
                }
            },
            AdminCommand::Students { command } => match command {
                StudentCommand::List { query, view_mode } => {
                    handlers::admin::list_students(ctx.with_view_mode(&view_mode), query).await
                }
                StudentCommand::Add { name, email } => {
                    let action = AdminAction::AddStudent(StudentForm { name, email });
                    handlers::admin::mutate(ctx, action).await
                }
                StudentCommand::Update { id, name, email } => {
                    let action =
                        AdminAction::UpdateStudent(AccountId::new(id), StudentForm { name, email });
                    handlers::admin::mutate(ctx, action).await
                }
                StudentCommand::Delete { id } => {
                    let action = AdminAction::DeleteStudent(AccountId::new(id));
                    handlers::admin::mutate(ctx, action).await
                }
            },
        },
    }
}

fn show_guidance(data_dir: &Path) -> Result<()> {
    use crate::args::hints::cmd;

    println!("monlivre - MonLivre library client\n");

    let session = SessionStore::in_workspace(data_dir).load()?;
    match session.user_id() {
        None => {
            println!("Get started:");
            println!("  {}", cmd::LOGIN);
            println!("  {}\n", cmd::REGISTER);
            println!("Without an account you can still browse:");
            println!("  {}\n", cmd::CATALOG_LIST);
        }
        Some(user) if session.is_admin() => {
            println!("Logged in as {} (admin)\n", user);
            println!("Quick commands:");
            println!("  monlivre admin books list");
            println!("  monlivre admin students list");
            println!("  {}\n", cmd::ADMIN_BOOKS_ADD);
        }
        Some(user) => {
            println!("Logged in as {}\n", user);
            println!("Quick commands:");
            println!("  {}", cmd::LOANS_LIST);
            println!("  {}", cmd::PROFILE);
            println!("  {}\n", cmd::CATALOG_BORROW);
        }
    }

    println!("Configuration: {}", cmd::CONFIG);
    println!("For more commands:");
    println!("  monlivre --help");
    Ok(())
}
