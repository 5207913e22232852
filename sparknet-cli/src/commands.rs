//! Command implementations

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use sparknet_lib::backend::Query;
use sparknet_lib::backend::Session;
use sparknet_lib::backend::memory::MemoryAuth;
use sparknet_lib::backend::memory::MemoryDocumentStore;
use sparknet_lib::backend::memory::MemoryFileStore;
use sparknet_lib::console::Console;
use sparknet_lib::console::StatusSelect;
use sparknet_lib::model::Collection;
use sparknet_lib::model::Entity;
use sparknet_lib::model::Record;
use sparknet_lib::model::types::FeedbackRequest;
use sparknet_lib::model::types::FeedbackStatus;
use sparknet_lib::model::types::Member;
use sparknet_lib::model::types::MemberStatus;
use sparknet_lib::model::types::Milestone;
use sparknet_lib::model::types::MilestoneStatus;
use sparknet_lib::model::types::Opportunity;
use sparknet_lib::model::types::OpportunityStatus;
use sparknet_lib::model::types::Project;
use sparknet_lib::model::types::ProjectStatus;
use sparknet_lib::model::types::Status;
use sparknet_lib::table::Column;
use sparknet_lib::table::DebouncedInput;
use sparknet_lib::table::TableView;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;

use crate::cli::Cli;
use crate::cli::Command;
use crate::cli::ListArgs;
use crate::cli::SearchArgs;
use crate::cli::StatusKind;
use crate::config::Config;
use crate::error::CliError;
use crate::paths;
use crate::render;
use crate::session;

/// Alias that lists members in the applicant stage.
const APPLICANTS: &str = "applicants";

/// Everything a command needs.
struct Context {
    console: Console,
    session: Option<Session>,
    offline: bool,
}

pub async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = Config::load_default()?;
    config.apply(&cli.backend);

    let session_path = paths::session_file();
    let saved = match &session_path {
        Some(path) => session::load(path)?,
        None => None,
    };

    let ctx = match &cli.file {
        Some(file) => offline_context(file, &config)?,
        None => online_context(&config, saved)?,
    };

    match cli.command {
        Command::List(args) => list(&ctx, &args).await,
        Command::Search(args) => search(&ctx, &args).await,
        Command::Login { email, password } => {
            let session = ctx.console.sign_in(&email, &password).await?;
            if let Some(path) = &session_path {
                session::save(path, &session)?;
            }
            println!("Signed in as {email}");
            Ok(())
        }
        Command::Logout => {
            let session = ctx.session.as_ref().ok_or(CliError::NotSignedIn)?;
            ctx.console.sign_out(session).await?;
            if let Some(path) = &session_path {
                session::clear(path)?;
            }
            println!("Signed out");
            Ok(())
        }
        Command::Whoami => whoami(&ctx).await,
        Command::Status { kind, id, status } => change_status(&ctx, kind, &id, &status).await,
        Command::Assign {
            project_id,
            stakeholder_id,
        } => {
            warn_if_offline(&ctx);
            let project = ctx
                .console
                .assign_stakeholder(&project_id, &stakeholder_id)
                .await?;
            println!(
                "{} now has {} stakeholder(s)",
                project.name,
                project.stakeholder_ids.len()
            );
            Ok(())
        }
        Command::Avatar {
            member_id,
            path,
            width,
            height,
        } => {
            warn_if_offline(&ctx);
            let bytes = tokio::fs::read(&path)
                .await
                .map_err(|source| CliError::ReadFile {
                    path: path.clone(),
                    source,
                })?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "avatar".to_string());
            let url = ctx
                .console
                .set_avatar(&member_id, &file_name, bytes, width, height)
                .await?;
            println!("{url}");
            Ok(())
        }
    }
}

fn online_context(config: &Config, session: Option<Session>) -> Result<Context, CliError> {
    let mut client = config.client()?;
    if let Some(session) = &session {
        client = client.with_session(session);
    }
    let console_config = config.console_config()?;
    let store = Arc::new(client.documents(console_config.database.clone()));
    let client = Arc::new(client);

    Ok(Context {
        console: Console::new(store, client.clone(), client, console_config),
        session,
        offline: false,
    })
}

/// Loads an export of the form `{"<collection id>": [documents...]}`.
fn offline_context(file: &Path, config: &Config) -> Result<Context, CliError> {
    let text = fs::read_to_string(file).map_err(|source| CliError::ReadFile {
        path: file.to_path_buf(),
        source,
    })?;
    let export: BTreeMap<String, Vec<Record>> = serde_json::from_str(&text)?;

    let store = MemoryDocumentStore::new();
    for (collection, records) in export {
        log::debug!("Loaded {} {collection} from export", records.len());
        store.insert_all(&collection, records);
    }

    Ok(Context {
        console: Console::new(
            Arc::new(store),
            Arc::new(MemoryAuth::new()),
            Arc::new(MemoryFileStore::new()),
            config.console_config()?,
        ),
        session: None,
        offline: true,
    })
}

fn warn_if_offline(ctx: &Context) {
    if ctx.offline {
        log::warn!("Offline mode: changes are not written back to the export");
        eprintln!("note: offline mode, changes are not saved");
    }
}

fn parse_collection(name: &str) -> Result<Collection, CliError> {
    Collection::parse(name).ok_or_else(|| {
        let known: Vec<&str> = Collection::ALL.iter().map(|c| c.default_id()).collect();
        CliError::usage(format!(
            "unknown collection '{name}', expected one of: {}",
            known.join(", ")
        ))
    })
}

async fn fetch(ctx: &Context, name: &str) -> Result<(Collection, Vec<Record>), CliError> {
    let collection = parse_collection(name)?;
    let records = if name.eq_ignore_ascii_case(APPLICANTS) {
        let query = Query::new()
            .equal("status", MemberStatus::Applicant.as_str())
            .newest_first();
        ctx.console.query_records(collection, &query).await?
    } else {
        ctx.console.list_records(collection).await?
    };
    Ok((collection, records))
}

fn build_view(
    collection: Collection,
    columns: &[String],
    sort_fn: &str,
) -> Result<TableView, CliError> {
    let columns: Vec<Column> = if columns.is_empty() {
        render::default_columns(collection)
            .iter()
            .map(|(id, header)| Column::new(*id, *header).sort_fn(sort_fn))
            .collect()
    } else {
        columns
            .iter()
            .map(|id| Column::new(id.as_str(), id.as_str()).sort_fn(sort_fn))
            .collect()
    };
    Ok(TableView::new(columns)?)
}

async fn list(ctx: &Context, args: &ListArgs) -> Result<(), CliError> {
    let (collection, records) = fetch(ctx, &args.collection).await?;
    let mut view = build_view(collection, &args.columns, &args.sort_fn)?;

    if let Some(query) = &args.query {
        view.set_global_filter(query.as_str());
    }
    if let Some(column) = &args.sort {
        view.sort_by(column, args.desc)?;
    }

    let rows = view.rows(&records);
    print!("{}", render::render_table(&view, &rows));
    Ok(())
}

/// Reads queries from stdin and reprints the table once typing settles.
async fn search(ctx: &Context, args: &SearchArgs) -> Result<(), CliError> {
    let (collection, records) = fetch(ctx, &args.collection).await?;
    let mut view = build_view(collection, &args.columns, "fuzzy")?;
    let first = view
        .columns()
        .first()
        .map(|c| c.id.clone())
        .ok_or_else(|| CliError::usage("no columns to search"))?;
    view.sort_by(&first, false)?;

    let delay = Duration::from_millis(args.debounce_ms);
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let mut input = DebouncedInput::with_delay(String::new(), delay, tx);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print!("{}", render::render_table(&view, &view.rows(&records)));
    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => input.on_change(line.trim().to_string()),
                None => break,
            },
            Some(query) = rx.recv() => show_search(&mut view, &records, &query),
        }
    }

    // Let the last query through before exiting.
    if input.is_pending() {
        tokio::time::sleep(input.delay() + Duration::from_millis(10)).await;
    }
    while let Ok(query) = rx.try_recv() {
        show_search(&mut view, &records, &query);
    }
    input.teardown();
    Ok(())
}

fn show_search(view: &mut TableView, records: &[Record], query: &str) {
    log::debug!("Applying search '{query}'");
    view.set_global_filter(query);
    println!("\n> {query}");
    print!("{}", render::render_table(view, &view.rows(records)));
}

async fn whoami(ctx: &Context) -> Result<(), CliError> {
    let session = ctx.session.as_ref().ok_or(CliError::NotSignedIn)?;
    let account = ctx.console.current_account(session).await?;
    println!("Account: {} <{}>", account.name, account.email);

    match ctx.console.current_member(session).await {
        Ok(member) => {
            println!("Member:  {} ({})", member.name, member.status);
            if !member.roles.is_empty() {
                println!("Roles:   {}", member.roles.join(", "));
            }
            if let Some(url) = ctx.console.avatar_url(&member, 128, 128)? {
                println!("Avatar:  {url}");
            }
        }
        Err(e) => println!("Member:  none ({e})"),
    }
    Ok(())
}

async fn change_status(ctx: &Context, kind: StatusKind, id: &str, raw: &str) -> Result<(), CliError> {
    warn_if_offline(ctx);
    match kind {
        StatusKind::Member => set_status::<Member, MemberStatus>(ctx, id, raw).await,
        StatusKind::Project => set_status::<Project, ProjectStatus>(ctx, id, raw).await,
        StatusKind::Opportunity => set_status::<Opportunity, OpportunityStatus>(ctx, id, raw).await,
        StatusKind::Milestone => set_status::<Milestone, MilestoneStatus>(ctx, id, raw).await,
        StatusKind::Feedback => set_status::<FeedbackRequest, FeedbackStatus>(ctx, id, raw).await,
    }
}

async fn set_status<E: Entity, S: Status>(ctx: &Context, id: &str, raw: &str) -> Result<(), CliError> {
    let next = S::parse(raw).ok_or_else(|| {
        let options: Vec<&str> = S::ALL.iter().map(|s| s.as_str()).collect();
        CliError::usage(format!(
            "unknown status '{raw}', expected one of: {}",
            options.join(", ")
        ))
    })?;

    let record = ctx.console.get_record(E::COLLECTION, id).await?;
    let current = S::from_field(&record, "status").map_err(sparknet_lib::error::Error::from)?;
    let mut select = StatusSelect::new(current);

    let result = select
        .select(next, |status| ctx.console.update_status::<E, S>(id, status))
        .await;
    match result {
        Ok(_) => {
            println!("{id}: {}", select.current().as_str());
            Ok(())
        }
        Err(e) => {
            eprintln!("{id}: still {}", select.current().as_str());
            Err(e.into())
        }
    }
}
