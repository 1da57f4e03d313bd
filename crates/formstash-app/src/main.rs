//! # formstash
//!
//! Terminal front end for the form builder:
//! - **fill**: edit the nine form fields, attach media by path
//! - **submit**: persist the snapshot into the local submission history
//! - **review**: load a past submission, edit it, push the update back
//! - **summary**: list and delete past submissions
//!
//! All state lives in two local tiers under the data directory: a durable
//! key-value store for the full history and a cookie jar for the draft
//! projection.  On startup the session is hydrated from both.

mod config;

use std::io::Write as _;

use tokio::io::AsyncBufReadExt;
use tracing::info;
use tracing_subscriber::EnvFilter;

use formstash_media::encode_file;
use formstash_session::{FieldPatch, FormAction, FormSession, MediaField};
use formstash_shared::{format_size, FormSnapshot, Priority, Status};
use formstash_store::{CookieTier, DiskTier, FormStore, SubmissionId, Submissions};

use crate::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,formstash=info")),
        )
        .init();

    info!("Starting formstash v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::from_env();
    info!(?config, "Loaded configuration");

    let mut collection = DiskTier::new(config.data_dir.join("store"))?;
    if let Some(limit) = config.store_capacity {
        collection = collection.with_capacity(limit);
    }
    let draft = CookieTier::new()
        .with_ttl(chrono::Duration::days(config.draft_ttl_days))
        .backed_by(config.data_dir.join("cookies.json"));

    let store = FormStore::new(Box::new(collection), Box::new(draft));
    let mut session = FormSession::new(Submissions::new(store));

    session.hydrate().await;
    if session.snapshot() != &FormSnapshot::default() {
        println!("Recovered a draft from a previous session:");
        print_snapshot(session.snapshot());
    }

    println!("Type 'help' for commands.");
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            continue;
        };
        let args: Vec<&str> = parts.collect();

        match command {
            "help" => print_help(),
            "show" => print_snapshot(session.snapshot()),
            "set" => handle_set(&mut session, &args),
            "toggle" => match args.first() {
                Some(_) => {
                    let label = args.join(" ");
                    session.apply(FormAction::Edit(FieldPatch::ToggleOption(label)));
                    println!("options: {:?}", session.snapshot().options);
                }
                None => println!("usage: toggle <option label>"),
            },
            "attach" => handle_attach(&mut session, &args).await,
            "detach" => match parse_media_field(args.first().copied()) {
                Some(field) => {
                    session.clear_media(field);
                    println!("detached");
                }
                None => println!("usage: detach <image|video>"),
            },
            "errors" => {
                let errors = session.field_errors();
                if errors.is_empty() {
                    println!("all fields satisfied");
                }
                for (field, message) in errors {
                    println!("  {field}: {message}");
                }
                println!("submittable: {}", session.is_submittable());
            }
            "submit" => match session.submit().await {
                Ok(id) => println!("submitted as {id}"),
                Err(e) => println!("submit failed: {e}"),
            },
            "list" => {
                let records = session.history().await;
                if records.is_empty() {
                    println!("no saved forms");
                }
                for record in records {
                    println!("  {}  {}", record.id, record.display_name());
                }
            }
            "open" => match args.first() {
                Some(raw) => {
                    let id = SubmissionId::from(*raw);
                    if session.load_submission(&id).await {
                        print_snapshot(session.snapshot());
                    } else {
                        println!("no such form: {raw}");
                    }
                }
                None => println!("usage: open <id>"),
            },
            "update" => match args.first() {
                Some(raw) => {
                    let id = SubmissionId::from(*raw);
                    match session.update_submission(&id).await {
                        Ok(true) => println!("updated {raw}"),
                        Ok(false) => println!("no such form: {raw}"),
                        Err(e) => println!("update failed: {e}"),
                    }
                }
                None => println!("usage: update <id>"),
            },
            "delete" => match args.first() {
                Some(raw) => {
                    let id = SubmissionId::from(*raw);
                    match session.submissions().delete_by_id(&id).await {
                        Ok(true) => println!("deleted {raw}"),
                        Ok(false) => println!("no such form: {raw}"),
                        Err(e) => println!("delete failed: {e}"),
                    }
                }
                None => println!("usage: delete <id>"),
            },
            "reset" => {
                let clear_storage = args.first() == Some(&"--clear");
                session.reset(clear_storage).await;
                if clear_storage {
                    println!("form and storage cleared");
                } else {
                    println!("form cleared, storage retained");
                }
            }
            "quit" | "exit" => break,
            other => println!("unknown command '{other}', try 'help'"),
        }
    }

    Ok(())
}

fn handle_set(session: &mut FormSession, args: &[&str]) {
    let Some((field, rest)) = args.split_first() else {
        println!("usage: set <field> <value>");
        return;
    };
    let value = rest.join(" ");

    let patch = match *field {
        "name" => FieldPatch::Name(value),
        "email" => FieldPatch::Email(value),
        "description" => FieldPatch::Description(value),
        "due" | "duedate" => FieldPatch::DueDate(value),
        "priority" => match parse_priority(&value) {
            Some(priority) => FieldPatch::Priority(priority),
            None => {
                println!("priority is one of: low, medium, high");
                return;
            }
        },
        "status" => match parse_status(&value) {
            Some(status) => FieldPatch::Status(status),
            None => {
                println!("status is one of: pending, in-progress, completed");
                return;
            }
        },
        other => {
            println!("unknown field '{other}'");
            return;
        }
    };
    session.apply(FormAction::Edit(patch));
}

async fn handle_attach(session: &mut FormSession, args: &[&str]) {
    let (Some(field), Some(path)) = (parse_media_field(args.first().copied()), args.get(1)) else {
        println!("usage: attach <image|video> <path>");
        return;
    };

    let ticket = session.begin_media_update(field);
    match encode_file(path).await {
        Ok(media) => {
            let label = format!("{} ({})", media.name, format_size(media.size_bytes));
            if session.apply_media(ticket, media) {
                println!("attached {label}");
            }
        }
        Err(e) => println!("attach failed: {e}"),
    }
}

fn parse_media_field(arg: Option<&str>) -> Option<MediaField> {
    match arg {
        Some("image") => Some(MediaField::Image),
        Some("video") => Some(MediaField::Video),
        _ => None,
    }
}

fn parse_priority(value: &str) -> Option<Priority> {
    match value {
        "low" => Some(Priority::Low),
        "medium" => Some(Priority::Medium),
        "high" => Some(Priority::High),
        _ => None,
    }
}

fn parse_status(value: &str) -> Option<Status> {
    match value {
        "pending" => Some(Status::Pending),
        "in-progress" => Some(Status::InProgress),
        "completed" => Some(Status::Completed),
        _ => None,
    }
}

fn print_snapshot(snapshot: &FormSnapshot) {
    println!("  name:        {}", snapshot.name);
    println!("  email:       {}", snapshot.email);
    println!("  description: {}", snapshot.description);
    println!("  image:       {}", media_label(&snapshot.image));
    println!("  video:       {}", media_label(&snapshot.video));
    println!("  priority:    {}", snapshot.priority.as_str());
    println!("  options:     {:?}", snapshot.options);
    println!("  status:      {}", snapshot.status.as_str());
    println!("  due date:    {}", snapshot.due_date);
}

fn media_label(media: &Option<formstash_shared::MediaAttachment>) -> String {
    match media {
        Some(m) if m.has_payload() => format!("{} ({})", m.name, format_size(m.size_bytes)),
        Some(m) => format!("{} ({}, payload elided)", m.name, format_size(m.size_bytes)),
        None => "(none)".to_string(),
    }
}

fn print_help() {
    println!("  show                      print the working form");
    println!("  set <field> <value>       name | email | description | priority | status | due");
    println!("  toggle <option label>     flip a multi-select option");
    println!("  attach <image|video> <path>");
    println!("  detach <image|video>");
    println!("  errors                    per-field requirements and submit gate");
    println!("  submit                    persist the form locally");
    println!("  list                      saved submissions, oldest first");
    println!("  open <id>                 load a submission for review");
    println!("  update <id>               push review edits back");
    println!("  delete <id>               remove a submission");
    println!("  reset [--clear]           empty the form; --clear wipes storage too");
    println!("  quit");
}
