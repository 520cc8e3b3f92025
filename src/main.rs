use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::Value;

use social_sync::actions::{CollectionChoice, FollowContext, SaveTap};
use social_sync::app::App;
use social_sync::cancel::CancelToken;
use social_sync::config::Config;
use social_sync::logging::init_tracing;
use social_sync::model::{EntityId, EntityKind, EntityRef, Field, FollowState, LikeState, SaveState};
use social_sync::reconcile::Outcome;
use social_sync::session::{AccountType, AuthToken, Session, SessionStore};

#[derive(Parser, Debug)]
#[command(
    name = "social-sync",
    version,
    about = "Like, save and follow with optimistic updates against the backend"
)]
struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Session file (overrides [session].path)
    #[arg(long, global = true, value_name = "PATH")]
    session: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Toggle the like on a post, project or video
    Like {
        id: String,
        #[arg(long, value_enum, default_value_t = KindArg::Post)]
        kind: KindArg,
        /// The item is currently liked
        #[arg(long)]
        liked: bool,
        /// Like count currently shown
        #[arg(long, default_value_t = 0)]
        count: u64,
    },
    /// Save an item into a collection
    Save(SaveArgs),
    /// Remove a saved item from its collection
    Unsave {
        id: String,
        #[arg(long, value_enum, default_value_t = KindArg::Post)]
        kind: KindArg,
    },
    /// Toggle following a user
    Follow {
        user_id: String,
        /// The user is currently followed
        #[arg(long)]
        followed: bool,
        /// Owner of the profile the button is on (omit for feed)
        #[arg(long, value_name = "USER_ID")]
        profile: Option<String>,
    },
    /// Remove a user from your followers
    RemoveFollower { user_id: String },
    /// Seed from a feed page (JSON file) and cache it in the session
    Feed { file: PathBuf },
    /// Show or change the stored session
    Session {
        #[command(subcommand)]
        command: SessionCommand,
    },
}

#[derive(Args, Debug)]
struct SaveArgs {
    id: String,
    #[arg(long, value_enum, default_value_t = KindArg::Post)]
    kind: KindArg,
    /// Existing collection to add the item to
    #[arg(long, value_name = "ID", conflicts_with = "new_collection", required_unless_present = "new_collection")]
    collection: Option<String>,
    /// Collection just created with this item in it
    #[arg(long, value_name = "ID")]
    new_collection: Option<String>,
}

#[derive(Subcommand, Debug)]
enum SessionCommand {
    Show,
    Login {
        #[arg(long)]
        user: String,
        #[arg(long)]
        token: String,
        #[arg(long, default_value = "personal", value_parser = parse_account_type)]
        account_type: AccountType,
    },
    Logout,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KindArg {
    Post,
    Project,
    Video,
}

impl From<KindArg> for EntityKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Post => EntityKind::Post,
            KindArg::Project => EntityKind::Project,
            KindArg::Video => EntityKind::Video,
        }
    }
}

fn parse_account_type(s: &str) -> Result<AccountType, String> {
    AccountType::parse(s).ok_or_else(|| {
        format!("unknown account type '{s}' (expected temp, personal, professional, business or admin)")
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("loading config")?;
    init_tracing(&config.logging);

    let session_path = cli.session.clone().or_else(|| config.session.path.clone());
    let sessions = SessionStore::at(session_path.as_deref());
    let mut app = App::new(&config, sessions)?;
    let cancel = CancelToken::new();

    match cli.command {
        Command::Like {
            id,
            kind,
            liked,
            count,
        } => {
            let entity = EntityRef::new(id, kind.into());
            let outcome = app
                .dispatcher()
                .toggle_like(&entity, LikeState::new(liked, count), &cancel)
                .await?;
            report(&app, &entity.id, &[Field::Liked, Field::LikeCount], outcome)
        }
        Command::Save(args) => {
            let entity = EntityRef::new(args.id, args.kind.into());
            let tap = app
                .dispatcher()
                .tap_save(&entity, SaveState::new(false), &cancel)
                .await?;
            let pending = match tap {
                SaveTap::PickCollection(pending) => pending,
                // Already saved according to the cached feed: the tap unsaved it.
                SaveTap::Unsaved(outcome) => {
                    return report(&app, &entity.id, &[Field::Saved], outcome)
                }
            };
            let choice = match (args.collection, args.new_collection) {
                (_, Some(created)) => CollectionChoice::Created(created),
                (Some(existing), None) => CollectionChoice::Existing(existing),
                (None, None) => {
                    pending.cancel();
                    bail!("no collection given");
                }
            };
            let outcome = app
                .dispatcher()
                .save_to_collection(pending, choice, &cancel)
                .await;
            report(&app, &entity.id, &[Field::Saved], outcome)
        }
        Command::Unsave { id, kind } => {
            let entity = EntityRef::new(id, kind.into());
            match app
                .dispatcher()
                .tap_save(&entity, SaveState::new(true), &cancel)
                .await?
            {
                SaveTap::Unsaved(outcome) => report(&app, &entity.id, &[Field::Saved], outcome),
                SaveTap::PickCollection(pending) => {
                    pending.cancel();
                    bail!("{entity} is not saved");
                }
            }
        }
        Command::Follow {
            user_id,
            followed,
            profile,
        } => {
            let target = EntityId::from(user_id);
            let context = match profile {
                Some(owner) => FollowContext::Profile {
                    owner: owner.into(),
                },
                None => FollowContext::Feed,
            };
            let outcome = app
                .dispatcher()
                .toggle_follow(&target, FollowState::new(followed), &context, &cancel)
                .await?;
            report(
                &app,
                &target,
                &[Field::Followed, Field::FollowersCount],
                outcome,
            )
        }
        Command::RemoveFollower { user_id } => {
            let follower = EntityId::from(user_id);
            let outcome = app.dispatcher().remove_follower(&follower, &cancel).await?;
            report(&app, &follower, &[Field::FollowingCount], outcome)
        }
        Command::Feed { file } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let body: Value = serde_json::from_str(&content)
                .with_context(|| format!("parsing {}", file.display()))?;
            // Accept a bare array or the `{status, data}` envelope.
            let page = match body {
                Value::Object(mut map) if map.contains_key("data") => {
                    map.remove("data").unwrap_or(Value::Null)
                }
                other => other,
            };
            let written = app.cache_feed(page)?;
            println!("seeded {written} values");
            Ok(())
        }
        Command::Session { command } => run_session(&mut app, command),
    }
}

fn run_session(app: &mut App, command: SessionCommand) -> Result<()> {
    match command {
        SessionCommand::Show => {
            let session = app.session();
            println!("path: {}", app.sessions().path().display());
            match &session.user_id {
                Some(user) => println!("user: {user}"),
                None => println!("user: (none)"),
            }
            println!("account_type: {}", session.account_type);
            println!("logged_in: {}", session.is_logged_in());
            println!("cached_feed: {}", session.cached_feed.is_some());
            Ok(())
        }
        SessionCommand::Login {
            user,
            token,
            account_type,
        } => {
            app.login(Session::new(user, AuthToken::new(token), account_type))?;
            println!("logged in");
            Ok(())
        }
        SessionCommand::Logout => {
            app.logout()?;
            println!("logged out");
            Ok(())
        }
    }
}

fn report(app: &App, id: &EntityId, fields: &[Field], outcome: Outcome) -> Result<()> {
    for field in fields {
        println!("{id} {field} = {}", app.store().read(id.as_str(), *field));
    }
    match outcome {
        Outcome::Confirmed { overridden } => {
            println!("confirmed ({overridden} corrected by server)");
            Ok(())
        }
        Outcome::RolledBack { reason } => bail!("rolled back: {reason}"),
        Outcome::Stale => {
            println!("superseded by a newer request");
            Ok(())
        }
        Outcome::Cancelled => bail!("cancelled"),
    }
}
