// MindMosaic terminal companion

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use mindmosaic_core::clients::{MusicService, NominatimClient, ReverseGeocoder, SpotifyClient};
use mindmosaic_core::models::{Mood, Sender};
use mindmosaic_core::recommendations::{emergency_notice, MusicRecommender, RecommendationResolver};
use mindmosaic_core::speech::{
    ConsoleSynthesizer, LineRecognizer, Narrator, SpeechRecognizer, SpeechSynthesizer,
};
use mindmosaic_core::storage::{KeyValueStore, SqliteStore, WellnessRepository};
use mindmosaic_core::tips::TipBoard;
use mindmosaic_core::wellness::{chart_value, wellness_progress};
use mindmosaic_core::{AppConfig, ChatSession, Companion};

#[derive(Parser)]
#[command(name = "mindmosaic", version, about = "A mood-aware wellness companion")]
struct Cli {
    /// Overrides MINDMOSAIC_DATA_DIR
    #[arg(long)]
    data_dir: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Talk with the companion (default)
    Chat {
        /// Print meditation scripts as they would be narrated
        #[arg(long)]
        narrate: bool,
    },
    /// Show the mood history
    History,
    /// Write, list or delete journal entries
    Journal {
        #[command(subcommand)]
        action: Option<JournalAction>,
    },
    /// Share, like and browse community tips
    Tips {
        #[command(subcommand)]
        action: Option<TipAction>,
    },
    /// Show the wellness score and trend
    Progress,
    /// Delete the whole mood history
    ClearHistory,
}

#[derive(Subcommand)]
enum JournalAction {
    Add { text: String },
    List,
    Delete { id: Uuid },
}

#[derive(Subcommand)]
enum TipAction {
    Share {
        text: String,
        #[arg(long, requires = "longitude", allow_hyphen_values = true)]
        latitude: Option<f64>,
        #[arg(long, requires = "latitude", allow_hyphen_values = true)]
        longitude: Option<f64>,
    },
    Like { id: String },
    List {
        /// Only tips within 20 km of this point
        #[arg(long, requires = "near_longitude", allow_hyphen_values = true)]
        near_latitude: Option<f64>,
        #[arg(long, requires = "near_latitude", allow_hyphen_values = true)]
        near_longitude: Option<f64>,
    },
}

fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    let default_level = if cfg!(debug_assertions) {
        "debug,sqlx=info,reqwest=info,hyper=info"
    } else {
        "warn,mindmosaic_core=info,sqlx=warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;

    // Logs go to stderr so the conversation on stdout stays readable
    let fmt_layer = if std::env::var("LOG_FORMAT").as_deref() == Ok("json") {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stderr)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;
    Ok(())
}

fn build_resolver(config: &AppConfig) -> anyhow::Result<RecommendationResolver> {
    let service: Option<Arc<dyn MusicService>> = match &config.spotify_token {
        Some(token) => Some(Arc::new(
            SpotifyClient::new(&config.spotify_api_url, token.clone())
                .context("Failed to build music service client")?,
        )),
        None => {
            info!("No SPOTIFY_TOKEN set, music suggestions come from the local catalogue");
            None
        }
    };
    Ok(RecommendationResolver::new(MusicRecommender::new(
        service,
        config.fallback_delay(),
    )))
}

async fn run_chat(
    config: &AppConfig,
    repo: WellnessRepository,
    narrate: bool,
) -> anyhow::Result<()> {
    let companion = Arc::new(Companion::new(
        build_resolver(config)?,
        repo,
        config.user_name.clone(),
    ));
    let synthesizer: Option<Arc<dyn SpeechSynthesizer>> = if narrate {
        Some(Arc::new(ConsoleSynthesizer))
    } else {
        None
    };
    let mut session = ChatSession::new(companion, Narrator::new(synthesizer));

    for message in session.messages() {
        println!("🤖 {}", message.text);
    }

    let recognizer = LineRecognizer::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = recognizer.listen().await? else {
            break;
        };
        if matches!(line.trim(), "/quit" | "/exit") {
            break;
        }

        let Some(reply) = session.send(&line).await else {
            continue;
        };
        println!("🤖 {}", reply.text);
        for question in &reply.follow_up_questions {
            println!("   💭 {}", question);
        }

        if let Some(bundle) = session.current_bundle() {
            let mood = session.current_mood();
            println!("\n{} Suggestions for feeling {}:", mood.emoji(), mood);
            println!("   🎵 {}: {}", bundle.music.title, bundle.music.description);
            println!("   🎬 {}: {}", bundle.movie.title, bundle.movie.description);
            println!("   📚 {}: {}", bundle.book.title, bundle.book.description);
            println!("   📍 {}: {}", bundle.destination.title, bundle.destination.description);
            println!("   🧘 {}", bundle.mindful_activity);
            if let Some(support) = &bundle.emergency_support {
                println!("   🆘 {}", support);
            }
            if let Some(notice) = emergency_notice(mood) {
                println!("\n{}", notice);
            }
            println!();
        }
    }

    let user_messages = session
        .messages()
        .iter()
        .filter(|m| m.sender == Sender::User)
        .count();
    info!("Chat ended after {} message(s)", user_messages);
    Ok(())
}

async fn run_history(repo: &WellnessRepository) -> anyhow::Result<()> {
    let history = repo.mood_history().await?;
    if history.items.is_empty() {
        println!("No mood history yet.");
    }
    for record in &history.items {
        println!(
            "{}  {} {:<8} {}",
            record.timestamp.format("%Y-%m-%d %H:%M"),
            record.mood.emoji(),
            record.mood.label(),
            "█".repeat(chart_value(record.mood) as usize)
        );
    }
    if history.dropped > 0 {
        warn!("{} unreadable mood record(s) were skipped", history.dropped);
    }
    Ok(())
}

async fn run_journal(
    repo: &WellnessRepository,
    action: Option<JournalAction>,
) -> anyhow::Result<()> {
    match action.unwrap_or(JournalAction::List) {
        JournalAction::Add { text } => {
            let mood = repo
                .mood_history()
                .await?
                .items
                .last()
                .map(|r| r.mood)
                .unwrap_or(Mood::Unknown);
            let entry = repo.add_journal_entry(&text, mood).await?;
            println!("Saved entry {} ({} {})", entry.id, mood.emoji(), mood);
        }
        JournalAction::List => {
            let entries = repo.journal_entries().await?.items;
            if entries.is_empty() {
                println!("Your journal is empty.");
            }
            for entry in entries {
                println!(
                    "{}  {}  {} {}",
                    entry.id,
                    entry.timestamp.format("%Y-%m-%d %H:%M"),
                    entry.mood.emoji(),
                    entry.text
                );
            }
        }
        JournalAction::Delete { id } => {
            if repo.delete_journal_entry(id).await? {
                println!("Deleted entry {}", id);
            } else {
                println!("No entry with id {}", id);
            }
        }
    }
    Ok(())
}

async fn run_tips(
    config: &AppConfig,
    repo: WellnessRepository,
    action: Option<TipAction>,
) -> anyhow::Result<()> {
    let geocoder: Box<dyn ReverseGeocoder> = Box::new(
        NominatimClient::new(&config.geocoder_url).context("Failed to build geocoding client")?,
    );
    let board = TipBoard::new(repo, Some(geocoder));

    let tips = match action.unwrap_or(TipAction::List {
        near_latitude: None,
        near_longitude: None,
    }) {
        TipAction::Share {
            text,
            latitude,
            longitude,
        } => {
            let tip = board.share(&text, latitude.zip(longitude)).await?;
            println!("Shared tip {}", tip.id);
            return Ok(());
        }
        TipAction::Like { id } => {
            match board.toggle_like(&id).await? {
                Some(tip) => println!("Tip {} now has {} like(s)", tip.id, tip.likes),
                None => println!("No tip with id {}", id),
            }
            return Ok(());
        }
        TipAction::List {
            near_latitude: Some(lat),
            near_longitude: Some(lon),
        } => board.near(lat, lon).await?,
        TipAction::List { .. } => board.all().await?.items,
    };

    if tips.is_empty() {
        println!("No tips yet.");
    }
    for tip in tips {
        let place = tip
            .location
            .as_ref()
            .and_then(|l| l.location_name.as_deref())
            .unwrap_or("");
        println!("{}  ❤ {}  {}  {}", tip.id, tip.likes, tip.text, place);
    }
    Ok(())
}

async fn run_progress(repo: &WellnessRepository) -> anyhow::Result<()> {
    let history = repo.mood_history().await?.items;
    let progress = wellness_progress(&history);
    println!("Wellness score: {}/100", progress.score);
    println!("Trend: {} {}", progress.trend.emoji(), progress.trend);
    println!("{}", progress.message);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    let cli = Cli::parse();
    let mut config = AppConfig::load().context("Failed to load configuration")?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    info!("MindMosaic starting with data dir {:?}", config.data_dir);

    let store: Arc<dyn KeyValueStore> = Arc::new(
        SqliteStore::open(&config.data_dir)
            .await
            .context("Failed to open the local store")?,
    );
    let repo = WellnessRepository::new(store);

    match cli.command.unwrap_or(Command::Chat { narrate: false }) {
        Command::Chat { narrate } => run_chat(&config, repo, narrate).await?,
        Command::History => run_history(&repo).await?,
        Command::Journal { action } => run_journal(&repo, action).await?,
        Command::Tips { action } => run_tips(&config, repo, action).await?,
        Command::Progress => run_progress(&repo).await?,
        Command::ClearHistory => {
            repo.clear_mood_history().await?;
            println!("Mood history cleared.");
        }
    }

    Ok(())
}
