use anyhow::Context as _;
use clap::Parser;
use mood_service::{
    Config, ConciergeError, MOOD_PRESETS, MoodConcierge, Movie, catalog::mood_preset,
    workflow::Dependencies,
};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Movie picks for how you feel, plus a chat about them
#[derive(Parser, Debug)]
#[command(name = "mood-service", version)]
struct Args {
    /// How you are feeling, in your own words
    #[arg(long, conflicts_with = "preset")]
    mood: Option<String>,

    /// Quick-pick mood label (Sad, Tired, Excited, Loved, Overwhelmed, Happy, Emotional, Energetic)
    #[arg(long)]
    preset: Option<String>,

    /// Preferred movie language code, e.g. "en" or "ja"
    #[arg(long)]
    language: Option<String>,

    /// Skip the simulated loading and thinking time
    #[arg(long)]
    instant: bool,
}

type InputLines = Lines<BufReader<Stdin>>;

enum Flow {
    Restart,
    Quit,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mood_service=warn,mood_flow=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let config = build_config(&args)?;
    info!(?config, "Starting mood concierge");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut first_mood = args.preset.map(Submission::Preset).or(args.mood.map(Submission::Text));

    loop {
        let concierge = MoodConcierge::new(config.clone(), Dependencies::default()).await?;
        info!(session_id = %concierge.session_id(), "New conversation");

        let Some(movies) = choose_mood(&concierge, &mut lines, first_mood.take()).await? else {
            return Ok(());
        };
        print_movies(&movies);
        print_last_reply(&concierge).await;

        match chat(&concierge, &mut lines).await? {
            Flow::Restart => continue,
            Flow::Quit => return Ok(()),
        }
    }
}

fn build_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = Config::from_env()?;
    if args.instant {
        config = Config {
            language: config.language,
            ..Config::instant()
        };
    }
    if let Some(language) = &args.language {
        config = config.with_language(language.clone());
    }
    config.validate().context("invalid --language")?;
    Ok(config)
}

enum Submission {
    Preset(String),
    Text(String),
}

async fn choose_mood(
    concierge: &MoodConcierge,
    lines: &mut InputLines,
    mut pending: Option<Submission>,
) -> anyhow::Result<Option<Vec<Movie>>> {
    let language = concierge.language();
    println!("\nHow are you feeling today?  ({} {})", language.flag, language.name);
    println!(
        "Pick a mood or tell me in your own words: {}",
        MOOD_PRESETS
            .iter()
            .map(|preset| format!("{} {}", preset.emoji, preset.label))
            .collect::<Vec<_>>()
            .join("  ")
    );

    loop {
        let submission = match pending.take() {
            Some(submission) => submission,
            None => {
                prompt("mood> ");
                let Some(line) = lines.next_line().await? else {
                    return Ok(None);
                };
                if mood_preset(&line).is_some() {
                    Submission::Preset(line)
                } else {
                    Submission::Text(line)
                }
            }
        };

        println!("Finding perfect movies...");
        let result = match &submission {
            Submission::Preset(label) => concierge.submit_preset(label).await,
            Submission::Text(text) => concierge.submit_mood(text).await,
        };

        match result {
            Ok(Some(movies)) => return Ok(Some(movies)),
            Ok(None) => continue,
            Err(e @ ConciergeError::UnknownPreset(_)) => println!("{e}"),
            Err(e) => return Err(e.into()),
        }
    }
}

async fn chat(concierge: &MoodConcierge, lines: &mut InputLines) -> anyhow::Result<Flow> {
    println!("Ask me anything about these movies. Commands: /fav <id>, /favs, /movies, /restart, /quit");

    loop {
        prompt("you> ");
        let Some(line) = lines.next_line().await? else {
            return Ok(Flow::Quit);
        };
        let line = line.trim();

        match line.split_once(' ').map_or((line, ""), |(cmd, rest)| (cmd, rest.trim())) {
            ("/quit", _) => return Ok(Flow::Quit),
            ("/restart", _) => return Ok(Flow::Restart),
            ("/movies", _) => print_movies(&concierge.recommendations()),
            ("/favs", _) => {
                let favorites = concierge.favorites();
                if favorites.is_empty() {
                    println!("No favorites yet.");
                } else {
                    print_movies(&favorites);
                }
            }
            ("/fav", id) => match id.parse::<u32>() {
                Ok(id) => match concierge.toggle_favorite(id) {
                    Ok(true) => println!("♥ Added {id} to favorites"),
                    Ok(false) => println!("♡ Removed {id} from favorites"),
                    Err(e) => println!("{e}"),
                },
                Err(_) => println!("Usage: /fav <movie id>"),
            },
            _ => {
                if line.is_empty() {
                    continue;
                }
                println!("assistant is typing...");
                match concierge.send_message(line).await {
                    Ok(Some(_)) => print_last_reply(concierge).await,
                    Ok(None) => {}
                    Err(e) if e.is_busy() => println!("Still thinking about your last message..."),
                    Err(e) => {
                        warn!("Chat failed: {}", e);
                        return Err(e.into());
                    }
                }
            }
        }
    }
}

fn prompt(text: &str) {
    use std::io::Write;
    print!("{text}");
    let _ = std::io::stdout().flush();
}

fn print_movies(movies: &[Movie]) {
    println!();
    for movie in movies {
        let heart = if movie.is_favorite == Some(true) { "♥" } else { " " };
        println!(
            "{heart} [{}] {} ({}) ★ {:.1}  {}",
            movie.id,
            movie.title,
            movie.release_year,
            movie.rating,
            movie.genres.join(", ")
        );
        println!("      {}", movie.overview);
        println!("      Why: {}", movie.reason);
    }
    println!();
}

async fn print_last_reply(concierge: &MoodConcierge) {
    if let Some(message) = concierge.transcript().await.last() {
        let at = message.created_at.with_timezone(&chrono::Local).format("%H:%M");
        println!("assistant [{at}]> {}", message.text);
    }
}
