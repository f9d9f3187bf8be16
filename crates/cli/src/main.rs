//! RehabFit CLI - rehabilitation progress tracking.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use rehabfit_client::{ApiClient, ApiError, ChatSession, ClientConfig, DashboardView};
use rehabfit_core::{
    ChatMessage, Credentials, ProfileUpdate, ProgressEntry, ProgressForm, Registration, Sender,
    UserProfile,
};
use rehabfit_progress::{annotate, ChartPoint, ProgressReport, TimeWindow};
use rehabfit_storage::{CacheScope, JsonFileCache, SessionStore, VideoListStore};
use rehabfit_videos::{
    build_gallery, KeywordExtractor, ProfileKeywordExtractor, RegexKeywordExtractor, YouTubeLinks,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rehabfit")]
#[command(about = "Rehabilitation progress tracking", long_about = None)]
struct Cli {
    /// Backend URL (overrides REHABFIT_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Cache directory (overrides REHABFIT_CACHE_DIR)
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Register {
        /// Full name
        #[arg(long)]
        name: String,
        /// Email address
        #[arg(long)]
        email: String,
        /// Password (at least 6 characters)
        #[arg(long)]
        password: String,
        /// Password again
        #[arg(long)]
        confirm_password: String,
        /// Injury type, e.g. knee
        #[arg(long)]
        injury_type: Option<String>,
        /// Fitness goal
        #[arg(long)]
        fitness_goal: Option<String>,
    },
    /// Log in with email and password
    Login {
        /// Email address
        email: String,
        /// Password
        #[arg(long)]
        password: String,
    },
    /// Log in with a Google sign-in token
    GoogleLogin {
        /// Token issued by Google sign-in
        token: String,
    },
    /// Forget the stored session
    Logout,
    /// Show or edit the profile
    Profile {
        #[command(subcommand)]
        action: Option<ProfileAction>,
    },
    /// Log today's progress
    Log {
        /// Pain level (0-10)
        #[arg(long)]
        pain: String,
        /// Mobility (0-10)
        #[arg(long)]
        mobility: String,
        /// Strength (0-10)
        #[arg(long)]
        strength: String,
        /// excellent, good, fair or poor
        #[arg(long)]
        mood: Option<String>,
        /// Sleep quality (1-10)
        #[arg(long)]
        sleep: Option<String>,
        /// Exercise minutes
        #[arg(long)]
        minutes: Option<String>,
        /// Free-text notes
        #[arg(long)]
        notes: Option<String>,
        /// Entry date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Trend, streak, pain distribution and insights
    Stats {
        /// 7, 14, 30 or all
        #[arg(long, default_value = "30")]
        window: TimeWindow,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Logged entries, newest first
    History {
        /// 7, 14, 30 or all
        #[arg(long, default_value = "30")]
        window: TimeWindow,
    },
    /// Chart series with recovery scores
    Chart {
        /// 7, 14, 30 or all
        #[arg(long, default_value = "30")]
        window: TimeWindow,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Recovery overview
    Dashboard {
        /// 7, 14, 30 or all
        #[arg(long, default_value = "30")]
        window: TimeWindow,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Talk to the recovery assistant
    Chat {
        /// Send one message and exit
        message: Option<String>,
        /// Clear the saved conversation
        #[arg(long)]
        clear: bool,
    },
    /// Recommended exercise videos
    Videos {
        /// Suggest search terms for a free-text description instead
        #[arg(long)]
        suggest: Option<String>,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Show the profile
    Show,
    /// Update fields; omitted or empty fields keep their current value
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        injury_type: Option<String>,
        #[arg(long)]
        fitness_goal: Option<String>,
        #[arg(long)]
        age: Option<u32>,
        #[arg(long)]
        weight: Option<f64>,
        #[arg(long)]
        height: Option<f64>,
        #[arg(long)]
        activity_level: Option<String>,
        #[arg(long)]
        injury_description: Option<String>,
    },
}

struct App {
    config: ClientConfig,
    cache: Arc<JsonFileCache>,
    session: SessionStore<JsonFileCache>,
}

impl App {
    async fn open(cli: &Cli) -> Result<Self> {
        let mut config = ClientConfig::from_env()?;
        if let Some(ref url) = cli.api_url {
            config = config.with_api_url(url.clone());
        }
        if let Some(ref dir) = cli.cache_dir {
            config.cache_dir = dir.clone();
        }
        debug!(api_url = %config.api_url, cache_dir = %config.cache_dir.display(), "configured");

        let cache = JsonFileCache::new(&config.cache_dir)
            .await
            .with_context(|| format!("opening cache at {}", config.cache_dir.display()))?;
        let cache = Arc::new(cache);
        let session = SessionStore::new(cache.clone());
        Ok(Self { config, cache, session })
    }

    async fn api(&self) -> Result<ApiClient> {
        let token = self.session.token().await?;
        Ok(ApiClient::new(&self.config)?.with_token(token))
    }

    /// Profile of the logged-in user, `None` for guests.
    async fn current_user(&self, api: &ApiClient) -> Result<Option<UserProfile>> {
        if !api.has_token() {
            return Ok(None);
        }
        Ok(Some(api.me().await?))
    }

    async fn entries(&self) -> Result<Vec<ProgressEntry>> {
        Ok(self.api().await?.dashboard().await?.progress_data)
    }
}

fn scope_for(user: Option<&UserProfile>) -> CacheScope {
    CacheScope::for_user(user.and_then(UserProfile::id_string).as_deref())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let app = App::open(&cli).await?;

    match run(&app, cli.command).await {
        Err(e) if e.downcast_ref::<ApiError>().is_some_and(ApiError::is_auth) => {
            app.session.clear().await?;
            Err(e)
        }
        other => other,
    }
}

async fn run(app: &App, command: Commands) -> Result<()> {
    match command {
        Commands::Register { name, email, password, confirm_password, injury_type, fitness_goal } => {
            let request = Registration {
                name,
                email,
                password,
                confirm_password,
                injury_type,
                fitness_goal,
            }
            .validate()?;
            app.api().await?.register(&request).await?;
            println!("Registration successful. Log in with `rehabfit login {}`.", request.email);
        }
        Commands::Login { email, password } => {
            let token = app.api().await?.login(&Credentials { email, password }).await?;
            app.session.set_token(&token).await?;
            info!("logged in");
            println!("Logged in.");
        }
        Commands::GoogleLogin { token: google_token } => {
            let token = app.api().await?.login_with_google(&google_token).await?;
            app.session.set_token(&token).await?;
            info!("logged in with Google");
            println!("Logged in.");
        }
        Commands::Logout => {
            app.session.clear().await?;
            println!("Logged out.");
        }
        Commands::Profile { action } => {
            let api = app.api().await?;
            match action.unwrap_or(ProfileAction::Show) {
                ProfileAction::Show => print_profile(&api.me().await?),
                ProfileAction::Update {
                    name,
                    injury_type,
                    fitness_goal,
                    age,
                    weight,
                    height,
                    activity_level,
                    injury_description,
                } => {
                    let mut update = ProfileUpdate::from_profile(&api.me().await?);
                    update.name = name.or(update.name);
                    update.injury_type = injury_type.or(update.injury_type);
                    update.fitness_goal = fitness_goal.or(update.fitness_goal);
                    update.age = age.or(update.age);
                    update.weight = weight.or(update.weight);
                    update.height = height.or(update.height);
                    update.activity_level = activity_level.or(update.activity_level);
                    update.injury_description = injury_description.or(update.injury_description);

                    let user = api.update_profile(&update.normalized()).await?;
                    println!("Profile updated.");
                    print_profile(&user);
                }
            }
        }
        Commands::Log { pain, mobility, strength, mood, sleep, minutes, notes, date } => {
            let form = ProgressForm {
                pain,
                mobility,
                strength,
                mood: mood.unwrap_or_default(),
                sleep_quality: sleep.unwrap_or_default(),
                exercise_minutes: minutes.unwrap_or_default(),
                notes: notes.unwrap_or_default(),
            };
            let entry = form.validate(date.unwrap_or_else(|| Local::now().date_naive()))?;
            app.api().await?.log_progress(&entry).await?;
            println!("Progress logged for {}.", entry.date);
        }
        Commands::Stats { window, json } => {
            let entries = app.entries().await?;
            let report = ProgressReport::compute(&entries, window);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
        Commands::History { window } => {
            let entries = app.entries().await?;
            println!(
                "{:<10}  {:>4}  {:>8}  {:>8}  {:>8}  {:<9}  {:>5}  {:>7}",
                "Date", "Pain", "Mobility", "Strength", "Recovery", "Mood", "Sleep", "Minutes"
            );
            for entry in ProgressReport::table(&entries, window) {
                let point = ChartPoint::from_entry(entry);
                println!(
                    "{:<10}  {:>4}  {:>8}  {:>8}  {:>7.1}%  {:<9}  {:>5}  {:>7}",
                    entry.date,
                    entry.pain_level,
                    entry.mobility,
                    entry.strength,
                    point.recovery,
                    entry.mood.map(|m| m.as_str()).unwrap_or("-"),
                    or_dash(entry.sleep_quality),
                    or_dash(entry.exercise_minutes),
                );
            }
        }
        Commands::Chart { window, json } => {
            let entries = app.entries().await?;
            let points = annotate(window.apply(&entries));
            if json {
                println!("{}", serde_json::to_string_pretty(&points)?);
            } else {
                println!("Chart ({}, {} points)", window.label(), points.len());
                for point in &points {
                    println!(
                        "  {:<7} pain {:>2}  mobility {:>2}  strength {:>2}  recovery {:>5.1}%  {}",
                        point.date_label(),
                        point.pain_level,
                        point.mobility,
                        point.strength,
                        point.recovery,
                        point.pain_bucket.label(),
                    );
                }
            }
        }
        Commands::Dashboard { window, json } => {
            let api = app.api().await?;
            let view =
                DashboardView::load(&api, app.cache.clone(), window, Local::now().naive_local())
                    .await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print_dashboard(&view);
            }
        }
        Commands::Chat { message, clear } => {
            let api = app.api().await?;
            let user = app.current_user(&api).await?;
            let scope = scope_for(user.as_ref());
            let mut session = ChatSession::open(api, app.cache.clone(), &scope).await?;

            if clear {
                session.clear().await?;
                println!("Chat history cleared.");
                return Ok(());
            }
            if let Some(message) = message {
                return chat_once(&mut session, &message).await;
            }

            for message in session.messages() {
                print_message(message);
            }
            println!("Type a message, or an empty line to quit.");
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                if line.trim().is_empty() {
                    break;
                }
                chat_once(&mut session, &line).await?;
            }
        }
        Commands::Videos { suggest } => {
            if let Some(text) = suggest {
                let extractor: Box<dyn KeywordExtractor> = Box::new(RegexKeywordExtractor::new()?);
                let terms = extractor.extract(&text);
                if terms.is_empty() {
                    println!("No exercise terms found.");
                }
                for term in terms {
                    println!("{}", term);
                }
                return Ok(());
            }

            let api = app.api().await?;
            let user = app.current_user(&api).await?;
            let videos = VideoListStore::new(app.cache.clone(), &scope_for(user.as_ref()))
                .load()
                .await?;
            let cards = build_gallery(&YouTubeLinks::new()?, &videos);

            if cards.is_empty() {
                println!("No recommended videos yet. Ask the assistant with `rehabfit chat`.");
                if let Some(ref user) = user {
                    let queries = ProfileKeywordExtractor.queries(user);
                    if !queries.is_empty() {
                        println!("Suggested searches:");
                        for query in queries {
                            println!("  {}", query);
                        }
                    }
                }
            }
            for card in cards {
                println!("{}\n  {}\n  {}", card.title, card.url, card.thumbnail);
            }
        }
    }

    Ok(())
}

async fn chat_once(session: &mut ChatSession<JsonFileCache>, input: &str) -> Result<()> {
    let Some(outcome) = session.send(input).await? else {
        return Ok(());
    };
    print_message(&outcome.reply);
    if let Some(videos) = outcome.videos.filter(|v| !v.is_empty()) {
        println!("  Recommended videos:");
        for video in videos {
            println!("    {} - {}", video.title, video.url);
        }
    }
    Ok(())
}

fn print_message(message: &ChatMessage) {
    let who = match message.sender {
        Sender::User => "you",
        Sender::Bot => "assistant",
    };
    println!("{:>9}: {}", who, message.text);
}

fn print_profile(user: &UserProfile) {
    println!("Profile: {}", user.display_name());
    println!("  Email: {}", user.email);
    println!("  Injury: {}", user.injury_type.as_deref().unwrap_or("-"));
    println!("  Goal: {}", user.fitness_goal.as_deref().unwrap_or("-"));
    println!("  Age: {}", or_dash(user.age));
    println!("  Weight: {}", or_dash(user.weight));
    println!("  Height: {}", or_dash(user.height));
    println!("  Activity: {}", user.activity_level.as_deref().unwrap_or("-"));
    if let Some(ref description) = user.injury_description {
        println!("  Injury description: {}", description);
    }
    if let Some(date) = user.injury_date {
        println!("  Injury date: {}", date);
    }
}

fn print_report(report: &ProgressReport) {
    println!("Progress ({})", report.window.label());
    println!("  Entries: {}", report.total_entries);
    println!("  Current pain: {}", or_dash(report.latest_pain));
    println!(
        "  Trend: {} ({:.1}%)",
        report.stats.trend.label(),
        report.stats.improvement_percent
    );
    println!("  Streak: {} days", report.stats.streak);

    if !report.distribution.is_empty() {
        println!("  Pain distribution:");
        for slice in &report.distribution {
            println!("    {:<13} {:>3} ({:.0}%)", slice.label, slice.count, slice.share * 100.0);
        }
    }

    println!("  Insights:");
    for line in &report.insights {
        println!("    - {}", line);
    }
}

fn print_dashboard(view: &DashboardView) {
    let overview = &view.overview;
    println!("{}, {}!", view.greeting, view.user.display_name());
    println!(
        "  Recovery: {}% ({})",
        overview.recovery_percentage,
        overview.recovery_status.label()
    );
    println!("  Estimated recovery: {}", view.data.estimated_recovery);
    println!("  Days in recovery: {}", overview.days_in_recovery);
    println!("  Pain reduction: {}%", overview.pain_reduction_percent);

    if !view.report.weekly.is_empty() {
        println!("  This week:");
        for bar in &view.report.weekly {
            println!(
                "    {}  mobility {:>2}  strength {:>2}",
                bar.date.format("%a %b %-d"),
                bar.mobility,
                bar.strength
            );
        }
    }
    if !view.data.llm_summary.is_empty() {
        println!("  Summary:");
        for line in &view.data.llm_summary {
            println!("    {}", line);
        }
    }
    if !view.data.diet_plan.is_empty() {
        println!("  Diet plan:");
        for line in &view.data.diet_plan {
            println!("    - {}", line);
        }
    }
    if !view.gallery.is_empty() {
        println!("  Videos:");
        for card in &view.gallery {
            println!("    {} - {}", card.title, card.url);
        }
    }

    print_report(&view.report);
}

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}
