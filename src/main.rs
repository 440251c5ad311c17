//! SweepX - Entry Point
//!
//! Command-line front end over the progression engine and the local
//! account session.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};

use sweepx::bounty::leaderboard;
use sweepx::progression::{self, reputation_score, reward_for_cleanup};
use sweepx::save::{Session, SessionStore, User};
use sweepx::ui::{format_compact, progress_bar, relative_time_label};
use sweepx::Tuning;

/// Width of the XP bar in characters
const BAR_WIDTH: usize = 24;

#[derive(Parser)]
#[command(name = "sweepx")]
#[command(about = "SweepX - clean up your city, level up", long_about = None)]
#[command(version)]
struct Cli {
    /// Session file to use instead of the platform data directory
    #[arg(long, global = true)]
    session: Option<PathBuf>,

    /// Tuning file (RON)
    #[arg(long, global = true)]
    tuning: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show level and progress for an XP total
    Progress { xp: u64 },

    /// Preview the reward for a cleanup
    Reward {
        /// Dirt severity, 1 (light) to 5 (extreme)
        severity: u8,
        /// Coins staked on the bounty
        stake: u64,
    },

    /// Show the title for a level
    Title { level: u32 },

    /// Compute a reputation score
    Reputation {
        cleanups: u32,
        /// Success rate between 0.0 and 1.0
        rate: f64,
    },

    /// Show how long ago a timestamp was
    Ago { timestamp: String },

    /// Create an account and log in
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },

    /// Log in
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Log out and forget the stored session
    Logout,

    /// Show the logged-in account
    Whoami,

    /// Rank the accounts in a JSON file
    Leaderboard { file: PathBuf },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    log::debug!("Starting SweepX v{}", env!("CARGO_PKG_VERSION"));

    let result = run(cli);
    if let Err(ref e) = result {
        log::error!("sweepx exited with error: {:#}", e);
    }
    result
}

fn run(cli: Cli) -> Result<()> {
    let tuning = match &cli.tuning {
        Some(path) => Tuning::load_or_default(path),
        None => Tuning::new(),
    };
    let store = match &cli.session {
        Some(path) => SessionStore::new(path),
        None => SessionStore::default_location(),
    };

    match cli.command {
        Commands::Progress { xp } => {
            print_progress(xp);
        }
        Commands::Reward { severity, stake } => {
            let reward = reward_for_cleanup(severity, stake)?;
            println!("+{} XP, +{} coins", reward.xp_award, format_compact(reward.coin_award));
        }
        Commands::Title { level } => {
            println!("{}", progression::level_title(level));
        }
        Commands::Reputation { cleanups, rate } => {
            println!("{}", reputation_score(cleanups, rate)?);
        }
        Commands::Ago { timestamp } => {
            println!("{}", relative_time_label(&timestamp)?);
        }
        Commands::Signup { email, username, password } => {
            let mut session = Session::restore(store, tuning)?;
            let user = session.signup(&email, &username, &password, Utc::now())?;
            println!("Welcome, {}! You start with {} coins.", user.username, user.coins);
        }
        Commands::Login { email, password } => {
            let mut session = Session::restore(store, tuning)?;
            let user = session.login(&email, &password, Utc::now())?;
            println!("Logged in as {}", user.username);
        }
        Commands::Logout => {
            let mut session = Session::restore(store, tuning)?;
            session.logout()?;
            println!("Logged out");
        }
        Commands::Whoami => {
            let session = Session::restore(store, tuning)?;
            match session.current() {
                Some(user) => print_account(user)?,
                None => println!("Not logged in"),
            }
        }
        Commands::Leaderboard { file } => {
            let data = fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let users: Vec<User> = serde_json::from_str(&data)
                .with_context(|| format!("parsing {}", file.display()))?;
            for entry in leaderboard(&users) {
                println!(
                    "{:>3}. {:<20} Lv {:<3} {:>8} XP  {} cleanups",
                    entry.rank,
                    entry.username,
                    entry.level,
                    format_compact(entry.xp),
                    entry.cleanups_completed
                );
            }
        }
    }

    Ok(())
}

fn print_progress(xp: u64) {
    let progress = progression::progress_to_next_level(xp);
    println!(
        "Level {} - {}",
        progress.current_level,
        progression::level_title(progress.current_level)
    );
    println!(
        "{} {} / {} XP ({:.0}%)",
        progress_bar(progress.percentage_to_next_level, BAR_WIDTH),
        format_compact(progress.xp_into_level),
        format_compact(progress.xp_needed_for_next_level),
        progress.percentage_to_next_level
    );
}

fn print_account(user: &User) -> Result<()> {
    println!("{} <{}>", user.username, user.email);
    print_progress(user.xp);
    println!("Coins:      {}", format_compact(user.coins));
    println!("Reputation: {}", user.reputation);
    println!("Cleanups:   {}", user.cleanups_completed);
    println!("Bounties:   {}", user.bounties_created);
    println!("Joined:     {}", relative_time_label(&user.created_at.to_rfc3339())?);
    if !user.achievements.is_empty() {
        let names: Vec<&str> = user.achievements.iter().map(|a| a.name.as_str()).collect();
        println!("Achievements: {}", names.join(", "));
    }
    Ok(())
}
