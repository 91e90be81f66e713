use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "deck-log tournament tracker")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "kebab-case")]
pub enum Command {
    /// Start the HTTP API server
    Serve {
        /// Port number (optional, defaults to DECK_LOG_PORT or 3000)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Print win-rate statistics for recorded tournaments
    Stats {
        /// Only count tournaments of this game type (magic or riftbound)
        #[arg(short, long)]
        game_type: Option<String>,
    },
    /// List every deck name seen so far
    Decks,
    /// Record a match in the inbox from its final score
    QuickAdd {
        #[arg(long)]
        my_deck: String,
        #[arg(long, default_value = "")]
        opponent_deck: String,
        /// Final score from my side, e.g. 2-1
        #[arg(short, long)]
        result: String,
        /// Game one was on the draw
        #[arg(long)]
        on_draw: bool,
        #[arg(short, long)]
        notes: Option<String>,
        /// Send to a running server instead of the local store; queued
        /// in the outbox if the server cannot be reached
        #[arg(short, long)]
        server: Option<String>,
    },
    /// Move a match from the inbox into a tournament
    Organize {
        #[arg(long)]
        match_id: String,
        #[arg(long)]
        tournament_id: String,
    },
    /// Replay queued offline changes against a server
    Sync {
        #[arg(short, long)]
        server: String,
    },
}
