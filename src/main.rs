use anyhow::Result;

use deck_log::cli::Command;
use deck_log::{
    handle_decks, handle_organize, handle_quick_add, handle_serve, handle_stats, handle_sync,
    interpret, QuickAddArgs,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(command)
}

fn execute_command(command: Command) -> Result<()> {
    match command {
        Command::Serve { port } => handle_serve(port),
        Command::Stats { game_type } => handle_stats(game_type.as_deref()),
        Command::Decks => handle_decks(),
        Command::QuickAdd {
            my_deck,
            opponent_deck,
            result,
            on_draw,
            notes,
            server,
        } => handle_quick_add(QuickAddArgs {
            my_deck,
            opponent_deck,
            result,
            on_draw,
            notes,
            server,
        }),
        Command::Organize {
            match_id,
            tournament_id,
        } => handle_organize(&match_id, &tournament_id),
        Command::Sync { server } => handle_sync(&server),
    }
}
