use std::io::{self, BufRead, Write};

use alphabeta_chess::engines::engine_minimax::{EngineConfig, MinimaxEngine};
use alphabeta_chess::engines::engine_trait::Engine;
use alphabeta_chess::game_state::chess_types::Outcome;
use alphabeta_chess::game_state::game::Game;
use alphabeta_chess::utils::game_record;

const HELP: &str = "enter moves as <src><dst>[digit] (e.g. e2e4, e1g14); \
                    'moves' lists legal moves, 'record' prints the game record, \
                    'resign' or 'quit' ends the game";

fn main() {
    env_logger::init();

    let config = EngineConfig::from_env();
    let mut engine = MinimaxEngine::new(config);
    let mut game = Game::new();

    println!(
        "{} at depth {}; you play {}.",
        engine.name(),
        config.depth,
        config.player_side
    );
    println!("{HELP}");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while game.outcome().is_none() {
        if game.current_side() == engine.side() {
            match game.play_engine_move(&mut engine) {
                Ok(_) => {
                    let last = game.moves_played().last().cloned().unwrap_or_default();
                    println!("{} plays {last}", engine.name());
                }
                Err(err) => {
                    eprintln!("engine failed: {err}");
                    break;
                }
            }
            continue;
        }

        println!("\n{}\n", game.board());
        print!("{} to move> ", game.current_side());
        io::stdout().flush().ok();

        let Some(Ok(line)) = lines.next() else {
            break;
        };
        match line.trim() {
            "" => {}
            "help" => println!("{HELP}"),
            "quit" => break,
            "record" => print_record(&game),
            "resign" => {
                game.end_game(Outcome::Checkmate {
                    winner: engine.side(),
                });
            }
            "moves" => {
                let position = game.position_map();
                for (from, destinations) in game.legal_move_map() {
                    let own = position
                        .get(&from)
                        .is_some_and(|code| code.starts_with(game.current_side().code()));
                    if own && !destinations.is_empty() {
                        println!("{from}: {}", destinations.join(" "));
                    }
                }
            }
            notation => {
                if let Err(err) = game.next_move(notation) {
                    println!("{err}");
                }
            }
        }
    }

    println!("\n{}\n", game.board());
    match game.outcome() {
        Some(Outcome::Checkmate { winner }) => println!("{winner} wins."),
        Some(Outcome::Draw) => println!("Draw."),
        None => println!("Game abandoned."),
    }
    print_record(&game);
}

fn print_record(game: &Game) {
    match game_record::encode(game) {
        Ok(record) => println!("{record}"),
        Err(err) => eprintln!("{err}"),
    }
}
