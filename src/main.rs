use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;

use std::fs::File;
use std::io::{stdin, stdout, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::time::Duration;

use connectn_ai::arena::{self, Outcome};
use connectn_ai::board::Board;
use connectn_ai::codec;
use connectn_ai::config::{GameConfig, SearchConfig, Weights};
use connectn_ai::heuristic::{CenterEvaluator, LineEvaluator, PatternEvaluator};
use connectn_ai::search::{self, AlphaBeta, Strategy};

mod display;

/// Connect-N: Connect 4 on any board, played by an alpha-beta search agent
#[derive(Parser)]
#[command(name = "connectn")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log search diagnostics (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play a game in the terminal, any player may be AI controlled
    Play {
        #[command(flatten)]
        game: GameArgs,
        #[command(flatten)]
        search: SearchArgs,
        /// Write the final position to this file
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Print the move the agent would play in a position
    Best {
        #[command(flatten)]
        game: GameArgs,
        #[command(flatten)]
        search: SearchArgs,
        /// Moves played so far as 1-indexed column digits, e.g. 4453
        #[arg(long, default_value = "")]
        moves: String,
        /// Read the position from a file written by `play --save`
        #[arg(long, conflicts_with = "moves")]
        load: Option<PathBuf>,
    },
    /// Pit two evaluators against each other over every short opening
    Arena {
        #[command(flatten)]
        game: GameArgs,
        /// Length of the openings played before the agents take over
        #[arg(long, default_value_t = 2)]
        plies: usize,
        #[arg(long, value_enum, default_value_t = EvaluatorKind::Pattern)]
        first: EvaluatorKind,
        #[arg(long, value_enum, default_value_t = EvaluatorKind::Center)]
        second: EvaluatorKind,
        #[arg(long, default_value_t = 4)]
        depth: usize,
    },
}

#[derive(Args)]
struct GameArgs {
    #[arg(long, default_value_t = connectn_ai::DEFAULT_WIDTH)]
    width: usize,
    #[arg(long, default_value_t = connectn_ai::DEFAULT_HEIGHT)]
    height: usize,
    /// Tokens in a row needed to win
    #[arg(long, default_value_t = connectn_ai::DEFAULT_WIN_LENGTH)]
    win_length: usize,
}

impl GameArgs {
    fn config(&self) -> GameConfig {
        GameConfig {
            width: self.width,
            height: self.height,
            win_length: self.win_length,
        }
    }
}

#[derive(Args)]
struct SearchArgs {
    /// Search depth in plies
    #[arg(long, default_value_t = connectn_ai::DEFAULT_DEPTH)]
    depth: usize,
    /// Deepen iteratively for at most this many milliseconds per move
    #[arg(long)]
    time_limit_ms: Option<u64>,
    #[arg(long, value_enum, default_value_t = EvaluatorKind::Pattern)]
    evaluator: EvaluatorKind,
}

impl SearchArgs {
    fn config(&self) -> Result<SearchConfig> {
        let config = SearchConfig {
            max_depth: self.depth,
            time_limit: self.time_limit_ms.map(Duration::from_millis),
            weights: Weights::default(),
        };
        config.validate()?;
        Ok(config)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum EvaluatorKind {
    /// Every pattern feature
    Pattern,
    /// Center bias and wins only
    Center,
    /// Whole-board line windows
    Line,
}

fn make_strategy(kind: EvaluatorKind, config: &SearchConfig) -> Box<dyn Strategy> {
    match kind {
        EvaluatorKind::Pattern => search::from_config(PatternEvaluator::new(config.weights), config),
        EvaluatorKind::Center => search::from_config(CenterEvaluator::new(config.weights), config),
        EvaluatorKind::Line => search::from_config(LineEvaluator::new(config.weights), config),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Command::Play { game, search, save } => play(game.config(), search.config()?, search.evaluator, save),
        Command::Best {
            game,
            search,
            moves,
            load,
        } => {
            let board = match load {
                Some(path) => codec::read_board(&mut BufReader::new(File::open(path)?))?,
                None => game.config().board()?.play_moves(&moves)?,
            };
            best(&board, &search.config()?, search.evaluator)
        }
        Command::Arena {
            game,
            plies,
            first,
            second,
            depth,
        } => {
            let board = game.config().board()?;
            let config = SearchConfig {
                max_depth: depth,
                ..SearchConfig::default()
            };
            config.validate()?;
            let tally = arena::run_match(
                &board,
                plies,
                || make_strategy(first, &config),
                || make_strategy(second, &config),
                true,
            )?;
            println!("First evaluator: {}", tally);
            Ok(())
        }
    }
}

fn best(board: &Board, config: &SearchConfig, kind: EvaluatorKind) -> Result<()> {
    println!("{}\n", board);
    if config.time_limit.is_some() {
        let column = make_strategy(kind, config).choose_move(board)?;
        println!("Best move: {}", column + 1);
        return Ok(());
    }

    // a fixed depth search can report its line as well
    let result = match kind {
        EvaluatorKind::Pattern => AlphaBeta::new(PatternEvaluator::new(config.weights), config.max_depth).search(board)?,
        EvaluatorKind::Center => AlphaBeta::new(CenterEvaluator::new(config.weights), config.max_depth).search(board)?,
        EvaluatorKind::Line => AlphaBeta::new(LineEvaluator::new(config.weights), config.max_depth).search(board)?,
    };
    let column = result.best_move().ok_or_else(|| anyhow!("search returned no move"))?;
    let line: Vec<String> = result.path.iter().map(|c| (c + 1).to_string()).collect();
    println!("Best move: {}", column + 1);
    println!("Score: {:.2}, expected line: {}", result.score, line.join(" "));
    Ok(())
}

fn ask_yes_no(question: &str) -> Result<bool> {
    let stdin = stdin();
    loop {
        let mut buffer = String::new();
        print!("{} y/n: ", question);
        stdout().flush()?;
        stdin.read_line(&mut buffer)?;
        match buffer.to_lowercase().chars().next() {
            Some('y') => return Ok(true),
            Some('n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}

fn play(game: GameConfig, config: SearchConfig, kind: EvaluatorKind, save: Option<PathBuf>) -> Result<()> {
    let mut board = game.board()?;
    let stdin = stdin();

    println!("Welcome to Connect {}\n", game.win_length);

    let ai_players = (
        ask_yes_no("Is player 1 AI controlled?")?,
        ask_yes_no("Is player 2 AI controlled?")?,
    );
    let mut agent = make_strategy(kind, &config);

    let outcome = loop {
        display::draw(&board)?;

        if board.last_move_won() {
            break Outcome::Win(board.player().other());
        }
        if board.is_full() {
            break Outcome::Draw;
        }

        let player_one = board.player().number() == 1;
        let column = if (player_one && ai_players.0) || (!player_one && ai_players.1) {
            println!("AI is thinking...");
            stdout().flush()?;

            // slow down play if both players are AI
            if ai_players == (true, true) {
                std::thread::sleep(Duration::from_secs(1));
            }

            let column = agent.choose_move(&board)?;
            println!("{} plays {}", agent.name(), column + 1);
            column
        } else {
            print!("Move input > ");
            stdout().flush()?;
            let mut input = String::new();
            stdin.read_line(&mut input)?;

            match input.trim().parse::<usize>() {
                Ok(column) if column >= 1 => column - 1,
                _ => {
                    println!("Invalid number: {}", input.trim());
                    continue;
                }
            }
        };

        match board.play(column) {
            Ok(next) => board = next,
            // try the move again
            Err(err) => println!("{}", err),
        }
    };

    match outcome {
        Outcome::Win(player) => println!("{} wins!", player),
        Outcome::Draw => println!("Draw!"),
    }

    if let Some(path) = save {
        let mut file = BufWriter::new(File::create(&path)?);
        codec::write_board(&mut file, &board)?;
        file.flush()?;
        info!("saved final position to {}", path.display());
    }
    Ok(())
}
