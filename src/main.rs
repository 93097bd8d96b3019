use clap::Parser;
use log::{error, info};
use sokoswitch::input::parse_intents;
use sokoswitch::level::Level;
use sokoswitch::levels::Levels;
use sokoswitch::session::{Session, SessionStatus};
use sokoswitch::solver::{SolveResult, Solver};
use sokoswitch::tileset::Tileset;
use std::io::{self, BufRead, Write};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "sokoswitch")]
#[command(about = "Push every box onto a switch", long_about = None)]
struct Args {
    /// Path to a levels file; the built-in level is used when omitted
    #[arg(value_name = "FILE")]
    levels_file: Option<String>,

    /// Level number to play (1-indexed)
    #[arg(short, long, default_value = "1")]
    level: usize,

    /// Apply these keys (wasd/hjkl, r to reset) and print the final board
    #[arg(short, long, value_name = "KEYS")]
    moves: Option<String>,

    /// Print a shortest solution instead of playing
    #[arg(short, long)]
    solve: bool,

    /// Maximum number of nodes the solver explores before giving up
    #[arg(short = 'n', long, default_value = "1000000")]
    max_nodes: usize,

    /// Tileset file mapping sprite names to glyphs
    #[arg(short, long, value_name = "FILE")]
    tileset: Option<String>,
}

fn load_level(args: &Args) -> Result<Level, String> {
    if args.level == 0 {
        return Err("level numbers must be at least 1".to_string());
    }

    let Some(path) = &args.levels_file else {
        if args.level != 1 {
            return Err(format!(
                "level {} not found (only the built-in level is available)",
                args.level
            ));
        }
        info!("Using built-in level");
        return Ok(Level::built_in());
    };

    let levels = Levels::from_file(path).map_err(|e| format!("loading levels: {}", e))?;
    levels.get(args.level - 1).cloned().ok_or_else(|| {
        format!(
            "level {} not found (file contains {} levels)",
            args.level,
            levels.len()
        )
    })
}

fn print_board(tileset: &Tileset, session: &Session) {
    print!("{}", tileset.render(session.level()));
    println!("moves: {:<5}  pushes: {}", session.moves(), session.pushes());
    if session.is_completed() {
        println!("*** Level complete! ***");
    }
}

fn print_solution(level: &Level, max_nodes: usize) {
    let mut solver = Solver::new(max_nodes);
    let start = Instant::now();
    let result = solver.solve(level);
    let elapsed_ms = start.elapsed().as_millis();

    match result {
        SolveResult::Solved(solution) => {
            let moves: String = solution.iter().map(|d| d.to_char()).collect();
            println!(
                "solved: Y  steps: {:<5}  states: {:<12}  elapsed: {} ms",
                solution.len(),
                solver.nodes_explored(),
                elapsed_ms
            );
            println!("{}", moves);
        }
        SolveResult::Cutoff => println!(
            "solved: N  states: {:<12}  elapsed: {} ms (node limit reached)",
            solver.nodes_explored(),
            elapsed_ms
        ),
        SolveResult::Impossible => println!(
            "solved: X  states: {:<12}  elapsed: {} ms (no solution exists)",
            solver.nodes_explored(),
            elapsed_ms
        ),
    }
}

fn run_scripted(tileset: &Tileset, session: &mut Session, keys: &str) {
    for intent in parse_intents(keys) {
        if session.handle(intent) == SessionStatus::Quit {
            break;
        }
    }
    print_board(tileset, session);
}

fn run_interactive(tileset: &Tileset, session: &mut Session) -> io::Result<()> {
    println!("wasd/hjkl to move, r to reset, q to quit; press enter after each line of keys");
    print_board(tileset, session);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        let mut quit = false;
        for intent in parse_intents(&line) {
            if session.handle(intent) == SessionStatus::Quit {
                quit = true;
                break;
            }
        }
        if quit {
            break;
        }
        print_board(tileset, session);
    }

    println!("Bye!");
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let level = match load_level(&args) {
        Ok(level) => level,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let tileset = match &args.tileset {
        Some(path) => match Tileset::from_file(path) {
            Ok(tileset) => tileset,
            Err(e) => {
                error!("{}", e);
                eprintln!("Error loading tileset: {}", e);
                std::process::exit(1);
            }
        },
        None => Tileset::default(),
    };

    if args.solve {
        print_solution(&level, args.max_nodes);
        return;
    }

    let mut session = Session::new(level);
    match &args.moves {
        Some(keys) => run_scripted(&tileset, &mut session, keys),
        None => {
            if let Err(e) = run_interactive(&tileset, &mut session) {
                eprintln!("Error reading input: {}", e);
                std::process::exit(1);
            }
        }
    }
}
