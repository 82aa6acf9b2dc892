use clap::{Parser, Subcommand};
use crossterm::style::{Attribute, Color as TermColor, Stylize};
use cubesolver::facelet::{Face, FaceCube};
use cubesolver::scramble::{gen_scramble, scramble_from_str, scramble_to_str};
use cubesolver::solver::{solver, SolveResult, SolverConfig};
use cubesolver::{constants::*, error::Error};
use log::debug;
use rand::{rngs::StdRng, thread_rng, SeedableRng};
use spinners::Spinner;
use std::time::Instant;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "solves the cube with a bounded search and a layer-by-layer fallback")]
    #[clap(group(
    clap::ArgGroup::new("state")
        .required(true)
        .args(&["scramble", "facelet"]),
    ))]
    Solve {
        #[arg(short, long)]
        scramble: Option<String>,

        #[arg(short, long)]
        facelet: Option<String>,

        #[arg(short = 'd', long, default_value_t = MAX_DEPTH)]
        max_depth: usize,

        #[arg(short = 'n', long, default_value_t = MAX_STATES)]
        max_states: usize,

        #[arg(short, long)]
        verbose: bool,
    },

    #[command(about = "generates scramble")]
    Scramble {
        #[arg(short, long, default_value_t = SCRAMBLE_LENGTH)]
        length: usize,

        #[arg(short, long)]
        seed: Option<u64>,

        #[arg(short, long)]
        preview: bool,
    },

    #[command(about = "applies moves to a cube and prints the facelet string")]
    Apply {
        moves: String,

        #[arg(short, long)]
        facelet: Option<String>,
    },
}

fn parse_state(scramble: &Option<String>, facelet: &Option<String>) -> Result<FaceCube, Error> {
    let mut cube = match facelet {
        Some(facelet) => FaceCube::try_from(facelet.as_str())?,
        None => FaceCube::default(),
    };
    if let Some(scramble) = scramble {
        cube.apply_moves(&scramble_from_str(scramble)?);
    }
    Ok(cube)
}

fn solve(
    scramble: &Option<String>,
    facelet: &Option<String>,
    config: SolverConfig,
    verbose: bool,
) -> Result<(), Error> {
    let state = parse_state(scramble, facelet)?;
    debug!("solving {}", state);

    let start = Instant::now();
    let mut spinner = Spinner::new(spinners::Spinners::Dots, "Solving".to_owned());
    let result = solver(&state, config);
    let end = Instant::now();
    spinner.stop_with_newline();

    println!("Solution: {}", scramble_to_str(&result.solution));
    println!("Move count: {}", result.solution.len());
    println!("Method: {:?}", result.method);
    println!("Solved: {}", solved_label(result.solved));
    println!("Solve time: {:?}", result.solve_time);
    println!("Total time: {:?}", end - start);
    if verbose {
        print_details(&result);
    }
    Ok(())
}

fn solved_label(solved: bool) -> String {
    match solved {
        true => "yes".with(TermColor::Green).to_string(),
        false => "no".with(TermColor::Red).attribute(Attribute::Bold).to_string(),
    }
}

fn print_details(result: &SolveResult) {
    println!("States visited: {}", result.states_visited);
    for report in &result.stages {
        println!(
            "  {:<24} attempts {:>3}  moves {:>4}  {}",
            report.stage.to_string(),
            report.attempts,
            report.moves,
            solved_label(report.converged)
        );
    }
}

fn print_faces(cube: &FaceCube) {
    for face in [Face::U, Face::L, Face::F, Face::R, Face::B, Face::D] {
        let stickers: String = cube.face(face).iter().map(|c| c.to_char()).collect();
        println!(
            "{}: {} {} {}",
            face,
            &stickers[0..3],
            &stickers[3..6],
            &stickers[6..9]
        );
    }
}

fn scramble(length: usize, seed: Option<u64>, preview: bool) -> Result<(), Error> {
    let ss = match seed {
        Some(seed) => gen_scramble(length, &mut StdRng::seed_from_u64(seed)),
        None => gen_scramble(length, &mut thread_rng()),
    };
    let mut cube = FaceCube::default();
    cube.apply_moves(&ss);
    println!("Scramble: {}", scramble_to_str(&ss));
    println!("Facelet: {}", cube);
    if preview {
        print_faces(&cube);
    }
    Ok(())
}

fn apply(moves: &str, facelet: &Option<String>) -> Result<(), Error> {
    let cube = parse_state(&Some(moves.to_string()), facelet)?;
    println!("{}", cube);
    println!("Solved: {}", solved_label(cube.is_solved()));
    Ok(())
}

fn main() {
    pretty_env_logger::init();
    let program = Cli::parse();

    let result = match &program.command {
        Some(Commands::Solve {
            scramble,
            facelet,
            max_depth,
            max_states,
            verbose,
        }) => {
            let config = SolverConfig {
                max_depth: *max_depth,
                max_states: *max_states,
            };
            solve(scramble, facelet, config, *verbose)
        }
        Some(Commands::Scramble {
            length,
            seed,
            preview,
        }) => scramble(*length, *seed, *preview),
        Some(Commands::Apply { moves, facelet }) => apply(moves, facelet),
        _ => Ok(()),
    };

    if let Err(error) = result {
        let styled = "Error:".with(TermColor::Red).attribute(Attribute::Bold);
        println!("{styled} {error}");
    }
}
