use std::{
    env,
    fmt::{self, Display},
    iter, process,
    time::{Duration, Instant},
};

use eight_puzzle::{is_solvable, search, Heuristic, Solution, State, GOAL};
use fnv::FnvHashSet;
use itertools::Itertools;
use log::info;
use rand::Rng;

// Format: nine digits, 0 is the blank.
// Either contiguous or separated by spaces or commas.
const EXAMPLES: &[&str] = &[
    "123456708", // one move
    "813402765",
    "867254301", // one of the two 31-move positions
    "123456870", // unsolvable
];

#[auto_enums::auto_enum(Iterator)]
fn heuristics(choice: Option<Heuristic>) -> impl Iterator<Item = Heuristic> {
    match choice {
        Some(h) => iter::once(h),
        None => Heuristic::ALL.into_iter(),
    }
}

fn timed_search(start: State, heuristic: Heuristic) -> (Solution, Duration) {
    let began = Instant::now();
    let solution = search(start, &heuristic);
    (solution, began.elapsed())
}

// every board along a solution, each headed by the slide that produced it
struct Steps<'a>(&'a Solution);

impl Display for Steps<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (ix, node) in self.0.path.iter().enumerate() {
            match node.tile {
                None => writeln!(f, "Start:")?,
                Some(tile) => writeln!(f, "Move {}: slide {}", ix, tile)?,
            }
            writeln!(f, "{}", node.state)?;
            writeln!(f)?;
        }

        Ok(())
    }
}

/// `count` distinct solvable starts, none of them already solved.
fn unique_starts<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<State> {
    let mut seen = FnvHashSet::default();
    let mut starts = Vec::with_capacity(count);
    while starts.len() < count {
        let state = State::random_solvable(rng);
        if state != GOAL && seen.insert(state) {
            starts.push(state);
        }
    }

    starts
}

#[derive(Clone, Copy, Default, Debug)]
struct Totals {
    steps: usize,
    expanded: usize,
    elapsed: Duration,
}

impl Totals {
    fn add(&mut self, solution: &Solution, elapsed: Duration) {
        self.steps += solution.cost();
        self.expanded += solution.expanded;
        self.elapsed += elapsed;
    }

    // (steps, expanded, milliseconds) per instance
    fn averages(&self, count: usize) -> (f64, f64, f64) {
        if count == 0 {
            return (0.0, 0.0, 0.0);
        }

        let n = count as f64;
        (
            self.steps as f64 / n,
            self.expanded as f64 / n,
            self.elapsed.as_secs_f64() * 1000.0 / n,
        )
    }
}

fn run_batch(starts: &[State], choice: Option<Heuristic>) {
    println!("Solving {} random instances...", starts.len());
    println!();

    let mut totals: Vec<(Heuristic, Totals)> = heuristics(choice)
        .map(|h| (h, Totals::default()))
        .collect();

    for (ix, &start) in starts.iter().enumerate() {
        let line = totals
            .iter_mut()
            .map(|(heuristic, total)| {
                let (solution, elapsed) = timed_search(start, *heuristic);
                total.add(&solution, elapsed);
                format!(
                    "{} steps={}, expanded={}",
                    heuristic,
                    solution.cost(),
                    solution.expanded
                )
            })
            .join(";  ");
        println!("#{:03}: {}", ix + 1, line);
    }

    println!();
    println!("=== Averages over {} instances ===", starts.len());
    for (heuristic, total) in &totals {
        let (steps, expanded, millis) = total.averages(starts.len());
        println!(
            "{:<10}: avg steps={:.2}, avg expanded={:.1}, avg time={:.1} ms",
            heuristic, steps, expanded, millis
        );
    }
}

fn solve_and_report(source: &str, choice: Option<Heuristic>) {
    println!("----");
    let state: State = match source.parse() {
        Ok(state) => state,
        Err(e) => {
            println!("{:?}: {}", source, e);
            return;
        }
    };

    println!("Start:");
    println!("{}", state);

    if !is_solvable(&state) {
        println!("Not solvable");
        return;
    }

    for heuristic in heuristics(choice) {
        info!("solving {:?} with {}", source, heuristic);
        let (solution, elapsed) = timed_search(state, heuristic);

        println!("----");
        println!(
            "{}: found a solution in {} moves, expanded {} (generated {} total), {:.1} ms.",
            heuristic,
            solution.cost(),
            solution.expanded,
            solution.generated,
            elapsed.as_secs_f64() * 1000.0
        );
        println!();
        print!("{}", Steps(&solution));
    }
}

fn usage_error(message: impl Display) -> ! {
    eprintln!("{}", message);
    eprintln!("usage: eight-puzzle [--heuristic=hamming|manhattan] [--random=N] [PUZZLE]...");
    process::exit(2);
}

fn main() {
    env_logger::init();

    let mut choice = None;
    let mut random = None;
    let mut puzzles = Vec::new();
    for arg in env::args().skip(1) {
        if let Some(name) = arg.strip_prefix("--heuristic=") {
            match name.parse::<Heuristic>() {
                Ok(h) => choice = Some(h),
                Err(e) => usage_error(e),
            }
        } else if let Some(count) = arg.strip_prefix("--random=") {
            match count.parse::<usize>() {
                Ok(n) => random = Some(n),
                Err(e) => usage_error(format!("bad --random count `{}`: {}", count, e)),
            }
        } else {
            puzzles.push(arg);
        }
    }

    if let Some(count) = random {
        let starts = unique_starts(count, &mut rand::thread_rng());
        run_batch(&starts, choice);
    } else if puzzles.is_empty() {
        puzzles = EXAMPLES.iter().map(|s| s.to_string()).collect();
    }

    for source in &puzzles {
        solve_and_report(source, choice);
    }
}

#[cfg(test)]
mod test {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn steps_show_every_board() {
        let start: State = "123456708".parse().unwrap();
        let solution = search(start, &Heuristic::Manhattan);
        assert_eq!(
            Steps(&solution).to_string(),
            "Start:\n1 2 3\n4 5 6\n7 . 8\n\nMove 1: slide 8\n1 2 3\n4 5 6\n7 8 .\n\n"
        );
    }

    #[test]
    fn steps_of_an_empty_path_are_empty() {
        let solution = Solution {
            path: Vec::new(),
            expanded: 3,
            generated: 5,
        };
        assert_eq!(Steps(&solution).to_string(), "");
    }

    #[test]
    fn unique_starts_are_distinct_unsolved_and_solvable() {
        let mut rng = StdRng::seed_from_u64(9);
        let starts = unique_starts(100, &mut rng);
        assert_eq!(starts.len(), 100);
        assert_eq!(starts.iter().unique().count(), 100);
        assert!(starts.iter().all(|s| *s != GOAL && is_solvable(s)));
        assert!(unique_starts(0, &mut rng).is_empty());
    }

    #[test]
    fn totals_average_per_instance() {
        let mut totals = Totals::default();
        for puzzle in ["123456708", "123405786"] {
            let solution = search(puzzle.parse().unwrap(), &Heuristic::Manhattan);
            totals.add(&solution, Duration::from_millis(250));
        }

        let (steps, _, millis) = totals.averages(2);
        assert_eq!(totals.steps, 3);
        assert_eq!(steps, 1.5);
        assert_eq!(millis, 250.0);
        assert_eq!(Totals::default().averages(0), (0.0, 0.0, 0.0));
    }

    #[test]
    fn heuristic_choice() {
        assert_eq!(heuristics(None).collect::<Vec<_>>(), Heuristic::ALL.to_vec());
        assert_eq!(
            heuristics(Some(Heuristic::Hamming)).collect::<Vec<_>>(),
            vec![Heuristic::Hamming]
        );
    }
}
