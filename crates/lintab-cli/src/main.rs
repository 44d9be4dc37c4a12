use clap::{Parser, Subcommand};
use lintab_solver::{ConstraintOp, LpProblem, Solution, SolutionStatus, Solver, TableauSnapshot};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lintab")]
#[command(about = "Two-phase simplex solver for LP problem files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a problem file and print the optimal solution
    Solve {
        /// The file containing the problem
        file: PathBuf,
        /// Print every pivot step with its tableau
        #[arg(short, long)]
        trace: bool,
        /// Output format (json, pretty)
        #[arg(short, long, default_value = "pretty")]
        format: String,
        /// Maximum pivots per phase
        #[arg(long, default_value_t = 100)]
        max_iterations: usize,
        /// Use Bland's anti-cycling rule instead of Dantzig's
        #[arg(long)]
        bland: bool,
    },
    /// Check a problem file for errors
    Check {
        /// The file to check
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            file,
            trace,
            format,
            max_iterations,
            bland,
        } => {
            let problem = load_problem(&file);
            let solver = Solver::new()
                .with_max_iterations(max_iterations)
                .with_blands_rule(bland);

            let solution = match solver.solve(&problem) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Invalid problem: {}", e);
                    std::process::exit(1);
                }
            };

            if format == "json" {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&solution)
                        .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
                );
                if solution.status != SolutionStatus::Optimal {
                    std::process::exit(1);
                }
                return;
            }

            if trace {
                print_trace(&solution);
            }
            print_solution(&problem, &solution);
        }
        Commands::Check { file } => {
            let problem = load_problem(&file);

            let mut le = 0;
            let mut ge = 0;
            let mut eq = 0;
            for c in &problem.constraints {
                match c.op {
                    ConstraintOp::Le => le += 1,
                    ConstraintOp::Ge => ge += 1,
                    ConstraintOp::Eq => eq += 1,
                }
            }

            match problem.validate() {
                Ok(()) => {
                    println!("✓ {} is valid", file.display());
                    println!("  {} variables", problem.num_variables());
                    println!(
                        "  {} constraints ({} <=, {} >=, {} =)",
                        problem.num_constraints(),
                        le,
                        ge,
                        eq
                    );
                    println!(
                        "  objective: {}",
                        if problem.objective.minimize {
                            "minimize"
                        } else {
                            "maximize"
                        }
                    );
                }
                Err(e) => {
                    eprintln!("✗ {} has errors:", file.display());
                    eprintln!("  {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}

fn load_problem(file: &PathBuf) -> LpProblem {
    let source = match std::fs::read_to_string(file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            std::process::exit(1);
        }
    };

    match lintab_format::parse_problem(&source) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Parse error: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_solution(problem: &LpProblem, solution: &Solution) {
    match solution.status {
        SolutionStatus::Optimal => {
            println!("Status: OPTIMAL");
            println!("Objective value: {:.6}", solution.objective_value);
            println!();
            println!("Variables:");
            for (name, value) in problem.variables.iter().zip(&solution.values) {
                println!("  {:12} {:12.6}", name, value);
            }
        }
        SolutionStatus::Infeasible => {
            println!("Status: INFEASIBLE");
            println!("Phase I could not drive the artificial variables to zero.");
            std::process::exit(1);
        }
        SolutionStatus::Unbounded => {
            println!("Status: UNBOUNDED");
            println!("The problem has no finite optimal solution.");
            std::process::exit(1);
        }
        SolutionStatus::NonConvergent => {
            println!("Status: NON-CONVERGENT");
            println!("Iteration cap reached before convergence; no solution reported.");
            std::process::exit(1);
        }
    }
}

fn print_trace(solution: &Solution) {
    if let Some(initial) = &solution.trace.initial {
        println!("Initial tableau:");
        print!("{}", render_snapshot(initial));
        println!();
    }
    for step in &solution.trace.steps {
        println!(
            "Phase {}, iteration {}: x{} enters, x{} leaves (row {})",
            step.phase,
            step.iteration,
            step.entering + 1,
            step.leaving_var + 1,
            step.leaving_row + 1
        );
        print!("{}", render_snapshot(&step.after));
        println!();
    }
}

/// Renders a tableau snapshot with column headers and basis labels.
fn render_snapshot(snapshot: &TableauSnapshot) -> String {
    let m = snapshot.basis.len();
    let cols = snapshot.rows.first().map_or(0, |r| r.len());
    let width = snapshot
        .rows
        .iter()
        .flatten()
        .map(|v| format!("{v:.2}").len())
        .max()
        .unwrap_or(4)
        .max(4)
        + 2;

    let mut out = String::new();
    out.push_str("     |");
    for j in 0..cols.saturating_sub(1) {
        out.push_str(&format!("{:>width$}", format!("x{}", j + 1)));
    }
    out.push_str(&format!("{:>width$}\n", "b"));
    out.push_str(&"-".repeat(6 + width * cols));
    out.push('\n');

    for (i, row) in snapshot.rows.iter().enumerate() {
        let label = if i < m {
            format!("x{}", snapshot.basis[i] + 1)
        } else if i == m {
            "z".to_string()
        } else {
            "w".to_string()
        };
        out.push_str(&format!("{:<5}|", label));
        for v in row {
            out.push_str(&format!("{:>width$}", format!("{v:.2}")));
        }
        out.push('\n');
    }
    out
}
