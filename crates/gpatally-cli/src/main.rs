mod cli;
mod courses_cmd;
mod gpa_cmd;
mod lines_cmd;
mod shared;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        cli::Commands::Gpa {
            ref file,
            ref goal,
            ref pending_credits,
            merit_scholar,
            pre_health,
            graduating_soon,
            y_tolerance,
            ref format,
        } => gpa_cmd::run(
            file,
            goal.as_deref(),
            pending_credits.as_deref(),
            merit_scholar,
            pre_health,
            graduating_soon,
            y_tolerance,
            format,
        ),
        cli::Commands::Courses {
            ref file,
            y_tolerance,
            ref format,
        } => courses_cmd::run(file, y_tolerance, format),
        cli::Commands::Lines {
            ref file,
            y_tolerance,
            course_rows,
        } => lines_cmd::run(file, y_tolerance, course_rows),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
