use super::{load_sequence, load_table};
use crate::cli::SurveyArgs;
use crate::config::{self, defaults::DefaultsConfig};
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use dnafold::engine::config::SelectionStrategy;
use dnafold::engine::progress::ProgressReporter;
use dnafold::workflows::{self, survey::SurveyResult};

pub fn run(args: SurveyArgs) -> Result<()> {
    let base = config::build_genetic_config(&args.genetic, None)?;
    let sequence = load_sequence(&args.sequence)?;
    let reference = load_table(args.table.table.as_deref())?;

    let sizes = if args.sizes.is_empty() {
        DefaultsConfig::default().survey_sizes
    } else {
        args.sizes
    };
    let strategies = if args.strategies.is_empty() {
        SelectionStrategy::ALL.to_vec()
    } else {
        args.strategies
    };

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Surveying {} strategies over population sizes {:?}...",
        strategies.len(),
        sizes
    );
    let result = workflows::survey::run(&sequence, &reference, &base, &sizes, &strategies, &reporter)?;

    print!("{}", render_grid(&result, &strategies, &sizes));
    if let Some(best) = result.overall_best() {
        println!(
            "Best: {} with population {} (score {:.4})",
            best.strategy, best.population_size, best.best_score
        );
    }
    Ok(())
}

/// One row per strategy, one column per population size.
fn render_grid(result: &SurveyResult, strategies: &[SelectionStrategy], sizes: &[usize]) -> String {
    let mut out = format!("{:<12}", "strategy");
    for size in sizes {
        out.push_str(&format!("{:>12}", size));
    }
    out.push('\n');
    for &strategy in strategies {
        out.push_str(&format!("{:<12}", strategy.name()));
        for &size in sizes {
            match result.score(strategy, size) {
                Some(score) => out.push_str(&format!("{:>12.4}", score)),
                None => out.push_str(&format!("{:>12}", "-")),
            }
        }
        out.push('\n');
    }
    out
}
