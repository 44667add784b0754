//! OneMax demo: evolve a bit string toward all ones.

use clap::Parser;
use u_evolve::ga::{
    CountOnes, Evolution, EvolutionConfig, FlipMutation, RandomPopulation, SizePolicy,
    StatsPrinter,
};
use u_evolve::Result;

#[derive(Parser)]
#[command(name = "onemax")]
#[command(about = "Evolve a bit string toward all ones", long_about = None)]
struct Cli {
    /// Number of genomes per generation
    #[arg(long, default_value = "10")]
    population_size: usize,

    /// Number of genes per genome
    #[arg(long, default_value = "8")]
    genome_length: usize,

    /// Target score (defaults to the genome length)
    #[arg(long)]
    fitness_limit: Option<i64>,

    /// Maximum number of generations
    #[arg(long, default_value = "100")]
    generation_limit: usize,

    /// Flip probability of the mutation operator
    #[arg(long, default_value = "0.5")]
    mutation_probability: f64,

    /// Random seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Let odd populations shrink instead of keeping their size
    #[arg(long)]
    shrink: bool,

    /// Skip the per-generation report
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let fitness_limit = cli.fitness_limit.unwrap_or(cli.genome_length as i64);
    let mut config =
        EvolutionConfig::new(fitness_limit).with_generation_limit(cli.generation_limit);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if cli.shrink {
        config = config.with_size_policy(SizePolicy::Shrink);
    }

    let engine = Evolution::new(CountOnes, config)
        .with_mutation(FlipMutation::new(1, cli.mutation_probability));
    let populate = RandomPopulation::new(cli.population_size, cli.genome_length);

    let result = if cli.quiet {
        engine.run(&populate)?
    } else {
        engine.run_with_observer(&populate, &mut StatsPrinter::stdout())?
    };

    println!("Finished after {} generations", result.generations);
    if result.converged {
        println!("Target {fitness_limit} reached: {}", result.best());
    } else {
        println!(
            "Target {fitness_limit} not reached, best {} ({})",
            result.best(),
            result.best_fitness
        );
    }

    Ok(())
}
