//! Per-generation reporting hooks.
//!
//! An [`Observer`] is called once per evaluated generation with the sorted
//! population. [`StatsPrinter`] renders the classic text report; closures
//! work as observers too.

use super::types::{FitnessEvaluator, Genome};
use std::io::{self, Write};

/// Observes the evolution loop.
///
/// Observers see the population read-only and cannot influence the run.
pub trait Observer {
    /// Called with the population sorted best first, the zero-based
    /// generation index, and the evaluator of the run.
    fn on_generation(
        &mut self,
        population: &[Genome],
        generation: usize,
        fitness: &dyn FitnessEvaluator,
    );
}

impl<T> Observer for T
where
    T: FnMut(&[Genome], usize, &dyn FitnessEvaluator),
{
    fn on_generation(
        &mut self,
        population: &[Genome],
        generation: usize,
        fitness: &dyn FitnessEvaluator,
    ) {
        self(population, generation, fitness)
    }
}

/// Summary statistics of one generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationStats {
    /// Zero-based generation index.
    pub generation: usize,
    /// Mean score over the population.
    pub average_fitness: f64,
    /// Highest-scoring genome.
    pub best: Genome,
    /// Score of `best`.
    pub best_fitness: i64,
    /// Lowest-scoring genome.
    pub worst: Genome,
    /// Score of `worst`.
    pub worst_fitness: i64,
}

impl GenerationStats {
    /// Computes statistics for `population`. Returns `None` if it is empty.
    ///
    /// The population does not need to be sorted. Ties keep the earliest
    /// genome for `best` and the latest for `worst`.
    pub fn compute(
        population: &[Genome],
        generation: usize,
        fitness: &dyn FitnessEvaluator,
    ) -> Option<Self> {
        let scored: Vec<(&Genome, i64)> = population
            .iter()
            .map(|g| (g, fitness.evaluate(g)))
            .collect();

        let best = scored
            .iter()
            .rev()
            .max_by_key(|(_, score)| *score)?;
        let worst = scored.iter().rev().min_by_key(|(_, score)| *score)?;
        let total: i64 = scored.iter().map(|(_, score)| score).sum();

        Some(Self {
            generation,
            average_fitness: total as f64 / scored.len() as f64,
            best: best.0.clone(),
            best_fitness: best.1,
            worst: worst.0.clone(),
            worst_fitness: worst.1,
        })
    }
}

/// Writes a text report of every generation.
///
/// ```text
/// GENERATION 03
/// =============
/// Population: [11110110, 11010110, ...]
/// Avg. Fitness: 5.400000
/// Best: 11110110 (6.000000)
/// Worst: 01000110 (3.000000)
/// ```
///
/// Write failures are logged and otherwise ignored.
pub struct StatsPrinter<W: Write> {
    out: W,
}

impl StatsPrinter<io::Stdout> {
    /// A printer writing to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> StatsPrinter<W> {
    /// A printer writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consumes the printer and returns the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_report(
        &mut self,
        population: &[Genome],
        generation: usize,
        fitness: &dyn FitnessEvaluator,
    ) -> io::Result<()> {
        let Some(stats) = GenerationStats::compute(population, generation, fitness) else {
            return Ok(());
        };

        let rendered: Vec<String> = population.iter().map(Genome::to_string).collect();

        writeln!(self.out, "GENERATION {generation:02}")?;
        writeln!(self.out, "=============")?;
        writeln!(self.out, "Population: [{}]", rendered.join(", "))?;
        writeln!(self.out, "Avg. Fitness: {:.6}", stats.average_fitness)?;
        writeln!(
            self.out,
            "Best: {} ({:.6})",
            stats.best, stats.best_fitness as f64
        )?;
        writeln!(
            self.out,
            "Worst: {} ({:.6})",
            stats.worst, stats.worst_fitness as f64
        )?;
        writeln!(self.out)?;
        self.out.flush()
    }
}

impl<W: Write> Observer for StatsPrinter<W> {
    fn on_generation(
        &mut self,
        population: &[Genome],
        generation: usize,
        fitness: &dyn FitnessEvaluator,
    ) {
        if let Err(err) = self.write_report(population, generation, fitness) {
            log::warn!("failed to write stats for generation {generation}: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::types::CountOnes;

    fn population(items: &[&str]) -> Vec<Genome> {
        items.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn test_stats_compute() {
        let pop = population(&["0011", "1111", "0000", "0111"]);
        let stats = GenerationStats::compute(&pop, 2, &CountOnes).unwrap();
        assert_eq!(stats.generation, 2);
        assert!((stats.average_fitness - 2.25).abs() < 1e-12);
        assert_eq!(stats.best.to_string(), "1111");
        assert_eq!(stats.best_fitness, 4);
        assert_eq!(stats.worst.to_string(), "0000");
        assert_eq!(stats.worst_fitness, 0);
    }

    #[test]
    fn test_stats_ties() {
        let pop = population(&["10", "01", "00", "00"]);
        let stats = GenerationStats::compute(&pop, 0, &CountOnes).unwrap();
        assert_eq!(stats.best.to_string(), "10");
        assert_eq!(stats.worst, pop[3]);
    }

    #[test]
    fn test_stats_empty() {
        assert!(GenerationStats::compute(&[], 0, &CountOnes).is_none());
    }

    #[test]
    fn test_printer_format() {
        let pop = population(&["111", "101", "000"]);
        let mut printer = StatsPrinter::new(Vec::new());
        printer.on_generation(&pop, 7, &CountOnes);
        let text = String::from_utf8(printer.into_inner()).unwrap();

        let expected = "GENERATION 07\n\
                        =============\n\
                        Population: [111, 101, 000]\n\
                        Avg. Fitness: 1.666667\n\
                        Best: 111 (3.000000)\n\
                        Worst: 000 (0.000000)\n\
                        \n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_closure_observer() {
        let mut seen = Vec::new();
        {
            let mut observer = |pop: &[Genome], gen: usize, _: &dyn FitnessEvaluator| {
                seen.push((gen, pop.len()));
            };
            let pop = population(&["1", "0"]);
            observer.on_generation(&pop, 0, &CountOnes);
            observer.on_generation(&pop, 1, &CountOnes);
        }
        assert_eq!(seen, vec![(0, 2), (1, 2)]);
    }
}
