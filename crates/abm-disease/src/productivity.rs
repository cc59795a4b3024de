//! Population productivity.

use abm_agent::Population;

/// Productivity in percent:
/// `100 * (1 - (symptomatic + Σ severity/100 over non-symptomatic LC cases) / N)`.
///
/// Symptomatic agents count as fully unproductive; LC cases without acute
/// symptoms lose their severity share.  An empty population is 100.
pub fn productivity(pop: &Population) -> f64 {
    if pop.is_empty() {
        return 100.0;
    }
    let mut loss = 0.0;
    for i in 0..pop.count {
        if pop.symptomatic[i] {
            loss += 1.0;
        } else if pop.persistent_long_covid[i] {
            loss += pop.long_covid_severity[i] / 100.0;
        }
    }
    100.0 * (1.0 - loss / pop.count as f64)
}
