use std::fmt;

use serde::Serialize;

use crate::model::opportunity::Opportunity;

/// Mean rating rounded half up to one decimal place, stored exactly as tenths.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Average {
    tenths: u32,
}

impl Average {
    pub const ZERO: Self = Self { tenths: 0 };

    pub fn from_tenths(tenths: u32) -> Self {
        Self { tenths }
    }

    pub fn tenths(self) -> u32 {
        self.tenths
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.tenths) / 10.0
    }

    /// `(average / 10) * 100`, which is exactly the tenths count.
    pub fn percentage(self) -> f64 {
        f64::from(self.tenths)
    }

    /// Absolute difference, also one decimal place.
    pub fn gap(self, other: Self) -> Self {
        Self::from_tenths(self.tenths.abs_diff(other.tenths))
    }
}

impl fmt::Display for Average {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.tenths / 10, self.tenths % 10)
    }
}

impl Serialize for Average {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(self.as_f64())
    }
}

/// Mean of the consideration values; zero when there are none.
pub fn average(opportunity: &Opportunity) -> Average {
    let n = opportunity.considerations.len() as u64;
    if n == 0 {
        return Average::ZERO;
    }
    let sum: u64 = opportunity
        .considerations
        .iter()
        .map(|c| u64::from(c.value))
        .sum();
    // round(sum * 10 / n), half up, in integers.
    let tenths = (sum * 20 + n) / (2 * n);
    Average::from_tenths(tenths as u32)
}

pub fn percentage(opportunity: &Opportunity) -> f64 {
    average(opportunity).percentage()
}

fn normalized_names(opportunity: &Opportunity) -> Vec<String> {
    let mut names: Vec<String> = opportunity
        .considerations
        .iter()
        .map(|c| c.name.trim().to_lowercase())
        .collect();
    names.sort_unstable();
    names
}

/// Whether every opportunity rates the same consideration names (case, surrounding whitespace
/// and order ignored). Empty and single-element lists always match.
pub fn considerations_match(opportunities: &[Opportunity]) -> bool {
    let Some((first, rest)) = opportunities.split_first() else {
        return true;
    };
    let reference = normalized_names(first);
    rest.iter().all(|o| normalized_names(o) == reference)
}

/// All opportunities sharing the maximum average, in input order.
pub fn highest_rated(opportunities: &[Opportunity]) -> Vec<&Opportunity> {
    let Some(best) = opportunities.iter().map(average).max() else {
        return Vec::new();
    };
    opportunities
        .iter()
        .filter(|o| average(o) == best)
        .collect()
}

/// One row of the comparison, in ranking order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RankedEntry {
    pub id: u32,
    pub name: String,
    pub color: String,
    pub average: Average,
    pub percentage: f64,
}

/// Opportunities sorted by descending average; equal averages keep input order.
pub fn rank(opportunities: &[Opportunity]) -> Vec<RankedEntry> {
    let mut entries: Vec<RankedEntry> = opportunities
        .iter()
        .map(|o| {
            let avg = average(o);
            RankedEntry {
                id: o.id,
                name: o.name.clone(),
                color: o.color.clone(),
                average: avg,
                percentage: avg.percentage(),
            }
        })
        .collect();
    entries.sort_by(|a, b| b.average.cmp(&a.average));
    entries
}

/// Outcome of the ranking.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Verdict {
    /// Nothing to compare.
    Empty,
    /// A single opportunity, trivially in front.
    Single { name: String, average: Average },
    /// A strict leader and its distance to second place.
    Leader {
        name: String,
        average: Average,
        runner_up: String,
        gap: Average,
    },
    /// The top two (or more) share the best average.
    Tie { names: Vec<String>, average: Average },
}

/// Decide the winner from a ranking produced by [`rank`].
pub fn verdict(ranked: &[RankedEntry]) -> Verdict {
    match ranked {
        [] => Verdict::Empty,
        [only] => Verdict::Single {
            name: only.name.clone(),
            average: only.average,
        },
        [first, second, ..] if first.average == second.average => Verdict::Tie {
            names: ranked
                .iter()
                .take_while(|e| e.average == first.average)
                .map(|e| e.name.clone())
                .collect(),
            average: first.average,
        },
        [first, second, ..] => Verdict::Leader {
            name: first.name.clone(),
            average: first.average,
            runner_up: second.name.clone(),
            gap: first.average.gap(second.average),
        },
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "No wheels to compare."),
            Self::Single { name, average } => {
                write!(f, "{name} is the only wheel, averaging {average}.")
            }
            Self::Leader {
                name,
                average,
                runner_up,
                gap,
            } => write!(
                f,
                "{name} leads with an average of {average}, {gap} ahead of {runner_up}."
            ),
            Self::Tie { names, average } => {
                write!(f, "It's a tie: {} all average {average}.", names.join(", "))
            }
        }
    }
}

/// Everything the comparison panel shows.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComparisonSummary {
    pub ranked: Vec<RankedEntry>,
    pub considerations_match: bool,
    pub verdict: Verdict,
}

#[tracing::instrument(skip(opportunities), fields(count = opportunities.len()))]
pub fn summarize(opportunities: &[Opportunity]) -> ComparisonSummary {
    let ranked = rank(opportunities);
    let verdict = verdict(&ranked);
    let considerations_match = considerations_match(opportunities);
    if !considerations_match {
        tracing::debug!("wheels rate different considerations");
    }
    ComparisonSummary {
        ranked,
        considerations_match,
        verdict,
    }
}

impl fmt::Display for ComparisonSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.ranked.iter().enumerate() {
            writeln!(
                f,
                "{}. {} ({}): average {}, {}%",
                i + 1,
                e.name,
                e.color,
                e.average,
                e.percentage
            )?;
        }
        if !self.considerations_match {
            writeln!(
                f,
                "Note: the wheels rate different considerations, so the comparison is not like for like."
            )?;
        }
        write!(f, "{}", self.verdict)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stats/summary.rs"]
mod tests;
