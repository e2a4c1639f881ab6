use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{WheelsError, WheelsResult};
use crate::model::opportunity::{
    Consideration, DEFAULT_CONSIDERATION_NAME, DEFAULT_OPPORTUNITY_NAME, MAX_CONSIDERATIONS,
    MAX_NAME_LEN, Opportunity, RawOpportunity,
};
use crate::validate::input::{DEFAULT_VALUE, validate_color, validate_name, validate_value};

/// Smallest working set the comparison view accepts.
pub const MIN_OPPORTUNITIES: usize = 2;
/// Largest working set the comparison view accepts.
pub const MAX_OPPORTUNITIES: usize = 3;

const PALETTE: [&str; MAX_OPPORTUNITIES] = ["#3b82f6", "#10b981", "#f59e0b"];

/// Parse the JSON export format, normalizing every field.
///
/// Duplicate or missing opportunity ids are reassigned; the list length is not checked here (see
/// [`Workspace::from_opportunities`]).
pub fn load_opportunities<R: std::io::Read>(r: R) -> WheelsResult<Vec<Opportunity>> {
    let raw: Vec<RawOpportunity> = serde_json::from_reader(r)
        .map_err(|e| WheelsError::serde(format!("parse opportunities JSON: {e}")))?;

    let mut out: Vec<Opportunity> = Vec::with_capacity(raw.len());
    for r in raw {
        let fallback = out.iter().map(|o| o.id).max().unwrap_or(0) + 1;
        let mut opp = r.normalize(fallback);
        if out.iter().any(|o| o.id == opp.id) {
            opp.id = fallback;
        }
        out.push(opp);
    }
    tracing::debug!(count = out.len(), "loaded opportunities");
    Ok(out)
}

/// Load opportunities from a JSON file on disk.
pub fn load_opportunities_from_path(path: impl AsRef<Path>) -> WheelsResult<Vec<Opportunity>> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("open wheels JSON '{}'", path.display()))?;
    load_opportunities(BufReader::new(f))
}

/// Pretty-printed JSON export of an opportunity list.
pub fn opportunities_to_json(opportunities: &[Opportunity]) -> WheelsResult<String> {
    serde_json::to_string_pretty(opportunities)
        .map_err(|e| WheelsError::serde(format!("serialize opportunities: {e}")))
}

/// The 2–3 opportunities currently being compared.
///
/// All mutations keep the data-model bounds; a rejected mutation returns
/// [`WheelsError::Precondition`] and leaves the set untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Workspace {
    opportunities: Vec<Opportunity>,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace {
    /// Two fresh opportunities with one default consideration each.
    pub fn new() -> Self {
        let opportunities = (0..MIN_OPPORTUNITIES)
            .map(|i| fresh_opportunity(i as u32 + 1, i))
            .collect();
        Self { opportunities }
    }

    /// Adopt an existing list, checking the same bounds every mutation keeps: 2–3 wheels with
    /// distinct ids, each holding 1–20 considerations with distinct ids.
    pub fn from_opportunities(opportunities: Vec<Opportunity>) -> WheelsResult<Self> {
        let n = opportunities.len();
        if !(MIN_OPPORTUNITIES..=MAX_OPPORTUNITIES).contains(&n) {
            return Err(WheelsError::precondition(format!(
                "a comparison needs {MIN_OPPORTUNITIES} to {MAX_OPPORTUNITIES} wheels, got {n}"
            )));
        }
        for (i, opp) in opportunities.iter().enumerate() {
            if opportunities[..i].iter().any(|o| o.id == opp.id) {
                return Err(WheelsError::precondition(format!(
                    "duplicate wheel id {}",
                    opp.id
                )));
            }
            check_considerations(opp)?;
        }
        Ok(Self { opportunities })
    }

    pub fn opportunities(&self) -> &[Opportunity] {
        &self.opportunities
    }

    pub fn into_opportunities(self) -> Vec<Opportunity> {
        self.opportunities
    }

    pub fn get(&self, id: u32) -> Option<&Opportunity> {
        self.opportunities.iter().find(|o| o.id == id)
    }

    fn get_mut(&mut self, id: u32) -> WheelsResult<&mut Opportunity> {
        self.opportunities
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| WheelsError::precondition(format!("no wheel with id {id}")))
    }

    /// Append a fresh opportunity and return its id.
    pub fn add_opportunity(&mut self) -> WheelsResult<u32> {
        if self.opportunities.len() >= MAX_OPPORTUNITIES {
            return Err(WheelsError::precondition(format!(
                "at most {MAX_OPPORTUNITIES} wheels can be compared"
            )));
        }
        let id = self.opportunities.iter().map(|o| o.id).max().unwrap_or(0) + 1;
        let opp = fresh_opportunity(id, self.opportunities.len());
        self.opportunities.push(opp);
        Ok(id)
    }

    pub fn remove_opportunity(&mut self, id: u32) -> WheelsResult<Opportunity> {
        if self.opportunities.len() <= MIN_OPPORTUNITIES {
            return Err(WheelsError::precondition(format!(
                "at least {MIN_OPPORTUNITIES} wheels are needed for a comparison"
            )));
        }
        let idx = self
            .opportunities
            .iter()
            .position(|o| o.id == id)
            .ok_or_else(|| WheelsError::precondition(format!("no wheel with id {id}")))?;
        Ok(self.opportunities.remove(idx))
    }

    pub fn rename_opportunity(&mut self, id: u32, name: &str) -> WheelsResult<()> {
        self.get_mut(id)?.name = validate_name(name, MAX_NAME_LEN, DEFAULT_OPPORTUNITY_NAME);
        Ok(())
    }

    pub fn set_color(&mut self, id: u32, color: &str) -> WheelsResult<()> {
        self.get_mut(id)?.color = validate_color(color);
        Ok(())
    }

    /// Append a consideration with the default rating and return its id.
    pub fn add_consideration(&mut self, opportunity: u32, name: &str) -> WheelsResult<u32> {
        let opp = self.get_mut(opportunity)?;
        if opp.considerations.len() >= MAX_CONSIDERATIONS {
            return Err(WheelsError::precondition(format!(
                "a wheel holds at most {MAX_CONSIDERATIONS} considerations"
            )));
        }
        let id = opp.next_consideration_id();
        opp.considerations.push(Consideration::new(id, name, DEFAULT_VALUE));
        Ok(id)
    }

    pub fn remove_consideration(&mut self, opportunity: u32, id: u32) -> WheelsResult<()> {
        let opp = self.get_mut(opportunity)?;
        if opp.considerations.len() <= 1 {
            return Err(WheelsError::precondition(
                "a wheel needs at least one consideration",
            ));
        }
        let idx = opp
            .considerations
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| WheelsError::precondition(format!("no consideration with id {id}")))?;
        opp.considerations.remove(idx);
        Ok(())
    }

    pub fn rename_consideration(
        &mut self,
        opportunity: u32,
        id: u32,
        name: &str,
    ) -> WheelsResult<()> {
        let c = self.consideration_mut(opportunity, id)?;
        c.name = validate_name(name, MAX_NAME_LEN, DEFAULT_CONSIDERATION_NAME);
        Ok(())
    }

    /// Set a rating from any raw input; the stored value is always in `0..=10`.
    pub fn set_value<'a>(
        &mut self,
        opportunity: u32,
        id: u32,
        value: impl Into<crate::validate::input::RawRating<'a>>,
    ) -> WheelsResult<u8> {
        let c = self.consideration_mut(opportunity, id)?;
        c.value = validate_value(value);
        Ok(c.value)
    }

    /// Replace `to`'s considerations with copies of `from`'s names, all rated at the default.
    pub fn copy_considerations(&mut self, from: u32, to: u32) -> WheelsResult<()> {
        if from == to {
            return Err(WheelsError::precondition(
                "cannot copy considerations onto the same wheel",
            ));
        }
        let source = self
            .get(from)
            .ok_or_else(|| WheelsError::precondition(format!("no wheel with id {from}")))?;
        let copied: Vec<Consideration> = source
            .considerations
            .iter()
            .enumerate()
            .map(|(i, c)| Consideration::new(i as u32 + 1, &c.name, DEFAULT_VALUE))
            .collect();
        self.get_mut(to)?.considerations = copied;
        Ok(())
    }

    fn consideration_mut(
        &mut self,
        opportunity: u32,
        id: u32,
    ) -> WheelsResult<&mut Consideration> {
        self.get_mut(opportunity)?
            .consideration_mut(id)
            .ok_or_else(|| WheelsError::precondition(format!("no consideration with id {id}")))
    }
}

fn check_considerations(opp: &Opportunity) -> WheelsResult<()> {
    let count = opp.considerations.len();
    if !(1..=MAX_CONSIDERATIONS).contains(&count) {
        return Err(WheelsError::precondition(format!(
            "wheel {} has {count} considerations, expected 1 to {MAX_CONSIDERATIONS}",
            opp.id
        )));
    }
    for (j, c) in opp.considerations.iter().enumerate() {
        if opp.considerations[..j].iter().any(|p| p.id == c.id) {
            return Err(WheelsError::precondition(format!(
                "wheel {} has duplicate consideration id {}",
                opp.id, c.id
            )));
        }
    }
    Ok(())
}

fn fresh_opportunity(id: u32, slot: usize) -> Opportunity {
    Opportunity::new(
        id,
        &format!("Opportunity {id}"),
        PALETTE[slot % PALETTE.len()],
        vec![Consideration::new(1, "", DEFAULT_VALUE)],
    )
}

#[cfg(test)]
#[path = "../../tests/unit/model/workspace.rs"]
mod tests;
