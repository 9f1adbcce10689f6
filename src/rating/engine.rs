use super::*;
use crate::ClubError;
use crate::Points;
use crate::Rating;
use crate::players::Player;
use crate::tables::TableEntry;
use std::collections::HashMap;

/// Snapshot of current ratings by player name.
pub type Ratings = HashMap<String, Rating>;

/// Computes the delta of every participant in a table.
///
/// Opponents of an entry are all entries with a different player name,
/// so a name listed twice never counts itself as an opponent. Fails on
/// the first name missing from `ratings`, in table order.
pub fn apply(entries: &[TableEntry], ratings: &Ratings) -> Result<Deltas, ClubError> {
    let n = entries.len();
    let total = entries.iter().map(|e| e.sum as Rating).sum::<Rating>();
    let mut deltas = Deltas::default();
    for entry in entries {
        let delta = gap(entry, entries, ratings)? + performance(entry.sum, total, n);
        deltas.insert(&entry.player, delta);
    }
    Ok(deltas)
}

/// Mean opponent rating minus own rating. An entry without opponents
/// contributes no gap at all.
pub fn gap(entry: &TableEntry, entries: &[TableEntry], ratings: &Ratings) -> Result<Rating, ClubError> {
    let opponents = entries
        .iter()
        .filter(|e| e.player != entry.player)
        .map(|e| lookup(ratings, &e.player))
        .collect::<Result<Vec<Rating>, ClubError>>()?;
    let mine = lookup(ratings, &entry.player)?;
    match opponents.len() {
        0 => Ok(0.0),
        k => Ok(opponents.iter().sum::<Rating>() / k as Rating - mine),
    }
}

/// Share of the total points scaled so an even share scores zero.
/// The total is summed in floating point so large scores cannot overflow.
pub fn performance(sum: Points, total: Rating, n: usize) -> Rating {
    if total > 0.0 {
        (sum as Rating / total) * n as Rating - 1.0
    } else {
        0.0
    }
}

/// Whole-point part of a delta. Fractions are dropped toward zero.
pub fn truncate(delta: Rating) -> Rating {
    delta.trunc()
}

/// Adds every truncated delta to its player.
///
/// Checks all names before changing any rating, so an unknown name
/// leaves `players` untouched.
pub fn commit(deltas: &Deltas, players: &mut [Player]) -> Result<(), ClubError> {
    if let Some((name, _)) = deltas
        .iter()
        .find(|(name, _)| !players.iter().any(|p| p.name() == *name))
    {
        return Err(ClubError::UnknownPlayer(name.to_string()));
    }
    for (name, delta) in deltas.iter() {
        for player in players.iter_mut().filter(|p| p.name() == name) {
            player.rate(player.rating() + truncate(delta));
        }
    }
    Ok(())
}

fn lookup(ratings: &Ratings, name: &str) -> Result<Rating, ClubError> {
    ratings
        .get(name)
        .copied()
        .ok_or_else(|| ClubError::UnknownPlayer(name.to_string()))
}
