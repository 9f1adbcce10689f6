use super::*;
use crate::ClubError;
use crate::Points;

/// Raw table form: `rows` player names plus one column of raw scores per round.
///
/// Each column, like the player column, must hold at least `rows` values;
/// extras are ignored. A row's sum adds that row's value from every round
/// column, however many there are.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    rows: usize,
    players: Vec<String>,
    rounds: Vec<Vec<String>>,
}

impl Sheet {
    pub fn new(rows: usize, players: Vec<String>, rounds: Vec<Vec<String>>) -> Self {
        Self {
            rows,
            players,
            rounds,
        }
    }
    pub fn entries(&self) -> Result<Vec<TableEntry>, ClubError> {
        if self.rounds.is_empty() {
            return Err(ClubError::validation("no round columns"));
        }
        if self.players.len() < self.rows {
            return Err(ClubError::validation(format!(
                "expected {} player names, got {}",
                self.rows,
                self.players.len()
            )));
        }
        if let Some((k, column)) = self
            .rounds
            .iter()
            .enumerate()
            .find(|(_, column)| column.len() < self.rows)
        {
            return Err(ClubError::validation(format!(
                "round {} has {} scores, expected {}",
                k + 1,
                column.len(),
                self.rows
            )));
        }
        (0..self.rows)
            .map(|i| {
                self.rounds
                    .iter()
                    .try_fold(0 as Points, |sum, column| {
                        sum.checked_add(Self::score(&column[i])?)
                            .ok_or_else(|| ClubError::validation("row total out of range"))
                    })
                    .map(|sum| TableEntry::new(self.players[i].clone(), sum))
            })
            .collect()
    }
    fn score(raw: &str) -> Result<Points, ClubError> {
        raw.trim()
            .parse::<Points>()
            .map_err(|_| ClubError::validation(format!("score is not an integer: {:?}", raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn sums_every_round_per_row() {
        let sheet = Sheet::new(
            2,
            strings(&["ana", "bo"]),
            vec![
                strings(&["1", "2"]),
                strings(&["3", "4"]),
                strings(&["5", "6"]),
                strings(&["7", "8"]),
                strings(&["9", "10"]),
            ],
        );
        assert_eq!(
            sheet.entries().unwrap(),
            vec![TableEntry::new("ana", 25), TableEntry::new("bo", 30)]
        );
    }
    #[test]
    fn round_count_is_not_fixed() {
        let sheet = Sheet::new(
            1,
            strings(&["ana"]),
            vec![strings(&["4"]), strings(&["-1"])],
        );
        assert_eq!(sheet.entries().unwrap(), vec![TableEntry::new("ana", 3)]);
    }
    #[test]
    fn extra_values_beyond_rows_are_ignored() {
        let sheet = Sheet::new(
            1,
            strings(&["ana", "bo"]),
            vec![strings(&[" 2 ", "x"])],
        );
        assert_eq!(sheet.entries().unwrap(), vec![TableEntry::new("ana", 2)]);
    }
    #[test]
    fn zero_rows_is_an_empty_table() {
        let sheet = Sheet::new(0, vec![], vec![vec![]]);
        assert!(sheet.entries().unwrap().is_empty());
    }
    #[test]
    fn short_round_column() {
        let sheet = Sheet::new(
            2,
            strings(&["ana", "bo"]),
            vec![strings(&["1", "2"]), strings(&["1"])],
        );
        assert!(matches!(sheet.entries(), Err(ClubError::Validation(_))));
    }
    #[test]
    fn short_player_column() {
        let sheet = Sheet::new(2, strings(&["ana"]), vec![strings(&["1", "2"])]);
        assert!(matches!(sheet.entries(), Err(ClubError::Validation(_))));
    }
    #[test]
    fn non_numeric_score() {
        let sheet = Sheet::new(1, strings(&["ana"]), vec![strings(&["seven"])]);
        assert!(matches!(sheet.entries(), Err(ClubError::Validation(_))));
    }
    #[test]
    fn row_total_overflow() {
        let sheet = Sheet::new(
            1,
            strings(&["ana"]),
            vec![strings(&["9223372036854775807"]), strings(&["1"])],
        );
        assert!(matches!(sheet.entries(), Err(ClubError::Validation(_))));
        let sheet = Sheet::new(
            1,
            strings(&["ana"]),
            vec![strings(&["9223372036854775807"]), strings(&["-1"])],
        );
        assert_eq!(
            sheet.entries().unwrap(),
            vec![TableEntry::new("ana", i64::MAX - 1)]
        );
    }
    #[test]
    fn no_round_columns() {
        let sheet = Sheet::new(1, strings(&["ana"]), vec![]);
        assert!(matches!(sheet.entries(), Err(ClubError::Validation(_))));
    }
}
