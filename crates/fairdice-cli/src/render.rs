//! Plain-text rendering of the probability table.

use fairdice_core::{DiceSet, MatrixEntry, ProbabilityMatrix};
use std::fmt::Write;

/// Row die's win probability against the column die, with the signed
/// advantage in parentheses. The diagonal shows the sentinel. Below the
/// table, each die's strongest counter.
pub fn probability_table(dice: &DiceSet, matrix: &ProbabilityMatrix, precision: usize) -> String {
    let mut rows: Vec<Vec<String>> = Vec::with_capacity(dice.len() + 1);

    let mut header = vec!["Your die v".to_string()];
    header.extend((1..=dice.len()).map(|i| format!("Die {}", i)));
    rows.push(header);

    for (die, entries) in dice.iter().zip(matrix.rows()) {
        let mut row = vec![die.to_string()];
        row.extend(entries.iter().map(|entry| match entry {
            MatrixEntry::SelfPairing => format!("- ({:.*})", precision, entry.display_value()),
            MatrixEntry::Pair(stats) => format!(
                "{:.*} ({:+.*})",
                precision,
                stats.win_probability(),
                precision,
                stats.advantage()
            ),
        }));
        rows.push(row);
    }

    let columns = rows[0].len();
    let widths: Vec<usize> = (0..columns)
        .map(|c| rows.iter().map(|r| r[c].len()).max().unwrap_or(0))
        .collect();
    let separator: String = widths
        .iter()
        .map(|w| format!("+{}", "-".repeat(w + 2)))
        .collect::<String>()
        + "+";

    let mut out = String::new();
    let _ = writeln!(out, "{}", separator);
    for (i, row) in rows.iter().enumerate() {
        for (cell, width) in row.iter().zip(&widths) {
            let _ = write!(out, "| {:<width$} ", cell, width = width);
        }
        let _ = writeln!(out, "|");
        if i == 0 {
            let _ = writeln!(out, "{}", separator);
        }
    }
    let _ = writeln!(out, "{}", separator);
    out.push_str(
        "Cells show the chance of the row die beating the column die, \
         with the win advantage in parentheses.\n",
    );
    for col in 0..dice.len() {
        match matrix.counters(col).first() {
            Some(&best) => {
                let _ = writeln!(
                    out,
                    "Best counter to die {}: die {} ({:+.*})",
                    col + 1,
                    best + 1,
                    precision,
                    matrix.advantage(best, col).unwrap_or_default()
                );
            }
            None => {
                let _ = writeln!(out, "Nothing beats die {} on average.", col + 1);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_layout() {
        let dice = DiceSet::parse(["2,2,4,4,9,9", "1,1,6,6,8,8", "3,3,5,5,7,7"]).unwrap();
        let table = probability_table(&dice, &dice.matrix(), 4);
        let lines: Vec<&str> = table.lines().collect();

        assert!(lines[1].contains("Your die v"));
        assert!(lines[1].contains("Die 3"));
        // A against B: 20/36 wins, advantage 4/36
        assert!(lines[3].starts_with("| 2,2,4,4,9,9"));
        assert!(lines[3].contains("0.5556 (+0.1111)"));
        assert!(lines[3].contains("- (-0.3333)"));
        // every table line has the same width
        let width = lines[0].len();
        assert!(lines[..7].iter().all(|l| l.len() == width));
    }

    #[test]
    fn test_counter_hints() {
        let dice = DiceSet::parse(["2,2,4,4,9,9", "1,1,6,6,8,8", "3,3,5,5,7,7"]).unwrap();
        let table = probability_table(&dice, &dice.matrix(), 4);
        // A beats B, B beats C, C beats A
        assert!(table.contains("Best counter to die 2: die 1 (+0.1111)"));
        assert!(table.contains("Best counter to die 3: die 2"));
        assert!(table.contains("Best counter to die 1: die 3"));

        let ranked = DiceSet::parse(["1,1,1,1,1,1", "2,2,2,2,2,2", "3,3,3,3,3,3"]).unwrap();
        let table = probability_table(&ranked, &ranked.matrix(), 2);
        assert!(table.contains("Best counter to die 1: die 2 (+1.00)"));
        assert!(table.contains("Nothing beats die 3 on average."));
    }

    #[test]
    fn test_precision() {
        let dice = DiceSet::parse(["1,1,1,1,1,1", "2,2,2,2,2,2", "3,3,3,3,3,3"]).unwrap();
        let table = probability_table(&dice, &dice.matrix(), 1);
        assert!(table.contains("0.0 (-1.0)"));
        assert!(table.contains("1.0 (+1.0)"));
    }
}
