use crate::grid::{Tile, MAX_TILE};

/// Score gained from merges.
pub type Score = u64;

/// Slides a row toward index 0, merging equal neighbours once each.
///
/// Returns the new row (same length, zero padded) and the sum of the
/// merged tile values. Tiles at `MAX_TILE` don't merge.
pub fn slide_row(row: &[Tile]) -> (Vec<Tile>, Score) {
    let compacted: Vec<Tile> = row.iter().copied().filter(|&value| value != 0).collect();

    let mut output = Vec::with_capacity(row.len());
    let mut score = 0;
    let mut i = 0;

    while i < compacted.len() {
        let value = compacted[i];

        if value < MAX_TILE && compacted.get(i + 1) == Some(&value) {
            let merged = value * 2;

            output.push(merged);
            score += Score::from(merged);
            i += 2;
        } else {
            output.push(value);
            i += 1;
        }
    }

    output.resize(row.len(), 0);

    (output, score)
}
