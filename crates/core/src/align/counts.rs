use super::EditCounts;

/// Classify the edit operations of one optimal alignment of `hypothesis`
/// against `reference`.
///
/// Builds the full DP table, then walks it back from the bottom-right
/// corner. When several minimal-cost paths meet at a cell the diagonal
/// step (match or substitution) is taken before a deletion or insertion,
/// so tied paths never inflate the D+I tally. The raw distance is
/// unaffected by the tie-break; MER/WIL derived from these counts are.
pub fn edit_counts<S: PartialEq>(reference: &[S], hypothesis: &[S]) -> EditCounts {
    let n = reference.len();
    let m = hypothesis.len();

    let mut table = vec![vec![0usize; m + 1]; n + 1];
    for (i, row) in table.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=m {
        table[0][j] = j;
    }
    for i in 1..=n {
        for j in 1..=m {
            let cost = usize::from(reference[i - 1] != hypothesis[j - 1]);
            table[i][j] = (table[i - 1][j] + 1)
                .min(table[i][j - 1] + 1)
                .min(table[i - 1][j - 1] + cost);
        }
    }

    let mut counts = EditCounts {
        reference_len: n,
        hypothesis_len: m,
        ..EditCounts::default()
    };

    let mut i = n;
    let mut j = m;
    while i > 0 || j > 0 {
        if i > 0 && j > 0 {
            let cost = usize::from(reference[i - 1] != hypothesis[j - 1]);
            if table[i][j] == table[i - 1][j - 1] + cost {
                if cost == 0 {
                    counts.hits += 1;
                } else {
                    counts.substitutions += 1;
                }
                i -= 1;
                j -= 1;
                continue;
            }
        }
        if i > 0 && table[i][j] == table[i - 1][j] + 1 {
            counts.deletions += 1;
            i -= 1;
        } else {
            counts.insertions += 1;
            j -= 1;
        }
    }

    counts
}
