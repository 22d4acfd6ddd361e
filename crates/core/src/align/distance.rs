/// Minimum number of single-symbol insertions, deletions, or
/// substitutions turning `a` into `b`.
///
/// Two rolling rows sized to the shorter sequence keep memory at
/// O(min(|a|,|b|)); time is O(|a|·|b|). The result is symmetric in its
/// arguments even though the table is not.
pub fn edit_distance<S: PartialEq>(a: &[S], b: &[S]) -> usize {
    // The shorter sequence goes in the row dimension.
    let (rows, cols) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let n = rows.len();

    let mut current: Vec<usize> = (0..=n).collect();
    let mut previous = vec![0usize; n + 1];

    for (i, col_sym) in cols.iter().enumerate() {
        std::mem::swap(&mut previous, &mut current);
        current[0] = i + 1;
        for j in 1..=n {
            let add = previous[j] + 1;
            let delete = current[j - 1] + 1;
            let change = previous[j - 1] + usize::from(rows[j - 1] != *col_sym);
            current[j] = add.min(delete).min(change);
        }
    }

    current[n]
}
