//! A1-style cell references.

/// Number of rows in a worksheet.
pub(crate) const MAX_ROWS: usize = 1_048_576;
/// Number of columns in a worksheet, `A` through `XFD`.
pub(crate) const MAX_COLUMNS: usize = 16_384;

/// Returns true if the 0-based indexes address a cell inside the worksheet grid.
pub(crate) fn is_within_bounds(row: usize, col: usize) -> bool {
    row < MAX_ROWS && col < MAX_COLUMNS
}

/// Converts 0-based row and column indexes to an Excel-style reference such as `B3`.
pub(crate) fn index_to_reference(row: usize, col: usize) -> String {
    let mut letters = Vec::<char>::new();
    let mut col = col + 1;
    while col > 0 {
        col -= 1;
        letters.push((b'A' + (col % 26) as u8) as char);
        col /= 26;
    }
    let mut reference: String = letters.into_iter().rev().collect();
    reference.push_str(&(row + 1).to_string());
    reference
}

/// Parses an Excel-style reference such as `B3` into 0-based (row, column) indexes.
/// Returns None for malformed references.
pub(crate) fn reference_to_index(reference: &str) -> Option<(usize, usize)> {
    let split = reference.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = reference.split_at(split);
    let col = col_to_index(letters)?;
    let row = row_to_index(digits)?;
    Some((row, col))
}

/// Converts column letters (case-insensitive) to a 0-based column index.
pub(crate) fn col_to_index(letters: &str) -> Option<usize> {
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    letters
        .to_ascii_uppercase()
        .bytes()
        .map(|letter| (letter - b'A') as usize + 1)
        .try_fold(0usize, |index, digit| index.checked_mul(26)?.checked_add(digit))
        .map(|column| column - 1)
}

/// Converts a 1-based row number to a 0-based row index.
pub(crate) fn row_to_index(number: &str) -> Option<usize> {
    number
        .parse::<usize>()
        .ok()
        .filter(|row| *row > 0)
        .map(|row| row - 1)
}
