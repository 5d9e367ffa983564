use crate::spreadsheet::cell::Cell;

/// A worksheet read into memory, cells kept in document order.
#[derive(Clone, Debug)]
pub struct Sheet {
    /// Source file name
    pub file_name: String,
    /// Sheet name
    pub name: String,
    /// All non-empty cells in the sheet
    pub(crate) cells: Vec<Cell>,
    /// Used row range (determined from cell data)
    pub(crate) row_lower_bound: Option<usize>,
    pub(crate) row_upper_bound: Option<usize>,
}

impl Sheet {
    /// Creates an empty sheet.
    pub(crate) fn new(file_name: &str, name: &str) -> Self {
        Self {
            file_name: file_name.to_owned(),
            name: name.to_owned(),
            cells: Vec::new(),
            row_lower_bound: None,
            row_upper_bound: None,
        }
    }

    /// Returns true if the sheet contains no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Adds a cell to the sheet, updating the used row range.
    pub(crate) fn push(&mut self, cell: Cell) {
        self.update_bound(cell.row);
        self.cells.push(cell);
    }

    fn update_bound(&mut self, row: usize) {
        if self.row_lower_bound.map(|row_lower_bound| row < row_lower_bound).unwrap_or(true) {
            self.row_lower_bound = Some(row);
        }
        if self.row_upper_bound.map(|row_upper_bound| row_upper_bound < row).unwrap_or(true) {
            self.row_upper_bound = Some(row);
        }
    }

    /// Lays the cells out as rows, from the first used row to the last one.
    ///
    /// Every row starts at column A; gaps between cells are filled with empty cells and
    /// trailing empty cells are dropped, so a row without any value comes out empty.
    pub fn into_rows(self) -> Vec<Vec<Cell>> {
        let (Some(row_lower), Some(row_upper)) = (self.row_lower_bound, self.row_upper_bound) else {
            return Vec::new();
        };
        let mut rows: Vec<Vec<Cell>> = (row_lower..=row_upper).map(|_| Vec::new()).collect();
        let mut cells = self.cells;
        cells.sort_by_key(|cell| (cell.row, cell.col));
        for cell in cells {
            let record = &mut rows[cell.row - row_lower];
            if record.last().map(|last| last.col >= cell.col).unwrap_or(false) {
                // duplicate reference, keep the first occurrence
                continue;
            }
            while record.len() < cell.col {
                record.push(Cell::empty(cell.row, record.len()));
            }
            record.push(cell);
        }
        rows
    }
}
