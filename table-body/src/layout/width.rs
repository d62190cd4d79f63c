use std::sync::Arc;

use crate::column::Column;

/// Realised width of a cell spanning `colspan` columns from `start`.
///
/// Sums `real_width` over `[start, start + colspan)` and subtracts one for
/// the border shared between adjacent columns. Windows running past the end
/// sum only the columns that exist. A colspan below one falls back to the
/// width of the starting column (zero if that column does not exist).
pub fn aggregate_width<R>(columns: &[Arc<Column<R>>], colspan: u32, start: usize) -> i32 {
    if colspan < 1 {
        return columns.get(start).map_or(0, |column| column.real_width);
    }

    columns
        .iter()
        .skip(start)
        .take(colspan as usize)
        .fold(-1, |acc, column| acc + column.real_width)
}
