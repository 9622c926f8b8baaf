use std::fs::File;
use std::path::Path;

use crate::Error;

/// Deserialize every record of a CSV file with headers
///
/// # Errors
///
/// `IoError` if the file cannot be opened, `Csv` on the first malformed row
pub fn deserialize_csv_file<T>(path: &Path) -> Result<Vec<T>, Error>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open file '{}': {}", path.display(), e),
        )
    })?;
    let records = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file)
        .deserialize()
        .collect::<Result<Vec<T>, _>>()?;
    Ok(records)
}
