use std::fs::{self, File};
use std::path::Path;

use crate::model::error::PipelineError;
use crate::model::outcome::ReportRow;

/// Writes the summary CSV: a header row plus one row per staged record, in
/// loader order. The file is truncated and rewritten, so repeated runs over
/// unchanged input produce identical output.
pub fn write_report(output_csv: &Path, rows: &[ReportRow]) -> Result<(), PipelineError> {
    if let Some(parent) = output_csv.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(output_csv)?;
    let mut writer = csv::Writer::from_writer(file);

    if rows.is_empty() {
        // serialize() emits the header implicitly, so an empty run needs it
        // written by hand
        writer.write_record([
            "id",
            "amount",
            "currency",
            "date",
            "valid",
            "reasons",
            "post_status",
            "post_error",
            "source_file",
        ])?;
    }
    for row in rows {
        writer.serialize(row)?;
    }

    writer.flush()?;
    Ok(())
}
