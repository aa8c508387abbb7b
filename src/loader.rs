use std::fs;
use std::path::Path;

use crate::logger::RunLogger;
use crate::model::error::PipelineError;
use crate::model::invoice::Invoice;

/// Outcome of loading one file from the input directory. A file that cannot
/// be read or parsed still produces an entry, so one bad file never drops
/// out of the report or aborts the run.
#[derive(Debug)]
pub enum LoadedInvoice {
    Parsed(Invoice),
    Failed { source_file: String, reason: String },
}

/// Enumerates `.json` files in `input_dir` (case-insensitive extension,
/// lexicographic filename order) and parses each one independently.
///
/// A missing input directory is the one fatal case; everything else is
/// recorded per file and forwarded downstream.
pub fn load_invoices(
    input_dir: &Path,
    logger: &RunLogger,
) -> Result<Vec<LoadedInvoice>, PipelineError> {
    if !input_dir.is_dir() {
        return Err(PipelineError::InputDirMissing(input_dir.to_path_buf()));
    }

    let mut file_names: Vec<String> = fs::read_dir(input_dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| is_json_file(name))
        .collect();
    file_names.sort();

    let mut records = Vec::with_capacity(file_names.len());
    for name in file_names {
        let path = input_dir.join(&name);
        match load_one(&path) {
            Ok(mut invoice) => {
                invoice.source_file = name;
                records.push(LoadedInvoice::Parsed(invoice));
            }
            Err(reason) => {
                logger.warn(&format!("failed to load {}: {}", name, reason));
                records.push(LoadedInvoice::Failed {
                    source_file: name,
                    reason,
                });
            }
        }
    }

    Ok(records)
}

fn is_json_file(name: &str) -> bool {
    Path::new(name)
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

fn load_one(path: &Path) -> Result<Invoice, String> {
    let contents = fs::read_to_string(path).map_err(|e| e.to_string())?;
    // Some exporters prefix a UTF-8 BOM
    let contents = contents.strip_prefix('\u{feff}').unwrap_or(&contents);
    serde_json::from_str(contents).map_err(|e| e.to_string())
}
