use std::io::Read;

use log::debug;

use crate::error::Result;
use crate::models::RunFix;

/// JSON-array av fixer. Tolerant for feltnavn (camelCase, snake_case, `ts`/`lng`).
/// Feil peker på stien i dokumentet, f.eks. `[3].timestampMs`.
pub fn parse_fixes_json(s: &str) -> Result<Vec<RunFix>> {
    let de = &mut serde_json::Deserializer::from_str(s);
    let fixes: Vec<RunFix> = serde_path_to_error::deserialize(de)?;
    debug!("parsed {} fixes from JSON", fixes.len());
    Ok(fixes)
}

/// CSV med header (samme kolonnenavn som JSON).
pub fn parse_fixes_csv<R: Read>(reader: R) -> Result<Vec<RunFix>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut fixes = Vec::new();
    for rec in rdr.deserialize() {
        let fix: RunFix = rec?;
        fixes.push(fix);
    }
    debug!("parsed {} fixes from CSV", fixes.len());
    Ok(fixes)
}
