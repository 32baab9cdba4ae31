use crate::models::Context;
use anyhow::Result;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Save a context as CSV with header, one row per indicator.
pub fn save_csv<P: AsRef<Path>>(ctx: &Context, path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("indicator", "year", "value", "formatted"))?;
    for (indicator, entry) in ctx {
        wtr.serialize((indicator.label(), &entry.year, entry.value, &entry.formatted))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save a context as a pretty JSON object keyed by indicator label.
pub fn save_json<P: AsRef<Path>>(ctx: &Context, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(ctx)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
