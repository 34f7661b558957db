//! File-to-file conversion: spreadsheet in, import XML out.

use std::fs;
use std::path::Path;

use log::info;

use crate::core::{ConvertConfig, Result, translate_human_readable_marks};
use crate::{xlsx, xml};

/// Convert the invoice spreadsheet at `input` and write the XML to `output`.
///
/// The output file is only created once the whole document has been built
/// and encoded, so a failing invoice never leaves a partial file behind.
pub fn convert_file(input: impl AsRef<Path>, output: impl AsRef<Path>, config: &ConvertConfig) -> Result<()> {
    let (input, output) = (input.as_ref(), output.as_ref());

    let mut table = xlsx::read_table(input)?;
    translate_human_readable_marks(&mut table);

    let bytes = xml::convert_table(&table, config)?;
    fs::write(output, &bytes)?;

    info!("Wrote {} bytes to {}.", bytes.len(), output.display());
    Ok(())
}
