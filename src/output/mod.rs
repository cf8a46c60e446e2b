//! Output formatting for rendered views

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::theme::Palette;

pub mod formatters;
pub mod json;
pub mod table;

/// Types that can be rendered in any output format
pub trait Formattable {
    /// Render for `format`; pretty output is coloured from `palette`
    fn format(&self, format: OutputFormat, palette: &Palette) -> Result<String>;
}

/// Format and print data to stdout
pub fn print<T: Formattable + ?Sized>(
    data: &T,
    format: OutputFormat,
    palette: &Palette,
) -> Result<()> {
    let output = data.format(format, palette)?;
    println!("{}", output);
    Ok(())
}
