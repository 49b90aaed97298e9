// Parameter extraction - first match wins in both contexts
// Later occurrences of the same name are ignored even if their values differ.

use regex::Regex;
use tmcheck_types::TmBlock;

/// Find the first numeric value following `parameter` in the whole log.
///
/// The gap between name and number never crosses a line break, so the
/// number has to appear after the name on the same line. The leftmost
/// such match in the log wins.
pub fn extract_numeric(text: &str, parameter: &str) -> Option<f64> {
    let pattern = format!(r"{}.*?([-+]?[0-9]*\.?[0-9]+)", regex::escape(parameter));
    let re = compile(&pattern)?;
    let captures = re.captures(text)?;
    captures.get(1)?.as_str().parse::<f64>().ok()
}

/// Find the raw value of `parameter` written as `name: value` or
/// `name = value` inside a block.
///
/// Lines are scanned in order. A line mentioning the name without a
/// delimiter and a non-empty value is skipped; the first line that yields
/// a value ends the scan.
pub fn extract_field(block: &TmBlock<'_>, parameter: &str) -> Option<String> {
    let pattern = format!(r"{}\s*[:=]\s*(.+)", regex::escape(parameter));
    let re = compile(&pattern)?;

    block
        .lines
        .iter()
        .filter(|line| line.contains(parameter))
        .find_map(|line| {
            re.captures(line)
                .and_then(|captures| captures.get(1))
                .map(|value| value.as_str().trim().to_string())
        })
}

fn compile(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(err) => {
            tracing::warn!(%pattern, error = %err, "cannot build extraction pattern");
            None
        }
    }
}
