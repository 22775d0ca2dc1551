use log::debug;
use std::io::{BufRead, Write};

use super::ReleaseAsset;
use crate::error::PeekError;
use crate::format::pretty_bytes;

const RECOMMENDED_MARKER: &str = "[RECOMMENDED]";

/// Render the numbered asset list shown before the selection prompt.
pub fn render_assets(assets: &[ReleaseAsset]) -> String {
    let width = assets.len().to_string().len();
    let mut out = String::new();

    for asset in assets {
        let marker = if asset.recommended {
            format!(" {}", RECOMMENDED_MARKER)
        } else {
            String::new()
        };
        out.push_str(&format!(
            "{:>width$}. {} ({}, arch: {}){}\n",
            asset.index,
            asset.name,
            pretty_bytes(asset.size_bytes),
            asset.arch_label(),
            marker,
            width = width
        ));
    }

    out
}

/// Parse a 1-based selection. Returns `None` for anything outside `1..=len`.
pub fn parse_choice(line: &str, len: usize) -> Option<usize> {
    match line.trim().parse::<usize>() {
        Ok(n) if (1..=len).contains(&n) => Some(n),
        _ => None,
    }
}

/// Prompt until the user enters a valid index and return that asset.
///
/// Out-of-range and non-numeric answers are reported and re-prompted. End of
/// input ends the loop with `SelectionCancelled`.
pub fn choose<R: BufRead, W: Write>(
    assets: &[ReleaseAsset],
    input: &mut R,
    output: &mut W,
) -> Result<ReleaseAsset, PeekError> {
    if assets.is_empty() {
        return Err(PeekError::NoReleasesOrAssets);
    }

    let len = assets.len();
    loop {
        write!(output, "Select an asset to download (1-{}): ", len)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Err(PeekError::SelectionCancelled);
        }

        match parse_choice(&line, len) {
            Some(n) => {
                debug!("Selected asset #{}", n);
                return Ok(assets[n - 1].clone());
            }
            None => {
                writeln!(
                    output,
                    "'{}' is not a valid choice; there are {} assets, pick a number from 1 to {}.",
                    line.trim(),
                    len,
                    len
                )?;
            }
        }
    }
}
