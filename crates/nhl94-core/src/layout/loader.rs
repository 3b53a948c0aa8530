use tracing::warn;

use crate::error::{Error, Result};
use crate::layout::RomLayout;
use std::fs;
use std::path::Path;

/// Reads a layout file from disk.
pub fn load_layout<P: AsRef<Path>>(path: P) -> Result<RomLayout> {
    parse_layout(&fs::read_to_string(path)?)
}

/// Writes `layout` in the format `load_layout` reads.
pub fn save_layout<P: AsRef<Path>>(path: P, layout: &RomLayout) -> Result<()> {
    Ok(fs::write(path, format_layout(layout))?)
}

/// Parses a layout file.
///
/// The first line is the layout name; the rest are `key = 0xHEX` pairs.
/// Keys that are not present keep their NHL '94 default.
pub fn parse_layout(content: &str) -> Result<RomLayout> {
    let mut layout = RomLayout::default();
    let mut lines = content.lines();

    if let Some(name) = lines.next().map(str::trim).filter(|name| !name.is_empty()) {
        layout.name = name.to_string();
    }

    for entry in lines.filter_map(layout_entry) {
        let (key, offset) = entry?;
        match layout_field(&mut layout, &key) {
            Some(field) => *field = offset,
            None => warn!("Unknown layout key: '{}' (value: {:#x})", key, offset),
        }
    }

    Ok(layout)
}

/// Splits one `key = value` line. Blank lines and `#`/`;` comments yield `None`.
fn layout_entry(line: &str) -> Option<Result<(String, usize)>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
        return None;
    }

    let Some((key, value)) = line.split_once('=') else {
        return Some(Err(Error::LayoutParseError(format!(
            "Expected 'key = value', got '{}'",
            line
        ))));
    };
    let key = key.trim().to_lowercase();
    Some(parse_offset(&key, value).map(|offset| (key, offset)))
}

fn layout_field<'a>(layout: &'a mut RomLayout, key: &str) -> Option<&'a mut usize> {
    let field = match key {
        "cartname" => &mut layout.cartridge_name_offset,
        "cartnamelen" => &mut layout.cartridge_name_len,
        "teamcount" => &mut layout.team_count_offset,
        "teamtable" => &mut layout.team_table_offset,
        "checksum" => &mut layout.checksum_offset,
        "checksumstart" => &mut layout.checksum_start,
        "patch" => &mut layout.patch_offset,
        _ => return None,
    };
    Some(field)
}

/// Hex offset with an optional `0x` prefix. Errors name the offending key.
fn parse_offset(key: &str, value: &str) -> Result<usize> {
    let value = value.trim();
    let digits = ["0x", "0X"]
        .iter()
        .find_map(|prefix| value.strip_prefix(*prefix))
        .unwrap_or(value);

    usize::from_str_radix(digits, 16).map_err(|e| {
        Error::LayoutParseError(format!("{}: invalid hex offset '{}' ({})", key, value, e))
    })
}

pub fn format_layout(layout: &RomLayout) -> String {
    let lines = [
        layout.name.clone(),
        format!("cartName = {:#x}", layout.cartridge_name_offset),
        format!("cartNameLen = {:#x}", layout.cartridge_name_len),
        format!("teamCount = {:#x}", layout.team_count_offset),
        format!("teamTable = {:#x}", layout.team_table_offset),
        format!("checksum = {:#x}", layout.checksum_offset),
        format!("checksumStart = {:#x}", layout.checksum_start),
        format!("patch = {:#x}", layout.patch_offset),
    ];

    lines.join("\n")
}
