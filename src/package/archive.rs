//! Zip-level rewriting of an Office package

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Read one entry of an archive, `None` when it is absent.
pub(crate) fn read_entry(archive_path: &Path, name: &str) -> Result<Option<Vec<u8>>> {
    let file = File::open(archive_path)
        .with_context(|| format!("open package {}", archive_path.display()))?;
    let mut archive = ZipArchive::new(file).context("parse zip archive")?;
    let mut entry = match archive.by_name(name) {
        Ok(entry) => entry,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(err) => return Err(err).with_context(|| format!("read entry {name}")),
    };
    let mut buf = Vec::new();
    entry
        .read_to_end(&mut buf)
        .with_context(|| format!("read entry {name}"))?;
    Ok(Some(buf))
}

/// Copy every entry of `input` into `output` unchanged, except the paths in
/// `overrides`, which are written from the given bytes instead.
///
/// Returns the number of entries copied from `input`.
pub(crate) fn rewrite_archive(
    input: &Path,
    output: &Path,
    overrides: &BTreeMap<String, Vec<u8>>,
) -> Result<usize> {
    let src_file =
        File::open(input).with_context(|| format!("open package {}", input.display()))?;
    let mut archive = ZipArchive::new(src_file).context("parse zip archive")?;

    let dst_file =
        File::create(output).with_context(|| format!("create package {}", output.display()))?;
    let mut writer = ZipWriter::new(dst_file);
    let options = FileOptions::<()>::default().compression_method(CompressionMethod::Deflated);

    let mut copied = 0;
    for i in 0..archive.len() {
        let file = archive.by_index(i).context("read zip entry")?;
        if overrides.contains_key(file.name()) {
            continue;
        }
        // Raw copy keeps the stored bytes (and compression) of untouched parts.
        writer.raw_copy_file(file).context("copy zip entry")?;
        copied += 1;
    }

    for (name, bytes) in overrides {
        writer
            .start_file(name.as_str(), options)
            .with_context(|| format!("write zip entry header {name}"))?;
        writer
            .write_all(bytes)
            .with_context(|| format!("write zip entry {name}"))?;
    }

    writer.finish().context("finalize zip archive")?;
    Ok(copied)
}

/// Add the custom-UI relationship to a package's `_rels/.rels`.
/// `None` when the relationship is already present.
pub(crate) fn ensure_ui_relationship(rels: &str, relationship_type: &str) -> Result<Option<String>> {
    if rels.contains(relationship_type) {
        return Ok(None);
    }
    let relationship = format!(
        "<Relationship Id=\"xlribbonCustomUI\" Type=\"{}\" Target=\"customUI/customUI.xml\"/>",
        relationship_type
    );
    insert_before_closing(rels, "</Relationships>", &relationship).map(Some)
}

/// Add a `png` default content type to `[Content_Types].xml`.
/// `None` when one is already declared.
pub(crate) fn ensure_png_content_type(types: &str) -> Result<Option<String>> {
    let declared = types.contains("Extension=\"png\"") || types.contains("Extension='png'");
    if declared {
        return Ok(None);
    }
    insert_before_closing(
        types,
        "</Types>",
        "<Default Extension=\"png\" ContentType=\"image/png\"/>",
    )
    .map(Some)
}

fn insert_before_closing(xml: &str, closing: &str, element: &str) -> Result<String> {
    let at = xml
        .rfind(closing)
        .with_context(|| format!("no {closing} in package part"))?;
    let mut out = String::with_capacity(xml.len() + element.len());
    out.push_str(&xml[..at]);
    out.push_str(element);
    out.push_str(&xml[at..]);
    Ok(out)
}
