use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{anyhow, Context};
use chrono::Utc;
use serde_json::json;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::store::{COURSES_FILE, CREDENTIALS_FILE, STUDENT_DATA_FILE};

const MANIFEST_ENTRY: &str = "manifest.json";
pub const BUNDLE_FORMAT_V1: &str = "records-workspace-v1";

const DOCUMENT_FILES: [&str; 3] = [CREDENTIALS_FILE, COURSES_FILE, STUDENT_DATA_FILE];

fn data_entry(file: &str) -> String {
    format!("data/{}", file)
}

#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub bundle_format: String,
    pub entry_count: usize,
}

#[derive(Debug, Clone)]
pub struct ImportSummary {
    pub bundle_format_detected: String,
}

pub fn export_workspace_bundle(
    workspace_path: &Path,
    out_path: &Path,
) -> anyhow::Result<ExportSummary> {
    for file in DOCUMENT_FILES {
        let doc_path = workspace_path.join(file);
        if !doc_path.is_file() {
            return Err(anyhow!(
                "workspace document not found: {}",
                doc_path.to_string_lossy()
            ));
        }
    }

    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.to_string_lossy()))?;
    }

    let out_file = File::create(out_path).with_context(|| {
        format!(
            "failed to create output file {}",
            out_path.to_string_lossy()
        )
    })?;
    let mut zip = ZipWriter::new(out_file);
    let opts = FileOptions::default().compression_method(CompressionMethod::Deflated);

    let manifest = json!({
        "format": BUNDLE_FORMAT_V1,
        "version": 1,
        "appVersion": env!("CARGO_PKG_VERSION"),
        "exportedAt": Utc::now().to_rfc3339(),
    });
    zip.start_file(MANIFEST_ENTRY, opts)
        .context("failed to start manifest entry")?;
    zip.write_all(
        serde_json::to_string_pretty(&manifest)
            .context("failed to serialize manifest")?
            .as_bytes(),
    )
    .context("failed to write manifest entry")?;

    for file in DOCUMENT_FILES {
        zip.start_file(data_entry(file), opts)
            .with_context(|| format!("failed to start entry for {}", file))?;
        let doc_path = workspace_path.join(file);
        let mut doc = File::open(&doc_path)
            .with_context(|| format!("failed to open {}", doc_path.to_string_lossy()))?;
        std::io::copy(&mut doc, &mut zip)
            .with_context(|| format!("failed to write entry for {}", file))?;
    }

    zip.finish().context("failed to finalize zip bundle")?;

    Ok(ExportSummary {
        bundle_format: BUNDLE_FORMAT_V1.to_string(),
        entry_count: 1 + DOCUMENT_FILES.len(),
    })
}

pub fn import_workspace_bundle(
    in_path: &Path,
    workspace_path: &Path,
) -> anyhow::Result<ImportSummary> {
    std::fs::create_dir_all(workspace_path).with_context(|| {
        format!(
            "failed to create workspace {}",
            workspace_path.to_string_lossy()
        )
    })?;

    if !is_zip_file(in_path)? {
        return Err(anyhow!(
            "not a records workspace bundle: {}",
            in_path.to_string_lossy()
        ));
    }

    let in_file = File::open(in_path)
        .with_context(|| format!("failed to open bundle {}", in_path.to_string_lossy()))?;
    let mut archive = ZipArchive::new(in_file).context("invalid zip archive")?;

    let mut manifest_text = String::new();
    archive
        .by_name(MANIFEST_ENTRY)
        .context("bundle missing manifest.json")?
        .read_to_string(&mut manifest_text)
        .context("failed to read manifest.json")?;
    let manifest: serde_json::Value =
        serde_json::from_str(&manifest_text).context("manifest.json is invalid JSON")?;
    let format = manifest
        .get("format")
        .and_then(|v| v.as_str())
        .unwrap_or("");
    if format != BUNDLE_FORMAT_V1 {
        return Err(anyhow!("unsupported bundle format: {}", format));
    }

    // Extract each document next to its destination, then rename into place
    // so a failed extraction never leaves a half-written document behind.
    for file in DOCUMENT_FILES {
        let dst = workspace_path.join(file);
        let tmp_dst = workspace_path.join(format!("{}.importing", file));
        if tmp_dst.exists() {
            let _ = std::fs::remove_file(&tmp_dst);
        }

        let mut doc_out = File::create(&tmp_dst).with_context(|| {
            format!("failed to create temp document {}", tmp_dst.to_string_lossy())
        })?;
        {
            let entry_name = data_entry(file);
            let mut entry = archive
                .by_name(&entry_name)
                .with_context(|| format!("bundle missing {}", entry_name))?;
            std::io::copy(&mut entry, &mut doc_out)
                .with_context(|| format!("failed to extract {}", entry_name))?;
        }
        doc_out
            .flush()
            .with_context(|| format!("failed to flush extracted {}", file))?;

        if dst.exists() {
            std::fs::remove_file(&dst).with_context(|| {
                format!("failed to remove existing document {}", dst.to_string_lossy())
            })?;
        }
        std::fs::rename(&tmp_dst, &dst).with_context(|| {
            format!("failed to move extracted document to {}", dst.to_string_lossy())
        })?;
    }

    Ok(ImportSummary {
        bundle_format_detected: BUNDLE_FORMAT_V1.to_string(),
    })
}

fn is_zip_file(path: &Path) -> anyhow::Result<bool> {
    let mut f = File::open(path)
        .with_context(|| format!("failed to open input file {}", path.to_string_lossy()))?;
    let mut sig = [0u8; 4];
    let read = f.read(&mut sig).context("failed to read file signature")?;
    if read < 4 {
        return Ok(false);
    }
    Ok(sig == [0x50, 0x4B, 0x03, 0x04])
}
