//! Loads the items to paginate: a data file, or a directory of Markdown
//! documents whose front matter becomes the item.

use log::warn;
use serde_json::{Map, Value};
use std::{
    cmp::Reverse,
    fs, io,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

use crate::routing::slugify;

pub fn collect_markdown_files<P: AsRef<Path>>(root: P) -> Vec<PathBuf> {
    let mut result: Vec<PathBuf> = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                warn!("walk: {err}");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        if entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
        {
            result.push(entry.into_path());
        }
    }

    result
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrontMatterFormat {
    Yaml,
    Toml,
}

fn invalid(msg: impl Into<String>) -> io::Error {
    io::Error::new(ErrorKind::InvalidData, msg.into())
}

fn split_front_matter(text: &str) -> io::Result<Option<(FrontMatterFormat, String)>> {
    let mut text = text.trim_start_matches('\u{FEFF}').to_owned();
    if text.contains('\r') {
        text = text.replace("\r\n", "\n").replace('\r', "\n");
    }

    let (format, fence, rest) = if let Some(rest) = text.strip_prefix("---\n") {
        (FrontMatterFormat::Yaml, "---", rest)
    } else if let Some(rest) = text.strip_prefix("+++\n") {
        (FrontMatterFormat::Toml, "+++", rest)
    } else {
        return Ok(None);
    };

    if rest == fence || rest.starts_with(&format!("{fence}\n")) {
        return Ok(Some((format, String::new())));
    }

    let closing = format!("\n{fence}\n");
    let Some(end) = rest
        .find(&closing)
        .or_else(|| rest.strip_suffix(&closing[..4]).map(|s| s.len()))
    else {
        return Err(invalid(format!("unclosed front matter ({fence})")));
    };

    Ok(Some((format, rest[..end].to_string())))
}

/// TOML values as JSON; datetimes become their RFC 3339 text so they sort
/// and compare like YAML or JSON dates.
fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => Value::from(f),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(list) => Value::Array(list.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}

/// Parses one Markdown document into an item.
///
/// The item is the front matter object plus `slug` (unless the front
/// matter sets one, the slugified file stem) and `source`, the path
/// relative to `root`.
pub fn load_document(root: &Path, path: &Path) -> io::Result<Value> {
    let content = fs::read_to_string(path)?;

    let fields = match split_front_matter(&content)? {
        Some((_, fm)) if fm.trim().is_empty() => Value::Null,
        Some((FrontMatterFormat::Yaml, fm)) => serde_yaml::from_str::<Value>(&fm)
            .map_err(|e| invalid(format!("YAML front matter: {e}")))?,
        Some((FrontMatterFormat::Toml, fm)) => toml::from_str::<toml::Table>(&fm)
            .map(|t| toml_to_json(toml::Value::Table(t)))
            .map_err(|e| invalid(format!("TOML front matter: {e}")))?,
        None => Value::Null,
    };
    let mut item = match fields {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        _ => return Err(invalid("front matter must be a mapping")),
    };

    let rel = path.strip_prefix(root).unwrap_or(path);
    if !item.get("slug").is_some_and(Value::is_string) {
        let stem = rel
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled");
        item.insert("slug".into(), Value::String(slugify(stem)));
    }
    item.insert(
        "source".into(),
        Value::String(rel.to_string_lossy().replace('\\', "/")),
    );

    Ok(Value::Object(item))
}

/// Every Markdown document under `root`, newest `date` first, then by path.
pub fn load_documents(root: &Path) -> io::Result<Vec<Value>> {
    let mut items = collect_markdown_files(root)
        .iter()
        .map(|md| load_document(root, md))
        .collect::<io::Result<Vec<_>>>()?;

    items.sort_by(|a, b| a["source"].as_str().cmp(&b["source"].as_str()));
    items.sort_by_key(|item| {
        Reverse(item.get("date").and_then(Value::as_str).map(str::to_owned))
    });
    Ok(items)
}

/// Reads an array of items from `.json`, `.yaml`/`.yml` or `.toml`
/// (under a top-level `items` key).
pub fn load_data_file(path: &Path) -> io::Result<Vec<Value>> {
    let text = fs::read_to_string(path)?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("json") => serde_json::from_str(&text).map_err(|e| invalid(format!("JSON: {e}"))),
        Some("yaml" | "yml") => {
            serde_yaml::from_str(&text).map_err(|e| invalid(format!("YAML: {e}")))
        }
        Some("toml") => {
            let mut table =
                toml::from_str::<toml::Table>(&text).map_err(|e| invalid(format!("TOML: {e}")))?;
            match table.remove("items") {
                Some(toml::Value::Array(items)) => {
                    Ok(items.into_iter().map(toml_to_json).collect())
                }
                _ => Err(invalid("TOML: expected an `items` array")),
            }
        }
        _ => Err(io::Error::new(
            ErrorKind::Unsupported,
            format!("unsupported item file: {}", path.display()),
        )),
    }
}

pub fn load_items(path: &Path) -> io::Result<Vec<Value>> {
    if path.is_dir() {
        load_documents(path)
    } else {
        load_data_file(path)
    }
}
