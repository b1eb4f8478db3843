//! Translator hand-off as a flat table, in JSON or as a spreadsheet.
//!
//! ```json
//! {
//!   "nav.library": {"en": "Library", "vi": "Thư viện"},
//!   "blog:readMore": {"en": "Read more", "vi": ""}
//! }
//! ```
//!
//! ```text
//! Namespace,Key,Context,en,vi
//! common,nav.library,,Library,Thư viện
//! blog,readMore,,Read more,
//! ```
//!
//! In JSON, keys outside the default namespace are written as `ns:key`.
//! Export covers every canonical key; import merges non-empty cells back
//! into the nested catalog files and leaves every other key alone.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use super::catalog::{deep_merge, read_json, unflatten};
use super::{CatalogStore, I18nError};

const NAMESPACE_COLUMN: &str = "Namespace";
const KEY_COLUMN: &str = "Key";
/// Notes for translators; never imported.
const CONTEXT_COLUMN: &str = "Context";

/// Table encoding for `folio i18n export` / `import`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TableFormat {
    Json,
    Csv,
}

impl TableFormat {
    /// The explicit choice, else `csv` for a `.csv` file, else JSON.
    pub fn detect(explicit: Option<Self>, path: Option<&Path>) -> Self {
        explicit.unwrap_or_else(|| {
            match path.and_then(Path::extension).and_then(|e| e.to_str()) {
                Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
                _ => Self::Json,
            }
        })
    }
}

/// `(namespace, key, value per locale)` for every canonical key.
fn rows(store: &CatalogStore) -> Vec<(&str, &str, Vec<&str>)> {
    let mut rows = Vec::new();
    for ns in store.namespaces() {
        let Some(canonical) = store.canonical(ns) else {
            continue;
        };
        for key in canonical.keys() {
            let values = store
                .locales()
                .iter()
                .map(|locale| {
                    store
                        .catalog(locale, ns)
                        .and_then(|c| c.raw(key))
                        .unwrap_or_default()
                })
                .collect();
            rows.push((ns.as_str(), key, values));
        }
    }
    rows
}

/// Build the export table.
pub fn export(store: &CatalogStore) -> Value {
    let mut table = Map::new();
    for (ns, key, values) in rows(store) {
        let row = store
            .locales()
            .iter()
            .zip(values)
            .map(|(locale, value)| (locale.clone(), Value::String(value.to_string())))
            .collect();
        table.insert(qualify(store, ns, key), Value::Object(row));
    }
    Value::Object(table)
}

/// Write the export as CSV with `Namespace, Key, Context, <locale>...`
/// columns. Returns the number of rows.
pub fn export_csv<W: io::Write>(store: &CatalogStore, writer: W) -> Result<usize, I18nError> {
    let mut out = csv::Writer::from_writer(writer);

    let mut header = vec![NAMESPACE_COLUMN, KEY_COLUMN, CONTEXT_COLUMN];
    header.extend(store.locales().iter().map(String::as_str));
    out.write_record(&header)?;

    let rows = rows(store);
    for (ns, key, values) in &rows {
        let mut record = vec![*ns, *key, ""];
        record.extend(values);
        out.write_record(&record)?;
    }
    out.flush().map_err(csv::Error::from)?;
    Ok(rows.len())
}

fn qualify(store: &CatalogStore, ns: &str, key: &str) -> String {
    if ns == store.default_namespace() {
        key.to_string()
    } else {
        format!("{ns}:{key}")
    }
}

/// One catalog file touched by an import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedFile {
    pub path: PathBuf,
    pub keys: usize,
}

/// Merge `table` into the catalog files under the store's directory.
///
/// Empty cells and unknown locales are ignored. Missing catalog files are
/// created.
pub fn import(store: &CatalogStore, table: &Value) -> Result<Vec<ImportedFile>, I18nError> {
    let Value::Object(rows) = table else {
        return Err(I18nError::InvalidTable);
    };
    if rows.values().any(|row| !row.is_object()) {
        return Err(I18nError::InvalidTable);
    }

    let mut written = Vec::new();
    for ns in store.namespaces() {
        for locale in store.locales() {
            let cells: Vec<(&str, &str)> = rows
                .iter()
                .filter_map(|(qualified, row)| {
                    let key = unqualify(store, ns, qualified)?;
                    let value = row.get(locale.as_str())?.as_str()?;
                    (!value.is_empty()).then_some((key, value))
                })
                .collect();
            if cells.is_empty() {
                continue;
            }

            let path = store.path_of(locale, ns);
            let mut catalog = if path.is_file() {
                read_json(&path)?
            } else {
                Value::Object(Map::new())
            };
            if !catalog.is_object() {
                return Err(I18nError::NotAnObject(path));
            }
            deep_merge(&mut catalog, unflatten(cells.iter().copied()));

            let mut json = serde_json::to_string_pretty(&catalog)
                .map_err(|err| I18nError::Json(path.clone(), err))?;
            json.push('\n');
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|err| I18nError::Io(parent.into(), err))?;
            }
            fs::write(&path, json).map_err(|err| I18nError::Io(path.clone(), err))?;

            written.push(ImportedFile {
                path,
                keys: cells.len(),
            });
        }
    }
    Ok(written)
}

/// Read a CSV export back and merge it like [`import`].
///
/// Without a `Namespace` column every row belongs to the default
/// namespace. Rows of unknown namespaces and columns of unknown locales
/// are skipped.
pub fn import_csv<R: io::Read>(store: &CatalogStore, reader: R) -> Result<Vec<ImportedFile>, I18nError> {
    let mut input = csv::Reader::from_reader(reader);
    let headers = input.headers()?.clone();
    let column = |name: &str| headers.iter().position(|h| h.trim() == name);

    let key_column = column(KEY_COLUMN).ok_or(I18nError::MissingColumn(KEY_COLUMN))?;
    let ns_column = column(NAMESPACE_COLUMN);
    let locale_columns: Vec<(&str, usize)> = store
        .locales()
        .iter()
        .filter_map(|locale| Some((locale.as_str(), column(locale.as_str())?)))
        .collect();

    let mut table = Map::new();
    for record in input.records() {
        let record = record?;
        let Some(key) = record.get(key_column).map(str::trim).filter(|k| !k.is_empty()) else {
            continue;
        };
        let ns = ns_column
            .and_then(|i| record.get(i))
            .map(str::trim)
            .filter(|ns| !ns.is_empty())
            .unwrap_or(store.default_namespace());
        if !store.namespaces().iter().any(|n| n == ns) {
            crate::debug!("i18n"; "skipping '{key}': unknown namespace '{ns}'");
            continue;
        }

        let row = locale_columns
            .iter()
            .filter_map(|&(locale, i)| {
                Some((locale.to_string(), Value::String(record.get(i)?.to_string())))
            })
            .collect();
        table.insert(qualify(store, ns, key), Value::Object(row));
    }

    import(store, &Value::Object(table))
}

/// The bare key if `qualified` belongs to namespace `ns`.
fn unqualify<'k>(store: &CatalogStore, ns: &str, qualified: &'k str) -> Option<&'k str> {
    match qualified.split_once(':') {
        Some((prefix, key)) if store.namespaces().iter().any(|n| n == prefix) => {
            (prefix == ns).then_some(key)
        }
        _ => (ns == store.default_namespace()).then_some(qualified),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::I18nConfig;
    use serde_json::json;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(dir: &Path, locale: &str, ns: &str, value: Value) {
        fs::create_dir_all(dir.join(locale)).unwrap();
        fs::write(
            dir.join(locale).join(format!("{ns}.json")),
            serde_json::to_string(&value).unwrap(),
        )
        .unwrap();
    }

    fn setup() -> (TempDir, CatalogStore) {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "en",
            "common",
            json!({"nav": {"library": "Library", "blog": "Blog"}}),
        );
        write(dir.path(), "vi", "common", json!({"nav": {"library": "Thư viện"}, "keep": "x"}));
        write(dir.path(), "en", "blog", json!({"readMore": "Read more"}));
        let config = I18nConfig {
            dir: dir.path().to_path_buf(),
            namespaces: vec!["common".into(), "blog".into()],
            ..Default::default()
        };
        let store = CatalogStore::load(&config).unwrap();
        (dir, store)
    }

    #[test]
    fn test_export_covers_canonical_keys() {
        let (_dir, store) = setup();
        let table = export(&store);
        assert_eq!(
            table,
            json!({
                "nav.library": {"en": "Library", "vi": "Thư viện"},
                "nav.blog": {"en": "Blog", "vi": ""},
                "blog:readMore": {"en": "Read more", "vi": ""}
            })
        );
    }

    #[test]
    fn test_import_deep_merges() {
        let (dir, store) = setup();
        let table = json!({
            "nav.blog": {"en": "Blog", "vi": "Nhật ký"},
            "nav.library": {"vi": ""},
            "blog:readMore": {"vi": "Đọc thêm"}
        });
        let written = import(&store, &table).unwrap();
        assert_eq!(written.len(), 3);

        let vi: Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("vi/common.json")).unwrap())
                .unwrap();
        assert_eq!(
            vi,
            json!({"nav": {"library": "Thư viện", "blog": "Nhật ký"}, "keep": "x"})
        );

        let vi_blog: Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("vi/blog.json")).unwrap())
                .unwrap();
        assert_eq!(vi_blog, json!({"readMore": "Đọc thêm"}));
    }

    #[test]
    fn test_round_trip_is_stable() {
        let (dir, store) = setup();
        let before = fs::read_to_string(dir.path().join("vi/common.json")).unwrap();
        import(&store, &export(&store)).unwrap();
        let after: Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("vi/common.json")).unwrap())
                .unwrap();
        assert_eq!(after, serde_json::from_str::<Value>(&before).unwrap());
    }

    #[test]
    fn test_rejects_non_table() {
        let (_dir, store) = setup();
        assert!(matches!(
            import(&store, &json!(["nope"])),
            Err(I18nError::InvalidTable)
        ));
    }

    #[test]
    fn test_export_csv_columns() {
        let (_dir, store) = setup();
        let mut buf = Vec::new();
        let rows = export_csv(&store, &mut buf).unwrap();
        assert_eq!(rows, 3);
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Namespace,Key,Context,en,vi\n\
             common,nav.library,,Library,Thư viện\n\
             common,nav.blog,,Blog,\n\
             blog,readMore,,Read more,\n"
        );
    }

    #[test]
    fn test_import_csv_merges_by_namespace() {
        let (dir, store) = setup();
        let sheet = "Namespace,Key,Context,en,vi\n\
                     common,nav.blog,menu entry,Blog,Nhật ký\n\
                     blog,readMore,,Read more,\"Đọc thêm, nhé\"\n\
                     shop,cart,,Cart,Giỏ hàng\n";
        let written = import_csv(&store, sheet.as_bytes()).unwrap();
        // en and vi of both namespaces
        assert_eq!(written.len(), 4);

        let vi: Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("vi/common.json")).unwrap())
                .unwrap();
        assert_eq!(
            vi,
            json!({"nav": {"library": "Thư viện", "blog": "Nhật ký"}, "keep": "x"})
        );
        let vi_blog: Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("vi/blog.json")).unwrap())
                .unwrap();
        assert_eq!(vi_blog, json!({"readMore": "Đọc thêm, nhé"}));
        assert!(!dir.path().join("vi/shop.json").exists());
    }

    #[test]
    fn test_import_csv_without_namespace_column() {
        let (dir, store) = setup();
        let sheet = "Key,Context,vi\nnav.blog,,Nhật ký\n";
        import_csv(&store, sheet.as_bytes()).unwrap();
        let vi = fs::read_to_string(dir.path().join("vi/common.json")).unwrap();
        assert!(vi.contains("Nhật ký"));

        assert!(matches!(
            import_csv(&store, "Context,vi\n,x\n".as_bytes()),
            Err(I18nError::MissingColumn("Key"))
        ));
    }

    #[test]
    fn test_csv_round_trip_is_stable() {
        let (dir, store) = setup();
        let before = fs::read_to_string(dir.path().join("vi/common.json")).unwrap();
        let mut buf = Vec::new();
        export_csv(&store, &mut buf).unwrap();
        import_csv(&store, buf.as_slice()).unwrap();
        let after: Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("vi/common.json")).unwrap())
                .unwrap();
        assert_eq!(after, serde_json::from_str::<Value>(&before).unwrap());
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(TableFormat::detect(None, Some(Path::new("t.CSV"))), TableFormat::Csv);
        assert_eq!(TableFormat::detect(None, Some(Path::new("t.json"))), TableFormat::Json);
        assert_eq!(TableFormat::detect(None, None), TableFormat::Json);
        assert_eq!(
            TableFormat::detect(Some(TableFormat::Csv), Some(Path::new("t.json"))),
            TableFormat::Csv
        );
    }
}
