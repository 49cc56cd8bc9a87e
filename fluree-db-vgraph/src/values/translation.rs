//! Translation tables
//!
//! A [`TranslationTable`] maps stored database values to RDF-side values and
//! back. Its content comes from inline `d2rq:translation` pairs, from a
//! two-column CSV resource (`d2rq:href`), or from a named [`Translator`]
//! (`d2rq:javaClass`).

use std::collections::HashMap;
use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::error::{VgraphError, VgraphResult};

/// Custom two-way converter between stored and RDF-side values
///
/// Either direction may refuse a value by returning `None`.
pub trait Translator: Send + Sync + Debug {
    fn to_rdf(&self, db_value: &str) -> Option<String>;

    fn to_db(&self, rdf_value: &str) -> Option<String>;
}

/// Translators addressable by name from a mapping
#[derive(Debug, Default, Clone)]
pub struct TranslatorRegistry {
    translators: HashMap<String, Arc<dyn Translator>>,
}

impl TranslatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, translator: Arc<dyn Translator>) {
        self.translators.insert(name.into(), translator);
    }

    pub fn with(mut self, name: impl Into<String>, translator: Arc<dyn Translator>) -> Self {
        self.register(name, translator);
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Translator>> {
        self.translators.get(name).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.translators.is_empty()
    }
}

/// Finite bidirectional lookup, optionally delegating to a [`Translator`]
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    id: String,
    db_to_rdf: HashMap<String, String>,
    rdf_to_db: HashMap<String, String>,
    translator: Option<Arc<dyn Translator>>,
}

impl TranslationTable {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn from_pairs<I, A, B>(id: impl Into<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<String>,
        B: Into<String>,
    {
        let mut table = Self::new(id);
        table.add_all(pairs);
        table
    }

    /// Identity of the declaring mapping node
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn add_translation(&mut self, db_value: impl Into<String>, rdf_value: impl Into<String>) {
        let db_value = db_value.into();
        let rdf_value = rdf_value.into();
        self.rdf_to_db.insert(rdf_value.clone(), db_value.clone());
        self.db_to_rdf.insert(db_value, rdf_value);
    }

    pub fn add_all<I, A, B>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<String>,
        B: Into<String>,
    {
        for (db_value, rdf_value) in pairs {
            self.add_translation(db_value, rdf_value);
        }
    }

    /// Delegate every lookup to `translator`; inline pairs are ignored afterwards
    pub fn set_translator(&mut self, translator: Arc<dyn Translator>) {
        self.translator = Some(translator);
    }

    pub fn has_translator(&self) -> bool {
        self.translator.is_some()
    }

    /// Number of inline translations
    pub fn len(&self) -> usize {
        self.db_to_rdf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.db_to_rdf.is_empty() && self.translator.is_none()
    }

    pub fn to_rdf(&self, db_value: &str) -> Option<String> {
        match &self.translator {
            Some(translator) => translator.to_rdf(db_value),
            None => self.db_to_rdf.get(db_value).cloned(),
        }
    }

    pub fn to_db(&self, rdf_value: &str) -> Option<String> {
        match &self.translator {
            Some(translator) => translator.to_db(rdf_value),
            None => self.rdf_to_db.get(rdf_value).cloned(),
        }
    }
}

/// Source of `(database value, rdf value)` pairs for a `d2rq:href`
pub trait TranslationLoader {
    fn load(&self, href: &str) -> VgraphResult<Vec<(String, String)>>;
}

/// Reads two-column CSV files from the local filesystem
///
/// `href` may be a plain path or a `file:` URL. Relative paths resolve
/// against `root` when one is set.
#[derive(Debug, Clone, Default)]
pub struct CsvTranslationLoader {
    root: Option<PathBuf>,
}

impl CsvTranslationLoader {
    pub fn new(root: Option<PathBuf>) -> Self {
        Self { root }
    }

    pub fn resolve(&self, href: &str) -> PathBuf {
        let raw = href
            .strip_prefix("file://")
            .or_else(|| href.strip_prefix("file:"))
            .unwrap_or(href);
        let path = Path::new(raw);
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl TranslationLoader for CsvTranslationLoader {
    fn load(&self, href: &str) -> VgraphResult<Vec<(String, String)>> {
        let path = self.resolve(href);
        let content = fs::read_to_string(&path).map_err(|e| VgraphError::TranslationLoad {
            href: href.to_string(),
            message: e.to_string(),
        })?;
        let pairs = parse_csv_pairs(&content).map_err(|message| VgraphError::TranslationLoad {
            href: href.to_string(),
            message,
        })?;
        debug!(href, path = %path.display(), pairs = pairs.len(), "Loaded translation table");
        Ok(pairs)
    }
}

/// Parse two-column CSV; blank lines are skipped, fields may be double-quoted
fn parse_csv_pairs(content: &str) -> Result<Vec<(String, String)>, String> {
    let mut pairs = Vec::new();
    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_csv_line(line).map_err(|e| format!("line {}: {}", lineno + 1, e))?;
        match <[String; 2]>::try_from(fields) {
            Ok([db_value, rdf_value]) => pairs.push((db_value, rdf_value)),
            Err(fields) => {
                return Err(format!(
                    "line {}: expected 2 fields, found {}",
                    lineno + 1,
                    fields.len()
                ))
            }
        }
    }
    Ok(pairs)
}

fn split_csv_line(line: &str) -> Result<Vec<String>, String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut chars = line.chars().peekable();
    let mut quoted = false;

    while let Some(c) = chars.next() {
        match c {
            '"' if quoted => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    quoted = false;
                }
            }
            '"' if field.is_empty() => quoted = true,
            ',' if !quoted => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    if quoted {
        return Err("unterminated quoted field".to_string());
    }
    fields.push(field);
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[derive(Debug)]
    struct Upper;

    impl Translator for Upper {
        fn to_rdf(&self, db_value: &str) -> Option<String> {
            Some(db_value.to_uppercase())
        }

        fn to_db(&self, rdf_value: &str) -> Option<String> {
            rdf_value
                .chars()
                .all(|c| !c.is_lowercase())
                .then(|| rdf_value.to_lowercase())
        }
    }

    #[test]
    fn test_inline_pairs_are_bidirectional() {
        let table = TranslationTable::from_pairs("_:colors", [("r", "red"), ("g", "green")]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.to_rdf("r").as_deref(), Some("red"));
        assert_eq!(table.to_db("green").as_deref(), Some("g"));
        assert_eq!(table.to_rdf("b"), None);
        assert_eq!(table.to_db("r"), None);
    }

    #[test]
    fn test_translator_takes_over() {
        let registry = TranslatorRegistry::new().with("upper", Arc::new(Upper));
        let mut table = TranslationTable::new("_:t");
        table.set_translator(registry.get("upper").unwrap());

        assert!(!table.is_empty());
        assert_eq!(table.to_rdf("abc").as_deref(), Some("ABC"));
        assert_eq!(table.to_db("ABC").as_deref(), Some("abc"));
        assert_eq!(table.to_db("Abc"), None);
        assert!(registry.get("lower").is_none());
    }

    #[test]
    fn test_split_csv_line_quotes() {
        assert_eq!(split_csv_line("a,b").unwrap(), vec!["a", "b"]);
        assert_eq!(
            split_csv_line(r#""x, y","say ""hi""""#).unwrap(),
            vec!["x, y", r#"say "hi""#]
        );
        assert!(split_csv_line(r#""open,b"#).is_err());
    }

    #[test]
    fn test_csv_loader_resolves_against_root() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = fs::File::create(dir.path().join("colors.csv")).unwrap();
        writeln!(file, "r,red").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "\"g\",\"light, green\"").unwrap();

        let loader = CsvTranslationLoader::new(Some(dir.path().to_path_buf()));
        let pairs = loader.load("colors.csv").unwrap();
        assert_eq!(
            pairs,
            vec![
                ("r".to_string(), "red".to_string()),
                ("g".to_string(), "light, green".to_string()),
            ]
        );
    }

    #[test]
    fn test_csv_loader_errors() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad.csv"), "a,b,c\n").unwrap();
        let loader = CsvTranslationLoader::new(Some(dir.path().to_path_buf()));

        let err = loader.load("bad.csv").unwrap_err();
        assert!(err.to_string().contains("expected 2 fields"), "{}", err);
        assert!(matches!(
            loader.load("missing.csv"),
            Err(VgraphError::TranslationLoad { .. })
        ));
    }
}
