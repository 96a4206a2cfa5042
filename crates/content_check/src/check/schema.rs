//! Record shapes and their validators.
//!
//! Both validators are pure functions from a parsed JSON value to either the typed record or
//! the complete list of [`SchemaIssue`]s. They never stop at the first violation. Keys outside
//! the shape are ignored. Localized fields are checked against the configured locale set, so
//! adding a locale is a config change only.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

/// One violated field.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SchemaIssue {
    /// Dotted field path, e.g. `articles[2].name.ru`. Empty for the document root.
    pub path: String,
    pub message: String,
}

impl Display for SchemaIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Text value per locale.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LocalizedText(BTreeMap<String, String>);

impl LocalizedText {
    pub fn get(&self, locale: &str) -> Option<&str> {
        self.0.get(locale).map(String::as_str)
    }
}

/// Ordered keyword list per locale.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LocalizedKeywords(BTreeMap<String, Vec<String>>);

impl LocalizedKeywords {
    pub fn get(&self, locale: &str) -> Option<&[String]> {
        self.0.get(locale).map(Vec::as_slice)
    }
}

/// One article as declared in the registry.
#[derive(Clone, Debug, PartialEq)]
pub struct RegistryEntry {
    pub slug: String,
    pub route: String,
    pub name: LocalizedText,
    pub description: Option<LocalizedText>,
    pub keywords: LocalizedKeywords,
    pub pinned: bool,
    /// Sort key among pinned entries, lower first.
    pub order: Option<f64>,
}

/// The whole registry document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Registry {
    pub articles: Vec<RegistryEntry>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const NAMES: [&'static str; 3] = ["beginner", "intermediate", "advanced"];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "beginner" => Some(Difficulty::Beginner),
            "intermediate" => Some(Difficulty::Intermediate),
            "advanced" => Some(Difficulty::Advanced),
            _ => None,
        }
    }
}

/// Metadata block at the top of an article source file.
#[derive(Clone, Debug, PartialEq)]
pub struct ArticleMetadata {
    pub title: LocalizedText,
    pub slug: String,
    pub keywords: LocalizedKeywords,
    pub created: String,
    pub updated: Option<String>,
    pub author: Option<String>,
    pub difficulty: Option<Difficulty>,
    /// Minutes.
    pub estimated_read_time: Option<f64>,
}

/// Registry slugs: lowercase letters, digits, hyphens.
pub fn is_registry_slug(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Article slugs additionally allow underscores.
pub fn is_article_slug(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}

/// Validate a parsed registry document.
pub fn validate_registry(raw: &Value, locales: &[String]) -> Result<Registry, Vec<SchemaIssue>> {
    let mut v = Validator::new(locales);
    let Some(root) = v.object(raw, "") else {
        return Err(v.issues);
    };
    let Some(items) = v.array(root, "articles", "") else {
        return Err(v.issues);
    };

    let mut articles = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        if let Some(entry) = v.registry_entry(item, &format!("articles[{idx}]")) {
            articles.push(entry);
        }
    }

    if v.issues.is_empty() {
        Ok(Registry { articles })
    } else {
        Err(v.issues)
    }
}

/// Validate a parsed metadata block.
pub fn validate_metadata(
    raw: &Value,
    locales: &[String],
) -> Result<ArticleMetadata, Vec<SchemaIssue>> {
    let mut v = Validator::new(locales);
    let Some(obj) = v.object(raw, "") else {
        return Err(v.issues);
    };

    let title = v.localized_text(obj, "title", "", true);
    let slug = v.string(obj, "slug", "", true);
    if let Some(slug) = &slug {
        if !is_article_slug(slug) {
            v.push(
                "slug",
                "must contain only lowercase letters, digits, hyphens, and underscores",
            );
        }
    }
    let keywords = v.localized_keywords(obj, "keywords", "", true);
    let created = v.string(obj, "created", "", true);
    let updated = v.string(obj, "updated", "", false);
    let author = v.string(obj, "author", "", false);
    let difficulty = v.string(obj, "difficulty", "", false).and_then(|raw| {
        let parsed = Difficulty::parse(&raw);
        if parsed.is_none() {
            v.push(
                "difficulty",
                format!("must be one of {:?}, found `{raw}`", Difficulty::NAMES),
            );
        }
        parsed
    });
    let estimated_read_time = v.number(obj, "estimatedReadTime", "", false);
    if estimated_read_time.is_some_and(|minutes| minutes < 0.0) {
        v.push("estimatedReadTime", "must not be negative");
    }

    match (title, slug, keywords, created) {
        (Some(title), Some(slug), Some(keywords), Some(created)) if v.issues.is_empty() => {
            Ok(ArticleMetadata {
                title,
                slug,
                keywords,
                created,
                updated,
                author,
                difficulty,
                estimated_read_time,
            })
        }
        _ => Err(v.issues),
    }
}

struct Validator<'a> {
    locales: &'a [String],
    issues: Vec<SchemaIssue>,
}

impl<'a> Validator<'a> {
    fn new(locales: &'a [String]) -> Self {
        Self {
            locales,
            issues: Vec::new(),
        }
    }

    fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.issues.push(SchemaIssue {
            path: path.into(),
            message: message.into(),
        });
    }

    fn registry_entry(&mut self, raw: &Value, path: &str) -> Option<RegistryEntry> {
        let obj = self.object(raw, path)?;

        let slug = self.string(obj, "slug", path, true);
        if let Some(slug) = &slug {
            if !is_registry_slug(slug) {
                self.push(
                    child(path, "slug"),
                    "must contain only lowercase letters, digits, and hyphens",
                );
            }
        }
        let route = self.string(obj, "route", path, true);
        if let Some(route) = &route {
            if !route.starts_with('/') {
                self.push(child(path, "route"), "must start with `/`");
            }
        }
        let name = self.localized_text(obj, "name", path, true);
        let description = self.localized_text(obj, "description", path, false);
        let keywords = self.localized_keywords(obj, "keywords", path, true);
        let pinned = self.boolean(obj, "pinned", path).unwrap_or(false);
        let order = self.number(obj, "order", path, false);

        Some(RegistryEntry {
            slug: slug?,
            route: route?,
            name: name?,
            description,
            keywords: keywords?,
            pinned,
            order,
        })
    }

    fn object<'v>(&mut self, value: &'v Value, path: &str) -> Option<&'v Map<String, Value>> {
        match value {
            Value::Object(map) => Some(map),
            other => {
                self.push(path, expected("object", other));
                None
            }
        }
    }

    /// Look up a field, recording `required` when a mandatory one is absent.
    fn field<'v>(
        &mut self,
        obj: &'v Map<String, Value>,
        key: &str,
        path: &str,
        required: bool,
    ) -> Option<&'v Value> {
        let value = obj.get(key);
        if value.is_none() && required {
            self.push(child(path, key), "required");
        }
        value
    }

    fn string(
        &mut self,
        obj: &Map<String, Value>,
        key: &str,
        path: &str,
        required: bool,
    ) -> Option<String> {
        match self.field(obj, key, path, required)? {
            Value::String(s) => Some(s.clone()),
            other => {
                self.push(child(path, key), expected("string", other));
                None
            }
        }
    }

    fn boolean(&mut self, obj: &Map<String, Value>, key: &str, path: &str) -> Option<bool> {
        match self.field(obj, key, path, false)? {
            Value::Bool(b) => Some(*b),
            other => {
                self.push(child(path, key), expected("boolean", other));
                None
            }
        }
    }

    fn number(
        &mut self,
        obj: &Map<String, Value>,
        key: &str,
        path: &str,
        required: bool,
    ) -> Option<f64> {
        match self.field(obj, key, path, required)? {
            Value::Number(n) => n.as_f64(),
            other => {
                self.push(child(path, key), expected("number", other));
                None
            }
        }
    }

    fn array<'v>(
        &mut self,
        obj: &'v Map<String, Value>,
        key: &str,
        path: &str,
    ) -> Option<&'v Vec<Value>> {
        match self.field(obj, key, path, true)? {
            Value::Array(items) => Some(items),
            other => {
                self.push(child(path, key), expected("array", other));
                None
            }
        }
    }

    fn localized_text(
        &mut self,
        obj: &Map<String, Value>,
        key: &str,
        path: &str,
        required: bool,
    ) -> Option<LocalizedText> {
        let field_path = child(path, key);
        let raw = self.field(obj, key, path, required)?;
        let map = self.object(raw, &field_path)?;

        let mut out = BTreeMap::new();
        let mut complete = true;
        for locale in self.locales {
            match map.get(locale) {
                Some(Value::String(text)) => {
                    out.insert(locale.clone(), text.clone());
                }
                Some(other) => {
                    complete = false;
                    let message = expected("string", other);
                    self.push(child(&field_path, locale), message);
                }
                None => {
                    complete = false;
                    self.push(child(&field_path, locale), "required");
                }
            }
        }
        complete.then_some(LocalizedText(out))
    }

    fn localized_keywords(
        &mut self,
        obj: &Map<String, Value>,
        key: &str,
        path: &str,
        required: bool,
    ) -> Option<LocalizedKeywords> {
        let field_path = child(path, key);
        let raw = self.field(obj, key, path, required)?;
        let map = self.object(raw, &field_path)?;

        let mut out = BTreeMap::new();
        let mut complete = true;
        for locale in self.locales {
            let locale_path = child(&field_path, locale);
            let items = match map.get(locale) {
                Some(Value::Array(items)) => items,
                Some(other) => {
                    complete = false;
                    self.push(locale_path, expected("array", other));
                    continue;
                }
                None => {
                    complete = false;
                    self.push(locale_path, "required");
                    continue;
                }
            };

            let mut words = Vec::with_capacity(items.len());
            for (idx, item) in items.iter().enumerate() {
                match item {
                    Value::String(word) => words.push(word.clone()),
                    other => {
                        complete = false;
                        self.push(format!("{locale_path}[{idx}]"), expected("string", other));
                    }
                }
            }
            out.insert(locale.clone(), words);
        }
        complete.then_some(LocalizedKeywords(out))
    }
}

fn child(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

fn expected(kind: &str, found: &Value) -> String {
    format!("expected {kind}, found {}", type_name(found))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
