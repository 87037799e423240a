//! Keyword spellings and name patterns recognized by the parser.
//!
//! The query surface is configurable: every keyword can be respelled and
//! the patterns accepted for field names and namespaces can be replaced.
//! A vocabulary is usually loaded from JSON, where every field is optional:
//!
//! ```json
//! {
//!   "keywords": { "select": "find", "where": "having" },
//!   "case_sensitive": false,
//!   "field_pattern": "^[a-z_]+$",
//!   "max_nesting": 64
//! }
//! ```
//!
//! Operator symbols (`=`, `!=`, `<`, `<=`, `>`, `>=`) are fixed by the lexer.

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;
use serde::{Deserialize, Serialize};

pub const DEFAULT_FIELD_PATTERN: &str = r"^(\*|[A-Za-z_][A-Za-z0-9_.]*)$";
pub const DEFAULT_NAMESPACE_PATTERN: &str = r"^[A-Za-z0-9_][A-Za-z0-9_.\-]*\*?$";
/// Deepest run of nested `not` and parentheses the parser accepts.
pub const DEFAULT_MAX_NESTING: usize = 256;

static DEFAULT_VOCABULARY: LazyLock<Vocabulary> = LazyLock::new(|| {
    Vocabulary::new(VocabularyConfig::default()).expect("default vocabulary is valid")
});

/// Reserved words of the query language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Select,
    Delete,
    From,
    Where,
    And,
    Or,
    Not,
    In,
    Order,
    By,
    Asc,
    Desc,
    Limit,
}

impl Keyword {
    pub const ALL: [Keyword; 13] = [
        Keyword::Select,
        Keyword::Delete,
        Keyword::From,
        Keyword::Where,
        Keyword::And,
        Keyword::Or,
        Keyword::Not,
        Keyword::In,
        Keyword::Order,
        Keyword::By,
        Keyword::Asc,
        Keyword::Desc,
        Keyword::Limit,
    ];
}

/// Spelling of each keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Keywords {
    pub select: String,
    pub delete: String,
    pub from: String,
    #[serde(rename = "where")]
    pub where_: String,
    pub and: String,
    pub or: String,
    pub not: String,
    #[serde(rename = "in")]
    pub in_: String,
    pub order: String,
    pub by: String,
    pub asc: String,
    pub desc: String,
    pub limit: String,
}

impl Default for Keywords {
    fn default() -> Self {
        Keywords {
            select: "select".to_string(),
            delete: "delete".to_string(),
            from: "from".to_string(),
            where_: "where".to_string(),
            and: "and".to_string(),
            or: "or".to_string(),
            not: "not".to_string(),
            in_: "in".to_string(),
            order: "order".to_string(),
            by: "by".to_string(),
            asc: "asc".to_string(),
            desc: "desc".to_string(),
            limit: "limit".to_string(),
        }
    }
}

impl Keywords {
    pub fn spelling(&self, keyword: Keyword) -> &str {
        match keyword {
            Keyword::Select => &self.select,
            Keyword::Delete => &self.delete,
            Keyword::From => &self.from,
            Keyword::Where => &self.where_,
            Keyword::And => &self.and,
            Keyword::Or => &self.or,
            Keyword::Not => &self.not,
            Keyword::In => &self.in_,
            Keyword::Order => &self.order,
            Keyword::By => &self.by,
            Keyword::Asc => &self.asc,
            Keyword::Desc => &self.desc,
            Keyword::Limit => &self.limit,
        }
    }
}

/// Serializable form of a [`Vocabulary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VocabularyConfig {
    pub keywords: Keywords,
    pub case_sensitive: bool,
    pub field_pattern: String,
    pub namespace_pattern: String,
    pub max_nesting: usize,
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        VocabularyConfig {
            keywords: Keywords::default(),
            case_sensitive: false,
            field_pattern: DEFAULT_FIELD_PATTERN.to_string(),
            namespace_pattern: DEFAULT_NAMESPACE_PATTERN.to_string(),
            max_nesting: DEFAULT_MAX_NESTING,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum VocabularyError {
    #[error("invalid {which} pattern: {source}")]
    InvalidPattern {
        which: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("keyword spelling '{spelling}' is not a single word")]
    InvalidKeyword { spelling: String },

    #[error("keyword spelling '{spelling}' is used for more than one keyword")]
    DuplicateKeyword { spelling: String },

    #[error("invalid vocabulary JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read vocabulary from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Validated vocabulary used by the parser.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    config: VocabularyConfig,
    field_pattern: Regex,
    namespace_pattern: Regex,
    lookup: HashMap<String, Keyword>,
}

impl Vocabulary {
    pub fn new(config: VocabularyConfig) -> Result<Self, VocabularyError> {
        let field_pattern = Regex::new(&config.field_pattern).map_err(|source| {
            VocabularyError::InvalidPattern {
                which: "field",
                source,
            }
        })?;
        let namespace_pattern = Regex::new(&config.namespace_pattern).map_err(|source| {
            VocabularyError::InvalidPattern {
                which: "namespace",
                source,
            }
        })?;

        let mut lookup = HashMap::new();
        for keyword in Keyword::ALL {
            let spelling = config.keywords.spelling(keyword);
            if spelling.is_empty() || !spelling.chars().all(|c| c.is_alphanumeric() || c == '_') {
                return Err(VocabularyError::InvalidKeyword {
                    spelling: spelling.to_string(),
                });
            }
            let key = normalize(spelling, config.case_sensitive);
            if lookup.insert(key, keyword).is_some() {
                return Err(VocabularyError::DuplicateKeyword {
                    spelling: spelling.to_string(),
                });
            }
        }

        Ok(Vocabulary {
            config,
            field_pattern,
            namespace_pattern,
            lookup,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, VocabularyError> {
        let config: VocabularyConfig = serde_json::from_str(json)?;
        Self::new(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, VocabularyError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| VocabularyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// The built-in English vocabulary.
    pub fn standard() -> &'static Vocabulary {
        &DEFAULT_VOCABULARY
    }

    pub fn config(&self) -> &VocabularyConfig {
        &self.config
    }

    pub fn max_nesting(&self) -> usize {
        self.config.max_nesting
    }

    pub fn keyword(&self, word: &str) -> Option<Keyword> {
        if self.config.case_sensitive {
            self.lookup.get(word).copied()
        } else {
            self.lookup.get(&word.to_lowercase()).copied()
        }
    }

    pub fn spelling(&self, keyword: Keyword) -> &str {
        self.config.keywords.spelling(keyword)
    }

    /// Whether `word` may be used as a field name.
    pub fn is_field(&self, word: &str) -> bool {
        self.keyword(word).is_none() && self.field_pattern.is_match(word)
    }

    /// Whether `word` may be used as a namespace.
    pub fn is_namespace(&self, word: &str) -> bool {
        self.keyword(word).is_none() && self.namespace_pattern.is_match(word)
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::standard().clone()
    }
}

fn normalize(spelling: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        spelling.to_string()
    } else {
        spelling.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_keywords_are_case_insensitive() {
        let vocab = Vocabulary::standard();
        assert_eq!(vocab.keyword("SELECT"), Some(Keyword::Select));
        assert_eq!(vocab.keyword("Order"), Some(Keyword::Order));
        assert_eq!(vocab.keyword("publisher"), None);
    }

    #[test]
    fn keywords_are_not_fields() {
        let vocab = Vocabulary::standard();
        assert!(vocab.is_field("timestamp"));
        assert!(vocab.is_field("*"));
        assert!(!vocab.is_field("where"));
        assert!(!vocab.is_field("42"));
    }

    #[test]
    fn namespaces_allow_wildcard_suffix() {
        let vocab = Vocabulary::standard();
        assert!(vocab.is_namespace("images.dpla"));
        assert!(vocab.is_namespace("images.*"));
        assert!(!vocab.is_namespace("*"));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let vocab = Vocabulary::from_json_str(r#"{"keywords": {"select": "find"}}"#).unwrap();
        assert_eq!(vocab.keyword("find"), Some(Keyword::Select));
        assert_eq!(vocab.keyword("select"), None);
        assert_eq!(vocab.keyword("where"), Some(Keyword::Where));
    }

    #[test]
    fn duplicate_spellings_are_rejected() {
        let err = Vocabulary::from_json_str(r#"{"keywords": {"and": "or"}}"#).unwrap_err();
        assert!(matches!(err, VocabularyError::DuplicateKeyword { .. }));
    }

    #[test]
    fn case_sensitive_duplicates_differ_only_by_case() {
        let json = r#"{"case_sensitive": true, "keywords": {"and": "AND", "asc": "and"}}"#;
        let vocab = Vocabulary::from_json_str(json).unwrap();
        assert_eq!(vocab.keyword("AND"), Some(Keyword::And));
        assert_eq!(vocab.keyword("and"), Some(Keyword::Asc));
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let err = Vocabulary::from_json_str(r#"{"field_pattern": "("}"#).unwrap_err();
        assert!(matches!(err, VocabularyError::InvalidPattern { which: "field", .. }));
    }

    #[test]
    fn config_round_trips_through_json() {
        let vocab = Vocabulary::from_json_str(r#"{"max_nesting": 8, "case_sensitive": true}"#).unwrap();
        assert_eq!(vocab.max_nesting(), 8);

        let json = serde_json::to_string(vocab.config()).unwrap();
        let reloaded = Vocabulary::from_json_str(&json).unwrap();
        assert_eq!(reloaded.config(), vocab.config());
        assert_eq!(Vocabulary::standard().config().max_nesting, DEFAULT_MAX_NESTING);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = Vocabulary::from_json_str(r#"{"keyword": {}}"#).unwrap_err();
        assert!(matches!(err, VocabularyError::Json(_)));
    }
}
