//! Word domain model.
//!
//! # Responsibility
//! - Define the canonical vocabulary record and its input shapes.
//! - Own presence validation for create/update inputs.
//!
//! # Invariants
//! - `id` is stable and never reused for another word.
//! - `date` is assigned once at creation and never changed by an update.
//! - `text`, `definition` and `example` are non-empty after trim.

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Display format used for `WordRecord::date` (`15 Jul 2023`).
pub const WORD_DATE_FORMAT: &str = "%d %b %Y";

static WORD_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2} [A-Z][a-z]{2} \d{4}$").expect("valid word date regex"));

/// Stable identifier for one word record.
///
/// Serialized as a JSON number. Deserialization also accepts a string of
/// decimal digits, so ids written by other tools are read back as the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WordId(pub u64);

impl WordId {
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl Display for WordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WordId {
    type Err = std::num::ParseIntError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value.trim().parse::<u64>().map(WordId)
    }
}

impl From<u64> for WordId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl Serialize for WordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.0)
    }
}

impl<'de> Deserialize<'de> for WordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct WordIdVisitor;

        impl Visitor<'_> for WordIdVisitor {
            type Value = WordId;

            fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str("a non-negative integer id or a string of digits")
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<WordId, E> {
                Ok(WordId(value))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<WordId, E> {
                u64::try_from(value)
                    .map(WordId)
                    .map_err(|_| E::custom(format!("negative word id `{value}`")))
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> Result<WordId, E> {
                if value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64 {
                    Ok(WordId(value as u64))
                } else {
                    Err(E::custom(format!("invalid word id `{value}`")))
                }
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<WordId, E> {
                value
                    .parse()
                    .map_err(|_| E::custom(format!("invalid word id `{value}`")))
            }
        }

        deserializer.deserialize_any(WordIdVisitor)
    }
}

/// Part-of-speech category of a word.
///
/// Stored values are read leniently: case is ignored and anything
/// unrecognized, `null` or absent becomes `Other`. New input is still checked
/// strictly through `FromStr`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WordType {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Pronoun,
    Preposition,
    Conjunction,
    Interjection,
    Phrase,
    Idiom,
    #[default]
    Other,
}

impl<'de> Deserialize<'de> for WordType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw
            .and_then(|value| value.parse().ok())
            .unwrap_or_default())
    }
}

impl WordType {
    pub const ALL: [WordType; 11] = [
        WordType::Noun,
        WordType::Verb,
        WordType::Adjective,
        WordType::Adverb,
        WordType::Pronoun,
        WordType::Preposition,
        WordType::Conjunction,
        WordType::Interjection,
        WordType::Phrase,
        WordType::Idiom,
        WordType::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Noun => "noun",
            Self::Verb => "verb",
            Self::Adjective => "adjective",
            Self::Adverb => "adverb",
            Self::Pronoun => "pronoun",
            Self::Preposition => "preposition",
            Self::Conjunction => "conjunction",
            Self::Interjection => "interjection",
            Self::Phrase => "phrase",
            Self::Idiom => "idiom",
            Self::Other => "other",
        }
    }
}

impl Display for WordType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WordType {
    type Err = WordValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| WordValidationError::UnknownType(value.trim().to_string()))
    }
}

/// Canonical vocabulary record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
    pub id: WordId,
    /// The word or phrase itself.
    pub text: String,
    pub definition: String,
    pub example: String,
    /// Serialized as `type` to match the stored JSON layout.
    #[serde(rename = "type", default)]
    pub word_type: WordType,
    /// Creation date in `WORD_DATE_FORMAT`.
    pub date: String,
}

impl WordRecord {
    /// Builds a record from validated input plus backend-assigned identity.
    pub fn from_new(id: WordId, date: impl Into<String>, word: NewWord) -> Self {
        Self {
            id,
            text: word.text,
            definition: word.definition,
            example: word.example,
            word_type: word.word_type,
            date: date.into(),
        }
    }

    /// Parsed creation date, when `date` is readable.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_word_date(&self.date)
    }
}

/// Required input fields checked by [`WordDraft::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordField {
    Text,
    Definition,
    Example,
    Type,
}

impl WordField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Definition => "definition",
            Self::Example => "example",
            Self::Type => "type",
        }
    }
}

/// Validation error for word input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordValidationError {
    /// Field is absent or blank after trimming.
    MissingField(WordField),
    /// `type` is not one of the known part-of-speech values.
    UnknownType(String),
}

impl Display for WordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "field `{}` is required", field.as_str()),
            Self::UnknownType(value) => write!(f, "unknown word type `{value}`"),
        }
    }
}

impl Error for WordValidationError {}

/// Raw create input as submitted by a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordDraft {
    pub text: String,
    pub definition: String,
    pub example: String,
    #[serde(rename = "type")]
    pub word_type: String,
}

/// Validated create input with trimmed fields and a typed `type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWord {
    pub text: String,
    pub definition: String,
    pub example: String,
    pub word_type: WordType,
}

impl WordDraft {
    pub fn new(
        text: impl Into<String>,
        definition: impl Into<String>,
        example: impl Into<String>,
        word_type: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            definition: definition.into(),
            example: example.into(),
            word_type: word_type.into(),
        }
    }

    /// Checks presence of every field and parses `type`.
    ///
    /// Fields are checked in form order, so the first missing field is the
    /// one reported.
    pub fn validate(&self) -> Result<NewWord, WordValidationError> {
        let text = required(&self.text, WordField::Text)?;
        let definition = required(&self.definition, WordField::Definition)?;
        let example = required(&self.example, WordField::Example)?;
        let word_type = required(&self.word_type, WordField::Type)?.parse()?;
        Ok(NewWord {
            text,
            definition,
            example,
            word_type,
        })
    }
}

impl From<NewWord> for WordDraft {
    fn from(value: NewWord) -> Self {
        Self {
            text: value.text,
            definition: value.definition,
            example: value.example,
            word_type: value.word_type.as_str().to_string(),
        }
    }
}

/// Partial update input. `None` fields keep their stored value.
///
/// `id` and `date` are not representable here, so an update can never
/// change them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub word_type: Option<String>,
}

impl WordPatch {
    /// Returns whether the patch carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.definition.is_none()
            && self.example.is_none()
            && self.word_type.is_none()
    }

    /// Validates supplied fields and returns a trimmed copy.
    pub fn validate(&self) -> Result<WordPatch, WordValidationError> {
        let word_type = match self.word_type.as_deref() {
            Some(value) => Some(
                required(value, WordField::Type)?
                    .parse::<WordType>()?
                    .as_str()
                    .to_string(),
            ),
            None => None,
        };
        Ok(WordPatch {
            text: optional(self.text.as_deref(), WordField::Text)?,
            definition: optional(self.definition.as_deref(), WordField::Definition)?,
            example: optional(self.example.as_deref(), WordField::Example)?,
            word_type,
        })
    }

    /// Replaces supplied fields on `record`.
    ///
    /// # Errors
    /// - Returns validation errors for blank fields or an unknown `type`; the
    ///   record is left untouched in that case.
    pub fn apply(&self, record: &mut WordRecord) -> Result<(), WordValidationError> {
        let patch = self.validate()?;
        let word_type = match patch.word_type.as_deref() {
            Some(value) => Some(value.parse::<WordType>()?),
            None => None,
        };

        if let Some(text) = patch.text {
            record.text = text;
        }
        if let Some(definition) = patch.definition {
            record.definition = definition;
        }
        if let Some(example) = patch.example {
            record.example = example;
        }
        if let Some(word_type) = word_type {
            record.word_type = word_type;
        }
        Ok(())
    }
}

impl From<&WordDraft> for WordPatch {
    fn from(value: &WordDraft) -> Self {
        Self {
            text: Some(value.text.clone()),
            definition: Some(value.definition.clone()),
            example: Some(value.example.clone()),
            word_type: Some(value.word_type.clone()),
        }
    }
}

/// Formats a creation date for storage.
pub fn format_word_date<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    at.format(WORD_DATE_FORMAT).to_string()
}

/// Today's date in local time, in `WORD_DATE_FORMAT`.
pub fn today_word_date() -> String {
    format_word_date(&Local::now())
}

/// Returns whether `value` matches the stored display format exactly.
pub fn is_word_date(value: &str) -> bool {
    WORD_DATE_RE.is_match(value) && NaiveDate::parse_from_str(value, WORD_DATE_FORMAT).is_ok()
}

/// Parses a stored date.
///
/// Accepts the display format plus `DD/MM/YYYY` and `YYYY-MM-DD`.
pub fn parse_word_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    [WORD_DATE_FORMAT, "%d/%m/%Y", "%Y-%m-%d"]
        .into_iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}

fn required(value: &str, field: WordField) -> Result<String, WordValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(WordValidationError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

fn optional(value: Option<&str>, field: WordField) -> Result<Option<String>, WordValidationError> {
    value.map(|value| required(value, field)).transpose()
}

#[cfg(test)]
mod tests {
    use super::{
        format_word_date, is_word_date, parse_word_date, WordDraft, WordField, WordId,
        WordPatch, WordRecord, WordType, WordValidationError,
    };
    use chrono::{NaiveDate, TimeZone, Utc};

    fn sample_record() -> WordRecord {
        WordRecord {
            id: WordId(7),
            text: "Ephemeral".to_string(),
            definition: "Lasting for a very short time.".to_string(),
            example: "The beauty of the cherry blossoms is ephemeral.".to_string(),
            word_type: WordType::Adjective,
            date: "15 Jul 2023".to_string(),
        }
    }

    #[test]
    fn word_id_accepts_number_and_digit_string() {
        let from_number: WordId = serde_json::from_str("1700000000000").unwrap();
        let from_string: WordId = serde_json::from_str("\"1700000000000\"").unwrap();
        assert_eq!(from_number, from_string);
        assert_eq!(serde_json::to_string(&from_string).unwrap(), "1700000000000");
        assert!(serde_json::from_str::<WordId>("\"abc\"").is_err());
        assert!(serde_json::from_str::<WordId>("-3").is_err());
    }

    #[test]
    fn record_serializes_type_field_name() {
        let json = serde_json::to_value(sample_record()).unwrap();
        assert_eq!(json["type"], "adjective");
        assert_eq!(json["id"], 7);
        assert!(json.get("word_type").is_none());
    }

    #[test]
    fn stored_type_is_read_leniently() {
        let read = |json: &str| -> WordType {
            let record: WordRecord = serde_json::from_str(json).unwrap();
            record.word_type
        };
        let base = r#""id":1,"text":"a","definition":"b","example":"c","date":"01 Jan 2024""#;

        assert_eq!(read(&format!(r#"{{{base},"type":"Noun"}}"#)), WordType::Noun);
        assert_eq!(read(&format!(r#"{{{base},"type":" VERB "}}"#)), WordType::Verb);
        assert_eq!(read(&format!(r#"{{{base},"type":"gerund"}}"#)), WordType::Other);
        assert_eq!(read(&format!(r#"{{{base},"type":null}}"#)), WordType::Other);
        assert_eq!(read(&format!("{{{base}}}")), WordType::Other);

        assert!("gerund".parse::<WordType>().is_err());
    }

    #[test]
    fn draft_validation_trims_and_reports_first_missing_field() {
        let valid = WordDraft::new("  Ubiquitous ", "Found everywhere.", "Phones.", " Adjective ")
            .validate()
            .unwrap();
        assert_eq!(valid.text, "Ubiquitous");
        assert_eq!(valid.word_type, WordType::Adjective);

        let err = WordDraft::new("word", "   ", "", "noun").validate().unwrap_err();
        assert_eq!(err, WordValidationError::MissingField(WordField::Definition));

        let err = WordDraft::new("word", "def", "ex", "").validate().unwrap_err();
        assert_eq!(err, WordValidationError::MissingField(WordField::Type));

        let err = WordDraft::new("word", "def", "ex", "gerund").validate().unwrap_err();
        assert_eq!(err, WordValidationError::UnknownType("gerund".to_string()));
    }

    #[test]
    fn patch_replaces_only_supplied_fields() {
        let mut record = sample_record();
        let patch = WordPatch {
            definition: Some("  Short-lived. ".to_string()),
            word_type: Some("noun".to_string()),
            ..WordPatch::default()
        };
        patch.apply(&mut record).unwrap();

        assert_eq!(record.definition, "Short-lived.");
        assert_eq!(record.word_type, WordType::Noun);
        assert_eq!(record.text, "Ephemeral");
        assert_eq!(record.id, WordId(7));
        assert_eq!(record.date, "15 Jul 2023");
    }

    #[test]
    fn patch_with_blank_field_leaves_record_untouched() {
        let mut record = sample_record();
        let patch = WordPatch {
            text: Some("New".to_string()),
            example: Some(" ".to_string()),
            ..WordPatch::default()
        };
        let err = patch.apply(&mut record).unwrap_err();
        assert_eq!(err, WordValidationError::MissingField(WordField::Example));
        assert_eq!(record, sample_record());
    }

    #[test]
    fn date_format_and_parse_agree() {
        let at = Utc.with_ymd_and_hms(2023, 7, 5, 12, 0, 0).unwrap();
        let formatted = format_word_date(&at);
        assert_eq!(formatted, "05 Jul 2023");
        assert!(is_word_date(&formatted));
        assert!(!is_word_date("5 Jul 2023"));
        assert!(!is_word_date("2023-07-05"));

        let expected = NaiveDate::from_ymd_opt(2023, 7, 5);
        assert_eq!(parse_word_date("05 Jul 2023"), expected);
        assert_eq!(parse_word_date("05/07/2023"), expected);
        assert_eq!(parse_word_date("2023-07-05"), expected);
        assert_eq!(parse_word_date("someday"), None);
    }
}
