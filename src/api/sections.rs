//! Metadata sections shared by every chart family.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::core::wire::{WireObject, WireValue, type_error};
use crate::core::{ColumnType, NumberDivisor, UploadMethod};
use crate::error::{ChartError, ChartResult};

/// `metadata.describe`: texts shown around the chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Describe {
    pub intro: String,
    pub byline: String,
    pub source_name: String,
    pub source_url: String,
    pub aria_description: String,
    pub hide_title: bool,
    pub number_format: String,
    pub number_divisor: i64,
    pub number_prepend: String,
    pub number_append: String,
}

impl Default for Describe {
    fn default() -> Self {
        Self {
            intro: String::new(),
            byline: String::new(),
            source_name: String::new(),
            source_url: String::new(),
            aria_description: String::new(),
            hide_title: false,
            number_format: "-".to_owned(),
            number_divisor: 0,
            number_prepend: String::new(),
            number_append: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Sharing {
    pub enabled: bool,
    pub url: String,
    pub auto: bool,
}

/// Family-independent part of `metadata.visualize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseVisualize {
    #[serde(rename = "dark-mode-invert")]
    pub dark_mode_invert: bool,
    pub sharing: Sharing,
}

impl Default for BaseVisualize {
    fn default() -> Self {
        Self {
            dark_mode_invert: true,
            sharing: Sharing::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Logo {
    pub id: String,
    pub enabled: bool,
}

/// Footer blocks offered next to a published chart.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PublishBlocks {
    pub get_the_data: bool,
    pub download_image: bool,
    pub download_pdf: bool,
    pub download_svg: bool,
    pub embed: bool,
    pub logo: Logo,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Publish {
    #[serde(rename = "autoDarkMode")]
    pub auto_dark_mode: bool,
    #[serde(rename = "force-attribution")]
    pub force_attribution: bool,
    pub blocks: PublishBlocks,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotate {
    pub notes: String,
}

/// `metadata.data`: how the uploaded table is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Transform {
    pub transpose: bool,
    pub vertical_header: bool,
    pub horizontal_header: bool,
    pub column_order: Vec<i64>,
    pub column_format: ColumnFormatList,
    pub external_data: String,
    pub use_datawrapper_cdn: bool,
    pub upload_method: UploadMethod,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            transpose: false,
            vertical_header: true,
            horizontal_header: true,
            column_order: Vec::new(),
            column_format: ColumnFormatList::default(),
            external_data: String::new(),
            use_datawrapper_cdn: true,
            upload_method: UploadMethod::Copy,
        }
    }
}

/// Per-column overrides of type, visibility and number formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFormat {
    pub column: String,
    pub column_type: ColumnType,
    pub ignore: bool,
    pub number_prepend: String,
    pub number_append: String,
    pub number_divisor: NumberDivisor,
    pub number_format: String,
}

impl ColumnFormat {
    pub fn new(column: impl Into<String>) -> ChartResult<Self> {
        let column = column.into();
        if column.is_empty() {
            return Err(ChartError::Validation(
                "column format requires a non-empty column name".to_owned(),
            ));
        }
        Ok(Self {
            column,
            column_type: ColumnType::Auto,
            ignore: false,
            number_prepend: String::new(),
            number_append: String::new(),
            number_divisor: NumberDivisor::NoChange,
            number_format: "-".to_owned(),
        })
    }

    #[must_use]
    pub fn with_type(mut self, column_type: ColumnType) -> Self {
        self.column_type = column_type;
        self
    }

    #[must_use]
    pub fn ignored(mut self) -> Self {
        self.ignore = true;
        self
    }

    #[must_use]
    pub fn with_divisor(mut self, divisor: NumberDivisor) -> Self {
        self.number_divisor = divisor;
        self
    }

    #[must_use]
    pub fn with_number_format(mut self, format: impl Into<String>) -> Self {
        self.number_format = format.into();
        self
    }

    #[must_use]
    pub fn with_affixes(mut self, prepend: impl Into<String>, append: impl Into<String>) -> Self {
        self.number_prepend = prepend.into();
        self.number_append = append.into();
        self
    }

    /// `true` when no field differs from its default.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.to_wire().is_empty()
    }

    /// Only fields that differ from their defaults.
    #[must_use]
    pub fn to_wire(&self) -> Map<String, Value> {
        let mut out = Map::new();
        if self.column_type != ColumnType::Auto {
            out.insert("type".to_owned(), self.column_type.to_wire());
        }
        if self.ignore {
            out.insert("ignore".to_owned(), Value::Bool(true));
        }
        if !self.number_prepend.is_empty() {
            out.insert("number-prepend".to_owned(), self.number_prepend.to_wire());
        }
        if !self.number_append.is_empty() {
            out.insert("number-append".to_owned(), self.number_append.to_wire());
        }
        if self.number_divisor != NumberDivisor::NoChange {
            out.insert("number-divisor".to_owned(), self.number_divisor.to_wire());
        }
        if self.number_format != "-" {
            out.insert("number-format".to_owned(), self.number_format.to_wire());
        }
        out
    }

    pub fn from_wire(column: impl Into<String>, value: &Value) -> ChartResult<Self> {
        let object = WireObject::new(Some(value));
        let mut format = Self::new(column)?;
        object.copy("type", &mut format.column_type)?;
        object.copy("ignore", &mut format.ignore)?;
        object.copy("number-prepend", &mut format.number_prepend)?;
        object.copy("number-append", &mut format.number_append)?;
        object.copy("number-divisor", &mut format.number_divisor)?;
        object.copy("number-format", &mut format.number_format)?;
        Ok(format)
    }
}

/// Ordered column formats, sent as an object keyed by column name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnFormatList(pub Vec<ColumnFormat>);

impl ColumnFormatList {
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&ColumnFormat> {
        self.0.iter().find(|format| format.column == column)
    }

    pub fn get_mut(&mut self, column: &str) -> Option<&mut ColumnFormat> {
        self.0.iter_mut().find(|format| format.column == column)
    }

    /// Entry for `column`, appended with defaults when missing.
    pub fn entry(&mut self, column: &str) -> ChartResult<&mut ColumnFormat> {
        let index = match self.0.iter().position(|format| format.column == column) {
            Some(index) => index,
            None => {
                self.0.push(ColumnFormat::new(column)?);
                self.0.len() - 1
            }
        };
        Ok(&mut self.0[index])
    }

    pub fn remove(&mut self, column: &str) -> Option<ColumnFormat> {
        let index = self.0.iter().position(|format| format.column == column)?;
        Some(self.0.remove(index))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Records with every field at its default are skipped.
    #[must_use]
    pub fn to_wire(&self) -> Value {
        let mut out = Map::new();
        for format in &self.0 {
            let record = format.to_wire();
            if !record.is_empty() {
                out.insert(format.column.clone(), Value::Object(record));
            }
        }
        Value::Object(out)
    }

    /// Accepts the keyed object or a list of records carrying `column`.
    pub fn from_wire(value: &Value) -> ChartResult<Self> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(map) => map
                .iter()
                .map(|(column, record)| ColumnFormat::from_wire(column.as_str(), record))
                .collect::<ChartResult<Vec<_>>>()
                .map(Self),
            Value::Array(items) => items
                .iter()
                .map(|record| {
                    let column: String = WireObject::new(Some(record))
                        .read("column")?
                        .unwrap_or_default();
                    ColumnFormat::from_wire(column, record)
                })
                .collect::<ChartResult<Vec<_>>>()
                .map(Self),
            other => Err(type_error("a column-format object or list", other)),
        }
    }
}

impl From<Vec<ColumnFormat>> for ColumnFormatList {
    fn from(formats: Vec<ColumnFormat>) -> Self {
        Self(formats)
    }
}

impl Serialize for ColumnFormatList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_wire().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ColumnFormatList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Self::from_wire(&raw).map_err(serde::de::Error::custom)
    }
}

/// Reads a section object, treating `null` members as absent.
pub(crate) fn read_section<T: DeserializeOwned + Default>(
    name: &str,
    value: Option<&Value>,
) -> ChartResult<T> {
    let Some(value) = value.filter(|value| !value.is_null()) else {
        return Ok(T::default());
    };
    serde_json::from_value(strip_nulls(value)).map_err(|e| {
        ChartError::Validation(format!("invalid `{name}` section: {e}"))
    })
}

fn strip_nulls(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(_, member)| !member.is_null())
                .map(|(key, member)| (key.clone(), strip_nulls(member)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Serializes a section into its JSON object form.
pub(crate) fn write_section<T: Serialize>(section: &T) -> Map<String, Value> {
    match serde_json::to_value(section) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}
