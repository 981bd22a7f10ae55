use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::debug;

use crate::core::WireObject;
use crate::error::{ChartError, ChartResult};

use super::data::DataTable;
use super::families::{ChartFamily, FamilyModel, FamilyWire};
use super::registry::ChartType;
use super::sections::{
    Annotate, BaseVisualize, Describe, Publish, Transform, read_section, write_section,
};
use super::validation::validate_chart;

pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Server-owned chart facts. Read from responses, never sent back.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServerInfo {
    pub public_url: Option<String>,
    pub public_version: i64,
    pub folder_id: Option<i64>,
    pub author_id: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub last_modified_at: Option<DateTime<Utc>>,
    pub published_at: Option<DateTime<Utc>>,
}

impl ServerInfo {
    /// `None` when the response carries none of the server-owned keys.
    pub fn from_response(response: &Value) -> ChartResult<Option<Self>> {
        let object = WireObject::new(Some(response));
        const KEYS: [&str; 7] = [
            "publicUrl",
            "publicVersion",
            "folderId",
            "authorId",
            "createdAt",
            "lastModifiedAt",
            "publishedAt",
        ];
        if !KEYS.iter().any(|key| object.contains(key)) {
            return Ok(None);
        }
        Ok(Some(Self {
            public_url: object.read::<Option<String>>("publicUrl")?.flatten(),
            public_version: object.read::<Option<i64>>("publicVersion")?.flatten().unwrap_or(0),
            folder_id: object.read::<Option<i64>>("folderId")?.flatten(),
            author_id: object.read::<Option<i64>>("authorId")?.flatten(),
            created_at: timestamp(object, "createdAt")?,
            last_modified_at: timestamp(object, "lastModifiedAt")?,
            published_at: timestamp(object, "publishedAt")?,
        }))
    }

    #[must_use]
    pub fn is_published(&self) -> bool {
        self.public_version > 0
    }
}

fn timestamp(object: WireObject<'_>, key: &str) -> ChartResult<Option<DateTime<Utc>>> {
    let Some(raw) = object.read::<Option<String>>(key)?.flatten() else {
        return Ok(None);
    };
    DateTime::parse_from_rfc3339(&raw)
        .map(|parsed| Some(parsed.with_timezone(&Utc)))
        .map_err(|e| ChartError::InvalidResponse(format!("`{key}` is not a timestamp: {e}")))
}

/// A complete chart: shared sections plus exactly one family.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    /// Assigned by the service on creation.
    pub chart_id: Option<String>,
    pub title: String,
    pub language: String,
    pub theme: String,
    pub data: DataTable,
    pub transform: Transform,
    pub describe: Describe,
    pub visualize: BaseVisualize,
    pub publish: Publish,
    pub annotate: Annotate,
    /// Free-form `metadata.custom` passed through untouched.
    pub custom: IndexMap<String, Value>,
    pub family: ChartFamily,
    pub server: Option<ServerInfo>,
}

impl ChartConfig {
    #[must_use]
    pub fn new(family: impl Into<ChartFamily>) -> Self {
        Self {
            chart_id: None,
            title: String::new(),
            language: DEFAULT_LANGUAGE.to_owned(),
            theme: String::new(),
            data: DataTable::default(),
            transform: Transform::default(),
            describe: Describe::default(),
            visualize: BaseVisualize::default(),
            publish: Publish::default(),
            annotate: Annotate::default(),
            custom: IndexMap::new(),
            family: family.into(),
            server: None,
        }
    }

    /// Chart of `chart_type` with every family field at its default.
    #[must_use]
    pub fn of_type(chart_type: ChartType) -> Self {
        Self::new(ChartFamily::default_for(chart_type))
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    #[must_use]
    pub fn with_data(mut self, data: DataTable) -> Self {
        self.data = data;
        self
    }

    #[must_use]
    pub fn with_describe(mut self, describe: Describe) -> Self {
        self.describe = describe;
        self
    }

    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.annotate.notes = notes.into();
        self
    }

    #[must_use]
    pub fn chart_type(&self) -> ChartType {
        self.family.chart_type()
    }

    /// Family settings when the chart is of family `F`.
    #[must_use]
    pub fn family_as<F: FamilyModel>(&self) -> Option<&F> {
        F::project(&self.family)
    }

    pub fn family_as_mut<F: FamilyModel>(&mut self) -> Option<&mut F> {
        F::project_mut(&mut self.family)
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_chart(self)
    }

    /// Builds the request payload. Pure; server-owned fields are never written.
    #[must_use]
    pub fn serialize_model(&self) -> Value {
        let mut root = Map::new();
        root.insert(
            "type".to_owned(),
            Value::String(self.chart_type().as_str().to_owned()),
        );
        root.insert("title".to_owned(), Value::String(self.title.clone()));
        root.insert("language".to_owned(), Value::String(self.language.clone()));
        if !self.theme.is_empty() {
            root.insert("theme".to_owned(), Value::String(self.theme.clone()));
        }

        let mut transform = self.transform.clone();
        self.family.write_transform(&mut transform);

        let mut visualize = write_section(&self.visualize);
        self.family.write_visualize(&mut visualize);

        let mut metadata = Map::new();
        metadata.insert("data".to_owned(), Value::Object(write_section(&transform)));
        metadata.insert(
            "describe".to_owned(),
            Value::Object(write_section(&self.describe)),
        );
        metadata.insert("visualize".to_owned(), Value::Object(visualize));
        metadata.insert(
            "publish".to_owned(),
            Value::Object(write_section(&self.publish)),
        );
        metadata.insert(
            "annotate".to_owned(),
            Value::Object(write_section(&self.annotate)),
        );
        metadata.insert(
            "custom".to_owned(),
            Value::Object(self.custom.clone().into_iter().collect()),
        );
        if let Some(axes) = self.family.axes() {
            metadata.insert("axes".to_owned(), Value::Object(axes));
        }
        root.insert("metadata".to_owned(), Value::Object(metadata));
        Value::Object(root)
    }

    /// Parses an API response of any supported family.
    pub fn deserialize_model(response: &Value) -> ChartResult<Self> {
        let chart_type = ChartType::of_response(response)?;
        Self::read_response(chart_type, response)
    }

    /// Parses an API response, requiring it to be of `expected` type.
    pub fn deserialize_as(expected: ChartType, response: &Value) -> ChartResult<Self> {
        let actual = match response.get("type") {
            Some(Value::String(raw)) => raw.as_str(),
            _ => return Err(ChartError::MissingChartType),
        };
        if actual != expected.as_str() {
            return Err(ChartError::TypeMismatch {
                expected: expected.as_str().to_owned(),
                actual: actual.to_owned(),
            });
        }
        Self::read_response(expected, response)
    }

    fn read_response(chart_type: ChartType, response: &Value) -> ChartResult<Self> {
        if !response.is_object() {
            return Err(ChartError::InvalidResponse(format!(
                "expected a chart object, got `{response}`"
            )));
        }
        let root = WireObject::new(Some(response));
        let metadata = root.object("metadata");

        // Older responses carry the column bindings at the root.
        let axes = if metadata.object("axes").is_object() {
            metadata.object("axes")
        } else {
            root.object("axes")
        };
        let wire = FamilyWire {
            visualize: metadata.object("visualize"),
            axes,
        };
        let mut family = ChartFamily::read_wire(chart_type, wire)?;

        let mut transform: Transform = read_section("data", metadata.get("data"))?;
        family.adopt_transform(&mut transform);

        let custom = match metadata.get("custom") {
            Some(Value::Object(map)) => map.clone().into_iter().collect(),
            _ => IndexMap::new(),
        };

        let chart = Self {
            chart_id: root.read::<Option<String>>("id")?.flatten(),
            title: root.read::<Option<String>>("title")?.flatten().unwrap_or_default(),
            language: root
                .read::<Option<String>>("language")?
                .flatten()
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_owned()),
            theme: root.read::<Option<String>>("theme")?.flatten().unwrap_or_default(),
            data: DataTable::default(),
            transform,
            describe: read_section("describe", metadata.get("describe"))?,
            visualize: read_section("visualize", metadata.get("visualize"))?,
            publish: read_section("publish", metadata.get("publish"))?,
            annotate: read_section("annotate", metadata.get("annotate"))?,
            custom,
            family,
            server: ServerInfo::from_response(response)?,
        };
        chart.validate()?;
        debug!(
            chart_type = chart_type.as_str(),
            chart_id = chart.chart_id.as_deref().unwrap_or(""),
            "deserialized chart response"
        );
        Ok(chart)
    }
}
