//! Stateless serialize/deserialize pairs, one per API quirk.

use serde_json::{Map, Value, json};

use crate::error::ChartResult;

use super::wire::{WireObject, WireValue, type_error};
use super::{PlotHeightMode, ReplaceFlagsType, Scalar, ValueLabelAlignment, ValueLabelDisplay, ValueLabelPlacement};

/// Emits whole numbers as JSON integers and everything else as floats.
#[must_use]
pub fn number_value(number: f64) -> Value {
    Scalar::from_number(number).to_value()
}

/// `[min, max]` axis ranges where `""` means automatic.
pub mod range_pair {
    use super::*;

    pub type RangePair = [Scalar; 2];

    #[must_use]
    pub fn auto() -> RangePair {
        [Scalar::auto(), Scalar::auto()]
    }

    /// Anything other than exactly two values serializes as `["", ""]`.
    #[must_use]
    pub fn serialize(values: &[Scalar]) -> Value {
        match values {
            [min, max] => Value::Array(vec![min.to_value(), max.to_value()]),
            _ => Value::Array(vec![Value::from(""), Value::from("")]),
        }
    }

    /// Pads or truncates to two values, coercing numeric strings.
    pub fn deserialize(value: Option<&Value>) -> ChartResult<RangePair> {
        let items = match value {
            None | Some(Value::Null) => return Ok(auto()),
            Some(Value::Array(items)) => items,
            Some(other) => return Err(type_error("a range array", other)),
        };
        let mut parsed = items.iter().take(2).map(|item| match item {
            Value::String(raw) => Ok(Scalar::coerce(raw)),
            other => Scalar::from_value(other),
        });
        let min = parsed.next().transpose()?.unwrap_or_default();
        let max = parsed.next().transpose()?.unwrap_or_default();
        Ok([min, max])
    }
}

/// Custom tick lists carried as a comma-joined string.
pub mod tick_list {
    use super::*;

    #[must_use]
    pub fn serialize(ticks: &[Scalar]) -> Value {
        let joined = ticks
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        Value::String(joined)
    }

    pub fn deserialize(value: Option<&Value>) -> ChartResult<Vec<Scalar>> {
        let raw = match value {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::String(raw)) => raw,
            Some(Value::Array(items)) => {
                return items.iter().map(Scalar::from_value).collect();
            }
            Some(other) => return Err(type_error("a comma-separated string", other)),
        };
        if raw.is_empty() {
            return Ok(Vec::new());
        }
        Ok(raw.split(',').map(|item| Scalar::coerce(item.trim())).collect())
    }
}

/// `{enabled, value}` objects collapsed into an optional value.
pub mod flag_value {
    use super::*;

    #[must_use]
    pub fn serialize(value: Option<&str>) -> Value {
        json!({
            "value": value.unwrap_or_default(),
            "enabled": value.is_some(),
        })
    }

    /// A disabled flag always yields `None`, whatever value was stored.
    pub fn deserialize(value: Option<&Value>) -> ChartResult<Option<String>> {
        let object = WireObject::new(value);
        if !object.read_or("enabled", false)? {
            return Ok(None);
        }
        Ok(Some(object.read_or("value", String::new())?))
    }
}

/// `{enabled, style}` objects collapsed into a style with an `"off"` sentinel.
pub mod replace_flags {
    use super::*;

    #[must_use]
    pub fn serialize(style: &ReplaceFlagsType) -> Value {
        let enabled = *style != ReplaceFlagsType::Off;
        json!({
            "enabled": enabled,
            "style": if enabled { style.as_str() } else { "" },
        })
    }

    pub fn deserialize(value: Option<&Value>) -> ChartResult<ReplaceFlagsType> {
        let object = WireObject::new(value);
        let enabled = object.read_or("enabled", false)?;
        let style: String = object.read_or("style", String::new())?;
        if !enabled || style.is_empty() {
            return Ok(ReplaceFlagsType::Off);
        }
        Ok(ReplaceFlagsType::from(style))
    }
}

/// Plot height stored as three sibling visualize keys.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotHeight {
    pub mode: PlotHeightMode,
    pub fixed: f64,
    pub ratio: f64,
}

impl Default for PlotHeight {
    fn default() -> Self {
        Self {
            mode: PlotHeightMode::Fixed,
            fixed: 300.0,
            ratio: 0.5,
        }
    }
}

impl PlotHeight {
    pub fn write(&self, visualize: &mut Map<String, Value>) {
        visualize.insert("plotHeightMode".to_owned(), self.mode.to_wire());
        visualize.insert("plotHeightFixed".to_owned(), number_value(self.fixed));
        visualize.insert("plotHeightRatio".to_owned(), number_value(self.ratio));
    }

    /// Copies only the keys present in `visualize`.
    pub fn read(&mut self, visualize: WireObject<'_>) -> ChartResult<()> {
        visualize.copy("plotHeightMode", &mut self.mode)?;
        visualize.copy("plotHeightFixed", &mut self.fixed)?;
        visualize.copy("plotHeightRatio", &mut self.ratio)?;
        Ok(())
    }
}

/// Category colors plus their optional legend tweaks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColorCategory {
    pub map: indexmap::IndexMap<String, String>,
    pub labels: indexmap::IndexMap<String, String>,
    pub order: Vec<String>,
    pub exclude_from_key: Vec<String>,
}

impl ColorCategory {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Optional collections are emitted only when non-empty.
    #[must_use]
    pub fn serialize(&self) -> Value {
        let mut out = Map::new();
        out.insert("map".to_owned(), self.map.to_wire());
        if !self.exclude_from_key.is_empty() {
            out.insert("excludeFromKey".to_owned(), self.exclude_from_key.to_wire());
        }
        if !self.labels.is_empty() {
            out.insert("categoryLabels".to_owned(), self.labels.to_wire());
        }
        if !self.order.is_empty() {
            out.insert("categoryOrder".to_owned(), self.order.to_wire());
        }
        Value::Object(out)
    }

    /// Always yields all four collections, empty when absent.
    pub fn deserialize(value: Option<&Value>) -> ChartResult<Self> {
        let object = WireObject::new(value);
        Ok(Self {
            map: object.read_or("map", Default::default())?,
            labels: object.read_or("categoryLabels", Default::default())?,
            order: object.read_or("categoryOrder", Vec::new())?,
            exclude_from_key: object.read_or("excludeFromKey", Vec::new())?,
        })
    }
}

/// `show-value-labels` boolean with sibling format and alignment keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatValueLabels {
    pub show: bool,
    pub format: String,
    pub alignment: ValueLabelAlignment,
}

impl Default for FlatValueLabels {
    fn default() -> Self {
        Self {
            show: true,
            format: String::new(),
            alignment: ValueLabelAlignment::Left,
        }
    }
}

impl FlatValueLabels {
    /// An empty format is left out.
    pub fn write(&self, visualize: &mut Map<String, Value>) {
        visualize.insert("show-value-labels".to_owned(), Value::Bool(self.show));
        value_label_format::write(&self.format, visualize);
        visualize.insert("value-label-alignment".to_owned(), self.alignment.to_wire());
    }

    pub fn read(&mut self, visualize: WireObject<'_>) -> ChartResult<()> {
        visualize.copy("show-value-labels", &mut self.show)?;
        visualize.copy("value-label-format", &mut self.format)?;
        visualize.copy("value-label-alignment", &mut self.alignment)?;
        Ok(())
    }
}

/// `valueLabels: {show, format, enabled, placement}` plus `value-labels-always`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestedValueLabels {
    pub show: ValueLabelDisplay,
    pub format: String,
    pub placement: ValueLabelPlacement,
}

impl Default for NestedValueLabels {
    fn default() -> Self {
        Self {
            show: ValueLabelDisplay::Hover,
            format: String::new(),
            placement: ValueLabelPlacement::Outside,
        }
    }
}

impl NestedValueLabels {
    #[must_use]
    pub fn always(&self) -> bool {
        self.show == ValueLabelDisplay::Always
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.show != ValueLabelDisplay::Off
    }

    pub fn write(&self, visualize: &mut Map<String, Value>) {
        let show = if self.enabled() { self.show.as_str() } else { "" };
        visualize.insert(
            "valueLabels".to_owned(),
            json!({
                "show": show,
                "format": self.format,
                "enabled": self.enabled(),
                "placement": self.placement.as_str(),
            }),
        );
        value_label_format::write(&self.format, visualize);
        if self.always() {
            visualize.insert("value-labels-always".to_owned(), Value::Bool(true));
        }
    }

    /// `enabled=false` wins over everything, then a non-empty `show` string, and
    /// only when `show` is absent does `value-labels-always` decide.
    pub fn read(&mut self, visualize: WireObject<'_>) -> ChartResult<()> {
        let nested = visualize.object("valueLabels");
        let enabled = nested.read_or("enabled", true)?;
        self.show = if !enabled {
            ValueLabelDisplay::Off
        } else if let Some(show) = nested.read::<String>("show")? {
            if show.is_empty() {
                ValueLabelDisplay::Off
            } else {
                ValueLabelDisplay::from(show)
            }
        } else if visualize.read_or("value-labels-always", false)? {
            ValueLabelDisplay::Always
        } else {
            ValueLabelDisplay::Hover
        };
        self.format = nested.read_or("format", String::new())?;
        self.placement = nested.read_or("placement", ValueLabelPlacement::Outside)?;
        Ok(())
    }
}

/// A lone `value-label-format` string, with `value-labels-format` accepted on read.
pub mod value_label_format {
    use super::*;

    pub fn write(format: &str, visualize: &mut Map<String, Value>) {
        if !format.is_empty() {
            visualize.insert("value-label-format".to_owned(), Value::String(format.to_owned()));
        }
    }

    pub fn read(visualize: WireObject<'_>) -> ChartResult<String> {
        match visualize.read("value-label-format")? {
            Some(format) => Ok(format),
            None => visualize.read_or("value-labels-format", String::new()),
        }
    }
}
