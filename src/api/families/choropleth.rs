//! `d3-maps-choropleth`: regions of a basemap colored by a value column.

use indexmap::IndexMap;
use serde_json::{Map, Value, json};

use crate::core::wire::{put, put_some};
use crate::core::{
    AnnotationsGroup, BasemapProjection, ColorMode, ColorScale, ColumnType, KeyColumnType,
    WireObject,
};
use crate::error::{ChartError, ChartResult};

use super::super::registry::ChartType;
use super::super::sections::Transform;
use super::{FamilyModel, FamilyWire, put_column, read_column};

/// Basemap id that switches on the custom projection keys.
pub const CUSTOM_BASEMAP: &str = "custom_upload";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MapTooltip {
    pub title: String,
    pub body: String,
    /// Field name to display label.
    pub fields: IndexMap<String, String>,
}

impl MapTooltip {
    #[must_use]
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            fields: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>, label: impl Into<String>) -> Self {
        self.fields.insert(field.into(), label.into());
        self
    }

    fn to_wire(&self) -> Value {
        let mut out = Map::new();
        put(&mut out, "body", &self.body);
        put(&mut out, "title", &self.title);
        if !self.fields.is_empty() {
            put(&mut out, "fields", &self.fields);
        }
        Value::Object(out)
    }

    fn from_wire(value: Option<&Value>) -> ChartResult<Self> {
        let object = WireObject::new(value);
        Ok(Self {
            title: object.read_or("title", String::new())?,
            body: object.read_or("body", String::new())?,
            fields: object.read_or("fields", IndexMap::new())?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChoroplethMap {
    pub keys_column: Option<String>,
    pub values_column: Option<String>,
    /// Travels as the key column's `type` in `metadata.data.column-format`.
    pub key_column_type: Option<KeyColumnType>,
    pub basemap: String,
    pub map_key_attr: String,
    pub basemap_projection: BasemapProjection,
    pub basemap_regions: String,
    pub tooltip: Option<MapTooltip>,
    pub tooltip_number_format: String,
    pub show_tooltips: bool,
    pub zoomable: bool,
    pub hide_empty_regions: bool,
    pub hide_borders: bool,
    pub color_mode: Option<ColorMode>,
    pub color_steps: Option<i64>,
    pub color_palette: Option<String>,
    pub color_scale: Option<ColorScale>,
    pub color_from: Option<String>,
    pub color_to: Option<String>,
    pub annotations: AnnotationsGroup,
}

impl Default for ChoroplethMap {
    fn default() -> Self {
        Self {
            keys_column: None,
            values_column: None,
            key_column_type: None,
            basemap: String::new(),
            map_key_attr: String::new(),
            basemap_projection: BasemapProjection::AzimuthalEqualArea,
            basemap_regions: "regions".to_owned(),
            tooltip: None,
            tooltip_number_format: String::new(),
            show_tooltips: true,
            zoomable: false,
            hide_empty_regions: false,
            hide_borders: false,
            color_mode: None,
            color_steps: None,
            color_palette: None,
            color_scale: None,
            color_from: None,
            color_to: None,
            annotations: AnnotationsGroup::default(),
        }
    }
}

impl ChoroplethMap {
    /// Map over `basemap`, matching `keys_column` against the `map_key_attr` feature property.
    #[must_use]
    pub fn new(
        basemap: impl Into<String>,
        map_key_attr: impl Into<String>,
        keys_column: impl Into<String>,
        values_column: impl Into<String>,
    ) -> Self {
        Self {
            basemap: basemap.into(),
            map_key_attr: map_key_attr.into(),
            keys_column: Some(keys_column.into()),
            values_column: Some(values_column.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_key_type(mut self, key_type: KeyColumnType) -> Self {
        self.key_column_type = Some(key_type);
        self
    }

    /// Gradient between two colors; also emits the derived `colorscale` block.
    #[must_use]
    pub fn with_gradient(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.color_from = Some(from.into());
        self.color_to = Some(to.into());
        self
    }

    #[must_use]
    pub fn with_buckets(mut self, steps: i64, scale: ColorScale) -> Self {
        self.color_mode = Some(ColorMode::Buckets);
        self.color_steps = Some(steps);
        self.color_scale = Some(scale);
        self
    }

    #[must_use]
    pub fn with_tooltip(mut self, tooltip: MapTooltip) -> Self {
        self.tooltip = Some(tooltip);
        self
    }

    #[must_use]
    pub fn is_custom_basemap(&self) -> bool {
        self.basemap == CUSTOM_BASEMAP
    }

    /// The block the renderer actually reads colors from; present only with both end colors.
    fn colorscale(&self) -> Option<Value> {
        let (from, to) = (self.color_from.as_ref()?, self.color_to.as_ref()?);
        let interpolation = match self.color_scale {
            Some(ColorScale::Jenks) => "jenks",
            _ => "equidistant",
        };
        let mut block = Map::new();
        block.insert("interpolation".to_owned(), Value::from(interpolation));
        block.insert("stops".to_owned(), Value::from("equidistant"));
        if let Some(mode) = &self.color_mode {
            let mode = if *mode == ColorMode::Buckets {
                "discrete"
            } else {
                "continuous"
            };
            block.insert("mode".to_owned(), Value::from(mode));
        }
        if let Some(steps) = self.color_steps {
            block.insert("stopCount".to_owned(), Value::from(steps));
        }
        block.insert(
            "colors".to_owned(),
            json!([
                { "color": from, "position": 0 },
                { "color": to, "position": 1 },
            ]),
        );
        Some(Value::Object(block))
    }
}

impl FamilyModel for ChoroplethMap {
    const CHART_TYPE: ChartType = ChartType::Choropleth;

    fn write_visualize(&self, visualize: &mut Map<String, Value>) {
        put(visualize, "show-tooltips", &self.show_tooltips);
        put(visualize, "tooltip-number-format", &self.tooltip_number_format);
        put(visualize, "zoomable", &self.zoomable);
        put(visualize, "hide-empty-regions", &self.hide_empty_regions);
        put(visualize, "hide-borders", &self.hide_borders);

        put_some(visualize, "color-mode", self.color_mode.as_ref());
        put_some(visualize, "color-steps", self.color_steps.as_ref());
        put_some(visualize, "color-palette", self.color_palette.as_ref());
        put_some(visualize, "color-scale", self.color_scale.as_ref());
        put_some(visualize, "color-from", self.color_from.as_ref());
        put_some(visualize, "color-to", self.color_to.as_ref());
        if let Some(colorscale) = self.colorscale() {
            visualize.insert("colorscale".to_owned(), colorscale);
        }

        if !self.basemap.is_empty() {
            put(visualize, "basemap", &self.basemap);
        }
        if !self.map_key_attr.is_empty() {
            put(visualize, "map-key-attr", &self.map_key_attr);
        }
        if self.is_custom_basemap() {
            put(visualize, "basemapProjection", &self.basemap_projection);
            put(visualize, "basemapRegions", &self.basemap_regions);
        }
        if let Some(tooltip) = &self.tooltip {
            visualize.insert("tooltip".to_owned(), tooltip.to_wire());
        }
        self.annotations.write_wire(visualize);
    }

    fn axes(&self) -> Option<Map<String, Value>> {
        let mut axes = Map::new();
        put_column(&mut axes, "keys", self.keys_column.as_ref());
        put_column(&mut axes, "values", self.values_column.as_ref());
        (!axes.is_empty()).then_some(axes)
    }

    fn read_wire(wire: FamilyWire<'_>) -> ChartResult<Self> {
        let FamilyWire { visualize, axes } = wire;
        let mut chart = Self {
            keys_column: read_column(axes, "keys")?,
            values_column: read_column(axes, "values")?,
            ..Self::default()
        };

        visualize.copy("basemap", &mut chart.basemap)?;
        visualize.copy("map-key-attr", &mut chart.map_key_attr)?;
        visualize.copy("basemapProjection", &mut chart.basemap_projection)?;
        visualize.copy("basemapRegions", &mut chart.basemap_regions)?;
        if visualize.contains("tooltip") {
            chart.tooltip = Some(MapTooltip::from_wire(visualize.get("tooltip"))?);
        }
        visualize.copy("tooltip-number-format", &mut chart.tooltip_number_format)?;
        visualize.copy("show-tooltips", &mut chart.show_tooltips)?;
        visualize.copy("zoomable", &mut chart.zoomable)?;
        visualize.copy("hide-empty-regions", &mut chart.hide_empty_regions)?;
        visualize.copy("hide-borders", &mut chart.hide_borders)?;

        visualize.copy("color-mode", &mut chart.color_mode)?;
        visualize.copy("color-steps", &mut chart.color_steps)?;
        visualize.copy("color-palette", &mut chart.color_palette)?;
        visualize.copy("color-scale", &mut chart.color_scale)?;
        visualize.copy("color-from", &mut chart.color_from)?;
        visualize.copy("color-to", &mut chart.color_to)?;

        chart.annotations.read_wire(visualize)?;
        Ok(chart)
    }

    fn validate(&self) -> ChartResult<()> {
        if self.key_column_type.is_some()
            && self.keys_column.as_deref().is_none_or(str::is_empty)
        {
            return Err(ChartError::Validation(
                "key column type requires a non-empty keys column".to_owned(),
            ));
        }
        if let Some(steps) = self.color_steps {
            if steps < 1 {
                return Err(ChartError::Validation(format!(
                    "color steps must be at least 1, got {steps}"
                )));
            }
        }
        self.annotations.validate()
    }

    fn write_transform(&self, transform: &mut Transform) {
        let (Some(column), Some(key_type)) = (&self.keys_column, self.key_column_type) else {
            return;
        };
        if let Ok(format) = transform.column_format.entry(column) {
            format.column_type = match key_type {
                KeyColumnType::Text => ColumnType::Text,
                KeyColumnType::Number => ColumnType::Number,
            };
        }
    }

    /// Lifts a text/number type on the keys column into [`Self::key_column_type`].
    fn adopt_transform(&mut self, transform: &mut Transform) {
        let Some(column) = &self.keys_column else {
            return;
        };
        let Some(format) = transform.column_format.get_mut(column) else {
            return;
        };
        self.key_column_type = match format.column_type {
            ColumnType::Text => Some(KeyColumnType::Text),
            ColumnType::Number => Some(KeyColumnType::Number),
            ColumnType::Auto | ColumnType::Date => return,
        };
        format.column_type = ColumnType::Auto;
        if format.is_default() {
            transform.column_format.remove(column);
        }
    }

    family_projection!(Choropleth);
}
