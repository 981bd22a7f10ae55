//! Text and range annotations overlaid on a chart.
//!
//! The service keys annotations by opaque id; the client keeps an ordered list
//! with the id folded into each record. Serialized records carry no id.

use serde_json::{Map, Value, json};

use crate::error::{ChartError, ChartResult};

use super::wire::{WireObject, WireValue, put, type_error};
use super::{
    ArrowHead, ConnectorLineType, RangeAxis, RangeDisplay, Scalar, StrokeType, StrokeWidth,
    TextAlign,
};

/// Line linking a text annotation to its target. Present means enabled.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorLine {
    pub line_type: ConnectorLineType,
    pub circle: bool,
    pub stroke: StrokeWidth,
    pub arrow_head: ArrowHead,
    pub circle_style: StrokeType,
    pub circle_radius: i64,
    pub inherit_color: bool,
    pub target_padding: i64,
}

impl Default for ConnectorLine {
    fn default() -> Self {
        Self {
            line_type: ConnectorLineType::Straight,
            circle: false,
            stroke: StrokeWidth::Thin,
            arrow_head: ArrowHead::Lines,
            circle_style: StrokeType::Solid,
            circle_radius: 15,
            inherit_color: false,
            target_padding: 4,
        }
    }
}

impl ConnectorLine {
    #[must_use]
    pub fn with_type(mut self, line_type: ConnectorLineType) -> Self {
        self.line_type = line_type;
        self
    }

    #[must_use]
    pub fn with_circle(mut self, circle: bool) -> Self {
        self.circle = circle;
        self
    }

    #[must_use]
    pub fn with_arrow_head(mut self, arrow_head: ArrowHead) -> Self {
        self.arrow_head = arrow_head;
        self
    }

    #[must_use]
    pub fn with_stroke(mut self, stroke: StrokeWidth) -> Self {
        self.stroke = stroke;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.circle_style == StrokeType::Dotted {
            return Err(ChartError::Validation(
                "connector line circle style must be `solid` or `dashed`".to_owned(),
            ));
        }
        if self.circle_radius < 0 || self.target_padding < 0 {
            return Err(ChartError::Validation(
                "connector line radius and padding must be >= 0".to_owned(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn to_wire(&self) -> Value {
        json!({
            "enabled": true,
            "type": self.line_type.as_str(),
            "circle": self.circle,
            "stroke": self.stroke.to_wire(),
            "arrowHead": self.arrow_head.to_wire(),
            "circleStyle": self.circle_style.as_str(),
            "circleRadius": self.circle_radius,
            "inheritColor": self.inherit_color,
            "targetPadding": self.target_padding,
        })
    }

    /// Parses an explicit connector line; `enabled: false` is rejected.
    pub fn from_wire(value: &Value) -> ChartResult<Self> {
        let object = WireObject::new(Some(value));
        if !object.is_object() {
            return Err(type_error("a connector line object", value));
        }
        if !object.read_or("enabled", true)? {
            return Err(ChartError::Validation(
                "connector line cannot be constructed with enabled=false; omit it instead"
                    .to_owned(),
            ));
        }
        let mut line = Self::default();
        object.copy("type", &mut line.line_type)?;
        object.copy("circle", &mut line.circle)?;
        object.copy("stroke", &mut line.stroke)?;
        object.copy("arrowHead", &mut line.arrow_head)?;
        object.copy("circleStyle", &mut line.circle_style)?;
        object.copy("circleRadius", &mut line.circle_radius)?;
        object.copy("inheritColor", &mut line.inherit_color)?;
        object.copy("targetPadding", &mut line.target_padding)?;
        line.validate()?;
        Ok(line)
    }

    /// Server form: a disabled connector reads as `None`.
    fn from_server(value: Option<&Value>) -> ChartResult<Option<Self>> {
        match value {
            None | Some(Value::Null) => Ok(None),
            Some(value) => {
                let enabled = WireObject::new(Some(value)).read_or("enabled", false)?;
                if enabled {
                    Self::from_wire(value).map(Some)
                } else {
                    Ok(None)
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextAnnotation {
    pub id: Option<String>,
    pub text: String,
    pub x: Scalar,
    pub y: Scalar,
    /// Draws a background outline behind the text (`bg`).
    pub outline: bool,
    pub dx: i64,
    pub dy: i64,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub size: i64,
    pub align: TextAlign,
    /// Explicit text color; `None` inherits the theme color.
    pub color: Option<String>,
    pub width: f64,
    pub show_mobile: bool,
    pub show_desktop: bool,
    pub mobile_fallback: bool,
    pub connector_line: Option<ConnectorLine>,
}

impl TextAnnotation {
    pub fn new(
        text: impl Into<String>,
        x: impl Into<Scalar>,
        y: impl Into<Scalar>,
    ) -> ChartResult<Self> {
        let annotation = Self {
            id: None,
            text: text.into(),
            x: x.into(),
            y: y.into(),
            outline: true,
            dx: 0,
            dy: 0,
            bold: false,
            italic: false,
            underline: false,
            size: 14,
            align: TextAlign::TopLeft,
            color: None,
            width: 33.3,
            show_mobile: true,
            show_desktop: true,
            mobile_fallback: false,
            connector_line: None,
        };
        annotation.validate()?;
        Ok(annotation)
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_offset(mut self, dx: i64, dy: i64) -> Self {
        self.dx = dx;
        self.dy = dy;
        self
    }

    #[must_use]
    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    #[must_use]
    pub fn with_connector_line(mut self, line: ConnectorLine) -> Self {
        self.connector_line = Some(line);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::Validation(
                "text annotation requires non-empty text".to_owned(),
            ));
        }
        if !(0.0..=100.0).contains(&self.width) {
            return Err(ChartError::Validation(format!(
                "text annotation width {} must be between 0 and 100",
                self.width
            )));
        }
        if let Some(line) = &self.connector_line {
            line.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn to_wire(&self) -> Map<String, Value> {
        let mut out = Map::new();
        put(&mut out, "bg", &self.outline);
        put(&mut out, "dx", &self.dx);
        put(&mut out, "dy", &self.dy);
        put(&mut out, "bold", &self.bold);
        put(&mut out, "size", &self.size);
        put(&mut out, "text", &self.text);
        put(&mut out, "align", &self.align);
        out.insert(
            "color".to_owned(),
            self.color
                .as_ref()
                .map_or(Value::Bool(false), |color| Value::String(color.clone())),
        );
        put(&mut out, "width", &self.width);
        put(&mut out, "italic", &self.italic);
        out.insert(
            "position".to_owned(),
            json!({ "x": self.x.to_value(), "y": self.y.to_value() }),
        );
        put(&mut out, "underline", &self.underline);
        put(&mut out, "showMobile", &self.show_mobile);
        put(&mut out, "showDesktop", &self.show_desktop);
        put(&mut out, "mobileFallback", &self.mobile_fallback);
        out.insert(
            "connectorLine".to_owned(),
            self.connector_line
                .as_ref()
                .map_or_else(|| json!({ "enabled": false }), ConnectorLine::to_wire),
        );
        out
    }

    /// Reads one record; position comes from `position.{x,y}` or top-level `x`/`y`.
    pub fn from_wire(id: Option<String>, value: &Value) -> ChartResult<Self> {
        let object = WireObject::new(Some(value));
        if !object.is_object() {
            return Err(type_error("a text annotation object", value));
        }
        let position = object.object("position");
        let x = position
            .read::<Scalar>("x")?
            .or(object.read("x")?)
            .ok_or_else(|| missing("text annotation", "x"))?;
        let y = position
            .read::<Scalar>("y")?
            .or(object.read("y")?)
            .ok_or_else(|| missing("text annotation", "y"))?;
        let text: String = object.read("text")?.unwrap_or_default();

        let mut annotation = Self::new(text, x, y)?;
        annotation.id = id.or(object.read("id")?);
        object.copy("bg", &mut annotation.outline)?;
        object.copy("dx", &mut annotation.dx)?;
        object.copy("dy", &mut annotation.dy)?;
        object.copy("bold", &mut annotation.bold)?;
        object.copy("italic", &mut annotation.italic)?;
        object.copy("underline", &mut annotation.underline)?;
        object.copy("size", &mut annotation.size)?;
        object.copy("align", &mut annotation.align)?;
        annotation.color = match object.get("color") {
            None | Some(Value::Null) | Some(Value::Bool(false)) => None,
            Some(Value::String(color)) => Some(color.clone()),
            Some(other) => return Err(type_error("a color string or false", other)),
        };
        object.copy("width", &mut annotation.width)?;
        object.copy("showMobile", &mut annotation.show_mobile)?;
        object.copy("showDesktop", &mut annotation.show_desktop)?;
        object.copy("mobileFallback", &mut annotation.mobile_fallback)?;
        annotation.connector_line = ConnectorLine::from_server(object.get("connectorLine"))?;
        annotation.validate()?;
        Ok(annotation)
    }
}

/// The four concrete range annotation shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeKind {
    XRange,
    YRange,
    XLine,
    YLine,
}

impl RangeKind {
    #[must_use]
    pub fn axis(self) -> RangeAxis {
        match self {
            Self::XRange | Self::XLine => RangeAxis::X,
            Self::YRange | Self::YLine => RangeAxis::Y,
        }
    }

    #[must_use]
    pub fn display(self) -> RangeDisplay {
        match self {
            Self::XRange | Self::YRange => RangeDisplay::Range,
            Self::XLine | Self::YLine => RangeDisplay::Line,
        }
    }

    #[must_use]
    pub fn from_parts(axis: RangeAxis, display: RangeDisplay) -> Self {
        match (axis, display) {
            (RangeAxis::X, RangeDisplay::Range) => Self::XRange,
            (RangeAxis::Y, RangeDisplay::Range) => Self::YRange,
            (RangeAxis::X, RangeDisplay::Line) => Self::XLine,
            (RangeAxis::Y, RangeDisplay::Line) => Self::YLine,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::XRange => "x-range",
            Self::YRange => "y-range",
            Self::XLine => "x-line",
            Self::YLine => "y-line",
        }
    }
}

/// Shaded band or reference line along one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeAnnotation {
    pub id: Option<String>,
    pub axis: RangeAxis,
    pub display: RangeDisplay,
    pub color: String,
    pub opacity: i64,
    pub x0: Option<Scalar>,
    pub x1: Option<Scalar>,
    pub y0: Option<Scalar>,
    pub y1: Option<Scalar>,
    pub stroke_type: StrokeType,
    pub stroke_width: StrokeWidth,
}

impl Default for RangeAnnotation {
    fn default() -> Self {
        Self {
            id: None,
            axis: RangeAxis::X,
            display: RangeDisplay::Range,
            color: "#989898".to_owned(),
            opacity: 50,
            x0: None,
            x1: None,
            y0: None,
            y1: None,
            stroke_type: StrokeType::Solid,
            stroke_width: StrokeWidth::Medium,
        }
    }
}

impl RangeAnnotation {
    /// Unchecked annotation with the given discriminants and no coordinates.
    #[must_use]
    pub fn new(axis: RangeAxis, display: RangeDisplay) -> Self {
        Self {
            axis,
            display,
            ..Self::default()
        }
    }

    /// Starts a builder for one of the four typed shapes.
    #[must_use]
    pub fn builder(kind: RangeKind) -> RangeAnnotationBuilder {
        RangeAnnotationBuilder {
            annotation: Self::new(kind.axis(), kind.display()),
        }
    }

    pub fn x_range(x0: impl Into<Scalar>, x1: impl Into<Scalar>) -> ChartResult<Self> {
        Self::builder(RangeKind::XRange).x0(x0).x1(x1).build()
    }

    pub fn y_range(y0: impl Into<Scalar>, y1: impl Into<Scalar>) -> ChartResult<Self> {
        Self::builder(RangeKind::YRange).y0(y0).y1(y1).build()
    }

    pub fn x_line(x0: impl Into<Scalar>) -> ChartResult<Self> {
        Self::builder(RangeKind::XLine).x0(x0).build()
    }

    pub fn y_line(y0: impl Into<Scalar>) -> ChartResult<Self> {
        Self::builder(RangeKind::YLine).y0(y0).build()
    }

    #[must_use]
    pub fn kind(&self) -> RangeKind {
        RangeKind::from_parts(self.axis, self.display)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !(0..=100).contains(&self.opacity) {
            return Err(ChartError::Validation(format!(
                "range annotation opacity {} must be between 0 and 100",
                self.opacity
            )));
        }
        Ok(())
    }

    /// Checks the coordinates the annotation's kind needs.
    pub fn validate_kind(&self) -> ChartResult<()> {
        let kind = self.kind();
        let required = match kind {
            RangeKind::XRange => vec![("x0", &self.x0), ("x1", &self.x1)],
            RangeKind::YRange => vec![("y0", &self.y0), ("y1", &self.y1)],
            RangeKind::XLine => vec![("x0", &self.x0)],
            RangeKind::YLine => vec![("y0", &self.y0)],
        };
        for (name, value) in required {
            if value.is_none() {
                return Err(missing(kind.name(), name));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn to_wire(&self) -> Map<String, Value> {
        let mut position = Map::new();
        let coordinates = [
            ("x0", &self.x0),
            ("x1", &self.x1),
            ("y0", &self.y0),
            ("y1", &self.y1),
        ];
        for (key, value) in coordinates {
            if let Some(value) = value {
                position.insert(key.to_owned(), value.to_value());
            }
        }
        let mut out = Map::new();
        put(&mut out, "type", &self.axis);
        put(&mut out, "color", &self.color);
        put(&mut out, "display", &self.display);
        put(&mut out, "opacity", &self.opacity);
        out.insert("position".to_owned(), Value::Object(position));
        put(&mut out, "strokeType", &self.stroke_type);
        put(&mut out, "strokeWidth", &self.stroke_width);
        out
    }

    /// Reads one record; coordinates come from `position` or the top level.
    pub fn from_wire(id: Option<String>, value: &Value) -> ChartResult<Self> {
        let object = WireObject::new(Some(value));
        if !object.is_object() {
            return Err(type_error("a range annotation object", value));
        }
        let position = object.object("position");
        let coordinate = |key: &str| -> ChartResult<Option<Scalar>> {
            let nested = position.read::<Option<Scalar>>(key)?.flatten();
            let flat = object.read::<Option<Scalar>>(key)?.flatten();
            Ok(nested.or(flat))
        };

        let mut annotation = Self {
            id: id.or(object.read("id")?),
            x0: coordinate("x0")?,
            x1: coordinate("x1")?,
            y0: coordinate("y0")?,
            y1: coordinate("y1")?,
            ..Self::default()
        };
        object.copy("type", &mut annotation.axis)?;
        object.copy("display", &mut annotation.display)?;
        object.copy("color", &mut annotation.color)?;
        object.copy("opacity", &mut annotation.opacity)?;
        object.copy("strokeType", &mut annotation.stroke_type)?;
        object.copy("strokeWidth", &mut annotation.stroke_width)?;
        annotation.validate()?;
        Ok(annotation)
    }
}

/// Builder enforcing the coordinate rules of a [`RangeKind`].
#[derive(Debug, Clone)]
pub struct RangeAnnotationBuilder {
    annotation: RangeAnnotation,
}

impl RangeAnnotationBuilder {
    #[must_use]
    pub fn x0(mut self, value: impl Into<Scalar>) -> Self {
        self.annotation.x0 = Some(value.into());
        self
    }

    #[must_use]
    pub fn x1(mut self, value: impl Into<Scalar>) -> Self {
        self.annotation.x1 = Some(value.into());
        self
    }

    #[must_use]
    pub fn y0(mut self, value: impl Into<Scalar>) -> Self {
        self.annotation.y0 = Some(value.into());
        self
    }

    #[must_use]
    pub fn y1(mut self, value: impl Into<Scalar>) -> Self {
        self.annotation.y1 = Some(value.into());
        self
    }

    #[must_use]
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.annotation.color = color.into();
        self
    }

    #[must_use]
    pub fn opacity(mut self, opacity: i64) -> Self {
        self.annotation.opacity = opacity;
        self
    }

    #[must_use]
    pub fn stroke(mut self, stroke_type: StrokeType, stroke_width: StrokeWidth) -> Self {
        self.annotation.stroke_type = stroke_type;
        self.annotation.stroke_width = stroke_width;
        self
    }

    pub fn build(self) -> ChartResult<RangeAnnotation> {
        self.annotation.validate()?;
        self.annotation.validate_kind()?;
        Ok(self.annotation)
    }
}

/// Annotation pinned to one panel of a multi-panel chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelAnnotation<A> {
    pub annotation: A,
    /// Panel (data column) the annotation belongs to.
    pub plot: Option<String>,
    pub show_in_all_plots: bool,
}

impl PanelAnnotation<TextAnnotation> {
    /// Text annotations default to a single panel.
    #[must_use]
    pub fn text(annotation: TextAnnotation) -> Self {
        Self {
            annotation,
            plot: None,
            show_in_all_plots: false,
        }
    }
}

impl PanelAnnotation<RangeAnnotation> {
    /// Range annotations default to every panel.
    #[must_use]
    pub fn range(annotation: RangeAnnotation) -> Self {
        Self {
            annotation,
            plot: None,
            show_in_all_plots: true,
        }
    }
}

impl<A> PanelAnnotation<A> {
    #[must_use]
    pub fn in_plot(mut self, plot: impl Into<String>) -> Self {
        self.plot = Some(plot.into());
        self
    }

    fn write_panel(&self, mut record: Map<String, Value>) -> Value {
        if let Some(plot) = &self.plot {
            if let Some(Value::Object(position)) = record.get_mut("position") {
                position.insert("plot".to_owned(), Value::String(plot.clone()));
            }
        }
        record.insert("showInAllPlots".to_owned(), Value::Bool(self.show_in_all_plots));
        Value::Object(record)
    }

    fn read_panel(annotation: A, value: &Value, show_default: bool) -> ChartResult<Self> {
        let object = WireObject::new(Some(value));
        Ok(Self {
            annotation,
            plot: object.object("position").read("plot")?,
            show_in_all_plots: object.read_or("showInAllPlots", show_default)?,
        })
    }
}

fn missing(what: &str, field: &str) -> ChartError {
    ChartError::Validation(format!("{what} requires `{field}` to be set"))
}

/// Splits a server collection into `(id, record)` pairs.
///
/// The server sends an id-keyed object; a plain list (client shape) is also accepted.
fn records(value: Option<&Value>) -> ChartResult<Vec<(Option<String>, &Value)>> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Object(map)) => Ok(map
            .iter()
            .map(|(id, record)| (Some(id.clone()), record))
            .collect()),
        Some(Value::Array(items)) => Ok(items.iter().map(|record| (None, record)).collect()),
        Some(other) => Err(type_error("an annotation object or list", other)),
    }
}

pub fn serialize_text_annotations(annotations: &[TextAnnotation]) -> Value {
    Value::Array(
        annotations
            .iter()
            .map(|annotation| Value::Object(annotation.to_wire()))
            .collect(),
    )
}

pub fn deserialize_text_annotations(value: Option<&Value>) -> ChartResult<Vec<TextAnnotation>> {
    records(value)?
        .into_iter()
        .map(|(id, record)| TextAnnotation::from_wire(id, record))
        .collect()
}

pub fn serialize_range_annotations(annotations: &[RangeAnnotation]) -> Value {
    Value::Array(
        annotations
            .iter()
            .map(|annotation| Value::Object(annotation.to_wire()))
            .collect(),
    )
}

pub fn deserialize_range_annotations(value: Option<&Value>) -> ChartResult<Vec<RangeAnnotation>> {
    records(value)?
        .into_iter()
        .map(|(id, record)| RangeAnnotation::from_wire(id, record))
        .collect()
}

pub fn serialize_panel_text_annotations(annotations: &[PanelAnnotation<TextAnnotation>]) -> Value {
    Value::Array(
        annotations
            .iter()
            .map(|panel| panel.write_panel(panel.annotation.to_wire()))
            .collect(),
    )
}

pub fn deserialize_panel_text_annotations(
    value: Option<&Value>,
) -> ChartResult<Vec<PanelAnnotation<TextAnnotation>>> {
    records(value)?
        .into_iter()
        .map(|(id, record)| {
            let annotation = TextAnnotation::from_wire(id, record)?;
            PanelAnnotation::read_panel(annotation, record, false)
        })
        .collect()
}

pub fn serialize_panel_range_annotations(
    annotations: &[PanelAnnotation<RangeAnnotation>],
) -> Value {
    Value::Array(
        annotations
            .iter()
            .map(|panel| panel.write_panel(panel.annotation.to_wire()))
            .collect(),
    )
}

pub fn deserialize_panel_range_annotations(
    value: Option<&Value>,
) -> ChartResult<Vec<PanelAnnotation<RangeAnnotation>>> {
    records(value)?
        .into_iter()
        .map(|(id, record)| {
            let annotation = RangeAnnotation::from_wire(id, record)?;
            PanelAnnotation::read_panel(annotation, record, true)
        })
        .collect()
}
