//! Field groups shared by several chart families.
//!
//! Each group writes and reads only its own visualize keys. Families call the
//! groups in a fixed order and then merge their own keys, which win on collision.

use serde_json::{Map, Value};

use crate::error::ChartResult;

use super::annotations::{
    RangeAnnotation, TextAnnotation, deserialize_range_annotations, deserialize_text_annotations,
    serialize_range_annotations, serialize_text_annotations,
};
use super::transcoders::range_pair::{self, RangePair};
use super::transcoders::tick_list;
use super::wire::{WireObject, put_some};
use super::{GridDisplay, Scalar};

/// `x-grid` / `y-grid`; `None` leaves the key out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridDisplayGroup {
    pub x: Option<GridDisplay>,
    pub y: Option<GridDisplay>,
}

impl Default for GridDisplayGroup {
    fn default() -> Self {
        Self {
            x: Some(GridDisplay::Off),
            y: Some(GridDisplay::On),
        }
    }
}

impl GridDisplayGroup {
    pub fn write_wire(&self, visualize: &mut Map<String, Value>) {
        put_some(visualize, "x-grid", self.x.as_ref());
        put_some(visualize, "y-grid", self.y.as_ref());
    }

    pub fn read_wire(&mut self, visualize: WireObject<'_>) -> ChartResult<()> {
        read_grid(visualize, "x-grid", &mut self.x)?;
        read_grid(visualize, "y-grid", &mut self.y)
    }
}

/// Grid values may arrive as booleans from older charts.
fn read_grid(
    visualize: WireObject<'_>,
    key: &str,
    target: &mut Option<GridDisplay>,
) -> ChartResult<()> {
    match visualize.get(key) {
        Some(Value::Bool(enabled)) => *target = Some(GridDisplay::from(*enabled)),
        Some(_) => visualize.copy(key, target)?,
        None => {}
    }
    Ok(())
}

/// `x-grid-format` / `y-grid-format` label formats.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GridFormatGroup {
    pub x: Option<String>,
    pub y: Option<String>,
}

impl GridFormatGroup {
    pub fn write_wire(&self, visualize: &mut Map<String, Value>) {
        put_some(visualize, "x-grid-format", self.x.as_ref());
        put_some(visualize, "y-grid-format", self.y.as_ref());
    }

    pub fn read_wire(&mut self, visualize: WireObject<'_>) -> ChartResult<()> {
        visualize.copy("x-grid-format", &mut self.x)?;
        visualize.copy("y-grid-format", &mut self.y)
    }
}

/// `custom-range-x` / `custom-range-y` axis ranges.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CustomRangeGroup {
    pub x: Option<RangePair>,
    pub y: Option<RangePair>,
}

impl CustomRangeGroup {
    /// Both axes set to automatic.
    #[must_use]
    pub fn auto() -> Self {
        Self {
            x: Some(range_pair::auto()),
            y: Some(range_pair::auto()),
        }
    }

    pub fn write_wire(&self, visualize: &mut Map<String, Value>) {
        if let Some(x) = &self.x {
            visualize.insert("custom-range-x".to_owned(), range_pair::serialize(x));
        }
        if let Some(y) = &self.y {
            visualize.insert("custom-range-y".to_owned(), range_pair::serialize(y));
        }
    }

    pub fn read_wire(&mut self, visualize: WireObject<'_>) -> ChartResult<()> {
        if visualize.contains("custom-range-x") {
            self.x = Some(range_pair::deserialize(visualize.get("custom-range-x"))?);
        }
        if visualize.contains("custom-range-y") {
            self.y = Some(range_pair::deserialize(visualize.get("custom-range-y"))?);
        }
        Ok(())
    }
}

/// `custom-ticks-x` / `custom-ticks-y` tick lists.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CustomTicksGroup {
    pub x: Option<Vec<Scalar>>,
    pub y: Option<Vec<Scalar>>,
}

impl CustomTicksGroup {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            x: Some(Vec::new()),
            y: Some(Vec::new()),
        }
    }

    pub fn write_wire(&self, visualize: &mut Map<String, Value>) {
        if let Some(x) = &self.x {
            visualize.insert("custom-ticks-x".to_owned(), tick_list::serialize(x));
        }
        if let Some(y) = &self.y {
            visualize.insert("custom-ticks-y".to_owned(), tick_list::serialize(y));
        }
    }

    pub fn read_wire(&mut self, visualize: WireObject<'_>) -> ChartResult<()> {
        if visualize.contains("custom-ticks-x") {
            self.x = Some(tick_list::deserialize(visualize.get("custom-ticks-x"))?);
        }
        if visualize.contains("custom-ticks-y") {
            self.y = Some(tick_list::deserialize(visualize.get("custom-ticks-y"))?);
        }
        Ok(())
    }
}

/// Text and range annotations; each list is emitted only when non-empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnnotationsGroup {
    pub text: Vec<TextAnnotation>,
    pub range: Vec<RangeAnnotation>,
}

impl AnnotationsGroup {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.range.is_empty()
    }

    pub fn validate(&self) -> ChartResult<()> {
        for annotation in &self.text {
            annotation.validate()?;
        }
        for annotation in &self.range {
            annotation.validate()?;
        }
        Ok(())
    }

    pub fn write_wire(&self, visualize: &mut Map<String, Value>) {
        if !self.text.is_empty() {
            visualize.insert(
                "text-annotations".to_owned(),
                serialize_text_annotations(&self.text),
            );
        }
        if !self.range.is_empty() {
            visualize.insert(
                "range-annotations".to_owned(),
                serialize_range_annotations(&self.range),
            );
        }
    }

    pub fn read_wire(&mut self, visualize: WireObject<'_>) -> ChartResult<()> {
        if visualize.contains("text-annotations") {
            self.text = deserialize_text_annotations(visualize.get("text-annotations"))?;
        }
        if visualize.contains("range-annotations") {
            self.range = deserialize_range_annotations(visualize.get("range-annotations"))?;
        }
        Ok(())
    }
}
