pub mod annotations;
pub mod enums;
pub mod mixins;
pub mod scalar;
pub mod transcoders;
pub mod wire;

pub use annotations::{
    ConnectorLine, PanelAnnotation, RangeAnnotation, RangeAnnotationBuilder, RangeKind,
    TextAnnotation,
};
pub use enums::*;
pub use mixins::{
    AnnotationsGroup, CustomRangeGroup, CustomTicksGroup, GridDisplayGroup, GridFormatGroup,
};
pub use scalar::Scalar;
pub use transcoders::range_pair::RangePair;
pub use transcoders::{
    ColorCategory, FlatValueLabels, NestedValueLabels, PlotHeight, number_value,
};
pub use wire::{WireObject, WireValue};
