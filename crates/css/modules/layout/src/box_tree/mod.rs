//! Transient box structures used while a pass runs.

mod block_box;
mod float_list;
mod line_box;
mod margin_strut;

pub use block_box::{
    BlockClose, BlockSizing, DeferredFloat, FloatScope, HeightRule, InlineNode, IntrinsicWidths,
    LayoutBlockBox,
};
pub use float_list::{FloatEntry, FloatSide, FloatedBoxList, InlineSpan};
pub use line_box::{ClosedLine, FragmentKind, LineBox, LineFragment, LineStrut};
pub use margin_strut::MarginStrut;
