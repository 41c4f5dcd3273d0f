//! Inline checkbox groups
//!
//! This module turns lines like `[ ] wash car | [x] buy milk` into rows of
//! toggles and writes toggles back into the source line.
//!
//! # Components
//! - `parser` - split a line into checkbox items and serialize them back
//! - `group` - the group model and its widget projection
//! - `sync` - render tree, line binding, toggle write-back, live-edit hook
//! - `widgets` - egui painting of a projected group

pub mod group;
pub mod parser;
pub mod sync;
pub mod widgets;

pub use group::{BlockView, CheckboxGroup, ContainerView};
pub use parser::{
    contains_marker, parse_line, rewrite_item, serialize_item, serialize_line, CheckboxItem,
};
pub use sync::{
    BlockId, LiveEditHook, RenderContext, RenderTree, SkipReason, ToggleEvent, ToggleOutcome,
};
pub use widgets::{CheckboxGroupWidget, GroupWidgetOutput, ToggledItem, WidgetColors};
