//! Encode raw stack frames.

use super::schema::Frame;
use crate::heap::{Heap, HeapInterner, Value};
use crate::parser::{EventKind, RawFrame};
use crate::utils::config::DEFAULT_FRAME_FUNC_NAME;
use std::collections::BTreeMap;

/// Encodes frames for one step, interning composite locals into that step's heap
pub struct FrameBuilder<'a> {
    interner: &'a mut HeapInterner,
    heap: &'a mut Heap,
}

impl<'a> FrameBuilder<'a> {
    pub fn new(interner: &'a mut HeapInterner, heap: &'a mut Heap) -> Self {
        Self { interner, heap }
    }

    /// Encode a whole stack, outermost first.
    ///
    /// The innermost frame is marked active, except on a `return` event,
    /// where no frame is highlighted.
    pub fn build_stack(&mut self, frames: &[RawFrame], event: EventKind) -> Vec<Frame> {
        let innermost = frames.len().checked_sub(1);
        frames
            .iter()
            .enumerate()
            .map(|(position, raw)| {
                let active = Some(position) == innermost && event != EventKind::Return;
                self.build(raw, position, active)
            })
            .collect()
    }

    /// Encode one frame at `position` (0-based from the outermost)
    pub fn build(&mut self, raw: &RawFrame, position: usize, active: bool) -> Frame {
        let locals = raw.locals.clone().unwrap_or_default();

        // Declared order wins verbatim; fall back to insertion order
        let ordered_varnames = raw
            .ordered_varnames
            .clone()
            .unwrap_or_else(|| locals.names());

        let mut encoded_locals = BTreeMap::new();
        for name in &ordered_varnames {
            let value = match locals.get(name) {
                Some(raw_value) => self.interner.encode(raw_value, self.heap),
                None => Value::Null,
            };
            encoded_locals.insert(name.clone(), value);
        }

        Frame {
            frame_id: raw.frame_id.unwrap_or(position as u64 + 1),
            func_name: raw
                .func_name
                .clone()
                .unwrap_or_else(|| DEFAULT_FRAME_FUNC_NAME.to_string()),
            ordered_varnames,
            encoded_locals,
            parent_frame_id_list: raw.parent_frame_id_list.clone().unwrap_or_default(),
            is_highlighted: active,
            unique_hash: raw
                .unique_hash
                .clone()
                .unwrap_or_else(|| format!("frame_{}", position)),
        }
    }
}
