//! Normalize a whole raw trace into canonical steps.
//!
//! One pass, in order, one canonical step per raw step. The heap of each
//! step starts as a copy of the previous step's heap, so objects are
//! never dropped from view once seen.

use super::frame_builder::FrameBuilder;
use super::schema::CanonicalStep;
use crate::heap::{Heap, HeapId, HeapInterner, Value};
use crate::parser::{Bindings, EventKind, RawStep};
use crate::utils::config::{NormalizerConfig, DEFAULT_LINE, MODULE_FUNC_NAME};
use crate::utils::error::NormalizeError;
use log::debug;
use std::collections::{BTreeMap, BTreeSet};

/// Normalize with the default config (no step limit)
///
/// **Public** - main entry point for normalization
///
/// # Errors
/// * `NormalizeError::DanglingReference` - A reference with no heap entry
pub fn normalize_trace(steps: &[RawStep]) -> Result<Vec<CanonicalStep>, NormalizeError> {
    TraceNormalizer::new(NormalizerConfig::default()).normalize(steps)
}

/// State for a single normalization pass
///
/// Owns the identity table and the cumulative heap. `normalize` consumes
/// the normalizer, so identities never leak from one trace into another.
#[derive(Debug)]
pub struct TraceNormalizer {
    config: NormalizerConfig,
    interner: HeapInterner,
    cumulative: Heap,
}

impl TraceNormalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self {
            config,
            interner: HeapInterner::new(),
            cumulative: Heap::new(),
        }
    }

    /// Normalize every step, aborting on the first error
    pub fn normalize(mut self, steps: &[RawStep]) -> Result<Vec<CanonicalStep>, NormalizeError> {
        if let Some(limit) = self.config.max_steps {
            if steps.len() > limit {
                return Err(NormalizeError::TraceTooLong {
                    steps: steps.len(),
                    limit,
                });
            }
        }

        debug!("Normalizing {} raw steps", steps.len());

        let canonical = steps
            .iter()
            .enumerate()
            .map(|(index, raw)| self.normalize_step(index, raw))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "Normalized {} steps, {} heap objects",
            canonical.len(),
            self.cumulative.len()
        );

        Ok(canonical)
    }

    fn normalize_step(
        &mut self,
        index: usize,
        raw: &RawStep,
    ) -> Result<CanonicalStep, NormalizeError> {
        let mut heap = self.cumulative.clone();

        // Upstream heap is taken verbatim and becomes part of the baseline
        if let Some(supplied) = &raw.heap {
            debug!("Step {} supplies {} heap objects", index, supplied.len());
            let overwritten: BTreeSet<HeapId> = supplied
                .iter()
                .filter(|(id, object)| heap.get(*id).is_some_and(|prev| prev != *object))
                .map(|(id, _)| *id)
                .collect();
            heap.extend(supplied.iter().map(|(id, obj)| (*id, obj.clone())));
            self.interner.forget_overwritten(&overwritten, &heap);
            if let Some(&max_id) = supplied.keys().next_back() {
                self.interner.reserve_through(max_id);
            }
        }

        let event = if raw.exception_msg.is_some() {
            EventKind::Exception
        } else {
            raw.event.unwrap_or_default()
        };

        let empty = Bindings::new();
        let raw_globals = raw.globals.as_ref().unwrap_or(&empty);
        let globals = self.encode_globals(raw_globals, &mut heap);

        let ordered_globals = match &raw.ordered_globals {
            Some(order) if !order.is_empty() => order.clone(),
            _ => raw_globals.names(),
        };

        let frames = raw.stack_to_render.as_deref().unwrap_or_default();
        let stack_to_render =
            FrameBuilder::new(&mut self.interner, &mut heap).build_stack(frames, event);

        let step = CanonicalStep {
            line: raw.line.unwrap_or(DEFAULT_LINE),
            event,
            func_name: raw
                .func_name
                .clone()
                .unwrap_or_else(|| MODULE_FUNC_NAME.to_string()),
            globals,
            ordered_globals,
            stack_to_render,
            heap,
            stdout: raw.stdout.clone().unwrap_or_default(),
            exception_msg: raw.exception_msg.clone(),
        };

        if let Some(heap_id) = step.find_dangling_reference() {
            return Err(NormalizeError::DanglingReference {
                step: index,
                heap_id,
            });
        }

        self.cumulative = step.heap.clone();

        Ok(step)
    }

    fn encode_globals(&mut self, globals: &Bindings, heap: &mut Heap) -> BTreeMap<String, Value> {
        globals
            .iter()
            .map(|(name, value)| (name.to_string(), self.interner.encode(value, heap)))
            .collect()
    }
}
