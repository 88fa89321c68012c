use pretty_assertions::assert_eq;
use serde_json::json;
use trace_stepper::heap::{HeapId, HeapObject, Value};
use trace_stepper::normalizer::normalize_trace;
use trace_stepper::parser::{parse_trace, EventKind, RawStep};

fn raw_steps(value: serde_json::Value) -> Vec<RawStep> {
    parse_trace(&value).unwrap().steps
}

/// A trace touching globals, nested frames, a call/return pair and an exception
fn program_trace() -> Vec<RawStep> {
    raw_steps(json!([
        {"line": 1, "globals": {"nums": [1, 2, 3]}, "stdout": ""},
        {
            "line": 5, "event": "call", "func_name": "sum",
            "globals": {"nums": [1, 2, 3], "sum": {"$function": {"name": "sum", "source": "function sum(xs) {}"}}},
            "stack_to_render": [
                {"frame_id": 1, "func_name": "sum", "locals": {"xs": [1, 2, 3], "total": 0},
                 "ordered_varnames": ["xs", "total"], "unique_hash": "sum_1"}
            ]
        },
        {
            "line": 6, "event": "step", "func_name": "sum",
            "globals": {"nums": [1, 2, 3]},
            "stack_to_render": [
                {"frame_id": 1, "func_name": "sum", "locals": {"xs": [1, 2, 3], "acc": {"total": 6}},
                 "ordered_varnames": ["xs", "acc"]}
            ]
        },
        {
            "line": 7, "event": "return", "func_name": "sum",
            "stack_to_render": [{"frame_id": 1, "func_name": "sum"}]
        },
        {"line": 9, "event": "exception", "exception_msg": "TypeError: x is undefined", "stdout": "6\n"}
    ]))
}

#[test]
fn test_output_length_matches_input() {
    let raw = program_trace();
    let steps = normalize_trace(&raw).unwrap();
    assert_eq!(steps.len(), raw.len());

    let lines: Vec<u32> = steps.iter().map(|s| s.line).collect();
    assert_eq!(lines, vec![1, 5, 6, 7, 9]);

    assert!(normalize_trace(&[]).unwrap().is_empty());
}

#[test]
fn test_every_reference_resolves_in_its_step() {
    let steps = normalize_trace(&program_trace()).unwrap();

    for (index, step) in steps.iter().enumerate() {
        for heap_id in step.root_references() {
            assert!(
                step.heap.contains_key(&heap_id),
                "step {index} references missing id {heap_id}"
            );
        }
        assert_eq!(step.find_dangling_reference(), None);
    }
}

#[test]
fn test_cumulative_heap_is_monotonic() {
    let steps = normalize_trace(&program_trace()).unwrap();

    for pair in steps.windows(2) {
        for (id, object) in &pair[0].heap {
            assert_eq!(pair[1].heap.get(id), Some(object), "heap id {id} changed");
        }
    }
}

#[test]
fn test_ids_never_reassigned() {
    let steps = normalize_trace(&program_trace()).unwrap();
    let mut seen: std::collections::BTreeMap<HeapId, HeapObject> = Default::default();

    for step in &steps {
        for (id, object) in &step.heap {
            if let Some(previous) = seen.insert(*id, object.clone()) {
                assert_eq!(&previous, object);
            }
        }
    }
}

#[test]
fn test_identical_values_share_an_id() {
    let steps = normalize_trace(&program_trace()).unwrap();

    // `nums` global and the `xs` local both hold [1, 2, 3]
    let nums = steps[1].globals["nums"].heap_id().unwrap();
    let xs = steps[1].stack_to_render[0].encoded_locals["xs"].heap_id().unwrap();
    assert_eq!(nums, xs);
    assert_eq!(steps[0].globals["nums"].heap_id(), Some(nums));
}

#[test]
fn test_mutation_produces_distinct_entries() {
    // One live list gains an element between the steps. Interning is by
    // value, so the mutated list is a new heap object and the old one stays.
    let steps = normalize_trace(&raw_steps(json!([
        {"globals": {"x": [1, 2, 3]}},
        {"globals": {"x": [1, 2, 3, 4]}}
    ])))
    .unwrap();

    let before = steps[0].globals["x"].heap_id().unwrap();
    let after = steps[1].globals["x"].heap_id().unwrap();

    assert_ne!(before, after);
    assert_eq!(steps[1].heap.len(), 2);
    assert_eq!(
        steps[1].heap[&before],
        HeapObject::List {
            elements: vec![Value::from(1), Value::from(2), Value::from(3)]
        }
    );
    assert_eq!(steps[1].heap[&after].len(), 4);
}

#[test]
fn test_supplied_heap_merged_verbatim() {
    let supplied = json!({
        "3": {"type": "LIST", "elements": [10, {"kind": "ref", "heap_id": 4}]},
        "4": {"type": "INSTANCE", "class_name": "Node", "fields": [["value", 10]]}
    });
    let steps = normalize_trace(&raw_steps(json!([
        {"globals": {"a": [0]}},
        {"heap": supplied, "globals": {"head": {"kind": "ref", "heap_id": 3}}},
        {"globals": {"b": {"k": "v"}}}
    ])))
    .unwrap();

    let expected: trace_stepper::heap::Heap = serde_json::from_value(supplied).unwrap();
    for step in &steps[1..] {
        for (id, object) in &expected {
            assert_eq!(step.heap.get(id), Some(object));
        }
    }

    // earlier objects survive the merge
    assert!(steps[1].heap.contains_key(&1));
    assert_eq!(steps[1].globals["head"].heap_id(), Some(3));

    // new allocations land above the supplied ids
    assert_eq!(steps[2].globals["b"].heap_id(), Some(5));
}

#[test]
fn test_exception_step_preserved() {
    let steps = normalize_trace(&program_trace()).unwrap();
    let last = steps.last().unwrap();

    assert_eq!(last.event, EventKind::Exception);
    assert_eq!(last.exception_msg.as_deref(), Some("TypeError: x is undefined"));
    assert_eq!(last.stdout, "6\n");
}

#[test]
fn test_highlighting_by_event() {
    let steps = normalize_trace(&program_trace()).unwrap();

    assert!(steps[1].stack_to_render[0].is_highlighted);
    assert_eq!(steps[2].active_frame().map(|f| f.func_name.as_str()), Some("sum"));
    // return step: frame present but not active
    assert_eq!(steps[3].stack_to_render.len(), 1);
    assert!(steps[3].active_frame().is_none());
}

#[test]
fn test_frame_order_and_identity() {
    let steps = normalize_trace(&program_trace()).unwrap();
    let frame = &steps[1].stack_to_render[0];

    assert_eq!(frame.ordered_varnames, vec!["xs", "total"]);
    assert_eq!(frame.encoded_locals["total"], Value::from(0));
    assert_eq!(frame.unique_hash, "sum_1");
    assert_eq!(steps[2].stack_to_render[0].unique_hash, "frame_0");
}

#[test]
fn test_function_global_is_heap_function() {
    let steps = normalize_trace(&program_trace()).unwrap();
    let id = steps[1].globals["sum"].heap_id().unwrap();

    assert_eq!(
        steps[1].heap[&id],
        HeapObject::Function {
            name: "sum".to_string(),
            body_digest: "function sum(xs) {}".to_string()
        }
    );
}

#[test]
fn test_each_pass_starts_fresh() {
    let raw = raw_steps(json!([{"globals": {"x": [9]}}]));
    let first = normalize_trace(&raw).unwrap();
    let second = normalize_trace(&raw).unwrap();

    assert_eq!(first[0].globals["x"].heap_id(), Some(1));
    assert_eq!(second[0].globals["x"].heap_id(), Some(1));
}

#[test]
fn test_tracer_step_cap_trace_normalizes() {
    // Tracers stop after 1000 executed lines and append one exception step
    let mut records: Vec<serde_json::Value> = (1..=1000)
        .map(|n| json!({"line": n % 7 + 1, "event": "step_line", "func_name": "<module>", "heap": {}, "stdout": ""}))
        .collect();
    records.push(json!({
        "line": 3,
        "event": "exception",
        "exception_msg": "Maximum execution limit exceeded",
        "heap": {},
        "stdout": ""
    }));

    let trace = parse_trace(&json!({"code": "while (true) {}", "trace": records})).unwrap();
    let steps = normalize_trace(&trace.steps).unwrap();

    assert_eq!(steps.len(), 1001);
    assert_eq!(steps[1000].event, EventKind::Exception);
    assert_eq!(
        steps[1000].exception_msg.as_deref(),
        Some("Maximum execution limit exceeded")
    );
}

#[test]
fn test_tracer_records_with_empty_heap_intern_bindings() {
    // Tracer records carry "heap": {} next to raw composite bindings
    let steps = normalize_trace(&raw_steps(json!([
        {
            "line": 1, "event": "step_line", "func_name": "<module>",
            "globals": {"xs": [1, 2], "cfg": {"debug": true}},
            "ordered_globals": ["xs", "cfg"],
            "stack_to_render": [], "heap": {}, "stdout": ""
        },
        {
            "line": 2, "event": "step_line", "func_name": "<module>",
            "globals": {"xs": [1, 2], "cfg": {"debug": true}},
            "ordered_globals": ["xs", "cfg"],
            "stack_to_render": [], "heap": {}, "stdout": ""
        }
    ])))
    .unwrap();

    let xs = steps[0].globals["xs"].heap_id().unwrap();
    let cfg = steps[0].globals["cfg"].heap_id().unwrap();
    assert_eq!((xs, cfg), (1, 2));
    assert_eq!(steps[0].heap.len(), 2);
    assert_eq!(
        steps[0].lookup(cfg),
        Some(&HeapObject::Mapping {
            entries: vec![("debug".to_string(), Value::Bool(true))]
        })
    );

    // second record re-uses the same identities
    assert_eq!(steps[1].globals, steps[0].globals);
    assert_eq!(steps[1].heap, steps[0].heap);
}

#[test]
fn test_upstream_heap_overwrite_does_not_alias() {
    let steps = normalize_trace(&raw_steps(json!([
        {"globals": {"x": [1, 2, 3]}},
        {"heap": {"1": {"type": "LIST", "elements": [9]}}},
        {"globals": {"y": [1, 2, 3], "z": {"inner": [1, 2, 3]}}}
    ])))
    .unwrap();

    assert_eq!(steps[0].globals["x"].heap_id(), Some(1));
    assert_eq!(steps[1].lookup(1).map(HeapObject::len), Some(1));

    let y = steps[2].globals["y"].heap_id().unwrap();
    assert_ne!(y, 1);
    assert_eq!(
        steps[2].lookup(y),
        Some(&HeapObject::List {
            elements: vec![Value::from(1), Value::from(2), Value::from(3)]
        })
    );

    let z = steps[2].globals["z"].heap_id().unwrap();
    assert_eq!(steps[2].lookup(z).unwrap().references(), vec![y]);
}

#[test]
fn test_identical_upstream_heap_keeps_identities() {
    let steps = normalize_trace(&raw_steps(json!([
        {"globals": {"x": [5]}},
        {"heap": {"1": {"type": "LIST", "elements": [5]}}},
        {"globals": {"x": [5]}}
    ])))
    .unwrap();

    assert_eq!(steps[2].globals["x"].heap_id(), Some(1));
}
