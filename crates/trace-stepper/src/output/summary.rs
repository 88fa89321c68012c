//! Terminal rendering of the step a session is on.
//!
//! Plain text with light coloring; layout is line-oriented so it can be
//! piped. Graphical rendering is the embedding application's job.

use crate::heap::{HeapObject, Value};
use crate::navigator::Session;
use crate::normalizer::{CanonicalStep, Frame};
use colored::*;

/// Render the session's current step
pub fn render_step_summary(session: &Session) -> String {
    let mut out = String::new();

    out.push_str(&render_header(session));

    if let Some(step) = session.current_step() {
        out.push_str(&render_globals(step));
        out.push_str(&render_frames(step));
        out.push_str(&render_heap(step));
        out.push_str(&render_stdout(step));
    }

    out
}

fn render_header(session: &Session) -> String {
    let mut out = String::new();
    let status = session.status();
    let status_text = if status.is_error() {
        status.to_string().red().to_string()
    } else {
        status.to_string().green().to_string()
    };

    out.push('\n');
    out.push_str(
        &format!(
            "Step {} of {}",
            session.current_index() + 1,
            session.total_steps()
        )
        .bold()
        .to_string(),
    );
    out.push_str("\n---------------------------------------------------\n");
    out.push_str(&format!("{}\n", status_text));
    if let Some(step) = session.current_step() {
        out.push_str(&format!("Line {} in {}\n", step.line, step.func_name));
    }
    out
}

fn render_globals(step: &CanonicalStep) -> String {
    let mut out = String::from("\nGlobal frame:\n");
    let mut any = false;
    for (name, value) in step.globals_in_order() {
        any = true;
        out.push_str(&format!("  {} = {}\n", name.cyan(), format_value(value)));
    }
    if !any {
        out.push_str("  (no global variables)\n");
    }
    out
}

fn render_frames(step: &CanonicalStep) -> String {
    let mut out = String::new();
    for frame in &step.stack_to_render {
        out.push_str(&format!("\n{}\n", frame_label(frame)));
        let mut any = false;
        for (name, value) in frame.locals() {
            any = true;
            out.push_str(&format!("  {} = {}\n", name.cyan(), format_value(value)));
        }
        if !any {
            out.push_str("  (no local variables)\n");
        }
    }
    out
}

fn frame_label(frame: &Frame) -> String {
    let parent = match frame.parent_frame_id() {
        Some(id) => format!("f{}", id),
        None => "Global".to_string(),
    };
    let label = format!("f{}: {} [parent={}]", frame.frame_id, frame.func_name, parent);
    if frame.is_highlighted {
        format!("{} {}", "▶".yellow(), label.bold())
    } else {
        format!("  {}", label)
    }
}

fn render_heap(step: &CanonicalStep) -> String {
    if step.heap.is_empty() {
        return String::new();
    }

    let mut out = String::from("\nObjects:\n");
    for (id, object) in &step.heap {
        out.push_str(&format!("  id{} {}\n", id, format_object(object)));
    }
    out
}

fn render_stdout(step: &CanonicalStep) -> String {
    if step.stdout.is_empty() {
        return String::new();
    }

    let mut out = String::from("\nOutput:\n");
    for line in step.stdout.lines() {
        out.push_str(&format!("  {}\n", line));
    }
    out
}

fn format_object(object: &HeapObject) -> String {
    match object {
        HeapObject::List { elements } => format!(
            "list [{}]",
            elements.iter().map(format_value).collect::<Vec<_>>().join(", ")
        ),
        HeapObject::Mapping { entries } => format!("dict {{{}}}", format_entries(entries)),
        HeapObject::Function { name, .. } => format!("function {}", name),
        HeapObject::Instance { class_name, fields } => {
            format!("{} {{{}}}", class_name, format_entries(fields))
        }
    }
}

fn format_entries(entries: &[(String, Value)]) -> String {
    entries
        .iter()
        .map(|(k, v)| format!("{}: {}", k, format_value(v)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Ref(r) => format!("-> id{}", r.heap_id),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Str(s) => format!("\"{}\"", s),
        Value::Null => "null".to_string(),
    }
}
