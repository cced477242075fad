//! One-time normalization of loosely shaped bank records.
//!
//! Bank files come from several generations of tooling: some carry
//! `presented_choices` with labels, others a bare `choices` list; ids and
//! numbers appear as either strings or integers. Everything is folded into
//! the canonical [`RawQuestion`] here so downstream code never inspects shapes.

use std::collections::{BTreeSet, HashSet};

use serde_json::{Map, Value};

use crate::model::{Choice, RawQuestion};

const CHOICE_LABELS: [&str; 6] = ["A", "B", "C", "D", "E", "F"];

/// Why a record was rejected during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NotAnObject,
    MissingId,
    MissingStem,
    MissingChoices,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::NotAnObject => write!(f, "record is not an object"),
            Rejection::MissingId => write!(f, "missing question_id"),
            Rejection::MissingStem => write!(f, "missing stem"),
            Rejection::MissingChoices => write!(f, "missing choices"),
        }
    }
}

/// Canonical label for the choice at `index` in source order.
///
/// A–F for the first six, then 1-based numbers.
pub fn label_for(index: usize) -> String {
    CHOICE_LABELS
        .get(index)
        .map(|l| l.to_string())
        .unwrap_or_else(|| (index + 1).to_string())
}

/// Flatten a top-level bank value into individual records.
///
/// Arrays are returned element-wise; a single object is one record; any other
/// value contributes nothing.
pub fn flatten_records(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        obj @ Value::Object(_) => vec![obj],
        _ => Vec::new(),
    }
}

/// Normalize one record into its canonical shape.
pub fn normalize_record(record: &Value) -> Result<RawQuestion, Rejection> {
    let obj = record.as_object().ok_or(Rejection::NotAnObject)?;

    let question_id = text_field(obj, &["question_id", "id"]).ok_or(Rejection::MissingId)?;
    let stem = ["stem", "content"]
        .iter()
        .find_map(|key| {
            obj.get(*key)
                .and_then(Value::as_str)
                .filter(|s| !s.trim().is_empty())
        })
        .ok_or(Rejection::MissingStem)?
        .to_string();

    let raw_choices = ["presented_choices", "choices"]
        .iter()
        .find_map(|key| {
            obj.get(*key)
                .and_then(Value::as_array)
                .filter(|c| !c.is_empty())
        })
        .ok_or(Rejection::MissingChoices)?;

    let choices = normalize_choices(&question_id, raw_choices);

    Ok(RawQuestion {
        question_id,
        year: int_field(obj, "year").and_then(|y| i32::try_from(y).ok()),
        subject_code: text_field(obj, &["subject_code"]).unwrap_or_default(),
        question_no: int_field(obj, "question_no").and_then(|n| u32::try_from(n).ok()),
        stem,
        choices,
        correct_choice_ids: id_set(obj.get("correct_choice_ids")),
        explanation: obj
            .get("explanation")
            .and_then(Value::as_str)
            .map(str::to_string),
        tags: obj
            .get("tags")
            .and_then(Value::as_array)
            .map(|tags| {
                tags.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
        subject_name: text_field(obj, &["subject_name"]),
    })
}

/// Normalize a choice list, keeping every `choice_id` unique.
///
/// The first occurrence of an explicit id keeps it. Missing ids and later
/// repeats get the first free `c{n}`, starting from the 1-based position and
/// skipping any id used explicitly elsewhere in the list.
fn normalize_choices(question_id: &str, raw: &[Value]) -> Vec<Choice> {
    let explicit: Vec<Option<String>> = raw
        .iter()
        .map(|c| {
            c.as_object()
                .and_then(|o| text_field(o, &["choice_id", "id"]))
        })
        .collect();
    let reserved: HashSet<&str> = explicit.iter().flatten().map(String::as_str).collect();
    let mut seen: HashSet<String> = HashSet::new();

    raw.iter()
        .zip(&explicit)
        .enumerate()
        .map(|(idx, (choice, id))| {
            let choice_id = match id {
                Some(id) if seen.insert(id.clone()) => id.clone(),
                _ => {
                    let mut n = idx + 1;
                    let fresh = loop {
                        let candidate = format!("c{n}");
                        if !reserved.contains(candidate.as_str()) && !seen.contains(&candidate) {
                            break candidate;
                        }
                        n += 1;
                    };
                    if let Some(id) = id {
                        tracing::debug!(
                            "question '{question_id}': repeated choice id '{id}' renamed to '{fresh}'"
                        );
                    }
                    seen.insert(fresh.clone());
                    fresh
                }
            };
            normalize_choice(choice, idx, choice_id)
        })
        .collect()
}

fn normalize_choice(choice: &Value, idx: usize, choice_id: String) -> Choice {
    let obj = choice.as_object();

    // A bare string is a choice with only text.
    let bare_text = choice.as_str().map(str::to_string);

    Choice {
        choice_id,
        label: obj
            .and_then(|o| text_field(o, &["label"]))
            .unwrap_or_else(|| label_for(idx)),
        text: obj
            .and_then(|o| o.get("text").or_else(|| o.get("content")))
            .and_then(Value::as_str)
            .map(str::to_string)
            .or(bare_text)
            .unwrap_or_default(),
    }
}

/// First non-empty string-or-number field among `keys`, trimmed.
fn text_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match obj.get(*key)? {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Integer field given as a number or a numeric string.
fn int_field(obj: &Map<String, Value>, key: &str) -> Option<i64> {
    match obj.get(key)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn id_set(value: Option<&Value>) -> BTreeSet<String> {
    let as_id = |v: &Value| match v {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    };
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(as_id).collect(),
        Some(single) => as_id(single).into_iter().collect(),
        None => BTreeSet::new(),
    }
}
