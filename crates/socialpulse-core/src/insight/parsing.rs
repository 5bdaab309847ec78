//! Extraction of the reply text from a run-flow response
//!
//! The only contract with the hosted workflow is the path
//! `outputs[0].outputs[0].results.message.text`. Each accessor step is
//! checked in turn and the first one that fails is reported.

use serde_json::Value;

use crate::error::{PathStep, ResponseShapeError, ShapeFault};

/// Accessor steps from the response root to the reply text
pub const REPLY_TEXT_PATH: [PathStep; 7] = [
    PathStep::Key("outputs"),
    PathStep::Index(0),
    PathStep::Key("outputs"),
    PathStep::Index(0),
    PathStep::Key("results"),
    PathStep::Key("message"),
    PathStep::Key("text"),
];

/// Parse a raw response body and extract the reply text
pub fn extract_reply_text(body: &str) -> Result<String, ResponseShapeError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| ResponseShapeError::invalid_json(e.to_string()))?;
    extract_message_text(&value)
}

/// Walk `REPLY_TEXT_PATH` over an already-parsed response
pub fn extract_message_text(response: &Value) -> Result<String, ResponseShapeError> {
    let mut current = response;
    let mut walked = String::new();
    let mut parent = String::new();

    for step in REPLY_TEXT_PATH {
        current = step_into(current, step, &walked)?;
        parent = walked.clone();
        push_step(&mut walked, step);
    }

    match current {
        Value::String(text) => Ok(text.clone()),
        other => Err(ResponseShapeError {
            walked: parent,
            step: REPLY_TEXT_PATH.last().copied(),
            fault: ShapeFault::WrongType {
                expected: "string",
                found: json_type(other),
            },
        }),
    }
}

/// Apply one accessor step, reporting the failure at `walked`
fn step_into<'a>(
    current: &'a Value,
    step: PathStep,
    walked: &str,
) -> Result<&'a Value, ResponseShapeError> {
    let fail = |fault: ShapeFault| ResponseShapeError {
        walked: walked.to_string(),
        step: Some(step),
        fault,
    };

    match step {
        PathStep::Key(key) => {
            let object = current.as_object().ok_or_else(|| {
                fail(ShapeFault::WrongType {
                    expected: "object",
                    found: json_type(current),
                })
            })?;
            object.get(key).ok_or_else(|| fail(ShapeFault::MissingKey))
        }
        PathStep::Index(index) => {
            let array = current.as_array().ok_or_else(|| {
                fail(ShapeFault::WrongType {
                    expected: "array",
                    found: json_type(current),
                })
            })?;
            array
                .get(index)
                .ok_or_else(|| fail(ShapeFault::IndexOutOfRange { len: array.len() }))
        }
    }
}

fn push_step(walked: &mut String, step: PathStep) {
    match step {
        PathStep::Key(key) => {
            if !walked.is_empty() {
                walked.push('.');
            }
            walked.push_str(key);
        }
        PathStep::Index(index) => walked.push_str(&format!("[{index}]")),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
