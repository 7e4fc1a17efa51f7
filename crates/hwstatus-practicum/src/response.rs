//! Shape checks for the homework-status payload.
//!
//! The API is documented to answer
//! `{"homeworks": [{"homework_name": ..., "status": ...}], "current_date": ...}`
//! but nothing here assumes it does.

use serde_json::Value;
use tracing::debug;

use hwstatus_core::error::{json_type_name, DataShapeError};
use hwstatus_core::HomeworkStatus;

/// Validate the top-level response and return the `homeworks` list.
///
/// Checked in order: the response is a dict, it has `homeworks`, and
/// `homeworks` is a list. An empty list is valid.
pub fn check_response(response: &Value) -> Result<&Vec<Value>, DataShapeError> {
    let object = response
        .as_object()
        .ok_or(DataShapeError::ResponseNotObject {
            found: json_type_name(response),
        })?;

    let homeworks = match object.get("homeworks") {
        None | Some(Value::Null) => {
            return Err(DataShapeError::MissingKey {
                key: "homeworks",
                context: "API response",
            })
        }
        Some(value) => value,
    };

    let list = homeworks
        .as_array()
        .ok_or(DataShapeError::HomeworksNotList {
            found: json_type_name(homeworks),
        })?;

    debug!(count = list.len(), "API response matches the documented shape");
    Ok(list)
}

/// Server timestamp of the response, if present and an integer.
pub fn current_date(response: &Value) -> Option<i64> {
    response.get("current_date").and_then(Value::as_i64)
}

/// Render the status-change message for one homework record.
pub fn parse_status(homework: &Value) -> Result<String, DataShapeError> {
    let record = homework
        .as_object()
        .ok_or(DataShapeError::HomeworkNotObject {
            found: json_type_name(homework),
        })?;

    let status = present(record.get("status")).ok_or(DataShapeError::MissingKey {
        key: "status",
        context: "homework record",
    })?;
    let name = present(record.get("homework_name")).ok_or(DataShapeError::MissingKey {
        key: "homework_name",
        context: "homework record",
    })?;

    let status: HomeworkStatus = status
        .as_str()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| DataShapeError::UnknownStatus(status.to_string()))?;

    let name = match name {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    Ok(format!(
        "Изменился статус проверки работы \"{name}\". {}",
        status.verdict()
    ))
}

/// JSON `null` is treated the same as an absent key.
fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}
