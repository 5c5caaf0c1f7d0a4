//! Building operation batches from scripts.
//!
//! Two encodings are accepted. The text form holds one operation per line:
//!
//! ```text
//! # comments and blank lines are ignored
//! add NAME1 name2 email@email.com
//! update 1  Manager
//! delete 2
//! list
//! undo
//! ```
//!
//! Everything after the keyword and its separating space is the parameter
//! string, passed on untouched so that empty update fields survive.
//!
//! The JSON form is an array of objects tagged by `op`:
//!
//! ```text
//! [{"op": "add", "params": "NAME1 name2 email@email.com"}, {"op": "list"}]
//! ```

use crate::error::{Result, StoreError};
use crate::operations::{Operation, OperationKind};
use crate::validate::validate_token;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Serialized form of one operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum OperationRequest {
    Add { params: String },
    Update { params: String },
    Delete { params: String },
    List,
    Undo,
}

impl From<OperationRequest> for Operation {
    fn from(request: OperationRequest) -> Self {
        match request {
            OperationRequest::Add { params } => Operation::add(params),
            OperationRequest::Update { params } => Operation::update(params),
            OperationRequest::Delete { params } => Operation::delete(params),
            OperationRequest::List => Operation::list(),
            OperationRequest::Undo => Operation::undo(),
        }
    }
}

impl From<&Operation> for OperationRequest {
    fn from(op: &Operation) -> Self {
        let params = op.params().unwrap_or_default().to_string();
        match op.kind() {
            OperationKind::Add => OperationRequest::Add { params },
            OperationKind::Update => OperationRequest::Update { params },
            OperationKind::Delete => OperationRequest::Delete { params },
            OperationKind::List => OperationRequest::List,
            OperationKind::Undo => OperationRequest::Undo,
        }
    }
}

/// Parse a text script.
pub fn parse_script(source: &str) -> Result<Vec<Operation>> {
    let mut operations = Vec::new();
    for (i, line) in source.lines().enumerate() {
        if let Some(op) = parse_line(line, i + 1)? {
            operations.push(op);
        }
    }
    Ok(operations)
}

/// Parse one script line; `None` for blank and comment lines.
pub fn parse_line(line: &str, line_no: usize) -> Result<Option<Operation>> {
    let line = line.trim_start().trim_end_matches('\r');
    if line.trim().is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (keyword, params) = line.split_once(' ').unwrap_or((line, ""));
    if !validate_token(keyword) {
        return Err(script_error(line_no, format!("invalid keyword {keyword:?}")));
    }

    let op = match keyword.to_ascii_lowercase().as_str() {
        "add" => Operation::add(params),
        "update" => Operation::update(params),
        "delete" => Operation::delete(params),
        kw @ ("list" | "undo") => {
            if !params.trim().is_empty() {
                return Err(script_error(line_no, format!("{kw} takes no parameters")));
            }
            if kw == "list" {
                Operation::list()
            } else {
                Operation::undo()
            }
        }
        other => return Err(script_error(line_no, format!("unknown operation {other:?}"))),
    };
    Ok(Some(op))
}

/// Parse a JSON batch.
pub fn parse_json(source: &str) -> Result<Vec<Operation>> {
    let requests: Vec<OperationRequest> = serde_json::from_str(source)?;
    Ok(requests.into_iter().map(Operation::from).collect())
}

/// Encode operations as a JSON batch.
pub fn to_json(operations: &[Operation]) -> Result<String> {
    let requests: Vec<OperationRequest> = operations.iter().map(OperationRequest::from).collect();
    Ok(serde_json::to_string_pretty(&requests)?)
}

/// Read a script file; a `.json` extension selects the JSON form.
pub fn load_script(path: impl AsRef<Path>) -> Result<Vec<Operation>> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if is_json {
        parse_json(&source)
    } else {
        parse_script(&source)
    }
}

fn script_error(line: usize, reason: String) -> StoreError {
    StoreError::InvalidScript { line, reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_parse_script() {
        let ops = parse_script(
            "# seed\n\
             add NAME1 name2 email@email.com\n\
             \n\
             UPDATE 1  Manager\n\
             delete 1\n\
             list\n\
             undo\n",
        )
        .unwrap();

        let kinds: Vec<_> = ops.iter().map(Operation::kind).collect();
        assert_eq!(
            kinds,
            vec![
                OperationKind::Add,
                OperationKind::Update,
                OperationKind::Delete,
                OperationKind::List,
                OperationKind::Undo,
            ]
        );
        assert_eq!(ops[0].params(), Some("NAME1 name2 email@email.com"));
        assert_eq!(ops[1].params(), Some("1  Manager"));
    }

    #[test]
    fn test_parse_script_errors() {
        let err = parse_script("add a b c@d.com\nfrobnicate 1\n").unwrap_err();
        assert!(matches!(err, StoreError::InvalidScript { line: 2, .. }));

        let err = parse_script("list everything").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidScript);

        let err = parse_script("ad!d a b c").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidScript);
    }

    #[test]
    fn test_parse_json() {
        let ops = parse_json(
            r#"[
                {"op": "add", "params": "NAME1 name2 email@email.com"},
                {"op": "delete", "params": "1"},
                {"op": "undo"}
            ]"#,
        )
        .unwrap();
        assert_eq!(ops.len(), 3);
        assert_eq!(ops[1], Operation::delete("1"));
        assert_eq!(ops[2], Operation::undo());

        let err = parse_json(r#"[{"op": "rename"}]"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Serialization);
    }

    #[test]
    fn test_json_encoding() {
        let ops = vec![Operation::update("2 a"), Operation::list()];
        assert_eq!(parse_json(&to_json(&ops).unwrap()).unwrap(), ops);
    }

    #[test]
    fn test_load_script_by_extension() {
        let dir = TempDir::new().unwrap();
        let text = dir.path().join("batch.txt");
        let json = dir.path().join("batch.JSON");
        fs::write(&text, "list\n").unwrap();
        fs::write(&json, r#"[{"op": "list"}, {"op": "undo"}]"#).unwrap();

        assert_eq!(load_script(&text).unwrap().len(), 1);
        assert_eq!(load_script(&json).unwrap().len(), 2);
    }
}
