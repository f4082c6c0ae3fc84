//! Dotted-path lookup and truthiness for JSON records.

use serde_json::Value;

/// Resolve a dotted path like `data.author.name` inside a nested record.
///
/// Object segments are looked up by key, array segments by numeric index
/// (`items.0.title`). Returns `None` as soon as a segment is missing.
pub fn get<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(record, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Whether a value counts as present.
///
/// `null`, `false`, zero and the empty string are falsy; every object and
/// array is truthy, even when empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Render a value as plain text.
///
/// Strings are used verbatim (no JSON quoting), arrays join their rendered
/// elements with `,`, and every object renders as `[object Object]`, so
/// it slugifies to `object-object` whatever its keys.
pub fn to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items.iter().map(to_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_top_level() {
        let record = json!({"collection": "pages"});
        assert_eq!(get(&record, "collection"), Some(&json!("pages")));
    }

    #[test]
    fn test_get_nested() {
        let record = json!({"data": {"author": {"name": "Ada"}}});
        assert_eq!(get(&record, "data.author.name"), Some(&json!("Ada")));
    }

    #[test]
    fn test_get_array_index() {
        let record = json!({"data": {"tags": ["rust", "ssg"]}});
        assert_eq!(get(&record, "data.tags.1"), Some(&json!("ssg")));
        assert_eq!(get(&record, "data.tags.5"), None);
        assert_eq!(get(&record, "data.tags.first"), None);
    }

    #[test]
    fn test_get_missing() {
        let record = json!({"data": {"slug": "x"}});
        assert_eq!(get(&record, "data.title"), None);
        assert_eq!(get(&record, "data.slug.deeper"), None);
        assert_eq!(get(&record, "nothing"), None);
    }

    #[test]
    fn test_is_truthy() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));

        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(7)));
        assert!(is_truthy(&json!("0")));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
    }

    #[test]
    fn test_to_text() {
        assert_eq!(to_text(&json!("Hello")), "Hello");
        assert_eq!(to_text(&json!(42)), "42");
        assert_eq!(to_text(&json!(true)), "true");
        assert_eq!(to_text(&json!(["a", 1])), "a,1");
        assert_eq!(to_text(&json!({"k": "v"})), "[object Object]");
        assert_eq!(to_text(&json!({})), "[object Object]");
    }
}
