//! Record flattening.

use trendtab_model::{Record, Value};

/// Separator placed between a parent key and a child key.
pub const KEY_SEPARATOR: char = '_';

/// Flattens nested records into dotted (underscore-joined) keys.
///
/// `{a: {b: 1, c: 2}, d: 3}` becomes `{a_b: 1, a_c: 2, d: 3}`. Key order is
/// the first-seen order at every level. When two paths flatten to the same
/// key, the later value replaces the earlier one in place.
pub fn flatten(record: Record) -> Record {
    let mut flat = Record::new();
    flatten_into(&mut flat, None, record);
    flat
}

fn flatten_into(out: &mut Record, prefix: Option<&str>, record: Record) {
    for (key, value) in record {
        let key = match prefix {
            Some(prefix) => format!("{prefix}{KEY_SEPARATOR}{key}"),
            None => key,
        };
        match value {
            Value::Map(nested) => flatten_into(out, Some(&key), nested),
            leaf => out.insert(key, leaf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_one_level() {
        let record = Record::from([
            ("a", Value::from(Record::from([("b", 1), ("c", 2)]))),
            ("d", Value::from(3)),
        ]);
        let expected = Record::from([("a_b", 1), ("a_c", 2), ("d", 3)]);
        assert_eq!(flatten(record), expected);
    }

    #[test]
    fn test_flatten_deep() {
        let inner = Record::from([("z", 0.5)]);
        let middle = Record::from([("y", Value::from(inner)), ("w", Value::from("txt"))]);
        let record = Record::from([("x", Value::from(middle))]);
        let flat = flatten(record);
        let keys: Vec<&str> = flat.keys().collect();
        assert_eq!(keys, vec!["x_y_z", "x_w"]);
        assert_eq!(flat.get("x_y_z"), Some(&Value::Float(0.5)));
    }

    #[test]
    fn test_flatten_flat_record_is_unchanged() {
        let record = Record::from([("m1", 1), ("m2", 2)]);
        assert_eq!(flatten(record.clone()), record);
    }

    #[test]
    fn test_flatten_empty_nested_map_disappears() {
        let record = Record::from([("a", Value::from(Record::new())), ("b", Value::from(1))]);
        let keys: Vec<String> = flatten(record).keys().map(str::to_string).collect();
        assert_eq!(keys, vec!["b".to_string()]);
    }

    #[test]
    fn test_flatten_collision_keeps_first_position() {
        let record = Record::from([
            ("a_b", Value::from(1)),
            ("c", Value::from(2)),
            ("a", Value::from(Record::from([("b", 9)]))),
        ]);
        let flat = flatten(record);
        let keys: Vec<&str> = flat.keys().collect();
        assert_eq!(keys, vec!["a_b", "c"]);
        assert_eq!(flat.get("a_b"), Some(&Value::Integer(9)));
    }
}
