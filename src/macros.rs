/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// Objects become tables, arrays become arrays, and any other expression is
/// converted with `Value::from`.
///
/// ```rust
/// use serde_tomlite::{tomlite, Value};
///
/// let server = tomlite!({
///     "host": "localhost",
///     "ports": [8080, 8081],
///     "tls": { "enabled": true }
/// });
///
/// assert_eq!(server.get("host").and_then(Value::as_str), Some("localhost"));
/// ```
#[macro_export]
macro_rules! tomlite {
    (true) => {
        $crate::Value::Boolean(true)
    };

    (false) => {
        $crate::Value::Boolean(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::tomlite!($elem)),*])
    };

    ({}) => {
        $crate::Value::Table($crate::Table::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut table = $crate::Table::new();
        $(
            table.insert($key.to_string(), $crate::tomlite!($value));
        )*
        $crate::Value::Table(table)
    }};

    ($s:expr) => {
        $crate::Value::from($s)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Number, Table, Value};

    #[test]
    fn test_tomlite_macro_primitives() {
        assert_eq!(tomlite!(true), Value::Boolean(true));
        assert_eq!(tomlite!(false), Value::Boolean(false));
        assert_eq!(tomlite!(42), Value::Number(Number::Integer(42)));
        assert_eq!(tomlite!(3.5), Value::Number(Number::Float(3.5)));
        assert_eq!(tomlite!("hello"), Value::String("hello".to_string()));
    }

    #[test]
    fn test_tomlite_macro_nesting() {
        assert_eq!(tomlite!({}), Value::Table(Table::new()));
        assert_eq!(tomlite!([]), Value::Array(vec![]));

        let value = tomlite!({
            "name": "apple",
            "sizes": [1, 2],
            "meta": { "fresh": true }
        });

        let table = value.as_table().unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(
            table.get("sizes"),
            Some(&Value::Array(vec![Value::from(1), Value::from(2)]))
        );
        assert_eq!(
            value.get("meta").and_then(|m| m.get("fresh")),
            Some(&Value::Boolean(true))
        );
    }
}
