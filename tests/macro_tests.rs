use serde_tomlite::{encode, tomlite, Number, Table, Value};

#[test]
fn test_tomlite_macro_booleans() {
    assert_eq!(tomlite!(true), Value::Boolean(true));
    assert_eq!(tomlite!(false), Value::Boolean(false));
}

#[test]
fn test_tomlite_macro_numbers() {
    assert_eq!(tomlite!(42), Value::Number(Number::Integer(42)));
    assert_eq!(tomlite!(3.5), Value::Number(Number::Float(3.5)));
    assert_eq!(tomlite!(-123), Value::Number(Number::Integer(-123)));
}

#[test]
fn test_tomlite_macro_strings() {
    assert_eq!(tomlite!("hello world"), Value::String("hello world".to_string()));
    assert_eq!(tomlite!(""), Value::String(String::new()));

    let name = String::from("dynamic");
    assert_eq!(tomlite!(name), Value::from("dynamic"));
}

#[test]
fn test_tomlite_macro_arrays() {
    assert_eq!(tomlite!([]), Value::Array(vec![]));
    assert_eq!(
        tomlite!([1, "two", true]),
        Value::Array(vec![Value::from(1), Value::from("two"), Value::from(true)])
    );
    assert_eq!(
        tomlite!([[1], []]),
        Value::Array(vec![Value::Array(vec![Value::from(1)]), Value::Array(vec![])])
    );
}

#[test]
fn test_tomlite_macro_tables() {
    assert_eq!(tomlite!({}), Value::Table(Table::new()));

    let value = tomlite!({
        "database": {
            "host": "db.local",
            "replicas": ["a", "b"],
        },
        "debug": false,
    });

    let database = value.get("database").unwrap();
    assert_eq!(database.get("host"), Some(&Value::from("db.local")));
    assert_eq!(value.get("debug"), Some(&Value::Boolean(false)));
}

#[test]
fn test_tomlite_macro_encodes() {
    let value = tomlite!({ "name": "demo", "server": { "port": 8080 } });
    let root = value.as_table().unwrap();
    assert_eq!(encode(root), "name = \"demo\"\n\n[server]\nport = 8080\n");
}
