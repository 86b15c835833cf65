use serde_json::Value;

// Gateways differ in where they put the result; the first string found wins.
const FIELD_PATHS: &[&[PathSegment]] = &[
    &[PathSegment::Key("transformed_text")],
    &[PathSegment::Key("output")],
    &[PathSegment::Key("text")],
    &[PathSegment::Key("message")],
    &[PathSegment::Key("response")],
    &[PathSegment::Key("result")],
    &[
        PathSegment::Key("choices"),
        PathSegment::Index(0),
        PathSegment::Key("message"),
        PathSegment::Key("content"),
    ],
    &[
        PathSegment::Key("choices"),
        PathSegment::Index(0),
        PathSegment::Key("text"),
    ],
    &[
        PathSegment::Key("content"),
        PathSegment::Index(0),
        PathSegment::Key("text"),
    ],
];

enum PathSegment {
    Key(&'static str),
    Index(usize),
}

pub fn extract_transformed_text(body: &Value) -> Option<String> {
    if let Value::String(text) = body {
        return Some(text.clone());
    }

    FIELD_PATHS
        .iter()
        .find_map(|path| lookup(body, path))
        .map(str::to_string)
}

fn lookup<'a>(body: &'a Value, path: &[PathSegment]) -> Option<&'a str> {
    path.iter()
        .try_fold(body, |value, segment| match segment {
            PathSegment::Key(key) => value.get(*key),
            PathSegment::Index(index) => value.get(*index),
        })?
        .as_str()
}
