use std::{
    io::{self, BufRead, Write},
    time::Duration,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde_json::{Map, Value};

use crate::{http::ApiResponse, types::ShiftKind};

/// One `key=value` pair given with `--field`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub key: String,
    pub value: String,
}

/// clap value parser for `--field key=value`.
pub fn parse_field(s: &str) -> Result<Field, String> {
    let Some((key, value)) = s.split_once('=') else {
        return Err(format!("expected key=value, got '{s}'"));
    };
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }

    Ok(Field {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// clap value parser for `--kind`. Accepts the API names and the French
/// labels (`matin`, `soir`).
pub fn parse_shift_kind(s: &str) -> Result<ShiftKind, String> {
    match s.trim().to_lowercase().as_str() {
        "morning" | "matin" => Ok(ShiftKind::Morning),
        "evening" | "soir" => Ok(ShiftKind::Evening),
        other => Err(format!("unknown shift type '{other}', expected morning or evening")),
    }
}

/// Builds a JSON object from fields. Repeating a key collects its values
/// into an array, which goes out as `key[]` in form bodies.
pub fn fields_to_value(fields: &[Field]) -> Value {
    let mut map = Map::new();
    for field in fields {
        let value = Value::String(field.value.clone());
        match map.get_mut(&field.key) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                map.insert(field.key.clone(), value);
            }
        }
    }
    Value::Object(map)
}

pub fn print_json(response: &ApiResponse) {
    match serde_json::to_string_pretty(&response.value()) {
        Ok(pretty) if !response.body.trim().is_empty() => println!("{pretty}"),
        _ => println!("{}", response.body),
    }
}

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

/// Asks a yes/no question on stdin; anything but `y`/`yes`/`o`/`oui` is no.
pub fn confirm(question: &str) -> bool {
    print!("{question} [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }
    read_answer(&mut io::stdin().lock())
}

fn read_answer(input: &mut impl BufRead) -> bool {
    let mut answer = String::new();
    if input.read_line(&mut answer).is_err() {
        return false;
    }
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "o" | "oui"
    )
}

/// Reads one line from stdin without the trailing newline.
pub fn prompt_line(question: &str) -> io::Result<String> {
    print!("{question}: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn answers() {
        assert!(read_answer(&mut "oui\n".as_bytes()));
        assert!(read_answer(&mut "Y\n".as_bytes()));
        assert!(!read_answer(&mut "\n".as_bytes()));
        assert!(!read_answer(&mut "nope\n".as_bytes()));
    }

    #[test]
    fn shift_kinds() {
        assert_eq!(parse_shift_kind("Matin"), Ok(ShiftKind::Morning));
        assert_eq!(parse_shift_kind("evening"), Ok(ShiftKind::Evening));
        assert!(parse_shift_kind("night").is_err());
    }

    #[test]
    fn repeated_keys_become_arrays() {
        let fields = vec![
            parse_field("user_id=4").unwrap(),
            parse_field("days=monday").unwrap(),
            parse_field("days=friday").unwrap(),
        ];
        assert_eq!(
            fields_to_value(&fields),
            json!({"user_id": "4", "days": ["monday", "friday"]})
        );
    }
}
