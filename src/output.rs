//! JSON text output for projected documents.
//!
//! The evaluator writes its projections straight into a `String` with the
//! helpers here. [`JsonPrinter`] renders a whole node tree, compact or
//! indented, and is what the CLI uses for `--pretty`.
//!
//! # Number rendering
//!
//! A number with no fractional part that fits exactly in an `f64` mantissa is
//! written without a decimal point. Other finite numbers use the shortest
//! representation that reads back to the same `f64`. NaN and infinities have
//! no JSON form and are written as `null`.
//!
//! # Examples
//!
//! ```
//! use jsonq::Value;
//! use jsonq::output::{to_json, to_json_pretty};
//!
//! let value = Value::from_json_str(r#"{"n":2.0,"s":"a\"b"}"#).unwrap();
//!
//! assert_eq!(to_json(&value), r#"{"n":2,"s":"a\"b"}"#);
//! assert_eq!(to_json_pretty(&value), "{\n  \"n\": 2,\n  \"s\": \"a\\\"b\"\n}");
//! ```

use std::fmt::Write;

use crate::{
    operations::Scalar,
    value::{JsonNode, Kind},
};

const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

pub struct JsonPrinter {
    pretty: bool,
}

impl JsonPrinter {
    pub fn new(pretty: bool) -> Self {
        JsonPrinter { pretty }
    }

    pub fn print<N: JsonNode>(&self, node: &N) -> String {
        let mut out = String::new();
        self.print_node(&mut out, node, 0);
        out
    }

    fn print_node<N: JsonNode>(&self, out: &mut String, node: &N, indent: usize) {
        match node.kind() {
            Kind::Array => self.print_array(out, node.elements(), indent),
            Kind::Object => self.print_object(out, node, indent),
            _ => write_scalar_node(out, node),
        }
    }

    fn print_array<N: JsonNode>(&self, out: &mut String, elements: &[N], indent: usize) {
        if elements.is_empty() {
            out.push_str("[]");
            return;
        }

        out.push('[');
        for (i, element) in elements.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            self.newline(out, indent + 1);
            self.print_node(out, element, indent + 1);
        }
        self.newline(out, indent);
        out.push(']');
    }

    fn print_object<N: JsonNode>(&self, out: &mut String, node: &N, indent: usize) {
        let mut first = true;
        out.push('{');
        for (key, value) in node.members() {
            if !first {
                out.push(',');
            }
            first = false;
            self.newline(out, indent + 1);
            write_string(out, key);
            out.push(':');
            if self.pretty {
                out.push(' ');
            }
            self.print_node(out, value, indent + 1);
        }
        if !first {
            self.newline(out, indent);
        }
        out.push('}');
    }

    fn newline(&self, out: &mut String, level: usize) {
        if self.pretty {
            out.push('\n');
            out.push_str(&"  ".repeat(level));
        }
    }
}

/// Writes `s` as a quoted JSON string.
pub fn write_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

pub fn write_number(out: &mut String, n: f64) {
    if !n.is_finite() {
        out.push_str("null");
    } else if n.fract() == 0.0 && n.abs() < MAX_EXACT_INTEGER {
        let _ = write!(out, "{}", n as i64);
    } else {
        let _ = write!(out, "{:?}", n);
    }
}

pub fn write_scalar(out: &mut String, scalar: &Scalar<'_>) {
    match scalar {
        Scalar::Null => out.push_str("null"),
        Scalar::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Scalar::Int(n) => {
            let _ = write!(out, "{}", n);
        }
        Scalar::Float(n) => write_number(out, *n),
        Scalar::Str(s) => write_string(out, s),
    }
}

fn write_scalar_node<N: JsonNode>(out: &mut String, node: &N) {
    match Scalar::from_node(node) {
        Some(scalar) => write_scalar(out, &scalar),
        None => out.push_str("null"),
    }
}

/// Writes `"key":` for an object member.
pub fn write_key(out: &mut String, key: &str) {
    write_string(out, key);
    out.push(':');
}

/// Writes any node verbatim in compact form.
pub fn write_node<N: JsonNode>(out: &mut String, node: &N) {
    JsonPrinter::new(false).print_node(out, node, 0);
}

/// Converts a node to compact JSON text, keys in document order.
pub fn to_json<N: JsonNode>(node: &N) -> String {
    JsonPrinter::new(false).print(node)
}

/// Converts a node to JSON text indented by two spaces per level.
pub fn to_json_pretty<N: JsonNode>(node: &N) -> String {
    JsonPrinter::new(true).print(node)
}
