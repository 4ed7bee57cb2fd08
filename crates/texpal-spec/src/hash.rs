//! Canonical hashing of palette documents.
//!
//! A palette hash is `hex(BLAKE3(canonical_json(palette)))`, where the
//! canonical form sorts object keys and drops insignificant whitespace, so
//! two documents that differ only in formatting hash identically.

use crate::error::SpecError;
use crate::palette::Palette;

/// Computes the canonical BLAKE3 hash of a palette.
///
/// # Example
/// ```
/// use texpal_spec::{GridConfig, Palette};
/// use texpal_spec::hash::canonical_palette_hash;
///
/// let palette = Palette::new("props", GridConfig::default());
/// let hash = canonical_palette_hash(&palette).unwrap();
/// assert_eq!(hash.len(), 64);
/// ```
pub fn canonical_palette_hash(palette: &Palette) -> Result<String, SpecError> {
    let value = palette.to_value()?;
    Ok(canonical_value_hash(&value))
}

/// Computes the canonical BLAKE3 hash of a JSON value.
pub fn canonical_value_hash(value: &serde_json::Value) -> String {
    blake3_hash_str(&canonicalize_json(value))
}

/// Canonicalizes a JSON value: sorted keys, no whitespace, minimal numbers.
pub fn canonicalize_json(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "null".to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => format_number(n),
        serde_json::Value::String(s) => format_string(s),
        serde_json::Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(canonicalize_json).collect();
            format!("[{}]", items.join(","))
        }
        serde_json::Value::Object(obj) => {
            let mut entries: Vec<(&String, &serde_json::Value)> = obj.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            let pairs: Vec<String> = entries
                .into_iter()
                .map(|(k, v)| format!("{}:{}", format_string(k), canonicalize_json(v)))
                .collect();
            format!("{{{}}}", pairs.join(","))
        }
    }
}

fn format_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if !f.is_finite() => "null".to_string(),
        Some(f) if f == 0.0 => "0".to_string(),
        // Integer-valued floats print without a fraction so 1.0 and 1 agree.
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        Some(f) => format!("{}", f),
        None => "null".to_string(),
    }
}

fn format_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c < '\x20' => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Computes a BLAKE3 hash of arbitrary data as lowercase hex.
pub fn blake3_hash(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// Computes a BLAKE3 hash of a string as lowercase hex.
pub fn blake3_hash_str(s: &str) -> String {
    blake3_hash(s.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridConfig;
    use crate::material::SubMaterial;

    #[test]
    fn test_canonical_sorts_keys() {
        let value: serde_json::Value = serde_json::from_str(r#"{"b": 1, "a": [true, null]}"#).unwrap();
        assert_eq!(canonicalize_json(&value), r#"{"a":[true,null],"b":1}"#);
    }

    #[test]
    fn test_integer_valued_floats() {
        let value: serde_json::Value = serde_json::from_str(r#"[1.0, 0.5, 0.0]"#).unwrap();
        assert_eq!(canonicalize_json(&value), "[1,0.5,0]");
    }

    #[test]
    fn test_string_escaping() {
        let value = serde_json::Value::String("a\"b\n".to_string());
        assert_eq!(canonicalize_json(&value), r#""a\"b\n""#);
    }

    #[test]
    fn test_hash_ignores_formatting() {
        let compact = Palette::from_json(r#"{"name":"p","sub_materials":[{"name":"a"}]}"#).unwrap();
        let spaced = Palette::from_json(
            r#"{
                "sub_materials": [ { "name": "a" } ],
                "name": "p"
            }"#,
        )
        .unwrap();
        assert_eq!(
            canonical_palette_hash(&compact).unwrap(),
            canonical_palette_hash(&spaced).unwrap()
        );
    }

    #[test]
    fn test_hash_changes_with_parameters() {
        let mut palette = Palette::new("p", GridConfig::default());
        palette.add_sub_material(SubMaterial::new("a")).unwrap();
        let before = canonical_palette_hash(&palette).unwrap();

        palette.sub_materials[0].metallic = 1.0;
        let after = canonical_palette_hash(&palette).unwrap();
        assert_ne!(before, after);
    }
}
