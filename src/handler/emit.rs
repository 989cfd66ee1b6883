//! Module body serialization.

use crate::diagnostic::Result;

/// Prefix of every emitted module.
pub const EXPORT_PREFIX: &str = "export default ";

/// Serialize rendered markup as `export default "<json string>"`.
pub fn emit_module(markup: &str) -> Result<String> {
    let literal = serde_json::to_string(markup)?;
    let mut code = String::with_capacity(EXPORT_PREFIX.len() + literal.len());
    code.push_str(EXPORT_PREFIX);
    code.push_str(&literal);
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_simple() {
        assert_eq!(emit_module("<pre></pre>").unwrap(), r#"export default "<pre></pre>""#);
    }

    #[test]
    fn test_emit_escapes() {
        let code = emit_module("a \"quoted\"\nline\\").unwrap();
        assert_eq!(code, r#"export default "a \"quoted\"\nline\\""#);
    }

    #[test]
    fn test_emit_parses_back() {
        let markup = "<span>\t&lt;tab&gt;</span>";
        let code = emit_module(markup).unwrap();
        let literal = code.strip_prefix(EXPORT_PREFIX).unwrap();
        let decoded: String = serde_json::from_str(literal).unwrap();
        assert_eq!(decoded, markup);
    }
}
