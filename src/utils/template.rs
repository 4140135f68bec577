/// Minimal `{{name}}` template rendering.
///
/// Single left-to-right pass over the template: substituted values are never
/// re-scanned, so a value containing a placeholder token stays literal.
/// Placeholders with no entry in the value map are left untouched.
pub fn render(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];

        match after_open.find("}}") {
            Some(end) => {
                let name = &after_open[..end];
                match values.iter().find(|(key, _)| *key == name) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push_str("{{");
                        out.push_str(name);
                        out.push_str("}}");
                    }
                }
                rest = &after_open[end + 2..];
            }
            None => {
                // Unterminated placeholder: emit the rest verbatim
                out.push_str(&rest[start..]);
                return out;
            }
        }
    }

    out.push_str(rest);
    out
}
