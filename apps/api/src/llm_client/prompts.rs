// Shared prompt fragments.
// Each flow defines its own prompts.rs alongside it; this file holds the
// cross-cutting pieces and the placeholder filler they all use.

/// Appended to every prompt whose answer is parsed as JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "\
Respond with a single valid JSON object only. \
Do not wrap it in markdown code fences and do not add commentary before or after it.";

/// Substitutes `{key}` placeholders in `template` in a single pass.
///
/// Inserted values are never rescanned, so user text containing `{name}` stays
/// literal. Unknown placeholders and lone braces (JSON examples) are copied as-is.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];

        let replacement = tail[1..].find('}').and_then(|close| {
            let key = &tail[1..1 + close];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, value)| (*value, close + 2))
        });

        match replacement {
            Some((value, consumed)) => {
                out.push_str(value);
                rest = &tail[consumed..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
