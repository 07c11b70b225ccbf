//! Sanitizer — LLM output cleanup and LaTeX string safety.
//!
//! The generation service returns text that only approximates the requested
//! constraints, so every response passes through here before it touches a
//! template. Structural LaTeX commands must pass through untouched; callers
//! apply `escape_reserved` to literal prose spans only.

/// Strips a markdown code fence wrapping the whole text, if present.
///
/// Grammar: optional leading fence line (```` ``` ```` plus an optional
/// alphanumeric language tag), body, optional trailing bare fence line.
/// Text that does not start with a fence line is only trimmed. Idempotent
/// on already-stripped input.
pub fn strip_fences(text: &str) -> String {
    let trimmed = text.trim();
    if !trimmed.starts_with("```") {
        return trimmed.to_string();
    }

    let mut lines = trimmed.lines();
    let opening = lines.next().unwrap_or("");
    let tag = opening.trim_start_matches('`').trim();
    if !tag.chars().all(|c| c.is_ascii_alphanumeric()) {
        // Not a fence line (e.g. backticks followed by prose) — leave as-is.
        return trimmed.to_string();
    }

    let mut body: Vec<&str> = lines.collect();
    if body.last().map(|l| l.trim() == "```").unwrap_or(false) {
        body.pop();
    }
    body.join("\n").trim().to_string()
}

/// Removes every line that is itself a fence marker, keeping all other lines
/// in order. Used when fences may appear mid-document rather than only at
/// the boundaries.
pub fn strip_markdown_lines(text: &str) -> String {
    text.trim()
        .lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Escapes LaTeX-reserved characters in literal prose.
///
/// Single left-to-right pass over the ORIGINAL characters — backslashes
/// introduced by an earlier replacement are never re-scanned, so applying
/// this to structural commands or to its own output corrupts them. Callers
/// must restrict it to prose spans.
pub fn escape_reserved(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str(r"\&"),
            '%' => out.push_str(r"\%"),
            '$' => out.push_str(r"\$"),
            '#' => out.push_str(r"\#"),
            '_' => out.push_str(r"\_"),
            '{' => out.push_str(r"\{"),
            '}' => out.push_str(r"\}"),
            '~' => out.push_str(r"\textasciitilde{}"),
            '^' => out.push_str(r"\^{}"),
            '\\' => out.push_str(r"\textbackslash{}"),
            _ => out.push(ch),
        }
    }
    out
}

/// Builds a download-safe filename component from a company name:
/// alphanumeric, space, and underscore only, with space runs collapsed to a
/// single underscore.
pub fn sanitize_filename(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ' || *c == '_')
        .collect();

    kept.split_whitespace().collect::<Vec<_>>().join("_")
}
