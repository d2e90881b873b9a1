use crate::expression::errors::EvalError;

/// A complete call `name(arg,..)` whose arguments contain no further call
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CallSite<'t> {
    pub name: &'t str,
    /// Byte offset of the first character of `name`.
    pub start: usize,
    /// Byte offset just past the closing parenthesis.
    pub end: usize,
    pub args: Vec<&'t str>,
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

/// Find the innermost call in `text`.
///
/// The right-most `name(` cannot have a call inside its own argument list,
/// since that call would open further right.
pub(crate) fn innermost_call(text: &str) -> Result<Option<CallSite<'_>>, String> {
    let bytes = text.as_bytes();

    let Some(open) = (1..bytes.len())
        .rev()
        .find(|&i| bytes[i] == b'(' && is_name_byte(bytes[i - 1]))
    else {
        return Ok(None);
    };

    let start = (0..open)
        .rev()
        .take_while(|&i| is_name_byte(bytes[i]))
        .last()
        .unwrap_or(open);

    let mut depth = 1usize;
    let mut close = None;
    for (i, &b) in bytes.iter().enumerate().skip(open + 1) {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(i);
                    break;
                }
            }
            _ => {}
        }
    }
    let close = close.ok_or_else(|| format!("unbalanced parenthesis at byte {}", open))?;

    Ok(Some(CallSite {
        name: &text[start..open],
        start,
        end: close + 1,
        args: split_arguments(&text[open + 1..close]),
    }))
}

/// Split an argument list on commas outside nested parentheses.
pub(crate) fn split_arguments(span: &str) -> Vec<&str> {
    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut from = 0;
    for (i, c) in span.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                args.push(&span[from..i]);
                from = i + 1;
            }
            _ => {}
        }
    }
    args.push(&span[from..]);
    args
}

/// Repeatedly replace the innermost call with `reduce(name, args)` until no
/// call is left, returning the remaining text.
pub(crate) fn reduce_calls<F>(equation: &str, mut reduce: F) -> Result<String, EvalError>
where
    F: FnMut(&str, &[&str]) -> Result<String, EvalError>,
{
    let mut text = equation.to_string();
    loop {
        let site = innermost_call(&text).map_err(|reason| EvalError::malformed(equation, reason))?;
        let Some(site) = site else {
            return Ok(text);
        };
        let (start, end) = (site.start, site.end);
        let replacement = reduce(site.name, &site.args)?;
        text.replace_range(start..end, &replacement);
    }
}
