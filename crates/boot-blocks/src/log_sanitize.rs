const MAX_LOG_CHARS: usize = 2048;

/// Strips terminal escape sequences, control characters, and bidi format
/// characters from one line of child-process output so it can be forwarded
/// to the boot log verbatim.
pub fn sanitize_log_line(input: &str) -> String {
    let mut out = String::with_capacity(input.len().min(MAX_LOG_CHARS));
    let mut count = 0usize;
    let mut truncated = false;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\x1b' {
            match chars.peek().copied() {
                // CSI: parameters then a final byte in '@'..='~'.
                Some('[') => {
                    chars.next();
                    for n in chars.by_ref() {
                        if ('@'..='~').contains(&n) {
                            break;
                        }
                    }
                }
                // OSC: runs to BEL.
                Some(']') => {
                    chars.next();
                    for n in chars.by_ref() {
                        if n == '\x07' {
                            break;
                        }
                    }
                }
                Some(_) => {
                    chars.next();
                }
                None => {}
            }
            continue;
        }

        if c == '\t' {
            out.push(' ');
            count += 1;
        } else if c.is_control() || is_bidi_control(c) {
            continue;
        } else {
            out.push(c);
            count += 1;
        }

        if count >= MAX_LOG_CHARS {
            truncated = true;
            break;
        }
    }

    if truncated {
        out.push_str(" ...[truncated]");
    }
    out
}

fn is_bidi_control(c: char) -> bool {
    c == '\u{061C}'
        || c == '\u{200E}'
        || c == '\u{200F}'
        || ('\u{202A}'..='\u{202E}').contains(&c)
        || ('\u{2066}'..='\u{2069}').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::sanitize_log_line;

    #[test]
    fn strips_csi_and_osc_sequences() {
        let input = "ok \u{1b}[32mgreen\u{1b}[0m \u{1b}]0;title\u{7} done";
        assert_eq!(sanitize_log_line(input), "ok green  done");
    }

    #[test]
    fn strips_controls_and_maps_tabs() {
        let input = "a\tb\r\nc\u{202e}d";
        assert_eq!(sanitize_log_line(input), "a bcd");
    }

    #[test]
    fn caps_very_long_lines() {
        let input = "x".repeat(5000);
        let got = sanitize_log_line(&input);
        assert!(got.ends_with("...[truncated]"));
        assert!(got.len() < input.len());
    }
}
