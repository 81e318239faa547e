use crate::Value;

const INDENT: &str = "    ";

/// Re-indents compact document text for people to read.
///
/// Every container opens a new line and nests one level deeper, a space
/// follows each key separator, and empty `{}` or `[]` stay on one line.
/// Whitespace already present outside strings is discarded first, so
/// feeding pretty output back in gives the same result.
pub fn pretty(text: &str) -> String {
    let input = crate::parser::compact(text);
    let mut output = String::with_capacity(input.len() * 2);
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut index = 0;

    while index < input.len() {
        let character = input[index];

        if in_string {
            output.push(character);
            if escaped {
                escaped = false;
            } else if character == '\\' {
                escaped = true;
            } else if character == '"' {
                in_string = false;
            }
            index += 1;
            continue;
        }

        match character {
            '"' => {
                in_string = true;
                output.push(character);
            }
            '{' | '[' => {
                let close = if character == '{' { '}' } else { ']' };
                if input.get(index + 1) == Some(&close) {
                    output.push(character);
                    output.push(close);
                    index += 2;
                    continue;
                }
                depth += 1;
                output.push(character);
                newline(&mut output, depth);
            }
            '}' | ']' => {
                depth = depth.saturating_sub(1);
                newline(&mut output, depth);
                output.push(character);
            }
            ',' => {
                output.push(character);
                newline(&mut output, depth);
            }
            ':' => output.push_str(": "),
            other => output.push(other),
        }

        index += 1;
    }

    output
}

fn newline(output: &mut String, depth: usize) {
    output.push('\n');
    for _ in 0..depth {
        output.push_str(INDENT);
    }
}

impl Value {
    /// `serialize` followed by `pretty`
    pub fn to_pretty_string(&self) -> String {
        pretty(&self.serialize())
    }
}
