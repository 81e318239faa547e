use crate::{ParseError, Value};

/// Deepest container nesting `Value::parse` accepts
pub const MAX_DEPTH: usize = 256;

impl Value {
    /// Parses document text.
    ///
    /// Whitespace outside of strings is ignored, so both compact and pretty
    /// printed text are accepted. Bare tokens are classified by content:
    /// `null` or nothing is Null, anything holding a `.` is Decimal, `true`
    /// and `false` are Bool, and everything else is Int.
    pub fn parse(text: &str) -> Result<Value, ParseError> {
        let mut parser = Parser::new(text);
        let value = parser.parse_value()?;
        match parser.peek() {
            None => Ok(value),
            Some(_) => Err(ParseError::TrailingCharacters {
                position: parser.position,
            }),
        }
    }

    /// Parses document text, producing an empty Object when the text is
    /// malformed.
    pub fn parse_lossy(text: &str) -> Value {
        Value::parse(text).unwrap_or_else(|_| Value::object())
    }
}

/// Drops whitespace that sits outside of strings
pub(crate) fn compact(text: &str) -> Vec<char> {
    let mut output = Vec::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;

    for character in text.chars() {
        if in_string {
            output.push(character);
            if escaped {
                escaped = false;
            } else if character == '\\' {
                escaped = true;
            } else if character == '"' {
                in_string = false;
            }
            continue;
        }

        match character {
            ' ' | '\t' | '\n' | '\r' => {}
            '"' => {
                in_string = true;
                output.push(character);
            }
            other => output.push(other),
        }
    }

    output
}

struct Parser {
    input: Vec<char>,
    position: usize,
    depth: usize,
}

impl Parser {
    fn new(text: &str) -> Self {
        Self {
            input: compact(text),
            position: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn next(&mut self) -> Option<char> {
        let character = self.peek()?;
        self.position += 1;
        Some(character)
    }

    fn parse_value(&mut self) -> Result<Value, ParseError> {
        match self.peek() {
            Some('{') => self.nested(Parser::parse_object),
            Some('[') => self.nested(Parser::parse_array),
            Some('"') => Ok(Value::String(self.parse_quoted()?)),
            Some(_) => self.parse_bare(),
            None => Err(ParseError::UnexpectedEnd {
                position: self.position,
            }),
        }
    }

    fn nested(
        &mut self,
        parse: fn(&mut Parser) -> Result<Value, ParseError>,
    ) -> Result<Value, ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(ParseError::TooDeep {
                position: self.position,
                max: MAX_DEPTH,
            });
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn parse_object(&mut self) -> Result<Value, ParseError> {
        // opening brace
        self.position += 1;
        let mut value = Value::object();

        if self.peek() == Some('}') {
            self.position += 1;
            return Ok(value);
        }

        loop {
            match self.peek() {
                Some('"') => {}
                // tolerate a trailing separator before the close
                Some('}') => {
                    self.position += 1;
                    return Ok(value);
                }
                Some(_) => {
                    return Err(ParseError::ExpectedKey {
                        position: self.position,
                    })
                }
                None => {
                    return Err(ParseError::UnexpectedEnd {
                        position: self.position,
                    })
                }
            }

            let key = self.parse_quoted()?;
            self.expect(':')?;
            let item = self.parse_value()?;
            value.add(key, item);

            match self.next() {
                Some(',') => continue,
                Some('}') => return Ok(value),
                Some(found) => {
                    return Err(ParseError::UnexpectedCharacter {
                        found,
                        position: self.position - 1,
                    })
                }
                None => {
                    return Err(ParseError::UnexpectedEnd {
                        position: self.position,
                    })
                }
            }
        }
    }

    fn parse_array(&mut self) -> Result<Value, ParseError> {
        // opening bracket
        self.position += 1;
        let mut items = Vec::new();

        if self.peek() == Some(']') {
            self.position += 1;
            return Ok(Value::Array(items));
        }

        loop {
            items.push(self.parse_value()?);

            match self.next() {
                Some(',') => {
                    if self.peek() == Some(']') {
                        self.position += 1;
                        return Ok(Value::Array(items));
                    }
                }
                Some(']') => return Ok(Value::Array(items)),
                Some(found) => {
                    return Err(ParseError::UnexpectedCharacter {
                        found,
                        position: self.position - 1,
                    })
                }
                None => {
                    return Err(ParseError::UnexpectedEnd {
                        position: self.position,
                    })
                }
            }
        }
    }

    fn parse_quoted(&mut self) -> Result<String, ParseError> {
        let start = self.position;
        // opening quote
        self.position += 1;
        let mut text = String::new();

        loop {
            match self.next() {
                Some('"') => return Ok(text),
                Some('\\') => match self.next() {
                    Some('n') => text.push('\n'),
                    Some('t') => text.push('\t'),
                    Some('\\') => text.push('\\'),
                    Some('"') => text.push('"'),
                    Some(other) => {
                        text.push('\\');
                        text.push(other);
                    }
                    None => return Err(ParseError::UnterminatedString { start }),
                },
                Some(other) => text.push(other),
                None => return Err(ParseError::UnterminatedString { start }),
            }
        }
    }

    fn parse_bare(&mut self) -> Result<Value, ParseError> {
        let mut token = String::new();

        while let Some(character) = self.peek() {
            match character {
                ',' | '}' | ']' => break,
                '"' | ':' | '{' | '[' => {
                    return Err(ParseError::UnexpectedCharacter {
                        found: character,
                        position: self.position,
                    })
                }
                other => {
                    token.push(other);
                    self.position += 1;
                }
            }
        }

        Ok(classify(token))
    }

    fn expect(&mut self, expected: char) -> Result<(), ParseError> {
        match self.next() {
            Some(character) if character == expected => Ok(()),
            Some(found) => Err(ParseError::UnexpectedCharacter {
                found,
                position: self.position - 1,
            }),
            None => Err(ParseError::UnexpectedEnd {
                position: self.position,
            }),
        }
    }
}

fn classify(token: String) -> Value {
    if token.is_empty() || token == "null" {
        Value::Null
    } else if token.contains('.') {
        Value::Decimal(token)
    } else if token == "true" {
        Value::Bool(true)
    } else if token == "false" {
        Value::Bool(false)
    } else {
        Value::Int(token)
    }
}
