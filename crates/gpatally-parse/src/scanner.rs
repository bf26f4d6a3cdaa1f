//! Content-stream scanner: raw PDF operator/operand parsing.
//!
//! Turns decoded content stream bytes into a sequence of [`Operator`]s,
//! each carrying the operands that preceded it on the operand stack. Only
//! the object kinds that can appear in a content stream are modeled;
//! inline image payloads are skipped wholesale since they carry no text.

use crate::error::BackendError;

/// A content stream operand value.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Integer number (e.g. `42`, `-7`).
    Integer(i64),
    /// Real number (e.g. `3.14`, `.5`).
    Real(f64),
    /// Name object (e.g. `/F1`), stored without the leading `/`.
    Name(String),
    /// String object, literal `(...)` or hex `<...>`, as raw bytes.
    Str(Vec<u8>),
    /// Array of operands (e.g. the `TJ` argument).
    Array(Vec<Operand>),
    /// Dictionary object (`<< /Key value ... >>`), as key-value pairs.
    Dictionary(Vec<(String, Operand)>),
    /// Boolean value.
    Boolean(bool),
    /// The null object.
    Null,
}

impl Operand {
    /// Numeric value of an `Integer` or `Real` operand.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Operand::Integer(i) => Some(*i as f64),
            Operand::Real(f) => Some(*f),
            _ => None,
        }
    }
}

/// A content stream operator with its preceding operands.
#[derive(Debug, Clone, PartialEq)]
pub struct Operator {
    /// Operator name (e.g. `"BT"`, `"Tf"`, `"Tj"`).
    pub name: String,
    /// Operands that preceded this operator.
    pub operands: Vec<Operand>,
}

/// Parse content stream bytes into a sequence of operators.
///
/// Comments are stripped, unknown bytes are skipped, and inline images
/// (`BI ... ID ... EI`) are consumed without producing an operator.
///
/// # Errors
///
/// Returns [`BackendError::Interpreter`] for structurally broken streams
/// (unterminated strings or arrays).
pub fn scan_operators(input: &[u8]) -> Result<Vec<Operator>, BackendError> {
    let mut cursor = Cursor { input, pos: 0 };
    let mut operators = Vec::new();
    let mut stack: Vec<Operand> = Vec::new();

    loop {
        cursor.skip_whitespace_and_comments();
        let Some(byte) = cursor.peek() else { break };

        match byte {
            b'(' | b'<' | b'[' | b'/' | b'0'..=b'9' | b'+' | b'-' | b'.' => {
                stack.push(cursor.value()?);
            }
            b')' | b'>' | b']' | b'{' | b'}' => {
                // Stray delimiter at top level: skip rather than fail.
                cursor.pos += 1;
            }
            _ => {
                let keyword = cursor.keyword();
                match keyword.as_str() {
                    "true" => stack.push(Operand::Boolean(true)),
                    "false" => stack.push(Operand::Boolean(false)),
                    "null" => stack.push(Operand::Null),
                    "BI" => {
                        cursor.skip_inline_image();
                        stack.clear();
                    }
                    "" => cursor.pos += 1,
                    _ => operators.push(Operator {
                        name: keyword,
                        operands: std::mem::take(&mut stack),
                    }),
                }
            }
        }
    }

    Ok(operators)
}

/// Returns `true` for a PDF whitespace byte.
fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | b'\n' | 0x0C | 0x00)
}

/// Returns `true` for a PDF delimiter byte.
fn is_delimiter(byte: u8) -> bool {
    matches!(
        byte,
        b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%'
    )
}

struct Cursor<'a> {
    input: &'a [u8],
    pos: usize,
}

impl Cursor<'_> {
    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(byte) = self.peek() {
            if is_whitespace(byte) {
                self.pos += 1;
            } else if byte == b'%' {
                while let Some(b) = self.peek() {
                    if b == b'\n' || b == b'\r' {
                        break;
                    }
                    self.pos += 1;
                }
            } else {
                break;
            }
        }
    }

    /// Parse one object starting at the current position.
    fn value(&mut self) -> Result<Operand, BackendError> {
        match self.peek() {
            Some(b'(') => Ok(Operand::Str(self.literal_string()?)),
            Some(b'<') if self.input.get(self.pos + 1) == Some(&b'<') => {
                Ok(Operand::Dictionary(self.dictionary()?))
            }
            Some(b'<') => Ok(Operand::Str(self.hex_string()?)),
            Some(b'[') => {
                self.pos += 1;
                Ok(Operand::Array(self.array()?))
            }
            Some(b'/') => Ok(Operand::Name(self.name())),
            Some(b'0'..=b'9' | b'+' | b'-' | b'.') => self.number(),
            _ => match self.keyword().as_str() {
                "true" => Ok(Operand::Boolean(true)),
                "false" => Ok(Operand::Boolean(false)),
                // Lenient: anything unrecognized in value position reads
                // as null rather than failing the whole stream.
                _ => Ok(Operand::Null),
            },
        }
    }

    /// Collect a regular-character run (operator names, keywords).
    fn keyword(&mut self) -> String {
        let start = self.pos;
        while let Some(byte) = self.peek() {
            if is_whitespace(byte) || is_delimiter(byte) {
                break;
            }
            self.pos += 1;
        }
        String::from_utf8_lossy(&self.input[start..self.pos]).into_owned()
    }

    /// Parse a name object. Assumes the cursor is at `/`.
    fn name(&mut self) -> String {
        self.pos += 1; // skip '/'
        self.keyword()
    }

    /// Parse an integer or real number.
    fn number(&mut self) -> Result<Operand, BackendError> {
        let start = self.pos;
        while let Some(byte) = self.peek() {
            if matches!(byte, b'0'..=b'9' | b'+' | b'-' | b'.') {
                self.pos += 1;
            } else {
                break;
            }
        }
        let text = std::str::from_utf8(&self.input[start..self.pos])
            .map_err(|_| BackendError::Interpreter("non-ASCII number".to_string()))?;
        if text.contains('.') {
            text.parse::<f64>()
                .map(Operand::Real)
                .map_err(|_| BackendError::Interpreter(format!("malformed number {text:?}")))
        } else {
            text.parse::<i64>()
                .map(Operand::Integer)
                .map_err(|_| BackendError::Interpreter(format!("malformed number {text:?}")))
        }
    }

    /// Parse a literal string `(...)` with balanced parentheses and escape
    /// sequences. Assumes the cursor is at `(`.
    fn literal_string(&mut self) -> Result<Vec<u8>, BackendError> {
        self.pos += 1; // skip '('
        let mut result = Vec::new();
        let mut depth = 1u32;

        while let Some(byte) = self.peek() {
            self.pos += 1;
            match byte {
                b'(' => {
                    depth += 1;
                    result.push(b'(');
                }
                b')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(result);
                    }
                    result.push(b')');
                }
                b'\\' => {
                    let Some(escaped) = self.peek() else { break };
                    self.pos += 1;
                    match escaped {
                        b'n' => result.push(b'\n'),
                        b'r' => result.push(b'\r'),
                        b't' => result.push(b'\t'),
                        b'b' => result.push(0x08),
                        b'f' => result.push(0x0C),
                        b'\n' => {} // line continuation
                        b'\r' => {
                            if self.peek() == Some(b'\n') {
                                self.pos += 1;
                            }
                        }
                        b'0'..=b'7' => {
                            // Octal escape, 1-3 digits.
                            let mut value = escaped - b'0';
                            for _ in 0..2 {
                                match self.peek() {
                                    Some(digit @ b'0'..=b'7') => {
                                        value = value.wrapping_mul(8).wrapping_add(digit - b'0');
                                        self.pos += 1;
                                    }
                                    _ => break,
                                }
                            }
                            result.push(value);
                        }
                        other => result.push(other),
                    }
                }
                other => result.push(other),
            }
        }

        Err(BackendError::Interpreter(
            "unterminated literal string".to_string(),
        ))
    }

    /// Parse a hex string `<...>`. Assumes the cursor is at `<`.
    fn hex_string(&mut self) -> Result<Vec<u8>, BackendError> {
        self.pos += 1; // skip '<'
        let mut digits = Vec::new();

        loop {
            match self.peek() {
                Some(b'>') => {
                    self.pos += 1;
                    break;
                }
                Some(byte) if is_whitespace(byte) => self.pos += 1,
                Some(byte) => {
                    digits.push(hex_digit(byte)?);
                    self.pos += 1;
                }
                None => {
                    return Err(BackendError::Interpreter(
                        "unterminated hex string".to_string(),
                    ));
                }
            }
        }

        // An odd digit count implies a trailing zero.
        if digits.len() % 2 != 0 {
            digits.push(0);
        }
        Ok(digits.chunks(2).map(|pair| (pair[0] << 4) | pair[1]).collect())
    }

    /// Parse array elements until `]`. Assumes `[` is already consumed.
    fn array(&mut self) -> Result<Vec<Operand>, BackendError> {
        let mut elements = Vec::new();
        loop {
            self.skip_whitespace_and_comments();
            match self.peek() {
                Some(b']') => {
                    self.pos += 1;
                    return Ok(elements);
                }
                Some(_) => elements.push(self.value()?),
                None => {
                    return Err(BackendError::Interpreter("unterminated array".to_string()));
                }
            }
        }
    }

    /// Parse a dictionary `<< ... >>`. Assumes the cursor is at the first `<`.
    fn dictionary(&mut self) -> Result<Vec<(String, Operand)>, BackendError> {
        self.pos += 2; // skip '<<'
        let mut entries = Vec::new();
        loop {
            self.skip_whitespace_and_comments();
            match self.peek() {
                Some(b'>') if self.input.get(self.pos + 1) == Some(&b'>') => {
                    self.pos += 2;
                    return Ok(entries);
                }
                Some(b'/') => {
                    let key = self.name();
                    self.skip_whitespace_and_comments();
                    let value = self.value()?;
                    entries.push((key, value));
                }
                Some(_) => self.pos += 1, // tolerate junk between entries
                None => {
                    return Err(BackendError::Interpreter(
                        "unterminated dictionary".to_string(),
                    ));
                }
            }
        }
    }

    /// Skip an inline image: everything from the current position (just
    /// past `BI`) through the closing `EI`.
    fn skip_inline_image(&mut self) {
        while self.pos + 1 < self.input.len() {
            if self.input[self.pos] == b'E'
                && self.input[self.pos + 1] == b'I'
                && self.pos > 0
                && is_whitespace(self.input[self.pos - 1])
            {
                let after = self.input.get(self.pos + 2).copied();
                if after.is_none_or(|b| is_whitespace(b) || is_delimiter(b)) {
                    self.pos += 2;
                    return;
                }
            }
            self.pos += 1;
        }
        self.pos = self.input.len();
    }
}

/// Convert a hex digit byte to its value.
fn hex_digit(byte: u8) -> Result<u8, BackendError> {
    match byte {
        b'0'..=b'9' => Ok(byte - b'0'),
        b'a'..=b'f' => Ok(byte - b'a' + 10),
        b'A'..=b'F' => Ok(byte - b'A' + 10),
        _ => Err(BackendError::Interpreter(format!(
            "invalid hex digit: {:?}",
            byte as char
        ))),
    }
}
