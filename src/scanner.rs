//! Source scanner for Go files
//!
//! Extracts the two things dependency tracking needs from a `.go` file:
//! imported package paths and raw `// +build` constraint lines. Everything
//! else in the file is ignored; scanning never fails.
//!
//! Imports are found with a small lexer feeding a three-state machine, so
//! that `import` inside a string, a comment or a longer identifier is never
//! mistaken for the keyword. Constraint lines are found with a separate line
//! pass since they live in comments the lexer skips.

/// Facts extracted from one file's content.
///
/// A pure function of the content: identical text always yields identical
/// facts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileFacts {
    /// Imported package paths in file order, duplicates kept
    pub imports: Vec<String>,
    /// Text following `+build` on each constraint line, trimmed, in file order
    pub constraints: Vec<String>,
}

impl FileFacts {
    pub fn is_unconstrained(&self) -> bool {
        self.constraints.is_empty()
    }
}

/// Scan file content for imports and build constraints
pub fn scan(content: &str) -> FileFacts {
    FileFacts {
        imports: scan_imports(content),
        constraints: scan_constraints(content),
    }
}

/// Collect every `// +build` line's remainder
pub fn scan_constraints(content: &str) -> Vec<String> {
    content.lines().filter_map(constraint_remainder).collect()
}

fn constraint_remainder(line: &str) -> Option<String> {
    let comment = line.trim_start().strip_prefix("//")?;
    let rest = comment.trim_start_matches('/').trim_start();
    let after = rest.strip_prefix("+build")?;

    // `+build` must be followed by whitespace, not `+buildx`
    if !after.starts_with(char::is_whitespace) {
        return None;
    }

    let expr = after.trim();
    if expr.is_empty() {
        None
    } else {
        Some(expr.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImportState {
    Outside,
    /// Seen `import`, waiting for an alias, a path, or `(`
    AfterImport,
    /// Inside `import ( ... )`
    InGroup,
}

/// Collect imported package paths in declaration order
pub fn scan_imports(content: &str) -> Vec<String> {
    let mut imports = Vec::new();
    let mut state = ImportState::Outside;

    for token in Lexer::new(content) {
        state = match (state, token) {
            (ImportState::Outside, Token::Ident("import")) => ImportState::AfterImport,
            (ImportState::Outside, _) => ImportState::Outside,

            (ImportState::AfterImport, Token::LParen) => ImportState::InGroup,
            (ImportState::AfterImport, Token::Str(path)) => {
                imports.push(path.to_string());
                ImportState::Outside
            }
            // alias: name, `_` or `.`
            (ImportState::AfterImport, Token::Ident(_)) | (ImportState::AfterImport, Token::Dot) => {
                ImportState::AfterImport
            }
            (ImportState::AfterImport, _) => ImportState::Outside,

            (ImportState::InGroup, Token::Str(path)) => {
                imports.push(path.to_string());
                ImportState::InGroup
            }
            (ImportState::InGroup, Token::RParen) => ImportState::Outside,
            (ImportState::InGroup, _) => ImportState::InGroup,
        };
    }

    imports
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Ident(&'a str),
    /// String literal contents without the quotes (escapes left as written)
    Str(&'a str),
    LParen,
    RParen,
    Dot,
    Other,
}

/// Just enough of a Go lexer to see keywords, string literals and parens.
struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.src.as_bytes().get(self.pos + offset).copied()
    }

    fn skip_while(&mut self, pred: impl Fn(u8) -> bool) {
        while let Some(b) = self.peek() {
            if !pred(b) {
                break;
            }
            self.pos += 1;
        }
    }

    fn skip_line_comment(&mut self) {
        self.skip_while(|b| b != b'\n');
    }

    fn skip_block_comment(&mut self) {
        self.pos += 2;
        match self.src[self.pos..].find("*/") {
            Some(end) => self.pos += end + 2,
            None => self.pos = self.src.len(),
        }
    }

    /// Consume a quoted literal starting at the opening delimiter and return
    /// its contents. Interpreted strings and runes stop at a newline when
    /// unterminated; raw strings run to EOF.
    fn quoted(&mut self, delim: u8, raw: bool) -> &'a str {
        self.pos += 1;
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b == delim {
                let body = &self.src[start..self.pos];
                self.pos += 1;
                return body;
            }
            if !raw && b == b'\n' {
                break;
            }
            if !raw && b == b'\\' {
                self.pos += 1;
            }
            self.pos += 1;
        }
        self.pos = self.pos.min(self.src.len());
        &self.src[start..self.pos]
    }
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        loop {
            self.skip_while(|b| b.is_ascii_whitespace());
            let b = self.peek()?;

            match (b, self.peek_at(1)) {
                (b'/', Some(b'/')) => self.skip_line_comment(),
                (b'/', Some(b'*')) => self.skip_block_comment(),
                (b'"', _) => return Some(Token::Str(self.quoted(b'"', false))),
                (b'`', _) => return Some(Token::Str(self.quoted(b'`', true))),
                (b'\'', _) => {
                    self.quoted(b'\'', false);
                    return Some(Token::Other);
                }
                (b'(', _) => {
                    self.pos += 1;
                    return Some(Token::LParen);
                }
                (b')', _) => {
                    self.pos += 1;
                    return Some(Token::RParen);
                }
                (b'.', _) => {
                    self.pos += 1;
                    return Some(Token::Dot);
                }
                (b, _) if b.is_ascii_digit() => {
                    self.skip_while(|b| is_ident_byte(b) || b == b'.');
                    return Some(Token::Other);
                }
                (b, _) if is_ident_byte(b) => {
                    let start = self.pos;
                    self.skip_while(is_ident_byte);
                    return Some(Token::Ident(&self.src[start..self.pos]));
                }
                _ => {
                    self.pos += 1;
                    return Some(Token::Other);
                }
            }
        }
    }
}
