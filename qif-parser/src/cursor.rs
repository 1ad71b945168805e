//! A backtracking view over QIF input.
//!
//! A [`Cursor`] is a `Copy` value: the unread input plus the line and column it starts at.
//! Every recognizer takes the cursor by value and, on a match, returns the matched text
//! together with a new cursor positioned after it.  On a mismatch it returns `None`, and the
//! caller simply carries on with the cursor it already holds.  Trying alternatives is therefore
//! just a matter of calling recognizers on the same cursor until one of them matches.

use qif_core::Location;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Cursor<'i> {
    rest: &'i str,
    line: usize,
    column: usize,
}

impl<'i> Cursor<'i> {
    pub fn new(input: &'i str) -> Self {
        Cursor {
            rest: input,
            line: 1,
            column: 1,
        }
    }

    /// The input that has not been consumed yet.
    pub fn rest(&self) -> &'i str {
        self.rest
    }

    pub fn is_empty(&self) -> bool {
        self.rest.is_empty()
    }

    pub fn location(&self) -> Location {
        Location::new(self.line, self.column)
    }

    /// Consumes `len` bytes, which must end on a character boundary.
    fn advance(self, len: usize) -> Self {
        let (consumed, rest) = self.rest.split_at(len);
        let (mut line, mut column) = (self.line, self.column);
        for c in consumed.chars() {
            if c == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        Cursor { rest, line, column }
    }

    /// Matches `text` at the current position.
    pub fn literal(self, text: &str) -> Option<(&'i str, Self)> {
        if self.rest.starts_with(text) {
            Some((&self.rest[..text.len()], self.advance(text.len())))
        } else {
            None
        }
    }

    /// Matches a `\n` or `\r\n` line terminator.
    pub fn eol(self) -> Option<Self> {
        if self.rest.starts_with('\n') {
            Some(self.advance(1))
        } else if self.rest.starts_with("\r\n") {
            Some(self.advance(2))
        } else {
            None
        }
    }

    /// Matches a line terminator, or the end of input.
    fn end_of_line(self) -> Option<Self> {
        if self.rest.is_empty() {
            Some(self)
        } else {
            self.eol()
        }
    }

    /// Skips spaces and tabs.
    fn blanks(self) -> Self {
        let len = self
            .rest
            .bytes()
            .take_while(|b| *b == b' ' || *b == b'\t')
            .count();
        self.advance(len)
    }

    /// Skips lines that hold nothing but blanks.
    pub fn skip_blank_lines(self) -> Self {
        let mut cursor = self;
        while let Some(next) = cursor.blanks().eol() {
            cursor = next;
        }
        cursor
    }

    /// Consumes the rest of the current line, including its terminator.  The returned text
    /// excludes the terminator.
    fn line(self) -> (&'i str, Self) {
        match self.rest.find('\n') {
            Some(end) => {
                let text = &self.rest[..end];
                (text.strip_suffix('\r').unwrap_or(text), self.advance(end + 1))
            }
            None => {
                let text = self.rest;
                (text.strip_suffix('\r').unwrap_or(text), self.advance(text.len()))
            }
        }
    }

    /// Matches a line starting with the field `code`.  The value is the remainder of the line.
    ///
    /// Codes that share a prefix must be tried longest first: `field("L")` happily matches a
    /// `L[Savings]` line.
    pub fn field(self, code: &str) -> Option<(&'i str, Self)> {
        let (_, cursor) = self.literal(code)?;
        Some(cursor.line())
    }

    /// Matches a date such as `1/ 1'23` or `12/31'99`:
    ///
    /// ```text
    /// digit digit? separator (space | digit) digit ' digit digit
    /// ```
    ///
    /// The matched text is returned as is.
    pub fn date(self, separator: char) -> Option<(&'i str, Self)> {
        let bytes = self.rest.as_bytes();
        let digit = |i: usize| bytes.get(i).map_or(false, u8::is_ascii_digit);

        let mut len = 0;
        if !digit(len) {
            return None;
        }
        len += 1;
        if digit(len) {
            len += 1;
        }
        if !self.rest[len..].starts_with(separator) {
            return None;
        }
        len += separator.len_utf8();
        if !(bytes.get(len) == Some(&b' ') || digit(len)) {
            return None;
        }
        len += 1;
        if !digit(len) {
            return None;
        }
        len += 1;
        if bytes.get(len) != Some(&b'\'') {
            return None;
        }
        len += 1;
        if !(digit(len) && digit(len + 1)) {
            return None;
        }
        len += 2;

        Some((&self.rest[..len], self.advance(len)))
    }

    /// Matches a line holding the field `code` followed by a `/`-separated date and nothing
    /// else.
    pub fn date_field(self, code: &str) -> Option<(&'i str, Self)> {
        let (_, cursor) = self.literal(code)?;
        let (date, cursor) = cursor.date('/')?;
        let cursor = cursor.blanks().end_of_line()?;
        Some((date, cursor))
    }

    /// Matches a section header line such as `!Type:Bank`.  The header must make up the whole
    /// line, so `!Type:Cat` does not match `!Type:Category`.
    pub fn header(self, text: &str) -> Option<Self> {
        let (_, cursor) = self.literal(text)?;
        cursor.blanks().end_of_line()
    }

    /// Matches the `^` line that ends a record.
    pub fn end_of_record(self) -> Option<Self> {
        let (_, cursor) = self.literal("^")?;
        cursor.blanks().end_of_line()
    }

    /// Matches the end of a section: the start of the next section header, or the end of
    /// input.  Blank lines are skipped; the next header is left unconsumed.
    pub fn end_of_section(self) -> Option<Self> {
        let cursor = self.skip_blank_lines();
        if cursor.rest.is_empty() || cursor.rest.starts_with('!') {
            Some(cursor)
        } else {
            None
        }
    }
}
