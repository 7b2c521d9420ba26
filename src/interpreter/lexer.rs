use logos::Logos;

use crate::{ast::Position, error::LexError};

/// The kind of a lexical token.
///
/// Most kinds are recognised directly by the derived logos scanner. `String`,
/// `Call`, `CloseQuote` and `Eof` are never matched by a pattern; [`Lexer`]
/// produces them from its quote state and its one-token lookahead.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(extras = LexerExtras)]
pub enum TokenKind {
    /// Numeric literal tokens, such as `42` or `2.5`.
    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,
    /// `true` or `false`.
    #[token("true")]
    #[token("false")]
    Boolean,
    /// The raw characters between two quotes.
    String,
    /// Identifier tokens; variable names such as `x` or `total`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Name,
    /// An identifier directly followed by `(`, such as `printLn` in
    /// `printLn(x)`.
    Call,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `while`
    #[token("while")]
    While,
    /// `for`
    #[token("for")]
    For,
    /// `var`
    #[token("var")]
    Var,
    /// `function`
    #[token("function")]
    Function,
    /// `return`
    #[token("return")]
    Return,
    /// `string`
    #[token("string")]
    StringType,
    /// `number`
    #[token("number")]
    NumberType,
    /// `bool`
    #[token("bool")]
    BoolType,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>`
    #[token(">")]
    Greater,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `&&`
    #[token("&&")]
    And,
    /// `||`
    #[token("||")]
    Or,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `,`
    #[token(",")]
    Comma,
    /// `;`
    #[token(";")]
    Semicolon,
    /// An opening `"`.
    #[token("\"")]
    Quote,
    /// The `"` that ends a string literal.
    CloseQuote,
    /// `=`
    #[token("=")]
    Equals,
    /// End of input.
    Eof,

    /// `// Comments.`
    #[regex(r"//[^\n]*", logos::skip)]
    Comment,
    /// ```text
    /// /* Multi line comments. */
    /// ```
    ///
    /// Only emitted when the closing `*/` is missing.
    #[token("/*", block_comment)]
    MultiLineComment,
    /// Line breaks.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        lex.extras.line_start = lex.span().end;
        logos::Skip
    })]
    NewLine,
    /// Spaces, tabs and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

/// Skips the rest of a block comment, counting the lines it spans.
fn block_comment(lex: &mut logos::Lexer<TokenKind>) -> logos::Filter<()> {
    let start = lex.span().end;
    let rest = lex.remainder();

    let Some(end) = rest.find("*/") else {
        let len = rest.len();
        lex.bump(len);
        return logos::Filter::Emit(());
    };

    let body = &rest[..end];
    if let Some(last) = body.rfind('\n') {
        let newlines = body.matches('\n').count();
        lex.extras.line += newlines;
        lex.extras.line_start = start + last + 1;
    }
    lex.bump(end + 2);

    logos::Filter::Skip
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Number => "a number",
            Self::Boolean => "a boolean",
            Self::String => "string contents",
            Self::Name => "a name",
            Self::Call => "a function name",
            Self::If => "'if'",
            Self::Else => "'else'",
            Self::While => "'while'",
            Self::For => "'for'",
            Self::Var => "'var'",
            Self::Function => "'function'",
            Self::Return => "'return'",
            Self::StringType => "'string'",
            Self::NumberType => "'number'",
            Self::BoolType => "'bool'",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Star => "'*'",
            Self::Slash => "'/'",
            Self::Percent => "'%'",
            Self::EqualEqual => "'=='",
            Self::BangEqual => "'!='",
            Self::Less => "'<'",
            Self::LessEqual => "'<='",
            Self::Greater => "'>'",
            Self::GreaterEqual => "'>='",
            Self::And => "'&&'",
            Self::Or => "'||'",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::LBrace => "'{'",
            Self::RBrace => "'}'",
            Self::LBracket => "'['",
            Self::RBracket => "']'",
            Self::Comma => "','",
            Self::Semicolon => "';'",
            Self::Quote | Self::CloseQuote => "'\"'",
            Self::Equals => "'='",
            Self::Eof => "end of input",
            Self::Comment | Self::MultiLineComment | Self::NewLine | Self::Ignored => "whitespace",
        };
        write!(f, "{name}")
    }
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line and the byte offset where it starts, so that
/// columns can be computed from token spans.
#[derive(Debug, Default, Clone)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line:       usize,
    /// Byte offset of the first character of the current line.
    pub line_start: usize,
}

/// A token together with its text and where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What the token is.
    pub kind:   TokenKind,
    /// The source text of the token. Empty for [`TokenKind::Eof`].
    pub text:   String,
    /// The 1-based source line.
    pub line:   usize,
    /// The 1-based source column.
    pub column: usize,
}

impl Token {
    /// Where the token starts.
    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }
}

/// Quote state of the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexMode {
    Normal,
    /// Just emitted an opening quote; the next token is the raw contents.
    InsideString,
    /// Just emitted string contents; the next `"` closes the literal.
    ClosingString,
}

/// Turns source text into [`Token`]s, one per call.
///
/// Cloning a lexer snapshots its position, which is how lookahead works: a
/// peek runs a clone and throws it away.
///
/// # Example
/// ```
/// use checklang::interpreter::lexer::{Lexer, TokenKind};
///
/// let mut lexer = Lexer::new("printLn(\"hi\");");
/// let kinds: Vec<TokenKind> = std::iter::from_fn(|| {
///                                 let token = lexer.next_token().ok()?;
///                                 (token.kind != TokenKind::Eof).then_some(token.kind)
///                             }).collect();
///
/// assert_eq!(kinds,
///            [TokenKind::Call,
///             TokenKind::LParen,
///             TokenKind::Quote,
///             TokenKind::String,
///             TokenKind::CloseQuote,
///             TokenKind::RParen,
///             TokenKind::Semicolon]);
/// ```
#[derive(Clone)]
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, TokenKind>,
    mode:  LexMode,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer positioned at the start of `source`.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        let extras = LexerExtras { line:       1,
                                   line_start: 0, };
        Self { inner: TokenKind::lexer_with_extras(source, extras),
               mode:  LexMode::Normal, }
    }

    /// Scans and returns the next token.
    ///
    /// At the end of input this returns an [`TokenKind::Eof`] token, as many
    /// times as it is called.
    ///
    /// # Errors
    /// Returns a [`LexError`] for a character that starts no token, or for a
    /// string literal or block comment that is never closed.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        if self.mode == LexMode::InsideString {
            return self.string_contents();
        }

        let Some(result) = self.inner.next() else {
            return Ok(self.eof());
        };
        let (line, column) = self.span_position();
        let text = self.inner.slice();

        let Ok(mut kind) = result else {
            let character = text.chars().next().unwrap_or('\0');
            return Err(LexError::InvalidCharacter { character,
                                                    pos: Position::new(line, column) });
        };

        match (self.mode, kind) {
            (LexMode::ClosingString, TokenKind::Quote) => {
                kind = TokenKind::CloseQuote;
                self.mode = LexMode::Normal;
            },
            (_, TokenKind::MultiLineComment) => {
                return Err(LexError::UnterminatedComment { pos: Position::new(line, column) });
            },
            (_, TokenKind::Quote) => self.mode = LexMode::InsideString,
            (_, TokenKind::Name) if self.followed_by_paren() => kind = TokenKind::Call,
            _ => {},
        }

        Ok(Token { kind,
                   text: text.to_string(),
                   line,
                   column })
    }

    /// Returns the token [`Lexer::next_token`] would return, without
    /// consuming it.
    ///
    /// # Errors
    /// Same as [`Lexer::next_token`].
    pub fn peek_token(&self) -> Result<Token, LexError> {
        self.clone().next_token()
    }

    /// The line of the next unread character.
    #[must_use]
    pub const fn current_line(&self) -> usize {
        self.inner.extras.line
    }

    /// The column of the next unread character.
    #[must_use]
    pub fn current_column(&self) -> usize {
        self.inner.span().end.saturating_sub(self.inner.extras.line_start) + 1
    }

    fn span_position(&self) -> (usize, usize) {
        let extras = &self.inner.extras;
        (extras.line, self.inner.span().start.saturating_sub(extras.line_start) + 1)
    }

    fn followed_by_paren(&self) -> bool {
        matches!(self.inner.clone().next(), Some(Ok(TokenKind::LParen)))
    }

    fn eof(&self) -> Token {
        Token { kind:   TokenKind::Eof,
                text:   String::new(),
                line:   self.current_line(),
                column: self.current_column(), }
    }

    /// Reads raw characters up to, but not including, the next `"`.
    fn string_contents(&mut self) -> Result<Token, LexError> {
        let start = self.inner.span().end;
        let line = self.current_line();
        let column = self.current_column();
        let rest = self.inner.remainder();

        let Some(len) = rest.find('"') else {
            return Err(LexError::UnterminatedString { pos: Position::new(line, column) });
        };
        let text = rest[..len].to_string();

        if let Some(last) = text.rfind('\n') {
            let newlines = text.matches('\n').count();
            self.inner.extras.line += newlines;
            self.inner.extras.line_start = start + last + 1;
        }
        self.inner.bump(len);
        self.mode = LexMode::ClosingString;

        Ok(Token { kind: TokenKind::String,
                   text,
                   line,
                   column })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(source);
        let mut kinds = Vec::new();
        loop {
            let token = lexer.next_token().unwrap();
            if token.kind == TokenKind::Eof {
                return kinds;
            }
            kinds.push(token.kind);
        }
    }

    #[test]
    fn classifies_keywords_names_and_calls() {
        use TokenKind::*;
        assert_eq!(kinds("var iffy = f(x) + g;"),
                   [Var, Name, Equals, Call, LParen, Name, RParen, Plus, Name, Semicolon]);
        assert_eq!(kinds("function number bool string true"),
                   [Function, NumberType, BoolType, StringType, Boolean]);
    }

    #[test]
    fn two_character_operators() {
        use TokenKind::*;
        assert_eq!(kinds("a<=b<c>=d>e==f!=g=h"),
                   [Name, LessEqual, Name, Less, Name, GreaterEqual, Name, Greater, Name,
                    EqualEqual, Name, BangEqual, Name, Equals, Name]);
    }

    #[test]
    fn string_contents_are_raw() {
        let mut lexer = Lexer::new("\"if (x) 1 + \" y");
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Quote);
        let contents = lexer.next_token().unwrap();
        assert_eq!(contents.kind, TokenKind::String);
        assert_eq!(contents.text, "if (x) 1 + ");
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::CloseQuote);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Name);
    }

    #[test]
    fn empty_string_literal() {
        use TokenKind::*;
        assert_eq!(kinds("\"\""), [Quote, String, CloseQuote]);
    }

    #[test]
    fn comments_are_skipped_and_lines_counted() {
        let mut lexer = Lexer::new("/* one\ntwo */ x // trailing\n  y");
        let x = lexer.next_token().unwrap();
        assert_eq!((x.line, x.column), (2, 8));
        let y = lexer.next_token().unwrap();
        assert_eq!((y.line, y.column), (3, 3));
    }

    #[test]
    fn block_comments() {
        use TokenKind::*;
        assert_eq!(kinds("/**/ a /* b * / c **/ d"), [Name, Name]);
        assert_eq!(kinds("a/*x*/+/*y*/b / c"), [Name, Plus, Name, Slash, Name]);
    }

    #[test]
    fn unterminated_block_comment() {
        let mut lexer = Lexer::new("x\n  /* never closed");
        lexer.next_token().unwrap();
        assert_eq!(lexer.next_token(),
                   Err(LexError::UnterminatedComment { pos: Position::new(2, 3) }));
    }

    #[test]
    fn eof_is_idempotent() {
        let mut lexer = Lexer::new("  ");
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
    }

    #[test]
    fn peek_does_not_consume() {
        let mut lexer = Lexer::new("a b");
        assert_eq!(lexer.peek_token().unwrap().text, "a");
        assert_eq!(lexer.next_token().unwrap().text, "a");
        assert_eq!(lexer.next_token().unwrap().text, "b");
    }

    #[test]
    fn invalid_character() {
        let mut lexer = Lexer::new("x = #;");
        lexer.next_token().unwrap();
        lexer.next_token().unwrap();
        assert_eq!(lexer.next_token(),
                   Err(LexError::InvalidCharacter { character: '#',
                                                    pos:       Position::new(1, 5), }));
    }

    #[test]
    fn unterminated_string() {
        let mut lexer = Lexer::new("\"abc");
        lexer.next_token().unwrap();
        assert!(matches!(lexer.next_token(), Err(LexError::UnterminatedString { .. })));
    }
}
