//! The module definition language.
//!
//! Module files are small expression programs: zero or more `let`
//! bindings followed by at most one trailing expression, whose value is
//! the module's export. Identifiers resolve against the injection
//! context supplied by the loader — there is no import construct of any
//! kind, so a module can only see what the injector chose to expose.
//!
//! ```text
//! # a module file
//! let prefix = "/api"
//!
//! {
//!     mount: prefix,
//!     log: logger,          # injected from the registry
//!     here: __dirname,
//! }
//! ```

use indexmap::IndexMap;

use wasla_support::text::suggest_similar;

use crate::value::Value;

/// Maximum number of "did you mean?" entries on an unknown binding.
const MAX_SUGGESTIONS: usize = 3;

/// Errors produced while parsing or evaluating a module.
///
/// The loader owns the file path and attaches it when converting into
/// the crate error type.
#[derive(Debug)]
pub(crate) enum ScriptError {
    Parse {
        /// 1-based line of the offending token.
        line: usize,
        message: String,
    },
    Eval {
        message: String,
        suggestions: Vec<String>,
    },
}

type ScriptResult<T> = Result<T, ScriptError>;

/// Parses and evaluates a module source against an injection context.
///
/// Returns the export — the value of the trailing expression, or
/// [`Value::Null`] for a module of only bindings (or nothing at all).
pub(crate) fn eval_module(
    source: &str,
    context: &IndexMap<String, Value>,
) -> ScriptResult<Value> {
    let tokens = Lexer::new(source).tokenize()?;
    let module = Parser::new(tokens).parse_module()?;

    let mut locals: IndexMap<String, Value> = IndexMap::new();
    for (name, expr) in &module.bindings {
        let value = eval_expr(expr, &locals, context)?;
        locals.insert(name.clone(), value);
    }

    match &module.export {
        Some(expr) => eval_expr(expr, &locals, context),
        None => Ok(Value::Null),
    }
}

// ── Tokens ──

#[derive(Debug, Clone, PartialEq)]
enum Tok {
    Ident(String),
    Str(String),
    Int(i64),
    Float(f64),
    Let,
    True,
    False,
    Null,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    LParen,
    RParen,
    Colon,
    Comma,
    Eq,
    Dot,
    Eof,
}

impl Tok {
    fn describe(&self) -> String {
        match self {
            Tok::Ident(name) => format!("identifier `{name}`"),
            Tok::Str(_) => "string literal".to_string(),
            Tok::Int(n) => format!("`{n}`"),
            Tok::Float(x) => format!("`{x}`"),
            Tok::Let => "`let`".to_string(),
            Tok::True => "`true`".to_string(),
            Tok::False => "`false`".to_string(),
            Tok::Null => "`null`".to_string(),
            Tok::LBracket => "`[`".to_string(),
            Tok::RBracket => "`]`".to_string(),
            Tok::LBrace => "`{`".to_string(),
            Tok::RBrace => "`}`".to_string(),
            Tok::LParen => "`(`".to_string(),
            Tok::RParen => "`)`".to_string(),
            Tok::Colon => "`:`".to_string(),
            Tok::Comma => "`,`".to_string(),
            Tok::Eq => "`=`".to_string(),
            Tok::Dot => "`.`".to_string(),
            Tok::Eof => "end of module".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct Token {
    tok: Tok,
    /// 1-based source line.
    line: usize,
    /// Whether this is the first token on its line. Postfix `[` does
    /// not apply across a line break, so `[` opening a new line starts
    /// a fresh expression instead of indexing the previous one.
    first_on_line: bool,
}

// ── Lexer ──

struct Lexer<'src> {
    source: &'src [u8],
    pos: usize,
    line: usize,
    token_on_line: bool,
}

impl<'src> Lexer<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            source: source.as_bytes(),
            pos: 0,
            line: 1,
            token_on_line: false,
        }
    }

    fn tokenize(mut self) -> ScriptResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = token.tok == Tok::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn next_token(&mut self) -> ScriptResult<Token> {
        self.skip_whitespace_and_comments();

        let first_on_line = !self.token_on_line;
        self.token_on_line = true;
        let line = self.line;

        if self.pos >= self.source.len() {
            return Ok(Token {
                tok: Tok::Eof,
                line,
                first_on_line,
            });
        }

        let ch = self.source[self.pos];

        let tok = if is_ident_start(ch) {
            self.scan_ident_or_keyword()
        } else if ch.is_ascii_digit() || (ch == b'-' && self.peek_next().is_some_and(|b| b.is_ascii_digit())) {
            self.scan_number()?
        } else if ch == b'"' {
            self.scan_string()?
        } else {
            self.pos += 1;
            match ch {
                b'[' => Tok::LBracket,
                b']' => Tok::RBracket,
                b'{' => Tok::LBrace,
                b'}' => Tok::RBrace,
                b'(' => Tok::LParen,
                b')' => Tok::RParen,
                b':' => Tok::Colon,
                b',' => Tok::Comma,
                b'=' => Tok::Eq,
                b'.' => Tok::Dot,
                other => {
                    return Err(self.error(format!(
                        "unexpected character `{}`",
                        char::from(other),
                    )));
                }
            }
        };

        Ok(Token {
            tok,
            line,
            first_on_line,
        })
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while self.pos < self.source.len() && self.source[self.pos].is_ascii_whitespace() {
                if self.source[self.pos] == b'\n' {
                    self.line += 1;
                    self.token_on_line = false;
                }
                self.pos += 1;
            }

            if self.pos < self.source.len() && self.source[self.pos] == b'#' {
                while self.pos < self.source.len() && self.source[self.pos] != b'\n' {
                    self.pos += 1;
                }
                continue;
            }

            break;
        }
    }

    fn scan_ident_or_keyword(&mut self) -> Tok {
        let start = self.pos;
        while self.pos < self.source.len() && is_ident_continue(self.source[self.pos]) {
            self.pos += 1;
        }
        let text = std::str::from_utf8(&self.source[start..self.pos]).unwrap();
        match text {
            "let" => Tok::Let,
            "true" => Tok::True,
            "false" => Tok::False,
            "null" => Tok::Null,
            _ => Tok::Ident(text.to_string()),
        }
    }

    fn scan_number(&mut self) -> ScriptResult<Tok> {
        let start = self.pos;
        if self.source[self.pos] == b'-' {
            self.pos += 1;
        }
        while self.pos < self.source.len() && self.source[self.pos].is_ascii_digit() {
            self.pos += 1;
        }

        let mut is_float = false;
        if self.pos < self.source.len()
            && self.source[self.pos] == b'.'
            && self.peek_next().is_some_and(|b| b.is_ascii_digit())
        {
            is_float = true;
            self.pos += 1;
            while self.pos < self.source.len() && self.source[self.pos].is_ascii_digit() {
                self.pos += 1;
            }
        }

        let text = std::str::from_utf8(&self.source[start..self.pos]).unwrap();
        if is_float {
            text.parse::<f64>()
                .map(Tok::Float)
                .map_err(|_| self.error(format!("invalid float literal `{text}`")))
        } else {
            text.parse::<i64>()
                .map(Tok::Int)
                .map_err(|_| self.error(format!("integer literal `{text}` out of range")))
        }
    }

    fn scan_string(&mut self) -> ScriptResult<Tok> {
        self.pos += 1; // opening quote
        let mut text = String::new();

        loop {
            if self.pos >= self.source.len() || self.source[self.pos] == b'\n' {
                return Err(self.error("unterminated string literal".to_string()));
            }
            match self.source[self.pos] {
                b'"' => {
                    self.pos += 1;
                    return Ok(Tok::Str(text));
                }
                b'\\' => {
                    self.pos += 1;
                    let escape = self
                        .source
                        .get(self.pos)
                        .copied()
                        .ok_or_else(|| self.error("unterminated string literal".to_string()))?;
                    match escape {
                        b'"' => text.push('"'),
                        b'\\' => text.push('\\'),
                        b'n' => text.push('\n'),
                        b't' => text.push('\t'),
                        b'r' => text.push('\r'),
                        other => {
                            return Err(self.error(format!(
                                "unknown escape `\\{}`",
                                char::from(other),
                            )));
                        }
                    }
                    self.pos += 1;
                }
                other => {
                    // Multi-byte UTF-8 sequences pass through byte by byte.
                    if other.is_ascii() {
                        text.push(char::from(other));
                        self.pos += 1;
                    } else {
                        let rest = std::str::from_utf8(&self.source[self.pos..])
                            .map_err(|_| self.error("invalid UTF-8 in string".to_string()))?;
                        let ch = rest.chars().next().unwrap();
                        text.push(ch);
                        self.pos += ch.len_utf8();
                    }
                }
            }
        }
    }

    fn peek_next(&self) -> Option<u8> {
        self.source.get(self.pos + 1).copied()
    }

    fn error(&self, message: String) -> ScriptError {
        ScriptError::Parse {
            line: self.line,
            message,
        }
    }
}

fn is_ident_start(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_'
}

fn is_ident_continue(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || ch == b'_'
}

// ── AST & parser ──

#[derive(Debug, Clone)]
enum Expr {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Ident(String),
    List(Vec<Expr>),
    Map(Vec<(String, Expr)>),
    Field(Box<Expr>, String),
    Index(Box<Expr>, Box<Expr>),
}

#[derive(Debug)]
struct Module {
    bindings: Vec<(String, Expr)>,
    export: Option<Expr>,
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn parse_module(mut self) -> ScriptResult<Module> {
        let mut bindings = Vec::new();

        while self.peek().tok == Tok::Let {
            self.advance();
            let name = self.expect_ident()?;
            self.expect(&Tok::Eq)?;
            let expr = self.parse_expr()?;
            bindings.push((name, expr));
        }

        let export = if self.peek().tok == Tok::Eof {
            None
        } else {
            Some(self.parse_expr()?)
        };

        if self.peek().tok != Tok::Eof {
            return Err(self.error_here(format!(
                "expected end of module after the export expression, found {}",
                self.peek().tok.describe(),
            )));
        }

        Ok(Module { bindings, export })
    }

    fn parse_expr(&mut self) -> ScriptResult<Expr> {
        let mut expr = self.parse_primary()?;

        loop {
            let next = self.peek().clone();
            if next.tok == Tok::Dot {
                self.advance();
                let field = self.expect_ident()?;
                expr = Expr::Field(Box::new(expr), field);
            } else if next.tok == Tok::LBracket && !next.first_on_line {
                // `[` on a new line opens a fresh expression, not an index.
                self.advance();
                let index = self.parse_expr()?;
                self.expect(&Tok::RBracket)?;
                expr = Expr::Index(Box::new(expr), Box::new(index));
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn parse_primary(&mut self) -> ScriptResult<Expr> {
        let token = self.peek().clone();
        match token.tok {
            Tok::Null => {
                self.advance();
                Ok(Expr::Null)
            }
            Tok::True => {
                self.advance();
                Ok(Expr::Bool(true))
            }
            Tok::False => {
                self.advance();
                Ok(Expr::Bool(false))
            }
            Tok::Int(n) => {
                self.advance();
                Ok(Expr::Int(n))
            }
            Tok::Float(x) => {
                self.advance();
                Ok(Expr::Float(x))
            }
            Tok::Str(s) => {
                self.advance();
                Ok(Expr::Str(s))
            }
            Tok::Ident(name) => {
                self.advance();
                Ok(Expr::Ident(name))
            }
            Tok::LBracket => self.parse_list(),
            Tok::LBrace => self.parse_map(),
            Tok::LParen => {
                self.advance();
                let expr = self.parse_expr()?;
                self.expect(&Tok::RParen)?;
                Ok(expr)
            }
            other => Err(self.error_here(format!(
                "expected an expression, found {}",
                other.describe(),
            ))),
        }
    }

    fn parse_list(&mut self) -> ScriptResult<Expr> {
        self.expect(&Tok::LBracket)?;
        let mut items = Vec::new();

        while self.peek().tok != Tok::RBracket {
            items.push(self.parse_expr()?);
            if self.peek().tok == Tok::Comma {
                self.advance();
            } else {
                break;
            }
        }

        self.expect(&Tok::RBracket)?;
        Ok(Expr::List(items))
    }

    fn parse_map(&mut self) -> ScriptResult<Expr> {
        self.expect(&Tok::LBrace)?;
        let mut entries = Vec::new();

        while self.peek().tok != Tok::RBrace {
            let key = match self.peek().tok.clone() {
                Tok::Ident(name) => {
                    self.advance();
                    name
                }
                Tok::Str(s) => {
                    self.advance();
                    s
                }
                other => {
                    return Err(self.error_here(format!(
                        "expected a map key, found {}",
                        other.describe(),
                    )));
                }
            };
            self.expect(&Tok::Colon)?;
            let value = self.parse_expr()?;
            entries.push((key, value));

            if self.peek().tok == Tok::Comma {
                self.advance();
            } else {
                break;
            }
        }

        self.expect(&Tok::RBrace)?;
        Ok(Expr::Map(entries))
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn advance(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn expect(&mut self, wanted: &Tok) -> ScriptResult<()> {
        if &self.peek().tok == wanted {
            self.advance();
            Ok(())
        } else {
            Err(self.error_here(format!(
                "expected {}, found {}",
                wanted.describe(),
                self.peek().tok.describe(),
            )))
        }
    }

    fn expect_ident(&mut self) -> ScriptResult<String> {
        match self.peek().tok.clone() {
            Tok::Ident(name) => {
                self.advance();
                Ok(name)
            }
            other => Err(self.error_here(format!(
                "expected an identifier, found {}",
                other.describe(),
            ))),
        }
    }

    fn error_here(&self, message: String) -> ScriptError {
        ScriptError::Parse {
            line: self.peek().line,
            message,
        }
    }
}

// ── Evaluator ──

fn eval_expr(
    expr: &Expr,
    locals: &IndexMap<String, Value>,
    context: &IndexMap<String, Value>,
) -> ScriptResult<Value> {
    match expr {
        Expr::Null => Ok(Value::Null),
        Expr::Bool(b) => Ok(Value::Bool(*b)),
        Expr::Int(n) => Ok(Value::Int(*n)),
        Expr::Float(x) => Ok(Value::Float(*x)),
        Expr::Str(s) => Ok(Value::Str(s.clone())),

        Expr::Ident(name) => locals
            .get(name)
            .or_else(|| context.get(name))
            .cloned()
            .ok_or_else(|| unknown_binding(name, locals, context)),

        Expr::List(items) => {
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                values.push(eval_expr(item, locals, context)?);
            }
            Ok(Value::List(values))
        }

        Expr::Map(entries) => {
            let mut map = IndexMap::with_capacity(entries.len());
            for (key, value_expr) in entries {
                let value = eval_expr(value_expr, locals, context)?;
                map.insert(key.clone(), value);
            }
            Ok(Value::Map(map))
        }

        Expr::Field(base, field) => {
            let base = eval_expr(base, locals, context)?;
            match &base {
                Value::Map(entries) => entries.get(field).cloned().ok_or_else(|| {
                    let keys: Vec<&str> = entries.keys().map(String::as_str).collect();
                    ScriptError::Eval {
                        message: format!("map has no field `{field}`"),
                        suggestions: suggest_similar(field, &keys, MAX_SUGGESTIONS),
                    }
                }),
                other => Err(ScriptError::Eval {
                    message: format!(
                        "cannot access field `{field}` on a {}",
                        other.type_name(),
                    ),
                    suggestions: Vec::new(),
                }),
            }
        }

        Expr::Index(base, index) => {
            let base = eval_expr(base, locals, context)?;
            let index = eval_expr(index, locals, context)?;
            match (&base, &index) {
                (Value::List(items), Value::Int(i)) => {
                    let at = usize::try_from(*i).ok().and_then(|i| items.get(i));
                    at.cloned().ok_or_else(|| ScriptError::Eval {
                        message: format!(
                            "index {i} out of bounds for a list of {}",
                            items.len(),
                        ),
                        suggestions: Vec::new(),
                    })
                }
                (Value::Map(entries), Value::Str(key)) => {
                    entries.get(key).cloned().ok_or_else(|| {
                        let keys: Vec<&str> = entries.keys().map(String::as_str).collect();
                        ScriptError::Eval {
                            message: format!("map has no key `{key}`"),
                            suggestions: suggest_similar(key, &keys, MAX_SUGGESTIONS),
                        }
                    })
                }
                (base, index) => Err(ScriptError::Eval {
                    message: format!(
                        "cannot index a {} with a {}",
                        base.type_name(),
                        index.type_name(),
                    ),
                    suggestions: Vec::new(),
                }),
            }
        }
    }
}

fn unknown_binding(
    name: &str,
    locals: &IndexMap<String, Value>,
    context: &IndexMap<String, Value>,
) -> ScriptError {
    let known: Vec<&str> = locals
        .keys()
        .chain(context.keys())
        .map(String::as_str)
        .collect();
    ScriptError::Eval {
        message: format!("unknown binding `{name}`"),
        suggestions: suggest_similar(name, &known, MAX_SUGGESTIONS),
    }
}
