//! Tokenizer for AVM assembly text.

use crate::diagnostics::Diagnostics;
use crate::error::AsmError;
use avm_common::{Opcode, OperandKind};
use tracing::debug;

/// The category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// An instruction keyword (`push`, `add`, ...).
    Opcode(Opcode),
    /// An operand type keyword (`int8`, `double`, ...).
    Type(OperandKind),
    /// A number without a decimal point.
    Integer,
    /// A number with a decimal point.
    Decimal,
    LParen,
    RParen,
    Newline,
    /// `;` to end of line. Never returned by [`tokenize`].
    Comment,
    /// Physical end of the source.
    EndOfFile,
    /// The interactive `;;` terminator.
    EndOfInput,
    /// An identifier that is not a keyword.
    Unknown,
    /// Text skipped after a lexical error in collect mode. The error has
    /// already been reported.
    Invalid,
}

/// A single token with its 1-indexed source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            column,
        }
    }

    /// True for the two end markers.
    pub fn is_end(&self) -> bool {
        matches!(self.kind, TokenKind::EndOfFile | TokenKind::EndOfInput)
    }

    /// How the token reads in an error message.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Newline => "end of line".to_string(),
            TokenKind::EndOfFile => "end of file".to_string(),
            _ => self.text.clone(),
        }
    }
}

/// Character cursor over the source.
struct Lexer<'d> {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
    interactive: bool,
    diag: &'d mut Diagnostics,
}

impl<'d> Lexer<'d> {
    fn new(source: &str, interactive: bool, diag: &'d mut Diagnostics) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            interactive,
            diag,
        }
    }

    fn current(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos + 1).copied()
    }

    fn advance(&mut self) {
        if let Some(c) = self.current() {
            self.pos += 1;
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    /// Consume characters while `pred` holds, returning them.
    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut text = String::new();
        while let Some(c) = self.current().filter(|&c| pred(c)) {
            text.push(c);
            self.advance();
        }
        text
    }

    fn skip_whitespace(&mut self) {
        self.take_while(|c| c.is_whitespace() && c != '\n');
    }

    fn next_token(&mut self) -> Result<Token, AsmError> {
        self.skip_whitespace();

        let (line, column) = (self.line, self.column);
        let Some(c) = self.current() else {
            return Ok(Token::new(TokenKind::EndOfFile, "", line, column));
        };

        let token = match c {
            ';' if self.interactive && self.peek() == Some(';') => {
                self.advance();
                self.advance();
                Token::new(TokenKind::EndOfInput, ";;", line, column)
            }
            ';' => {
                let text = self.take_while(|c| c != '\n');
                Token::new(TokenKind::Comment, text, line, column)
            }
            '\n' => {
                self.advance();
                Token::new(TokenKind::Newline, "\n", line, column)
            }
            '(' => {
                self.advance();
                Token::new(TokenKind::LParen, "(", line, column)
            }
            ')' => {
                self.advance();
                Token::new(TokenKind::RParen, ")", line, column)
            }
            '+' | '-' if self.peek().is_some_and(|n| n.is_ascii_digit()) => self.read_number(),
            c if c.is_ascii_digit() => self.read_number(),
            c if c.is_ascii_alphabetic() => self.read_identifier(),
            c => {
                self.diag.report(AsmError::UnexpectedCharacter { line, column, ch: c })?;
                let text = self.take_while(|c| c != '\n');
                Token::new(TokenKind::Invalid, text, line, column)
            }
        };
        Ok(token)
    }

    fn read_number(&mut self) -> Token {
        let (line, column) = (self.line, self.column);
        let mut text = String::new();

        if let Some(sign @ ('+' | '-')) = self.current() {
            text.push(sign);
            self.advance();
        }
        text.push_str(&self.take_while(|c| c.is_ascii_digit()));

        let mut kind = TokenKind::Integer;
        if self.current() == Some('.') && self.peek().is_some_and(|c| c.is_ascii_digit()) {
            kind = TokenKind::Decimal;
            text.push('.');
            self.advance();
            text.push_str(&self.take_while(|c| c.is_ascii_digit()));
        }

        Token::new(kind, text, line, column)
    }

    fn read_identifier(&mut self) -> Token {
        let (line, column) = (self.line, self.column);
        let word = self.take_while(|c| c.is_ascii_alphanumeric());
        Token::new(keyword_kind(&word), word, line, column)
    }
}

/// Look a word up in the keyword table.
fn keyword_kind(word: &str) -> TokenKind {
    if let Some(op) = Opcode::from_mnemonic(word) {
        TokenKind::Opcode(op)
    } else if let Some(kind) = OperandKind::from_name(word) {
        TokenKind::Type(kind)
    } else {
        TokenKind::Unknown
    }
}

/// Tokenize a whole source text.
///
/// Comments are dropped. The result always ends with exactly one end
/// marker: [`TokenKind::EndOfInput`] when `interactive` and `;;` was seen
/// (anything after it is ignored), [`TokenKind::EndOfFile`] otherwise. In
/// interactive mode reaching physical end of file is reported as
/// [`AsmError::MissingTerminator`].
///
/// # Errors
///
/// In fail-fast mode, the first lexical error. In collect mode errors are
/// recorded in `diag` and this always succeeds.
pub fn tokenize(
    source: &str,
    interactive: bool,
    diag: &mut Diagnostics,
) -> Result<Vec<Token>, AsmError> {
    let mut lexer = Lexer::new(source, interactive, diag);
    let mut tokens = Vec::new();

    loop {
        let token = lexer.next_token()?;
        match token.kind {
            TokenKind::Comment => {}
            TokenKind::EndOfInput => {
                tokens.push(token);
                break;
            }
            TokenKind::EndOfFile => {
                if interactive {
                    lexer
                        .diag
                        .report(AsmError::MissingTerminator { line: token.line })?;
                }
                tokens.push(token);
                break;
            }
            _ => tokens.push(token),
        }
    }

    debug!(count = tokens.len(), interactive, "tokenized source");
    Ok(tokens)
}
