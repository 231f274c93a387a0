use std::borrow::Cow;

use crate::error::{Result, TableError};

/// Lexer for tables written as a list of object literals, e.g.
///
/// ```text
/// { falseAlarm: 1, trueAlarm: 1, discardedAlarm: 1, prob: 0.5 },
/// ```
///
/// Tokens never span lines, so every token carries the line it was found in.
/// Strings may contain the escapes `\\`, `\"`, `\'`, `\n` and `\t`.
pub(crate) struct Lexer<'a> {
    raw_input: &'a str,
    cur_state: State,
}

#[derive(PartialEq, Copy, Clone, Debug)]
enum State {
    Between,
    InIdent,
    InNumber,
    InString(char),
    InComment,
}

#[derive(Debug, PartialEq, Clone)]
pub(crate) enum Token<'a> {
    OpenBrace,
    CloseBrace,
    Colon,
    Comma,
    Ident(&'a str),
    Str(Cow<'a, str>),
    Integer(i64),
    Float(f64),
    // Anything else (`[`, `]`, `;`, `=`, ...). Only meaningful outside of
    // records, where it is skipped.
    Punct(char),
}

#[derive(Debug, PartialEq, Clone)]
pub(crate) struct Spanned<'a> {
    pub token: Token<'a>,
    pub line: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(raw_input: &'a str) -> Self {
        Self {
            raw_input,
            cur_state: State::Between,
        }
    }

    pub fn walk(&mut self) -> Result<Vec<Spanned<'a>>> {
        let raw_input = self.raw_input;
        let mut tokens = Vec::new();

        for (line_no, line) in raw_input.lines().enumerate() {
            let line_no = line_no + 1;
            self.cur_state = State::Between;
            // `i` marks the start of the token currently being read.
            let mut i = 0;
            let mut has_escapes = false;
            let mut chrs = line.char_indices().peekable();
            let mut push = |token| tokens.push(Spanned { token, line: line_no });

            while let Some((j, chr)) = chrs.next() {
                let next = chrs.peek().map(|(_, c)| *c);
                let end = j + chr.len_utf8();
                match self.cur_state {
                    State::Between => match chr {
                        c if c.is_whitespace() => (),
                        '{' => push(Token::OpenBrace),
                        '}' => push(Token::CloseBrace),
                        ':' => push(Token::Colon),
                        ',' => push(Token::Comma),
                        '"' | '\'' => {
                            i = end;
                            has_escapes = false;
                            self.cur_state = State::InString(chr);
                        }
                        '/' if next == Some('/') => self.cur_state = State::InComment,
                        '0'..='9' => {
                            i = j;
                            self.cur_state = State::InNumber;
                        }
                        // Signed `Infinity`.
                        '-' | '+' if next == Some('I') => {
                            i = j;
                            self.cur_state = State::InIdent;
                        }
                        '-' | '+' | '.'
                            if next.is_some_and(|c| c.is_ascii_digit() || c == '.') =>
                        {
                            i = j;
                            self.cur_state = State::InNumber;
                        }
                        c if is_ident_start(c) => {
                            i = j;
                            self.cur_state = State::InIdent;
                        }
                        c => push(Token::Punct(c)),
                    },

                    State::InIdent => (),

                    State::InNumber => (),

                    State::InString(quote) => {
                        if chr == quote {
                            let raw = &line[i..j];
                            let text = if has_escapes {
                                Cow::Owned(unescape(raw))
                            } else {
                                Cow::Borrowed(raw)
                            };
                            push(Token::Str(text));
                            self.cur_state = State::Between;
                        } else if chr == '\\' {
                            has_escapes = true;
                            chrs.next();
                        }
                        continue;
                    }

                    // The rest of the line is ignored.
                    State::InComment => break,
                }

                // Single line tokens end as soon as the next character does
                // not belong to them anymore.
                match self.cur_state {
                    State::InIdent if !next.is_some_and(is_ident_continue) => {
                        push(Token::Ident(&line[i..end]));
                        self.cur_state = State::Between;
                    }
                    State::InNumber if !continues_number(chr, next) => {
                        push(number_token(&line[i..end], line_no)?);
                        self.cur_state = State::Between;
                    }
                    _ => (),
                }
            }

            if let State::InString(quote) = self.cur_state {
                return Err(TableError::malformed(
                    line_no,
                    format!("unterminated string, missing closing {quote}"),
                ));
            }
        }
        log::debug!("lexed {} tokens", tokens.len());
        Ok(tokens)
    }
}

fn unescape(raw: &str) -> String {
    let mut text = String::with_capacity(raw.len());
    let mut chrs = raw.chars();
    while let Some(chr) = chrs.next() {
        if chr != '\\' {
            text.push(chr);
            continue;
        }
        match chrs.next() {
            Some('n') => text.push('\n'),
            Some('t') => text.push('\t'),
            Some(other) => text.push(other),
            None => (),
        }
    }
    text
}

fn is_ident_start(chr: char) -> bool {
    chr.is_alphabetic() || chr == '_' || chr == '$'
}

fn is_ident_continue(chr: char) -> bool {
    chr.is_alphanumeric() || chr == '_' || chr == '$'
}

fn continues_number(chr: char, next: Option<char>) -> bool {
    match next {
        Some('0'..='9' | '.' | 'e' | 'E') => true,
        Some('+' | '-') => chr == 'e' || chr == 'E',
        _ => false,
    }
}

fn number_token(raw: &str, line_no: usize) -> Result<Token<'_>> {
    if let Ok(val) = raw.parse::<i64>() {
        return Ok(Token::Integer(val));
    }
    raw.parse::<f64>()
        .map(Token::Float)
        .map_err(|_| TableError::malformed(line_no, format!("invalid number '{raw}'")))
}
