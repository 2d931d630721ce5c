//! Very small hand-written lexer for one line of map script.
//!
//! It only breaks the line into `Token`s. Keywords are not recognised
//! here: `spawn`, `on`, `dragon`... all come out as `Ident`, and the
//! parser decides what they mean.
//
//  Lexical items:
//
//      Ident    ::= [A-Za-z_][A-Za-z0-9_]*
//      Number   ::= [0-9]+        (fits in u16)
//      Text     ::= '{' .*? '}'   (no nesting; '}' inside text forbidden)
//      Comma    ::= ','
//      Bang     ::= '!' Ident
//      Whitespace between tokens (any Unicode space) is discarded.

use std::iter::Peekable;
use std::str::Chars;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Ident(String),
    Number(u16),
    Text(String), // everything between { … }
    Comma,
    Bang(String), // `!flag_x`
}

#[derive(Clone)]
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    failed: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            chars: src.chars().peekable(),
            failed: false,
        }
    }

    fn next_char(&mut self) -> Option<char> {
        self.chars.next()
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn consume_while<F: Fn(char) -> bool>(&mut self, pred: F, buf: &mut String) {
        while let Some(c) = self.peek_char() {
            if pred(c) {
                buf.push(c);
                self.next_char();
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self, first: char) -> String {
        let mut id = String::new();
        id.push(first);
        self.consume_while(|c| c.is_ascii_alphanumeric() || c == '_', &mut id);
        id
    }

    fn read_number(&mut self, first: char) -> Result<u16, String> {
        let mut num = String::new();
        num.push(first);
        self.consume_while(|c| c.is_ascii_digit(), &mut num);
        num.parse::<u16>()
            .map_err(|_| format!("value too large for uint16: {num}"))
    }

    fn read_text(&mut self) -> Result<String, String> {
        let mut txt = String::new();
        while let Some(c) = self.next_char() {
            match c {
                '}' => return Ok(txt),
                '{' => return Err("nested { in text".into()),
                c => txt.push(c),
            }
        }
        Err("no closing } found".into())
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token, String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.next_char();
            } else {
                break;
            }
        }

        let ch = self.next_char()?;

        let tok_res = match ch {
            '!' => match self.next_char() {
                Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                    Ok(Token::Bang(self.read_identifier(c)))
                }
                _ => Err("expected flag name after !".to_string()),
            },
            '{' => self.read_text().map(Token::Text),
            ',' => Ok(Token::Comma),
            c if c.is_ascii_digit() => self.read_number(c).map(Token::Number),
            c if c.is_ascii_alphabetic() || c == '_' => Ok(Token::Ident(self.read_identifier(c))),
            e => Err(format!("unexpected character `{e}`")),
        };

        // one lexical error ends the line
        self.failed = tok_res.is_err();
        Some(tok_res)
    }
}

#[cfg(test)]
mod tests {
    use super::{Lexer, Token};

    #[test]
    fn test_tokenisation() {
        let test_cases = vec![
            (
                "spawn dragon at 0,1",
                vec![
                    Token::Ident("spawn".into()),
                    Token::Ident("dragon".into()),
                    Token::Ident("at".into()),
                    Token::Number(0),
                    Token::Comma,
                    Token::Number(1),
                ],
            ),
            (
                "msg {Hello,  world!}",
                vec![
                    Token::Ident("msg".into()),
                    Token::Text("Hello,  world!".into()),
                ],
            ),
            (
                "if !flag_door\ttp 1 , 2 3,4",
                vec![
                    Token::Ident("if".into()),
                    Token::Bang("flag_door".into()),
                    Token::Ident("tp".into()),
                    Token::Number(1),
                    Token::Comma,
                    Token::Number(2),
                    Token::Number(3),
                    Token::Comma,
                    Token::Number(4),
                ],
            ),
            ("   ", vec![]),
        ];

        for (src, expected) in test_cases {
            let tokens: Result<Vec<_>, _> = Lexer::new(src).collect();
            let tokens = tokens.unwrap();
            assert_eq!(tokens, expected, "{src}");
        }
    }

    #[test]
    fn test_lex_errors() {
        let test_cases = vec![
            "bogus-command 5",
            "msg {never closed",
            "msg {a {b} c}",
            "clear 70000,1",
            "if ! flag_a msg {x}",
        ];

        for src in test_cases {
            let tokens: Result<Vec<_>, _> = Lexer::new(src).collect();
            assert!(tokens.is_err(), "{src} should not lex");
        }
    }

    #[test]
    fn test_stops_after_error() {
        let mut lex = Lexer::new("a $ b");
        assert_eq!(lex.next(), Some(Ok(Token::Ident("a".into()))));
        assert!(matches!(lex.next(), Some(Err(_))));
        assert_eq!(lex.next(), None);
    }
}
