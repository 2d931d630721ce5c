//! Parser that consumes the lexer and turns one line into a statement.
//!
//! Command table:
//!
//! | head        | shape                          |
//! |-------------|--------------------------------|
//! | `spawn`     | `spawn <object> at x,y`        |
//! | `paint`     | `paint <background> at x,y`    |
//! | `clear`     | `clear x,y`                    |
//! | `tp`        | `tp x,y x,y`                   |
//! | `msg`       | `msg {text}`                   |
//! | `setflag`   | `setflag flag_<name>`          |
//! | `unsetflag` | `unsetflag flag_<name>`        |
//! | `on`        | `on enter x,y <action>`        |
//! | `if`        | `if [!]flag_<name> <action>`   |
//!
//! `<action>` is any command except `on`. Each line stands alone: the
//! parser keeps no state between calls.

use super::ast::*;
use super::lexer::{Lexer, Token};
use crate::model::tiles::{TileFamily, TileType};

/// Deepest chain of `if`/`on` wrappers accepted on one line.
const MAX_NESTING: usize = 16;

pub fn parse(line: &str) -> ScriptStatement {
    let trimmed = line.trim();
    let kind = if trimmed.is_empty() {
        StatementKind::Blank
    } else if trimmed.starts_with('#') {
        StatementKind::Comment(trimmed.to_string())
    } else {
        match Parser::new(line).parse() {
            Ok(cmd) => StatementKind::Command(cmd),
            Err(reason) => StatementKind::Invalid { reason },
        }
    };

    ScriptStatement {
        raw: line.to_string(),
        kind,
    }
}

fn describe(token: &Token) -> String {
    match token {
        Token::Ident(i) => format!("`{i}`"),
        Token::Number(n) => format!("number {n}"),
        Token::Text(_) => "text literal".to_string(),
        Token::Comma => "`,`".to_string(),
        Token::Bang(flag) => format!("`!{flag}`"),
    }
}

struct Parser<'a> {
    lex: std::iter::Peekable<Lexer<'a>>,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            lex: Lexer::new(src).peekable(),
            depth: 0,
        }
    }

    fn parse(&mut self) -> Result<Cmd, String> {
        let cmd = self.parse_cmd(true)?;
        match self.lex.next() {
            None => Ok(cmd),
            Some(Ok(token)) => Err(format!("unexpected {} after command", describe(&token))),
            Some(Err(e)) => Err(e),
        }
    }

    fn next_token(&mut self, expected: &str) -> Result<Token, String> {
        match self.lex.next() {
            Some(token) => token,
            None => Err(format!("expected {expected}, found end of line")),
        }
    }

    fn parse_cmd(&mut self, allow_trigger: bool) -> Result<Cmd, String> {
        let ident = match self.next_token("command")? {
            Token::Ident(ident) => ident,
            other => return Err(format!("expected command, found {}", describe(&other))),
        };

        let cmd = match ident.as_str() {
            "spawn" => self.parse_spawn()?,
            "paint" => self.parse_paint()?,
            "clear" => Cmd::Clear {
                at: self.parse_cell()?,
            },
            "tp" => self.parse_tp()?,
            "msg" => Cmd::Msg {
                text: self.parse_text()?,
            },
            "setflag" | "unsetflag" => self.parse_flag_cmd(&ident)?,
            "on" if allow_trigger => self.parse_on()?,
            "on" => return Err("`on` triggers cannot be used as an action".to_string()),
            "if" => self.parse_if()?,
            t => return Err(format!("unknown command `{t}`")),
        };

        Ok(cmd)
    }

    fn parse_action(&mut self) -> Result<Box<Cmd>, String> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            return Err("actions nested too deeply".to_string());
        }
        let action = self.parse_cmd(false)?;
        Ok(Box::new(action))
    }

    fn parse_keyword(&mut self, keyword: &str) -> Result<(), String> {
        match self.next_token(&format!("`{keyword}`"))? {
            Token::Ident(ident) if ident == keyword => Ok(()),
            other => Err(format!("expected `{keyword}`, found {}", describe(&other))),
        }
    }

    fn parse_number(&mut self) -> Result<u16, String> {
        match self.next_token("coordinate")? {
            Token::Number(n) => Ok(n),
            other => Err(format!("expected coordinate, found {}", describe(&other))),
        }
    }

    fn parse_cell(&mut self) -> Result<Cell, String> {
        let x = self.parse_number()?;
        match self.next_token("`,`")? {
            Token::Comma => {}
            other => return Err(format!("expected `,`, found {}", describe(&other))),
        }
        let y = self.parse_number()?;
        Ok(Cell { x, y })
    }

    fn parse_tile(&mut self, family: TileFamily) -> Result<TileType, String> {
        let name = match self.next_token(&format!("{family} name"))? {
            Token::Ident(name) => name,
            other => return Err(format!("expected {family} name, found {}", describe(&other))),
        };
        match TileType::from_name(&name) {
            Some(tile) if tile.family() == family && tile != TileType::Delete => Ok(tile),
            Some(_) => Err(format!("`{name}` is not a {family} tile")),
            None => Err(format!("unknown tile `{name}`")),
        }
    }

    fn parse_spawn(&mut self) -> Result<Cmd, String> {
        let object = self.parse_tile(TileFamily::Object)?;
        self.parse_keyword("at")?;
        let at = self.parse_cell()?;
        Ok(Cmd::Spawn { object, at })
    }

    fn parse_paint(&mut self) -> Result<Cmd, String> {
        let background = self.parse_tile(TileFamily::Background)?;
        self.parse_keyword("at")?;
        let at = self.parse_cell()?;
        Ok(Cmd::Paint { background, at })
    }

    fn parse_tp(&mut self) -> Result<Cmd, String> {
        let from = self.parse_cell()?;
        let to = self.parse_cell()?;
        Ok(Cmd::Tp { from, to })
    }

    fn parse_text(&mut self) -> Result<String, String> {
        match self.next_token("text literal")? {
            Token::Text(text) => Ok(text),
            other => Err(format!("expected text literal, found {}", describe(&other))),
        }
    }

    fn parse_on(&mut self) -> Result<Cmd, String> {
        self.parse_keyword("enter")?;
        let at = self.parse_cell()?;
        let action = self.parse_action()?;
        Ok(Cmd::OnEnter { at, action })
    }

    fn parse_if(&mut self) -> Result<Cmd, String> {
        let condition = match self.next_token("flag")? {
            Token::Ident(flag) if flag.starts_with("flag_") => Condition::FlagSet(flag),
            Token::Bang(flag) if flag.starts_with("flag_") => Condition::FlagClear(flag),
            other => return Err(format!("invalid flag token: {}", describe(&other))),
        };
        let action = self.parse_action()?;
        Ok(Cmd::If { condition, action })
    }

    fn parse_flag_cmd(&mut self, op: &str) -> Result<Cmd, String> {
        let flag = match self.next_token("flag")? {
            Token::Ident(f) if f.starts_with("flag_") => f,
            other => return Err(format!("invalid flag token: {}", describe(&other))),
        };

        let cmd = if op == "setflag" {
            Cmd::SetFlag { flag }
        } else {
            Cmd::UnsetFlag { flag }
        };
        Ok(cmd)
    }
}
