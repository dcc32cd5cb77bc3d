//! Builds the node tree from lexed segments.

use std::iter::Peekable;
use std::vec::IntoIter;

use crate::functions::FunctionSet;
use crate::{ConfigError, ConfigResult};

use super::lexer::{Item, Segment};

/// Words that start control actions and can never name a function.
const KEYWORDS: [&str; 11] = [
    "block", "break", "continue", "define", "else", "end", "if", "nil", "range", "template",
    "with",
];

/// A parsed template node.
#[derive(Clone, Debug, PartialEq)]
pub(super) enum Node {
    Text(String),
    Action {
        line: usize,
        pipeline: Pipeline,
    },
    /// `then` runs when the pipeline's value is truthy, `otherwise` when it
    /// is not.
    Branch {
        kind: BranchKind,
        line: usize,
        pipeline: Pipeline,
        then: Vec<Node>,
        otherwise: Vec<Node>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum BranchKind {
    If,
    /// Binds dot to the pipeline's value inside `then`.
    With,
}

impl BranchKind {
    const fn keyword(self) -> &'static str {
        match self {
            Self::If => "if",
            Self::With => "with",
        }
    }
}

/// Commands chained with `|`; each result feeds the next command's last
/// argument.
#[derive(Clone, Debug, PartialEq)]
pub(super) struct Pipeline {
    pub(super) commands: Vec<Command>,
}

#[derive(Clone, Debug, PartialEq)]
pub(super) enum Command {
    Call { function: String, args: Vec<Operand> },
    Value(Operand),
}

#[derive(Clone, Debug, PartialEq)]
pub(super) enum Operand {
    Literal(String),
    /// A function named as an argument, called without arguments.
    Function(String),
    Nested(Pipeline),
    /// The value bound by the enclosing `with`.
    Dot,
}

/// Where a run of nodes stopped.
enum Stop {
    Eof,
    End { line: usize },
    Else { line: usize, items: Vec<Item> },
}

pub(super) fn parse_segments(
    template: &str,
    segments: Vec<Segment>,
    functions: &FunctionSet,
) -> ConfigResult<Vec<Node>> {
    let mut parser = TreeParser {
        template,
        functions,
        segments: segments.into_iter(),
    };
    let (nodes, stop) = parser.parse_list()?;
    match stop {
        Stop::Eof => Ok(nodes),
        Stop::End { line } => Err(parser.error(line, "unexpected {{end}}")),
        Stop::Else { line, .. } => Err(parser.error(line, "unexpected {{else}}")),
    }
}

fn keyword(items: &[Item]) -> Option<&'static str> {
    match items.first() {
        Some(Item::Ident(word)) => KEYWORDS
            .into_iter()
            .find(|candidate| *candidate == word.as_str()),
        _ => None,
    }
}

fn after_keyword(items: Vec<Item>) -> Vec<Item> {
    items.into_iter().skip(1).collect()
}

struct TreeParser<'a> {
    template: &'a str,
    functions: &'a FunctionSet,
    segments: IntoIter<Segment>,
}

impl TreeParser<'_> {
    fn parse_list(&mut self) -> ConfigResult<(Vec<Node>, Stop)> {
        let mut nodes = Vec::new();
        while let Some(segment) = self.segments.next() {
            let (line, items) = match segment {
                Segment::Text(text) => {
                    nodes.push(Node::Text(text));
                    continue;
                }
                Segment::Action { line, items } => (line, items),
            };
            match keyword(&items) {
                None => {
                    let pipeline = self.pipeline(line, items, "command")?;
                    nodes.push(Node::Action { line, pipeline });
                }
                Some("end") => {
                    if let Some(extra) = items.get(1) {
                        return Err(self.error(line, format!("unexpected {extra:?} in end")));
                    }
                    return Ok((nodes, Stop::End { line }));
                }
                Some("else") => {
                    let rest = after_keyword(items);
                    return Ok((nodes, Stop::Else { line, items: rest }));
                }
                Some("if") => nodes.push(self.branch(BranchKind::If, line, after_keyword(items))?),
                Some("with") => {
                    nodes.push(self.branch(BranchKind::With, line, after_keyword(items))?);
                }
                Some(other) => {
                    return Err(self.error(line, format!("{other:?} actions are not supported")));
                }
            }
        }
        Ok((nodes, Stop::Eof))
    }

    fn branch(&mut self, kind: BranchKind, line: usize, items: Vec<Item>) -> ConfigResult<Node> {
        let pipeline = self.pipeline(line, items, kind.keyword())?;
        let (then, stop) = self.parse_list()?;
        let otherwise = match stop {
            Stop::End { .. } => Vec::new(),
            Stop::Eof => return Err(self.unclosed(kind, line)),
            Stop::Else {
                line: else_line,
                items: else_items,
            } => self.else_branch(kind, line, else_line, else_items)?,
        };
        Ok(Node::Branch {
            kind,
            line,
            pipeline,
            then,
            otherwise,
        })
    }

    /// Parse what follows `{{else}}`. An `else if` or `else with` chain
    /// shares the closing `{{end}}` of the branch it continues.
    fn else_branch(
        &mut self,
        kind: BranchKind,
        line: usize,
        else_line: usize,
        items: Vec<Item>,
    ) -> ConfigResult<Vec<Node>> {
        let chained = match keyword(&items) {
            Some("if") => Some(BranchKind::If),
            Some("with") => Some(BranchKind::With),
            _ => None,
        };
        if let Some(next) = chained {
            return Ok(vec![self.branch(next, else_line, after_keyword(items))?]);
        }
        if let Some(extra) = items.first() {
            return Err(self.error(else_line, format!("unexpected {extra:?} in else")));
        }
        let (otherwise, stop) = self.parse_list()?;
        match stop {
            Stop::End { .. } => Ok(otherwise),
            Stop::Else { line: extra, .. } => {
                Err(self.error(extra, "expected end; found {{else}}"))
            }
            Stop::Eof => Err(self.unclosed(kind, line)),
        }
    }

    fn pipeline(&self, line: usize, items: Vec<Item>, context: &str) -> ConfigResult<Pipeline> {
        ActionParser {
            template: self.template,
            functions: self.functions,
            line,
            items: items.into_iter().peekable(),
        }
        .parse(context)
    }

    fn unclosed(&self, kind: BranchKind, line: usize) -> ConfigError {
        self.error(
            line,
            format!("unexpected EOF: missing {{{{end}}}} for {}", kind.keyword()),
        )
    }

    fn error(&self, line: usize, message: impl Into<String>) -> ConfigError {
        ConfigError::TemplateParse {
            template: self.template.to_owned(),
            line,
            message: message.into(),
        }
    }
}

struct ActionParser<'a> {
    template: &'a str,
    functions: &'a FunctionSet,
    line: usize,
    items: Peekable<IntoIter<Item>>,
}

impl ActionParser<'_> {
    fn parse(mut self, context: &str) -> ConfigResult<Pipeline> {
        if self.items.peek().is_none() {
            return Err(self.error(format!("missing value for {context}")));
        }
        let pipeline = self.parse_pipeline()?;
        match self.items.next() {
            None => Ok(pipeline),
            Some(Item::RightParen) => Err(self.error("unexpected right paren")),
            Some(other) => Err(self.error(format!("unexpected {other:?} in action"))),
        }
    }

    fn parse_pipeline(&mut self) -> ConfigResult<Pipeline> {
        let mut commands = vec![self.parse_command(true)?];
        while self.items.next_if_eq(&Item::Pipe).is_some() {
            commands.push(self.parse_command(false)?);
        }
        Ok(Pipeline { commands })
    }

    fn parse_command(&mut self, is_first: bool) -> ConfigResult<Command> {
        let mut parsed = Vec::new();
        while let Some(item) = self
            .items
            .next_if(|item| !matches!(item, Item::Pipe | Item::RightParen))
        {
            parsed.push(self.parse_operand(item)?);
        }
        let mut operands = parsed.into_iter();
        let Some(head) = operands.next() else {
            return Err(self.error("missing value for command"));
        };
        match head {
            Operand::Function(function) => Ok(Command::Call {
                function,
                args: operands.collect(),
            }),
            value if !is_first => Err(self.error(format!(
                "non-function {} in pipeline stage",
                describe(&value)
            ))),
            value if !operands.as_slice().is_empty() => Err(self.error(format!(
                "can't give argument to non-function {}",
                describe(&value)
            ))),
            value => Ok(Command::Value(value)),
        }
    }

    fn parse_operand(&mut self, item: Item) -> ConfigResult<Operand> {
        match item {
            Item::Ident(name) if KEYWORDS.contains(&name.as_str()) => {
                Err(self.error(format!("unexpected keyword {name:?} in operand")))
            }
            Item::Ident(name) if self.functions.contains(&name) => Ok(Operand::Function(name)),
            Item::Ident(name) => Err(self.error(format!("function {name:?} not defined"))),
            Item::Str(text) | Item::Number(text) => Ok(Operand::Literal(text)),
            Item::Bool(flag) => Ok(Operand::Literal(flag.to_string())),
            Item::Dot => Ok(Operand::Dot),
            Item::LeftParen => {
                let pipeline = self.parse_pipeline()?;
                if self.items.next_if_eq(&Item::RightParen).is_none() {
                    return Err(self.error("unclosed left paren"));
                }
                Ok(Operand::Nested(pipeline))
            }
            Item::RightParen | Item::Pipe => Err(self.error(format!("unexpected {item:?}"))),
        }
    }

    fn error(&self, message: impl Into<String>) -> ConfigError {
        ConfigError::TemplateParse {
            template: self.template.to_owned(),
            line: self.line,
            message: message.into(),
        }
    }
}

fn describe(operand: &Operand) -> String {
    match operand {
        Operand::Literal(text) => format!("{text:?}"),
        Operand::Function(name) => name.clone(),
        Operand::Nested(_) => String::from("(pipeline)"),
        Operand::Dot => String::from("."),
    }
}
