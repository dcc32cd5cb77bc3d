//! Evaluates parsed templates against a function set.

use crate::functions::{FunctionSet, is_truthy};
use crate::{ConfigError, ConfigResult};

use super::parser::{BranchKind, Command, Node, Operand, Pipeline};

pub(super) struct Executor<'a> {
    template: &'a str,
    functions: &'a FunctionSet,
}

impl<'a> Executor<'a> {
    pub(super) const fn new(template: &'a str, functions: &'a FunctionSet) -> Self {
        Self {
            template,
            functions,
        }
    }

    /// Render `nodes`. Outside any `with`, dot is the empty string.
    pub(super) fn render(&self, nodes: &[Node]) -> ConfigResult<String> {
        let mut out = String::new();
        self.write_nodes(nodes, "", &mut out)?;
        Ok(out)
    }

    fn write_nodes(&self, nodes: &[Node], dot: &str, out: &mut String) -> ConfigResult<()> {
        for node in nodes {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Action { line, pipeline } => {
                    out.push_str(&self.pipeline(pipeline, dot, *line)?);
                }
                Node::Branch {
                    kind,
                    line,
                    pipeline,
                    then,
                    otherwise,
                } => {
                    let value = self.pipeline(pipeline, dot, *line)?;
                    if is_truthy(&value) {
                        let scope = if *kind == BranchKind::With {
                            value.as_str()
                        } else {
                            dot
                        };
                        self.write_nodes(then, scope, out)?;
                    } else {
                        self.write_nodes(otherwise, dot, out)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn pipeline(&self, pipeline: &Pipeline, dot: &str, line: usize) -> ConfigResult<String> {
        let mut piped: Option<String> = None;
        for command in &pipeline.commands {
            piped = Some(self.command(command, piped.take(), dot, line)?);
        }
        Ok(piped.unwrap_or_default())
    }

    fn command(
        &self,
        command: &Command,
        piped: Option<String>,
        dot: &str,
        line: usize,
    ) -> ConfigResult<String> {
        match command {
            Command::Call { function, args } => {
                let mut values = args
                    .iter()
                    .map(|arg| self.operand(arg, dot, line))
                    .collect::<ConfigResult<Vec<_>>>()?;
                values.extend(piped);
                self.call(function, &values, line)
            }
            Command::Value(operand) => self.operand(operand, dot, line),
        }
    }

    fn operand(&self, operand: &Operand, dot: &str, line: usize) -> ConfigResult<String> {
        match operand {
            Operand::Literal(text) => Ok(text.clone()),
            Operand::Function(function) => self.call(function, &[], line),
            Operand::Nested(pipeline) => self.pipeline(pipeline, dot, line),
            Operand::Dot => Ok(dot.to_owned()),
        }
    }

    fn call(&self, function: &str, args: &[String], line: usize) -> ConfigResult<String> {
        let callable =
            self.functions
                .get(function)
                .ok_or_else(|| ConfigError::TemplateExecution {
                    template: self.template.to_owned(),
                    line,
                    function: function.to_owned(),
                    source: "function is not registered".into(),
                })?;
        callable(args).map_err(|source| ConfigError::TemplateExecution {
            template: self.template.to_owned(),
            line,
            function: function.to_owned(),
            source,
        })
    }
}
