use std::io::Write;

use crate::ast::*;
use crate::error::{Error, Result};
use crate::value::format_number;

use super::Interpreter;

impl<'a> Interpreter<'a> {
    pub fn execute_action<W: Write>(&mut self, action: &Action, output: &mut W) -> Result<()> {
        for stmt in &action.statements {
            self.execute_stmt(stmt, output)?;
        }
        Ok(())
    }

    pub fn execute_stmt<W: Write>(&mut self, stmt: &Stmt, output: &mut W) -> Result<()> {
        match stmt {
            Stmt::Print { fields } => self.execute_print(fields, output),

            Stmt::Assign { var, value } => {
                let value = self.eval_expr(value);
                self.ctx.set_variable(var, value);
                Ok(())
            }
        }
    }

    /// Write one line and flush it, so output order follows input order
    fn execute_print<W: Write>(&self, fields: &[FieldRef], output: &mut W) -> Result<()> {
        if fields.is_empty() {
            writeln!(output, "{}", self.ctx.current_line).map_err(Error::Io)?;
        } else {
            let values: Vec<String> = fields
                .iter()
                .map(|field| match field {
                    FieldRef::Field(index) => self.ctx.field(*index).to_string(),
                    FieldRef::Var(name) => format_number(self.ctx.variable(name)),
                })
                .collect();
            writeln!(output, "{}", values.join(" ")).map_err(Error::Io)?;
        }
        output.flush().map_err(Error::Io)
    }
}
